//! PDF writing module for generating PDF files.
//!
//! ## Architecture
//!
//! ```text
//! layout engine
//!     ↓
//! [Compositor] + page tree (arena of addressable objects, page/resource builders)
//!     ↓
//! [ContentStreamBuilder] (per-page text operators, merged on insertion)
//!     ↓
//! [PdfWriter] (header, objects, xref table, trailer)
//!     ↓
//! [ObjectSerializer] (value syntax)
//!     ↓
//! PDF bytes
//! ```
//!
//! ## Example
//!
//! ```
//! use screenplay_pdf::writer::{Compositor, write_pdf};
//!
//! let mut compositor = Compositor::new();
//! let root = compositor.root_pages();
//! compositor.set_media_box(&root, 0, 0, 612, 792)?;
//! let courier = compositor.resources(&root)?.add_simple_type1_font("Courier")?;
//!
//! let page = compositor.add_page(root)?;
//! compositor
//!     .page(page)?
//!     .set_font(&courier, 12.0)
//!     .set_matrix(1.0, 0.0, 0.0, 1.0, 108.0, 720.0)
//!     .write_text("FADE IN:");
//!
//! let bytes = write_pdf(&mut compositor)?;
//! assert!(bytes.starts_with(b"%PDF-1.4"));
//! # Ok::<(), screenplay_pdf::Error>(())
//! ```

mod compositor;
mod content_stream;
mod object_serializer;
mod page_tree;
mod pdf_writer;

pub use compositor::Compositor;
pub use content_stream::{ContentStreamBuilder, TextCommand};
pub use object_serializer::ObjectSerializer;
pub use page_tree::{FontId, Page, PageBuilder, PageCollection, PageTreeNode, ResourceBuilder};
pub use pdf_writer::{PdfWriter, PdfWriterConfig, write_pdf};
