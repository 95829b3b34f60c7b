//! PDF document writer.
//!
//! Assembles a complete PDF file from a [`Compositor`]: header, body,
//! xref table, trailer and footer.

use super::object_serializer::ObjectSerializer;
use crate::error::{Error, Result};
use crate::object::{Dictionary, Object, ObjectRef};
use crate::writer::Compositor;
use std::io::Write;

/// Configuration for PDF generation.
#[derive(Debug, Clone)]
pub struct PdfWriterConfig {
    /// PDF version written in the header (e.g., "1.4")
    pub version: String,
}

impl Default for PdfWriterConfig {
    fn default() -> Self {
        Self {
            version: "1.4".to_string(),
        }
    }
}

impl PdfWriterConfig {
    /// Set the header version.
    pub fn with_version(mut self, version: impl Into<String>) -> Self {
        self.version = version.into();
        self
    }
}

/// Write adapter that tracks how many bytes have passed through it.
struct CountingWriter<W> {
    inner: W,
    position: usize,
}

impl<W: Write> CountingWriter<W> {
    fn new(inner: W) -> Self {
        Self { inner, position: 0 }
    }
}

impl<W: Write> Write for CountingWriter<W> {
    fn write(&mut self, buf: &[u8]) -> std::io::Result<usize> {
        let written = self.inner.write(buf)?;
        self.position += written;
        Ok(written)
    }

    fn flush(&mut self) -> std::io::Result<()> {
        self.inner.flush()
    }
}

/// PDF document writer.
#[derive(Debug, Clone, Default)]
pub struct PdfWriter {
    config: PdfWriterConfig,
    serializer: ObjectSerializer,
}

impl PdfWriter {
    /// Create a new PDF writer with default config.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a PDF writer with custom config.
    pub fn with_config(config: PdfWriterConfig) -> Self {
        Self {
            config,
            serializer: ObjectSerializer::new(),
        }
    }

    /// Write the compositor's document into `sink`, returning the number of
    /// bytes written.
    ///
    /// Every stream's `/Length` node is filled in as the stream is written;
    /// that is the only change made to the compositor.
    pub fn write<W: Write>(&self, compositor: &mut Compositor, sink: W) -> Result<usize> {
        check_references(compositor)?;

        let mut out = CountingWriter::new(sink);
        writeln!(out, "%PDF-{}", self.config.version)?;

        let mut offsets = Vec::with_capacity(compositor.len());
        for index in 0..compositor.len() {
            let object = &compositor.objects()[index];
            offsets.push((out.position, object.reference.gen));

            writeln!(out, "{} {} obj", object.reference.id, object.reference.gen)?;
            self.serializer.write_indent(&mut out, 1)?;
            let length_patch = match &object.value {
                Object::Stream(stream) => {
                    let length = self.serializer.write_stream(&mut out, stream, 1)?;
                    stream.length_ref().map(|length_ref| (length_ref, length))
                },
                value => {
                    self.serializer.write_object(&mut out, value, 1)?;
                    None
                },
            };
            write!(out, "\nendobj\n")?;

            // The length node comes after its stream, so it has not been
            // written yet
            if let Some((length_ref, length)) = length_patch {
                *compositor.get_mut(length_ref)? = Object::Integer(length as i64);
            }
        }

        let xref_start = out.position;
        writeln!(out, "xref")?;
        let start_id = compositor.start_id();
        if start_id == 1 {
            writeln!(out, "0 {}", offsets.len() + 1)?;
            writeln!(out, "0000000000 65535 f ")?;
        } else {
            writeln!(out, "0 1")?;
            writeln!(out, "0000000000 65535 f ")?;
            writeln!(out, "{} {}", start_id, offsets.len())?;
        }
        for (offset, gen) in &offsets {
            writeln!(out, "{:010} {:05} n ", offset, gen)?;
        }

        let size = i64::from(start_id) + offsets.len() as i64;
        let trailer = Dictionary::new()
            .with_entry("Size", size)
            .with_entry("Root", compositor.catalog());
        writeln!(out, "trailer")?;
        self.serializer.write_dictionary(&mut out, &trailer, 0)?;
        writeln!(out)?;
        writeln!(out, "startxref")?;
        writeln!(out, "{}", xref_start)?;
        writeln!(out, "%%EOF")?;
        out.flush()?;

        log::info!(
            "Wrote PDF: {} objects, {} pages, {} bytes",
            offsets.len(),
            compositor.page_count(compositor.root_pages()).unwrap_or(0),
            out.position
        );
        Ok(out.position)
    }

    /// Write the document into a new byte buffer.
    pub fn finish(&self, compositor: &mut Compositor) -> Result<Vec<u8>> {
        let mut output = Vec::new();
        self.write(compositor, &mut output)?;
        Ok(output)
    }

    /// Save the document to a file.
    pub fn save(&self, compositor: &mut Compositor, path: impl AsRef<std::path::Path>) -> Result<()> {
        let file = std::fs::File::create(path)?;
        self.write(compositor, std::io::BufWriter::new(file))?;
        Ok(())
    }
}

/// Serialize a document with the default writer configuration.
pub fn write_pdf(compositor: &mut Compositor) -> Result<Vec<u8>> {
    PdfWriter::new().finish(compositor)
}

/// Fail if any reference in the graph, or the catalog itself, names a node
/// the compositor never allocated.
fn check_references(compositor: &Compositor) -> Result<()> {
    if !compositor.contains(compositor.catalog()) {
        return Err(Error::DanglingReference(compositor.catalog()));
    }
    for object in compositor.objects() {
        let mut dangling: Option<ObjectRef> = None;
        object.value.for_each_reference(&mut |reference| {
            if dangling.is_none() && !compositor.contains(reference) {
                dangling = Some(reference);
            }
        });
        if let Some(reference) = dangling {
            return Err(Error::DanglingReference(reference));
        }
    }
    Ok(())
}
