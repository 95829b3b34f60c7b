//! Page tree construction.
//!
//! Pages and page collections are plain handles into the
//! [`Compositor`]; all mutation goes through the compositor so that builders
//! never own or point back at each other.

use crate::error::{Error, Result};
use crate::object::{Dictionary, Object, ObjectRef};
use crate::writer::{Compositor, ContentStreamBuilder};
use std::fmt;

/// A node of the page tree that can carry inheritable attributes
/// (`MediaBox`, `Resources`).
pub trait PageTreeNode {
    /// The node's dictionary.
    fn node(&self) -> ObjectRef;
}

/// Handle to a `/Pages` dictionary.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PageCollection {
    node: ObjectRef,
}

impl PageCollection {
    pub(crate) fn new(node: ObjectRef) -> Self {
        Self { node }
    }
}

impl PageTreeNode for PageCollection {
    fn node(&self) -> ObjectRef {
        self.node
    }
}

/// Handle to a `/Page` dictionary and its content stream.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Page {
    node: ObjectRef,
    contents: ObjectRef,
}

impl Page {
    /// The page's content stream object.
    pub fn contents(&self) -> ObjectRef {
        self.contents
    }
}

impl PageTreeNode for Page {
    fn node(&self) -> ObjectRef {
        self.node
    }
}

/// Resource name of a registered font (`F1`, `F2`, ...).
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct FontId(String);

impl FontId {
    pub(crate) fn new(name: String) -> Self {
        Self(name)
    }

    /// The resource name without the leading slash.
    pub fn name(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for FontId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "/{}", self.0)
    }
}

/// Get the dictionary stored under `key`, inserting an empty one first if the
/// key is absent.
fn child_dictionary<'d>(dict: &'d mut Dictionary, key: &str) -> Result<&'d mut Dictionary> {
    if !dict.contains_key(key) {
        dict.set(key, Dictionary::new())?;
    }
    match dict.get_mut(key) {
        Some(Object::Dictionary(child)) => Ok(child),
        other => Err(Error::InvalidObjectType {
            expected: "Dictionary".to_string(),
            found: other.map_or("nothing", |o| o.type_name()).to_string(),
        }),
    }
}

impl Compositor {
    /// Append a new page to `parent`.
    ///
    /// Allocates the page dictionary, then its content stream and length.
    /// The page is pushed onto the parent's `/Kids` and `/Count` goes up by one.
    pub fn add_page(&mut self, parent: PageCollection) -> Result<Page> {
        let node = self.allocate(Dictionary::typed("Page").with_entry("Parent", parent.node()));
        let contents = self.stream_object(ContentStreamBuilder::new());
        self.dictionary_mut(node)?.set("Contents", contents)?;

        let collection = self.dictionary_mut(parent.node())?;
        match collection.get_mut("Kids") {
            Some(Object::Array(kids)) => kids.push(node.into()),
            other => {
                return Err(Error::InvalidObjectType {
                    expected: "Array".to_string(),
                    found: other.map_or("nothing", |o| o.type_name()).to_string(),
                })
            },
        }
        match collection.get_mut("Count") {
            Some(Object::Integer(count)) => *count += 1,
            other => {
                return Err(Error::InvalidObjectType {
                    expected: "Integer".to_string(),
                    found: other.map_or("nothing", |o| o.type_name()).to_string(),
                })
            },
        }

        log::debug!("Added page {} (contents {})", node, contents);
        Ok(Page { node, contents })
    }

    /// Number of pages directly under `collection`.
    pub fn page_count(&self, collection: PageCollection) -> Result<i64> {
        self.dictionary(collection.node())?
            .get::<i64>("Count")
            .ok_or_else(|| Error::InvalidObjectType {
                expected: "Integer".to_string(),
                found: "nothing".to_string(),
            })
    }

    /// Set the node's `/MediaBox` to integer point coordinates.
    pub fn set_media_box(
        &mut self,
        node: &impl PageTreeNode,
        llx: i64,
        lly: i64,
        urx: i64,
        ury: i64,
    ) -> Result<()> {
        let media_box: Vec<Object> = [llx, lly, urx, ury].into_iter().map(Object::Integer).collect();
        self.dictionary_mut(node.node())?.set("MediaBox", media_box)?;
        Ok(())
    }

    /// Resource builder for `node`. The `/Resources` dictionary is created on
    /// first use.
    pub fn resources(&mut self, node: &impl PageTreeNode) -> Result<ResourceBuilder<'_>> {
        let owner = node.node();
        child_dictionary(self.dictionary_mut(owner)?, "Resources")?;
        Ok(ResourceBuilder {
            compositor: self,
            owner,
        })
    }

    /// Authoring access to a page's content stream.
    pub fn page(&mut self, page: Page) -> Result<PageBuilder<'_>> {
        let stream = self.stream_mut(page.contents)?;
        Ok(PageBuilder {
            content: &mut stream.content,
        })
    }
}

/// Registers resources into a page tree node's `/Resources` dictionary.
pub struct ResourceBuilder<'a> {
    compositor: &'a mut Compositor,
    owner: ObjectRef,
}

impl ResourceBuilder<'_> {
    /// Allocate a Type1 font dictionary for `base_font` and register it under
    /// the next free `F<n>` name.
    ///
    /// Each call allocates a new font object, even for a base font that is
    /// already registered.
    pub fn add_simple_type1_font(&mut self, base_font: &str) -> Result<FontId> {
        let id = self.compositor.next_font_name();
        let font = self.compositor.allocate(
            Dictionary::typed("Font")
                .with_entry("Subtype", Object::name("Type1"))
                .with_entry("BaseFont", Object::name(base_font)),
        );

        let owner = self.compositor.dictionary_mut(self.owner)?;
        let resources = child_dictionary(owner, "Resources")?;
        child_dictionary(resources, "Font")?.set(id.name(), font)?;

        log::debug!("Registered font {} -> {} ({})", id, base_font, font);
        Ok(id)
    }
}

/// Authoring operations on one page's content stream.
pub struct PageBuilder<'a> {
    content: &'a mut ContentStreamBuilder,
}

impl PageBuilder<'_> {
    /// Select a registered font.
    pub fn set_font(&mut self, font: &FontId, size: f32) -> &mut Self {
        self.content.set_font(font.name(), size);
        self
    }

    /// Set the text matrix.
    pub fn set_matrix(&mut self, a: f32, b: f32, c: f32, d: f32, e: f32, f: f32) -> &mut Self {
        self.content.set_matrix(a, b, c, d, e, f);
        self
    }

    /// Move the line start by `(dx, dy)` points.
    pub fn next_line(&mut self, dx: f32, dy: f32) -> &mut Self {
        self.content.move_by(dx, dy);
        self
    }

    /// Move to the next line using the current leading.
    pub fn new_line(&mut self) -> &mut Self {
        self.content.new_line();
        self
    }

    /// Show text at the current position.
    pub fn write_text(&mut self, text: &str) -> &mut Self {
        self.content.write_text(text);
        self
    }
}
