//! Object allocator for one output document.
//!
//! The [`Compositor`] owns every addressable node of a run in allocation
//! order. That order is the order objects are written, which fixes their byte
//! offsets. Builders never hold the nodes themselves, only [`ObjectRef`]
//! handles back into this arena.

use crate::error::{Error, Result};
use crate::object::{Dictionary, IndirectObject, Object, ObjectRef, StreamObject};
use crate::writer::page_tree::{FontId, PageCollection, PageTreeNode};
use crate::writer::ContentStreamBuilder;

/// Arena of addressable nodes plus the document root.
///
/// Construction allocates the catalog and then the root page collection, so
/// with default numbering they are objects 1 and 2.
#[derive(Debug, Clone)]
pub struct Compositor {
    objects: Vec<IndirectObject>,
    generation: u16,
    start_id: u32,
    next_id: u32,
    catalog: ObjectRef,
    root_pages: PageCollection,
    next_font_id: u32,
}

impl Default for Compositor {
    fn default() -> Self {
        Self::new()
    }
}

impl Compositor {
    /// Create a compositor with generation 0 and ids starting at 1.
    pub fn new() -> Self {
        Self::with_numbering(0, 1)
    }

    /// Create a compositor with a custom generation and first object id.
    ///
    /// `start_id` must be at least 1; id 0 is the free-list head.
    pub fn with_numbering(generation: u16, start_id: u32) -> Self {
        let start_id = start_id.max(1);
        let mut compositor = Self {
            objects: Vec::new(),
            generation,
            start_id,
            next_id: start_id,
            catalog: ObjectRef::new(start_id, generation),
            root_pages: PageCollection::new(ObjectRef::new(start_id + 1, generation)),
            next_font_id: 1,
        };

        // Pages is allocated right after the catalog
        let pages = compositor.root_pages.node();
        let catalog = compositor.allocate(Dictionary::typed("Catalog").with_entry("Pages", pages));
        let root = compositor.allocate(
            Dictionary::typed("Pages")
                .with_entry("Kids", Vec::<Object>::new())
                .with_entry("Count", 0i64),
        );
        debug_assert_eq!((catalog, root), (compositor.catalog, pages));

        compositor
    }

    /// Register a node and return its handle.
    ///
    /// Ids are handed out in call order with no gaps.
    pub fn allocate(&mut self, value: impl Into<Object>) -> ObjectRef {
        let reference = ObjectRef::new(self.next_id, self.generation);
        self.next_id += 1;
        self.objects.push(IndirectObject {
            reference,
            value: value.into(),
        });
        reference
    }

    /// Allocate a stream for `content` together with its `/Length` node.
    ///
    /// The stream takes the next id and the Integer length placeholder the
    /// one after it.
    pub fn stream_object(&mut self, content: ContentStreamBuilder) -> ObjectRef {
        let length = ObjectRef::new(self.next_id + 1, self.generation);
        let stream = self.allocate(StreamObject::new(length, content));
        let allocated = self.allocate(Object::Integer(0));
        debug_assert_eq!(allocated, length);
        stream
    }

    fn index_of(&self, reference: ObjectRef) -> Result<usize> {
        if reference.gen == self.generation && reference.id >= self.start_id {
            let index = (reference.id - self.start_id) as usize;
            if index < self.objects.len() {
                return Ok(index);
            }
        }
        Err(Error::ObjectNotFound(reference.id, reference.gen))
    }

    /// Whether `reference` names a node in this arena.
    pub fn contains(&self, reference: ObjectRef) -> bool {
        self.index_of(reference).is_ok()
    }

    /// Look up a node's value.
    pub fn get(&self, reference: ObjectRef) -> Result<&Object> {
        let index = self.index_of(reference)?;
        Ok(&self.objects[index].value)
    }

    /// Mutable lookup of a node's value.
    pub fn get_mut(&mut self, reference: ObjectRef) -> Result<&mut Object> {
        let index = self.index_of(reference)?;
        Ok(&mut self.objects[index].value)
    }

    /// Look up a node that must be a dictionary.
    pub fn dictionary(&self, reference: ObjectRef) -> Result<&Dictionary> {
        match self.get(reference)? {
            Object::Dictionary(dict) => Ok(dict),
            other => Err(Error::InvalidObjectType {
                expected: "Dictionary".to_string(),
                found: other.type_name().to_string(),
            }),
        }
    }

    /// Mutable variant of [`Compositor::dictionary`].
    pub fn dictionary_mut(&mut self, reference: ObjectRef) -> Result<&mut Dictionary> {
        match self.get_mut(reference)? {
            Object::Dictionary(dict) => Ok(dict),
            other => Err(Error::InvalidObjectType {
                expected: "Dictionary".to_string(),
                found: other.type_name().to_string(),
            }),
        }
    }

    /// Mutable lookup of a node that must be a stream.
    pub fn stream_mut(&mut self, reference: ObjectRef) -> Result<&mut StreamObject> {
        match self.get_mut(reference)? {
            Object::Stream(stream) => Ok(stream),
            other => Err(Error::InvalidObjectType {
                expected: "Stream".to_string(),
                found: other.type_name().to_string(),
            }),
        }
    }

    /// All nodes in allocation order.
    pub fn objects(&self) -> &[IndirectObject] {
        &self.objects
    }

    /// Number of allocated nodes.
    pub fn len(&self) -> usize {
        self.objects.len()
    }

    /// Whether no nodes are allocated.
    pub fn is_empty(&self) -> bool {
        self.objects.is_empty()
    }

    /// Generation shared by every node of this run.
    pub fn generation(&self) -> u16 {
        self.generation
    }

    /// Id of the first allocated node.
    pub fn start_id(&self) -> u32 {
        self.start_id
    }

    /// Id the next allocation will receive.
    pub fn next_id(&self) -> u32 {
        self.next_id
    }

    /// Handle of the document catalog.
    pub fn catalog(&self) -> ObjectRef {
        self.catalog
    }

    /// The root page collection.
    pub fn root_pages(&self) -> PageCollection {
        self.root_pages
    }

    /// Hand out the next font resource name (`F1`, `F2`, ...).
    pub(crate) fn next_font_name(&mut self) -> FontId {
        let id = FontId::new(format!("F{}", self.next_font_id));
        self.next_font_id += 1;
        id
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_allocates_catalog_then_pages() {
        let compositor = Compositor::new();
        assert_eq!(compositor.len(), 2);
        assert_eq!(compositor.catalog(), ObjectRef::new(1, 0));
        assert_eq!(compositor.root_pages().node(), ObjectRef::new(2, 0));

        let catalog = compositor.dictionary(compositor.catalog()).unwrap();
        assert_eq!(catalog.get::<&str>("Type"), Some("Catalog"));
        assert_eq!(catalog.get::<ObjectRef>("Pages"), Some(ObjectRef::new(2, 0)));

        let pages = compositor.dictionary(ObjectRef::new(2, 0)).unwrap();
        assert_eq!(pages.get::<&str>("Type"), Some("Pages"));
        assert_eq!(pages.get::<i64>("Count"), Some(0));
        assert_eq!(pages.get::<&[Object]>("Kids"), Some(&[][..]));
    }

    #[test]
    fn test_allocate_is_sequential() {
        let mut compositor = Compositor::new();
        let a = compositor.allocate(Object::Integer(1));
        let b = compositor.allocate(Object::Integer(2));
        assert_eq!(a, ObjectRef::new(3, 0));
        assert_eq!(b, ObjectRef::new(4, 0));
        assert_eq!(compositor.next_id(), 5);
    }

    #[test]
    fn test_custom_numbering() {
        let mut compositor = Compositor::with_numbering(2, 10);
        assert_eq!(compositor.catalog(), ObjectRef::new(10, 2));
        assert_eq!(compositor.root_pages().node(), ObjectRef::new(11, 2));
        let next = compositor.allocate(Object::Integer(0));
        assert_eq!(next, ObjectRef::new(12, 2));
        assert!(compositor.get(ObjectRef::new(12, 0)).is_err());
    }

    #[test]
    fn test_stream_object_allocates_length_after_stream() {
        let mut compositor = Compositor::new();
        let stream = compositor.stream_object(ContentStreamBuilder::new());
        assert_eq!(stream, ObjectRef::new(3, 0));

        let length = compositor.stream_mut(stream).unwrap().length_ref();
        assert_eq!(length, Some(ObjectRef::new(4, 0)));
        assert_eq!(compositor.get(ObjectRef::new(4, 0)).unwrap(), &Object::Integer(0));
    }

    #[test]
    fn test_lookup_errors() {
        let mut compositor = Compositor::new();
        assert!(matches!(
            compositor.get(ObjectRef::new(99, 0)),
            Err(Error::ObjectNotFound(99, 0))
        ));
        assert!(matches!(
            compositor.get(ObjectRef::new(0, 0)),
            Err(Error::ObjectNotFound(0, 0))
        ));
        let int = compositor.allocate(Object::Integer(7));
        assert!(matches!(
            compositor.dictionary_mut(int),
            Err(Error::InvalidObjectType { .. })
        ));
        assert!(matches!(compositor.stream_mut(int), Err(Error::InvalidObjectType { .. })));
    }

    #[test]
    fn test_font_names_count_up() {
        let mut compositor = Compositor::new();
        assert_eq!(compositor.next_font_name().name(), "F1");
        assert_eq!(compositor.next_font_name().name(), "F2");
    }

    #[test]
    fn test_zero_start_id_is_raised_to_one() {
        let compositor = Compositor::with_numbering(0, 0);
        assert_eq!(compositor.start_id(), 1);
        assert_eq!(compositor.catalog(), ObjectRef::new(1, 0));
    }
}
