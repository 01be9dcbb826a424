//! In-memory object graph
//!
//! `ObjectGraph` is the store every page and page-tree node lives in. Each
//! entry is an addressable container: an [`ObjectId`] mapped to a direct
//! [`Object`]. Entities hold ids, never the objects themselves, so a node can
//! be referenced from anywhere without tying lifetimes together.

use crate::error::{PdfError, Result};
use crate::objects::{Object, ObjectId, Stream};
use std::collections::{BTreeMap, HashSet};
use tracing::trace;

/// Arena of indirect objects indexed by object id.
#[derive(Debug, Clone, Default)]
pub struct ObjectGraph {
    objects: BTreeMap<ObjectId, Object>,
    max_id: u32,
}

impl ObjectGraph {
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of containers in the graph.
    pub fn len(&self) -> usize {
        self.objects.len()
    }

    pub fn is_empty(&self) -> bool {
        self.objects.is_empty()
    }

    /// Store `object` in a fresh container and return its id.
    pub fn add_object(&mut self, object: impl Into<Object>) -> ObjectId {
        self.max_id += 1;
        let id = ObjectId::new(self.max_id, 0);
        self.objects.insert(id, object.into());
        id
    }

    /// Reserve a container holding `null`, to be filled in later.
    pub fn allocate(&mut self) -> ObjectId {
        self.add_object(Object::Null)
    }

    /// Overwrite (or create) the container `id`.
    pub fn set_object(&mut self, id: ObjectId, object: impl Into<Object>) {
        self.max_id = self.max_id.max(id.number());
        self.objects.insert(id, object.into());
    }

    /// Contents of container `id`, without following references.
    pub fn get(&self, id: ObjectId) -> Option<&Object> {
        self.objects.get(&id)
    }

    pub fn get_mut(&mut self, id: ObjectId) -> Option<&mut Object> {
        self.objects.get_mut(&id)
    }

    pub fn contains(&self, id: ObjectId) -> bool {
        self.objects.contains_key(&id)
    }

    /// Follow `id` through any chain of references to a direct object.
    pub fn resolve(&self, id: ObjectId) -> Result<&Object> {
        let mut seen = HashSet::new();
        let mut current = id;
        loop {
            if !seen.insert(current) {
                return Err(PdfError::ReferenceCycle(current));
            }
            match self.objects.get(&current) {
                Some(Object::Reference(next)) => {
                    trace!("following {} -> {}", current, next);
                    current = *next;
                }
                Some(object) => return Ok(object),
                None => return Err(PdfError::InvalidReference(current)),
            }
        }
    }

    /// Unwrap `object` to its direct form. Direct objects are returned as-is.
    pub fn dereference<'a>(&'a self, object: &'a Object) -> Result<&'a Object> {
        match object {
            Object::Reference(id) => self.resolve(*id),
            other => Ok(other),
        }
    }

    /// Filter-aware stream decoding.
    pub fn decode(&self, stream: &Stream) -> Result<Vec<u8>> {
        stream.decode()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&ObjectId, &Object)> {
        self.objects.iter()
    }
}
