//! Inheritable page attributes (ISO 32000-1 Section 7.7.3.4)
//!
//! `Resources`, `MediaBox`, `CropBox` and `Rotate` may be omitted from a
//! page and taken from the nearest ancestor in the page tree that defines
//! them. Resolution walks the `/Parent` chain through the object graph and
//! never modifies an ancestor.

use crate::error::{PdfError, Result};
use crate::geometry::Rectangle;
use crate::graph::ObjectGraph;
use crate::objects::{Object, ObjectId};
use crate::page::{parse_rectangle, parse_resources, parse_rotate, BoxKind, Page};
use crate::resources::Resources;
use std::collections::HashSet;
use tracing::{debug, warn};

/// Extension trait resolving attributes through the page tree
pub trait PageInheritance {
    /// Raw value of `key`, from the page itself or the nearest ancestor
    /// defining it. Ancestor values are dereferenced.
    fn inherited_attribute(&self, graph: &ObjectGraph, key: &str) -> Result<Object>;

    /// Effective media box. A page tree without one is an error.
    fn get_media_box(&self, graph: &ObjectGraph) -> Result<Rectangle>;

    /// Effective resources, `None` when no node defines any.
    fn get_resources(&self, graph: &ObjectGraph) -> Result<Option<Resources>>;

    /// Effective crop box, defaulting to the media box.
    fn get_crop_box(&self, graph: &ObjectGraph) -> Result<Rectangle>;

    /// Effective rotation in degrees, defaulting to 0.
    fn get_rotate(&self, graph: &ObjectGraph) -> Result<i64>;

    /// Effective box of any kind. Bleed, trim and art boxes are not
    /// inherited and default to the crop box.
    fn effective_box(&self, graph: &ObjectGraph, kind: BoxKind) -> Result<Rectangle>;
}

impl PageInheritance for Page {
    fn inherited_attribute(&self, graph: &ObjectGraph, key: &str) -> Result<Object> {
        if let Some(local) = local_attribute(self, key) {
            return Ok(local);
        }
        ancestor_attribute(self, graph, key).map(|(_, value)| value.clone())
    }

    fn get_media_box(&self, graph: &ObjectGraph) -> Result<Rectangle> {
        if let Some(rect) = self.media_box() {
            return Ok(rect);
        }
        let (_, value) = ancestor_attribute(self, graph, "MediaBox")?;
        parse_rectangle("MediaBox", value)
    }

    fn get_resources(&self, graph: &ObjectGraph) -> Result<Option<Resources>> {
        if let Some(resources) = self.resources() {
            return Ok(Some(resources.clone()));
        }
        ancestor_resources(self, graph)
    }

    fn get_crop_box(&self, graph: &ObjectGraph) -> Result<Rectangle> {
        if let Some(rect) = self.crop_box() {
            return Ok(rect);
        }
        match ancestor_attribute(self, graph, "CropBox") {
            Ok((_, value)) => parse_rectangle("CropBox", value),
            Err(PdfError::AttributeNotInherited(_)) => self.get_media_box(graph),
            Err(e) => Err(e),
        }
    }

    fn get_rotate(&self, graph: &ObjectGraph) -> Result<i64> {
        if let Some(rotate) = self.rotate() {
            return Ok(rotate);
        }
        match ancestor_attribute(self, graph, "Rotate") {
            Ok((_, value)) => parse_rotate(value),
            Err(PdfError::AttributeNotInherited(_)) => Ok(0),
            Err(e) => Err(e),
        }
    }

    fn effective_box(&self, graph: &ObjectGraph, kind: BoxKind) -> Result<Rectangle> {
        match kind {
            BoxKind::MediaBox => self.get_media_box(graph),
            BoxKind::CropBox => self.get_crop_box(graph),
            other => match self.page_box(other) {
                Some(rect) => Ok(rect),
                None => self.get_crop_box(graph),
            },
        }
    }
}

fn local_attribute(page: &Page, key: &str) -> Option<Object> {
    match key {
        "Resources" => page
            .resources()
            .map(|resources| Object::Dictionary(resources.to_dict())),
        "MediaBox" => page.page_box(BoxKind::MediaBox).map(|r| r.to_object()),
        "CropBox" => page.page_box(BoxKind::CropBox).map(|r| r.to_object()),
        "BleedBox" => page.page_box(BoxKind::BleedBox).map(|r| r.to_object()),
        "TrimBox" => page.page_box(BoxKind::TrimBox).map(|r| r.to_object()),
        "ArtBox" => page.page_box(BoxKind::ArtBox).map(|r| r.to_object()),
        "Rotate" => page.rotate().map(Object::Integer),
        other => page.attribute(other).cloned(),
    }
}

/// Resources defined above the page, ignoring its own table.
pub(crate) fn ancestor_resources(page: &Page, graph: &ObjectGraph) -> Result<Option<Resources>> {
    match ancestor_attribute(page, graph, "Resources") {
        Ok((_, value)) => parse_resources(graph, value).map(Some),
        Err(PdfError::AttributeNotInherited(_)) => Ok(None),
        Err(e) => Err(e),
    }
}

/// Walk the parent chain looking for `key`. Returns the defining node and
/// the dereferenced value.
fn ancestor_attribute<'a>(
    page: &Page,
    graph: &'a ObjectGraph,
    key: &str,
) -> Result<(ObjectId, &'a Object)> {
    let mut visited = HashSet::new();
    visited.insert(page.container());

    let mut node = page.parent();
    while let Some(id) = node {
        if !visited.insert(id) {
            warn!("Page tree cycle at {} while resolving {}", id, key);
            return Err(PdfError::CyclicAncestry(id));
        }

        let dict = graph
            .resolve(id)
            .ok()
            .and_then(Object::as_dict)
            .ok_or_else(|| PdfError::InvalidAncestor(format!("{id} is not a page tree node")))?;

        if let Some(value) = dict.get(key) {
            debug!("Inherited /{} from ancestor {}", key, id);
            return Ok((id, graph.dereference(value)?));
        }

        node = match dict.get("Parent") {
            None | Some(Object::Null) => None,
            Some(Object::Reference(parent)) => Some(*parent),
            Some(other) => {
                return Err(PdfError::InvalidAncestor(format!(
                    "/Parent of {} is a {}",
                    id,
                    other.type_name()
                )))
            }
        };
    }

    Err(PdfError::AttributeNotInherited(key.to_string()))
}
