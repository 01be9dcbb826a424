//! Registering named resources on a page
//!
//! A page without its own `/Resources` takes a copy of the inherited table
//! the first time something is registered, so shared page tree nodes are
//! never modified.

use crate::error::Result;
use crate::graph::ObjectGraph;
use crate::graphics::XObjectImage;
use crate::objects::{Dictionary, Object, ObjectId};
use crate::page::Page;
use crate::page_inheritance::PageInheritance;
use crate::resources::{ResourceCategory, Resources};
use tracing::debug;

/// Extension trait for binding resources by name
pub trait PageResources {
    /// Store `image` as an image XObject and bind it under `/XObject`.
    /// Returns the id of the new stream.
    fn add_image_resource(
        &mut self,
        graph: &mut ObjectGraph,
        name: &str,
        image: &XObjectImage,
    ) -> Result<ObjectId>;

    /// Bind a font dictionary (or a reference to one) under `/Font`.
    fn add_font(&mut self, graph: &ObjectGraph, name: &str, font: impl Into<Object>) -> Result<()>;

    /// Bind a graphics state parameter dictionary under `/ExtGState`.
    fn add_ext_gstate(
        &mut self,
        graph: &ObjectGraph,
        name: &str,
        state: impl Into<Object>,
    ) -> Result<()>;

    /// Whether `name` is bound under `/XObject` in the effective resources.
    /// Any resolution failure counts as not bound.
    fn has_image_resource(&self, graph: &ObjectGraph, name: &str) -> bool;
}

impl PageResources for Page {
    fn add_image_resource(
        &mut self,
        graph: &mut ObjectGraph,
        name: &str,
        image: &XObjectImage,
    ) -> Result<ObjectId> {
        let id = graph.add_object(image.to_stream());
        bind(self, graph, ResourceCategory::XObject, name, Object::Reference(id))?;
        Ok(id)
    }

    fn add_font(&mut self, graph: &ObjectGraph, name: &str, font: impl Into<Object>) -> Result<()> {
        bind(self, graph, ResourceCategory::Font, name, font.into())
    }

    fn add_ext_gstate(
        &mut self,
        graph: &ObjectGraph,
        name: &str,
        state: impl Into<Object>,
    ) -> Result<()> {
        bind(self, graph, ResourceCategory::ExtGState, name, state.into())
    }

    fn has_image_resource(&self, graph: &ObjectGraph, name: &str) -> bool {
        let Ok(Some(resources)) = self.get_resources(graph) else {
            return false;
        };
        matches!(
            resources.category_dict(graph, ResourceCategory::XObject),
            Ok(Some(xobjects)) if xobjects.contains_key(name)
        )
    }
}

fn bind(
    page: &mut Page,
    graph: &ObjectGraph,
    category: ResourceCategory,
    name: &str,
    value: Object,
) -> Result<()> {
    let resources = own_resources(page, graph)?;
    let dict: &mut Dictionary = resources.category_dict_mut(graph, category)?;
    dict.set(name, value);
    Ok(())
}

/// The page's own resource table, copying the inherited one in if needed.
fn own_resources<'p>(page: &'p mut Page, graph: &ObjectGraph) -> Result<&'p mut Resources> {
    if page.resources().is_none() {
        let resources = match page.get_resources(graph)? {
            Some(inherited) => {
                debug!("Copying inherited resources into page {}", page.container());
                inherited
            }
            None => Resources::new(),
        };
        page.set_resources(Some(resources));
    }
    Ok(page.resources_or_default())
}
