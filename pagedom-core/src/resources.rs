//! Page resource dictionaries (ISO 32000-1 Section 7.8.3)
//!
//! A resource dictionary maps each category (`Font`, `XObject`,
//! `ExtGState`, ...) to a sub-dictionary of names that content streams use
//! to refer to resources. The `ColorSpace` category is parsed into a
//! [`ColorspaceTable`]; every other category is kept as the raw object it was
//! read as, which may be an inline dictionary or a reference to one.

use crate::colorspace::ColorspaceTable;
use crate::error::{PdfError, Result};
use crate::graph::ObjectGraph;
use crate::objects::{Dictionary, Object};
use std::collections::BTreeMap;
use tracing::debug;

/// Resource categories other than `ColorSpace`, in projection order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum ResourceCategory {
    ExtGState,
    Pattern,
    Shading,
    XObject,
    Font,
    ProcSet,
    Properties,
}

impl ResourceCategory {
    pub const ALL: [ResourceCategory; 7] = [
        ResourceCategory::ExtGState,
        ResourceCategory::Pattern,
        ResourceCategory::Shading,
        ResourceCategory::XObject,
        ResourceCategory::Font,
        ResourceCategory::ProcSet,
        ResourceCategory::Properties,
    ];

    pub fn key(&self) -> &'static str {
        match self {
            ResourceCategory::ExtGState => "ExtGState",
            ResourceCategory::Pattern => "Pattern",
            ResourceCategory::Shading => "Shading",
            ResourceCategory::XObject => "XObject",
            ResourceCategory::Font => "Font",
            ResourceCategory::ProcSet => "ProcSet",
            ResourceCategory::Properties => "Properties",
        }
    }

    pub fn from_key(key: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|category| category.key() == key)
    }
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct Resources {
    categories: BTreeMap<ResourceCategory, Object>,
    colorspaces: Option<ColorspaceTable>,
}

impl Resources {
    pub fn new() -> Self {
        Self::default()
    }

    /// Build from a resource dictionary. Keys outside the known categories
    /// are dropped.
    pub fn from_dictionary(graph: &ObjectGraph, dict: &Dictionary) -> Result<Self> {
        let mut resources = Resources::new();

        for (key, value) in dict {
            if key == "ColorSpace" {
                resources.colorspaces = Some(ColorspaceTable::from_object(graph, value)?);
            } else if let Some(category) = ResourceCategory::from_key(key) {
                resources.categories.insert(category, value.clone());
            } else {
                debug!("Ignoring unknown resource category {}", key);
            }
        }

        Ok(resources)
    }

    /// Raw category entry, as stored.
    pub fn category(&self, category: ResourceCategory) -> Option<&Object> {
        self.categories.get(&category)
    }

    pub fn set_category(&mut self, category: ResourceCategory, value: impl Into<Object>) {
        self.categories.insert(category, value.into());
    }

    pub fn remove_category(&mut self, category: ResourceCategory) -> Option<Object> {
        self.categories.remove(&category)
    }

    pub fn colorspaces(&self) -> Option<&ColorspaceTable> {
        self.colorspaces.as_ref()
    }

    pub fn set_colorspaces(&mut self, table: ColorspaceTable) {
        self.colorspaces = Some(table);
    }

    pub fn is_empty(&self) -> bool {
        self.categories.is_empty() && self.colorspaces.is_none()
    }

    /// Category sub-dictionary with references followed, for lookups.
    ///
    /// `Ok(None)` when the category is absent.
    pub fn category_dict<'a>(
        &'a self,
        graph: &'a ObjectGraph,
        category: ResourceCategory,
    ) -> Result<Option<&'a Dictionary>> {
        match self.categories.get(&category) {
            None => Ok(None),
            Some(value) => graph
                .dereference(value)?
                .as_dict()
                .map(Some)
                .ok_or_else(|| PdfError::type_mismatch(category.key(), "dictionary")),
        }
    }

    /// Category sub-dictionary ready for in-place editing.
    ///
    /// An absent category is created empty. A category held by reference is
    /// copied inline, so the shared container is left untouched.
    pub fn category_dict_mut(
        &mut self,
        graph: &ObjectGraph,
        category: ResourceCategory,
    ) -> Result<&mut Dictionary> {
        let replacement = match self.categories.get(&category) {
            None => Some(Dictionary::new()),
            Some(Object::Dictionary(_)) => None,
            Some(Object::Reference(id)) => {
                debug!("Copying shared {} category from {}", category.key(), id);
                let copy = graph
                    .resolve(*id)?
                    .as_dict()
                    .cloned()
                    .ok_or_else(|| PdfError::type_mismatch(category.key(), "dictionary"))?;
                Some(copy)
            }
            Some(_) => return Err(PdfError::type_mismatch(category.key(), "dictionary")),
        };

        if let Some(inline) = replacement {
            self.categories.insert(category, Object::Dictionary(inline));
        }
        self.inline_dict_mut(category)
    }

    fn inline_dict_mut(&mut self, category: ResourceCategory) -> Result<&mut Dictionary> {
        match self.categories.get_mut(&category) {
            Some(Object::Dictionary(dict)) => Ok(dict),
            _ => Err(PdfError::type_mismatch(category.key(), "dictionary")),
        }
    }

    /// Resource dictionary in canonical category order. A colorspace table
    /// that lives in a container is referenced, not inlined.
    pub fn to_dict(&self) -> Dictionary {
        let colorspace = self.colorspaces.as_ref().map(|table| match table.container() {
            Some(id) => Object::Reference(id),
            None => Object::Dictionary(table.to_dict()),
        });

        let mut dict = Dictionary::new();
        for (category, value) in &self.categories {
            dict.set(category.key(), value.clone());
            if *category == ResourceCategory::ExtGState {
                if let Some(colorspace) = &colorspace {
                    dict.set("ColorSpace", colorspace.clone());
                }
            }
        }
        if let Some(colorspace) = colorspace {
            if !dict.contains_key("ColorSpace") {
                dict.set("ColorSpace", colorspace);
            }
        }
        dict
    }

    /// Project the resource dictionary, writing a contained colorspace table
    /// back to its container.
    pub fn to_object(&self, graph: &mut ObjectGraph) -> Object {
        if let Some(table) = &self.colorspaces {
            table.to_object(graph);
        }
        Object::Dictionary(self.to_dict())
    }
}
