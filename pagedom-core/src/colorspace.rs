//! Colorspace resources (ISO 32000-1 Section 8.6)
//!
//! Only the family of a colorspace is interpreted; operands such as ICC
//! streams or lookup tables are carried through untouched.

use crate::error::{PdfError, Result};
use crate::graph::ObjectGraph;
use crate::objects::{Dictionary, Object, ObjectId};
use std::collections::HashMap;

#[derive(Debug, Clone, PartialEq)]
pub enum Colorspace {
    DeviceGray,
    DeviceRGB,
    DeviceCMYK,
    Pattern,
    /// Array form such as `[/ICCBased 7 0 R]` or `[/Indexed /DeviceRGB 255 <...>]`.
    Family { name: String, operands: Vec<Object> },
    /// Colorspace stored in its own container, projected back by reference.
    Indirect { id: ObjectId, resolved: Box<Colorspace> },
}

impl Colorspace {
    pub fn from_object(graph: &ObjectGraph, object: &Object) -> Result<Self> {
        match object {
            Object::Reference(id) => {
                let resolved = Self::from_object(graph, graph.resolve(*id)?)?;
                Ok(Colorspace::Indirect {
                    id: *id,
                    resolved: Box::new(resolved),
                })
            }
            Object::Name(name) => Ok(Self::from_family(name, Vec::new())),
            Object::Array(array) => match array.split_first() {
                Some((Object::Name(name), operands)) => {
                    Ok(Self::from_family(name, operands.to_vec()))
                }
                _ => Err(PdfError::type_mismatch(
                    "ColorSpace",
                    "array starting with a family name",
                )),
            },
            _ => Err(PdfError::type_mismatch("ColorSpace", "name or array")),
        }
    }

    fn from_family(name: &str, operands: Vec<Object>) -> Self {
        match (name, operands.is_empty()) {
            ("DeviceGray" | "G", true) => Colorspace::DeviceGray,
            ("DeviceRGB" | "RGB", true) => Colorspace::DeviceRGB,
            ("DeviceCMYK" | "CMYK", true) => Colorspace::DeviceCMYK,
            ("Pattern", true) => Colorspace::Pattern,
            _ => Colorspace::Family {
                name: name.to_string(),
                operands,
            },
        }
    }

    /// Family name, e.g. `DeviceRGB` or `ICCBased`.
    pub fn family(&self) -> &str {
        match self {
            Colorspace::DeviceGray => "DeviceGray",
            Colorspace::DeviceRGB => "DeviceRGB",
            Colorspace::DeviceCMYK => "DeviceCMYK",
            Colorspace::Pattern => "Pattern",
            Colorspace::Family { name, .. } => name,
            Colorspace::Indirect { resolved, .. } => resolved.family(),
        }
    }

    pub fn to_object(&self) -> Object {
        match self {
            Colorspace::Family { name, operands } => {
                let mut array = Vec::with_capacity(operands.len() + 1);
                array.push(Object::name(name.as_str()));
                array.extend(operands.iter().cloned());
                Object::Array(array)
            }
            Colorspace::Indirect { id, .. } => Object::Reference(*id),
            device => Object::name(device.family()),
        }
    }
}

/// The `/ColorSpace` category of a resource dictionary.
///
/// Names keep the order they were read or inserted in.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ColorspaceTable {
    names: Vec<String>,
    colorspaces: HashMap<String, Colorspace>,
    container: Option<ObjectId>,
}

impl ColorspaceTable {
    pub fn new() -> Self {
        Self::default()
    }

    /// Parse a colorspace category, which may itself live in a container.
    pub fn from_object(graph: &ObjectGraph, object: &Object) -> Result<Self> {
        let (container, dict) = match object {
            Object::Reference(id) => (Some(*id), graph.resolve(*id)?),
            other => (None, other),
        };
        let dict = dict
            .as_dict()
            .ok_or_else(|| PdfError::type_mismatch("ColorSpace", "dictionary"))?;

        let mut table = ColorspaceTable {
            names: Vec::with_capacity(dict.len()),
            colorspaces: HashMap::with_capacity(dict.len()),
            container,
        };
        for (name, value) in dict {
            table.insert(name.clone(), Colorspace::from_object(graph, value)?);
        }
        Ok(table)
    }

    /// Bind `name`; a new name goes to the end, a rebound one keeps its slot.
    pub fn insert(&mut self, name: impl Into<String>, colorspace: Colorspace) {
        let name = name.into();
        if !self.colorspaces.contains_key(&name) {
            self.names.push(name.clone());
        }
        self.colorspaces.insert(name, colorspace);
    }

    pub fn get(&self, name: &str) -> Option<&Colorspace> {
        self.colorspaces.get(name)
    }

    pub fn names(&self) -> &[String] {
        &self.names
    }

    pub fn container(&self) -> Option<ObjectId> {
        self.container
    }

    pub fn len(&self) -> usize {
        self.names.len()
    }

    pub fn is_empty(&self) -> bool {
        self.names.is_empty()
    }

    pub fn to_dict(&self) -> Dictionary {
        let mut dict = Dictionary::with_capacity(self.names.len());
        for name in &self.names {
            if let Some(colorspace) = self.colorspaces.get(name) {
                dict.set(name.as_str(), colorspace.to_object());
            }
        }
        dict
    }

    /// Project the table. A table read from a container is written back
    /// into it and referenced.
    pub fn to_object(&self, graph: &mut ObjectGraph) -> Object {
        let dict = self.to_dict();
        match self.container {
            Some(id) => {
                graph.set_object(id, dict);
                Object::Reference(id)
            }
            None => Object::Dictionary(dict),
        }
    }
}
