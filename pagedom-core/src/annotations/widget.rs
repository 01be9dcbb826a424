//! Popup and widget annotations

use crate::annotations::annotation::FieldReader;
use crate::annotations::HighlightMode;
use crate::error::Result;
use crate::objects::{Dictionary, Object};

/// Popup window attached to a markup annotation.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct PopupAnnotation {
    /// Owning markup annotation (Parent)
    pub parent: Option<Object>,
    /// Initially open (Open)
    pub open: Option<bool>,
}

impl PopupAnnotation {
    pub(crate) fn extract(fields: &mut FieldReader<'_>) -> Result<Self> {
        Ok(Self {
            parent: fields.take("Parent"),
            open: fields.take_bool("Open")?,
        })
    }

    pub(crate) fn write_entries(&self, dict: &mut Dictionary) {
        if let Some(parent) = &self.parent {
            dict.set("Parent", parent.clone());
        }
        if let Some(open) = self.open {
            dict.set("Open", open);
        }
    }
}

/// Interactive form field widget. Field-level entries (`FT`, `V`, ...) of a
/// merged field/widget dictionary stay in the annotation's extra entries.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct WidgetAnnotation {
    pub highlight: Option<HighlightMode>,
    /// Appearance characteristics (MK)
    pub appearance_characteristics: Option<Object>,
    /// Activation action (A)
    pub action: Option<Object>,
    /// Additional actions (AA)
    pub additional_actions: Option<Object>,
    /// Border style (BS)
    pub border_style: Option<Object>,
    /// Parent field (Parent)
    pub parent: Option<Object>,
}

impl WidgetAnnotation {
    pub(crate) fn extract(fields: &mut FieldReader<'_>) -> Result<Self> {
        Ok(Self {
            highlight: HighlightMode::extract(fields)?,
            appearance_characteristics: fields.take("MK"),
            action: fields.take("A"),
            additional_actions: fields.take("AA"),
            border_style: fields.take("BS"),
            parent: fields.take("Parent"),
        })
    }

    pub(crate) fn write_entries(&self, dict: &mut Dictionary) {
        if let Some(mode) = self.highlight {
            dict.set("H", Object::name(mode.pdf_name()));
        }
        let raw = [
            ("MK", &self.appearance_characteristics),
            ("A", &self.action),
            ("AA", &self.additional_actions),
            ("BS", &self.border_style),
            ("Parent", &self.parent),
        ];
        for (key, value) in raw {
            if let Some(value) = value {
                dict.set(key, value.clone());
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::graph::ObjectGraph;

    #[test]
    fn test_popup_entries() {
        let mut graph = ObjectGraph::new();
        let parent = graph.allocate();
        let popup = PopupAnnotation {
            parent: Some(Object::Reference(parent)),
            open: Some(false),
        };

        let mut dict = Dictionary::new();
        popup.write_entries(&mut dict);
        assert_eq!(dict.get("Parent"), Some(&Object::Reference(parent)));
        assert_eq!(dict.get("Open"), Some(&Object::Boolean(false)));

        let mut fields = FieldReader::new(&graph, dict);
        assert_eq!(PopupAnnotation::extract(&mut fields).unwrap(), popup);
    }

    #[test]
    fn test_widget_leaves_field_entries() {
        let graph = ObjectGraph::new();
        let mut dict = Dictionary::new();
        dict.set("FT", Object::name("Btn"));
        dict.set("H", Object::name("P"));
        dict.set("MK", Dictionary::new());

        let mut fields = FieldReader::new(&graph, dict);
        let widget = WidgetAnnotation::extract(&mut fields).unwrap();
        assert_eq!(widget.highlight, Some(HighlightMode::Push));
        assert!(widget.appearance_characteristics.is_some());

        let remaining = fields.into_remaining();
        assert_eq!(remaining.get("FT"), Some(&Object::name("Btn")));
        assert_eq!(remaining.len(), 1);
    }
}
