//! Link annotations (ISO 32000-1 Section 12.5.6.5)

use crate::annotations::annotation::{reals, FieldReader};
use crate::error::{PdfError, Result};
use crate::objects::{Dictionary, Object};

/// Visual effect when the annotation is activated (H)
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum HighlightMode {
    None,
    #[default]
    Invert,
    Outline,
    Push,
    /// Widgets only
    Toggle,
}

impl HighlightMode {
    pub fn pdf_name(&self) -> &'static str {
        match self {
            HighlightMode::None => "N",
            HighlightMode::Invert => "I",
            HighlightMode::Outline => "O",
            HighlightMode::Push => "P",
            HighlightMode::Toggle => "T",
        }
    }

    pub fn from_name(name: &str) -> Option<Self> {
        match name {
            "N" => Some(HighlightMode::None),
            "I" => Some(HighlightMode::Invert),
            "O" => Some(HighlightMode::Outline),
            "P" => Some(HighlightMode::Push),
            "T" => Some(HighlightMode::Toggle),
            _ => None,
        }
    }

    pub(crate) fn extract(fields: &mut FieldReader<'_>) -> Result<Option<Self>> {
        match fields.take_name("H")? {
            Some(name) => Self::from_name(&name).map(Some).ok_or_else(|| {
                PdfError::MalformedAnnotation(format!("unknown highlight mode /{name}"))
            }),
            None => Ok(None),
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct LinkAnnotation {
    /// Destination (Dest)
    pub destination: Option<Object>,
    /// Action to perform (A)
    pub action: Option<Object>,
    pub highlight: Option<HighlightMode>,
    /// Active regions (QuadPoints)
    pub quad_points: Option<Vec<f64>>,
    /// Border style dictionary (BS)
    pub border_style: Option<Object>,
}

impl LinkAnnotation {
    /// Link to a URI.
    pub fn to_uri(uri: &str) -> Self {
        let mut action = Dictionary::new();
        action.set("S", Object::name("URI"));
        action.set("URI", uri);

        Self {
            action: Some(Object::Dictionary(action)),
            ..Self::default()
        }
    }

    pub(crate) fn extract(fields: &mut FieldReader<'_>) -> Result<Self> {
        Ok(Self {
            destination: fields.take("Dest"),
            action: fields.take("A"),
            highlight: HighlightMode::extract(fields)?,
            quad_points: fields.take_numbers("QuadPoints")?,
            border_style: fields.take("BS"),
        })
    }

    pub(crate) fn write_entries(&self, dict: &mut Dictionary) {
        if let Some(dest) = &self.destination {
            dict.set("Dest", dest.clone());
        }
        if let Some(action) = &self.action {
            dict.set("A", action.clone());
        }
        if let Some(mode) = self.highlight {
            dict.set("H", Object::name(mode.pdf_name()));
        }
        if let Some(points) = &self.quad_points {
            dict.set("QuadPoints", reals(points));
        }
        if let Some(bs) = &self.border_style {
            dict.set("BS", bs.clone());
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::graph::ObjectGraph;

    #[test]
    fn test_highlight_mode_names() {
        for mode in [
            HighlightMode::None,
            HighlightMode::Invert,
            HighlightMode::Outline,
            HighlightMode::Push,
            HighlightMode::Toggle,
        ] {
            assert_eq!(HighlightMode::from_name(mode.pdf_name()), Some(mode));
        }
        assert_eq!(HighlightMode::from_name("X"), None);
    }

    #[test]
    fn test_uri_link() {
        let link = LinkAnnotation::to_uri("https://example.com");
        let mut dict = Dictionary::new();
        link.write_entries(&mut dict);

        let action = dict.get_dict("A").unwrap();
        assert_eq!(action.get("S"), Some(&Object::name("URI")));
        assert!(!dict.contains_key("H"));
    }

    #[test]
    fn test_extract_keeps_destination_raw() {
        let mut graph = ObjectGraph::new();
        let page = graph.allocate();
        let mut dict = Dictionary::new();
        dict.set(
            "Dest",
            vec![Object::Reference(page), Object::name("Fit")],
        );
        dict.set("H", Object::name("O"));

        let mut fields = FieldReader::new(&graph, dict.clone());
        let link = LinkAnnotation::extract(&mut fields).unwrap();
        assert_eq!(link.highlight, Some(HighlightMode::Outline));
        assert_eq!(link.destination.as_ref(), dict.get("Dest"));
    }

    #[test]
    fn test_extract_rejects_unknown_highlight() {
        let graph = ObjectGraph::new();
        let mut dict = Dictionary::new();
        dict.set("H", Object::name("Sparkle"));

        let mut fields = FieldReader::new(&graph, dict);
        assert!(matches!(
            LinkAnnotation::extract(&mut fields),
            Err(PdfError::MalformedAnnotation(_))
        ));
    }
}
