//! Markup annotations (ISO 32000-1 Section 12.5.6.2)

use crate::annotations::annotation::{reals, FieldReader};
use crate::annotations::AnnotationType;
use crate::error::Result;
use crate::geometry::Rectangle;
use crate::objects::{Dictionary, Object};

/// Entries shared by every markup annotation.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct MarkupInfo {
    /// Author (T)
    pub title: Option<Vec<u8>>,
    /// Associated popup (Popup)
    pub popup: Option<Object>,
    /// Constant opacity (CA)
    pub opacity: Option<f64>,
    /// Short description (Subj)
    pub subject: Option<Vec<u8>>,
    /// Creation date string (CreationDate)
    pub creation_date: Option<Vec<u8>>,
    /// Annotation this one replies to (IRT)
    pub in_reply_to: Option<Object>,
}

impl MarkupInfo {
    pub(crate) fn extract(fields: &mut FieldReader<'_>) -> Result<Self> {
        Ok(Self {
            title: fields.take_string("T")?,
            popup: fields.take("Popup"),
            opacity: fields.take_number("CA")?,
            subject: fields.take_string("Subj")?,
            creation_date: fields.take_string("CreationDate")?,
            in_reply_to: fields.take("IRT"),
        })
    }

    pub(crate) fn write_entries(&self, dict: &mut Dictionary) {
        if let Some(title) = &self.title {
            dict.set("T", Object::String(title.clone()));
        }
        if let Some(popup) = &self.popup {
            dict.set("Popup", popup.clone());
        }
        if let Some(opacity) = self.opacity {
            dict.set("CA", opacity);
        }
        if let Some(subject) = &self.subject {
            dict.set("Subj", Object::String(subject.clone()));
        }
        if let Some(date) = &self.creation_date {
            dict.set("CreationDate", Object::String(date.clone()));
        }
        if let Some(irt) = &self.in_reply_to {
            dict.set("IRT", irt.clone());
        }
    }
}

/// Text markup annotation types
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MarkupType {
    Highlight,
    Underline,
    StrikeOut,
    Squiggly,
}

impl MarkupType {
    pub fn annotation_type(&self) -> AnnotationType {
        match self {
            MarkupType::Highlight => AnnotationType::Highlight,
            MarkupType::Underline => AnnotationType::Underline,
            MarkupType::StrikeOut => AnnotationType::StrikeOut,
            MarkupType::Squiggly => AnnotationType::Squiggly,
        }
    }

    pub fn from_annotation_type(annotation_type: AnnotationType) -> Option<Self> {
        match annotation_type {
            AnnotationType::Highlight => Some(MarkupType::Highlight),
            AnnotationType::Underline => Some(MarkupType::Underline),
            AnnotationType::StrikeOut => Some(MarkupType::StrikeOut),
            AnnotationType::Squiggly => Some(MarkupType::Squiggly),
            _ => None,
        }
    }
}

/// Highlight, underline, strikeout or squiggly annotation.
#[derive(Debug, Clone, PartialEq)]
pub struct TextMarkupAnnotation {
    pub markup_type: MarkupType,
    pub markup: MarkupInfo,
    /// Marked regions, 8 numbers per quadrilateral (QuadPoints)
    pub quad_points: Option<Vec<f64>>,
}

impl TextMarkupAnnotation {
    pub fn new(markup_type: MarkupType) -> Self {
        Self {
            markup_type,
            markup: MarkupInfo::default(),
            quad_points: None,
        }
    }

    /// Mark the given rectangles, counterclockwise from lower-left.
    pub fn with_rects(mut self, rects: &[Rectangle]) -> Self {
        let mut points = Vec::with_capacity(rects.len() * 8);
        for rect in rects {
            points.extend_from_slice(&[
                rect.lower_left.x,
                rect.lower_left.y,
                rect.upper_right.x,
                rect.lower_left.y,
                rect.upper_right.x,
                rect.upper_right.y,
                rect.lower_left.x,
                rect.upper_right.y,
            ]);
        }
        self.quad_points = Some(points);
        self
    }

    pub(crate) fn extract(markup_type: MarkupType, fields: &mut FieldReader<'_>) -> Result<Self> {
        Ok(Self {
            markup_type,
            markup: MarkupInfo::extract(fields)?,
            quad_points: fields.take_numbers("QuadPoints")?,
        })
    }

    pub(crate) fn write_entries(&self, dict: &mut Dictionary) {
        self.markup.write_entries(dict);
        if let Some(points) = &self.quad_points {
            dict.set("QuadPoints", reals(points));
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::graph::ObjectGraph;

    #[test]
    fn test_markup_type_mapping() {
        for markup_type in [
            MarkupType::Highlight,
            MarkupType::Underline,
            MarkupType::StrikeOut,
            MarkupType::Squiggly,
        ] {
            let annotation_type = markup_type.annotation_type();
            assert_eq!(
                MarkupType::from_annotation_type(annotation_type),
                Some(markup_type)
            );
        }
        assert_eq!(MarkupType::from_annotation_type(AnnotationType::Ink), None);
    }

    #[test]
    fn test_quad_points_from_rects() {
        let rect = Rectangle::from_position_and_size(10.0, 20.0, 100.0, 12.0);
        let markup = TextMarkupAnnotation::new(MarkupType::Highlight).with_rects(&[rect, rect]);
        let points = markup.quad_points.unwrap();
        assert_eq!(points.len(), 16);
        assert_eq!(&points[..8], &[10.0, 20.0, 110.0, 20.0, 110.0, 32.0, 10.0, 32.0]);
    }

    #[test]
    fn test_extract_consumes_markup_keys() {
        let graph = ObjectGraph::new();
        let mut dict = Dictionary::new();
        dict.set("T", "reviewer");
        dict.set("CA", 0.5);
        dict.set("QuadPoints", reals(&[0.0; 8]));
        dict.set("Other", 1);

        let mut fields = FieldReader::new(&graph, dict);
        let markup = TextMarkupAnnotation::extract(MarkupType::Underline, &mut fields).unwrap();
        assert_eq!(markup.markup.title.as_deref(), Some(&b"reviewer"[..]));
        assert_eq!(markup.markup.opacity, Some(0.5));

        let remaining = fields.into_remaining();
        assert_eq!(remaining.len(), 1);
        assert!(remaining.contains_key("Other"));
    }
}
