use crate::annotations::annotation::FieldReader;
use crate::annotations::{
    AnnotationType, LinkAnnotation, MarkupType, PopupAnnotation, TextAnnotation,
    TextMarkupAnnotation, WidgetAnnotation,
};
use crate::error::Result;
use crate::objects::Dictionary;

/// Subtype-specific part of an annotation. Subtypes without an entry here
/// are handled generically.
#[derive(Debug, Clone, PartialEq)]
pub enum AnnotationContext {
    Text(TextAnnotation),
    Link(LinkAnnotation),
    Popup(PopupAnnotation),
    Widget(WidgetAnnotation),
    Markup(TextMarkupAnnotation),
}

impl AnnotationContext {
    /// Empty payload for a freshly created annotation.
    pub fn for_type(annotation_type: AnnotationType) -> Option<Self> {
        match annotation_type {
            AnnotationType::Text => Some(Self::Text(TextAnnotation::default())),
            AnnotationType::Link => Some(Self::Link(LinkAnnotation::default())),
            AnnotationType::Popup => Some(Self::Popup(PopupAnnotation::default())),
            AnnotationType::Widget => Some(Self::Widget(WidgetAnnotation::default())),
            other => MarkupType::from_annotation_type(other)
                .map(|markup_type| Self::Markup(TextMarkupAnnotation::new(markup_type))),
        }
    }

    pub(crate) fn extract(
        annotation_type: AnnotationType,
        fields: &mut FieldReader<'_>,
    ) -> Result<Option<Self>> {
        let context = match annotation_type {
            AnnotationType::Text => Self::Text(TextAnnotation::extract(fields)?),
            AnnotationType::Link => Self::Link(LinkAnnotation::extract(fields)?),
            AnnotationType::Popup => Self::Popup(PopupAnnotation::extract(fields)?),
            AnnotationType::Widget => Self::Widget(WidgetAnnotation::extract(fields)?),
            other => match MarkupType::from_annotation_type(other) {
                Some(markup_type) => {
                    Self::Markup(TextMarkupAnnotation::extract(markup_type, fields)?)
                }
                None => return Ok(None),
            },
        };
        Ok(Some(context))
    }

    pub(crate) fn write_entries(&self, dict: &mut Dictionary) {
        match self {
            Self::Text(text) => text.write_entries(dict),
            Self::Link(link) => link.write_entries(dict),
            Self::Popup(popup) => popup.write_entries(dict),
            Self::Widget(widget) => widget.write_entries(dict),
            Self::Markup(markup) => markup.write_entries(dict),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::annotations::Annotation;
    use crate::graph::ObjectGraph;
    use crate::objects::Object;

    #[test]
    fn test_for_type() {
        assert!(matches!(
            AnnotationContext::for_type(AnnotationType::Squiggly),
            Some(AnnotationContext::Markup(TextMarkupAnnotation {
                markup_type: MarkupType::Squiggly,
                ..
            }))
        ));
        assert!(AnnotationContext::for_type(AnnotationType::Ink).is_none());
    }

    #[test]
    fn test_typed_annotation_roundtrip() {
        let graph = ObjectGraph::new();
        let mut dict = Dictionary::new();
        dict.set("Type", Object::name("Annot"));
        dict.set("Subtype", Object::name("Text"));
        dict.set("Rect", vec![Object::Real(0.0), Object::Real(0.0), Object::Real(20.0), Object::Real(20.0)]);
        dict.set("T", "author");
        dict.set("Open", false);
        dict.set("Name", Object::name("Comment"));
        dict.set("RC", "<body/>");

        let annotation = Annotation::from_container(&graph, None, &dict).unwrap();
        match annotation.context() {
            Some(AnnotationContext::Text(text)) => {
                assert_eq!(text.icon.as_deref(), Some("Comment"));
                assert_eq!(text.markup.title.as_deref(), Some(&b"author"[..]));
            }
            other => panic!("expected text context, got {other:?}"),
        }
        assert!(annotation.extra().contains_key("RC"));
        assert_eq!(annotation.to_dict(), dict);
    }
}
