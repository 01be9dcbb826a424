//! PDF annotations according to ISO 32000-1 Chapter 12.5
//!
//! Annotations are parsed into a common [`Annotation`] record. Text, link,
//! popup, widget and text markup annotations additionally carry a typed
//! [`AnnotationContext`]; all other subtypes are kept generically.

mod annotation;
mod context;
mod link;
mod markup;
mod text;
mod widget;

pub use annotation::{Annotation, AnnotationFlags, AnnotationType};
pub use context::AnnotationContext;
pub use link::{HighlightMode, LinkAnnotation};
pub use markup::{MarkupInfo, MarkupType, TextMarkupAnnotation};
pub use text::{Icon, TextAnnotation};
pub use widget::{PopupAnnotation, WidgetAnnotation};
