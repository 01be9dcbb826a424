//! # pagedom
//!
//! Page-level document object model for PDF object graphs.
//!
//! ## Features
//!
//! - **Typed pages**: Parse page dictionaries into a [`Page`] with typed boxes, rotation, resources and contents
//! - **Attribute inheritance**: Resolve `MediaBox`, `CropBox`, `Rotate` and `Resources` through the page tree
//! - **Annotations**: Load `/Annots` arrays into typed annotations, normalizing inline and null entries
//! - **Content streams**: Append, replace and decode page content streams with pluggable encoders
//! - **Resources**: Register images, fonts and graphics states without touching shared ancestors
//! - **Watermarks**: Stamp a translucent image over a page
//!
//! ## Quick Start
//!
//! ```rust
//! use pagedom::{
//!     ImageColorSpace, ObjectGraph, Page, PageContents, PageInheritance, PageWatermark,
//!     Rectangle, Result, WatermarkOptions, XObjectImage,
//! };
//!
//! # fn main() -> Result<()> {
//! let mut graph = ObjectGraph::new();
//!
//! // Create a page
//! let mut page = Page::new(&mut graph);
//! page.set_media_box(Some(Rectangle::from_position_and_size(0.0, 0.0, 612.0, 792.0)));
//! page.add_content_stream(&mut graph, "BT /F1 24 Tf 72 720 Td (Hello) Tj ET");
//!
//! // Stamp a watermark
//! let image = XObjectImage::from_raw(2, 1, ImageColorSpace::DeviceGray, 8, vec![0, 255])?;
//! page.add_watermark_image(&mut graph, &image, &WatermarkOptions::new(0.3))?;
//!
//! assert_eq!(page.get_rotate(&graph)?, 0);
//! assert_eq!(page.content_streams(&graph)?.len(), 2);
//!
//! // Write the page dictionary back into the graph
//! let id = page.to_object(&mut graph);
//! let reloaded = Page::load(&graph, id)?;
//! assert_eq!(reloaded.media_box(), page.media_box());
//! # Ok(())
//! # }
//! ```

pub mod annotations;
pub mod colorspace;
pub mod date;
pub mod encoding;
pub mod error;
pub mod filters;
pub mod geometry;
pub mod graph;
pub mod graphics;
pub mod objects;
pub mod options;
pub mod page;
pub mod page_annotations;
pub mod page_contents;
pub mod page_inheritance;
pub mod page_resources;
pub mod resources;
pub mod watermark;

pub use annotations::{Annotation, AnnotationContext, AnnotationFlags, AnnotationType};
pub use colorspace::{Colorspace, ColorspaceTable};
pub use date::PdfDate;
#[cfg(feature = "compression")]
pub use encoding::FlateEncoder;
pub use encoding::{AsciiHexEncoder, RawEncoder, StreamEncoder};
pub use error::{PdfError, Result};
pub use geometry::{Point, Rectangle};
pub use graph::ObjectGraph;
pub use graphics::{BlendMode, ExtGState, ImageColorSpace, ImageFormat, XObjectImage};
pub use objects::{Dictionary, Object, ObjectId, Stream};
pub use options::PageOptions;
pub use page::{BoxKind, Contents, Page};
pub use page_annotations::load_annotations;
pub use page_contents::PageContents;
pub use page_inheritance::PageInheritance;
pub use page_resources::PageResources;
pub use resources::{ResourceCategory, Resources};
pub use watermark::{PageWatermark, WatermarkOptions, WatermarkPlacement};

/// Current version of pagedom
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_version_info() {
        assert!(!VERSION.is_empty());
    }

    #[test]
    fn test_new_page_projects() {
        let mut graph = ObjectGraph::new();
        let page = Page::new(&mut graph);
        let id = page.to_object(&mut graph);
        let dict = graph.get(id).and_then(Object::as_dict).unwrap();
        assert_eq!(dict.get_type(), Some("Page"));
    }
}
