//! Image watermarks
//!
//! A watermark is an image XObject drawn over the whole page through a
//! dedicated graphics state carrying the opacity.

use crate::error::Result;
use crate::geometry::Rectangle;
use crate::graph::ObjectGraph;
use crate::graphics::{BlendMode, ExtGState, XObjectImage};
use crate::objects::{Object, ObjectId};
use crate::page::Page;
use crate::page_contents::PageContents;
use crate::page_inheritance::{ancestor_resources, PageInheritance};
use crate::page_resources::PageResources;
use crate::resources::{ResourceCategory, Resources};
use tracing::debug;

/// Resource name of the watermark image.
pub const WATERMARK_IMAGE: &str = "Imw0";
/// Resource name of the watermark graphics state.
pub const WATERMARK_GSTATE: &str = "GS0";

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct WatermarkOptions {
    /// Opacity for both stroking and non-stroking operations
    pub alpha: f64,
    /// Stretch the image to the full page width
    pub fit_to_width: bool,
    /// Derive the height from the image's aspect ratio and center it
    /// vertically, instead of stretching it to the page height
    pub preserve_aspect_ratio: bool,
}

impl Default for WatermarkOptions {
    fn default() -> Self {
        Self {
            alpha: 1.0,
            fit_to_width: false,
            preserve_aspect_ratio: false,
        }
    }
}

impl WatermarkOptions {
    pub fn new(alpha: f64) -> Self {
        Self {
            alpha,
            ..Self::default()
        }
    }

    pub fn fit_to_width(mut self, fit: bool) -> Self {
        self.fit_to_width = fit;
        self
    }

    pub fn preserve_aspect_ratio(mut self, preserve: bool) -> Self {
        self.preserve_aspect_ratio = preserve;
        self
    }
}

/// Where the watermark image lands on the page, in default user space.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct WatermarkPlacement {
    pub width: f64,
    pub height: f64,
    pub offset_x: f64,
    pub offset_y: f64,
}

impl WatermarkPlacement {
    /// Place an image of `image_width` x `image_height` on `media_box`.
    pub fn compute(
        media_box: &Rectangle,
        image_width: f64,
        image_height: f64,
        options: &WatermarkOptions,
    ) -> Self {
        let page_width = media_box.width();
        let page_height = media_box.height();

        let (width, offset_x) = if options.fit_to_width {
            (page_width, 0.0)
        } else {
            (image_width, (page_width - image_width) / 2.0)
        };

        let (height, offset_y) = if options.preserve_aspect_ratio {
            let height = width * image_height / image_width;
            (height, (page_height - height) / 2.0)
        } else {
            (page_height, 0.0)
        };

        Self {
            width,
            height,
            offset_x,
            offset_y,
        }
    }

    /// Content stream drawing the watermark image with its graphics state.
    pub fn content(&self) -> String {
        format!(
            "q\n/{WATERMARK_GSTATE} gs\n{:.0} 0 0 {:.0} {:.4} {:.4} cm\n/{WATERMARK_IMAGE} Do\nQ",
            self.width, self.height, self.offset_x, self.offset_y
        )
    }
}

/// Extension trait for stamping a watermark image onto a page
pub trait PageWatermark {
    /// Draw `image` over the page. The image is registered as `Imw0`, its
    /// graphics state as `GS0`, and a content stream is appended.
    ///
    /// An image container already bound to `Imw0` by the page itself is
    /// overwritten in place; one shared with an ancestor is left alone.
    fn add_watermark_image(
        &mut self,
        graph: &mut ObjectGraph,
        image: &XObjectImage,
        options: &WatermarkOptions,
    ) -> Result<WatermarkPlacement>;
}

impl PageWatermark for Page {
    fn add_watermark_image(
        &mut self,
        graph: &mut ObjectGraph,
        image: &XObjectImage,
        options: &WatermarkOptions,
    ) -> Result<WatermarkPlacement> {
        let media_box = self.get_media_box(graph)?;
        let placement = WatermarkPlacement::compute(
            &media_box,
            f64::from(image.width()),
            f64::from(image.height()),
            options,
        );
        debug!(
            "Placing {}x{} watermark at ({}, {})",
            placement.width, placement.height, placement.offset_x, placement.offset_y
        );

        match own_watermark_image(self, graph) {
            Some(id) => {
                debug!("Replacing watermark image {}", id);
                graph.set_object(id, image.to_stream());
            }
            None => {
                self.add_image_resource(graph, WATERMARK_IMAGE, image)?;
            }
        }

        let state = ExtGState::new()
            .with_blend_mode(BlendMode::Normal)
            .with_alpha(options.alpha);
        self.add_ext_gstate(graph, WATERMARK_GSTATE, state.to_dict())?;

        self.add_content_stream(graph, placement.content());
        Ok(placement)
    }
}

/// Stream container bound to `Imw0` in the page's own resources and not
/// inherited from an ancestor.
fn own_watermark_image(page: &Page, graph: &ObjectGraph) -> Option<ObjectId> {
    let bound = |resources: &Resources| {
        resources
            .category_dict(graph, ResourceCategory::XObject)
            .ok()
            .flatten()
            .and_then(|xobjects| xobjects.get(WATERMARK_IMAGE))
            .and_then(Object::as_reference)
    };

    let id = page.resources().and_then(bound)?;
    graph.get(id).and_then(Object::as_stream)?;
    let shared = ancestor_resources(page, graph)
        .ok()
        .flatten()
        .as_ref()
        .and_then(bound);
    (shared != Some(id)).then_some(id)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::graphics::ImageColorSpace;
    use crate::objects::Dictionary;
    use crate::page::BoxKind;

    fn letter() -> Rectangle {
        Rectangle::from_position_and_size(0.0, 0.0, 612.0, 792.0)
    }

    fn image(width: u32, height: u32) -> XObjectImage {
        let data = vec![0u8; (width * height) as usize];
        XObjectImage::from_raw(width, height, ImageColorSpace::DeviceGray, 8, data).unwrap()
    }

    #[test]
    fn test_default_placement() {
        let placement =
            WatermarkPlacement::compute(&letter(), 300.0, 150.0, &WatermarkOptions::new(0.5));
        assert_eq!(
            placement,
            WatermarkPlacement {
                width: 300.0,
                height: 792.0,
                offset_x: 156.0,
                offset_y: 0.0,
            }
        );
    }

    #[test]
    fn test_fit_and_preserve() {
        let options = WatermarkOptions::new(0.5)
            .fit_to_width(true)
            .preserve_aspect_ratio(true);
        let placement = WatermarkPlacement::compute(&letter(), 300.0, 150.0, &options);
        assert_eq!(placement.width, 612.0);
        assert_eq!(placement.offset_x, 0.0);
        assert_eq!(placement.height, 306.0);
        assert_eq!(placement.offset_y, 243.0);
    }

    #[test]
    fn test_content_format() {
        let placement = WatermarkPlacement {
            width: 300.0,
            height: 792.0,
            offset_x: 156.0,
            offset_y: 0.0,
        };
        assert_eq!(
            placement.content(),
            "q\n/GS0 gs\n300 0 0 792 156.0000 0.0000 cm\n/Imw0 Do\nQ"
        );
    }

    #[test]
    fn test_add_watermark_image() {
        let mut graph = ObjectGraph::new();
        let mut page = Page::new(&mut graph);
        page.set_page_box(BoxKind::MediaBox, Some(letter()));
        page.add_content_stream(&mut graph, "BT ET");

        page.add_watermark_image(&mut graph, &image(300, 150), &WatermarkOptions::new(0.25))
            .unwrap();

        assert!(page.has_image_resource(&graph, WATERMARK_IMAGE));
        let resources = page.resources().unwrap();
        let states = resources
            .category_dict(&graph, ResourceCategory::ExtGState)
            .unwrap()
            .unwrap();
        let gs0 = states.get(WATERMARK_GSTATE).and_then(Object::as_dict).unwrap();
        assert_eq!(gs0.get("BM"), Some(&Object::name("Normal")));
        assert_eq!(gs0.get("CA"), Some(&Object::Real(0.25)));
        assert_eq!(gs0.get("ca"), Some(&Object::Real(0.25)));

        let streams = page.content_streams(&graph).unwrap();
        assert_eq!(streams.len(), 2);
        assert_eq!(
            streams[1],
            b"q\n/GS0 gs\n300 0 0 792 156.0000 0.0000 cm\n/Imw0 Do\nQ".to_vec()
        );
    }

    #[test]
    fn test_watermark_needs_media_box() {
        let mut graph = ObjectGraph::new();
        let mut page = Page::new(&mut graph);
        assert!(page
            .add_watermark_image(&mut graph, &image(2, 2), &WatermarkOptions::default())
            .is_err());
        assert!(page.resources().is_none());
        assert!(page.contents().is_none());
    }

    fn bound_image(page: &Page, graph: &ObjectGraph) -> ObjectId {
        page.resources()
            .unwrap()
            .category_dict(graph, ResourceCategory::XObject)
            .unwrap()
            .unwrap()
            .get(WATERMARK_IMAGE)
            .and_then(Object::as_reference)
            .unwrap()
    }

    #[test]
    fn test_repeated_watermark_reuses_image() {
        let mut graph = ObjectGraph::new();
        let mut page = Page::new(&mut graph);
        page.set_media_box(Some(letter()));
        let options = WatermarkOptions::new(0.5);

        page.add_watermark_image(&mut graph, &image(2, 2), &options)
            .unwrap();
        let first = bound_image(&page, &graph);
        let objects = graph.len();

        page.add_watermark_image(&mut graph, &image(4, 1), &options)
            .unwrap();
        assert_eq!(bound_image(&page, &graph), first);
        // only the new content stream was added
        assert_eq!(graph.len(), objects + 1);
        let stored = graph.get(first).and_then(Object::as_stream).unwrap();
        assert_eq!(stored.dictionary().get("Width"), Some(&Object::Integer(4)));
    }

    #[test]
    fn test_inherited_watermark_image_untouched() {
        let mut graph = ObjectGraph::new();
        let shared = graph.add_object(image(2, 2).to_stream());
        let mut xobjects = Dictionary::new();
        xobjects.set(WATERMARK_IMAGE, Object::Reference(shared));
        let mut resources = Dictionary::new();
        resources.set("XObject", xobjects);
        let mut root = Dictionary::new();
        root.set("Type", Object::name("Pages"));
        root.set("MediaBox", letter().to_object());
        root.set("Resources", resources);
        let root = graph.add_object(root);
        let before = graph.get(shared).cloned();

        let mut page = Page::new(&mut graph);
        page.set_parent(Some(root));
        page.add_watermark_image(&mut graph, &image(4, 1), &WatermarkOptions::default())
            .unwrap();
        page.add_watermark_image(&mut graph, &image(4, 1), &WatermarkOptions::default())
            .unwrap();

        assert_ne!(bound_image(&page, &graph), shared);
        assert_eq!(graph.get(shared).cloned(), before);
    }
}
