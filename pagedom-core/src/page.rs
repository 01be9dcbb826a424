//! Page objects (ISO 32000-1 Section 7.7.3.3, Table 30)
//!
//! A [`Page`] is the typed view of a page dictionary stored in an
//! [`ObjectGraph`]. Well-known entries are parsed into typed fields, every
//! other entry is carried through untouched, and [`Page::to_object`] rebuilds
//! the dictionary in canonical key order into the page's container.
//!
//! Attribute inheritance, annotations, content streams and resources are
//! handled by the extension traits in the `page_*` modules.

use crate::annotations::Annotation;
use crate::date::PdfDate;
use crate::error::{PdfError, Result};
use crate::geometry::Rectangle;
use crate::graph::ObjectGraph;
use crate::objects::{Dictionary, Object, ObjectId};
use crate::options::PageOptions;
use crate::page_annotations::load_annotations;
use crate::resources::Resources;
use indexmap::IndexMap;
use tracing::debug;

/// Page boundary boxes (ISO 32000-1 Section 14.11.2)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum BoxKind {
    MediaBox,
    CropBox,
    BleedBox,
    TrimBox,
    ArtBox,
}

impl BoxKind {
    pub const ALL: [BoxKind; 5] = [
        BoxKind::MediaBox,
        BoxKind::CropBox,
        BoxKind::BleedBox,
        BoxKind::TrimBox,
        BoxKind::ArtBox,
    ];

    pub fn key(&self) -> &'static str {
        match self {
            BoxKind::MediaBox => "MediaBox",
            BoxKind::CropBox => "CropBox",
            BoxKind::BleedBox => "BleedBox",
            BoxKind::TrimBox => "TrimBox",
            BoxKind::ArtBox => "ArtBox",
        }
    }
}

/// The `/Contents` entry: absent, a single stream, or an array of streams.
///
/// `One` holds whatever was stored (usually a reference to a stream, which
/// may itself resolve to an array). `Many` holds the elements of a direct
/// array.
#[derive(Debug, Clone, Default, PartialEq)]
pub enum Contents {
    #[default]
    None,
    One(Object),
    Many(Vec<Object>),
}

impl Contents {
    pub fn is_none(&self) -> bool {
        matches!(self, Contents::None)
    }

    fn from_object(object: Option<&Object>) -> Self {
        match object {
            None | Some(Object::Null) => Contents::None,
            Some(Object::Array(elements)) => Contents::Many(elements.clone()),
            Some(other) => Contents::One(other.clone()),
        }
    }

    fn to_object(&self) -> Option<Object> {
        match self {
            Contents::None => None,
            Contents::One(object) => Some(object.clone()),
            Contents::Many(elements) => Some(Object::Array(elements.clone())),
        }
    }
}

/// Keys with typed fields, plus `Type` which is always emitted.
const TYPED_KEYS: [&str; 12] = [
    "Type",
    "Parent",
    "LastModified",
    "Resources",
    "MediaBox",
    "CropBox",
    "BleedBox",
    "TrimBox",
    "ArtBox",
    "Contents",
    "Rotate",
    "Annots",
];

/// A single page of a document, backed by a container in the object graph.
///
/// # Example
///
/// ```rust
/// use pagedom::{ObjectGraph, Page, PageContents, Rectangle};
///
/// let mut graph = ObjectGraph::new();
/// let mut page = Page::new(&mut graph);
/// page.set_media_box(Some(Rectangle::from_position_and_size(0.0, 0.0, 612.0, 792.0)));
/// page.add_content_stream(&mut graph, "0 0 m 612 792 l S");
///
/// let id = page.to_object(&mut graph);
/// assert_eq!(id, page.container());
/// assert!(graph.get(id).and_then(|o| o.as_dict()).is_some());
/// ```
#[derive(Debug, Clone, PartialEq)]
pub struct Page {
    container: ObjectId,
    parent: Option<ObjectId>,
    last_modified: Option<PdfDate>,
    resources: Option<Resources>,
    media_box: Option<Rectangle>,
    crop_box: Option<Rectangle>,
    bleed_box: Option<Rectangle>,
    trim_box: Option<Rectangle>,
    art_box: Option<Rectangle>,
    rotate: Option<i64>,
    contents: Contents,
    annotations: Vec<Annotation>,
    attributes: IndexMap<String, Object>,
}

impl Page {
    /// Empty page in a freshly allocated container.
    pub fn new(graph: &mut ObjectGraph) -> Self {
        Self::empty(graph.allocate())
    }

    fn empty(container: ObjectId) -> Self {
        Self {
            container,
            parent: None,
            last_modified: None,
            resources: None,
            media_box: None,
            crop_box: None,
            bleed_box: None,
            trim_box: None,
            art_box: None,
            rotate: None,
            contents: Contents::None,
            annotations: Vec::new(),
            attributes: IndexMap::new(),
        }
    }

    /// Build a page from a page dictionary. The page gets a new container;
    /// nothing is allocated if parsing fails.
    pub fn from_dictionary(graph: &mut ObjectGraph, dict: &Dictionary) -> Result<Self> {
        Self::from_dictionary_with_options(graph, dict, &PageOptions::default())
    }

    pub fn from_dictionary_with_options(
        graph: &mut ObjectGraph,
        dict: &Dictionary,
        options: &PageOptions,
    ) -> Result<Self> {
        let mut page = Self::parse(graph, dict, options)?;
        page.container = graph.allocate();
        Ok(page)
    }

    /// Load the page dictionary stored at `id`, keeping `id` as the page's
    /// container so that references from the page tree stay valid.
    pub fn load(graph: &ObjectGraph, id: ObjectId) -> Result<Self> {
        Self::load_with_options(graph, id, &PageOptions::default())
    }

    pub fn load_with_options(
        graph: &ObjectGraph,
        id: ObjectId,
        options: &PageOptions,
    ) -> Result<Self> {
        let dict = graph
            .get(id)
            .ok_or(PdfError::InvalidReference(id))?
            .as_dict()
            .ok_or_else(|| PdfError::type_mismatch(id.to_string(), "page dictionary"))?;

        let mut page = Self::parse(graph, dict, options)?;
        page.container = id;
        Ok(page)
    }

    fn parse(graph: &ObjectGraph, dict: &Dictionary, options: &PageOptions) -> Result<Self> {
        match dict.get_type() {
            Some("Page") => {}
            Some(other) => {
                return Err(PdfError::SchemaViolation(format!(
                    "page dictionary /Type is {other}, expected Page"
                )))
            }
            None => {
                return Err(PdfError::SchemaViolation(
                    "page dictionary is missing /Type".to_string(),
                ))
            }
        }

        // Placeholder until the caller assigns the real container.
        let mut page = Self::empty(ObjectId::new(0, 0));

        page.parent = match dict.get("Parent") {
            None | Some(Object::Null) => None,
            Some(Object::Reference(id)) => Some(*id),
            Some(_) => return Err(PdfError::type_mismatch("Parent", "reference")),
        };

        if let Some(value) = direct_entry(graph, dict, "LastModified")? {
            let bytes = value
                .as_string()
                .ok_or_else(|| PdfError::type_mismatch("LastModified", "string"))?;
            page.last_modified = Some(PdfDate::parse(bytes)?);
        }

        if let Some(value) = direct_entry(graph, dict, "Resources")? {
            page.resources = Some(parse_resources(graph, value)?);
        }

        for kind in BoxKind::ALL {
            if let Some(value) = direct_entry(graph, dict, kind.key())? {
                page.set_page_box(kind, Some(parse_rectangle(kind.key(), value)?));
            }
        }

        if let Some(value) = direct_entry(graph, dict, "Rotate")? {
            page.rotate = Some(parse_rotate(value)?);
        }

        page.contents = Contents::from_object(dict.get("Contents"));

        for (key, value) in dict {
            if !TYPED_KEYS.contains(&key.as_str()) {
                page.attributes.insert(key.clone(), value.clone());
            }
        }

        page.annotations = load_annotations(graph, dict, options)?;

        debug!(
            "Parsed page with {} annotations and {} opaque attributes",
            page.annotations.len(),
            page.attributes.len()
        );

        Ok(page)
    }

    /// Container this page projects into.
    pub fn container(&self) -> ObjectId {
        self.container
    }

    pub fn parent(&self) -> Option<ObjectId> {
        self.parent
    }

    pub fn set_parent(&mut self, parent: Option<ObjectId>) {
        self.parent = parent;
    }

    pub fn last_modified(&self) -> Option<&PdfDate> {
        self.last_modified.as_ref()
    }

    pub fn set_last_modified(&mut self, date: Option<PdfDate>) {
        self.last_modified = date;
    }

    /// Resources declared on the page itself; see
    /// [`PageInheritance::get_resources`](crate::PageInheritance::get_resources)
    /// for the effective ones.
    pub fn resources(&self) -> Option<&Resources> {
        self.resources.as_ref()
    }

    pub fn resources_mut(&mut self) -> Option<&mut Resources> {
        self.resources.as_mut()
    }

    /// The page's own resources, created empty when absent.
    pub fn resources_or_default(&mut self) -> &mut Resources {
        self.resources.get_or_insert_with(Resources::new)
    }

    pub fn set_resources(&mut self, resources: Option<Resources>) {
        self.resources = resources;
    }

    /// Box declared on the page itself.
    pub fn page_box(&self, kind: BoxKind) -> Option<Rectangle> {
        match kind {
            BoxKind::MediaBox => self.media_box,
            BoxKind::CropBox => self.crop_box,
            BoxKind::BleedBox => self.bleed_box,
            BoxKind::TrimBox => self.trim_box,
            BoxKind::ArtBox => self.art_box,
        }
    }

    pub fn set_page_box(&mut self, kind: BoxKind, rect: Option<Rectangle>) {
        let slot = match kind {
            BoxKind::MediaBox => &mut self.media_box,
            BoxKind::CropBox => &mut self.crop_box,
            BoxKind::BleedBox => &mut self.bleed_box,
            BoxKind::TrimBox => &mut self.trim_box,
            BoxKind::ArtBox => &mut self.art_box,
        };
        *slot = rect;
    }

    pub fn media_box(&self) -> Option<Rectangle> {
        self.media_box
    }

    pub fn set_media_box(&mut self, rect: Option<Rectangle>) {
        self.media_box = rect;
    }

    pub fn crop_box(&self) -> Option<Rectangle> {
        self.crop_box
    }

    pub fn set_crop_box(&mut self, rect: Option<Rectangle>) {
        self.crop_box = rect;
    }

    /// `/Rotate` declared on the page itself.
    pub fn rotate(&self) -> Option<i64> {
        self.rotate
    }

    /// Set the page rotation; must be a multiple of 90 degrees.
    pub fn set_rotate(&mut self, rotate: Option<i64>) -> Result<()> {
        if let Some(degrees) = rotate {
            if degrees % 90 != 0 {
                return Err(PdfError::type_mismatch("Rotate", "multiple of 90"));
            }
        }
        self.rotate = rotate;
        Ok(())
    }

    pub fn contents(&self) -> &Contents {
        &self.contents
    }

    pub fn contents_mut(&mut self) -> &mut Contents {
        &mut self.contents
    }

    pub fn set_contents(&mut self, contents: Contents) {
        self.contents = contents;
    }

    pub fn annotations(&self) -> &[Annotation] {
        &self.annotations
    }

    pub fn annotations_mut(&mut self) -> &mut Vec<Annotation> {
        &mut self.annotations
    }

    /// Opaque entry, e.g. `Group`, `Tabs` or an unknown key.
    pub fn attribute(&self, key: &str) -> Option<&Object> {
        self.attributes.get(key)
    }

    /// Set an opaque entry. Keys with a typed accessor are rejected.
    pub fn set_attribute(&mut self, key: impl Into<String>, value: impl Into<Object>) -> Result<()> {
        let key = key.into();
        if TYPED_KEYS.contains(&key.as_str()) {
            return Err(PdfError::SchemaViolation(format!(
                "/{key} has a typed accessor"
            )));
        }
        self.attributes.insert(key, value.into());
        Ok(())
    }

    pub fn remove_attribute(&mut self, key: &str) -> Option<Object> {
        self.attributes.shift_remove(key)
    }

    pub fn attributes(&self) -> impl Iterator<Item = (&String, &Object)> {
        self.attributes.iter()
    }

    /// Canonical page dictionary, writing boxed annotations back to their
    /// containers along the way.
    pub fn to_dict(&self, graph: &mut ObjectGraph) -> Dictionary {
        let mut dict = Dictionary::new();
        dict.set("Type", Object::name("Page"));

        if let Some(parent) = self.parent {
            dict.set("Parent", Object::Reference(parent));
        }
        if let Some(date) = &self.last_modified {
            dict.set("LastModified", date.to_object());
        }
        if let Some(resources) = &self.resources {
            dict.set("Resources", resources.to_object(graph));
        }

        for kind in [
            BoxKind::CropBox,
            BoxKind::MediaBox,
            BoxKind::BleedBox,
            BoxKind::TrimBox,
            BoxKind::ArtBox,
        ] {
            if let Some(rect) = self.page_box(kind) {
                dict.set(kind.key(), rect.to_object());
            }
        }

        if let Some(contents) = self.contents.to_object() {
            dict.set("Contents", contents);
        }
        if let Some(rotate) = self.rotate {
            dict.set("Rotate", rotate);
        }

        for (key, value) in &self.attributes {
            dict.set(key.as_str(), value.clone());
        }

        if !self.annotations.is_empty() {
            let annots: Vec<Object> = self
                .annotations
                .iter()
                .map(|annotation| annotation.to_object(graph))
                .collect();
            dict.set("Annots", annots);
        }

        dict
    }

    /// Store the canonical dictionary into the page's container and return
    /// the container id. Repeated calls yield the same id and content.
    pub fn to_object(&self, graph: &mut ObjectGraph) -> ObjectId {
        let dict = self.to_dict(graph);
        graph.set_object(self.container, dict);
        self.container
    }
}

/// Entry `key` of `dict` with references followed.
fn direct_entry<'a>(
    graph: &'a ObjectGraph,
    dict: &'a Dictionary,
    key: &str,
) -> Result<Option<&'a Object>> {
    match dict.get(key) {
        Some(value) => graph.dereference(value).map(Some),
        None => Ok(None),
    }
}

pub(crate) fn parse_resources(graph: &ObjectGraph, value: &Object) -> Result<Resources> {
    let dict = value
        .as_dict()
        .ok_or_else(|| PdfError::type_mismatch("Resources", "dictionary"))?;
    Resources::from_dictionary(graph, dict)
}

pub(crate) fn parse_rectangle(key: &str, value: &Object) -> Result<Rectangle> {
    let array = value
        .as_array()
        .ok_or_else(|| PdfError::type_mismatch(key, "array"))?;
    Rectangle::from_array(array)
}

pub(crate) fn parse_rotate(value: &Object) -> Result<i64> {
    value
        .as_integer()
        .ok_or_else(|| PdfError::type_mismatch("Rotate", "integer"))
}
