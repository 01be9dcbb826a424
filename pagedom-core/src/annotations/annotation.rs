//! Base annotation types

use crate::annotations::AnnotationContext;
use crate::date::PdfDate;
use crate::error::{PdfError, Result};
use crate::geometry::{Point, Rectangle};
use crate::graph::ObjectGraph;
use crate::objects::{Dictionary, Object, ObjectId};
use bitflags::bitflags;

/// Annotation types according to ISO 32000-1 Table 169
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AnnotationType {
    /// Sticky note
    Text,
    Link,
    FreeText,
    Line,
    Square,
    Circle,
    Polygon,
    PolyLine,
    Highlight,
    Underline,
    Squiggly,
    StrikeOut,
    /// Rubber stamp
    Stamp,
    Caret,
    Ink,
    Popup,
    FileAttachment,
    Sound,
    Movie,
    /// Form field widget
    Widget,
    Screen,
    PrinterMark,
    TrapNet,
    Watermark,
}

impl AnnotationType {
    const ALL: [AnnotationType; 24] = [
        AnnotationType::Text,
        AnnotationType::Link,
        AnnotationType::FreeText,
        AnnotationType::Line,
        AnnotationType::Square,
        AnnotationType::Circle,
        AnnotationType::Polygon,
        AnnotationType::PolyLine,
        AnnotationType::Highlight,
        AnnotationType::Underline,
        AnnotationType::Squiggly,
        AnnotationType::StrikeOut,
        AnnotationType::Stamp,
        AnnotationType::Caret,
        AnnotationType::Ink,
        AnnotationType::Popup,
        AnnotationType::FileAttachment,
        AnnotationType::Sound,
        AnnotationType::Movie,
        AnnotationType::Widget,
        AnnotationType::Screen,
        AnnotationType::PrinterMark,
        AnnotationType::TrapNet,
        AnnotationType::Watermark,
    ];

    /// Get PDF subtype name
    pub fn pdf_name(&self) -> &'static str {
        match self {
            AnnotationType::Text => "Text",
            AnnotationType::Link => "Link",
            AnnotationType::FreeText => "FreeText",
            AnnotationType::Line => "Line",
            AnnotationType::Square => "Square",
            AnnotationType::Circle => "Circle",
            AnnotationType::Polygon => "Polygon",
            AnnotationType::PolyLine => "PolyLine",
            AnnotationType::Highlight => "Highlight",
            AnnotationType::Underline => "Underline",
            AnnotationType::Squiggly => "Squiggly",
            AnnotationType::StrikeOut => "StrikeOut",
            AnnotationType::Stamp => "Stamp",
            AnnotationType::Caret => "Caret",
            AnnotationType::Ink => "Ink",
            AnnotationType::Popup => "Popup",
            AnnotationType::FileAttachment => "FileAttachment",
            AnnotationType::Sound => "Sound",
            AnnotationType::Movie => "Movie",
            AnnotationType::Widget => "Widget",
            AnnotationType::Screen => "Screen",
            AnnotationType::PrinterMark => "PrinterMark",
            AnnotationType::TrapNet => "TrapNet",
            AnnotationType::Watermark => "Watermark",
        }
    }

    pub fn from_name(name: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|t| t.pdf_name() == name)
    }
}

bitflags! {
    /// Annotation flags according to ISO 32000-1 Section 12.5.3
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
    pub struct AnnotationFlags: u32 {
        const INVISIBLE = 1 << 0;
        const HIDDEN = 1 << 1;
        const PRINT = 1 << 2;
        const NO_ZOOM = 1 << 3;
        const NO_ROTATE = 1 << 4;
        const NO_VIEW = 1 << 5;
        const READ_ONLY = 1 << 6;
        const LOCKED = 1 << 7;
        const TOGGLE_NO_VIEW = 1 << 8;
        const LOCKED_CONTENTS = 1 << 9;
    }
}

/// An entry of a page's `/Annots` array.
///
/// Entries common to all annotations are typed; subtypes with a known
/// layout carry an [`AnnotationContext`]; everything else stays in an
/// ordered pass-through dictionary.
#[derive(Debug, Clone, PartialEq)]
pub struct Annotation {
    container: Option<ObjectId>,
    declares_type: bool,
    subtype: Option<String>,
    /// Annotation rectangle (Rect)
    pub rect: Option<Rectangle>,
    /// Text to display (Contents)
    pub contents: Option<Vec<u8>>,
    /// Page the annotation belongs to (P)
    pub page: Option<Object>,
    /// Unique name (NM)
    pub name: Option<Vec<u8>>,
    /// Modification date string (M), kept as written
    pub modified: Option<Vec<u8>>,
    /// Flags (F)
    pub flags: Option<AnnotationFlags>,
    /// Color components (C)
    pub color: Option<Vec<f64>>,
    context: Option<AnnotationContext>,
    extra: Dictionary,
}

impl Annotation {
    /// New inline annotation of a known type, printable by default.
    pub fn new(annotation_type: AnnotationType, rect: Rectangle) -> Self {
        Self {
            container: None,
            declares_type: true,
            subtype: Some(annotation_type.pdf_name().to_string()),
            rect: Some(rect),
            contents: None,
            page: None,
            name: None,
            modified: None,
            flags: Some(AnnotationFlags::PRINT),
            color: None,
            context: AnnotationContext::for_type(annotation_type),
            extra: Dictionary::new(),
        }
    }

    /// Parse an annotation dictionary.
    ///
    /// `container` is the id the dictionary was loaded from, or `None` for
    /// an annotation written inline in the `/Annots` array.
    pub fn from_container(
        graph: &ObjectGraph,
        container: Option<ObjectId>,
        dict: &Dictionary,
    ) -> Result<Self> {
        let mut fields = FieldReader::new(graph, dict.clone());

        let declares_type = match fields.take_name("Type")? {
            None => false,
            Some(name) if name == "Annot" => true,
            Some(other) => {
                return Err(PdfError::MalformedAnnotation(format!(
                    "/Type is {other}, expected Annot"
                )))
            }
        };
        let subtype = fields.take_name("Subtype")?;
        let rect = match fields.take_numbers("Rect")?.as_deref() {
            Some(&[llx, lly, urx, ury]) => {
                Some(Rectangle::new(Point::new(llx, lly), Point::new(urx, ury)))
            }
            Some(other) => {
                return Err(PdfError::MalformedAnnotation(format!(
                    "/Rect has {} elements, expected 4",
                    other.len()
                )))
            }
            None => None,
        };
        let contents = fields.take_string("Contents")?;
        let page = fields.take("P");
        let name = fields.take_string("NM")?;
        let modified = fields.take_string("M")?;
        let flags = match fields.take_integer("F")? {
            Some(bits) => Some(AnnotationFlags::from_bits_retain(
                u32::try_from(bits).map_err(|_| {
                    PdfError::MalformedAnnotation(format!("/F out of range: {bits}"))
                })?,
            )),
            None => None,
        };
        let color = fields.take_numbers("C")?;

        let context = match subtype.as_deref().and_then(AnnotationType::from_name) {
            Some(annotation_type) => AnnotationContext::extract(annotation_type, &mut fields)?,
            None => None,
        };

        Ok(Self {
            container,
            declares_type,
            subtype,
            rect,
            contents,
            page,
            name,
            modified,
            flags,
            color,
            context,
            extra: fields.into_remaining(),
        })
    }

    /// Container the annotation lives in, if any.
    pub fn container(&self) -> Option<ObjectId> {
        self.container
    }

    /// Raw `/Subtype` name.
    pub fn subtype(&self) -> Option<&str> {
        self.subtype.as_deref()
    }

    pub fn annotation_type(&self) -> Option<AnnotationType> {
        self.subtype.as_deref().and_then(AnnotationType::from_name)
    }

    /// Subtype-specific payload, `None` for generic annotations.
    pub fn context(&self) -> Option<&AnnotationContext> {
        self.context.as_ref()
    }

    pub fn context_mut(&mut self) -> Option<&mut AnnotationContext> {
        self.context.as_mut()
    }

    /// Entries not covered by the typed fields, in original order.
    pub fn extra(&self) -> &Dictionary {
        &self.extra
    }

    pub fn set_extra(&mut self, key: impl Into<String>, value: impl Into<Object>) {
        self.extra.set(key, value);
    }

    /// Parsed `/M`, when it holds a well-formed date.
    pub fn modified_date(&self) -> Option<PdfDate> {
        self.modified
            .as_deref()
            .and_then(|bytes| PdfDate::parse(bytes).ok())
    }

    pub fn set_modified_date(&mut self, date: PdfDate) {
        self.modified = Some(date.to_string().into_bytes());
    }

    /// Annotation dictionary.
    pub fn to_dict(&self) -> Dictionary {
        let mut dict = Dictionary::new();

        if self.declares_type {
            dict.set("Type", Object::name("Annot"));
        }
        if let Some(subtype) = &self.subtype {
            dict.set("Subtype", Object::name(subtype.as_str()));
        }
        if let Some(rect) = &self.rect {
            dict.set("Rect", rect.to_object());
        }
        if let Some(contents) = &self.contents {
            dict.set("Contents", Object::String(contents.clone()));
        }
        if let Some(page) = &self.page {
            dict.set("P", page.clone());
        }
        if let Some(name) = &self.name {
            dict.set("NM", Object::String(name.clone()));
        }
        if let Some(modified) = &self.modified {
            dict.set("M", Object::String(modified.clone()));
        }
        if let Some(flags) = self.flags {
            dict.set("F", flags.bits() as i64);
        }
        if let Some(color) = &self.color {
            dict.set("C", reals(color));
        }

        if let Some(context) = &self.context {
            context.write_entries(&mut dict);
        }

        for (key, value) in &self.extra {
            dict.set(key.as_str(), value.clone());
        }

        dict
    }

    /// Project into the graph. An annotation with a container is written
    /// back to it and referenced; an inline one is returned as a dictionary.
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

pub(super) fn reals(values: &[f64]) -> Object {
    Object::Array(values.iter().copied().map(Object::Real).collect())
}

/// Working copy of an annotation dictionary. Typed readers remove the keys
/// they consume; whatever is left becomes the pass-through entries.
pub(crate) struct FieldReader<'a> {
    graph: &'a ObjectGraph,
    dict: Dictionary,
}

impl<'a> FieldReader<'a> {
    pub(crate) fn new(graph: &'a ObjectGraph, dict: Dictionary) -> Self {
        Self { graph, dict }
    }

    /// Remove `key` as stored, references included.
    pub(crate) fn take(&mut self, key: &str) -> Option<Object> {
        self.dict.remove(key)
    }

    fn take_direct(&mut self, key: &str) -> Result<Option<Object>> {
        match self.dict.remove(key) {
            Some(value) => Ok(Some(self.graph.dereference(&value)?.clone())),
            None => Ok(None),
        }
    }

    pub(crate) fn take_name(&mut self, key: &str) -> Result<Option<String>> {
        match self.take_direct(key)? {
            Some(Object::Name(name)) => Ok(Some(name)),
            Some(other) => Err(malformed(key, "a name", &other)),
            None => Ok(None),
        }
    }

    pub(crate) fn take_string(&mut self, key: &str) -> Result<Option<Vec<u8>>> {
        match self.take_direct(key)? {
            Some(Object::String(bytes)) => Ok(Some(bytes)),
            Some(other) => Err(malformed(key, "a string", &other)),
            None => Ok(None),
        }
    }

    pub(crate) fn take_bool(&mut self, key: &str) -> Result<Option<bool>> {
        match self.take_direct(key)? {
            Some(Object::Boolean(b)) => Ok(Some(b)),
            Some(other) => Err(malformed(key, "a boolean", &other)),
            None => Ok(None),
        }
    }

    pub(crate) fn take_integer(&mut self, key: &str) -> Result<Option<i64>> {
        match self.take_direct(key)? {
            Some(Object::Integer(i)) => Ok(Some(i)),
            Some(other) => Err(malformed(key, "an integer", &other)),
            None => Ok(None),
        }
    }

    pub(crate) fn take_number(&mut self, key: &str) -> Result<Option<f64>> {
        match self.take_direct(key)? {
            Some(value) => value
                .as_real()
                .map(Some)
                .ok_or_else(|| malformed(key, "a number", &value)),
            None => Ok(None),
        }
    }

    pub(crate) fn take_numbers(&mut self, key: &str) -> Result<Option<Vec<f64>>> {
        let array = match self.take_direct(key)? {
            Some(Object::Array(array)) => array,
            Some(other) => return Err(malformed(key, "a number array", &other)),
            None => return Ok(None),
        };

        array
            .iter()
            .map(|element| {
                self.graph
                    .dereference(element)?
                    .as_real()
                    .ok_or_else(|| malformed(key, "a number array", element))
            })
            .collect::<Result<Vec<_>>>()
            .map(Some)
    }

    pub(crate) fn into_remaining(self) -> Dictionary {
        self.dict
    }
}

fn malformed(key: &str, expected: &str, found: &Object) -> PdfError {
    PdfError::MalformedAnnotation(format!(
        "/{key} must be {expected}, found {}",
        found.type_name()
    ))
}
