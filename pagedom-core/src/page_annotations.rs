//! Loading of the `/Annots` array of a page dictionary.

use crate::annotations::Annotation;
use crate::error::{PdfError, Result};
use crate::graph::ObjectGraph;
use crate::objects::{Dictionary, Object};
use crate::options::PageOptions;
use tracing::{debug, warn};

/// Parse every annotation listed in the `/Annots` entry of `dict`.
///
/// Entries are normalized before parsing: references are looked up, null
/// entries are skipped and dictionaries written inline get a synthetic
/// container (no object id). Array order is preserved.
pub fn load_annotations(
    graph: &ObjectGraph,
    dict: &Dictionary,
    options: &PageOptions,
) -> Result<Vec<Annotation>> {
    let Some(annots) = dict.get("Annots") else {
        return Ok(Vec::new());
    };

    let entries = graph
        .dereference(annots)?
        .as_array()
        .ok_or_else(|| PdfError::type_mismatch("Annots", "array"))?;

    let mut annotations = Vec::with_capacity(entries.len());
    for (index, entry) in entries.iter().enumerate() {
        match entry {
            Object::Null => {
                debug!("Skipping null annotation entry at index {}", index);
            }
            Object::Reference(id) => {
                let target = graph.get(*id).ok_or(PdfError::InvalidReference(*id))?;
                match target {
                    Object::Null => {
                        debug!("Skipping annotation {} which resolves to null", id);
                    }
                    Object::Dictionary(annot) => {
                        annotations.push(Annotation::from_container(graph, Some(*id), annot)?);
                    }
                    other => {
                        return Err(PdfError::MalformedAnnotation(format!(
                            "annotation {} is a {}, expected dictionary",
                            id,
                            other.type_name()
                        )))
                    }
                }
            }
            Object::Dictionary(annot) => {
                if !options.lenient_annotations {
                    return Err(PdfError::MalformedAnnotation(format!(
                        "inline annotation dictionary at index {index}"
                    )));
                }
                warn!("Wrapping inline annotation dictionary at index {}", index);
                annotations.push(Annotation::from_container(graph, None, annot)?);
            }
            other => {
                return Err(PdfError::MalformedAnnotation(format!(
                    "/Annots entry {} is a {}",
                    index,
                    other.type_name()
                )))
            }
        }
    }

    Ok(annotations)
}
