//! Page content streams (ISO 32000-1 Section 7.8.2)
//!
//! `/Contents` is either a single stream or an array of streams whose
//! concatenation forms the page description. Streams written here are
//! always stored in the graph and referenced from the page.

use crate::encoding::{RawEncoder, StreamEncoder};
use crate::error::{PdfError, Result};
use crate::graph::ObjectGraph;
use crate::objects::{Object, ObjectId, Stream};
use crate::page::{Contents, Page};
use tracing::{debug, trace};

/// Extension trait for reading and writing page content streams
pub trait PageContents {
    /// Append an unfiltered content stream after the existing ones.
    /// Returns the id of the new stream.
    fn add_content_stream(
        &mut self,
        graph: &mut ObjectGraph,
        content: impl Into<Vec<u8>>,
    ) -> ObjectId;

    /// Replace all content streams, encoding each one with `encoder`
    /// (raw when `None`). An empty list removes `/Contents`. Nothing is
    /// added to the graph if any stream fails to encode.
    fn set_content_streams<S: AsRef<[u8]>>(
        &mut self,
        graph: &mut ObjectGraph,
        streams: &[S],
        encoder: Option<&dyn StreamEncoder>,
    ) -> Result<()>;

    /// Decoded content of every stream, in order.
    fn content_streams(&self, graph: &ObjectGraph) -> Result<Vec<Vec<u8>>>;

    /// All content streams joined with a single space.
    fn all_content_streams(&self, graph: &ObjectGraph) -> Result<Vec<u8>>;
}

impl PageContents for Page {
    fn add_content_stream(
        &mut self,
        graph: &mut ObjectGraph,
        content: impl Into<Vec<u8>>,
    ) -> ObjectId {
        let id = graph.add_object(Stream::new(content.into()));
        let stream = Object::Reference(id);

        let contents = match std::mem::take(self.contents_mut()) {
            Contents::None => Contents::One(stream),
            Contents::One(existing) => {
                debug!("Promoting single content stream to an array");
                Contents::Many(vec![existing, stream])
            }
            Contents::Many(mut streams) => {
                streams.push(stream);
                Contents::Many(streams)
            }
        };
        self.set_contents(contents);
        id
    }

    fn set_content_streams<S: AsRef<[u8]>>(
        &mut self,
        graph: &mut ObjectGraph,
        streams: &[S],
        encoder: Option<&dyn StreamEncoder>,
    ) -> Result<()> {
        let raw = RawEncoder::new();
        let encoder = encoder.unwrap_or(&raw);

        let mut encoded = Vec::with_capacity(streams.len());
        for content in streams {
            let data = encoder.encode(content.as_ref())?;
            encoded.push(Stream::with_dictionary(encoder.make_stream_dict(), data));
        }

        let mut references: Vec<Object> = encoded
            .into_iter()
            .map(|stream| Object::Reference(graph.add_object(stream)))
            .collect();

        let contents = match references.len() {
            0 => Contents::None,
            1 => Contents::One(references.remove(0)),
            _ => Contents::Many(references),
        };
        self.set_contents(contents);
        Ok(())
    }

    fn content_streams(&self, graph: &ObjectGraph) -> Result<Vec<Vec<u8>>> {
        let mut decoded = Vec::new();
        match self.contents() {
            Contents::None => {}
            Contents::One(object) => match graph.dereference(object)? {
                Object::Array(elements) => {
                    trace!("Single /Contents entry resolves to an array");
                    for element in elements {
                        decode_element(graph, element, &mut decoded)?;
                    }
                }
                other => decoded.push(decode_leaf(graph, other)?),
            },
            Contents::Many(elements) => {
                for element in elements {
                    decode_element(graph, element, &mut decoded)?;
                }
            }
        }
        Ok(decoded)
    }

    fn all_content_streams(&self, graph: &ObjectGraph) -> Result<Vec<u8>> {
        Ok(self.content_streams(graph)?.join(&b' '))
    }
}

/// Decode one array element. An element referring to an array (left there
/// by appending to a referenced stream array) is flattened one level.
fn decode_element(graph: &ObjectGraph, element: &Object, out: &mut Vec<Vec<u8>>) -> Result<()> {
    match graph.dereference(element)? {
        Object::Array(nested) if element.as_reference().is_some() => {
            for inner in nested {
                out.push(decode_leaf(graph, graph.dereference(inner)?)?);
            }
        }
        other => out.push(decode_leaf(graph, other)?),
    }
    Ok(())
}

fn decode_leaf(graph: &ObjectGraph, object: &Object) -> Result<Vec<u8>> {
    match object {
        Object::String(bytes) => Ok(bytes.clone()),
        Object::Stream(stream) => graph.decode(stream),
        _ => Err(PdfError::type_mismatch("Contents", "stream")),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::encoding::AsciiHexEncoder;

    fn stream_at<'g>(graph: &'g ObjectGraph, object: &Object) -> &'g Stream {
        let id = object.as_reference().unwrap();
        graph.get(id).and_then(Object::as_stream).unwrap()
    }

    #[test]
    fn test_empty_page_has_no_content() {
        let mut graph = ObjectGraph::new();
        let page = Page::new(&mut graph);
        assert!(page.content_streams(&graph).unwrap().is_empty());
        assert_eq!(page.all_content_streams(&graph).unwrap(), b"");
    }

    #[test]
    fn test_append_promotes_to_array() {
        let mut graph = ObjectGraph::new();
        let mut page = Page::new(&mut graph);

        let id = page.add_content_stream(&mut graph, "q");
        match page.contents() {
            Contents::One(object) => {
                assert_eq!(object, &Object::Reference(id));
                let stream = stream_at(&graph, object);
                assert_eq!(stream.data(), b"q");
                assert_eq!(stream.dictionary().get("Length"), Some(&Object::Integer(1)));
            }
            other => panic!("expected single stream, got {other:?}"),
        }

        page.add_content_stream(&mut graph, "Q");
        page.add_content_stream(&mut graph, b"BT ET".to_vec());
        assert!(matches!(page.contents(), Contents::Many(streams) if streams.len() == 3));
        assert_eq!(page.all_content_streams(&graph).unwrap(), b"q Q BT ET");
    }

    #[test]
    fn test_set_content_streams() {
        let mut graph = ObjectGraph::new();
        let mut page = Page::new(&mut graph);

        page.set_content_streams(&mut graph, &["0 g"], None).unwrap();
        assert!(matches!(page.contents(), Contents::One(Object::Reference(_))));

        page.set_content_streams(&mut graph, &["0 g", "1 g"], None)
            .unwrap();
        assert_eq!(
            page.content_streams(&graph).unwrap(),
            vec![b"0 g".to_vec(), b"1 g".to_vec()]
        );

        let none: [&str; 0] = [];
        page.set_content_streams(&mut graph, &none, None).unwrap();
        assert!(page.contents().is_none());
    }

    #[test]
    fn test_encoded_streams_read_back() {
        let mut graph = ObjectGraph::new();
        let mut page = Page::new(&mut graph);
        let encoder = AsciiHexEncoder::new();

        page.set_content_streams(&mut graph, &["BT /F1 12 Tf ET"], Some(&encoder))
            .unwrap();
        match page.contents() {
            Contents::One(object) => {
                let stream = stream_at(&graph, object);
                assert_eq!(
                    stream.dictionary().get("Filter"),
                    Some(&Object::name("ASCIIHexDecode"))
                );
                assert_eq!(
                    stream.dictionary().get("Length"),
                    Some(&Object::Integer(stream.data().len() as i64))
                );
            }
            other => panic!("expected single stream, got {other:?}"),
        }
        assert_eq!(page.all_content_streams(&graph).unwrap(), b"BT /F1 12 Tf ET");
    }

    #[test]
    fn test_written_streams_are_indirect() {
        let mut graph = ObjectGraph::new();
        let mut page = Page::new(&mut graph);
        page.add_content_stream(&mut graph, "0 g");
        page.set_content_streams(&mut graph, &["A", "B"], None)
            .unwrap();

        let id = page.to_object(&mut graph);
        let dict = graph.get(id).and_then(Object::as_dict).unwrap();
        let items = dict.get("Contents").and_then(Object::as_array).unwrap();
        assert_eq!(items.len(), 2);
        for item in items {
            assert!(item.as_reference().is_some(), "inline stream {item:?}");
        }
        assert_eq!(page.all_content_streams(&graph).unwrap(), b"A B");
    }

    #[test]
    fn test_referenced_array_and_strings() {
        let mut graph = ObjectGraph::new();
        let first = graph.add_object(Stream::new(b"1 0 0 1 0 0 cm".to_vec()));
        let array = graph.add_object(vec![Object::Reference(first), Object::from("S")]);

        let mut page = Page::new(&mut graph);
        page.set_contents(Contents::One(Object::Reference(array)));
        assert_eq!(
            page.all_content_streams(&graph).unwrap(),
            b"1 0 0 1 0 0 cm S"
        );

        page.add_content_stream(&mut graph, "f");
        assert_eq!(
            page.content_streams(&graph).unwrap(),
            vec![b"1 0 0 1 0 0 cm".to_vec(), b"S".to_vec(), b"f".to_vec()]
        );
    }

    #[test]
    fn test_inline_stream_still_decodes() {
        let mut graph = ObjectGraph::new();
        let mut page = Page::new(&mut graph);
        page.set_contents(Contents::One(Object::Stream(Stream::new(b"n".to_vec()))));
        assert_eq!(page.all_content_streams(&graph).unwrap(), b"n");
    }

    #[test]
    fn test_wrong_element_shape() {
        let mut graph = ObjectGraph::new();
        let mut page = Page::new(&mut graph);
        page.set_contents(Contents::Many(vec![Object::Integer(4)]));
        assert!(matches!(
            page.content_streams(&graph),
            Err(PdfError::TypeMismatch { ref key, .. }) if key == "Contents"
        ));
    }
}
