//! Content stream aggregation on pages

use pagedom::{
    AsciiHexEncoder, Contents, Dictionary, Object, ObjectGraph, Page, PageContents, PdfError,
    Result, Stream, StreamEncoder,
};
use pretty_assertions::assert_eq;

#[test]
fn test_empty_one_and_two_streams() {
    let mut graph = ObjectGraph::new();
    let mut page = Page::new(&mut graph);
    assert_eq!(page.content_streams(&graph).unwrap(), Vec::<Vec<u8>>::new());

    page.add_content_stream(&mut graph, "q 1 0 0 1 0 0 cm");
    assert_eq!(page.all_content_streams(&graph).unwrap(), b"q 1 0 0 1 0 0 cm");

    page.add_content_stream(&mut graph, "Q");
    assert!(matches!(page.contents(), Contents::Many(items) if items.len() == 2));
    assert_eq!(page.all_content_streams(&graph).unwrap(), b"q 1 0 0 1 0 0 cm Q");
}

#[test]
fn test_contents_from_parsed_dictionary() {
    let mut graph = ObjectGraph::new();
    let first = graph.add_object(Stream::new(b"BT".to_vec()));
    let second = graph.add_object(Stream::new(b"ET".to_vec()));

    let mut dict = Dictionary::new();
    dict.set("Type", Object::name("Page"));
    dict.set(
        "Contents",
        vec![Object::Reference(first), Object::Reference(second)],
    );

    let mut page = Page::from_dictionary(&mut graph, &dict).unwrap();
    assert_eq!(page.all_content_streams(&graph).unwrap(), b"BT ET");

    page.add_content_stream(&mut graph, "n");
    assert_eq!(page.all_content_streams(&graph).unwrap(), b"BT ET n");
}

#[cfg(feature = "compression")]
#[test]
fn test_flate_streams_read_back() {
    let mut graph = ObjectGraph::new();
    let mut page = Page::new(&mut graph);
    let encoder = pagedom::FlateEncoder::new();
    let text = "BT /F1 12 Tf 72 712 Td (compressed) Tj ET";

    page.set_content_streams(&mut graph, &[text, text], Some(&encoder))
        .unwrap();
    match page.contents() {
        Contents::Many(items) => {
            for item in items {
                let stream = graph.dereference(item).unwrap().as_stream().unwrap();
                assert_eq!(
                    stream.dictionary().get("Filter"),
                    Some(&Object::name("FlateDecode"))
                );
            }
        }
        other => panic!("expected two streams, got {other:?}"),
    }
    assert_eq!(
        page.content_streams(&graph).unwrap(),
        vec![text.as_bytes().to_vec(), text.as_bytes().to_vec()]
    );
}

#[test]
fn test_replace_discards_previous_streams() {
    let mut graph = ObjectGraph::new();
    let mut page = Page::new(&mut graph);
    page.add_content_stream(&mut graph, "old");
    page.add_content_stream(&mut graph, "older");

    page.set_content_streams(&mut graph, &["new"], Some(&AsciiHexEncoder::new()))
        .unwrap();
    assert!(matches!(page.contents(), Contents::One(Object::Reference(_))));
    assert_eq!(page.all_content_streams(&graph).unwrap(), b"new");
}

struct FailingEncoder;

impl StreamEncoder for FailingEncoder {
    fn make_stream_dict(&self) -> Dictionary {
        Dictionary::new()
    }

    fn encode(&self, _data: &[u8]) -> Result<Vec<u8>> {
        Err(PdfError::EncodingFailure("refused".to_string()))
    }
}

#[test]
fn test_encoder_failure_keeps_contents() {
    let mut graph = ObjectGraph::new();
    let mut page = Page::new(&mut graph);
    page.add_content_stream(&mut graph, "keep");
    let objects_before = graph.len();

    assert!(matches!(
        page.set_content_streams(&mut graph, &["x"], Some(&FailingEncoder)),
        Err(PdfError::EncodingFailure(_))
    ));
    assert_eq!(page.all_content_streams(&graph).unwrap(), b"keep");
    assert_eq!(graph.len(), objects_before);
}

#[test]
fn test_undecodable_stream_propagates() {
    let mut graph = ObjectGraph::new();
    let mut stream_dict = Dictionary::new();
    stream_dict.set("Filter", Object::name("JBIG2Decode"));
    let stream = graph.add_object(Stream::with_dictionary(stream_dict, vec![1, 2, 3]));

    let mut page = Page::new(&mut graph);
    page.set_contents(Contents::One(Object::Reference(stream)));
    assert!(matches!(
        page.content_streams(&graph),
        Err(PdfError::StreamDecode(_))
    ));
}

#[test]
fn test_projected_contents_survive_reload() {
    let mut graph = ObjectGraph::new();
    let mut page = Page::new(&mut graph);
    page.add_content_stream(&mut graph, "0 g");
    page.add_content_stream(&mut graph, "1 g");

    let id = page.to_object(&mut graph);
    let reloaded = Page::load(&graph, id).unwrap();
    assert_eq!(reloaded.all_content_streams(&graph).unwrap(), b"0 g 1 g");
}

#[test]
fn test_projected_contents_hold_only_references() {
    let mut graph = ObjectGraph::new();
    let mut page = Page::new(&mut graph);
    let first = page.add_content_stream(&mut graph, "q");
    let second = page.add_content_stream(&mut graph, "Q");

    let id = page.to_object(&mut graph);
    let dict = graph.get(id).and_then(Object::as_dict).unwrap();
    assert_eq!(
        dict.get("Contents"),
        Some(&Object::Array(vec![
            Object::Reference(first),
            Object::Reference(second)
        ]))
    );
    assert!(graph.get(first).and_then(Object::as_stream).is_some());
}
