use crate::error::Result;
use crate::objects::{Dictionary, Object};

#[derive(Debug, Clone, PartialEq)]
pub struct Stream {
    dictionary: Dictionary,
    data: Vec<u8>,
}

impl Stream {
    pub fn new(data: Vec<u8>) -> Self {
        let mut dictionary = Dictionary::new();
        dictionary.set("Length", data.len() as i64);

        Self { dictionary, data }
    }

    /// Builds a stream from an existing dictionary; `Length` is always
    /// rewritten to match `data`.
    pub fn with_dictionary(dictionary: Dictionary, data: Vec<u8>) -> Self {
        let mut dict = dictionary;
        dict.set("Length", data.len() as i64);

        Self {
            dictionary: dict,
            data,
        }
    }

    pub fn dictionary(&self) -> &Dictionary {
        &self.dictionary
    }

    pub fn dictionary_mut(&mut self) -> &mut Dictionary {
        &mut self.dictionary
    }

    /// Raw, possibly filtered, bytes.
    pub fn data(&self) -> &[u8] {
        &self.data
    }

    pub fn set_filter(&mut self, filter: &str) {
        self.dictionary.set("Filter", Object::name(filter));
    }

    /// Bytes with every declared filter undone.
    pub fn decode(&self) -> Result<Vec<u8>> {
        crate::filters::decode_stream(&self.data, &self.dictionary)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_stream_new() {
        let data = vec![1, 2, 3, 4, 5];
        let stream = Stream::new(data.clone());

        assert_eq!(stream.data(), &data);
        assert_eq!(stream.dictionary().get("Length"), Some(&Object::Integer(5)));
    }

    #[test]
    fn test_stream_with_existing_length() {
        let mut dict = Dictionary::new();
        dict.set("Length", 999);
        dict.set("Type", Object::name("XObject"));

        let stream = Stream::with_dictionary(dict, vec![1, 2, 3, 4, 5]);

        assert_eq!(stream.dictionary().get("Length"), Some(&Object::Integer(5)));
        assert_eq!(stream.dictionary().get_type(), Some("XObject"));
    }

    #[test]
    fn test_set_filter() {
        let mut stream = Stream::new(vec![1, 2, 3]);
        stream.set_filter("ASCIIHexDecode");
        assert_eq!(
            stream.dictionary().get("Filter"),
            Some(&Object::name("ASCIIHexDecode"))
        );
    }

    #[test]
    fn test_decode_without_filter_is_identity() {
        let stream = Stream::new(b"BT ET".to_vec());
        assert_eq!(stream.decode().unwrap(), b"BT ET".to_vec());
    }
}
