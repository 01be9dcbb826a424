//! Stream filter decoding according to ISO 32000-1 Section 7.4
//!
//! Only the filters a content stream realistically carries are decoded;
//! image codecs are recognized but rejected.

use crate::error::{PdfError, Result};
use crate::objects::{Dictionary, Object};

#[cfg(feature = "compression")]
use flate2::read::ZlibDecoder;
#[cfg(feature = "compression")]
use std::io::Read;

/// Standard PDF filters
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Filter {
    ASCIIHexDecode,
    ASCII85Decode,
    LZWDecode,
    FlateDecode,
    RunLengthDecode,
    CCITTFaxDecode,
    JBIG2Decode,
    DCTDecode,
    JPXDecode,
    Crypt,
}

impl Filter {
    pub fn from_name(name: &str) -> Option<Self> {
        match name {
            "ASCIIHexDecode" => Some(Filter::ASCIIHexDecode),
            "ASCII85Decode" => Some(Filter::ASCII85Decode),
            "LZWDecode" => Some(Filter::LZWDecode),
            "FlateDecode" => Some(Filter::FlateDecode),
            "RunLengthDecode" => Some(Filter::RunLengthDecode),
            "CCITTFaxDecode" => Some(Filter::CCITTFaxDecode),
            "JBIG2Decode" => Some(Filter::JBIG2Decode),
            "DCTDecode" => Some(Filter::DCTDecode),
            "JPXDecode" => Some(Filter::JPXDecode),
            "Crypt" => Some(Filter::Crypt),
            _ => None,
        }
    }

    pub fn pdf_name(&self) -> &'static str {
        match self {
            Filter::ASCIIHexDecode => "ASCIIHexDecode",
            Filter::ASCII85Decode => "ASCII85Decode",
            Filter::LZWDecode => "LZWDecode",
            Filter::FlateDecode => "FlateDecode",
            Filter::RunLengthDecode => "RunLengthDecode",
            Filter::CCITTFaxDecode => "CCITTFaxDecode",
            Filter::JBIG2Decode => "JBIG2Decode",
            Filter::DCTDecode => "DCTDecode",
            Filter::JPXDecode => "JPXDecode",
            Filter::Crypt => "Crypt",
        }
    }
}

/// Decode stream data according to the `/Filter` entry of `dict`.
///
/// Filter arrays are applied in declaration order. A stream without a
/// filter is returned unchanged.
pub fn decode_stream(data: &[u8], dict: &Dictionary) -> Result<Vec<u8>> {
    let filters = match dict.get("Filter") {
        Some(Object::Name(name)) => vec![name.as_str()],
        Some(Object::Array(array)) => {
            let mut filter_names = Vec::with_capacity(array.len());
            for obj in array {
                match obj {
                    Object::Name(name) => filter_names.push(name.as_str()),
                    other => {
                        return Err(PdfError::StreamDecode(format!(
                            "Invalid filter in array: {}",
                            other.type_name()
                        )))
                    }
                }
            }
            filter_names
        }
        None | Some(Object::Null) => return Ok(data.to_vec()),
        Some(other) => {
            return Err(PdfError::StreamDecode(format!(
                "Invalid Filter type: {}",
                other.type_name()
            )))
        }
    };

    let mut result = data.to_vec();
    for filter_name in filters {
        let filter = Filter::from_name(filter_name)
            .ok_or_else(|| PdfError::StreamDecode(format!("Unknown filter: {filter_name}")))?;

        result = apply_filter(&result, filter)?;
    }

    Ok(result)
}

fn apply_filter(data: &[u8], filter: Filter) -> Result<Vec<u8>> {
    match filter {
        Filter::FlateDecode => decode_flate(data),
        Filter::ASCIIHexDecode => decode_ascii_hex(data),
        Filter::ASCII85Decode => decode_ascii85(data),
        _ => Err(PdfError::StreamDecode(format!(
            "Filter {} not supported",
            filter.pdf_name()
        ))),
    }
}

#[cfg(feature = "compression")]
fn decode_flate(data: &[u8]) -> Result<Vec<u8>> {
    let mut decoder = ZlibDecoder::new(data);
    let mut result = Vec::new();
    decoder
        .read_to_end(&mut result)
        .map_err(|e| PdfError::StreamDecode(format!("Flate decode error: {e}")))?;
    Ok(result)
}

#[cfg(not(feature = "compression"))]
fn decode_flate(_data: &[u8]) -> Result<Vec<u8>> {
    Err(PdfError::StreamDecode(
        "FlateDecode requires 'compression' feature".to_string(),
    ))
}

fn decode_ascii_hex(data: &[u8]) -> Result<Vec<u8>> {
    let mut result = Vec::new();
    let mut chars = data.iter().filter(|&&b| !b.is_ascii_whitespace());

    loop {
        let high = match chars.next() {
            Some(&b'>') | None => break,
            Some(&ch) => ch,
        };

        // An odd digit count is padded with 0.
        let (low, done) = match chars.next() {
            Some(&b'>') | None => (b'0', true),
            Some(&ch) => (ch, false),
        };

        let high_val = hex_digit_value(high).ok_or_else(|| {
            PdfError::StreamDecode(format!("Invalid hex digit: {}", high as char))
        })?;
        let low_val = hex_digit_value(low).ok_or_else(|| {
            PdfError::StreamDecode(format!("Invalid hex digit: {}", low as char))
        })?;

        result.push((high_val << 4) | low_val);

        if done {
            break;
        }
    }

    Ok(result)
}

fn hex_digit_value(ch: u8) -> Option<u8> {
    match ch {
        b'0'..=b'9' => Some(ch - b'0'),
        b'A'..=b'F' => Some(ch - b'A' + 10),
        b'a'..=b'f' => Some(ch - b'a' + 10),
        _ => None,
    }
}

fn decode_ascii85(data: &[u8]) -> Result<Vec<u8>> {
    let mut result = Vec::new();
    let mut chars = data
        .iter()
        .filter(|&&b| !b.is_ascii_whitespace())
        .peekable();
    let mut group = Vec::with_capacity(5);

    // Optional <~ prefix
    let mut ch = chars.next();
    if ch == Some(&b'<') && chars.peek() == Some(&&b'~') {
        chars.next();
        ch = chars.next();
    }

    while let Some(&c) = ch {
        match c {
            b'~' => {
                if chars.next() == Some(&b'>') {
                    break;
                } else {
                    return Err(PdfError::StreamDecode(
                        "Invalid ASCII85 end marker".to_string(),
                    ));
                }
            }
            b'z' if group.is_empty() => {
                result.extend_from_slice(&[0, 0, 0, 0]);
            }
            b'!'..=b'u' => {
                group.push(c);
                if group.len() == 5 {
                    let value = ascii85_group_value(&group);
                    result.extend_from_slice(&value.to_be_bytes());
                    group.clear();
                }
            }
            _ => {
                return Err(PdfError::StreamDecode(format!(
                    "Invalid ASCII85 character: {}",
                    c as char
                )));
            }
        }
        ch = chars.next();
    }

    if !group.is_empty() {
        let original_len = group.len();
        while group.len() < 5 {
            group.push(b'u');
        }

        let value = ascii85_group_value(&group);
        result.extend_from_slice(&value.to_be_bytes()[..original_len - 1]);
    }

    Ok(result)
}

fn ascii85_group_value(group: &[u8]) -> u32 {
    group.iter().fold(0u32, |acc, &ch| {
        acc.wrapping_mul(85).wrapping_add((ch - b'!') as u32)
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_ascii_hex_decode() {
        assert_eq!(decode_ascii_hex(b"48656C6C6F>").unwrap(), b"Hello");
        assert_eq!(decode_ascii_hex(b"48 65 6C 6C 6F>").unwrap(), b"Hello");
        // Odd number of digits
        assert_eq!(decode_ascii_hex(b"48656C6C6>").unwrap(), b"Hell`");
        // Missing terminator
        assert_eq!(decode_ascii_hex(b"48656C6C6F").unwrap(), b"Hello");
    }

    #[test]
    fn test_ascii_hex_decode_invalid() {
        assert!(decode_ascii_hex(b"GG>").is_err());
    }

    #[test]
    fn test_ascii85_decode() {
        assert_eq!(
            decode_ascii85(b"87cURD]j7BEbo80~>").unwrap(),
            b"Hello world!"
        );
        assert_eq!(decode_ascii85(b"z~>").unwrap(), &[0, 0, 0, 0]);
        assert!(decode_ascii85(b"~>").unwrap().is_empty());
    }

    #[test]
    fn test_ascii85_leading_angle_bracket_is_data() {
        assert_eq!(decode_ascii85(b"<+U,m~>").unwrap(), b"Test");
        assert_eq!(decode_ascii85(b"<~<+U,m~>").unwrap(), b"Test");
    }

    #[test]
    fn test_ascii85_decode_invalid() {
        assert!(decode_ascii85(b"invalid~>").is_err());
    }

    #[test]
    fn test_filter_name_roundtrip() {
        for name in ["ASCIIHexDecode", "FlateDecode", "DCTDecode", "Crypt"] {
            assert_eq!(Filter::from_name(name).unwrap().pdf_name(), name);
        }
        assert_eq!(Filter::from_name("UnknownFilter"), None);
    }

    #[test]
    fn test_decode_stream_no_filter() {
        let dict = Dictionary::new();
        assert_eq!(decode_stream(b"Hello, world!", &dict).unwrap(), b"Hello, world!");
    }

    #[test]
    fn test_decode_stream_filter_array() {
        let mut dict = Dictionary::new();
        dict.set("Filter", vec![Object::name("ASCIIHexDecode")]);
        assert_eq!(decode_stream(b"48656C6C6F>", &dict).unwrap(), b"Hello");
    }

    #[test]
    fn test_decode_stream_invalid_filter() {
        let mut dict = Dictionary::new();
        dict.set("Filter", Object::name("UnknownFilter"));
        assert!(decode_stream(b"test data", &dict).is_err());

        dict.set("Filter", 42);
        assert!(matches!(
            decode_stream(b"test data", &dict),
            Err(PdfError::StreamDecode(_))
        ));
    }

    #[test]
    fn test_apply_filter_unsupported() {
        for filter in [Filter::LZWDecode, Filter::DCTDecode, Filter::Crypt] {
            assert!(apply_filter(b"test data", filter).is_err());
        }
    }

    #[cfg(feature = "compression")]
    #[test]
    fn test_flate_decode() {
        use flate2::write::ZlibEncoder;
        use flate2::Compression;
        use std::io::Write;

        let original = b"Hello, compressed world!";
        let mut encoder = ZlibEncoder::new(Vec::new(), Compression::default());
        encoder.write_all(original).unwrap();
        let compressed = encoder.finish().unwrap();

        assert_eq!(decode_flate(&compressed).unwrap(), original);
    }
}
