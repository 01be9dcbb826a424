//! Stream encoders
//!
//! An encoder turns content bytes into stream data and describes, through
//! [`StreamEncoder::make_stream_dict`], the filter entries a reader needs
//! to undo it. Every encoder here has a matching decoder in
//! [`crate::filters`].

use crate::error::{PdfError, Result};
use crate::filters::Filter;
use crate::objects::{Dictionary, Object};

pub trait StreamEncoder {
    /// Stream dictionary entries describing this encoding. `Length` is
    /// filled in by the caller once the encoded size is known.
    fn make_stream_dict(&self) -> Dictionary;

    fn encode(&self, data: &[u8]) -> Result<Vec<u8>>;
}

/// Identity encoding; the stream carries no `/Filter`.
#[derive(Debug, Clone, Copy, Default)]
pub struct RawEncoder;

impl RawEncoder {
    pub fn new() -> Self {
        Self
    }
}

impl StreamEncoder for RawEncoder {
    fn make_stream_dict(&self) -> Dictionary {
        Dictionary::new()
    }

    fn encode(&self, data: &[u8]) -> Result<Vec<u8>> {
        Ok(data.to_vec())
    }
}

/// Zlib/deflate encoding (`/FlateDecode`).
#[cfg(feature = "compression")]
#[derive(Debug, Clone, Copy)]
pub struct FlateEncoder {
    level: u32,
}

#[cfg(feature = "compression")]
impl FlateEncoder {
    pub fn new() -> Self {
        Self { level: 6 }
    }

    /// Compression level, 0 (store) to 9 (best).
    pub fn with_level(level: u32) -> Self {
        Self {
            level: level.min(9),
        }
    }
}

#[cfg(feature = "compression")]
impl Default for FlateEncoder {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(feature = "compression")]
impl StreamEncoder for FlateEncoder {
    fn make_stream_dict(&self) -> Dictionary {
        let mut dict = Dictionary::new();
        dict.set("Filter", Object::name(Filter::FlateDecode.pdf_name()));
        dict
    }

    fn encode(&self, data: &[u8]) -> Result<Vec<u8>> {
        use flate2::write::ZlibEncoder;
        use flate2::Compression;
        use std::io::Write;

        let mut encoder = ZlibEncoder::new(Vec::new(), Compression::new(self.level));
        encoder
            .write_all(data)
            .map_err(|e| PdfError::EncodingFailure(format!("Flate encode error: {e}")))?;
        encoder
            .finish()
            .map_err(|e| PdfError::EncodingFailure(format!("Flate encode error: {e}")))
    }
}

/// Hex encoding (`/ASCIIHexDecode`), terminated with `>`.
#[derive(Debug, Clone, Copy, Default)]
pub struct AsciiHexEncoder;

impl AsciiHexEncoder {
    pub fn new() -> Self {
        Self
    }
}

impl StreamEncoder for AsciiHexEncoder {
    fn make_stream_dict(&self) -> Dictionary {
        let mut dict = Dictionary::new();
        dict.set("Filter", Object::name(Filter::ASCIIHexDecode.pdf_name()));
        dict
    }

    fn encode(&self, data: &[u8]) -> Result<Vec<u8>> {
        const DIGITS: &[u8; 16] = b"0123456789ABCDEF";

        let mut encoded = Vec::with_capacity(data.len() * 2 + 1);
        for &byte in data {
            encoded.push(DIGITS[(byte >> 4) as usize]);
            encoded.push(DIGITS[(byte & 0x0F) as usize]);
        }
        encoded.push(b'>');
        Ok(encoded)
    }
}
