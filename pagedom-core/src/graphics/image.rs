//! Image XObjects
//!
//! Currently supports:
//! - raw sample data
//! - JPEG images (passed through with DCTDecode)

use crate::error::{PdfError, Result};
use crate::objects::{Dictionary, Object, Stream};

/// An image that can be placed on a page through `/Name Do`.
#[derive(Debug, Clone, PartialEq)]
pub struct XObjectImage {
    data: Vec<u8>,
    format: ImageFormat,
    width: u32,
    height: u32,
    color_space: ColorSpace,
    bits_per_component: u8,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum ImageFormat {
    /// Uncompressed samples
    Raw,
    /// JPEG data, stored with DCTDecode
    Jpeg,
}

/// Color spaces for images
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum ColorSpace {
    DeviceGray,
    DeviceRGB,
    DeviceCMYK,
}

impl ColorSpace {
    pub fn pdf_name(&self) -> &'static str {
        match self {
            ColorSpace::DeviceGray => "DeviceGray",
            ColorSpace::DeviceRGB => "DeviceRGB",
            ColorSpace::DeviceCMYK => "DeviceCMYK",
        }
    }

    pub fn components(&self) -> usize {
        match self {
            ColorSpace::DeviceGray => 1,
            ColorSpace::DeviceRGB => 3,
            ColorSpace::DeviceCMYK => 4,
        }
    }

    fn from_name(name: &str) -> Option<Self> {
        match name {
            "DeviceGray" => Some(ColorSpace::DeviceGray),
            "DeviceRGB" => Some(ColorSpace::DeviceRGB),
            "DeviceCMYK" => Some(ColorSpace::DeviceCMYK),
            _ => None,
        }
    }
}

impl XObjectImage {
    /// Wrap uncompressed samples. The buffer must hold exactly
    /// `width * height * components` samples of `bits_per_component` bits,
    /// rows padded to whole bytes.
    pub fn from_raw(
        width: u32,
        height: u32,
        color_space: ColorSpace,
        bits_per_component: u8,
        data: Vec<u8>,
    ) -> Result<Self> {
        if width == 0 || height == 0 {
            return Err(PdfError::InvalidImage(format!(
                "Empty image dimensions {width}x{height}"
            )));
        }
        if !matches!(bits_per_component, 1 | 2 | 4 | 8 | 16) {
            return Err(PdfError::InvalidImage(format!(
                "Unsupported bits per component: {bits_per_component}"
            )));
        }

        let row_bits = width as usize * color_space.components() * bits_per_component as usize;
        let expected = row_bits.div_ceil(8) * height as usize;
        if data.len() != expected {
            return Err(PdfError::InvalidImage(format!(
                "Expected {expected} bytes of samples, found {}",
                data.len()
            )));
        }

        Ok(XObjectImage {
            data,
            format: ImageFormat::Raw,
            width,
            height,
            color_space,
            bits_per_component,
        })
    }

    /// Create an image from JPEG data
    pub fn from_jpeg_data(data: Vec<u8>) -> Result<Self> {
        let (width, height, color_space, bits_per_component) = parse_jpeg_header(&data)?;

        Ok(XObjectImage {
            data,
            format: ImageFormat::Jpeg,
            width,
            height,
            color_space,
            bits_per_component,
        })
    }

    /// Read an image XObject back from its stream.
    pub fn from_stream(stream: &Stream) -> Result<Self> {
        let dict = stream.dictionary();
        if dict.get("Subtype").and_then(Object::as_name) != Some("Image") {
            return Err(PdfError::InvalidImage("Stream is not an image XObject".to_string()));
        }

        let dimension = |key: &str| -> Result<u32> {
            dict.get(key)
                .and_then(Object::as_integer)
                .and_then(|v| u32::try_from(v).ok())
                .ok_or_else(|| PdfError::InvalidImage(format!("Missing or invalid /{key}")))
        };
        let width = dimension("Width")?;
        let height = dimension("Height")?;
        let bits_per_component = dict
            .get("BitsPerComponent")
            .and_then(Object::as_integer)
            .and_then(|v| u8::try_from(v).ok())
            .unwrap_or(8);
        let color_space = dict
            .get("ColorSpace")
            .and_then(Object::as_name)
            .and_then(ColorSpace::from_name)
            .unwrap_or(ColorSpace::DeviceRGB);
        let format = match dict.get("Filter").and_then(Object::as_name) {
            Some("DCTDecode") => ImageFormat::Jpeg,
            _ => ImageFormat::Raw,
        };

        Ok(XObjectImage {
            data: stream.data().to_vec(),
            format,
            width,
            height,
            color_space,
            bits_per_component,
        })
    }

    pub fn width(&self) -> u32 {
        self.width
    }

    pub fn height(&self) -> u32 {
        self.height
    }

    pub fn format(&self) -> ImageFormat {
        self.format
    }

    pub fn color_space(&self) -> ColorSpace {
        self.color_space
    }

    pub fn data(&self) -> &[u8] {
        &self.data
    }

    /// Image XObject stream.
    pub fn to_stream(&self) -> Stream {
        let mut dict = Dictionary::new();

        dict.set("Type", Object::name("XObject"));
        dict.set("Subtype", Object::name("Image"));
        dict.set("Width", self.width as i64);
        dict.set("Height", self.height as i64);
        dict.set("ColorSpace", Object::name(self.color_space.pdf_name()));
        dict.set("BitsPerComponent", self.bits_per_component as i64);

        if self.format == ImageFormat::Jpeg {
            dict.set("Filter", Object::name("DCTDecode"));
        }

        Stream::with_dictionary(dict, self.data.clone())
    }
}

/// Parse JPEG header to extract image information
fn parse_jpeg_header(data: &[u8]) -> Result<(u32, u32, ColorSpace, u8)> {
    if data.len() < 2 || data[0] != 0xFF || data[1] != 0xD8 {
        return Err(PdfError::InvalidImage("Not a valid JPEG file".to_string()));
    }

    let mut pos = 2;
    let mut width = 0;
    let mut height = 0;
    let mut components = 0;

    while pos + 1 < data.len() {
        if data[pos] != 0xFF {
            return Err(PdfError::InvalidImage("Invalid JPEG marker".to_string()));
        }

        let marker = data[pos + 1];
        pos += 2;

        // Padding
        if marker == 0xFF {
            pos -= 1;
            continue;
        }

        // Start of frame; DHT, JPG and DAC share the range but carry no size
        if (0xC0..=0xCF).contains(&marker) && marker != 0xC4 && marker != 0xC8 && marker != 0xCC {
            if pos + 7 >= data.len() {
                return Err(PdfError::InvalidImage("Truncated JPEG file".to_string()));
            }

            // length (2) and precision (1)
            pos += 3;

            height = ((data[pos] as u32) << 8) | (data[pos + 1] as u32);
            pos += 2;
            width = ((data[pos] as u32) << 8) | (data[pos + 1] as u32);
            pos += 2;

            components = data[pos];
            break;
        } else if marker == 0xD9 {
            break;
        } else if marker == 0xD8 || (0xD0..=0xD7).contains(&marker) {
            continue;
        } else {
            if pos + 1 >= data.len() {
                return Err(PdfError::InvalidImage("Truncated JPEG file".to_string()));
            }
            let length = ((data[pos] as usize) << 8) | (data[pos + 1] as usize);
            pos += length;
        }
    }

    if width == 0 || height == 0 {
        return Err(PdfError::InvalidImage(
            "Could not find image dimensions".to_string(),
        ));
    }

    let color_space = match components {
        1 => ColorSpace::DeviceGray,
        3 => ColorSpace::DeviceRGB,
        4 => ColorSpace::DeviceCMYK,
        _ => {
            return Err(PdfError::InvalidImage(format!(
                "Unsupported number of components: {components}"
            )))
        }
    };

    Ok((width, height, color_space, 8))
}
