mod image;
mod state;

pub use image::{ColorSpace as ImageColorSpace, ImageFormat, XObjectImage};
pub use state::{BlendMode, ExtGState};
