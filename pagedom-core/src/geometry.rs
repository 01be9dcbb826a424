//! Basic geometric types for PDF

use crate::error::{PdfError, Result};
use crate::objects::Object;

/// A point in 2D space
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Point {
    pub x: f64,
    pub y: f64,
}

impl Point {
    pub fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }

    /// Origin point (0, 0)
    pub fn origin() -> Self {
        Self { x: 0.0, y: 0.0 }
    }
}

/// A rectangle defined by two corners, as in a `[llx lly urx ury]` array.
///
/// Corners are stored as given; PDF allows any pair of diagonally opposite
/// corners, so [`Rectangle::normalized`] is available when ordering matters.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Rectangle {
    /// Lower-left corner
    pub lower_left: Point,
    /// Upper-right corner
    pub upper_right: Point,
}

impl Rectangle {
    pub fn new(lower_left: Point, upper_right: Point) -> Self {
        Self {
            lower_left,
            upper_right,
        }
    }

    /// Create a rectangle from position and size
    pub fn from_position_and_size(x: f64, y: f64, width: f64, height: f64) -> Self {
        Self {
            lower_left: Point::new(x, y),
            upper_right: Point::new(x + width, y + height),
        }
    }

    /// Parse a rectangle array. Exactly four numeric elements are required.
    pub fn from_array(array: &[Object]) -> Result<Self> {
        if array.len() != 4 {
            return Err(PdfError::InvalidRectangle(format!(
                "expected 4 elements, found {}",
                array.len()
            )));
        }

        let mut coords = [0.0f64; 4];
        for (slot, element) in coords.iter_mut().zip(array) {
            *slot = element.as_real().ok_or_else(|| {
                PdfError::InvalidRectangle(format!(
                    "non-numeric element of type {}",
                    element.type_name()
                ))
            })?;
        }

        Ok(Self::new(
            Point::new(coords[0], coords[1]),
            Point::new(coords[2], coords[3]),
        ))
    }

    /// Rectangle array `[llx lly urx ury]`.
    pub fn to_object(&self) -> Object {
        Object::Array(vec![
            Object::Real(self.lower_left.x),
            Object::Real(self.lower_left.y),
            Object::Real(self.upper_right.x),
            Object::Real(self.upper_right.y),
        ])
    }

    pub fn width(&self) -> f64 {
        self.upper_right.x - self.lower_left.x
    }

    pub fn height(&self) -> f64 {
        self.upper_right.y - self.lower_left.y
    }

    pub fn center(&self) -> Point {
        Point::new(
            (self.lower_left.x + self.upper_right.x) / 2.0,
            (self.lower_left.y + self.upper_right.y) / 2.0,
        )
    }

    /// Same area with the lower-left corner holding the minimum coordinates.
    pub fn normalized(&self) -> Self {
        Self::new(
            Point::new(
                self.lower_left.x.min(self.upper_right.x),
                self.lower_left.y.min(self.upper_right.y),
            ),
            Point::new(
                self.lower_left.x.max(self.upper_right.x),
                self.lower_left.y.max(self.upper_right.y),
            ),
        )
    }
}
