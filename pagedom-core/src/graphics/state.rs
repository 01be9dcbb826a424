//! Extended Graphics State Dictionary support according to ISO 32000-1 Section 8.4

use crate::objects::{Dictionary, Object};

/// Blend mode values for transparency
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum BlendMode {
    /// Normal blend mode (default)
    Normal,
    Multiply,
    Screen,
    Overlay,
    SoftLight,
    HardLight,
    ColorDodge,
    ColorBurn,
    Darken,
    Lighten,
    Difference,
    Exclusion,
    /// PDF 1.4
    Hue,
    /// PDF 1.4
    Saturation,
    /// PDF 1.4
    Color,
    /// PDF 1.4
    Luminosity,
}

impl BlendMode {
    pub fn pdf_name(&self) -> &'static str {
        match self {
            BlendMode::Normal => "Normal",
            BlendMode::Multiply => "Multiply",
            BlendMode::Screen => "Screen",
            BlendMode::Overlay => "Overlay",
            BlendMode::SoftLight => "SoftLight",
            BlendMode::HardLight => "HardLight",
            BlendMode::ColorDodge => "ColorDodge",
            BlendMode::ColorBurn => "ColorBurn",
            BlendMode::Darken => "Darken",
            BlendMode::Lighten => "Lighten",
            BlendMode::Difference => "Difference",
            BlendMode::Exclusion => "Exclusion",
            BlendMode::Hue => "Hue",
            BlendMode::Saturation => "Saturation",
            BlendMode::Color => "Color",
            BlendMode::Luminosity => "Luminosity",
        }
    }
}

/// Extended graphics state parameters, registered on a page under
/// `/Resources /ExtGState` and selected with the `gs` operator.
///
/// Only parameters that are set appear in the dictionary.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ExtGState {
    /// Blend mode (BM)
    pub blend_mode: Option<BlendMode>,
    /// Alpha constant for stroking (CA)
    pub alpha_stroke: Option<f64>,
    /// Alpha constant for non-stroking (ca)
    pub alpha_fill: Option<f64>,
}

impl ExtGState {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_blend_mode(mut self, mode: BlendMode) -> Self {
        self.blend_mode = Some(mode);
        self
    }

    pub fn with_alpha_stroke(mut self, alpha: f64) -> Self {
        self.alpha_stroke = Some(alpha.clamp(0.0, 1.0));
        self
    }

    pub fn with_alpha_fill(mut self, alpha: f64) -> Self {
        self.alpha_fill = Some(alpha.clamp(0.0, 1.0));
        self
    }

    /// Set alpha constant for both stroking and non-stroking operations
    pub fn with_alpha(self, alpha: f64) -> Self {
        self.with_alpha_stroke(alpha).with_alpha_fill(alpha)
    }

    pub fn to_dict(&self) -> Dictionary {
        let mut dict = Dictionary::new();
        if let Some(mode) = self.blend_mode {
            dict.set("BM", Object::name(mode.pdf_name()));
        }
        if let Some(alpha) = self.alpha_stroke {
            dict.set("CA", alpha);
        }
        if let Some(alpha) = self.alpha_fill {
            dict.set("ca", alpha);
        }
        dict
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_state_has_no_entries() {
        assert!(ExtGState::new().to_dict().is_empty());
    }

    #[test]
    fn test_alpha_is_clamped() {
        let state = ExtGState::new().with_alpha(1.5);
        assert_eq!(state.alpha_stroke, Some(1.0));
        assert_eq!(state.alpha_fill, Some(1.0));

        let state = ExtGState::new().with_alpha_fill(-0.2);
        assert_eq!(state.alpha_fill, Some(0.0));
    }

    #[test]
    fn test_to_dict_key_order() {
        let dict = ExtGState::new()
            .with_blend_mode(BlendMode::Normal)
            .with_alpha(0.25)
            .to_dict();

        let keys: Vec<_> = dict.keys().map(String::as_str).collect();
        assert_eq!(keys, vec!["BM", "CA", "ca"]);
        assert_eq!(dict.get("BM"), Some(&Object::name("Normal")));
        assert_eq!(dict.get("CA"), Some(&Object::Real(0.25)));
    }

    #[test]
    fn test_separate_alphas() {
        let dict = ExtGState::new()
            .with_alpha_stroke(0.5)
            .with_alpha_fill(1.0)
            .to_dict();
        assert_eq!(dict.get("CA"), Some(&Object::Real(0.5)));
        assert_eq!(dict.get("ca"), Some(&Object::Real(1.0)));
        assert!(!dict.contains_key("BM"));
    }
}
