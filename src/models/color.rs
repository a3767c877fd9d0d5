//! Color model

use serde::{Deserialize, Serialize};

/// An sRGB triple with 8-bit channels
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub struct Rgb {
    pub r: u8,
    pub g: u8,
    pub b: u8,
}

impl Rgb {
    pub const BLACK: Rgb = Rgb::new(0, 0, 0);
    pub const WHITE: Rgb = Rgb::new(255, 255, 255);

    pub const fn new(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b }
    }
}

/// Rounded HSL: hue in degrees [0, 360), saturation and lightness in percent
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub struct Hsl {
    pub h: u16,
    pub s: u8,
    pub l: u8,
}

impl Hsl {
    pub const fn new(h: u16, s: u8, l: u8) -> Self {
        Self { h, s, l }
    }
}

/// A single palette entry.
///
/// `hsl` is always derived from `rgb`; build values through
/// [`ColorInfo::from_rgb`] so the two never drift apart.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ColorInfo {
    /// Lowercase `#rrggbb`
    pub hex: String,
    pub rgb: Rgb,
    pub hsl: Hsl,
    /// Share of the palette in percent
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub percentage: Option<u8>,
    /// Free-text label, never computed
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
}

impl ColorInfo {
    /// Build a color from its channels, deriving hex and HSL
    pub fn from_rgb(rgb: Rgb, percentage: Option<u8>) -> Self {
        crate::core::ColorLib::create_color_info(rgb, percentage)
    }

    /// Hex in the uppercase display form
    pub fn display_hex(&self) -> String {
        self.hex.to_uppercase()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_optional_fields_are_omitted() {
        let color = ColorInfo::from_rgb(Rgb::new(255, 0, 0), None);
        let json = serde_json::to_value(&color).unwrap();

        assert_eq!(json["hex"], "#ff0000");
        assert_eq!(json["rgb"]["r"], 255);
        assert_eq!(json["hsl"]["h"], 0);
        assert!(json.get("percentage").is_none());
        assert!(json.get("name").is_none());
    }

    #[test]
    fn test_display_hex() {
        let color = ColorInfo::from_rgb(Rgb::new(0x8b, 0x5c, 0xf6), Some(40));
        assert_eq!(color.hex, "#8b5cf6");
        assert_eq!(color.display_hex(), "#8B5CF6");
    }
}
