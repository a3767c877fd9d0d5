//! Color-space conversions and harmony generators

use crate::models::{ColorInfo, Hsl, Rgb};

/// Stateless color math over 8-bit sRGB, hex strings and rounded HSL
pub struct ColorLib;

impl ColorLib {
    /// Convert RGB to a lowercase `#rrggbb` string
    pub fn rgb_to_hex(rgb: Rgb) -> String {
        format!("#{:02x}{:02x}{:02x}", rgb.r, rgb.g, rgb.b)
    }

    /// Parse `rrggbb` with an optional leading `#`, case-insensitive.
    ///
    /// Three-digit shorthand is rejected.
    pub fn hex_to_rgb(hex: &str) -> Option<Rgb> {
        let hex = hex.strip_prefix('#').unwrap_or(hex);

        if hex.len() != 6 || !hex.bytes().all(|b| b.is_ascii_hexdigit()) {
            return None;
        }

        let r = u8::from_str_radix(&hex[0..2], 16).ok()?;
        let g = u8::from_str_radix(&hex[2..4], 16).ok()?;
        let b = u8::from_str_radix(&hex[4..6], 16).ok()?;

        Some(Rgb::new(r, g, b))
    }

    /// Unrounded HSL: hue in degrees [0, 360), saturation and lightness in [0, 1]
    pub fn rgb_to_hsl_exact(rgb: Rgb) -> (f64, f64, f64) {
        let r = rgb.r as f64 / 255.0;
        let g = rgb.g as f64 / 255.0;
        let b = rgb.b as f64 / 255.0;

        let max = r.max(g).max(b);
        let min = r.min(g).min(b);
        let l = (max + min) / 2.0;

        if max == min {
            return (0.0, 0.0, l);
        }

        let d = max - min;
        let s = if l > 0.5 {
            d / (2.0 - max - min)
        } else {
            d / (max + min)
        };

        let h = if max == r {
            (g - b) / d + if g < b { 6.0 } else { 0.0 }
        } else if max == g {
            (b - r) / d + 2.0
        } else {
            (r - g) / d + 4.0
        };

        (h * 60.0, s, l)
    }

    /// Convert RGB to HSL rounded to whole degrees and percents
    pub fn rgb_to_hsl(rgb: Rgb) -> Hsl {
        let (h, s, l) = Self::rgb_to_hsl_exact(rgb);

        // hues just under 360 round up to it
        let h = (h.round() as u16) % 360;

        Hsl::new(h, (s * 100.0).round() as u8, (l * 100.0).round() as u8)
    }

    /// Inverse of [`ColorLib::rgb_to_hsl_exact`]; `s` and `l` are in percent.
    ///
    /// The hue wraps into [0, 360).
    pub fn hsl_to_rgb(h: f64, s: f64, l: f64) -> Rgb {
        let h = h.rem_euclid(360.0);
        let s = (s / 100.0).clamp(0.0, 1.0);
        let l = (l / 100.0).clamp(0.0, 1.0);

        let c = (1.0 - (2.0 * l - 1.0).abs()) * s;
        let x = c * (1.0 - ((h / 60.0) % 2.0 - 1.0).abs());
        let m = l - c / 2.0;

        let (r, g, b) = match (h / 60.0) as u8 {
            0 => (c, x, 0.0),
            1 => (x, c, 0.0),
            2 => (0.0, c, x),
            3 => (0.0, x, c),
            4 => (x, 0.0, c),
            _ => (c, 0.0, x),
        };

        Rgb::new(
            Self::to_channel(r + m),
            Self::to_channel(g + m),
            Self::to_channel(b + m),
        )
    }

    fn to_channel(value: f64) -> u8 {
        (value * 255.0).round().clamp(0.0, 255.0) as u8
    }

    /// Black text for light backgrounds, white for dark ones.
    ///
    /// Unparseable input gets black.
    pub fn get_contrast_color(hex: &str) -> String {
        let Some(rgb) = Self::hex_to_rgb(hex) else {
            return "#000000".to_string();
        };

        let luminance = (0.299 * rgb.r as f64 + 0.587 * rgb.g as f64 + 0.114 * rgb.b as f64) / 255.0;

        if luminance > 0.5 {
            "#000000".to_string()
        } else {
            "#ffffff".to_string()
        }
    }

    /// Per-channel inversion; unparseable input is returned as-is
    pub fn get_complementary(hex: &str) -> String {
        match Self::hex_to_rgb(hex) {
            Some(rgb) => Self::rgb_to_hex(Rgb::new(255 - rgb.r, 255 - rgb.g, 255 - rgb.b)),
            None => hex.to_string(),
        }
    }

    /// Colors 30 degrees either side of the input on the hue wheel
    pub fn get_analogous(hex: &str) -> Vec<String> {
        Self::rotate_hue(hex, &[-30, 30])
    }

    /// Colors 120 and 240 degrees around the hue wheel
    pub fn get_triadic(hex: &str) -> Vec<String> {
        Self::rotate_hue(hex, &[120, 240])
    }

    // keeps the rounded saturation/lightness of the input
    fn rotate_hue(hex: &str, offsets: &[i32]) -> Vec<String> {
        let Some(rgb) = Self::hex_to_rgb(hex) else {
            return vec![hex.to_string()];
        };

        let hsl = Self::rgb_to_hsl(rgb);

        offsets
            .iter()
            .map(|offset| {
                let h = (hsl.h as i32 + offset).rem_euclid(360);
                Self::rgb_to_hex(Self::hsl_to_rgb(h as f64, hsl.s as f64, hsl.l as f64))
            })
            .collect()
    }

    /// Build a palette entry from RGB, deriving hex and HSL
    pub fn create_color_info(rgb: Rgb, percentage: Option<u8>) -> ColorInfo {
        ColorInfo {
            hex: Self::rgb_to_hex(rgb),
            rgb,
            hsl: Self::rgb_to_hsl(rgb),
            percentage,
            name: None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_channels() -> impl Iterator<Item = Rgb> {
        let steps: Vec<u8> = (0..=255).step_by(5).collect();
        let steps_g = steps.clone();
        let steps_b = steps.clone();
        steps.into_iter().flat_map(move |r| {
            let steps_b = steps_b.clone();
            steps_g
                .clone()
                .into_iter()
                .flat_map(move |g| steps_b.clone().into_iter().map(move |b| Rgb::new(r, g, b)))
        })
    }

    #[test]
    fn test_rgb_to_hex() {
        assert_eq!(ColorLib::rgb_to_hex(Rgb::new(0, 0, 0)), "#000000");
        assert_eq!(ColorLib::rgb_to_hex(Rgb::new(255, 10, 1)), "#ff0a01");
    }

    #[test]
    fn test_hex_to_rgb() {
        assert_eq!(ColorLib::hex_to_rgb("#FF8000"), Some(Rgb::new(255, 128, 0)));
        assert_eq!(ColorLib::hex_to_rgb("ff8000"), Some(Rgb::new(255, 128, 0)));
        assert_eq!(ColorLib::hex_to_rgb("#f80"), None);
        assert_eq!(ColorLib::hex_to_rgb("#ff80001"), None);
        assert_eq!(ColorLib::hex_to_rgb("#gg0000"), None);
        assert_eq!(ColorLib::hex_to_rgb("##ff0000"), None);
        assert_eq!(ColorLib::hex_to_rgb(""), None);
    }

    #[test]
    fn test_hex_round_trip() {
        for rgb in sample_channels() {
            assert_eq!(ColorLib::hex_to_rgb(&ColorLib::rgb_to_hex(rgb)), Some(rgb));
        }
        // edge channels
        for v in [0u8, 1, 127, 128, 254, 255] {
            let rgb = Rgb::new(v, 255 - v, v);
            assert_eq!(ColorLib::hex_to_rgb(&ColorLib::rgb_to_hex(rgb)), Some(rgb));
        }
    }

    #[test]
    fn test_hex_normalizes_to_lowercase() {
        for hex in ["#ABCDEF", "#a1B2c3", "#FFFFFF"] {
            let rgb = ColorLib::hex_to_rgb(hex).unwrap();
            assert_eq!(ColorLib::rgb_to_hex(rgb), hex.to_lowercase());
        }
    }

    #[test]
    fn test_rgb_to_hsl() {
        assert_eq!(ColorLib::rgb_to_hsl(Rgb::new(255, 0, 0)), Hsl::new(0, 100, 50));
        assert_eq!(ColorLib::rgb_to_hsl(Rgb::new(0, 255, 0)), Hsl::new(120, 100, 50));
        assert_eq!(ColorLib::rgb_to_hsl(Rgb::new(0, 0, 255)), Hsl::new(240, 100, 50));
        assert_eq!(ColorLib::rgb_to_hsl(Rgb::new(128, 128, 128)), Hsl::new(0, 0, 50));
        assert_eq!(ColorLib::rgb_to_hsl(Rgb::new(0x8b, 0x5c, 0xf6)), Hsl::new(258, 90, 66));
    }

    #[test]
    fn test_hue_stays_below_360() {
        // raw hue is 359.76 here
        let hsl = ColorLib::rgb_to_hsl(Rgb::new(255, 0, 1));
        assert_eq!(hsl.h, 0);

        for rgb in sample_channels() {
            assert!(ColorLib::rgb_to_hsl(rgb).h < 360);
        }
    }

    #[test]
    fn test_hsl_round_trip_exact() {
        for rgb in sample_channels() {
            let (h, s, l) = ColorLib::rgb_to_hsl_exact(rgb);
            let back = ColorLib::hsl_to_rgb(h, s * 100.0, l * 100.0);
            assert!((back.r as i16 - rgb.r as i16).abs() <= 1, "{:?} -> {:?}", rgb, back);
            assert!((back.g as i16 - rgb.g as i16).abs() <= 1, "{:?} -> {:?}", rgb, back);
            assert!((back.b as i16 - rgb.b as i16).abs() <= 1, "{:?} -> {:?}", rgb, back);
        }
    }

    #[test]
    fn test_hsl_round_trip_rounded_drift() {
        // whole-number HSL loses up to 5 units per channel
        for rgb in sample_channels() {
            let hsl = ColorLib::rgb_to_hsl(rgb);
            let back = ColorLib::hsl_to_rgb(hsl.h as f64, hsl.s as f64, hsl.l as f64);
            assert!((back.r as i16 - rgb.r as i16).abs() <= 5);
            assert!((back.g as i16 - rgb.g as i16).abs() <= 5);
            assert!((back.b as i16 - rgb.b as i16).abs() <= 5);
        }

        for v in 0..=255u8 {
            let gray = Rgb::new(v, v, v);
            let hsl = ColorLib::rgb_to_hsl(gray);
            let back = ColorLib::hsl_to_rgb(hsl.h as f64, hsl.s as f64, hsl.l as f64);
            assert!((back.r as i16 - v as i16).abs() <= 1);
        }
    }

    #[test]
    fn test_hsl_to_rgb_wraps_hue() {
        assert_eq!(ColorLib::hsl_to_rgb(360.0, 100.0, 50.0), Rgb::new(255, 0, 0));
        assert_eq!(ColorLib::hsl_to_rgb(-120.0, 100.0, 50.0), Rgb::new(0, 0, 255));
    }

    #[test]
    fn test_contrast_color() {
        assert_eq!(ColorLib::get_contrast_color("#ffffff"), "#000000");
        assert_eq!(ColorLib::get_contrast_color("#000000"), "#ffffff");
        assert_eq!(ColorLib::get_contrast_color("#ffff00"), "#000000");
        assert_eq!(ColorLib::get_contrast_color("#0000ff"), "#ffffff");
        assert_eq!(ColorLib::get_contrast_color("nope"), "#000000");
    }

    #[test]
    fn test_complementary() {
        assert_eq!(ColorLib::get_complementary("#000000"), "#ffffff");
        assert_eq!(ColorLib::get_complementary("#ffffff"), "#000000");
        assert_eq!(ColorLib::get_complementary("#ff8000"), "#007fff");
        assert_eq!(ColorLib::get_complementary("#abc"), "#abc");
    }

    #[test]
    fn test_analogous() {
        assert_eq!(ColorLib::get_analogous("#ff0000"), vec!["#ff0080", "#ff8000"]);
        assert_eq!(ColorLib::get_analogous("bad"), vec!["bad"]);
    }

    #[test]
    fn test_triadic() {
        assert_eq!(ColorLib::get_triadic("#ff0000"), vec!["#00ff00", "#0000ff"]);
        assert_eq!(ColorLib::get_triadic("#00ff00"), vec!["#0000ff", "#ff0000"]);
    }

    #[test]
    fn test_create_color_info() {
        let info = ColorLib::create_color_info(Rgb::new(0, 255, 0), Some(33));
        assert_eq!(info.hex, "#00ff00");
        assert_eq!(info.hsl, Hsl::new(120, 100, 50));
        assert_eq!(info.percentage, Some(33));
        assert_eq!(info.name, None);
    }
}
