//! Luminance-targeted shade scales

use palette::{LinSrgb, Srgb};

use crate::core::ColorLib;
use crate::error::ValidationError;
use crate::models::{Rgb, ShadeScale, ShadeStep};

/// Relative luminance targeted by each step
pub fn target_luminance(step: ShadeStep) -> f32 {
    match step {
        ShadeStep::S50 => 0.95,
        ShadeStep::S100 => 0.90,
        ShadeStep::S200 => 0.80,
        ShadeStep::S300 => 0.65,
        ShadeStep::S400 => 0.50,
        ShadeStep::S500 => 0.40,
        ShadeStep::S600 => 0.30,
        ShadeStep::S700 => 0.22,
        ShadeStep::S800 => 0.14,
        ShadeStep::S900 => 0.08,
    }
}

const LUMINANCE_EPSILON: f32 = 1e-7;
const MAX_BISECTIONS: u32 = 20;

/// Parse any CSS color (hex, `rgb()`, `hsl()`, named) to 8-bit RGB, alpha dropped
pub fn parse_color(input: &str) -> Option<Rgb> {
    let parsed: csscolorparser::Color = input.trim().parse().ok()?;
    let [r, g, b, _] = parsed.to_rgba8();
    Some(Rgb::new(r, g, b))
}

pub fn is_valid_color(input: &str) -> bool {
    parse_color(input).is_some()
}

fn to_srgb(rgb: Rgb) -> Srgb<f32> {
    Srgb::new(rgb.r, rgb.g, rgb.b).into_format()
}

fn to_rgb(color: Srgb<f32>) -> Rgb {
    let c: Srgb<u8> = color.into_format();
    Rgb::new(c.red, c.green, c.blue)
}

fn midpoint(a: Srgb<f32>, b: Srgb<f32>) -> Srgb<f32> {
    Srgb::new(
        (a.red + b.red) / 2.0,
        (a.green + b.green) / 2.0,
        (a.blue + b.blue) / 2.0,
    )
}

/// WCAG relative luminance
pub fn relative_luminance(color: Srgb<f32>) -> f32 {
    let lin: LinSrgb<f32> = color.into_linear();
    0.2126 * lin.red + 0.7152 * lin.green + 0.0722 * lin.blue
}

/// Move `rgb` toward black or white until its relative luminance hits `target`.
///
/// Bisects in gamma-encoded sRGB between the color and black or white.
pub fn with_luminance(rgb: Rgb, target: f32) -> Rgb {
    if target <= 0.0 {
        return Rgb::BLACK;
    }
    if target >= 1.0 {
        return Rgb::WHITE;
    }

    let color = to_srgb(rgb);
    let (mut low, mut high) = if relative_luminance(color) > target {
        (Srgb::new(0.0, 0.0, 0.0), color)
    } else {
        (color, Srgb::new(1.0, 1.0, 1.0))
    };

    let mut mid = midpoint(low, high);
    for _ in 0..MAX_BISECTIONS {
        let lum = relative_luminance(mid);
        if (target - lum).abs() < LUMINANCE_EPSILON {
            break;
        }
        if lum > target {
            high = mid;
        } else {
            low = mid;
        }
        mid = midpoint(low, high);
    }

    to_rgb(mid)
}

/// Build the 50-900 ramp for `base`.
///
/// Step 500 is always the base color itself.
pub fn generate_scale(base: &str) -> Result<ShadeScale, ValidationError> {
    let base = parse_color(base).ok_or(ValidationError::InvalidColor)?;

    let mut scale = ShadeScale::new(
        ShadeStep::ALL.map(|step| ColorLib::rgb_to_hex(with_luminance(base, target_luminance(step)))),
    );
    scale.set(ShadeStep::S500, ColorLib::rgb_to_hex(base));

    Ok(scale)
}
