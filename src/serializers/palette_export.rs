//! Palette exports: JSON, CSS custom properties, Figma swatches

use serde::Serialize;

use crate::models::ColorInfo;

/// Output format for a multi-color palette
#[derive(Debug, Clone, Copy, PartialEq, Eq, clap::ValueEnum)]
pub enum ExportFormat {
    Json,
    Css,
    Figma,
}

impl ExportFormat {
    /// Name used when the export is downloaded
    pub fn file_name(&self) -> &'static str {
        match self {
            ExportFormat::Css => "palette.css",
            ExportFormat::Json | ExportFormat::Figma => "palette.json",
        }
    }
}

#[derive(Debug, Serialize)]
struct FigmaSwatch {
    name: String,
    #[serde(rename = "type")]
    kind: &'static str,
    color: FigmaColor,
}

/// Channels in [0, 1]
#[derive(Debug, Serialize)]
struct FigmaColor {
    r: f64,
    g: f64,
    b: f64,
}

/// Pretty-printed array of the full color records
pub fn export_as_json(colors: &[ColorInfo]) -> serde_json::Result<String> {
    serde_json::to_string_pretty(colors)
}

/// `:root` block with `--color-1`, `--color-2`, ...
pub fn export_as_css(colors: &[ColorInfo]) -> String {
    let vars: Vec<String> = colors
        .iter()
        .enumerate()
        .map(|(i, c)| format!("  --color-{}: {};", i + 1, c.hex))
        .collect();

    format!(":root {{\n{}\n}}", vars.join("\n"))
}

/// Solid paint descriptors for design tools
pub fn export_as_figma(colors: &[ColorInfo]) -> serde_json::Result<String> {
    let swatches: Vec<FigmaSwatch> = colors
        .iter()
        .enumerate()
        .map(|(i, c)| FigmaSwatch {
            name: format!("Color {}", i + 1),
            kind: "SOLID",
            color: FigmaColor {
                r: c.rgb.r as f64 / 255.0,
                g: c.rgb.g as f64 / 255.0,
                b: c.rgb.b as f64 / 255.0,
            },
        })
        .collect();

    serde_json::to_string_pretty(&swatches)
}

pub fn export_palette(colors: &[ColorInfo], format: ExportFormat) -> serde_json::Result<String> {
    match format {
        ExportFormat::Json => export_as_json(colors),
        ExportFormat::Css => Ok(export_as_css(colors)),
        ExportFormat::Figma => export_as_figma(colors),
    }
}
