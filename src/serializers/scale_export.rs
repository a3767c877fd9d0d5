//! Shade scale exports: Tailwind config, CSS variables, SCSS, JSON

use std::collections::BTreeMap;

use crate::models::ShadeScale;
use crate::utils::validation::sanitize_color_name;

/// Used when the sanitized color name comes out empty
pub const DEFAULT_COLOR_NAME: &str = "primary";

/// Output format for a shade scale
#[derive(Debug, Clone, Copy, PartialEq, Eq, clap::ValueEnum)]
pub enum ScaleFormat {
    Tailwind,
    Css,
    Scss,
    Json,
}

impl ScaleFormat {
    /// Name used when the export is written to a directory
    pub fn file_name(&self) -> &'static str {
        match self {
            ScaleFormat::Tailwind => "scale.js",
            ScaleFormat::Css => "scale.css",
            ScaleFormat::Scss => "scale.scss",
            ScaleFormat::Json => "scale.json",
        }
    }
}

fn color_name(name: &str) -> String {
    let name = sanitize_color_name(name);
    if name.is_empty() {
        DEFAULT_COLOR_NAME.to_string()
    } else {
        name
    }
}

/// `colors: { name: { 50: '#..', ... } }` for a Tailwind config
pub fn export_as_tailwind(scale: &ShadeScale, name: &str) -> String {
    let shades: Vec<String> = scale
        .iter()
        .map(|(step, hex)| format!("    {}: '{}',", step, hex))
        .collect();

    format!(
        "colors: {{\n  {}: {{\n{}\n  }}\n}}",
        color_name(name),
        shades.join("\n")
    )
}

/// `:root` block with `--name-50` ... `--name-900`
pub fn export_as_css_vars(scale: &ShadeScale, name: &str) -> String {
    let name = color_name(name);
    let vars: Vec<String> = scale
        .iter()
        .map(|(step, hex)| format!("  --{}-{}: {};", name, step, hex))
        .collect();

    format!(":root {{\n{}\n}}", vars.join("\n"))
}

/// One `$name-step: #hex;` line per step
pub fn export_as_scss(scale: &ShadeScale, name: &str) -> String {
    let name = color_name(name);
    scale
        .iter()
        .map(|(step, hex)| format!("${}-{}: {};", name, step, hex))
        .collect::<Vec<_>>()
        .join("\n")
}

/// `{ "name": { "50": "#..", ... } }`, pretty-printed
pub fn export_as_json(scale: &ShadeScale, name: &str) -> serde_json::Result<String> {
    let mut wrapper = BTreeMap::new();
    wrapper.insert(color_name(name), scale);
    serde_json::to_string_pretty(&wrapper)
}

pub fn export_scale(scale: &ShadeScale, name: &str, format: ScaleFormat) -> serde_json::Result<String> {
    match format {
        ScaleFormat::Tailwind => Ok(export_as_tailwind(scale, name)),
        ScaleFormat::Css => Ok(export_as_css_vars(scale, name)),
        ScaleFormat::Scss => Ok(export_as_scss(scale, name)),
        ScaleFormat::Json => export_as_json(scale, name),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::ShadeStep;

    fn scale() -> ShadeScale {
        ShadeScale::new(std::array::from_fn(|i| format!("#{:06x}", i * 0x111111)))
    }

    #[test]
    fn test_tailwind() {
        let out = export_as_tailwind(&scale(), "brand");
        assert!(out.starts_with("colors: {\n  brand: {\n    50: '#000000',\n    100: '#111111',"));
        assert!(out.ends_with("    900: '#999999',\n  }\n}"));
    }

    #[test]
    fn test_css_vars() {
        let out = export_as_css_vars(&scale(), "brand");
        assert!(out.starts_with(":root {\n  --brand-50: #000000;\n"));
        assert!(out.ends_with("  --brand-900: #999999;\n}"));
        assert_eq!(out.lines().count(), 12);
    }

    #[test]
    fn test_scss() {
        let out = export_as_scss(&scale(), "brand");
        let lines: Vec<&str> = out.lines().collect();
        assert_eq!(lines.len(), 10);
        assert_eq!(lines[0], "$brand-50: #000000;");
        assert_eq!(lines[9], "$brand-900: #999999;");
    }

    #[test]
    fn test_json() {
        let out = export_as_json(&scale(), "brand").unwrap();
        let parsed: serde_json::Value = serde_json::from_str(&out).unwrap();
        assert_eq!(parsed["brand"]["500"], scale().get(ShadeStep::S500));
        assert!(out.find("\"50\"").unwrap() < out.find("\"100\"").unwrap());
    }

    #[test]
    fn test_file_names() {
        assert_eq!(ScaleFormat::Tailwind.file_name(), "scale.js");
        assert_eq!(ScaleFormat::Scss.file_name(), "scale.scss");
        assert_eq!(ScaleFormat::Json.file_name(), "scale.json");
    }

    #[test]
    fn test_name_falls_back_to_primary() {
        let out = export_scale(&scale(), "!!", ScaleFormat::Scss).unwrap();
        assert!(out.starts_with("$primary-50:"));

        let out = export_scale(&scale(), "Brand Blue", ScaleFormat::Css).unwrap();
        assert!(out.contains("--brandblue-50"));
    }
}
