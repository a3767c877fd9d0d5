//! Saved palette model

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::ColorInfo;

/// Where a palette was extracted from
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PaletteSource {
    Image,
    Url,
}

impl PaletteSource {
    pub fn as_str(&self) -> &'static str {
        match self {
            PaletteSource::Image => "image",
            PaletteSource::Url => "url",
        }
    }

    pub fn from_str(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "image" => Some(PaletteSource::Image),
            "url" => Some(PaletteSource::Url),
            _ => None,
        }
    }
}

impl std::fmt::Display for PaletteSource {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// A palette the user asked to keep.
///
/// Records are never edited after creation; the store only inserts and deletes.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SavedPalette {
    pub id: String,
    pub name: String,
    /// Most dominant first
    pub colors: Vec<ColorInfo>,
    pub source: PaletteSource,
    /// Original file name or URL
    pub source_name: String,
    pub created_at: DateTime<Utc>,
}

/// A palette about to be saved; the store assigns id and timestamp
#[derive(Debug, Clone, PartialEq)]
pub struct PaletteDraft {
    /// Blank names get a date-derived default
    pub name: String,
    pub colors: Vec<ColorInfo>,
    pub source: PaletteSource,
    pub source_name: String,
}

impl PaletteDraft {
    pub fn new(
        name: impl Into<String>,
        colors: Vec<ColorInfo>,
        source: PaletteSource,
        source_name: impl Into<String>,
    ) -> Self {
        Self {
            name: name.into(),
            colors,
            source,
            source_name: source_name.into(),
        }
    }
}
