//! Palette store - saved palettes persisted as one blob

use chrono::Utc;
use tracing::{info, warn};

use super::storage::KeyValueStorage;
use crate::error::StoreError;
use crate::models::{PaletteDraft, SavedPalette};
use crate::utils::dates::default_palette_name;

/// Storage key holding the whole palette list
pub const PALETTES_KEY: &str = "colorsnaps_palettes";

/// Saved palettes, newest first.
///
/// Every mutation rewrites the full list under [`PALETTES_KEY`].
pub struct PaletteStore<S: KeyValueStorage> {
    storage: S,
}

impl<S: KeyValueStorage> PaletteStore<S> {
    pub fn new(storage: S) -> Self {
        Self { storage }
    }

    /// Assign an id and timestamp, then put the palette at the head of the list
    pub fn save_palette(&self, draft: PaletteDraft) -> Result<SavedPalette, StoreError> {
        if draft.colors.is_empty() {
            return Err(StoreError::EmptyPalette);
        }

        let name = if draft.name.trim().is_empty() {
            default_palette_name()
        } else {
            draft.name
        };

        let palette = SavedPalette {
            id: uuid::Uuid::new_v4().to_string(),
            name,
            colors: draft.colors,
            source: draft.source,
            source_name: draft.source_name,
            created_at: Utc::now(),
        };

        let mut palettes = self.get_saved_palettes();
        palettes.insert(0, palette.clone());
        self.write(&palettes)?;

        info!(
            "Saved palette '{}' ({} colors) as {}",
            palette.name,
            palette.colors.len(),
            palette.id
        );

        Ok(palette)
    }

    /// All saved palettes; empty when nothing is stored or the data is unreadable
    pub fn get_saved_palettes(&self) -> Vec<SavedPalette> {
        let Some(stored) = self.storage.get(PALETTES_KEY) else {
            return Vec::new();
        };

        match serde_json::from_str(&stored) {
            Ok(palettes) => palettes,
            Err(e) => {
                warn!("Ignoring unreadable saved palettes: {}", e);
                Vec::new()
            }
        }
    }

    /// Find a palette by id
    pub fn get_palette(&self, id: &str) -> Option<SavedPalette> {
        self.get_saved_palettes().into_iter().find(|p| p.id == id)
    }

    /// Remove the palette with `id`; unknown ids leave the list as it is
    pub fn delete_palette(&self, id: &str) -> Result<(), StoreError> {
        let mut palettes = self.get_saved_palettes();
        let before = palettes.len();
        palettes.retain(|p| p.id != id);

        if palettes.len() != before {
            info!("Deleted palette {}", id);
        }

        self.write(&palettes)
    }

    fn write(&self, palettes: &[SavedPalette]) -> Result<(), StoreError> {
        let blob = serde_json::to_string(palettes)?;
        self.storage.set(PALETTES_KEY, &blob)
    }
}
