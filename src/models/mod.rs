//! Data models for ColorSnaps
//!
//! Colors, saved palettes and shade scales shared by the extractors, the store
//! and the exporters.

mod color;
mod palette;
mod scale;

pub use color::{ColorInfo, Hsl, Rgb};
pub use palette::{PaletteDraft, PaletteSource, SavedPalette};
pub use scale::{ShadeScale, ShadeStep};
