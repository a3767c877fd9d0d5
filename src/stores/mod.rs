//! Persistent palette storage

mod palette_store;
mod storage;

pub use palette_store::{PaletteStore, PALETTES_KEY};
pub use storage::{FileStorage, KeyValueStorage, MemoryStorage};
