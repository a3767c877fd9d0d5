//! Core color functions for ColorSnaps

pub mod colorlib;
pub mod css_mining;
pub mod extractor;
pub mod shades;
pub mod url_pipeline;

pub use colorlib::ColorLib;
pub use css_mining::mine_css_colors;
pub use extractor::{KmeansQuantizer, PaletteExtractor, Quantizer, DEFAULT_MAX_COLORS};
pub use shades::{generate_scale, is_valid_color};
pub use url_pipeline::{Endpoints, ResolvedPalette, ResolvedVia, Strategy, UrlPipeline};
