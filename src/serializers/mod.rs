//! Serializers for turning palettes and shade scales into text exports
//!
//! Every exporter is pure and keeps the input order.

pub mod palette_export;
pub mod scale_export;

pub use palette_export::{export_palette, ExportFormat};
pub use scale_export::{export_scale, ScaleFormat};
