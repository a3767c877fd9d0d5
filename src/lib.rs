//! ColorSnaps - extract color palettes from images and web pages
//!
//! Palettes come from uploaded images (k-means quantization), from URLs
//! (direct image, screenshot service, or page scraping), and can be turned
//! into shade scales, harmonies, and exports.

pub mod config;
pub mod core;
pub mod error;
pub mod models;
pub mod serializers;
pub mod stores;
pub mod utils;
