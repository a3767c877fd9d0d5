//! Dominant palette extraction from decoded images

use std::collections::HashMap;
use std::path::Path;

use image::DynamicImage;
use kmeans_colors::get_kmeans;
use palette::{IntoColor, Lab, Srgb};
use tracing::debug;

use crate::core::ColorLib;
use crate::error::ExtractionError;
use crate::models::{ColorInfo, Rgb};

/// Palette size used by the extractors
pub const DEFAULT_MAX_COLORS: usize = 8;

/// Reduces an image to a few representative colors
pub trait Quantizer: Send + Sync {
    /// Up to `color_count` colors, most dominant first.
    ///
    /// `None` when the image holds nothing to quantize.
    fn quantize(&self, image: &DynamicImage, color_count: usize) -> Option<Vec<Rgb>>;
}

/// K-means in Lab space over a downscaled copy of the image
#[derive(Debug, Clone)]
pub struct KmeansQuantizer {
    /// Longest side of the sampled thumbnail
    pub sample_size: u32,
    pub max_iter: usize,
    pub converge: f32,
    pub seed: u64,
}

impl Default for KmeansQuantizer {
    fn default() -> Self {
        Self {
            sample_size: 100,
            max_iter: 20,
            converge: 1e-4,
            seed: 0,
        }
    }
}

impl KmeansQuantizer {
    /// Opaque pixels, downscaled first when the image is large
    fn sample_pixels(&self, image: &DynamicImage) -> Vec<Rgb> {
        let thumbnail;
        let source = if image.width() > self.sample_size || image.height() > self.sample_size {
            thumbnail = image.thumbnail(self.sample_size, self.sample_size);
            &thumbnail
        } else {
            image
        };

        source
            .to_rgba8()
            .pixels()
            .filter(|pixel| pixel[3] > 0)
            .map(|pixel| Rgb::new(pixel[0], pixel[1], pixel[2]))
            .collect()
    }

    /// Distinct colors by descending count, ties in first-seen order
    fn rank_by_frequency(pixels: &[Rgb]) -> Vec<(Rgb, usize)> {
        let mut order: Vec<Rgb> = Vec::new();
        let mut counts: HashMap<Rgb, usize> = HashMap::new();

        for pixel in pixels {
            let count = counts.entry(*pixel).or_insert_with(|| {
                order.push(*pixel);
                0
            });
            *count += 1;
        }

        let mut ranked: Vec<(Rgb, usize)> = order.into_iter().map(|c| (c, counts[&c])).collect();
        ranked.sort_by(|a, b| b.1.cmp(&a.1));
        ranked
    }
}

impl Quantizer for KmeansQuantizer {
    fn quantize(&self, image: &DynamicImage, color_count: usize) -> Option<Vec<Rgb>> {
        if color_count == 0 {
            return None;
        }

        let pixels = self.sample_pixels(image);
        if pixels.is_empty() {
            return None;
        }

        let distinct = Self::rank_by_frequency(&pixels);
        if distinct.len() <= color_count {
            return Some(distinct.into_iter().map(|(color, _)| color).collect());
        }

        let lab_pixels: Vec<Lab> = pixels
            .iter()
            .map(|p| Srgb::<u8>::new(p.r, p.g, p.b).into_linear().into_color())
            .collect();

        let kmeans = get_kmeans(
            color_count,
            self.max_iter,
            self.converge,
            false,
            &lab_pixels,
            self.seed,
        );

        let mut populations = vec![0usize; kmeans.centroids.len()];
        for index in &kmeans.indices {
            if let Some(count) = populations.get_mut(*index as usize) {
                *count += 1;
            }
        }

        let mut clusters: Vec<(Rgb, usize)> = kmeans
            .centroids
            .iter()
            .zip(populations)
            .filter(|(_, population)| *population > 0)
            .map(|(&lab, population)| {
                let rgb_f32: Srgb<f32> = Srgb::from_linear(lab.into_color());
                let c: Srgb<u8> = rgb_f32.into_format::<u8>();
                (Rgb::new(c.red, c.green, c.blue), population)
            })
            .collect();

        clusters.sort_by(|a, b| b.1.cmp(&a.1));

        // distinct centroids can land on the same 8-bit color
        let mut ranked: Vec<Rgb> = Vec::with_capacity(clusters.len());
        for (color, _) in clusters {
            if !ranked.contains(&color) {
                ranked.push(color);
            }
        }

        Some(ranked)
    }
}

/// Turns quantizer output into a percentage-weighted palette
pub struct PaletteExtractor<Q: Quantizer = KmeansQuantizer> {
    quantizer: Q,
    max_colors: usize,
}

impl Default for PaletteExtractor<KmeansQuantizer> {
    fn default() -> Self {
        Self::new(KmeansQuantizer::default(), DEFAULT_MAX_COLORS)
    }
}

impl<Q: Quantizer> PaletteExtractor<Q> {
    pub fn new(quantizer: Q, max_colors: usize) -> Self {
        Self {
            quantizer,
            max_colors,
        }
    }

    pub fn max_colors(&self) -> usize {
        self.max_colors
    }

    /// Extract the ranked palette of a decoded image
    pub fn extract(&self, image: &DynamicImage) -> Result<Vec<ColorInfo>, ExtractionError> {
        let ranked = self
            .quantizer
            .quantize(image, self.max_colors)
            .filter(|colors| !colors.is_empty())
            .ok_or(ExtractionError::NoColors)?;

        debug!(
            "Quantizer returned {} colors for {}x{} image",
            ranked.len(),
            image.width(),
            image.height()
        );

        Ok(weight_palette(&ranked))
    }

    /// Decode encoded image bytes (PNG, JPEG, WebP, ...) and extract
    pub fn extract_from_bytes(&self, data: &[u8]) -> Result<Vec<ColorInfo>, ExtractionError> {
        let img = image::load_from_memory(data)?;
        self.extract(&img)
    }

    /// Open an image file and extract
    pub fn extract_from_path(&self, path: &Path) -> Result<Vec<ColorInfo>, ExtractionError> {
        let img = image::open(path)?;
        self.extract(&img)
    }
}

/// Rank-decaying raw weight of entry `index` out of `total`
pub fn rank_weight(index: usize, total: usize) -> u32 {
    let n = total as f64;
    ((1.0 - (index as f64 / n) * 0.5) * 100.0 / n).round() as u32
}

/// Attach normalized percentages to ranked colors.
///
/// Each weight is rounded on its own, so the sum may miss 100 by a point or two.
pub fn weight_palette(ranked: &[Rgb]) -> Vec<ColorInfo> {
    let total = ranked.len();
    let weights: Vec<u32> = (0..total).map(|i| rank_weight(i, total)).collect();
    let weight_sum: u32 = weights.iter().sum();

    ranked
        .iter()
        .zip(weights)
        .map(|(rgb, weight)| {
            let percentage = if weight_sum == 0 {
                0
            } else {
                (weight as f64 / weight_sum as f64 * 100.0).round() as u8
            };
            ColorLib::create_color_info(*rgb, Some(percentage))
        })
        .collect()
}
