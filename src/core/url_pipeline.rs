//! URL to palette resolution
//!
//! A URL is tried against an ordered chain of strategies. Each strategy runs
//! only after the previous one has finished, and the first palette wins:
//!
//! 1. direct image: the URL looks like an image file, load it through the
//!    CORS relays
//! 2. screenshot: render the page with the screenshot endpoint, load the
//!    screenshot through the relays
//! 3. raw fetch: fetch the URL through the page relay; image responses go
//!    straight to the extractor, anything else is mined for CSS color literals
//!
//! Only the last strategy's failure reaches the caller.

use image::DynamicImage;
use tracing::{debug, info, warn};

use crate::config::UserConfig;
use crate::core::css_mining::mine_css_colors;
use crate::core::extractor::{PaletteExtractor, Quantizer};
use crate::error::UrlError;
use crate::models::ColorInfo;
use crate::utils::network::{fill_template, Fetcher};

const IMAGE_EXTENSIONS: [&str; 7] = [".jpg", ".jpeg", ".png", ".gif", ".webp", ".svg", ".bmp"];

/// Whether the URL text mentions an image extension anywhere
pub fn is_image_url(url: &str) -> bool {
    let lower = url.to_lowercase();
    IMAGE_EXTENSIONS.iter().any(|ext| lower.contains(ext))
}

/// One link of the resolution chain
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Strategy {
    DirectImage,
    Screenshot,
    RawFetch,
}

impl Strategy {
    pub const CHAIN: [Strategy; 3] = [Strategy::DirectImage, Strategy::Screenshot, Strategy::RawFetch];

    pub fn as_str(&self) -> &'static str {
        match self {
            Strategy::DirectImage => "direct image",
            Strategy::Screenshot => "screenshot",
            Strategy::RawFetch => "raw fetch",
        }
    }
}

impl std::fmt::Display for Strategy {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// How a successful palette was obtained
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ResolvedVia {
    DirectImage,
    Screenshot,
    PageImage,
    PageCss,
}

impl ResolvedVia {
    pub fn as_str(&self) -> &'static str {
        match self {
            ResolvedVia::DirectImage => "direct image",
            ResolvedVia::Screenshot => "screenshot",
            ResolvedVia::PageImage => "page image",
            ResolvedVia::PageCss => "page CSS",
        }
    }
}

impl std::fmt::Display for ResolvedVia {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Palette produced by the chain
#[derive(Debug, Clone)]
pub struct ResolvedPalette {
    pub colors: Vec<ColorInfo>,
    pub via: ResolvedVia,
}

/// Result of running a single strategy
#[derive(Debug)]
pub enum StrategyOutcome {
    Palette(ResolvedPalette),
    /// The strategy does not apply to this URL
    Inapplicable,
    Failed(UrlError),
}

/// Endpoints used by the chain
#[derive(Debug, Clone)]
pub struct Endpoints {
    /// Tried in order for every image load
    pub cors_relays: Vec<String>,
    pub page_relay: String,
    pub screenshot: String,
}

impl From<&UserConfig> for Endpoints {
    fn from(config: &UserConfig) -> Self {
        Self {
            cors_relays: config.cors_relays.clone(),
            page_relay: config.page_relay.clone(),
            screenshot: config.screenshot_endpoint.clone(),
        }
    }
}

/// Resolves URLs to palettes over an injected [`Fetcher`]
pub struct UrlPipeline<F: Fetcher, Q: Quantizer> {
    fetcher: F,
    extractor: PaletteExtractor<Q>,
    endpoints: Endpoints,
}

impl<F: Fetcher, Q: Quantizer> UrlPipeline<F, Q> {
    pub fn new(fetcher: F, extractor: PaletteExtractor<Q>, endpoints: Endpoints) -> Self {
        Self {
            fetcher,
            extractor,
            endpoints,
        }
    }

    /// Run the strategy chain for `url`
    pub async fn resolve(&self, url: &str) -> Result<ResolvedPalette, UrlError> {
        let mut last_failure = None;

        for strategy in Strategy::CHAIN {
            debug!("Trying {} strategy for {}", strategy, url);

            match self.run(strategy, url).await {
                StrategyOutcome::Palette(resolved) => {
                    info!(
                        "Extracted {} colors from {} via {}",
                        resolved.colors.len(),
                        url,
                        strategy
                    );
                    return Ok(resolved);
                }
                StrategyOutcome::Inapplicable => {
                    debug!("{} strategy does not apply to {}", strategy, url);
                }
                StrategyOutcome::Failed(reason) => {
                    debug!("{} strategy failed for {}: {}", strategy, url, reason);
                    last_failure = Some(reason);
                }
            }
        }

        let failure = last_failure.unwrap_or(UrlError::Unreachable);
        warn!("No palette for {}: {}", url, failure);
        Err(failure)
    }

    /// Run a single strategy
    pub async fn run(&self, strategy: Strategy, url: &str) -> StrategyOutcome {
        match strategy {
            Strategy::DirectImage => self.direct_image(url).await,
            Strategy::Screenshot => self.screenshot(url).await,
            Strategy::RawFetch => self.raw_fetch(url).await,
        }
    }

    async fn direct_image(&self, url: &str) -> StrategyOutcome {
        if !is_image_url(url) {
            return StrategyOutcome::Inapplicable;
        }
        self.extract_relayed(url, ResolvedVia::DirectImage).await
    }

    async fn screenshot(&self, url: &str) -> StrategyOutcome {
        let screenshot_url = fill_template(&self.endpoints.screenshot, url);
        self.extract_relayed(&screenshot_url, ResolvedVia::Screenshot).await
    }

    async fn raw_fetch(&self, url: &str) -> StrategyOutcome {
        let relay_url = fill_template(&self.endpoints.page_relay, url);

        let resource = match self.fetcher.fetch(&relay_url).await {
            Ok(resource) => resource,
            Err(e) => {
                debug!("Page fetch failed for {}: {}", url, e);
                return StrategyOutcome::Failed(UrlError::Unreachable);
            }
        };

        if resource.is_image() {
            return match self.extractor.extract_from_bytes(&resource.body) {
                Ok(colors) => StrategyOutcome::Palette(ResolvedPalette {
                    colors,
                    via: ResolvedVia::PageImage,
                }),
                Err(e) => {
                    debug!("Fetched image for {} yielded nothing: {}", url, e);
                    StrategyOutcome::Failed(UrlError::NoColorsFound)
                }
            };
        }

        let colors = mine_css_colors(&resource.text(), self.extractor.max_colors());
        if colors.is_empty() {
            return StrategyOutcome::Failed(UrlError::NoColorsFound);
        }

        StrategyOutcome::Palette(ResolvedPalette {
            colors,
            via: ResolvedVia::PageCss,
        })
    }

    /// Load an image through the relays in order, then extract
    async fn extract_relayed(&self, image_url: &str, via: ResolvedVia) -> StrategyOutcome {
        let Some(img) = self.load_image(image_url).await else {
            return StrategyOutcome::Failed(UrlError::Unreachable);
        };

        match self.extractor.extract(&img) {
            Ok(colors) => StrategyOutcome::Palette(ResolvedPalette { colors, via }),
            Err(e) => {
                debug!("Extraction failed for {}: {}", image_url, e);
                StrategyOutcome::Failed(UrlError::NoColorsFound)
            }
        }
    }

    /// First relay that returns a decodable image wins
    async fn load_image(&self, image_url: &str) -> Option<DynamicImage> {
        for relay in &self.endpoints.cors_relays {
            let relay_url = fill_template(relay, image_url);

            let resource = match self.fetcher.fetch(&relay_url).await {
                Ok(resource) => resource,
                Err(e) => {
                    debug!("Relay {} failed: {}", relay, e);
                    continue;
                }
            };

            match image::load_from_memory(&resource.body) {
                Ok(img) => return Some(img),
                Err(e) => debug!("Relay {} returned undecodable data: {}", relay, e),
            }
        }

        None
    }
}
