//! ColorSnaps - extract color palettes from images and web pages

use anyhow::{Context, Result};
use clap::{Args, Parser, Subcommand};
use std::path::{Path, PathBuf};
use tracing::info;

use colorsnaps::config::{Paths, UserConfig};
use colorsnaps::core::{
    generate_scale, ColorLib, Endpoints, KmeansQuantizer, PaletteExtractor, UrlPipeline,
};
use colorsnaps::models::{ColorInfo, PaletteDraft, PaletteSource, SavedPalette};
use colorsnaps::serializers::{export_palette, export_scale, ExportFormat, ScaleFormat};
use colorsnaps::stores::{FileStorage, PaletteStore};
use colorsnaps::utils::network::HttpFetcher;
use colorsnaps::utils::validation::{normalize_url, validate_upload, with_default_scheme};

/// ColorSnaps - palette extraction from images and URLs
#[derive(Parser, Debug)]
#[command(name = "colorsnaps")]
#[command(version)]
#[command(about = "Extract color palettes from images and web pages")]
struct Cli {
    /// Enable debug logging
    #[arg(long, global = true)]
    debug: bool,

    /// Path to config directory
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Extract a palette from an image file
    Image {
        path: PathBuf,
        #[command(flatten)]
        out: PaletteOutput,
    },
    /// Extract a palette from a website or image URL
    Url {
        url: String,
        #[command(flatten)]
        out: PaletteOutput,
    },
    /// Generate a 50-900 shade scale from a base color
    Scale {
        color: String,
        /// Color name used in the export
        #[arg(long, default_value = "primary")]
        name: String,
        #[arg(long, value_enum, default_value_t = ScaleFormat::Tailwind)]
        format: ScaleFormat,
        /// Write to this file instead of stdout
        #[arg(long)]
        output: Option<PathBuf>,
    },
    /// Show complementary, analogous and triadic colors
    Harmony { color: String },
    /// List saved palettes, newest first
    List,
    /// Print a saved palette
    Show {
        id: String,
        #[arg(long, value_enum)]
        format: Option<ExportFormat>,
        #[arg(long)]
        output: Option<PathBuf>,
    },
    /// Delete a saved palette
    Delete { id: String },
}

#[derive(Args, Debug)]
struct PaletteOutput {
    /// Export the palette in this format
    #[arg(long, value_enum)]
    format: Option<ExportFormat>,

    /// Write the export to this file or directory instead of stdout
    #[arg(long)]
    output: Option<PathBuf>,

    /// Save the palette, optionally under NAME
    #[arg(long, value_name = "NAME", num_args = 0..=1)]
    save: Option<Option<String>>,
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    let log_level = if cli.debug { "debug" } else { "info" };
    let filter = tracing_subscriber::EnvFilter::new(format!(
        "{},hyper=warn,reqwest=warn",
        log_level
    ));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_thread_ids(false)
        .with_file(false)
        .with_line_number(false)
        .compact()
        .init();

    let paths = Paths::init(cli.config)?;
    info!("Config directory: {:?}", paths.config_dir());

    let config = UserConfig::load()?;
    let store = PaletteStore::new(FileStorage::new(paths.storage_dir())?);

    match cli.command {
        Command::Image { path, out } => {
            let colors = extract_image(&path, &config)?;
            let source_name = path
                .file_name()
                .map(|n| n.to_string_lossy().into_owned())
                .unwrap_or_default();
            finish_palette(&store, colors, PaletteSource::Image, source_name, out)
        }
        Command::Url { url, out } => {
            let target = normalize_url(&url)?;
            let pipeline = UrlPipeline::new(
                HttpFetcher::from_config(&config)?,
                PaletteExtractor::new(KmeansQuantizer::default(), config.max_colors),
                Endpoints::from(&config),
            );

            let resolved = pipeline.resolve(target.as_str()).await?;
            info!("Resolved via {}", resolved.via);

            let source_name = with_default_scheme(&url);
            finish_palette(&store, resolved.colors, PaletteSource::Url, source_name, out)
        }
        Command::Scale {
            color,
            name,
            format,
            output,
        } => {
            let scale = generate_scale(&color)?;
            let content = export_scale(&scale, &name, format)?;
            emit(&content, format.file_name(), output.as_deref())
        }
        Command::Harmony { color } => {
            let base = ColorLib::hex_to_rgb(&color)
                .map(ColorLib::rgb_to_hex)
                .with_context(|| format!("Invalid hex color: {}", color))?;

            println!("base           {}", base.to_uppercase());
            println!("contrast       {}", ColorLib::get_contrast_color(&base).to_uppercase());
            println!("complementary  {}", ColorLib::get_complementary(&base).to_uppercase());
            println!("analogous      {}", join_upper(&ColorLib::get_analogous(&base)));
            println!("triadic        {}", join_upper(&ColorLib::get_triadic(&base)));
            Ok(())
        }
        Command::List => {
            let palettes = store.get_saved_palettes();
            if palettes.is_empty() {
                println!("No saved palettes");
            }
            for palette in &palettes {
                print_summary(palette);
            }
            Ok(())
        }
        Command::Show { id, format, output } => {
            let palette = store
                .get_palette(&id)
                .with_context(|| format!("No saved palette with id {}", id))?;

            print_summary(&palette);
            match format {
                Some(format) => {
                    let content = export_palette(&palette.colors, format)?;
                    emit(&content, format.file_name(), output.as_deref())
                }
                None => {
                    print_colors(&palette.colors);
                    Ok(())
                }
            }
        }
        Command::Delete { id } => {
            store.delete_palette(&id)?;
            println!("Deleted {}", id);
            Ok(())
        }
    }
}

fn extract_image(path: &Path, config: &UserConfig) -> Result<Vec<ColorInfo>> {
    let size = std::fs::metadata(path)
        .with_context(|| format!("Failed to read {}", path.display()))?
        .len();
    validate_upload(path, None, size, config.max_upload_bytes)?;

    let extractor = PaletteExtractor::new(KmeansQuantizer::default(), config.max_colors);
    Ok(extractor.extract_from_path(path)?)
}

fn finish_palette(
    store: &PaletteStore<FileStorage>,
    colors: Vec<ColorInfo>,
    source: PaletteSource,
    source_name: String,
    out: PaletteOutput,
) -> Result<()> {
    match out.format {
        Some(format) => {
            let content = export_palette(&colors, format)?;
            emit(&content, format.file_name(), out.output.as_deref())?;
        }
        None => print_colors(&colors),
    }

    if let Some(name) = out.save {
        let draft = PaletteDraft::new(name.unwrap_or_default(), colors, source, source_name);
        let saved = store.save_palette(draft)?;
        println!("Saved \"{}\" as {}", saved.name, saved.id);
    }

    Ok(())
}

/// Write to `output` (a directory gets `file_name` appended) or stdout
fn emit(content: &str, file_name: &str, output: Option<&Path>) -> Result<()> {
    let Some(output) = output else {
        println!("{}", content);
        return Ok(());
    };

    let target = if output.is_dir() {
        output.join(file_name)
    } else {
        output.to_path_buf()
    };

    std::fs::write(&target, content)
        .with_context(|| format!("Failed to write {}", target.display()))?;
    info!("Wrote {}", target.display());
    Ok(())
}

fn print_colors(colors: &[ColorInfo]) {
    for color in colors {
        let share = color
            .percentage
            .map(|p| format!("{:>3}%", p))
            .unwrap_or_default();
        println!(
            "{}  rgb({}, {}, {})  hsl({}, {}%, {}%)  {}",
            color.display_hex(),
            color.rgb.r,
            color.rgb.g,
            color.rgb.b,
            color.hsl.h,
            color.hsl.s,
            color.hsl.l,
            share
        );
    }
}

fn print_summary(palette: &SavedPalette) {
    let swatches: Vec<String> = palette.colors.iter().map(|c| c.display_hex()).collect();
    println!(
        "{}  {}  [{}: {}]  {}  {}",
        palette.id,
        palette.name,
        palette.source,
        palette.source_name,
        palette.created_at.format("%Y-%m-%d %H:%M"),
        swatches.join(" ")
    );
}

fn join_upper(hexes: &[String]) -> String {
    hexes
        .iter()
        .map(|h| h.to_uppercase())
        .collect::<Vec<_>>()
        .join(" ")
}
