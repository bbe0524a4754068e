use std::collections::HashSet;
use std::fs;
use std::path::{Path, PathBuf};

use anyhow::Context;
use clap::{ArgAction, Parser, Subcommand};
use globset::{Glob, GlobSetBuilder};
use image::metadata::Orientation;
use image::{DynamicImage, ImageDecoder, ImageReader};
use serde::Deserialize;
use sprite_packer_core::{InputImage, PackerConfig, pack_images, pack_layout};
use tracing::{error, info, warn};
use walkdir::WalkDir;

#[derive(Parser, Debug)]
#[command(
    name = "sprite-packer",
    about = "Pack sprite images into atlas canvases",
    version,
    author
)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
    /// Show progress bars (disable with --no-progress or --quiet)
    #[arg(long, default_value_t = true, action=ArgAction::Set, global=true, help_heading = "Logging/UX")]
    progress: bool,
    /// Increase verbosity (-v, -vv)
    #[arg(short, long, action=ArgAction::Count, global=true, help_heading = "Logging/UX")]
    verbose: u8,
    /// Quiet mode (overrides verbose)
    #[arg(
        short,
        long,
        default_value_t = false,
        global = true,
        help_heading = "Logging/UX"
    )]
    quiet: bool,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Pack images into atlas pages (PNGs + metadata)
    Pack(PackArgs),
    /// Layout-only export (no PNGs): compute placements and export metadata
    Layout(PackArgs),
}

#[derive(Parser, Debug, Clone)]
struct PackArgs {
    // Input/Output
    /// Input files and/or directories (directories are walked recursively)
    #[arg(required = true, help_heading = "Input/Output")]
    inputs: Vec<PathBuf>,
    /// Output directory
    #[arg(short, long, default_value = "out", help_heading = "Input/Output")]
    out_dir: PathBuf,
    /// Atlas base name (files will be name.png/.tpsheet/.json)
    #[arg(short, long, default_value = "atlas", help_heading = "Input/Output")]
    name: String,
    /// YAML config file path (overrides layout options)
    #[arg(long, help_heading = "Input/Output")]
    config: Option<PathBuf>,
    /// Include patterns (glob). If set, only files matching any pattern are considered
    #[arg(long, help_heading = "Input/Output")]
    include: Vec<String>,
    /// Exclude patterns (glob). Files matching any pattern will be ignored
    #[arg(long, help_heading = "Input/Output")]
    exclude: Vec<String>,

    // Layout
    /// Canvas capacity (each page is max_size x max_size)
    #[arg(long, default_value_t = 2048, help_heading = "Layout")]
    max_size: u32,
    /// Round page dimensions up to a multiple of this
    #[arg(long, default_value_t = 4, help_heading = "Layout")]
    alignment: u32,

    // Export
    /// Metadata format: tpsheet | json-array | json (alias) | json-hash
    #[arg(long, default_value = "tpsheet", help_heading = "Export")]
    metadata: String,
    /// Export packing stats (JSON) to this file
    #[arg(long, help_heading = "Export")]
    export_stats: Option<PathBuf>,
    /// Dry run: compute layout and stats but do not write files
    #[arg(long, default_value_t = false, help_heading = "Export")]
    dry_run: bool,
    /// Layout-only: compute placements and export metadata (no PNGs)
    #[arg(long, default_value_t = false, help_heading = "Export")]
    layout_only: bool,
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    init_tracing_with_level(cli.quiet, cli.verbose);
    match &cli.command {
        Commands::Pack(args) => run_pack(args, cli.progress && !cli.quiet),
        Commands::Layout(args) => {
            let mut a = args.clone();
            a.layout_only = true;
            run_pack(&a, false)
        }
    }
}

fn run_pack(cli: &PackArgs, show_progress: bool) -> anyhow::Result<()> {
    if !cli.dry_run {
        fs::create_dir_all(&cli.out_dir)
            .with_context(|| format!("create out_dir {}", cli.out_dir.display()))?;
    }

    // Config file, when present, overrides layout flags en bloc.
    let mut cfg = PackerConfig {
        max_size: cli.max_size,
        alignment: cli.alignment,
    };
    if let Some(path) = &cli.config {
        let file = fs::read_to_string(path)
            .with_context(|| format!("read config {}", path.display()))?;
        let y: YamlConfig = serde_yaml::from_str(&file)?;
        cfg = y.into_packer_config(cfg);
    }

    let paths = gather_paths(&cli.inputs, &cli.include, &cli.exclude)?;
    if paths.is_empty() {
        anyhow::bail!("no images found under the given inputs");
    }
    let inputs = load_images_with_progress(&paths, show_progress)?;
    info!(count = inputs.len(), "loaded input images");

    if cli.layout_only {
        let items: Vec<(String, u32, u32)> = inputs
            .iter()
            .map(|inp| {
                let rgba = inp.image.to_rgba8();
                let (w, h) = rgba.dimensions();
                (inp.key.clone(), w, h)
            })
            .collect();
        let atlas = pack_layout(items, cfg)?;
        report_rejects(&atlas.rejected);
        if !cli.dry_run {
            write_metadata(&atlas, &cli.metadata, &cli.out_dir, &cli.name)?;
        }
        if let Some(stats_path) = &cli.export_stats {
            write_stats(&atlas.stats(), stats_path, cli.dry_run)?;
        }
        return Ok(());
    }

    let out = pack_images(inputs, cfg)?;
    report_rejects(&out.atlas.rejected);

    if !cli.dry_run {
        // write png(s)
        if out.pages.len() == 1 {
            let png_path = cli.out_dir.join(format!("{}.png", cli.name));
            out.pages[0]
                .rgba
                .save(&png_path)
                .with_context(|| format!("write {}", png_path.display()))?;
            info!(?png_path, "wrote page 0");
        } else {
            for p in &out.pages {
                let png_path = cli.out_dir.join(format!("{}_{}.png", cli.name, p.page.id));
                p.rgba
                    .save(&png_path)
                    .with_context(|| format!("write {}", png_path.display()))?;
                info!(?png_path, id = p.page.id, "wrote page");
            }
        }
        write_metadata(&out.atlas, &cli.metadata, &cli.out_dir, &cli.name)?;
    }

    let stats = out.stats();
    info!(
        pages = stats.num_pages,
        placed = stats.num_placements,
        rejected = stats.num_rejected,
        occupancy = format!("{:.2}%", stats.occupancy * 100.0),
        "stats"
    );
    if let Some(stats_path) = &cli.export_stats {
        write_stats(&stats, stats_path, cli.dry_run)?;
    }
    Ok(())
}

fn page_names(atlas: &sprite_packer_core::Atlas, name: &str) -> Vec<String> {
    if atlas.pages.len() == 1 {
        vec![format!("{}.png", name)]
    } else {
        atlas
            .pages
            .iter()
            .map(|p| format!("{}_{}.png", name, p.id))
            .collect()
    }
}

fn write_metadata(
    atlas: &sprite_packer_core::Atlas,
    format: &str,
    out_dir: &Path,
    name: &str,
) -> anyhow::Result<()> {
    match format {
        "tpsheet" => {
            // One sheet per page, next to its PNG.
            let textures = page_names(atlas, name);
            for (page, texture) in atlas.pages.iter().zip(&textures) {
                let sheet = sprite_packer_core::to_tpsheet(page, texture);
                let sheet_path = if atlas.pages.len() == 1 {
                    out_dir.join(format!("{}.tpsheet", name))
                } else {
                    out_dir.join(format!("{}_{}.tpsheet", name, page.id))
                };
                fs::write(&sheet_path, sheet)
                    .with_context(|| format!("write {}", sheet_path.display()))?;
                info!(?sheet_path, id = page.id, "sheet written");
            }
        }
        // Accept "json" as an alias of "json-array".
        "json-array" | "json" => {
            let json_path = out_dir.join(format!("{}.json", name));
            let json_value = sprite_packer_core::to_json_array(atlas);
            let json = serde_json::to_string_pretty(&json_value)?;
            fs::write(&json_path, json)
                .with_context(|| format!("write {}", json_path.display()))?;
            info!(?json_path, pages = atlas.pages.len(), "atlas written");
        }
        "json-hash" => {
            let json_path = out_dir.join(format!("{}.json", name));
            let json_value = sprite_packer_core::to_json_hash(atlas);
            let json = serde_json::to_string_pretty(&json_value)?;
            fs::write(&json_path, json)
                .with_context(|| format!("write {}", json_path.display()))?;
            info!(?json_path, pages = atlas.pages.len(), "atlas written");
        }
        other => anyhow::bail!("unknown metadata format: {}", other),
    }
    Ok(())
}

fn write_stats(
    stats: &sprite_packer_core::PackStats,
    stats_path: &Path,
    dry_run: bool,
) -> anyhow::Result<()> {
    let value = serde_json::json!({
        "pages": stats.num_pages,
        "placed": stats.num_placements,
        "rejected": stats.num_rejected,
        "used_area": stats.used_area,
        "total_area": stats.total_page_area,
        "occupancy": stats.occupancy,
    });
    if dry_run {
        println!("{}", stats.summary());
    } else {
        fs::write(stats_path, serde_json::to_string_pretty(&value)?)
            .with_context(|| format!("write {}", stats_path.display()))?;
        info!(?stats_path, "stats exported");
    }
    Ok(())
}

fn report_rejects(rejected: &[sprite_packer_core::Rejected]) {
    for r in rejected {
        warn!(key = %r.key, reason = %r.reason, "sprite not placed");
    }
}

fn gather_paths(
    inputs: &[PathBuf],
    include: &[String],
    exclude: &[String],
) -> anyhow::Result<Vec<(PathBuf, PathBuf)>> {
    let mut inc_set = None;
    if !include.is_empty() {
        let mut b = GlobSetBuilder::new();
        for pat in include {
            b.add(Glob::new(pat)?);
        }
        inc_set = Some(b.build()?);
    }
    let mut exc_set = None;
    if !exclude.is_empty() {
        let mut b = GlobSetBuilder::new();
        for pat in exclude {
            b.add(Glob::new(pat)?);
        }
        exc_set = Some(b.build()?);
    }
    // (root, file) pairs; the root anchors key derivation.
    let mut list: Vec<(PathBuf, PathBuf)> = Vec::new();
    for input in inputs {
        if input.is_file() {
            if !should_skip(input, inc_set.as_ref(), exc_set.as_ref()) && is_image(input) {
                list.push((input.clone(), input.clone()));
            }
        } else if input.is_dir() {
            for entry in WalkDir::new(input).into_iter().filter_map(|e| e.ok()) {
                let p = entry.path();
                if p.is_file() && !should_skip(p, inc_set.as_ref(), exc_set.as_ref()) && is_image(p)
                {
                    list.push((input.clone(), p.to_path_buf()));
                }
            }
        } else {
            warn!(path = %input.display(), "input path not found");
        }
    }
    Ok(list)
}

fn should_skip(
    p: &Path,
    include: Option<&globset::GlobSet>,
    exclude: Option<&globset::GlobSet>,
) -> bool {
    let s = p.to_string_lossy().replace('\\', "/");
    if let Some(ex) = exclude {
        if ex.is_match(&s) {
            return true;
        }
    }
    if let Some(inc) = include {
        if !inc.is_match(&s) {
            return true;
        }
    }
    false
}

fn is_image(p: &Path) -> bool {
    matches!(
        p.extension()
            .and_then(|e| e.to_str())
            .map(|s| s.to_ascii_lowercase()),
        Some(ext) if matches!(ext.as_str(), "png" | "jpg" | "jpeg" | "bmp" | "tga" | "tif" | "tiff" | "webp")
    )
}

/// Derive a unique sprite key from the path: relative to its input root, path
/// separators folded to `_`, extension dropped, `_N` appended on collision.
fn sprite_key(root: &Path, file: &Path, seen: &mut HashSet<String>) -> String {
    let rel = if root == file {
        Path::new(file.file_name().unwrap_or(file.as_os_str()))
    } else {
        file.strip_prefix(root).unwrap_or(file)
    };
    let stem = rel.with_extension("");
    let base = stem
        .to_string_lossy()
        .replace(['\\', '/'], "_")
        .trim_start_matches('_')
        .to_string();
    let base = if base.is_empty() { "sprite".to_string() } else { base };

    let mut name = base.clone();
    let mut counter = 1;
    while !seen.insert(name.clone()) {
        name = format!("{}_{}", base, counter);
        counter += 1;
    }
    name
}

fn load_images_with_progress(
    paths: &[(PathBuf, PathBuf)],
    progress: bool,
) -> anyhow::Result<Vec<InputImage>> {
    use indicatif::{ProgressBar, ProgressStyle};
    let bar = if progress {
        let b = ProgressBar::new(paths.len() as u64);
        b.set_style(
            ProgressStyle::with_template(
                "{spinner:.green} loading {pos}/{len} [{elapsed_precise}] {wide_msg}",
            )
            .unwrap(),
        );
        Some(b)
    } else {
        None
    };
    let mut seen = HashSet::new();
    let mut list = Vec::with_capacity(paths.len());
    for (root, p) in paths {
        let msg = p.file_name().and_then(|s| s.to_str()).unwrap_or("");
        if let Some(b) = &bar {
            b.set_message(msg.to_string());
        }
        match load_image(p) {
            Ok(img) => {
                let key = sprite_key(root, p, &mut seen);
                list.push(InputImage { key, image: img });
            }
            Err(e) => {
                error!(?p, error = %e, "skip image");
            }
        }
        if let Some(b) = &bar {
            b.inc(1);
        }
    }
    if let Some(b) = &bar {
        b.finish_and_clear();
    }
    Ok(list)
}

fn load_image(p: &Path) -> anyhow::Result<DynamicImage> {
    let mut decoder = ImageReader::open(p)?.with_guessed_format()?.into_decoder()?;
    // Apply EXIF orientation at decode time so packed dimensions match what
    // the user sees in a viewer.
    let orientation = decoder.orientation().unwrap_or(Orientation::NoTransforms);
    let mut img = DynamicImage::from_decoder(decoder)?;
    img.apply_orientation(orientation);
    Ok(img)
}

fn init_tracing_with_level(quiet: bool, verbose: u8) {
    let level = if quiet {
        "error".to_string()
    } else {
        match verbose {
            0 => "info".into(),
            1 => "debug".into(),
            _ => "trace".into(),
        }
    };
    let _ = tracing_subscriber::fmt()
        .with_env_filter(level)
        .with_target(false)
        .try_init();
}

#[derive(Debug, Deserialize, Default)]
struct YamlConfig {
    max_size: Option<u32>,
    alignment: Option<u32>,
}

impl YamlConfig {
    fn into_packer_config(self, mut cfg: PackerConfig) -> PackerConfig {
        if let Some(v) = self.max_size {
            cfg.max_size = v;
        }
        if let Some(v) = self.alignment {
            cfg.alignment = v;
        }
        cfg
    }
}
