use crate::config::PackerConfig;
use crate::error::{Result, SpritePackerError};
use crate::model::{Atlas, Meta};
use crate::sequencer::CanvasSequencer;
use image::{DynamicImage, RgbaImage};
use std::collections::HashMap;
use tracing::{info, instrument};

/// In-memory image to pack (key + decoded image).
pub struct InputImage {
    pub key: String,
    pub image: DynamicImage,
}

/// Output RGBA page and its logical page record.
pub struct OutputPage {
    pub page: crate::model::Page,
    pub rgba: RgbaImage,
}

/// Output of a packing run: atlas metadata and RGBA pages.
pub struct PackOutput {
    pub atlas: Atlas,
    pub pages: Vec<OutputPage>,
}

impl PackOutput {
    /// Computes packing statistics for this output.
    /// This is a convenience method that delegates to `atlas.stats()`.
    pub fn stats(&self) -> crate::model::PackStats {
        self.atlas.stats()
    }
}

#[instrument(skip_all)]
/// Packs `inputs` into atlas pages using configuration `cfg` and returns
/// metadata and RGBA pages.
///
/// Notes:
/// - Inputs are stable-sorted by descending area; equal areas keep input
///   order, so results are deterministic.
/// - Oversized and zero-dimension inputs are reported in `atlas.rejected`
///   rather than failing the run.
pub fn pack_images(inputs: Vec<InputImage>, cfg: PackerConfig) -> Result<PackOutput> {
    cfg.validate()?;

    if inputs.is_empty() {
        return Err(SpritePackerError::Empty);
    }

    let mut rgba_map: HashMap<String, RgbaImage> = HashMap::with_capacity(inputs.len());
    let mut sized: Vec<(String, u32, u32)> = Vec::with_capacity(inputs.len());
    for inp in inputs {
        let rgba = inp.image.to_rgba8();
        let (w, h) = rgba.dimensions();
        sized.push((inp.key.clone(), w, h));
        rgba_map.insert(inp.key, rgba);
    }
    sort_by_area_desc(&mut sized);

    let mut seq = CanvasSequencer::new(cfg.clone());
    for (key, w, h) in sized {
        seq.push(key, w, h);
    }
    let (pages, rejected) = seq.finish();

    let mut out_pages: Vec<OutputPage> = Vec::with_capacity(pages.len());
    for page in &pages {
        let mut canvas = RgbaImage::new(page.width, page.height);
        for pl in &page.placements {
            if let Some(src) = rgba_map.get(&pl.key) {
                crate::compositing::blit_rgba(src, &mut canvas, pl.frame.x, pl.frame.y);
            }
        }
        out_pages.push(OutputPage {
            page: page.clone(),
            rgba: canvas,
        });
    }

    let atlas = Atlas {
        pages,
        rejected,
        meta: make_meta(&cfg),
    };
    info!(
        pages = atlas.pages.len(),
        rejected = atlas.rejected.len(),
        "packed"
    );
    Ok(PackOutput {
        atlas,
        pages: out_pages,
    })
}

/// Packs sizes into pages without compositing pixel data.
/// Inputs are (key, width, height). Returns an Atlas with pages, rejects and
/// metadata; no RGBA pages.
pub fn pack_layout<K: Into<String>>(
    inputs: Vec<(K, u32, u32)>,
    cfg: PackerConfig,
) -> Result<Atlas> {
    cfg.validate()?;

    if inputs.is_empty() {
        return Err(SpritePackerError::Empty);
    }
    let mut sized: Vec<(String, u32, u32)> = inputs
        .into_iter()
        .map(|(k, w, h)| (k.into(), w, h))
        .collect();
    sort_by_area_desc(&mut sized);

    let mut seq = CanvasSequencer::new(cfg.clone());
    for (key, w, h) in sized {
        seq.push(key, w, h);
    }
    let (pages, rejected) = seq.finish();

    Ok(Atlas {
        pages,
        rejected,
        meta: make_meta(&cfg),
    })
}

// Stable sort keyed on area alone; equal areas keep input order. No secondary
// name key: placement depends on it.
fn sort_by_area_desc(items: &mut [(String, u32, u32)]) {
    items.sort_by(|a, b| {
        let area_a = a.1 as u64 * a.2 as u64;
        let area_b = b.1 as u64 * b.2 as u64;
        area_b.cmp(&area_a)
    });
}

fn make_meta(cfg: &PackerConfig) -> Meta {
    Meta {
        schema_version: "1".into(),
        app: "sprite-packer".into(),
        version: env!("CARGO_PKG_VERSION").into(),
        max_size: cfg.max_size,
        alignment: cfg.alignment,
    }
}
