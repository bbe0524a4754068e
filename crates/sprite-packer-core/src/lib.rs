//! Core library for packing sprite images into atlas canvases.
//!
//! - Engine: guillotine splitting with best-area-fit selection over a
//!   disjoint free-rect partition, with free-rect coalescing after every
//!   placement and multi-canvas sequencing when a canvas fills up.
//! - Pipeline: `pack_images` takes in-memory images and returns pages +
//!   metadata; `pack_layout` computes placements only.
//! - Data model is serde-serializable; exporters cover JSON and Unity
//!   `.tpsheet`.
//!
//! Quick example:
//! ```ignore
//! use image::ImageReader;
//! use sprite_packer_core::{InputImage, PackerConfig, pack_images};
//! # fn main() -> anyhow::Result<()> {
//! let img1 = ImageReader::open("a.png")?.decode()?;
//! let img2 = ImageReader::open("b.png")?.decode()?;
//! let inputs = vec![
//!   InputImage { key: "a".into(), image: img1 },
//!   InputImage { key: "b".into(), image: img2 },
//! ];
//! let cfg = PackerConfig { max_size: 1024, ..Default::default() };
//! let out = pack_images(inputs, cfg)?;
//! println!("pages: {}", out.atlas.pages.len());
//! # Ok(()) }
//! ```

pub mod compositing;
pub mod config;
pub mod error;
pub mod export;
pub mod export_tpsheet;
pub mod model;
pub mod packer;
pub mod pipeline;
pub mod sequencer;

pub use config::*;
pub use error::*;
pub use export::*;
pub use export_tpsheet::*;
pub use model::*;
pub use pipeline::*;

/// Convenience prelude for common types and functions.
/// Importing `sprite_packer_core::prelude::*` brings the primary APIs into
/// scope.
pub mod prelude {
    pub use crate::config::{PackerConfig, PackerConfigBuilder};
    pub use crate::model::{
        Atlas, Meta, PackStats, Page, Placement, Rect, RejectReason, Rejected,
    };
    pub use crate::packer::GuillotinePacker;
    pub use crate::sequencer::CanvasSequencer;
    pub use crate::{InputImage, OutputPage, PackOutput, pack_images, pack_layout};
}
