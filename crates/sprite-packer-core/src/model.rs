use serde::{Deserialize, Serialize};

/// Axis-aligned rectangle (pixels). `x,y` is top-left; `w,h` are sizes.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
pub struct Rect {
    pub x: u32,
    pub y: u32,
    pub w: u32,
    pub h: u32,
}

impl Rect {
    pub fn new(x: u32, y: u32, w: u32, h: u32) -> Self {
        Self { x, y, w, h }
    }

    /// Area in pixels, widened to avoid overflow on large canvases.
    pub fn area(&self) -> u64 {
        self.w as u64 * self.h as u64
    }

    /// True if `other` shares a full edge with `self`, so their union is again
    /// a rectangle: same row (equal `y` and `h`) and adjacent in x, or same
    /// column (equal `x` and `w`) and adjacent in y.
    pub fn is_mergeable_with(&self, other: &Rect) -> bool {
        if self.y == other.y && self.h == other.h {
            if self.x + self.w == other.x || other.x + other.w == self.x {
                return true;
            }
        }
        if self.x == other.x && self.w == other.w {
            if self.y + self.h == other.y || other.y + other.h == self.y {
                return true;
            }
        }
        false
    }

    /// Union of two edge-adjacent rectangles. Callers must guard with
    /// [`Rect::is_mergeable_with`] first.
    pub fn merge(&self, other: &Rect) -> Rect {
        debug_assert!(self.is_mergeable_with(other));
        if self.y == other.y && self.h == other.h {
            Rect::new(self.x.min(other.x), self.y, self.w + other.w, self.h)
        } else {
            Rect::new(self.x, self.y.min(other.y), self.w, self.h + other.h)
        }
    }
}

/// Round `v` up to the next multiple of `multiple`.
pub fn align_up(v: u32, multiple: u32) -> u32 {
    debug_assert!(multiple > 0);
    ((v + multiple - 1) / multiple) * multiple
}

/// A placed sprite within a page. The pixel payload stays with the caller and
/// is joined back by `key` when compositing.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Placement {
    /// User-specified key (e.g., filename or asset path).
    pub key: String,
    /// Placed rectangle within the page.
    pub frame: Rect,
}

/// A single closed canvas (logical record). `width`/`height` are the tight
/// bounding box over placements, rounded up to the configured alignment.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Page {
    pub id: usize,
    pub width: u32,
    pub height: u32,
    pub placements: Vec<Placement>,
}

/// Why an input rectangle was not placed.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum RejectReason {
    /// Zero width or height; rejected before reaching the tracker.
    InvalidDimensions { width: u32, height: u32 },
    /// Exceeds canvas capacity in at least one dimension; can never fit.
    Oversized { width: u32, height: u32 },
    /// Failed to fit an empty canvas despite passing the size prefilter;
    /// signals a misconfigured tracker capacity.
    NoCapacity,
}

impl std::fmt::Display for RejectReason {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            RejectReason::InvalidDimensions { width, height } => {
                write!(f, "invalid dimensions {}x{}", width, height)
            }
            RejectReason::Oversized { width, height } => {
                write!(f, "{}x{} exceeds canvas capacity", width, height)
            }
            RejectReason::NoCapacity => write!(f, "does not fit an empty canvas"),
        }
    }
}

/// A rejected input rectangle and the reason it was skipped.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Rejected {
    pub key: String,
    pub reason: RejectReason,
}

/// Atlas-level metadata (common fields used by exporters).
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Meta {
    /// Schema version for JSON metadata formats. String to allow non-integer
    /// versions like "1.0"; current: "1".
    pub schema_version: String,
    pub app: String,
    pub version: String,
    pub max_size: u32,
    pub alignment: u32,
}

/// Atlas of pages, rejects and metadata.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Atlas {
    pub pages: Vec<Page>,
    pub rejected: Vec<Rejected>,
    pub meta: Meta,
}

/// Statistics about atlas packing efficiency.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct PackStats {
    /// Total number of pages in the atlas.
    pub num_pages: usize,
    /// Total number of sprites placed.
    pub num_placements: usize,
    /// Number of input rectangles that could not be placed.
    pub num_rejected: usize,
    /// Total area of all pages (sum of width * height for each page).
    pub total_page_area: u64,
    /// Total area used by placements.
    pub used_area: u64,
    /// Occupancy ratio: used_area / total_page_area (0.0 to 1.0).
    pub occupancy: f64,
}

impl Atlas {
    /// Computes packing statistics for this atlas.
    pub fn stats(&self) -> PackStats {
        let num_pages = self.pages.len();
        let mut num_placements = 0;
        let mut total_page_area = 0u64;
        let mut used_area = 0u64;

        for page in &self.pages {
            total_page_area += (page.width as u64) * (page.height as u64);
            for pl in &page.placements {
                num_placements += 1;
                used_area += pl.frame.area();
            }
        }

        let occupancy = if total_page_area > 0 {
            used_area as f64 / total_page_area as f64
        } else {
            0.0
        };

        PackStats {
            num_pages,
            num_placements,
            num_rejected: self.rejected.len(),
            total_page_area,
            used_area,
            occupancy,
        }
    }
}

impl PackStats {
    /// Returns a human-readable summary of the statistics.
    pub fn summary(&self) -> String {
        format!(
            "Pages: {}, Placed: {}, Rejected: {}, Occupancy: {:.2}%, Total Area: {} px², Used Area: {} px²",
            self.num_pages,
            self.num_placements,
            self.num_rejected,
            self.occupancy * 100.0,
            self.total_page_area,
            self.used_area,
        )
    }

    /// Returns wasted space in pixels.
    pub fn wasted_area(&self) -> u64 {
        self.total_page_area.saturating_sub(self.used_area)
    }
}
