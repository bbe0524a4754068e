use crate::config::PackerConfig;
use crate::model::{Page, Placement, Rect, RejectReason, Rejected, align_up};
use crate::packer::GuillotinePacker;
use tracing::{debug, warn};

/// Drives a stream of rectangles across successive canvases.
///
/// Items must arrive sorted by descending area, ties in original order; the
/// pipeline's stable sort guarantees this. A canvas is closed the first time
/// an item fails to fit, and the item is retried on a fresh one. Unplaceable
/// items are recorded and skipped; a bad rectangle never aborts the run.
pub struct CanvasSequencer {
    cfg: PackerConfig,
    packer: GuillotinePacker,
    placements: Vec<Placement>,
    pages: Vec<Page>,
    rejected: Vec<Rejected>,
}

impl CanvasSequencer {
    pub fn new(cfg: PackerConfig) -> Self {
        let packer = GuillotinePacker::new(cfg.max_size);
        Self {
            cfg,
            packer,
            placements: Vec::new(),
            pages: Vec::new(),
            rejected: Vec::new(),
        }
    }

    /// Place one rectangle on the current canvas, rotating to a fresh canvas
    /// when the current one is out of room.
    pub fn push(&mut self, key: String, w: u32, h: u32) {
        if w == 0 || h == 0 {
            warn!(%key, w, h, "rejected: zero dimension");
            self.rejected.push(Rejected {
                key,
                reason: RejectReason::InvalidDimensions {
                    width: w,
                    height: h,
                },
            });
            return;
        }
        if w > self.cfg.max_size || h > self.cfg.max_size {
            warn!(%key, w, h, max_size = self.cfg.max_size, "rejected: exceeds canvas capacity");
            self.rejected.push(Rejected {
                key,
                reason: RejectReason::Oversized {
                    width: w,
                    height: h,
                },
            });
            return;
        }
        loop {
            if let Some((x, y)) = self.packer.insert(w, h) {
                self.placements.push(Placement {
                    key,
                    frame: Rect::new(x, y, w, h),
                });
                return;
            }
            if self.placements.is_empty() {
                // A size-checked item failed on an empty canvas: the tracker
                // capacity cannot match the configured max_size.
                warn!(%key, w, h, "rejected: does not fit an empty canvas");
                self.rejected.push(Rejected {
                    key,
                    reason: RejectReason::NoCapacity,
                });
                return;
            }
            self.close_page();
        }
    }

    fn close_page(&mut self) {
        let placements = std::mem::take(&mut self.placements);
        let used_w = placements
            .iter()
            .map(|p| p.frame.x + p.frame.w)
            .max()
            .unwrap_or(0);
        let used_h = placements
            .iter()
            .map(|p| p.frame.y + p.frame.h)
            .max()
            .unwrap_or(0);
        let page = Page {
            id: self.pages.len(),
            width: align_up(used_w, self.cfg.alignment),
            height: align_up(used_h, self.cfg.alignment),
            placements,
        };
        debug!(
            id = page.id,
            width = page.width,
            height = page.height,
            placements = page.placements.len(),
            "canvas closed"
        );
        self.pages.push(page);
        self.packer = GuillotinePacker::new(self.cfg.max_size);
    }

    /// Close the final canvas if it holds any placement and hand back pages
    /// plus the rejects, in input order.
    pub fn finish(mut self) -> (Vec<Page>, Vec<Rejected>) {
        if !self.placements.is_empty() {
            self.close_page();
        }
        (self.pages, self.rejected)
    }
}
