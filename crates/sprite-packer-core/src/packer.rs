use crate::model::Rect;

/// Free-space tracker for a single square canvas.
///
/// Holds a disjoint guillotine partition of the unoccupied area: free rects
/// never overlap, and together with the placed rects they tile the canvas
/// exactly. Placements are final; nothing is ever relocated.
pub struct GuillotinePacker {
    size: u32,
    free: Vec<Rect>,
}

impl GuillotinePacker {
    pub fn new(size: u32) -> Self {
        Self {
            size,
            free: vec![Rect::new(0, 0, size, size)],
        }
    }

    /// Canvas capacity (width and height).
    pub fn size(&self) -> u32 {
        self.size
    }

    /// Currently free regions, in tracker order.
    pub fn free_rects(&self) -> &[Rect] {
        &self.free
    }

    /// Total unoccupied area.
    pub fn free_area(&self) -> u64 {
        self.free.iter().map(|r| r.area()).sum()
    }

    /// Place a `w` x `h` rectangle, returning its top-left corner, or `None`
    /// when no free rect is large enough.
    ///
    /// Selection is best-area-fit over the free list; equal-waste ties go to
    /// the earliest candidate in list order. The chosen rect is removed and
    /// its leftover space re-enters the list as up to two guillotine pieces
    /// (right of the placement, then below it), after which adjacent pieces
    /// are coalesced.
    pub fn insert(&mut self, w: u32, h: u32) -> Option<(u32, u32)> {
        debug_assert!(w > 0 && h > 0);
        let want = w as u64 * h as u64;
        let mut best_idx = None;
        let mut best_waste = u64::MAX;
        for (i, fr) in self.free.iter().enumerate() {
            if fr.w >= w && fr.h >= h {
                let waste = fr.area() - want;
                if waste < best_waste {
                    best_waste = waste;
                    best_idx = Some(i);
                }
            }
        }
        let idx = best_idx?;
        // Order-preserving removal; list order is the tie-break key.
        let chosen = self.free.remove(idx);

        if chosen.w > w {
            self.free
                .push(Rect::new(chosen.x + w, chosen.y, chosen.w - w, h));
        }
        if chosen.h > h {
            self.free
                .push(Rect::new(chosen.x, chosen.y + h, chosen.w, chosen.h - h));
        }
        self.coalesce();
        Some((chosen.x, chosen.y))
    }

    /// Merge edge-adjacent, dimension-matched free rects.
    ///
    /// Single forward sweep: rect `i` keeps absorbing later matches until
    /// none is left, then the sweep advances. Deliberately not iterated to a
    /// fixed point; the two-piece splits above never need one, and placement
    /// output depends on this exact order.
    fn coalesce(&mut self) {
        let mut i = 0;
        while i < self.free.len() {
            let mut merged = false;
            let mut j = i + 1;
            while j < self.free.len() {
                if self.free[i].is_mergeable_with(&self.free[j]) {
                    self.free[i] = self.free[i].merge(&self.free[j]);
                    self.free.remove(j);
                    merged = true;
                    break;
                }
                j += 1;
            }
            if !merged {
                i += 1;
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn equal_waste_tie_goes_to_earliest_candidate() {
        let mut p = GuillotinePacker::new(10);
        p.free = vec![Rect::new(0, 5, 5, 5), Rect::new(5, 5, 5, 5)];
        assert_eq!(p.insert(5, 5), Some((0, 5)));
        assert_eq!(p.free_rects(), [Rect::new(5, 5, 5, 5)]);
    }

    #[test]
    fn removal_preserves_order_of_remaining_rects() {
        let mut p = GuillotinePacker::new(10);
        p.free = vec![
            Rect::new(0, 0, 3, 3),
            Rect::new(0, 4, 2, 2),
            Rect::new(5, 5, 3, 3),
        ];
        // The 2x2 wins on waste; the outer rects must keep their order.
        assert_eq!(p.insert(2, 2), Some((0, 4)));
        assert_eq!(
            p.free_rects(),
            [Rect::new(0, 0, 3, 3), Rect::new(5, 5, 3, 3)]
        );
    }

    #[test]
    fn coalesce_is_idempotent() {
        let mut p = GuillotinePacker::new(12);
        p.free = vec![
            Rect::new(0, 0, 4, 6),
            Rect::new(4, 0, 8, 6),
            Rect::new(0, 6, 12, 3),
            Rect::new(0, 9, 12, 3),
        ];
        p.coalesce();
        let once = p.free.clone();
        p.coalesce();
        assert_eq!(p.free, once);
    }

    #[test]
    fn sweep_lets_one_rect_absorb_several_neighbors() {
        let mut p = GuillotinePacker::new(12);
        p.free = vec![
            Rect::new(0, 0, 4, 12),
            Rect::new(4, 0, 4, 12),
            Rect::new(8, 0, 4, 12),
        ];
        p.coalesce();
        assert_eq!(p.free, vec![Rect::new(0, 0, 12, 12)]);
    }

    #[test]
    fn touching_without_matching_dimension_does_not_merge() {
        let mut p = GuillotinePacker::new(10);
        p.free = vec![Rect::new(4, 0, 6, 4), Rect::new(0, 4, 10, 6)];
        p.coalesce();
        assert_eq!(p.free.len(), 2);
    }
}
