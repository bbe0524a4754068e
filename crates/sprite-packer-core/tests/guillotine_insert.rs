use sprite_packer_core::model::Rect;
use sprite_packer_core::packer::GuillotinePacker;

#[test]
fn first_insert_splits_into_right_and_bottom_remainders() {
    let mut p = GuillotinePacker::new(10);
    assert_eq!(p.insert(4, 4), Some((0, 0)));
    // Right piece first, then bottom; different dimensions, so no merge.
    assert_eq!(
        p.free_rects(),
        [Rect::new(4, 0, 6, 4), Rect::new(0, 4, 10, 6)]
    );
}

#[test]
fn exact_fit_empties_the_free_list() {
    let mut p = GuillotinePacker::new(10);
    assert_eq!(p.insert(10, 10), Some((0, 0)));
    assert!(p.free_rects().is_empty());
}

#[test]
fn insert_larger_than_canvas_fails() {
    let mut p = GuillotinePacker::new(4);
    assert_eq!(p.insert(5, 5), None);
    assert_eq!(p.free_rects(), [Rect::new(0, 0, 4, 4)]);
}

#[test]
fn split_remainder_coalesces_with_leftover_column() {
    let mut p = GuillotinePacker::new(10);
    assert_eq!(p.insert(4, 4), Some((0, 0)));
    assert_eq!(p.insert(4, 6), Some((0, 4)));
    // The new right remainder (4,4,6,6) joins the column above it.
    assert_eq!(p.free_rects(), [Rect::new(4, 0, 6, 10)]);
    assert_eq!(p.free_area(), 60);
}

#[test]
fn best_area_fit_prefers_the_tighter_free_rect() {
    let mut p = GuillotinePacker::new(10);
    assert_eq!(p.insert(4, 4), Some((0, 0)));
    // Candidates: (4,0,6,4) wastes 8, (0,4,10,6) wastes 44.
    assert_eq!(p.insert(4, 4), Some((4, 0)));
}

#[test]
fn identical_insert_sequences_yield_identical_state() {
    let sizes = [(4u32, 4u32), (3, 6), (6, 3), (2, 2), (5, 1)];
    let mut a = GuillotinePacker::new(16);
    let mut b = GuillotinePacker::new(16);
    let placed_a: Vec<_> = sizes.iter().map(|&(w, h)| a.insert(w, h)).collect();
    let placed_b: Vec<_> = sizes.iter().map(|&(w, h)| b.insert(w, h)).collect();
    assert_eq!(placed_a, placed_b);
    assert_eq!(a.free_rects(), b.free_rects());
}
