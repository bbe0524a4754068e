use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use sprite_packer_core::model::Rect;
use sprite_packer_core::packer::GuillotinePacker;

fn overlaps(a: &Rect, b: &Rect) -> bool {
    !(a.x >= b.x + b.w || b.x >= a.x + a.w || a.y >= b.y + b.h || b.y >= a.y + a.h)
}

fn assert_exact_partition(p: &GuillotinePacker, placed: &[Rect]) {
    let size = p.size();
    let mut all: Vec<Rect> = placed.to_vec();
    all.extend_from_slice(p.free_rects());

    for r in &all {
        assert!(r.w > 0 && r.h > 0, "degenerate rect {:?}", r);
        assert!(
            r.x + r.w <= size && r.y + r.h <= size,
            "rect {:?} outside canvas",
            r
        );
    }
    for i in 0..all.len() {
        for j in (i + 1)..all.len() {
            assert!(
                !overlaps(&all[i], &all[j]),
                "overlap between {:?} and {:?}",
                all[i],
                all[j]
            );
        }
    }
    let total: u64 = all.iter().map(|r| r.area()).sum();
    assert_eq!(total, size as u64 * size as u64, "gap in the partition");
}

#[test]
fn free_and_placed_tile_the_canvas_after_every_insert() {
    let mut rng = StdRng::seed_from_u64(7);
    let mut p = GuillotinePacker::new(128);
    let mut placed: Vec<Rect> = Vec::new();

    for _ in 0..200 {
        let w = rng.gen_range(1..=40);
        let h = rng.gen_range(1..=40);
        if let Some((x, y)) = p.insert(w, h) {
            placed.push(Rect::new(x, y, w, h));
        }
        assert_exact_partition(&p, &placed);
    }
    assert!(!placed.is_empty());
}

#[test]
fn random_sequences_are_reproducible() {
    let sizes: Vec<(u32, u32)> = {
        let mut rng = StdRng::seed_from_u64(99);
        (0..150)
            .map(|_| (rng.gen_range(1..=30), rng.gen_range(1..=30)))
            .collect()
    };

    let run = |sizes: &[(u32, u32)]| {
        let mut p = GuillotinePacker::new(96);
        let placements: Vec<Option<(u32, u32)>> =
            sizes.iter().map(|&(w, h)| p.insert(w, h)).collect();
        let free: Vec<Rect> = p.free_rects().to_vec();
        (placements, free)
    };

    assert_eq!(run(&sizes), run(&sizes));
}
