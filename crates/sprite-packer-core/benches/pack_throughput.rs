use criterion::{BenchmarkId, Criterion, Throughput, black_box, criterion_group, criterion_main};
use sprite_packer_core::prelude::*;

fn generate_sprites(count: usize, min_size: u32, max_size: u32) -> Vec<(String, u32, u32)> {
    use rand::Rng;
    let mut rng = rand::thread_rng();
    (0..count)
        .map(|i| {
            let w = rng.gen_range(min_size..=max_size);
            let h = rng.gen_range(min_size..=max_size);
            (format!("sprite_{}", i), w, h)
        })
        .collect()
}

fn bench_insert(c: &mut Criterion) {
    let mut group = c.benchmark_group("insert");

    for count in [50usize, 200, 800] {
        let sizes = generate_sprites(count, 8, 48);
        group.throughput(Throughput::Elements(count as u64));
        group.bench_with_input(BenchmarkId::new("Guillotine", count), &sizes, |b, sizes| {
            b.iter(|| {
                let mut packer = GuillotinePacker::new(2048);
                for (_, w, h) in sizes {
                    let _ = packer.insert(*w, *h);
                }
                black_box(packer.free_area())
            });
        });
    }

    group.finish();
}

fn bench_pack_layout(c: &mut Criterion) {
    let mut group = c.benchmark_group("pack_layout");

    for count in [100usize, 500] {
        let sizes = generate_sprites(count, 8, 96);
        group.throughput(Throughput::Elements(count as u64));
        group.bench_with_input(BenchmarkId::new("multi_page", count), &sizes, |b, sizes| {
            b.iter(|| {
                let cfg = PackerConfig::builder().max_size(512).build();
                let atlas = pack_layout(sizes.clone(), cfg).expect("pack");
                black_box(atlas.stats().occupancy)
            });
        });
    }

    group.finish();
}

criterion_group!(benches, bench_insert, bench_pack_layout);
criterion_main!(benches);
