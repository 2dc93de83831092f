// Copyright 2025 the Overstory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

use criterion::{BatchSize, Criterion, Throughput, black_box, criterion_group, criterion_main};
use overstory_bvh::{Aabb2D, Bvh, LeafId};

#[derive(Clone)]
struct Rng(u64);

impl Rng {
    fn new(seed: u64) -> Self {
        Self(seed)
    }
    fn next_u64(&mut self) -> u64 {
        let mut x = self.0;
        x ^= x << 13;
        x ^= x >> 7;
        x ^= x << 17;
        self.0 = x;
        x
    }
    fn next_f32(&mut self) -> f32 {
        let v = self.next_u64() >> 40;
        (v as f32) / ((1u64 << 24) as f32)
    }
}

fn gen_random_boxes(count: usize, extent: f32, w: f32, h: f32) -> Vec<Aabb2D<f32>> {
    let mut out = Vec::with_capacity(count);
    let mut rng = Rng::new(0xCAFE_F00D_DEAD_BEEF);
    for _ in 0..count {
        let x0 = rng.next_f32() * (extent - w).max(1.0);
        let y0 = rng.next_f32() * (extent - h).max(1.0);
        out.push(Aabb2D::<f32>::from_xywh(x0, y0, w, h));
    }
    out
}

fn gen_sorted_row(count: usize, pitch: f32, size: f32) -> Vec<Aabb2D<f32>> {
    let mut out = Vec::with_capacity(count);
    for i in 0..count {
        out.push(Aabb2D::<f32>::from_xywh(i as f32 * pitch, 0.0, size, size));
    }
    out
}

fn build(boxes: &[Aabb2D<f32>]) -> (Bvh<f32>, Vec<LeafId>) {
    let mut tree: Bvh<f32> = Bvh::new();
    let ids = boxes.iter().map(|b| tree.insert(*b)).collect();
    (tree, ids)
}

fn bench_build(c: &mut Criterion) {
    let mut group = c.benchmark_group("build");
    for &n in &[100_usize, 1000] {
        group.throughput(Throughput::Elements(n as u64));

        let random = gen_random_boxes(n, 2000.0, 12.0, 12.0);
        group.bench_function(format!("random_{n}"), |b| {
            b.iter(|| {
                let (tree, _ids) = build(black_box(&random));
                black_box(tree.len())
            });
        });

        // Ascending input is the worst case for a greedy build; this mostly
        // measures the rotation pass.
        let sorted = gen_sorted_row(n, 10.0, 6.0);
        group.bench_function(format!("sorted_{n}"), |b| {
            b.iter(|| {
                let (tree, _ids) = build(black_box(&sorted));
                black_box(tree.len())
            });
        });
    }
    group.finish();
}

fn bench_update_churn(c: &mut Criterion) {
    let mut group = c.benchmark_group("update_churn");
    for &n in &[100_usize, 1000] {
        let boxes = gen_random_boxes(n, 2000.0, 12.0, 12.0);
        let (tree, ids) = build(&boxes);
        group.throughput(Throughput::Elements(n as u64));
        group.bench_function(format!("move_all_{n}"), |b| {
            b.iter_batched(
                || (tree.clone(), ids.clone()),
                |(mut tree, ids)| {
                    for (i, id) in ids.into_iter().enumerate() {
                        let shift = (i % 7) as f32 * 3.0;
                        let bx = boxes[i];
                        let moved = Aabb2D::new(
                            bx.min_x + shift,
                            bx.min_y + shift,
                            bx.max_x + shift,
                            bx.max_y + shift,
                        );
                        let _ = tree.update(id, moved).expect("live handle");
                    }
                    black_box(tree.len())
                },
                BatchSize::SmallInput,
            );
        });
    }
    group.finish();
}

fn bench_drain(c: &mut Criterion) {
    let mut group = c.benchmark_group("drain");
    for &n in &[100_usize, 1000] {
        let boxes = gen_random_boxes(n, 2000.0, 12.0, 12.0);
        let (tree, ids) = build(&boxes);
        group.throughput(Throughput::Elements(n as u64));
        group.bench_function(format!("remove_all_{n}"), |b| {
            b.iter_batched(
                || (tree.clone(), ids.clone()),
                |(mut tree, ids)| {
                    for id in ids {
                        tree.remove(id).expect("live handle");
                    }
                    black_box(tree.is_empty())
                },
                BatchSize::SmallInput,
            );
        });
    }
    group.finish();
}

criterion_group!(benches, bench_build, bench_update_churn, bench_drain);
criterion_main!(benches);
