//! Benchmarks for border reflow and splitter resizing.
//!
//! Run with: cargo bench -p litext-layout

use criterion::{BenchmarkId, Criterion, criterion_group, criterion_main};
use litext_layout::splitter::resize;
use litext_layout::{BorderLayout, Region, RegionBounds, RegionInput, Size};
use std::hint::black_box;

fn regions(collapsed_mask: u8) -> Vec<RegionInput> {
    Region::REFLOW_ORDER
        .iter()
        .enumerate()
        .map(|(i, region)| {
            RegionInput::new(*region)
                .collapsed(collapsed_mask & (1 << i) != 0)
                .rendered(Size::new(120, 40))
        })
        .collect()
}

fn bench_reflow(c: &mut Criterion) {
    let mut group = c.benchmark_group("layout/border");

    for (name, mask) in [("all_expanded", 0u8), ("sides_collapsed", 0b0_1100)] {
        let inputs = regions(mask);
        group.bench_with_input(BenchmarkId::new("compute", name), &inputs, |b, inputs| {
            b.iter(|| black_box(BorderLayout::compute(black_box(inputs))));
        });
        let layout = BorderLayout::compute(&inputs);
        group.bench_with_input(BenchmarkId::new("resolve", name), &layout, |b, layout| {
            b.iter(|| black_box(layout.resolve(black_box(Size::new(1280, 720)))));
        });
    }

    group.finish();
}

fn bench_drag_tick(c: &mut Criterion) {
    let bounds = RegionBounds::default().with_width(Some(50), Some(400));
    c.bench_function("layout/splitter/drag_tick", |b| {
        b.iter(|| {
            let width = resize(Region::West, black_box(200), black_box(-37), bounds);
            let inputs = [
                RegionInput::new(Region::West).style_width(width),
                RegionInput::new(Region::Center),
            ];
            black_box(BorderLayout::compute(&inputs))
        });
    });
}

criterion_group!(benches, bench_reflow, bench_drag_tick);
criterion_main!(benches);
