#![allow(clippy::expect_used, clippy::unwrap_used, missing_docs)]
//! Benchmark for evaluation metrics and plot rendering.

use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};
use evalviz::chart::Axes;
use evalviz::eval::{render_confusion, render_roc, CurveOptions};
use evalviz::metrics::{average_precision_score, roc_curve};

fn sample(n: usize) -> (Vec<u8>, Vec<f32>) {
    let mut state = 0x2545_f491_4f6c_dd1d_u64;
    (0..n)
        .map(|_| {
            state ^= state << 13;
            state ^= state >> 7;
            state ^= state << 17;
            let noise = (state >> 40) as f32 / (1u64 << 24) as f32;
            let label = u8::from(noise > 0.5);
            // Informative but imperfect scores
            (label, 0.6 * noise + 0.4 * f32::from(label) * noise)
        })
        .unzip()
}

fn metric_benchmark(c: &mut Criterion) {
    let mut group = c.benchmark_group("metrics");

    for size in [1_000, 10_000, 100_000] {
        let (labels, scores) = sample(size);

        group.bench_with_input(BenchmarkId::new("roc_curve", size), &size, |b, _| {
            b.iter(|| roc_curve(black_box(&labels), black_box(&scores)).expect("roc should succeed"));
        });
        group.bench_with_input(BenchmarkId::new("average_precision", size), &size, |b, _| {
            b.iter(|| {
                average_precision_score(black_box(&labels), black_box(&scores))
                    .expect("ap should succeed")
            });
        });
    }

    group.finish();
}

fn render_benchmark(c: &mut Criterion) {
    let mut group = c.benchmark_group("render");
    let (labels, scores) = sample(10_000);

    group.bench_function("roc_to_framebuffer", |b| {
        b.iter(|| {
            let mut ax = Axes::new();
            render_roc(black_box(&labels), black_box(&scores), &mut ax, &CurveOptions::new())
                .expect("render should succeed");
            ax.to_framebuffer(800, 600).expect("rasterization should succeed")
        });
    });

    let predicted: Vec<u8> = scores.iter().map(|&s| u8::from(s > 0.4)).collect();
    group.bench_function("confusion_to_svg", |b| {
        b.iter(|| {
            let mut ax = Axes::new();
            render_confusion(black_box(&labels), black_box(&predicted), None, &mut ax)
                .expect("render should succeed");
            ax.to_svg(800, 600).expect("svg should succeed")
        });
    });

    group.finish();
}

criterion_group!(benches, metric_benchmark, render_benchmark);
criterion_main!(benches);
