use criterion::{black_box, criterion_group, criterion_main, Criterion, BenchmarkId};
use stego_scan_rs::steganalysis::{
    channel::channel_statistics, ChannelAnalyzer, ColorMode, ImageSample,
};
use std::path::PathBuf;

fn generate_mock_sample(width: u32, height: u32) -> ImageSample {
    let mut pixels = Vec::with_capacity((width * height * 3) as usize);
    for y in 0..height {
        for x in 0..width {
            let value = ((x * 7 + y * 13) % 256) as u8;
            pixels.extend_from_slice(&[value, value.wrapping_add(85), value.wrapping_add(170)]);
        }
    }

    ImageSample {
        path: PathBuf::from("bench.png"),
        file_name: "bench.png".to_string(),
        width,
        height,
        pixels,
        format: Some("PNG".to_string()),
        mode: ColorMode::Rgb,
        size_bytes: 0,
    }
}

fn benchmark_statistics_by_size(c: &mut Criterion) {
    let mut group = c.benchmark_group("channel_statistics_by_size");

    let sizes = vec![
        (100, 100, "100x100"),
        (500, 500, "500x500"),
        (2000, 2000, "2000x2000"),
    ];

    for (width, height, label) in sizes {
        let sample = generate_mock_sample(width, height);

        group.bench_with_input(
            BenchmarkId::from_parameter(label),
            &sample,
            |b, sample| {
                b.iter(|| channel_statistics(black_box(sample)));
            },
        );
    }

    group.finish();
}

fn benchmark_full_analysis(c: &mut Criterion) {
    let sample = generate_mock_sample(1000, 1000);
    let analyzer = ChannelAnalyzer::new();

    c.bench_function("analyze_sample_1000x1000", |b| {
        b.iter(|| analyzer.analyze_sample(black_box(&sample)));
    });
}

criterion_group!(
    benches,
    benchmark_statistics_by_size,
    benchmark_full_analysis
);
criterion_main!(benches);
