use anyhow::Result;
use criterion::{black_box, criterion_group, criterion_main, Criterion};
use strata_core::charts::{AgeCount, PopulationPyramid, ScatterPlot};
use strata_core::{Chart, ChartConfig, Decimal};

fn config() -> ChartConfig {
    let mut config = ChartConfig::default().with_size(800, 500);
    config.draw_text = false;
    config
}

fn bench_render(c: &mut Criterion) {
    let mut group = c.benchmark_group("render_png_bytes");

    group.bench_function("pyramid_100_ages", |b| {
        let ages = (0..100u32)
            .map(|a| AgeCount::new(a, Decimal::from(1000 - a * 9), Decimal::from(1000 - a * 8)))
            .collect();
        let chart = Chart::new(PopulationPyramid::new(ages).expect("ages").with_open_age(85).expect("open age"), config());
        b.iter(|| -> Result<()> {
            black_box(chart.render_to_png_bytes()?);
            Ok(())
        });
    });

    group.bench_function("scatter_5000", |b| {
        let points = (0..5000i64).map(|i| (Decimal::from(i), Decimal::from((i * 7919) % 1000))).collect();
        let chart = Chart::new(ScatterPlot::new(points).expect("points"), config());
        b.iter(|| -> Result<()> {
            black_box(chart.render_to_png_bytes()?);
            Ok(())
        });
    });

    group.finish();
}

criterion_group!(benches, bench_render);
criterion_main!(benches);
