use anyhow::Result;
use criterion::{black_box, criterion_group, criterion_main, Criterion};
use strata_core::charts::{LineChart, LineSeries};
use strata_core::{Chart, ChartConfig, Decimal, MonoMetrics};

fn build_chart(n: i64) -> Chart<LineChart> {
    let points = (0..n).map(|i| (Decimal::from(i), Decimal::from((i * 37) % 101 - 50)));
    let config = ChartConfig::default()
        .with_size(800, 500)
        .with_title("Layout benchmark")
        .with_labels("Sample", "Value")
        .with_y_increment(Decimal::ONE);
    Chart::new(LineChart::new(vec![LineSeries::new("series", points)]).expect("points"), config)
}

fn bench_layout(c: &mut Criterion) {
    let mut group = c.benchmark_group("layout_mono_metrics");
    for &n in &[1_000i64, 10_000] {
        group.bench_function(format!("line_{n}"), |b| {
            let chart = build_chart(n);
            b.iter(|| -> Result<()> {
                let layout = chart.layout(MonoMetrics::default())?;
                black_box(layout);
                Ok(())
            });
        });
    }
    group.finish();
}

criterion_group!(benches, bench_layout);
criterion_main!(benches);
