// File: crates/strata-core/tests/smoke.rs
// Purpose: Basic end-to-end render smoke test writing a PNG.

use strata_core::charts::{LineChart, LineSeries};
use strata_core::{Chart, ChartConfig, Decimal, OutputFormat};

fn line_chart() -> Chart<LineChart> {
    let d = Decimal::from;
    let series = vec![
        LineSeries::new("north", [(d(0), d(0)), (d(1), d(2)), (d(2), d(1)), (d(3), d(4)), (d(4), d(3))]),
        LineSeries::new("south", [(d(0), d(-1)), (d(2), d(2)), (d(4), d(1))]),
    ];
    let config = ChartConfig::default().with_size(320, 200).with_title("Smoke").with_labels("X", "Y");
    Chart::new(LineChart::new(series).unwrap(), config)
}

#[test]
fn render_smoke_png() {
    let chart = line_chart();
    let out = std::path::PathBuf::from("target/test_out/smoke.png");

    let size = chart.render_to_png(&out).expect("render should succeed");
    let meta = std::fs::metadata(&out).expect("output exists");
    assert!(meta.len() > 0, "png should be non-empty");
    assert!(size.width > 320 && size.height > 200);

    // Also verify in-memory API works
    let bytes = chart.render_to_png_bytes().expect("render bytes");
    assert!(bytes.starts_with(&[137, 80, 78, 71]), "should be PNG header");
}

#[test]
fn render_jpeg_and_bmp() {
    let chart = line_chart();
    let jpeg = std::path::PathBuf::from("target/test_out/smoke.jpg");
    chart.render_to_file(&jpeg, OutputFormat::from_path(&jpeg).unwrap()).expect("jpeg");
    let bytes = std::fs::read(&jpeg).expect("read jpeg");
    assert!(bytes.starts_with(&[0xFF, 0xD8]));

    let bmp = chart.render().unwrap().encode(OutputFormat::Bmp).unwrap();
    assert!(bmp.starts_with(b"BM"));
}
