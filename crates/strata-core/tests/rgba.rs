// File: crates/strata-core/tests/rgba.rs
// Purpose: Validate RGBA rendering buffer shape and a few pixels.

use strata_core::charts::ScatterPlot;
use strata_core::{Chart, ChartConfig, Decimal};

#[test]
fn render_rgba8_buffer() {
    let points = vec![(Decimal::ZERO, Decimal::ZERO), (Decimal::from(4), Decimal::from(4))];
    let mut config = ChartConfig::default().with_size(100, 100);
    config.draw_text = false; // avoid font variance
    let chart = Chart::new(ScatterPlot::new(points).unwrap(), config);

    let (px, w, h, stride) = chart.render_to_rgba8().expect("rgba render");
    assert_eq!(w as usize * h as usize * 4, px.len());
    assert_eq!(stride, (w as usize) * 4);

    // Check background alpha in top-left pixel (RGBA)
    assert_eq!(px[3], 255);

    // Just inside the border is plain background
    let bg = chart.config.theme.background;
    let i = stride + 4;
    assert_eq!(&px[i..i + 3], &[bg.r(), bg.g(), bg.b()]);
}
