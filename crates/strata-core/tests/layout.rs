// File: crates/strata-core/tests/layout.rs
// Purpose: Margin negotiation: title overflow split, monotonic growth and multi-pass convergence.

use strata_core::charts::BarChart;
use strata_core::{Chart, ChartConfig, Decimal, LayoutState, MonoMetrics, PassTrace, RecordingSurface};

fn bar_chart(config: ChartConfig) -> Chart<BarChart> {
    let counts: Vec<Decimal> = [12, 30, 45, 28, 9].into_iter().map(Decimal::from).collect();
    let bars = BarChart::from_counts(Decimal::ZERO, Decimal::TEN, &counts).unwrap().with_series_name("Visits");
    Chart::new(bars, config)
}

#[test]
fn title_overflow_splits_between_left_and_right() {
    let mut layout = LayoutState::new(100, 80);
    assert_eq!(layout.image_size().width, 100);

    assert!(layout.grow_for_title(140, 10, 3.0));
    let m = layout.margins();
    assert_eq!(m.extra_width_right, 20);
    assert_eq!(m.extra_width_left, 20);
    assert_eq!(m.extra_height_top, 30);
    assert_eq!(layout.image_size().width, 140);
    assert_eq!(layout.data_rect().start_col, 20);
}

#[test]
fn odd_title_overflow_gives_left_the_remainder() {
    let mut layout = LayoutState::new(100, 80);
    layout.grow_for_title(141, 10, 3.0);
    assert_eq!(layout.margins().extra_width_right, 20);
    assert_eq!(layout.margins().extra_width_left, 21);
    assert_eq!(layout.image_size().width, 141);
}

#[test]
fn narrow_title_only_reserves_top_margin() {
    let mut layout = LayoutState::new(300, 80);
    layout.grow_for_title(140, 12, 3.0);
    assert_eq!(layout.image_size().width, 300);
    assert_eq!(layout.margins().extra_height_top, 36);
}

#[test]
fn title_margin_absorbs_a_narrower_axis_band() {
    let mut layout = LayoutState::new(100, 80);
    layout.grow_for_title(140, 10, 3.0);
    assert_eq!(layout.grow_y_axis_width(15), 0);
    assert_eq!(layout.image_size().width, 140);
    assert_eq!(layout.data_rect().start_col, 20);

    // only the part beyond the left margin widens the image
    assert_eq!(layout.grow_y_axis_width(50), 30);
    assert_eq!(layout.image_size().width, 170);
    assert_eq!(layout.data_rect().start_col, 50);
    assert_eq!(layout.margins().extra_width_left, 20);
}

#[test]
fn title_after_axis_widens_beyond_the_axis_band() {
    let mut layout = LayoutState::new(100, 80);
    assert_eq!(layout.grow_y_axis_width(30), 30);
    assert!(layout.grow_for_title(170, 10, 3.0));
    assert_eq!(layout.image_size().width, 170);
    assert_eq!(layout.margins().extra_width_right, 20);
    assert_eq!(layout.data_rect().start_col, 50);
}

#[test]
fn margins_never_shrink() {
    let mut layout = LayoutState::new(200, 100);
    assert_eq!(layout.grow_y_axis_width(40), 40);
    assert_eq!(layout.data_rect().start_col, 40);
    assert_eq!(layout.image_size().width, 240);

    assert_eq!(layout.grow_y_axis_width(25), 0);
    assert_eq!(layout.margins().axis_width, 40);

    assert_eq!(layout.grow_x_axis_height(30), 30);
    assert_eq!(layout.image_size().height, 130);
    assert!(!layout.ensure_top(0));
    assert!(layout.ensure_top(12));
    assert!(!layout.ensure_top(8));
    assert_eq!(layout.data_rect().start_row, 12);
    assert_eq!(layout.data_rect().height, 100);

    assert!(layout.grow_for_legend(80, 20));
    assert!(!layout.grow_for_legend(60, 10));
    assert_eq!(layout.image_size().height, 162);
    assert!(layout.ensure_bottom(6));
    assert!(!layout.ensure_bottom(4));
    assert_eq!(layout.image_size().height, 168);
}

#[test]
fn full_pass_grows_monotonically() {
    let config = ChartConfig::default()
        .with_size(300, 200)
        .with_title("Monthly visits to the regional library branches, all services combined")
        .with_labels("Week", "Visits");
    let chart = bar_chart(config);
    let extent = chart.resolved_extent().unwrap();

    let mut surface = RecordingSurface::new(MonoMetrics::default());
    let mut layout = LayoutState::new(300, 200);
    let mut trace = PassTrace::default();
    chart.draw_pass(&mut surface, &mut layout, &extent, &mut trace).unwrap();

    let steps: Vec<&str> = trace.steps.iter().map(|(name, _)| *name).collect();
    assert_eq!(steps, ["start", "outline", "title", "y_axis", "x_axis", "data", "legend"]);
    assert!(trace.is_monotonic());

    let first = trace.steps[0].1;
    let last = trace.steps[trace.steps.len() - 1].1;
    assert!(last.image.width > first.image.width);
    assert!(last.image.height > first.image.height);
    assert_eq!(last.data.width, 300);
    assert_eq!(last.data.height, 200);
}

#[test]
fn layout_converges_to_a_fixed_point() {
    let config = ChartConfig::default().with_size(240, 160).with_title("Visits").with_labels("Week", "Count");
    let chart = bar_chart(config);
    let settled = chart.layout(MonoMetrics::default()).unwrap();

    // another pass from the settled state changes nothing
    let extent = chart.resolved_extent().unwrap();
    let mut surface = RecordingSurface::new(MonoMetrics::default());
    let mut again = settled;
    let mut trace = PassTrace::default();
    chart.draw_pass(&mut surface, &mut again, &extent, &mut trace).unwrap();
    assert_eq!(again, settled);
    assert!(trace.steps.windows(2).all(|w| w[0].1 == w[1].1));
}

#[test]
fn wide_title_sets_image_width() {
    let title = "x".repeat(100);
    let config = ChartConfig::default().with_size(300, 200).with_title(title.clone());
    let chart = bar_chart(config);
    let mut surface = RecordingSurface::new(MonoMetrics::default());
    let (layout, trace) = chart.draw(&mut surface).unwrap();
    assert!(trace.is_monotonic());

    // 100 glyphs at 16px with 0.6 advance, plus 10px padding each side
    assert!(layout.image_size().width >= 960 + 20);
    let (_, x, _) = surface.texts().find(|(t, _, _)| *t == title).unwrap();
    assert_eq!(x, (layout.image_size().width - 960) / 2);
}

#[test]
fn legend_sits_below_axis_band() {
    let chart = bar_chart(ChartConfig::default().with_size(300, 200));
    let mut surface = RecordingSurface::new(MonoMetrics::default());
    let (layout, _) = chart.draw(&mut surface).unwrap();
    let m = *layout.margins();
    assert!(m.legend_height > 0);
    assert_eq!(m.extra_height_bottom, chart.config.label_gap);
    let (_, _, baseline) = surface.texts().find(|(t, _, _)| *t == "Visits").unwrap();
    assert!(baseline > layout.data_rect().end_row + m.axis_height + m.extra_height_bottom);
    assert!(baseline <= layout.image_size().height);
}
