// File: crates/strata-core/tests/mapper.rs
// Purpose: Coordinate mapper round-trips, degenerate guard and unconfigured errors.

use proptest::prelude::*;
use strata_core::{CellSize, ChartError, CoordinateMapper, DataExtent, DataRect, Decimal, Precision, Rounding};

fn mapper(rounding: Rounding) -> CoordinateMapper {
    let extent = DataExtent::new(Decimal::ZERO, Decimal::from(1000), Decimal::from(-50), Decimal::from(250)).unwrap();
    let precision = Precision { rounding, ..Precision::default() };
    CoordinateMapper::new(extent, DataRect::new(40, 30, 600, 400), precision, Decimal::TWO)
}

fn tolerance(cell: Decimal) -> Decimal {
    cell + Decimal::new(1, 9)
}

proptest! {
    #[test]
    fn col_round_trip_within_one_cell(raw in 0i64..=100_000, mode in 0usize..Rounding::ALL.len()) {
        let m = mapper(Rounding::ALL[mode]);
        let x = Decimal::new(raw, 2);
        let col = m.value_to_col(x).unwrap();
        prop_assert!(m.rect().contains_col(col));
        let back = m.col_to_value(col).unwrap();
        let cell = m.cell().unwrap().cell_width;
        prop_assert!((back - x).abs() <= tolerance(cell), "x={x} col={col} back={back}");
    }

    #[test]
    fn row_round_trip_within_one_cell(raw in -5_000i64..=25_000, mode in 0usize..Rounding::ALL.len()) {
        let m = mapper(Rounding::ALL[mode]);
        let y = Decimal::new(raw, 2);
        let row = m.value_to_row(y).unwrap();
        prop_assert!(m.rect().contains_row(row));
        let back = m.row_to_value(row).unwrap();
        let cell = m.cell().unwrap().cell_height;
        prop_assert!((back - y).abs() <= tolerance(cell), "y={y} row={row} back={back}");
    }
}

#[test]
fn extremes_land_on_rect_edges() {
    let m = mapper(Rounding::HalfUp);
    let rect = *m.rect();
    assert_eq!(m.value_to_col(Decimal::ZERO).unwrap(), rect.start_col);
    assert_eq!(m.value_to_col(Decimal::from(1000)).unwrap(), rect.end_col);
    assert_eq!(m.value_to_row(Decimal::from(250)).unwrap(), rect.start_row);
    assert_eq!(m.value_to_row(Decimal::from(-50)).unwrap(), rect.end_row);
}

#[test]
fn origin_row_is_zero_row_when_range_straddles_zero() {
    let m = mapper(Rounding::HalfUp);
    // 250 of 300 units above zero over 400 px
    let expected = 30 + 400 - 67;
    assert_eq!(m.origin_row().unwrap(), expected);
}

#[test]
fn origin_row_falls_back_to_bottom_when_max_is_zero() {
    let extent = DataExtent::new(Decimal::ZERO, Decimal::TEN, Decimal::from(-10), Decimal::ZERO).unwrap();
    let m = CoordinateMapper::new(extent, DataRect::new(0, 0, 100, 100), Precision::default(), Decimal::TWO);
    assert_eq!(m.origin_row().unwrap(), 100);
}

#[test]
fn zero_width_extent_maps_to_start_col() {
    let five = Decimal::from(5);
    let extent = DataExtent::new(five, five, five, five).unwrap();
    let m = CoordinateMapper::new(extent, DataRect::new(10, 20, 300, 200), Precision::default(), Decimal::TWO);
    for _ in 0..3 {
        assert_eq!(m.value_to_col(five).unwrap(), 10);
        assert_eq!(m.value_to_row(five).unwrap(), 220);
    }
    assert_eq!(m.x_len_px(Decimal::ONE).unwrap(), 0);
}

#[test]
fn zero_pixel_area_uses_placeholder_cell() {
    let extent = DataExtent::new(Decimal::ZERO, Decimal::TEN, Decimal::ZERO, Decimal::TEN).unwrap();
    let rect = DataRect::new(0, 0, 0, 0);
    let precision = Precision::default();

    let err = CellSize::compute(&extent, &rect, &precision).unwrap_err();
    assert!(matches!(err, ChartError::DegenerateGeometry(_)));

    let m = CoordinateMapper::new(extent, rect, precision, Decimal::TWO);
    assert_eq!(m.cell().unwrap().cell_width, Decimal::TWO);
    assert_eq!(m.value_to_col(Decimal::TEN).unwrap(), 5);
    assert_eq!(m.value_to_col(Decimal::TEN).unwrap(), m.value_to_col(Decimal::TEN).unwrap());
}

#[test]
fn unconfigured_mapper_reports_missing_extent() {
    let m = CoordinateMapper::unconfigured(DataRect::new(0, 0, 100, 100), Precision::default());
    assert!(m.cell().is_none());
    assert!(matches!(m.value_to_col(Decimal::ONE), Err(ChartError::InvalidExtent(_))));
    assert!(matches!(m.value_to_row(Decimal::ONE), Err(ChartError::InvalidExtent(_))));
    assert!(matches!(m.origin_row(), Err(ChartError::InvalidExtent(_))));
}

#[test]
fn inverted_extent_is_rejected() {
    let err = DataExtent::new(Decimal::TEN, Decimal::ONE, Decimal::ZERO, Decimal::ONE).unwrap_err();
    assert!(matches!(err, ChartError::InvalidExtent(_)));
}

#[test]
fn rounding_modes_differ_on_ties() {
    let half = Decimal::new(25, 1);
    let p = |rounding| Precision { rounding, ..Precision::default() };
    assert_eq!(p(Rounding::HalfUp).to_px(half), 3);
    assert_eq!(p(Rounding::HalfDown).to_px(half), 2);
    assert_eq!(p(Rounding::HalfEven).to_px(half), 2);
    assert_eq!(p(Rounding::Floor).to_px(-half), -3);
    assert_eq!(p(Rounding::Down).to_px(-half), -2);
}
