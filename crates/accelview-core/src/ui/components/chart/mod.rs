//! Scrolling multi-series line chart with a fixed Y-axis range.
//!
//! Rendering is pure lines, no point markers. Each series scrolls in shift
//! mode: the newest point is anchored at the right edge and older points
//! march left until they fall off. Values outside the Y range are stored
//! unchanged and rendered clamped to the range edge.

mod series;

pub use series::ChartSeries;

extern crate alloc;
use alloc::vec::Vec;

use embedded_graphics::Drawable as EgDrawable;
use embedded_graphics::pixelcolor::Rgb565;
use embedded_graphics::prelude::*;
use embedded_graphics::primitives::{Line, PrimitiveStyle, Rectangle};
use thiserror_no_std::Error;

use crate::ui::core::Drawable;

/// Default division grid: 5 horizontal lines, 8 vertical.
const DEFAULT_DIV_LINES: (usize, usize) = (5, 8);

const GRID_COLOR: Rgb565 = Rgb565::new(8, 16, 8);
const SERIES_LINE_WIDTH_PX: u32 = 1;

#[derive(Debug, Error, Clone, Copy, PartialEq, Eq)]
pub enum ChartError {
    #[error("invalid series index {index}")]
    InvalidSeriesIndex { index: usize },
}

/// Fixed-range line chart.
///
/// Generic over MAX_SERIES (number of data series) and MAX_POINTS (points
/// per series). All series are created up front, one per entry in the color
/// array, so every index below `MAX_SERIES` is valid for the chart's whole
/// lifetime.
pub struct Chart<const MAX_SERIES: usize, const MAX_POINTS: usize> {
    bounds: Rectangle,
    series: Vec<ChartSeries<MAX_POINTS>>,
    y_range: (f32, f32),
    div_lines: (usize, usize),
    background: Rgb565,
    dirty: bool,
}

impl<const MAX_SERIES: usize, const MAX_POINTS: usize> Chart<MAX_SERIES, MAX_POINTS> {
    pub fn new(bounds: Rectangle, y_range: (f32, f32), colors: [Rgb565; MAX_SERIES]) -> Self {
        Self {
            bounds,
            series: colors.into_iter().map(ChartSeries::new).collect(),
            y_range,
            div_lines: DEFAULT_DIV_LINES,
            background: Rgb565::BLACK,
            dirty: true,
        }
    }

    pub fn with_div_lines(mut self, horizontal: usize, vertical: usize) -> Self {
        self.div_lines = (horizontal, vertical);
        self
    }

    /// Append a value to one series, shifting out its oldest point when the
    /// series is at capacity.
    pub fn append(&mut self, series_idx: usize, value: f32) -> Result<(), ChartError> {
        let series = self
            .series
            .get_mut(series_idx)
            .ok_or(ChartError::InvalidSeriesIndex { index: series_idx })?;

        series.push(value);
        self.dirty = true;
        Ok(())
    }

    pub fn series_count(&self) -> usize {
        self.series.len()
    }

    /// Retained values of one series, oldest first.
    pub fn series_values(&self, series_idx: usize) -> Option<&[f32]> {
        self.series.get(series_idx).map(|s| s.points())
    }

    pub fn y_range(&self) -> (f32, f32) {
        self.y_range
    }

    /// Map a value to a screen row, clamped into the Y range.
    fn value_to_y(&self, value: f32) -> i32 {
        let (lo, hi) = self.y_range;
        let clamped = value.clamp(lo, hi);
        let norm = (clamped - lo) / (hi - lo);
        let height = self.bounds.size.height.saturating_sub(1) as f32;

        // Screen Y grows downward.
        self.bounds.top_left.y + ((1.0 - norm) * height) as i32
    }

    /// Map a point index to a screen column, anchoring the newest point at
    /// the right edge.
    fn index_to_x(&self, point_idx: usize, len: usize) -> i32 {
        let slot = MAX_POINTS - len + point_idx;
        let denom = MAX_POINTS.saturating_sub(1).max(1);
        let width = self.bounds.size.width.saturating_sub(1) as usize;

        self.bounds.top_left.x + (slot * width / denom) as i32
    }

    fn draw_grid<D: DrawTarget<Color = Rgb565>>(&self, display: &mut D) -> Result<(), D::Error> {
        let style = PrimitiveStyle::with_stroke(GRID_COLOR, 1);
        let (hdiv, vdiv) = self.div_lines;
        let top_left = self.bounds.top_left;
        let width = self.bounds.size.width as i32;
        let height = self.bounds.size.height as i32;

        if hdiv > 0 {
            let spacing = height / (hdiv as i32 + 1);
            for i in 1..=hdiv as i32 {
                let y = top_left.y + spacing * i;
                Line::new(Point::new(top_left.x, y), Point::new(top_left.x + width - 1, y))
                    .into_styled(style)
                    .draw(display)?;
            }
        }

        if vdiv > 0 {
            let spacing = width / (vdiv as i32 + 1);
            for i in 1..=vdiv as i32 {
                let x = top_left.x + spacing * i;
                Line::new(Point::new(x, top_left.y), Point::new(x, top_left.y + height - 1))
                    .into_styled(style)
                    .draw(display)?;
            }
        }

        Ok(())
    }

    fn draw_series<D: DrawTarget<Color = Rgb565>>(&self, display: &mut D) -> Result<(), D::Error> {
        for series in &self.series {
            let points = series.points();
            if points.len() < 2 {
                continue;
            }

            let style = PrimitiveStyle::with_stroke(series.color(), SERIES_LINE_WIDTH_PX);
            let mut prev: Option<Point> = None;

            for (i, &value) in points.iter().enumerate() {
                let screen = Point::new(self.index_to_x(i, points.len()), self.value_to_y(value));
                if let Some(prev) = prev {
                    Line::new(prev, screen).into_styled(style).draw(display)?;
                }
                prev = Some(screen);
            }
        }

        Ok(())
    }
}

impl<const MAX_SERIES: usize, const MAX_POINTS: usize> Drawable for Chart<MAX_SERIES, MAX_POINTS> {
    fn draw<D: DrawTarget<Color = Rgb565>>(&self, display: &mut D) -> Result<(), D::Error> {
        self.bounds
            .into_styled(PrimitiveStyle::with_fill(self.background))
            .draw(display)?;
        self.draw_grid(display)?;
        self.draw_series(display)?;
        Ok(())
    }

    fn bounds(&self) -> Rectangle {
        self.bounds
    }

    fn is_dirty(&self) -> bool {
        self.dirty
    }

    fn mark_clean(&mut self) {
        self.dirty = false;
    }

    fn mark_dirty(&mut self) {
        self.dirty = true;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn chart() -> Chart<3, 5> {
        Chart::new(
            Rectangle::new(Point::zero(), Size::new(101, 101)),
            (-100.0, 100.0),
            [Rgb565::RED, Rgb565::BLUE, Rgb565::GREEN],
        )
    }

    #[test]
    fn test_append_routes_to_the_right_series() {
        let mut chart = chart();
        chart.append(0, 1.0).unwrap();
        chart.append(2, 3.0).unwrap();

        assert_eq!(chart.series_values(0), Some([1.0].as_slice()));
        assert_eq!(chart.series_values(1), Some([].as_slice()));
        assert_eq!(chart.series_values(2), Some([3.0].as_slice()));
    }

    #[test]
    fn test_append_rejects_unknown_series() {
        let mut chart = chart();
        assert_eq!(
            chart.append(3, 1.0),
            Err(ChartError::InvalidSeriesIndex { index: 3 })
        );
    }

    #[test]
    fn test_out_of_range_values_are_stored_unchanged() {
        let mut chart = chart();
        chart.append(0, 5000.0).unwrap();
        assert_eq!(chart.series_values(0), Some([5000.0].as_slice()));
    }

    #[test]
    fn test_value_to_y_clamps_into_range() {
        let chart = chart();
        // Top edge for anything at or above the range max.
        assert_eq!(chart.value_to_y(100.0), 0);
        assert_eq!(chart.value_to_y(5000.0), 0);
        // Bottom edge for anything at or below the range min.
        assert_eq!(chart.value_to_y(-100.0), 100);
        assert_eq!(chart.value_to_y(-5000.0), 100);
        assert_eq!(chart.value_to_y(0.0), 50);
    }

    #[test]
    fn test_newest_point_is_anchored_at_right_edge() {
        let chart = chart();
        // Two points in a 5-point chart occupy the two rightmost slots.
        assert_eq!(chart.index_to_x(1, 2), 100);
        assert_eq!(chart.index_to_x(0, 2), 75);
        // A full series spans the whole plot width.
        assert_eq!(chart.index_to_x(0, 5), 0);
        assert_eq!(chart.index_to_x(4, 5), 100);
    }

    #[test]
    fn test_append_marks_chart_dirty() {
        let mut chart = chart();
        chart.mark_clean();
        chart.append(1, 1.0).unwrap();
        assert!(chart.is_dirty());
    }
}
