//! Per-axis data series with shift-on-write append semantics.

extern crate alloc;
use alloc::vec::Vec;

use embedded_graphics::pixelcolor::Rgb565;

/// A fixed-capacity series of scalar points.
///
/// Appending at capacity evicts the oldest point first (FIFO), which is what
/// scrolls the chart leftward.
pub struct ChartSeries<const MAX_POINTS: usize> {
    points: Vec<f32>,
    color: Rgb565,
}

impl<const MAX_POINTS: usize> ChartSeries<MAX_POINTS> {
    pub fn new(color: Rgb565) -> Self {
        Self {
            points: Vec::with_capacity(MAX_POINTS),
            color,
        }
    }

    /// Append a point, evicting the oldest one when at capacity.
    pub fn push(&mut self, value: f32) {
        if self.points.len() == MAX_POINTS {
            self.points.remove(0);
        }
        self.points.push(value);
    }

    /// All retained points, oldest first.
    pub fn points(&self) -> &[f32] {
        &self.points
    }

    pub fn color(&self) -> Rgb565 {
        self.color
    }

    pub fn len(&self) -> usize {
        self.points.len()
    }

    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use embedded_graphics::prelude::RgbColor;

    #[test]
    fn test_push_within_capacity_keeps_all_points() {
        let mut series: ChartSeries<4> = ChartSeries::new(Rgb565::RED);
        for v in [1.0, 2.0, 3.0] {
            series.push(v);
        }
        assert_eq!(series.points(), &[1.0, 2.0, 3.0]);
    }

    #[test]
    fn test_push_at_capacity_evicts_oldest_first() {
        let mut series: ChartSeries<4> = ChartSeries::new(Rgb565::RED);
        for v in 1..=7 {
            series.push(v as f32);
        }
        // 7 appends into capacity 4 retain exactly the last 4, in order.
        assert_eq!(series.points(), &[4.0, 5.0, 6.0, 7.0]);
        assert_eq!(series.len(), 4);
    }

    #[test]
    fn test_capacity_one_always_holds_newest() {
        let mut series: ChartSeries<1> = ChartSeries::new(Rgb565::RED);
        series.push(1.0);
        series.push(2.0);
        assert_eq!(series.points(), &[2.0]);
    }
}
