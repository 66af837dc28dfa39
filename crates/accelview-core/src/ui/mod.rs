//! UI building blocks for the demo screen.
//!
//! A trimmed widget set: drawable/touchable traits, a text label, the
//! scrolling chart, and the optional tap counter button.

pub mod components;
pub mod core;

use embedded_graphics::pixelcolor::Rgb565;
use embedded_graphics::prelude::*;

use crate::sensors::Axis;

pub use components::{Chart, ChartError, ChartSeries, CounterButton, TextComponent};
pub use core::{Drawable, TouchEvent, TouchPoint, TouchResult, Touchable};

pub const DISPLAY_WIDTH_PX: u16 = 320;
pub const DISPLAY_HEIGHT_PX: u16 = 240;

/// Height of the legend strip above the chart.
pub const LEGEND_HEIGHT_PX: u32 = 30;

/// Series/legend color for an axis: X red, Y blue, Z green.
pub fn axis_color(axis: Axis) -> Rgb565 {
    match axis {
        Axis::X => Rgb565::RED,
        Axis::Y => Rgb565::BLUE,
        Axis::Z => Rgb565::GREEN,
    }
}
