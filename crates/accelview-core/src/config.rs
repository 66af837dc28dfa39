//! Demo configuration.
//!
//! Numeric tuning knobs are compile-time constants; the historical demo
//! variants (scaled vs. raw chart range, with or without the tap counter)
//! are runtime flags on [`DemoConfig`].

use embassy_time::Duration;
use serde::{Deserialize, Serialize};

/// Acquisition tick rate in Hz.
pub const SAMPLING_RATE_HZ: u32 = 10;

/// Number of points each chart series retains before scrolling.
pub const CHART_POINTS_PER_SERIES: usize = 100;

/// Fixed-point scale factor applied to chart values when
/// [`DemoConfig::scaled_display`] is set.
pub const ACCEL_SCALE: f32 = 100.0;

/// Standard gravity in m/s², used for the legend's "G" readout.
pub const G_MS2: f32 = 9.81;

/// Chart Y range with the fixed-point scale applied (±2 g × 100).
pub const SCALED_Y_RANGE: (f32, f32) = (-2000.0, 2000.0);

/// Chart Y range for raw m/s² values (±2 g, with headroom).
pub const RAW_Y_RANGE: (f32, f32) = (-20.0, 20.0);

/// Upper bound on how long the render loop may sleep between iterations.
pub const MAX_LOOP_SLEEP: Duration = Duration::from_millis(500);

/// Runtime demo configuration.
///
/// The two historical variants of this demo differ only in the chart value
/// scaling and the presence of a tap counter button; both are expressed here
/// as flags rather than picking one as canonical.
#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq, Eq)]
pub struct DemoConfig {
    /// Acquisition rate in Hz; the tick period is `1000 / rate` ms.
    pub sampling_rate_hz: u32,
    /// Plot chart values in fixed-point (×[`ACCEL_SCALE`]) instead of raw m/s².
    pub scaled_display: bool,
    /// Show the on-screen tap counter button.
    pub touch_counter: bool,
    /// Run the I2C discovery scan at startup.
    pub i2c_scan: bool,
}

impl Default for DemoConfig {
    fn default() -> Self {
        Self {
            sampling_rate_hz: SAMPLING_RATE_HZ,
            scaled_display: true,
            touch_counter: false,
            i2c_scan: true,
        }
    }
}

impl DemoConfig {
    /// Chart Y-axis display range for this configuration.
    pub fn y_range(&self) -> (f32, f32) {
        if self.scaled_display {
            SCALED_Y_RANGE
        } else {
            RAW_Y_RANGE
        }
    }

    /// Multiplier applied to each axis value before it enters the chart.
    pub fn value_scale(&self) -> f32 {
        if self.scaled_display { ACCEL_SCALE } else { 1.0 }
    }
}
