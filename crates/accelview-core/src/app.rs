//! Demo application state and per-tick pipeline.
//!
//! [`App`] owns every UI component and the acquisition pipeline. The host
//! binary drives it from a single loop: `process` advances time and runs any
//! due acquisition tick, `render` repaints dirty components, and the returned
//! sleep hint bounds how long the loop may block.

use embassy_time::{Duration, Instant};
use embedded_graphics::pixelcolor::Rgb565;
use embedded_graphics::prelude::*;
use embedded_graphics::primitives::Rectangle;
use log::{error, info};

use crate::acquisition::AcquisitionScheduler;
use crate::config::{CHART_POINTS_PER_SERIES, DemoConfig, MAX_LOOP_SLEEP};
use crate::devices::{DeviceReady, StartupError};
use crate::legend::Legend;
use crate::sensors::{Accelerometer, Axis, SampleSource};
use crate::ui::{
    Chart, CounterButton, DISPLAY_HEIGHT_PX, DISPLAY_WIDTH_PX, Drawable, LEGEND_HEIGHT_PX,
    TouchEvent, TouchResult, Touchable, axis_color,
};

/// One chart series per axis.
pub type AccelChart = Chart<{ Axis::COUNT }, CHART_POINTS_PER_SERIES>;

const COUNTER_SIZE: Size = Size::new(80, 28);
const COUNTER_MARGIN_PX: i32 = 8;

pub struct App<A> {
    config: DemoConfig,
    source: SampleSource<A>,
    scheduler: AcquisitionScheduler,
    chart: AccelChart,
    legend: Legend,
    counter: Option<CounterButton>,
}

impl<A: Accelerometer + DeviceReady> App<A> {
    /// Build the screen and start the acquisition scheduler.
    ///
    /// Fails when the accelerometer handle is not ready; the caller treats
    /// that as fatal.
    pub fn new(config: DemoConfig, sensor: A, now: Instant) -> Result<Self, StartupError> {
        if !sensor.is_ready() {
            error!("accelerometer is not ready");
            return Err(StartupError::DeviceNotReady("accelerometer"));
        }

        let legend = Legend::new(Rectangle::new(
            Point::zero(),
            Size::new(DISPLAY_WIDTH_PX as u32, LEGEND_HEIGHT_PX),
        ));

        let chart = AccelChart::new(
            Rectangle::new(
                Point::new(0, LEGEND_HEIGHT_PX as i32),
                Size::new(
                    DISPLAY_WIDTH_PX as u32,
                    DISPLAY_HEIGHT_PX as u32 - LEGEND_HEIGHT_PX,
                ),
            ),
            config.y_range(),
            Axis::ALL.map(axis_color),
        );

        let counter = config.touch_counter.then(|| {
            CounterButton::new(Rectangle::new(
                Point::new(
                    DISPLAY_WIDTH_PX as i32 - COUNTER_SIZE.width as i32 - COUNTER_MARGIN_PX,
                    DISPLAY_HEIGHT_PX as i32 - COUNTER_SIZE.height as i32 - COUNTER_MARGIN_PX,
                ),
                COUNTER_SIZE,
            ))
        });

        let mut scheduler = AcquisitionScheduler::new(config.sampling_rate_hz);
        scheduler.start(now);
        info!(
            "acquisition started at {} Hz ({} ms period)",
            config.sampling_rate_hz,
            scheduler.period().as_millis()
        );

        Ok(Self {
            config,
            source: SampleSource::new(sensor),
            scheduler,
            chart,
            legend,
            counter,
        })
    }

    /// Run any due acquisition tick and return how long the caller may sleep
    /// before the next `process` call.
    pub fn process(&mut self, now: Instant) -> Duration {
        if self.scheduler.poll(now) {
            self.acquire();
        }
        self.scheduler.time_until_due(now).min(MAX_LOOP_SLEEP)
    }

    /// One acquisition tick: read, append to every series, update the legend.
    ///
    /// A failed read is logged and skips the whole tick; chart and legend are
    /// left exactly as the previous tick produced them.
    fn acquire(&mut self) {
        let sample = match self.source.read() {
            Ok(sample) => sample,
            Err(err) => {
                error!("sample read failed: {} (status {})", err, err.status());
                return;
            }
        };

        let scale = self.config.value_scale();
        for axis in Axis::ALL {
            if let Err(err) = self.chart.append(axis.index(), sample.axis(axis) * scale) {
                error!("chart append failed: {}", err);
            }
        }
        self.legend.update(&sample);
    }

    /// Repaint every dirty component. Returns whether anything was drawn.
    pub fn render<D: DrawTarget<Color = Rgb565>>(
        &mut self,
        target: &mut D,
    ) -> Result<bool, D::Error> {
        let mut drew = false;

        if self.legend.is_dirty() {
            self.legend.draw(target)?;
            self.legend.mark_clean();
            drew = true;
        }
        if self.chart.is_dirty() {
            self.chart.draw(target)?;
            self.chart.mark_clean();
            drew = true;
        }
        if let Some(counter) = &mut self.counter {
            if counter.is_dirty() {
                counter.draw(target)?;
                counter.mark_clean();
                drew = true;
            }
        }

        Ok(drew)
    }

    /// Forward a touch event to the interactive components.
    pub fn handle_touch(&mut self, event: TouchEvent) -> TouchResult {
        match &mut self.counter {
            Some(counter) => counter.handle_touch(event),
            None => TouchResult::NotHandled,
        }
    }

    pub fn config(&self) -> &DemoConfig {
        &self.config
    }

    pub fn chart(&self) -> &AccelChart {
        &self.chart
    }

    pub fn legend(&self) -> &Legend {
        &self.legend
    }

    pub fn counter(&self) -> Option<&CounterButton> {
        self.counter.as_ref()
    }
}
