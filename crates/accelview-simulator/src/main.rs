//! Desktop simulator for the accelview accelerometer chart demo.
//!
//! Renders the accelview-core screen in an SDL2 window via
//! `embedded-graphics-simulator`, driven by synthetic devices: a fake I2C bus
//! that acks a couple of addresses for the startup scan and a sinusoidal
//! accelerometer. Mouse clicks are forwarded as touch events, so the tap
//! counter button is clickable. Press Q or Escape to quit.
//!
//! Pass `--frames N` to run headless for N loop iterations against a
//! pixel-discarding display instead of a window (for smoke tests on machines
//! without SDL); `RUST_LOG=debug` shows the dirty-region flushes either way.

use std::convert::Infallible;
use std::process::ExitCode;
use std::time::Duration as StdDuration;

use embassy_time::Instant;
use embedded_graphics::pixelcolor::Rgb565;
use embedded_graphics::prelude::*;
use embedded_graphics_simulator::{
    OutputSettingsBuilder, SimulatorDisplay, SimulatorEvent, Window, sdl2::Keycode,
};
use embedded_hal::i2c::{self, I2c, Operation, SevenBitAddress};
use log::{error, info};

use accelview_core::app::App;
use accelview_core::bus_scan;
use accelview_core::config::DemoConfig;
use accelview_core::devices::{DeviceReady, DisplayControl};
use accelview_core::framebuffer::FrameBuffer;
use accelview_core::sensors::Accelerometer;
use accelview_core::ui::{DISPLAY_HEIGHT_PX, DISPLAY_WIDTH_PX, Drawable, TouchEvent, TouchPoint};

/// ENODEV, matching the convention for a missing required device.
const EXIT_NO_DEVICE: u8 = 19;

/// Pixel scale factor for the simulator window.
const WINDOW_SCALE: u32 = 2;

/// Upper bound on a windowed frame's sleep, so SDL events stay responsive.
const FRAME_DURATION: StdDuration = StdDuration::from_millis(33);

/// Loop iterations between synthetic taps in headless mode.
const TAP_EVERY_N_FRAMES: u64 = 20;

// ---------------------------------------------------------------------------
// Simulated devices
// ---------------------------------------------------------------------------

/// Address nack from the simulated bus.
#[derive(Debug)]
struct NoAck;

impl i2c::Error for NoAck {
    fn kind(&self) -> i2c::ErrorKind {
        i2c::ErrorKind::NoAcknowledge(i2c::NoAcknowledgeSource::Address)
    }
}

/// I2C bus stub that acks a fixed set of device addresses.
struct SimBus {
    present: &'static [u8],
}

impl SimBus {
    fn new() -> Self {
        // An accelerometer and a display controller, as a real board would show.
        Self {
            present: &[0x18, 0x3C],
        }
    }
}

impl i2c::ErrorType for SimBus {
    type Error = NoAck;
}

impl I2c for SimBus {
    fn transaction(
        &mut self,
        address: SevenBitAddress,
        operations: &mut [Operation<'_>],
    ) -> Result<(), Self::Error> {
        if !self.present.contains(&address) {
            return Err(NoAck);
        }
        for op in operations {
            if let Operation::Read(buf) = op {
                buf.fill(0);
            }
        }
        Ok(())
    }
}

impl DeviceReady for SimBus {
    fn is_ready(&self) -> bool {
        true
    }
}

/// Accelerometer that latches a slow sinusoidal motion on each fetch.
struct SineAccel {
    ticks: u32,
    latched: [f32; 3],
}

impl SineAccel {
    fn new() -> Self {
        Self {
            ticks: 0,
            latched: [0.0; 3],
        }
    }
}

impl Accelerometer for SineAccel {
    fn fetch(&mut self) -> Result<(), i32> {
        self.ticks += 1;
        let t = self.ticks as f32 / 10.0;

        // Gentle tilt on X/Y, gravity plus a wobble on Z.
        self.latched = [
            3.0 * (t / 2.0).sin(),
            3.0 * (t / 3.0).cos(),
            9.81 + 0.5 * t.sin(),
        ];
        Ok(())
    }

    fn channel_get(&mut self) -> Result<[f32; 3], i32> {
        Ok(self.latched)
    }
}

impl DeviceReady for SineAccel {
    fn is_ready(&self) -> bool {
        true
    }
}

/// Headless display stub that counts the pixels pushed to it and drops them.
struct SinkDisplay {
    pixels_received: u64,
    flushes: u64,
}

impl SinkDisplay {
    fn new() -> Self {
        Self {
            pixels_received: 0,
            flushes: 0,
        }
    }
}

impl OriginDimensions for SinkDisplay {
    fn size(&self) -> Size {
        Size::new(DISPLAY_WIDTH_PX as u32, DISPLAY_HEIGHT_PX as u32)
    }
}

impl DrawTarget for SinkDisplay {
    type Color = Rgb565;
    type Error = Infallible;

    fn draw_iter<I>(&mut self, pixels: I) -> Result<(), Self::Error>
    where
        I: IntoIterator<Item = Pixel<Self::Color>>,
    {
        self.pixels_received += pixels.into_iter().count() as u64;
        Ok(())
    }

    fn fill_contiguous<I>(
        &mut self,
        _area: &embedded_graphics::primitives::Rectangle,
        colors: I,
    ) -> Result<(), Self::Error>
    where
        I: IntoIterator<Item = Self::Color>,
    {
        self.pixels_received += colors.into_iter().count() as u64;
        self.flushes += 1;
        Ok(())
    }
}

impl DeviceReady for SinkDisplay {
    fn is_ready(&self) -> bool {
        true
    }
}

impl DisplayControl for SinkDisplay {
    fn blanking_off(&mut self) {
        info!("display blanking released");
    }
}

// ---------------------------------------------------------------------------
// Entry point
// ---------------------------------------------------------------------------

fn unwrap_infallible<T>(result: Result<T, Infallible>) -> T {
    match result {
        Ok(value) => value,
        Err(never) => match never {},
    }
}

/// Value of `--frames N` from the command line, if given.
fn frame_limit() -> Option<u64> {
    let mut args = std::env::args();
    args.find(|arg| arg == "--frames")?;
    args.next()?.parse().ok()
}

/// Map an SDL mouse position to a display touch point.
fn touch_point(point: Point) -> TouchPoint {
    TouchPoint::new(point.x.max(0) as u16, point.y.max(0) as u16)
}

fn startup(config: DemoConfig) -> Result<App<SineAccel>, ExitCode> {
    // Startup order mirrors the target: scan the bus, then bring up the app
    // with the sensor.
    let mut bus = SimBus::new();
    if config.i2c_scan {
        let _ = bus_scan::scan_if_ready(&mut bus);
    }

    App::new(config, SineAccel::new(), Instant::now()).map_err(|err| {
        error!("startup failed: {err}");
        ExitCode::from(EXIT_NO_DEVICE)
    })
}

/// Interactive mode: SDL window, mouse clicks as touches.
fn run_windowed(mut app: App<SineAccel>) -> ExitCode {
    let mut display = SimulatorDisplay::<Rgb565>::new(Size::new(
        DISPLAY_WIDTH_PX as u32,
        DISPLAY_HEIGHT_PX as u32,
    ));
    let output_settings = OutputSettingsBuilder::new().scale(WINDOW_SCALE).build();
    let mut window = Window::new("Accelview Simulator", &output_settings);

    // The SDL window is lazily initialized on the first `update()` call.
    // We must call `update()` once before `events()` or it will panic.
    let mut framebuffer = FrameBuffer::new();
    unwrap_infallible(app.render(&mut framebuffer));
    unwrap_infallible(framebuffer.flush(&mut display));
    window.update(&display);

    info!("entering render loop; click the counter button, Q quits");
    'running: loop {
        for event in window.events() {
            match event {
                SimulatorEvent::Quit => break 'running,

                SimulatorEvent::KeyDown { keycode, .. } => {
                    if keycode == Keycode::Q || keycode == Keycode::Escape {
                        break 'running;
                    }
                }

                SimulatorEvent::MouseButtonDown { point, .. } => {
                    app.handle_touch(TouchEvent::Press(touch_point(point)));
                }

                SimulatorEvent::MouseButtonUp { point, .. } => {
                    app.handle_touch(TouchEvent::Release(touch_point(point)));
                }

                _ => {}
            }
        }

        let sleep = app.process(Instant::now());

        if unwrap_infallible(app.render(&mut framebuffer)) {
            unwrap_infallible(framebuffer.flush(&mut display));
        }
        window.update(&display);

        std::thread::sleep(StdDuration::from_micros(sleep.as_micros()).min(FRAME_DURATION));
    }

    ExitCode::SUCCESS
}

/// Headless smoke mode: no window, synthetic taps, bounded iteration count.
fn run_headless(mut app: App<SineAccel>, frames: u64) -> ExitCode {
    let mut display = SinkDisplay::new();
    if !display.is_ready() {
        error!("display is not ready");
        return ExitCode::from(EXIT_NO_DEVICE);
    }

    // First full frame goes out before the display is unblanked, so the
    // screen never shows garbage.
    let mut framebuffer = FrameBuffer::new();
    unwrap_infallible(app.render(&mut framebuffer));
    unwrap_infallible(framebuffer.flush(&mut display));
    display.blanking_off();

    for frame in 1..=frames {
        let sleep = app.process(Instant::now());

        // Tap the counter now and then so the touch path gets exercised.
        if frame % TAP_EVERY_N_FRAMES == 0 {
            if let Some(center) = app.counter().map(|c| c.bounds().center()) {
                app.handle_touch(TouchEvent::Press(touch_point(center)));
                app.handle_touch(TouchEvent::Release(touch_point(center)));
            }
        }

        if unwrap_infallible(app.render(&mut framebuffer)) {
            unwrap_infallible(framebuffer.flush(&mut display));
        }

        std::thread::sleep(StdDuration::from_micros(sleep.as_micros()));
    }

    info!(
        "done after {} frames, {} flushes, {} pixels pushed",
        frames, display.flushes, display.pixels_received
    );
    ExitCode::SUCCESS
}

fn main() -> ExitCode {
    env_logger::init();

    let config = DemoConfig {
        touch_counter: true,
        ..Default::default()
    };

    let app = match startup(config) {
        Ok(app) => app,
        Err(code) => return code,
    };

    match frame_limit() {
        Some(frames) => run_headless(app, frames),
        None => run_windowed(app),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_mouse_point_clamps_into_display_space() {
        assert_eq!(touch_point(Point::new(12, 34)), TouchPoint::new(12, 34));
        assert_eq!(touch_point(Point::new(-3, -7)), TouchPoint::new(0, 0));
    }

    #[test]
    fn test_clicking_the_counter_increments_it() {
        let mut app = startup(DemoConfig {
            touch_counter: true,
            i2c_scan: false,
            ..Default::default()
        })
        .ok()
        .unwrap();

        let center = app.counter().map(|c| c.bounds().center()).unwrap();
        app.handle_touch(TouchEvent::Press(touch_point(center)));
        app.handle_touch(TouchEvent::Release(touch_point(center)));

        assert_eq!(app.counter().map(|c| c.count()), Some(1));
    }
}
