//! Accelerometer abstraction and sample acquisition.
//!
//! [`Accelerometer`] mirrors the two-phase contract of typical sensor
//! transports: a fetch that latches a reading into the device, then a
//! channel decode that extracts the axis values. [`SampleSource`] sequences
//! the two into a single fallible read producing a [`Sample`].

#[cfg(feature = "sensor-lis2dh12")]
pub mod lis2dh12;

use thiserror_no_std::Error;

/// Generic I/O failure status, errno convention (negative on error).
pub const STATUS_IO_ERROR: i32 = -5;

/// No such device, errno convention.
pub const STATUS_NO_DEVICE: i32 = -19;

/// One accelerometer axis.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Axis {
    X,
    Y,
    Z,
}

impl Axis {
    pub const ALL: [Axis; 3] = [Axis::X, Axis::Y, Axis::Z];
    pub const COUNT: usize = 3;

    pub fn label(&self) -> &'static str {
        match self {
            Axis::X => "X",
            Axis::Y => "Y",
            Axis::Z => "Z",
        }
    }

    /// Stable index of this axis: X = 0, Y = 1, Z = 2.
    ///
    /// Chart series are created in this order, so the axis index doubles as
    /// the series index.
    pub fn index(&self) -> usize {
        match self {
            Axis::X => 0,
            Axis::Y => 1,
            Axis::Z => 2,
        }
    }
}

/// One decoded accelerometer reading, in m/s² per axis.
///
/// Transient: produced once per tick, consumed immediately, never retained.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Sample {
    pub ax: f32,
    pub ay: f32,
    pub az: f32,
}

impl Sample {
    pub const fn new(ax: f32, ay: f32, az: f32) -> Self {
        Self { ax, ay, az }
    }

    pub fn axis(&self, axis: Axis) -> f32 {
        match axis {
            Axis::X => self.ax,
            Axis::Y => self.ay,
            Axis::Z => self.az,
        }
    }

    /// Axis value converted from m/s² to multiples of standard gravity.
    pub fn axis_g(&self, axis: Axis) -> f32 {
        self.axis(axis) / crate::config::G_MS2
    }
}

/// A failed sample read, carrying the transport status code.
///
/// Either stage failing means no sample is produced; there is no partial
/// result.
#[derive(Debug, Error, Clone, Copy, PartialEq, Eq)]
pub enum SampleError {
    #[error("sample fetch failed with status {0}")]
    Fetch(i32),
    #[error("channel decode failed with status {0}")]
    Decode(i32),
}

impl SampleError {
    /// The underlying transport status code.
    pub fn status(&self) -> i32 {
        match self {
            SampleError::Fetch(code) | SampleError::Decode(code) => *code,
        }
    }
}

/// Low-level accelerometer primitive.
///
/// Errors are errno-style negative status codes from the underlying
/// transport.
pub trait Accelerometer {
    /// Latch a fresh reading into the device's sample registers.
    fn fetch(&mut self) -> Result<(), i32>;

    /// Decode the latched X/Y/Z channels, in m/s².
    fn channel_get(&mut self) -> Result<[f32; 3], i32>;
}

/// Wraps an [`Accelerometer`] into a single fallible read operation.
pub struct SampleSource<A> {
    sensor: A,
}

impl<A: Accelerometer> SampleSource<A> {
    pub fn new(sensor: A) -> Self {
        Self { sensor }
    }

    /// Fetch and decode one sample.
    ///
    /// The decode is only attempted after a successful fetch.
    pub fn read(&mut self) -> Result<Sample, SampleError> {
        self.sensor.fetch().map_err(SampleError::Fetch)?;
        let [ax, ay, az] = self.sensor.channel_get().map_err(SampleError::Decode)?;
        Ok(Sample::new(ax, ay, az))
    }

    pub fn sensor(&self) -> &A {
        &self.sensor
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    struct FakeAccel {
        fetch_status: Result<(), i32>,
        decode_status: Result<[f32; 3], i32>,
        decode_calls: usize,
    }

    impl Accelerometer for FakeAccel {
        fn fetch(&mut self) -> Result<(), i32> {
            self.fetch_status
        }

        fn channel_get(&mut self) -> Result<[f32; 3], i32> {
            self.decode_calls += 1;
            self.decode_status
        }
    }

    #[test]
    fn test_read_success_yields_axes_in_order() {
        let mut source = SampleSource::new(FakeAccel {
            fetch_status: Ok(()),
            decode_status: Ok([1.0, 2.0, 3.0]),
            decode_calls: 0,
        });

        let sample = source.read().unwrap();
        assert_eq!(sample, Sample::new(1.0, 2.0, 3.0));
        assert_eq!(sample.axis(Axis::X), 1.0);
        assert_eq!(sample.axis(Axis::Y), 2.0);
        assert_eq!(sample.axis(Axis::Z), 3.0);
    }

    #[test]
    fn test_fetch_failure_skips_decode() {
        let mut source = SampleSource::new(FakeAccel {
            fetch_status: Err(STATUS_IO_ERROR),
            decode_status: Ok([0.0; 3]),
            decode_calls: 0,
        });

        assert_eq!(source.read(), Err(SampleError::Fetch(STATUS_IO_ERROR)));
        assert_eq!(source.sensor().decode_calls, 0);
    }

    #[test]
    fn test_decode_failure_maps_to_decode_error() {
        let mut source = SampleSource::new(FakeAccel {
            fetch_status: Ok(()),
            decode_status: Err(STATUS_IO_ERROR),
            decode_calls: 0,
        });

        let err = source.read().unwrap_err();
        assert_eq!(err, SampleError::Decode(STATUS_IO_ERROR));
        assert_eq!(err.status(), STATUS_IO_ERROR);
    }

    #[test]
    fn test_axis_g_conversion() {
        let sample = Sample::new(crate::config::G_MS2, 0.0, -crate::config::G_MS2);
        assert!((sample.axis_g(Axis::X) - 1.0).abs() < 1e-6);
        assert_eq!(sample.axis_g(Axis::Y), 0.0);
        assert!((sample.axis_g(Axis::Z) + 1.0).abs() < 1e-6);
    }
}
