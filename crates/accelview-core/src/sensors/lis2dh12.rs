//! Minimal blocking LIS2DH12 accelerometer driver.
//!
//! Configures the device for 100 Hz, ±2 g, high-resolution (12-bit) output
//! and exposes it through the [`Accelerometer`] fetch/decode contract.

use embedded_hal::i2c::I2c;
use log::debug;

use super::{Accelerometer, STATUS_IO_ERROR, STATUS_NO_DEVICE};
use crate::devices::DeviceReady;

/// Default target address (SA0 low).
pub const ADDR_PRIMARY: u8 = 0x18;
/// Alternate target address (SA0 high).
pub const ADDR_SECONDARY: u8 = 0x19;

const REG_WHO_AM_I: u8 = 0x0F;
const REG_CTRL1: u8 = 0x20;
const REG_CTRL4: u8 = 0x23;
const REG_OUT_X_L: u8 = 0x28;

const WHO_AM_I: u8 = 0x33;
/// Register auto-increment flag for burst reads.
const AUTO_INCREMENT: u8 = 0x80;
/// 100 Hz ODR, X/Y/Z enabled.
const CTRL1_100HZ_XYZ: u8 = 0x57;
/// Block data update + high-resolution mode.
const CTRL4_BDU_HR: u8 = 0x88;
/// m/s² per digit at ±2 g in high-resolution mode (1 mg/digit).
const MS2_PER_DIGIT: f32 = 0.009_806_65;

pub struct Lis2dh12<I> {
    i2c: I,
    addr: u8,
    ready: bool,
    latched: [i16; 3],
}

impl<I: I2c> Lis2dh12<I> {
    pub fn new(i2c: I, addr: u8) -> Self {
        Self {
            i2c,
            addr,
            ready: false,
            latched: [0; 3],
        }
    }

    /// Probe and configure the device.
    ///
    /// The handle stays not-ready if the probe fails or the identity
    /// register does not match.
    pub fn init(&mut self) -> Result<(), i32> {
        let mut id = [0u8; 1];
        self.i2c
            .write_read(self.addr, &[REG_WHO_AM_I], &mut id)
            .map_err(|_| STATUS_IO_ERROR)?;
        if id[0] != WHO_AM_I {
            return Err(STATUS_NO_DEVICE);
        }

        self.i2c
            .write(self.addr, &[REG_CTRL1, CTRL1_100HZ_XYZ])
            .map_err(|_| STATUS_IO_ERROR)?;
        self.i2c
            .write(self.addr, &[REG_CTRL4, CTRL4_BDU_HR])
            .map_err(|_| STATUS_IO_ERROR)?;

        debug!("LIS2DH12 at 0x{:02X} configured", self.addr);
        self.ready = true;
        Ok(())
    }

    /// Left-justified 12-bit output to m/s².
    fn raw_to_ms2(raw: i16) -> f32 {
        ((raw >> 4) as f32) * MS2_PER_DIGIT
    }
}

impl<I: I2c> Accelerometer for Lis2dh12<I> {
    fn fetch(&mut self) -> Result<(), i32> {
        let mut out = [0u8; 6];
        self.i2c
            .write_read(self.addr, &[REG_OUT_X_L | AUTO_INCREMENT], &mut out)
            .map_err(|_| STATUS_IO_ERROR)?;

        for (axis, chunk) in out.chunks_exact(2).enumerate() {
            self.latched[axis] = i16::from_le_bytes([chunk[0], chunk[1]]);
        }
        Ok(())
    }

    fn channel_get(&mut self) -> Result<[f32; 3], i32> {
        Ok([
            Self::raw_to_ms2(self.latched[0]),
            Self::raw_to_ms2(self.latched[1]),
            Self::raw_to_ms2(self.latched[2]),
        ])
    }
}

impl<I> DeviceReady for Lis2dh12<I> {
    fn is_ready(&self) -> bool {
        self.ready
    }
}
