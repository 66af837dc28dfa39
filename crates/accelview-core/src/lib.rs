//! Hardware-independent core library for accelview
//!
//! This crate contains all platform-agnostic logic for the accelview demo: a
//! periodically sampled 3-axis accelerometer rendered as a scrolling line
//! chart with a live legend, plus a one-shot I2C bus discovery scan run at
//! startup.
//!
//! It is `#![no_std]` with `extern crate alloc` so it compiles on both
//! embedded targets and desktop hosts (for the simulator and tests).

#![cfg_attr(not(test), no_std)]

extern crate alloc;

pub mod acquisition;
pub mod app;
pub mod bus_scan;
pub mod config;
pub mod devices;
pub mod framebuffer;
pub mod legend;
pub mod sensors;
pub mod ui;
