//! Readiness and control seams for externally owned device handles.
//!
//! The display driver, bus driver, and sensor binding live outside this
//! crate. The core only needs to ask a handle whether it is usable and, for
//! the display, to release blanking once the first frame has been rendered.

use thiserror_no_std::Error;

/// Readiness check for an externally owned device handle.
///
/// Handles are acquired once at startup and held for the process lifetime;
/// readiness is checked then, not on every use.
pub trait DeviceReady {
    fn is_ready(&self) -> bool;
}

/// Control surface for the display beyond pixel drawing.
pub trait DisplayControl {
    /// Make the frame buffer visible.
    ///
    /// Call only after a first full render pass, so an undefined frame is
    /// never shown.
    fn blanking_off(&mut self);
}

/// Fatal startup failures.
#[derive(Debug, Error, Clone, Copy, PartialEq, Eq)]
pub enum StartupError {
    #[error("device `{0}` is not ready")]
    DeviceNotReady(&'static str),
}
