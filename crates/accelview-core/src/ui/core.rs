//! Core UI traits and touch types.

use embedded_graphics::pixelcolor::Rgb565;
use embedded_graphics::prelude::*;
use embedded_graphics::primitives::Rectangle;

/// A 2D touch point on the display.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TouchPoint {
    pub x: u16,
    pub y: u16,
}

impl TouchPoint {
    pub fn new(x: u16, y: u16) -> Self {
        Self { x, y }
    }

    pub fn to_point(&self) -> Point {
        Point::new(self.x as i32, self.y as i32)
    }
}

/// Touch events delivered to the UI.
#[derive(Debug, Clone, Copy)]
pub enum TouchEvent {
    Press(TouchPoint),
    Release(TouchPoint),
}

/// Result from handling a touch event.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TouchResult {
    /// Event was handled by this element.
    Handled,
    /// Event was not handled, pass to the next element.
    NotHandled,
}

/// Trait for any UI element that can be drawn.
pub trait Drawable {
    /// Draw the element to the display.
    fn draw<D: DrawTarget<Color = Rgb565>>(&self, display: &mut D) -> Result<(), D::Error>;

    /// Bounds of this element.
    fn bounds(&self) -> Rectangle;

    /// Whether this element needs to be redrawn.
    fn is_dirty(&self) -> bool;

    fn mark_clean(&mut self);

    fn mark_dirty(&mut self);
}

/// Trait for UI elements that respond to touch events.
pub trait Touchable {
    fn contains_point(&self, point: TouchPoint) -> bool;

    fn handle_touch(&mut self, event: TouchEvent) -> TouchResult;
}
