//! Tap counter button.
//!
//! Optional on-screen control from the touch-enabled demo variant: shows a
//! running count of presses and increments itself on each one.

use core::fmt::Write;

use embedded_graphics::Drawable as EgDrawable;
use embedded_graphics::mono_font::MonoTextStyle;
use embedded_graphics::mono_font::ascii::FONT_6X10;
use embedded_graphics::pixelcolor::Rgb565;
use embedded_graphics::prelude::*;
use embedded_graphics::primitives::{PrimitiveStyle, Rectangle, RoundedRectangle};
use embedded_graphics::text::{Alignment, Text};

use crate::ui::core::{Drawable, TouchEvent, TouchPoint, TouchResult, Touchable};

const BUTTON_COLOR: Rgb565 = Rgb565::CSS_DIM_GRAY;
const BUTTON_CORNER_RADIUS: u32 = 6;

pub struct CounterButton {
    bounds: Rectangle,
    count: u32,
    dirty: bool,
}

impl CounterButton {
    pub fn new(bounds: Rectangle) -> Self {
        Self {
            bounds,
            count: 0,
            dirty: true,
        }
    }

    pub fn count(&self) -> u32 {
        self.count
    }
}

impl Drawable for CounterButton {
    fn draw<D: DrawTarget<Color = Rgb565>>(&self, display: &mut D) -> Result<(), D::Error> {
        let corner = Size::new(BUTTON_CORNER_RADIUS, BUTTON_CORNER_RADIUS);
        RoundedRectangle::with_equal_corners(self.bounds, corner)
            .into_styled(PrimitiveStyle::with_fill(BUTTON_COLOR))
            .draw(display)?;

        let mut label = heapless::String::<16>::new();
        let _ = write!(label, "Taps: {}", self.count);

        let text_style = MonoTextStyle::new(&FONT_6X10, Rgb565::WHITE);
        Text::with_alignment(&label, self.bounds.center(), text_style, Alignment::Center)
            .draw(display)?;

        Ok(())
    }

    fn bounds(&self) -> Rectangle {
        self.bounds
    }

    fn is_dirty(&self) -> bool {
        self.dirty
    }

    fn mark_clean(&mut self) {
        self.dirty = false;
    }

    fn mark_dirty(&mut self) {
        self.dirty = true;
    }
}

impl Touchable for CounterButton {
    fn contains_point(&self, point: TouchPoint) -> bool {
        self.bounds.contains(point.to_point())
    }

    fn handle_touch(&mut self, event: TouchEvent) -> TouchResult {
        match event {
            TouchEvent::Press(point) if self.contains_point(point) => {
                self.count = self.count.wrapping_add(1);
                self.dirty = true;
                TouchResult::Handled
            }
            _ => TouchResult::NotHandled,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn button() -> CounterButton {
        CounterButton::new(Rectangle::new(Point::new(10, 10), Size::new(80, 30)))
    }

    #[test]
    fn test_press_inside_increments_count() {
        let mut button = button();
        button.mark_clean();

        let result = button.handle_touch(TouchEvent::Press(TouchPoint::new(20, 20)));
        assert_eq!(result, TouchResult::Handled);
        assert_eq!(button.count(), 1);
        assert!(button.is_dirty());
    }

    #[test]
    fn test_press_outside_is_ignored() {
        let mut button = button();
        button.mark_clean();

        let result = button.handle_touch(TouchEvent::Press(TouchPoint::new(200, 200)));
        assert_eq!(result, TouchResult::NotHandled);
        assert_eq!(button.count(), 0);
        assert!(!button.is_dirty());
    }

    #[test]
    fn test_release_does_not_count() {
        let mut button = button();
        let result = button.handle_touch(TouchEvent::Release(TouchPoint::new(20, 20)));
        assert_eq!(result, TouchResult::NotHandled);
        assert_eq!(button.count(), 0);
    }
}
