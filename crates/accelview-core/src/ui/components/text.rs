//! Text label component.

use embedded_graphics::Drawable as EgDrawable;
use embedded_graphics::mono_font::{MonoFont, MonoTextStyle};
use embedded_graphics::pixelcolor::Rgb565;
use embedded_graphics::prelude::*;
use embedded_graphics::primitives::Rectangle;
use embedded_graphics::text::{Alignment, Baseline, Text, TextStyleBuilder};

use crate::ui::core::Drawable;

/// Copy `src` into `dst`, dropping whatever does not fit.
fn copy_truncated<const N: usize>(dst: &mut heapless::String<N>, src: &str) {
    for ch in src.chars() {
        if dst.push(ch).is_err() {
            break;
        }
    }
}

/// A single-line text label with dirty tracking.
pub struct TextComponent {
    bounds: Rectangle,
    text: heapless::String<32>,
    font: &'static MonoFont<'static>,
    color: Rgb565,
    alignment: Alignment,
    dirty: bool,
}

impl TextComponent {
    pub fn new(
        bounds: Rectangle,
        text: &str,
        font: &'static MonoFont<'static>,
        color: Rgb565,
    ) -> Self {
        let mut text_string = heapless::String::new();
        copy_truncated(&mut text_string, text);

        Self {
            bounds,
            text: text_string,
            font,
            color,
            alignment: Alignment::Left,
            dirty: true,
        }
    }

    pub fn with_alignment(mut self, alignment: Alignment) -> Self {
        self.alignment = alignment;
        self
    }

    /// Update the displayed text, marking the component dirty if it changed.
    ///
    /// Text longer than the internal capacity is truncated.
    pub fn set_text(&mut self, text: &str) {
        if self.text.as_str() == text {
            return;
        }
        self.text.clear();
        copy_truncated(&mut self.text, text);
        self.dirty = true;
    }

    pub fn text(&self) -> &str {
        &self.text
    }

    fn anchor(&self) -> Point {
        match self.alignment {
            Alignment::Left => self.bounds.top_left,
            Alignment::Center => Point::new(self.bounds.center().x, self.bounds.top_left.y),
            Alignment::Right => Point::new(
                self.bounds.top_left.x + self.bounds.size.width as i32,
                self.bounds.top_left.y,
            ),
        }
    }
}

impl Drawable for TextComponent {
    fn draw<D: DrawTarget<Color = Rgb565>>(&self, display: &mut D) -> Result<(), D::Error> {
        let character_style = MonoTextStyle::new(self.font, self.color);
        let text_style = TextStyleBuilder::new()
            .alignment(self.alignment)
            .baseline(Baseline::Top)
            .build();

        Text::with_text_style(&self.text, self.anchor(), character_style, text_style)
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

#[cfg(test)]
mod tests {
    use super::*;
    use embedded_graphics::mono_font::ascii::FONT_6X10;

    fn label(text: &str) -> TextComponent {
        TextComponent::new(
            Rectangle::new(Point::zero(), Size::new(100, 12)),
            text,
            &FONT_6X10,
            Rgb565::WHITE,
        )
    }

    #[test]
    fn test_set_text_marks_dirty_only_on_change() {
        let mut text = label("X: --");
        text.mark_clean();

        text.set_text("X: --");
        assert!(!text.is_dirty());

        text.set_text("X:1.00G");
        assert!(text.is_dirty());
        assert_eq!(text.text(), "X:1.00G");
    }

    #[test]
    fn test_overlong_text_is_truncated_not_dropped() {
        let mut text = label("");
        let long = "0123456789012345678901234567890123456789";

        text.set_text(long);
        assert_eq!(text.text(), &long[..32]);
    }
}
