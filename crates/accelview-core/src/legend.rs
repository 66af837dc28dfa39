//! Legend strip mirroring the latest per-axis readings.
//!
//! Three colored labels above the chart, one per axis, overwritten wholesale
//! on every successful tick with the reading converted to multiples of
//! standard gravity ("X:1.00G").

use core::fmt::Write;

use embedded_graphics::Drawable as EgDrawable;
use embedded_graphics::mono_font::ascii::FONT_9X15;
use embedded_graphics::pixelcolor::Rgb565;
use embedded_graphics::prelude::*;
use embedded_graphics::primitives::{PrimitiveStyle, Rectangle};
use embedded_graphics::text::Alignment;

use crate::config::G_MS2;
use crate::sensors::{Axis, Sample};
use crate::ui::core::Drawable;
use crate::ui::{TextComponent, axis_color};

/// Format one axis reading (m/s²) as legend text, e.g. `"X:1.00G"`.
pub fn format_axis_g(axis: Axis, m_s2: f32) -> heapless::String<16> {
    let mut text = heapless::String::new();
    let _ = write!(text, "{}:{:.2}G", axis.label(), m_s2 / G_MS2);
    text
}

pub struct Legend {
    bounds: Rectangle,
    labels: [TextComponent; Axis::COUNT],
}

impl Legend {
    pub fn new(bounds: Rectangle) -> Self {
        let third = bounds.size.width / Axis::COUNT as u32;
        let labels = Axis::ALL.map(|axis| {
            let mut initial = heapless::String::<16>::new();
            let _ = write!(initial, "{}: --", axis.label());

            let cell = Rectangle::new(
                Point::new(
                    bounds.top_left.x + (third * axis.index() as u32) as i32,
                    bounds.top_left.y + 8,
                ),
                Size::new(third, bounds.size.height.saturating_sub(8)),
            );
            TextComponent::new(cell, &initial, &FONT_9X15, axis_color(axis))
                .with_alignment(Alignment::Center)
        });

        Self { bounds, labels }
    }

    /// Overwrite all three labels with the readings from one sample.
    pub fn update(&mut self, sample: &Sample) {
        for axis in Axis::ALL {
            let text = format_axis_g(axis, sample.axis(axis));
            self.labels[axis.index()].set_text(&text);
        }
    }

    /// Current label text for one axis.
    pub fn text(&self, axis: Axis) -> &str {
        self.labels[axis.index()].text()
    }
}

impl Drawable for Legend {
    fn draw<D: DrawTarget<Color = Rgb565>>(&self, display: &mut D) -> Result<(), D::Error> {
        self.bounds
            .into_styled(PrimitiveStyle::with_fill(Rgb565::WHITE))
            .draw(display)?;

        for label in &self.labels {
            label.draw(display)?;
        }
        Ok(())
    }

    fn bounds(&self) -> Rectangle {
        self.bounds
    }

    fn is_dirty(&self) -> bool {
        self.labels.iter().any(|label| label.is_dirty())
    }

    fn mark_clean(&mut self) {
        for label in &mut self.labels {
            label.mark_clean();
        }
    }

    fn mark_dirty(&mut self) {
        for label in &mut self.labels {
            label.mark_dirty();
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn legend() -> Legend {
        Legend::new(Rectangle::new(Point::zero(), Size::new(320, 30)))
    }

    #[test]
    fn test_one_g_formats_as_unity() {
        assert_eq!(format_axis_g(Axis::X, 9.81).as_str(), "X:1.00G");
    }

    #[test]
    fn test_zero_formats_as_zero() {
        assert_eq!(format_axis_g(Axis::Y, 0.0).as_str(), "Y:0.00G");
    }

    #[test]
    fn test_negative_reading_keeps_sign() {
        assert_eq!(format_axis_g(Axis::Z, -9.81).as_str(), "Z:-1.00G");
    }

    #[test]
    fn test_update_overwrites_all_labels() {
        let mut legend = legend();
        assert_eq!(legend.text(Axis::X), "X: --");

        legend.update(&Sample::new(9.81, 0.0, -9.81));
        assert_eq!(legend.text(Axis::X), "X:1.00G");
        assert_eq!(legend.text(Axis::Y), "Y:0.00G");
        assert_eq!(legend.text(Axis::Z), "Z:-1.00G");

        legend.update(&Sample::new(0.0, 0.0, 9.81));
        assert_eq!(legend.text(Axis::X), "X:0.00G");
        assert_eq!(legend.text(Axis::Z), "Z:1.00G");
    }
}
