//! RAM framebuffer with dirty-region flushing.
//!
//! All drawing targets this buffer instead of the hardware display. After a
//! draw pass, only the bounding rectangle of changed pixels is pushed to the
//! display in a single `fill_contiguous` transfer.

extern crate alloc;
use alloc::vec;
use alloc::vec::Vec;

use core::convert::Infallible;

use embedded_graphics::pixelcolor::Rgb565;
use embedded_graphics::prelude::*;
use embedded_graphics::primitives::Rectangle;
use log::debug;

use crate::ui::{DISPLAY_HEIGHT_PX, DISPLAY_WIDTH_PX};

const WIDTH: usize = DISPLAY_WIDTH_PX as usize;
const HEIGHT: usize = DISPLAY_HEIGHT_PX as usize;

/// Framebuffer implementing `DrawTarget<Color = Rgb565>`.
///
/// Tracks the bounding box of pixels whose color actually changed since the
/// last flush; an unchanged redraw flushes nothing.
pub struct FrameBuffer {
    pixels: Vec<Rgb565>,
    /// Inclusive (min, max) corners of the changed region.
    dirty: Option<(Point, Point)>,
}

impl Default for FrameBuffer {
    fn default() -> Self {
        Self::new()
    }
}

impl FrameBuffer {
    pub fn new() -> Self {
        Self {
            pixels: vec![Rgb565::BLACK; WIDTH * HEIGHT],
            dirty: None,
        }
    }

    fn set_pixel(&mut self, x: usize, y: usize, color: Rgb565) {
        let idx = y * WIDTH + x;
        if self.pixels[idx] == color {
            return;
        }
        self.pixels[idx] = color;

        let p = Point::new(x as i32, y as i32);
        self.dirty = Some(match self.dirty {
            None => (p, p),
            Some((min, max)) => (
                Point::new(min.x.min(p.x), min.y.min(p.y)),
                Point::new(max.x.max(p.x), max.y.max(p.y)),
            ),
        });
    }

    /// Push the changed region to a hardware display and reset the dirty
    /// state. A no-op when nothing changed.
    pub fn flush<D>(&mut self, display: &mut D) -> Result<(), D::Error>
    where
        D: DrawTarget<Color = Rgb565>,
    {
        let Some((min, max)) = self.dirty.take() else {
            return Ok(());
        };

        let area = Rectangle::with_corners(min, max);
        debug!(
            "flushing {}x{} region at ({}, {})",
            area.size.width, area.size.height, min.x, min.y
        );

        let pixels = &self.pixels;
        let row_width = area.size.width as usize;
        let colors = (min.y..=max.y).flat_map(move |y| {
            let row_start = y as usize * WIDTH + min.x as usize;
            pixels[row_start..row_start + row_width].iter().copied()
        });

        display.fill_contiguous(&area, colors)
    }
}

impl OriginDimensions for FrameBuffer {
    fn size(&self) -> Size {
        Size::new(WIDTH as u32, HEIGHT as u32)
    }
}

impl DrawTarget for FrameBuffer {
    type Color = Rgb565;
    type Error = Infallible;

    fn draw_iter<I>(&mut self, pixels: I) -> Result<(), Self::Error>
    where
        I: IntoIterator<Item = Pixel<Self::Color>>,
    {
        for Pixel(coord, color) in pixels {
            if coord.x >= 0
                && coord.y >= 0
                && (coord.x as usize) < WIDTH
                && (coord.y as usize) < HEIGHT
            {
                self.set_pixel(coord.x as usize, coord.y as usize, color);
            }
        }
        Ok(())
    }

    fn fill_solid(&mut self, area: &Rectangle, color: Self::Color) -> Result<(), Self::Error> {
        // Ends come from the unclamped origin, so a partially off-screen
        // rectangle keeps its true extent.
        let x_start = (area.top_left.x.max(0) as usize).min(WIDTH);
        let y_start = (area.top_left.y.max(0) as usize).min(HEIGHT);
        let x_end = (area.top_left.x as i64 + area.size.width as i64).clamp(0, WIDTH as i64) as usize;
        let y_end =
            (area.top_left.y as i64 + area.size.height as i64).clamp(0, HEIGHT as i64) as usize;

        for y in y_start..y_end {
            for x in x_start..x_end {
                self.set_pixel(x, y, color);
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    /// Capture target that records the area of every flush.
    struct CaptureDisplay {
        areas: std::vec::Vec<Rectangle>,
        pixels_received: usize,
    }

    impl OriginDimensions for CaptureDisplay {
        fn size(&self) -> Size {
            Size::new(WIDTH as u32, HEIGHT as u32)
        }
    }

    impl DrawTarget for CaptureDisplay {
        type Color = Rgb565;
        type Error = Infallible;

        fn draw_iter<I>(&mut self, pixels: I) -> Result<(), Self::Error>
        where
            I: IntoIterator<Item = Pixel<Self::Color>>,
        {
            self.pixels_received += pixels.into_iter().count();
            Ok(())
        }

        fn fill_contiguous<I>(&mut self, area: &Rectangle, colors: I) -> Result<(), Self::Error>
        where
            I: IntoIterator<Item = Self::Color>,
        {
            self.areas.push(*area);
            self.pixels_received += colors.into_iter().count();
            Ok(())
        }
    }

    #[test]
    fn test_flush_sends_only_the_changed_region() {
        let mut fb = FrameBuffer::new();
        let mut display = CaptureDisplay {
            areas: vec![],
            pixels_received: 0,
        };

        fb.draw_iter([
            Pixel(Point::new(10, 20), Rgb565::RED),
            Pixel(Point::new(12, 24), Rgb565::GREEN),
        ])
        .unwrap();
        fb.flush(&mut display).unwrap();

        assert_eq!(
            display.areas,
            vec![Rectangle::with_corners(Point::new(10, 20), Point::new(12, 24))]
        );
        assert_eq!(display.pixels_received, 3 * 5);
    }

    #[test]
    fn test_unchanged_redraw_flushes_nothing() {
        let mut fb = FrameBuffer::new();
        let mut display = CaptureDisplay {
            areas: vec![],
            pixels_received: 0,
        };

        // Black pixels over a black buffer change nothing.
        fb.draw_iter([Pixel(Point::new(5, 5), Rgb565::BLACK)]).unwrap();
        fb.flush(&mut display).unwrap();

        assert!(display.areas.is_empty());
        assert_eq!(display.pixels_received, 0);
    }

    #[test]
    fn test_fill_solid_clips_negative_origin() {
        let mut fb = FrameBuffer::new();
        fb.fill_solid(
            &Rectangle::new(Point::new(-10, -5), Size::new(20, 10)),
            Rgb565::RED,
        )
        .unwrap();

        // Only the on-screen part of the rectangle is filled: 10 columns and
        // 5 rows, not the full 20x10 shifted to the origin.
        assert_eq!(fb.dirty, Some((Point::new(0, 0), Point::new(9, 4))));
    }

    #[test]
    fn test_out_of_bounds_pixels_are_dropped() {
        let mut fb = FrameBuffer::new();
        fb.draw_iter([
            Pixel(Point::new(-1, 0), Rgb565::RED),
            Pixel(Point::new(0, HEIGHT as i32), Rgb565::RED),
        ])
        .unwrap();

        assert!(fb.dirty.is_none());
    }
}
