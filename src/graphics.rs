//! Graphics support via embedded-graphics
//!
//! [`Display`] implements [`DrawTarget`] with [`Rgb565`] pixels, drawing
//! straight to the controller. There is no frame buffer: filled shapes and
//! images become window writes streamed through the staging buffer, and
//! everything else is plotted pixel by pixel.
//!
//! ## Example
//!
//! ```rust,no_run
//! use embedded_graphics::{
//!     mono_font::{ascii::FONT_6X10, MonoTextStyle},
//!     pixelcolor::Rgb565,
//!     prelude::*,
//!     primitives::{Circle, PrimitiveStyle, Rectangle},
//!     text::Text,
//! };
//! # use core::convert::Infallible;
//! # use embedded_hal::digital::OutputPin;
//! # use embedded_hal::spi::{Operation, SpiDevice};
//! # use ili9341_dma::{Builder, CompletionFlag, Dimensions, Display, Interface};
//! # struct MockSpi;
//! # impl embedded_hal::spi::ErrorType for MockSpi { type Error = Infallible; }
//! # impl SpiDevice for MockSpi {
//! #     fn transaction(
//! #         &mut self,
//! #         _operations: &mut [Operation<'_, u8>],
//! #     ) -> Result<(), Self::Error> {
//! #         Ok(())
//! #     }
//! # }
//! # struct MockPin;
//! # impl embedded_hal::digital::ErrorType for MockPin { type Error = Infallible; }
//! # impl OutputPin for MockPin {
//! #     fn set_low(&mut self) -> Result<(), Self::Error> { Ok(()) }
//! #     fn set_high(&mut self) -> Result<(), Self::Error> { Ok(()) }
//! # }
//! # static FLAG: CompletionFlag = CompletionFlag::new();
//! # let interface = Interface::new(MockSpi, MockPin, MockPin);
//! # let config = match Builder::new().dimensions(Dimensions::native()).build() {
//! #     Ok(config) => config,
//! #     Err(_) => return,
//! # };
//! let mut display = Display::new(interface, config, &FLAG);
//!
//! let _ = display.clear(Rgb565::BLACK.into());
//!
//! let _ = Rectangle::new(Point::new(10, 10), Size::new(50, 30))
//!     .into_styled(PrimitiveStyle::with_fill(Rgb565::BLUE))
//!     .draw(&mut display);
//!
//! let _ = Circle::new(Point::new(100, 50), 40)
//!     .into_styled(PrimitiveStyle::with_stroke(Rgb565::YELLOW, 2))
//!     .draw(&mut display);
//!
//! let _ = Text::new(
//!     "Hello, ILI9341!",
//!     Point::new(10, 100),
//!     MonoTextStyle::new(&FONT_6X10, Rgb565::WHITE),
//! )
//! .draw(&mut display);
//! ```

use embedded_graphics_core::{
    draw_target::DrawTarget,
    geometry::{Dimensions as _, OriginDimensions, Point, Size},
    pixelcolor::Rgb565,
    prelude::{Pixel, PointsIter},
    primitives::Rectangle,
};

use crate::color::Color;
use crate::display::Display;
use crate::error::Error;
use crate::interface::DisplayInterface;

/// Panel-space origin and size of a rectangle already clipped to the panel
fn panel_rect(area: &Rectangle) -> Option<(u16, u16, u16, u16)> {
    let size = area.size;
    if size.width == 0 || size.height == 0 {
        return None;
    }
    let Point { x, y } = area.top_left;
    Some((
        u16::try_from(x).ok()?,
        u16::try_from(y).ok()?,
        u16::try_from(size.width).ok()?,
        u16::try_from(size.height).ok()?,
    ))
}

impl<I> DrawTarget for Display<'_, I>
where
    I: DisplayInterface,
{
    type Color = Rgb565;
    type Error = Error<I>;

    fn draw_iter<Iter>(&mut self, pixels: Iter) -> Result<(), Self::Error>
    where
        Iter: IntoIterator<Item = Pixel<Self::Color>>,
    {
        for Pixel(Point { x, y }, color) in pixels {
            let (Ok(x), Ok(y)) = (u16::try_from(x), u16::try_from(y)) else {
                continue;
            };
            self.plot_pixel(x, y, color.into())?;
        }
        Ok(())
    }

    fn fill_contiguous<Iter>(&mut self, area: &Rectangle, colors: Iter) -> Result<(), Self::Error>
    where
        Iter: IntoIterator<Item = Self::Color>,
    {
        let visible = area.intersection(&self.bounding_box());
        if visible != *area {
            // Partially off-panel, drop the hidden pixels one by one
            let pixels = area
                .points()
                .zip(colors)
                .filter(|(point, _)| visible.contains(*point))
                .map(|(point, color)| Pixel(point, color));
            return self.draw_iter(pixels);
        }
        let Some((x, y, width, height)) = panel_rect(area) else {
            return Ok(());
        };
        self.write_pixels(x, y, width, height, colors.into_iter().map(Color::from))
    }

    fn fill_solid(&mut self, area: &Rectangle, color: Self::Color) -> Result<(), Self::Error> {
        let visible = area.intersection(&self.bounding_box());
        let Some((x, y, width, height)) = panel_rect(&visible) else {
            return Ok(());
        };
        self.fill_rectangle(x, y, width, height, color.into())
    }

    fn clear(&mut self, color: Self::Color) -> Result<(), Self::Error> {
        Display::clear(self, color.into())
    }
}

impl<I> OriginDimensions for Display<'_, I>
where
    I: DisplayInterface,
{
    fn size(&self) -> Size {
        let rotated = self.dimensions();
        Size::new(rotated.width as u32, rotated.height as u32)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::{Builder, Dimensions, Rotation};
    use crate::interface::TransferStatus;
    use crate::transfer::CompletionFlag;
    use alloc::vec::Vec;
    use embedded_graphics::prelude::*;
    use embedded_graphics::primitives::PrimitiveStyle;
    use embedded_hal::delay::DelayNs;

    #[derive(Debug, Default)]
    struct MockInterface {
        pixels: Vec<Vec<u8>>,
        transfers: Vec<Vec<u8>>,
        windows: Vec<[u8; 4]>,
    }

    impl DisplayInterface for MockInterface {
        type Error = core::convert::Infallible;

        fn send_command(&mut self, _command: u8) -> Result<(), Self::Error> {
            Ok(())
        }

        fn send_data(&mut self, data: &[u8]) -> Result<(), Self::Error> {
            if let Ok(bytes) = <[u8; 4]>::try_from(data) {
                self.windows.push(bytes);
            } else {
                self.pixels.push(data.to_vec());
            }
            Ok(())
        }

        fn set_data_mode(&mut self) -> Result<(), Self::Error> {
            Ok(())
        }

        fn start_transfer(&mut self, data: &[u8]) -> Result<TransferStatus, Self::Error> {
            self.transfers.push(data.to_vec());
            Ok(TransferStatus::Complete)
        }

        fn reset<D: DelayNs>(&mut self, _delay: &mut D, _pulse_ms: u32) -> Result<(), Self::Error> {
            Ok(())
        }
    }

    fn test_display(flag: &CompletionFlag, rotation: Rotation) -> Display<'_, MockInterface> {
        let config = Builder::new()
            .dimensions(Dimensions::native())
            .rotation(rotation)
            .build()
            .unwrap();
        Display::new(MockInterface::default(), config, flag)
    }

    #[test]
    fn test_size_follows_rotation() {
        let flag = CompletionFlag::new();
        assert_eq!(test_display(&flag, Rotation::Rotate0).size(), Size::new(240, 320));
        assert_eq!(test_display(&flag, Rotation::Rotate90).size(), Size::new(320, 240));
    }

    #[test]
    fn test_filled_rectangle_is_one_window_write() {
        let flag = CompletionFlag::new();
        let mut display = test_display(&flag, Rotation::Rotate0);
        Rectangle::new(Point::new(10, 20), Size::new(10, 10))
            .into_styled(PrimitiveStyle::with_fill(Rgb565::RED))
            .draw(&mut display)
            .unwrap();

        let mock = display.release();
        assert_eq!(mock.windows, [[0, 10, 0, 19], [0, 20, 0, 29]]);
        assert!(mock.pixels.is_empty());
        let bytes: Vec<u8> = mock.transfers.concat();
        assert_eq!(bytes.len(), 200);
        assert!(bytes.chunks(2).all(|px| px == [0xF8, 0x00]));
    }

    #[test]
    fn test_fill_solid_clips_to_panel() {
        let flag = CompletionFlag::new();
        let mut display = test_display(&flag, Rotation::Rotate0);
        display
            .fill_solid(
                &Rectangle::new(Point::new(-5, 310), Size::new(10, 20)),
                Rgb565::WHITE,
            )
            .unwrap();

        let mock = display.release();
        assert_eq!(mock.windows, [[0, 0, 0, 4], [0x01, 0x36, 0x01, 0x3F]]);
        assert_eq!(mock.transfers.concat().len(), 5 * 10 * 2);
    }

    #[test]
    fn test_fill_solid_off_panel_sends_nothing() {
        let flag = CompletionFlag::new();
        let mut display = test_display(&flag, Rotation::Rotate0);
        display
            .fill_solid(
                &Rectangle::new(Point::new(300, 0), Size::new(10, 10)),
                Rgb565::WHITE,
            )
            .unwrap();
        let mock = display.release();
        assert!(mock.windows.is_empty());
        assert!(mock.transfers.is_empty());
    }

    #[test]
    fn test_fill_contiguous_streams_colors_in_order() {
        let flag = CompletionFlag::new();
        let mut display = test_display(&flag, Rotation::Rotate0);
        let colors = [Rgb565::RED, Rgb565::GREEN, Rgb565::BLUE, Rgb565::WHITE];
        display
            .fill_contiguous(&Rectangle::new(Point::new(1, 1), Size::new(2, 2)), colors)
            .unwrap();

        let mock = display.release();
        assert_eq!(
            mock.transfers,
            [alloc::vec![0xF8, 0x00, 0x07, 0xE0, 0x00, 0x1F, 0xFF, 0xFF]]
        );
    }

    #[test]
    fn test_fill_contiguous_partially_visible_plots_visible_pixels() {
        let flag = CompletionFlag::new();
        let mut display = test_display(&flag, Rotation::Rotate0);
        let colors = [Rgb565::RED, Rgb565::GREEN, Rgb565::BLUE, Rgb565::WHITE];
        display
            .fill_contiguous(&Rectangle::new(Point::new(-1, 0), Size::new(2, 2)), colors)
            .unwrap();

        let mock = display.release();
        assert!(mock.transfers.is_empty());
        assert_eq!(
            mock.pixels,
            [alloc::vec![0x07, 0xE0], alloc::vec![0xFF, 0xFF]]
        );
    }

    #[test]
    fn test_draw_iter_skips_off_panel_pixels() {
        let flag = CompletionFlag::new();
        let mut display = test_display(&flag, Rotation::Rotate0);
        let pixels = [
            Pixel(Point::new(-1, 0), Rgb565::BLUE),
            Pixel(Point::new(0, -1), Rgb565::BLUE),
            Pixel(Point::new(0, 0), Rgb565::BLUE),
            Pixel(Point::new(239, 319), Rgb565::BLUE),
            Pixel(Point::new(240, 0), Rgb565::BLUE),
            Pixel(Point::new(70_000, 0), Rgb565::BLUE),
        ];
        display.draw_iter(pixels).unwrap();

        let mock = display.release();
        assert_eq!(mock.pixels.len(), 2);
        assert!(mock.pixels.iter().all(|px| px == &[0x00, 0x1F]));
        assert!(mock.transfers.is_empty());
    }

    #[test]
    fn test_clear_fills_rotated_panel() {
        let flag = CompletionFlag::new();
        let mut display = test_display(&flag, Rotation::Rotate90);
        DrawTarget::clear(&mut display, Rgb565::BLACK).unwrap();
        let mock = display.release();
        assert_eq!(mock.windows, [[0, 0, 0x01, 0x3F], [0, 0, 0, 0xEF]]);
        assert_eq!(mock.transfers.len(), 1200);
    }
}
