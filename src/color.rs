//! RGB565 color type
//!
//! The ILI9341 is configured for 16-bit RGB565 pixels (pixel format `0x55`).
//! A [`Color`] holds the raw 565 value in host byte order; the controller
//! expects each pixel most-significant byte first.
//!
//! ## Byte Order
//!
//! Application code only ever handles host-order values. The conversion to
//! wire order happens exactly once, in [`Color::to_wire`], at the point
//! where a pixel is written into a transmit buffer or onto the bus.
//!
//! | Color | Raw      | Wire bytes     |
//! |-------|----------|----------------|
//! | Black | `0x0000` | `[0x00, 0x00]` |
//! | White | `0xFFFF` | `[0xFF, 0xFF]` |
//! | Red   | `0xF800` | `[0xF8, 0x00]` |
//! | Blue  | `0x001F` | `[0x00, 0x1F]` |
//!
//! ## Example
//!
//! ```
//! use ili9341_dma::Color;
//!
//! let orange = Color::from_rgb(255, 165, 0);
//! assert_eq!(orange.raw(), 0xFD20);
//! assert_eq!(orange.to_wire(), [0xFD, 0x20]);
//! assert_eq!(Color::from_wire(orange.to_wire()), orange);
//! ```

/// A 16-bit RGB565 color in host byte order
#[derive(Clone, Copy, PartialEq, Eq, Debug, Default, Hash)]
pub struct Color(u16);

impl Color {
    /// Black (`0x0000`)
    pub const BLACK: Self = Self(0x0000);
    /// White (`0xFFFF`)
    pub const WHITE: Self = Self(0xFFFF);
    /// Red (`0xF800`)
    pub const RED: Self = Self(0xF800);
    /// Green (`0x07E0`)
    pub const GREEN: Self = Self(0x07E0);
    /// Blue (`0x001F`)
    pub const BLUE: Self = Self(0x001F);
    /// Yellow (`0xFFE0`)
    pub const YELLOW: Self = Self(0xFFE0);
    /// Cyan (`0x07FF`)
    pub const CYAN: Self = Self(0x07FF);
    /// Magenta (`0xF81F`)
    pub const MAGENTA: Self = Self(0xF81F);

    /// Create a color from a raw RGB565 value
    pub const fn new(raw: u16) -> Self {
        Self(raw)
    }

    /// Create a color from 8-bit red, green and blue components
    ///
    /// The low bits of each component are discarded (5/6/5 bits kept).
    pub const fn from_rgb(r: u8, g: u8, b: u8) -> Self {
        let r = (r as u16 >> 3) << 11;
        let g = (g as u16 >> 2) << 5;
        let b = b as u16 >> 3;
        Self(r | g | b)
    }

    /// Raw RGB565 value in host byte order
    pub const fn raw(self) -> u16 {
        self.0
    }

    /// Encode the color in the controller's byte order (big-endian)
    pub const fn to_wire(self) -> [u8; 2] {
        self.0.to_be_bytes()
    }

    /// Decode a color from two bytes in the controller's byte order
    pub const fn from_wire(bytes: [u8; 2]) -> Self {
        Self(u16::from_be_bytes(bytes))
    }
}

impl From<u16> for Color {
    fn from(raw: u16) -> Self {
        Self(raw)
    }
}

impl From<Color> for u16 {
    fn from(color: Color) -> Self {
        color.0
    }
}

#[cfg(feature = "graphics")]
impl embedded_graphics_core::prelude::PixelColor for Color {
    type Raw = embedded_graphics_core::pixelcolor::raw::RawU16;
}

#[cfg(feature = "graphics")]
impl From<embedded_graphics_core::pixelcolor::Rgb565> for Color {
    fn from(color: embedded_graphics_core::pixelcolor::Rgb565) -> Self {
        use embedded_graphics_core::pixelcolor::IntoStorage;
        Self(color.into_storage())
    }
}

#[cfg(feature = "graphics")]
impl From<Color> for embedded_graphics_core::pixelcolor::Rgb565 {
    fn from(color: Color) -> Self {
        use embedded_graphics_core::pixelcolor::raw::RawU16;
        Self::from(RawU16::new(color.0))
    }
}
