//! Address window
//!
//! The controller writes incoming pixels into the active window, advancing
//! from `x_start` to `x_end` and then wrapping to `x_start` on the next row.
//! A single memory-write therefore covers a whole rectangle.

use crate::config::Dimensions;

/// Inclusive rectangle of panel pixels
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Window {
    /// First column
    pub x_start: u16,
    /// First row
    pub y_start: u16,
    /// Last column (inclusive)
    pub x_end: u16,
    /// Last row (inclusive)
    pub y_end: u16,
}

impl Window {
    /// Create a window from inclusive corner coordinates
    pub const fn new(x_start: u16, y_start: u16, x_end: u16, y_end: u16) -> Self {
        Self {
            x_start,
            y_start,
            x_end,
            y_end,
        }
    }

    /// Window covering `width` x `height` pixels from `(x, y)`
    ///
    /// Returns `None` for an empty rectangle or one whose far edge does not
    /// fit in `u16`.
    #[allow(clippy::many_single_char_names)]
    pub fn from_rect(x: u16, y: u16, width: u16, height: u16) -> Option<Self> {
        if width == 0 || height == 0 {
            return None;
        }
        let x_end = x.checked_add(width - 1)?;
        let y_end = y.checked_add(height - 1)?;
        Some(Self::new(x, y, x_end, y_end))
    }

    /// Single-pixel window
    pub const fn pixel(x: u16, y: u16) -> Self {
        Self::new(x, y, x, y)
    }

    /// Width in pixels
    pub fn width(&self) -> u16 {
        self.x_end - self.x_start + 1
    }

    /// Height in pixels
    pub fn height(&self) -> u16 {
        self.y_end - self.y_start + 1
    }

    /// Number of pixels in the window
    pub fn pixel_count(&self) -> usize {
        self.width() as usize * self.height() as usize
    }

    /// Whether the window is well-formed and lies within `dims`
    pub fn fits(&self, dims: Dimensions) -> bool {
        self.x_start <= self.x_end
            && self.y_start <= self.y_end
            && self.x_end < dims.width
            && self.y_end < dims.height
    }

    /// Parameters for column address set: `[start_hi, start_lo, end_hi, end_lo]`
    pub fn column_bytes(&self) -> [u8; 4] {
        range_bytes(self.x_start, self.x_end)
    }

    /// Parameters for page address set: `[start_hi, start_lo, end_hi, end_lo]`
    pub fn page_bytes(&self) -> [u8; 4] {
        range_bytes(self.y_start, self.y_end)
    }
}

fn range_bytes(start: u16, end: u16) -> [u8; 4] {
    let [s_hi, s_lo] = start.to_be_bytes();
    let [e_hi, e_lo] = end.to_be_bytes();
    [s_hi, s_lo, e_hi, e_lo]
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parameter_bytes_are_big_endian() {
        let window = Window::new(10, 10, 19, 19);
        assert_eq!(window.column_bytes(), [0, 10, 0, 19]);
        assert_eq!(window.page_bytes(), [0, 10, 0, 19]);

        let window = Window::new(0x0102, 0x0013, 0x00EF, 0x013F);
        assert_eq!(window.column_bytes(), [0x01, 0x02, 0x00, 0xEF]);
        assert_eq!(window.page_bytes(), [0x00, 0x13, 0x01, 0x3F]);
    }

    #[test]
    fn test_from_rect() {
        assert_eq!(
            Window::from_rect(10, 20, 5, 3),
            Some(Window::new(10, 20, 14, 22))
        );
        assert_eq!(Window::from_rect(0, 0, 0, 3), None);
        assert_eq!(Window::from_rect(0, 0, 3, 0), None);
        assert_eq!(Window::from_rect(u16::MAX, 0, 2, 1), None);
    }

    #[test]
    fn test_size_helpers() {
        let window = Window::new(10, 20, 14, 22);
        assert_eq!(window.width(), 5);
        assert_eq!(window.height(), 3);
        assert_eq!(window.pixel_count(), 15);
        assert_eq!(Window::pixel(3, 4).pixel_count(), 1);
    }

    #[test]
    fn test_fits() {
        let dims = Dimensions::native();
        assert!(Window::new(0, 0, 239, 319).fits(dims));
        assert!(!Window::new(0, 0, 240, 319).fits(dims));
        assert!(!Window::new(0, 0, 239, 320).fits(dims));
        assert!(!Window::new(5, 0, 4, 0).fits(dims));
        assert!(!Window::new(0, 5, 0, 4).fits(dims));
    }
}
