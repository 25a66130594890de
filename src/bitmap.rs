//! Monochrome bitmap unpacking
//!
//! A mono bitmap stores one bit per pixel, most-significant bit first. Each
//! row starts on a fresh byte, so a row of `width` pixels occupies
//! `ceil(width / 8)` bytes and the unused low bits of its last byte are
//! skipped.
//!
//! A clear bit selects the foreground color and a set bit the background
//! color.
//!
//! ## Example
//!
//! ```
//! use ili9341_dma::bitmap::MonoCursor;
//!
//! // 4 pixels per row, two rows, low nibbles are padding
//! let data = [0b1010_0000, 0b0101_0000];
//! let bits: Vec<bool> = MonoCursor::new(&data, 4).take(8).collect();
//! assert_eq!(bits, [true, false, true, false, false, true, false, true]);
//! ```

/// Mask of the first pixel in every source byte
pub const LEADING_BIT: u8 = 0x80;

/// Bytes needed to hold a `width` x `height` mono bitmap
pub fn mono_bitmap_len(width: u16, height: u16) -> usize {
    (width as usize).div_ceil(8) * height as usize
}

/// Whether the cursor must skip the padding bits of the current byte
///
/// True when `produced` pixels have just completed a row of `width` and the
/// mask did not already wrap to [`LEADING_BIT`] on the same pixel.
pub fn needs_row_realign(produced: u32, width: u32, mask: u8) -> bool {
    width != 0 && produced % width == 0 && mask != LEADING_BIT
}

/// Reads pixels out of a row-byte-aligned mono bitmap
///
/// Yields `true` for a set bit (background), `false` for a clear bit
/// (foreground), and ends when the source data runs out.
#[derive(Clone, Debug)]
pub struct MonoCursor<'a> {
    data: &'a [u8],
    byte: usize,
    mask: u8,
    produced: u32,
    width: u32,
}

impl<'a> MonoCursor<'a> {
    /// Start reading `data` as rows of `width` pixels
    pub fn new(data: &'a [u8], width: u16) -> Self {
        Self {
            data,
            byte: 0,
            mask: LEADING_BIT,
            produced: 0,
            width: width as u32,
        }
    }

    /// Pixels produced so far
    pub fn produced(&self) -> u32 {
        self.produced
    }

    /// Fill `slots` with `fg` or `bg`, one pixel per slot
    ///
    /// Returns how many slots were written, which is less than
    /// `slots.len()` only if the source data ran out.
    pub fn fill(&mut self, slots: &mut [[u8; 2]], fg: [u8; 2], bg: [u8; 2]) -> usize {
        let mut written = 0;
        for slot in slots.iter_mut() {
            let Some(set) = self.next() else {
                break;
            };
            *slot = if set { bg } else { fg };
            written += 1;
        }
        written
    }

    fn advance_byte(&mut self) {
        self.mask = LEADING_BIT;
        self.byte += 1;
    }
}

impl Iterator for MonoCursor<'_> {
    type Item = bool;

    fn next(&mut self) -> Option<bool> {
        let byte = *self.data.get(self.byte)?;
        let set = byte & self.mask != 0;

        self.produced = self.produced.wrapping_add(1);
        self.mask >>= 1;
        if self.mask == 0 {
            self.advance_byte();
        }
        if needs_row_realign(self.produced, self.width, self.mask) {
            self.advance_byte();
        }

        Some(set)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use alloc::vec::Vec;

    const FG: [u8; 2] = [0x00, 0x00];
    const BG: [u8; 2] = [0xFF, 0xFF];

    fn unpack(data: &[u8], width: u16, count: usize) -> Vec<bool> {
        MonoCursor::new(data, width).take(count).collect()
    }

    #[test]
    fn test_realign_only_mid_byte_at_row_end() {
        // Row of 4 ends mid-byte
        assert!(needs_row_realign(4, 4, 0x08));
        // Not a row boundary
        assert!(!needs_row_realign(3, 4, 0x10));
        // Row of 8 ends exactly as the mask wraps
        assert!(!needs_row_realign(8, 8, LEADING_BIT));
        // Row of 12 ends in the middle of the second byte
        assert!(needs_row_realign(12, 12, 0x08));
        assert!(!needs_row_realign(8, 12, LEADING_BIT));
        // Degenerate width never realigns
        assert!(!needs_row_realign(0, 0, 0x40));
    }

    #[test]
    fn test_full_byte_row_is_msb_first() {
        let bits = unpack(&[0b1011_0000], 8, 8);
        assert_eq!(bits, [true, false, true, true, false, false, false, false]);
    }

    #[test]
    fn test_fill_maps_set_bits_to_background() {
        let mut cursor = MonoCursor::new(&[0b1011_0000], 8);
        let mut slots = [[0x55u8; 2]; 8];
        assert_eq!(cursor.fill(&mut slots, FG, BG), 8);
        assert_eq!(slots, [BG, FG, BG, BG, FG, FG, FG, FG]);
    }

    #[test]
    fn test_narrow_rows_start_on_fresh_byte() {
        // The low nibble of byte 0 is padding and must not leak into row 2
        let bits = unpack(&[0b1010_1111, 0b0101_1111], 4, 8);
        assert_eq!(bits, [true, false, true, false, false, true, false, true]);
    }

    #[test]
    fn test_rows_spanning_two_bytes() {
        // 10 pixels per row: 8 from byte 0, 2 from byte 1, then row 2 at byte 2
        let data = [0xFF, 0b1011_1111, 0x00, 0b0100_0000];
        let bits = unpack(&data, 10, 20);
        let mut expected = Vec::new();
        expected.extend([true; 8]);
        expected.extend([true, false]);
        expected.extend([false; 8]);
        expected.extend([false, true]);
        assert_eq!(bits, expected);
    }

    #[test]
    fn test_single_pixel_rows() {
        let bits = unpack(&[0x80, 0x00, 0x80], 1, 3);
        assert_eq!(bits, [true, false, true]);
    }

    #[test]
    fn test_cursor_resumes_across_chunks() {
        // 12-pixel rows, staged 5 pixels at a time
        let data = [0b1000_0000, 0b0001_0000, 0b0000_0000, 0b0001_0000];
        let mut cursor = MonoCursor::new(&data, 12);
        let mut all = Vec::new();
        for _ in 0..5 {
            let mut slots = [[0u8; 2]; 5];
            let n = cursor.fill(&mut slots, FG, BG);
            all.extend_from_slice(&slots[..n]);
        }
        assert_eq!(all.len(), 24);
        assert_eq!(cursor.produced(), 24);
        let set: Vec<usize> = all
            .iter()
            .enumerate()
            .filter(|(_, slot)| **slot == BG)
            .map(|(i, _)| i)
            .collect();
        assert_eq!(set, [0, 11, 23]);
    }

    #[test]
    fn test_cursor_stops_when_data_runs_out() {
        let mut cursor = MonoCursor::new(&[0xFF], 8);
        let mut slots = [[0u8; 2]; 10];
        assert_eq!(cursor.fill(&mut slots, FG, BG), 8);
        assert_eq!(cursor.next(), None);
    }

    #[test]
    fn test_mono_bitmap_len() {
        assert_eq!(mono_bitmap_len(8, 1), 1);
        assert_eq!(mono_bitmap_len(4, 2), 2);
        assert_eq!(mono_bitmap_len(10, 3), 6);
        assert_eq!(mono_bitmap_len(0, 3), 0);
    }
}
