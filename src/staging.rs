//! Fixed-capacity staging buffer for chunked pixel streams
//!
//! Each slot holds one pixel already in wire order, so the whole buffer can
//! be handed to [`DisplayInterface::start_transfer`](crate::DisplayInterface::start_transfer)
//! as a byte slice without further conversion.

use crate::color::Color;

/// Default staging capacity in pixels
///
/// 64 pixels, i.e. 128 bytes per bulk transfer.
pub const STAGING_CAPACITY: usize = 64;

/// Buffer of `N` wire-encoded pixels, reused for every chunk of a draw call
#[derive(Clone, Debug)]
pub struct StagingBuffer<const N: usize = STAGING_CAPACITY> {
    slots: [[u8; 2]; N],
}

impl<const N: usize> StagingBuffer<N> {
    /// Capacity in pixels
    pub const CAPACITY: usize = N;
    /// Capacity in bytes
    pub const CAPACITY_BYTES: usize = N * 2;

    /// Create a buffer with every slot black
    pub const fn new() -> Self {
        Self { slots: [[0; 2]; N] }
    }

    /// Write `color` into every slot
    pub fn fill(&mut self, color: Color) {
        self.slots.fill(color.to_wire());
    }

    /// Mutable access to the slots for chunk preparation
    pub fn slots_mut(&mut self) -> &mut [[u8; 2]; N] {
        &mut self.slots
    }

    /// The first `pixels` slots as bytes, ready for transfer
    ///
    /// `pixels` is clamped to the capacity.
    pub fn as_bytes(&self, pixels: usize) -> &[u8] {
        let pixels = pixels.min(N);
        self.slots[..pixels].as_flattened()
    }
}

impl<const N: usize> Default for StagingBuffer<N> {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_capacity_constants() {
        assert_eq!(StagingBuffer::<STAGING_CAPACITY>::CAPACITY, 64);
        assert_eq!(StagingBuffer::<STAGING_CAPACITY>::CAPACITY_BYTES, 128);
        assert_eq!(StagingBuffer::<8>::CAPACITY_BYTES, 16);
    }

    #[test]
    fn test_fill_writes_wire_order() {
        let mut buffer = StagingBuffer::<4>::new();
        buffer.fill(Color::new(0xF81F));
        assert_eq!(
            buffer.as_bytes(4),
            &[0xF8, 0x1F, 0xF8, 0x1F, 0xF8, 0x1F, 0xF8, 0x1F]
        );
    }

    #[test]
    fn test_as_bytes_is_clamped() {
        let mut buffer = StagingBuffer::<2>::new();
        buffer.slots_mut()[1] = [0xAB, 0xCD];
        assert_eq!(buffer.as_bytes(1), &[0, 0]);
        assert_eq!(buffer.as_bytes(99), &[0, 0, 0xAB, 0xCD]);
        assert!(buffer.as_bytes(0).is_empty());
    }
}
