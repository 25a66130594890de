//! Core display operations
//!
//! Every draw call programs the address window with synchronous commands,
//! then streams pixels. Single pixels are written synchronously; bitmaps and
//! fills go through a [`StagingBuffer`] in chunks, each chunk transferred
//! and waited for before the next one is prepared.

use embedded_hal::delay::DelayNs;

use crate::bitmap::{MonoCursor, mono_bitmap_len};
use crate::color::Color;
use crate::command::{
    COLUMN_ADDRESS_SET, DISPLAY_ON, INIT_SEQUENCE, MEMORY_ACCESS_CONTROL, MEMORY_WRITE,
    PAGE_ADDRESS_SET, SLEEP_OUT, SOFTWARE_RESET,
};
use crate::config::{Config, Dimensions, Rotation};
use crate::error::{Error, TransferError};
use crate::interface::DisplayInterface;
use crate::staging::{STAGING_CAPACITY, StagingBuffer};
use crate::transfer::{CompletionFlag, TransferEngine};
use crate::window::Window;

type DisplayResult<I> = core::result::Result<(), Error<I>>;

/// Result of a draw call that may fall outside the panel
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum DrawOutcome {
    /// The pixel was sent to the controller
    Drawn,
    /// The pixel lies outside the panel; nothing was sent
    Clipped,
}

/// Core display driver for the ILI9341
///
/// Owns the interface and a [`TransferEngine`] bound to the
/// [`CompletionFlag`] that the bus signals when a bulk transfer finishes.
/// For embedded-graphics support, see the `graphics` feature.
pub struct Display<'f, I>
where
    I: DisplayInterface,
{
    /// Hardware interface
    interface: I,
    /// Display configuration
    config: Config,
    /// Bulk transfer sequencing
    engine: TransferEngine<'f>,
}

impl<'f, I> Display<'f, I>
where
    I: DisplayInterface,
{
    /// Create a new Display instance
    ///
    /// `flag` must be the flag the interface's completion notification
    /// signals. Blocking interfaces may use any flag.
    pub fn new(interface: I, config: Config, flag: &'f CompletionFlag) -> Self {
        let engine = TransferEngine::new(flag, config.transfer_spin_limit);
        Self {
            interface,
            config,
            engine,
        }
    }

    /// Pulse the hardware reset line
    pub fn reset<D: DelayNs>(&mut self, delay: &mut D) -> DisplayResult<I> {
        log::debug!("hardware reset");
        self.interface
            .reset(delay, self.config.reset_pulse_ms)
            .map_err(Error::Interface)
    }

    /// Software reset, register setup, sleep-out and display-on
    pub fn init<D: DelayNs>(&mut self, delay: &mut D) -> DisplayResult<I> {
        log::debug!("initializing controller");
        self.ensure_idle()?;

        self.send_command(SOFTWARE_RESET)?;
        delay.delay_ms(self.config.soft_reset_delay_ms);

        for &(command, params) in INIT_SEQUENCE {
            self.send_command(command)?;
            if !params.is_empty() {
                self.send_data(params)?;
            }
        }

        self.send_command(SLEEP_OUT)?;
        delay.delay_ms(self.config.sleep_out_delay_ms);

        self.send_command(DISPLAY_ON)?;

        // Scan direction last, after the panel is on
        self.send_command(MEMORY_ACCESS_CONTROL)?;
        self.send_data(&[self.config.rotation.memory_access_control()])
    }

    /// Change the scan direction
    ///
    /// Width and height of later draw calls follow the new rotation.
    pub fn set_rotation(&mut self, rotation: Rotation) -> DisplayResult<I> {
        self.ensure_idle()?;
        self.send_command(MEMORY_ACCESS_CONTROL)?;
        self.send_data(&[rotation.memory_access_control()])?;
        self.config.rotation = rotation;
        Ok(())
    }

    /// Program the address window and start a memory write
    ///
    /// Leaves the bus in data mode, ready for `window.pixel_count()` pixels.
    ///
    /// # Errors
    ///
    /// Returns `Error::InvalidWindow` if the window is inverted or exceeds
    /// the rotated panel, and `TransferError::Pending` while a bulk transfer
    /// is outstanding. Nothing is sent in either case.
    pub fn set_window(&mut self, window: Window) -> DisplayResult<I> {
        self.ensure_idle()?;
        if !window.fits(self.dimensions()) {
            return Err(Error::InvalidWindow {
                x_start: window.x_start,
                y_start: window.y_start,
                x_end: window.x_end,
                y_end: window.y_end,
            });
        }
        log::trace!(
            "window ({}, {})..=({}, {})",
            window.x_start,
            window.y_start,
            window.x_end,
            window.y_end
        );

        self.send_command(COLUMN_ADDRESS_SET)?;
        self.send_data(&window.column_bytes())?;
        self.send_command(PAGE_ADDRESS_SET)?;
        self.send_data(&window.page_bytes())?;
        self.send_command(MEMORY_WRITE)?;
        self.interface.set_data_mode().map_err(Error::Interface)
    }

    /// Set a single pixel
    ///
    /// Coordinates outside the panel are ignored and reported as
    /// [`DrawOutcome::Clipped`] without touching the bus.
    pub fn plot_pixel(&mut self, x: u16, y: u16, color: Color) -> Result<DrawOutcome, Error<I>> {
        let dims = self.dimensions();
        if x >= dims.width || y >= dims.height {
            return Ok(DrawOutcome::Clipped);
        }
        self.set_window(Window::pixel(x, y))?;
        self.send_data(&color.to_wire())?;
        Ok(DrawOutcome::Drawn)
    }

    /// Fill a rectangle with one color
    ///
    /// The staging buffer is filled once and sent repeatedly; the last chunk
    /// carries the remainder. An empty rectangle sends nothing.
    ///
    /// # Errors
    ///
    /// Returns `Error::InvalidWindow` if the rectangle exceeds the panel.
    #[allow(clippy::many_single_char_names)]
    pub fn fill_rectangle(
        &mut self,
        x: u16,
        y: u16,
        width: u16,
        height: u16,
        color: Color,
    ) -> DisplayResult<I> {
        let Some(window) = self.rect_window(x, y, width, height)? else {
            return Ok(());
        };
        self.set_window(window)?;

        let mut staging = StagingBuffer::<STAGING_CAPACITY>::new();
        staging.fill(color);

        let mut remaining = window.pixel_count();
        let mut chunks = 0usize;
        while remaining > 0 {
            let pixels = remaining.min(STAGING_CAPACITY);
            self.engine
                .send(&mut self.interface, staging.as_bytes(pixels))?;
            remaining -= pixels;
            chunks += 1;
        }
        log::debug!("filled {width}x{height} at ({x}, {y}) in {chunks} chunks");
        Ok(())
    }

    /// Fill the whole panel with one color
    pub fn clear(&mut self, color: Color) -> DisplayResult<I> {
        let dims = self.dimensions();
        self.fill_rectangle(0, 0, dims.width, dims.height, color)
    }

    /// Copy a pre-encoded RGB565 image into a rectangle
    ///
    /// `data` holds two bytes per pixel in wire order (big-endian), rows
    /// top to bottom. It is transferred as-is in staging-sized chunks.
    ///
    /// # Errors
    ///
    /// Returns `Error::BufferTooSmall` if `data` is shorter than
    /// `width * height * 2` bytes, before anything is sent.
    #[allow(clippy::many_single_char_names)]
    pub fn draw_color_bitmap(
        &mut self,
        x: u16,
        y: u16,
        width: u16,
        height: u16,
        data: &[u8],
    ) -> DisplayResult<I> {
        let Some(window) = self.rect_window(x, y, width, height)? else {
            return Ok(());
        };
        let required = window.pixel_count() * 2;
        if data.len() < required {
            return Err(Error::BufferTooSmall {
                required,
                provided: data.len(),
            });
        }
        self.set_window(window)?;

        for chunk in data[..required].chunks(StagingBuffer::<STAGING_CAPACITY>::CAPACITY_BYTES) {
            self.engine.send(&mut self.interface, chunk)?;
        }
        log::debug!("blitted {width}x{height} color bitmap at ({x}, {y})");
        Ok(())
    }

    /// Expand a 1-bit bitmap into a rectangle using two colors
    ///
    /// A clear bit draws `fg`, a set bit draws `bg`. Rows are
    /// byte-aligned; see [`bitmap`](crate::bitmap).
    ///
    /// # Errors
    ///
    /// Returns `Error::BufferTooSmall` if `data` is shorter than
    /// `ceil(width / 8) * height` bytes, before anything is sent.
    #[allow(clippy::many_single_char_names, clippy::too_many_arguments)]
    pub fn draw_mono_bitmap(
        &mut self,
        x: u16,
        y: u16,
        width: u16,
        height: u16,
        data: &[u8],
        fg: Color,
        bg: Color,
    ) -> DisplayResult<I> {
        let Some(window) = self.rect_window(x, y, width, height)? else {
            return Ok(());
        };
        let required = mono_bitmap_len(width, height);
        if data.len() < required {
            return Err(Error::BufferTooSmall {
                required,
                provided: data.len(),
            });
        }
        self.set_window(window)?;

        let (fg, bg) = (fg.to_wire(), bg.to_wire());
        let mut cursor = MonoCursor::new(&data[..required], width);
        let mut staging = StagingBuffer::<STAGING_CAPACITY>::new();

        let mut remaining = window.pixel_count();
        while remaining > 0 {
            let pixels = remaining.min(STAGING_CAPACITY);
            let filled = cursor.fill(&mut staging.slots_mut()[..pixels], fg, bg);
            self.engine
                .send(&mut self.interface, staging.as_bytes(filled))?;
            remaining -= pixels;
        }
        log::debug!("expanded {width}x{height} mono bitmap at ({x}, {y})");
        Ok(())
    }

    /// Stream colors from an iterator into a rectangle, row by row
    ///
    /// Stops early if the iterator ends; the controller keeps whatever was
    /// in the rest of the window.
    ///
    /// # Errors
    ///
    /// Returns `Error::InvalidWindow` if the rectangle exceeds the panel.
    #[allow(clippy::many_single_char_names)]
    pub fn write_pixels<C>(
        &mut self,
        x: u16,
        y: u16,
        width: u16,
        height: u16,
        colors: C,
    ) -> DisplayResult<I>
    where
        C: IntoIterator<Item = Color>,
    {
        let Some(window) = self.rect_window(x, y, width, height)? else {
            return Ok(());
        };
        self.set_window(window)?;

        let mut colors = colors.into_iter().take(window.pixel_count());
        let mut staging = StagingBuffer::<STAGING_CAPACITY>::new();
        loop {
            let mut filled = 0;
            for (slot, color) in staging.slots_mut().iter_mut().zip(colors.by_ref()) {
                *slot = color.to_wire();
                filled += 1;
            }
            if filled == 0 {
                break;
            }
            self.engine
                .send(&mut self.interface, staging.as_bytes(filled))?;
        }
        Ok(())
    }

    /// Get display dimensions as seen through the current rotation
    pub fn dimensions(&self) -> Dimensions {
        self.config.rotated_dimensions()
    }

    /// Get display rotation
    pub fn rotation(&self) -> Rotation {
        self.config.rotation
    }

    /// Access the underlying configuration
    pub fn config(&self) -> &Config {
        &self.config
    }

    /// Whether a bulk transfer is still outstanding
    pub fn is_transfer_pending(&self) -> bool {
        !self.engine.flag().is_idle()
    }

    /// Give back the interface
    pub fn release(self) -> I {
        self.interface
    }

    /// Window for a `width` x `height` rectangle, `None` if it is empty
    #[allow(clippy::many_single_char_names)]
    fn rect_window(
        &self,
        x: u16,
        y: u16,
        width: u16,
        height: u16,
    ) -> Result<Option<Window>, Error<I>> {
        if width == 0 || height == 0 {
            return Ok(None);
        }
        let window = Window::from_rect(x, y, width, height).ok_or(Error::InvalidWindow {
            x_start: x,
            y_start: y,
            x_end: x.saturating_add(width - 1),
            y_end: y.saturating_add(height - 1),
        })?;
        Ok(Some(window))
    }

    /// Refuse bus traffic while a timed-out transfer is still running
    fn ensure_idle(&self) -> DisplayResult<I> {
        if self.is_transfer_pending() {
            log::warn!("draw call while a bulk transfer is pending");
            return Err(Error::Transfer(TransferError::Pending));
        }
        Ok(())
    }

    /// Send a command to the display controller
    fn send_command(&mut self, cmd: u8) -> DisplayResult<I> {
        self.interface.send_command(cmd).map_err(Error::Interface)
    }

    /// Send data to the display controller
    fn send_data(&mut self, data: &[u8]) -> DisplayResult<I> {
        self.interface.send_data(data).map_err(Error::Interface)
    }
}
