//! ILI9341 TFT Display Driver
//!
//! A streaming driver for the ILI9341 240x320 RGB565 TFT controller. Pixels
//! are written directly into controller memory through an address window;
//! the driver keeps no frame buffer.
//!
//! ## Features
//!
//! - `no_std` compatible, no allocation
//! - `embedded-hal` v1.0 support
//! - `embedded-graphics` integration (with `graphics` feature)
//! - Chunked bulk transfers through a small staging buffer, ready for DMA
//! - Interrupt-driven completion via [`CompletionFlag`]
//! - Monochrome bitmap expansion with per-row byte alignment
//! - Rotation support
//!
//! ## Usage
//!
//! ```rust,no_run
//! use core::convert::Infallible;
//! use embedded_hal::delay::DelayNs;
//! use embedded_hal::digital::OutputPin;
//! use embedded_hal::spi::{Operation, SpiDevice};
//! use ili9341_dma::{Builder, Color, CompletionFlag, Dimensions, Display, Interface, Rotation};
//!
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
//! # struct MockDelay;
//! # impl DelayNs for MockDelay { fn delay_ns(&mut self, _ns: u32) {} }
//! # let spi = MockSpi;
//! # let dc = MockPin;
//! # let rst = MockPin;
//! # let mut delay = MockDelay;
//! static TX_DONE: CompletionFlag = CompletionFlag::new();
//!
//! let interface = Interface::new(spi, dc, rst);
//! let config = match Builder::new()
//!     .dimensions(Dimensions::native())
//!     .rotation(Rotation::Rotate90)
//!     .build()
//! {
//!     Ok(config) => config,
//!     Err(_) => return,
//! };
//!
//! let mut display = Display::new(interface, config, &TX_DONE);
//! let _ = display.reset(&mut delay);
//! let _ = display.init(&mut delay);
//! let _ = display.clear(Color::BLACK);
//! let _ = display.fill_rectangle(20, 20, 100, 50, Color::RED);
//! ```

#![no_std]

#[cfg(test)]
extern crate alloc;

/// Monochrome bitmap unpacking
pub mod bitmap;
/// RGB565 color type
pub mod color;
/// ILI9341 command definitions
pub mod command;
/// Display configuration types and builder
pub mod config;
/// Core display operations
pub mod display;
/// Error types for the driver
pub mod error;
/// Hardware interface abstraction
pub mod interface;
/// Staging buffer for chunked transfers
pub mod staging;
/// Bulk transfers and completion signalling
pub mod transfer;
/// Address window
pub mod window;

/// Graphics support via embedded-graphics (requires `graphics` feature)
#[cfg(feature = "graphics")]
pub mod graphics;

pub use color::Color;
pub use config::{
    Builder, Config, DEFAULT_TRANSFER_SPIN_LIMIT, Dimensions, MAX_COLUMNS, MAX_ROWS, Rotation,
};
pub use display::{Display, DrawOutcome};
pub use error::{BuilderError, Error, TransferError};
pub use interface::{DisplayInterface, Interface, InterfaceError, TransferStatus};
pub use staging::{STAGING_CAPACITY, StagingBuffer};
pub use transfer::{BeginError, CompletionFlag, InFlight, TransferEngine};
pub use window::Window;
