//! Hardware interface abstraction
//!
//! This module provides the [`DisplayInterface`] trait and the [`Interface`] struct
//! for communicating with the ILI9341 controller over SPI.
//!
//! ## Hardware Requirements
//!
//! The ILI9341 requires:
//! - SPI bus (MOSI + SCK, chip-select handled by the [`SpiDevice`])
//! - 2 GPIO pins:
//!   - **DC**: Data/Command select (output, low=command, high=data)
//!   - **RST**: Reset (output, active low)
//!
//! ## Bulk Transfers
//!
//! Pixel streams go through [`DisplayInterface::start_transfer`]. A DMA-backed
//! implementation starts the transfer, returns [`TransferStatus::Pending`] and
//! calls [`CompletionFlag::signal`](crate::CompletionFlag::signal) from its
//! completion interrupt. A blocking implementation such as [`Interface`] writes
//! the bytes before returning [`TransferStatus::Complete`].
//!
//! ## Example
//!
//! ```rust,no_run
//! use embedded_hal::digital::OutputPin;
//! use embedded_hal::spi::{Operation, SpiDevice};
//! use ili9341_dma::{command, DisplayInterface, Interface};
//! # use core::convert::Infallible;
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
//! // Create interface with SPI and GPIO pins
//! let mut interface = Interface::new(MockSpi, MockPin, MockPin);
//!
//! // Send command
//! let _ = interface.send_command(command::DISPLAY_ON);
//!
//! // Send data
//! let _ = interface.send_command(command::MEMORY_ACCESS_CONTROL);
//! let _ = interface.send_data(&[0x48]);
//! ```

use core::fmt::Debug;
use embedded_hal::delay::DelayNs;
use embedded_hal::digital::OutputPin;
use embedded_hal::spi::SpiDevice;

type InterfaceResult<T, E> = core::result::Result<T, E>;

/// State of a bulk transfer right after it was started
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum TransferStatus {
    /// The hardware is still sending; completion will be signalled later
    Pending,
    /// All bytes were sent before `start_transfer` returned
    Complete,
}

/// Trait for hardware interface to ILI9341 controller
///
/// This trait abstracts over different hardware implementations,
/// allowing the [`Display`](crate::display::Display) to work with any
/// bus that can frame command and data bytes.
///
/// ## Implementing
///
/// For blocking SPI, use the provided [`Interface`] struct. For DMA, wrap
/// your HAL's transfer API and return [`TransferStatus::Pending`] from
/// [`start_transfer`](Self::start_transfer).
pub trait DisplayInterface {
    /// Error type for interface operations
    ///
    /// Must implement [`Debug`] for error reporting.
    type Error: Debug;

    /// Send a command byte to the controller
    ///
    /// The implementation must:
    /// 1. Set DC pin low (command mode)
    /// 2. Send the command byte, blocking until the bus is done
    ///
    /// # Errors
    ///
    /// Returns an error if SPI communication or GPIO fails.
    #[allow(clippy::type_complexity)]
    fn send_command(&mut self, command: u8) -> InterfaceResult<(), Self::Error>;

    /// Send data bytes to the controller
    ///
    /// The implementation must:
    /// 1. Set DC pin high (data mode)
    /// 2. Send the data bytes, blocking until the bus is done
    ///
    /// # Errors
    ///
    /// Returns an error if SPI communication or GPIO fails.
    #[allow(clippy::type_complexity)]
    fn send_data(&mut self, data: &[u8]) -> InterfaceResult<(), Self::Error>;

    /// Set DC pin high without sending anything
    ///
    /// Called after memory-write so that the following pixel stream is
    /// latched as data.
    #[allow(clippy::type_complexity)]
    fn set_data_mode(&mut self) -> InterfaceResult<(), Self::Error>;

    /// Start a bulk write of pixel bytes in data mode
    ///
    /// When returning [`TransferStatus::Pending`], the implementation must
    /// arrange for [`CompletionFlag::signal`](crate::CompletionFlag::signal)
    /// to be called once the last byte has left the bus. The driver keeps
    /// `data` borrowed and issues no other bus traffic until then.
    ///
    /// # Errors
    ///
    /// Returns an error if the transfer could not be started.
    #[allow(clippy::type_complexity)]
    fn start_transfer(&mut self, data: &[u8]) -> InterfaceResult<TransferStatus, Self::Error>;

    /// Perform hardware reset
    ///
    /// The implementation must:
    /// 1. Set RST pin low
    /// 2. Wait `pulse_ms`
    /// 3. Set RST pin high
    /// 4. Wait `pulse_ms`
    ///
    /// # Errors
    ///
    /// Returns an error if the reset pin cannot be driven.
    #[allow(clippy::type_complexity)]
    fn reset<D: DelayNs>(&mut self, delay: &mut D, pulse_ms: u32)
    -> InterfaceResult<(), Self::Error>;
}

/// Errors that can occur at the interface level
///
/// Generic over SPI and GPIO error types.
#[derive(Debug)]
pub enum InterfaceError<SpiErr, PinErr> {
    /// SPI communication error
    Spi(SpiErr),
    /// GPIO pin error
    Pin(PinErr),
}

impl<SpiErr: Debug, PinErr: Debug> core::fmt::Display for InterfaceError<SpiErr, PinErr> {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        match self {
            Self::Spi(e) => write!(f, "SPI error: {e:?}"),
            Self::Pin(e) => write!(f, "Pin error: {e:?}"),
        }
    }
}

impl<SpiErr: Debug, PinErr: Debug> core::error::Error for InterfaceError<SpiErr, PinErr> {}

/// Blocking SPI interface for the ILI9341
///
/// Implements [`DisplayInterface`] for embedded-hal v1.0 SPI and GPIO traits.
/// Bulk transfers are written synchronously and always report
/// [`TransferStatus::Complete`].
///
/// ## Type Parameters
///
/// * `SPI` - SPI device implementing [`SpiDevice`]
/// * `DC` - Data/Command pin implementing [`OutputPin`]
/// * `RST` - Reset pin implementing [`OutputPin`]
pub struct Interface<SPI, DC, RST> {
    /// SPI device for communication
    spi: SPI,
    /// Data/Command select pin (low=command, high=data)
    dc: DC,
    /// Reset pin (active low)
    rst: RST,
}

impl<SPI, DC, RST> Interface<SPI, DC, RST>
where
    SPI: SpiDevice,
    DC: OutputPin,
    RST: OutputPin,
{
    /// Create a new Interface
    ///
    /// # Arguments
    ///
    /// * `spi` - SPI device (must implement [`SpiDevice`])
    /// * `dc` - Data/Command pin (output, low=command, high=data)
    /// * `rst` - Reset pin (output, active low)
    pub fn new(spi: SPI, dc: DC, rst: RST) -> Self {
        Self { spi, dc, rst }
    }

    /// Release the SPI device and pins
    pub fn release(self) -> (SPI, DC, RST) {
        (self.spi, self.dc, self.rst)
    }
}

impl<SPI, DC, RST, PinErr> DisplayInterface for Interface<SPI, DC, RST>
where
    SPI: SpiDevice,
    SPI::Error: Debug,
    DC: OutputPin<Error = PinErr>,
    RST: OutputPin<Error = PinErr>,
    PinErr: Debug,
{
    type Error = InterfaceError<SPI::Error, PinErr>;

    fn send_command(&mut self, command: u8) -> InterfaceResult<(), Self::Error> {
        self.dc.set_low().map_err(InterfaceError::Pin)?;
        self.spi.write(&[command]).map_err(InterfaceError::Spi)?;
        Ok(())
    }

    fn send_data(&mut self, data: &[u8]) -> InterfaceResult<(), Self::Error> {
        self.dc.set_high().map_err(InterfaceError::Pin)?;
        self.spi.write(data).map_err(InterfaceError::Spi)?;
        Ok(())
    }

    fn set_data_mode(&mut self) -> InterfaceResult<(), Self::Error> {
        self.dc.set_high().map_err(InterfaceError::Pin)
    }

    fn start_transfer(&mut self, data: &[u8]) -> InterfaceResult<TransferStatus, Self::Error> {
        self.send_data(data)?;
        Ok(TransferStatus::Complete)
    }

    fn reset<D: DelayNs>(
        &mut self,
        delay: &mut D,
        pulse_ms: u32,
    ) -> InterfaceResult<(), Self::Error> {
        self.rst.set_low().map_err(InterfaceError::Pin)?;
        delay.delay_ms(pulse_ms);
        self.rst.set_high().map_err(InterfaceError::Pin)?;
        delay.delay_ms(pulse_ms);
        Ok(())
    }
}
