//! Error types for the driver
//!
//! This module defines error types for configuration building ([`BuilderError`]),
//! asynchronous transfers ([`TransferError`]) and display operations ([`Error`]).
//!
//! ## Error Types
//!
//! - [`BuilderError`] - Errors during configuration construction
//! - [`TransferError`] - A bulk transfer could not be started or did not finish
//! - [`Error`] - Runtime errors during display operations
//! - [`InterfaceError`](crate::interface::InterfaceError) - Low-level hardware communication errors
//!
//! Pixels outside the panel are not an error; see
//! [`DrawOutcome`](crate::display::DrawOutcome).
//!
//! ## Example
//!
//! ```
//! use ili9341_dma::{Builder, BuilderError, Dimensions};
//!
//! // Missing dimensions
//! let result = Builder::new().build();
//! assert!(matches!(result, Err(BuilderError::MissingDimensions)));
//!
//! // Invalid dimensions
//! let result = Dimensions::new(480, 320); // Too wide
//! assert!(result.is_err());
//! ```

use crate::interface::DisplayInterface;
use crate::transfer::BeginError;

/// Maximum columns (source outputs) of the ILI9341 in native orientation
pub const MAX_COLUMNS: u16 = 240;

/// Maximum rows (gate outputs) of the ILI9341 in native orientation
pub const MAX_ROWS: u16 = 320;

/// Errors raised by the transfer engine
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TransferError {
    /// A transfer was requested while a previous one is still outstanding
    ///
    /// This happens after a wait timed out and the completion notification
    /// has not arrived since.
    Pending,
    /// The completion notification did not arrive within the spin limit
    Timeout {
        /// Number of polls performed before giving up
        spins: u32,
    },
}

impl core::fmt::Display for TransferError {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        match self {
            Self::Pending => write!(f, "Previous transfer still pending"),
            Self::Timeout { spins } => {
                write!(f, "Transfer did not complete after {spins} polls")
            }
        }
    }
}

impl core::error::Error for TransferError {}

/// Errors that can occur when interacting with the display
///
/// Generic over the interface type to preserve the specific error type.
/// This allows error handling code to match on the underlying hardware error.
#[derive(Debug)]
pub enum Error<I: DisplayInterface> {
    /// Interface error (SPI/GPIO)
    ///
    /// Wraps the underlying hardware error from the [`DisplayInterface`] implementation.
    Interface(I::Error),
    /// Bulk transfer error
    Transfer(TransferError),
    /// Window does not fit the panel
    ///
    /// Bounds are inclusive and must satisfy `x_start <= x_end < width`
    /// and `y_start <= y_end < height` for the rotated panel.
    InvalidWindow {
        /// First column
        x_start: u16,
        /// First row
        y_start: u16,
        /// Last column
        x_end: u16,
        /// Last row
        y_end: u16,
    },
    /// Image data is too short for the requested window
    BufferTooSmall {
        /// Required buffer size in bytes
        required: usize,
        /// Provided buffer size in bytes
        provided: usize,
    },
}

impl<I: DisplayInterface> From<TransferError> for Error<I> {
    fn from(e: TransferError) -> Self {
        Self::Transfer(e)
    }
}

impl<I: DisplayInterface> From<BeginError<I::Error>> for Error<I> {
    fn from(e: BeginError<I::Error>) -> Self {
        match e {
            BeginError::Interface(e) => Self::Interface(e),
            BeginError::Transfer(e) => Self::Transfer(e),
        }
    }
}

impl<I: DisplayInterface> core::fmt::Display for Error<I> {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        match self {
            Self::Interface(_) => write!(f, "Interface error"),
            Self::Transfer(e) => write!(f, "Transfer error: {e}"),
            Self::InvalidWindow {
                x_start,
                y_start,
                x_end,
                y_end,
            } => write!(
                f,
                "Invalid window: ({x_start}, {y_start})..=({x_end}, {y_end})"
            ),
            Self::BufferTooSmall { required, provided } => {
                write!(
                    f,
                    "Buffer too small: required {required} bytes, provided {provided}"
                )
            }
        }
    }
}

impl<I: DisplayInterface + core::fmt::Debug> core::error::Error for Error<I> {}

/// Errors that can occur when building configuration
///
/// These errors occur during the builder pattern before the display is created.
#[derive(Debug)]
pub enum BuilderError {
    /// Dimensions were not specified
    ///
    /// [`Builder::dimensions()`](crate::config::Builder::dimensions) must be called before building.
    MissingDimensions,
    /// Invalid dimensions provided
    ///
    /// See [`Dimensions::new()`](crate::config::Dimensions::new) for constraints.
    InvalidDimensions {
        /// Number of columns (width) requested
        width: u16,
        /// Number of rows (height) requested
        height: u16,
    },
}

impl core::fmt::Display for BuilderError {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        match self {
            Self::MissingDimensions => write!(f, "Dimensions must be specified"),
            Self::InvalidDimensions { width, height } => write!(
                f,
                "Invalid dimensions {width}x{height} (max {MAX_COLUMNS}x{MAX_ROWS})"
            ),
        }
    }
}

impl core::error::Error for BuilderError {}

#[cfg(test)]
mod tests {
    use super::*;
    use alloc::string::ToString;

    #[test]
    fn test_transfer_error_display() {
        assert_eq!(
            TransferError::Timeout { spins: 10 }.to_string(),
            "Transfer did not complete after 10 polls"
        );
        assert_eq!(
            TransferError::Pending.to_string(),
            "Previous transfer still pending"
        );
    }

    #[test]
    fn test_builder_error_display_names_limits() {
        let err = BuilderError::InvalidDimensions {
            width: 300,
            height: 10,
        };
        assert_eq!(
            err.to_string(),
            "Invalid dimensions 300x10 (max 240x320)"
        );
    }
}
