//! Display configuration types and builder

pub use crate::error::{BuilderError, MAX_COLUMNS, MAX_ROWS};

/// Default number of completion polls before a transfer wait gives up
pub const DEFAULT_TRANSFER_SPIN_LIMIT: u32 = 10_000_000;

/// Display dimensions in native (portrait) orientation
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Dimensions {
    /// Number of columns (width in pixels)
    pub width: u16,
    /// Number of rows (height in pixels)
    pub height: u16,
}

impl Dimensions {
    /// Create new dimensions with validation
    ///
    /// # Errors
    ///
    /// Returns `BuilderError::InvalidDimensions` if:
    /// - width == 0 or width > MAX_COLUMNS
    /// - height == 0 or height > MAX_ROWS
    pub fn new(width: u16, height: u16) -> Result<Self, BuilderError> {
        if width == 0 || width > MAX_COLUMNS || height == 0 || height > MAX_ROWS {
            return Err(BuilderError::InvalidDimensions { width, height });
        }
        Ok(Self { width, height })
    }

    /// Full 240x320 ILI9341 panel
    pub const fn native() -> Self {
        Self {
            width: MAX_COLUMNS,
            height: MAX_ROWS,
        }
    }
}

/// Display rotation relative to native orientation
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum Rotation {
    /// Portrait, connector at the bottom
    #[default]
    Rotate0,
    /// Landscape, rotated 90 degrees clockwise
    Rotate90,
    /// Portrait, upside down
    Rotate180,
    /// Landscape, rotated 270 degrees clockwise
    Rotate270,
}

impl Rotation {
    /// Memory access control (0x36) parameter for this rotation
    ///
    /// All values select BGR panel order.
    pub const fn memory_access_control(self) -> u8 {
        match self {
            Self::Rotate0 => 0x48,
            Self::Rotate90 => 0x28,
            Self::Rotate180 => 0x88,
            Self::Rotate270 => 0xE8,
        }
    }

    /// Whether rows and columns are exchanged
    pub const fn is_landscape(self) -> bool {
        matches!(self, Self::Rotate90 | Self::Rotate270)
    }
}

/// Display configuration
///
/// Use `Builder` to create a Config.
#[derive(Clone, Debug)]
pub struct Config {
    /// Display dimensions (native orientation)
    pub dimensions: Dimensions,
    /// Display rotation
    pub rotation: Rotation,
    /// Completion polls before a transfer wait fails (0 = wait forever)
    pub transfer_spin_limit: u32,
    /// Time the reset line is held at each level
    pub reset_pulse_ms: u32,
    /// Delay after software reset
    pub soft_reset_delay_ms: u32,
    /// Delay after sleep-out
    pub sleep_out_delay_ms: u32,
}

impl Config {
    /// Get the rotated dimensions based on rotation setting
    pub fn rotated_dimensions(&self) -> Dimensions {
        if self.rotation.is_landscape() {
            Dimensions {
                width: self.dimensions.height,
                height: self.dimensions.width,
            }
        } else {
            self.dimensions
        }
    }
}

/// Builder for constructing display configuration
///
/// # Example
///
/// ```rust,no_run
/// use ili9341_dma::{Builder, Dimensions, Rotation};
///
/// let config = match Builder::new()
///     .dimensions(Dimensions::native())
///     .rotation(Rotation::Rotate90)
///     .transfer_spin_limit(1_000_000)
///     .build()
/// {
///     Ok(config) => config,
///     Err(_) => return,
/// };
/// assert_eq!(config.rotated_dimensions().width, 320);
/// ```
#[must_use]
pub struct Builder {
    /// Display dimensions (required)
    dimensions: Option<Dimensions>,
    /// Display rotation
    rotation: Rotation,
    /// Completion polls before a transfer wait fails
    transfer_spin_limit: u32,
    /// Reset pulse length
    reset_pulse_ms: u32,
    /// Delay after software reset
    soft_reset_delay_ms: u32,
    /// Delay after sleep-out
    sleep_out_delay_ms: u32,
}

impl Default for Builder {
    fn default() -> Self {
        Self {
            dimensions: None,
            rotation: Rotation::Rotate0,
            transfer_spin_limit: DEFAULT_TRANSFER_SPIN_LIMIT,
            reset_pulse_ms: 200,
            soft_reset_delay_ms: 1000,
            // Datasheet minimum before the next command
            sleep_out_delay_ms: 120,
        }
    }
}

impl Builder {
    /// Create a new Builder with default values
    pub fn new() -> Self {
        Self::default()
    }

    /// Set display dimensions (required)
    pub fn dimensions(mut self, dims: Dimensions) -> Self {
        self.dimensions = Some(dims);
        self
    }

    /// Set display rotation
    pub fn rotation(mut self, rotation: Rotation) -> Self {
        self.rotation = rotation;
        self
    }

    /// Set how many times a transfer wait polls before timing out
    ///
    /// Set to 0 to wait forever.
    pub fn transfer_spin_limit(mut self, spins: u32) -> Self {
        self.transfer_spin_limit = spins;
        self
    }

    /// Set the reset pulse length
    pub fn reset_pulse_ms(mut self, ms: u32) -> Self {
        self.reset_pulse_ms = ms;
        self
    }

    /// Set the delay after software reset
    pub fn soft_reset_delay_ms(mut self, ms: u32) -> Self {
        self.soft_reset_delay_ms = ms;
        self
    }

    /// Set the delay after sleep-out
    pub fn sleep_out_delay_ms(mut self, ms: u32) -> Self {
        self.sleep_out_delay_ms = ms;
        self
    }

    /// Build the configuration
    ///
    /// # Errors
    ///
    /// Returns `BuilderError::MissingDimensions` if dimensions were not set
    pub fn build(self) -> Result<Config, BuilderError> {
        Ok(Config {
            dimensions: self.dimensions.ok_or(BuilderError::MissingDimensions)?,
            rotation: self.rotation,
            transfer_spin_limit: self.transfer_spin_limit,
            reset_pulse_ms: self.reset_pulse_ms,
            soft_reset_delay_ms: self.soft_reset_delay_ms,
            sleep_out_delay_ms: self.sleep_out_delay_ms,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_dimensions_bounds() {
        assert!(Dimensions::new(240, 320).is_ok());
        assert!(Dimensions::new(1, 1).is_ok());
        assert!(matches!(
            Dimensions::new(0, 320),
            Err(BuilderError::InvalidDimensions { width: 0, .. })
        ));
        assert!(Dimensions::new(241, 320).is_err());
        assert!(Dimensions::new(240, 321).is_err());
        assert!(Dimensions::new(240, 0).is_err());
    }

    #[test]
    fn test_builder_requires_dimensions() {
        assert!(matches!(
            Builder::new().build(),
            Err(BuilderError::MissingDimensions)
        ));
    }

    #[test]
    fn test_builder_defaults() {
        let config = Builder::new()
            .dimensions(Dimensions::native())
            .build()
            .unwrap();
        assert_eq!(config.rotation, Rotation::Rotate0);
        assert_eq!(config.transfer_spin_limit, DEFAULT_TRANSFER_SPIN_LIMIT);
        assert_eq!(config.reset_pulse_ms, 200);
        assert_eq!(config.soft_reset_delay_ms, 1000);
        assert_eq!(config.sleep_out_delay_ms, 120);
    }

    #[test]
    fn test_rotated_dimensions_swap_for_landscape() {
        let config = Builder::new()
            .dimensions(Dimensions::native())
            .rotation(Rotation::Rotate270)
            .build()
            .unwrap();
        assert_eq!(
            config.rotated_dimensions(),
            Dimensions {
                width: 320,
                height: 240
            }
        );

        let config = Builder::new()
            .dimensions(Dimensions::native())
            .rotation(Rotation::Rotate180)
            .build()
            .unwrap();
        assert_eq!(config.rotated_dimensions(), Dimensions::native());
    }

    #[test]
    fn test_memory_access_control_values() {
        assert_eq!(Rotation::Rotate0.memory_access_control(), 0x48);
        assert_eq!(Rotation::Rotate90.memory_access_control(), 0x28);
        assert_eq!(Rotation::Rotate180.memory_access_control(), 0x88);
        assert_eq!(Rotation::Rotate270.memory_access_control(), 0xE8);
    }
}
