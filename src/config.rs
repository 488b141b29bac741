/// Default I2C address of the `XRA1200` (all address pins low).
pub const DEFAULT_ADDRESS: u8 = 0x20;

/// Chip variant.
///
/// The variants only differ in the reset default of the pull-up register.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Variant {
    /// `XRA1200`: pull-ups disabled after reset
    #[default]
    Xra1200,
    /// `XRA1200P`: pull-ups enabled after reset
    Xra1200P,
}

/// Construction parameters for [`Xra1200`][crate::Xra1200].
///
/// ```
/// use xra1200::{Config, Variant};
///
/// let config = Config::default().address(0x23).variant(Variant::Xra1200P);
/// assert_eq!(config.address, 0x23);
/// assert!(config.reset);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct Config {
    /// 7-bit I2C address.
    pub address: u8,
    /// Bring all registers to their reset defaults during construction.
    ///
    /// Without a reset the driver adopts whatever configuration the chip currently holds.
    pub reset: bool,
    /// Chip variant, selects the pull-up reset default.
    pub variant: Variant,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            address: DEFAULT_ADDRESS,
            reset: true,
            variant: Variant::Xra1200,
        }
    }
}

impl Config {
    /// Set the 7-bit I2C address.
    pub fn address(mut self, address: u8) -> Self {
        self.address = address;
        self
    }

    /// Choose whether construction runs the reset sequence.
    pub fn reset(mut self, reset: bool) -> Self {
        self.reset = reset;
        self
    }

    /// Set the chip variant.
    pub fn variant(mut self, variant: Variant) -> Self {
        self.variant = variant;
        self
    }

    pub(crate) fn validate<E>(&self) -> Result<(), crate::Error<E>> {
        if self.address > 0x7f {
            return Err(crate::Error::InvalidAddress(self.address));
        }
        Ok(())
    }
}
