use core::convert::Infallible;
use core::fmt;

/// Direction of a pin.
///
/// On the chip a `1` in the CONFIGURATION register makes the pin an input and a `0` makes it an
/// output.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Direction {
    Input,
    Output,
}

impl Direction {
    /// Direction encoded by a CONFIGURATION register bit.
    pub(crate) fn from_config_bit(bit: bool) -> Self {
        if bit {
            Direction::Input
        } else {
            Direction::Output
        }
    }

    /// CONFIGURATION register bit for this direction.
    pub(crate) fn config_bit(self) -> bool {
        self == Direction::Input
    }
}

/// A raw direction value which is neither input (`1`) nor output (`0`).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct InvalidDirection(pub u8);

/// Converts a raw CONFIGURATION bit value: `1` is [`Direction::Input`], `0` is
/// [`Direction::Output`].
impl TryFrom<u8> for Direction {
    type Error = InvalidDirection;

    fn try_from(value: u8) -> Result<Self, Self::Error> {
        match value {
            0 => Ok(Direction::Output),
            1 => Ok(Direction::Input),
            v => Err(InvalidDirection(v)),
        }
    }
}

/// Errors reported by the driver.
///
/// `E` is the error type of the underlying I2C bus.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Error<E> {
    /// An I2C transaction failed (no ACK, arbitration loss, device absent, ...).
    ///
    /// The register touched by the failed transaction is in an unknown state on the chip.  The
    /// shadow copy still holds the last value known to have been written.
    Bus(E),
    /// Pin index outside of `0..=7`.
    InvalidPin(u8),
    /// Raw direction value other than `0` (output) or `1` (input).
    InvalidDirection(u8),
    /// I2C address does not fit into 7 bits.
    InvalidAddress(u8),
}

impl<E> From<InvalidDirection> for Error<E> {
    fn from(e: InvalidDirection) -> Self {
        Error::InvalidDirection(e.0)
    }
}

impl<E> From<Infallible> for Error<E> {
    fn from(e: Infallible) -> Self {
        match e {}
    }
}

impl<E: fmt::Debug> fmt::Display for Error<E> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Error::Bus(e) => write!(f, "I2C transaction failed: {:?}", e),
            Error::InvalidPin(p) => write!(f, "pin index {} out of range (0..=7)", p),
            Error::InvalidDirection(d) => {
                write!(f, "invalid direction {} (expected 0=output or 1=input)", d)
            }
            Error::InvalidAddress(a) => write!(f, "I2C address 0x{:02x} is not a 7-bit address", a),
        }
    }
}

#[cfg(any(test, feature = "std"))]
impl<E: fmt::Debug> std::error::Error for Error<E> {}

impl<E: fmt::Debug> embedded_hal::digital::Error for Error<E> {
    fn kind(&self) -> embedded_hal::digital::ErrorKind {
        embedded_hal::digital::ErrorKind::Other
    }
}
