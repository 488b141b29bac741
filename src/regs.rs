//! Register map of the `XRA1200`.
//!
//! Every register is 8 bits wide with one bit per pin (bit `n` belongs to pin `n`).
use crate::Variant;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Register {
    /// GSR: live pin levels (after polarity inversion), read-only
    Input = 0x00,
    /// OCR: output latches, drive the pins configured as outputs
    Output = 0x01,
    /// PIR: polarity inversion, only affects pins configured as inputs
    Inversion = 0x02,
    /// GCR: direction, 1=input 0=output
    Configuration = 0x03,
    /// PUR: internal pull-up enable
    Pullup = 0x04,
    /// IER: interrupt enable
    InterruptEnable = 0x05,
    /// TSCR: three-state (high impedance) output control
    ThreeState = 0x06,
    /// ISR: latched interrupt status, reading clears it
    InterruptStatus = 0x07,
    /// REIR: rising edge interrupt enable
    RisingEdgeInterrupt = 0x08,
    /// FEIR: falling edge interrupt enable
    FallingEdgeInterrupt = 0x09,
    /// IFR: input filter enable
    InputFilter = 0x0a,
}

impl From<Register> for u8 {
    fn from(r: Register) -> u8 {
        r as u8
    }
}

/// Registers written by the reset sequence, in the order they are written.
///
/// All pins are switched to input before any other register is touched.
pub const RESET_SEQUENCE: [Register; 10] = [
    Register::Configuration,
    Register::Inversion,
    Register::Output,
    Register::Pullup,
    Register::InterruptEnable,
    Register::ThreeState,
    Register::InterruptStatus,
    Register::RisingEdgeInterrupt,
    Register::FallingEdgeInterrupt,
    Register::InputFilter,
];

/// Registers mirrored in the shadow cache, in the order they are read back from the chip.
pub const CACHED: [Register; 9] = [
    Register::Output,
    Register::Inversion,
    Register::Configuration,
    Register::Pullup,
    Register::InterruptEnable,
    Register::ThreeState,
    Register::RisingEdgeInterrupt,
    Register::FallingEdgeInterrupt,
    Register::InputFilter,
];

pub(crate) const COUNT: usize = 11;

impl Register {
    /// Whether the driver keeps a shadow copy of this register.
    ///
    /// `Input` and `InterruptStatus` reflect live hardware state and are always read from the
    /// chip.
    pub const fn is_cached(self) -> bool {
        !matches!(self, Register::Input | Register::InterruptStatus)
    }

    /// Value the reset sequence writes into this register, `None` for the read-only input
    /// register.
    pub const fn reset_value(self, variant: Variant) -> Option<u8> {
        match self {
            Register::Input => None,
            Register::Output => Some(0xff),
            Register::Inversion => Some(0x00),
            Register::Configuration => Some(0xff),
            Register::Pullup => match variant {
                Variant::Xra1200 => Some(0x00),
                Variant::Xra1200P => Some(0xff),
            },
            Register::InterruptEnable => Some(0x00),
            Register::ThreeState => Some(0x00),
            Register::InterruptStatus => Some(0x00),
            Register::RisingEdgeInterrupt => Some(0x00),
            Register::FallingEdgeInterrupt => Some(0x00),
            Register::InputFilter => Some(0xff),
        }
    }

    pub(crate) const fn index(self) -> usize {
        self as usize
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn cached_registers() {
        assert!(!Register::Input.is_cached());
        assert!(!Register::InterruptStatus.is_cached());
        assert!(CACHED.iter().all(|r| r.is_cached()));
        assert_eq!(CACHED.len(), COUNT - 2);
    }

    #[test]
    fn reset_values() {
        assert_eq!(Register::Input.reset_value(Variant::Xra1200), None);
        assert_eq!(Register::Pullup.reset_value(Variant::Xra1200), Some(0x00));
        assert_eq!(Register::Pullup.reset_value(Variant::Xra1200P), Some(0xff));
        assert_eq!(Register::InputFilter.reset_value(Variant::Xra1200), Some(0xff));
        assert!(RESET_SEQUENCE
            .iter()
            .all(|r| r.reset_value(Variant::Xra1200).is_some()));
        assert_eq!(u8::from(Register::InputFilter), 0x0a);
    }
}
