use crate::regs::{self, Register};
use crate::{Config, Error, I2cExt, Variant};

/// Device state of one `XRA1200`: the bus handle and the shadow register map.
///
/// The driver is not used directly; it lives inside the [`PortMutex`][crate::PortMutex] owned by
/// [`Xra1200`][crate::Xra1200] and every access goes through that mutex.
pub struct Driver<I2C> {
    i2c: I2C,
    addr: u8,
    variant: Variant,
    shadow: [u8; regs::COUNT],
}

impl<I2C: crate::I2cBus> Driver<I2C> {
    /// Bring up the chip described by `config`.
    ///
    /// The address is validated before any bus traffic.  Runs the reset sequence when
    /// `config.reset` is set and then fills the shadow map from the chip.  Any failed transaction
    /// aborts construction.
    pub fn new(i2c: I2C, config: Config) -> Result<Self, Error<I2C::BusError>> {
        config.validate::<I2C::BusError>()?;

        let mut driver = Self {
            i2c,
            addr: config.address,
            variant: config.variant,
            shadow: [0x00; regs::COUNT],
        };

        if config.reset {
            driver.reset().map_err(Error::Bus)?;
        }
        driver.refresh().map_err(Error::Bus)?;

        Ok(driver)
    }

    /// Write the reset default into every writable register.
    ///
    /// The shadow map is left alone, call [`Driver::refresh()`] afterwards.
    pub fn reset(&mut self) -> Result<(), I2C::BusError> {
        #[cfg(feature = "log")]
        log::debug!("xra1200@{:#04x}: reset ({:?})", self.addr, self.variant);

        for reg in regs::RESET_SEQUENCE {
            if let Some(value) = reg.reset_value(self.variant) {
                self.i2c.write_reg(self.addr, reg, value)?;
            }
        }
        Ok(())
    }

    /// Re-read every cached register from the chip.
    ///
    /// The shadow map is only replaced once all reads succeeded.
    pub fn refresh(&mut self) -> Result<(), I2C::BusError> {
        let mut shadow = self.shadow;
        for reg in regs::CACHED {
            shadow[reg.index()] = self.i2c.read_reg(self.addr, reg)?;
        }
        self.shadow = shadow;

        #[cfg(feature = "log")]
        log::debug!("xra1200@{:#04x}: shadow {:02x?}", self.addr, self.shadow);
        Ok(())
    }

    /// Live read of a register.  Never served from the shadow map.
    pub fn read_register(&mut self, reg: Register) -> Result<u8, I2C::BusError> {
        let value = self.i2c.read_reg(self.addr, reg)?;

        #[cfg(feature = "log")]
        log::trace!("xra1200@{:#04x}: {:?} -> {:#04x}", self.addr, reg, value);
        Ok(value)
    }

    /// Write a full register byte.
    ///
    /// For cached registers the shadow is updated only after the chip acknowledged the write.
    pub fn write_register(&mut self, reg: Register, value: u8) -> Result<(), I2C::BusError> {
        #[cfg(feature = "log")]
        log::trace!("xra1200@{:#04x}: {:?} <- {:#04x}", self.addr, reg, value);

        self.i2c.write_reg(self.addr, reg, value)?;
        if reg.is_cached() {
            self.shadow[reg.index()] = value;
        }
        Ok(())
    }

    /// Set or clear bit `pin` of a cached register.
    ///
    /// The new byte is computed from the shadow and written in full; the chip has no single-bit
    /// access.
    pub fn update_bit(&mut self, reg: Register, pin: u8, state: bool) -> Result<(), I2C::BusError> {
        let value = if state {
            self.cached(reg) | (1 << pin)
        } else {
            self.cached(reg) & !(1 << pin)
        };
        self.write_register(reg, value)
    }
}

impl<I2C> Driver<I2C> {
    /// Last value written to (or read back from) a cached register.
    pub(crate) fn cached(&self, reg: Register) -> u8 {
        debug_assert!(reg.is_cached(), "{:?} is not cached", reg);
        self.shadow[reg.index()]
    }

    /// Bit `pin` of a cached register.
    pub(crate) fn cached_bit(&self, reg: Register, pin: u8) -> bool {
        self.cached(reg) & (1 << pin) != 0
    }

    pub fn address(&self) -> u8 {
        self.addr
    }

    pub fn variant(&self) -> Variant {
        self.variant
    }

    /// Give back the bus handle.  The chip keeps its current configuration.
    pub fn release(self) -> I2C {
        self.i2c
    }
}

#[cfg(test)]
pub(crate) mod tests {
    use super::Driver;
    use crate::{Config, Error, Register, Variant};
    use embedded_hal::i2c::ErrorKind;
    use embedded_hal_mock::eh1::i2c as mock_i2c;

    pub(crate) fn reset_expectations(addr: u8, pullup: u8) -> Vec<mock_i2c::Transaction> {
        vec![
            mock_i2c::Transaction::write(addr, vec![0x03, 0xff]),
            mock_i2c::Transaction::write(addr, vec![0x02, 0x00]),
            mock_i2c::Transaction::write(addr, vec![0x01, 0xff]),
            mock_i2c::Transaction::write(addr, vec![0x04, pullup]),
            mock_i2c::Transaction::write(addr, vec![0x05, 0x00]),
            mock_i2c::Transaction::write(addr, vec![0x06, 0x00]),
            mock_i2c::Transaction::write(addr, vec![0x07, 0x00]),
            mock_i2c::Transaction::write(addr, vec![0x08, 0x00]),
            mock_i2c::Transaction::write(addr, vec![0x09, 0x00]),
            mock_i2c::Transaction::write(addr, vec![0x0a, 0xff]),
        ]
    }

    /// Read-back of the 9 cached registers, values in read-back order.
    pub(crate) fn refresh_expectations(addr: u8, values: [u8; 9]) -> Vec<mock_i2c::Transaction> {
        [0x01, 0x02, 0x03, 0x04, 0x05, 0x06, 0x08, 0x09, 0x0a]
            .iter()
            .zip(values.iter())
            .map(|(&reg, &value)| mock_i2c::Transaction::write_read(addr, vec![reg], vec![value]))
            .collect()
    }

    pub(crate) const RESET_STATE: [u8; 9] = [0xff, 0x00, 0xff, 0x00, 0x00, 0x00, 0x00, 0x00, 0xff];

    #[test]
    fn reset_sequence() {
        let mut expectations = reset_expectations(0x20, 0x00);
        expectations.extend(refresh_expectations(0x20, RESET_STATE));
        let mut bus = mock_i2c::Mock::new(&expectations);

        let drv = Driver::new(bus.clone(), Config::default()).unwrap();
        assert_eq!(drv.cached(Register::Output), 0xff);
        assert_eq!(drv.cached(Register::Configuration), 0xff);
        assert_eq!(drv.cached(Register::Pullup), 0x00);
        assert_eq!(drv.cached(Register::InputFilter), 0xff);

        bus.done();
    }

    #[test]
    fn reset_sequence_p_variant() {
        let mut expectations = reset_expectations(0x21, 0xff);
        expectations.extend(refresh_expectations(
            0x21,
            [0xff, 0x00, 0xff, 0xff, 0x00, 0x00, 0x00, 0x00, 0xff],
        ));
        let mut bus = mock_i2c::Mock::new(&expectations);

        let config = Config::default().address(0x21).variant(Variant::Xra1200P);
        let drv = Driver::new(bus.clone(), config).unwrap();
        assert_eq!(drv.cached(Register::Pullup), 0xff);
        assert_eq!(drv.variant(), Variant::Xra1200P);
        assert_eq!(drv.address(), 0x21);

        bus.done();
    }

    #[test]
    fn adopt_without_reset() {
        let expectations =
            refresh_expectations(0x20, [0x5a, 0x01, 0x0f, 0x80, 0x02, 0x04, 0x10, 0x20, 0x40]);
        let mut bus = mock_i2c::Mock::new(&expectations);

        let drv = Driver::new(bus.clone(), Config::default().reset(false)).unwrap();
        assert_eq!(drv.cached(Register::Output), 0x5a);
        assert_eq!(drv.cached(Register::Inversion), 0x01);
        assert_eq!(drv.cached(Register::Configuration), 0x0f);
        assert_eq!(drv.cached(Register::Pullup), 0x80);
        assert_eq!(drv.cached(Register::InterruptEnable), 0x02);
        assert_eq!(drv.cached(Register::ThreeState), 0x04);
        assert_eq!(drv.cached(Register::RisingEdgeInterrupt), 0x10);
        assert_eq!(drv.cached(Register::FallingEdgeInterrupt), 0x20);
        assert_eq!(drv.cached(Register::InputFilter), 0x40);

        bus.done();
    }

    #[test]
    fn construction_fails_on_nack() {
        let expectations = [mock_i2c::Transaction::write(0x20, vec![0x03, 0xff])
            .with_error(ErrorKind::NoAcknowledge(
                embedded_hal::i2c::NoAcknowledgeSource::Address,
            ))];
        let mut bus = mock_i2c::Mock::new(&expectations);

        let res = Driver::new(bus.clone(), Config::default());
        assert!(matches!(res, Err(Error::Bus(ErrorKind::NoAcknowledge(_)))));

        bus.done();
    }

    #[test]
    fn construction_rejects_wide_address() {
        let mut bus = mock_i2c::Mock::new(&[]);

        let res = Driver::new(bus.clone(), Config::default().reset(false).address(0xff));
        assert!(matches!(res, Err(Error::InvalidAddress(0xff))));
        let res = Driver::new(bus.clone(), Config::default().address(0x80));
        assert!(matches!(res, Err(Error::InvalidAddress(0x80))));

        bus.done();
    }

    #[test]
    fn failed_refresh_keeps_shadow() {
        let mut expectations = refresh_expectations(0x20, RESET_STATE);
        expectations.push(mock_i2c::Transaction::write_read(0x20, vec![0x01], vec![0x00]));
        expectations.push(
            mock_i2c::Transaction::write_read(0x20, vec![0x02], vec![0x00])
                .with_error(ErrorKind::Other),
        );
        let mut bus = mock_i2c::Mock::new(&expectations);

        let mut drv = Driver::new(bus.clone(), Config::default().reset(false)).unwrap();
        assert_eq!(drv.refresh(), Err(ErrorKind::Other));
        assert_eq!(drv.cached(Register::Output), 0xff);

        bus.done();
    }

    #[test]
    fn update_bit() {
        let mut expectations = refresh_expectations(0x20, RESET_STATE);
        expectations.extend([
            mock_i2c::Transaction::write(0x20, vec![0x04, 0b0000_1000]),
            mock_i2c::Transaction::write(0x20, vec![0x04, 0b1000_1000]),
            mock_i2c::Transaction::write(0x20, vec![0x03, 0b1111_0111]),
            mock_i2c::Transaction::write(0x20, vec![0x04, 0b0000_1000])
                .with_error(ErrorKind::Other),
        ]);
        let mut bus = mock_i2c::Mock::new(&expectations);

        let mut drv = Driver::new(bus.clone(), Config::default().reset(false)).unwrap();
        drv.update_bit(Register::Pullup, 3, true).unwrap();
        drv.update_bit(Register::Pullup, 7, true).unwrap();
        drv.update_bit(Register::Configuration, 3, false).unwrap();
        assert!(drv.cached_bit(Register::Pullup, 7));
        assert!(!drv.cached_bit(Register::Configuration, 3));

        // failed write leaves the shadow untouched
        assert_eq!(
            drv.update_bit(Register::Pullup, 7, false),
            Err(ErrorKind::Other)
        );
        assert_eq!(drv.cached(Register::Pullup), 0b1000_1000);

        bus.done();
    }

    #[test]
    fn uncached_registers_are_live() {
        let mut expectations = refresh_expectations(0x20, RESET_STATE);
        expectations.extend([
            mock_i2c::Transaction::write_read(0x20, vec![0x00], vec![0x3c]),
            mock_i2c::Transaction::write_read(0x20, vec![0x07], vec![0x04]),
            mock_i2c::Transaction::write(0x20, vec![0x07, 0x00]),
        ]);
        let mut bus = mock_i2c::Mock::new(&expectations);

        let mut drv = Driver::new(bus.clone(), Config::default().reset(false)).unwrap();
        assert_eq!(drv.read_register(Register::Input).unwrap(), 0x3c);
        assert_eq!(drv.read_register(Register::InterruptStatus).unwrap(), 0x04);
        drv.write_register(Register::InterruptStatus, 0x00).unwrap();

        let _i2c = drv.release();
        bus.done();
    }
}
