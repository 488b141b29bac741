//! Support for the `XRA1200`/`XRA1200P` "8-bit I2C GPIO expander with pull-ups"
use crate::{Config, Driver, Error, PortMutex, Register, Variant};

/// `XRA1200` "8-bit I2C GPIO expander"
///
/// Owns the bus handle and the shadow register map behind a [`PortMutex`].  Whole-register getters
/// for configuration registers are answered from the shadow map without bus traffic; the input and
/// interrupt-status registers are always read from the chip.
pub struct Xra1200<M>(M);

impl<I2C> Xra1200<core::cell::RefCell<Driver<I2C>>>
where
    I2C: crate::I2cBus,
{
    /// Bring up a chip at the default address `0x20`, resetting it to its `XRA1200` defaults.
    pub fn new(i2c: I2C) -> Result<Self, Error<I2C::BusError>> {
        Self::with_config(i2c, Config::default())
    }

    pub fn with_config(i2c: I2C, config: Config) -> Result<Self, Error<I2C::BusError>> {
        Self::with_mutex(i2c, config)
    }
}

impl<I2C, M> Xra1200<M>
where
    I2C: crate::I2cBus,
    M: PortMutex<Port = Driver<I2C>>,
{
    /// Bring up a chip using a custom mutex type.
    ///
    /// The address is validated before any bus traffic.  When `config.reset` is set, all
    /// registers are brought to their reset defaults.  The shadow map is then read back from the
    /// chip.  Any failed transaction fails the whole construction.
    pub fn with_mutex(i2c: I2C, config: Config) -> Result<Self, Error<I2C::BusError>> {
        let driver = Driver::new(i2c, config)?;
        Ok(Self(PortMutex::create(driver)))
    }

    /// Get a handle for pin `index` (`0..=7`).
    ///
    /// Handles are plain views; requesting the same pin more than once yields interchangeable
    /// handles.
    pub fn pin(&self, index: u8) -> Result<crate::Pin<'_, M>, Error<I2C::BusError>> {
        check_pin::<I2C::BusError>(index)?;
        Ok(crate::Pin::new(index, &self.0))
    }

    pub fn split(&self) -> Parts<'_, M> {
        Parts {
            io0: crate::Pin::new(0, &self.0),
            io1: crate::Pin::new(1, &self.0),
            io2: crate::Pin::new(2, &self.0),
            io3: crate::Pin::new(3, &self.0),
            io4: crate::Pin::new(4, &self.0),
            io5: crate::Pin::new(5, &self.0),
            io6: crate::Pin::new(6, &self.0),
            io7: crate::Pin::new(7, &self.0),
        }
    }

    pub fn address(&self) -> u8 {
        self.0.lock(|drv| drv.address())
    }

    pub fn variant(&self) -> Variant {
        self.0.lock(|drv| drv.variant())
    }

    /// Re-run the reset sequence and re-read the shadow map.
    pub fn reset(&self) -> Result<(), Error<I2C::BusError>> {
        self.0
            .lock(|drv| {
                drv.reset()?;
                drv.refresh()
            })
            .map_err(Error::Bus)
    }

    /// Re-read the shadow map from the chip.
    pub fn refresh(&self) -> Result<(), Error<I2C::BusError>> {
        self.0.lock(|drv| drv.refresh()).map_err(Error::Bus)
    }

    /// Live level of all pins (INPUT register).
    pub fn read_gpio(&self) -> Result<u8, Error<I2C::BusError>> {
        self.read(Register::Input)
    }

    /// Write the output latches of all pins (OUTPUT register).
    ///
    /// Latches of pins configured as inputs are updated too, they take effect once the pin is
    /// switched to output.
    pub fn write_gpio(&self, value: u8) -> Result<(), Error<I2C::BusError>> {
        self.write(Register::Output, value)
    }

    /// Cached output latches (OUTPUT register).
    pub fn gpio_latch(&self) -> u8 {
        self.cached(Register::Output)
    }

    /// Cached direction of all pins, `1` = input, `0` = output.
    pub fn iodir(&self) -> u8 {
        self.cached(Register::Configuration)
    }

    pub fn set_iodir(&self, value: u8) -> Result<(), Error<I2C::BusError>> {
        self.write(Register::Configuration, value)
    }

    /// Cached polarity inversion.
    pub fn inversion(&self) -> u8 {
        self.cached(Register::Inversion)
    }

    /// Set polarity inversion.  Bits of output pins are stored but have no effect.
    pub fn set_inversion(&self, value: u8) -> Result<(), Error<I2C::BusError>> {
        self.write(Register::Inversion, value)
    }

    pub fn pullup(&self) -> u8 {
        self.cached(Register::Pullup)
    }

    pub fn set_pullup(&self, value: u8) -> Result<(), Error<I2C::BusError>> {
        self.write(Register::Pullup, value)
    }

    pub fn interrupt_enable(&self) -> u8 {
        self.cached(Register::InterruptEnable)
    }

    pub fn set_interrupt_enable(&self, value: u8) -> Result<(), Error<I2C::BusError>> {
        self.write(Register::InterruptEnable, value)
    }

    pub fn three_state(&self) -> u8 {
        self.cached(Register::ThreeState)
    }

    pub fn set_three_state(&self, value: u8) -> Result<(), Error<I2C::BusError>> {
        self.write(Register::ThreeState, value)
    }

    pub fn rising_edge_interrupt(&self) -> u8 {
        self.cached(Register::RisingEdgeInterrupt)
    }

    pub fn set_rising_edge_interrupt(&self, value: u8) -> Result<(), Error<I2C::BusError>> {
        self.write(Register::RisingEdgeInterrupt, value)
    }

    pub fn falling_edge_interrupt(&self) -> u8 {
        self.cached(Register::FallingEdgeInterrupt)
    }

    pub fn set_falling_edge_interrupt(&self, value: u8) -> Result<(), Error<I2C::BusError>> {
        self.write(Register::FallingEdgeInterrupt, value)
    }

    pub fn input_filter(&self) -> u8 {
        self.cached(Register::InputFilter)
    }

    pub fn set_input_filter(&self, value: u8) -> Result<(), Error<I2C::BusError>> {
        self.write(Register::InputFilter, value)
    }

    /// Read and clear the latched interrupt status of all pins.
    ///
    /// This is a consuming read: the chip clears the status register as a side effect, so a second
    /// call only reports interrupts latched in between.
    pub fn interrupt_status(&self) -> Result<u8, Error<I2C::BusError>> {
        self.read(Register::InterruptStatus)
    }

    /// Set the output latch of a single pin.
    pub fn write_pin(&self, index: u8, value: bool) -> Result<(), Error<I2C::BusError>> {
        check_pin::<I2C::BusError>(index)?;
        self.0
            .lock(|drv| drv.update_bit(Register::Output, index, value))
            .map_err(Error::Bus)
    }

    /// Live level of a single pin.
    pub fn read_pin(&self, index: u8) -> Result<bool, Error<I2C::BusError>> {
        check_pin::<I2C::BusError>(index)?;
        Ok(self.read_gpio()? & (1 << index) != 0)
    }

    /// Release the bus handle.  No bus traffic; the chip keeps its configuration.
    pub fn release(self) -> I2C {
        self.0.into_inner().release()
    }

    fn read(&self, reg: Register) -> Result<u8, Error<I2C::BusError>> {
        self.0.lock(|drv| drv.read_register(reg)).map_err(Error::Bus)
    }

    fn write(&self, reg: Register, value: u8) -> Result<(), Error<I2C::BusError>> {
        self.0
            .lock(|drv| drv.write_register(reg, value))
            .map_err(Error::Bus)
    }

    fn cached(&self, reg: Register) -> u8 {
        self.0.lock(|drv| drv.cached(reg))
    }
}

pub(crate) fn check_pin<E>(index: u8) -> Result<(), Error<E>> {
    if index > 7 {
        return Err(Error::InvalidPin(index));
    }
    Ok(())
}

pub struct Parts<'a, M> {
    pub io0: crate::Pin<'a, M>,
    pub io1: crate::Pin<'a, M>,
    pub io2: crate::Pin<'a, M>,
    pub io3: crate::Pin<'a, M>,
    pub io4: crate::Pin<'a, M>,
    pub io5: crate::Pin<'a, M>,
    pub io6: crate::Pin<'a, M>,
    pub io7: crate::Pin<'a, M>,
}
