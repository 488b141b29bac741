use crate::{Direction, Driver, Error, PortMutex, Register};
use embedded_hal::digital as hal_digital;

/// Representation of one `XRA1200` pin.
///
/// `Pin` is not constructed directly, it is handed out by [`Xra1200::pin()`][crate::Xra1200::pin]
/// or [`Xra1200::split()`][crate::Xra1200::split].  A pin holds no state of its own: every
/// accessor reads or modifies one bit of a register on the owning controller.  Getters for
/// configuration attributes are answered from the controller's shadow map; [`Pin::value()`] and
/// [`Pin::interrupt_status()`] always talk to the chip.
pub struct Pin<'a, MUTEX> {
    pin: u8,
    port_driver: &'a MUTEX,
}

impl<'a, MUTEX, I2C> Pin<'a, MUTEX>
where
    I2C: crate::I2cBus,
    MUTEX: PortMutex<Port = Driver<I2C>>,
{
    pub(crate) fn new(pin_number: u8, port_driver: &'a MUTEX) -> Self {
        assert!(pin_number < 8);
        Self {
            pin: pin_number,
            port_driver,
        }
    }

    pub fn pin_number(&self) -> u8 {
        self.pin
    }

    pub(crate) fn pin_mask(&self) -> u8 {
        1 << self.pin
    }

    pub(crate) fn port_driver(&self) -> &'a MUTEX {
        self.port_driver
    }

    fn bit(&self, reg: Register) -> bool {
        self.port_driver.lock(|drv| drv.cached_bit(reg, self.pin))
    }

    fn set_bit(&self, reg: Register, state: bool) -> Result<(), Error<I2C::BusError>> {
        self.port_driver
            .lock(|drv| drv.update_bit(reg, self.pin, state))
            .map_err(Error::Bus)
    }

    pub fn direction(&self) -> Direction {
        Direction::from_config_bit(self.bit(Register::Configuration))
    }

    /// Set the direction of this pin.
    ///
    /// Accepts a [`Direction`] or a raw value (`1` = input, `0` = output); other raw values are
    /// rejected with [`Error::InvalidDirection`] without touching the bus.
    pub fn set_direction<D>(&self, direction: D) -> Result<(), Error<I2C::BusError>>
    where
        D: TryInto<Direction>,
        Error<I2C::BusError>: From<D::Error>,
    {
        let direction = direction.try_into()?;
        self.set_bit(Register::Configuration, direction.config_bit())
    }

    /// Set the output latch and then make the pin an output.
    ///
    /// The latch is written first so the pin never drives a stale level.
    pub fn switch_to_output(&self, value: bool) -> Result<(), Error<I2C::BusError>> {
        self.set_value(value)?;
        self.set_direction(Direction::Output)
    }

    pub fn switch_to_input(&self) -> Result<(), Error<I2C::BusError>> {
        self.set_direction(Direction::Input)
    }

    /// Live logic level of the pin, after polarity inversion.
    pub fn value(&self) -> Result<bool, Error<I2C::BusError>> {
        let input = self
            .port_driver
            .lock(|drv| drv.read_register(Register::Input))
            .map_err(Error::Bus)?;
        Ok(input & self.pin_mask() != 0)
    }

    /// Set the output latch.  Only drives the pin while it is configured as an output.
    pub fn set_value(&self, value: bool) -> Result<(), Error<I2C::BusError>> {
        self.set_bit(Register::Output, value)
    }

    /// Whether the output latch is set.
    pub fn is_set_high(&self) -> bool {
        self.bit(Register::Output)
    }

    pub fn is_set_low(&self) -> bool {
        !self.is_set_high()
    }

    pub fn invert_polarity(&self) -> bool {
        self.bit(Register::Inversion)
    }

    /// Invert the reported level of this pin.  Only takes effect while the pin is an input.
    pub fn set_invert_polarity(&self, inverted: bool) -> Result<(), Error<I2C::BusError>> {
        self.set_bit(Register::Inversion, inverted)
    }

    pub fn pullup(&self) -> bool {
        self.bit(Register::Pullup)
    }

    pub fn set_pullup(&self, enable: bool) -> Result<(), Error<I2C::BusError>> {
        self.set_bit(Register::Pullup, enable)
    }

    pub fn interrupt_enable(&self) -> bool {
        self.bit(Register::InterruptEnable)
    }

    pub fn set_interrupt_enable(&self, enable: bool) -> Result<(), Error<I2C::BusError>> {
        self.set_bit(Register::InterruptEnable, enable)
    }

    pub fn three_state(&self) -> bool {
        self.bit(Register::ThreeState)
    }

    pub fn set_three_state(&self, enable: bool) -> Result<(), Error<I2C::BusError>> {
        self.set_bit(Register::ThreeState, enable)
    }

    pub fn rising_edge_interrupt(&self) -> bool {
        self.bit(Register::RisingEdgeInterrupt)
    }

    pub fn set_rising_edge_interrupt(&self, enable: bool) -> Result<(), Error<I2C::BusError>> {
        self.set_bit(Register::RisingEdgeInterrupt, enable)
    }

    pub fn falling_edge_interrupt(&self) -> bool {
        self.bit(Register::FallingEdgeInterrupt)
    }

    pub fn set_falling_edge_interrupt(&self, enable: bool) -> Result<(), Error<I2C::BusError>> {
        self.set_bit(Register::FallingEdgeInterrupt, enable)
    }

    pub fn input_filter(&self) -> bool {
        self.bit(Register::InputFilter)
    }

    pub fn set_input_filter(&self, enable: bool) -> Result<(), Error<I2C::BusError>> {
        self.set_bit(Register::InputFilter, enable)
    }

    /// Whether an interrupt was latched for this pin.
    ///
    /// The status register is shared by all pins and reading it clears it on the chip: after this
    /// call every pin of the device reports no pending interrupt until a new edge is latched.
    pub fn interrupt_status(&self) -> Result<bool, Error<I2C::BusError>> {
        let status = self
            .port_driver
            .lock(|drv| drv.read_register(Register::InterruptStatus))
            .map_err(Error::Bus)?;
        Ok(status & self.pin_mask() != 0)
    }
}

impl<'a, MUTEX, I2C> hal_digital::ErrorType for Pin<'a, MUTEX>
where
    I2C: crate::I2cBus,
    I2C::BusError: core::fmt::Debug,
    MUTEX: PortMutex<Port = Driver<I2C>>,
{
    type Error = Error<I2C::BusError>;
}

impl<'a, MUTEX, I2C> hal_digital::InputPin for Pin<'a, MUTEX>
where
    I2C: crate::I2cBus,
    I2C::BusError: core::fmt::Debug,
    MUTEX: PortMutex<Port = Driver<I2C>>,
{
    fn is_high(&mut self) -> Result<bool, Self::Error> {
        self.value()
    }

    fn is_low(&mut self) -> Result<bool, Self::Error> {
        self.value().map(|v| !v)
    }
}

impl<'a, MUTEX, I2C> hal_digital::OutputPin for Pin<'a, MUTEX>
where
    I2C: crate::I2cBus,
    I2C::BusError: core::fmt::Debug,
    MUTEX: PortMutex<Port = Driver<I2C>>,
{
    fn set_low(&mut self) -> Result<(), Self::Error> {
        self.set_value(false)
    }

    fn set_high(&mut self) -> Result<(), Self::Error> {
        self.set_value(true)
    }
}

impl<'a, MUTEX, I2C> hal_digital::StatefulOutputPin for Pin<'a, MUTEX>
where
    I2C: crate::I2cBus,
    I2C::BusError: core::fmt::Debug,
    MUTEX: PortMutex<Port = Driver<I2C>>,
{
    fn is_set_high(&mut self) -> Result<bool, Self::Error> {
        Ok(Pin::is_set_high(self))
    }

    fn is_set_low(&mut self) -> Result<bool, Self::Error> {
        Ok(Pin::is_set_low(self))
    }
}
