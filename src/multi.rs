use crate::{Driver, Error, PortMutex, Register};

/// Set multiple pins at the same time.
///
/// The usual method of setting multiple pins
///
/// ```no_run
/// # let i2c = embedded_hal_mock::eh1::i2c::Mock::new(&[]);
/// # let xra = xra1200::Xra1200::new(i2c).unwrap();
/// # let p = xra.split();
/// # let io0 = p.io0;
/// # let io1 = p.io1;
/// io0.set_value(true).unwrap();
/// io1.set_value(false).unwrap();
/// ```
///
/// issues one OUTPUT register write per pin, so the pins change state one after the other.  If
/// it is desired that multiple pins change state in a single bus transaction, the
/// `write_multiple()` function provides an interface to do this.
///
/// ## Example
/// ```no_run
/// # let i2c = embedded_hal_mock::eh1::i2c::Mock::new(&[]);
/// # let xra = xra1200::Xra1200::new(i2c).unwrap();
/// # let p = xra.split();
/// # let io0 = p.io0;
/// # let io1 = p.io1;
/// xra1200::write_multiple(
///     [&io0, &io1],
///     [true, false],
/// ).unwrap();
/// ```
///
/// All pins must belong to the same controller.
pub fn write_multiple<MUTEX, I2C, const N: usize>(
    pins: [&crate::Pin<'_, MUTEX>; N],
    states: [bool; N],
) -> Result<(), Error<I2C::BusError>>
where
    I2C: crate::I2cBus,
    MUTEX: PortMutex<Port = Driver<I2C>>,
{
    if N == 0 {
        return Ok(());
    }

    let mut mask_set_high = 0x00;
    let mut mask_set_low = 0x00;

    let port_driver = pins[0].port_driver();
    for (pin, state) in pins.iter().zip(states.iter()) {
        assert!(core::ptr::eq(pin.port_driver(), port_driver));
        if *state {
            mask_set_high |= pin.pin_mask();
        } else {
            mask_set_low |= pin.pin_mask();
        }
    }

    port_driver
        .lock(|drv| {
            let out = (drv.cached(Register::Output) | mask_set_high) & !mask_set_low;
            drv.write_register(Register::Output, out)
        })
        .map_err(Error::Bus)
}

/// Read multiple pins at the same time.
///
/// When the chip signals an interrupt, it might be important to find out which input was
/// responsible as quickly as possible _and_ by checking all inputs at once.  Checking the pins one
/// after the other issues one INPUT register read per pin, which is slow and can observe
/// different points in time for different pins.  The `read_multiple()` function samples all pins
/// in a single bus transaction.
///
/// ## Example
/// ```no_run
/// # let i2c = embedded_hal_mock::eh1::i2c::Mock::new(&[]);
/// # let xra = xra1200::Xra1200::new(i2c).unwrap();
/// # let p = xra.split();
/// # let io0 = p.io0;
/// # let io1 = p.io1;
/// let values = xra1200::read_multiple([&io0, &io1]).unwrap();
/// if values[0] {
///     // ...
/// } else if values[1] {
///     // ...
/// }
/// ```
pub fn read_multiple<MUTEX, I2C, const N: usize>(
    pins: [&crate::Pin<'_, MUTEX>; N],
) -> Result<[bool; N], Error<I2C::BusError>>
where
    I2C: crate::I2cBus,
    MUTEX: PortMutex<Port = Driver<I2C>>,
{
    if N == 0 {
        return Ok([false; N]);
    }

    let port_driver = pins[0].port_driver();
    let input = port_driver
        .lock(|drv| drv.read_register(Register::Input))
        .map_err(Error::Bus)?;

    let mut ret = [false; N];
    for (pin, state) in pins.iter().zip(ret.iter_mut()) {
        assert!(core::ptr::eq(pin.port_driver(), port_driver));
        *state = input & pin.pin_mask() != 0;
    }

    Ok(ret)
}

#[cfg(test)]
mod tests {
    use crate::driver::tests::{refresh_expectations, RESET_STATE};
    use crate::{Config, Driver, Xra1200};
    use core::cell::RefCell;
    use embedded_hal_mock::eh1::i2c as mock_i2c;

    #[test]
    fn xra1200_write_multiple() {
        let mut expectations = refresh_expectations(0x20, RESET_STATE);
        expectations.extend([
            // single writes for multiple pins
            mock_i2c::Transaction::write(0x20, vec![0x01, 0b1011_1011]),
            mock_i2c::Transaction::write(0x20, vec![0x01, 0b1010_1111]),
        ]);
        let mut bus = mock_i2c::Mock::new(&expectations);

        let xra = Xra1200::with_config(bus.clone(), Config::default().reset(false)).unwrap();
        let pins = xra.split();

        super::write_multiple([&pins.io2, &pins.io4, &pins.io6], [false, true, false]).unwrap();
        super::write_multiple([&pins.io2, &pins.io4], [true, false]).unwrap();
        assert_eq!(xra.gpio_latch(), 0b1010_1111);

        bus.done();
    }

    #[test]
    fn xra1200_read_multiple() {
        let mut expectations = refresh_expectations(0x20, RESET_STATE);
        expectations.extend([
            // single reads for multiple pins
            mock_i2c::Transaction::write_read(0x20, vec![0x00], vec![0b0000_0101]),
            mock_i2c::Transaction::write_read(0x20, vec![0x00], vec![0b0000_1010]),
        ]);
        let mut bus = mock_i2c::Mock::new(&expectations);

        let xra = Xra1200::with_config(bus.clone(), Config::default().reset(false)).unwrap();
        let pins = xra.split();

        let res = super::read_multiple([&pins.io0, &pins.io1, &pins.io2]).unwrap();
        assert_eq!(res, [true, false, true]);

        let res = super::read_multiple([&pins.io1, &pins.io0, &pins.io3]).unwrap();
        assert_eq!(res, [true, false, true]);

        bus.done();
    }

    #[test]
    fn xra1200_multiple_empty() {
        let mut bus = mock_i2c::Mock::new(&refresh_expectations(0x20, RESET_STATE));

        let _xra = Xra1200::with_config(bus.clone(), Config::default().reset(false)).unwrap();

        // no pins, no bus traffic
        super::write_multiple::<RefCell<Driver<mock_i2c::Mock>>, _, 0>([], []).unwrap();
        let res = super::read_multiple::<RefCell<Driver<mock_i2c::Mock>>, _, 0>([]).unwrap();
        assert_eq!(res, [false; 0]);

        bus.done();
    }

    #[test]
    #[should_panic]
    fn xra1200_multiple_assert_same_chip() {
        let mut expectations = refresh_expectations(0x20, RESET_STATE);
        expectations.extend(refresh_expectations(0x21, RESET_STATE));
        expectations.push(mock_i2c::Transaction::write_read(0x20, vec![0x00], vec![0b0000_0101]));
        let mut bus = mock_i2c::Mock::new(&expectations);

        let xra0 = Xra1200::with_config(bus.clone(), Config::default().reset(false)).unwrap();
        let xra1 = Xra1200::with_config(
            bus.clone(),
            Config::default().reset(false).address(0x21),
        )
        .unwrap();

        let _ = super::read_multiple([&xra0.pin(0).unwrap(), &xra1.pin(1).unwrap()]);

        bus.done();
    }
}
