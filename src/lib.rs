//! Driver for the MaxLinear `XRA1200`/`XRA1200P` "8-bit I2C GPIO expander".
//!
//! The chip is register-compatible with the `CAT9534`/`PCA9534` and `CAT9554`/`PCA9554` and adds
//! pull-ups, three-state outputs, edge-selectable interrupts and input filters.  Every register
//! holds one bit per pin.
//!
//! The [`Xra1200`] controller owns the bus handle and a shadow copy of every writable register.
//! [`Pin`] handles are cheap views onto one of the 8 pins which translate single-pin accesses into
//! full-byte register writes on the controller.
//!
//! ## Example
//! ```no_run
//! # let i2c = embedded_hal_mock::eh1::i2c::Mock::new(&[]);
//! use xra1200::{Config, Direction, Variant, Xra1200};
//!
//! let xra = Xra1200::with_config(i2c, Config::default().variant(Variant::Xra1200P)).unwrap();
//!
//! let led = xra.pin(3).unwrap();
//! led.switch_to_output(true).unwrap();
//! led.set_value(false).unwrap();
//!
//! let button = xra.pin(5).unwrap();
//! button.set_direction(Direction::Input).unwrap();
//! button.set_pullup(true).unwrap();
//! let pressed = !button.value().unwrap();
//! # let _ = pressed;
//! ```
#![cfg_attr(not(any(test, feature = "std")), no_std)]

mod bus;
mod common;
mod config;
mod driver;
mod multi;
mod mutex;
mod pin;
pub mod regs;
mod xra1200;

pub use bus::I2cBus;
pub use common::{Direction, Error, InvalidDirection};
pub use config::{Config, Variant, DEFAULT_ADDRESS};
pub use driver::Driver;
pub use multi::{read_multiple, write_multiple};
pub use mutex::PortMutex;
pub use pin::Pin;
pub use regs::Register;
pub use xra1200::{Parts, Xra1200};

pub(crate) use bus::I2cExt;
