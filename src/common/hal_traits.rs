// src/common/hal_traits.rs

use core::fmt::Debug;

/// Abstraction for the blocking delay used between polls.
///
/// Note: with the `impl-generic-hal` feature any
/// `embedded_hal::delay::DelayNs` can be used through [`HalDelay`].
pub trait Sps30Timer {
    /// Delay for at least the specified number of milliseconds.
    fn delay_ms(&mut self, ms: u32);
}

/// Abstraction for the byte transport to the sensor (I2C in practice).
///
/// Each call is one complete bus exchange. The session wraps every exchange
/// in [`acquire`](Self::acquire) / [`release`](Self::release), so an
/// implementation sharing a physical bus can lock it there.
pub trait Sps30Transport {
    /// Associated error type for communication errors.
    type Error: Debug;

    /// Writes `write` to the device, then reads exactly `read.len()` bytes.
    fn exchange(&mut self, address: u8, write: &[u8], read: &mut [u8]) -> Result<(), Self::Error>;

    /// Writes `write` to the device without reading a response.
    fn write_only(&mut self, address: u8, write: &[u8]) -> Result<(), Self::Error>;

    /// Takes exclusive access to the bus. Called before every exchange.
    fn acquire(&mut self) -> Result<(), Self::Error> {
        Ok(())
    }

    /// Gives up exclusive access. Called once for every successful
    /// [`acquire`](Self::acquire), including when the exchange failed.
    fn release(&mut self) {}
}

impl<T: Sps30Transport + ?Sized> Sps30Transport for &mut T {
    type Error = T::Error;

    fn exchange(&mut self, address: u8, write: &[u8], read: &mut [u8]) -> Result<(), Self::Error> {
        (**self).exchange(address, write, read)
    }

    fn write_only(&mut self, address: u8, write: &[u8]) -> Result<(), Self::Error> {
        (**self).write_only(address, write)
    }

    fn acquire(&mut self) -> Result<(), Self::Error> {
        (**self).acquire()
    }

    fn release(&mut self) {
        (**self).release()
    }
}

impl<D: Sps30Timer + ?Sized> Sps30Timer for &mut D {
    fn delay_ms(&mut self, ms: u32) {
        (**self).delay_ms(ms)
    }
}

/// Blocking timer backed by `std::thread::sleep`.
#[cfg(feature = "std")]
#[derive(Debug, Default, Copy, Clone)]
pub struct StdTimer;

#[cfg(feature = "std")]
impl Sps30Timer for StdTimer {
    fn delay_ms(&mut self, ms: u32) {
        std::thread::sleep(std::time::Duration::from_millis(u64::from(ms)));
    }
}

/// Adapts any `embedded_hal::i2c::I2c` bus into an [`Sps30Transport`].
///
/// The write and the read are issued as two separate I2C transactions: the
/// sensor needs a STOP condition between the command and the read header.
/// Exclusive access comes from the `&mut` borrow of the bus; for a shared
/// bus wrap it with one of the `embedded-hal-bus` device types first.
#[cfg(feature = "impl-generic-hal")]
#[derive(Debug)]
pub struct HalTransport<I2C> {
    i2c: I2C,
}

#[cfg(feature = "impl-generic-hal")]
impl<I2C> HalTransport<I2C> {
    pub fn new(i2c: I2C) -> Self {
        Self { i2c }
    }

    pub fn release_bus(self) -> I2C {
        self.i2c
    }
}

#[cfg(feature = "impl-generic-hal")]
impl<I2C> Sps30Transport for HalTransport<I2C>
where
    I2C: embedded_hal::i2c::I2c,
{
    type Error = I2C::Error;

    fn exchange(&mut self, address: u8, write: &[u8], read: &mut [u8]) -> Result<(), Self::Error> {
        self.i2c.write(address, write)?;
        self.i2c.read(address, read)
    }

    fn write_only(&mut self, address: u8, write: &[u8]) -> Result<(), Self::Error> {
        self.i2c.write(address, write)
    }
}

/// Adapts any `embedded_hal::delay::DelayNs` into an [`Sps30Timer`].
#[cfg(feature = "impl-generic-hal")]
#[derive(Debug)]
pub struct HalDelay<D>(pub D);

#[cfg(feature = "impl-generic-hal")]
impl<D> Sps30Timer for HalDelay<D>
where
    D: embedded_hal::delay::DelayNs,
{
    fn delay_ms(&mut self, ms: u32) {
        self.0.delay_ms(ms)
    }
}
