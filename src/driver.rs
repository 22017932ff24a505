//! Bus transport for the encoder board.
//!
//! The accessor layer only needs two primitives: read `N` bytes starting at
//! a register, and write bytes starting at a register. [`RegisterBus`]
//! captures exactly that, and [`I2cDriver`] implements it for any
//! `embedded-hal` blocking I2C peripheral bound to a fixed device address.

use embedded_hal::i2c::{I2c, Operation};

/// Addressed register read/write primitive.
///
/// Implementations are bound to a single device for their whole lifetime;
/// the register address is the only addressing information passed in.
pub trait RegisterBus {
    /// Error reported by the underlying bus.
    type Error;

    /// Read `buf.len()` bytes starting at `register`.
    fn read_register(&mut self, register: u8, buf: &mut [u8]) -> Result<(), Self::Error>;

    /// Write `bytes` starting at `register`.
    fn write_register(&mut self, register: u8, bytes: &[u8]) -> Result<(), Self::Error>;
}

/// I2C transport for the encoder board.
///
/// Owns an I2C peripheral and a 7-bit device address.
pub struct I2cDriver<I2C> {
    i2c: I2C,
    address: u8,
}

impl<I2C> I2cDriver<I2C>
where
    I2C: I2c,
{
    /// Create a new I2C transport.
    ///
    /// # Arguments
    /// * `i2c` — I2C peripheral (takes ownership for exclusive access)
    /// * `address` — 7-bit I2C device address, as set by the board's jumpers
    pub fn new(i2c: I2C, address: u8) -> Self {
        Self { i2c, address }
    }

    /// The 7-bit device address this transport talks to.
    pub fn address(&self) -> u8 {
        self.address
    }

    /// Consume the transport and return the I2C peripheral.
    pub fn release(self) -> I2C {
        self.i2c
    }
}

impl<I2C> RegisterBus for I2cDriver<I2C>
where
    I2C: I2c,
{
    type Error = I2C::Error;

    /// Write the register pointer, then read the response with a repeated
    /// start.
    fn read_register(&mut self, register: u8, buf: &mut [u8]) -> Result<(), Self::Error> {
        self.i2c.write_read(self.address, &[register], buf)
    }

    /// Send the register pointer followed by the payload.
    ///
    /// Both halves go out as adjacent write operations of one transaction,
    /// so the device sees a single `[register, b0, b1, ...]` write with no
    /// restart in between and no intermediate buffer is needed.
    fn write_register(&mut self, register: u8, bytes: &[u8]) -> Result<(), Self::Error> {
        self.i2c.transaction(
            self.address,
            &mut [Operation::Write(&[register]), Operation::Write(bytes)],
        )
    }
}
