//! Device handle for one DuPPa I2C Encoder v2.1 board.
//!
//! [`I2cEncoder`] binds a [`RegisterBus`] and serialises every field access
//! through a blocking mutex, so a read-modify-write on one field can never
//! interleave with traffic for another field of the same device.

use core::cell::RefCell;

use embassy_sync::blocking_mutex::raw::{CriticalSectionRawMutex, RawMutex};
use embassy_sync::blocking_mutex::Mutex;
use embedded_hal::i2c::I2c;

use crate::accessor;
use crate::driver::{I2cDriver, RegisterBus};
use crate::error::EncoderError;
use crate::field::{Encoding, FieldDescriptor, RegisterValue};
use crate::registers;

/// Handle to a single encoder board.
///
/// Every method performs one complete bus exchange while holding the
/// handle's lock, and returns only once the exchange is finished. Nothing
/// is cached: reads always reflect the hardware at call time.
///
/// The lock type `M` decides how the handle may be shared:
///
/// - [`CriticalSectionRawMutex`] (the default) makes the handle `Sync`, so
///   it can be shared between threads or interrupt priorities.
/// - [`NoopRawMutex`](embassy_sync::blocking_mutex::raw::NoopRawMutex)
///   makes the handle `!Sync`; it can then only be used from one context,
///   which the compiler enforces.
///
/// With [`CriticalSectionRawMutex`] the whole bus exchange runs inside a
/// critical section. On single-core Cortex-M targets that keeps interrupts
/// disabled for the duration of the transfer (around 11 ms for a 128-byte
/// EEPROM read at 100 kHz). Firmware with interrupt-latency requirements
/// should pick a different [`RawMutex`], such as `NoopRawMutex` when the
/// handle is only used from one context.
///
/// # Example
///
/// ```ignore
/// use i2c_encoder_driver::I2cEncoder;
///
/// // `i2c` is any `embedded-hal` blocking I2C implementation
/// let encoder = I2cEncoder::from_i2c(i2c, 0x64);
///
/// encoder.set_u8("gp1conf_mode", 2)?;
/// encoder.set_bool("gconf_wrape", true)?;
/// let count = encoder.get_i32("cval_long")?;
/// ```
pub struct I2cEncoder<B, M: RawMutex = CriticalSectionRawMutex> {
    bus: Mutex<M, RefCell<B>>,
}

impl<I2C: I2c> I2cEncoder<I2cDriver<I2C>> {
    /// Create a handle for the board at `address` on `i2c`.
    ///
    /// # Arguments
    /// * `i2c` — I2C peripheral (takes ownership for exclusive access)
    /// * `address` — 7-bit I2C device address, as set by the board's jumpers
    pub fn from_i2c(i2c: I2C, address: u8) -> Self {
        Self::new(I2cDriver::new(i2c, address))
    }
}

impl<B: RegisterBus> I2cEncoder<B> {
    /// Create a handle over an already-addressed transport.
    pub fn new(bus: B) -> Self {
        Self::with_mutex(bus)
    }
}

impl<B, M> I2cEncoder<B, M>
where
    B: RegisterBus,
    M: RawMutex,
{
    /// Create a handle with an explicit lock type.
    ///
    /// ```ignore
    /// use embassy_sync::blocking_mutex::raw::NoopRawMutex;
    ///
    /// let encoder: I2cEncoder<_, NoopRawMutex> = I2cEncoder::with_mutex(bus);
    /// ```
    pub fn with_mutex(bus: B) -> Self {
        Self {
            bus: Mutex::new(RefCell::new(bus)),
        }
    }

    /// Consume the handle and return the transport.
    pub fn release(self) -> B {
        self.bus.into_inner().into_inner()
    }

    // -----------------------------------------------------------------------
    // Name-based access
    // -----------------------------------------------------------------------

    /// Read a field by name.
    ///
    /// # Errors
    /// * [`EncoderError::UnknownField`] if `name` is not in the register map
    ///   (no bus traffic is generated)
    /// * [`EncoderError::Transport`] on communication failure
    pub fn get(&self, name: &str) -> Result<RegisterValue, EncoderError<B::Error>> {
        self.read(field::<B::Error>(name)?)
    }

    /// Write a field by name.
    ///
    /// # Errors
    /// * [`EncoderError::UnknownField`] if `name` is not in the register map
    /// * [`EncoderError::ReadOnly`] if the field cannot be written
    /// * [`EncoderError::TypeMismatch`] if `value` is not the field's type
    /// * [`EncoderError::ValueOutOfRange`] if `value` does not fit the field
    /// * [`EncoderError::Transport`] on communication failure
    ///
    /// Only the last error involves the bus; the others are detected before
    /// any traffic.
    pub fn set(
        &self,
        name: &str,
        value: impl Into<RegisterValue>,
    ) -> Result<(), EncoderError<B::Error>> {
        self.write(field::<B::Error>(name)?, &value.into())
    }

    // -----------------------------------------------------------------------
    // Descriptor-based access
    // -----------------------------------------------------------------------

    /// Read the field described by `field`.
    ///
    /// Returns [`EncoderError::InvalidField`] without touching the bus if the
    /// descriptor's bits do not fit its register.
    pub fn read(&self, field: &FieldDescriptor) -> Result<RegisterValue, EncoderError<B::Error>> {
        self.with_bus(|bus| accessor::read_field(bus, field))
    }

    /// Write `value` to the field described by `field`.
    ///
    /// Descriptors are checked the same way as in [`read`](Self::read).
    pub fn write(
        &self,
        field: &FieldDescriptor,
        value: &RegisterValue,
    ) -> Result<(), EncoderError<B::Error>> {
        self.with_bus(|bus| accessor::write_field(bus, field, value))
    }

    // -----------------------------------------------------------------------
    // Typed helpers
    // -----------------------------------------------------------------------

    /// Read a single-bit field.
    pub fn get_bool(&self, name: &str) -> Result<bool, EncoderError<B::Error>> {
        match self.read(typed::<B::Error>(name, Encoding::Bit)?)? {
            RegisterValue::Bool(value) => Ok(value),
            _ => Err(EncoderError::TypeMismatch),
        }
    }

    /// Read a multi-bit or whole-byte field.
    pub fn get_u8(&self, name: &str) -> Result<u8, EncoderError<B::Error>> {
        match self.read(typed::<B::Error>(name, Encoding::UnsignedBits)?)? {
            RegisterValue::U8(value) => Ok(value),
            _ => Err(EncoderError::TypeMismatch),
        }
    }

    /// Read a signed 32-bit counter register.
    pub fn get_i32(&self, name: &str) -> Result<i32, EncoderError<B::Error>> {
        match self.read(typed::<B::Error>(name, Encoding::SignedBe32)?)? {
            RegisterValue::I32(value) => Ok(value),
            _ => Err(EncoderError::TypeMismatch),
        }
    }

    /// Read a floating-point counter register.
    pub fn get_f32(&self, name: &str) -> Result<f32, EncoderError<B::Error>> {
        match self.read(typed::<B::Error>(name, Encoding::FloatBe32)?)? {
            RegisterValue::F32(value) => Ok(value),
            _ => Err(EncoderError::TypeMismatch),
        }
    }

    /// Write a single-bit field.
    pub fn set_bool(&self, name: &str, value: bool) -> Result<(), EncoderError<B::Error>> {
        self.set(name, value)
    }

    /// Write a multi-bit or whole-byte field.
    pub fn set_u8(&self, name: &str, value: u8) -> Result<(), EncoderError<B::Error>> {
        self.set(name, value)
    }

    /// Write a signed 32-bit counter register.
    pub fn set_i32(&self, name: &str, value: i32) -> Result<(), EncoderError<B::Error>> {
        self.set(name, value)
    }

    /// Write a floating-point counter register.
    pub fn set_f32(&self, name: &str, value: f32) -> Result<(), EncoderError<B::Error>> {
        self.set(name, value)
    }

    /// Read a bulk region (such as `"eeprom"`) into `buf`, returning the
    /// number of bytes read.
    ///
    /// # Errors
    /// * [`EncoderError::TypeMismatch`] if the field is not a byte region
    /// * [`EncoderError::BufferTooSmall`] if `buf` is shorter than the region
    pub fn read_bytes(&self, name: &str, buf: &mut [u8]) -> Result<usize, EncoderError<B::Error>> {
        let field = typed::<B::Error>(name, Encoding::RawBytes)?;
        let len = field.byte_len();
        let target = buf.get_mut(..len).ok_or(EncoderError::<B::Error>::BufferTooSmall)?;
        self.with_bus(|bus| accessor::read_region(bus, field.register, target))?;
        Ok(len)
    }

    // -----------------------------------------------------------------------
    // Raw access
    // -----------------------------------------------------------------------

    /// Read `buf.len()` bytes starting at `register`, bypassing the field
    /// table.
    pub fn read_raw(&self, register: u8, buf: &mut [u8]) -> Result<(), EncoderError<B::Error>> {
        self.with_bus(|bus| accessor::read_bytes(bus, register, buf))
    }

    /// Write `bytes` starting at `register`, bypassing the field table.
    pub fn write_raw(&self, register: u8, bytes: &[u8]) -> Result<(), EncoderError<B::Error>> {
        self.with_bus(|bus| accessor::write_bytes(bus, register, bytes))
    }

    /// Run `f` with exclusive access to the transport.
    ///
    /// The lock is released when `f` returns, whether it succeeded or not.
    fn with_bus<R>(&self, f: impl FnOnce(&mut B) -> R) -> R {
        self.bus.lock(|cell| f(&mut cell.borrow_mut()))
    }
}

fn field<E>(name: &str) -> Result<&'static FieldDescriptor, EncoderError<E>> {
    registers::lookup(name).ok_or_else(|| {
        #[cfg(feature = "defmt")]
        defmt::warn!("unknown field {=str}", name);
        EncoderError::UnknownField
    })
}

fn typed<E>(name: &str, encoding: Encoding) -> Result<&'static FieldDescriptor, EncoderError<E>> {
    let field = field::<E>(name)?;
    if field.encoding != encoding {
        return Err(EncoderError::TypeMismatch);
    }
    Ok(field)
}
