//! Blocking register driver for the DuPPa I2C Encoder v2.1.
//!
//! This crate exposes every documented register and bit-field of the board
//! as a named, typed field, and hides the I2C framing, read-modify-write
//! sequencing and byte order behind one generic accessor.
//!
//! # Architecture
//!
//! - **`driver`** — [`RegisterBus`], the two-primitive transport the rest of
//!   the crate depends on, and [`I2cDriver`], its `embedded-hal` I2C
//!   implementation.
//! - **`registers`** — the static field table ([`FIELDS`], [`lookup`]).
//! - **`accessor`** (crate-private) — one read/write engine driven by
//!   [`FieldDescriptor`]s.
//! - **[`I2cEncoder`]** (public) — the device handle. Each call locks the
//!   transport for its whole bus exchange.
//!
//! # Quick start
//!
//! ```ignore
//! use i2c_encoder_driver::I2cEncoder;
//!
//! // Construct with any `embedded-hal` blocking I2C implementation
//! let encoder = I2cEncoder::from_i2c(i2c, 0x64);
//!
//! let id = encoder.get_u8("idcode")?;
//! encoder.set_i32("cmax_long", 100)?;
//! encoder.set_i32("cmin_long", -100)?;
//! encoder.set_bool("gconf_wrape", true)?;
//!
//! let position = encoder.get_i32("cval_long")?;
//! ```
//!
//! # Features
//!
//! - **`defmt`** — Enable [`defmt::Format`] implementations on public types
//!   and log rejected writes and bus failures.

#![cfg_attr(not(test), no_std)]

pub use driver::{I2cDriver, RegisterBus};
pub use encoder::I2cEncoder;
pub use error::{Direction, EncoderError};
pub use field::{Access, Encoding, FieldDescriptor, RegisterValue, EEPROM_PAGE_SIZE, MAX_FIELD_BYTES};
pub use registers::{lookup, FIELDS};

mod accessor;
pub mod driver;
mod encoder;
mod error;
pub mod field;
pub mod registers;
