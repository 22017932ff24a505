//! Field descriptors and the value types they decode to.
//!
//! A [`FieldDescriptor`] names a span of bits inside the device's register
//! space together with how those bits are interpreted. The descriptors
//! themselves live in the static table in [`registers`](crate::registers);
//! this module only defines their shape and the pure bit arithmetic used
//! by the accessor.

use heapless::Vec;

/// Size of one page of the bulk (EEPROM) region, in bytes.
pub const EEPROM_PAGE_SIZE: usize = 128;

/// Largest field the table can describe, in bytes (1024 bits).
pub const MAX_FIELD_BYTES: usize = 128;

/// How the bits of a field are interpreted.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Encoding {
    /// A single bit, decoded as `bool`.
    Bit,
    /// 2–8 bits inside one register byte, decoded as `u8`.
    UnsignedBits,
    /// Four bytes, big-endian two's complement.
    SignedBe32,
    /// Four bytes, big-endian IEEE-754 single precision.
    FloatBe32,
    /// A bulk byte region, transferred in [`EEPROM_PAGE_SIZE`] pages.
    RawBytes,
}

/// Whether a field may be written.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Access {
    ReadOnly,
    ReadWrite,
}

/// Location and encoding of one named field.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct FieldDescriptor {
    /// Lower-case field name, e.g. `"gconf_dtype"`.
    pub name: &'static str,
    /// First register the field occupies.
    pub register: u8,
    /// Offset of the least significant bit within the register byte (0–7).
    pub bit_offset: u8,
    /// Width in bits (1–1024).
    pub bit_width: u16,
    pub encoding: Encoding,
    pub access: Access,
}

impl FieldDescriptor {
    /// A read-write single-bit field.
    pub const fn bit(name: &'static str, register: u8, bit_offset: u8) -> Self {
        Self {
            name,
            register,
            bit_offset,
            bit_width: 1,
            encoding: Encoding::Bit,
            access: Access::ReadWrite,
        }
    }

    /// A read-write multi-bit field inside one register byte.
    pub const fn bits(name: &'static str, register: u8, bit_offset: u8, bit_width: u16) -> Self {
        Self {
            name,
            register,
            bit_offset,
            bit_width,
            encoding: Encoding::UnsignedBits,
            access: Access::ReadWrite,
        }
    }

    /// A read-only whole-byte field.
    pub const fn ro_byte(name: &'static str, register: u8) -> Self {
        Self {
            name,
            register,
            bit_offset: 0,
            bit_width: 8,
            encoding: Encoding::UnsignedBits,
            access: Access::ReadOnly,
        }
    }

    /// A read-write 4-byte struct field.
    pub const fn word(name: &'static str, register: u8, encoding: Encoding) -> Self {
        Self {
            name,
            register,
            bit_offset: 0,
            bit_width: 32,
            encoding,
            access: Access::ReadWrite,
        }
    }

    /// A read-only bulk byte region of `bit_width` bits.
    pub const fn ro_region(name: &'static str, register: u8, bit_width: u16) -> Self {
        Self {
            name,
            register,
            bit_offset: 0,
            bit_width,
            encoding: Encoding::RawBytes,
            access: Access::ReadOnly,
        }
    }

    /// Number of bytes the field spans on the bus.
    pub const fn byte_len(&self) -> usize {
        (self.bit_offset as usize + self.bit_width as usize).div_ceil(8)
    }

    /// Mask of the field's bits, right-aligned. Only meaningful for
    /// sub-byte fields.
    pub const fn mask(&self) -> u8 {
        if self.bit_width >= 8 {
            0xFF
        } else {
            (1u8 << self.bit_width) - 1
        }
    }

    /// `true` if the field covers a whole register byte and can be written
    /// without reading the byte first.
    pub const fn is_whole_byte(&self) -> bool {
        self.bit_offset == 0 && self.bit_width == 8
    }

    pub const fn is_writable(&self) -> bool {
        matches!(self.access, Access::ReadWrite)
    }

    /// `true` if the bit span fits the storage its encoding implies: one
    /// byte for bit-fields, four bytes for struct fields, at most
    /// [`MAX_FIELD_BYTES`] for byte regions.
    pub const fn is_valid(&self) -> bool {
        if self.bit_offset > 7 || self.bit_width == 0 {
            return false;
        }
        match self.encoding {
            Encoding::Bit => self.bit_width == 1,
            Encoding::UnsignedBits => self.bit_width <= 8 - self.bit_offset as u16,
            Encoding::SignedBe32 | Encoding::FloatBe32 => {
                self.bit_offset == 0 && self.bit_width == 32
            }
            Encoding::RawBytes => self.bit_offset == 0 && self.byte_len() <= MAX_FIELD_BYTES,
        }
    }
}

/// Decoded value of a field.
#[derive(Debug, Clone, PartialEq)]
pub enum RegisterValue {
    Bool(bool),
    U8(u8),
    I32(i32),
    F32(f32),
    Bytes(Vec<u8, MAX_FIELD_BYTES>),
}

impl RegisterValue {
    /// `true` if this variant is what a field with `encoding` decodes to.
    pub fn matches(&self, encoding: Encoding) -> bool {
        matches!(
            (self, encoding),
            (RegisterValue::Bool(_), Encoding::Bit)
                | (RegisterValue::U8(_), Encoding::UnsignedBits)
                | (RegisterValue::I32(_), Encoding::SignedBe32)
                | (RegisterValue::F32(_), Encoding::FloatBe32)
                | (RegisterValue::Bytes(_), Encoding::RawBytes)
        )
    }
}

impl From<bool> for RegisterValue {
    fn from(value: bool) -> Self {
        RegisterValue::Bool(value)
    }
}

impl From<u8> for RegisterValue {
    fn from(value: u8) -> Self {
        RegisterValue::U8(value)
    }
}

impl From<i32> for RegisterValue {
    fn from(value: i32) -> Self {
        RegisterValue::I32(value)
    }
}

impl From<f32> for RegisterValue {
    fn from(value: f32) -> Self {
        RegisterValue::F32(value)
    }
}

#[cfg(feature = "defmt")]
impl defmt::Format for RegisterValue {
    fn format(&self, f: defmt::Formatter) {
        match self {
            RegisterValue::Bool(v) => defmt::write!(f, "Bool({})", v),
            RegisterValue::U8(v) => defmt::write!(f, "U8({=u8})", v),
            RegisterValue::I32(v) => defmt::write!(f, "I32({=i32})", v),
            RegisterValue::F32(v) => defmt::write!(f, "F32({=f32})", v),
            RegisterValue::Bytes(v) => defmt::write!(f, "Bytes({=[u8]})", v.as_slice()),
        }
    }
}

/// Extract a sub-byte field from a register byte.
pub(crate) fn extract(byte: u8, field: &FieldDescriptor) -> u8 {
    (byte >> field.bit_offset) & field.mask()
}

/// Replace a sub-byte field in a register byte, leaving every other bit
/// untouched. `value` must already fit the field width.
pub(crate) fn insert(byte: u8, field: &FieldDescriptor, value: u8) -> u8 {
    let mask = field.mask() << field.bit_offset;
    (byte & !mask) | ((value << field.bit_offset) & mask)
}
