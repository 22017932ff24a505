//! Error types for the encoder driver.

use core::fmt;

/// Direction of a failed bus operation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Direction {
    /// Register read.
    Read,
    /// Register write.
    Write,
}

/// Errors that can occur when communicating with the encoder board.
#[derive(Debug, PartialEq)]
pub enum EncoderError<E> {
    /// Underlying bus error, tagged with the register and direction of the
    /// operation that failed.
    Transport {
        register: u8,
        direction: Direction,
        source: E,
    },

    /// No field with the requested name exists in the register map.
    UnknownField,

    /// Value does not fit the field's bit width.
    ValueOutOfRange,

    /// Descriptor's bit span does not fit the storage of its encoding.
    InvalidField,

    /// Attempted to write a read-only field.
    ReadOnly,

    /// Value variant does not match the field's encoding.
    TypeMismatch,

    /// A paged region would extend past register 0xFF.
    AddressOverflow,

    /// Caller-supplied buffer is shorter than the region being read.
    BufferTooSmall,
}

impl<E> EncoderError<E> {
    pub(crate) fn read(register: u8, source: E) -> Self {
        EncoderError::Transport {
            register,
            direction: Direction::Read,
            source,
        }
    }

    pub(crate) fn write(register: u8, source: E) -> Self {
        EncoderError::Transport {
            register,
            direction: Direction::Write,
            source,
        }
    }
}

impl<E: fmt::Debug> fmt::Display for EncoderError<E> {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            EncoderError::Transport {
                register,
                direction,
                source,
            } => write!(
                f,
                "bus error during {:?} of register 0x{:02X}: {:?}",
                direction, register, source
            ),
            EncoderError::UnknownField => write!(f, "Unknown register field"),
            EncoderError::ValueOutOfRange => write!(f, "Value does not fit the field width"),
            EncoderError::InvalidField => write!(f, "Field descriptor does not fit its register"),
            EncoderError::ReadOnly => write!(f, "Field is read-only"),
            EncoderError::TypeMismatch => write!(f, "Value type does not match field encoding"),
            EncoderError::AddressOverflow => write!(f, "Region extends past register 0xFF"),
            EncoderError::BufferTooSmall => write!(f, "Buffer too small for region"),
        }
    }
}

#[cfg(feature = "defmt")]
impl<E: defmt::Format> defmt::Format for EncoderError<E> {
    fn format(&self, f: defmt::Formatter) {
        match self {
            EncoderError::Transport {
                register,
                direction,
                source,
            } => defmt::write!(
                f,
                "bus error during {} of register {=u8:#04x}: {}",
                direction,
                register,
                source
            ),
            EncoderError::UnknownField => defmt::write!(f, "Unknown register field"),
            EncoderError::ValueOutOfRange => defmt::write!(f, "Value out of range"),
            EncoderError::InvalidField => defmt::write!(f, "Invalid field descriptor"),
            EncoderError::ReadOnly => defmt::write!(f, "Field is read-only"),
            EncoderError::TypeMismatch => defmt::write!(f, "Type mismatch"),
            EncoderError::AddressOverflow => defmt::write!(f, "Address overflow"),
            EncoderError::BufferTooSmall => defmt::write!(f, "Buffer too small"),
        }
    }
}
