//! Generic field read/write engine.
//!
//! Every field in the register map goes through the two functions here,
//! parameterised only by its [`FieldDescriptor`]. Callers are responsible
//! for holding exclusive access to the bus for the duration of a call; the
//! read-modify-write paths below issue two bus operations and must not be
//! interleaved with other traffic to the same device.

use heapless::Vec;

use crate::driver::RegisterBus;
use crate::error::EncoderError;
use crate::field::{extract, insert, Encoding, FieldDescriptor, RegisterValue, EEPROM_PAGE_SIZE};

type Result<T, E> = core::result::Result<T, EncoderError<E>>;

/// Read a field and decode it according to its encoding.
pub(crate) fn read_field<B: RegisterBus>(
    bus: &mut B,
    field: &FieldDescriptor,
) -> Result<RegisterValue, B::Error> {
    check_field::<B::Error>(field)?;
    let value = match field.encoding {
        Encoding::Bit => RegisterValue::Bool(extract(read_byte(bus, field.register)?, field) != 0),
        Encoding::UnsignedBits => RegisterValue::U8(extract(read_byte(bus, field.register)?, field)),
        Encoding::SignedBe32 => RegisterValue::I32(i32::from_be_bytes(read_word(bus, field.register)?)),
        Encoding::FloatBe32 => RegisterValue::F32(f32::from_be_bytes(read_word(bus, field.register)?)),
        Encoding::RawBytes => {
            let mut bytes = Vec::new();
            bytes
                .resize(field.byte_len(), 0)
                .map_err(|_| EncoderError::<B::Error>::BufferTooSmall)?;
            read_region(bus, field.register, &mut bytes)?;
            RegisterValue::Bytes(bytes)
        }
    };
    Ok(value)
}

/// Encode `value` and write it to a field.
///
/// All validation happens before the first bus operation, so a rejected
/// value never reaches the device. Sub-byte fields are read first and only
/// their own bits are replaced.
pub(crate) fn write_field<B: RegisterBus>(
    bus: &mut B,
    field: &FieldDescriptor,
    value: &RegisterValue,
) -> Result<(), B::Error> {
    check_field::<B::Error>(field)?;
    if !field.is_writable() {
        #[cfg(feature = "defmt")]
        defmt::warn!("write to read-only field {}", field.name);
        return Err(EncoderError::ReadOnly);
    }
    if !value.matches(field.encoding) {
        return Err(EncoderError::TypeMismatch);
    }

    match value {
        RegisterValue::Bool(bit) => update_bits(bus, field, *bit as u8),
        RegisterValue::U8(bits) => {
            if *bits > field.mask() {
                #[cfg(feature = "defmt")]
                defmt::warn!("{=u8} does not fit field {}", *bits, field.name);
                return Err(EncoderError::ValueOutOfRange);
            }
            if field.is_whole_byte() {
                write_bytes(bus, field.register, &[*bits])
            } else {
                update_bits(bus, field, *bits)
            }
        }
        RegisterValue::I32(word) => write_bytes(bus, field.register, &word.to_be_bytes()),
        RegisterValue::F32(word) => write_bytes(bus, field.register, &word.to_be_bytes()),
        RegisterValue::Bytes(bytes) => {
            if bytes.len() != field.byte_len() {
                return Err(EncoderError::ValueOutOfRange);
            }
            write_region(bus, field.register, bytes)
        }
    }
}

/// Read a region starting at `start` into `buf`, one page at a time.
pub(crate) fn read_region<B: RegisterBus>(
    bus: &mut B,
    start: u8,
    buf: &mut [u8],
) -> Result<(), B::Error> {
    check_region::<B::Error>(start, buf.len())?;
    for (page, chunk) in buf.chunks_mut(EEPROM_PAGE_SIZE).enumerate() {
        let register = page_register(start, page);
        #[cfg(feature = "defmt")]
        defmt::trace!("read page {} at {=u8:#04x}", page, register);
        bus.read_register(register, chunk)
            .map_err(|e| EncoderError::read(register, e))?;
    }
    Ok(())
}

/// Write `bytes` to a region starting at `start`, one page at a time.
pub(crate) fn write_region<B: RegisterBus>(
    bus: &mut B,
    start: u8,
    bytes: &[u8],
) -> Result<(), B::Error> {
    check_region::<B::Error>(start, bytes.len())?;
    for (page, chunk) in bytes.chunks(EEPROM_PAGE_SIZE).enumerate() {
        let register = page_register(start, page);
        #[cfg(feature = "defmt")]
        defmt::trace!("write page {} at {=u8:#04x}", page, register);
        write_bytes(bus, register, chunk)?;
    }
    Ok(())
}

// ---------------------------------------------------------------------------
// Primitives
// ---------------------------------------------------------------------------

fn read_byte<B: RegisterBus>(bus: &mut B, register: u8) -> Result<u8, B::Error> {
    let mut buf = [0u8; 1];
    read_bytes(bus, register, &mut buf)?;
    Ok(buf[0])
}

fn read_word<B: RegisterBus>(bus: &mut B, register: u8) -> Result<[u8; 4], B::Error> {
    let mut buf = [0u8; 4];
    read_bytes(bus, register, &mut buf)?;
    Ok(buf)
}

pub(crate) fn read_bytes<B: RegisterBus>(
    bus: &mut B,
    register: u8,
    buf: &mut [u8],
) -> Result<(), B::Error> {
    bus.read_register(register, buf).map_err(|e| {
        #[cfg(feature = "defmt")]
        defmt::warn!("read of {=u8:#04x} failed", register);
        EncoderError::read(register, e)
    })
}

pub(crate) fn write_bytes<B: RegisterBus>(
    bus: &mut B,
    register: u8,
    bytes: &[u8],
) -> Result<(), B::Error> {
    bus.write_register(register, bytes).map_err(|e| {
        #[cfg(feature = "defmt")]
        defmt::warn!("write of {=u8:#04x} failed", register);
        EncoderError::write(register, e)
    })
}

/// Read-modify-write of a sub-byte field. A failed read returns before
/// anything is written.
fn update_bits<B: RegisterBus>(
    bus: &mut B,
    field: &FieldDescriptor,
    value: u8,
) -> Result<(), B::Error> {
    let current = read_byte(bus, field.register)?;
    write_bytes(bus, field.register, &[insert(current, field, value)])
}

fn check_field<E>(field: &FieldDescriptor) -> Result<(), E> {
    if !field.is_valid() {
        #[cfg(feature = "defmt")]
        defmt::warn!("field {} does not fit its register", field.name);
        return Err(EncoderError::InvalidField);
    }
    Ok(())
}

fn check_region<E>(start: u8, len: usize) -> Result<(), E> {
    if start as usize + len > 0x100 {
        #[cfg(feature = "defmt")]
        defmt::warn!("region at {=u8:#04x} of {} bytes runs past 0xFF", start, len);
        return Err(EncoderError::AddressOverflow);
    }
    Ok(())
}

// Only called after `check_region`, so the page address fits in a byte.
fn page_register(start: u8, page: usize) -> u8 {
    (start as usize + page * EEPROM_PAGE_SIZE) as u8
}
