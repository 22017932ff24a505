//! Error reporting and validation before bus traffic

use i2c_encoder_driver::{Direction, EncoderError, FieldDescriptor, RegisterValue};

use crate::common::mock_bus::MockError;
use crate::common::{create_mock_encoder, Operation};

#[test]
fn test_unknown_field_issues_no_transactions() {
    let (encoder, bus) = create_mock_encoder();

    assert_eq!(encoder.get("cval_double"), Err(EncoderError::UnknownField));
    assert_eq!(encoder.set("gconf_foo", true), Err(EncoderError::UnknownField));
    assert_eq!(encoder.get_u8("nope"), Err(EncoderError::UnknownField));
    assert_eq!(encoder.set_i32("", 0), Err(EncoderError::UnknownField));

    assert!(bus.operations().is_empty());
}

#[test]
fn test_read_only_fields_reject_writes() {
    let (encoder, bus) = create_mock_encoder();

    for name in ["estatus", "i2status", "fstatus", "idcode", "version"] {
        assert_eq!(encoder.set_u8(name, 0), Err(EncoderError::ReadOnly), "{}", name);
    }
    assert!(bus.operations().is_empty());
}

#[test]
fn test_mismatched_value_type_is_rejected() {
    let (encoder, bus) = create_mock_encoder();

    assert_eq!(encoder.set("cval_long", 1.0f32), Err(EncoderError::TypeMismatch));
    assert_eq!(encoder.set("cval_float", 1i32), Err(EncoderError::TypeMismatch));
    assert_eq!(encoder.set("gconf_rst", 1u8), Err(EncoderError::TypeMismatch));
    assert_eq!(encoder.set("rled", true), Err(EncoderError::TypeMismatch));
    assert_eq!(encoder.get_f32("cval_long"), Err(EncoderError::TypeMismatch));

    assert!(bus.operations().is_empty());
}

#[test]
fn test_descriptor_outside_register_byte_is_an_error() {
    let (encoder, bus) = create_mock_encoder();
    let past_end = FieldDescriptor::bit("past_end", 0x00, 8);
    let straddling = FieldDescriptor::bits("straddling", 0x01, 7, 2);

    assert_eq!(encoder.read(&past_end), Err(EncoderError::InvalidField));
    assert_eq!(
        encoder.write(&past_end, &RegisterValue::Bool(true)),
        Err(EncoderError::InvalidField)
    );
    assert_eq!(encoder.read(&straddling), Err(EncoderError::InvalidField));
    assert_eq!(
        encoder.write(&straddling, &RegisterValue::U8(1)),
        Err(EncoderError::InvalidField)
    );

    assert!(bus.operations().is_empty());
}

#[test]
fn test_failed_read_aborts_read_modify_write() {
    let (encoder, bus) = create_mock_encoder();
    bus.set_register(0x00, 0x5A);
    bus.fail_next_read();

    let result = encoder.set_bool("gconf_etype", true);

    assert_eq!(
        result,
        Err(EncoderError::Transport {
            register: 0x00,
            direction: Direction::Read,
            source: MockError,
        })
    );
    assert_eq!(bus.operations(), vec![Operation::Read { register: 0x00, len: 1 }]);
    assert_eq!(bus.register(0x00), 0x5A);
}

#[test]
fn test_failed_write_is_reported_with_register() {
    let (encoder, bus) = create_mock_encoder();
    bus.fail_next_write();

    let result = encoder.set_u8("dpperiod", 7);

    assert_eq!(
        result,
        Err(EncoderError::Transport {
            register: 0x1F,
            direction: Direction::Write,
            source: MockError,
        })
    );
}

#[test]
fn test_failures_are_not_retried() {
    let (encoder, bus) = create_mock_encoder();
    bus.fail_next_read();

    assert!(encoder.get_i32("cval_long").is_err());
    assert_eq!(bus.operations().len(), 1);

    // The next call goes through normally.
    bus.load(0x08, &[0, 0, 0, 42]);
    assert_eq!(encoder.get_i32("cval_long"), Ok(42));
}

#[test]
fn test_short_buffer_for_region() {
    let (encoder, bus) = create_mock_encoder();
    let mut buf = [0u8; 127];

    assert_eq!(encoder.read_bytes("eeprom", &mut buf), Err(EncoderError::BufferTooSmall));
    assert_eq!(encoder.read_bytes("rled", &mut buf), Err(EncoderError::TypeMismatch));
    assert!(bus.operations().is_empty());
}

#[test]
fn test_errors_display() {
    let err: EncoderError<MockError> = EncoderError::Transport {
        register: 0x08,
        direction: Direction::Read,
        source: MockError,
    };
    assert_eq!(err.to_string(), "bus error during Read of register 0x08: MockError");
    assert_eq!(
        EncoderError::<MockError>::ValueOutOfRange.to_string(),
        "Value does not fit the field width"
    );

    let value: Result<RegisterValue, _> = Err(EncoderError::<MockError>::UnknownField);
    assert!(value.is_err());
}
