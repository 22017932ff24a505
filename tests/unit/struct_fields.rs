//! Four-byte counter registers and the bulk storage region

use i2c_encoder_driver::{EncoderError, RegisterValue};

use crate::common::{create_mock_encoder, Operation};

#[test]
fn test_long_values_round_trip_big_endian() {
    let (encoder, bus) = create_mock_encoder();

    for value in [0, 1, -1, i32::MAX, i32::MIN, 0x1234_5678] {
        encoder.set_i32("cval_long", value).unwrap();
        assert_eq!(bus.dump(0x08, 4), value.to_be_bytes().to_vec());
        assert_eq!(encoder.get_i32("cval_long").unwrap(), value);
    }
}

#[test]
fn test_float_values_round_trip_bit_exact() {
    let (encoder, bus) = create_mock_encoder();

    for value in [0.0f32, -0.0, 1.0, -3.75, f32::MIN_POSITIVE, f32::MAX, 0.1, f32::INFINITY] {
        encoder.set_f32("istep_float", value).unwrap();
        assert_eq!(bus.dump(0x14, 4), value.to_be_bytes().to_vec());
        assert_eq!(encoder.get_f32("istep_float").unwrap().to_bits(), value.to_bits());
    }
}

#[test]
fn test_nan_payload_is_preserved() {
    let (encoder, _bus) = create_mock_encoder();
    let nan = f32::from_bits(0x7FC0_1234);

    encoder.set_f32("cmax_float", nan).unwrap();

    assert_eq!(encoder.get_f32("cmax_float").unwrap().to_bits(), 0x7FC0_1234);
}

#[test]
fn test_struct_write_is_a_single_four_byte_write() {
    let (encoder, bus) = create_mock_encoder();

    encoder.set_i32("cmin_long", -2).unwrap();

    assert_eq!(
        bus.operations(),
        vec![Operation::Write { register: 0x10, data: vec![0xFF, 0xFF, 0xFF, 0xFE] }]
    );
}

#[test]
fn test_counter_registers_do_not_overlap() {
    let (encoder, bus) = create_mock_encoder();

    encoder.set_i32("cval_long", 1).unwrap();
    encoder.set_i32("cmax_long", 2).unwrap();
    encoder.set_i32("cmin_long", 3).unwrap();
    encoder.set_i32("istep_long", 4).unwrap();

    assert_eq!(encoder.get_i32("cval_long").unwrap(), 1);
    assert_eq!(encoder.get_i32("cmax_long").unwrap(), 2);
    assert_eq!(encoder.get_i32("cmin_long").unwrap(), 3);
    assert_eq!(encoder.get_i32("istep_long").unwrap(), 4);
    assert_eq!(bus.register(0x18), 0, "RLED must be untouched");
}

#[test]
fn test_eeprom_reads_whole_page() {
    let (encoder, bus) = create_mock_encoder();
    let contents: Vec<u8> = (0..128u8).map(|b| b.wrapping_mul(3)).collect();
    bus.load(0x80, &contents);

    let mut buf = [0u8; 128];
    assert_eq!(encoder.read_bytes("eeprom", &mut buf), Ok(128));
    assert_eq!(buf.to_vec(), contents);

    match encoder.get("eeprom").unwrap() {
        RegisterValue::Bytes(bytes) => assert_eq!(bytes.as_slice(), contents.as_slice()),
        other => panic!("unexpected value {:?}", other),
    }
}

#[test]
fn test_eeprom_is_read_only() {
    let (encoder, bus) = create_mock_encoder();
    let mut bytes = heapless::Vec::<u8, 128>::new();
    bytes.resize(128, 0xEE).unwrap();

    assert_eq!(encoder.set("eeprom", RegisterValue::Bytes(bytes)), Err(EncoderError::ReadOnly));
    assert!(bus.operations().is_empty());
}
