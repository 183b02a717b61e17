use viewstate_testkit::encode_varint;

use crate::los::{Cursor, FormatError};

#[test]
fn reads_fixed_width_little_endian() {
	let mut bytes = Vec::new();
	bytes.extend_from_slice(&(-2_i16).to_le_bytes());
	bytes.extend_from_slice(&0xAABB_CCDD_u32.to_le_bytes());
	bytes.extend_from_slice(&0x1122_3344_5566_7788_u64.to_le_bytes());
	bytes.extend_from_slice(&1.5_f32.to_le_bytes());
	bytes.extend_from_slice(&(-0.25_f64).to_le_bytes());

	let mut cursor = Cursor::new(&bytes);
	assert_eq!(cursor.read_i16_le().expect("i16"), -2);
	assert_eq!(cursor.read_u32_le().expect("u32"), 0xAABB_CCDD);
	assert_eq!(cursor.read_u64_le().expect("u64"), 0x1122_3344_5566_7788);
	assert_eq!(cursor.read_f32_le().expect("f32"), 1.5);
	assert_eq!(cursor.read_f64_le().expect("f64"), -0.25);
	assert!(cursor.is_empty());
}

#[test]
fn short_read_reports_offset_and_keeps_position() {
	let mut cursor = Cursor::new(&[1, 2, 3]);
	cursor.read_u8().expect("first byte");

	let err = cursor.read_u32_le().expect_err("only two bytes remain");
	assert!(matches!(err, FormatError::UnexpectedEndOfInput { at: 1, need: 4, rem: 2 }));
	assert_eq!(cursor.pos(), 1);
	assert_eq!(cursor.rest(), &[2, 3]);
}

#[test]
fn peek_does_not_advance() {
	let cursor = Cursor::new(&[0x65]);
	assert_eq!(cursor.peek_u8(), Some(0x65));
	assert_eq!(cursor.pos(), 0);
	assert_eq!(Cursor::new(&[]).peek_u8(), None);
}

#[test]
fn varint_single_and_multi_group() {
	let mut cursor = Cursor::new(&[0x7f, 0xac, 0x02, 0x80, 0x80, 0x01]);
	assert_eq!(cursor.read_varint().expect("one group"), 127);
	assert_eq!(cursor.read_varint().expect("two groups"), 300);
	assert_eq!(cursor.read_varint().expect("three groups"), 16384);
	assert!(cursor.is_empty());
}

#[test]
fn varint_truncated_mid_value() {
	let mut cursor = Cursor::new(&[0xac]);
	let err = cursor.read_varint().expect_err("continuation bit without next group");
	assert!(matches!(err, FormatError::UnexpectedEndOfInput { at: 1, need: 1, rem: 0 }));
	assert_eq!(cursor.pos(), 0);
}

#[test]
fn varint_round_trips_across_magnitudes() {
	let mut samples = vec![0_u64, 1, 127, 128, 255, 16_383, 16_384, 2_097_151, 2_097_152, u64::from(u32::MAX), u64::MAX];
	for bits in 0..64 {
		let base = 1_u64 << bits;
		samples.extend([base - 1, base, base | (base >> 1), base.wrapping_mul(0x9E37_79B9) | base]);
	}

	for value in samples {
		let encoded = encode_varint(value);
		let mut cursor = Cursor::new(&encoded);
		assert_eq!(cursor.read_varint().expect("varint decodes"), value, "value {value:#x}");
		assert!(cursor.is_empty(), "value {value:#x} left bytes behind");
	}
}

#[test]
fn varint_accepts_zero_padding_groups() {
	let mut cursor = Cursor::new(&[0x81, 0x80, 0x80, 0x80, 0x80, 0x80, 0x80, 0x80, 0x80, 0x80, 0x80, 0x00]);
	assert_eq!(cursor.read_varint().expect("padded varint"), 1);
}

#[test]
fn varint_rejects_values_past_64_bits() {
	let mut bytes = vec![0xff; 9];
	bytes.push(0x02);
	let mut cursor = Cursor::new(&bytes);
	let err = cursor.read_varint().expect_err("bit 64 is set");
	assert!(matches!(err, FormatError::VarintOverflow { at: 0 }));

	let mut bytes = vec![0xff; 9];
	bytes.push(0x01);
	assert_eq!(Cursor::new(&bytes).read_varint().expect("u64::MAX fits"), u64::MAX);
}
