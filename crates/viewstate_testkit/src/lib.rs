//! Shared test helpers for building LOS byte streams.

/// Fixed two-byte stream header.
pub const HEADER: [u8; 2] = [0xff, 0x01];

const STRING: u8 = 0x05;
const TYPE: u8 = 0x19;
const TYPE_REF_INDEX: u8 = 0x2b;

/// Encode `value` as little-endian 7-bit groups with continuation bits.
pub fn encode_varint(mut value: u64) -> Vec<u8> {
	let mut out = Vec::with_capacity(10);
	loop {
		let mut byte = (value & 0x7f) as u8;
		value >>= 7;
		if value != 0 {
			byte |= 0x80;
		}
		out.push(byte);
		if value == 0 {
			return out;
		}
	}
}

/// Append-only builder for hand-written LOS payloads.
#[derive(Debug, Clone, Default)]
pub struct Stream {
	bytes: Vec<u8>,
}

impl Stream {
	/// Start an empty payload.
	pub fn new() -> Self {
		Self::default()
	}

	/// Append one byte (usually a marker).
	pub fn byte(mut self, byte: u8) -> Self {
		self.bytes.push(byte);
		self
	}

	/// Append raw bytes.
	pub fn bytes(mut self, bytes: &[u8]) -> Self {
		self.bytes.extend_from_slice(bytes);
		self
	}

	/// Append a varint.
	pub fn varint(mut self, value: u64) -> Self {
		self.bytes.extend(encode_varint(value));
		self
	}

	/// Append a string production: string marker, length, UTF-8 bytes.
	pub fn string(self, value: &str) -> Self {
		self.raw_string(value.as_bytes())
	}

	/// Append a string production with arbitrary (possibly invalid UTF-8) bytes.
	pub fn raw_string(self, raw: &[u8]) -> Self {
		self.byte(STRING).varint(raw.len() as u64).bytes(raw)
	}

	/// Append a type-ref value that introduces `name`.
	pub fn type_name(self, name: &str) -> Self {
		self.byte(TYPE).string(name)
	}

	/// Append a type-ref value that back-references type table slot `index`.
	pub fn type_index(self, index: u64) -> Self {
		self.byte(TYPE).byte(TYPE_REF_INDEX).varint(index)
	}

	/// Return the payload without header.
	pub fn build(self) -> Vec<u8> {
		self.bytes
	}

	/// Return header + payload.
	pub fn envelope(self) -> Vec<u8> {
		self.envelope_with_trailer(0)
	}

	/// Return header + payload + `trailer_len` filler bytes.
	pub fn envelope_with_trailer(self, trailer_len: usize) -> Vec<u8> {
		let mut out = Vec::with_capacity(HEADER.len() + self.bytes.len() + trailer_len);
		out.extend_from_slice(&HEADER);
		out.extend_from_slice(&self.bytes);
		out.extend((0..trailer_len).map(|idx| 0xa0 ^ idx as u8));
		out
	}
}
