use serde::Serialize;
use tracing::debug;

use crate::los::{Cursor, DecodeContext, DecodeOptions, FormatError, Result, Value, decode_value};

/// Fixed two-byte stream header.
pub const HEADER: [u8; 2] = [0xff, 0x01];

/// Trailer classification by length.
///
/// Only the length is inspected; the bytes are never verified here.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Trailer {
	/// No bytes after the root value.
	None,
	/// 20 bytes, the size of an HMAC-SHA1 tag.
	Sha1,
	/// 32 bytes, the size of an HMAC-SHA256 tag.
	Sha256,
}

impl Trailer {
	/// Classify a leftover byte count.
	pub fn from_len(len: usize) -> Result<Self> {
		match len {
			0 => Ok(Self::None),
			20 => Ok(Self::Sha1),
			32 => Ok(Self::Sha256),
			_ => Err(FormatError::InvalidTrailerLength { len }),
		}
	}

	/// Trailer size in bytes.
	pub fn len(self) -> usize {
		match self {
			Self::None => 0,
			Self::Sha1 => 20,
			Self::Sha256 => 32,
		}
	}

	/// Return `true` when no trailer is present.
	pub fn is_empty(self) -> bool {
		self == Self::None
	}
}

/// Decoded LOS envelope.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Envelope {
	/// Root value.
	pub value: Value,
	/// `true` when a 20- or 32-byte trailer follows the root value.
	pub mac_enabled: bool,
	/// Trailer classification.
	pub trailer: Trailer,
	/// Everything after the header: payload followed by trailer.
	pub raw: Vec<u8>,
}

impl Envelope {
	/// Encoded root value bytes, without header or trailer.
	pub fn payload(&self) -> &[u8] {
		&self.raw[..self.payload_len()]
	}

	/// Trailer bytes, empty when `mac_enabled` is `false`.
	pub fn trailer_bytes(&self) -> &[u8] {
		&self.raw[self.payload_len()..]
	}

	fn payload_len(&self) -> usize {
		self.raw.len().saturating_sub(self.trailer.len())
	}
}

/// Decode a full envelope with default options.
pub fn decode_envelope(bytes: &[u8]) -> Result<Envelope> {
	decode_envelope_with(bytes, &DecodeOptions::default())
}

/// Decode a full envelope: header, one root value, optional trailer.
pub fn decode_envelope_with(bytes: &[u8], options: &DecodeOptions) -> Result<Envelope> {
	let Some(raw) = bytes.strip_prefix(&HEADER) else {
		debug!(len = bytes.len(), "rejecting stream without LOS header");
		return Err(FormatError::InvalidHeader);
	};

	let mut cursor = Cursor::new(raw);
	let mut ctx = DecodeContext::new(options);
	let value = decode_value(&mut cursor, &mut ctx)?;

	let trailer_len = cursor.remaining();
	let trailer = Trailer::from_len(trailer_len).inspect_err(|_| {
		debug!(trailer_len, "rejecting unexpected trailer length");
	})?;
	let mac_enabled = !trailer.is_empty();
	debug!(
		payload_len = cursor.pos(),
		trailer_len,
		mac_enabled,
		types = ctx.types().len(),
		strings = ctx.strings().len(),
		"decoded LOS envelope"
	);

	Ok(Envelope {
		value,
		mac_enabled,
		trailer,
		raw: raw.to_vec(),
	})
}
