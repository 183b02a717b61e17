use crate::los::{FormatError, Result};

/// Simple bounded cursor over an immutable byte slice.
///
/// Reads either succeed and advance, or fail and leave the position untouched.
#[derive(Debug, Clone)]
pub struct Cursor<'a> {
	bytes: &'a [u8],
	pos: usize,
}

impl<'a> Cursor<'a> {
	/// Create a cursor at position 0.
	pub fn new(bytes: &'a [u8]) -> Self {
		Self { bytes, pos: 0 }
	}

	/// Return current byte offset.
	pub fn pos(&self) -> usize {
		self.pos
	}

	/// Return remaining unread bytes.
	pub fn remaining(&self) -> usize {
		self.bytes.len().saturating_sub(self.pos)
	}

	/// Return `true` when every byte has been consumed.
	pub fn is_empty(&self) -> bool {
		self.remaining() == 0
	}

	/// Return the unread tail without advancing.
	pub fn rest(&self) -> &'a [u8] {
		&self.bytes[self.pos.min(self.bytes.len())..]
	}

	/// Look at the next byte without consuming it.
	pub fn peek_u8(&self) -> Option<u8> {
		self.bytes.get(self.pos).copied()
	}

	/// Read exactly `n` bytes and advance cursor.
	pub fn read_exact(&mut self, n: usize) -> Result<&'a [u8]> {
		if n > self.remaining() {
			return Err(FormatError::UnexpectedEndOfInput {
				at: self.pos,
				need: n,
				rem: self.remaining(),
			});
		}

		let start = self.pos;
		self.pos += n;
		Ok(&self.bytes[start..self.pos])
	}

	/// Read one byte.
	pub fn read_u8(&mut self) -> Result<u8> {
		Ok(self.read_exact(1)?[0])
	}

	/// Read an unsigned integer stored as little-endian 7-bit groups.
	///
	/// A set high bit means another group follows. Groups that would push set
	/// bits past bit 63 fail with [`FormatError::VarintOverflow`]; all-zero
	/// excess groups are accepted.
	pub fn read_varint(&mut self) -> Result<u64> {
		let start = self.pos;
		let mut at = self.pos;
		let mut value = 0_u64;
		let mut shift = 0_u32;

		loop {
			let Some(&byte) = self.bytes.get(at) else {
				return Err(FormatError::UnexpectedEndOfInput { at, need: 1, rem: 0 });
			};
			at += 1;

			let group = u64::from(byte & 0x7f);
			if group != 0 {
				if shift >= u64::BITS || (group << shift) >> shift != group {
					return Err(FormatError::VarintOverflow { at: start });
				}
				value |= group << shift;
			}

			if byte & 0x80 == 0 {
				self.pos = at;
				return Ok(value);
			}
			shift = shift.saturating_add(7);
		}
	}

	/// Read a little-endian `i16`.
	pub fn read_i16_le(&mut self) -> Result<i16> {
		Ok(i16::from_le_bytes(self.read_array()?))
	}

	/// Read a little-endian `u32`.
	pub fn read_u32_le(&mut self) -> Result<u32> {
		Ok(u32::from_le_bytes(self.read_array()?))
	}

	/// Read a little-endian `u64`.
	pub fn read_u64_le(&mut self) -> Result<u64> {
		Ok(u64::from_le_bytes(self.read_array()?))
	}

	/// Read a little-endian IEEE754 single.
	pub fn read_f32_le(&mut self) -> Result<f32> {
		Ok(f32::from_le_bytes(self.read_array()?))
	}

	/// Read a little-endian IEEE754 double.
	pub fn read_f64_le(&mut self) -> Result<f64> {
		Ok(f64::from_le_bytes(self.read_array()?))
	}

	fn read_array<const N: usize>(&mut self) -> Result<[u8; N]> {
		let raw = self.read_exact(N)?;
		let mut out = [0_u8; N];
		out.copy_from_slice(raw);
		Ok(out)
	}
}

#[cfg(test)]
mod tests;
