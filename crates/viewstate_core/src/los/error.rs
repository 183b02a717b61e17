use thiserror::Error;

use crate::los::TableKind;

/// Crate-local result type.
pub type Result<T> = std::result::Result<T, FormatError>;

/// Errors produced while decoding an LOS stream.
///
/// Every variant is terminal for the decode call that raised it.
#[derive(Debug, Error)]
pub enum FormatError {
	/// Not enough bytes remained for a requested read.
	#[error("unexpected end of input at offset {at}, need {need} bytes, remaining {rem}")]
	UnexpectedEndOfInput {
		/// Byte offset where the read was attempted.
		at: usize,
		/// Requested bytes.
		need: usize,
		/// Bytes still available.
		rem: usize,
	},
	/// No decode rule is registered for a marker byte.
	#[error("unknown marker 0x{marker:02x} at offset {at}")]
	UnknownMarker {
		/// Offending marker byte.
		marker: u8,
		/// Offset of the marker.
		at: usize,
	},
	/// An embedded production did not start with its required marker.
	#[error("expected marker 0x{expected:02x} at offset {at}, got 0x{found:02x}")]
	UnexpectedMarker {
		/// Marker the grammar requires at this position.
		expected: u8,
		/// Marker actually present.
		found: u8,
		/// Offset of the marker.
		at: usize,
	},
	/// A nested value decoded to a kind the enclosing rule cannot use.
	#[error("expected {expected} value at offset {at}, got {found}")]
	UnexpectedValue {
		/// Value kind the rule requires.
		expected: &'static str,
		/// Kind actually decoded.
		found: &'static str,
		/// Offset of the nested value's marker.
		at: usize,
	},
	/// Stream does not start with `FF 01`.
	#[error("not an LOS stream (missing FF 01 header)")]
	InvalidHeader,
	/// Bytes left after the root value are neither 0, 20 nor 32.
	#[error("invalid trailer length {len} (expected 0, 20 or 32)")]
	InvalidTrailerLength {
		/// Leftover byte count.
		len: usize,
	},
	/// Back-reference index outside the current table.
	#[error("invalid {kind} back-reference {index} (table holds {len})")]
	InvalidBackReference {
		/// Referenced index.
		index: u64,
		/// Table that was consulted.
		kind: TableKind,
		/// Table length at the time of the reference.
		len: usize,
	},
	/// Sparse array element index outside the declared length.
	#[error("sparse array index {index} out of range for length {length}")]
	InvalidSparseIndex {
		/// Element index read from the stream.
		index: u64,
		/// Declared array length.
		length: u64,
	},
	/// Declared opaque payload is longer than the remaining input.
	#[error("binary payload of {need} bytes exceeds remaining {rem}")]
	InsufficientPayload {
		/// Declared payload length.
		need: u64,
		/// Bytes still available.
		rem: usize,
	},
	/// Nested values exceeded the configured depth.
	#[error("nesting too deep (max={max_depth})")]
	NestingTooDeep {
		/// Configured depth ceiling.
		max_depth: u32,
	},
	/// Variable-length integer does not fit in 64 bits.
	#[error("varint overflows 64 bits at offset {at}")]
	VarintOverflow {
		/// Offset of the first varint byte.
		at: usize,
	},
	/// Declared collection length exceeded the per-collection limit or the
	/// remaining slot budget of the decode call.
	#[error("collection too large: count={count}, max={max}")]
	CollectionTooLarge {
		/// Declared element count.
		count: u64,
		/// Largest element count still permitted at that point.
		max: usize,
	},
	/// Tick count does not map to a representable instant.
	///
	/// Guards the chrono conversion; every `u64` tick count currently fits.
	#[error("datetime ticks {ticks} out of range")]
	DateTimeOutOfRange {
		/// Raw 100ns tick count.
		ticks: u64,
	},
}
