use chrono::{NaiveDate, NaiveDateTime, TimeDelta};
use tracing::trace;

use crate::los::marker::{self, MARKERS, Rule};
use crate::los::{Color, Cursor, DecodeContext, FormatError, Result, Unit, Value};

const TICKS_PER_SECOND: u64 = 10_000_000;

/// Decode one value: consume its marker, then run the registered rule.
///
/// Nested values re-enter this function, sharing `ctx` so back-references
/// resolve against everything decoded earlier in the same call.
pub fn decode_value(cursor: &mut Cursor<'_>, ctx: &mut DecodeContext<'_>) -> Result<Value> {
	let at = cursor.pos();
	let Some(byte) = cursor.peek_u8() else {
		return Err(FormatError::UnexpectedEndOfInput { at, need: 1, rem: 0 });
	};
	let rule = MARKERS.rule(byte).ok_or(FormatError::UnknownMarker { marker: byte, at })?;
	let _ = cursor.read_u8()?;

	ctx.enter()?;
	trace!(marker = byte, rule = rule.as_str(), at, depth = ctx.depth(), "dispatch");
	let value = decode_rule(rule, byte, cursor, ctx);
	ctx.leave();
	value
}

fn decode_rule(rule: Rule, byte: u8, cursor: &mut Cursor<'_>, ctx: &mut DecodeContext<'_>) -> Result<Value> {
	match rule {
		Rule::Noop | Rule::Null => Ok(Value::Null),
		Rule::EmptyString => Ok(Value::String(Box::default())),
		Rule::Zero => Ok(Value::Int(0)),
		Rule::True => Ok(Value::Bool(true)),
		Rule::False => Ok(Value::Bool(false)),
		Rule::Int => Ok(Value::Int(cursor.read_varint()?)),
		Rule::Byte => Ok(Value::Byte(cursor.read_u8()?)),
		Rule::Char => Ok(Value::Char(char::from(cursor.read_u8()?))),
		Rule::String => Ok(Value::String(read_string_body(cursor)?)),
		Rule::DateTime => {
			let ticks = cursor.read_u64_le()?;
			let instant = datetime_from_ticks(ticks).ok_or(FormatError::DateTimeOutOfRange { ticks })?;
			Ok(Value::DateTime(instant))
		}
		Rule::Double => Ok(Value::Double(cursor.read_f64_le()?)),
		Rule::Float => Ok(Value::Float(cursor.read_f32_le()?)),
		Rule::Rgba => Ok(Value::Color(Color::from_argb(cursor.read_u32_le()?))),
		Rule::KnownColor => {
			let index = cursor.read_varint()?;
			let name = ctx.options().known_colors.name(index).into();
			Ok(Value::Color(Color::Known { index, name }))
		}
		Rule::Enum => {
			let type_name = read_type_ref_production(cursor, ctx)?;
			let value = cursor.read_varint()?;
			Ok(Value::Enum { type_name, value })
		}
		Rule::ColorEmpty => Ok(Value::Color(Color::Empty)),
		Rule::Pair => {
			let first = decode_value(cursor, ctx)?;
			let second = decode_value(cursor, ctx)?;
			Ok(Value::Pair(Box::new(first), Box::new(second)))
		}
		Rule::Triplet => {
			let first = decode_value(cursor, ctx)?;
			let second = decode_value(cursor, ctx)?;
			let third = decode_value(cursor, ctx)?;
			Ok(Value::Triplet(Box::new(first), Box::new(second), Box::new(third)))
		}
		Rule::TypedArray => {
			// Element type descriptor is not part of the result.
			let _ = decode_value(cursor, ctx)?;
			Ok(Value::Array(decode_values(cursor, ctx)?))
		}
		Rule::StringArray => {
			let count = read_count(cursor, ctx)?;
			let mut items = Vec::with_capacity(count.min(cursor.remaining()));
			for _ in 0..count {
				items.push(read_string_production(cursor)?);
			}
			Ok(Value::StringArray(items))
		}
		Rule::List => Ok(Value::List(decode_values(cursor, ctx)?)),
		Rule::Dict => {
			let count = read_count(cursor, ctx)?;
			let mut entries = Vec::with_capacity(count.min(cursor.remaining() / 2));
			for _ in 0..count {
				let key = decode_value(cursor, ctx)?;
				let value = decode_value(cursor, ctx)?;
				entries.push((key, value));
			}
			Ok(Value::Dict(entries))
		}
		Rule::TypeRef => Ok(Value::TypeRef(read_type_ref_body(cursor, ctx)?)),
		Rule::Unit => {
			let value = cursor.read_f64_le()?;
			let unit_type = cursor.read_u32_le()?;
			Ok(Value::Unit(Unit { value, unit_type }))
		}
		Rule::UnitEmpty => Ok(Value::Unit(Unit::EMPTY)),
		Rule::IndexedString => {
			if byte == marker::INDEXED_STRING_REF {
				let index = cursor.read_u8()?;
				return Ok(Value::String(ctx.string_at(u64::from(index))?.into()));
			}
			let value = read_string_production(cursor)?;
			ctx.push_string(value.clone());
			Ok(Value::String(value))
		}
		Rule::Formatted => {
			let at = cursor.pos();
			let type_name = match decode_value(cursor, ctx)? {
				Value::Null => None,
				Value::TypeRef(name) => Some(name),
				other => {
					return Err(FormatError::UnexpectedValue {
						expected: "type_ref",
						found: other.kind(),
						at,
					});
				}
			};
			// The text is consumed even when the type collapses the value.
			let text = read_string_production(cursor)?;
			Ok(match type_name {
				Some(type_name) => Value::FormattedObject { type_name, text },
				None => Value::Null,
			})
		}
		Rule::BinaryFormatted => {
			let need = cursor.read_varint()?;
			let rem = cursor.remaining();
			let len = usize::try_from(need)
				.ok()
				.filter(|len| *len <= rem)
				.ok_or(FormatError::InsufficientPayload { need, rem })?;
			Ok(Value::OpaqueBlob(cursor.read_exact(len)?.to_vec()))
		}
		Rule::SparseArray => decode_sparse_array(cursor, ctx),
	}
}

fn decode_values(cursor: &mut Cursor<'_>, ctx: &mut DecodeContext<'_>) -> Result<Vec<Value>> {
	let count = read_count(cursor, ctx)?;
	let mut items = Vec::with_capacity(count.min(cursor.remaining()));
	for _ in 0..count {
		items.push(decode_value(cursor, ctx)?);
	}
	Ok(items)
}

fn decode_sparse_array(cursor: &mut Cursor<'_>, ctx: &mut DecodeContext<'_>) -> Result<Value> {
	// Element type descriptor is not part of the result.
	let _ = decode_value(cursor, ctx)?;
	let length = cursor.read_varint()?;
	let slots = ctx.collection_len(length)?;
	let present = cursor.read_varint()?;

	let mut items = vec![Value::Null; slots];
	for _ in 0..present {
		let index = cursor.read_varint()?;
		let slot = usize::try_from(index)
			.ok()
			.and_then(|idx| items.get_mut(idx))
			.ok_or(FormatError::InvalidSparseIndex { index, length })?;
		*slot = decode_value(cursor, ctx)?;
	}
	Ok(Value::Array(items))
}

fn read_count(cursor: &mut Cursor<'_>, ctx: &mut DecodeContext<'_>) -> Result<usize> {
	let count = cursor.read_varint()?;
	ctx.collection_len(count)
}

fn expect_marker(cursor: &mut Cursor<'_>, expected: u8) -> Result<()> {
	let at = cursor.pos();
	let found = cursor.read_u8()?;
	if found != expected {
		return Err(FormatError::UnexpectedMarker { expected, found, at });
	}
	Ok(())
}

fn read_string_body(cursor: &mut Cursor<'_>) -> Result<Box<str>> {
	let len = cursor.read_varint()?;
	if len == 0 {
		return Ok(Box::default());
	}
	let bytes = cursor.read_exact(usize::try_from(len).unwrap_or(usize::MAX))?;
	Ok(String::from_utf8_lossy(bytes).into_owned().into_boxed_str())
}

/// String embedded by another rule, written with its own string marker.
fn read_string_production(cursor: &mut Cursor<'_>) -> Result<Box<str>> {
	expect_marker(cursor, marker::STRING)?;
	read_string_body(cursor)
}

fn read_type_ref_body(cursor: &mut Cursor<'_>, ctx: &mut DecodeContext<'_>) -> Result<Box<str>> {
	if cursor.peek_u8() == Some(marker::TYPE_REF_INDEX) {
		let _ = cursor.read_u8()?;
		let index = cursor.read_varint()?;
		return Ok(ctx.type_at(index)?.into());
	}

	let name = read_string_production(cursor)?;
	ctx.push_type(name.clone());
	Ok(name)
}

/// Type reference embedded by another rule, written with its own type marker.
fn read_type_ref_production(cursor: &mut Cursor<'_>, ctx: &mut DecodeContext<'_>) -> Result<Box<str>> {
	expect_marker(cursor, marker::TYPE)?;
	read_type_ref_body(cursor, ctx)
}

/// `None` only if chrono cannot represent the instant; a full `u64` of ticks
/// (about 58 000 years) stays inside its range.
fn datetime_from_ticks(ticks: u64) -> Option<NaiveDateTime> {
	let secs = i64::try_from(ticks / TICKS_PER_SECOND).ok()?;
	let nanos = u32::try_from(ticks % TICKS_PER_SECOND).ok()? * 100;
	let epoch = NaiveDate::from_ymd_opt(1, 1, 1)?.and_hms_opt(0, 0, 0)?;
	epoch.checked_add_signed(TimeDelta::new(secs, nanos)?)
}
