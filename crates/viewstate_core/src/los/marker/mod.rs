//! Marker bytes and the static marker-to-rule dispatch table.

/// No-op value.
pub const NOOP: u8 = 0x01;
/// Varint integer.
pub const INT: u8 = 0x02;
/// Single byte.
pub const BYTE: u8 = 0x03;
/// Single-byte character.
pub const CHAR: u8 = 0x04;
/// Length-prefixed string.
pub const STRING: u8 = 0x05;
/// 64-bit tick count.
pub const DATETIME: u8 = 0x06;
/// IEEE754 double.
pub const DOUBLE: u8 = 0x07;
/// IEEE754 single.
pub const FLOAT: u8 = 0x08;
/// Packed ARGB color.
pub const RGBA: u8 = 0x09;
/// Palette color index.
pub const KNOWN_COLOR: u8 = 0x0a;
/// Typed enum member.
pub const ENUM: u8 = 0x0b;
/// `Color.Empty`.
pub const COLOR_EMPTY: u8 = 0x0c;
/// Two nested values.
pub const PAIR: u8 = 0x0f;
/// Three nested values.
pub const TRIPLET: u8 = 0x10;
/// Array with element type.
pub const TYPED_ARRAY: u8 = 0x14;
/// Array of strings.
pub const STRING_ARRAY: u8 = 0x15;
/// Variable-length list.
pub const LIST: u8 = 0x16;
/// Dictionary, first form.
pub const HYBRID_DICT: u8 = 0x17;
/// Dictionary, second form.
pub const HASHTABLE: u8 = 0x18;
/// Type reference.
pub const TYPE: u8 = 0x19;
/// Measurement with unit kind.
pub const UNIT: u8 = 0x1b;
/// `Unit.Empty`.
pub const UNIT_EMPTY: u8 = 0x1c;
/// Indexed string, appended to the string table.
pub const INDEXED_STRING_ADD: u8 = 0x1e;
/// Indexed string, back-reference into the string table.
pub const INDEXED_STRING_REF: u8 = 0x1f;
/// Object persisted through its string form.
pub const FORMATTED: u8 = 0x28;
/// Sub-marker inside a type reference selecting the back-reference form.
pub const TYPE_REF_INDEX: u8 = 0x2b;
/// Binary-serialized opaque payload.
pub const BINARY_FORMATTED: u8 = 0x32;
/// Array transmitting only non-null slots.
pub const SPARSE_ARRAY: u8 = 0x3c;
/// `null` constant.
pub const NULL: u8 = 0x64;
/// Empty string constant.
pub const EMPTY_STRING: u8 = 0x65;
/// Integer zero constant.
pub const ZERO: u8 = 0x66;
/// `true` constant.
pub const TRUE: u8 = 0x67;
/// `false` constant.
pub const FALSE: u8 = 0x68;

/// Grammar production selected by a marker.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Rule {
	/// Consumes nothing, yields null.
	Noop,
	/// Null constant.
	Null,
	/// Empty string constant.
	EmptyString,
	/// Integer zero constant.
	Zero,
	/// `true` constant.
	True,
	/// `false` constant.
	False,
	/// Varint integer.
	Int,
	/// Single byte.
	Byte,
	/// Single-byte character.
	Char,
	/// Length-prefixed string.
	String,
	/// Tick-count instant.
	DateTime,
	/// IEEE754 double.
	Double,
	/// IEEE754 single.
	Float,
	/// Packed ARGB color.
	Rgba,
	/// Palette color.
	KnownColor,
	/// Typed enum member.
	Enum,
	/// `Color.Empty`.
	ColorEmpty,
	/// Two nested values.
	Pair,
	/// Three nested values.
	Triplet,
	/// Array with element type descriptor.
	TypedArray,
	/// Array of strings.
	StringArray,
	/// Variable-length list.
	List,
	/// Key/value dictionary.
	Dict,
	/// Type reference, new or back-referenced.
	TypeRef,
	/// Measurement with unit kind.
	Unit,
	/// `Unit.Empty`.
	UnitEmpty,
	/// Indexed string, new or back-referenced.
	IndexedString,
	/// Object persisted through its string form.
	Formatted,
	/// Binary-serialized opaque payload.
	BinaryFormatted,
	/// Array transmitting only non-null slots.
	SparseArray,
}

impl Rule {
	/// Stable lowercase label.
	pub fn as_str(self) -> &'static str {
		match self {
			Self::Noop => "noop",
			Self::Null => "null",
			Self::EmptyString => "empty_string",
			Self::Zero => "zero",
			Self::True => "true",
			Self::False => "false",
			Self::Int => "int",
			Self::Byte => "byte",
			Self::Char => "char",
			Self::String => "string",
			Self::DateTime => "datetime",
			Self::Double => "double",
			Self::Float => "float",
			Self::Rgba => "rgba",
			Self::KnownColor => "known_color",
			Self::Enum => "enum",
			Self::ColorEmpty => "color_empty",
			Self::Pair => "pair",
			Self::Triplet => "triplet",
			Self::TypedArray => "typed_array",
			Self::StringArray => "string_array",
			Self::List => "list",
			Self::Dict => "dict",
			Self::TypeRef => "type_ref",
			Self::Unit => "unit",
			Self::UnitEmpty => "unit_empty",
			Self::IndexedString => "indexed_string",
			Self::Formatted => "formatted",
			Self::BinaryFormatted => "binary_formatted",
			Self::SparseArray => "sparse_array",
		}
	}
}

/// Every registered `(marker, rule)` pair.
pub const REGISTRATIONS: &[(u8, Rule)] = &[
	(NOOP, Rule::Noop),
	(INT, Rule::Int),
	(BYTE, Rule::Byte),
	(CHAR, Rule::Char),
	(STRING, Rule::String),
	(DATETIME, Rule::DateTime),
	(DOUBLE, Rule::Double),
	(FLOAT, Rule::Float),
	(RGBA, Rule::Rgba),
	(KNOWN_COLOR, Rule::KnownColor),
	(ENUM, Rule::Enum),
	(COLOR_EMPTY, Rule::ColorEmpty),
	(PAIR, Rule::Pair),
	(TRIPLET, Rule::Triplet),
	(TYPED_ARRAY, Rule::TypedArray),
	(STRING_ARRAY, Rule::StringArray),
	(LIST, Rule::List),
	(HYBRID_DICT, Rule::Dict),
	(HASHTABLE, Rule::Dict),
	(TYPE, Rule::TypeRef),
	(UNIT, Rule::Unit),
	(UNIT_EMPTY, Rule::UnitEmpty),
	(INDEXED_STRING_ADD, Rule::IndexedString),
	(INDEXED_STRING_REF, Rule::IndexedString),
	(FORMATTED, Rule::Formatted),
	(BINARY_FORMATTED, Rule::BinaryFormatted),
	(SPARSE_ARRAY, Rule::SparseArray),
	(NULL, Rule::Null),
	(EMPTY_STRING, Rule::EmptyString),
	(ZERO, Rule::Zero),
	(TRUE, Rule::True),
	(FALSE, Rule::False),
];

/// Immutable marker-to-rule lookup covering all 256 marker values.
#[derive(Debug, Clone)]
pub struct MarkerTable {
	rules: [Option<Rule>; 256],
}

impl MarkerTable {
	/// Build a table from explicit registrations; later entries win.
	pub const fn from_registrations(registrations: &[(u8, Rule)]) -> Self {
		let mut rules = [None; 256];
		let mut idx = 0;
		while idx < registrations.len() {
			let (marker, rule) = registrations[idx];
			rules[marker as usize] = Some(rule);
			idx += 1;
		}
		Self { rules }
	}

	/// Look up the rule registered for `marker`.
	pub fn rule(&self, marker: u8) -> Option<Rule> {
		self.rules[usize::from(marker)]
	}

	/// Iterate registered markers in ascending order.
	pub fn markers(&self) -> impl Iterator<Item = (u8, Rule)> + '_ {
		(0..=u8::MAX).filter_map(|marker| self.rule(marker).map(|rule| (marker, rule)))
	}
}

/// Process-wide dispatch table.
pub static MARKERS: MarkerTable = MarkerTable::from_registrations(REGISTRATIONS);

#[cfg(test)]
mod tests;
