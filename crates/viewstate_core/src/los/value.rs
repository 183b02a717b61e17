use chrono::NaiveDateTime;
use serde::Serialize;

/// Runtime value emitted by LOS decoding.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "kind", content = "value", rename_all = "snake_case")]
pub enum Value {
	/// Explicit null, also used for sparse array holes.
	Null,
	/// Boolean constant.
	Bool(bool),
	/// Single raw byte.
	Byte(u8),
	/// Single-byte character.
	Char(char),
	/// Variable-length unsigned integer.
	Int(u64),
	/// 64-bit float.
	Double(f64),
	/// 32-bit float.
	Float(f32),
	/// UTF-8 lossy decoded string.
	String(Box<str>),
	/// Instant decoded from 100ns ticks since 0001-01-01.
	DateTime(NaiveDateTime),
	/// Color in one of its encoded forms.
	Color(Color),
	/// Integer enum member tagged with its type name.
	Enum {
		/// Enum type name.
		type_name: Box<str>,
		/// Underlying member value.
		value: u64,
	},
	/// Measurement with unit kind.
	Unit(Unit),
	/// Two nested values.
	Pair(Box<Value>, Box<Value>),
	/// Three nested values.
	Triplet(Box<Value>, Box<Value>, Box<Value>),
	/// Fixed-length array; holes are [`Value::Null`].
	Array(Vec<Value>),
	/// Array of plain strings.
	StringArray(Vec<Box<str>>),
	/// Variable-length list.
	List(Vec<Value>),
	/// Key/value entries in stream order, duplicates retained.
	///
	/// The stream assigns no meaning to entry order, but equality on this
	/// variant is positional: the same entries in another order compare unequal.
	Dict(Vec<(Value, Value)>),
	/// Opaque type name.
	TypeRef(Box<str>),
	/// Binary-serialized payload kept as raw bytes.
	OpaqueBlob(Vec<u8>),
	/// Object persisted through its string form.
	FormattedObject {
		/// Type name the string converts back into.
		type_name: Box<str>,
		/// Persisted string form.
		text: Box<str>,
	},
}

impl Value {
	/// Stable lowercase label for the value variant.
	pub fn kind(&self) -> &'static str {
		match self {
			Self::Null => "null",
			Self::Bool(_) => "bool",
			Self::Byte(_) => "byte",
			Self::Char(_) => "char",
			Self::Int(_) => "int",
			Self::Double(_) => "double",
			Self::Float(_) => "float",
			Self::String(_) => "string",
			Self::DateTime(_) => "date_time",
			Self::Color(_) => "color",
			Self::Enum { .. } => "enum",
			Self::Unit(_) => "unit",
			Self::Pair(..) => "pair",
			Self::Triplet(..) => "triplet",
			Self::Array(_) => "array",
			Self::StringArray(_) => "string_array",
			Self::List(_) => "list",
			Self::Dict(_) => "dict",
			Self::TypeRef(_) => "type_ref",
			Self::OpaqueBlob(_) => "opaque_blob",
			Self::FormattedObject { .. } => "formatted_object",
		}
	}

	/// Borrow string contents for `String` and `TypeRef` values.
	pub fn as_str(&self) -> Option<&str> {
		match self {
			Self::String(v) | Self::TypeRef(v) => Some(&**v),
			_ => None,
		}
	}

	/// Return `true` for [`Value::Null`].
	pub fn is_null(&self) -> bool {
		matches!(self, Self::Null)
	}
}

/// Decoded color payload.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "form", rename_all = "snake_case")]
pub enum Color {
	/// Explicit ARGB components.
	Argb {
		/// Alpha channel.
		a: u8,
		/// Red channel.
		r: u8,
		/// Green channel.
		g: u8,
		/// Blue channel.
		b: u8,
	},
	/// Palette entry by index.
	Known {
		/// Raw palette index.
		index: u64,
		/// Resolved name, or the unknown sentinel.
		name: Box<str>,
	},
	/// `Color.Empty`.
	Empty,
}

impl Color {
	/// Split a packed `0xAARRGGBB` word into components.
	pub fn from_argb(packed: u32) -> Self {
		let [a, r, g, b] = packed.to_be_bytes();
		Self::Argb { a, r, g, b }
	}
}

/// Measurement value and its unit kind.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Unit {
	/// Magnitude.
	pub value: f64,
	/// Raw unit kind code.
	pub unit_type: u32,
}

impl Unit {
	/// `Unit.Empty`.
	pub const EMPTY: Self = Self { value: 0.0, unit_type: 0 };
}
