use std::fmt;

use tracing::debug;

use crate::los::{FormatError, KnownColors, Result};

/// Runtime limits and lookup tables for LOS decoding.
#[derive(Debug, Clone)]
pub struct DecodeOptions {
	/// Maximum number of nested values, root included.
	pub max_depth: u32,
	/// Maximum declared element count for any collection.
	pub max_collection_len: usize,
	/// Maximum declared elements summed over every collection in one decode.
	pub max_total_slots: usize,
	/// Palette resolving known-color indices to names.
	pub known_colors: KnownColors,
}

impl Default for DecodeOptions {
	fn default() -> Self {
		Self {
			max_depth: 128,
			max_collection_len: 1 << 20,
			max_total_slots: 1 << 22,
			known_colors: KnownColors::default(),
		}
	}
}

impl DecodeOptions {
	/// Preset with tighter limits for hostile input.
	pub fn strict() -> Self {
		Self {
			max_depth: 32,
			max_collection_len: 1 << 16,
			max_total_slots: 1 << 18,
			known_colors: KnownColors::default(),
		}
	}
}

/// Back-reference table selector.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TableKind {
	/// Type names introduced by type-ref values.
	Type,
	/// Strings introduced by indexed-string values.
	String,
}

impl TableKind {
	/// Stable lowercase label.
	pub fn as_str(self) -> &'static str {
		match self {
			Self::Type => "type",
			Self::String => "string",
		}
	}
}

impl fmt::Display for TableKind {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		f.write_str(self.as_str())
	}
}

/// Mutable state for one decode call.
///
/// Holds the two append-only back-reference tables and the nesting depth.
/// Create one per top-level decode; never share across concurrent calls.
#[derive(Debug)]
pub struct DecodeContext<'o> {
	options: &'o DecodeOptions,
	types: Vec<Box<str>>,
	strings: Vec<Box<str>>,
	depth: u32,
	slots_used: usize,
}

impl<'o> DecodeContext<'o> {
	/// Create an empty context bound to `options`.
	pub fn new(options: &'o DecodeOptions) -> Self {
		Self {
			options,
			types: Vec::new(),
			strings: Vec::new(),
			depth: 0,
			slots_used: 0,
		}
	}

	/// Options this context was created with.
	pub fn options(&self) -> &'o DecodeOptions {
		self.options
	}

	/// Type names seen so far, in order of first appearance.
	pub fn types(&self) -> &[Box<str>] {
		&self.types
	}

	/// Indexed strings seen so far, in order of first appearance.
	pub fn strings(&self) -> &[Box<str>] {
		&self.strings
	}

	/// Current nesting depth.
	pub fn depth(&self) -> u32 {
		self.depth
	}

	pub(crate) fn push_type(&mut self, name: Box<str>) {
		debug!(kind = TableKind::Type.as_str(), index = self.types.len(), "back-reference table append");
		self.types.push(name);
	}

	pub(crate) fn type_at(&self, index: u64) -> Result<&str> {
		lookup(&self.types, index, TableKind::Type)
	}

	pub(crate) fn push_string(&mut self, value: Box<str>) {
		debug!(kind = TableKind::String.as_str(), index = self.strings.len(), "back-reference table append");
		self.strings.push(value);
	}

	pub(crate) fn string_at(&self, index: u64) -> Result<&str> {
		lookup(&self.strings, index, TableKind::String)
	}

	pub(crate) fn enter(&mut self) -> Result<()> {
		if self.depth >= self.options.max_depth {
			return Err(FormatError::NestingTooDeep {
				max_depth: self.options.max_depth,
			});
		}
		self.depth += 1;
		Ok(())
	}

	pub(crate) fn leave(&mut self) {
		self.depth = self.depth.saturating_sub(1);
	}

	/// Elements charged against the slot budget so far.
	pub fn slots_used(&self) -> usize {
		self.slots_used
	}

	/// Validate a declared collection length and charge it to the slot budget.
	///
	/// Fails when the length exceeds `max_collection_len` or what is left of
	/// `max_total_slots`; `max` in the error is whichever bound was hit.
	pub(crate) fn collection_len(&mut self, count: u64) -> Result<usize> {
		let per_collection = self.options.max_collection_len;
		let budget = self.options.max_total_slots.saturating_sub(self.slots_used);
		let max = per_collection.min(budget);
		match usize::try_from(count) {
			Ok(len) if len <= max => {
				self.slots_used += len;
				Ok(len)
			}
			_ => Err(FormatError::CollectionTooLarge { count, max }),
		}
	}
}

fn lookup(table: &[Box<str>], index: u64, kind: TableKind) -> Result<&str> {
	usize::try_from(index)
		.ok()
		.and_then(|idx| table.get(idx))
		.map(|item| &**item)
		.ok_or(FormatError::InvalidBackReference {
			index,
			kind,
			len: table.len(),
		})
}

#[cfg(test)]
mod tests {
	use crate::los::{DecodeContext, DecodeOptions, FormatError, TableKind};

	#[test]
	fn tables_index_in_insertion_order() {
		let options = DecodeOptions::default();
		let mut ctx = DecodeContext::new(&options);
		ctx.push_type("System.Int32".into());
		ctx.push_type("System.String".into());
		ctx.push_string("first".into());

		assert_eq!(ctx.type_at(0).expect("type 0"), "System.Int32");
		assert_eq!(ctx.type_at(1).expect("type 1"), "System.String");
		assert_eq!(ctx.string_at(0).expect("string 0"), "first");
		assert_eq!(ctx.types().len(), 2);
		assert_eq!(ctx.strings().len(), 1);
	}

	#[test]
	fn back_reference_must_be_below_table_length() {
		let options = DecodeOptions::default();
		let mut ctx = DecodeContext::new(&options);
		let err = ctx.type_at(0).expect_err("empty type table");
		assert!(matches!(err, FormatError::InvalidBackReference { index: 0, kind: TableKind::Type, len: 0 }));

		ctx.push_string("a".into());
		let err = ctx.string_at(1).expect_err("index equals length");
		assert!(matches!(err, FormatError::InvalidBackReference { index: 1, kind: TableKind::String, len: 1 }));
	}

	#[test]
	fn depth_guard_trips_at_limit() {
		let options = DecodeOptions {
			max_depth: 2,
			..DecodeOptions::default()
		};
		let mut ctx = DecodeContext::new(&options);
		ctx.enter().expect("level 1");
		ctx.enter().expect("level 2");
		let err = ctx.enter().expect_err("level 3 exceeds limit");
		assert!(matches!(err, FormatError::NestingTooDeep { max_depth: 2 }));

		ctx.leave();
		assert_eq!(ctx.depth(), 1);
		ctx.enter().expect("room again after leaving");
	}

	#[test]
	fn collection_len_respects_limit() {
		let options = DecodeOptions {
			max_collection_len: 4,
			..DecodeOptions::default()
		};
		let mut ctx = DecodeContext::new(&options);
		assert_eq!(ctx.collection_len(4).expect("at limit"), 4);
		let err = ctx.collection_len(5).expect_err("over limit");
		assert!(matches!(err, FormatError::CollectionTooLarge { count: 5, max: 4 }));
	}

	#[test]
	fn slot_budget_spans_collections() {
		let options = DecodeOptions {
			max_collection_len: 8,
			max_total_slots: 10,
			..DecodeOptions::default()
		};
		let mut ctx = DecodeContext::new(&options);
		ctx.collection_len(6).expect("first collection");
		assert_eq!(ctx.slots_used(), 6);
		let err = ctx.collection_len(6).expect_err("only 4 slots left");
		assert!(matches!(err, FormatError::CollectionTooLarge { count: 6, max: 4 }));
		assert_eq!(ctx.collection_len(4).expect("exactly the remainder"), 4);
		assert_eq!(ctx.slots_used(), 10);
	}

	#[test]
	fn strict_preset_tightens_defaults() {
		let strict = DecodeOptions::strict();
		let default = DecodeOptions::default();
		assert!(strict.max_depth < default.max_depth);
		assert!(strict.max_collection_len < default.max_collection_len);
		assert!(strict.max_total_slots < default.max_total_slots);
		assert_eq!(strict.known_colors, default.known_colors);
	}
}
