/// Name reported for palette indices with no entry.
pub const UNKNOWN_COLOR_NAME: &str = "Unknown";

const DEFAULT_NAMES: [&str; 5] = ["Black", "White", "Red", "Green", "Blue"];

/// Immutable index-to-name palette consulted by the known-color rule.
///
/// Supply a different palette through [`crate::los::DecodeOptions`] instead of
/// mutating shared state.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct KnownColors {
	names: Vec<Box<str>>,
}

impl KnownColors {
	/// Build a palette where entry `i` names color index `i`.
	pub fn from_names<I, S>(names: I) -> Self
	where
		I: IntoIterator<Item = S>,
		S: Into<Box<str>>,
	{
		Self {
			names: names.into_iter().map(Into::into).collect(),
		}
	}

	/// Resolve an index, falling back to [`UNKNOWN_COLOR_NAME`].
	pub fn name(&self, index: u64) -> &str {
		usize::try_from(index)
			.ok()
			.and_then(|idx| self.names.get(idx))
			.map_or(UNKNOWN_COLOR_NAME, |name| &**name)
	}

	/// Number of named entries.
	pub fn len(&self) -> usize {
		self.names.len()
	}

	/// Return `true` when the palette has no entries.
	pub fn is_empty(&self) -> bool {
		self.names.is_empty()
	}
}

impl Default for KnownColors {
	fn default() -> Self {
		Self::from_names(DEFAULT_NAMES)
	}
}

#[cfg(test)]
mod tests {
	use crate::los::{KnownColors, UNKNOWN_COLOR_NAME};

	#[test]
	fn default_palette_names_primary_colors() {
		let palette = KnownColors::default();
		assert_eq!(palette.len(), 5);
		assert_eq!(palette.name(0), "Black");
		assert_eq!(palette.name(4), "Blue");
	}

	#[test]
	fn out_of_range_index_maps_to_sentinel() {
		let palette = KnownColors::default();
		assert_eq!(palette.name(5), UNKNOWN_COLOR_NAME);
		assert_eq!(palette.name(u64::MAX), UNKNOWN_COLOR_NAME);
	}

	#[test]
	fn custom_palette_replaces_defaults() {
		let palette = KnownColors::from_names(["ActiveBorder", "ActiveCaption"]);
		assert_eq!(palette.name(0), "ActiveBorder");
		assert_eq!(palette.name(2), UNKNOWN_COLOR_NAME);
		assert!(KnownColors::from_names(Vec::<String>::new()).is_empty());
	}
}
