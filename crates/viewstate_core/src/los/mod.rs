mod bytes;
mod color;
mod context;
mod decode;
mod envelope;
mod error;
pub mod marker;
mod value;

/// Bounded byte cursor with LOS primitive reads.
pub use bytes::Cursor;
/// Known-color palette used by the known-color rule.
pub use color::{KnownColors, UNKNOWN_COLOR_NAME};
/// Per-call decode state and runtime options.
pub use context::{DecodeContext, DecodeOptions, TableKind};
/// Marker dispatcher entry point.
pub use decode::decode_value;
/// Envelope entry points and result types.
pub use envelope::{Envelope, HEADER, Trailer, decode_envelope, decode_envelope_with};
/// Error and result aliases.
pub use error::{FormatError, Result};
/// Dispatch table types.
pub use marker::{MARKERS, MarkerTable, Rule};
/// Decoded value types.
pub use value::{Color, Unit, Value};
