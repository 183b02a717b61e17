//! Public library API for decoding ASP.NET Limited Object Serialization (view state) streams.

/// LOS envelope parsing, marker dispatch, and the decoded value model.
pub mod los;
