use std::io;

use thiserror::Error;

/**
	An error returned by the put/get operations of a `BitStream`.

	All of these indicate a caller logic error, none are transient. They are detected before the stream is modified, so a stream that returned an error is still in the state it was before the call.
*/
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum Error {
	/// The requested bit count is zero or wider than the integer type.
	#[error("cannot transfer {size} bits, size must be between 1 and {max}")]
	SizeOutOfRange {
		/// Requested bit count.
		size: u32,
		/// Width of the integer type.
		max: u32,
	},
	/// A read would go past the last written bit.
	#[error("reading {size} bits at bit offset {offset} exceeds the {available} bits written")]
	OutOfBounds {
		/// Bit offset the read started at.
		offset: usize,
		/// Requested bit count.
		size: u32,
		/// High-water mark of the stream.
		available: usize,
	},
	/// A write would start inside bits that were already written.
	#[error("write at bit offset {cursor} overlaps data written up to bit offset {high_water_mark}")]
	OverlappingWrite {
		/// Bit offset the write started at.
		cursor: usize,
		/// End of the written data.
		high_water_mark: usize,
	},
}

/// Result type of the `BitStream` operations.
pub type Result<T> = std::result::Result<T, Error>;

impl From<Error> for io::Error {
	fn from(err: Error) -> Self {
		let kind = match err {
			Error::OutOfBounds { .. } => io::ErrorKind::UnexpectedEof,
			Error::SizeOutOfRange { .. } | Error::OverlappingWrite { .. } => io::ErrorKind::InvalidInput,
		};
		io::Error::new(kind, err)
	}
}
