use tracing::{debug, trace};

use crate::error::{Error, Result as Res};
use crate::int::BitInt;

/**
	A growable byte buffer with a bit-granular cursor.

	Values of 1 to 64 bits are packed most significant bit first, without any padding between them. Bit offset 0 is the most significant bit of the first byte.

	Besides the cursor the stream keeps a high-water mark: the furthest bit offset any write has reached. The mark is the logical length of the stream. Reads can't go past it, and writes can't start before it, since writes combine bits with OR and would corrupt what is already there.

	The stream is move-only. Handing the buffer off with [`into_inner`] consumes the stream, so there is never a second cursor on the same bytes.

	[`into_inner`]: #method.into_inner
*/
#[derive(Debug, Default)]
pub struct BitStream {
	/// Packed data, never shorter than `ceil(high_water_mark / 8)` bytes.
	pub(crate) buffer: Vec<u8>,
	/// Bit offset of the next read or write.
	pub(crate) cursor: usize,
	/// Greatest bit offset reached by a write.
	pub(crate) high_water_mark: usize,
}

impl BitStream {
	/**
		Creates an empty stream, ready for writing.

		# Examples

		```
		use bitstream::BitStream;

		let stream = BitStream::new();
		assert!(stream.is_empty());
		```
	*/
	pub fn new() -> Self {
		Self::default()
	}

	/// Creates an empty stream with room for `capacity` bytes before reallocating.
	pub fn with_capacity(capacity: usize) -> Self {
		Self {
			buffer: Vec::with_capacity(capacity),
			cursor: 0,
			high_water_mark: 0,
		}
	}

	/**
		Takes ownership of existing bytes, treating all of them as written.

		The cursor starts at 0, so the stream is ready for reading.

		# Examples

		```
		use bitstream::BitStream;

		let mut stream = BitStream::from_bytes(vec![0xff, 0x00]);
		assert_eq!(stream.get_bits::<u8>(4).unwrap(), 0x0f);
		assert_eq!(stream.get::<u8>().unwrap(), 0xf0);
		```
	*/
	pub fn from_bytes(data: Vec<u8>) -> Self {
		let high_water_mark = data.len() * 8;
		Self {
			buffer: data,
			cursor: 0,
			high_water_mark,
		}
	}

	/// Current bit offset of the next read or write.
	#[inline(always)]
	pub fn cursor(&self) -> usize {
		self.cursor
	}

	/// The furthest bit offset ever written, i.e. the logical length in bits.
	#[inline(always)]
	pub fn high_water_mark(&self) -> usize {
		self.high_water_mark
	}

	/// Returns whether the cursor is on a byte boundary.
	#[inline(always)]
	pub fn is_aligned(&self) -> bool {
		self.cursor.is_multiple_of(8)
	}

	/// Number of written bits between the cursor and the high-water mark.
	pub fn remaining(&self) -> usize {
		self.high_water_mark.saturating_sub(self.cursor)
	}

	/// Length of the buffer in bytes.
	pub fn len(&self) -> usize {
		self.buffer.len()
	}

	/// Returns whether the buffer holds no bytes.
	pub fn is_empty(&self) -> bool {
		self.buffer.is_empty()
	}

	/// Rewinds the cursor to the start, keeping the data and the high-water mark.
	pub fn reset(&mut self) {
		self.cursor = 0;
	}

	/// Gets a view of the buffer. This does not affect the cursor.
	pub fn data(&self) -> &[u8] {
		&self.buffer
	}

	/**
		Unwraps this `BitStream`, returning the buffer.

		# Examples

		```
		use bitstream::BitStream;

		let mut stream = BitStream::new();
		stream.put_bits(0b101u8, 3).unwrap();
		stream.put_bits(0b11010u8, 5).unwrap();
		assert_eq!(stream.into_inner(), vec![0xba]);
		```
	*/
	pub fn into_inner(self) -> Vec<u8> {
		self.buffer
	}

	/**
		Takes the buffer out, leaving an empty stream behind.

		Unlike [`into_inner`] the stream stays usable; cursor and high-water mark go back to 0 along with the buffer.

		[`into_inner`]: #method.into_inner
	*/
	pub fn take_data(&mut self) -> Vec<u8> {
		trace!(bytes = self.buffer.len(), high_water_mark = self.high_water_mark, "taking buffer out of stream");
		self.cursor = 0;
		self.high_water_mark = 0;
		std::mem::take(&mut self.buffer)
	}

	pub(crate) fn check_size<T: BitInt>(size: u32) -> Res<()> {
		if size == 0 || size > T::BITS {
			debug!(size, max = T::BITS, "rejected bit count");
			return Err(Error::SizeOutOfRange { size, max: T::BITS });
		}
		Ok(())
	}
}

impl From<Vec<u8>> for BitStream {
	fn from(data: Vec<u8>) -> Self {
		Self::from_bytes(data)
	}
}

impl AsRef<[u8]> for BitStream {
	fn as_ref(&self) -> &[u8] {
		self.data()
	}
}
