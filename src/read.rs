use std::io;

use tracing::{debug, trace};

use crate::error::{Error, Result as Res};
use crate::int::{low_bits, BitInt};
use crate::stream::BitStream;

/**
	Collects `size` bits of `buf` starting at bit `offset`, most significant first, right-aligned in the result.

	`buf` must hold at least `offset + size` bits and `size` must be 64 or less.
*/
fn extract(buf: &[u8], mut offset: usize, size: u32) -> u64 {
	let mut bits = 0;
	let mut remaining = size;
	while remaining > 0 {
		let shift = (offset % 8) as u32;
		let take = remaining.min(8 - shift);
		let chunk = (buf[offset / 8] >> (8 - shift - take)) & low_bits(take);
		bits = bits << take | u64::from(chunk);
		offset += take as usize;
		remaining -= take;
	}
	bits
}

impl BitStream {
	/// Reads as many bits as `T` has.
	pub fn get<T: BitInt>(&mut self) -> Res<T> {
		self.get_bits(T::BITS)
	}

	/// Reads a single bit, returning true for 1, false for 0.
	pub fn get_bit(&mut self) -> Res<bool> {
		self.get_bits::<u8>(1).map(|bit| bit != 0)
	}

	/**
		Reads `size` bits, most significant first.

		The lowest `size` bits of the result are filled by this, the others are zero. Signed types are not sign-extended.

		# Errors

		Returns `SizeOutOfRange` if `size` is 0 or wider than `T`, and `OutOfBounds` if fewer than `size` bits are left before the high-water mark. The cursor doesn't move on error.

		# Examples

		```
		use bitstream::BitStream;

		let mut stream = BitStream::from_bytes(vec![0xf8]);
		assert_eq!(stream.get_bits::<u8>(5).unwrap(), 31);
		assert!(stream.get_bits::<u8>(4).is_err());
		```
	*/
	pub fn get_bits<T: BitInt>(&mut self, size: u32) -> Res<T> {
		Self::check_size::<T>(size)?;
		self.check_readable(self.cursor, size)?;
		let bits = extract(&self.buffer, self.cursor, size);
		self.cursor += size as usize;
		Ok(T::from_bits(bits))
	}

	/**
		Moves the cursor to bit `offset` and reads `size` bits from there.

		Sequential reads continue after the bits read here. If the read fails, the cursor stays where it was.

		# Examples

		```
		use bitstream::BitStream;

		let mut stream = BitStream::from_bytes(vec![0xab, 0xcd]);
		assert_eq!(stream.get_at::<u8>(4, 8).unwrap(), 0xbc);
		assert_eq!(stream.get_bits::<u8>(4).unwrap(), 0xd);
		```
	*/
	pub fn get_at<T: BitInt>(&mut self, offset: usize, size: u32) -> Res<T> {
		Self::check_size::<T>(size)?;
		self.check_readable(offset, size)?;
		self.cursor = offset;
		self.get_bits(size)
	}

	/**
		Returns all bytes from the cursor to the end of the buffer and moves the cursor there.

		If the cursor is inside a byte, the remaining bits of that byte come first, right-aligned. The following bytes are copied as they are.

		# Examples

		```
		use bitstream::BitStream;

		let mut stream = BitStream::from_bytes(vec![0x42, 0x43]);
		stream.get_bits::<u8>(4).unwrap();
		assert_eq!(stream.get_rest(), vec![0x02, 0x43]);
		assert!(stream.get_rest().is_empty());
		```
	*/
	pub fn get_rest(&mut self) -> Vec<u8> {
		let end = self.buffer.len() * 8;
		if self.cursor >= end {
			return Vec::new();
		}
		let mut index = self.cursor / 8;
		let shift = (self.cursor % 8) as u32;
		let mut rest = Vec::with_capacity(self.buffer.len() - index);
		if shift != 0 {
			rest.push(extract(&self.buffer, self.cursor, 8 - shift) as u8);
			index += 1;
		}
		rest.extend_from_slice(&self.buffer[index..]);
		trace!(from = self.cursor, bytes = rest.len(), "read rest of stream");
		self.cursor = end;
		rest
	}

	fn check_readable(&self, offset: usize, size: u32) -> Res<()> {
		let fits = offset
			.checked_add(size as usize)
			.is_some_and(|end| end <= self.high_water_mark);
		if !fits {
			debug!(offset, size, high_water_mark = self.high_water_mark, "rejected read past end of stream");
			return Err(Error::OutOfBounds {
				offset,
				size,
				available: self.high_water_mark,
			});
		}
		Ok(())
	}
}

/**
	Read bytes from a `BitStream` just like from `Read`, with bit shifting for unaligned reads.

	Only whole bytes before the high-water mark are read; a trailing partial byte is left for `get_bits`.
*/
impl io::Read for BitStream {
	fn read(&mut self, buf: &mut [u8]) -> io::Result<usize> {
		let count = buf.len().min(self.remaining() / 8);
		for b in buf[..count].iter_mut() {
			*b = self.get()?;
		}
		Ok(count)
	}
}
