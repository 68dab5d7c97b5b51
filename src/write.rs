use std::io;

use tracing::{debug, trace};

use crate::error::{Error, Result as Res};
use crate::int::{low_bits, low_mask, BitInt};
use crate::stream::BitStream;

/**
	ORs the low `size` bits of `bits` into `buf`, most significant first, starting at bit `offset`.

	The first chunk fills the rest of the partial byte at `offset`, the following chunks are whole bytes and a possible partial last byte. `buf` must hold at least `offset + size` bits.
*/
fn deposit(buf: &mut [u8], mut offset: usize, bits: u64, size: u32) {
	let mut remaining = size;
	while remaining > 0 {
		let shift = (offset % 8) as u32;
		let take = remaining.min(8 - shift);
		let chunk = (bits >> (remaining - take)) as u8 & low_bits(take);
		buf[offset / 8] |= chunk << (8 - shift - take);
		offset += take as usize;
		remaining -= take;
	}
}

impl BitStream {
	/// Writes all bits of `value`.
	pub fn put<T: BitInt>(&mut self, value: T) -> Res<()> {
		self.put_bits(value, T::BITS)
	}

	/// Writes a single bit, writing 1 for true, 0 for false.
	pub fn put_bit(&mut self, bit: bool) -> Res<()> {
		self.put_bits(bit as u8, 1)
	}

	/**
		Writes the lowest `size` bits of `value`, most significant first. Others are ignored.

		The buffer grows as needed to hold the new bits.

		# Errors

		Returns `SizeOutOfRange` if `size` is 0 or wider than `T`, and `OverlappingWrite` if the cursor is behind the high-water mark.

		# Examples

		```
		use bitstream::BitStream;

		let mut stream = BitStream::new();
		stream.put_bits(0u8, 4).unwrap();
		stream.put_bits(0xabcu16, 12).unwrap();
		assert_eq!(stream.data(), &[0x0a, 0xbc]);
		```
	*/
	pub fn put_bits<T: BitInt>(&mut self, value: T, size: u32) -> Res<()> {
		Self::check_size::<T>(size)?;
		self.check_append()?;
		let end = self.cursor + size as usize;
		self.grow_to(end);
		deposit(&mut self.buffer, self.cursor, value.to_bits() & low_mask(size), size);
		self.advance_write(end);
		Ok(())
	}

	/**
		Writes bytes at the cursor.

		At a byte-aligned cursor the bytes are appended as they are. Otherwise each byte is split over the partial byte at the cursor and the next one, so the result is the same as writing every byte with `put`.

		# Errors

		Returns `OverlappingWrite` if the cursor is behind the high-water mark.
	*/
	pub fn put_bytes(&mut self, bytes: &[u8]) -> Res<()> {
		self.check_append()?;
		if bytes.is_empty() {
			return Ok(());
		}
		let end = self.cursor + bytes.len() * 8;
		if self.is_aligned() {
			// an aligned cursor at or past the mark is always at the end of the buffer
			self.buffer.extend_from_slice(bytes);
		} else {
			let index = self.cursor / 8;
			let shift = self.cursor % 8;
			self.grow_to(end);
			for (i, &byte) in bytes.iter().enumerate() {
				self.buffer[index + i] |= byte >> shift;
				self.buffer[index + i + 1] |= byte << (8 - shift);
			}
		}
		self.advance_write(end);
		Ok(())
	}

	/**
		Moves the cursor to the high-water mark and writes bytes there.

		Use this to append after reading, wherever the reads left the cursor.

		# Examples

		```
		use bitstream::BitStream;

		let mut stream = BitStream::from_bytes(vec![0x12]);
		assert_eq!(stream.get_bits::<u8>(4).unwrap(), 0x1);
		stream.put_to_end(&[0x34, 0x56]).unwrap();
		assert_eq!(stream.data(), &[0x12, 0x34, 0x56]);
		```
	*/
	pub fn put_to_end(&mut self, bytes: &[u8]) -> Res<()> {
		trace!(from = self.cursor, to = self.high_water_mark, bytes = bytes.len(), "appending to end of stream");
		self.cursor = self.high_water_mark;
		self.put_bytes(bytes)
	}

	fn check_append(&self) -> Res<()> {
		if self.cursor < self.high_water_mark {
			debug!(cursor = self.cursor, high_water_mark = self.high_water_mark, "rejected overlapping write");
			return Err(Error::OverlappingWrite {
				cursor: self.cursor,
				high_water_mark: self.high_water_mark,
			});
		}
		Ok(())
	}

	/// Zero-extends the buffer to hold `end` bits.
	fn grow_to(&mut self, end: usize) {
		let needed = end.div_ceil(8);
		if needed > self.buffer.len() {
			self.buffer.resize(needed, 0);
		}
	}

	fn advance_write(&mut self, end: usize) {
		self.cursor = end;
		if end > self.high_water_mark {
			self.high_water_mark = end;
		}
	}
}

/**
	Write bytes to a `BitStream` just like to `Write`, with bit shifting for unaligned writes.

	Fails with `InvalidInput` where `put_bytes` would fail with `OverlappingWrite`.
*/
impl io::Write for BitStream {
	fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
		self.put_bytes(buf)?;
		Ok(buf.len())
	}

	fn flush(&mut self) -> io::Result<()> {
		Ok(())
	}
}


#[cfg(test)]
mod tests_bytes {
	use crate::{BitStream, Error};

	fn put_each(prefix_bits: u32, bytes: &[u8]) -> Vec<u8> {
		let mut stream = BitStream::new();
		if prefix_bits > 0 {
			stream.put_bits(0x5555u16, prefix_bits).unwrap();
		}
		for &byte in bytes {
			stream.put(byte).unwrap();
		}
		stream.into_inner()
	}

	#[test]
	fn put_bytes_aligned_matches_single_puts() {
		let mut stream = BitStream::new();
		stream.put(0xaau8).unwrap();
		stream.put_bytes(b"Test").unwrap();
		assert_eq!(stream.high_water_mark(), 40);
		assert_eq!(stream.into_inner(), put_each(0, b"\xaaTest"));
	}

	#[test]
	fn put_bytes_shifted() {
		let mut stream = BitStream::new();
		stream.put_bit(true).unwrap();
		stream.put_bit(false).unwrap();
		stream.put_bit(true).unwrap();
		stream.put_bytes(b"Test").unwrap();
		assert_eq!(stream.cursor(), 35);
		assert_eq!(stream.high_water_mark(), 35);
		assert_eq!(stream.data(), b"\xaa\x8c\xae\x6e\x80");
	}

	#[test]
	fn put_bytes_shifted_matches_single_puts() {
		for prefix_bits in 1..8 {
			let mut stream = BitStream::new();
			stream.put_bits(0x5555u16, prefix_bits).unwrap();
			stream.put_bytes(&[0x00, 0xff, 0x81, 0x7e]).unwrap();
			assert_eq!(stream.into_inner(), put_each(prefix_bits, &[0x00, 0xff, 0x81, 0x7e]));
		}
	}

	#[test]
	fn put_bytes_empty() {
		let mut stream = BitStream::new();
		stream.put_bits(1u8, 3).unwrap();
		stream.put_bytes(&[]).unwrap();
		assert_eq!(stream.cursor(), 3);
		assert_eq!(stream.data(), &[0x20]);
	}

	#[test]
	fn put_bytes_after_rest_of_partial_byte() {
		let mut stream = BitStream::new();
		stream.put_bits(0b11u8, 2).unwrap();
		stream.reset();
		assert_eq!(stream.get_bit(), Ok(true));
		assert_eq!(stream.get_rest(), vec![0x40]);
		stream.put_bytes(&[0x12]).unwrap();
		assert_eq!(stream.data(), &[0xc0, 0x12]);
		assert_eq!(stream.high_water_mark(), 16);
	}

	#[test]
	fn put_to_end_after_reads() {
		let mut stream = BitStream::new();
		stream.put_bits(0b101u8, 3).unwrap();
		stream.reset();
		assert_eq!(stream.get_bits::<u8>(2).unwrap(), 0b10);
		stream.put_to_end(&[0xff]).unwrap();
		assert_eq!(stream.cursor(), 11);
		assert_eq!(stream.data(), &[0xbf, 0xe0]);
	}

	#[test]
	fn put_to_end_after_rest_at_unaligned_mark() {
		let mut stream = BitStream::new();
		stream.put_bits(0b1011u8, 4).unwrap();
		stream.reset();
		assert_eq!(stream.get_bits::<u8>(1).unwrap(), 1);
		assert_eq!(stream.get_rest(), vec![0x30]);
		stream.put_to_end(&[0xa5, 0x3c]).unwrap();
		assert_eq!(stream.high_water_mark(), 20);
		let mut single = BitStream::new();
		single.put_bits(0b1011u8, 4).unwrap();
		single.put(0xa5u8).unwrap();
		single.put(0x3cu8).unwrap();
		assert_eq!(stream.data(), single.data());
		assert_eq!(stream.into_inner(), vec![0xba, 0x53, 0xc0]);
	}

	#[test]
	fn put_bytes_overlapping() {
		let mut stream = BitStream::from_bytes(vec![0x01]);
		assert_eq!(stream.put_bytes(&[0x02]), Err(Error::OverlappingWrite { cursor: 0, high_water_mark: 8 }));
		stream.put_to_end(&[0x02]).unwrap();
		assert_eq!(stream.into_inner(), vec![0x01, 0x02]);
	}

	#[test]
	fn io_write() {
		use std::io::Write;
		let mut stream = BitStream::new();
		stream.put_bits(0x0au8, 4).unwrap();
		assert_eq!(stream.write(b"\xbc").unwrap(), 1);
		stream.flush().unwrap();
		assert_eq!(stream.data(), b"\xab\xc0");

		stream.reset();
		let err = stream.write(b"\x00").unwrap_err();
		assert_eq!(err.kind(), std::io::ErrorKind::InvalidInput);
	}
}
