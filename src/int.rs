/**
	An integer type that can be written to and read from a `BitStream`.

	The stream moves every value through a `u64` bit pattern, so the same shifting code serves all widths. Signed values are stored as their two's complement bits and come back zero-extended: reading 4 bits of `-1i8` gives `0x0f`, not `-1`.

	You can't implement this trait, it only exists as a trait bound.
*/
pub trait BitInt: private::Sealed + Copy {
	/// Width of the type in bits, and the largest `size` a single put/get accepts.
	const BITS: u32;

	/// The value's bit pattern, zero-extended.
	fn to_bits(self) -> u64;

	/// Truncates a bit pattern to this type.
	fn from_bits(bits: u64) -> Self;
}

macro_rules! impl_bit_int {
	($($ty:ty => $unsigned:ty),*) => {
		$(
			impl BitInt for $ty {
				const BITS: u32 = <$ty>::BITS;

				#[inline(always)]
				fn to_bits(self) -> u64 {
					self as $unsigned as u64
				}

				#[inline(always)]
				fn from_bits(bits: u64) -> Self {
					bits as $ty
				}
			}

			impl private::Sealed for $ty {}
		)*
	};
}

impl_bit_int!(
	u8 => u8, u16 => u16, u32 => u32, u64 => u64,
	i8 => u8, i16 => u16, i32 => u32, i64 => u64
);

/// The lowest `count` bits of a byte set, 1 <= count <= 8.
#[inline(always)]
pub(crate) fn low_bits(count: u32) -> u8 {
	0xff >> (8 - count)
}

/// The lowest `size` bits of a `u64` set, 1 <= size <= 64.
#[inline(always)]
pub(crate) fn low_mask(size: u32) -> u64 {
	u64::MAX >> (64 - size)
}

// ensures no one else implements the trait
mod private {
	pub trait Sealed {}
}
