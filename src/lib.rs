/*!
	## Bit-granular packing into a byte buffer

	Compact binary formats often use fields that are 1 to 64 bits wide and don't start on a byte boundary. This crate provides [`BitStream`], a growable byte buffer with a bit cursor, for packing such fields one after another and reading them back in the same order.

	Bits are numbered most significant first: bit offset 0 is the highest bit of the first byte, and a field's first bit takes the highest free position.

	```
	use bitstream::BitStream;

	let mut stream = BitStream::new();
	stream.put_bits(0b101u8, 3).unwrap();
	stream.put_bits(0b11010u8, 5).unwrap();
	stream.put(0xabcdu16).unwrap();
	assert_eq!(stream.data(), &[0xba, 0xab, 0xcd]);

	stream.reset();
	assert_eq!(stream.get_bits::<u8>(3).unwrap(), 0b101);
	assert_eq!(stream.get_bits::<u16>(13).unwrap(), 0b11010_1010_1011);
	assert_eq!(stream.get_rest(), vec![0xcd]);
	```

	### Goals of this crate

	- Writing and reading of 1 to 64 bits at any bit offset.
	- Appending and extracting whole byte ranges, shifted if the cursor is inside a byte.
	- Reporting misuse as errors: oversized fields, reads past the written data, and writes into bits that are already written.
	- `std::io::{Read, Write}` on the byte level, so a stream can be handed to code that only knows bytes.

	### Non-goals of this crate

	- Defining a wire format. Field meanings, byte endianness of multi-field records and checksums are up to the caller.
	- Sign extension. Signed values are read back zero-extended.
	- Synchronization. A stream is a plain value; share it across threads behind your own lock.

	The crate logs through [`tracing`] and never installs a subscriber. Rejected calls are logged at `debug`, bulk operations at `trace`.

	[`tracing`]: https://crates.io/crates/tracing
*/
mod error;
mod int;
mod read;
mod stream;
mod write;

pub use self::error::*;
pub use self::int::BitInt;
pub use self::stream::BitStream;
