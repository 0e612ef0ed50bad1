//! Sprite file format constants.
//!
//! Structure sizes, magic numbers and chunk type codes used by the decoder.

/// Size of the file header in bytes
pub const HEADER_SIZE: usize = 128;

/// File magic number at header offset 0x04
pub const FILE_MAGIC: u16 = 0xA5E0;

/// Frame magic number at frame header offset 0x04
pub const FRAME_MAGIC: u16 = 0xF1FA;

/// Size of a frame header in bytes
pub const FRAME_HEADER_SIZE: usize = 16;

/// Size of the chunk prefix (4-byte size + 2-byte type)
pub const CHUNK_HEADER_SIZE: usize = 6;

/// Size of the zlib stream header stripped before inflating
pub const ZLIB_HEADER_SIZE: usize = 2;

/// Size of the Adler-32 checksum trailing a zlib stream
pub const ZLIB_CHECKSUM_SIZE: usize = 4;

/// Number of palette entries
pub const PALETTE_SIZE: usize = 256;

/// Header flag: layer opacity has a valid value
pub const HEADER_FLAG_LAYER_OPACITY: u32 = 0x0001;

/// Layer flag: layer is visible
pub const LAYER_FLAG_VISIBLE: u16 = 0x0001;

/// Palette entry flag: entry carries a name string
pub const PALETTE_ENTRY_HAS_NAME: u16 = 0x0001;

/// Slice flag: keys carry a nine-patch rectangle
pub const SLICE_FLAG_NINE_PATCH: u32 = 0x0001;

/// Slice flag: keys carry a pivot point
pub const SLICE_FLAG_PIVOT: u32 = 0x0002;

/// Chunk type codes.
pub mod chunk_codes {
	/// Old palette chunk (256-level components)
	pub const OLD_PALETTE_0004: u16 = 0x0004;
	/// Old palette chunk (64-level components)
	pub const OLD_PALETTE_0011: u16 = 0x0011;
	/// Layer chunk
	pub const LAYER: u16 = 0x2004;
	/// Cel chunk
	pub const CEL: u16 = 0x2005;
	/// Cel extra chunk
	pub const CEL_EXTRA: u16 = 0x2006;
	/// Mask chunk (deprecated)
	pub const MASK: u16 = 0x2016;
	/// Path chunk (never used)
	pub const PATH: u16 = 0x2017;
	/// Tags chunk
	pub const TAGS: u16 = 0x2018;
	/// New palette chunk
	pub const PALETTE: u16 = 0x2019;
	/// User data chunk
	pub const USER_DATA: u16 = 0x2020;
	/// Slice chunk
	pub const SLICE: u16 = 0x2022;
}
