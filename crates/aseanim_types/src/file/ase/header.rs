//! File header decoding.

use std::fmt;

use serde::Serialize;

use crate::file::{DecodeError, Section};

use super::{constants, cursor::ByteCursor};

/// Pixel encoding used by every cel in a file, derived from the header color depth.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum PixelFormat {
	/// 8-bit palette indices
	Indexed,
	/// 16-bit value + alpha pairs
	Grayscale,
	/// 32-bit RGBA samples
	Rgba,
}

impl PixelFormat {
	/// Maps a header color depth (8, 16 or 32) to a pixel format.
	pub fn from_depth(depth: u16) -> Option<Self> {
		match depth {
			8 => Some(Self::Indexed),
			16 => Some(Self::Grayscale),
			32 => Some(Self::Rgba),
			_ => None,
		}
	}

	/// Number of bytes used by a single pixel sample.
	#[inline]
	pub const fn bytes_per_pixel(self) -> usize {
		match self {
			Self::Indexed => 1,
			Self::Grayscale => 2,
			Self::Rgba => 4,
		}
	}

	/// Color depth in bits.
	#[inline]
	pub const fn depth(self) -> u16 {
		match self {
			Self::Indexed => 8,
			Self::Grayscale => 16,
			Self::Rgba => 32,
		}
	}
}

impl fmt::Display for PixelFormat {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		match self {
			Self::Indexed => write!(f, "Indexed"),
			Self::Grayscale => write!(f, "Grayscale"),
			Self::Rgba => write!(f, "RGBA"),
		}
	}
}

/// Fixed 128-byte file header.
///
/// ```text
/// Offset  Size  Field
/// ------  ----  ------------------------------------------
/// 0x00    4     file size
/// 0x04    2     magic (0xA5E0)
/// 0x06    2     frame count
/// 0x08    2     width
/// 0x0A    2     height
/// 0x0C    2     color depth (8, 16, 32)
/// 0x0E    4     flags (bit 0: layer opacity has valid value)
/// 0x12    2     speed (deprecated)
/// 0x14    4     reserved (0)
/// 0x18    4     reserved (0)
/// 0x1C    1     transparent palette index
/// 0x1D    3     unused
/// 0x20    2     palette color count (0 = 256)
/// 0x22    1     pixel width
/// 0x23    1     pixel height
/// 0x24    92    reserved
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Header {
	file_size: u32,
	frame_count: u16,
	width: u16,
	height: u16,
	color_depth: u16,
	pixel_format: PixelFormat,
	flags: u32,
	speed: u16,
	transparent_index: u8,
	color_count: u16,
	pixel_width: u8,
	pixel_height: u8,
}

impl Header {
	/// Size of the header in bytes
	pub const SIZE: usize = constants::HEADER_SIZE;

	/// Decodes the header from the current cursor position.
	///
	/// # Errors
	///
	/// - [`DecodeError::TruncatedStream`] if fewer than 128 bytes remain
	/// - [`DecodeError::BadMagic`] if the magic number is not `0xA5E0`
	/// - [`DecodeError::InvalidPayload`] for an unsupported color depth
	pub fn decode(cursor: &mut ByteCursor<'_>) -> Result<Self, DecodeError> {
		let start = cursor.position();
		if cursor.remaining() < Self::SIZE {
			return Err(DecodeError::truncated(start, Self::SIZE, cursor.remaining()));
		}

		let file_size = cursor.read_u32()?;
		let magic = cursor.read_u16()?;
		if magic != constants::FILE_MAGIC {
			return Err(DecodeError::bad_magic(Section::Header, constants::FILE_MAGIC, magic));
		}

		let frame_count = cursor.read_u16()?;
		let width = cursor.read_u16()?;
		let height = cursor.read_u16()?;
		let color_depth = cursor.read_u16()?;
		let pixel_format = PixelFormat::from_depth(color_depth).ok_or_else(|| {
			DecodeError::invalid_payload(
				Section::Header,
				format!("unsupported color depth {color_depth}"),
			)
		})?;
		let flags = cursor.read_u32()?;
		let speed = cursor.read_u16()?;
		cursor.skip(8)?; // two reserved dwords
		let transparent_index = cursor.read_u8()?;
		cursor.skip(3)?;
		let color_count = cursor.read_u16()?;
		let pixel_width = cursor.read_u8()?;
		let pixel_height = cursor.read_u8()?;
		cursor.seek(start + Self::SIZE)?;

		Ok(Self {
			file_size,
			frame_count,
			width,
			height,
			color_depth,
			pixel_format,
			flags,
			speed,
			transparent_index,
			color_count,
			pixel_width,
			pixel_height,
		})
	}

	/// Returns the file size recorded in the header.
	pub fn file_size(&self) -> u32 {
		self.file_size
	}

	/// Returns the number of frames.
	pub fn frame_count(&self) -> u16 {
		self.frame_count
	}

	/// Returns the canvas width in pixels.
	pub fn width(&self) -> u16 {
		self.width
	}

	/// Returns the canvas height in pixels.
	pub fn height(&self) -> u16 {
		self.height
	}

	/// Returns the raw color depth in bits.
	pub fn color_depth(&self) -> u16 {
		self.color_depth
	}

	/// Returns the pixel format derived from the color depth.
	pub fn pixel_format(&self) -> PixelFormat {
		self.pixel_format
	}

	/// Returns the raw header flags.
	pub fn flags(&self) -> u32 {
		self.flags
	}

	/// Returns `true` if the "layer opacity has valid value" flag is set.
	///
	/// Layer and cel opacity are applied regardless of this flag.
	pub fn layer_opacity_valid(&self) -> bool {
		self.flags & constants::HEADER_FLAG_LAYER_OPACITY != 0
	}

	/// Returns the deprecated per-file speed in milliseconds.
	pub fn speed(&self) -> u16 {
		self.speed
	}

	/// Returns the palette index treated as transparent in indexed sprites.
	pub fn transparent_index(&self) -> u8 {
		self.transparent_index
	}

	/// Returns the raw palette color count (0 means 256).
	pub fn color_count(&self) -> u16 {
		self.color_count
	}

	/// Returns the palette color count with 0 resolved to 256.
	pub fn palette_color_count(&self) -> usize {
		match self.color_count {
			0 => constants::PALETTE_SIZE,
			n => n as usize,
		}
	}

	/// Returns the pixel aspect ratio as `(width, height)`; zeros mean 1:1.
	pub fn pixel_aspect(&self) -> (u8, u8) {
		(self.pixel_width, self.pixel_height)
	}
}

impl fmt::Display for Header {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		write!(
			f,
			"Header: {}x{} {} ({}bpp), {} frames, {} bytes, transparent index {}, {} colors",
			self.width,
			self.height,
			self.pixel_format,
			self.color_depth,
			self.frame_count,
			self.file_size,
			self.transparent_index,
			self.palette_color_count()
		)
	}
}
