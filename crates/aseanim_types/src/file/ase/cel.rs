//! Cel chunk (0x2005) decoding.
//!
//! A cel places one image in one frame of one layer. Its payload is one of:
//!
//! - **Raw** (type 0): width, height, then `width × height` samples
//! - **Linked** (type 1): a frame index whose cel in the same layer is reused
//! - **Compressed** (type 2): width, height, then a zlib stream filling the
//!   rest of the chunk
//!
//! Compressed cels are inflated here, so both pixel-carrying types produce the
//! same [`CelPixels`] value.

use crate::file::{DecodeError, Section};

use super::{DecodeConfig, PixelFormat, constants, cursor::ByteCursor, inflate::Inflate};

/// Cel type code.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[repr(u16)]
pub enum CelType {
	/// Uncompressed pixels
	Raw = 0,
	/// Link to another frame's cel
	Linked = 1,
	/// Zlib-compressed pixels
	Compressed = 2,
}

impl CelType {
	/// Converts a raw cel type.
	pub fn from_u16(value: u16) -> Option<Self> {
		match value {
			0 => Some(Self::Raw),
			1 => Some(Self::Linked),
			2 => Some(Self::Compressed),
			_ => None,
		}
	}
}

/// Decoded pixel payload of a cel.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CelPixels {
	/// Width in pixels
	pub width: u16,
	/// Height in pixels
	pub height: u16,
	/// Samples encoded per the file pixel format
	pub data: Vec<u8>,
}

/// Cel payload.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CelContent {
	/// Cel owning pixels (raw or decompressed)
	Pixels(CelPixels),
	/// Cel reusing the cel at `frame` in the same layer
	Linked {
		/// Referenced frame index
		frame: u16,
	},
}

/// Decoded cel chunk.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CelChunk {
	/// Index of the target layer, in layer arrival order
	pub layer_index: u16,
	/// X position on the canvas
	pub x: i16,
	/// Y position on the canvas
	pub y: i16,
	/// Cel opacity
	pub opacity: u8,
	/// Type the cel was stored as
	pub cel_type: CelType,
	/// Pixels or link
	pub content: CelContent,
}

impl CelChunk {
	/// Decodes a cel chunk payload.
	///
	/// `payload_end` is the absolute offset where the chunk ends; compressed
	/// cels use everything up to it as the zlib stream.
	///
	/// # Errors
	///
	/// - [`DecodeError::InvalidPayload`] for unknown cel types, oversize cels,
	///   short zlib spans or a decompressed length mismatch
	/// - [`DecodeError::DecompressionFailure`] if inflating fails
	/// - [`DecodeError::TruncatedStream`] on short input
	pub fn decode<I: Inflate + ?Sized>(
		cursor: &mut ByteCursor<'_>,
		format: PixelFormat,
		payload_end: usize,
		config: &DecodeConfig,
		inflater: &I,
	) -> Result<Self, DecodeError> {
		let layer_index = cursor.read_u16()?;
		let x = cursor.read_i16()?;
		let y = cursor.read_i16()?;
		let opacity = cursor.read_u8()?;
		let raw_type = cursor.read_u16()?;
		cursor.skip(7)?;

		let cel_type = CelType::from_u16(raw_type).ok_or_else(|| {
			DecodeError::invalid_payload(Section::Cel, format!("unsupported cel type {raw_type}"))
		})?;

		let content = match cel_type {
			CelType::Raw => CelContent::Pixels(decode_raw(cursor, format, config)?),
			CelType::Linked => CelContent::Linked {
				frame: cursor.read_u16()?,
			},
			CelType::Compressed => {
				CelContent::Pixels(decode_compressed(cursor, format, payload_end, config, inflater)?)
			}
		};

		Ok(Self {
			layer_index,
			x,
			y,
			opacity,
			cel_type,
			content,
		})
	}
}

fn read_dimensions(
	cursor: &mut ByteCursor<'_>,
	format: PixelFormat,
	config: &DecodeConfig,
) -> Result<(u16, u16, usize), DecodeError> {
	let width = cursor.read_u16()?;
	let height = cursor.read_u16()?;
	let pixels = width as usize * height as usize;
	if pixels > config.max_cel_pixels {
		return Err(DecodeError::invalid_payload(
			Section::Cel,
			format!("cel of {width}x{height} exceeds the limit of {} pixels", config.max_cel_pixels),
		));
	}
	Ok((width, height, pixels * format.bytes_per_pixel()))
}

fn decode_raw(
	cursor: &mut ByteCursor<'_>,
	format: PixelFormat,
	config: &DecodeConfig,
) -> Result<CelPixels, DecodeError> {
	let (width, height, byte_len) = read_dimensions(cursor, format, config)?;
	let data = cursor.read_bytes(byte_len)?.to_vec();
	Ok(CelPixels {
		width,
		height,
		data,
	})
}

fn decode_compressed<I: Inflate + ?Sized>(
	cursor: &mut ByteCursor<'_>,
	format: PixelFormat,
	payload_end: usize,
	config: &DecodeConfig,
	inflater: &I,
) -> Result<CelPixels, DecodeError> {
	let (width, height, expected) = read_dimensions(cursor, format, config)?;

	let offset = cursor.position();
	let span_len = payload_end.checked_sub(offset).ok_or_else(|| {
		DecodeError::invalid_payload(Section::Cel, "chunk size smaller than the cel header")
	})?;
	let span = cursor.read_bytes(span_len)?;

	let framing = constants::ZLIB_HEADER_SIZE + constants::ZLIB_CHECKSUM_SIZE;
	if span.len() < framing {
		return Err(DecodeError::invalid_payload(
			Section::Cel,
			format!("zlib stream of {} bytes is too short", span.len()),
		));
	}
	let deflate = &span[constants::ZLIB_HEADER_SIZE..span.len() - constants::ZLIB_CHECKSUM_SIZE];

	let mut data = Vec::new();
	let written = inflater.inflate(deflate, expected + 1, &mut data).map_err(|source| {
		DecodeError::DecompressionFailure {
			offset,
			source,
		}
	})?;
	if written != expected {
		return Err(DecodeError::invalid_payload(
			Section::Cel,
			format!("decompressed {written} bytes, expected {expected} for {width}x{height} {format}"),
		));
	}
	data.truncate(expected);

	Ok(CelPixels {
		width,
		height,
		data,
	})
}
