//! Chunk kinds and payload dispatch.

use std::fmt;

use super::{
	DecodeConfig, PixelFormat,
	cel::CelChunk,
	constants::{CHUNK_HEADER_SIZE, chunk_codes},
	cursor::ByteCursor,
	inflate::Inflate,
	layer::LayerChunk,
	palette::PaletteChunk,
	slice::SliceChunk,
	tag::{Tag, decode_tags},
};
use crate::file::{DecodeError, Section};

/// The 11 known chunk type codes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ChunkKind {
	/// 0x0004
	OldPalette0004,
	/// 0x0011
	OldPalette0011,
	/// 0x2004
	Layer,
	/// 0x2005
	Cel,
	/// 0x2006
	CelExtra,
	/// 0x2016 (deprecated)
	Mask,
	/// 0x2017 (never used)
	Path,
	/// 0x2018
	Tags,
	/// 0x2019
	Palette,
	/// 0x2020
	UserData,
	/// 0x2022
	Slice,
}

impl ChunkKind {
	/// Maps a type code to a known chunk kind.
	pub fn from_code(code: u16) -> Option<Self> {
		let kind = match code {
			chunk_codes::OLD_PALETTE_0004 => Self::OldPalette0004,
			chunk_codes::OLD_PALETTE_0011 => Self::OldPalette0011,
			chunk_codes::LAYER => Self::Layer,
			chunk_codes::CEL => Self::Cel,
			chunk_codes::CEL_EXTRA => Self::CelExtra,
			chunk_codes::MASK => Self::Mask,
			chunk_codes::PATH => Self::Path,
			chunk_codes::TAGS => Self::Tags,
			chunk_codes::PALETTE => Self::Palette,
			chunk_codes::USER_DATA => Self::UserData,
			chunk_codes::SLICE => Self::Slice,
			_ => return None,
		};
		Some(kind)
	}

	/// Returns the type code.
	pub fn code(self) -> u16 {
		match self {
			Self::OldPalette0004 => chunk_codes::OLD_PALETTE_0004,
			Self::OldPalette0011 => chunk_codes::OLD_PALETTE_0011,
			Self::Layer => chunk_codes::LAYER,
			Self::Cel => chunk_codes::CEL,
			Self::CelExtra => chunk_codes::CEL_EXTRA,
			Self::Mask => chunk_codes::MASK,
			Self::Path => chunk_codes::PATH,
			Self::Tags => chunk_codes::TAGS,
			Self::Palette => chunk_codes::PALETTE,
			Self::UserData => chunk_codes::USER_DATA,
			Self::Slice => chunk_codes::SLICE,
		}
	}
}

impl fmt::Display for ChunkKind {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		let name = match self {
			Self::OldPalette0004 | Self::OldPalette0011 => "old palette",
			Self::Layer => "layer",
			Self::Cel => "cel",
			Self::CelExtra => "cel extra",
			Self::Mask => "mask",
			Self::Path => "path",
			Self::Tags => "tags",
			Self::Palette => "palette",
			Self::UserData => "user data",
			Self::Slice => "slice",
		};
		write!(f, "{name} ({:#06X})", self.code())
	}
}

/// Decoded chunk payload.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Chunk {
	/// 0x0004 / 0x0011 palette update
	OldPalette(PaletteChunk),
	/// 0x2019 palette update
	Palette(PaletteChunk),
	/// Layer definition
	Layer(LayerChunk),
	/// Cel placement
	Cel(CelChunk),
	/// Tag records
	Tags(Vec<Tag>),
	/// Slice definition
	Slice(SliceChunk),
	/// Known kind the decoder does not interpret (cel extra, mask, path, user data)
	Skipped(ChunkKind),
	/// Type code outside the known set
	Unknown(u16),
}

/// Everything a chunk payload decoder needs besides the cursor.
pub(crate) struct ChunkContext<'c, I: ?Sized> {
	pub format: PixelFormat,
	pub config: &'c DecodeConfig,
	pub inflater: &'c I,
}

impl Chunk {
	/// Decodes one chunk (size, type and payload) at the cursor.
	///
	/// On success the cursor is positioned at `chunk start + chunk size`, so
	/// unread trailing payload bytes never leak into the next chunk.
	pub(crate) fn decode<I: Inflate + ?Sized>(
		cursor: &mut ByteCursor<'_>,
		ctx: &ChunkContext<'_, I>,
	) -> Result<Self, DecodeError> {
		let start = cursor.position();
		let size = cursor.read_u32()? as usize;
		let code = cursor.read_u16()?;

		if size < CHUNK_HEADER_SIZE {
			return Err(DecodeError::invalid_payload(
				Section::Chunk,
				format!("chunk at {start:#x} declares size {size}"),
			));
		}
		let end = start.checked_add(size).ok_or_else(|| {
			DecodeError::invalid_payload(Section::Chunk, format!("chunk size {size} overflows"))
		})?;
		if end > cursor.len() {
			return Err(DecodeError::truncated(start, size, cursor.len() - start));
		}
		log::trace!("chunk at {start:#x}: type {code:#06X}, {size} bytes");

		let chunk = match ChunkKind::from_code(code) {
			Some(ChunkKind::OldPalette0004 | ChunkKind::OldPalette0011) => {
				Self::OldPalette(PaletteChunk::decode_old(cursor)?)
			}
			Some(ChunkKind::Palette) => Self::Palette(PaletteChunk::decode(cursor)?),
			Some(ChunkKind::Layer) => Self::Layer(LayerChunk::decode(cursor)?),
			Some(ChunkKind::Cel) => {
				Self::Cel(CelChunk::decode(cursor, ctx.format, end, ctx.config, ctx.inflater)?)
			}
			Some(ChunkKind::Tags) => Self::Tags(decode_tags(cursor)?),
			Some(ChunkKind::Slice) => Self::Slice(SliceChunk::decode(cursor)?),
			Some(
				kind @ (ChunkKind::CelExtra
				| ChunkKind::Mask
				| ChunkKind::Path
				| ChunkKind::UserData),
			) => {
				log::debug!("skipping {kind} chunk at {start:#x}");
				Self::Skipped(kind)
			}
			None => {
				log::debug!("skipping unknown chunk type {code:#06X} at {start:#x}");
				Self::Unknown(code)
			}
		};

		if cursor.position() > end {
			return Err(DecodeError::invalid_payload(
				Section::Chunk,
				format!(
					"payload at {start:#x} overruns its declared size of {size} bytes by {}",
					cursor.position() - end
				),
			));
		}
		cursor.seek(end)?;
		Ok(chunk)
	}
}

#[cfg(test)]
mod tests {
	use super::*;
	use crate::file::ase::FlateInflater;

	fn decode_all(data: &[u8]) -> Result<Vec<Chunk>, DecodeError> {
		let config = DecodeConfig::default();
		let ctx = ChunkContext {
			format: PixelFormat::Indexed,
			config: &config,
			inflater: &FlateInflater,
		};
		let mut cursor = ByteCursor::new(data);
		let mut chunks = Vec::new();
		while cursor.remaining() > 0 {
			chunks.push(Chunk::decode(&mut cursor, &ctx)?);
		}
		Ok(chunks)
	}

	fn chunk(code: u16, payload: &[u8]) -> Vec<u8> {
		let mut data = Vec::new();
		data.extend_from_slice(&((payload.len() + CHUNK_HEADER_SIZE) as u32).to_le_bytes());
		data.extend_from_slice(&code.to_le_bytes());
		data.extend_from_slice(payload);
		data
	}

	#[test]
	fn test_kind_codes() {
		for code in [0x0004, 0x0011, 0x2004, 0x2005, 0x2006, 0x2016, 0x2017, 0x2018, 0x2019, 0x2020, 0x2022] {
			assert_eq!(ChunkKind::from_code(code).map(ChunkKind::code), Some(code));
		}
		assert_eq!(ChunkKind::from_code(0x2007), None);
	}

	#[test]
	fn test_unknown_and_skipped_chunks_do_not_corrupt_stream() {
		let mut data = chunk(0x7777, &[1, 2, 3, 4, 5]);
		data.extend(chunk(chunk_codes::USER_DATA, &[9; 11]));
		data.extend(chunk(chunk_codes::TAGS, &[0; 10]));

		let chunks = decode_all(&data).unwrap();
		assert_eq!(chunks.len(), 3);
		assert_eq!(chunks[0], Chunk::Unknown(0x7777));
		assert_eq!(chunks[1], Chunk::Skipped(ChunkKind::UserData));
		assert_eq!(chunks[2], Chunk::Tags(Vec::new()));
	}

	#[test]
	fn test_trailing_payload_is_skipped() {
		// empty tag chunk padded with extra bytes
		let mut data = chunk(chunk_codes::TAGS, &[0; 14]);
		data.extend(chunk(chunk_codes::TAGS, &[0; 10]));
		assert_eq!(decode_all(&data).unwrap().len(), 2);
	}

	#[test]
	fn test_size_past_end_is_truncation() {
		let mut data = chunk(0x7777, &[0; 4]);
		data[0] = 0xFF;
		assert!(decode_all(&data).unwrap_err().is_truncated());
	}

	#[test]
	fn test_undersized_chunk() {
		let mut data = chunk(chunk_codes::TAGS, &[0; 10]);
		data[..4].copy_from_slice(&3u32.to_le_bytes());
		assert!(matches!(decode_all(&data), Err(DecodeError::InvalidPayload { .. })));
	}

	#[test]
	fn test_payload_overrun() {
		// tag count of 1 but size only covers the header
		let mut payload = vec![1, 0];
		payload.extend_from_slice(&[0; 8]);
		let mut data = chunk(chunk_codes::TAGS, &payload);
		data.extend_from_slice(&[0u8; 32]);
		assert!(matches!(decode_all(&data), Err(DecodeError::InvalidPayload { .. })));
	}
}
