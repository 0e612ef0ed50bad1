//! Frame header decoding and the per-frame chunk walk.

use super::{
	DecodeConfig,
	chunk::{Chunk, ChunkContext},
	constants,
	cursor::ByteCursor,
	inflate::Inflate,
};
use crate::file::{DecodeError, Section};

/// One decoded timeline step.
///
/// ```text
/// Offset  Size  Field
/// ------  ----  ------------------------------------------
/// +0x00   4     frame size in bytes (including this header)
/// +0x04   2     magic (0xF1FA)
/// +0x06   2     legacy chunk count
/// +0x08   2     duration in milliseconds
/// +0x0A   2     reserved
/// +0x0C   4     chunk count
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Frame {
	/// Display duration in milliseconds
	pub duration: u16,
	/// Decoded chunks in stream order
	pub chunks: Vec<Chunk>,
}

impl Frame {
	/// Decodes one frame and all of its chunks.
	///
	/// The 32-bit chunk count is authoritative; the legacy 16-bit count is
	/// read and ignored.
	pub(crate) fn decode<I: Inflate + ?Sized>(
		cursor: &mut ByteCursor<'_>,
		ctx: &ChunkContext<'_, I>,
		config: &DecodeConfig,
	) -> Result<Self, DecodeError> {
		let start = cursor.position();
		let size = cursor.read_u32()? as usize;
		let magic = cursor.read_u16()?;
		if magic != constants::FRAME_MAGIC {
			return Err(DecodeError::bad_magic(Section::Frame, constants::FRAME_MAGIC, magic));
		}
		let _legacy_count = cursor.read_u16()?;
		let duration = cursor.read_u16()?;
		cursor.skip(2)?;
		let chunk_count = cursor.read_u32()?;

		if chunk_count > config.max_chunks_per_frame {
			return Err(DecodeError::invalid_payload(
				Section::Frame,
				format!(
					"frame at {start:#x} declares {chunk_count} chunks (limit {})",
					config.max_chunks_per_frame
				),
			));
		}
		log::debug!("frame at {start:#x}: {size} bytes, {chunk_count} chunks, {duration}ms");

		let mut chunks = Vec::with_capacity((chunk_count as usize).min(cursor.remaining() / 6));
		for _ in 0..chunk_count {
			chunks.push(Chunk::decode(cursor, ctx)?);
		}

		let end = start.saturating_add(size);
		if cursor.position() > end {
			return Err(DecodeError::invalid_payload(
				Section::Frame,
				format!("chunks overrun the declared frame size of {size} bytes at {start:#x}"),
			));
		}
		if cursor.position() < end {
			log::debug!("skipping {} trailing bytes in frame at {start:#x}", end - cursor.position());
			cursor.seek(end)?;
		}

		Ok(Self {
			duration,
			chunks,
		})
	}
}
