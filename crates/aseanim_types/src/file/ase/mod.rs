//! Layered sprite animation file format support.
//!
//! Files are little-endian and laid out as a fixed header followed by a list
//! of frames, each holding a list of typed, length-prefixed chunks.
//!
//! # File Structure
//!
//! ```text
//! +--------------------+
//! | Header (128 bytes) |  magic 0xA5E0, frame count, canvas size, color depth
//! +--------------------+
//! | Frame 0            |  16-byte frame header (magic 0xF1FA) + chunks
//! |   Chunk            |  size (4, includes the 6-byte prefix), type (2), payload
//! |   Chunk            |
//! +--------------------+
//! | Frame 1 ...        |
//! +--------------------+
//! ```
//!
//! # Chunk Types
//!
//! | Code     | Kind        | Handling                              |
//! |----------|-------------|---------------------------------------|
//! | `0x0004` | old palette | decoded                               |
//! | `0x0011` | old palette | decoded                               |
//! | `0x2004` | layer       | decoded                               |
//! | `0x2005` | cel         | decoded, compressed pixels inflated   |
//! | `0x2006` | cel extra   | skipped                               |
//! | `0x2016` | mask        | skipped (deprecated)                  |
//! | `0x2017` | path        | skipped (never used)                  |
//! | `0x2018` | tags        | decoded                               |
//! | `0x2019` | palette     | decoded                               |
//! | `0x2020` | user data   | skipped                               |
//! | `0x2022` | slice       | decoded                               |
//!
//! Type codes outside this set are skipped using their declared size.
//!
//! # Usage Examples
//!
//! ```no_run
//! use aseanim_types::file::RawFile;
//!
//! # fn main() -> Result<(), Box<dyn std::error::Error>> {
//! let data = std::fs::read("mountain.aseprite")?;
//! let raw = RawFile::from_bytes(&data)?;
//!
//! println!("{}", raw.header());
//! for (index, frame) in raw.frames().iter().enumerate() {
//!     println!("Frame {index}: {}ms, {} chunks", frame.duration, frame.chunks.len());
//! }
//! # Ok(())
//! # }
//! ```

pub mod cel;
pub mod chunk;
pub mod config;
pub mod constants;
pub mod cursor;
pub mod frame;
pub mod header;
pub mod inflate;
pub mod layer;
pub mod palette;
pub mod slice;
pub mod tag;

pub use cel::{CelChunk, CelContent, CelPixels, CelType};
pub use chunk::{Chunk, ChunkKind};
pub use config::DecodeConfig;
pub use cursor::ByteCursor;
pub use frame::Frame;
pub use header::{Header, PixelFormat};
pub use inflate::{FlateInflater, Inflate};
pub use layer::{BlendMode, LayerChunk, LayerKind};
pub use palette::{Color, Palette, PaletteChunk};
pub use slice::{NinePatch, Pivot, SliceChunk, SliceKey};
pub use tag::{LoopDirection, Tag};

use chunk::ChunkContext;

use crate::file::{DecodeError, Section};

/// A fully decoded file: header and frames with their typed chunks.
///
/// This is the intermediate form produced before folding everything into an
/// [`Animation`](crate::animation::Animation).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RawFile {
	header: Header,
	frames: Vec<Frame>,
}

impl RawFile {
	/// Decodes a file from a byte slice using the default configuration.
	///
	/// # Errors
	///
	/// Returns the first [`DecodeError`] encountered; nothing is returned for
	/// a partially decoded file.
	pub fn from_bytes(data: &[u8]) -> Result<Self, DecodeError> {
		Self::from_bytes_with(data, &DecodeConfig::default(), &FlateInflater)
	}

	/// Decodes a file with a custom configuration and inflate primitive.
	pub fn from_bytes_with<I: Inflate + ?Sized>(
		data: &[u8],
		config: &DecodeConfig,
		inflater: &I,
	) -> Result<Self, DecodeError> {
		let mut cursor = ByteCursor::new(data);
		let header = Header::decode(&mut cursor)?;

		if header.file_size() as usize != data.len() {
			if config.verify_file_size {
				return Err(DecodeError::invalid_payload(
					Section::Header,
					format!("header declares {} bytes, input has {}", header.file_size(), data.len()),
				));
			}
			log::warn!(
				"header declares {} bytes but input has {}",
				header.file_size(),
				data.len()
			);
		}
		if header.frame_count() > config.max_frames {
			return Err(DecodeError::invalid_payload(
				Section::Header,
				format!("{} frames exceed the limit of {}", header.frame_count(), config.max_frames),
			));
		}

		let ctx = ChunkContext {
			format: header.pixel_format(),
			config,
			inflater,
		};
		let mut frames = Vec::with_capacity(header.frame_count() as usize);
		for _ in 0..header.frame_count() {
			frames.push(Frame::decode(&mut cursor, &ctx, config)?);
		}

		Ok(Self {
			header,
			frames,
		})
	}

	/// Returns the file header.
	pub fn header(&self) -> &Header {
		&self.header
	}

	/// Returns the decoded frames.
	pub fn frames(&self) -> &[Frame] {
		&self.frames
	}

	/// Splits the file into header and frames.
	pub fn into_parts(self) -> (Header, Vec<Frame>) {
		(self.header, self.frames)
	}
}
