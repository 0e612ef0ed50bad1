//! Error types for sprite file decoding.

use thiserror::Error;

/// Structure being decoded when an error was raised.
///
/// Carried by every [`DecodeError`] so callers can tell which part of the
/// file was malformed without parsing the message.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Section {
	/// 128-byte file header
	Header,
	/// Frame header (size, magic, chunk counts, duration)
	Frame,
	/// Chunk size/type prefix
	Chunk,
	/// Old (0x0004 / 0x0011) palette chunk
	OldPalette,
	/// New (0x2019) palette chunk
	Palette,
	/// Layer chunk
	Layer,
	/// Cel chunk
	Cel,
	/// Tag chunk
	Tags,
	/// Slice chunk
	Slice,
}

impl std::fmt::Display for Section {
	fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
		let name = match self {
			Self::Header => "header",
			Self::Frame => "frame",
			Self::Chunk => "chunk",
			Self::OldPalette => "old palette",
			Self::Palette => "palette",
			Self::Layer => "layer",
			Self::Cel => "cel",
			Self::Tags => "tags",
			Self::Slice => "slice",
		};
		f.write_str(name)
	}
}

/// Errors that can occur when decoding a sprite animation file.
///
/// Any of these aborts the whole load; a partially built animation is never
/// returned.
#[derive(Debug, Error)]
pub enum DecodeError {
	/// Fewer bytes available than a read requires
	#[error("Truncated stream at offset {offset:#x}: needed {needed} bytes, {available} available")]
	TruncatedStream {
		/// Offset where the read started
		offset: usize,
		/// Number of bytes the read required
		needed: usize,
		/// Number of bytes left in the buffer
		available: usize,
	},

	/// File or frame magic number mismatch
	#[error("Bad {section} magic: expected {expected:#06X}, found {found:#06X}")]
	BadMagic {
		/// Structure whose magic was checked
		section: Section,
		/// Expected magic value
		expected: u16,
		/// Value found in the stream
		found: u16,
	},

	/// Structurally inconsistent payload
	#[error("Invalid {section} payload: {message}")]
	InvalidPayload {
		/// Structure being decoded
		section: Section,
		/// Description of the inconsistency
		message: String,
	},

	/// The inflate primitive reported an error
	#[error("Decompression failed for cel at offset {offset:#x}: {source}")]
	DecompressionFailure {
		/// Offset of the compressed span
		offset: usize,
		/// Underlying inflate error
		#[source]
		source: InflateError,
	},

	/// A reference to a nonexistent layer, frame or cel
	#[error("{section} index {index} out of range (limit: {limit})")]
	IndexOutOfRange {
		/// Structure holding the reference
		section: Section,
		/// Index that was referenced
		index: usize,
		/// Number of valid entries
		limit: usize,
	},

	/// IO error while reading the input into memory
	#[error(transparent)]
	Io(#[from] std::io::Error),
}

impl DecodeError {
	/// Creates a truncated stream error.
	pub fn truncated(offset: usize, needed: usize, available: usize) -> Self {
		Self::TruncatedStream {
			offset,
			needed,
			available,
		}
	}

	/// Creates a bad magic error.
	pub fn bad_magic(section: Section, expected: u16, found: u16) -> Self {
		Self::BadMagic {
			section,
			expected,
			found,
		}
	}

	/// Creates an invalid payload error.
	pub fn invalid_payload(section: Section, message: impl Into<String>) -> Self {
		Self::InvalidPayload {
			section,
			message: message.into(),
		}
	}

	/// Creates an index out of range error.
	pub fn out_of_range(section: Section, index: usize, limit: usize) -> Self {
		Self::IndexOutOfRange {
			section,
			index,
			limit,
		}
	}

	/// Returns `true` for errors caused by running out of input.
	pub fn is_truncated(&self) -> bool {
		matches!(self, Self::TruncatedStream { .. })
	}
}

/// Errors reported by an [`Inflate`](crate::file::ase::Inflate) implementation.
#[derive(Debug, Error)]
pub enum InflateError {
	/// The compressed stream is malformed
	#[error("Corrupt deflate stream: {0}")]
	Corrupt(String),

	/// The compressed stream ended before the end-of-block marker
	#[error("Deflate stream ended early after {written} bytes")]
	UnexpectedEnd {
		/// Bytes produced before the stream ran out
		written: usize,
	},
}
