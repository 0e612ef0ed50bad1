//! Decode configuration.
//!
//! Limits applied while decoding. The default accepts every file the format
//! can describe; tighter limits make oversized or malformed input fail early
//! with [`DecodeError::InvalidPayload`](crate::file::DecodeError::InvalidPayload).

/// Largest cel the 16-bit width and height fields can describe.
const MAX_CEL_PIXELS: usize = 65_535 * 65_535;

/// Configuration for decoding sprite files.
///
/// # Presets
///
/// - `default()`: the widest limits the format can express, so every
///   well-formed file decodes
/// - `lenient()`: same limits as `default()`
/// - `strict()`: small limits and file size verification
///
/// # Examples
///
/// ```
/// use aseanim_types::file::DecodeConfig;
///
/// let config = DecodeConfig::default();
/// assert!(!config.verify_file_size);
/// assert_eq!(config, DecodeConfig::lenient());
///
/// let config = DecodeConfig::strict();
/// assert!(config.verify_file_size);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DecodeConfig {
	/// Maximum number of frames a file may declare
	pub max_frames: u16,
	/// Maximum number of chunks in a single frame
	pub max_chunks_per_frame: u32,
	/// Maximum `width × height` of a single cel
	pub max_cel_pixels: usize,
	/// Fail when the header file size differs from the input length
	pub verify_file_size: bool,
}

impl Default for DecodeConfig {
	fn default() -> Self {
		Self {
			max_frames: u16::MAX,
			max_chunks_per_frame: u32::MAX,
			max_cel_pixels: MAX_CEL_PIXELS,
			verify_file_size: false,
		}
	}
}

impl DecodeConfig {
	/// Create a new decode configuration with custom limits.
	pub fn new(
		max_frames: u16,
		max_chunks_per_frame: u32,
		max_cel_pixels: usize,
		verify_file_size: bool,
	) -> Self {
		Self {
			max_frames,
			max_chunks_per_frame,
			max_cel_pixels,
			verify_file_size,
		}
	}

	/// Create a lenient configuration with the widest limits.
	///
	/// - `max_chunks_per_frame`: `u32::MAX`
	/// - `max_cel_pixels`: 65535 × 65535
	pub fn lenient() -> Self {
		Self::default()
	}

	/// Create a strict configuration for small sprites.
	///
	/// - `max_frames`: 1024
	/// - `max_chunks_per_frame`: 1024
	/// - `max_cel_pixels`: 1024 × 1024
	/// - file size verified against the header
	pub fn strict() -> Self {
		Self {
			max_frames: 1024,
			max_chunks_per_frame: 1024,
			max_cel_pixels: 1024 * 1024,
			verify_file_size: true,
		}
	}
}
