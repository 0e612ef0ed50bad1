//! Inflate primitive used by compressed cels.
//!
//! The decoder strips the zlib framing itself and hands the inner deflate
//! stream to an [`Inflate`] implementation.

use flate2::{Decompress, FlushDecompress, Status};

use crate::file::InflateError;

/// Capacity reserved before the first inflate call; the buffer doubles from there.
const INITIAL_CAPACITY: usize = 64 * 1024;

/// Raw deflate decompressor.
pub trait Inflate {
	/// Decompresses `input`, appending at most `limit` bytes to `output`.
	///
	/// Returns the number of bytes written. When the stream holds more data
	/// than `limit`, implementations write exactly `limit` bytes so the caller
	/// sees a length mismatch.
	fn inflate(&self, input: &[u8], limit: usize, output: &mut Vec<u8>) -> Result<usize, InflateError>;
}

/// [`Inflate`] backed by `flate2`.
///
/// The output grows with the stream instead of being allocated up front, so a
/// short corrupt stream fails before a large cel's buffer is committed.
#[derive(Debug, Clone, Copy, Default)]
pub struct FlateInflater;

impl Inflate for FlateInflater {
	fn inflate(&self, input: &[u8], limit: usize, output: &mut Vec<u8>) -> Result<usize, InflateError> {
		let mut state = Decompress::new(false);
		let start = output.len();
		output.reserve(limit.min(INITIAL_CAPACITY));

		loop {
			let consumed = state.total_in() as usize;
			let status = state
				.decompress_vec(&input[consumed..], output, FlushDecompress::None)
				.map_err(|e| InflateError::Corrupt(e.to_string()))?;
			let written = output.len() - start;

			if status == Status::StreamEnd || written >= limit {
				output.truncate(start + limit);
				return Ok(written.min(limit));
			}
			// Spare capacity left means the input ran out first
			if output.len() < output.capacity() {
				return Err(InflateError::UnexpectedEnd {
					written,
				});
			}
			output.reserve_exact(written.clamp(1, limit - written));
		}
	}
}
