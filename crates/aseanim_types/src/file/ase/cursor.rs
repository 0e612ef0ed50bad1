//! Bounds-checked little-endian reads over an in-memory buffer.

use crate::file::DecodeError;

/// Sequential reader over a byte slice.
///
/// Every read either returns the full value and advances, or fails with
/// [`DecodeError::TruncatedStream`] leaving the position untouched.
#[derive(Debug, Clone)]
pub struct ByteCursor<'a> {
	data: &'a [u8],
	position: usize,
}

impl<'a> ByteCursor<'a> {
	/// Creates a cursor positioned at the start of `data`.
	pub fn new(data: &'a [u8]) -> Self {
		Self {
			data,
			position: 0,
		}
	}

	/// Current absolute position.
	#[inline]
	pub fn position(&self) -> usize {
		self.position
	}

	/// Number of bytes left to read.
	#[inline]
	pub fn remaining(&self) -> usize {
		self.data.len().saturating_sub(self.position)
	}

	/// Total length of the underlying buffer.
	#[inline]
	pub fn len(&self) -> usize {
		self.data.len()
	}

	/// Returns `true` if the underlying buffer is empty.
	#[inline]
	pub fn is_empty(&self) -> bool {
		self.data.is_empty()
	}

	/// Reads `count` raw bytes.
	pub fn read_bytes(&mut self, count: usize) -> Result<&'a [u8], DecodeError> {
		let available = self.remaining();
		if count > available {
			return Err(DecodeError::truncated(self.position, count, available));
		}
		let start = self.position;
		self.position += count;
		Ok(&self.data[start..self.position])
	}

	/// Reads a fixed-size array.
	pub fn read_array<const N: usize>(&mut self) -> Result<[u8; N], DecodeError> {
		let bytes = self.read_bytes(N)?;
		let mut out = [0u8; N];
		out.copy_from_slice(bytes);
		Ok(out)
	}

	/// Skips `count` bytes.
	pub fn skip(&mut self, count: usize) -> Result<(), DecodeError> {
		self.read_bytes(count).map(|_| ())
	}

	/// Moves to an absolute position within the buffer.
	///
	/// Seeking to exactly the end of the buffer is allowed.
	pub fn seek(&mut self, position: usize) -> Result<(), DecodeError> {
		if position > self.data.len() {
			return Err(DecodeError::truncated(
				self.position,
				position.saturating_sub(self.position),
				self.remaining(),
			));
		}
		self.position = position;
		Ok(())
	}

	/// Reads a `u8`.
	pub fn read_u8(&mut self) -> Result<u8, DecodeError> {
		Ok(self.read_array::<1>()?[0])
	}

	/// Reads a little-endian `u16`.
	pub fn read_u16(&mut self) -> Result<u16, DecodeError> {
		self.read_array().map(u16::from_le_bytes)
	}

	/// Reads a little-endian `i16`.
	pub fn read_i16(&mut self) -> Result<i16, DecodeError> {
		self.read_array().map(i16::from_le_bytes)
	}

	/// Reads a little-endian `u32`.
	pub fn read_u32(&mut self) -> Result<u32, DecodeError> {
		self.read_array().map(u32::from_le_bytes)
	}

	/// Reads a little-endian `i32`.
	pub fn read_i32(&mut self) -> Result<i32, DecodeError> {
		self.read_array().map(i32::from_le_bytes)
	}

	/// Reads a length-prefixed string: a `u16` byte count followed by that
	/// many raw bytes. The bytes are not validated as text.
	pub fn read_string(&mut self) -> Result<&'a [u8], DecodeError> {
		let start = self.position;
		let length = self.read_u16()? as usize;
		self.read_bytes(length).inspect_err(|_| self.position = start)
	}
}

/// Converts raw name bytes into an owned string, replacing invalid UTF-8.
pub(crate) fn name_from_bytes(bytes: &[u8]) -> String {
	String::from_utf8_lossy(bytes).into_owned()
}
