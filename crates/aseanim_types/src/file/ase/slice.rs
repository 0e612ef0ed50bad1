//! Slice chunk (0x2022) decoding.

use serde::Serialize;

use super::{
	constants,
	cursor::{ByteCursor, name_from_bytes},
};
use crate::file::DecodeError;

/// Center rectangle of a nine-patch slice.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct NinePatch {
	/// Center X, relative to the slice origin
	pub x: i32,
	/// Center Y, relative to the slice origin
	pub y: i32,
	/// Center width
	pub width: u32,
	/// Center height
	pub height: u32,
}

/// Pivot point of a slice.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Pivot {
	/// Pivot X, relative to the slice origin
	pub x: i32,
	/// Pivot Y, relative to the slice origin
	pub y: i32,
}

/// Slice bounds starting at a given frame.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct SliceKey {
	/// Frame from which this key is valid
	pub frame: u32,
	/// Origin X
	pub x: i32,
	/// Origin Y
	pub y: i32,
	/// Width; 0 means hidden from this frame on
	pub width: u32,
	/// Height
	pub height: u32,
	/// Nine-patch center, when the slice carries one
	pub nine_patch: Option<NinePatch>,
	/// Pivot, when the slice carries one
	pub pivot: Option<Pivot>,
}

impl SliceKey {
	/// Returns `true` if the slice is hidden at this key.
	pub fn is_hidden(&self) -> bool {
		self.width == 0
	}
}

/// Decoded slice chunk.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SliceChunk {
	/// Raw slice flags
	pub flags: u32,
	/// Slice name
	pub name: String,
	/// Keys in stream order
	pub keys: Vec<SliceKey>,
}

impl SliceChunk {
	/// Decodes a slice chunk payload.
	///
	/// Keys carry a nine-patch when flag bit 0 is set and a pivot when bit 1
	/// is set; with both set the nine-patch comes first.
	pub fn decode(cursor: &mut ByteCursor<'_>) -> Result<Self, DecodeError> {
		let count = cursor.read_u32()?;
		let flags = cursor.read_u32()?;
		cursor.skip(4)?;
		let name = name_from_bytes(cursor.read_string()?);

		let has_nine_patch = flags & constants::SLICE_FLAG_NINE_PATCH != 0;
		let has_pivot = flags & constants::SLICE_FLAG_PIVOT != 0;

		// Each key is at least 20 bytes; don't trust the count for allocation.
		let mut keys = Vec::with_capacity((count as usize).min(cursor.remaining() / 20));
		for _ in 0..count {
			let frame = cursor.read_u32()?;
			let x = cursor.read_i32()?;
			let y = cursor.read_i32()?;
			let width = cursor.read_u32()?;
			let height = cursor.read_u32()?;

			let nine_patch = if has_nine_patch {
				Some(NinePatch {
					x: cursor.read_i32()?,
					y: cursor.read_i32()?,
					width: cursor.read_u32()?,
					height: cursor.read_u32()?,
				})
			} else {
				None
			};
			let pivot = if has_pivot {
				Some(Pivot {
					x: cursor.read_i32()?,
					y: cursor.read_i32()?,
				})
			} else {
				None
			};

			keys.push(SliceKey {
				frame,
				x,
				y,
				width,
				height,
				nine_patch,
				pivot,
			});
		}

		Ok(Self {
			flags,
			name,
			keys,
		})
	}
}
