//! Named regions over time.

use serde::Serialize;

use crate::file::ase::{SliceChunk, SliceKey, constants};

/// A named rectangular region keyed by frame.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Slice {
	name: String,
	flags: u32,
	keys: Vec<SliceKey>,
}

impl Slice {
	pub(crate) fn from_chunk(chunk: SliceChunk) -> Self {
		Self {
			name: chunk.name,
			flags: chunk.flags,
			keys: chunk.keys,
		}
	}

	/// Returns the slice name.
	pub fn name(&self) -> &str {
		&self.name
	}

	/// Returns the raw slice flags.
	pub fn flags(&self) -> u32 {
		self.flags
	}

	/// Returns `true` if keys carry a nine-patch rectangle.
	pub fn has_nine_patch(&self) -> bool {
		self.flags & constants::SLICE_FLAG_NINE_PATCH != 0
	}

	/// Returns `true` if keys carry a pivot point.
	pub fn has_pivot(&self) -> bool {
		self.flags & constants::SLICE_FLAG_PIVOT != 0
	}

	/// Returns the keys in file order.
	pub fn keys(&self) -> &[SliceKey] {
		&self.keys
	}

	/// Returns the key in effect at `frame`: the last key whose frame is not
	/// after it.
	///
	/// Keys stay in effect until the next key, so a slice keyed only at
	/// frame 0 applies to the whole animation.
	pub fn key_at(&self, frame: u32) -> Option<&SliceKey> {
		self.keys.iter().filter(|key| key.frame <= frame).max_by_key(|key| key.frame)
	}

	/// Returns `true` if the slice is visible at `frame`.
	pub fn is_visible_at(&self, frame: u32) -> bool {
		self.key_at(frame).is_some_and(|key| !key.is_hidden())
	}
}

#[cfg(test)]
mod tests {
	use super::*;

	fn key(frame: u32, width: u32) -> SliceKey {
		SliceKey {
			frame,
			x: 0,
			y: 0,
			width,
			height: 4,
			nine_patch: None,
			pivot: None,
		}
	}

	#[test]
	fn test_key_lookup() {
		let slice = Slice::from_chunk(SliceChunk {
			flags: 0,
			name: "hitbox".to_string(),
			keys: vec![key(0, 8), key(3, 0), key(5, 2)],
		});

		assert_eq!(slice.key_at(0).map(|k| k.frame), Some(0));
		assert_eq!(slice.key_at(2).map(|k| k.frame), Some(0));
		assert_eq!(slice.key_at(4).map(|k| k.frame), Some(3));
		assert_eq!(slice.key_at(9).map(|k| k.frame), Some(5));

		assert!(slice.is_visible_at(1));
		assert!(!slice.is_visible_at(3));
		assert!(slice.is_visible_at(5));
		assert!(!slice.has_nine_patch());
		assert!(!slice.has_pivot());
	}

	#[test]
	fn test_key_before_first() {
		let slice = Slice::from_chunk(SliceChunk {
			flags: 3,
			name: "late".to_string(),
			keys: vec![key(2, 1)],
		});
		assert!(slice.key_at(1).is_none());
		assert!(!slice.is_visible_at(1));
		assert!(slice.has_nine_patch());
		assert!(slice.has_pivot());
	}
}
