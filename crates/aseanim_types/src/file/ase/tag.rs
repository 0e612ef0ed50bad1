//! Tag chunk (0x2018) decoding.

use std::fmt;

use serde::Serialize;

use super::cursor::{ByteCursor, name_from_bytes};
use crate::file::DecodeError;

/// Playback direction of a tag.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum LoopDirection {
	/// `from` to `to`
	#[default]
	Forward,
	/// `to` down to `from`
	Reverse,
	/// `from` to `to` and back, turning points played once
	PingPong,
}

impl LoopDirection {
	/// Converts a raw direction byte; unknown values map to [`LoopDirection::Forward`].
	pub fn from_u8(value: u8) -> Self {
		match value {
			0 => Self::Forward,
			1 => Self::Reverse,
			2 => Self::PingPong,
			other => {
				log::warn!("unknown tag direction {other}, using forward");
				Self::Forward
			}
		}
	}
}

impl fmt::Display for LoopDirection {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		match self {
			Self::Forward => write!(f, "forward"),
			Self::Reverse => write!(f, "reverse"),
			Self::PingPong => write!(f, "ping-pong"),
		}
	}
}

/// A named frame range.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Tag {
	/// First frame
	pub from: u16,
	/// Last frame (inclusive)
	pub to: u16,
	/// Playback direction
	pub direction: LoopDirection,
	/// Loop name
	pub name: String,
}

/// Decodes a tag chunk payload into its tag records.
pub fn decode_tags(cursor: &mut ByteCursor<'_>) -> Result<Vec<Tag>, DecodeError> {
	let count = cursor.read_u16()?;
	cursor.skip(8)?;

	let mut tags = Vec::with_capacity(count as usize);
	for _ in 0..count {
		let from = cursor.read_u16()?;
		let to = cursor.read_u16()?;
		let direction = LoopDirection::from_u8(cursor.read_u8()?);
		// 8 unused, 3 color, 1 extra
		cursor.skip(12)?;
		let name = name_from_bytes(cursor.read_string()?);
		tags.push(Tag {
			from,
			to,
			direction,
			name,
		});
	}

	Ok(tags)
}

#[cfg(test)]
mod tests {
	use super::*;

	fn tag_bytes(from: u16, to: u16, direction: u8, name: &str) -> Vec<u8> {
		let mut data = Vec::new();
		data.extend_from_slice(&from.to_le_bytes());
		data.extend_from_slice(&to.to_le_bytes());
		data.push(direction);
		data.extend_from_slice(&[0u8; 12]);
		data.extend_from_slice(&(name.len() as u16).to_le_bytes());
		data.extend_from_slice(name.as_bytes());
		data
	}

	#[test]
	fn test_decode_tags() {
		let mut data = Vec::new();
		data.extend_from_slice(&3u16.to_le_bytes());
		data.extend_from_slice(&[0u8; 8]);
		data.extend(tag_bytes(0, 3, 0, "walk"));
		data.extend(tag_bytes(4, 6, 2, "jump"));
		data.extend(tag_bytes(7, 7, 9, "idle"));

		let mut cursor = ByteCursor::new(&data);
		let tags = decode_tags(&mut cursor).unwrap();
		assert_eq!(cursor.remaining(), 0);
		assert_eq!(tags.len(), 3);
		assert_eq!(tags[0].name, "walk");
		assert_eq!(tags[1].direction, LoopDirection::PingPong);
		assert_eq!((tags[1].from, tags[1].to), (4, 6));
		assert_eq!(tags[2].direction, LoopDirection::Forward);
	}

	#[test]
	fn test_decode_tags_truncated_name() {
		let mut data = Vec::new();
		data.extend_from_slice(&1u16.to_le_bytes());
		data.extend_from_slice(&[0u8; 8]);
		let mut tag = tag_bytes(0, 1, 1, "reverse");
		tag.truncate(tag.len() - 2);
		data.extend(tag);
		assert!(decode_tags(&mut ByteCursor::new(&data)).unwrap_err().is_truncated());
	}
}
