//! Palette types and palette chunk decoders.
//!
//! Two chunk layouts carry palette data:
//!
//! - **Old palette** (0x0004, 0x0011): packets of `(skip, count)` followed by
//!   RGB triplets; alpha is always opaque.
//! - **New palette** (0x2019): an explicit `[first, last]` index range with
//!   per-entry flags and RGBA values, optionally followed by an entry name.
//!
//! Both only overwrite the indices they touch.

use std::fmt;

use serde::Serialize;

use crate::file::{DecodeError, Section};

use super::{constants, cursor::ByteCursor};

/// RGBA color representation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub struct Color {
	/// Red component (0-255)
	pub r: u8,
	/// Green component (0-255)
	pub g: u8,
	/// Blue component (0-255)
	pub b: u8,
	/// Alpha component (0-255)
	pub a: u8,
}

impl Color {
	/// Creates a new RGBA color.
	pub const fn new(r: u8, g: u8, b: u8, a: u8) -> Self {
		Self {
			r,
			g,
			b,
			a,
		}
	}

	/// Creates a new RGB color with full opacity.
	pub const fn rgb(r: u8, g: u8, b: u8) -> Self {
		Self::new(r, g, b, 255)
	}

	/// Creates a transparent black color.
	pub const fn transparent() -> Self {
		Self::new(0, 0, 0, 0)
	}

	/// Returns the components as `[r, g, b, a]`.
	pub const fn to_array(self) -> [u8; 4] {
		[self.r, self.g, self.b, self.a]
	}
}

impl Default for Color {
	/// Opaque black, the value of palette slots no chunk has touched.
	fn default() -> Self {
		Self::rgb(0, 0, 0)
	}
}

impl fmt::Display for Color {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		write!(f, "#{:02X}{:02X}{:02X}{:02X}", self.r, self.g, self.b, self.a)
	}
}

/// 256-slot color table.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Palette {
	colors: [Color; constants::PALETTE_SIZE],
}

impl Palette {
	/// Total palette size
	pub const SIZE: usize = constants::PALETTE_SIZE;

	/// Creates a palette with every slot set to opaque black.
	pub fn new() -> Self {
		Self {
			colors: [Color::default(); constants::PALETTE_SIZE],
		}
	}

	/// Gets a color by index.
	#[inline]
	pub fn get(&self, index: u8) -> Color {
		self.colors[index as usize]
	}

	/// Sets a color at the specified index.
	#[inline]
	pub fn set(&mut self, index: u8, color: Color) {
		self.colors[index as usize] = color;
	}

	/// Returns a reference to the color array.
	#[inline]
	pub fn colors(&self) -> &[Color; constants::PALETTE_SIZE] {
		&self.colors
	}

	/// Returns an iterator over palette colors.
	pub fn iter(&self) -> impl Iterator<Item = &Color> {
		self.colors.iter()
	}
}

impl Default for Palette {
	fn default() -> Self {
		Self::new()
	}
}

impl std::ops::Index<u8> for Palette {
	type Output = Color;

	fn index(&self, index: u8) -> &Self::Output {
		&self.colors[index as usize]
	}
}

impl std::ops::IndexMut<u8> for Palette {
	fn index_mut(&mut self, index: u8) -> &mut Self::Output {
		&mut self.colors[index as usize]
	}
}

/// Decoded palette chunk: the `(index, color)` pairs it overwrites.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct PaletteChunk {
	entries: Vec<(u8, Color)>,
}

impl PaletteChunk {
	/// Returns the touched entries in stream order.
	pub fn entries(&self) -> &[(u8, Color)] {
		&self.entries
	}

	/// Writes the touched entries into `palette`, leaving other slots untouched.
	pub fn apply(&self, palette: &mut Palette) {
		for &(index, color) in &self.entries {
			palette.set(index, color);
		}
	}

	/// Decodes an old-format (0x0004 / 0x0011) palette chunk.
	///
	/// # Errors
	///
	/// Fails with [`DecodeError::InvalidPayload`] when a packet writes past
	/// index 255, or with [`DecodeError::TruncatedStream`] on short input.
	pub fn decode_old(cursor: &mut ByteCursor<'_>) -> Result<Self, DecodeError> {
		let packets = cursor.read_u16()?;
		let mut entries = Vec::new();
		let mut index: usize = 0;

		for _ in 0..packets {
			let skip = cursor.read_u8()?;
			let count = match cursor.read_u8()? {
				0 => constants::PALETTE_SIZE,
				n => n as usize,
			};
			index += skip as usize;

			for _ in 0..count {
				if index >= constants::PALETTE_SIZE {
					return Err(DecodeError::invalid_payload(
						Section::OldPalette,
						format!("palette index {index} exceeds 255"),
					));
				}
				let [r, g, b] = cursor.read_array()?;
				entries.push((index as u8, Color::rgb(r, g, b)));
				index += 1;
			}
		}

		Ok(Self {
			entries,
		})
	}

	/// Decodes a new-format (0x2019) palette chunk.
	///
	/// # Errors
	///
	/// Fails with [`DecodeError::InvalidPayload`] when the index range reaches
	/// past 255, or with [`DecodeError::TruncatedStream`] on short input.
	pub fn decode(cursor: &mut ByteCursor<'_>) -> Result<Self, DecodeError> {
		let _total = cursor.read_u32()?;
		let first = cursor.read_u32()?;
		let last = cursor.read_u32()?;
		cursor.skip(8)?;

		let mut entries = Vec::new();
		for index in first..=last {
			if index as usize >= constants::PALETTE_SIZE {
				return Err(DecodeError::invalid_payload(
					Section::Palette,
					format!("palette index {index} exceeds 255"),
				));
			}
			let flags = cursor.read_u16()?;
			let [r, g, b, a] = cursor.read_array()?;
			if flags & constants::PALETTE_ENTRY_HAS_NAME != 0 {
				cursor.read_string()?;
			}
			entries.push((index as u8, Color::new(r, g, b, a)));
		}

		Ok(Self {
			entries,
		})
	}
}
