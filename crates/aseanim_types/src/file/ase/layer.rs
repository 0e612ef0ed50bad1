//! Layer chunk (0x2004) decoding.

use std::fmt;

use serde::Serialize;

use super::{constants, cursor::ByteCursor, cursor::name_from_bytes};
use crate::file::DecodeError;

/// Layer blend mode.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize)]
#[serde(rename_all = "snake_case")]
#[repr(u16)]
pub enum BlendMode {
	/// Normal
	#[default]
	Normal = 0,
	/// Multiply
	Multiply = 1,
	/// Screen
	Screen = 2,
	/// Overlay
	Overlay = 3,
	/// Darken
	Darken = 4,
	/// Lighten
	Lighten = 5,
	/// Color dodge
	ColorDodge = 6,
	/// Color burn
	ColorBurn = 7,
	/// Hard light
	HardLight = 8,
	/// Soft light
	SoftLight = 9,
	/// Difference
	Difference = 10,
	/// Exclusion
	Exclusion = 11,
	/// Hue
	Hue = 12,
	/// Saturation
	Saturation = 13,
	/// Color
	Color = 14,
	/// Luminosity
	Luminosity = 15,
	/// Addition
	Addition = 16,
	/// Subtract
	Subtract = 17,
	/// Divide
	Divide = 18,
}

impl BlendMode {
	/// Converts a raw blend mode value.
	pub fn from_u16(value: u16) -> Option<Self> {
		let mode = match value {
			0 => Self::Normal,
			1 => Self::Multiply,
			2 => Self::Screen,
			3 => Self::Overlay,
			4 => Self::Darken,
			5 => Self::Lighten,
			6 => Self::ColorDodge,
			7 => Self::ColorBurn,
			8 => Self::HardLight,
			9 => Self::SoftLight,
			10 => Self::Difference,
			11 => Self::Exclusion,
			12 => Self::Hue,
			13 => Self::Saturation,
			14 => Self::Color,
			15 => Self::Luminosity,
			16 => Self::Addition,
			17 => Self::Subtract,
			18 => Self::Divide,
			_ => return None,
		};
		Some(mode)
	}

	/// Converts `BlendMode` to its raw value
	pub fn to_u16(self) -> u16 {
		self as u16
	}
}

impl fmt::Display for BlendMode {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		fmt::Debug::fmt(self, f)
	}
}

/// Kind of layer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum LayerKind {
	/// Image layer holding one cel slot per frame
	Normal,
	/// Group layer; holds no cels
	Group,
}

/// Decoded layer chunk.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LayerChunk {
	/// Raw layer flags
	pub flags: u16,
	/// Layer kind
	pub kind: LayerKind,
	/// Nesting depth relative to the previously read layer
	pub child_level: u16,
	/// Blend mode
	pub blend_mode: BlendMode,
	/// Layer opacity
	pub opacity: u8,
	/// Layer name
	pub name: String,
}

impl LayerChunk {
	/// Returns `true` if the visible flag is set.
	pub fn is_visible(&self) -> bool {
		self.flags & constants::LAYER_FLAG_VISIBLE != 0
	}

	/// Decodes a layer chunk payload.
	///
	/// Unknown layer types other than 1 are treated as normal layers and
	/// unknown blend modes fall back to [`BlendMode::Normal`].
	pub fn decode(cursor: &mut ByteCursor<'_>) -> Result<Self, DecodeError> {
		let flags = cursor.read_u16()?;
		let kind = match cursor.read_u16()? {
			1 => LayerKind::Group,
			_ => LayerKind::Normal,
		};
		let child_level = cursor.read_u16()?;
		cursor.skip(4)?; // default width/height, ignored
		let raw_blend = cursor.read_u16()?;
		let blend_mode = BlendMode::from_u16(raw_blend).unwrap_or_else(|| {
			log::warn!("unknown blend mode {raw_blend}, using Normal");
			BlendMode::Normal
		});
		let opacity = cursor.read_u8()?;
		cursor.skip(3)?;
		let name = name_from_bytes(cursor.read_string()?);

		Ok(Self {
			flags,
			kind,
			child_level,
			blend_mode,
			opacity,
			name,
		})
	}
}
