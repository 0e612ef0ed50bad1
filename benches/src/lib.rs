//! Benchmark helper utilities for aseanim-rs
//!
//! Builds synthetic sprite files so the benchmarks and the test suites need no
//! checked-in assets. [`SpriteBuilder`] and [`FrameBuilder`] write the binary
//! layout chunk by chunk; [`SyntheticSprite`] assembles whole files from them.
//! Pixel content is a repeating gradient, which compresses roughly like
//! hand-drawn pixel art.

use std::io::Write;

use flate2::{Compression, write::ZlibEncoder};

const HEADER_SIZE: usize = 128;
const FRAME_HEADER_SIZE: usize = 16;
const CHUNK_HEADER_SIZE: usize = 6;
const FILE_MAGIC: u16 = 0xA5E0;
const FRAME_MAGIC: u16 = 0xF1FA;

/// Chunk type codes written by the builder.
pub mod codes {
	/// Old palette (0x0004)
	pub const OLD_PALETTE: u16 = 0x0004;
	/// Layer
	pub const LAYER: u16 = 0x2004;
	/// Cel
	pub const CEL: u16 = 0x2005;
	/// Cel extra
	pub const CEL_EXTRA: u16 = 0x2006;
	/// Mask
	pub const MASK: u16 = 0x2016;
	/// Path
	pub const PATH: u16 = 0x2017;
	/// Tags
	pub const TAGS: u16 = 0x2018;
	/// New palette
	pub const PALETTE: u16 = 0x2019;
	/// User data
	pub const USER_DATA: u16 = 0x2020;
	/// Slice
	pub const SLICE: u16 = 0x2022;
}

/// Layer options beyond flags, kind and name.
#[derive(Debug, Clone, Copy)]
pub struct LayerOptions {
	/// Nesting depth under group layers
	pub child_level: u16,
	/// Raw blend mode value
	pub blend_mode: u16,
	/// Layer opacity
	pub opacity: u8,
}

impl Default for LayerOptions {
	fn default() -> Self {
		Self {
			child_level: 0,
			blend_mode: 0,
			opacity: 255,
		}
	}
}

/// One slice key with optional nine-patch `(x, y, w, h)` and pivot `(x, y)`.
#[derive(Debug, Clone, Copy, Default)]
pub struct SliceKeyDef {
	/// First frame the key applies to
	pub frame: u32,
	/// `(x, y, width, height)`
	pub bounds: (i32, i32, u32, u32),
	/// Nine-patch center
	pub nine_patch: Option<(i32, i32, u32, u32)>,
	/// Pivot point
	pub pivot: Option<(i32, i32)>,
}

impl SliceKeyDef {
	/// Plain key with bounds only.
	pub fn new(frame: u32, bounds: (i32, i32, u32, u32)) -> Self {
		Self {
			frame,
			bounds,
			..Self::default()
		}
	}
}

/// Builds a complete file from frames.
#[derive(Debug, Clone)]
pub struct SpriteBuilder {
	width: u16,
	height: u16,
	depth: u16,
	transparent_index: u8,
	frames: Vec<FrameBuilder>,
}

impl SpriteBuilder {
	/// 8 bits per pixel indexed sprite.
	pub fn indexed(width: u16, height: u16) -> Self {
		Self::with_depth(width, height, 8)
	}

	/// Sprite with an explicit color depth (8, 16 or 32; other values are written as-is).
	pub fn with_depth(width: u16, height: u16, depth: u16) -> Self {
		Self {
			width,
			height,
			depth,
			transparent_index: 0,
			frames: Vec::new(),
		}
	}

	/// Sets the transparent palette index.
	pub fn transparent_index(mut self, index: u8) -> Self {
		self.transparent_index = index;
		self
	}

	/// Appends a frame.
	pub fn frame(mut self, frame: FrameBuilder) -> Self {
		self.frames.push(frame);
		self
	}

	/// Serializes the header followed by every frame.
	pub fn build(&self) -> Vec<u8> {
		let body: Vec<u8> = self.frames.iter().flat_map(FrameBuilder::build).collect();

		let mut data = Vec::with_capacity(HEADER_SIZE + body.len());
		put_u32(&mut data, (HEADER_SIZE + body.len()) as u32);
		put_u16(&mut data, FILE_MAGIC);
		put_u16(&mut data, self.frames.len() as u16);
		put_u16(&mut data, self.width);
		put_u16(&mut data, self.height);
		put_u16(&mut data, self.depth);
		put_u32(&mut data, 1);
		put_u16(&mut data, 100);
		data.extend_from_slice(&[0; 8]);
		data.push(self.transparent_index);
		data.extend_from_slice(&[0; 3]);
		put_u16(&mut data, 0);
		data.extend_from_slice(&[1, 1]);
		data.resize(HEADER_SIZE, 0);
		data.extend(body);
		data
	}
}

/// Builds one frame from chunks.
#[derive(Debug, Clone)]
pub struct FrameBuilder {
	duration: u16,
	chunks: Vec<Vec<u8>>,
}

impl FrameBuilder {
	/// Empty frame shown for `duration` milliseconds.
	pub fn new(duration: u16) -> Self {
		Self {
			duration,
			chunks: Vec::new(),
		}
	}

	/// Appends a chunk with an arbitrary code and payload.
	pub fn chunk(mut self, code: u16, payload: &[u8]) -> Self {
		let mut data = Vec::with_capacity(payload.len() + CHUNK_HEADER_SIZE);
		put_u32(&mut data, (payload.len() + CHUNK_HEADER_SIZE) as u32);
		put_u16(&mut data, code);
		data.extend_from_slice(payload);
		self.chunks.push(data);
		self
	}

	/// New palette chunk covering `first..first + colors.len()`.
	pub fn palette(self, first: u32, colors: &[[u8; 4]]) -> Self {
		let mut p = Vec::new();
		put_u32(&mut p, colors.len() as u32);
		put_u32(&mut p, first);
		put_u32(&mut p, first + colors.len() as u32 - 1);
		p.extend_from_slice(&[0; 8]);
		for (index, color) in colors.iter().enumerate() {
			// Every other entry carries a name to exercise the skip path
			let named = index % 2 == 1;
			put_u16(&mut p, u16::from(named));
			p.extend_from_slice(color);
			if named {
				put_string(&mut p, "named");
			}
		}
		self.chunk(codes::PALETTE, &p)
	}

	/// Single-packet old palette starting `skip` entries in.
	pub fn old_palette(self, skip: u8, colors: &[[u8; 3]]) -> Self {
		let mut p = Vec::new();
		put_u16(&mut p, 1);
		p.push(skip);
		p.push(if colors.len() == 256 {
			0
		} else {
			colors.len() as u8
		});
		for color in colors {
			p.extend_from_slice(color);
		}
		self.chunk(codes::OLD_PALETTE, &p)
	}

	/// Layer chunk with default options.
	pub fn layer(self, visible: bool, group: bool, name: &str) -> Self {
		self.layer_with(visible, group, name, LayerOptions::default())
	}

	/// Layer chunk with explicit child level, blend mode and opacity.
	pub fn layer_with(self, visible: bool, group: bool, name: &str, options: LayerOptions) -> Self {
		let mut p = Vec::new();
		put_u16(&mut p, u16::from(visible));
		put_u16(&mut p, u16::from(group));
		put_u16(&mut p, options.child_level);
		put_u16(&mut p, 0);
		put_u16(&mut p, 0);
		put_u16(&mut p, options.blend_mode);
		p.push(options.opacity);
		p.extend_from_slice(&[0; 3]);
		put_string(&mut p, name);
		self.chunk(codes::LAYER, &p)
	}

	fn cel_header(layer: u16, pos: (i16, i16), opacity: u8, cel_type: u16) -> Vec<u8> {
		let mut p = Vec::new();
		put_u16(&mut p, layer);
		p.extend_from_slice(&pos.0.to_le_bytes());
		p.extend_from_slice(&pos.1.to_le_bytes());
		p.push(opacity);
		put_u16(&mut p, cel_type);
		p.extend_from_slice(&[0; 7]);
		p
	}

	/// Uncompressed cel.
	pub fn raw_cel(self, layer: u16, pos: (i16, i16), opacity: u8, size: (u16, u16), pixels: &[u8]) -> Self {
		let mut p = Self::cel_header(layer, pos, opacity, 0);
		put_u16(&mut p, size.0);
		put_u16(&mut p, size.1);
		p.extend_from_slice(pixels);
		self.chunk(codes::CEL, &p)
	}

	/// Zlib-compressed cel.
	pub fn compressed_cel(
		self,
		layer: u16,
		pos: (i16, i16),
		opacity: u8,
		size: (u16, u16),
		pixels: &[u8],
	) -> Self {
		self.compressed_cel_stream(layer, pos, opacity, size, &zlib(pixels))
	}

	/// Compressed cel carrying an already encoded zlib stream.
	pub fn compressed_cel_stream(
		self,
		layer: u16,
		pos: (i16, i16),
		opacity: u8,
		size: (u16, u16),
		stream: &[u8],
	) -> Self {
		let mut p = Self::cel_header(layer, pos, opacity, 2);
		put_u16(&mut p, size.0);
		put_u16(&mut p, size.1);
		p.extend_from_slice(stream);
		self.chunk(codes::CEL, &p)
	}

	/// Cel reusing the pixels of `layer` in `frame`.
	pub fn linked_cel(self, layer: u16, frame: u16) -> Self {
		let mut p = Self::cel_header(layer, (0, 0), 0, 1);
		put_u16(&mut p, frame);
		self.chunk(codes::CEL, &p)
	}

	/// Tags chunk; each tag is `(from, to, direction, name)`.
	pub fn tags(self, tags: &[(u16, u16, u8, &str)]) -> Self {
		let mut p = Vec::new();
		put_u16(&mut p, tags.len() as u16);
		p.extend_from_slice(&[0; 8]);
		for &(from, to, direction, name) in tags {
			put_u16(&mut p, from);
			put_u16(&mut p, to);
			p.push(direction);
			p.extend_from_slice(&[0; 8]);
			p.extend_from_slice(&[0xFF, 0x80, 0x00]);
			p.push(0);
			put_string(&mut p, name);
		}
		self.chunk(codes::TAGS, &p)
	}

	/// Slice chunk. Nine-patch and pivot flags follow the first key.
	pub fn slice(self, name: &str, keys: &[SliceKeyDef]) -> Self {
		let nine_patch = keys.first().is_some_and(|k| k.nine_patch.is_some());
		let pivot = keys.first().is_some_and(|k| k.pivot.is_some());
		let flags = u32::from(nine_patch) | (u32::from(pivot) << 1);

		let mut p = Vec::new();
		put_u32(&mut p, keys.len() as u32);
		put_u32(&mut p, flags);
		put_u32(&mut p, 0);
		put_string(&mut p, name);
		for key in keys {
			put_u32(&mut p, key.frame);
			p.extend_from_slice(&key.bounds.0.to_le_bytes());
			p.extend_from_slice(&key.bounds.1.to_le_bytes());
			put_u32(&mut p, key.bounds.2);
			put_u32(&mut p, key.bounds.3);
			if let Some((x, y, w, h)) = key.nine_patch {
				p.extend_from_slice(&x.to_le_bytes());
				p.extend_from_slice(&y.to_le_bytes());
				put_u32(&mut p, w);
				put_u32(&mut p, h);
			}
			if let Some((x, y)) = key.pivot {
				p.extend_from_slice(&x.to_le_bytes());
				p.extend_from_slice(&y.to_le_bytes());
			}
		}
		self.chunk(codes::SLICE, &p)
	}

	fn build(&self) -> Vec<u8> {
		let body_len: usize = self.chunks.iter().map(Vec::len).sum();
		let mut data = Vec::with_capacity(FRAME_HEADER_SIZE + body_len);
		put_u32(&mut data, (FRAME_HEADER_SIZE + body_len) as u32);
		put_u16(&mut data, FRAME_MAGIC);
		put_u16(&mut data, self.chunks.len().min(0xFFFF) as u16);
		put_u16(&mut data, self.duration);
		data.extend_from_slice(&[0; 2]);
		put_u32(&mut data, self.chunks.len() as u32);
		for chunk in &self.chunks {
			data.extend_from_slice(chunk);
		}
		data
	}
}

/// Shape of a generated sprite file.
#[derive(Debug, Clone, Copy)]
pub struct SyntheticSprite {
	/// Canvas width
	pub width: u16,
	/// Canvas height
	pub height: u16,
	/// Number of frames
	pub frames: u16,
	/// Number of image layers
	pub layers: u16,
	/// Store cels zlib-compressed instead of raw
	pub compressed: bool,
	/// Every other frame links to the previous one instead of carrying pixels
	pub linked: bool,
}

impl SyntheticSprite {
	/// A small indexed sprite with compressed, partially linked cels.
	pub fn small() -> Self {
		Self {
			width: 64,
			height: 64,
			frames: 8,
			layers: 2,
			compressed: true,
			linked: true,
		}
	}

	/// A large indexed sprite with compressed cels on every frame.
	pub fn large() -> Self {
		Self {
			width: 512,
			height: 512,
			frames: 32,
			layers: 4,
			compressed: true,
			linked: false,
		}
	}

	/// Total pixels stored across all cels.
	pub fn pixel_count(&self) -> u64 {
		u64::from(self.width) * u64::from(self.height) * u64::from(self.layers) * u64::from(self.frames)
	}

	/// Generates the file bytes.
	pub fn generate(&self) -> Vec<u8> {
		let size = (self.width, self.height);
		let pixels: Vec<u8> = (0..usize::from(self.width) * usize::from(self.height))
			.map(|i| ((i % usize::from(self.width)) / 4 % 16) as u8)
			.collect();
		let stream = if self.compressed {
			zlib(&pixels)
		} else {
			Vec::new()
		};
		let colors: Vec<[u8; 4]> =
			(0..=255u8).map(|i| [i, i.wrapping_mul(3), i.wrapping_mul(7), 255]).collect();

		let mut sprite = SpriteBuilder::indexed(self.width, self.height);
		for frame in 0..self.frames {
			let mut builder = FrameBuilder::new(100);
			if frame == 0 {
				builder = builder.palette(0, &colors);
				for layer in 0..self.layers {
					builder = builder.layer(true, false, &format!("layer {layer}"));
				}
				builder = builder.tags(&[(0, self.frames.saturating_sub(1), 2, "loop")]);
			}
			for layer in 0..self.layers {
				builder = if self.linked && frame % 2 == 1 {
					builder.linked_cel(layer, frame - 1)
				} else if self.compressed {
					builder.compressed_cel_stream(layer, (0, 0), 255, size, &stream)
				} else {
					builder.raw_cel(layer, (0, 0), 255, size, &pixels)
				};
			}
			sprite = sprite.frame(builder);
		}
		sprite.build()
	}
}

/// Compresses `data` into a zlib stream.
pub fn zlib(data: &[u8]) -> Vec<u8> {
	let mut encoder = ZlibEncoder::new(Vec::new(), Compression::default());
	encoder.write_all(data).expect("writing to a Vec cannot fail");
	encoder.finish().expect("writing to a Vec cannot fail")
}

fn put_u16(out: &mut Vec<u8>, value: u16) {
	out.extend_from_slice(&value.to_le_bytes());
}

fn put_u32(out: &mut Vec<u8>, value: u32) {
	out.extend_from_slice(&value.to_le_bytes());
}

fn put_string(out: &mut Vec<u8>, value: &str) {
	put_u16(out, value.len() as u16);
	out.extend_from_slice(value.as_bytes());
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn test_generated_sizes_match_headers() {
		let data = SyntheticSprite::small().generate();
		let declared = u32::from_le_bytes([data[0], data[1], data[2], data[3]]);
		assert_eq!(declared as usize, data.len());
		assert_eq!(u16::from_le_bytes([data[4], data[5]]), FILE_MAGIC);
		assert_eq!(u16::from_le_bytes([data[6], data[7]]), 8);
	}
}
