//! Layers and their per-frame cel slots.

use crate::file::ase::{BlendMode, LayerChunk, LayerKind};

/// Placement of one image in one frame of one layer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Cel {
	/// X position on the canvas
	pub x: i16,
	/// Y position on the canvas
	pub y: i16,
	/// Cel opacity
	pub opacity: u8,
	/// Index into [`Animation::images`](super::Animation::images)
	pub image: usize,
}

/// One visual layer.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Layer {
	name: String,
	kind: LayerKind,
	visible: bool,
	blend_mode: BlendMode,
	opacity: u8,
	child_level: u16,
	cels: Vec<Option<Cel>>,
}

impl Layer {
	/// Creates a layer from its chunk, allocating one empty cel slot per
	/// frame, or none for group layers.
	pub(crate) fn from_chunk(chunk: LayerChunk, frame_count: usize) -> Self {
		let slots = match chunk.kind {
			LayerKind::Group => 0,
			LayerKind::Normal => frame_count,
		};
		Self {
			visible: chunk.is_visible(),
			name: chunk.name,
			kind: chunk.kind,
			blend_mode: chunk.blend_mode,
			opacity: chunk.opacity,
			child_level: chunk.child_level,
			cels: vec![None; slots],
		}
	}

	/// Returns the layer name.
	pub fn name(&self) -> &str {
		&self.name
	}

	/// Returns the layer kind.
	pub fn kind(&self) -> LayerKind {
		self.kind
	}

	/// Returns `true` for group layers.
	pub fn is_group(&self) -> bool {
		self.kind == LayerKind::Group
	}

	/// Returns the visibility stored in the file.
	pub fn is_visible(&self) -> bool {
		self.visible
	}

	/// Returns the blend mode.
	pub fn blend_mode(&self) -> BlendMode {
		self.blend_mode
	}

	/// Returns the layer opacity.
	pub fn opacity(&self) -> u8 {
		self.opacity
	}

	/// Returns the raw child level (nesting relative to the previous layer).
	pub fn child_level(&self) -> u16 {
		self.child_level
	}

	/// Returns the per-frame cel slots; empty for group layers.
	pub fn cels(&self) -> &[Option<Cel>] {
		&self.cels
	}

	/// Returns the cel at `frame`, if the layer has one there.
	pub fn cel(&self, frame: usize) -> Option<&Cel> {
		self.cels.get(frame).and_then(Option::as_ref)
	}

	pub(crate) fn cels_mut(&mut self) -> &mut [Option<Cel>] {
		&mut self.cels
	}
}
