//! Semantic animation model.
//!
//! [`Animation`] is the root aggregate built from a decoded file: canvas
//! metadata, the 256-entry palette, per-frame durations, layers with their
//! cel slots, the shared image store, synthesized loops and slices.
//!
//! # Loading
//!
//! ```no_run
//! use aseanim_types::animation::Animation;
//!
//! let anim = Animation::open("walk.aseprite")?;
//! println!("{anim}");
//!
//! if let Some(walk) = anim.loop_by_name("walk") {
//!     for step in walk.sequence().steps() {
//!         println!("frame {} for {} ms", step.frame, step.duration);
//!     }
//! }
//! # Ok::<(), aseanim_types::file::DecodeError>(())
//! ```
//!
//! An animation is immutable once built. Visibility toggles for rendering go
//! through an [`AnimationView`] obtained from [`Animation::view`].

mod convert;
mod image;
mod layer;
mod sequence;
mod slice;
mod view;

pub mod render;


use std::{collections::HashMap, fmt, io::Read, path::Path};

use log::info;

pub use image::Image;
pub use layer::{Cel, Layer};
pub use sequence::{Loop, PlaybackSequence, PlaybackStep};
pub use slice::Slice;
pub use view::AnimationView;

use crate::file::{
	DecodeError,
	ase::{DecodeConfig, FlateInflater, Header, Inflate, Palette, PixelFormat, RawFile},
};

/// Timing of one frame.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct FrameInfo {
	/// Display duration in milliseconds
	pub duration: u16,
}

/// A fully decoded sprite animation.
#[derive(Debug, Clone)]
pub struct Animation {
	header: Header,
	palette: Palette,
	frames: Vec<FrameInfo>,
	layers: Vec<Layer>,
	images: Vec<Image>,
	loops: Vec<Loop>,
	loop_lookup: HashMap<String, usize>,
	slices: Vec<Slice>,
	slice_lookup: HashMap<String, usize>,
}

impl Animation {
	/// Decodes an animation from an in-memory file with the default configuration.
	pub fn from_bytes(data: &[u8]) -> Result<Self, DecodeError> {
		Self::from_bytes_with(data, &DecodeConfig::default(), &FlateInflater)
	}

	/// Decodes an animation with a custom configuration.
	pub fn from_bytes_with_config(data: &[u8], config: &DecodeConfig) -> Result<Self, DecodeError> {
		Self::from_bytes_with(data, config, &FlateInflater)
	}

	/// Decodes an animation with a custom configuration and inflate primitive.
	pub fn from_bytes_with<I: Inflate + ?Sized>(
		data: &[u8],
		config: &DecodeConfig,
		inflater: &I,
	) -> Result<Self, DecodeError> {
		let (header, frames) = RawFile::from_bytes_with(data, config, inflater)?.into_parts();
		convert::convert(header, frames)
	}

	/// Reads a whole stream into memory, then decodes it.
	pub fn from_reader<R: Read>(mut reader: R) -> Result<Self, DecodeError> {
		let mut data = Vec::new();
		reader.read_to_end(&mut data)?;
		Self::from_bytes(&data)
	}

	/// Loads and decodes an animation file.
	pub fn open<P: AsRef<Path>>(path: P) -> Result<Self, DecodeError> {
		let data = std::fs::read(path)?;
		Self::from_bytes(&data)
	}

	/// Returns the file header.
	pub fn header(&self) -> &Header {
		&self.header
	}

	/// Returns the canvas width in pixels.
	pub fn width(&self) -> u16 {
		self.header.width()
	}

	/// Returns the canvas height in pixels.
	pub fn height(&self) -> u16 {
		self.header.height()
	}

	/// Returns the number of frames.
	pub fn frame_count(&self) -> usize {
		self.frames.len()
	}

	/// Returns the palette index treated as transparent in indexed images.
	pub fn transparent_index(&self) -> u8 {
		self.header.transparent_index()
	}

	/// Returns the pixel format shared by every image.
	pub fn pixel_format(&self) -> PixelFormat {
		self.header.pixel_format()
	}

	/// Returns the palette populated from frame 0.
	pub fn palette(&self) -> &Palette {
		&self.palette
	}

	/// Returns per-frame timing.
	pub fn frames(&self) -> &[FrameInfo] {
		&self.frames
	}

	/// Returns the layers in file order.
	pub fn layers(&self) -> &[Layer] {
		&self.layers
	}

	/// Returns the shared image store referenced by [`Cel::image`].
	pub fn images(&self) -> &[Image] {
		&self.images
	}

	/// Returns the image a cel refers to.
	pub fn image(&self, cel: &Cel) -> Option<&Image> {
		self.images.get(cel.image)
	}

	/// Returns the synthesized loops in tag order.
	pub fn loops(&self) -> &[Loop] {
		&self.loops
	}

	/// Returns the slices in first-seen order.
	pub fn slices(&self) -> &[Slice] {
		&self.slices
	}

	/// Looks up a loop by name. The default loop is named `""`.
	pub fn loop_by_name(&self, name: &str) -> Option<&Loop> {
		self.loop_index(name).map(|index| &self.loops[index])
	}

	/// Returns the index of the loop named `name`.
	pub fn loop_index(&self, name: &str) -> Option<usize> {
		self.loop_lookup.get(name).copied()
	}

	/// Looks up a slice by name.
	pub fn slice_by_name(&self, name: &str) -> Option<&Slice> {
		self.slice_lookup.get(name).map(|&index| &self.slices[index])
	}

	/// Returns the index of the first layer named `name`.
	pub fn layer_index(&self, name: &str) -> Option<usize> {
		self.layers.iter().position(|layer| layer.name() == name)
	}

	/// Returns the cel of `layer` at `frame`, if any.
	pub fn cel(&self, layer: usize, frame: usize) -> Option<&Cel> {
		self.layers.get(layer).and_then(|layer| layer.cel(frame))
	}

	/// Creates a visibility overlay seeded with the file's layer visibility.
	pub fn view(&self) -> AnimationView<'_> {
		AnimationView::new(self)
	}

	/// Logs a summary of the animation at info level.
	pub fn log(&self) {
		info!(
			"Animation {}×{} {} | {} frames | {} layers | {} images | {} loops | {} slices",
			self.width(),
			self.height(),
			self.pixel_format(),
			self.frame_count(),
			self.layers.len(),
			self.images.len(),
			self.loops.len(),
			self.slices.len()
		);
		for (index, layer) in self.layers.iter().enumerate() {
			let marker = if layer.is_group() {
				"[G]"
			} else {
				"   "
			};
			info!(
				"  {marker} #{index:<3} {:<24} visible={} opacity={} blend={}",
				layer.name(),
				layer.is_visible(),
				layer.opacity(),
				layer.blend_mode()
			);
		}
		for lp in &self.loops {
			info!("  loop {lp}");
		}
	}
}

impl fmt::Display for Animation {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		write!(
			f,
			"Animation({}×{}, {}, {} frames, {} layers, {} images, {} loops, {} slices)",
			self.width(),
			self.height(),
			self.pixel_format(),
			self.frame_count(),
			self.layers.len(),
			self.images.len(),
			self.loops.len(),
			self.slices.len()
		)
	}
}
