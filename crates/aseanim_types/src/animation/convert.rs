//! Folding decoded frames into an [`Animation`].
//!
//! Conversion is a single ordered pass. Frame 0 is scanned first for the
//! palette and layers, then every frame is walked for cels, slices and tags.
//! Any inconsistency aborts the whole conversion.

use std::collections::HashMap;

use log::{debug, warn};

use crate::file::{
	DecodeError, Section,
	ase::{CelChunk, CelContent, Chunk, Frame, Header, Palette, Tag},
};

use super::{Animation, Cel, FrameInfo, Image, Layer, Loop, Slice};

/// Accumulates animation state while frames are walked.
struct Converter {
	header: Header,
	durations: Vec<u16>,
	palette: Palette,
	layers: Vec<Layer>,
	images: Vec<Image>,
	slices: Vec<Slice>,
	slice_lookup: HashMap<String, usize>,
	tags: Vec<Tag>,
}

/// Builds an animation from a decoded header and its frames.
pub(crate) fn convert(header: Header, frames: Vec<Frame>) -> Result<Animation, DecodeError> {
	let mut converter = Converter::new(header, &frames);

	if let Some(first) = frames.first() {
		converter.scan_first_frame(first);
	}

	for (index, frame) in frames.into_iter().enumerate() {
		converter.fold_frame(index, frame)?;
	}

	converter.finish()
}

impl Converter {
	fn new(header: Header, frames: &[Frame]) -> Self {
		Self {
			header,
			durations: frames.iter().map(|frame| frame.duration).collect(),
			palette: Palette::new(),
			layers: Vec::new(),
			images: Vec::new(),
			slices: Vec::new(),
			slice_lookup: HashMap::new(),
			tags: Vec::new(),
		}
	}

	fn frame_count(&self) -> usize {
		self.durations.len()
	}

	/// Collects the palette and the layer list from frame 0, in chunk order.
	fn scan_first_frame(&mut self, frame: &Frame) {
		let frame_count = self.frame_count();
		for chunk in &frame.chunks {
			match chunk {
				Chunk::OldPalette(palette) | Chunk::Palette(palette) => {
					palette.apply(&mut self.palette);
				}
				Chunk::Layer(layer) => {
					self.layers.push(Layer::from_chunk(layer.clone(), frame_count));
				}
				_ => {}
			}
		}
		debug!("Frame 0 declares {} layers", self.layers.len());
	}

	fn fold_frame(&mut self, index: usize, frame: Frame) -> Result<(), DecodeError> {
		for chunk in frame.chunks {
			match chunk {
				Chunk::Cel(cel) => self.resolve_cel(index, cel)?,
				Chunk::Slice(slice) => self.register_slice(Slice::from_chunk(slice)),
				Chunk::Tags(tags) => self.tags.extend(tags),
				Chunk::OldPalette(_) | Chunk::Palette(_) if index > 0 => {
					warn!("Palette chunk in frame {index} ignored, only frame 0 palettes are applied");
				}
				Chunk::Layer(layer) if index > 0 => {
					warn!("Layer chunk '{}' in frame {index} ignored", layer.name);
				}
				_ => {}
			}
		}
		Ok(())
	}

	/// Places a cel in its layer slot, storing new pixels or copying a link.
	fn resolve_cel(&mut self, frame: usize, chunk: CelChunk) -> Result<(), DecodeError> {
		let layer_count = self.layers.len();
		let layer_index = chunk.layer_index as usize;
		let layer = self
			.layers
			.get_mut(layer_index)
			.ok_or_else(|| DecodeError::out_of_range(Section::Cel, layer_index, layer_count))?;

		if layer.is_group() {
			return Err(DecodeError::invalid_payload(
				Section::Cel,
				format!("Cel in frame {frame} targets group layer {layer_index}"),
			));
		}

		let cel = match chunk.content {
			CelContent::Pixels(pixels) => {
				self.images.push(Image::from_cel(pixels, self.header.pixel_format()));
				Cel {
					x: chunk.x,
					y: chunk.y,
					opacity: chunk.opacity,
					image: self.images.len() - 1,
				}
			}
			CelContent::Linked {
				frame: target,
			} => {
				let target = target as usize;
				if target > frame {
					return Err(DecodeError::out_of_range(Section::Cel, target, frame + 1));
				}
				match layer.cel(target) {
					Some(linked) => *linked,
					None => {
						debug!("Linked cel in frame {frame} of layer {layer_index} points at empty frame {target}");
						return Err(DecodeError::out_of_range(Section::Cel, target, frame + 1));
					}
				}
			}
		};

		if let Some(slot) = layer.cels_mut().get_mut(frame) {
			if slot.is_some() {
				debug!("Layer {layer_index} has more than one cel in frame {frame}, keeping the last");
			}
			*slot = Some(cel);
		}
		Ok(())
	}

	fn register_slice(&mut self, slice: Slice) {
		match self.slice_lookup.get(slice.name()) {
			Some(&existing) => {
				warn!("Duplicate slice name '{}', the later slice replaces the earlier", slice.name());
				self.slices[existing] = slice;
			}
			None => {
				self.slice_lookup.insert(slice.name().to_string(), self.slices.len());
				self.slices.push(slice);
			}
		}
	}

	/// Validates tags and synthesizes the loop list.
	fn build_loops(&mut self) -> Result<Vec<Loop>, DecodeError> {
		let frame_count = self.frame_count();
		if self.tags.is_empty() {
			if frame_count == 0 {
				return Ok(Vec::new());
			}
			return Ok(vec![Loop::default_for(&self.durations)]);
		}

		std::mem::take(&mut self.tags)
			.into_iter()
			.map(|tag| {
				if tag.from > tag.to {
					return Err(DecodeError::invalid_payload(
						Section::Tags,
						format!("Tag '{}' runs backwards ({} > {})", tag.name, tag.from, tag.to),
					));
				}
				if tag.to as usize >= frame_count {
					return Err(DecodeError::out_of_range(Section::Tags, tag.to as usize, frame_count));
				}
				Ok(Loop::from_tag(tag, &self.durations))
			})
			.collect()
	}

	fn finish(mut self) -> Result<Animation, DecodeError> {
		let loops = self.build_loops()?;

		let mut loop_lookup = HashMap::with_capacity(loops.len());
		for (index, lp) in loops.iter().enumerate() {
			if loop_lookup.insert(lp.name().to_string(), index).is_some() {
				warn!("Duplicate loop name '{}', lookups resolve to the later loop", lp.name());
			}
		}

		Ok(Animation {
			header: self.header,
			palette: self.palette,
			frames: self
				.durations
				.into_iter()
				.map(|duration| FrameInfo {
					duration,
				})
				.collect(),
			layers: self.layers,
			images: self.images,
			loops,
			loop_lookup,
			slices: self.slices,
			slice_lookup: self.slice_lookup,
		})
	}
}
