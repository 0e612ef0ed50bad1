//! This crate provides the decoder and data model for the `aseanim-rs` project.
//!
//! # Layers
//!
//! - **`file::ase`**: Byte-level decoding of Aseprite-style sprite files into a
//!   header and frames of typed chunks
//! - **`animation`**: The semantic [`Animation`](animation::Animation) built from
//!   those frames, with synthesized loops, slices, a visibility overlay and
//!   palette substitution for renderers
//!
//! # Examples
//!
//! Using the prelude (recommended):
//!
//! ```no_run
//! use aseanim_types::prelude::*;
//!
//! let anim = Animation::open("hero.aseprite")?;
//! let mut view = anim.view();
//! view.set_visible("shadow", false);
//!
//! for (index, layer) in view.visible_layers() {
//!     if let Some(cel) = layer.cel(0) {
//!         let image = &anim.images()[cel.image];
//!         let rgba = render::to_rgba(image, anim.palette(), cel.opacity, anim.transparent_index());
//!         println!("layer {index}: {} bytes", rgba.len());
//!     }
//! }
//! # Ok::<(), DecodeError>(())
//! ```
//!
//! Or work at the chunk level:
//!
//! ```no_run
//! use aseanim_types::file::{Chunk, RawFile};
//!
//! let data = std::fs::read("hero.aseprite")?;
//! let raw = RawFile::from_bytes(&data)?;
//! for frame in raw.frames() {
//!     let cels = frame.chunks.iter().filter(|c| matches!(c, Chunk::Cel(_))).count();
//!     println!("{} ms, {cels} cels", frame.duration);
//! }
//! # Ok::<(), Box<dyn std::error::Error>>(())
//! ```

pub mod animation;
pub mod file;

/// `use aseanim_types::prelude::*;` to import commonly used items.
pub mod prelude;
