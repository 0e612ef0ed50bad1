//! Prelude module for `aseanim_types`.
//!
//! This module provides a convenient way to import commonly used types and traits.
//!
//! # Examples
//!
//! ```no_run
//! use aseanim_types::prelude::*;
//!
//! let anim = Animation::from_bytes(&std::fs::read("walk.aseprite")?)?;
//! let walk: Option<&Loop> = anim.loop_by_name("walk");
//! # Ok::<(), Box<dyn std::error::Error>>(())
//! ```

// Animation model
#[doc(inline)]
pub use crate::animation::{
	Animation, AnimationView, Cel, FrameInfo, Image, Layer, Loop, PlaybackSequence, PlaybackStep,
	Slice, render,
};

// Decoding
#[doc(inline)]
pub use crate::file::{
	DecodeConfig, DecodeError, FlateInflater, Header, Inflate, InflateError, PixelFormat, RawFile,
	Section,
};

#[doc(inline)]
pub use crate::file::ase::{
	BlendMode, Color, LayerKind, LoopDirection, NinePatch, Palette, Pivot, SliceKey,
};

// Re-export the file module for advanced usage
#[doc(inline)]
pub use crate::file;
