//! File format support for `aseanim-rs`.

mod error;

pub mod ase;

// Re-export unified error type
pub use error::{DecodeError, InflateError, Section};

pub use ase::{
	Chunk, ChunkKind, DecodeConfig, FlateInflater, Frame as RawFrame, Header, Inflate, PixelFormat,
	RawFile,
};
