#![cfg_attr(docsrs, feature(doc_auto_cfg))]

//! `aseanim-rs` decodes layered, tagged sprite animation files (the Aseprite
//! binary format) into an immutable in-memory animation model.
//!
//! ```no_run
//! use aseanim_rs::prelude::*;
//!
//! let anim = Animation::open("walk.aseprite")?;
//! anim.log();
//! for lp in anim.loops() {
//!     println!("{lp}: {:?}", lp.sequence().to_flat());
//! }
//! # Ok::<(), DecodeError>(())
//! ```
pub use aseanim_internal::*;
