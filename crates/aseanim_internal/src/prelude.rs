//! Prelude module for `aseanim_internal`.
//!
//! This module provides a convenient way to import commonly used types and traits.
//!
//! # Examples
//!
//! ```no_run
//! use aseanim_internal::prelude::*;
//!
//! let anim = Animation::open("walk.aseprite")?;
//! let mut view = anim.view();
//! view.set_all_visible(true);
//! # Ok::<(), DecodeError>(())
//! ```

// Re-export everything from aseanim_types::prelude
#[doc(inline)]
pub use aseanim_types::prelude::*;

// Re-export the entire aseanim_types module for advanced usage
#[doc(inline)]
pub use aseanim_types;
