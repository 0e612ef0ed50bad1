//! This module is separated into its own crate so the facade can stay a thin re-export, and should not be used directly.

/// `use aseanim_rs::prelude::*;` to import commonly used items.
pub mod prelude;

// Re-export aseanim_types for convenience
pub use aseanim_types;

// Re-export the two layers at crate root
pub use aseanim_types::{animation, file};

pub use aseanim_types::animation::{Animation, AnimationView};
pub use aseanim_types::file::{DecodeConfig, DecodeError};
