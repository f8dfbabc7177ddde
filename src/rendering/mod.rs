//! # Rendering Module
//!
//! The view layer: an abstract drawing surface, a startup-loaded asset cache,
//! and the [`Display`] component that paints each screen phase.

pub mod assets;
pub mod display;
pub mod surface;

pub use assets::*;
pub use display::*;
pub use surface::*;
