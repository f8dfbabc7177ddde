//! # Game Module
//!
//! Match state as seen by the client: the object model, the read-only engine
//! surface, discrete game events, and the experience-unlock ladder.

pub mod engine;
pub mod events;
pub mod objects;
pub mod progression;

pub use engine::*;
pub use events::*;
pub use objects::*;
pub use progression::*;
