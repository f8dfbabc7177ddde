//! # Game Events
//!
//! Discrete events the engine emits during its tick. The view consumes these
//! through `Display::process_event`; it never reaches back into the engine.

use crate::game::{ObjectId, UnlockTier};

/// Something interesting that happened during an engine tick.
#[derive(Debug, Clone, PartialEq)]
pub enum GameEvent {
    /// The local player crossed an experience threshold and gained a tier.
    CapabilityUnlocked { tier: UnlockTier },

    /// An object was destroyed this tick.
    ObjectDestroyed { oid: ObjectId },

    /// Free-form text for the player.
    Message { text: String },
}
