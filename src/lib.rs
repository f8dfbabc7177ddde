//! # Volley Arena Client
//!
//! A 2D client for a small multiplayer arcade game. The client receives match
//! state from an engine, paints it to the screen with macroquad, and plays a
//! looping background track.
//!
//! ## Architecture Overview
//!
//! - **Game State**: a tagged-union object model (walls, NPCs, missiles,
//!   players) behind the read-only [`GameEngine`] trait
//! - **Progression**: an experience ladder evaluated by the engine each tick,
//!   surfaced to the view as discrete unlock events
//! - **Rendering System**: the [`Display`] component paints one of four screen
//!   phases onto an abstract [`Surface`]
//! - **Scenes**: a small scene manager that selects the active phase and feeds
//!   engine events to the view
//!
//! The simulation authority (networking, physics, collision) lives outside
//! this crate; [`LocalEngine`] is just enough engine to run and test the
//! client on its own.

pub mod game;
pub mod input;
pub mod rendering;
pub mod scenes;

pub use game::*;
pub use input::*;
pub use rendering::*;

pub use game::{
    Body, Capability, GameEngine, GameEvent, GameObject, LocalEngine, Missile, Npc, ObjectId,
    Player, PowerLevel, SpeedTier, UnlockTier, Wall,
};
pub use input::{ControlState, InputHandler, PlayerInput};
pub use rendering::{AssetCache, Display, DrawOp, RecordingSurface, SpriteId, Surface};
pub use scenes::{SceneManager, ScreenPhase};

/// Core error type for the arena client.
#[derive(thiserror::Error, Debug)]
pub enum VolleyError {
    /// I/O operation failed
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Serialization/deserialization error
    #[error("Serialization error: {0}")]
    Serde(#[from] serde_json::Error),

    /// Game state is invalid
    #[error("Invalid game state: {0}")]
    InvalidState(String),

    /// An asset file could not be loaded
    #[error("Failed to load asset '{path}': {message}")]
    AssetLoad { path: String, message: String },
}

/// Result type used throughout the volley codebase.
pub type VolleyResult<T> = Result<T, VolleyError>;

/// Version information for the client.
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Client configuration constants.
pub mod config {
    /// Default window width in pixels
    pub const DEFAULT_SCREEN_WIDTH: f32 = 1024.0;

    /// Default window height in pixels
    pub const DEFAULT_SCREEN_HEIGHT: f32 = 768.0;

    /// Height of the bottom status strip in pixels
    pub const STATUS_BAR_HEIGHT: f32 = 120.0;

    /// Font size for all UI text
    pub const FONT_SIZE: f32 = 28.0;

    /// Full health of a demo NPC; also the experience step between unlock tiers
    pub const NPC_HEALTH: f32 = 50.0;

    /// Number of segments in a health bar
    pub const HEALTH_BAR_SEGMENTS: u32 = 10;

    /// Number of experience tiers in the unlock ladder
    pub const UNLOCK_TIER_COUNT: u32 = 15;

    /// How many frames an unlock banner stays on screen
    pub const BANNER_FRAMES: u32 = 180;

    /// Move mana regenerated per engine tick
    pub const MOVE_MANA_REGEN: f32 = 0.05;

    /// Missile mana regenerated per engine tick
    pub const MISSILE_MANA_REGEN: f32 = 0.02;

    /// Mana cost of one step of movement
    pub const MOVE_MANA_COST: f32 = 1.0;

    /// Mana cost of firing one missile
    pub const MISSILE_MANA_COST: f32 = 3.0;
}
