//! # Input Module
//!
//! Local UI configuration and keyboard polling. `ControlState` is the
//! control collaborator the display reads; `InputHandler` turns macroquad key
//! presses into `PlayerInput` values for the scene manager.

use std::path::Path;

use log::{info, warn};
use macroquad::prelude::*;
use serde::{Deserialize, Serialize};

use crate::scenes::ScreenPhase;
use crate::VolleyResult;

/// UI-facing configuration the display reads every frame. Loaded from a JSON
/// settings file; every field has a sensible default.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ControlState {
    /// Whether to draw the bottom status bar.
    pub show_info: bool,
    /// Sprite for the locally controlled player, relative to the assets
    /// folder.
    pub player_image: String,
    /// Optional background color override as `[r, g, b]`.
    pub background_color: Option<[u8; 3]>,
}

impl Default for ControlState {
    fn default() -> Self {
        Self {
            show_info: true,
            player_image: "images/player.png".to_string(),
            background_color: None,
        }
    }
}

impl ControlState {
    /// Loads settings from a JSON file.
    pub fn load(path: &Path) -> VolleyResult<Self> {
        let raw = std::fs::read_to_string(path)?;
        Ok(serde_json::from_str(&raw)?)
    }

    /// Loads settings, falling back to defaults when the file is missing or
    /// unreadable.
    pub fn load_or_default(path: &Path) -> Self {
        match Self::load(path) {
            Ok(control) => {
                info!("Loaded settings from {}", path.display());
                control
            }
            Err(e) => {
                warn!("Settings file {} not used ({}), using defaults", path.display(), e);
                Self::default()
            }
        }
    }

    /// Flips the status-bar toggle.
    pub fn toggle_info(&mut self) {
        self.show_info = !self.show_info;
    }
}

/// A movement/aim direction.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Direction {
    Up,
    Down,
    Left,
    Right,
}

impl Direction {
    /// Unit vector in screen coordinates (y grows downward).
    pub fn unit(self) -> (f32, f32) {
        match self {
            Direction::Up => (0.0, -1.0),
            Direction::Down => (0.0, 1.0),
            Direction::Left => (-1.0, 0.0),
            Direction::Right => (1.0, 0.0),
        }
    }
}

/// Player input types the scene manager acts on.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PlayerInput {
    /// Request a dual-player game
    StartDual,
    /// Request a single-player game
    StartSingle,
    /// Request a tournament game
    StartTournament,
    /// Move one step and aim in the given direction
    Move(Direction),
    /// Fire a missile in the current aim direction
    Fire,
    /// Toggle the status bar
    ToggleInfo,
    /// Grant one NPC's worth of experience (debug aid)
    DebugExperience,
    /// Start a new game from the game-over screen
    NewGame,
    /// Quit the client
    Quit,
}

/// Keyboard poller. Which keys are live depends on the current screen phase.
#[derive(Debug, Default)]
pub struct InputHandler;

impl InputHandler {
    /// Creates a new input handler.
    pub fn new() -> Self {
        Self
    }

    /// Polls the keyboard for the current phase. Returns at most one input
    /// per frame.
    pub fn poll(&self, phase: &ScreenPhase) -> Option<PlayerInput> {
        if is_key_pressed(KeyCode::Escape) {
            return Some(PlayerInput::Quit);
        }

        match phase {
            ScreenPhase::Pregame => self.poll_pregame(),
            ScreenPhase::WaitingForGame => None,
            ScreenPhase::Playing => self.poll_playing(),
            ScreenPhase::GameOver => self.poll_game_over(),
        }
    }

    fn poll_pregame(&self) -> Option<PlayerInput> {
        if is_key_pressed(KeyCode::D) {
            return Some(PlayerInput::StartDual);
        }
        if is_key_pressed(KeyCode::S) {
            return Some(PlayerInput::StartSingle);
        }
        if is_key_pressed(KeyCode::T) {
            return Some(PlayerInput::StartTournament);
        }
        None
    }

    fn poll_playing(&self) -> Option<PlayerInput> {
        // Arrow keys
        if is_key_pressed(KeyCode::Up) {
            return Some(PlayerInput::Move(Direction::Up));
        }
        if is_key_pressed(KeyCode::Down) {
            return Some(PlayerInput::Move(Direction::Down));
        }
        if is_key_pressed(KeyCode::Left) {
            return Some(PlayerInput::Move(Direction::Left));
        }
        if is_key_pressed(KeyCode::Right) {
            return Some(PlayerInput::Move(Direction::Right));
        }

        // WASD
        if is_key_pressed(KeyCode::W) {
            return Some(PlayerInput::Move(Direction::Up));
        }
        if is_key_pressed(KeyCode::S) {
            return Some(PlayerInput::Move(Direction::Down));
        }
        if is_key_pressed(KeyCode::A) {
            return Some(PlayerInput::Move(Direction::Left));
        }
        if is_key_pressed(KeyCode::D) {
            return Some(PlayerInput::Move(Direction::Right));
        }

        if is_key_pressed(KeyCode::Space) {
            return Some(PlayerInput::Fire);
        }
        if is_key_pressed(KeyCode::I) {
            return Some(PlayerInput::ToggleInfo);
        }
        if is_key_pressed(KeyCode::X) {
            return Some(PlayerInput::DebugExperience);
        }
        None
    }

    fn poll_game_over(&self) -> Option<PlayerInput> {
        if is_key_pressed(KeyCode::N) {
            return Some(PlayerInput::NewGame);
        }
        None
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_control_state_defaults() {
        let control = ControlState::default();
        assert!(control.show_info);
        assert_eq!(control.player_image, "images/player.png");
        assert!(control.background_color.is_none());
    }

    #[test]
    fn test_control_state_partial_json() {
        let control: ControlState =
            serde_json::from_str(r#"{"background_color": [10, 20, 30]}"#).unwrap();
        assert!(control.show_info);
        assert_eq!(control.background_color, Some([10, 20, 30]));
    }

    #[test]
    fn test_toggle_info_flips() {
        let mut control = ControlState::default();
        control.toggle_info();
        assert!(!control.show_info);
        control.toggle_info();
        assert!(control.show_info);
    }

    #[test]
    fn test_direction_units() {
        assert_eq!(Direction::Up.unit(), (0.0, -1.0));
        assert_eq!(Direction::Right.unit(), (1.0, 0.0));
    }
}
