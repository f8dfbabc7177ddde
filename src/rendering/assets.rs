//! # Asset Cache
//!
//! All textures, the UI font, and the background track are loaded once at
//! startup. A missing or corrupt file fails the load with the offending path
//! in the error, so the client refuses to start half-blind rather than
//! discovering the gap mid-frame.

use std::collections::HashMap;

use log::{info, warn};
use macroquad::audio::{load_sound, play_sound, stop_sound, PlaySoundParams, Sound};
use macroquad::prelude::*;

use crate::input::ControlState;
use crate::{VolleyError, VolleyResult};

/// Relative paths under the assets folder.
const WALL_TEXTURE: &str = "images/wall.png";
const NPC_TEXTURE: &str = "images/npc.png";
const MISSILE_TEXTURE: &str = "images/missile.png";
const OPPONENT_TEXTURE: &str = "images/opponent.png";
const UI_FONT: &str = "fonts/ui.ttf";
const MUSIC_TRACK: &str = "music/arcade_journeys.ogg";

/// Music loop volume.
const MUSIC_VOLUME: f32 = 0.4;

/// The closed set of sprites the display can ask for. `Player` resolves to
/// the control-selected texture; everyone else's avatar is `Opponent`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SpriteId {
    Wall,
    Npc,
    Missile,
    Player,
    Opponent,
}

/// Startup-loaded rendering and audio resources.
pub struct AssetCache {
    textures: HashMap<SpriteId, Texture2D>,
    font: Option<Font>,
    music: Sound,
}

impl AssetCache {
    /// Loads every asset the client needs. The player sprite path comes from
    /// the control settings. Fails on the first missing or unreadable file.
    pub async fn load(control: &ControlState) -> VolleyResult<Self> {
        let mut textures = HashMap::new();
        textures.insert(SpriteId::Wall, load_texture_strict(WALL_TEXTURE).await?);
        textures.insert(SpriteId::Npc, load_texture_strict(NPC_TEXTURE).await?);
        textures.insert(
            SpriteId::Missile,
            load_texture_strict(MISSILE_TEXTURE).await?,
        );
        textures.insert(
            SpriteId::Opponent,
            load_texture_strict(OPPONENT_TEXTURE).await?,
        );
        textures.insert(
            SpriteId::Player,
            load_texture_strict(&control.player_image).await?,
        );

        // The font is cosmetic; fall back to the built-in one if absent.
        let font = match load_ttf_font(UI_FONT).await {
            Ok(font) => Some(font),
            Err(e) => {
                warn!("UI font '{}' unavailable ({}), using default", UI_FONT, e);
                None
            }
        };

        let music = load_sound(MUSIC_TRACK)
            .await
            .map_err(|e| VolleyError::AssetLoad {
                path: MUSIC_TRACK.to_string(),
                message: e.to_string(),
            })?;

        info!("Loaded {} textures and background track", textures.len());
        Ok(Self {
            textures,
            font,
            music,
        })
    }

    /// Texture for a sprite id. Every id is populated by [`AssetCache::load`].
    pub fn texture(&self, sprite: SpriteId) -> &Texture2D {
        &self.textures[&sprite]
    }

    /// The UI font, if one was bundled.
    pub fn font(&self) -> Option<&Font> {
        self.font.as_ref()
    }

    /// Starts the background track on a loop.
    pub fn play_music(&self) {
        play_sound(
            &self.music,
            PlaySoundParams {
                looped: true,
                volume: MUSIC_VOLUME,
            },
        );
    }

    /// Stops the background track.
    pub fn stop_music(&self) {
        stop_sound(&self.music);
    }
}

async fn load_texture_strict(path: &str) -> VolleyResult<Texture2D> {
    let texture = load_texture(path)
        .await
        .map_err(|e| VolleyError::AssetLoad {
            path: path.to_string(),
            message: e.to_string(),
        })?;
    texture.set_filter(FilterMode::Nearest);
    Ok(texture)
}
