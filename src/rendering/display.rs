//! # Display
//!
//! Paints one of four screen phases onto a [`Surface`]: pregame instructions,
//! waiting-for-game, the active game, and game-over. Painting a screen always
//! means filling the background first and layering sprites and text on top;
//! whatever is drawn last wins.
//!
//! The display only reads engine and control state. Capability unlocks arrive
//! as engine events through [`Display::process_event`] and are shown as a
//! timed banner.

use macroquad::prelude::{Color, Rect};

use crate::config::{BANNER_FRAMES, FONT_SIZE, HEALTH_BAR_SEGMENTS, STATUS_BAR_HEIGHT};
use crate::game::{Capability, GameEngine, GameEvent, GameObject, Npc, ObjectId, Player, SpeedTier};
use crate::input::ControlState;
use crate::rendering::{SpriteId, Surface};

/// Builds the 10-segment health bar for a health/max pair, e.g. `|####      |`.
/// The filled count is `round(segments * health / max)`, clamped to the bar.
pub fn health_bar(health: f32, max_health: f32) -> String {
    let filled = if max_health > 0.0 {
        (HEALTH_BAR_SEGMENTS as f32 * health / max_health)
            .round()
            .clamp(0.0, HEALTH_BAR_SEGMENTS as f32) as usize
    } else {
        0
    };
    let mut bar = String::with_capacity(HEALTH_BAR_SEGMENTS as usize + 2);
    bar.push('|');
    for i in 0..HEALTH_BAR_SEGMENTS as usize {
        bar.push(if i < filled { '#' } else { ' ' });
    }
    bar.push('|');
    bar
}

/// One `>` per whole point of missile mana.
pub fn missile_indicator(missile_mana: f32) -> String {
    ">".repeat(missile_mana.max(0.0).floor() as usize)
}

struct Banner {
    text: String,
    frames_left: u32,
}

/// The client's view component. One instance per running client.
pub struct Display {
    font_size: f32,
    text_color: Color,
    health_color: Color,
    mana_color: Color,
    range_color: Color,
    background_color: Color,
    banner: Option<Banner>,
    /// Speed tier last announced by the engine, shown in the status bar.
    speed_tier: Option<SpeedTier>,
}

impl Display {
    /// Creates a display with the default palette.
    pub fn new() -> Self {
        Self {
            font_size: FONT_SIZE,
            text_color: Color::from_rgba(255, 255, 255, 255),
            health_color: Color::from_rgba(200, 0, 0, 255),
            mana_color: Color::from_rgba(80, 120, 255, 255),
            range_color: Color::from_rgba(255, 255, 255, 255),
            background_color: Color::from_rgba(50, 0, 120, 255),
            banner: None,
            speed_tier: None,
        }
    }

    fn clear_background<S: Surface>(&self, surface: &mut S, control: &ControlState) {
        let color = match control.background_color {
            Some([r, g, b]) => Color::from_rgba(r, g, b, 255),
            None => self.background_color,
        };
        let full = Rect::new(0.0, 0.0, surface.width(), surface.height());
        surface.fill_rect(full, color);
    }

    /// Draws the instruction screen shown before a game is requested.
    pub fn paint_pregame<S: Surface>(&self, surface: &mut S, control: &ControlState) {
        self.clear_background(surface, control);

        let cx = surface.width() / 2.0;
        let lines = [
            (150.0, "Controls"),
            (200.0, "Arrow keys / WASD move and aim"),
            (250.0, "SPACE fires a missile"),
            (300.0, "I toggles the status bar"),
            (400.0, "To Start"),
            (450.0, "Press 'd' for dual player, 's' for single player,"),
            (500.0, "'t' for tournament, ESC to quit"),
        ];
        for (y, text) in lines {
            surface.draw_text_center(text, self.text_color, cx, y, self.font_size);
        }
    }

    /// Draws the holding screen between requesting a game and it starting.
    pub fn paint_waiting_for_game<S: Surface>(
        &self,
        surface: &mut S,
        _engine: &dyn GameEngine,
        control: &ControlState,
    ) {
        self.clear_background(surface, control);
        surface.draw_text_center(
            "Loading Game...",
            self.text_color,
            surface.width() / 2.0,
            surface.height() / 2.0,
            self.font_size,
        );
    }

    /// Draws one frame of the active game: background, every object by kind,
    /// then the status bar if enabled and the unlock banner if one is live.
    pub fn paint_game<S: Surface>(
        &mut self,
        surface: &mut S,
        engine: &dyn GameEngine,
        control: &ControlState,
    ) {
        self.clear_background(surface, control);

        // Kind by kind so players always sit above missiles and walls. Order
        // within a kind follows map iteration and is not deterministic.
        for obj in engine.objects().values() {
            if matches!(obj, GameObject::Wall(_)) {
                self.paint_wall(surface, body_rect(obj));
            }
        }
        for obj in engine.objects().values() {
            if let GameObject::Npc(npc) = obj {
                self.paint_npc(surface, npc);
            }
        }
        for obj in engine.objects().values() {
            if matches!(obj, GameObject::Missile(_)) {
                self.paint_missile(surface, obj);
            }
        }
        for (oid, obj) in engine.objects() {
            if let GameObject::Player(player) = obj {
                self.paint_player(surface, engine, *oid, player);
            }
        }

        if control.show_info {
            self.paint_game_status(surface, engine);
        }

        self.paint_banner(surface);
    }

    /// Draws the game-over screen: the final game frame plus one centered
    /// message on top.
    pub fn paint_game_over<S: Surface>(
        &mut self,
        surface: &mut S,
        engine: &dyn GameEngine,
        control: &ControlState,
    ) {
        self.paint_game(surface, engine, control);
        surface.draw_text_center(
            "Game Over",
            self.text_color,
            surface.width() / 2.0,
            surface.height() / 2.0,
            self.font_size,
        );
    }

    /// Reacts to a discrete engine event. Capability unlocks become a timed
    /// banner; everything else is currently ignored.
    pub fn process_event<S: Surface>(
        &mut self,
        _surface: &mut S,
        _engine: &dyn GameEngine,
        _control: &ControlState,
        event: &GameEvent,
    ) {
        match event {
            GameEvent::CapabilityUnlocked { tier } => {
                match tier.capability() {
                    Some(Capability::PlayerSpeedMedium) => {
                        self.speed_tier = Some(SpeedTier::Medium)
                    }
                    Some(Capability::PlayerSpeedFast) => self.speed_tier = Some(SpeedTier::Fast),
                    _ => {}
                }
                self.banner = Some(Banner {
                    text: tier.message().to_string(),
                    frames_left: BANNER_FRAMES,
                });
            }
            GameEvent::ObjectDestroyed { .. } | GameEvent::Message { .. } => {}
        }
    }

    fn paint_wall<S: Surface>(&self, surface: &mut S, rect: Rect) {
        surface.draw_sprite(SpriteId::Wall, rect);
    }

    /// Living NPCs get a sprite and a health bar above it. Dead NPCs draw
    /// nothing.
    fn paint_npc<S: Surface>(&self, surface: &mut S, npc: &Npc) {
        if !npc.alive {
            return;
        }
        let rect = Rect::new(npc.body.x, npc.body.y, npc.body.w, npc.body.h);
        surface.draw_sprite(SpriteId::Npc, rect);

        let (cx, _) = npc.body.center();
        surface.draw_text_center(
            &health_bar(npc.health, npc.max_health),
            self.health_color,
            cx,
            npc.body.y - 6.0,
            self.font_size,
        );
    }

    fn paint_missile<S: Surface>(&self, surface: &mut S, obj: &GameObject) {
        if !obj.is_alive() {
            return;
        }
        surface.draw_sprite(SpriteId::Missile, body_rect(obj));
    }

    /// Players always show their health bar and missile-mana indicator. A
    /// living avatar additionally gets its sprite and a missile-range circle.
    /// The local player uses the control-selected sprite, everyone else the
    /// opponent sprite.
    fn paint_player<S: Surface>(
        &self,
        surface: &mut S,
        engine: &dyn GameEngine,
        oid: ObjectId,
        player: &Player,
    ) {
        let (cx, cy) = player.body.center();

        surface.draw_text_center(
            &missile_indicator(player.missile_mana),
            self.mana_color,
            cx,
            player.body.y - 6.0,
            self.font_size,
        );
        surface.draw_text_center(
            &health_bar(player.health, player.max_health),
            self.health_color,
            cx,
            player.body.y - 6.0 - self.font_size,
            self.font_size,
        );

        if !player.alive {
            return;
        }

        let sprite = if engine.player_oid() == Some(oid) {
            SpriteId::Player
        } else {
            SpriteId::Opponent
        };
        let rect = Rect::new(player.body.x, player.body.y, player.body.w, player.body.h);
        surface.draw_sprite(sprite, rect);
        surface.draw_circle_outline(cx, cy, player.missile_range, self.range_color);
    }

    /// Two left-aligned summary lines in the bottom status strip, one for the
    /// local player and one for the opponent. A missing object skips its line.
    fn paint_game_status<S: Surface>(&self, surface: &mut S, engine: &dyn GameEngine) {
        let x = 20.0;
        let base = surface.height() - STATUS_BAR_HEIGHT;

        if let Some(player) = engine.player_oid().and_then(|oid| lookup_player(engine, oid)) {
            let speed = match self.speed_tier {
                Some(SpeedTier::Fast) => "  Spd: fast",
                Some(SpeedTier::Medium) => "  Spd: medium",
                Some(SpeedTier::Slow) | None => "",
            };
            let line = format!(
                "Me: {}  HP: {:.1}  XP: {:.1}  Mv: {:.1}  Ms: {:.1}{}",
                engine.player_name(),
                player.health,
                player.experience,
                player.move_mana,
                player.missile_mana,
                speed,
            );
            surface.draw_text_left(
                &line,
                self.text_color,
                x,
                base + 1.5 * self.font_size,
                self.font_size,
            );
        }

        if let Some(opponent) = engine
            .opponent_oid()
            .and_then(|oid| lookup_player(engine, oid))
        {
            let line = format!(
                "Opponent: {}  HP: {:.1}  XP: {:.1}  Mv: {:.1}  Ms: {:.1}",
                engine.opponent_name(),
                opponent.health,
                opponent.experience,
                opponent.move_mana,
                opponent.missile_mana,
            );
            surface.draw_text_left(
                &line,
                self.text_color,
                x,
                base + 3.0 * self.font_size,
                self.font_size,
            );
        }
    }

    fn paint_banner<S: Surface>(&mut self, surface: &mut S) {
        let mut expired = false;
        if let Some(banner) = &mut self.banner {
            surface.draw_text_center(
                &banner.text,
                self.text_color,
                surface.width() / 2.0,
                surface.height() / 3.0,
                self.font_size,
            );
            banner.frames_left -= 1;
            expired = banner.frames_left == 0;
        }
        if expired {
            self.banner = None;
        }
    }
}

impl Default for Display {
    fn default() -> Self {
        Self::new()
    }
}

fn body_rect(obj: &GameObject) -> Rect {
    let body = obj.body();
    Rect::new(body.x, body.y, body.w, body.h)
}

fn lookup_player(engine: &dyn GameEngine, oid: ObjectId) -> Option<&Player> {
    engine.object(oid).and_then(GameObject::as_player)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::game::{Body, LocalEngine, UnlockTier};
    use crate::rendering::RecordingSurface;
    use proptest::prelude::*;

    #[test]
    fn test_health_bar_shape() {
        assert_eq!(health_bar(50.0, 50.0), "|##########|");
        assert_eq!(health_bar(0.0, 50.0), "|          |");
        assert_eq!(health_bar(25.0, 50.0), "|#####     |");
    }

    #[test]
    fn test_health_bar_degenerate_max() {
        assert_eq!(health_bar(10.0, 0.0), "|          |");
    }

    #[test]
    fn test_missile_indicator_floors() {
        assert_eq!(missile_indicator(3.9), ">>>");
        assert_eq!(missile_indicator(0.2), "");
        assert_eq!(missile_indicator(-1.0), "");
    }

    #[test]
    fn test_banner_expires_after_its_frames() {
        let mut display = Display::new();
        let engine = LocalEngine::new(800.0, 600.0);
        let control = ControlState::default();
        let mut surface = RecordingSurface::new(800.0, 600.0);

        display.process_event(
            &mut surface,
            &engine,
            &control,
            &GameEvent::CapabilityUnlocked {
                tier: UnlockTier::SpeedFast,
            },
        );

        for _ in 0..crate::config::BANNER_FRAMES {
            surface.ops.clear();
            display.paint_game(&mut surface, &engine, &control);
            assert!(surface.texts().iter().any(|t| *t == UnlockTier::SpeedFast.message()));
        }

        surface.ops.clear();
        display.paint_game(&mut surface, &engine, &control);
        assert!(!surface.texts().iter().any(|t| *t == UnlockTier::SpeedFast.message()));
    }

    #[test]
    fn test_status_skips_absent_player() {
        let mut display = Display::new();
        let mut engine = LocalEngine::new(800.0, 600.0);
        let opponent = engine.add_player(Body::new(400.0, 300.0, 32.0, 32.0), 100.0);
        engine.set_opponent_oid(opponent);

        let control = ControlState::default();
        let mut surface = RecordingSurface::new(800.0, 600.0);
        display.paint_game(&mut surface, &engine, &control);

        let texts = surface.texts();
        assert!(!texts.iter().any(|t| t.starts_with("Me:")));
        assert!(texts.iter().any(|t| t.starts_with("Opponent:")));
    }

    #[test]
    fn test_dead_npc_draws_nothing() {
        let display = Display::new();
        let mut surface = RecordingSurface::new(800.0, 600.0);
        let npc = Npc {
            body: Body::new(100.0, 100.0, 32.0, 32.0),
            health: 0.0,
            max_health: 50.0,
            alive: false,
        };
        display.paint_npc(&mut surface, &npc);
        assert!(surface.ops.is_empty());
    }

    #[test]
    fn test_dead_player_keeps_bars_but_no_sprite() {
        let display = Display::new();
        let engine = LocalEngine::new(800.0, 600.0);
        let mut surface = RecordingSurface::new(800.0, 600.0);

        let mut player = Player::new(Body::new(100.0, 100.0, 32.0, 32.0), 100.0);
        player.alive = false;
        player.health = 0.0;
        display.paint_player(&mut surface, &engine, ObjectId(9), &player);

        assert!(surface.sprites().is_empty());
        assert_eq!(surface.texts().len(), 2);
    }

    proptest! {
        // Spec property: filled segments = round(10 * h / m), clamped to
        // [0, 10], for any health and positive max health.
        #[test]
        fn prop_health_bar_segment_count(health in -50.0f32..500.0, max in 1.0f32..500.0) {
            let bar = health_bar(health, max);
            let filled = bar.chars().filter(|c| *c == '#').count();
            let expected = (10.0 * health / max).round().clamp(0.0, 10.0) as usize;
            prop_assert_eq!(filled, expected);
            prop_assert_eq!(bar.len(), 12);
        }
    }
}
