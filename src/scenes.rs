//! # Scene Management
//!
//! Selects which screen phase the display paints each frame and drives the
//! engine while a game is in session. The display itself never decides the
//! phase; this manager is the external caller the rendering contract assumes.

use log::info;
use macroquad::prelude::next_frame;

use crate::config::NPC_HEALTH;
use crate::game::{GameEngine, GameObject, LocalEngine};
use crate::input::{ControlState, Direction, InputHandler, PlayerInput};
use crate::rendering::{Display, MacroquadSurface, Surface};
use crate::VolleyResult;

/// Frames spent on the waiting screen before the demo match begins. A
/// networked client would instead wait for the server's game-start message.
const WAITING_FRAMES: u32 = 90;

/// The four screens the client can show.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ScreenPhase {
    /// Instructions, before a game is requested
    Pregame,
    /// Game requested, not yet started
    WaitingForGame,
    /// Game in session
    Playing,
    /// Game finished, short hold before returning
    GameOver,
}

/// Coordinates phases, input, engine ticks, and painting.
pub struct SceneManager {
    phase: ScreenPhase,
    engine: LocalEngine,
    control: ControlState,
    display: Display,
    input: InputHandler,
    facing: Direction,
    waiting_left: u32,
    seed: u64,
    arena_width: f32,
    arena_height: f32,
}

impl SceneManager {
    /// Creates a manager starting on the pregame screen.
    pub fn new(
        seed: u64,
        arena_width: f32,
        arena_height: f32,
        control: ControlState,
    ) -> Self {
        Self {
            phase: ScreenPhase::Pregame,
            engine: LocalEngine::demo_match(seed, arena_width, arena_height),
            control,
            display: Display::new(),
            input: InputHandler::new(),
            facing: Direction::Right,
            waiting_left: WAITING_FRAMES,
            seed,
            arena_width,
            arena_height,
        }
    }

    /// Current screen phase.
    pub fn phase(&self) -> ScreenPhase {
        self.phase
    }

    /// The engine backing the current match.
    pub fn engine(&self) -> &LocalEngine {
        &self.engine
    }

    /// Runs the frame loop until the player quits.
    pub async fn run(&mut self, surface: &mut MacroquadSurface) -> VolleyResult<()> {
        loop {
            let input = self.input.poll(&self.phase);
            if self.advance(surface, input) {
                break;
            }
            next_frame().await;
        }
        info!("Client loop ended");
        Ok(())
    }

    /// Advances one frame with an already-polled input. Returns true when the
    /// client should exit.
    pub fn advance<S: Surface>(&mut self, surface: &mut S, input: Option<PlayerInput>) -> bool {
        if input == Some(PlayerInput::Quit) {
            return true;
        }
        match self.phase {
            ScreenPhase::Pregame => self.advance_pregame(surface, input),
            ScreenPhase::WaitingForGame => self.advance_waiting(surface),
            ScreenPhase::Playing => self.advance_playing(surface, input),
            ScreenPhase::GameOver => self.advance_game_over(surface, input),
        }
        false
    }

    fn advance_pregame<S: Surface>(&mut self, surface: &mut S, input: Option<PlayerInput>) {
        match input {
            Some(PlayerInput::StartDual) => self.request_game("dual"),
            Some(PlayerInput::StartSingle) => self.request_game("single"),
            Some(PlayerInput::StartTournament) => self.request_game("tournament"),
            _ => {}
        }
        self.display.paint_pregame(surface, &self.control);
    }

    fn request_game(&mut self, mode: &str) {
        info!("Requested {} game", mode);
        self.waiting_left = WAITING_FRAMES;
        self.phase = ScreenPhase::WaitingForGame;
    }

    fn advance_waiting<S: Surface>(&mut self, surface: &mut S) {
        self.display
            .paint_waiting_for_game(surface, &self.engine, &self.control);
        self.waiting_left = self.waiting_left.saturating_sub(1);
        if self.waiting_left == 0 {
            info!("Game starting");
            self.phase = ScreenPhase::Playing;
        }
    }

    fn advance_playing<S: Surface>(&mut self, surface: &mut S, input: Option<PlayerInput>) {
        match input {
            Some(PlayerInput::Move(direction)) => {
                self.facing = direction;
                let (dx, dy) = direction.unit();
                self.engine.move_player(dx, dy);
            }
            Some(PlayerInput::Fire) => {
                let (dx, dy) = self.facing.unit();
                self.engine.fire_missile(dx, dy);
            }
            Some(PlayerInput::ToggleInfo) => self.control.toggle_info(),
            Some(PlayerInput::DebugExperience) => self.engine.award_experience(NPC_HEALTH),
            _ => {}
        }

        for event in self.engine.tick() {
            self.display
                .process_event(surface, &self.engine, &self.control, &event);
        }

        if self.match_is_over() {
            info!("Match over");
            self.phase = ScreenPhase::GameOver;
        }

        match self.phase {
            ScreenPhase::GameOver => {
                self.display
                    .paint_game_over(surface, &self.engine, &self.control)
            }
            _ => self.display.paint_game(surface, &self.engine, &self.control),
        }
    }

    fn advance_game_over<S: Surface>(&mut self, surface: &mut S, input: Option<PlayerInput>) {
        if input == Some(PlayerInput::NewGame) {
            self.start_new_match();
            self.display.paint_game(surface, &self.engine, &self.control);
            return;
        }
        self.display
            .paint_game_over(surface, &self.engine, &self.control);
    }

    /// A match ends when either player avatar dies.
    fn match_is_over(&self) -> bool {
        let dead = |oid| {
            self.engine
                .object(oid)
                .is_some_and(|obj: &GameObject| !obj.is_alive())
        };
        self.engine.player_oid().is_some_and(dead) || self.engine.opponent_oid().is_some_and(dead)
    }

    fn start_new_match(&mut self) {
        self.seed = self.seed.wrapping_add(1);
        info!("Starting new match with seed {}", self.seed);
        self.engine = LocalEngine::demo_match(self.seed, self.arena_width, self.arena_height);
        self.display = Display::new();
        self.facing = Direction::Right;
        self.phase = ScreenPhase::Playing;
    }
}
