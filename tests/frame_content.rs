//! Frame-content tests for the display, using the recording surface to
//! inspect exactly what each paint call produced.

use volley::{
    Body, ControlState, Display, DrawOp, GameEngine, LocalEngine, ObjectId, RecordingSurface,
    SpriteId,
};

const W: f32 = 800.0;
const H: f32 = 600.0;

fn empty_engine() -> LocalEngine {
    LocalEngine::new(W, H)
}

fn two_player_engine() -> (LocalEngine, ObjectId, ObjectId) {
    let mut engine = LocalEngine::new(W, H);
    let me = engine.add_player(Body::new(100.0, 100.0, 32.0, 32.0), 100.0);
    let them = engine.add_player(Body::new(500.0, 100.0, 32.0, 32.0), 100.0);
    engine.set_player_oid(me);
    engine.set_opponent_oid(them);
    (engine, me, them)
}

#[test]
fn empty_engine_paints_background_only() {
    let mut display = Display::new();
    let engine = empty_engine();
    let mut control = ControlState::default();
    control.show_info = false;

    let mut surface = RecordingSurface::new(W, H);
    display.paint_game(&mut surface, &engine, &control);

    assert_eq!(surface.ops.len(), 1);
    assert!(matches!(surface.ops[0], DrawOp::FillRect { .. }));
}

#[test]
fn show_info_off_suppresses_status_text() {
    let mut display = Display::new();
    let (engine, _, _) = two_player_engine();
    let mut control = ControlState::default();
    control.show_info = false;

    let mut surface = RecordingSurface::new(W, H);
    display.paint_game(&mut surface, &engine, &control);

    assert!(!surface
        .ops
        .iter()
        .any(|op| matches!(op, DrawOp::TextLeft { .. })));
}

#[test]
fn show_info_on_draws_both_status_lines() {
    let mut display = Display::new();
    let (engine, _, _) = two_player_engine();
    let control = ControlState::default();

    let mut surface = RecordingSurface::new(W, H);
    display.paint_game(&mut surface, &engine, &control);

    let texts = surface.texts();
    assert!(texts.iter().any(|t| t.starts_with("Me:")));
    assert!(texts.iter().any(|t| t.starts_with("Opponent:")));
}

#[test]
fn status_lines_carry_player_stats() {
    let mut display = Display::new();
    let (mut engine, _, _) = two_player_engine();
    engine.set_names("Ada", "Grace");
    let control = ControlState::default();

    let mut surface = RecordingSurface::new(W, H);
    display.paint_game(&mut surface, &engine, &control);

    let texts = surface.texts();
    let me_line = texts.iter().find(|t| t.starts_with("Me:")).unwrap();
    assert!(me_line.contains("Ada"));
    assert!(me_line.contains("HP: 100.0"));
    assert!(me_line.contains("XP: 0.0"));

    let opp_line = texts.iter().find(|t| t.starts_with("Opponent:")).unwrap();
    assert!(opp_line.contains("Grace"));
}

#[test]
fn local_player_uses_control_sprite_others_use_opponent_sprite() {
    let mut display = Display::new();
    let (engine, me, them) = two_player_engine();
    let control = ControlState::default();

    let mut surface = RecordingSurface::new(W, H);
    display.paint_game(&mut surface, &engine, &control);

    let sprites = surface.sprites();
    let players: Vec<_> = sprites
        .iter()
        .filter(|(s, _)| *s == SpriteId::Player)
        .collect();
    let opponents: Vec<_> = sprites
        .iter()
        .filter(|(s, _)| *s == SpriteId::Opponent)
        .collect();
    assert_eq!(players.len(), 1);
    assert_eq!(opponents.len(), 1);

    let my_body = engine.object(me).unwrap().body();
    let their_body = engine.object(them).unwrap().body();
    assert_eq!(players[0].1.x, my_body.x);
    assert_eq!(opponents[0].1.x, their_body.x);
}

#[test]
fn game_over_is_a_superset_of_the_game_frame() {
    let (engine, _, _) = two_player_engine();
    let control = ControlState::default();

    let mut game_surface = RecordingSurface::new(W, H);
    Display::new().paint_game(&mut game_surface, &engine, &control);

    let mut over_surface = RecordingSurface::new(W, H);
    Display::new().paint_game_over(&mut over_surface, &engine, &control);

    // Same frame plus exactly one centered message on top.
    assert_eq!(over_surface.ops.len(), game_surface.ops.len() + 1);
    match over_surface.ops.last().unwrap() {
        DrawOp::TextCenter { text, x, y, .. } => {
            assert_eq!(text, "Game Over");
            assert_eq!(*x, W / 2.0);
            assert_eq!(*y, H / 2.0);
        }
        other => panic!("expected a centered message, got {:?}", other),
    }

    let mut game_ops: Vec<String> = game_surface.ops.iter().map(|op| format!("{:?}", op)).collect();
    let mut over_ops: Vec<String> = over_surface.ops[..game_surface.ops.len()]
        .iter()
        .map(|op| format!("{:?}", op))
        .collect();
    game_ops.sort();
    over_ops.sort();
    assert_eq!(game_ops, over_ops);
}

#[test]
fn background_override_from_control_is_used() {
    let mut display = Display::new();
    let engine = empty_engine();
    let mut control = ControlState::default();
    control.show_info = false;
    control.background_color = Some([10, 20, 30]);

    let mut surface = RecordingSurface::new(W, H);
    display.paint_game(&mut surface, &engine, &control);

    match &surface.ops[0] {
        DrawOp::FillRect { color, .. } => {
            assert!((color.r - 10.0 / 255.0).abs() < 1e-6);
            assert!((color.g - 20.0 / 255.0).abs() < 1e-6);
            assert!((color.b - 30.0 / 255.0).abs() < 1e-6);
        }
        other => panic!("expected background fill, got {:?}", other),
    }
}

#[test]
fn pregame_and_waiting_screens_are_text_only() {
    let display = Display::new();
    let engine = empty_engine();
    let control = ControlState::default();

    let mut surface = RecordingSurface::new(W, H);
    display.paint_pregame(&mut surface, &control);
    assert!(matches!(surface.ops[0], DrawOp::FillRect { .. }));
    assert!(surface.sprites().is_empty());
    assert!(surface.texts().len() > 3);

    let mut surface = RecordingSurface::new(W, H);
    display.paint_waiting_for_game(&mut surface, &engine, &control);
    assert!(surface.sprites().is_empty());
    assert_eq!(surface.texts(), vec!["Loading Game..."]);
}

#[test]
fn walls_npcs_and_missiles_each_get_their_sprite() {
    let mut display = Display::new();
    let mut engine = LocalEngine::new(W, H);
    engine.add_wall(Body::new(0.0, 0.0, 24.0, 24.0));
    engine.add_npc(Body::new(200.0, 200.0, 32.0, 32.0));
    let shooter = engine.add_player(Body::new(100.0, 100.0, 32.0, 32.0), 100.0);
    engine.set_player_oid(shooter);
    engine.fire_missile(1.0, 0.0);

    let control = ControlState::default();
    let mut surface = RecordingSurface::new(W, H);
    display.paint_game(&mut surface, &engine, &control);

    let sprites: Vec<_> = surface.sprites().iter().map(|(s, _)| *s).collect();
    assert!(sprites.contains(&SpriteId::Wall));
    assert!(sprites.contains(&SpriteId::Npc));
    assert!(sprites.contains(&SpriteId::Missile));
    assert!(sprites.contains(&SpriteId::Player));
}
