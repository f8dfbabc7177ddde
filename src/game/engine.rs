//! # Engine Surface
//!
//! [`GameEngine`] is the read-only view the renderer gets of a match.
//! [`LocalEngine`] is a minimal in-process implementation: it owns the object
//! map, regenerates mana, moves missiles, and evaluates the unlock ladder each
//! tick. The authoritative simulation (networking, collision, combat
//! resolution) lives outside this crate and drives the same surface.

use std::collections::HashMap;

use log::{debug, info};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

use crate::config::{
    MISSILE_MANA_COST, MISSILE_MANA_REGEN, MOVE_MANA_COST, MOVE_MANA_REGEN, NPC_HEALTH,
};
use crate::game::{
    reached_tier, Body, Capability, GameEvent, GameObject, Missile, Npc, ObjectId, Player,
    PowerLevel, SpeedTier, UnlockTier, Wall,
};

/// Upper bound on a player's move mana pool.
const MOVE_MANA_MAX: f32 = 10.0;

/// Upper bound on a player's missile mana pool.
const MISSILE_MANA_MAX: f32 = 5.0;

/// Pixels a missile travels per tick.
const MISSILE_SPEED: f32 = 6.0;

/// Read-only match state as exposed to the renderer.
pub trait GameEngine {
    /// All objects in the match, keyed by id. Iteration order is unspecified.
    fn objects(&self) -> &HashMap<ObjectId, GameObject>;

    /// Looks up one object by id.
    fn object(&self, oid: ObjectId) -> Option<&GameObject>;

    /// Id of the locally controlled player, if one exists.
    fn player_oid(&self) -> Option<ObjectId>;

    /// Id of the opponent player, if one exists.
    fn opponent_oid(&self) -> Option<ObjectId>;

    /// Display name of the local player.
    fn player_name(&self) -> &str;

    /// Display name of the opponent.
    fn opponent_name(&self) -> &str;
}

/// In-process engine used for the demo match and for tests.
pub struct LocalEngine {
    objects: HashMap<ObjectId, GameObject>,
    next_id: u64,
    player_oid: Option<ObjectId>,
    opponent_oid: Option<ObjectId>,
    player_name: String,
    opponent_name: String,
    /// Highest ladder rank already granted to the local player.
    granted_rank: u32,
    /// Per-missile velocity and remaining range, engine bookkeeping only.
    missile_flight: HashMap<ObjectId, MissileFlight>,
    arena_width: f32,
    arena_height: f32,
}

struct MissileFlight {
    vx: f32,
    vy: f32,
    remaining: f32,
}

impl LocalEngine {
    /// Creates an empty engine for an arena of the given size.
    pub fn new(arena_width: f32, arena_height: f32) -> Self {
        Self {
            objects: HashMap::new(),
            next_id: 1,
            player_oid: None,
            opponent_oid: None,
            player_name: "Me".to_string(),
            opponent_name: "Opponent".to_string(),
            granted_rank: 0,
            missile_flight: HashMap::new(),
            arena_width,
            arena_height,
        }
    }

    /// Builds a reproducible demo match: border walls, a few NPCs at jittered
    /// positions, the local player, and one opponent.
    pub fn demo_match(seed: u64, arena_width: f32, arena_height: f32) -> Self {
        let mut engine = Self::new(arena_width, arena_height);
        let mut rng = StdRng::seed_from_u64(seed);

        info!("Building demo match with seed {}", seed);

        let wall = 24.0;
        let segments = (arena_width / wall) as u32;
        for i in 0..segments {
            let x = i as f32 * wall;
            engine.add_wall(Body::new(x, 0.0, wall, wall));
            engine.add_wall(Body::new(x, arena_height - wall, wall, wall));
        }

        for _ in 0..4 {
            let x = rng.gen_range(wall * 2.0..arena_width - wall * 3.0);
            let y = rng.gen_range(wall * 2.0..arena_height - wall * 3.0);
            engine.add_npc(Body::new(x, y, 32.0, 32.0));
        }

        let me = engine.add_player(
            Body::new(arena_width * 0.25, arena_height * 0.5, 32.0, 32.0),
            100.0,
        );
        let them = engine.add_player(
            Body::new(arena_width * 0.75, arena_height * 0.5, 32.0, 32.0),
            100.0,
        );
        engine.player_oid = Some(me);
        engine.opponent_oid = Some(them);
        engine
    }

    /// Sets the display names for the status bar.
    pub fn set_names(&mut self, me: impl Into<String>, opponent: impl Into<String>) {
        self.player_name = me.into();
        self.opponent_name = opponent.into();
    }

    fn allocate(&mut self, obj: GameObject) -> ObjectId {
        let oid = ObjectId(self.next_id);
        self.next_id += 1;
        self.objects.insert(oid, obj);
        oid
    }

    /// Adds a wall segment.
    pub fn add_wall(&mut self, body: Body) -> ObjectId {
        self.allocate(GameObject::Wall(Wall { body }))
    }

    /// Adds a full-health NPC.
    pub fn add_npc(&mut self, body: Body) -> ObjectId {
        self.allocate(GameObject::Npc(Npc {
            body,
            health: NPC_HEALTH,
            max_health: NPC_HEALTH,
            alive: true,
        }))
    }

    /// Adds a player avatar.
    pub fn add_player(&mut self, body: Body, max_health: f32) -> ObjectId {
        self.allocate(GameObject::Player(Player::new(body, max_health)))
    }

    /// Marks an object as the locally controlled player.
    pub fn set_player_oid(&mut self, oid: ObjectId) {
        self.player_oid = Some(oid);
    }

    /// Marks an object as the opponent player.
    pub fn set_opponent_oid(&mut self, oid: ObjectId) {
        self.opponent_oid = Some(oid);
    }

    fn local_player_mut(&mut self) -> Option<&mut Player> {
        let oid = self.player_oid?;
        match self.objects.get_mut(&oid) {
            Some(GameObject::Player(p)) => Some(p),
            _ => None,
        }
    }

    /// Moves the local player one step in the given unit direction, if it is
    /// alive and has the mana. The step length follows the unlocked speed
    /// tier, and the avatar stays inside the arena.
    pub fn move_player(&mut self, dx: f32, dy: f32) {
        let (arena_w, arena_h) = (self.arena_width, self.arena_height);
        let Some(player) = self.local_player_mut() else {
            return;
        };
        if !player.alive || player.move_mana < MOVE_MANA_COST {
            return;
        }
        player.move_mana -= MOVE_MANA_COST;
        let step = player.speed.step();
        player.body.x = (player.body.x + dx * step).clamp(0.0, arena_w - player.body.w);
        player.body.y = (player.body.y + dy * step).clamp(0.0, arena_h - player.body.h);
    }

    /// Fires a missile from the local player in the given unit direction, if
    /// it is alive and has the mana.
    pub fn fire_missile(&mut self, dx: f32, dy: f32) {
        let Some(player) = self.local_player_mut() else {
            return;
        };
        if !player.alive || player.missile_mana < MISSILE_MANA_COST {
            return;
        }
        player.missile_mana -= MISSILE_MANA_COST;
        let (cx, cy) = player.body.center();
        let range = player.missile_range;

        let oid = self.allocate(GameObject::Missile(Missile {
            body: Body::new(cx - 4.0, cy - 4.0, 8.0, 8.0),
            alive: true,
        }));
        self.missile_flight.insert(
            oid,
            MissileFlight {
                vx: dx * MISSILE_SPEED,
                vy: dy * MISSILE_SPEED,
                remaining: range,
            },
        );
        debug!("Missile {} fired, range {}", oid, range);
    }

    /// Awards experience to the local player. In a networked match the server
    /// does this on kills; the demo binds it to a debug key.
    pub fn award_experience(&mut self, amount: f32) {
        if let Some(player) = self.local_player_mut() {
            player.experience += amount;
        }
    }

    /// Applies damage to an object, marking it dead at zero health.
    pub fn damage_object(&mut self, oid: ObjectId, amount: f32) -> Option<GameEvent> {
        match self.objects.get_mut(&oid)? {
            GameObject::Npc(npc) => {
                npc.health = (npc.health - amount).max(0.0);
                if npc.alive && npc.health <= 0.0 {
                    npc.alive = false;
                    return Some(GameEvent::ObjectDestroyed { oid });
                }
            }
            GameObject::Player(player) => {
                player.health = (player.health - amount).max(0.0);
                if player.alive && player.health <= 0.0 {
                    player.alive = false;
                    return Some(GameEvent::ObjectDestroyed { oid });
                }
            }
            GameObject::Wall(_) | GameObject::Missile(_) => {}
        }
        None
    }

    /// Advances the engine one tick: mana regeneration, missile flight, and
    /// the unlock ladder. Returns the events this tick produced.
    pub fn tick(&mut self) -> Vec<GameEvent> {
        let mut events = Vec::new();

        for obj in self.objects.values_mut() {
            if let GameObject::Player(player) = obj {
                if player.alive {
                    player.move_mana = (player.move_mana + MOVE_MANA_REGEN).min(MOVE_MANA_MAX);
                    player.missile_mana =
                        (player.missile_mana + MISSILE_MANA_REGEN).min(MISSILE_MANA_MAX);
                }
            }
        }

        self.advance_missiles(&mut events);
        self.evaluate_progression(&mut events);
        events
    }

    fn advance_missiles(&mut self, events: &mut Vec<GameEvent>) {
        let mut expired = Vec::new();
        for (oid, flight) in self.missile_flight.iter_mut() {
            let Some(GameObject::Missile(missile)) = self.objects.get_mut(oid) else {
                expired.push(*oid);
                continue;
            };
            if !missile.alive {
                expired.push(*oid);
                continue;
            }
            missile.body.x += flight.vx;
            missile.body.y += flight.vy;
            flight.remaining -= MISSILE_SPEED;

            let out_of_bounds = missile.body.x < -missile.body.w
                || missile.body.y < -missile.body.h
                || missile.body.x > self.arena_width
                || missile.body.y > self.arena_height;
            if flight.remaining <= 0.0 || out_of_bounds {
                missile.alive = false;
                expired.push(*oid);
                events.push(GameEvent::ObjectDestroyed { oid: *oid });
            }
        }
        for oid in expired {
            self.missile_flight.remove(&oid);
            // Spent missiles are dropped from the object map entirely.
            if matches!(self.objects.get(&oid), Some(GameObject::Missile(m)) if !m.alive) {
                self.objects.remove(&oid);
            }
        }
    }

    /// Grants every newly crossed ladder tier, lowest first, emitting one
    /// event per tier.
    fn evaluate_progression(&mut self, events: &mut Vec<GameEvent>) {
        let Some(oid) = self.player_oid else {
            return;
        };
        let Some(experience) = self
            .objects
            .get(&oid)
            .and_then(GameObject::as_player)
            .map(|p| p.experience)
        else {
            return;
        };
        let Some(reached) = reached_tier(experience) else {
            return;
        };

        while self.granted_rank < reached.rank() {
            let rank = self.granted_rank + 1;
            // Ranks are dense in 1..=15, so this lookup cannot fail here.
            let Some(tier) = UnlockTier::from_rank(rank) else {
                break;
            };
            if let Some(capability) = tier.capability() {
                self.apply_capability(capability);
            }
            info!("Unlocked tier {}: {}", rank, tier.message());
            events.push(GameEvent::CapabilityUnlocked { tier });
            self.granted_rank = rank;
        }
    }

    fn apply_capability(&mut self, capability: Capability) {
        let Some(player) = self.local_player_mut() else {
            return;
        };
        match capability {
            Capability::PlayerSpeedMedium => player.speed = SpeedTier::Medium,
            Capability::PlayerSpeedFast => player.speed = SpeedTier::Fast,
            Capability::MissileRangeMedium => player.missile_range = 160.0,
            Capability::MissileRangeLong => player.missile_range = 240.0,
            Capability::MissilePowerMedium => player.missile_power = PowerLevel::Medium,
            Capability::MissilePowerHigh => player.missile_power = PowerLevel::High,
        }
    }
}

impl GameEngine for LocalEngine {
    fn objects(&self) -> &HashMap<ObjectId, GameObject> {
        &self.objects
    }

    fn object(&self, oid: ObjectId) -> Option<&GameObject> {
        self.objects.get(&oid)
    }

    fn player_oid(&self) -> Option<ObjectId> {
        self.player_oid
    }

    fn opponent_oid(&self) -> Option<ObjectId> {
        self.opponent_oid
    }

    fn player_name(&self) -> &str {
        &self.player_name
    }

    fn opponent_name(&self) -> &str {
        &self.opponent_name
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn engine_with_player() -> LocalEngine {
        let mut engine = LocalEngine::new(800.0, 600.0);
        let oid = engine.add_player(Body::new(100.0, 100.0, 32.0, 32.0), 100.0);
        engine.set_player_oid(oid);
        engine
    }

    #[test]
    fn test_demo_match_is_reproducible() {
        let a = LocalEngine::demo_match(7, 800.0, 600.0);
        let b = LocalEngine::demo_match(7, 800.0, 600.0);
        assert_eq!(a.objects().len(), b.objects().len());
        for (oid, obj) in a.objects() {
            assert_eq!(b.object(*oid), Some(obj));
        }
        assert!(a.player_oid().is_some());
        assert!(a.opponent_oid().is_some());
    }

    #[test]
    fn test_move_costs_mana_and_respects_bounds() {
        let mut engine = engine_with_player();
        let oid = engine.player_oid().unwrap();

        let before = engine.object(oid).unwrap().as_player().unwrap().move_mana;
        engine.move_player(-1.0, 0.0);
        let player = engine.object(oid).unwrap().as_player().unwrap();
        assert_eq!(player.move_mana, before - MOVE_MANA_COST);

        // Walk into the left edge; position clamps at zero.
        for _ in 0..50 {
            engine.move_player(-1.0, 0.0);
        }
        let player = engine.object(oid).unwrap().as_player().unwrap();
        assert_eq!(player.body.x, 0.0);
    }

    #[test]
    fn test_fire_missile_spawns_and_expires() {
        let mut engine = engine_with_player();
        engine.fire_missile(1.0, 0.0);

        let missiles = engine
            .objects()
            .values()
            .filter(|o| matches!(o, GameObject::Missile(_)))
            .count();
        assert_eq!(missiles, 1);

        // Base range is 100 at 6 px/tick; the missile must be gone well
        // within 40 ticks.
        let mut destroyed = false;
        for _ in 0..40 {
            for event in engine.tick() {
                if matches!(event, GameEvent::ObjectDestroyed { .. }) {
                    destroyed = true;
                }
            }
        }
        assert!(destroyed);
        let missiles = engine
            .objects()
            .values()
            .filter(|o| matches!(o, GameObject::Missile(_)))
            .count();
        assert_eq!(missiles, 0);
    }

    #[test]
    fn test_mana_regenerates_up_to_cap() {
        let mut engine = engine_with_player();
        engine.move_player(1.0, 0.0);
        for _ in 0..10_000 {
            engine.tick();
        }
        let oid = engine.player_oid().unwrap();
        let player = engine.object(oid).unwrap().as_player().unwrap();
        assert_eq!(player.move_mana, MOVE_MANA_MAX);
        assert_eq!(player.missile_mana, MISSILE_MANA_MAX);
    }

    #[test]
    fn test_unlock_emitted_once_per_tier() {
        let mut engine = engine_with_player();
        engine.award_experience(NPC_HEALTH);

        let unlocks: Vec<_> = engine
            .tick()
            .into_iter()
            .filter_map(|e| match e {
                GameEvent::CapabilityUnlocked { tier } => Some(tier),
                _ => None,
            })
            .collect();
        assert_eq!(unlocks, vec![UnlockTier::SpeedMedium]);

        // Same experience, no new event.
        let unlocks = engine
            .tick()
            .into_iter()
            .filter(|e| matches!(e, GameEvent::CapabilityUnlocked { .. }))
            .count();
        assert_eq!(unlocks, 0);
    }

    #[test]
    fn test_skipping_tiers_grants_each_in_order() {
        let mut engine = engine_with_player();
        engine.award_experience(3.0 * NPC_HEALTH);

        let unlocks: Vec<_> = engine
            .tick()
            .into_iter()
            .filter_map(|e| match e {
                GameEvent::CapabilityUnlocked { tier } => Some(tier),
                _ => None,
            })
            .collect();
        assert_eq!(
            unlocks,
            vec![
                UnlockTier::SpeedMedium,
                UnlockTier::MissileManaMedium,
                UnlockTier::RangeMedium,
            ]
        );

        let oid = engine.player_oid().unwrap();
        let player = engine.object(oid).unwrap().as_player().unwrap();
        assert_eq!(player.speed, SpeedTier::Medium);
        assert_eq!(player.missile_range, 160.0);
    }

    #[test]
    fn test_no_unlock_below_first_threshold() {
        let mut engine = engine_with_player();
        engine.award_experience(NPC_HEALTH - 1.0);
        assert!(engine.tick().is_empty());

        let oid = engine.player_oid().unwrap();
        let player = engine.object(oid).unwrap().as_player().unwrap();
        assert_eq!(player.speed, SpeedTier::Slow);
    }

    #[test]
    fn test_damage_kills_at_zero() {
        let mut engine = LocalEngine::new(800.0, 600.0);
        let oid = engine.add_npc(Body::new(50.0, 50.0, 32.0, 32.0));

        assert!(engine.damage_object(oid, NPC_HEALTH / 2.0).is_none());
        let event = engine.damage_object(oid, NPC_HEALTH);
        assert_eq!(event, Some(GameEvent::ObjectDestroyed { oid }));
        assert!(!engine.object(oid).unwrap().is_alive());
    }
}
