//! # Game Objects
//!
//! The object model the engine exposes to the view: a closed set of kinds
//! (wall, NPC, missile, player) with a shared screen-space body.

/// Identifier used to look up a specific game object.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ObjectId(pub u64);

impl std::fmt::Display for ObjectId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// Screen-space footprint of an object. Origin is the top-left of the screen,
/// x increases to the right and y increases downward.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Body {
    pub x: f32,
    pub y: f32,
    pub w: f32,
    pub h: f32,
}

impl Body {
    /// Creates a body at the given position with the given size.
    pub fn new(x: f32, y: f32, w: f32, h: f32) -> Self {
        Self { x, y, w, h }
    }

    /// Center point of the body.
    pub fn center(&self) -> (f32, f32) {
        (self.x + self.w / 2.0, self.y + self.h / 2.0)
    }
}

/// A static wall segment.
#[derive(Debug, Clone, PartialEq)]
pub struct Wall {
    pub body: Body,
}

/// A non-player character. NPCs have health and can die.
#[derive(Debug, Clone, PartialEq)]
pub struct Npc {
    pub body: Body,
    pub health: f32,
    pub max_health: f32,
    pub alive: bool,
}

/// A missile in flight.
#[derive(Debug, Clone, PartialEq)]
pub struct Missile {
    pub body: Body,
    pub alive: bool,
}

/// Missile damage level, raised through the unlock ladder.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PowerLevel {
    Low,
    Medium,
    High,
}

/// Player movement speed, raised through the unlock ladder.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SpeedTier {
    Slow,
    Medium,
    Fast,
}

impl SpeedTier {
    /// Pixels moved per step at this tier.
    pub fn step(self) -> f32 {
        match self {
            SpeedTier::Slow => 8.0,
            SpeedTier::Medium => 12.0,
            SpeedTier::Fast => 18.0,
        }
    }
}

/// A player-controlled avatar, local or remote.
#[derive(Debug, Clone, PartialEq)]
pub struct Player {
    pub body: Body,
    pub health: f32,
    pub max_health: f32,
    pub alive: bool,
    pub experience: f32,
    pub move_mana: f32,
    pub missile_mana: f32,
    pub missile_range: f32,
    pub missile_power: PowerLevel,
    pub speed: SpeedTier,
}

impl Player {
    /// Creates a full-health player with base capabilities.
    pub fn new(body: Body, max_health: f32) -> Self {
        Self {
            body,
            health: max_health,
            max_health,
            alive: true,
            experience: 0.0,
            move_mana: 10.0,
            missile_mana: 5.0,
            missile_range: 100.0,
            missile_power: PowerLevel::Low,
            speed: SpeedTier::Slow,
        }
    }
}

/// One object in the match, tagged by kind.
#[derive(Debug, Clone, PartialEq)]
pub enum GameObject {
    Wall(Wall),
    Npc(Npc),
    Missile(Missile),
    Player(Player),
}

impl GameObject {
    /// Screen-space footprint, regardless of kind.
    pub fn body(&self) -> Body {
        match self {
            GameObject::Wall(w) => w.body,
            GameObject::Npc(n) => n.body,
            GameObject::Missile(m) => m.body,
            GameObject::Player(p) => p.body,
        }
    }

    /// Whether the object is still live. Walls never die.
    pub fn is_alive(&self) -> bool {
        match self {
            GameObject::Wall(_) => true,
            GameObject::Npc(n) => n.alive,
            GameObject::Missile(m) => m.alive,
            GameObject::Player(p) => p.alive,
        }
    }

    /// The player payload, if this object is a player.
    pub fn as_player(&self) -> Option<&Player> {
        match self {
            GameObject::Player(p) => Some(p),
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_body_center() {
        let body = Body::new(10.0, 20.0, 40.0, 60.0);
        assert_eq!(body.center(), (30.0, 50.0));
    }

    #[test]
    fn test_walls_are_always_alive() {
        let wall = GameObject::Wall(Wall {
            body: Body::new(0.0, 0.0, 32.0, 32.0),
        });
        assert!(wall.is_alive());
    }

    #[test]
    fn test_dead_npc_reports_not_alive() {
        let npc = GameObject::Npc(Npc {
            body: Body::new(0.0, 0.0, 32.0, 32.0),
            health: 0.0,
            max_health: 50.0,
            alive: false,
        });
        assert!(!npc.is_alive());
    }

    #[test]
    fn test_as_player_only_matches_players() {
        let player = GameObject::Player(Player::new(Body::new(0.0, 0.0, 32.0, 32.0), 100.0));
        assert!(player.as_player().is_some());

        let missile = GameObject::Missile(Missile {
            body: Body::new(0.0, 0.0, 8.0, 8.0),
            alive: true,
        });
        assert!(missile.as_player().is_none());
    }
}
