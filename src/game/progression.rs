//! # Progression Ladder
//!
//! The 15-tier experience ladder. Thresholds sit at whole multiples of
//! [`crate::config::NPC_HEALTH`], so each tier corresponds roughly to one more
//! NPC's worth of experience. The engine evaluates the ladder during its tick
//! and applies capability changes itself; the view only shows the messages.

use crate::config::NPC_HEALTH;

/// A capability change granted by an unlock tier.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Capability {
    PlayerSpeedMedium,
    PlayerSpeedFast,
    MissileRangeMedium,
    MissileRangeLong,
    MissilePowerMedium,
    MissilePowerHigh,
}

/// One rung of the experience ladder, lowest to highest.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum UnlockTier {
    SpeedMedium,
    MissileManaMedium,
    RangeMedium,
    MoveManaMedium,
    PowerMedium,
    MoveRechargeMedium,
    MissileRechargeMedium,
    SpeedFast,
    MissileManaHigh,
    RangeLong,
    MoveManaHigh,
    PowerHigh,
    MoveRechargeFast,
    MissileRechargeFast,
    MaxPower,
}

impl UnlockTier {
    /// All tiers in ascending order.
    pub const ALL: [UnlockTier; 15] = [
        UnlockTier::SpeedMedium,
        UnlockTier::MissileManaMedium,
        UnlockTier::RangeMedium,
        UnlockTier::MoveManaMedium,
        UnlockTier::PowerMedium,
        UnlockTier::MoveRechargeMedium,
        UnlockTier::MissileRechargeMedium,
        UnlockTier::SpeedFast,
        UnlockTier::MissileManaHigh,
        UnlockTier::RangeLong,
        UnlockTier::MoveManaHigh,
        UnlockTier::PowerHigh,
        UnlockTier::MoveRechargeFast,
        UnlockTier::MissileRechargeFast,
        UnlockTier::MaxPower,
    ];

    /// 1-based position on the ladder.
    pub fn rank(self) -> u32 {
        match self {
            UnlockTier::SpeedMedium => 1,
            UnlockTier::MissileManaMedium => 2,
            UnlockTier::RangeMedium => 3,
            UnlockTier::MoveManaMedium => 4,
            UnlockTier::PowerMedium => 5,
            UnlockTier::MoveRechargeMedium => 6,
            UnlockTier::MissileRechargeMedium => 7,
            UnlockTier::SpeedFast => 8,
            UnlockTier::MissileManaHigh => 9,
            UnlockTier::RangeLong => 10,
            UnlockTier::MoveManaHigh => 11,
            UnlockTier::PowerHigh => 12,
            UnlockTier::MoveRechargeFast => 13,
            UnlockTier::MissileRechargeFast => 14,
            UnlockTier::MaxPower => 15,
        }
    }

    /// Tier for a given 1-based rank.
    pub fn from_rank(rank: u32) -> Option<UnlockTier> {
        Self::ALL.get(rank.checked_sub(1)? as usize).copied()
    }

    /// Experience required to reach this tier.
    pub fn threshold(self) -> f32 {
        self.rank() as f32 * NPC_HEALTH
    }

    /// Text shown to the player when this tier is reached.
    pub fn message(self) -> &'static str {
        match self {
            UnlockTier::SpeedMedium => "Medium Speed UNLOCKED!!",
            UnlockTier::MissileManaMedium => "Medium Missile Mana UNLOCKED!!",
            UnlockTier::RangeMedium => "Medium Range UNLOCKED!!",
            UnlockTier::MoveManaMedium => "Medium Move Mana UNLOCKED!!",
            UnlockTier::PowerMedium => "Medium Missile Power UNLOCKED!!",
            UnlockTier::MoveRechargeMedium => "Medium Recharge Mana UNLOCKED!!",
            UnlockTier::MissileRechargeMedium => "Medium Missile Recharge Mana UNLOCKED!!",
            UnlockTier::SpeedFast => "Fast Speed UNLOCKED!!",
            UnlockTier::MissileManaHigh => "High Missile Mana UNLOCKED!!",
            UnlockTier::RangeLong => "Long Range UNLOCKED!!",
            UnlockTier::MoveManaHigh => "High Move Mana UNLOCKED!!",
            UnlockTier::PowerHigh => "High Missile Power UNLOCKED!!",
            UnlockTier::MoveRechargeFast => "Fast Mana Recharge UNLOCKED!!",
            UnlockTier::MissileRechargeFast => "Fast Missile Recharge UNLOCKED!!",
            UnlockTier::MaxPower => "MAX POWER!!!!",
        }
    }

    /// Capability change this tier grants, if any. Mana-capacity and recharge
    /// tiers are message-only.
    pub fn capability(self) -> Option<Capability> {
        match self {
            UnlockTier::SpeedMedium => Some(Capability::PlayerSpeedMedium),
            UnlockTier::RangeMedium => Some(Capability::MissileRangeMedium),
            UnlockTier::PowerMedium => Some(Capability::MissilePowerMedium),
            UnlockTier::SpeedFast => Some(Capability::PlayerSpeedFast),
            UnlockTier::RangeLong => Some(Capability::MissileRangeLong),
            UnlockTier::PowerHigh => Some(Capability::MissilePowerHigh),
            UnlockTier::MissileManaMedium
            | UnlockTier::MoveManaMedium
            | UnlockTier::MoveRechargeMedium
            | UnlockTier::MissileRechargeMedium
            | UnlockTier::MissileManaHigh
            | UnlockTier::MoveManaHigh
            | UnlockTier::MoveRechargeFast
            | UnlockTier::MissileRechargeFast
            | UnlockTier::MaxPower => None,
        }
    }
}

/// Selects the display tier for an experience total: the highest tier whose
/// threshold is met, defaulting to the lowest tier when none is.
pub fn tier_for_experience(experience: f32) -> UnlockTier {
    for tier in UnlockTier::ALL.iter().rev() {
        if experience >= tier.threshold() {
            return *tier;
        }
    }
    UnlockTier::SpeedMedium
}

/// Highest tier actually reached, if any. Unlike [`tier_for_experience`] this
/// does not default below the first threshold; the engine uses it to decide
/// what to grant.
pub fn reached_tier(experience: f32) -> Option<UnlockTier> {
    UnlockTier::ALL
        .iter()
        .rev()
        .find(|tier| experience >= tier.threshold())
        .copied()
}
