//! Core identifier and vocabulary types shared across the crate

use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Owner of land tiles and units. Player 0 is the neutral faction.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct PlayerId(pub u32);

impl PlayerId {
    /// The neutral faction: owns unclaimed land, never acts.
    pub const NEUTRAL: PlayerId = PlayerId(0);

    pub fn new(id: u32) -> Self {
        Self(id)
    }

    pub fn is_neutral(&self) -> bool {
        *self == Self::NEUTRAL
    }
}

/// Unique identifier for a connected client session
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ClientId(pub Uuid);

impl ClientId {
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }
}

impl Default for ClientId {
    fn default() -> Self {
        Self::new()
    }
}

/// Unit roster. Powers are fixed per kind.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum UnitKind {
    Peasant,
    Spearman,
    Swordsman,
    Knight,
}

impl UnitKind {
    /// Combat power used by both attack and capture adjudication
    pub fn power(&self) -> u32 {
        match self {
            UnitKind::Peasant => 1,
            UnitKind::Spearman => 2,
            UnitKind::Swordsman => 3,
            UnitKind::Knight => 4,
        }
    }

    /// Token used in text unit records and wire payloads
    pub fn token(&self) -> &'static str {
        match self {
            UnitKind::Peasant => "peasant",
            UnitKind::Spearman => "spearman",
            UnitKind::Swordsman => "swordsman",
            UnitKind::Knight => "knight",
        }
    }

    pub fn from_token(token: &str) -> Option<Self> {
        match token {
            "peasant" => Some(UnitKind::Peasant),
            "spearman" => Some(UnitKind::Spearman),
            "swordsman" => Some(UnitKind::Swordsman),
            "knight" => Some(UnitKind::Knight),
            _ => None,
        }
    }
}

/// Structures that can occupy a land tile. One per tile at most.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum StructureKind {
    House,
    Tower,
    StrongTower,
    Castle,
}

impl StructureKind {
    /// Token used in text land records and wire payloads
    pub fn token(&self) -> &'static str {
        match self {
            StructureKind::House => "house",
            StructureKind::Tower => "tower",
            StructureKind::StrongTower => "strong_tower",
            StructureKind::Castle => "castle",
        }
    }

    pub fn from_token(token: &str) -> Option<Self> {
        match token {
            "house" => Some(StructureKind::House),
            "tower" => Some(StructureKind::Tower),
            "strong_tower" => Some(StructureKind::StrongTower),
            "castle" => Some(StructureKind::Castle),
            _ => None,
        }
    }
}
