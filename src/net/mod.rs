//! Wire formats for client-server play
//!
//! Actions arrive as tagged JSON objects whose tag matches the client
//! event suffix (`capture`, `move`, `buildUnit`, ...). Snapshots carry
//! the full board as record lines so a client can always rebuild state
//! from scratch.

use crate::board::Board;
use crate::core::error::Result;
use crate::core::types::{PlayerId, StructureKind, UnitKind};
use crate::engine::GameAction;
use crate::hex::OffsetCoord;
use serde::{Deserialize, Serialize};

/// A player action as it appears on the wire
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "camelCase")]
pub enum WireAction {
    /// Claim a tile for a new owner
    #[serde(rename_all = "camelCase")]
    Capture { row: i32, col: i32, owner: PlayerId },
    /// Move a unit between owned tiles
    #[serde(rename_all = "camelCase")]
    Move {
        from: OffsetCoord,
        to: OffsetCoord,
        unit_type: UnitKind,
    },
    /// Strike a defended tile from range
    #[serde(rename_all = "camelCase")]
    Attack {
        attacker: OffsetCoord,
        target: OffsetCoord,
        attacker_type: UnitKind,
    },
    /// Place a fresh unit on an owned tile
    #[serde(rename_all = "camelCase")]
    BuildUnit {
        row: i32,
        col: i32,
        unit_type: UnitKind,
    },
    /// Raise a structure on an owned tile
    #[serde(rename_all = "camelCase")]
    BuildStructure {
        row: i32,
        col: i32,
        building_type: StructureKind,
    },
}

impl WireAction {
    /// Translate into the engine's action form
    pub fn to_game_action(&self) -> GameAction {
        match *self {
            WireAction::Capture { row, col, owner } => GameAction::Capture {
                target: OffsetCoord::new(row, col),
                claimant: owner,
            },
            WireAction::Move {
                from,
                to,
                unit_type,
            } => GameAction::Move {
                from,
                to,
                unit_kind: unit_type,
            },
            WireAction::Attack {
                attacker,
                target,
                attacker_type,
            } => GameAction::Attack {
                attacker,
                target,
                attacker_kind: attacker_type,
            },
            WireAction::BuildUnit {
                row,
                col,
                unit_type,
            } => GameAction::BuildUnit {
                at: OffsetCoord::new(row, col),
                kind: unit_type,
            },
            WireAction::BuildStructure {
                row,
                col,
                building_type,
            } => GameAction::BuildStructure {
                at: OffsetCoord::new(row, col),
                kind: building_type,
            },
        }
    }

    pub fn from_json(json: &str) -> Result<Self> {
        Ok(serde_json::from_str(json)?)
    }

    pub fn to_json(&self) -> Result<String> {
        Ok(serde_json::to_string(self)?)
    }
}

/// Full board state as sent to clients
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GameSnapshot {
    /// Land records in row-major order
    pub land_data: Vec<String>,
    /// Unit records in row-major order
    pub unit_data: Vec<String>,
    pub started: bool,
}

impl GameSnapshot {
    pub fn from_board(board: &Board, started: bool) -> Self {
        Self {
            land_data: board.land_records().iter().map(|r| r.to_string()).collect(),
            unit_data: board.unit_records().iter().map(|r| r.to_string()).collect(),
            started,
        }
    }

    pub fn from_json(json: &str) -> Result<Self> {
        Ok(serde_json::from_str(json)?)
    }

    pub fn to_json(&self) -> Result<String> {
        Ok(serde_json::to_string(self)?)
    }
}
