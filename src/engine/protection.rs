//! Defensive protection values
//!
//! A tile is protected by the structure standing on it and by
//! structures and units on same-owner neighbor tiles. A unit does not
//! protect the tile it stands on. Neutral land is protected the same
//! way, which is what makes the neutral watchtowers on the default map
//! bite.

use crate::board::Board;
use crate::core::config::RuleConfig;
use crate::hex::OffsetCoord;
use ahash::AHashMap;

/// Protection of a single tile, computed from the live board
pub fn tile_protection(board: &Board, rules: &RuleConfig, coord: OffsetCoord) -> u32 {
    let owner = match board.owner_of(coord) {
        Some(owner) => owner,
        None => return 0,
    };

    let mut protection = board
        .structure_at(coord)
        .map_or(0, |kind| rules.structure_protection(kind));

    for neighbor in coord.neighbors() {
        if board.owner_of(neighbor) != Some(owner) {
            continue;
        }
        if let Some(kind) = board.structure_at(neighbor) {
            protection = protection.max(rules.structure_protection(kind));
        }
        if let Some(unit) = board.unit_at(neighbor) {
            if unit.owner == owner {
                protection = protection.max(unit.kind.power());
            }
        }
    }
    protection
}

/// Cache of protection values, recomputed in full after each applied
/// action rather than patched incrementally
#[derive(Debug, Clone, Default)]
pub struct ProtectionMap {
    values: AHashMap<OffsetCoord, u32>,
}

impl ProtectionMap {
    pub fn new() -> Self {
        Self::default()
    }

    /// Recompute protection for every tile on the board
    pub fn recompute(&mut self, board: &Board, rules: &RuleConfig) {
        self.values.clear();
        for (coord, _) in board.tiles() {
            self.values.insert(coord, tile_protection(board, rules, coord));
        }
    }

    /// Cached protection, 0 for off-map positions
    pub fn get(&self, coord: OffsetCoord) -> u32 {
        self.values.get(&coord).copied().unwrap_or(0)
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }
}
