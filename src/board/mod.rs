//! Land and unit store for one match
//!
//! The board is a sparse map keyed by tile position. Mutators are
//! mechanical: they enforce slot rules (tile exists, slot free) and
//! return whether anything changed. Game-rule checks such as ownership
//! and range live in the engine.

pub mod records;

use crate::board::records::{LandRecord, UnitRecord};
use crate::core::error::{DominationError, Result};
use crate::core::types::{PlayerId, StructureKind, UnitKind};
use crate::hex::OffsetCoord;
use ahash::AHashMap;

/// What happens to structures when a tile changes hands
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StructurePolicy {
    /// Keep whatever stands on the tile
    Preserve,
    /// Demolish any structure on the tile
    Raze,
}

/// Mutable state of one land tile
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Tile {
    pub owner: PlayerId,
    pub structure: Option<StructureKind>,
}

/// A unit standing on a tile. At most one unit per tile.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Unit {
    pub owner: PlayerId,
    pub kind: UnitKind,
}

/// Sparse store of tiles and units
#[derive(Debug, Clone, Default)]
pub struct Board {
    lands: AHashMap<OffsetCoord, Tile>,
    units: AHashMap<OffsetCoord, Unit>,
}

impl Board {
    pub fn new() -> Self {
        Self::default()
    }

    /// Build a board from parsed records. Rejects duplicate tiles,
    /// duplicate units and units standing outside the map.
    pub fn from_records(lands: &[LandRecord], units: &[UnitRecord]) -> Result<Self> {
        let mut board = Board::new();
        for record in lands {
            let coord = OffsetCoord::new(record.row, record.col);
            let tile = Tile { owner: record.owner, structure: record.structure };
            if board.lands.insert(coord, tile).is_some() {
                return Err(DominationError::DuplicateTile { row: record.row, col: record.col });
            }
        }
        for record in units {
            let coord = OffsetCoord::new(record.row, record.col);
            if !board.lands.contains_key(&coord) {
                return Err(DominationError::UnitOffMap { row: record.row, col: record.col });
            }
            let unit = Unit { owner: record.owner, kind: record.kind };
            if board.units.insert(coord, unit).is_some() {
                return Err(DominationError::DuplicateUnit { row: record.row, col: record.col });
            }
        }
        Ok(board)
    }

    /// Build a board with land only, no units on it yet
    pub fn from_land_records(lands: &[LandRecord]) -> Result<Self> {
        Self::from_records(lands, &[])
    }

    pub fn contains(&self, coord: OffsetCoord) -> bool {
        self.lands.contains_key(&coord)
    }

    pub fn tile(&self, coord: OffsetCoord) -> Option<&Tile> {
        self.lands.get(&coord)
    }

    /// Owner of a tile, None when the tile is off the map
    pub fn owner_of(&self, coord: OffsetCoord) -> Option<PlayerId> {
        self.lands.get(&coord).map(|tile| tile.owner)
    }

    /// Structure on a tile, None for bare tiles and off-map positions
    pub fn structure_at(&self, coord: OffsetCoord) -> Option<StructureKind> {
        self.lands.get(&coord).and_then(|tile| tile.structure)
    }

    pub fn unit_at(&self, coord: OffsetCoord) -> Option<Unit> {
        self.units.get(&coord).copied()
    }

    pub fn len(&self) -> usize {
        self.lands.len()
    }

    pub fn is_empty(&self) -> bool {
        self.lands.is_empty()
    }

    pub fn unit_count(&self) -> usize {
        self.units.len()
    }

    pub fn tiles(&self) -> impl Iterator<Item = (OffsetCoord, &Tile)> + '_ {
        self.lands.iter().map(|(coord, tile)| (*coord, tile))
    }

    pub fn units(&self) -> impl Iterator<Item = (OffsetCoord, Unit)> + '_ {
        self.units.iter().map(|(coord, unit)| (*coord, *unit))
    }

    /// Reassign a tile to a new owner. The policy decides whether a
    /// structure on it survives the change of hands.
    pub fn set_owner(&mut self, coord: OffsetCoord, new_owner: PlayerId, policy: StructurePolicy) -> bool {
        match self.lands.get_mut(&coord) {
            Some(tile) => {
                tile.owner = new_owner;
                if policy == StructurePolicy::Raze {
                    tile.structure = None;
                }
                true
            }
            None => false,
        }
    }

    /// Place a new unit. The tile must exist, be player-owned and empty;
    /// the unit always belongs to the tile's owner.
    pub fn add_unit(&mut self, coord: OffsetCoord, kind: UnitKind) -> bool {
        let owner = match self.lands.get(&coord) {
            Some(tile) if !tile.owner.is_neutral() => tile.owner,
            _ => return false,
        };
        if self.units.contains_key(&coord) {
            return false;
        }
        self.units.insert(coord, Unit { owner, kind });
        true
    }

    pub fn remove_unit(&mut self, coord: OffsetCoord) -> Option<Unit> {
        self.units.remove(&coord)
    }

    /// Relocate a unit to an empty on-map tile
    pub fn move_unit(&mut self, from: OffsetCoord, to: OffsetCoord) -> bool {
        if !self.lands.contains_key(&to) || self.units.contains_key(&to) {
            return false;
        }
        match self.units.remove(&from) {
            Some(unit) => {
                self.units.insert(to, unit);
                true
            }
            None => false,
        }
    }

    /// Put a structure on a tile whose structure slot is free
    pub fn add_structure(&mut self, coord: OffsetCoord, kind: StructureKind) -> bool {
        match self.lands.get_mut(&coord) {
            Some(tile) if tile.structure.is_none() => {
                tile.structure = Some(kind);
                true
            }
            _ => false,
        }
    }

    pub fn remove_structure(&mut self, coord: OffsetCoord) -> Option<StructureKind> {
        self.lands.get_mut(&coord).and_then(|tile| tile.structure.take())
    }

    /// Land state as sorted text records
    pub fn land_records(&self) -> Vec<LandRecord> {
        let mut records: Vec<LandRecord> = self
            .lands
            .iter()
            .map(|(coord, tile)| LandRecord {
                row: coord.row,
                col: coord.col,
                owner: tile.owner,
                structure: tile.structure,
            })
            .collect();
        records.sort_by_key(|r| (r.row, r.col));
        records
    }

    /// Unit state as sorted text records
    pub fn unit_records(&self) -> Vec<UnitRecord> {
        let mut records: Vec<UnitRecord> = self
            .units
            .iter()
            .map(|(coord, unit)| UnitRecord {
                row: coord.row,
                col: coord.col,
                owner: unit.owner,
                kind: unit.kind,
            })
            .collect();
        records.sort_by_key(|r| (r.row, r.col));
        records
    }
}
