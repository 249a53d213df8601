//! Territory regions and castle upkeep
//!
//! A region is a maximal connected set of same-owner tiles of at least
//! `min_region_tiles`. Every region is entitled to exactly one castle;
//! after any change of ownership, castles stranded outside valid
//! regions are demolished and castle-less regions get a new one on a
//! random structure-free tile.

use crate::board::{Board, StructurePolicy};
use crate::core::config::RuleConfig;
use crate::core::types::{PlayerId, StructureKind};
use crate::hex::OffsetCoord;
use ahash::AHashSet;
use rand::Rng;
use std::collections::VecDeque;

/// A maximal connected set of same-owner tiles
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Region {
    pub owner: PlayerId,
    /// Sorted row-major
    pub tiles: Vec<OffsetCoord>,
}

/// Find all player regions, scanning tiles in sorted order so region
/// numbering is deterministic. Neutral land never forms a region.
pub fn find_regions(board: &Board, rules: &RuleConfig) -> Vec<Region> {
    let mut coords: Vec<OffsetCoord> = board.tiles().map(|(coord, _)| coord).collect();
    coords.sort();

    let mut visited: AHashSet<OffsetCoord> = AHashSet::new();
    let mut regions = Vec::new();

    for coord in coords {
        if visited.contains(&coord) {
            continue;
        }
        let owner = match board.owner_of(coord) {
            Some(owner) if !owner.is_neutral() => owner,
            _ => continue,
        };
        let tiles = flood_fill(board, coord, owner, &mut visited);
        if tiles.len() >= rules.min_region_tiles {
            regions.push(Region { owner, tiles });
        }
    }
    regions
}

fn flood_fill(
    board: &Board,
    start: OffsetCoord,
    owner: PlayerId,
    visited: &mut AHashSet<OffsetCoord>,
) -> Vec<OffsetCoord> {
    let mut tiles = Vec::new();
    let mut queue = VecDeque::new();
    visited.insert(start);
    queue.push_back(start);

    while let Some(coord) = queue.pop_front() {
        tiles.push(coord);
        for neighbor in coord.neighbors() {
            if !visited.contains(&neighbor) && board.owner_of(neighbor) == Some(owner) {
                visited.insert(neighbor);
                queue.push_back(neighbor);
            }
        }
    }
    tiles.sort();
    tiles
}

/// Whether any tile of the region carries a castle
pub fn region_has_castle(board: &Board, region: &Region) -> bool {
    region
        .tiles
        .iter()
        .any(|&coord| board.structure_at(coord) == Some(StructureKind::Castle))
}

/// Put a castle on a uniformly chosen structure-free tile of the
/// region. Returns false when every tile is built up. Existing
/// structures are never overwritten.
pub fn assign_castle(board: &mut Board, region: &Region, rng: &mut impl Rng) -> bool {
    let open: Vec<OffsetCoord> = region
        .tiles
        .iter()
        .copied()
        .filter(|&coord| board.structure_at(coord).is_none())
        .collect();
    if open.is_empty() {
        return false;
    }
    let pick = open[rng.gen_range(0..open.len())];
    board.add_structure(pick, StructureKind::Castle)
}

/// Demolish castles standing outside any valid region. Neutral land
/// never counts as a region, so a castle on a neutral tile always
/// goes. Returns how many were removed.
pub fn remove_invalid_castles(board: &mut Board, rules: &RuleConfig) -> usize {
    let valid: AHashSet<OffsetCoord> = find_regions(board, rules)
        .iter()
        .flat_map(|region| region.tiles.iter().copied())
        .collect();

    let doomed: Vec<OffsetCoord> = board
        .tiles()
        .filter_map(|(coord, tile)| {
            let stranded =
                tile.structure == Some(StructureKind::Castle) && !valid.contains(&coord);
            stranded.then_some(coord)
        })
        .collect();

    for coord in &doomed {
        board.remove_structure(*coord);
    }
    doomed.len()
}

/// Full castle upkeep: strip stranded castles, then grant one to every
/// valid region that lacks one. Runs after every change of ownership.
pub fn distribute_castles(board: &mut Board, rules: &RuleConfig, rng: &mut impl Rng) {
    let removed = remove_invalid_castles(board, rules);
    if removed > 0 {
        tracing::debug!("removed {} stranded castle(s)", removed);
    }
    for region in find_regions(board, rules) {
        if !region_has_castle(board, &region) && assign_castle(board, &region, rng) {
            tracing::debug!(
                "granted castle to player {} region of {} tiles",
                region.owner.0,
                region.tiles.len()
            );
        }
    }
}

/// Convenience used by tests and tooling: flip a tile's owner and run
/// castle upkeep in one step.
pub fn set_owner_and_redistribute(
    board: &mut Board,
    rules: &RuleConfig,
    coord: OffsetCoord,
    new_owner: PlayerId,
    policy: StructurePolicy,
    rng: &mut impl Rng,
) -> bool {
    if !board.set_owner(coord, new_owner, policy) {
        return false;
    }
    distribute_castles(board, rules, rng);
    true
}
