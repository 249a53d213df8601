//! Movement reachability over owned territory
//!
//! A unit moves through tiles its owner holds. Breadth-first search
//! from the unit's tile bounds the walk by step count; tiles holding
//! units are passable, only ownership blocks.

use crate::board::Board;
use crate::core::types::PlayerId;
use crate::hex::OffsetCoord;
use ahash::AHashSet;
use std::collections::VecDeque;

/// All tiles reachable from `start` in at most `max_steps` steps across
/// land owned by `owner`. The start tile is always part of the result,
/// even when it is not owned by `owner`.
pub fn reachable_tiles(
    board: &Board,
    start: OffsetCoord,
    owner: PlayerId,
    max_steps: u32,
) -> AHashSet<OffsetCoord> {
    let mut visited: AHashSet<OffsetCoord> = AHashSet::new();
    let mut queue: VecDeque<(OffsetCoord, u32)> = VecDeque::new();
    queue.push_back((start, 0));

    while let Some((tile, steps)) = queue.pop_front() {
        if !visited.insert(tile) {
            continue;
        }
        if steps < max_steps {
            for neighbor in tile.neighbors() {
                if !visited.contains(&neighbor) && board.owner_of(neighbor) == Some(owner) {
                    queue.push_back((neighbor, steps + 1));
                }
            }
        }
    }
    visited
}

/// Frontier tiles a unit at `start` can take: on-map tiles not owned by
/// `owner` adjacent to anything reachable within `max_steps - 1` steps.
/// Sorted row-major so callers iterate deterministically.
pub fn capturable_tiles(
    board: &Board,
    start: OffsetCoord,
    owner: PlayerId,
    max_steps: u32,
) -> Vec<OffsetCoord> {
    let edge = reachable_tiles(board, start, owner, max_steps.saturating_sub(1));
    let mut seen: AHashSet<OffsetCoord> = AHashSet::new();
    for tile in &edge {
        for neighbor in tile.neighbors() {
            if let Some(neighbor_owner) = board.owner_of(neighbor) {
                if neighbor_owner != owner {
                    seen.insert(neighbor);
                }
            }
        }
    }
    let mut capturable: Vec<OffsetCoord> = seen.into_iter().collect();
    capturable.sort();
    capturable
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::board::records::parse_land_records;

    fn board_from(lines: &[&str]) -> Board {
        let records = parse_land_records(lines.iter().copied()).unwrap();
        Board::from_land_records(&records).unwrap()
    }

    fn at(row: i32, col: i32) -> OffsetCoord {
        OffsetCoord::new(row, col)
    }

    // row 0, cols 0..=5: consecutive columns in the same row are adjacent
    fn strip(owner: u32) -> Vec<String> {
        (0..=5).map(|col| format!("0 {} {}", col, owner)).collect()
    }

    #[test]
    fn test_respects_step_bound() {
        let lines = strip(1);
        let board = board_from(&lines.iter().map(|s| s.as_str()).collect::<Vec<_>>());

        let zero = reachable_tiles(&board, at(0, 0), PlayerId(1), 0);
        assert_eq!(zero.len(), 1);
        assert!(zero.contains(&at(0, 0)));

        let two = reachable_tiles(&board, at(0, 0), PlayerId(1), 2);
        assert_eq!(two.len(), 3);
        assert!(two.contains(&at(0, 2)));
        assert!(!two.contains(&at(0, 3)));

        let all = reachable_tiles(&board, at(0, 0), PlayerId(1), 5);
        assert_eq!(all.len(), 6);
    }

    #[test]
    fn test_start_included_even_on_foreign_land() {
        let board = board_from(&["0 0 2", "0 1 1", "0 2 1"]);
        let reachable = reachable_tiles(&board, at(0, 0), PlayerId(1), 4);
        assert!(reachable.contains(&at(0, 0)));
        assert!(reachable.contains(&at(0, 1)));
        assert!(reachable.contains(&at(0, 2)));
    }

    #[test]
    fn test_foreign_tile_blocks() {
        let board = board_from(&["0 0 1", "0 1 1", "0 2 2", "0 3 1", "0 4 1"]);
        let reachable = reachable_tiles(&board, at(0, 0), PlayerId(1), 4);
        assert!(reachable.contains(&at(0, 1)));
        assert!(!reachable.contains(&at(0, 2)));
        // tiles behind the block stay unreachable
        assert!(!reachable.contains(&at(0, 3)));
        assert_eq!(reachable.len(), 2);
    }

    #[test]
    fn test_units_do_not_block() {
        use crate::board::records::parse_unit_records;
        let lands = parse_land_records(["0 0 1", "0 1 1", "0 2 1"]).unwrap();
        let units = parse_unit_records(["0 1 1 knight"]).unwrap();
        let board = Board::from_records(&lands, &units).unwrap();

        let reachable = reachable_tiles(&board, at(0, 0), PlayerId(1), 4);
        assert_eq!(reachable.len(), 3);
    }

    #[test]
    fn test_capturable_frontier() {
        // owned strip, a foreign tile past the edge and a neutral tile
        // hanging off the last edge tile
        let board = board_from(&[
            "0 0 1", "0 1 1", "0 2 1", "0 3 1", "0 4 2", "0 5 1", "1 3 0",
        ]);

        // movement range 4: edge is reachable(3) = cols 0..=3
        let capturable = capturable_tiles(&board, at(0, 0), PlayerId(1), 4);
        assert_eq!(capturable, vec![at(0, 4), at(1, 3)]);
    }

    #[test]
    fn test_capturable_shrinks_with_range() {
        let board = board_from(&[
            "0 0 1", "0 1 1", "0 2 1", "0 3 1", "0 4 2", "1 3 0",
        ]);
        let capturable = capturable_tiles(&board, at(0, 0), PlayerId(1), 2);
        assert!(capturable.is_empty());
    }

    #[test]
    fn test_capturable_deduplicates() {
        // foreign tile adjacent to two edge tiles shows up once
        let board = board_from(&["0 0 1", "0 1 1", "1 0 1", "1 1 2"]);
        let capturable = capturable_tiles(&board, at(0, 0), PlayerId(1), 4);
        assert_eq!(capturable, vec![at(1, 1)]);
    }
}
