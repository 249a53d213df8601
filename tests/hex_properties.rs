//! Property-based tests for hex geometry and combat math.
//!
//! Run with: cargo test hex_properties

use proptest::prelude::*;

use domination::board::records::parse_land_records;
use domination::board::Board;
use domination::core::types::{PlayerId, UnitKind};
use domination::engine::combat::overcomes;
use domination::engine::{battle_outcome, reachable_tiles, BattleOutcome};
use domination::hex::OffsetCoord;

const KINDS: [UnitKind; 4] = [
    UnitKind::Peasant,
    UnitKind::Spearman,
    UnitKind::Swordsman,
    UnitKind::Knight,
];

fn coord() -> impl Strategy<Value = OffsetCoord> {
    (-24i32..24, -24i32..24).prop_map(|(row, col)| OffsetCoord::new(row, col))
}

/// A filled hex disc of the given radius around a center, one owner
fn disc_board(center: OffsetCoord, radius: u32, owner: PlayerId) -> Board {
    let r = radius as i32;
    let mut lines = Vec::new();
    for row in (center.row - r - 1)..=(center.row + r + 1) {
        for col in (center.col - r - 1)..=(center.col + r + 1) {
            if center.distance(&OffsetCoord::new(row, col)) <= radius {
                lines.push(format!("{} {} {}", row, col, owner.0));
            }
        }
    }
    let records = parse_land_records(lines.iter().map(String::as_str)).unwrap();
    Board::from_land_records(&records).unwrap()
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(1000))]

    /// b is a neighbor of a exactly when a is a neighbor of b.
    #[test]
    fn prop_adjacency_symmetry(a in coord()) {
        for b in a.neighbors() {
            prop_assert!(b.neighbors().contains(&a), "{:?} <-> {:?}", a, b);
        }
    }

    /// Every neighbor sits at distance exactly one.
    #[test]
    fn prop_neighbors_at_distance_one(a in coord()) {
        for b in a.neighbors() {
            prop_assert_eq!(a.distance(&b), 1);
        }
    }

    /// Distance satisfies the triangle inequality.
    #[test]
    fn prop_distance_triangle_inequality(a in coord(), b in coord(), c in coord()) {
        prop_assert!(a.distance(&c) <= a.distance(&b) + b.distance(&c));
    }

    /// Distance is symmetric and zero only on the diagonal.
    #[test]
    fn prop_distance_symmetric(a in coord(), b in coord()) {
        prop_assert_eq!(a.distance(&b), b.distance(&a));
        prop_assert_eq!(a.distance(&b) == 0, a == b);
    }

    /// Offset and cube coordinates convert losslessly both ways.
    #[test]
    fn prop_offset_cube_round_trip(a in coord()) {
        let cube = a.to_cube();
        prop_assert_eq!(cube.x + cube.y + cube.z, 0);
        prop_assert_eq!(cube.to_offset(), a);
    }

    /// The attacker wins on strictly greater power, or knight on knight.
    #[test]
    fn prop_battle_outcome_matches_powers(a in 0usize..4, d in 0usize..4) {
        let attacker = KINDS[a];
        let defender = KINDS[d];
        let expected = attacker.power() > defender.power()
            || (attacker == UnitKind::Knight && defender == UnitKind::Knight);
        prop_assert_eq!(
            battle_outcome(attacker, defender) == BattleOutcome::AttackerWins,
            expected
        );
    }

    /// Capture clears a defense exactly on strictly greater power, with
    /// the knight also cracking a full defense of four.
    #[test]
    fn prop_capture_power_boundary(a in 0usize..4, defense in 0u32..=5) {
        let attacker = KINDS[a];
        let expected = attacker.power() > defense
            || (attacker == UnitKind::Knight && defense == 4);
        prop_assert_eq!(overcomes(attacker, defense), expected);
    }
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(64))]

    /// Allowing one more step never shrinks the reachable set.
    #[test]
    fn prop_reachability_monotone(radius in 1u32..5, steps in 0u32..6) {
        let center = OffsetCoord::new(0, 0);
        let owner = PlayerId(1);
        let board = disc_board(center, radius, owner);

        let smaller = reachable_tiles(&board, center, owner, steps);
        let larger = reachable_tiles(&board, center, owner, steps + 1);
        prop_assert!(smaller.is_subset(&larger));

        // and with enough steps the whole disc is covered
        let full = reachable_tiles(&board, center, owner, radius);
        prop_assert_eq!(full.len(), board.len());
    }
}
