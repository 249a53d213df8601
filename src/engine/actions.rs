//! Action orchestration for one running match
//!
//! `Game` owns the board, the rule set, the protection cache and the
//! RNG used for castle placement. Actions are validated against the
//! current state, applied atomically, and followed by castle upkeep
//! (for ownership changes) and a full protection recompute. Invalid
//! actions leave the state untouched and report why.

use crate::board::{Board, StructurePolicy};
use crate::core::config::RuleConfig;
use crate::core::types::{PlayerId, StructureKind, UnitKind};
use crate::engine::combat::{self, RejectReason};
use crate::engine::protection::ProtectionMap;
use crate::engine::regions::distribute_castles;
use crate::hex::OffsetCoord;
use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;

/// A player intent, already decoded from the wire
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GameAction {
    /// Claim a frontier tile for `claimant`. Valid when some unit of
    /// the claimant can take it; captured land is always razed.
    Capture { target: OffsetCoord, claimant: PlayerId },
    /// Walk the unit at `from` onto `to` across owned territory
    Move { from: OffsetCoord, to: OffsetCoord, unit_kind: UnitKind },
    /// Strike the enemy unit at `target` and take its tile
    Attack { attacker: OffsetCoord, target: OffsetCoord, attacker_kind: UnitKind },
    /// Muster a new unit on owned land
    BuildUnit { at: OffsetCoord, kind: UnitKind },
    /// Raise a structure on owned land
    BuildStructure { at: OffsetCoord, kind: StructureKind },
}

/// What happened to a submitted action
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ActionOutcome {
    Applied,
    Rejected(RejectReason),
}

impl ActionOutcome {
    pub fn is_applied(&self) -> bool {
        matches!(self, ActionOutcome::Applied)
    }
}

/// One running match
#[derive(Debug, Clone)]
pub struct Game {
    board: Board,
    rules: RuleConfig,
    protection: ProtectionMap,
    rng: ChaCha8Rng,
}

impl Game {
    /// Start a match on the given board. Castles are distributed to
    /// castle-less regions right away, like at the start of a session.
    pub fn new(board: Board, rules: RuleConfig, seed: u64) -> Self {
        let mut game = Game {
            board,
            rules,
            protection: ProtectionMap::new(),
            rng: ChaCha8Rng::seed_from_u64(seed),
        };
        distribute_castles(&mut game.board, &game.rules, &mut game.rng);
        game.protection.recompute(&game.board, &game.rules);
        game
    }

    pub fn board(&self) -> &Board {
        &self.board
    }

    pub fn rules(&self) -> &RuleConfig {
        &self.rules
    }

    pub fn protection(&self) -> &ProtectionMap {
        &self.protection
    }

    /// Validate and apply one action. Applied actions are followed by
    /// castle upkeep where ownership changed and a protection
    /// recompute; rejected actions change nothing.
    pub fn apply(&mut self, action: &GameAction) -> ActionOutcome {
        let result = match *action {
            GameAction::Capture { target, claimant } => self.apply_capture(target, claimant),
            GameAction::Move { from, to, unit_kind } => self.apply_move(from, to, unit_kind),
            GameAction::Attack { attacker, target, attacker_kind } => {
                self.apply_attack(attacker, target, attacker_kind)
            }
            GameAction::BuildUnit { at, kind } => self.apply_build_unit(at, kind),
            GameAction::BuildStructure { at, kind } => self.apply_build_structure(at, kind),
        };

        match result {
            Ok(()) => {
                self.protection.recompute(&self.board, &self.rules);
                ActionOutcome::Applied
            }
            Err(reason) => {
                tracing::debug!("rejected {:?}: {:?}", action, reason);
                ActionOutcome::Rejected(reason)
            }
        }
    }

    fn apply_capture(&mut self, target: OffsetCoord, claimant: PlayerId) -> Result<(), RejectReason> {
        if claimant.is_neutral() {
            return Err(RejectReason::NeutralActor);
        }
        if !self.board.contains(target) {
            return Err(RejectReason::OffMap);
        }
        if self.board.owner_of(target) == Some(claimant) {
            return Err(RejectReason::FriendlyTarget);
        }

        let capable = self
            .board
            .units()
            .filter(|(_, unit)| unit.owner == claimant)
            .any(|(coord, _)| {
                combat::validate_capture(&self.board, &self.rules, &self.protection, coord, target)
                    .is_ok()
            });
        if !capable {
            return Err(RejectReason::NoCapableUnit);
        }

        // any defender falls with the tile
        self.board.remove_unit(target);
        self.board.set_owner(target, claimant, StructurePolicy::Raze);
        distribute_castles(&mut self.board, &self.rules, &mut self.rng);
        Ok(())
    }

    fn apply_move(&mut self, from: OffsetCoord, to: OffsetCoord, declared: UnitKind) -> Result<(), RejectReason> {
        combat::validate_move(&self.board, &self.rules, from, to)?;
        if let Some(unit) = self.board.unit_at(from) {
            if unit.kind != declared {
                tracing::debug!(
                    "move from {:?} declared {:?} but the unit is {:?}",
                    from,
                    declared,
                    unit.kind
                );
            }
        }
        self.board.move_unit(from, to);
        Ok(())
    }

    fn apply_attack(
        &mut self,
        attacker: OffsetCoord,
        target: OffsetCoord,
        declared: UnitKind,
    ) -> Result<(), RejectReason> {
        combat::validate_attack(&self.board, &self.rules, attacker, target)?;
        let unit = self.board.unit_at(attacker).ok_or(RejectReason::NoUnit)?;
        if unit.kind != declared {
            tracing::debug!(
                "attack from {:?} declared {:?} but the unit is {:?}",
                attacker,
                declared,
                unit.kind
            );
        }

        // defender dies, the tile falls to the attacker and is razed,
        // the attacker advances onto it
        self.board.remove_unit(target);
        self.board.set_owner(target, unit.owner, StructurePolicy::Raze);
        self.board.move_unit(attacker, target);
        distribute_castles(&mut self.board, &self.rules, &mut self.rng);
        Ok(())
    }

    fn apply_build_unit(&mut self, at: OffsetCoord, kind: UnitKind) -> Result<(), RejectReason> {
        match self.board.owner_of(at) {
            None => return Err(RejectReason::OffMap),
            Some(owner) if owner.is_neutral() => return Err(RejectReason::UnownedLand),
            Some(_) => {}
        }
        if self.board.unit_at(at).is_some() {
            return Err(RejectReason::TileOccupied);
        }
        self.board.add_unit(at, kind);
        Ok(())
    }

    fn apply_build_structure(&mut self, at: OffsetCoord, kind: StructureKind) -> Result<(), RejectReason> {
        match self.board.owner_of(at) {
            None => return Err(RejectReason::OffMap),
            Some(owner) if owner.is_neutral() => return Err(RejectReason::UnownedLand),
            Some(_) => {}
        }
        if self.board.structure_at(at).is_some() {
            return Err(RejectReason::StructureSlotTaken);
        }
        self.board.add_structure(at, kind);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::board::records::{parse_land_records, parse_unit_records};

    fn game_from(lands: &[&str], units: &[&str]) -> Game {
        let lands = parse_land_records(lands.iter().copied()).unwrap();
        let units = parse_unit_records(units.iter().copied()).unwrap();
        let board = Board::from_records(&lands, &units).unwrap();
        Game::new(board, RuleConfig::default(), 7)
    }

    fn at(row: i32, col: i32) -> OffsetCoord {
        OffsetCoord::new(row, col)
    }

    #[test]
    fn test_capture_claim_applies() {
        let mut game = game_from(
            &["0 0 1", "0 1 2 tower", "0 2 2"],
            &["0 0 1 swordsman"],
        );

        let outcome = game.apply(&GameAction::Capture { target: at(0, 1), claimant: PlayerId(1) });
        assert_eq!(outcome, ActionOutcome::Applied);
        assert_eq!(game.board().owner_of(at(0, 1)), Some(PlayerId(1)));
        // the tower is razed; castle upkeep may plant a fresh castle
        assert_ne!(game.board().structure_at(at(0, 1)), Some(StructureKind::Tower));
    }

    #[test]
    fn test_capture_claim_needs_a_capable_unit() {
        // the peasant cannot beat the tower next to the target
        let mut game = game_from(
            &["0 0 1", "0 1 2", "0 2 2 tower"],
            &["0 0 1 peasant"],
        );

        let before = game.board().land_records();
        let outcome = game.apply(&GameAction::Capture { target: at(0, 1), claimant: PlayerId(1) });
        assert_eq!(outcome, ActionOutcome::Rejected(RejectReason::NoCapableUnit));
        assert_eq!(game.board().land_records(), before);
    }

    #[test]
    fn test_capture_removes_defender() {
        let mut game = game_from(
            &["0 0 1", "0 1 2"],
            &["0 0 1 knight", "0 1 2 peasant"],
        );

        let outcome = game.apply(&GameAction::Capture { target: at(0, 1), claimant: PlayerId(1) });
        assert_eq!(outcome, ActionOutcome::Applied);
        assert!(game.board().unit_at(at(0, 1)).is_none());
        // the capturing knight holds its ground; relocation is a move
        assert!(game.board().unit_at(at(0, 0)).is_some());
    }

    #[test]
    fn test_neutral_never_acts() {
        let mut game = game_from(&["0 0 0", "0 1 1"], &[]);
        let outcome = game.apply(&GameAction::Capture { target: at(0, 1), claimant: PlayerId(0) });
        assert_eq!(outcome, ActionOutcome::Rejected(RejectReason::NeutralActor));
    }

    #[test]
    fn test_move_applies_and_updates_protection() {
        // houses fill every structure slot so castle upkeep stays out
        // of the protection picture
        let mut game = game_from(
            &["0 0 1 house", "0 1 1 house", "0 2 1 house", "0 3 1 house"],
            &["0 0 1 knight"],
        );
        // before: the knight covers (0,1)
        assert_eq!(game.protection().get(at(0, 1)), 4);

        let outcome = game.apply(&GameAction::Move {
            from: at(0, 0),
            to: at(0, 3),
            unit_kind: UnitKind::Knight,
        });
        assert_eq!(outcome, ActionOutcome::Applied);
        assert!(game.board().unit_at(at(0, 0)).is_none());
        assert_eq!(game.protection().get(at(0, 1)), 0);
        assert_eq!(game.protection().get(at(0, 2)), 4);
    }

    #[test]
    fn test_move_rejections() {
        let mut game = game_from(
            &["0 0 1", "0 1 1", "1 0 2"],
            &["0 0 1 peasant", "0 1 1 spearman"],
        );

        assert_eq!(
            game.apply(&GameAction::Move { from: at(0, 0), to: at(0, 1), unit_kind: UnitKind::Peasant }),
            ActionOutcome::Rejected(RejectReason::TileOccupied)
        );
        assert_eq!(
            game.apply(&GameAction::Move { from: at(0, 0), to: at(1, 0), unit_kind: UnitKind::Peasant }),
            ActionOutcome::Rejected(RejectReason::ForeignLand)
        );
        assert_eq!(
            game.apply(&GameAction::Move { from: at(1, 0), to: at(0, 0), unit_kind: UnitKind::Peasant }),
            ActionOutcome::Rejected(RejectReason::NoUnit)
        );
    }

    #[test]
    fn test_attack_composite_effect() {
        let mut game = game_from(
            &["0 0 1", "0 1 2 house"],
            &["0 0 1 swordsman", "0 1 2 peasant"],
        );

        let outcome = game.apply(&GameAction::Attack {
            attacker: at(0, 0),
            target: at(0, 1),
            attacker_kind: UnitKind::Swordsman,
        });
        assert_eq!(outcome, ActionOutcome::Applied);

        // defender gone, land flipped and razed, attacker advanced
        assert_eq!(game.board().owner_of(at(0, 1)), Some(PlayerId(1)));
        assert_ne!(game.board().structure_at(at(0, 1)), Some(StructureKind::House));
        let advanced = game.board().unit_at(at(0, 1)).unwrap();
        assert_eq!(advanced.kind, UnitKind::Swordsman);
        assert_eq!(advanced.owner, PlayerId(1));
        assert!(game.board().unit_at(at(0, 0)).is_none());
    }

    #[test]
    fn test_build_unit_rules() {
        let mut game = game_from(&["0 0 1", "0 1 0"], &["0 0 1 peasant"]);

        assert_eq!(
            game.apply(&GameAction::BuildUnit { at: at(0, 0), kind: UnitKind::Knight }),
            ActionOutcome::Rejected(RejectReason::TileOccupied)
        );
        assert_eq!(
            game.apply(&GameAction::BuildUnit { at: at(0, 1), kind: UnitKind::Knight }),
            ActionOutcome::Rejected(RejectReason::UnownedLand)
        );
        assert_eq!(
            game.apply(&GameAction::BuildUnit { at: at(9, 9), kind: UnitKind::Knight }),
            ActionOutcome::Rejected(RejectReason::OffMap)
        );
    }

    #[test]
    fn test_build_structure_rules() {
        let mut game = game_from(&["0 0 1", "0 2 1 tower"], &[]);

        assert_eq!(
            game.apply(&GameAction::BuildStructure { at: at(0, 0), kind: StructureKind::Tower }),
            ActionOutcome::Applied
        );
        assert_eq!(game.board().structure_at(at(0, 0)), Some(StructureKind::Tower));
        assert_eq!(
            game.apply(&GameAction::BuildStructure { at: at(0, 2), kind: StructureKind::House }),
            ActionOutcome::Rejected(RejectReason::StructureSlotTaken)
        );
    }

    #[test]
    fn test_capture_splits_region_and_reseeds_castles() {
        use crate::engine::regions::{find_regions, region_has_castle};

        // player 2 holds a 5-tile chain; player 1's knight at (0,2)
        // takes (1,2), its neighbor, and cuts the chain in two
        let mut game = game_from(
            &["0 2 1", "1 1 2", "1 2 2", "1 3 2", "1 4 2", "1 5 2"],
            &["0 2 1 knight"],
        );

        let outcome = game.apply(&GameAction::Capture { target: at(1, 2), claimant: PlayerId(1) });
        assert_eq!(outcome, ActionOutcome::Applied);

        let regions = find_regions(game.board(), game.rules());
        // the cut leaves one 3-tile player-2 region; (1,1) is stranded
        let p2: Vec<_> = regions.iter().filter(|r| r.owner == PlayerId(2)).collect();
        assert_eq!(p2.len(), 1);
        assert_eq!(p2[0].tiles.len(), 3);
        assert!(region_has_castle(game.board(), p2[0]));

        // the claimant's new region gets a castle too
        let p1: Vec<_> = regions.iter().filter(|r| r.owner == PlayerId(1)).collect();
        assert_eq!(p1.len(), 1);
        assert!(region_has_castle(game.board(), p1[0]));
    }

    #[test]
    fn test_attack_mismatched_declaration_still_uses_real_unit() {
        let mut game = game_from(
            &["0 0 1", "0 1 2"],
            &["0 0 1 knight", "0 1 2 swordsman"],
        );

        // declared a peasant, but the knight on the tile decides
        let outcome = game.apply(&GameAction::Attack {
            attacker: at(0, 0),
            target: at(0, 1),
            attacker_kind: UnitKind::Peasant,
        });
        assert_eq!(outcome, ActionOutcome::Applied);
        assert_eq!(game.board().unit_at(at(0, 1)).unwrap().kind, UnitKind::Knight);
    }
}
