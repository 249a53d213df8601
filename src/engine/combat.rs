//! Combat and capture adjudication
//!
//! Attacks are resolved by raw unit power: the attacker must outpower
//! the defender, except that knights may strike opposing knights.
//! Land capture pits the attacker against the stronger of the tile's
//! defender and its protection value. Protection never blocks a direct
//! attack on a unit.

use crate::board::Board;
use crate::core::config::RuleConfig;
use crate::core::types::UnitKind;
use crate::engine::protection::ProtectionMap;
use crate::engine::reachability::{capturable_tiles, reachable_tiles};
use crate::hex::OffsetCoord;

/// Result of a unit-versus-unit engagement
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BattleOutcome {
    AttackerWins,
    DefenderHolds,
}

/// Why an action was turned down
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RejectReason {
    /// No unit stands on the acting tile
    NoUnit,
    /// The neutral faction never acts
    NeutralActor,
    /// Target position is outside the map
    OffMap,
    /// Target is beyond the acting unit's range
    OutOfRange,
    /// Target tile already holds a unit
    TileOccupied,
    /// Move target is not the mover's own land
    ForeignLand,
    /// Capture or attack aimed at the actor's own side
    FriendlyTarget,
    /// Attack aimed at a tile with no unit on it
    NoDefender,
    /// Defense is too strong for the acting unit
    Outmatched,
    /// Tile already carries a structure
    StructureSlotTaken,
    /// Builds need player-owned land
    UnownedLand,
    /// No unit of the claiming player can take the tile
    NoCapableUnit,
}

/// Resolve a direct engagement between two units
pub fn battle_outcome(attacker: UnitKind, defender: UnitKind) -> BattleOutcome {
    if attacker.power() > defender.power() {
        BattleOutcome::AttackerWins
    } else if attacker == UnitKind::Knight && defender == UnitKind::Knight {
        BattleOutcome::AttackerWins
    } else {
        BattleOutcome::DefenderHolds
    }
}

/// Whether a unit overcomes a combined defense value. Knights break
/// even against knight-grade defense, everyone else must exceed it.
pub fn overcomes(attacker: UnitKind, defense: u32) -> bool {
    attacker.power() > defense
        || (attacker == UnitKind::Knight && defense == UnitKind::Knight.power())
}

/// Check a move of the unit at `from` onto `to`: the target must be
/// empty land of the mover within movement range.
pub fn validate_move(
    board: &Board,
    rules: &RuleConfig,
    from: OffsetCoord,
    to: OffsetCoord,
) -> Result<(), RejectReason> {
    let unit = board.unit_at(from).ok_or(RejectReason::NoUnit)?;
    if unit.owner.is_neutral() {
        return Err(RejectReason::NeutralActor);
    }
    if !board.contains(to) {
        return Err(RejectReason::OffMap);
    }
    if board.unit_at(to).is_some() {
        return Err(RejectReason::TileOccupied);
    }
    if board.owner_of(to) != Some(unit.owner) {
        return Err(RejectReason::ForeignLand);
    }
    if !reachable_tiles(board, from, unit.owner, rules.movement_range).contains(&to) {
        return Err(RejectReason::OutOfRange);
    }
    Ok(())
}

/// Check an attack by the unit at `attacker` on the unit at `target`
pub fn validate_attack(
    board: &Board,
    rules: &RuleConfig,
    attacker: OffsetCoord,
    target: OffsetCoord,
) -> Result<(), RejectReason> {
    let unit = board.unit_at(attacker).ok_or(RejectReason::NoUnit)?;
    if unit.owner.is_neutral() {
        return Err(RejectReason::NeutralActor);
    }
    let defender = board.unit_at(target).ok_or(RejectReason::NoDefender)?;
    if defender.owner == unit.owner {
        return Err(RejectReason::FriendlyTarget);
    }
    if !capturable_tiles(board, attacker, unit.owner, rules.movement_range).contains(&target) {
        return Err(RejectReason::OutOfRange);
    }
    match battle_outcome(unit.kind, defender.kind) {
        BattleOutcome::AttackerWins => Ok(()),
        BattleOutcome::DefenderHolds => Err(RejectReason::Outmatched),
    }
}

/// Check whether the unit at `attacker` can take the land at `target`.
/// The defense is the stronger of the tile's protection and the power
/// of any unit standing on it.
pub fn validate_capture(
    board: &Board,
    rules: &RuleConfig,
    protection: &ProtectionMap,
    attacker: OffsetCoord,
    target: OffsetCoord,
) -> Result<(), RejectReason> {
    let unit = board.unit_at(attacker).ok_or(RejectReason::NoUnit)?;
    if unit.owner.is_neutral() {
        return Err(RejectReason::NeutralActor);
    }
    if !board.contains(target) {
        return Err(RejectReason::OffMap);
    }
    if board.owner_of(target) == Some(unit.owner) {
        return Err(RejectReason::FriendlyTarget);
    }
    if !capturable_tiles(board, attacker, unit.owner, rules.movement_range).contains(&target) {
        return Err(RejectReason::OutOfRange);
    }
    let defender_power = board.unit_at(target).map_or(0, |defender| defender.kind.power());
    let defense = defender_power.max(protection.get(target));
    if overcomes(unit.kind, defense) {
        Ok(())
    } else {
        Err(RejectReason::Outmatched)
    }
}

pub fn can_move(board: &Board, rules: &RuleConfig, from: OffsetCoord, to: OffsetCoord) -> bool {
    validate_move(board, rules, from, to).is_ok()
}

pub fn can_attack(board: &Board, rules: &RuleConfig, attacker: OffsetCoord, target: OffsetCoord) -> bool {
    validate_attack(board, rules, attacker, target).is_ok()
}

pub fn can_capture(
    board: &Board,
    rules: &RuleConfig,
    protection: &ProtectionMap,
    attacker: OffsetCoord,
    target: OffsetCoord,
) -> bool {
    validate_capture(board, rules, protection, attacker, target).is_ok()
}
