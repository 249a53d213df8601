pub mod actions;
pub mod combat;
pub mod protection;
pub mod reachability;
pub mod regions;

pub use actions::{ActionOutcome, Game, GameAction};
pub use combat::{battle_outcome, BattleOutcome, RejectReason};
pub use protection::{tile_protection, ProtectionMap};
pub use reachability::{capturable_tiles, reachable_tiles};
pub use regions::{distribute_castles, find_regions, Region};
