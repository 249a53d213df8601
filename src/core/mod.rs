pub mod config;
pub mod error;
pub mod types;

pub use config::RuleConfig;
pub use error::{DominationError, Result};
pub use types::{ClientId, PlayerId, StructureKind, UnitKind};
