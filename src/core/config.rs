//! Tunable rule constants for the game engine
//!
//! Every match carries its own `RuleConfig`; there is no global config.
//! Values can be overridden from a TOML file, absent keys keep defaults.

use crate::core::error::DominationError;
use crate::core::types::StructureKind;
use std::path::Path;

/// Rule constants governing movement, protection and rooms
#[derive(Debug, Clone, PartialEq)]
pub struct RuleConfig {
    /// How many steps of owned territory a unit covers in one move
    pub movement_range: u32,

    /// Protection granted by a tower to its tile and same-owner neighbors
    pub tower_protection: u32,

    /// Protection granted by a strong tower
    pub strong_tower_protection: u32,

    /// Protection granted by a castle. Set to 0 to make castles
    /// purely territorial markers with no defensive value.
    pub castle_protection: u32,

    /// Smallest connected territory that counts as a region
    /// and is entitled to a castle
    pub min_region_tiles: usize,

    /// Smallest allowed room capacity
    pub min_room_capacity: u32,

    /// Largest allowed room capacity
    pub max_room_capacity: u32,

    /// Capacity used when a room is created without one
    pub default_room_capacity: u32,
}

impl Default for RuleConfig {
    fn default() -> Self {
        Self {
            movement_range: 4,
            tower_protection: 2,
            strong_tower_protection: 3,
            castle_protection: 1,
            min_region_tiles: 2,
            min_room_capacity: 2,
            max_room_capacity: 6,
            default_room_capacity: 4,
        }
    }
}

impl RuleConfig {
    pub fn new() -> Self {
        Self::default()
    }

    /// Protection contributed by a structure of the given kind
    pub fn structure_protection(&self, kind: StructureKind) -> u32 {
        match kind {
            StructureKind::House => 0,
            StructureKind::Tower => self.tower_protection,
            StructureKind::StrongTower => self.strong_tower_protection,
            StructureKind::Castle => self.castle_protection,
        }
    }

    /// Resolve a requested room capacity. Absent or zero requests fall
    /// back to the default, everything is clamped into the allowed band.
    pub fn clamp_capacity(&self, requested: Option<u32>) -> u32 {
        let wanted = match requested {
            None | Some(0) => self.default_room_capacity,
            Some(c) => c,
        };
        wanted.clamp(self.min_room_capacity, self.max_room_capacity)
    }

    /// Parse a TOML override file on top of the defaults
    pub fn from_toml_str(content: &str) -> Result<Self, DominationError> {
        let toml: toml::Value = content
            .parse()
            .map_err(|e| DominationError::ConfigError(format!("Invalid TOML: {}", e)))?;

        let mut config = RuleConfig::default();

        if let Some(v) = read_u32(&toml, "movement_range") {
            config.movement_range = v;
        }
        if let Some(v) = read_u32(&toml, "tower_protection") {
            config.tower_protection = v;
        }
        if let Some(v) = read_u32(&toml, "strong_tower_protection") {
            config.strong_tower_protection = v;
        }
        if let Some(v) = read_u32(&toml, "castle_protection") {
            config.castle_protection = v;
        }
        if let Some(v) = read_u32(&toml, "min_region_tiles") {
            config.min_region_tiles = v as usize;
        }
        if let Some(v) = read_u32(&toml, "min_room_capacity") {
            config.min_room_capacity = v;
        }
        if let Some(v) = read_u32(&toml, "max_room_capacity") {
            config.max_room_capacity = v;
        }
        if let Some(v) = read_u32(&toml, "default_room_capacity") {
            config.default_room_capacity = v;
        }

        config.validate().map_err(DominationError::ConfigError)?;
        Ok(config)
    }

    /// Load rule overrides from a file path
    pub fn load(path: &Path) -> Result<Self, DominationError> {
        let content = std::fs::read_to_string(path)?;
        Self::from_toml_str(&content)
    }

    /// Check that the constants describe a playable rule set
    pub fn validate(&self) -> Result<(), String> {
        if self.movement_range == 0 {
            return Err("movement_range must be at least 1".to_string());
        }
        if self.min_region_tiles == 0 {
            return Err("min_region_tiles must be at least 1".to_string());
        }
        if self.min_room_capacity == 0 {
            return Err("min_room_capacity must be at least 1".to_string());
        }
        if self.min_room_capacity > self.max_room_capacity {
            return Err(format!(
                "min_room_capacity {} exceeds max_room_capacity {}",
                self.min_room_capacity, self.max_room_capacity
            ));
        }
        Ok(())
    }
}

fn read_u32(toml: &toml::Value, key: &str) -> Option<u32> {
    toml.get(key)
        .and_then(|v| v.as_integer())
        .and_then(|v| u32::try_from(v).ok())
}
