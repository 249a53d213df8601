//! Text records for land and units
//!
//! Land: `"<row> <col> <owner>"` with an optional trailing structure
//! token. Units: `"<row> <col> <owner> <kind>"`. These strings are the
//! map file format and the wire snapshot format.

use crate::core::error::{DominationError, Result};
use crate::core::types::{PlayerId, StructureKind, UnitKind};
use std::fmt;
use std::str::FromStr;

/// One land tile in text form
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LandRecord {
    pub row: i32,
    pub col: i32,
    pub owner: PlayerId,
    pub structure: Option<StructureKind>,
}

impl FromStr for LandRecord {
    type Err = DominationError;

    fn from_str(s: &str) -> Result<Self> {
        let malformed = || DominationError::MalformedLandRecord(s.to_string());
        let mut parts = s.split_whitespace();

        let row: i32 = parts.next().ok_or_else(malformed)?.parse().map_err(|_| malformed())?;
        let col: i32 = parts.next().ok_or_else(malformed)?.parse().map_err(|_| malformed())?;
        let owner: u32 = parts.next().ok_or_else(malformed)?.parse().map_err(|_| malformed())?;

        let structure = match parts.next() {
            Some(token) => Some(
                StructureKind::from_token(token)
                    .ok_or_else(|| DominationError::UnknownStructureKind(token.to_string()))?,
            ),
            None => None,
        };

        if parts.next().is_some() {
            return Err(malformed());
        }

        Ok(Self { row, col, owner: PlayerId(owner), structure })
    }
}

impl fmt::Display for LandRecord {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {} {}", self.row, self.col, self.owner.0)?;
        if let Some(kind) = self.structure {
            write!(f, " {}", kind.token())?;
        }
        Ok(())
    }
}

/// One unit in text form
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct UnitRecord {
    pub row: i32,
    pub col: i32,
    pub owner: PlayerId,
    pub kind: UnitKind,
}

impl FromStr for UnitRecord {
    type Err = DominationError;

    fn from_str(s: &str) -> Result<Self> {
        let malformed = || DominationError::MalformedUnitRecord(s.to_string());
        let mut parts = s.split_whitespace();

        let row: i32 = parts.next().ok_or_else(malformed)?.parse().map_err(|_| malformed())?;
        let col: i32 = parts.next().ok_or_else(malformed)?.parse().map_err(|_| malformed())?;
        let owner: u32 = parts.next().ok_or_else(malformed)?.parse().map_err(|_| malformed())?;

        let token = parts.next().ok_or_else(malformed)?;
        let kind = UnitKind::from_token(token)
            .ok_or_else(|| DominationError::UnknownUnitKind(token.to_string()))?;

        if parts.next().is_some() {
            return Err(malformed());
        }

        Ok(Self { row, col, owner: PlayerId(owner), kind })
    }
}

impl fmt::Display for UnitRecord {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {} {} {}", self.row, self.col, self.owner.0, self.kind.token())
    }
}

/// Parse a batch of land records, skipping blank lines
pub fn parse_land_records<'a>(lines: impl IntoIterator<Item = &'a str>) -> Result<Vec<LandRecord>> {
    lines
        .into_iter()
        .filter(|line| !line.trim().is_empty())
        .map(str::parse)
        .collect()
}

/// Parse a batch of unit records, skipping blank lines
pub fn parse_unit_records<'a>(lines: impl IntoIterator<Item = &'a str>) -> Result<Vec<UnitRecord>> {
    lines
        .into_iter()
        .filter(|line| !line.trim().is_empty())
        .map(str::parse)
        .collect()
}
