//! Odd-q offset hex grid math
//!
//! Tiles are flat-top hexes addressed by (row, col) with odd columns
//! offset half a hex. Adjacency and distance convert through cube space.

use serde::{Deserialize, Serialize};

/// Position of a hex tile as (row, col) in odd-q offset form.
/// Ordering is row-major, which keeps iteration deterministic.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct OffsetCoord {
    pub row: i32,
    pub col: i32,
}

impl OffsetCoord {
    pub fn new(row: i32, col: i32) -> Self {
        Self { row, col }
    }

    /// Convert to cube coordinates
    pub fn to_cube(&self) -> CubeCoord {
        let x = self.col;
        let z = self.row - ((self.col - (self.col & 1)) / 2);
        CubeCoord { x, y: -x - z, z }
    }

    /// The six adjacent positions, in a fixed order
    pub fn neighbors(&self) -> [OffsetCoord; 6] {
        let cube = self.to_cube();
        CUBE_DIRECTIONS.map(|dir| (cube + dir).to_offset())
    }

    /// Hex grid distance to another tile
    pub fn distance(&self, other: &OffsetCoord) -> u32 {
        self.to_cube().distance(&other.to_cube())
    }
}

/// Cube-space coordinate. Valid coordinates satisfy x + y + z == 0.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct CubeCoord {
    pub x: i32,
    pub y: i32,
    pub z: i32,
}

/// Unit steps to the six cube-space neighbors. The order here fixes the
/// order of [`OffsetCoord::neighbors`].
pub const CUBE_DIRECTIONS: [CubeCoord; 6] = [
    CubeCoord { x: 1, y: -1, z: 0 },
    CubeCoord { x: 1, y: 0, z: -1 },
    CubeCoord { x: 0, y: 1, z: -1 },
    CubeCoord { x: -1, y: 1, z: 0 },
    CubeCoord { x: -1, y: 0, z: 1 },
    CubeCoord { x: 0, y: -1, z: 1 },
];

impl CubeCoord {
    /// Convert back to odd-q offset form
    pub fn to_offset(&self) -> OffsetCoord {
        let row = self.z + ((self.x - (self.x & 1)) / 2);
        OffsetCoord { row, col: self.x }
    }

    /// Chebyshev-style cube distance
    pub fn distance(&self, other: &CubeCoord) -> u32 {
        let dx = (self.x - other.x).unsigned_abs();
        let dy = (self.y - other.y).unsigned_abs();
        let dz = (self.z - other.z).unsigned_abs();
        dx.max(dy).max(dz)
    }
}

impl std::ops::Add for CubeCoord {
    type Output = Self;
    fn add(self, rhs: Self) -> Self {
        Self {
            x: self.x + rhs.x,
            y: self.y + rhs.y,
            z: self.z + rhs.z,
        }
    }
}
