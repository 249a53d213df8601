//! Built-in map and the map file catalog
//!
//! Map files are plain land-record text named `<capacity>p_<name>.txt`,
//! kept under `maps/`. Selection prefers an exact capacity match, then
//! the smallest capacity above the request, then anything; with no
//! usable file the room degrades to an empty map.

use crate::board::records::{parse_land_records, LandRecord};
use crate::board::Board;
use crate::core::error::Result;
use rand::Rng;
use std::path::{Path, PathBuf};

/// The built-in map: a long two-lobed continent with neutral
/// watchtowers guarding the passes, sized for up to four players.
pub const DEFAULT_MAP: &str = "7 -4 1
7 -3 0
8 -3 0
7 -2 0
6 -2 0
8 -2 0
7 -1 0
8 -1 0
7 0 0
6 1 0 tower
6 0 0
6 -1 0
5 -2 0
6 -3 0
6 -4 1
5 1 0
5 2 0
5 3 0
5 4 0
7 1 0
8 2 0
7 3 0
8 4 0
5 -1 0
4 0 0 strong_tower
3 1 0
3 2 0
2 3 0
3 4 0
3 6 0
9 0 0 strong_tower
9 1 0
10 2 0
10 3 0
10 4 0
10 6 0
5 -3 0
7 -5 0
6 -5 1
8 -4 0
5 5 0
5 6 0
7 5 0
8 6 0
5 7 0
5 8 0
7 7 0
8 8 0
2 7 0
3 5 0
9 5 0
10 7 0
10 8 0
3 8 0
2 9 0
3 10 0
3 11 0
3 12 0
2 13 0
3 14 0
3 15 0
4 16 0 strong_tower
4 17 0
5 9 0
5 10 0
5 11 0
5 12 0
5 13 0
5 14 0
5 15 0
6 16 0
7 9 0
8 10 0
7 11 0
8 12 0
7 13 0
8 14 0
6 15 0 tower
7 15 0
7 16 0
5 17 0
6 17 0
7 17 0
10 9 0
10 10 0
9 11 0
10 12 0
10 13 0
10 14 0
9 15 0
9 16 0 strong_tower
5 18 0
6 18 1
7 18 0
8 18 0
4 19 0
5 19 0
6 19 1
7 19 0
8 19 0
5 20 0
6 20 2
7 20 2
8 20 0
5 21 0
6 21 2
7 21 0
6 8 0
7 8 0
8 17 0
4 -1 0
4 -3 0
5 -4 0
5 -5 0
";

/// Parsed records of the built-in map
pub fn default_land_records() -> Vec<LandRecord> {
    parse_land_records(DEFAULT_MAP.lines()).expect("built-in map is well-formed")
}

/// A fresh board on the built-in map
pub fn default_board() -> Board {
    Board::from_land_records(&default_land_records()).expect("built-in map has unique tiles")
}

/// Read one map file as land records
pub fn load_map_file(path: &Path) -> Result<Vec<LandRecord>> {
    let content = std::fs::read_to_string(path)?;
    parse_land_records(content.lines())
}

/// One discovered map file
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MapEntry {
    pub capacity: u32,
    pub path: PathBuf,
}

/// Maps discovered in a directory, selectable by player count
#[derive(Debug, Clone, Default)]
pub struct MapCatalog {
    entries: Vec<MapEntry>,
}

impl MapCatalog {
    /// Scan a directory for `<capacity>p_*.txt` files. Files without a
    /// capacity prefix are skipped with a warning.
    pub fn scan(dir: &Path) -> Result<Self> {
        let mut entries = Vec::new();
        for entry in std::fs::read_dir(dir)? {
            let path = entry?.path();
            if path.extension().and_then(|e| e.to_str()) != Some("txt") {
                continue;
            }
            let stem = match path.file_stem().and_then(|s| s.to_str()) {
                Some(stem) => stem,
                None => continue,
            };
            match parse_capacity_prefix(stem) {
                Some(capacity) => entries.push(MapEntry { capacity, path }),
                None => {
                    tracing::warn!("map file {:?} has no capacity prefix, skipping", path);
                }
            }
        }
        entries.sort_by(|a, b| (a.capacity, &a.path).cmp(&(b.capacity, &b.path)));
        Ok(Self { entries })
    }

    pub fn entries(&self) -> &[MapEntry] {
        &self.entries
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Pick a map for the wanted player count: exact capacity first,
    /// then the smallest larger capacity, then anything at all.
    /// Uniform among equals.
    pub fn select(&self, capacity: u32, rng: &mut impl Rng) -> Option<&MapEntry> {
        let exact: Vec<&MapEntry> = self
            .entries
            .iter()
            .filter(|e| e.capacity == capacity)
            .collect();
        if !exact.is_empty() {
            return Some(exact[rng.gen_range(0..exact.len())]);
        }

        if let Some(next_cap) = self
            .entries
            .iter()
            .filter(|e| e.capacity > capacity)
            .map(|e| e.capacity)
            .min()
        {
            let pool: Vec<&MapEntry> = self
                .entries
                .iter()
                .filter(|e| e.capacity == next_cap)
                .collect();
            return Some(pool[rng.gen_range(0..pool.len())]);
        }

        if self.entries.is_empty() {
            return None;
        }
        Some(&self.entries[rng.gen_range(0..self.entries.len())])
    }

    /// Land records for a room of the given capacity. Selection or
    /// read failures degrade to the empty map with a warning, never an
    /// error: a zero-tile room is degenerate but playable.
    pub fn load(&self, capacity: u32, rng: &mut impl Rng) -> Vec<LandRecord> {
        let entry = match self.select(capacity, rng) {
            Some(entry) => entry,
            None => {
                tracing::warn!("no map available for {} players, using an empty map", capacity);
                return Vec::new();
            }
        };
        match load_map_file(&entry.path) {
            Ok(records) => records,
            Err(e) => {
                tracing::warn!("failed to load map {:?}: {}, using an empty map", entry.path, e);
                Vec::new()
            }
        }
    }
}

fn parse_capacity_prefix(stem: &str) -> Option<u32> {
    let (digits, _) = stem.split_once("p_")?;
    digits.parse().ok()
}
