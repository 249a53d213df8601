//! Rooms and the lobby registry
//!
//! A registry owns every open room, keyed by a 4-character join code.
//! Rooms hold their members and an authoritative game; they exist only
//! while someone is inside and vanish when the last member leaves.
//! Transport (sockets, broadcast fan-out) stays outside the crate: the
//! registry returns what to send and to whom, the caller delivers it.

use crate::board::records::parse_land_records;
use crate::board::Board;
use crate::core::config::RuleConfig;
use crate::core::error::{DominationError, Result};
use crate::core::types::ClientId;
use crate::engine::{ActionOutcome, Game};
use crate::maps;
use crate::net::{GameSnapshot, WireAction};
use ahash::AHashMap;
use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;
use serde::{Deserialize, Serialize};

const CODE_LEN: usize = 4;
const CODE_ALPHABET: &[u8] = b"0123456789ABCDEFGHIJKLMNOPQRSTUVWXYZ";
const MAX_PLAYER_NAME: usize = 20;
const DEFAULT_PLAYER_NAME: &str = "Player";
const DEFAULT_ROOM_NAME: &str = "ROOM";

/// A connected player inside a room
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Member {
    pub id: ClientId,
    pub name: String,
}

/// Options for opening a room
#[derive(Debug, Clone, Default)]
pub struct RoomOptions {
    pub name: Option<String>,
    pub capacity: Option<u32>,
    pub is_private: bool,
}

/// Lobby listing entry
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RoomSummary {
    pub code: String,
    pub name: String,
    pub capacity: u32,
    pub count: usize,
    pub is_private: bool,
}

/// Detailed room view, sent whenever membership changes
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RoomInfo {
    pub code: String,
    pub name: String,
    pub capacity: u32,
    pub is_private: bool,
    pub players: Vec<Member>,
}

/// One open room and its authoritative game
#[derive(Debug)]
pub struct Room {
    code: String,
    name: String,
    capacity: u32,
    is_private: bool,
    members: Vec<Member>,
    game: Game,
    started: bool,
}

impl Room {
    pub fn code(&self) -> &str {
        &self.code
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn capacity(&self) -> u32 {
        self.capacity
    }

    pub fn is_private(&self) -> bool {
        self.is_private
    }

    pub fn members(&self) -> &[Member] {
        &self.members
    }

    pub fn started(&self) -> bool {
        self.started
    }

    pub fn game(&self) -> &Game {
        &self.game
    }

    pub fn is_full(&self) -> bool {
        self.members.len() as u32 >= self.capacity
    }

    pub fn snapshot(&self) -> GameSnapshot {
        GameSnapshot::from_board(self.game.board(), self.started)
    }

    pub fn summary(&self) -> RoomSummary {
        RoomSummary {
            code: self.code.clone(),
            name: self.name.clone(),
            capacity: self.capacity,
            count: self.members.len(),
            is_private: self.is_private,
        }
    }

    pub fn info(&self) -> RoomInfo {
        RoomInfo {
            code: self.code.clone(),
            name: self.name.clone(),
            capacity: self.capacity,
            is_private: self.is_private,
            players: self.members.clone(),
        }
    }
}

/// Result of a start request
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum StartOutcome {
    /// First start; broadcast to the whole room
    Started(GameSnapshot),
    /// Already running; reply to the requester only
    AlreadyStarted(GameSnapshot),
}

/// What the caller should do with the result of a wire action
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ActionDisposition {
    /// Applied; broadcast the new state to the whole room
    Broadcast(GameSnapshot),
    /// Rejected; resend the authoritative state to the requester
    Resync(GameSnapshot),
    /// Room not started yet; drop silently
    Ignored,
}

/// The lobby: every open room plus who is where
#[derive(Debug)]
pub struct RoomRegistry {
    rooms: AHashMap<String, Room>,
    memberships: AHashMap<ClientId, String>,
    rules: RuleConfig,
    rng: ChaCha8Rng,
}

impl RoomRegistry {
    pub fn new(rules: RuleConfig, seed: u64) -> Self {
        Self {
            rooms: AHashMap::new(),
            memberships: AHashMap::new(),
            rules,
            rng: ChaCha8Rng::seed_from_u64(seed),
        }
    }

    pub fn len(&self) -> usize {
        self.rooms.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rooms.is_empty()
    }

    pub fn room(&self, code: &str) -> Option<&Room> {
        self.rooms.get(&normalize_code(code))
    }

    /// The room the client currently sits in, if any
    pub fn member_room(&self, client: ClientId) -> Option<&Room> {
        self.memberships
            .get(&client)
            .and_then(|code| self.rooms.get(code))
    }

    /// Open a room and put the creator inside. Leaves any previous
    /// room first.
    pub fn create(&mut self, client: ClientId, player_name: &str, options: RoomOptions) -> &Room {
        let code = self.generate_code();
        let name = options
            .name
            .filter(|n| !n.is_empty())
            .unwrap_or_else(|| DEFAULT_ROOM_NAME.to_string());
        let capacity = self.rules.clamp_capacity(options.capacity);

        self.leave(client);

        let seed = self.rng.gen();
        let room = Room {
            code: code.clone(),
            name,
            capacity,
            is_private: options.is_private,
            members: vec![Member {
                id: client,
                name: normalize_player_name(player_name),
            }],
            game: Game::new(Board::default(), self.rules.clone(), seed),
            started: false,
        };
        tracing::info!("room {} created, capacity {}", code, capacity);
        self.memberships.insert(client, code.clone());
        self.rooms.entry(code).or_insert(room)
    }

    /// Join a room by code. Codes are case-insensitive. Checks run
    /// before the client leaves its previous room, so a failed join
    /// leaves current membership untouched.
    pub fn join(&mut self, client: ClientId, player_name: &str, code: &str) -> Result<GameSnapshot> {
        let code = normalize_code(code);
        let room = self
            .rooms
            .get(&code)
            .ok_or_else(|| DominationError::RoomNotFound(code.clone()))?;
        if room.is_full() {
            // capacity counts the requester, so rejoining a full room
            // still fails
            return Err(DominationError::RoomFull(code));
        }
        if self.memberships.get(&client) == Some(&code) {
            return Ok(room.snapshot());
        }

        self.leave(client);

        let room = self
            .rooms
            .get_mut(&code)
            .ok_or_else(|| DominationError::RoomNotFound(code.clone()))?;
        if !room.members.iter().any(|m| m.id == client) {
            room.members.push(Member {
                id: client,
                name: normalize_player_name(player_name),
            });
        }
        self.memberships.insert(client, code);
        Ok(room.snapshot())
    }

    /// Drop the client from its room. Returns the code left, if any.
    /// The room is closed once its last member is gone.
    pub fn leave(&mut self, client: ClientId) -> Option<String> {
        let code = self.memberships.remove(&client)?;
        if let Some(room) = self.rooms.get_mut(&code) {
            room.members.retain(|m| m.id != client);
            if room.members.is_empty() {
                self.rooms.remove(&code);
                tracing::info!("room {} closed", code);
            }
        }
        Some(code)
    }

    /// Lobby listing, private rooms included, sorted by code
    pub fn list(&self) -> Vec<RoomSummary> {
        let mut list: Vec<RoomSummary> = self.rooms.values().map(Room::summary).collect();
        list.sort_by(|a, b| a.code.cmp(&b.code));
        list
    }

    /// Start the requester's game. The first start installs the given
    /// land records, or the built-in map when none are supplied, and
    /// should be broadcast; repeat starts just return the current
    /// state for the requester.
    pub fn start(
        &mut self,
        client: ClientId,
        land_data: Option<&[String]>,
    ) -> Result<StartOutcome> {
        let code = self
            .memberships
            .get(&client)
            .cloned()
            .ok_or(DominationError::NotInRoom)?;
        let seed = self.rng.gen();
        let room = self
            .rooms
            .get_mut(&code)
            .ok_or(DominationError::RoomNotFound(code))?;

        if room.started {
            return Ok(StartOutcome::AlreadyStarted(room.snapshot()));
        }

        let records = match land_data {
            Some(lines) if !lines.is_empty() => {
                parse_land_records(lines.iter().map(String::as_str))?
            }
            _ => maps::default_land_records(),
        };
        let board = Board::from_land_records(&records)?;
        room.game = Game::new(board, self.rules.clone(), seed);
        room.started = true;
        tracing::info!("room {} started with {} tiles", room.code, room.game.board().len());
        Ok(StartOutcome::Started(room.snapshot()))
    }

    /// Run one wire action through the requester's game
    pub fn apply(&mut self, client: ClientId, action: &WireAction) -> Result<ActionDisposition> {
        let code = self
            .memberships
            .get(&client)
            .ok_or(DominationError::NotInRoom)?;
        let room = self
            .rooms
            .get_mut(code)
            .ok_or_else(|| DominationError::RoomNotFound(code.clone()))?;

        if !room.started {
            return Ok(ActionDisposition::Ignored);
        }

        match room.game.apply(&action.to_game_action()) {
            ActionOutcome::Applied => Ok(ActionDisposition::Broadcast(room.snapshot())),
            ActionOutcome::Rejected(reason) => {
                tracing::debug!("action in room {} rejected: {:?}", room.code, reason);
                Ok(ActionDisposition::Resync(room.snapshot()))
            }
        }
    }

    fn generate_code(&mut self) -> String {
        loop {
            let code: String = (0..CODE_LEN)
                .map(|_| CODE_ALPHABET[self.rng.gen_range(0..CODE_ALPHABET.len())] as char)
                .collect();
            if !self.rooms.contains_key(&code) {
                return code;
            }
        }
    }
}

fn normalize_code(code: &str) -> String {
    code.to_uppercase()
}

fn normalize_player_name(name: &str) -> String {
    if name.is_empty() {
        DEFAULT_PLAYER_NAME.to_string()
    } else {
        name.chars().take(MAX_PLAYER_NAME).collect()
    }
}
