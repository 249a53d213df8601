//! Domination - Multiplayer Hex Conquest Engine

pub mod board;
pub mod core;
pub mod engine;
pub mod hex;
pub mod maps;
pub mod net;
pub mod room;
