use thiserror::Error;

#[derive(Error, Debug)]
pub enum DominationError {
    #[error("Malformed land record: {0}")]
    MalformedLandRecord(String),

    #[error("Malformed unit record: {0}")]
    MalformedUnitRecord(String),

    #[error("Unknown unit kind: {0}")]
    UnknownUnitKind(String),

    #[error("Unknown structure kind: {0}")]
    UnknownStructureKind(String),

    #[error("Duplicate land record for tile ({row}, {col})")]
    DuplicateTile { row: i32, col: i32 },

    #[error("Duplicate unit record for tile ({row}, {col})")]
    DuplicateUnit { row: i32, col: i32 },

    #[error("Unit record at ({row}, {col}) has no matching land tile")]
    UnitOffMap { row: i32, col: i32 },

    #[error("Config error: {0}")]
    ConfigError(String),

    #[error("Room not found: {0}")]
    RoomNotFound(String),

    #[error("Room is full: {0}")]
    RoomFull(String),

    #[error("Client is not in any room")]
    NotInRoom,

    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    SerdeError(#[from] serde_json::Error),
}

pub type Result<T> = std::result::Result<T, DominationError>;
