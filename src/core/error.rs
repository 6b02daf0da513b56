//! Error types for the race engine.
//!
//! `RaceError` is what callers of the engine see. Catalog and configuration
//! loading have their own error enums since they fail before any race
//! exists.

use thiserror::Error;

use super::ids::{ParticipantId, RaceId, TrackId};
use crate::race::RaceStatus;

/// Minimum number of participants in a race.
pub const MIN_PARTICIPANTS: usize = 2;

/// Coarse classification of a `RaceError`.
///
/// A transport layer maps these to response codes.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ErrorKind {
    /// Bad race-creation input.
    Validation,
    /// Race id not present in the active registry.
    NotFound,
    /// Operation not allowed in the race's current status.
    InvalidState,
}

/// Errors reported at the engine boundary.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum RaceError {
    #[error("at least {min} participants are required (got {got})")]
    TooFewParticipants { min: usize, got: usize },
    #[error("participant not found: {0}")]
    UnknownParticipant(ParticipantId),
    #[error("track not found: {0}")]
    UnknownTrack(TrackId),
    #[error("race not found: {0}")]
    NotFound(RaceId),
    #[error("race {race_id} has already been started or finished (status {status})")]
    InvalidState { race_id: RaceId, status: RaceStatus },
}

impl RaceError {
    /// Classify this error.
    #[must_use]
    pub fn kind(&self) -> ErrorKind {
        match self {
            RaceError::TooFewParticipants { .. }
            | RaceError::UnknownParticipant(_)
            | RaceError::UnknownTrack(_) => ErrorKind::Validation,
            RaceError::NotFound(_) => ErrorKind::NotFound,
            RaceError::InvalidState { .. } => ErrorKind::InvalidState,
        }
    }
}

/// Errors raised while loading or validating a catalog.
#[derive(Debug, Error)]
pub enum CatalogError {
    #[error("catalog JSON could not be parsed: {0}")]
    Parse(#[from] serde_json::Error),
    #[error("duplicate {kind} id: {id}")]
    DuplicateId { kind: &'static str, id: String },
    #[error("track {track} must have at least one lap")]
    ZeroLaps { track: String },
    #[error("track {track} has no blocks")]
    EmptyBlocks { track: String },
    #[error("track {track} has a block probability outside [0, 1]: {probability}")]
    ProbabilityOutOfRange { track: String, probability: f64 },
    #[error("track {track} block probabilities sum to {sum:.6}, expected 1")]
    ProbabilitySum { track: String, sum: f64 },
    #[error("participant {participant} has a non-positive {attribute}")]
    NonPositiveAttribute {
        participant: String,
        attribute: &'static str,
    },
    #[error("boost {boost} must last at least one round")]
    ZeroDuration { boost: String },
}

/// Errors raised when engine configuration invariants are violated.
#[derive(Debug, Error, PartialEq)]
pub enum ConfigError {
    #[error("config JSON could not be parsed: {0}")]
    Parse(String),
    #[error("boost_chance must be between 0 and 1 (got {0:.3})")]
    BoostChance(f64),
    #[error("blocks_per_lap must be at least 1")]
    ZeroBlocksPerLap,
    #[error("dice_sides must be at least 1 (got {0})")]
    DiceSides(i32),
    #[error("history_capacity must be at least 1")]
    ZeroHistoryCapacity,
}
