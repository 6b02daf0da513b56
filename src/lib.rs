//! # rust-kart
//!
//! A turn-based kart race simulation engine.
//!
//! A race pits two or more participants against each other on a track for
//! a fixed number of rounds. Each round draws one block type (straight,
//! curve or confrontation) from the track's probability table, every
//! participant rolls against the matching attribute, and random boosts
//! temporarily modify attributes. The highest score after the last round
//! wins.
//!
//! ## Design Principles
//!
//! 1. **Injectable randomness**: everything random goes through
//!    `RandomSource`, so races replay exactly under a seeded or scripted
//!    source.
//!
//! 2. **Owned state**: a `RaceService` owns its active races and history.
//!    There is no process-wide registry.
//!
//! 3. **Snapshots out**: callers receive `RaceView` values, never
//!    references into live races.
//!
//! ## Modules
//!
//! - `core`: ids, random sources, configuration, errors
//! - `catalog`: participant, track and boost templates
//! - `race`: participants, boosts, races, event log, snapshots
//! - `engine`: round resolver and full simulation
//! - `session`: race service with active registry and history

pub mod core;
pub mod catalog;
pub mod race;
pub mod engine;
pub mod session;

// Re-export commonly used types
pub use crate::core::{
    BoostId, ParticipantId, RaceId, TrackId,
    GameRng, RandomSource, ScriptedRng,
    EngineConfig,
    CatalogError, ConfigError, ErrorKind, RaceError,
};

pub use crate::catalog::{
    Attribute, Attributes, BlockType, BlockWeight,
    BoostEffect, BoostTemplate, Catalog, ParticipantTemplate, TrackTemplate,
};

pub use crate::race::{
    ActiveBoost, Participant, TurnStats,
    EventLog, LogCategory, LogEntry,
    Race, RaceStatus, RaceStats, RaceView, ParticipantView, RankingEntry,
};

pub use crate::engine::{
    CancelToken, ConfrontationResult, RoundResolver, RoundResult, SimulationOutcome, TurnOutcome,
};

pub use crate::session::{CreatedRace, RaceService, RoundUpdate};
