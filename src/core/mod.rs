//! Core engine types: identifiers, random sources, configuration, errors.
//!
//! This module contains the building blocks shared by every other module.
//! Nothing in here knows about dice rules or block types.

pub mod ids;
pub mod rng;
pub mod config;
pub mod error;

pub use ids::{BoostId, ParticipantId, RaceId, TrackId};
pub use rng::{GameRng, RandomSource, ScriptedRng};
pub use config::EngineConfig;
pub use error::{CatalogError, ConfigError, ErrorKind, RaceError, MIN_PARTICIPANTS};
