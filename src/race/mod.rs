//! Race entities: participants, boosts, the race itself and its log.
//!
//! ## Key Types
//!
//! - `Participant`: template data plus race-scoped score, boosts and stats
//! - `ActiveBoost`: a boost instance counting down its remaining rounds
//! - `Race`: roster, track, round counter, status and event log
//! - `EventLog`: append-only log of system, action and result entries
//! - `RaceView`: serializable snapshot handed to callers and kept as history
//!
//! Only the round resolver (and completion) mutates a race once created.

pub mod boost;
pub mod participant;
pub mod event_log;
pub mod state;
pub mod view;

pub use boost::ActiveBoost;
pub use participant::{Participant, TurnStats};
pub use event_log::{EventLog, LogCategory, LogEntry};
pub use state::{Race, RaceStatus};
pub use view::{format_elapsed, ParticipantView, RaceStats, RaceView, RankingEntry};
