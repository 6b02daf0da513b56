//! Round resolution and full-race simulation.
//!
//! ## Key Types
//!
//! - `RoundResolver`: draws blocks, resolves turns, hands out boosts
//! - `RoundResult`: per-round outcomes, live ranking and stats
//! - `SimulationOutcome`: everything a full simulation produced
//! - `CancelToken`: stops a simulation between rounds

pub mod resolver;
pub mod simulate;
pub mod turn;

pub use resolver::{BoostGrant, RoundResolver, RoundResult};
pub use simulate::{CancelToken, SimulationOutcome};
pub use turn::{resolve_confrontation, Confrontation, ConfrontationResult, TurnOutcome};
