//! Session-scoped race registry and history.
//!
//! `RaceService` is the only type here. It creates races from catalog ids,
//! drives them through the round resolver, and moves each finished race
//! from the active registry into the history.

pub mod service;

pub use service::{CreatedRace, RaceService, RoundUpdate, ServiceInfo};
