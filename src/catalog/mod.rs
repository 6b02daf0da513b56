//! Catalog system: immutable racer, track and boost templates.
//!
//! ## Key Types
//!
//! - `ParticipantTemplate`: racer identity, display data and base attributes
//! - `TrackTemplate`: lap count and block probability table
//! - `BoostTemplate`: power-up effect and duration
//! - `Catalog`: validated, read-only template lookup
//!
//! The built-in catalog is embedded at compile time and loaded once per
//! service.

pub mod definition;
pub mod registry;

pub use definition::{
    Attribute, Attributes, BlockType, BlockWeight, BoostEffect, BoostTemplate,
    ParticipantTemplate, TrackTemplate,
};
pub use registry::Catalog;
