//! Catalog of templates with id lookup.
//!
//! The `Catalog` is loaded once and never mutated afterwards. Listing order
//! is the order of the source data; lookups go through an id index.

use rustc_hash::{FxHashMap, FxHashSet};
use serde::Deserialize;

use super::definition::{BoostTemplate, ParticipantTemplate, TrackTemplate};
use crate::core::{CatalogError, ParticipantId, TrackId};

const BUILTIN_CATALOG: &str = include_str!("data/catalog.json");

const PROBABILITY_TOLERANCE: f64 = 1e-6;

#[derive(Deserialize)]
struct CatalogData {
    #[serde(default)]
    participants: Vec<ParticipantTemplate>,
    #[serde(default)]
    tracks: Vec<TrackTemplate>,
    #[serde(default)]
    boosts: Vec<BoostTemplate>,
}

/// Read-only collection of participant, track and boost templates.
///
/// ## Example
///
/// ```
/// use rust_kart::catalog::Catalog;
/// use rust_kart::core::{ParticipantId, TrackId};
///
/// let catalog = Catalog::builtin().unwrap();
///
/// let mario = catalog.participant(&ParticipantId::new("mario")).unwrap();
/// assert_eq!(mario.name, "Mario");
///
/// let circuit = catalog.track(&TrackId::new("mario-circuit")).unwrap();
/// assert_eq!(circuit.laps, 3);
/// ```
#[derive(Clone, Debug, Default)]
pub struct Catalog {
    participants: Vec<ParticipantTemplate>,
    tracks: Vec<TrackTemplate>,
    boosts: Vec<BoostTemplate>,
    participant_index: FxHashMap<ParticipantId, usize>,
    track_index: FxHashMap<TrackId, usize>,
}

impl Catalog {
    /// Load the catalog embedded in the crate.
    ///
    /// # Errors
    ///
    /// Only fails if the embedded data is broken.
    pub fn builtin() -> Result<Self, CatalogError> {
        Self::from_json(BUILTIN_CATALOG)
    }

    /// Parse and validate a catalog from JSON.
    ///
    /// # Errors
    ///
    /// Returns an error if the JSON is malformed or any template violates a
    /// catalog invariant.
    pub fn from_json(json: &str) -> Result<Self, CatalogError> {
        let data: CatalogData = serde_json::from_str(json)?;
        Self::from_parts(data.participants, data.tracks, data.boosts)
    }

    /// Build a catalog from already-constructed templates.
    ///
    /// # Errors
    ///
    /// Returns an error if any template violates a catalog invariant.
    pub fn from_parts(
        participants: Vec<ParticipantTemplate>,
        tracks: Vec<TrackTemplate>,
        boosts: Vec<BoostTemplate>,
    ) -> Result<Self, CatalogError> {
        let mut participant_index = FxHashMap::default();
        for (idx, template) in participants.iter().enumerate() {
            validate_participant(template)?;
            if participant_index.insert(template.id.clone(), idx).is_some() {
                return Err(CatalogError::DuplicateId {
                    kind: "participant",
                    id: template.id.to_string(),
                });
            }
        }

        let mut track_index = FxHashMap::default();
        for (idx, track) in tracks.iter().enumerate() {
            validate_track(track)?;
            if track_index.insert(track.id.clone(), idx).is_some() {
                return Err(CatalogError::DuplicateId {
                    kind: "track",
                    id: track.id.to_string(),
                });
            }
        }

        let mut boost_ids = FxHashSet::default();
        for boost in &boosts {
            if boost.duration == 0 {
                return Err(CatalogError::ZeroDuration { boost: boost.id.to_string() });
            }
            if !boost_ids.insert(boost.id.clone()) {
                return Err(CatalogError::DuplicateId {
                    kind: "boost",
                    id: boost.id.to_string(),
                });
            }
        }

        Ok(Self {
            participants,
            tracks,
            boosts,
            participant_index,
            track_index,
        })
    }

    /// Look up a participant template.
    #[must_use]
    pub fn participant(&self, id: &ParticipantId) -> Option<&ParticipantTemplate> {
        self.participant_index.get(id).map(|&idx| &self.participants[idx])
    }

    /// Look up a track template.
    #[must_use]
    pub fn track(&self, id: &TrackId) -> Option<&TrackTemplate> {
        self.track_index.get(id).map(|&idx| &self.tracks[idx])
    }

    /// All participant templates in catalog order.
    #[must_use]
    pub fn participants(&self) -> &[ParticipantTemplate] {
        &self.participants
    }

    /// All track templates in catalog order.
    #[must_use]
    pub fn tracks(&self) -> &[TrackTemplate] {
        &self.tracks
    }

    /// All boost templates in catalog order.
    #[must_use]
    pub fn boosts(&self) -> &[BoostTemplate] {
        &self.boosts
    }
}

fn validate_participant(template: &ParticipantTemplate) -> Result<(), CatalogError> {
    let attrs = template.attributes;
    for (attribute, value) in [
        ("speed", attrs.speed),
        ("handling", attrs.handling),
        ("power", attrs.power),
    ] {
        if value == 0 {
            return Err(CatalogError::NonPositiveAttribute {
                participant: template.id.to_string(),
                attribute,
            });
        }
    }
    Ok(())
}

fn validate_track(track: &TrackTemplate) -> Result<(), CatalogError> {
    if track.laps == 0 {
        return Err(CatalogError::ZeroLaps { track: track.id.to_string() });
    }
    if track.blocks.is_empty() {
        return Err(CatalogError::EmptyBlocks { track: track.id.to_string() });
    }
    for block in &track.blocks {
        if !(0.0..=1.0).contains(&block.probability) {
            return Err(CatalogError::ProbabilityOutOfRange {
                track: track.id.to_string(),
                probability: block.probability,
            });
        }
    }
    let sum = track.probability_sum();
    if (sum - 1.0).abs() > PROBABILITY_TOLERANCE {
        return Err(CatalogError::ProbabilitySum {
            track: track.id.to_string(),
            sum,
        });
    }
    Ok(())
}
