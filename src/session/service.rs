//! The race service.
//!
//! `RaceService` is the surface an outer layer (HTTP handlers, the console
//! demo) talks to. It owns:
//!
//! - the catalog of templates,
//! - a `RoundResolver` and with it the random source,
//! - the registry of active races, keyed by id,
//! - the history of completed race snapshots, most recent first, capped at
//!   `EngineConfig::history_capacity`.
//!
//! Every mutating operation takes `&mut self`, so a single service is never
//! resolving two rounds at once. Share it across threads behind a mutex.
//!
//! ## Example
//!
//! ```
//! use rust_kart::catalog::Catalog;
//! use rust_kart::core::{EngineConfig, ErrorKind};
//! use rust_kart::session::RaceService;
//!
//! let catalog = Catalog::builtin().unwrap();
//! let mut service = RaceService::new(catalog, EngineConfig::default());
//!
//! let created = service.create_race(&["mario", "bowser"], "mario-circuit").unwrap();
//! let outcome = service.simulate_to_completion(&created.race_id).unwrap();
//! assert!(outcome.winner.is_some());
//!
//! // Completed races leave the active registry.
//! let err = service.race_snapshot(&created.race_id).unwrap_err();
//! assert_eq!(err.kind(), ErrorKind::NotFound);
//! assert_eq!(service.history(None).len(), 1);
//! ```

use chrono::Utc;
use rustc_hash::FxHashMap;
use serde::{Deserialize, Serialize};
use std::collections::VecDeque;

use crate::catalog::{Catalog, ParticipantTemplate, TrackTemplate};
use crate::core::{
    EngineConfig, GameRng, ParticipantId, RaceError, RaceId, RandomSource, TrackId, MIN_PARTICIPANTS,
};
use crate::engine::{CancelToken, RoundResolver, RoundResult, SimulationOutcome};
use crate::race::{Participant, Race, RaceView};

/// Returned by `create_race`.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct CreatedRace {
    pub race_id: RaceId,
    pub race: RaceView,
}

/// Returned by `resolve_one_round`.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct RoundUpdate {
    pub result: RoundResult,
    /// Snapshot taken after the round, and after archival if it finished.
    pub race: RaceView,
}

/// Static description of the service.
#[derive(Clone, Debug, Serialize)]
pub struct ServiceInfo {
    pub name: &'static str,
    pub version: &'static str,
    pub description: &'static str,
    pub operations: &'static [&'static str],
}

const OPERATIONS: &[&str] = &[
    "list_participant_templates",
    "list_track_templates",
    "create_race",
    "race_snapshot",
    "resolve_one_round",
    "simulate_to_completion",
    "history",
];

/// Session-scoped race registry.
pub struct RaceService<R: RandomSource = GameRng> {
    catalog: Catalog,
    resolver: RoundResolver<R>,
    active: FxHashMap<RaceId, Race>,
    history: VecDeque<RaceView>,
    next_sequence: u64,
}

impl RaceService<GameRng> {
    /// Create a service with an entropy-seeded random source.
    #[must_use]
    pub fn new(catalog: Catalog, config: EngineConfig) -> Self {
        Self::with_rng(catalog, config, GameRng::from_entropy())
    }
}

impl<R: RandomSource> RaceService<R> {
    /// Create a service with an explicit random source.
    #[must_use]
    pub fn with_rng(catalog: Catalog, config: EngineConfig, rng: R) -> Self {
        let resolver = RoundResolver::with_rng(rng, catalog.boosts().to_vec(), config);
        Self {
            catalog,
            resolver,
            active: FxHashMap::default(),
            history: VecDeque::new(),
            next_sequence: 0,
        }
    }

    #[must_use]
    pub fn catalog(&self) -> &Catalog {
        &self.catalog
    }

    #[must_use]
    pub fn config(&self) -> &EngineConfig {
        self.resolver.config()
    }

    pub fn resolver_mut(&mut self) -> &mut RoundResolver<R> {
        &mut self.resolver
    }

    #[must_use]
    pub fn info(&self) -> ServiceInfo {
        ServiceInfo {
            name: "Rust Kart Racing Simulator",
            version: env!("CARGO_PKG_VERSION"),
            description: "Turn-based kart race simulation engine",
            operations: OPERATIONS,
        }
    }

    // === Templates ===

    #[must_use]
    pub fn list_participant_templates(&self) -> &[ParticipantTemplate] {
        self.catalog.participants()
    }

    #[must_use]
    pub fn list_track_templates(&self) -> &[TrackTemplate] {
        self.catalog.tracks()
    }

    // === Races ===

    /// Create a pending race and register it.
    ///
    /// Participant ids may repeat; each occurrence races as its own entry.
    ///
    /// # Errors
    ///
    /// `TooFewParticipants` with fewer than two ids, `UnknownParticipant`
    /// or `UnknownTrack` if an id is not in the catalog.
    pub fn create_race<P, T>(&mut self, participant_ids: &[P], track_id: T) -> Result<CreatedRace, RaceError>
    where
        P: AsRef<str>,
        T: AsRef<str>,
    {
        if participant_ids.len() < MIN_PARTICIPANTS {
            return Err(RaceError::TooFewParticipants {
                min: MIN_PARTICIPANTS,
                got: participant_ids.len(),
            });
        }

        let participants = participant_ids
            .iter()
            .map(|id| {
                let id = ParticipantId::new(id.as_ref());
                self.catalog
                    .participant(&id)
                    .map(Participant::from_template)
                    .ok_or(RaceError::UnknownParticipant(id))
            })
            .collect::<Result<Vec<_>, _>>()?;

        let track_id = TrackId::new(track_id.as_ref());
        let track = self
            .catalog
            .track(&track_id)
            .cloned()
            .ok_or(RaceError::UnknownTrack(track_id))?;

        let race_id = self.next_race_id();
        let race = Race::new(race_id.clone(), track, participants, self.config().blocks_per_lap)?;
        log::info!(
            "created race {} on {} with {} participants",
            race_id,
            race.track().id,
            race.participants().len()
        );

        let view = race.view();
        self.active.insert(race_id.clone(), race);
        Ok(CreatedRace { race_id, race: view })
    }

    /// Snapshot of an active race.
    ///
    /// # Errors
    ///
    /// `NotFound` if the id is unknown or the race was already archived.
    pub fn race_snapshot(&self, race_id: &RaceId) -> Result<RaceView, RaceError> {
        self.active
            .get(race_id)
            .map(Race::view)
            .ok_or_else(|| RaceError::NotFound(race_id.clone()))
    }

    /// Resolve one round; archives the race if it finished.
    ///
    /// # Errors
    ///
    /// `NotFound` if the id is not an active race.
    pub fn resolve_one_round(&mut self, race_id: &RaceId) -> Result<RoundUpdate, RaceError> {
        let race = self
            .active
            .get_mut(race_id)
            .ok_or_else(|| RaceError::NotFound(race_id.clone()))?;

        let result = self.resolver.resolve_round(race);
        let view = race.view();
        if result.finished {
            self.archive(race_id);
        }

        Ok(RoundUpdate { result, race: view })
    }

    /// Run a race to completion and archive it.
    ///
    /// # Errors
    ///
    /// `NotFound` if the id is not an active race.
    pub fn simulate_to_completion(&mut self, race_id: &RaceId) -> Result<SimulationOutcome, RaceError> {
        self.simulate(race_id, None)
    }

    /// Like `simulate_to_completion`, stopping between rounds once `cancel`
    /// is set. A cancelled race stays active.
    ///
    /// # Errors
    ///
    /// `NotFound` if the id is not an active race.
    pub fn simulate_with_cancel(
        &mut self,
        race_id: &RaceId,
        cancel: &CancelToken,
    ) -> Result<SimulationOutcome, RaceError> {
        self.simulate(race_id, Some(cancel))
    }

    fn simulate(&mut self, race_id: &RaceId, cancel: Option<&CancelToken>) -> Result<SimulationOutcome, RaceError> {
        let race = self
            .active
            .get_mut(race_id)
            .ok_or_else(|| RaceError::NotFound(race_id.clone()))?;

        let outcome = match cancel {
            Some(token) => self.resolver.simulate_with_cancel(race, token),
            None => self.resolver.simulate(race),
        };
        if !outcome.cancelled {
            self.archive(race_id);
        }

        Ok(outcome)
    }

    // === Registry ===

    /// Completed races, most recent first. `None` uses the configured
    /// history limit.
    #[must_use]
    pub fn history(&self, limit: Option<usize>) -> Vec<RaceView> {
        let limit = limit.unwrap_or(self.config().history_limit);
        self.history.iter().take(limit).cloned().collect()
    }

    #[must_use]
    pub fn active_count(&self) -> usize {
        self.active.len()
    }

    /// Ids of active races, sorted.
    #[must_use]
    pub fn active_race_ids(&self) -> Vec<RaceId> {
        let mut ids: Vec<RaceId> = self.active.keys().cloned().collect();
        ids.sort();
        ids
    }

    fn next_race_id(&mut self) -> RaceId {
        self.next_sequence += 1;
        RaceId::generate(Utc::now().timestamp_millis(), self.next_sequence)
    }

    fn archive(&mut self, race_id: &RaceId) {
        if let Some(race) = self.active.remove(race_id) {
            log::info!(
                "archived race {} (winner: {})",
                race_id,
                race.winner().map_or("none", |w| w.name.as_str())
            );
            self.history.push_front(race.view());
            self.history.truncate(self.resolver.config().history_capacity);
        }
    }
}
