//! Full-race simulation.
//!
//! `RoundResolver::simulate` loops `resolve_round` until the race completes,
//! sleeping `round_delay_ms` between rounds. A `CancelToken` stops the loop
//! before the next round; the race is left active and can be resumed by
//! simulating it again.

use serde::{Deserialize, Serialize};
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::thread::sleep;

use super::resolver::{RoundResolver, RoundResult};
use crate::core::{RaceId, RandomSource};
use crate::race::{EventLog, ParticipantView, Race, RaceStats, RaceStatus, RankingEntry};

/// Cooperative cancellation flag shared between a simulation and its caller.
#[derive(Clone, Debug, Default)]
pub struct CancelToken(Arc<AtomicBool>);

impl CancelToken {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Request cancellation. Takes effect before the next round.
    pub fn cancel(&self) {
        self.0.store(true, Ordering::SeqCst);
    }

    #[must_use]
    pub fn is_cancelled(&self) -> bool {
        self.0.load(Ordering::SeqCst)
    }
}

/// Result of a full simulation.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct SimulationOutcome {
    pub race_id: RaceId,
    pub winner: Option<ParticipantView>,
    pub final_ranking: Vec<RankingEntry>,
    pub log: EventLog,
    pub stats: RaceStats,
    /// Every round resolved by this call, in order.
    pub rounds: Vec<RoundResult>,
    /// True if the loop stopped on a cancellation request.
    pub cancelled: bool,
}

impl<R: RandomSource> RoundResolver<R> {
    /// Resolve rounds until `race` completes.
    ///
    /// A pending race is started; an active one is resumed.
    pub fn simulate(&mut self, race: &mut Race) -> SimulationOutcome {
        self.simulate_until(race, None)
    }

    /// Like `simulate`, checking `cancel` before every round.
    pub fn simulate_with_cancel(&mut self, race: &mut Race, cancel: &CancelToken) -> SimulationOutcome {
        self.simulate_until(race, Some(cancel))
    }

    fn simulate_until(&mut self, race: &mut Race, cancel: Option<&CancelToken>) -> SimulationOutcome {
        if race.status() == RaceStatus::Pending {
            if let Err(err) = race.start() {
                log::warn!("could not start race {}: {}", race.id(), err);
            }
        }

        let delay = self.config().round_delay();
        let mut rounds = Vec::new();

        loop {
            if cancel.is_some_and(CancelToken::is_cancelled) {
                log::warn!(
                    "simulation of race {} cancelled at round {}",
                    race.id(),
                    race.current_round()
                );
                return Self::outcome(race, rounds, true);
            }

            let result = self.resolve_round(race);
            let finished = result.finished;
            rounds.push(result);
            if finished {
                break;
            }

            if !delay.is_zero() {
                sleep(delay);
            }
        }

        race.finish();
        log::info!(
            "race {} completed after {} rounds",
            race.id(),
            race.current_round()
        );
        Self::outcome(race, rounds, false)
    }

    fn outcome(race: &Race, rounds: Vec<RoundResult>, cancelled: bool) -> SimulationOutcome {
        SimulationOutcome {
            race_id: race.id().clone(),
            winner: race.winner().map(ParticipantView::from),
            final_ranking: race.ranking_entries(),
            log: race.log().clone(),
            stats: race.stats(),
            rounds,
            cancelled,
        }
    }
}
