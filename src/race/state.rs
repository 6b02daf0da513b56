//! The race entity.
//!
//! A `Race` owns its roster, its track template, the round counter and the
//! event log. Status only moves forward: pending → active → completed.
//!
//! ## Termination
//!
//! `is_finished()` is true once the race is completed, the round counter has
//! reached `max_rounds`, or any participant has completed the track's laps.
//! The round resolver never records laps, so in practice only the round
//! ceiling ends a race.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::time::Duration;

use super::event_log::{EventLog, LogCategory};
use super::participant::Participant;
use crate::catalog::TrackTemplate;
use crate::core::{ParticipantId, RaceError, RaceId, MIN_PARTICIPANTS};

/// Lifecycle status of a race.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RaceStatus {
    Pending,
    Active,
    Completed,
}

impl std::fmt::Display for RaceStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let label = match self {
            RaceStatus::Pending => "pending",
            RaceStatus::Active => "active",
            RaceStatus::Completed => "completed",
        };
        f.write_str(label)
    }
}

/// One running competition.
#[derive(Clone, Debug)]
pub struct Race {
    id: RaceId,
    track: TrackTemplate,
    participants: Vec<Participant>,
    current_round: u32,
    max_rounds: u32,
    status: RaceStatus,
    winner: Option<ParticipantId>,
    started_at: Option<DateTime<Utc>>,
    ended_at: Option<DateTime<Utc>>,
    log: EventLog,
}

impl Race {
    /// Create a pending race.
    ///
    /// Every participant is reset and given its roster position as initial
    /// standing.
    ///
    /// # Errors
    ///
    /// Returns `TooFewParticipants` if the roster has fewer than two entries.
    pub fn new(
        id: RaceId,
        track: TrackTemplate,
        mut participants: Vec<Participant>,
        blocks_per_lap: u32,
    ) -> Result<Self, RaceError> {
        if participants.len() < MIN_PARTICIPANTS {
            return Err(RaceError::TooFewParticipants {
                min: MIN_PARTICIPANTS,
                got: participants.len(),
            });
        }

        for (idx, participant) in participants.iter_mut().enumerate() {
            participant.reset_for_race();
            participant.set_standing(idx as u32 + 1);
        }

        let max_rounds = track.max_rounds(blocks_per_lap);

        Ok(Self {
            id,
            track,
            participants,
            current_round: 0,
            max_rounds,
            status: RaceStatus::Pending,
            winner: None,
            started_at: None,
            ended_at: None,
            log: EventLog::new(),
        })
    }

    // === Accessors ===

    #[must_use]
    pub fn id(&self) -> &RaceId {
        &self.id
    }

    #[must_use]
    pub fn track(&self) -> &TrackTemplate {
        &self.track
    }

    /// Roster in stored order. Input order until `finish()`, ranked after.
    #[must_use]
    pub fn participants(&self) -> &[Participant] {
        &self.participants
    }

    #[must_use]
    pub fn participant(&self, id: &ParticipantId) -> Option<&Participant> {
        self.participants.iter().find(|p| &p.id == id)
    }

    #[must_use]
    pub fn current_round(&self) -> u32 {
        self.current_round
    }

    #[must_use]
    pub fn max_rounds(&self) -> u32 {
        self.max_rounds
    }

    #[must_use]
    pub fn status(&self) -> RaceStatus {
        self.status
    }

    /// Winning participant, once the race is completed.
    #[must_use]
    pub fn winner(&self) -> Option<&Participant> {
        self.winner.as_ref().and_then(|id| self.participant(id))
    }

    #[must_use]
    pub fn started_at(&self) -> Option<DateTime<Utc>> {
        self.started_at
    }

    #[must_use]
    pub fn ended_at(&self) -> Option<DateTime<Utc>> {
        self.ended_at
    }

    #[must_use]
    pub fn log(&self) -> &EventLog {
        &self.log
    }

    pub(crate) fn participants_mut(&mut self) -> &mut [Participant] {
        &mut self.participants
    }

    // === Lifecycle ===

    /// Move a pending race to active.
    ///
    /// # Errors
    ///
    /// Returns `InvalidState` if the race is not pending.
    pub fn start(&mut self) -> Result<(), RaceError> {
        if self.status != RaceStatus::Pending {
            return Err(RaceError::InvalidState {
                race_id: self.id.clone(),
                status: self.status,
            });
        }

        self.status = RaceStatus::Active;
        self.started_at = Some(Utc::now());

        let roster = self
            .participants
            .iter()
            .map(ToString::to_string)
            .collect::<Vec<_>>()
            .join(", ");
        self.append_log("🏁 RACE STARTED!", LogCategory::System);
        self.append_log(
            format!("📍 Track: {} {}", self.track.glyph, self.track.name),
            LogCategory::System,
        );
        self.append_log(format!("👥 Participants: {}", roster), LogCategory::System);
        Ok(())
    }

    /// Whether the race has reached a terminal condition.
    #[must_use]
    pub fn is_finished(&self) -> bool {
        self.status == RaceStatus::Completed
            || self.current_round >= self.max_rounds
            || self
                .participants
                .iter()
                .any(|p| p.laps_completed() >= self.track.laps)
    }

    /// Complete the race and fix the final standings.
    ///
    /// Idempotent: a completed race is left untouched.
    pub fn finish(&mut self) {
        if self.status == RaceStatus::Completed {
            return;
        }

        self.status = RaceStatus::Completed;
        self.ended_at = Some(Utc::now());

        // Stable: equal scores keep their prior relative order.
        self.participants.sort_by(|a, b| b.score().cmp(&a.score()));
        for (idx, participant) in self.participants.iter_mut().enumerate() {
            participant.set_standing(idx as u32 + 1);
        }
        self.winner = self.participants.first().map(|p| p.id.clone());

        let Some(winner_line) = self.participants.first().map(|p| format!("🏆 WINNER: {}!", p)) else {
            return;
        };
        self.append_log(winner_line, LogCategory::System);
        self.append_log("📊 FINAL STANDINGS:", LogCategory::System);

        let lines: Vec<String> = self
            .participants
            .iter()
            .enumerate()
            .map(|(idx, p)| format!("{} {}. {}", medal(idx + 1), idx + 1, p))
            .collect();
        for line in lines {
            self.append_log(line, LogCategory::Result);
        }
    }

    /// Close out the current round.
    ///
    /// Finishes the race if a terminal condition holds, otherwise increments
    /// the round counter and counts down every participant's boosts.
    pub fn advance_round(&mut self) {
        if self.is_finished() {
            self.finish();
            return;
        }

        self.current_round += 1;
        for participant in &mut self.participants {
            participant.tick_boosts();
        }
    }

    // === Derived views ===

    /// Participants sorted by score, highest first. Does not reorder the
    /// stored roster.
    #[must_use]
    pub fn current_ranking(&self) -> Vec<&Participant> {
        let mut ranking: Vec<&Participant> = self.participants.iter().collect();
        ranking.sort_by(|a, b| b.score().cmp(&a.score()));
        ranking
    }

    /// Round progress in percent, capped at 100.
    #[must_use]
    pub fn progress_percent(&self) -> f64 {
        if self.max_rounds == 0 {
            return 100.0;
        }
        (f64::from(self.current_round) / f64::from(self.max_rounds) * 100.0).min(100.0)
    }

    /// Time since start; frozen at the end time once completed.
    #[must_use]
    pub fn elapsed(&self) -> Duration {
        let Some(started) = self.started_at else {
            return Duration::ZERO;
        };
        let end = self.ended_at.unwrap_or_else(Utc::now);
        (end - started).to_std().unwrap_or_default()
    }

    /// Append an entry stamped with the current round.
    pub fn append_log(&mut self, message: impl Into<String>, category: LogCategory) {
        self.log.append(self.current_round, message, category);
    }
}

fn medal(rank: usize) -> &'static str {
    match rank {
        1 => "🥇",
        2 => "🥈",
        3 => "🥉",
        _ => "🏁",
    }
}
