//! Serializable race snapshots.
//!
//! `RaceView` is what leaves the engine: the session service returns it from
//! queries and keeps completed ones as history. Views are plain data and do
//! not change when the race they were taken from moves on.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::time::Duration;

use super::boost::ActiveBoost;
use super::event_log::EventLog;
use super::participant::{Participant, TurnStats};
use super::state::{Race, RaceStatus};
use crate::catalog::{Attributes, TrackTemplate};
use crate::core::{ParticipantId, RaceId};

/// Snapshot of one participant.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct ParticipantView {
    pub id: ParticipantId,
    pub name: String,
    pub glyph: String,
    pub color: String,
    pub attributes: Attributes,
    pub score: u32,
    pub position: u32,
    pub laps_completed: u32,
    pub stats: TurnStats,
    pub active_boosts: Vec<ActiveBoost>,
}

impl From<&Participant> for ParticipantView {
    fn from(p: &Participant) -> Self {
        Self {
            id: p.id.clone(),
            name: p.name.clone(),
            glyph: p.glyph.clone(),
            color: p.color.clone(),
            attributes: p.attributes,
            score: p.score(),
            position: p.standing(),
            laps_completed: p.laps_completed(),
            stats: *p.stats(),
            active_boosts: p.active_boosts().to_vec(),
        }
    }
}

/// One row of a ranking.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct RankingEntry {
    pub id: ParticipantId,
    pub name: String,
    pub glyph: String,
    pub points: u32,
    pub position: u32,
}

impl From<&Participant> for RankingEntry {
    fn from(p: &Participant) -> Self {
        Self {
            id: p.id.clone(),
            name: p.name.clone(),
            glyph: p.glyph.clone(),
            points: p.score(),
            position: p.standing(),
        }
    }
}

/// Derived summary of a race.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct RaceStats {
    pub id: RaceId,
    pub track: String,
    pub status: RaceStatus,
    pub current_round: u32,
    pub max_rounds: u32,
    pub progress: f64,
    /// Elapsed time formatted as `mm:ss`.
    pub elapsed: String,
    pub participants: usize,
    pub winner: Option<String>,
    pub ranking: Vec<RankingEntry>,
}

/// Full serializable snapshot of a race.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct RaceView {
    pub id: RaceId,
    pub track: TrackTemplate,
    pub participants: Vec<ParticipantView>,
    pub current_round: u32,
    pub max_rounds: u32,
    pub status: RaceStatus,
    pub winner: Option<ParticipantView>,
    pub started_at: Option<DateTime<Utc>>,
    pub ended_at: Option<DateTime<Utc>>,
    pub stats: RaceStats,
    pub log: EventLog,
}

impl Race {
    /// Live ranking as serializable rows.
    #[must_use]
    pub fn ranking_entries(&self) -> Vec<RankingEntry> {
        self.current_ranking().into_iter().map(RankingEntry::from).collect()
    }

    /// Derived stats block.
    #[must_use]
    pub fn stats(&self) -> RaceStats {
        RaceStats {
            id: self.id().clone(),
            track: self.track().name.clone(),
            status: self.status(),
            current_round: self.current_round(),
            max_rounds: self.max_rounds(),
            progress: self.progress_percent(),
            elapsed: format_elapsed(self.elapsed()),
            participants: self.participants().len(),
            winner: self.winner().map(|w| w.name.clone()),
            ranking: self.ranking_entries(),
        }
    }

    /// Full snapshot.
    #[must_use]
    pub fn view(&self) -> RaceView {
        RaceView {
            id: self.id().clone(),
            track: self.track().clone(),
            participants: self.participants().iter().map(ParticipantView::from).collect(),
            current_round: self.current_round(),
            max_rounds: self.max_rounds(),
            status: self.status(),
            winner: self.winner().map(ParticipantView::from),
            started_at: self.started_at(),
            ended_at: self.ended_at(),
            stats: self.stats(),
            log: self.log().clone(),
        }
    }
}

/// Format a duration as zero-padded `mm:ss`.
///
/// ```
/// use std::time::Duration;
/// use rust_kart::race::format_elapsed;
///
/// assert_eq!(format_elapsed(Duration::from_secs(75)), "01:15");
/// ```
#[must_use]
pub fn format_elapsed(elapsed: Duration) -> String {
    let secs = elapsed.as_secs();
    format!("{:02}:{:02}", secs / 60, secs % 60)
}
