//! Per-turn outcomes.
//!
//! One `TurnOutcome` is produced for every participant in every round. The
//! confrontation scoring rule lives here as a pure function so it can be
//! tested without a race.

use serde::{Deserialize, Serialize};

use crate::catalog::BlockType;
use crate::core::ParticipantId;

/// Result of one side of a confrontation.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ConfrontationResult {
    Win,
    Loss,
    Draw,
}

/// Score one side of a confrontation.
///
/// A win scores the full total, a loss scores nothing and a draw scores
/// half the total rounded down.
///
/// ```
/// use rust_kart::engine::{resolve_confrontation, ConfrontationResult};
///
/// assert_eq!(resolve_confrontation(9, 5), (ConfrontationResult::Win, 9));
/// assert_eq!(resolve_confrontation(5, 9), (ConfrontationResult::Loss, 0));
/// assert_eq!(resolve_confrontation(7, 7), (ConfrontationResult::Draw, 3));
/// ```
#[must_use]
pub fn resolve_confrontation(self_total: u32, opponent_total: u32) -> (ConfrontationResult, u32) {
    match self_total.cmp(&opponent_total) {
        std::cmp::Ordering::Greater => (ConfrontationResult::Win, self_total),
        std::cmp::Ordering::Less => (ConfrontationResult::Loss, 0),
        std::cmp::Ordering::Equal => (ConfrontationResult::Draw, self_total / 2),
    }
}

/// Detail of a confrontation turn.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Confrontation {
    pub opponent: ParticipantId,
    pub opponent_name: String,
    pub opponent_glyph: String,
    pub self_total: u32,
    pub opponent_total: u32,
    pub result: ConfrontationResult,
}

/// What happened to one participant in one round.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct TurnOutcome {
    pub participant: ParticipantId,
    pub name: String,
    pub glyph: String,
    pub block_type: BlockType,
    /// Both dice are always drawn; only confrontations use the second.
    pub dice: (u32, u32),
    /// Effective attribute the turn was resolved against.
    pub attribute_value: u32,
    pub points: u32,
    pub distance: u32,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub confrontation: Option<Confrontation>,
}

impl TurnOutcome {
    /// Log line for the race's event log.
    #[must_use]
    pub fn describe(&self) -> String {
        match &self.confrontation {
            None => format!(
                "{} {} rolled {} + {}({}) = {} points",
                self.glyph,
                self.name,
                self.dice.0,
                self.block_type.attribute().label(),
                self.attribute_value,
                self.points
            ),
            Some(c) => match c.result {
                ConfrontationResult::Win => format!(
                    "{} {} beat {} {} in a confrontation! ({} vs {}) = +{} points",
                    self.glyph, self.name, c.opponent_glyph, c.opponent_name, c.self_total, c.opponent_total, self.points
                ),
                ConfrontationResult::Loss => format!(
                    "{} {} lost to {} {} in a confrontation ({} vs {}) = 0 points",
                    self.glyph, self.name, c.opponent_glyph, c.opponent_name, c.self_total, c.opponent_total
                ),
                ConfrontationResult::Draw => format!(
                    "{} {} tied with {} {} in a confrontation ({} vs {}) = +{} points",
                    self.glyph, self.name, c.opponent_glyph, c.opponent_name, c.self_total, c.opponent_total, self.points
                ),
            },
        }
    }
}
