//! The round resolver.
//!
//! `RoundResolver` owns the random source and the boost catalog and drives a
//! `Race` forward one round at a time:
//!
//! 1. A finished race is completed and a terminal result returned.
//! 2. One block type is drawn from the track's cumulative probabilities.
//! 3. Every participant, in roster order, resolves a turn against it.
//! 4. Each participant independently may receive a random boost.
//! 5. The race advances its round counter and counts boosts down.
//!
//! A pending race is started on its first resolved round. When the round
//! ceiling is reached the race is completed in the same call, so the
//! terminal result already carries the final standings.
//!
//! ## Random draw order
//!
//! One uniform for the block; then per participant `d1`, `d2` and, on a
//! confrontation, one integer for the opponent; then per participant one
//! uniform for the boost chance and, on a grant, one integer for the boost.
//! Scripted sources in tests rely on this order.

use serde::{Deserialize, Serialize};

use super::turn::{resolve_confrontation, Confrontation, ConfrontationResult, TurnOutcome};
use crate::catalog::{BlockType, BoostTemplate, TrackTemplate};
use crate::core::{BoostId, EngineConfig, GameRng, ParticipantId, RandomSource};
use crate::race::{LogCategory, Participant, Race, RaceStats, RaceStatus, RankingEntry};

/// A boost handed out at the end of a round.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct BoostGrant {
    pub participant: ParticipantId,
    pub boost: BoostId,
    pub boost_name: String,
}

/// Result of one `resolve_round` call.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct RoundResult {
    /// True once the race is completed.
    pub finished: bool,
    /// Round counter after this call.
    pub round: u32,
    /// `None` for a terminal call that resolved no turns.
    pub block_type: Option<BlockType>,
    pub outcomes: Vec<TurnOutcome>,
    pub boosts_granted: Vec<BoostGrant>,
    pub ranking: Vec<RankingEntry>,
    pub stats: RaceStats,
}

/// Resolves rounds against races.
#[derive(Clone, Debug)]
pub struct RoundResolver<R: RandomSource = GameRng> {
    rng: R,
    boosts: Vec<BoostTemplate>,
    config: EngineConfig,
}

impl RoundResolver<GameRng> {
    /// Create a resolver backed by an entropy-seeded `GameRng`.
    #[must_use]
    pub fn new(boosts: Vec<BoostTemplate>, config: EngineConfig) -> Self {
        Self::with_rng(GameRng::from_entropy(), boosts, config)
    }
}

impl<R: RandomSource> RoundResolver<R> {
    /// Create a resolver with an explicit random source.
    #[must_use]
    pub fn with_rng(rng: R, boosts: Vec<BoostTemplate>, config: EngineConfig) -> Self {
        Self { rng, boosts, config }
    }

    #[must_use]
    pub fn config(&self) -> &EngineConfig {
        &self.config
    }

    #[must_use]
    pub fn boosts(&self) -> &[BoostTemplate] {
        &self.boosts
    }

    #[must_use]
    pub fn rng(&self) -> &R {
        &self.rng
    }

    pub fn rng_mut(&mut self) -> &mut R {
        &mut self.rng
    }

    // === Draws ===

    /// Draw a block type by cumulative probability.
    ///
    /// Returns the first block whose cumulative probability meets or
    /// exceeds the draw. Falls back to the first listed block (or a
    /// straight on an empty table) if rounding leaves no match.
    pub fn draw_block(&mut self, track: &TrackTemplate) -> BlockType {
        let draw = self.rng.uniform01();
        let mut cumulative = 0.0;

        for block in &track.blocks {
            cumulative += block.probability;
            if draw <= cumulative {
                return block.block_type;
            }
        }

        let fallback = track
            .blocks
            .first()
            .map_or(BlockType::Straight, |b| b.block_type);
        log::warn!(
            "block draw {} exceeded cumulative probability {} on track {}; using {}",
            draw,
            cumulative,
            track.id,
            fallback
        );
        fallback
    }

    /// Roll one die in `[1, dice_sides]`.
    pub fn roll_die(&mut self) -> u32 {
        self.rng.int_range(1, self.config.dice_sides).max(1) as u32
    }

    /// Pick an opponent index other than `self_idx`.
    fn pick_opponent(&mut self, len: usize, self_idx: usize) -> usize {
        let pick = self.rng.index(len - 1);
        if pick >= self_idx {
            pick + 1
        } else {
            pick
        }
    }

    // === Resolution ===

    /// Resolve one round against `race`.
    pub fn resolve_round(&mut self, race: &mut Race) -> RoundResult {
        if race.status() == RaceStatus::Pending {
            if let Err(err) = race.start() {
                log::warn!("could not start race {}: {}", race.id(), err);
            }
        }

        if race.is_finished() {
            race.finish();
            return Self::terminal_result(race);
        }

        let block = self.draw_block(race.track());
        let round_number = race.current_round() + 1;
        log::debug!("race {} round {}: {}", race.id(), round_number, block);
        race.append_log(
            format!("🎲 === ROUND {} - BLOCK: {} ===", round_number, block),
            LogCategory::System,
        );

        let mut outcomes = Vec::with_capacity(race.participants().len());
        for idx in 0..race.participants().len() {
            let outcome = self.resolve_turn(race.participants_mut(), idx, block);
            log::trace!(
                "race {} round {}: {} scored {}",
                race.id(),
                round_number,
                outcome.participant,
                outcome.points
            );
            race.append_log(outcome.describe(), LogCategory::Action);
            outcomes.push(outcome);
        }

        let boosts_granted = self.distribute_boosts(race);

        race.advance_round();
        if race.is_finished() {
            race.finish();
        }

        RoundResult {
            finished: race.status() == RaceStatus::Completed,
            round: race.current_round(),
            block_type: Some(block),
            outcomes,
            boosts_granted,
            ranking: race.ranking_entries(),
            stats: race.stats(),
        }
    }

    /// Resolve one participant's turn against `block`.
    ///
    /// The participant at `idx` is scored; on a confrontation the opponent
    /// is only read. Callers pass a race roster, which always holds at least
    /// `MIN_PARTICIPANTS` entries.
    pub(crate) fn resolve_turn(
        &mut self,
        participants: &mut [Participant],
        idx: usize,
        block: BlockType,
    ) -> TurnOutcome {
        let d1 = self.roll_die();
        let d2 = self.roll_die();

        let (attribute_value, points, distance, confrontation) = match block {
            BlockType::Straight | BlockType::Curve => {
                let value = participants[idx].effective(block.attribute());
                let points = d1.saturating_add(value);
                (value, points, points, None)
            }
            BlockType::Confrontation => {
                let opp_idx = self.pick_opponent(participants.len(), idx);
                let opponent = &participants[opp_idx];
                let opponent_total = d2.saturating_add(opponent.effective_power());

                let power = participants[idx].effective_power();
                let self_total = d1.saturating_add(power);
                let (result, points) = resolve_confrontation(self_total, opponent_total);

                let confrontation = Confrontation {
                    opponent: opponent.id.clone(),
                    opponent_name: opponent.name.clone(),
                    opponent_glyph: opponent.glyph.clone(),
                    self_total,
                    opponent_total,
                    result,
                };
                (power, points, 0, Some(confrontation))
            }
        };

        let participant = &mut participants[idx];
        participant.add_score(points);
        participant.record_block(distance);
        match confrontation.as_ref().map(|c| c.result) {
            Some(ConfrontationResult::Win) => participant.record_confrontation_won(),
            Some(ConfrontationResult::Loss) => participant.record_confrontation_lost(),
            Some(ConfrontationResult::Draw) | None => {}
        }

        TurnOutcome {
            participant: participant.id.clone(),
            name: participant.name.clone(),
            glyph: participant.glyph.clone(),
            block_type: block,
            dice: (d1, d2),
            attribute_value,
            points,
            distance,
            confrontation,
        }
    }

    /// Give each participant an independent chance at a random boost.
    pub fn distribute_boosts(&mut self, race: &mut Race) -> Vec<BoostGrant> {
        let mut grants = Vec::new();

        for idx in 0..race.participants().len() {
            let roll = self.rng.uniform01();
            if roll >= self.config.boost_chance || self.boosts.is_empty() {
                continue;
            }

            let template = &self.boosts[self.rng.index(self.boosts.len())];
            let participant = &mut race.participants_mut()[idx];
            participant.apply_boost(template);

            let line = format!(
                "✨ {} {} received {} {}!",
                participant.glyph, participant.name, template.glyph, template.name
            );
            grants.push(BoostGrant {
                participant: participant.id.clone(),
                boost: template.id.clone(),
                boost_name: template.name.clone(),
            });
            race.append_log(line, LogCategory::System);
        }

        grants
    }

    fn terminal_result(race: &Race) -> RoundResult {
        RoundResult {
            finished: true,
            round: race.current_round(),
            block_type: None,
            outcomes: Vec::new(),
            boosts_granted: Vec::new(),
            ranking: race.ranking_entries(),
            stats: race.stats(),
        }
    }
}
