//! Race participants.
//!
//! A `Participant` pairs immutable template data with race-scoped state:
//! score, standing, laps, active boosts and turn statistics. It is built from
//! a `ParticipantTemplate` every time a race is created and fully reset if
//! reused.
//!
//! ## Effective attributes
//!
//! Effective speed, handling and power are the base attribute plus the
//! magnitudes of every active boost of the matching kind, floored at 1.
//!
//! ```
//! use rust_kart::catalog::{Attributes, BoostEffect, BoostTemplate, ParticipantTemplate};
//! use rust_kart::race::Participant;
//!
//! let template = ParticipantTemplate::new("mario", "Mario", Attributes::new(4, 3, 3));
//! let mut mario = Participant::from_template(&template);
//!
//! let mushroom = BoostTemplate::new("mushroom", "Mushroom", BoostEffect::Speed { magnitude: 2 }, 1);
//! mario.apply_boost(&mushroom);
//! assert_eq!(mario.effective_speed(), 6);
//!
//! mario.tick_boosts();
//! assert_eq!(mario.effective_speed(), 4);
//! ```

use serde::{Deserialize, Serialize};
use smallvec::SmallVec;

use super::boost::ActiveBoost;
use crate::catalog::{Attribute, Attributes, BoostTemplate, ParticipantTemplate};
use crate::core::ParticipantId;

/// Per-race turn statistics.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct TurnStats {
    pub distance_traveled: u32,
    pub blocks_resolved: u32,
    pub boosts_consumed: u32,
    pub confrontations_won: u32,
    pub confrontations_lost: u32,
}

/// A racer taking part in one race.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Participant {
    pub id: ParticipantId,
    pub name: String,
    pub glyph: String,
    pub description: String,
    pub specialty: String,
    pub color: String,
    pub attributes: Attributes,

    score: u32,
    standing: u32,
    laps_completed: u32,
    boosts: SmallVec<[ActiveBoost; 4]>,
    stats: TurnStats,
}

impl Participant {
    /// Build a participant with zeroed race state.
    #[must_use]
    pub fn from_template(template: &ParticipantTemplate) -> Self {
        Self {
            id: template.id.clone(),
            name: template.name.clone(),
            glyph: template.glyph.clone(),
            description: template.description.clone(),
            specialty: template.specialty.clone(),
            color: template.color.clone(),
            attributes: template.attributes,
            score: 0,
            standing: 0,
            laps_completed: 0,
            boosts: SmallVec::new(),
            stats: TurnStats::default(),
        }
    }

    // === Race state ===

    #[must_use]
    pub fn score(&self) -> u32 {
        self.score
    }

    /// Standing position (1-based). Authoritative only after the race
    /// finishes; 0 before a roster position is assigned.
    #[must_use]
    pub fn standing(&self) -> u32 {
        self.standing
    }

    #[must_use]
    pub fn laps_completed(&self) -> u32 {
        self.laps_completed
    }

    #[must_use]
    pub fn stats(&self) -> &TurnStats {
        &self.stats
    }

    /// Active boosts in the order they were applied.
    #[must_use]
    pub fn active_boosts(&self) -> &[ActiveBoost] {
        &self.boosts
    }

    /// Sum of base speed, handling and power.
    #[must_use]
    pub fn total_skill(&self) -> u32 {
        self.attributes.total()
    }

    // === Effective attributes ===

    /// Base attribute plus matching boost magnitudes, floored at 1 and
    /// capped at `u32::MAX`.
    #[must_use]
    pub fn effective(&self, attribute: Attribute) -> u32 {
        let bonus: i64 = self
            .boosts
            .iter()
            .map(|b| i64::from(b.effect.bonus_for(attribute)))
            .sum();
        let value = i64::from(self.attributes.get(attribute)) + bonus;
        value.clamp(1, i64::from(u32::MAX)) as u32
    }

    #[must_use]
    pub fn effective_speed(&self) -> u32 {
        self.effective(Attribute::Speed)
    }

    #[must_use]
    pub fn effective_handling(&self) -> u32 {
        self.effective(Attribute::Handling)
    }

    #[must_use]
    pub fn effective_power(&self) -> u32 {
        self.effective(Attribute::Power)
    }

    /// True while any invincibility boost is active.
    #[must_use]
    pub fn is_invincible(&self) -> bool {
        self.boosts.iter().any(|b| b.effect.is_invincibility())
    }

    // === Mutation ===

    /// Apply a boost with its full duration.
    pub fn apply_boost(&mut self, template: &BoostTemplate) {
        self.boosts.push(ActiveBoost::from_template(template));
        self.stats.boosts_consumed += 1;
    }

    /// Count every active boost down by one round and drop expired ones.
    ///
    /// Must run exactly once per round for every participant.
    pub fn tick_boosts(&mut self) {
        self.boosts.retain(|boost| boost.tick());
    }

    /// Add points to the score.
    pub fn add_score(&mut self, points: u32) {
        self.score = self.score.saturating_add(points);
    }

    /// Mark one more lap as completed.
    ///
    /// The round resolver never calls this; laps only end a race when some
    /// other driver of the race records them.
    pub fn record_lap(&mut self) {
        self.laps_completed += 1;
    }

    /// Zero every race-scoped field.
    pub fn reset_for_race(&mut self) {
        self.score = 0;
        self.standing = 0;
        self.laps_completed = 0;
        self.boosts.clear();
        self.stats = TurnStats::default();
    }

    pub(crate) fn set_standing(&mut self, standing: u32) {
        self.standing = standing;
    }

    pub(crate) fn record_block(&mut self, distance: u32) {
        self.stats.blocks_resolved += 1;
        self.stats.distance_traveled = self.stats.distance_traveled.saturating_add(distance);
    }

    pub(crate) fn record_confrontation_won(&mut self) {
        self.stats.confrontations_won += 1;
    }

    pub(crate) fn record_confrontation_lost(&mut self) {
        self.stats.confrontations_lost += 1;
    }
}

impl std::fmt::Display for Participant {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{} {} ({} pts)", self.glyph, self.name, self.score)
    }
}
