//! Active boost instances.
//!
//! An `ActiveBoost` is a `BoostTemplate` that has been applied to a
//! participant and is counting down. Instances of the same kind stack
//! additively.

use serde::{Deserialize, Serialize};

use crate::catalog::{BoostEffect, BoostTemplate};
use crate::core::BoostId;

/// A boost currently applied to a participant.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct ActiveBoost {
    pub id: BoostId,
    pub name: String,
    pub glyph: String,
    pub effect: BoostEffect,
    /// Rounds left before the boost expires.
    pub remaining_rounds: u32,
}

impl ActiveBoost {
    /// Instantiate a template with its full duration.
    #[must_use]
    pub fn from_template(template: &BoostTemplate) -> Self {
        Self {
            id: template.id.clone(),
            name: template.name.clone(),
            glyph: template.glyph.clone(),
            effect: template.effect,
            remaining_rounds: template.duration,
        }
    }

    /// Count down one round. Returns `true` while the boost is still active.
    pub fn tick(&mut self) -> bool {
        self.remaining_rounds = self.remaining_rounds.saturating_sub(1);
        self.remaining_rounds > 0
    }
}
