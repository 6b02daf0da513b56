//! Template definitions - static catalog data.
//!
//! Templates hold the immutable properties of racers, tracks and boosts.
//! Race-scoped state (score, active boosts, turn stats) lives in
//! `race::Participant`, which is built fresh from a template for each race.

use serde::{Deserialize, Serialize};

use crate::core::{BoostId, ParticipantId, TrackId};

/// Base attributes of a racer.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Attributes {
    pub speed: u32,
    pub handling: u32,
    pub power: u32,
}

impl Attributes {
    /// Create a new attribute set.
    #[must_use]
    pub const fn new(speed: u32, handling: u32, power: u32) -> Self {
        Self { speed, handling, power }
    }

    /// Sum of all base attributes.
    #[must_use]
    pub const fn total(&self) -> u32 {
        self.speed + self.handling + self.power
    }

    /// Base value of one attribute.
    #[must_use]
    pub const fn get(&self, attribute: Attribute) -> u32 {
        match attribute {
            Attribute::Speed => self.speed,
            Attribute::Handling => self.handling,
            Attribute::Power => self.power,
        }
    }
}

/// One of the three racer attributes.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Attribute {
    Speed,
    Handling,
    Power,
}

impl Attribute {
    /// Upper-case label used in log lines.
    #[must_use]
    pub const fn label(self) -> &'static str {
        match self {
            Attribute::Speed => "SPEED",
            Attribute::Handling => "HANDLING",
            Attribute::Power => "POWER",
        }
    }
}

/// Immutable racer template.
///
/// ## Example
///
/// ```
/// use rust_kart::catalog::{Attributes, ParticipantTemplate};
///
/// let mario = ParticipantTemplate::new("mario", "Mario", Attributes::new(4, 3, 3))
///     .with_glyph("🍄")
///     .with_color("#E52521");
///
/// assert_eq!(mario.attributes.total(), 10);
/// assert_eq!(mario.glyph, "🍄");
/// ```
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct ParticipantTemplate {
    pub id: ParticipantId,
    pub name: String,
    #[serde(default)]
    pub glyph: String,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub specialty: String,
    #[serde(default)]
    pub color: String,
    pub attributes: Attributes,
}

impl ParticipantTemplate {
    /// Create a template with empty display metadata.
    pub fn new(id: impl Into<ParticipantId>, name: impl Into<String>, attributes: Attributes) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            glyph: String::new(),
            description: String::new(),
            specialty: String::new(),
            color: String::new(),
            attributes,
        }
    }

    #[must_use]
    pub fn with_glyph(mut self, glyph: impl Into<String>) -> Self {
        self.glyph = glyph.into();
        self
    }

    #[must_use]
    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = description.into();
        self
    }

    #[must_use]
    pub fn with_specialty(mut self, specialty: impl Into<String>) -> Self {
        self.specialty = specialty.into();
        self
    }

    #[must_use]
    pub fn with_color(mut self, color: impl Into<String>) -> Self {
        self.color = color.into();
        self
    }
}

/// Turn archetype drawn each round.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum BlockType {
    Straight,
    Curve,
    Confrontation,
}

impl BlockType {
    /// Attribute a non-confrontation block rolls against.
    #[must_use]
    pub const fn attribute(self) -> Attribute {
        match self {
            BlockType::Straight => Attribute::Speed,
            BlockType::Curve => Attribute::Handling,
            BlockType::Confrontation => Attribute::Power,
        }
    }
}

impl std::fmt::Display for BlockType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let label = match self {
            BlockType::Straight => "STRAIGHT",
            BlockType::Curve => "CURVE",
            BlockType::Confrontation => "CONFRONTATION",
        };
        f.write_str(label)
    }
}

/// Probability of drawing a block type on a track.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct BlockWeight {
    #[serde(rename = "type")]
    pub block_type: BlockType,
    pub probability: f64,
}

impl BlockWeight {
    #[must_use]
    pub const fn new(block_type: BlockType, probability: f64) -> Self {
        Self { block_type, probability }
    }
}

/// Immutable track template.
///
/// Block probabilities are walked in order during the cumulative draw, so
/// their order is significant.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct TrackTemplate {
    pub id: TrackId,
    pub name: String,
    #[serde(default)]
    pub glyph: String,
    #[serde(default)]
    pub difficulty: String,
    #[serde(default)]
    pub description: String,
    pub laps: u32,
    pub blocks: Vec<BlockWeight>,
}

impl TrackTemplate {
    /// Create a track with no blocks and empty display metadata.
    pub fn new(id: impl Into<TrackId>, name: impl Into<String>, laps: u32) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            glyph: String::new(),
            difficulty: String::new(),
            description: String::new(),
            laps,
            blocks: Vec::new(),
        }
    }

    /// Append a block probability (builder pattern).
    #[must_use]
    pub fn with_block(mut self, block_type: BlockType, probability: f64) -> Self {
        self.blocks.push(BlockWeight::new(block_type, probability));
        self
    }

    #[must_use]
    pub fn with_glyph(mut self, glyph: impl Into<String>) -> Self {
        self.glyph = glyph.into();
        self
    }

    #[must_use]
    pub fn with_difficulty(mut self, difficulty: impl Into<String>) -> Self {
        self.difficulty = difficulty.into();
        self
    }

    /// Round ceiling for a race on this track.
    #[must_use]
    pub const fn max_rounds(&self, blocks_per_lap: u32) -> u32 {
        self.laps * blocks_per_lap
    }

    /// Sum of all block probabilities.
    #[must_use]
    pub fn probability_sum(&self) -> f64 {
        self.blocks.iter().map(|b| b.probability).sum()
    }
}

/// What a boost does while active.
///
/// Attribute effects carry a signed magnitude; negative magnitudes lower the
/// effective attribute, which is still floored at 1.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum BoostEffect {
    Speed { magnitude: i32 },
    Handling { magnitude: i32 },
    Power { magnitude: i32 },
    Invincibility,
}

impl BoostEffect {
    /// Magnitude this effect adds to `attribute`, 0 if it targets another.
    #[must_use]
    pub const fn bonus_for(self, attribute: Attribute) -> i32 {
        match (self, attribute) {
            (BoostEffect::Speed { magnitude }, Attribute::Speed)
            | (BoostEffect::Handling { magnitude }, Attribute::Handling)
            | (BoostEffect::Power { magnitude }, Attribute::Power) => magnitude,
            _ => 0,
        }
    }

    #[must_use]
    pub const fn is_invincibility(self) -> bool {
        matches!(self, BoostEffect::Invincibility)
    }
}

impl std::fmt::Display for BoostEffect {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            BoostEffect::Speed { magnitude } => write!(f, "speed {:+}", magnitude),
            BoostEffect::Handling { magnitude } => write!(f, "handling {:+}", magnitude),
            BoostEffect::Power { magnitude } => write!(f, "power {:+}", magnitude),
            BoostEffect::Invincibility => f.write_str("invincibility"),
        }
    }
}

/// Immutable boost (power-up) template.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct BoostTemplate {
    pub id: BoostId,
    pub name: String,
    #[serde(default)]
    pub glyph: String,
    pub effect: BoostEffect,
    /// Countdown in rounds. The round a boost is granted in counts, so a
    /// boost affects `duration - 1` later turns.
    pub duration: u32,
}

impl BoostTemplate {
    pub fn new(id: impl Into<BoostId>, name: impl Into<String>, effect: BoostEffect, duration: u32) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            glyph: String::new(),
            effect,
            duration,
        }
    }

    #[must_use]
    pub fn with_glyph(mut self, glyph: impl Into<String>) -> Self {
        self.glyph = glyph.into();
        self
    }
}
