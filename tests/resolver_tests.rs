//! Round resolver integration tests.
//!
//! Scripted random sources pin every block draw, die and boost roll so the
//! worked scoring examples can be checked exactly.

use rust_kart::catalog::{Attributes, BlockType, BoostEffect, BoostTemplate, ParticipantTemplate, TrackTemplate};
use rust_kart::core::{EngineConfig, GameRng, RaceId, ScriptedRng};
use rust_kart::engine::{ConfrontationResult, RoundResolver};
use rust_kart::race::{LogCategory, Participant, Race, RaceStatus};

fn circuit(laps: u32) -> TrackTemplate {
    TrackTemplate::new("circuit", "Circuit", laps)
        .with_block(BlockType::Straight, 0.5)
        .with_block(BlockType::Curve, 0.3)
        .with_block(BlockType::Confrontation, 0.2)
}

fn racer(id: &str, speed: u32, handling: u32, power: u32) -> Participant {
    let name = format!("Racer {}", id.to_uppercase());
    let template = ParticipantTemplate::new(id, name, Attributes::new(speed, handling, power)).with_glyph("🏎");
    Participant::from_template(&template)
}

fn two_racer_race(laps: u32) -> Race {
    let participants = vec![racer("a", 4, 2, 3), racer("b", 3, 2, 4)];
    Race::new(RaceId::new("race_example"), circuit(laps), participants, 5).unwrap()
}

fn no_boosts(rng: ScriptedRng) -> RoundResolver<ScriptedRng> {
    RoundResolver::with_rng(rng, Vec::new(), EngineConfig::default())
}

// =============================================================================
// Worked Examples
// =============================================================================

/// Two laps at five blocks per lap is ten rounds.
#[test]
fn test_max_rounds_from_laps() {
    let race = two_racer_race(2);
    assert_eq!(race.max_rounds(), 10);
}

/// Straight block: dice 3 and 5 against speeds 4 and 3.
#[test]
fn test_straight_example() {
    let rng = ScriptedRng::new()
        .with_uniforms([0.1, 0.99, 0.99])
        .with_ints([3, 1, 5, 1]);
    let mut resolver = no_boosts(rng);
    let mut race = two_racer_race(2);
    race.start().unwrap();

    let result = resolver.resolve_round(&mut race);

    assert_eq!(result.block_type, Some(BlockType::Straight));
    assert_eq!(race.participants()[0].score(), 7);
    assert_eq!(race.participants()[1].score(), 8);
    assert_eq!(race.participants()[0].stats().distance_traveled, 7);
    assert_eq!(race.participants()[1].stats().distance_traveled, 8);
    assert_eq!(race.current_round(), 1);

    // Live ranking puts B first without reordering the roster.
    assert_eq!(result.ranking[0].id.as_str(), "b");
    assert_eq!(race.participants()[0].id.as_str(), "a");
}

/// Confrontation block: (6 + power 3) against (1 + power 4).
#[test]
fn test_confrontation_example() {
    let rng = ScriptedRng::new()
        .with_uniforms([0.9, 0.99, 0.99])
        .with_ints([6, 1, 0, 1, 6, 0]);
    let mut resolver = no_boosts(rng);
    let mut race = two_racer_race(2);
    race.start().unwrap();

    let result = resolver.resolve_round(&mut race);

    assert_eq!(result.block_type, Some(BlockType::Confrontation));

    let a = &race.participants()[0];
    assert_eq!(a.score(), 9);
    assert_eq!(a.stats().confrontations_won, 1);
    assert_eq!(a.stats().confrontations_lost, 0);
    assert_eq!(a.stats().distance_traveled, 0);

    let b = &race.participants()[1];
    assert_eq!(b.score(), 0);
    assert_eq!(b.stats().confrontations_won, 0);
    assert_eq!(b.stats().confrontations_lost, 1);

    let first = result.outcomes[0].confrontation.as_ref().unwrap();
    assert_eq!(first.opponent.as_str(), "b");
    assert_eq!((first.self_total, first.opponent_total), (9, 5));
    assert_eq!(first.result, ConfrontationResult::Win);

    let second = result.outcomes[1].confrontation.as_ref().unwrap();
    assert_eq!(second.opponent.as_str(), "a");
    assert_eq!(second.result, ConfrontationResult::Loss);
}

/// Curves score against handling.
#[test]
fn test_curve_uses_handling() {
    let rng = ScriptedRng::new().with_uniforms([0.6, 0.99, 0.99]).with_ints([2]);
    let mut resolver = no_boosts(rng);
    let mut race = two_racer_race(1);

    let result = resolver.resolve_round(&mut race);

    assert_eq!(result.block_type, Some(BlockType::Curve));
    assert_eq!(result.outcomes[0].attribute_value, 2);
    assert_eq!(race.participants()[0].score(), 4);
}

// =============================================================================
// Boosts
// =============================================================================

/// A boost granted at the end of a round counts down in the same round.
#[test]
fn test_boost_lifecycle_across_rounds() {
    let rng = ScriptedRng::new()
        .with_uniforms([0.0, 0.1, 0.99, 0.0, 0.99, 0.99, 0.0, 0.99, 0.99])
        .with_ints([1]);
    let turbo = BoostTemplate::new("turbo", "Turbo", BoostEffect::Speed { magnitude: 3 }, 2).with_glyph("🚀");
    let mut resolver = RoundResolver::with_rng(rng, vec![turbo], EngineConfig::default());
    let mut race = two_racer_race(1);

    let first = resolver.resolve_round(&mut race);
    assert_eq!(first.boosts_granted.len(), 1);
    assert_eq!(first.boosts_granted[0].participant.as_str(), "a");
    assert_eq!(race.participants()[0].score(), 5);
    assert_eq!(race.participants()[0].active_boosts()[0].remaining_rounds, 1);
    assert_eq!(race.participants()[0].stats().boosts_consumed, 1);

    resolver.resolve_round(&mut race);
    assert_eq!(race.participants()[0].score(), 5 + 8);
    assert!(race.participants()[0].active_boosts().is_empty());

    resolver.resolve_round(&mut race);
    assert_eq!(race.participants()[0].score(), 5 + 8 + 5);
}

/// With no boost templates nothing is granted, whatever the roll.
#[test]
fn test_empty_boost_catalog_grants_nothing() {
    let rng = ScriptedRng::new().with_uniforms([0.0]).with_ints([1]);
    let mut resolver = no_boosts(rng);
    let mut race = two_racer_race(1);

    let result = resolver.resolve_round(&mut race);

    assert!(result.boosts_granted.is_empty());
    assert!(race.participants().iter().all(|p| p.active_boosts().is_empty()));
}

// =============================================================================
// Event Log
// =============================================================================

/// A round logs a header, one action per participant and each boost grant.
#[test]
fn test_round_log_entries() {
    let rng = ScriptedRng::new().with_uniforms([0.1, 0.2, 0.99]).with_ints([3, 1, 5, 1, 0]);
    let boost = BoostTemplate::new("mushroom", "Mushroom", BoostEffect::Speed { magnitude: 2 }, 2)
        .with_glyph("🍄");
    let mut resolver = RoundResolver::with_rng(rng, vec![boost], EngineConfig::default());
    let mut race = two_racer_race(2);

    resolver.resolve_round(&mut race);

    let round_zero: Vec<_> = race.log().for_round(0).collect();
    // start (3), header, two actions, one grant
    assert_eq!(round_zero.len(), 7);
    assert_eq!(round_zero[0].message, "🏁 RACE STARTED!");
    assert_eq!(round_zero[3].message, "🎲 === ROUND 1 - BLOCK: STRAIGHT ===");
    assert_eq!(round_zero[3].category, LogCategory::System);
    assert_eq!(round_zero[4].message, "🏎 Racer A rolled 3 + SPEED(4) = 7 points");
    assert_eq!(round_zero[4].category, LogCategory::Action);
    assert_eq!(round_zero[5].category, LogCategory::Action);
    assert_eq!(round_zero[6].message, "✨ 🏎 Racer A received 🍄 Mushroom!");
}

// =============================================================================
// Termination
// =============================================================================

/// The round counter rises by one per call and stops at the ceiling.
#[test]
fn test_round_counter_until_finished() {
    let mut resolver = RoundResolver::with_rng(GameRng::new(7), Vec::new(), EngineConfig::default());
    let mut race = two_racer_race(2);

    for expected in 1..=10 {
        let result = resolver.resolve_round(&mut race);
        assert_eq!(result.round, expected);
        assert_eq!(result.finished, expected == 10);
    }

    assert_eq!(race.status(), RaceStatus::Completed);
    assert!(race.winner().is_some());

    let after = resolver.resolve_round(&mut race);
    assert!(after.finished);
    assert_eq!(race.current_round(), 10);
}

/// The resolver never records laps; only the round ceiling ends a race.
#[test]
fn test_resolver_never_records_laps() {
    let mut resolver = RoundResolver::with_rng(GameRng::new(3), Vec::new(), EngineConfig::default());
    let mut race = two_racer_race(1);

    resolver.simulate(&mut race);

    assert!(race.participants().iter().all(|p| p.laps_completed() == 0));
    assert_eq!(race.current_round(), race.max_rounds());
}

/// Deterministic seeds replay identical races.
#[test]
fn test_seeded_races_replay() {
    let run = |seed| {
        let boosts = vec![BoostTemplate::new("star", "Star", BoostEffect::Invincibility, 2)];
        let mut resolver = RoundResolver::with_rng(GameRng::new(seed), boosts, EngineConfig::default());
        let mut race = two_racer_race(3);
        let outcome = resolver.simulate(&mut race);
        outcome
            .final_ranking
            .iter()
            .map(|e| (e.id.to_string(), e.points))
            .collect::<Vec<_>>()
    };

    assert_eq!(run(99), run(99));
}
