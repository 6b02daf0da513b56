//! Race service integration tests.
//!
//! Exercise the registry surface: creation, snapshots, round-by-round play,
//! full simulation, archival and history.

use rust_kart::catalog::Catalog;
use rust_kart::catalog::BlockType;
use rust_kart::core::{EngineConfig, ErrorKind, GameRng, RaceError, RaceId, ScriptedRng};
use rust_kart::engine::ConfrontationResult;
use rust_kart::race::RaceStatus;
use rust_kart::session::RaceService;

fn service(seed: u64) -> RaceService {
    RaceService::with_rng(Catalog::builtin().unwrap(), EngineConfig::default(), GameRng::new(seed))
}

// =============================================================================
// Templates
// =============================================================================

#[test]
fn test_list_templates() {
    let service = service(1);

    let participants = service.list_participant_templates();
    assert_eq!(participants.len(), 8);
    assert!(participants.iter().any(|p| p.id.as_str() == "bowser"));

    let tracks = service.list_track_templates();
    assert_eq!(tracks.len(), 4);
    for track in tracks {
        assert!((track.probability_sum() - 1.0).abs() < 1e-9);
    }
}

// =============================================================================
// Creation
// =============================================================================

#[test]
fn test_create_race_with_one_participant_fails() {
    let mut service = service(1);

    let err = service.create_race(&["x"], "track1").unwrap_err();

    assert_eq!(err.kind(), ErrorKind::Validation);
    assert!(err.to_string().contains("at least 2 participants"));
    assert_eq!(service.active_count(), 0);
}

#[test]
fn test_create_race_unknown_ids() {
    let mut service = service(1);

    let err = service.create_race(&["mario", "wario"], "mario-circuit").unwrap_err();
    assert_eq!(err.kind(), ErrorKind::Validation);
    assert!(err.to_string().contains("wario"));

    let err = service.create_race(&["mario", "luigi"], "moo-moo-farm").unwrap_err();
    assert_eq!(err.kind(), ErrorKind::Validation);
    assert!(err.to_string().contains("moo-moo-farm"));
}

#[test]
fn test_create_race_registers_pending_race() {
    let mut service = service(1);

    let created = service.create_race(&["mario", "luigi", "peach"], "mario-circuit").unwrap();

    assert_eq!(service.active_race_ids(), vec![created.race_id.clone()]);
    let view = service.race_snapshot(&created.race_id).unwrap();
    assert_eq!(view.status, RaceStatus::Pending);
    assert_eq!(view.max_rounds, 15);
    assert_eq!(view.current_round, 0);
    assert_eq!(view.stats.participants, 3);
    assert!(view.log.is_empty());
}

/// The same template twice races as two independent entries.
#[test]
fn test_duplicate_participant_ids_race_independently() {
    // Block 0.9 is a confrontation on mario-circuit; no boosts.
    let rng = ScriptedRng::new()
        .with_uniforms([0.9, 0.99, 0.99])
        .with_ints([6, 1, 0, 1, 6, 0]);
    let mut service = RaceService::with_rng(Catalog::builtin().unwrap(), EngineConfig::default(), rng);
    let created = service.create_race(&["mario", "mario"], "mario-circuit").unwrap();
    assert_eq!(created.race.participants.len(), 2);

    let update = service.resolve_one_round(&created.race_id).unwrap();
    assert_eq!(update.result.block_type, Some(BlockType::Confrontation));

    // Mario has power 3: (6 + 3) against (1 + 3), then the mirror.
    let first = update.result.outcomes[0].confrontation.as_ref().unwrap();
    let second = update.result.outcomes[1].confrontation.as_ref().unwrap();
    assert_eq!((first.self_total, first.opponent_total), (9, 4));
    assert_eq!((second.self_total, second.opponent_total), (4, 9));
    assert_eq!(first.result, ConfrontationResult::Win);
    assert_eq!(second.result, ConfrontationResult::Loss);

    let scores: Vec<u32> = update.race.participants.iter().map(|p| p.score).collect();
    assert_eq!(scores, vec![9, 0]);
}

// =============================================================================
// Play
// =============================================================================

/// Attributes at the top of the `u32` range resolve without overflow.
#[test]
fn test_extreme_attributes_resolve() {
    let json = r#"{
        "participants": [
            { "id": "a", "name": "A", "attributes": { "speed": 4294967295, "handling": 1, "power": 4294967295 } },
            { "id": "b", "name": "B", "attributes": { "speed": 1, "handling": 1, "power": 4294967295 } }
        ],
        "tracks": [
            { "id": "t", "name": "T", "laps": 1, "blocks": [
                { "type": "straight", "probability": 0.5 },
                { "type": "confrontation", "probability": 0.5 }
            ] }
        ]
    }"#;
    let catalog = Catalog::from_json(json).unwrap();
    let rng = ScriptedRng::new().with_uniforms([0.1, 0.99, 0.99, 0.9, 0.99, 0.99]).with_ints([3]);
    let mut service = RaceService::with_rng(catalog, EngineConfig::default(), rng);
    let created = service.create_race(&["a", "b"], "t").unwrap();

    let straight = service.resolve_one_round(&created.race_id).unwrap();
    assert_eq!(straight.result.outcomes[0].points, u32::MAX);
    assert_eq!(straight.race.participants[0].score, u32::MAX);

    let confrontation = service.resolve_one_round(&created.race_id).unwrap();
    assert_eq!(confrontation.result.block_type, Some(BlockType::Confrontation));
    assert_eq!(confrontation.race.participants[0].score, u32::MAX);
    assert_eq!(confrontation.race.participants[0].stats.distance_traveled, u32::MAX);
}

#[test]
fn test_resolve_rounds_until_archived() {
    let mut service = service(11);
    let created = service.create_race(&["bowser", "toad"], "luigi-raceway").unwrap();

    let mut rounds = 0;
    loop {
        let update = service.resolve_one_round(&created.race_id).unwrap();
        rounds += 1;
        assert_eq!(update.result.round, rounds);
        assert_eq!(update.race.current_round, rounds);
        if update.result.finished {
            assert_eq!(update.race.status, RaceStatus::Completed);
            assert!(update.race.winner.is_some());
            break;
        }
        assert_eq!(update.race.status, RaceStatus::Active);
    }

    assert_eq!(rounds, 10);
    assert_eq!(service.active_count(), 0);

    let err = service.resolve_one_round(&created.race_id).unwrap_err();
    assert_eq!(err, RaceError::NotFound(created.race_id.clone()));
    assert_eq!(err.kind(), ErrorKind::NotFound);
}

#[test]
fn test_unknown_race_is_not_found() {
    let mut service = service(1);
    let ghost = RaceId::new("race_0_0");

    assert_eq!(service.race_snapshot(&ghost).unwrap_err().kind(), ErrorKind::NotFound);
    assert_eq!(service.resolve_one_round(&ghost).unwrap_err().kind(), ErrorKind::NotFound);
    assert_eq!(service.simulate_to_completion(&ghost).unwrap_err().kind(), ErrorKind::NotFound);
}

#[test]
fn test_simulate_to_completion() {
    let mut service = service(5);
    let created = service.create_race(&["mario", "luigi", "peach"], "mario-circuit").unwrap();

    let outcome = service.simulate_to_completion(&created.race_id).unwrap();

    assert!(!outcome.cancelled);
    assert_eq!(outcome.race_id, created.race_id);
    assert_eq!(outcome.rounds.len(), 15);
    assert_eq!(outcome.stats.status, RaceStatus::Completed);
    assert_eq!(outcome.stats.progress, 100.0);

    let winner = outcome.winner.unwrap();
    assert_eq!(winner.position, 1);
    assert_eq!(outcome.final_ranking[0].id, winner.id);
    let points: Vec<u32> = outcome.final_ranking.iter().map(|e| e.points).collect();
    assert!(points.windows(2).all(|w| w[0] >= w[1]));

    assert!(outcome.log.iter().any(|e| e.message.starts_with("🏆 WINNER:")));
}

// =============================================================================
// History
// =============================================================================

#[test]
fn test_history_most_recent_first_and_limited() {
    let mut service = service(9);
    let mut ids = Vec::new();
    for _ in 0..3 {
        let created = service.create_race(&["yoshi", "koopa"], "luigi-raceway").unwrap();
        service.simulate_to_completion(&created.race_id).unwrap();
        ids.push(created.race_id);
    }

    let history = service.history(None);
    let order: Vec<RaceId> = history.iter().map(|v| v.id.clone()).collect();
    assert_eq!(order, vec![ids[2].clone(), ids[1].clone(), ids[0].clone()]);
    assert!(history.iter().all(|v| v.status == RaceStatus::Completed));

    assert_eq!(service.history(Some(2)).len(), 2);
    assert_eq!(service.history(Some(0)).len(), 0);
}

#[test]
fn test_history_default_limit_from_config() {
    let config = EngineConfig::default().with_history_limit(2);
    let mut service = RaceService::with_rng(Catalog::builtin().unwrap(), config, GameRng::new(4));
    for _ in 0..3 {
        let created = service.create_race(&["mario", "toad"], "luigi-raceway").unwrap();
        service.simulate_to_completion(&created.race_id).unwrap();
    }

    assert_eq!(service.history(None).len(), 2);
    assert_eq!(service.history(Some(20)).len(), 3);
}

#[test]
fn test_history_capacity_drops_oldest() {
    let config = EngineConfig::default().with_history_capacity(2);
    let mut service = RaceService::with_rng(Catalog::builtin().unwrap(), config, GameRng::new(6));
    let mut ids = Vec::new();
    for _ in 0..4 {
        let created = service.create_race(&["peach", "toad"], "luigi-raceway").unwrap();
        service.simulate_to_completion(&created.race_id).unwrap();
        ids.push(created.race_id);
    }

    let order: Vec<RaceId> = service.history(Some(10)).iter().map(|v| v.id.clone()).collect();
    assert_eq!(order, vec![ids[3].clone(), ids[2].clone()]);
}

#[test]
fn test_archived_snapshot_serializes() {
    let mut service = service(2);
    let created = service.create_race(&["donkey-kong", "bowser"], "bowser-castle").unwrap();
    service.simulate_to_completion(&created.race_id).unwrap();

    let view = &service.history(Some(1))[0];
    let json = serde_json::to_value(view).unwrap();

    assert_eq!(json["status"], "completed");
    assert_eq!(json["current_round"], 15);
    assert!(json["winner"]["name"].is_string());
    assert!(json["ended_at"].is_string());
    assert!(json["stats"]["elapsed"].as_str().unwrap().contains(':'));
    assert!(json["participants"][0]["stats"]["blocks_resolved"].as_u64().unwrap() > 0);
}
