//! Integration test: full game sessions
//!
//! Drives whole runs through GameSession::tick the way the terminal loop
//! does, checking the invariants that hold across a run: deterministic
//! replay under a seeded RNG, monotonic score, a stocked platform buffer,
//! and the session freezing once the run ends.

use goobi::constants::{
    CANVAS_HEIGHT, CANVAS_WIDTH, INITIAL_PLATFORM_COUNT, MIN_PLATFORM_BUFFER, PLAYER_COLL_WIDTH,
    PLAYER_START_X, PLAYER_START_Y,
};
use goobi::game::input::Intent;
use goobi::game::session::{GameOutcome, GameSession};
use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;

/// One simulated frame at 60fps.
const FRAME: f64 = 1.0 / 60.0;

fn rng(seed: u64) -> ChaCha8Rng {
    ChaCha8Rng::seed_from_u64(seed)
}

/// Tick the session `count` times, stopping early if the run ends.
/// Returns the number of ticks that actually ran.
fn drive(session: &mut GameSession, rng: &mut ChaCha8Rng, count: usize) -> usize {
    for i in 0..count {
        if session.tick(rng, FRAME) {
            return i + 1;
        }
    }
    count
}

/// A fixed input script keyed on frame number, so two sessions can be
/// driven through identical histories.
fn scripted_intent(frame: usize) -> Option<Intent> {
    match frame % 180 {
        0 => Some(Intent::MoveLeft),
        60 => Some(Intent::MoveRight),
        120 => Some(Intent::Stop),
        30 | 90 | 150 => Some(Intent::Jump(true)),
        35 | 95 | 155 => Some(Intent::Jump(false)),
        _ => None,
    }
}

// =============================================================================
// Session Construction
// =============================================================================

#[test]
fn test_new_session_matches_canvas_layout() {
    let mut rng = rng(1);
    let session = GameSession::new(&mut rng);

    assert_eq!(session.player.x, PLAYER_START_X);
    assert_eq!(session.player.y, PLAYER_START_Y);
    assert_eq!(session.platforms.len(), INITIAL_PLATFORM_COUNT);
    assert!(session.obstacles.is_empty());
    assert_eq!(session.score, 0);
    assert_eq!(session.camera_y, 0.0);
    assert!(session.outcome.is_none());
}

#[test]
fn test_restart_builds_a_fresh_session() {
    let mut rng = rng(2);
    let mut session = GameSession::new(&mut rng);

    // Kill the run by removing the floor.
    session.platforms.clear();
    let ran = drive(&mut session, &mut rng, 600);
    assert!(ran < 600, "run should end after the floor is gone");
    assert_eq!(session.outcome, Some(GameOutcome::Fell));

    let fresh = GameSession::new(&mut rng);
    assert!(fresh.outcome.is_none());
    assert_eq!(fresh.score, 0);
    assert_eq!(fresh.player.x, PLAYER_START_X);
    assert_eq!(fresh.player.y, PLAYER_START_Y);
    assert_eq!(fresh.platforms.len(), INITIAL_PLATFORM_COUNT);
}

// =============================================================================
// Deterministic Replay
// =============================================================================

#[test]
fn test_seeded_sessions_replay_identically() {
    let mut rng_a = rng(7);
    let mut rng_b = rng(7);
    let mut session_a = GameSession::new(&mut rng_a);
    let mut session_b = GameSession::new(&mut rng_b);

    for frame in 0..900 {
        if let Some(intent) = scripted_intent(frame) {
            session_a.apply_intent(intent);
            session_b.apply_intent(intent);
        }
        let ended_a = session_a.tick(&mut rng_a, FRAME);
        let ended_b = session_b.tick(&mut rng_b, FRAME);

        assert_eq!(ended_a, ended_b, "divergence at frame {}", frame);
        assert_eq!(session_a.player.x, session_b.player.x);
        assert_eq!(session_a.player.y, session_b.player.y);
        assert_eq!(session_a.camera_y, session_b.camera_y);
        assert_eq!(session_a.score, session_b.score);
        assert_eq!(session_a.platforms.len(), session_b.platforms.len());
        assert_eq!(session_a.obstacles.len(), session_b.obstacles.len());
        if ended_a {
            break;
        }
    }
}

#[test]
fn test_different_seeds_diverge_in_layout() {
    let mut rng_a = rng(3);
    let mut rng_b = rng(4);
    let session_a = GameSession::new(&mut rng_a);
    let session_b = GameSession::new(&mut rng_b);

    // Platform x positions are rolled per platform; two seeds agreeing on
    // every one of them would mean the RNG is not being consulted.
    let same = session_a
        .platforms
        .iter()
        .zip(session_b.platforms.iter())
        .filter(|(a, b)| a.x == b.x && a.width == b.width)
        .count();
    assert!(same < session_a.platforms.len());
}

// =============================================================================
// Run Invariants
// =============================================================================

#[test]
fn test_score_never_decreases_over_a_run() {
    let mut rng = rng(11);
    let mut session = GameSession::new(&mut rng);

    let mut best_seen = 0;
    for frame in 0..1800 {
        if let Some(intent) = scripted_intent(frame) {
            session.apply_intent(intent);
        }
        let ended = session.tick(&mut rng, FRAME);
        assert!(
            session.score >= best_seen,
            "score dropped from {} to {}",
            best_seen,
            session.score
        );
        best_seen = session.score;
        if ended {
            break;
        }
    }
}

#[test]
fn test_platform_buffer_stays_stocked() {
    let mut rng = rng(12);
    let mut session = GameSession::new(&mut rng);

    for frame in 0..1800 {
        if let Some(intent) = scripted_intent(frame) {
            session.apply_intent(intent);
        }
        let ended = session.tick(&mut rng, FRAME);
        if ended {
            break;
        }
        assert!(
            session.platforms.len() >= MIN_PLATFORM_BUFFER,
            "buffer ran dry at frame {}: {} platforms",
            frame,
            session.platforms.len()
        );
    }
}

#[test]
fn test_player_never_leaves_the_canvas_horizontally() {
    let mut rng = rng(13);
    let mut session = GameSession::new(&mut rng);

    // Hold left for five seconds, then right for five.
    session.apply_intent(Intent::MoveLeft);
    for _ in 0..300 {
        if session.tick(&mut rng, FRAME) {
            return;
        }
        assert!(session.player.x >= 0.0);
    }
    session.apply_intent(Intent::MoveRight);
    for _ in 0..300 {
        if session.tick(&mut rng, FRAME) {
            return;
        }
        assert!(session.player.x <= CANVAS_WIDTH - PLAYER_COLL_WIDTH);
    }
}

// =============================================================================
// Run End
// =============================================================================

#[test]
fn test_falling_out_ends_and_freezes_the_session() {
    let mut rng = rng(14);
    let mut session = GameSession::new(&mut rng);

    session.platforms.clear();
    let ran = drive(&mut session, &mut rng, 600);
    assert!(ran < 600, "player should fall without platforms");
    assert_eq!(session.outcome, Some(GameOutcome::Fell));
    assert!(session.player.y > CANVAS_HEIGHT);

    // A finished session ignores further ticks and input.
    let frozen_y = session.player.y;
    let frozen_score = session.score;
    session.apply_intent(Intent::MoveLeft);
    for _ in 0..30 {
        assert!(!session.tick(&mut rng, FRAME));
    }
    assert_eq!(session.player.y, frozen_y);
    assert_eq!(session.score, frozen_score);
}
