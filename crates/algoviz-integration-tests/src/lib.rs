//! Shared fixtures for the cross-crate scenarios under `tests/`.

use std::time::Duration;

use algoviz_playback::{PlaybackConfig, PlaybackStatus, PlaybackView, Player, Speed};
use algoviz_steps::{generate, Algorithm, AlgorithmInput, Step};
use tokio::sync::watch;

/// The array used throughout the sorting walkthroughs.
pub const SAMPLE: [i64; 7] = [64, 34, 25, 12, 22, 11, 90];

/// The array used throughout the searching walkthroughs.
pub const SEARCH_SAMPLE: [i64; 7] = [3, 7, 1, 9, 5, 2, 8];

pub fn run(algorithm: Algorithm, input: AlgorithmInput) -> Vec<Step> {
    match generate(algorithm, &input) {
        Ok(steps) => steps,
        Err(e) => panic!("{algorithm} rejected its own input shape: {e}"),
    }
}

pub fn linear_search(target: i64) -> Vec<Step> {
    run(
        Algorithm::LinearSearch,
        AlgorithmInput::search(SEARCH_SAMPLE.to_vec(), target),
    )
}

/// A player at the fastest allowed speed.
pub fn fast_player(steps: Vec<Step>) -> Player {
    Player::with_steps(
        steps,
        PlaybackConfig {
            default_speed: Speed::from_millis(Speed::MIN_MS),
        },
    )
}

/// One tick interval at the fastest speed.
pub fn tick() -> Duration {
    Duration::from_millis(Speed::MIN_MS)
}

/// Collect every published view until playback finishes.
pub async fn drain_until_finished(updates: &mut watch::Receiver<PlaybackView>) -> Vec<PlaybackView> {
    let mut seen = Vec::new();
    while updates.changed().await.is_ok() {
        let view = updates.borrow_and_update().clone();
        let done = view.status == PlaybackStatus::Finished;
        seen.push(view);
        if done {
            break;
        }
    }
    seen
}
