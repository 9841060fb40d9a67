//! Algorithm Step Playback
//!
//! Walks a list of [`algoviz_steps::Step`] snapshots over time under user
//! control, without knowing what the steps mean.
//!
//! # Architecture
//!
//! - **State**: [`Playback`], the synchronous state machine
//!   (`idle → playing → paused/finished`) with manual stepping and seeking
//! - **Player**: [`Player`], which owns a `Playback` and the single Tokio
//!   task that auto-advances it, cancelled on every transition away from
//!   `playing`
//! - **Views**: [`PlaybackView`] snapshots, pushed to adapters through a
//!   `watch` channel
//!
//! No operation fails. Calls that make no sense in the current status
//! (pausing while idle, stepping past either end) are no-ops.
//!
//! # Usage
//!
//! ```ignore
//! let steps = generate(Algorithm::BubbleSort, &AlgorithmInput::sequence(vec![5, 2, 9]))?;
//! let mut player = Player::with_steps(steps, PlaybackConfig::default());
//! let mut updates = player.subscribe();
//! player.play();
//! while updates.changed().await.is_ok() {
//!     render(&updates.borrow_and_update());
//! }
//! ```

mod player;
mod speed;
mod state;

pub use player::{PlaybackConfig, Player};
pub use speed::{PlaybackSpeed, Speed};
pub use state::{Playback, PlaybackStatus, PlaybackView, Tick};
