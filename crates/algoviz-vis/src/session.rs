//! One visualization instance: the chosen algorithm, its input and the
//! player walking the generated run.

use algoviz_playback::{PlaybackView, Player};
use algoviz_steps::{generate_from_raw, Algorithm, RawInput};
use tokio::sync::watch;
use tracing::info;

use crate::config::VisConfig;
use crate::error::Result;

/// A visualization session.
///
/// Changing the algorithm or input regenerates the run from scratch; the
/// player is reused so subscribers stay attached.
pub struct Session {
    algorithm: Algorithm,
    input: RawInput,
    player: Player,
}

impl Session {
    /// Create a session and generate the configured run.
    pub fn new(config: &VisConfig) -> Result<Self> {
        let mut session = Self {
            algorithm: config.algorithm,
            input: config.input.clone(),
            player: Player::new(config.playback),
        };
        session.regenerate()?;
        Ok(session)
    }

    /// Switch to a new algorithm/input and load a fresh run.
    pub fn run(&mut self, algorithm: Algorithm, input: RawInput) -> Result<PlaybackView> {
        self.algorithm = algorithm;
        self.input = input;
        self.regenerate()?;
        Ok(self.player.view())
    }

    fn regenerate(&mut self) -> Result<()> {
        let steps = generate_from_raw(self.algorithm, &self.input)?;
        info!(
            algorithm = self.algorithm.id(),
            total_steps = steps.len(),
            "Generated run"
        );
        self.player.load(steps);
        Ok(())
    }

    pub fn algorithm(&self) -> Algorithm {
        self.algorithm
    }

    pub fn input(&self) -> &RawInput {
        &self.input
    }

    pub fn player(&self) -> &Player {
        &self.player
    }

    pub fn player_mut(&mut self) -> &mut Player {
        &mut self.player
    }

    pub fn subscribe(&self) -> watch::Receiver<PlaybackView> {
        self.player.subscribe()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use algoviz_playback::PlaybackStatus;

    #[test]
    fn session_loads_configured_run() {
        let session = Session::new(&VisConfig::default()).unwrap();
        assert_eq!(session.algorithm(), Algorithm::BubbleSort);

        let view = session.player().view();
        assert_eq!(view.status, PlaybackStatus::Idle);
        assert_eq!(view.position, 0);
        assert!(view.total_steps > 1);
    }

    #[test]
    fn run_replaces_the_run() {
        let mut session = Session::new(&VisConfig::default()).unwrap();
        session.player_mut().seek(3);

        let view = session
            .run(
                Algorithm::LinearSearch,
                RawInput::values("3, 7, 1, 9, 5, 2, 8").with_target("42"),
            )
            .unwrap();

        assert_eq!(view.position, 0);
        assert_eq!(view.total_steps, 7);
        assert_eq!(view.status, PlaybackStatus::Idle);
        assert_eq!(session.input().target.as_deref(), Some("42"));
    }

    #[test]
    fn malformed_input_becomes_single_step() {
        let mut session = Session::new(&VisConfig::default()).unwrap();
        let view = session
            .run(Algorithm::SelectionSort, RawInput::values("4, four"))
            .unwrap();

        assert_eq!(view.total_steps, 1);
        let step = view.step.unwrap();
        assert!(step.is_terminal());
        assert!(step.annotation().unwrap().starts_with("invalid input"));
    }

    #[test]
    fn subscribers_survive_a_new_run() {
        let mut session = Session::new(&VisConfig::default()).unwrap();
        let mut updates = session.subscribe();

        session
            .run(Algorithm::InsertionSort, RawInput::values("3 1 2"))
            .unwrap();

        assert!(updates.has_changed().unwrap());
        assert_eq!(updates.borrow_and_update().total_steps, session.player().total_steps());
    }
}
