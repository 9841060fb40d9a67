//! Timer-driven player: a [`Playback`] plus the task that ticks it.
//!
//! One `Player` owns at most one tick task. The task sleeps for the current
//! speed, applies a single tick under the lock, publishes the new view, and
//! only then schedules the next sleep, so ticks never overlap.
//!
//! Every transition away from `Playing` bumps an epoch inside the guarded
//! state and aborts the task before returning. A tick re-checks the epoch
//! under the same lock before touching anything, so a tick scheduled for an
//! old run can never land on a new one.

use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

use algoviz_steps::Step;
use tokio::runtime::Handle;
use tokio::sync::watch;
use tokio::task::JoinHandle;
use tracing::{debug, trace, warn};

use crate::speed::{PlaybackSpeed, Speed};
use crate::state::{Playback, PlaybackStatus, PlaybackView, Tick};

/// Configuration for a player.
#[derive(Debug, Clone, Copy, Default)]
pub struct PlaybackConfig {
    /// Delay between auto-advance ticks for newly created players
    pub default_speed: Speed,
}

struct Timeline {
    playback: Playback,
    epoch: u64,
}

struct Shared {
    timeline: Mutex<Timeline>,
    updates: watch::Sender<PlaybackView>,
}

impl Shared {
    fn lock(&self) -> MutexGuard<'_, Timeline> {
        // a panic mid-transition leaves the state machine consistent
        self.timeline.lock().unwrap_or_else(PoisonError::into_inner)
    }

    fn publish(&self, playback: &Playback) {
        self.updates.send_replace(PlaybackView::from(playback));
    }
}

/// Playback engine for one visualization instance.
///
/// `play` spawns onto the current Tokio runtime. Outside a runtime it is
/// ignored and the status is left unchanged.
pub struct Player {
    shared: Arc<Shared>,
    ticker: Option<JoinHandle<()>>,
}

impl Default for Player {
    fn default() -> Self {
        Self::new(PlaybackConfig::default())
    }
}

impl Player {
    /// Create an idle player with an empty run.
    pub fn new(config: PlaybackConfig) -> Self {
        Self::with_steps(Vec::new(), config)
    }

    pub fn with_steps(steps: Vec<Step>, config: PlaybackConfig) -> Self {
        let playback = Playback::with_speed(steps, config.default_speed);
        let (updates, _) = watch::channel(PlaybackView::from(&playback));
        Self {
            shared: Arc::new(Shared {
                timeline: Mutex::new(Timeline { playback, epoch: 0 }),
                updates,
            }),
            ticker: None,
        }
    }

    /// Observe every state change. The receiver starts at the current view.
    pub fn subscribe(&self) -> watch::Receiver<PlaybackView> {
        self.shared.updates.subscribe()
    }

    /// Snapshot of the current state.
    pub fn view(&self) -> PlaybackView {
        PlaybackView::from(&self.shared.lock().playback)
    }

    /// The step at the current position.
    pub fn current_step(&self) -> Option<Step> {
        self.shared.lock().playback.current_step().cloned()
    }

    pub fn status(&self) -> PlaybackStatus {
        self.shared.lock().playback.status()
    }

    pub fn position(&self) -> usize {
        self.shared.lock().playback.position()
    }

    pub fn total_steps(&self) -> usize {
        self.shared.lock().playback.total_steps()
    }

    pub fn speed(&self) -> Speed {
        self.shared.lock().playback.speed()
    }

    /// Replace the run, cancelling any pending tick.
    pub fn load(&mut self, steps: Vec<Step>) {
        self.control(true, |playback| playback.load(steps));
    }

    /// Start or resume auto-advance.
    pub fn play(&mut self) {
        if Handle::try_current().is_err() {
            warn!("Play ignored, no Tokio runtime to drive ticks");
            return;
        }
        self.control(false, |playback| {
            playback.play();
        });
    }

    pub fn pause(&mut self) {
        self.control(false, |playback| {
            playback.pause();
        });
    }

    /// Step forward one position; pauses autoplay first.
    pub fn step_forward(&mut self) -> bool {
        self.control(false, Playback::step_forward)
    }

    /// Step back one position; pauses autoplay first.
    pub fn step_back(&mut self) -> bool {
        self.control(false, Playback::step_back)
    }

    /// Jump to a position; pauses autoplay first.
    pub fn seek(&mut self, position: usize) {
        self.control(false, |playback| playback.seek(position));
    }

    /// Return to the first step, cancelling any pending tick.
    pub fn reset(&mut self) {
        self.control(true, Playback::reset);
    }

    /// Change the delay for subsequent ticks.
    pub fn set_speed(&mut self, ms: u64) -> Speed {
        self.control(false, |playback| playback.set_speed(ms))
    }

    pub fn set_preset(&mut self, preset: PlaybackSpeed) -> Speed {
        self.control(false, |playback| playback.set_preset(preset))
    }

    /// Apply `op` and reconcile the tick task with the resulting status.
    ///
    /// `replaces` forces cancellation even when not playing.
    fn control<R>(&mut self, replaces: bool, op: impl FnOnce(&mut Playback) -> R) -> R {
        let shared = Arc::clone(&self.shared);
        let mut timeline = shared.lock();

        let was_playing = timeline.playback.status() == PlaybackStatus::Playing;
        let result = op(&mut timeline.playback);
        let now_playing = timeline.playback.status() == PlaybackStatus::Playing;

        if replaces || (was_playing && !now_playing) {
            timeline.epoch += 1;
            if let Some(ticker) = self.ticker.take() {
                ticker.abort();
                trace!(epoch = timeline.epoch, "Pending tick cancelled");
            }
        }
        if now_playing && !was_playing {
            timeline.epoch += 1;
            if let Some(stale) = self.ticker.take() {
                stale.abort();
            }
            let epoch = timeline.epoch;
            self.ticker = Some(tokio::spawn(run_ticker(Arc::clone(&shared), epoch)));
            debug!(epoch, "Tick task started");
        }

        shared.publish(&timeline.playback);
        result
    }
}

impl Drop for Player {
    fn drop(&mut self) {
        self.shared.lock().epoch += 1;
        if let Some(ticker) = self.ticker.take() {
            ticker.abort();
        }
    }
}

async fn run_ticker(shared: Arc<Shared>, epoch: u64) {
    loop {
        let delay = {
            let timeline = shared.lock();
            if timeline.epoch != epoch {
                return;
            }
            timeline.playback.speed().delay()
        };

        tokio::time::sleep(delay).await;

        let tick = {
            let mut timeline = shared.lock();
            if timeline.epoch != epoch {
                trace!(epoch, current = timeline.epoch, "Stale tick dropped");
                return;
            }
            let tick = timeline.playback.tick();
            shared.publish(&timeline.playback);
            tick
        };

        match tick {
            Tick::Advanced(_) => continue,
            Tick::Finished(position) => {
                debug!(position, "Tick task done");
                return;
            }
            Tick::Ignored => return,
        }
    }
}
