//! Playback controls for a step list.
//!
//! [`Playback`] is the synchronous state machine. It never schedules
//! anything itself: auto-advance is a sequence of [`Playback::tick`] calls
//! made by whoever owns the timer (see [`crate::Player`]).

use algoviz_steps::Step;
use serde::{Deserialize, Serialize};
use tracing::{debug, trace};

use crate::speed::{PlaybackSpeed, Speed};

/// Current state of playback.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PlaybackStatus {
    /// Freshly loaded or reset, at the first step
    Idle,
    /// Auto-advancing
    Playing,
    /// Auto-advance halted; manual navigation
    Paused,
    /// Autoplay reached the last step
    Finished,
}

/// Result of one auto-advance tick.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Tick {
    /// Moved to the given position; more ticks follow.
    Advanced(usize),
    /// Moved to the last position; autoplay is over.
    Finished(usize),
    /// Not playing, nothing changed.
    Ignored,
}

/// Playback state for one visualization instance.
///
/// Invariants: `position` indexes into `steps` (or is 0 for an empty list),
/// `Playing` implies `position` is before the last index, and `Finished`
/// implies it is on the last index.
#[derive(Debug, Clone)]
pub struct Playback {
    steps: Vec<Step>,
    position: usize,
    status: PlaybackStatus,
    speed: Speed,
}

impl Default for Playback {
    fn default() -> Self {
        Self::new(Vec::new())
    }
}

impl Playback {
    /// Create a new playback controller at the default speed.
    pub fn new(steps: Vec<Step>) -> Self {
        Self::with_speed(steps, Speed::default())
    }

    pub fn with_speed(steps: Vec<Step>, speed: Speed) -> Self {
        Self {
            steps,
            position: 0,
            status: PlaybackStatus::Idle,
            speed,
        }
    }

    /// Get the current position.
    pub fn position(&self) -> usize {
        self.position
    }

    /// Get the total number of steps.
    pub fn total_steps(&self) -> usize {
        self.steps.len()
    }

    /// Get the current playback status.
    pub fn status(&self) -> PlaybackStatus {
        self.status
    }

    /// Get the current inter-step delay.
    pub fn speed(&self) -> Speed {
        self.speed
    }

    pub fn steps(&self) -> &[Step] {
        &self.steps
    }

    /// The step at the current position; `None` only for an empty run.
    pub fn current_step(&self) -> Option<&Step> {
        self.steps.get(self.position)
    }

    fn last_index(&self) -> usize {
        self.steps.len().saturating_sub(1)
    }

    /// Whether the position is on the last step.
    pub fn is_at_end(&self) -> bool {
        self.position == self.last_index()
    }

    /// Progress through the run (0.0 - 1.0).
    pub fn progress(&self) -> f64 {
        match self.steps.len() {
            0 => 0.0,
            1 => 1.0,
            len => self.position as f64 / (len - 1) as f64,
        }
    }

    /// Replace the run and start over.
    pub fn load(&mut self, steps: Vec<Step>) {
        self.steps = steps;
        self.position = 0;
        self.status = PlaybackStatus::Idle;
        debug!(total_steps = self.steps.len(), "Run loaded");
    }

    /// Start or resume auto-advance.
    ///
    /// From the last index this goes straight to `Finished`. Returns whether
    /// the status is now `Playing`.
    pub fn play(&mut self) -> bool {
        match self.status {
            PlaybackStatus::Idle | PlaybackStatus::Paused if !self.steps.is_empty() => {
                if self.is_at_end() {
                    self.status = PlaybackStatus::Finished;
                    debug!(position = self.position, "Play at last step, finished");
                    false
                } else {
                    self.status = PlaybackStatus::Playing;
                    debug!(position = self.position, speed_ms = self.speed.as_millis(), "Playback started");
                    true
                }
            }
            status => {
                trace!(?status, "Play ignored");
                self.status == PlaybackStatus::Playing
            }
        }
    }

    /// Halt auto-advance. Returns whether anything changed.
    pub fn pause(&mut self) -> bool {
        if self.status != PlaybackStatus::Playing {
            trace!(status = ?self.status, "Pause ignored");
            return false;
        }
        self.status = PlaybackStatus::Paused;
        debug!(position = self.position, "Playback paused");
        true
    }

    /// Manual control overrides autoplay.
    fn take_manual_control(&mut self) {
        if self.status == PlaybackStatus::Playing {
            self.status = PlaybackStatus::Paused;
            debug!(position = self.position, "Manual step, autoplay paused");
        }
    }

    /// Step forward one position, clamped at the last step.
    ///
    /// Returns whether the position moved.
    pub fn step_forward(&mut self) -> bool {
        self.take_manual_control();
        if self.position >= self.last_index() {
            trace!(position = self.position, "Step forward at end");
            return false;
        }
        self.position += 1;
        debug!(position = self.position, "Stepped forward");
        true
    }

    /// Step back one position, clamped at the first step.
    ///
    /// Leaving the last step after autoplay finished switches to `Paused`.
    pub fn step_back(&mut self) -> bool {
        self.take_manual_control();
        if self.position == 0 {
            trace!("Step back at start");
            return false;
        }
        self.position -= 1;
        if self.status == PlaybackStatus::Finished {
            self.status = PlaybackStatus::Paused;
        }
        debug!(position = self.position, "Stepped back");
        true
    }

    /// Jump to a position, clamped to the last step.
    pub fn seek(&mut self, position: usize) {
        self.take_manual_control();
        let target = position.min(self.last_index());
        if self.status == PlaybackStatus::Finished && target != self.position {
            self.status = PlaybackStatus::Paused;
        }
        self.position = target;
        debug!(position = self.position, requested = position, "Seeked");
    }

    /// Return to the first step without regenerating the run.
    pub fn reset(&mut self) {
        self.position = 0;
        self.status = PlaybackStatus::Idle;
        debug!("Playback reset");
    }

    /// Set the inter-step delay in milliseconds, clamped to the valid range.
    pub fn set_speed(&mut self, ms: u64) -> Speed {
        self.speed = Speed::from_millis(ms);
        debug!(requested_ms = ms, speed_ms = self.speed.as_millis(), "Speed set");
        self.speed
    }

    /// Set the inter-step delay from a named preset.
    pub fn set_preset(&mut self, preset: PlaybackSpeed) -> Speed {
        self.speed = preset.speed();
        debug!(?preset, speed_ms = self.speed.as_millis(), "Speed preset set");
        self.speed
    }

    /// Apply one auto-advance tick.
    pub fn tick(&mut self) -> Tick {
        if self.status != PlaybackStatus::Playing {
            return Tick::Ignored;
        }
        self.position += 1;
        if self.is_at_end() {
            self.status = PlaybackStatus::Finished;
            debug!(position = self.position, "Playback finished");
            Tick::Finished(self.position)
        } else {
            trace!(position = self.position, "Tick");
            Tick::Advanced(self.position)
        }
    }
}

/// Playback snapshot for presentation adapters.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PlaybackView {
    pub position: usize,
    pub total_steps: usize,
    pub status: PlaybackStatus,
    pub speed_ms: u64,
    pub progress: f64,
    pub step: Option<Step>,
}

impl From<&Playback> for PlaybackView {
    fn from(playback: &Playback) -> Self {
        Self {
            position: playback.position,
            total_steps: playback.total_steps(),
            status: playback.status,
            speed_ms: playback.speed.as_millis(),
            progress: playback.progress(),
            step: playback.current_step().cloned(),
        }
    }
}
