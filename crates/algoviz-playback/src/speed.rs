//! Inter-step delay and named speed presets.

use std::time::Duration;

use serde::{Deserialize, Serialize};

/// Delay between auto-advance ticks, always within
/// [`Speed::MIN_MS`]..=[`Speed::MAX_MS`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(from = "u64", into = "u64")]
pub struct Speed(u64);

impl Speed {
    /// Fastest allowed delay.
    pub const MIN_MS: u64 = 50;
    /// Slowest allowed delay.
    pub const MAX_MS: u64 = 5_000;
    /// Delay used when nothing else is configured.
    pub const DEFAULT_MS: u64 = 500;

    /// Build a speed, clamping out-of-range values.
    pub fn from_millis(ms: u64) -> Self {
        Self(ms.clamp(Self::MIN_MS, Self::MAX_MS))
    }

    pub fn as_millis(&self) -> u64 {
        self.0
    }

    pub fn delay(&self) -> Duration {
        Duration::from_millis(self.0)
    }
}

impl Default for Speed {
    fn default() -> Self {
        Self(Self::DEFAULT_MS)
    }
}

impl From<u64> for Speed {
    fn from(ms: u64) -> Self {
        Self::from_millis(ms)
    }
}

impl From<Speed> for u64 {
    fn from(speed: Speed) -> Self {
        speed.0
    }
}

/// Playback speed multiplier, relative to [`Speed::DEFAULT_MS`].
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PlaybackSpeed {
    /// 0.25x speed
    QuarterSpeed,
    /// 0.5x speed
    HalfSpeed,
    /// Normal speed (1x)
    Normal,
    /// 2x speed
    Double,
    /// 4x speed
    Quadruple,
    /// 10x speed
    TenX,
    /// Fastest allowed delay
    Maximum,
}

impl PlaybackSpeed {
    /// Get the speed multiplier.
    pub fn multiplier(&self) -> f64 {
        match self {
            PlaybackSpeed::QuarterSpeed => 0.25,
            PlaybackSpeed::HalfSpeed => 0.5,
            PlaybackSpeed::Normal => 1.0,
            PlaybackSpeed::Double => 2.0,
            PlaybackSpeed::Quadruple => 4.0,
            PlaybackSpeed::TenX => 10.0,
            PlaybackSpeed::Maximum => f64::INFINITY,
        }
    }

    /// Delay for this preset, clamped like any other speed.
    pub fn speed(&self) -> Speed {
        match self {
            PlaybackSpeed::Maximum => Speed::from_millis(Speed::MIN_MS),
            preset => Speed::from_millis((Speed::DEFAULT_MS as f64 / preset.multiplier()) as u64),
        }
    }
}
