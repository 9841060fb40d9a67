//! Server configuration from environment variables.

use std::net::SocketAddr;

use algoviz_playback::{PlaybackConfig, Speed};
use algoviz_steps::{Algorithm, RawInput};

use crate::error::{Error, Result};

const DEFAULT_ADDR: &str = "0.0.0.0:3000";
const DEFAULT_INPUT: &str = "64, 34, 25, 12, 22, 11, 90";

/// Configuration for the visualization server.
#[derive(Debug, Clone)]
pub struct VisConfig {
    /// HTTP listen address
    pub addr: SocketAddr,

    /// Playback defaults for the session
    pub playback: PlaybackConfig,

    /// Algorithm loaded at startup
    pub algorithm: Algorithm,

    /// Input loaded at startup
    pub input: RawInput,
}

impl Default for VisConfig {
    fn default() -> Self {
        Self {
            addr: SocketAddr::from(([0, 0, 0, 0], 3000)),
            playback: PlaybackConfig::default(),
            algorithm: Algorithm::BubbleSort,
            input: RawInput::values(DEFAULT_INPUT),
        }
    }
}

impl VisConfig {
    /// Create config from environment variables with sensible defaults.
    pub fn from_env() -> Result<Self> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Create config from an arbitrary variable source.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self> {
        let addr = lookup("ALGOVIZ_ADDR")
            .unwrap_or_else(|| DEFAULT_ADDR.to_string())
            .parse::<SocketAddr>()
            .map_err(|e| Error::Config(format!("invalid ALGOVIZ_ADDR: {e}")))?;

        let default_speed = match lookup("ALGOVIZ_SPEED_MS") {
            Some(ms) => Speed::from_millis(
                ms.trim()
                    .parse::<u64>()
                    .map_err(|e| Error::Config(format!("invalid ALGOVIZ_SPEED_MS: {e}")))?,
            ),
            None => Speed::default(),
        };

        let algorithm = match lookup("ALGOVIZ_ALGORITHM") {
            Some(name) => name
                .parse::<Algorithm>()
                .map_err(|e| Error::Config(format!("invalid ALGOVIZ_ALGORITHM: {e}")))?,
            None => Algorithm::BubbleSort,
        };

        let input = RawInput {
            values: lookup("ALGOVIZ_INPUT").unwrap_or_else(|| DEFAULT_INPUT.to_string()),
            target: lookup("ALGOVIZ_TARGET"),
            amount: lookup("ALGOVIZ_AMOUNT"),
            activities: lookup("ALGOVIZ_ACTIVITIES"),
        };

        Ok(Self {
            addr,
            playback: PlaybackConfig { default_speed },
            algorithm,
            input,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn lookup(vars: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let vars: HashMap<String, String> = vars
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |key: &str| vars.get(key).cloned()
    }

    #[test]
    fn defaults_when_unset() {
        let config = VisConfig::from_lookup(lookup(&[])).unwrap();
        let default = VisConfig::default();
        assert_eq!(config.addr, default.addr);
        assert_eq!(config.algorithm, Algorithm::BubbleSort);
        assert_eq!(config.input, default.input);
        assert_eq!(config.playback.default_speed, Speed::default());
    }

    #[test]
    fn reads_overrides() {
        let config = VisConfig::from_lookup(lookup(&[
            ("ALGOVIZ_ADDR", "127.0.0.1:8080"),
            ("ALGOVIZ_SPEED_MS", "20"),
            ("ALGOVIZ_ALGORITHM", "linear-search"),
            ("ALGOVIZ_INPUT", "3 7 1"),
            ("ALGOVIZ_TARGET", "7"),
        ]))
        .unwrap();

        assert_eq!(config.addr.port(), 8080);
        assert_eq!(config.playback.default_speed.as_millis(), Speed::MIN_MS);
        assert_eq!(config.algorithm, Algorithm::LinearSearch);
        assert_eq!(config.input, RawInput::values("3 7 1").with_target("7"));
    }

    #[test]
    fn invalid_values_are_config_errors() {
        for vars in [
            [("ALGOVIZ_ADDR", "not an address")],
            [("ALGOVIZ_SPEED_MS", "fast")],
            [("ALGOVIZ_ALGORITHM", "bogo_sort")],
        ] {
            let err = VisConfig::from_lookup(lookup(&vars)).unwrap_err();
            assert!(matches!(err, Error::Config(_)), "{err}");
        }
    }
}
