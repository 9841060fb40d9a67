//! Algorithm Walkthrough Server
//!
//! Serves generated algorithm runs with playback controls over HTTP and a
//! WebSocket view stream.
//!
//! # Architecture
//!
//! - **Session**: The current algorithm, its raw input and the [`Player`]
//!   walking the generated steps
//! - **REST API**: Pick an algorithm, control playback, read the current step
//! - **WebSocket**: Pushes a view on every state change and accepts the same
//!   controls as the REST API
//!
//! # Usage
//!
//! ```ignore
//! let config = VisConfig::from_env()?;
//! let session = Session::new(&config)?;
//! VisServer::new(session).serve(config.addr).await?;
//! ```
//!
//! [`Player`]: algoviz_playback::Player

mod config;
mod error;
mod server;
mod session;

pub use config::VisConfig;
pub use error::{Error, Result};
pub use server::VisServer;
pub use session::Session;

#[cfg(test)]
mod tests {
    use super::*;
    use algoviz_playback::PlaybackStatus;
    use algoviz_steps::{Algorithm, RawInput};

    #[test]
    fn default_session_is_ready_to_play() {
        let config = VisConfig::default();
        let session = Session::new(&config).unwrap();

        let step = session.player().current_step().unwrap();
        assert_eq!(step.sequence(), &[64, 34, 25, 12, 22, 11, 90]);
        assert_eq!(session.player().status(), PlaybackStatus::Idle);
    }

    #[test]
    fn configured_algorithm_is_generated() {
        let config = VisConfig {
            algorithm: Algorithm::CoinChange,
            input: RawInput::values("25 10 5 1").with_amount("63"),
            ..VisConfig::default()
        };
        let session = Session::new(&config).unwrap();

        let first = session.player().current_step().unwrap();
        assert_eq!(session.algorithm(), Algorithm::CoinChange);
        assert_eq!(first.sequence(), &[25, 10, 5, 1]);
        assert!(session.player().total_steps() > 1);
    }

    #[test]
    fn config_errors_render_readably() {
        let err = Error::Config("invalid ALGOVIZ_ADDR: bad".into());
        assert_eq!(err.to_string(), "Configuration error: invalid ALGOVIZ_ADDR: bad");
    }
}
