//! Axum web server with WebSocket streaming for playback.
//!
//! The server is the adapter-facing surface: it exposes the playback
//! controls and pushes [`PlaybackView`] snapshots. Rendering is left to the
//! client.

use std::net::SocketAddr;
use std::sync::Arc;

use algoviz_playback::{PlaybackSpeed, PlaybackView};
use algoviz_steps::{Algorithm, InputShape, RawInput, Step};
use axum::{
    extract::{
        ws::{Message, WebSocket, WebSocketUpgrade},
        State,
    },
    response::IntoResponse,
    routing::{get, post},
    Json, Router,
};
use serde::{Deserialize, Serialize};
use tokio::net::TcpListener;
use tokio::sync::RwLock;
use tower_http::cors::CorsLayer;
use tracing::{debug, info, warn};

use crate::error::Result;
use crate::session::Session;

/// Shared application state.
struct AppState {
    session: RwLock<Session>,
}

/// Visualization server.
pub struct VisServer {
    state: Arc<AppState>,
}

impl VisServer {
    /// Create a new visualization server around a session.
    pub fn new(session: Session) -> Self {
        Self {
            state: Arc::new(AppState {
                session: RwLock::new(session),
            }),
        }
    }

    /// Build the router for the server.
    pub fn router(&self) -> Router {
        Router::new()
            .route("/api/status", get(status_handler))
            .route("/api/algorithms", get(algorithms_handler))
            .route("/api/run", post(run_handler))
            .route("/api/step", get(step_handler))
            .route("/api/playback", get(playback_view_handler))
            .route("/api/playback/play", post(play_handler))
            .route("/api/playback/pause", post(pause_handler))
            .route("/api/playback/reset", post(reset_handler))
            .route("/api/playback/step", post(step_control_handler))
            .route("/api/playback/seek", post(seek_handler))
            .route("/api/playback/speed", post(speed_handler))
            // WebSocket for real-time updates
            .route("/ws", get(ws_handler))
            .layer(CorsLayer::permissive())
            .with_state(Arc::clone(&self.state))
    }

    /// Run the server on the given address.
    pub async fn serve(self, addr: SocketAddr) -> Result<()> {
        let listener = TcpListener::bind(addr).await?;
        self.serve_on(listener).await
    }

    /// Run the server on an already bound listener.
    pub async fn serve_on(self, listener: TcpListener) -> Result<()> {
        info!("Visualization server running on http://{}", listener.local_addr()?);
        axum::serve(listener, self.router()).await?;
        Ok(())
    }
}

/// Server status response.
#[derive(Serialize)]
struct StatusResponse {
    status: &'static str,
    algorithm: Algorithm,
    total_steps: usize,
    position: usize,
}

async fn status_handler(State(state): State<Arc<AppState>>) -> Json<StatusResponse> {
    let session = state.session.read().await;
    let player = session.player();
    Json(StatusResponse {
        status: "ok",
        algorithm: session.algorithm(),
        total_steps: player.total_steps(),
        position: player.position(),
    })
}

#[derive(Serialize)]
struct AlgorithmInfo {
    id: Algorithm,
    name: &'static str,
    shape: InputShape,
}

async fn algorithms_handler() -> Json<Vec<AlgorithmInfo>> {
    Json(
        Algorithm::ALL
            .into_iter()
            .map(|id| AlgorithmInfo {
                id,
                name: id.name(),
                shape: id.shape(),
            })
            .collect(),
    )
}

#[derive(Deserialize)]
struct RunRequest {
    algorithm: Algorithm,
    #[serde(default)]
    input: RawInput,
}

async fn run_handler(
    State(state): State<Arc<AppState>>,
    Json(req): Json<RunRequest>,
) -> Result<Json<PlaybackView>> {
    let mut session = state.session.write().await;
    let view = session.run(req.algorithm, req.input)?;
    Ok(Json(view))
}

async fn step_handler(State(state): State<Arc<AppState>>) -> Json<Option<Step>> {
    let session = state.session.read().await;
    Json(session.player().current_step())
}

async fn playback_view_handler(State(state): State<Arc<AppState>>) -> Json<PlaybackView> {
    let session = state.session.read().await;
    Json(session.player().view())
}

async fn play_handler(State(state): State<Arc<AppState>>) -> Json<PlaybackView> {
    let mut session = state.session.write().await;
    session.player_mut().play();
    Json(session.player().view())
}

async fn pause_handler(State(state): State<Arc<AppState>>) -> Json<PlaybackView> {
    let mut session = state.session.write().await;
    session.player_mut().pause();
    Json(session.player().view())
}

async fn reset_handler(State(state): State<Arc<AppState>>) -> Json<PlaybackView> {
    let mut session = state.session.write().await;
    session.player_mut().reset();
    Json(session.player().view())
}

#[derive(Debug, Clone, Copy, Deserialize)]
#[serde(rename_all = "snake_case")]
enum Direction {
    Forward,
    Backward,
}

#[derive(Deserialize)]
struct StepRequest {
    direction: Direction,
}

async fn step_control_handler(
    State(state): State<Arc<AppState>>,
    Json(req): Json<StepRequest>,
) -> Json<PlaybackView> {
    let mut session = state.session.write().await;
    match req.direction {
        Direction::Forward => session.player_mut().step_forward(),
        Direction::Backward => session.player_mut().step_back(),
    };
    Json(session.player().view())
}

#[derive(Deserialize)]
struct SeekRequest {
    position: usize,
}

async fn seek_handler(
    State(state): State<Arc<AppState>>,
    Json(req): Json<SeekRequest>,
) -> Json<PlaybackView> {
    let mut session = state.session.write().await;
    session.player_mut().seek(req.position);
    Json(session.player().view())
}

/// Either a raw delay or a named preset.
#[derive(Debug, Clone, Copy, Deserialize)]
#[serde(untagged)]
enum SpeedRequest {
    Millis { ms: u64 },
    Preset { preset: PlaybackSpeed },
}

async fn speed_handler(
    State(state): State<Arc<AppState>>,
    Json(req): Json<SpeedRequest>,
) -> Json<PlaybackView> {
    let mut session = state.session.write().await;
    let player = session.player_mut();
    match req {
        SpeedRequest::Millis { ms } => player.set_speed(ms),
        SpeedRequest::Preset { preset } => player.set_preset(preset),
    };
    Json(session.player().view())
}

async fn ws_handler(
    ws: WebSocketUpgrade,
    State(state): State<Arc<AppState>>,
) -> impl IntoResponse {
    ws.on_upgrade(move |socket| handle_ws(socket, state))
}

async fn handle_ws(mut socket: WebSocket, state: Arc<AppState>) {
    info!("WebSocket client connected");

    let mut updates = state.session.read().await.subscribe();
    let initial = WsResponse::View(updates.borrow_and_update().clone());
    if let Err(e) = send_json(&mut socket, &initial).await {
        warn!("Failed to send initial view: {}", e);
        return;
    }

    loop {
        tokio::select! {
            msg = socket.recv() => {
                match msg {
                    Some(Ok(Message::Text(text))) => {
                        let response = match serde_json::from_str::<WsCommand>(&text) {
                            Ok(cmd) => handle_ws_command(&state, cmd).await,
                            Err(e) => Some(WsResponse::Error { message: e.to_string() }),
                        };
                        if let Some(response) = response {
                            if let Err(e) = send_json(&mut socket, &response).await {
                                warn!("Failed to send response: {}", e);
                                break;
                            }
                        }
                    }
                    Some(Ok(Message::Close(_))) | None => {
                        info!("WebSocket client disconnected");
                        break;
                    }
                    Some(Err(e)) => {
                        warn!("WebSocket error: {}", e);
                        break;
                    }
                    _ => {}
                }
            }
            changed = updates.changed() => {
                if changed.is_err() {
                    break;
                }
                let view = WsResponse::View(updates.borrow_and_update().clone());
                if let Err(e) = send_json(&mut socket, &view).await {
                    warn!("Failed to push view: {}", e);
                    break;
                }
            }
        }
    }
}

async fn send_json(socket: &mut WebSocket, response: &WsResponse) -> Result<()> {
    let json = serde_json::to_string(response)?;
    socket.send(Message::Text(json.into())).await?;
    Ok(())
}

#[derive(Debug, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
enum WsCommand {
    GetView,
    Play,
    Pause,
    Reset,
    StepForward,
    StepBack,
    Seek { position: usize },
    SetSpeed { ms: u64 },
}

#[derive(Debug, Serialize)]
#[serde(tag = "type", rename_all = "snake_case")]
enum WsResponse {
    View(PlaybackView),
    Error { message: String },
}

/// Apply a socket command. State changes reach the client through the
/// update channel, so only queries get a direct reply.
async fn handle_ws_command(state: &Arc<AppState>, cmd: WsCommand) -> Option<WsResponse> {
    debug!(?cmd, "WebSocket command");
    if let WsCommand::GetView = cmd {
        let session = state.session.read().await;
        return Some(WsResponse::View(session.player().view()));
    }

    let mut session = state.session.write().await;
    let player = session.player_mut();
    match cmd {
        WsCommand::Play => player.play(),
        WsCommand::Pause => player.pause(),
        WsCommand::Reset => player.reset(),
        WsCommand::StepForward => {
            player.step_forward();
        }
        WsCommand::StepBack => {
            player.step_back();
        }
        WsCommand::Seek { position } => player.seek(position),
        WsCommand::SetSpeed { ms } => {
            player.set_speed(ms);
        }
        WsCommand::GetView => {}
    }
    None
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::VisConfig;
    use algoviz_playback::PlaybackStatus;
    use std::time::Duration;

    fn test_state() -> Arc<AppState> {
        let server = VisServer::new(Session::new(&VisConfig::default()).unwrap());
        Arc::clone(&server.state)
    }

    #[test]
    fn router_builds() {
        let server = VisServer::new(Session::new(&VisConfig::default()).unwrap());
        let _router = server.router();
    }

    #[tokio::test]
    async fn status_reports_loaded_run() {
        let state = test_state();
        let Json(status) = status_handler(State(Arc::clone(&state))).await;
        assert_eq!(status.status, "ok");
        assert_eq!(status.algorithm, Algorithm::BubbleSort);
        assert_eq!(status.position, 0);
        assert!(status.total_steps > 1);
    }

    #[tokio::test]
    async fn algorithms_lists_every_algorithm() {
        let Json(list) = algorithms_handler().await;
        assert_eq!(list.len(), Algorithm::ALL.len());
        assert_eq!(list[3].shape, InputShape::Search);
    }

    #[tokio::test(start_paused = true)]
    async fn play_pause_through_handlers() {
        let state = test_state();

        let Json(view) = play_handler(State(Arc::clone(&state))).await;
        assert_eq!(view.status, PlaybackStatus::Playing);

        tokio::time::sleep(Duration::from_millis(1_250)).await;
        let Json(view) = pause_handler(State(Arc::clone(&state))).await;
        assert_eq!(view.status, PlaybackStatus::Paused);
        assert_eq!(view.position, 2);

        let Json(view) = step_control_handler(
            State(Arc::clone(&state)),
            Json(StepRequest { direction: Direction::Backward }),
        )
        .await;
        assert_eq!(view.position, 1);

        let Json(view) = reset_handler(State(Arc::clone(&state))).await;
        assert_eq!(view.status, PlaybackStatus::Idle);
        assert_eq!(view.position, 0);
    }

    #[tokio::test]
    async fn run_and_seek_through_handlers() {
        let state = test_state();
        let req = RunRequest {
            algorithm: Algorithm::LinearSearch,
            input: RawInput::values("3 7 1 9 5 2 8").with_target("5"),
        };
        let Json(view) = run_handler(State(Arc::clone(&state)), Json(req)).await.unwrap();
        assert_eq!(view.total_steps, 5);

        let Json(view) =
            seek_handler(State(Arc::clone(&state)), Json(SeekRequest { position: 99 })).await;
        assert_eq!(view.position, 4);

        let Json(step) = step_handler(State(Arc::clone(&state))).await;
        let step = step.unwrap();
        assert!(step.is_terminal());
        assert_eq!(step.annotation(), Some("found 5 at index 4"));
    }

    #[tokio::test]
    async fn speed_accepts_millis_or_preset() {
        let state = test_state();

        let req: SpeedRequest = serde_json::from_str(r#"{"ms": 10}"#).unwrap();
        let Json(view) = speed_handler(State(Arc::clone(&state)), Json(req)).await;
        assert_eq!(view.speed_ms, 50);

        let req: SpeedRequest = serde_json::from_str(r#"{"preset": "quarter_speed"}"#).unwrap();
        let Json(view) = speed_handler(State(Arc::clone(&state)), Json(req)).await;
        assert_eq!(view.speed_ms, 2_000);
    }

    #[tokio::test]
    async fn ws_commands_only_reply_to_queries() {
        let state = test_state();

        let cmd: WsCommand = serde_json::from_str(r#"{"type": "step_forward"}"#).unwrap();
        assert!(handle_ws_command(&state, cmd).await.is_none());

        let cmd: WsCommand = serde_json::from_str(r#"{"type": "get_view"}"#).unwrap();
        match handle_ws_command(&state, cmd).await {
            Some(WsResponse::View(view)) => assert_eq!(view.position, 1),
            other => panic!("unexpected response: {other:?}"),
        }

        let cmd: WsCommand = serde_json::from_str(r#"{"type": "seek", "position": 3}"#).unwrap();
        handle_ws_command(&state, cmd).await;
        assert_eq!(state.session.read().await.player().position(), 3);
    }

    #[test]
    fn ws_response_is_tagged() {
        let json = serde_json::to_value(WsResponse::Error { message: "bad".into() }).unwrap();
        assert_eq!(json["type"], "error");
        assert_eq!(json["message"], "bad");
    }
}
