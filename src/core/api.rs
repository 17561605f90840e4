//! HTTP + WebSocket API for OmniFeed
//!
//! Endpoints:
//! - GET /health - Health check
//! - POST /feed/new - Create a feed
//! - GET /feed/{id} - Feed status
//! - POST /feed/{id}/pointer - Pointer down / move / up on the top card
//! - POST /feed/{id}/animation/{token}/complete - Renderer finished an intent
//! - GET /feed/{id}/history - Interaction history
//! - GET /feed/{id}/favorites - Saved posts
//! - POST /feed/{id}/load - Fetch another batch (history survives)
//! - POST /feed/{id}/reset - Clear and reload (favorites survive)
//! - WS /ws/{id} - Live updates; accepts pointer and completion messages

use axum::{
    extract::{
        rejection::JsonRejection,
        ws::{Message, WebSocket},
        Path, State, WebSocketUpgrade,
    },
    http::StatusCode,
    response::{IntoResponse, Json},
    routing::{get, post},
    Router,
};
use futures_util::{SinkExt, StreamExt};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;
use std::time::{Duration, Instant};
use tokio::sync::{broadcast, RwLock};
use tracing::{debug, info, warn};

use crate::config::AppConfig;
use crate::core::{FeedController, FeedbackSink, JsonFileSource, MockFeedSource, PostSource};
use crate::error::FeedError;
use crate::types::{
    FeedStatus, FeedbackPulse, HistoryEntry, LifecycleOutput, PointSample, ReasonCode, SocialPost,
};

const UPDATE_CHANNEL_CAPACITY: usize = 100;
const SWEEP_INTERVAL: Duration = Duration::from_millis(250);

/// Live update message
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum FeedUpdate {
    Output(LifecycleOutput),
    Status(FeedStatus),
    Feedback { pulse: FeedbackPulse, pattern_ms: Vec<u64> },
}

/// Feedback sink that forwards pulses to a feed's live-update channel
#[derive(Debug, Clone)]
pub struct BroadcastFeedback {
    tx: broadcast::Sender<FeedUpdate>,
}

impl BroadcastFeedback {
    pub fn new(tx: broadcast::Sender<FeedUpdate>) -> Self {
        Self { tx }
    }
}

impl FeedbackSink for BroadcastFeedback {
    fn pulse(&self, pulse: FeedbackPulse) {
        // no subscribers is fine
        let _ = self.tx.send(FeedUpdate::Feedback {
            pulse,
            pattern_ms: pulse.pattern_ms().to_vec(),
        });
    }
}

/// One feed and its live-update channel
#[derive(Debug)]
pub struct FeedSession {
    pub id: String,
    pub controller: FeedController,
    pub update_tx: broadcast::Sender<FeedUpdate>,
}

impl FeedSession {
    fn publish(&self, output: &LifecycleOutput) {
        debug!(feed_id = %self.id, post_id = %output.post_id, reason = output.reason.code(), "publish");
        let _ = self.update_tx.send(FeedUpdate::Output(output.clone()));
        if output.event.is_some() {
            self.publish_status();
        }
    }

    fn publish_status(&self) {
        let _ = self.update_tx.send(FeedUpdate::Status(self.controller.status()));
    }

    fn pointer(&mut self, req: &PointerRequest) -> Result<LifecycleOutput, StatusCode> {
        let output = match req.phase {
            PointerPhase::Down => self.controller.pointer_down(req.point()?),
            PointerPhase::Move => self.controller.pointer_move(req.point()?),
            PointerPhase::Up => self.controller.pointer_up(),
        }
        .map_err(status_for)?;
        self.publish(&output);
        Ok(output)
    }

    fn complete(&mut self, token: u64) -> Result<LifecycleOutput, StatusCode> {
        let output = self
            .controller
            .complete_animation(token)
            .map_err(status_for)?;
        self.publish(&output);
        match output.reason {
            ReasonCode::L210_STALE_ANIMATION_TOKEN | ReasonCode::L203_INPUT_IGNORED => {
                Err(StatusCode::CONFLICT)
            }
            _ => Ok(output),
        }
    }

    fn tick(&mut self, now: Instant) -> bool {
        match self.controller.tick(now) {
            Some(output) => {
                warn!(feed_id = %self.id, post_id = %output.post_id, "animation forced by sweeper");
                self.publish(&output);
                true
            }
            None => false,
        }
    }
}

/// App state
pub struct AppState {
    pub feeds: RwLock<HashMap<String, FeedSession>>,
    pub config: AppConfig,
    next_id: AtomicU64,
}

impl AppState {
    pub fn new(config: AppConfig) -> Self {
        Self {
            feeds: RwLock::new(HashMap::new()),
            config,
            next_id: AtomicU64::new(1),
        }
    }

    fn source(&self) -> Box<dyn PostSource> {
        match &self.config.feed.posts_file {
            Some(path) => Box::new(JsonFileSource::new(path.clone())),
            None => Box::new(MockFeedSource::new()),
        }
    }

    fn generate_feed_id(&self) -> String {
        use std::time::{SystemTime, UNIX_EPOCH};
        let nanos = SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .unwrap_or_default()
            .as_nanos();
        let seq = self.next_id.fetch_add(1, Ordering::Relaxed);
        format!("feed_{:x}_{}", nanos as u64, seq)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PointerPhase {
    Down,
    Move,
    Up,
}

/// Pointer request; coordinates are required for down and move
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PointerRequest {
    pub phase: PointerPhase,
    pub x: Option<f64>,
    pub y: Option<f64>,
}

impl PointerRequest {
    fn point(&self) -> Result<PointSample, StatusCode> {
        match (self.x, self.y) {
            (Some(x), Some(y)) if x.is_finite() && y.is_finite() => Ok(PointSample::new(x, y)),
            _ => Err(StatusCode::BAD_REQUEST),
        }
    }
}

/// Messages accepted on the WebSocket
#[derive(Debug, Clone, Deserialize)]
#[serde(tag = "action", rename_all = "snake_case")]
pub enum ClientMessage {
    Pointer(PointerRequest),
    Complete { token: u64 },
}

/// Create new feed response
#[derive(Debug, Serialize, Deserialize)]
pub struct NewFeedResponse {
    pub feed_id: String,
    pub websocket_url: String,
}

/// Feed status response
#[derive(Debug, Serialize, Deserialize)]
pub struct FeedStatusResponse {
    pub feed_id: String,
    #[serde(flatten)]
    pub status: FeedStatus,
}

/// Health response
#[derive(Debug, Serialize, Deserialize)]
pub struct HealthResponse {
    pub status: String,
    pub version: String,
    pub feeds_active: usize,
}

/// Create the API router
pub fn create_router(state: Arc<AppState>) -> Router {
    Router::new()
        .route("/health", get(health))
        .route("/feed/new", post(create_feed))
        .route("/feed/:id", get(get_feed))
        .route("/feed/:id/pointer", post(pointer))
        .route("/feed/:id/animation/:token/complete", post(complete_animation))
        .route("/feed/:id/history", get(get_history))
        .route("/feed/:id/favorites", get(get_favorites))
        .route("/feed/:id/load", post(load_feed))
        .route("/feed/:id/reset", post(reset_feed))
        .route("/ws/:id", get(websocket_handler))
        .with_state(state)
}

fn status_for(err: FeedError) -> StatusCode {
    match err {
        FeedError::NoTopCard => StatusCode::CONFLICT,
        FeedError::Script { .. } | FeedError::Config { .. } => StatusCode::BAD_REQUEST,
        FeedError::Source { .. } => StatusCode::BAD_GATEWAY,
        FeedError::Io(_) | FeedError::Serialization(_) => StatusCode::INTERNAL_SERVER_ERROR,
    }
}

/// Health check endpoint
async fn health(State(state): State<Arc<AppState>>) -> Json<HealthResponse> {
    let feeds = state.feeds.read().await;
    Json(HealthResponse {
        status: "ok".to_string(),
        version: crate::VERSION.to_string(),
        feeds_active: feeds.len(),
    })
}

/// Create a feed and load its first batch
async fn create_feed(State(state): State<Arc<AppState>>) -> Json<NewFeedResponse> {
    let feed_id = state.generate_feed_id();
    let (tx, _) = broadcast::channel(UPDATE_CHANNEL_CAPACITY);

    let mut controller = FeedController::new(
        state.config.clone(),
        state.source(),
        Arc::new(BroadcastFeedback::new(tx.clone())),
    );
    // an empty feed is still usable; reset retries the source
    if let Err(e) = controller.load_more() {
        warn!(feed_id = %feed_id, error = %e, "initial load failed");
    }

    let session = FeedSession {
        id: feed_id.clone(),
        controller,
        update_tx: tx,
    };
    state.feeds.write().await.insert(feed_id.clone(), session);
    info!(feed_id = %feed_id, "feed created");

    Json(NewFeedResponse {
        websocket_url: format!("/ws/{}", feed_id),
        feed_id,
    })
}

/// Get feed status
async fn get_feed(
    State(state): State<Arc<AppState>>,
    Path(id): Path<String>,
) -> Result<Json<FeedStatusResponse>, StatusCode> {
    let feeds = state.feeds.read().await;
    let session = feeds.get(&id).ok_or(StatusCode::NOT_FOUND)?;
    Ok(Json(FeedStatusResponse {
        feed_id: id,
        status: session.controller.status(),
    }))
}

/// Pointer input on the top card
async fn pointer(
    State(state): State<Arc<AppState>>,
    Path(id): Path<String>,
    payload: Result<Json<PointerRequest>, JsonRejection>,
) -> Result<Json<LifecycleOutput>, StatusCode> {
    let Json(req) = payload.map_err(|_| StatusCode::BAD_REQUEST)?;
    let mut feeds = state.feeds.write().await;
    let session = feeds.get_mut(&id).ok_or(StatusCode::NOT_FOUND)?;
    debug!(feed_id = %id, phase = ?req.phase, "pointer");
    session.pointer(&req).map(Json)
}

/// Animation completion callback
async fn complete_animation(
    State(state): State<Arc<AppState>>,
    Path((id, token)): Path<(String, u64)>,
) -> Result<Json<LifecycleOutput>, StatusCode> {
    let mut feeds = state.feeds.write().await;
    let session = feeds.get_mut(&id).ok_or(StatusCode::NOT_FOUND)?;
    session.complete(token).map(Json)
}

async fn get_history(
    State(state): State<Arc<AppState>>,
    Path(id): Path<String>,
) -> Result<Json<Vec<HistoryEntry>>, StatusCode> {
    let feeds = state.feeds.read().await;
    let session = feeds.get(&id).ok_or(StatusCode::NOT_FOUND)?;
    Ok(Json(session.controller.history().to_vec()))
}

async fn get_favorites(
    State(state): State<Arc<AppState>>,
    Path(id): Path<String>,
) -> Result<Json<Vec<SocialPost>>, StatusCode> {
    let feeds = state.feeds.read().await;
    let session = feeds.get(&id).ok_or(StatusCode::NOT_FOUND)?;
    Ok(Json(session.controller.favorites().to_vec()))
}

/// Append one batch; the way back from a caught-up feed
async fn load_feed(
    State(state): State<Arc<AppState>>,
    Path(id): Path<String>,
) -> Result<Json<FeedStatusResponse>, StatusCode> {
    let mut feeds = state.feeds.write().await;
    let session = feeds.get_mut(&id).ok_or(StatusCode::NOT_FOUND)?;
    let added = session.controller.load_more().map_err(status_for)?;
    info!(feed_id = %id, added, "feed loaded");
    session.publish_status();
    Ok(Json(FeedStatusResponse {
        feed_id: id,
        status: session.controller.status(),
    }))
}

/// Clear queue and history, then reload
async fn reset_feed(
    State(state): State<Arc<AppState>>,
    Path(id): Path<String>,
) -> Result<Json<FeedStatusResponse>, StatusCode> {
    let mut feeds = state.feeds.write().await;
    let session = feeds.get_mut(&id).ok_or(StatusCode::NOT_FOUND)?;
    session.controller.reset().map_err(status_for)?;
    session.publish_status();
    Ok(Json(FeedStatusResponse {
        feed_id: id,
        status: session.controller.status(),
    }))
}

/// WebSocket handler for live updates
async fn websocket_handler(
    State(state): State<Arc<AppState>>,
    Path(id): Path<String>,
    ws: WebSocketUpgrade,
) -> Result<impl IntoResponse, StatusCode> {
    let feeds = state.feeds.read().await;
    let session = feeds.get(&id).ok_or(StatusCode::NOT_FOUND)?;
    let rx = session.update_tx.subscribe();
    drop(feeds);

    Ok(ws.on_upgrade(move |socket| async move {
        handle_websocket(socket, state, id, rx).await;
    }))
}

/// Forward updates out, apply client messages in; ends when either side closes
async fn handle_websocket(
    socket: WebSocket,
    state: Arc<AppState>,
    id: String,
    mut rx: broadcast::Receiver<FeedUpdate>,
) {
    let (mut sender, mut receiver) = socket.split();

    let mut send_task = tokio::spawn(async move {
        loop {
            let update = match rx.recv().await {
                Ok(update) => update,
                Err(broadcast::error::RecvError::Lagged(skipped)) => {
                    warn!(skipped, "websocket client lagging");
                    continue;
                }
                Err(broadcast::error::RecvError::Closed) => break,
            };
            let json = match serde_json::to_string(&update) {
                Ok(json) => json,
                Err(_) => continue,
            };
            if sender.send(Message::Text(json)).await.is_err() {
                break;
            }
        }
    });

    let recv_state = state.clone();
    let recv_id = id.clone();
    let mut recv_task = tokio::spawn(async move {
        while let Some(Ok(msg)) = receiver.next().await {
            let text = match msg {
                Message::Text(text) => text,
                Message::Close(_) => break,
                _ => continue,
            };
            let parsed: ClientMessage = match serde_json::from_str(&text) {
                Ok(m) => m,
                Err(e) => {
                    debug!(feed_id = %recv_id, error = %e, "bad websocket message");
                    continue;
                }
            };
            let mut feeds = recv_state.feeds.write().await;
            let Some(session) = feeds.get_mut(&recv_id) else {
                break;
            };
            // outcomes reach the client through the update channel
            let result = match parsed {
                ClientMessage::Pointer(req) => session.pointer(&req),
                ClientMessage::Complete { token } => session.complete(token),
            };
            if let Err(status) = result {
                debug!(feed_id = %recv_id, %status, "websocket message rejected");
            }
        }
    });

    tokio::select! {
        _ = &mut send_task => recv_task.abort(),
        _ = &mut recv_task => send_task.abort(),
    }
    debug!(feed_id = %id, "websocket closed");
}

/// Tick every feed once; returns how many intents were forced
pub async fn sweep_timeouts(state: &AppState, now: Instant) -> usize {
    let mut feeds = state.feeds.write().await;
    let mut forced = 0;
    for session in feeds.values_mut() {
        if session.tick(now) {
            forced += 1;
        }
    }
    forced
}

/// Run the API server
pub async fn run_server(addr: &str, config: AppConfig) -> Result<(), Box<dyn std::error::Error>> {
    let state = Arc::new(AppState::new(config));

    let sweeper = state.clone();
    tokio::spawn(async move {
        let mut interval = tokio::time::interval(SWEEP_INTERVAL);
        loop {
            interval.tick().await;
            let forced = sweep_timeouts(&sweeper, Instant::now()).await;
            if forced > 0 {
                warn!(forced, "stalled animations forced");
            }
        }
    });

    let router = create_router(state);
    let listener = tokio::net::TcpListener::bind(addr).await?;
    info!(addr, "OmniFeed API listening");
    println!("OmniFeed API running on {}", addr);
    println!("  POST /feed/new                          - Create feed");
    println!("  GET  /feed/:id                          - Feed status");
    println!("  POST /feed/:id/pointer                  - Pointer down/move/up");
    println!("  POST /feed/:id/animation/:token/complete - Animation finished");
    println!("  GET  /feed/:id/history                  - Interaction history");
    println!("  GET  /feed/:id/favorites                - Saved posts");
    println!("  POST /feed/:id/load                     - Load more posts");
    println!("  POST /feed/:id/reset                    - Reset feed");
    println!("  WS   /ws/:id                            - Live updates");
    println!("  GET  /health                            - Health check");
    axum::serve(listener, router).await?;
    Ok(())
}
