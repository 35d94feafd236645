// WebSocket endpoint streaming employee events to authenticated clients

use axum::{
    extract::{
        ws::{Message, WebSocket, WebSocketUpgrade},
        Query, State,
    },
    http::StatusCode,
    response::IntoResponse,
};
use futures::{SinkExt, StreamExt};
use serde::Deserialize;
use tokio::sync::broadcast::error::RecvError;
use tracing::{debug, warn};

use crate::AppState;

/// WebSockets cannot carry an Authorization header from the browser, so the
/// bearer token arrives as a query parameter instead
#[derive(Deserialize)]
pub struct WsAuthQuery {
    token: Option<String>,
}

/// GET /ws
/// Upgrades to a WebSocket and streams events as JSON text frames
pub async fn events_ws_handler(
    ws: WebSocketUpgrade,
    State(state): State<AppState>,
    Query(query): Query<WsAuthQuery>,
) -> Result<impl IntoResponse, StatusCode> {
    let token = match query.token {
        Some(ref t) if !t.is_empty() => t,
        _ => {
            warn!("WebSocket connection attempt without token");
            return Err(StatusCode::UNAUTHORIZED);
        }
    };

    // Any valid account may listen; events carry no secrets
    if state.auth_service.authorize(token, None).await.is_err() {
        warn!("WebSocket connection attempt with invalid token");
        return Err(StatusCode::UNAUTHORIZED);
    }

    Ok(ws.on_upgrade(move |socket| handle_event_stream(socket, state)))
}

async fn handle_event_stream(socket: WebSocket, state: AppState) {
    let (mut sender, mut receiver) = socket.split();
    let mut events = state.events.subscribe();

    debug!("WebSocket client connected to event stream");

    loop {
        tokio::select! {
            event = events.recv() => {
                match event {
                    Ok(event) => {
                        let payload = match serde_json::to_string(&event) {
                            Ok(json) => json,
                            Err(e) => {
                                warn!("Failed to serialize event: {}", e);
                                continue;
                            }
                        };
                        if sender.send(Message::Text(payload)).await.is_err() {
                            break;
                        }
                    }
                    // A slow consumer missed events; skip ahead rather than
                    // terminating the stream
                    Err(RecvError::Lagged(skipped)) => {
                        warn!("WebSocket client lagged, skipped {} events", skipped);
                        continue;
                    }
                    Err(RecvError::Closed) => break,
                }
            }
            message = receiver.next() => {
                match message {
                    Some(Ok(Message::Close(_))) | None => break,
                    // Inbound frames are ignored; the channel is push-only
                    Some(Ok(_)) => continue,
                    Some(Err(_)) => break,
                }
            }
        }
    }

    debug!("WebSocket client disconnected from event stream");
}
