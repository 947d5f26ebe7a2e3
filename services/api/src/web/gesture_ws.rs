//! services/api/src/web/gesture_ws.rs
//!
//! This is the entry point and control loop for a gesture WebSocket
//! connection. Frames are handled serially by the connection's own
//! `GestureSession`; only the resulting state changes are pushed back.

use crate::web::{gesture_session::GestureSession, protocol::ServerMessage, state::AppState};
use axum::{
    extract::{
        ws::{Message, WebSocket},
        State, WebSocketUpgrade,
    },
    response::Response,
};
use futures::{
    stream::{SplitSink, StreamExt},
    SinkExt,
};
use std::sync::Arc;
use tracing::{error, info, warn};

/// The handler for upgrading HTTP requests to gesture WebSocket connections.
pub async fn gesture_ws_handler(
    ws: WebSocketUpgrade,
    State(app_state): State<Arc<AppState>>,
) -> Response {
    ws.on_upgrade(move |socket| handle_socket(socket, app_state))
}

async fn handle_socket(socket: WebSocket, app_state: Arc<AppState>) {
    info!("New gesture WebSocket connection established");

    let (mut sender, mut receiver) = socket.split();
    let mut session = GestureSession::new(
        app_state.estimator.clone(),
        app_state.config.gesture_min_confidence,
    );

    while let Some(msg) = receiver.next().await {
        let replies = match msg {
            Ok(Message::Text(text)) => session.handle_text(text.as_str()),
            Ok(Message::Binary(_)) => vec![ServerMessage::Error {
                message: "Binary frames are not supported".to_string(),
            }],
            Ok(Message::Close(_)) => {
                info!("Client sent close frame.");
                break;
            }
            // ping/pong is answered by axum
            Ok(_) => continue,
            Err(e) => {
                warn!("Gesture WebSocket receive error: {}", e);
                break;
            }
        };

        if send_all(&mut sender, replies).await.is_err() {
            error!("Failed to send gesture update; closing connection.");
            break;
        }
    }

    info!("Gesture WebSocket connection closed");
}

async fn send_all(
    sender: &mut SplitSink<WebSocket, Message>,
    replies: Vec<ServerMessage>,
) -> Result<(), axum::Error> {
    for reply in replies {
        match serde_json::to_string(&reply) {
            Ok(json) => sender.send(Message::Text(json.into())).await?,
            Err(e) => error!("Failed to serialize {:?}: {}", reply, e),
        }
    }
    Ok(())
}
