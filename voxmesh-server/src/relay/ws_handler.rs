use crate::AppState;
use axum::extract::ws::{Message, WebSocket};
use axum::extract::{State, WebSocketUpgrade};
use axum::response::IntoResponse;
use futures::{SinkExt, StreamExt};
use std::sync::Arc;
use tokio::sync::mpsc;
use tracing::{error, info, warn};
use voxmesh_core::{ClientMessage, ConnectionId, ServerEvent};

pub async fn ws_handler(
    ws: WebSocketUpgrade,
    State(state): State<Arc<AppState>>,
) -> impl IntoResponse {
    ws.on_upgrade(move |socket| handle_socket(socket, state))
}

async fn handle_socket(socket: WebSocket, state: Arc<AppState>) {
    let connection_id = ConnectionId::new();
    info!(%connection_id, "new WebSocket connection");

    let (mut sender, mut receiver) = socket.split();
    let (tx, mut rx) = mpsc::unbounded_channel::<ServerEvent>();

    state.relay.register_connection(connection_id, tx);

    let mut send_task = tokio::spawn(async move {
        while let Some(event) = rx.recv().await {
            let text = match serde_json::to_string(&event) {
                Ok(text) => text,
                Err(e) => {
                    error!("failed to serialize relay event: {e}");
                    continue;
                }
            };
            if sender.send(Message::Text(text.into())).await.is_err() {
                break;
            }
        }
    });

    let mut recv_task = tokio::spawn({
        let relay = state.relay.clone();

        async move {
            while let Some(Ok(msg)) = receiver.next().await {
                match msg {
                    Message::Text(text) => match serde_json::from_str::<ClientMessage>(&text) {
                        Ok(ClientMessage::JoinRoom { room_id, identity }) => {
                            if let Err(e) = relay.on_join(connection_id, identity, room_id) {
                                warn!(%connection_id, "join rejected: {e}");
                            }
                        }
                        Ok(ClientMessage::VoiceSignal {
                            room_id,
                            to,
                            payload,
                        }) => {
                            relay.on_signal(connection_id, room_id, to, payload);
                        }
                        Ok(ClientMessage::LeaveRoom { .. }) => {
                            relay.on_leave(connection_id);
                        }
                        Err(e) => warn!(%connection_id, "invalid client message: {e}"),
                    },
                    Message::Close(_) => break,
                    _ => {}
                }
            }

            relay.on_disconnect(connection_id);
        }
    });

    tokio::select! {
        _ = (&mut send_task) => recv_task.abort(),
        _ = (&mut recv_task) => send_task.abort(),
    };

    // covers the abort path; a second leave is a no-op
    state.relay.on_disconnect(connection_id);
    state.relay.unregister_connection(&connection_id);
    info!(%connection_id, "WebSocket disconnected");
}
