//! WebSocket connection handler

use std::net::SocketAddr;
use std::sync::Arc;

use axum::{
    extract::{
        ws::{Message, WebSocket, WebSocketUpgrade},
        ConnectInfo, State,
    },
    response::Response,
};
use serde::Serialize;
use tokio::sync::broadcast;

use super::events::{AckMessage, ClientMessage, PongMessage, WelcomeMessage};
use super::state::AppState;

/// WebSocket upgrade handler
pub async fn ws_handler(
    ws: WebSocketUpgrade,
    ConnectInfo(addr): ConnectInfo<SocketAddr>,
    State(state): State<Arc<AppState>>,
) -> Response {
    ws.on_upgrade(move |socket| handle_socket(socket, addr, state))
}

/// Handle an individual WebSocket connection
async fn handle_socket(mut socket: WebSocket, addr: SocketAddr, state: Arc<AppState>) {
    // Subscribe before greeting so no event after the welcome is missed
    let mut rx = state.subscribe();
    log::info!("Client connected: {}", addr);

    let welcome = WelcomeMessage::new(state.current_sequence_id());
    if send_json(&mut socket, &welcome).await.is_err() {
        log::info!("Client disconnected: {} (during handshake)", addr);
        return;
    }

    let reason = loop {
        tokio::select! {
            // Broadcast events to client
            result = rx.recv() => {
                match result {
                    Ok(msg) => {
                        if send_json(&mut socket, &msg).await.is_err() {
                            break "send failed";
                        }
                    }
                    Err(broadcast::error::RecvError::Lagged(n)) => {
                        log::warn!("Client {} lagged behind by {} events", addr, n);
                        let error_msg = serde_json::json!({
                            "type": "error",
                            "code": "lagged",
                            "message": format!("Missed {} events, please refresh", n)
                        });
                        if socket.send(Message::Text(error_msg.to_string())).await.is_err() {
                            break "send failed";
                        }
                    }
                    Err(broadcast::error::RecvError::Closed) => {
                        break "server shutting down";
                    }
                }
            }

            // Handle client messages
            result = socket.recv() => {
                match result {
                    Some(Ok(msg)) => {
                        if !handle_client_message(msg, &mut socket, &state).await {
                            break "client closed";
                        }
                    }
                    Some(Err(_)) => break "transport error",
                    None => break "client went away",
                }
            }
        }
    };

    log::info!("Client disconnected: {} ({})", addr, reason);
}

/// Handle a message from the client
/// Returns false if the connection should be closed
async fn handle_client_message(msg: Message, socket: &mut WebSocket, state: &AppState) -> bool {
    match msg {
        Message::Text(text) => match serde_json::from_str::<ClientMessage>(&text) {
            Ok(request) => {
                if let Some(reply) = dispatch(request, state).await {
                    return send_json(socket, &reply).await.is_ok();
                }
                true
            }
            Err(e) => {
                log::debug!("Unparseable client message: {}", e);
                // A request that carried an ack number still gets its ack
                if let Some(ack) = ack_number(&text) {
                    return send_json(socket, &AckMessage::error(ack, e.to_string()))
                        .await
                        .is_ok();
                }
                let error_msg = serde_json::json!({
                    "type": "error",
                    "code": "bad_request",
                    "message": e.to_string()
                });
                socket
                    .send(Message::Text(error_msg.to_string()))
                    .await
                    .is_ok()
            }
        },
        Message::Binary(_) => true, // Ignore binary messages
        Message::Ping(data) => socket.send(Message::Pong(data)).await.is_ok(),
        Message::Pong(_) => true, // Ignore pong responses
        Message::Close(_) => false, // Client requested close
    }
}

/// Reply owed to the requesting client, if any
#[derive(Serialize)]
#[serde(untagged)]
enum Reply {
    Ack(AckMessage),
    Pong(PongMessage),
}

/// Run a client request through the mutation service
///
/// The broadcast of a successful mutation is sent by the service; this only
/// produces the direct acknowledgment.
async fn dispatch(request: ClientMessage, state: &AppState) -> Option<Reply> {
    match request {
        ClientMessage::Create { ack, payload } => {
            let result = state.service.create_message(payload).await;
            let ack = ack?;
            Some(Reply::Ack(match result {
                Ok(created) => AckMessage::created(ack, created.message),
                Err(e) => AckMessage::error(ack, e.to_string()),
            }))
        }
        ClientMessage::Delete { ack, id } => {
            let result = state.service.delete_message(id.unwrap_or_default()).await;
            let ack = ack?;
            Some(Reply::Ack(match result {
                Ok(id) => AckMessage::deleted(ack, id),
                Err(e) => AckMessage::error(ack, e.to_string()),
            }))
        }
        ClientMessage::Ping => Some(Reply::Pong(PongMessage::default())),
    }
}

/// The `ack` field of a frame that did not parse as a request
fn ack_number(text: &str) -> Option<u64> {
    serde_json::from_str::<serde_json::Value>(text)
        .ok()?
        .get("ack")?
        .as_u64()
}

async fn send_json<T: Serialize>(socket: &mut WebSocket, value: &T) -> Result<(), axum::Error> {
    match serde_json::to_string(value) {
        Ok(json) => socket.send(Message::Text(json)).await,
        Err(e) => {
            log::error!("Failed to encode outgoing message: {}", e);
            Ok(())
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_ack_number_from_unparseable_request() {
        assert_eq!(ack_number(r#"{"type":"create","ack":9,"payload":"oops"}"#), Some(9));
        assert_eq!(ack_number(r#"{"type":"explode"}"#), None);
        assert_eq!(ack_number(r#"{"ack":"nine"}"#), None);
        assert_eq!(ack_number("not json"), None);
    }
}
