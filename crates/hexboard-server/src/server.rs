//! WebSocket server and connection handling.

use crate::protocol::{ClientMessage, ServerMessage};
use dashmap::DashMap;
use futures_util::{SinkExt, StreamExt};
use hexboard_core::{generate, generate_seeded, BoardCandidate, GenerationError};
use std::net::SocketAddr;
use std::sync::Arc;
use tokio::net::{TcpListener, TcpStream};
use tokio::sync::mpsc;
use tokio_tungstenite::{accept_async, tungstenite::Message};
use tracing::{error, info, warn};
use uuid::Uuid;

/// Server state shared across all connections.
pub struct ServerState {
    /// Mapping from client ID to their message sender
    pub client_senders: DashMap<Uuid, mpsc::UnboundedSender<ServerMessage>>,
    /// Search budget for requests that do not name one
    pub default_attempts: usize,
    /// Ceiling on any request's search budget
    pub max_attempts: usize,
}

impl ServerState {
    pub fn new(default_attempts: usize, max_attempts: usize) -> Self {
        Self {
            client_senders: DashMap::new(),
            default_attempts,
            max_attempts,
        }
    }

    /// Search budget for a request, never above `max_attempts`.
    pub fn attempts_for(&self, requested: Option<usize>) -> usize {
        let attempts = requested.unwrap_or(self.default_attempts);
        if attempts > self.max_attempts {
            warn!(requested = attempts, max = self.max_attempts, "clamping search budget");
            return self.max_attempts;
        }
        attempts
    }

    /// Send a message to a specific client.
    pub fn send_to_client(&self, client_id: Uuid, msg: ServerMessage) {
        if let Some(sender) = self.client_senders.get(&client_id) {
            let _ = sender.send(msg);
        }
    }
}

/// Run the WebSocket server.
pub async fn run_server(addr: SocketAddr, state: Arc<ServerState>) -> anyhow::Result<()> {
    let listener = TcpListener::bind(addr).await?;
    info!("Hexboard server listening on {}", addr);

    while let Ok((stream, peer_addr)) = listener.accept().await {
        let state = Arc::clone(&state);
        tokio::spawn(async move {
            if let Err(e) = handle_connection(stream, peer_addr, state).await {
                error!("Connection error from {}: {}", peer_addr, e);
            }
        });
    }

    Ok(())
}

/// Handle a single WebSocket connection.
async fn handle_connection(
    stream: TcpStream,
    addr: SocketAddr,
    state: Arc<ServerState>,
) -> anyhow::Result<()> {
    let ws_stream = accept_async(stream).await?;
    info!("New WebSocket connection from {}", addr);

    let (mut ws_sender, mut ws_receiver) = ws_stream.split();

    let client_id = Uuid::new_v4();

    // Create channel for outgoing messages
    let (tx, mut rx) = mpsc::unbounded_channel::<ServerMessage>();
    state.client_senders.insert(client_id, tx);

    let welcome = ServerMessage::Welcome { client_id };
    let msg_text = serde_json::to_string(&welcome)?;
    ws_sender.send(Message::Text(msg_text.into())).await?;

    // Spawn task to forward messages from channel to WebSocket
    let send_task = tokio::spawn(async move {
        while let Some(msg) = rx.recv().await {
            if let Ok(text) = serde_json::to_string(&msg) {
                if ws_sender.send(Message::Text(text.into())).await.is_err() {
                    break;
                }
            }
        }
    });

    while let Some(msg) = ws_receiver.next().await {
        match msg {
            Ok(Message::Text(text)) => match serde_json::from_str::<ClientMessage>(&text) {
                Ok(client_msg) => handle_message(client_id, client_msg, &state),
                Err(e) => {
                    warn!("Invalid message from {}: {}", client_id, text);
                    state.send_to_client(
                        client_id,
                        ServerMessage::Error {
                            message: format!("Invalid message: {}", e),
                        },
                    );
                }
            },
            Ok(Message::Close(_)) => {
                info!("Client {} closing connection", client_id);
                break;
            }
            Ok(Message::Ping(_)) => {
                state.send_to_client(client_id, ServerMessage::Pong);
            }
            Err(e) => {
                error!("WebSocket error from {}: {}", client_id, e);
                break;
            }
            _ => {}
        }
    }

    state.client_senders.remove(&client_id);
    send_task.abort();

    info!("Connection closed for {}", client_id);
    Ok(())
}

/// Handle a client message.
fn handle_message(client_id: Uuid, msg: ClientMessage, state: &Arc<ServerState>) {
    match msg {
        ClientMessage::Generate {
            options,
            attempts,
            seed,
        } => {
            let attempts = state.attempts_for(attempts);
            let state = Arc::clone(state);

            // Generation is CPU-bound; keep it off the async workers
            tokio::spawn(async move {
                let result = tokio::task::spawn_blocking(move || match seed {
                    Some(seed) => generate_seeded(&options, attempts, seed),
                    None => generate(&options, attempts),
                })
                .await;

                let reply = match result {
                    Ok(outcome) => generation_reply(outcome),
                    Err(e) => {
                        error!("Generation task for {} failed: {}", client_id, e);
                        ServerMessage::Error {
                            message: "Board generation failed unexpectedly".to_string(),
                        }
                    }
                };
                state.send_to_client(client_id, reply);
            });
        }

        ClientMessage::Ping => {
            state.send_to_client(client_id, ServerMessage::Pong);
        }
    }
}

/// Turn a generation result into the reply for the requesting client.
fn generation_reply(outcome: Result<BoardCandidate, GenerationError>) -> ServerMessage {
    match outcome {
        Ok(board) => ServerMessage::BoardGenerated {
            board_id: Uuid::new_v4(),
            board,
        },
        Err(e) => {
            let message = e.to_string();
            match e {
                GenerationError::Ungenerable { options, .. } => {
                    warn!("{}", message);
                    ServerMessage::GenerationFailed { message, options }
                }
            }
        }
    }
}
