//! WebSocket protocol messages for the board generation service.

use hexboard_core::{BoardCandidate, GenerationOptions};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Messages sent from client to server.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "type", content = "payload")]
pub enum ClientMessage {
    /// Generate a board
    Generate {
        /// Missing fields take their defaults
        #[serde(default)]
        options: GenerationOptions,
        /// Search budget; the server default when absent
        #[serde(default)]
        attempts: Option<usize>,
        /// Fixed seed for a reproducible board
        #[serde(default)]
        seed: Option<u64>,
    },

    /// Ping for keepalive
    Ping,
}

/// Messages sent from server to client.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "type", content = "payload")]
pub enum ServerMessage {
    /// Welcome message with assigned client ID
    Welcome { client_id: Uuid },

    /// A board was generated
    BoardGenerated { board_id: Uuid, board: BoardCandidate },

    /// The options cannot produce a board; do not resend them unchanged
    GenerationFailed {
        message: String,
        options: GenerationOptions,
    },

    /// Error occurred
    Error { message: String },

    /// Pong response
    Pong,
}
