use super::*;
use crate::cards::Card;
use serde::Deserialize;
use serde::Serialize;
use std::collections::BTreeMap;

/// Messages sent from client to server over WebSocket.
/// Disconnection has no message; the socket closing is the signal.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum ClientMessage {
    /// Enter a room, creating it on first use.
    /// An empty key lands in the default room.
    Join {
        #[serde(default)]
        room: String,
    },
    /// Play the front cards against each other on the named attribute.
    ChooseAttribute { room: String, attribute: String },
}

/// Messages sent from server to client over WebSocket.
/// Deck contents are value snapshots taken when the message was built.
#[derive(Clone, Debug, Serialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum ServerMessage {
    /// Membership confirmed, with the identity the server knows you by.
    Joined { room: String, id: PlayerId },
    /// Seated alone; the game starts when a second player arrives.
    Waiting { members: usize },
    /// Both seats taken by others; pick another room key.
    RoomFull,
    /// Decks are dealt and the named player holds the opening turn.
    GameStart {
        decks: BTreeMap<PlayerId, Vec<Card>>,
        turn: PlayerId,
    },
    /// One round resolved.
    RoundResult {
        caller: PlayerId,
        opponent: PlayerId,
        caller_card: Card,
        opponent_card: Card,
        outcome: RoundOutcome,
        turn: PlayerId,
        decks: BTreeMap<PlayerId, Vec<Card>>,
        remaining: BTreeMap<PlayerId, usize>,
    },
    /// Attribute call ignored; wait for your turn.
    NotYourTurn,
    GameOver { winner: PlayerId },
    PlayerLeft { left: PlayerId },
}

impl ServerMessage {
    pub fn to_json(&self) -> String {
        serde_json::to_string(self).expect("serialize server message")
    }
}
