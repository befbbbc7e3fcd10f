use super::*;
use crate::cards::Card;
use serde::Serialize;
use std::collections::BTreeMap;

/// Per-player deck snapshots taken at notification time.
pub type DeckMap = BTreeMap<PlayerId, Vec<Card>>;

/// How a single round fell for the player who called the attribute.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum RoundOutcome {
    Caller,
    Opponent,
    Draw,
}

impl std::fmt::Display for RoundOutcome {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Caller => write!(f, "caller"),
            Self::Opponent => write!(f, "opponent"),
            Self::Draw => write!(f, "draw"),
        }
    }
}

/// Everything one resolution produced: the cards played, who took them,
/// whose turn comes next, and the deck state handed to clients.
#[derive(Clone, Debug, PartialEq)]
pub struct Resolution {
    pub caller: PlayerId,
    pub opponent: PlayerId,
    pub caller_card: Card,
    pub opponent_card: Card,
    pub outcome: RoundOutcome,
    pub turn: PlayerId,
    pub decks: DeckMap,
    pub remaining: BTreeMap<PlayerId, usize>,
    /// Set when this resolution emptied a deck and finished the game.
    pub winner: Option<PlayerId>,
}

/// Notifications produced by the engine. The gateway scopes each one to a
/// single recipient; nothing is ever broadcast beyond a room's members.
#[derive(Clone, Debug, PartialEq)]
pub enum Event {
    Joined { room: String, id: PlayerId },
    Waiting { members: usize },
    RoomFull,
    GameStart { decks: DeckMap, turn: PlayerId },
    RoundResult(Resolution),
    NotYourTurn,
    GameOver { winner: PlayerId },
    PlayerLeft { left: PlayerId },
}
