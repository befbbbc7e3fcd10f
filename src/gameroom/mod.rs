//! Server-authoritative duel rooms.
//!
//! The core of the game server: rooms seat exactly two players, deal them
//! disjoint halves of the card catalog, and resolve one attribute
//! comparison per turn until a deck runs dry. Everything here is
//! synchronous and transport-free; the hosting layer feeds it actions one
//! at a time and ships the notifications it hands back.
//!
//! ## Architecture
//!
//! - [`Gateway`] — single dispatch point: action in, scoped notifications out
//! - [`Registry`] — room-key to [`Room`] map with lazy creation
//! - [`Room`] — seats, decks, turn pointer, and the round state machine
//! - [`duel`] — the pure card-versus-card comparison
//!
//! ## Wire layer
//!
//! - [`ClientMessage`] / [`ServerMessage`] — tagged JSON frames
//! - [`Protocol`] — decoding inbound frames, encoding outbound events
mod action;
mod event;
mod gateway;
mod message;
mod player;
mod protocol;
mod registry;
mod resolver;
mod room;

pub use action::*;
pub use event::*;
pub use gateway::*;
pub use message::*;
pub use player::*;
pub use protocol::*;
pub use registry::*;
pub use resolver::*;
pub use room::*;
