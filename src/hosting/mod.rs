//! WebSocket shell around the game engine.
//!
//! Thin by design: sessions translate socket frames to and from the
//! switchboard's channels, and the switchboard is the one place room
//! state ever changes. Swapping the transport means rewriting this
//! module and nothing under [`crate::gameroom`].
//!
//! - [`Server`] — actix-web wiring: CORS, request logging, the /play route
//! - [`Switchboard`] — serialized dispatch task owning the [`crate::gameroom::Gateway`]
//! - [`play`] — per-socket session bridge
mod server;
mod session;
mod switchboard;

pub use server::*;
pub use session::*;
pub use switchboard::*;
