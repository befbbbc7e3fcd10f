use serde::Serialize;
use std::fmt::Display;
use std::fmt::Formatter;
use std::fmt::Result;

/// Opaque identity of a connected player, minted by the hosting layer.
/// The engine never looks inside it, so a future session layer can swap
/// in stable account identities without touching room logic.
#[derive(Clone, Copy, Debug, Hash, PartialEq, Eq, PartialOrd, Ord, Serialize)]
pub struct PlayerId(pub(crate) u64);

impl From<u64> for PlayerId {
    fn from(n: u64) -> Self {
        Self(n)
    }
}

impl Display for PlayerId {
    fn fmt(&self, f: &mut Formatter) -> Result {
        write!(f, "P{}", self.0)
    }
}
