/// Inbound player actions, already transport-decoded.
/// Disconnect is synthesized by the session when its socket tears down;
/// clients never send it explicitly.
#[derive(Clone, Debug, PartialEq)]
pub enum Action {
    Join { room: String },
    Choose { room: String, attribute: String },
    Disconnect,
}
