use super::*;

/// Failure to turn a wire frame into an engine action.
#[derive(Debug, Clone)]
pub struct ProtocolError(String);

impl std::fmt::Display for ProtocolError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "malformed client message: {}", self.0)
    }
}

impl std::error::Error for ProtocolError {}

/// The wire boundary between JSON frames and the engine.
/// Payload shape errors stop here; the rooms below only ever see
/// well-typed actions.
pub struct Protocol;

impl Protocol {
    /// Parses one client frame into an engine action.
    pub fn decode(frame: &str) -> Result<Action, ProtocolError> {
        serde_json::from_str::<ClientMessage>(frame)
            .map(Action::from)
            .map_err(|e| ProtocolError(e.to_string()))
    }
    /// Converts an engine event to its wire form.
    pub fn encode(event: &Event) -> ServerMessage {
        match event {
            Event::Joined { room, id } => ServerMessage::Joined {
                room: room.clone(),
                id: *id,
            },
            Event::Waiting { members } => ServerMessage::Waiting { members: *members },
            Event::RoomFull => ServerMessage::RoomFull,
            Event::GameStart { decks, turn } => ServerMessage::GameStart {
                decks: decks.clone(),
                turn: *turn,
            },
            Event::RoundResult(resolution) => ServerMessage::RoundResult {
                caller: resolution.caller,
                opponent: resolution.opponent,
                caller_card: resolution.caller_card.clone(),
                opponent_card: resolution.opponent_card.clone(),
                outcome: resolution.outcome,
                turn: resolution.turn,
                decks: resolution.decks.clone(),
                remaining: resolution.remaining.clone(),
            },
            Event::NotYourTurn => ServerMessage::NotYourTurn,
            Event::GameOver { winner } => ServerMessage::GameOver { winner: *winner },
            Event::PlayerLeft { left } => ServerMessage::PlayerLeft { left: *left },
        }
    }
}

impl From<ClientMessage> for Action {
    fn from(message: ClientMessage) -> Self {
        match message {
            ClientMessage::Join { room } => Action::Join { room },
            ClientMessage::ChooseAttribute { room, attribute } => {
                Action::Choose { room, attribute }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn decode_join() {
        let action = Protocol::decode(r#"{"type":"join","room":"r1"}"#).unwrap();
        assert!(action == Action::Join { room: "r1".to_string() });
    }

    #[test]
    fn decode_join_without_room() {
        let action = Protocol::decode(r#"{"type":"join"}"#).unwrap();
        assert!(action == Action::Join { room: String::new() });
    }

    #[test]
    fn decode_choose_attribute() {
        let action =
            Protocol::decode(r#"{"type":"choose_attribute","room":"r1","attribute":"hp"}"#)
                .unwrap();
        assert!(
            action
                == Action::Choose {
                    room: "r1".to_string(),
                    attribute: "hp".to_string(),
                }
        );
    }

    #[test]
    fn decode_rejects_garbage() {
        assert!(Protocol::decode("not json").is_err());
        assert!(Protocol::decode(r#"{"type":"reboot"}"#).is_err());
        assert!(Protocol::decode(r#"{"type":"choose_attribute","room":"r1"}"#).is_err());
    }

    #[test]
    fn encode_tags_messages() {
        let json = Protocol::encode(&Event::RoomFull).to_json();
        assert!(json == r#"{"type":"room_full"}"#);
        let json = Protocol::encode(&Event::GameOver {
            winner: PlayerId(7),
        })
        .to_json();
        assert!(json == r#"{"type":"game_over","winner":7}"#);
    }

    #[test]
    fn encode_waiting_members() {
        let json = Protocol::encode(&Event::Waiting { members: 1 }).to_json();
        assert!(json == r#"{"type":"waiting","members":1}"#);
    }
}
