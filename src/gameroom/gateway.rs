use super::*;
use crate::cards::Catalog;
use rand::SeedableRng;
use rand::rngs::SmallRng;
use std::sync::Arc;

/// Transport-independent dispatch for the whole server: every inbound
/// action across every room funnels through one Gateway, one action at a
/// time, and comes back out as (recipient, event) pairs. No action ever
/// suspends mid-mutation, so room state needs no locking; simultaneous
/// plays settle on the turn check alone. Randomness is injected, so a
/// seeded Gateway drives a fully deterministic game in tests.
pub struct Gateway {
    registry: Registry,
    catalog: Arc<Catalog>,
    rng: SmallRng,
}

impl Gateway {
    pub fn new(catalog: Arc<Catalog>) -> Self {
        Self::with_rng(catalog, SmallRng::from_os_rng())
    }
    pub fn seeded(catalog: Arc<Catalog>, seed: u64) -> Self {
        Self::with_rng(catalog, SmallRng::seed_from_u64(seed))
    }
    fn with_rng(catalog: Arc<Catalog>, rng: SmallRng) -> Self {
        Self {
            registry: Registry::default(),
            catalog,
            rng,
        }
    }
    pub fn registry(&self) -> &Registry {
        &self.registry
    }

    /// Serve one action to completion and hand back every notification it
    /// produced, each scoped to a single recipient.
    pub fn handle(&mut self, conn: PlayerId, action: Action) -> Vec<(PlayerId, Event)> {
        match action {
            Action::Join { room } => self.join(conn, &room),
            Action::Choose { room, attribute } => self.choose(conn, &room, &attribute),
            Action::Disconnect => self.disconnect(conn),
        }
    }
}

impl Gateway {
    fn join(&mut self, conn: PlayerId, room: &str) -> Vec<(PlayerId, Event)> {
        let key = Self::normalize(room);
        // one live membership per connection: joining somewhere new walks
        // out of the old room first, through the same path as a disconnect
        let mut events = self
            .registry
            .containing(conn)
            .into_iter()
            .filter(|elsewhere| *elsewhere != key)
            .flat_map(|elsewhere| self.depart(conn, &elsewhere))
            .collect::<Vec<_>>();
        let outcome = self
            .registry
            .room(&key)
            .join(conn, self.catalog.as_ref(), &mut self.rng);
        match outcome {
            JoinOutcome::Rejoined => {
                events.push((conn, Event::Joined { room: key, id: conn }));
            }
            JoinOutcome::Full => {
                log::warn!("{} bounced off full room {}", conn, key);
                events.push((conn, Event::RoomFull));
            }
            JoinOutcome::Waiting { members } => {
                log::info!("{} joined {}, waiting", conn, key);
                events.push((conn, Event::Joined { room: key, id: conn }));
                events.push((conn, Event::Waiting { members }));
            }
            JoinOutcome::Started { decks, turn } => {
                log::info!("game on in {}, {} to act", key, turn);
                events.push((conn, Event::Joined { room: key, id: conn }));
                for member in decks.keys().copied() {
                    events.push((
                        member,
                        Event::GameStart {
                            decks: decks.clone(),
                            turn,
                        },
                    ));
                }
            }
        }
        events
    }

    fn choose(&mut self, conn: PlayerId, room: &str, attribute: &str) -> Vec<(PlayerId, Event)> {
        let key = Self::normalize(room);
        let Some(room) = self.registry.find_mut(&key) else {
            log::warn!("{} called {} in unknown room {}", conn, attribute, key);
            return vec![(conn, Event::NotYourTurn)];
        };
        match room.choose(conn, attribute) {
            ChooseOutcome::Rejected => vec![(conn, Event::NotYourTurn)],
            ChooseOutcome::Resolved(resolution) => {
                let members = resolution.decks.keys().copied().collect::<Vec<_>>();
                let mut events = members
                    .iter()
                    .map(|member| (*member, Event::RoundResult(resolution.clone())))
                    .collect::<Vec<_>>();
                if let Some(winner) = resolution.winner {
                    log::info!("game over in {}, {} wins", key, winner);
                    events.extend(members.iter().map(|member| (*member, Event::GameOver { winner })));
                    self.registry.remove(&key);
                }
                events
            }
            ChooseOutcome::Forfeit { winner } => {
                let members = room.members();
                log::warn!("dry deck in {}, awarding {}", key, winner);
                let events = members
                    .into_iter()
                    .map(|member| (member, Event::GameOver { winner }))
                    .collect();
                self.registry.remove(&key);
                events
            }
        }
    }

    fn disconnect(&mut self, conn: PlayerId) -> Vec<(PlayerId, Event)> {
        self.registry
            .containing(conn)
            .into_iter()
            .flat_map(|key| self.depart(conn, &key))
            .collect()
    }

    /// Shared teardown for disconnects and implicit leaves. Survivors
    /// hear about the departure; a live game forfeits to the one left
    /// standing, and emptied or forfeited rooms drop out of the registry.
    fn depart(&mut self, conn: PlayerId, key: &str) -> Vec<(PlayerId, Event)> {
        let Some(room) = self.registry.find_mut(key) else {
            return Vec::new();
        };
        match room.depart(conn) {
            DepartOutcome::NotMember => Vec::new(),
            DepartOutcome::Left { remaining, forfeit } => {
                let survivors = room.members();
                let mut events = survivors
                    .iter()
                    .map(|member| (*member, Event::PlayerLeft { left: conn }))
                    .collect::<Vec<_>>();
                if let Some(winner) = forfeit {
                    log::info!("{} abandoned {}, {} wins by forfeit", conn, key, winner);
                    events.extend(survivors.iter().map(|member| (*member, Event::GameOver { winner })));
                    self.registry.remove(key);
                } else if remaining == 0 {
                    self.registry.remove(key);
                }
                events
            }
        }
    }

    fn normalize(room: &str) -> String {
        match room.trim() {
            "" => DEFAULT_ROOM.to_string(),
            key => key.to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cards::Card;
    use std::collections::BTreeMap;

    const A: PlayerId = PlayerId(1);
    const B: PlayerId = PlayerId(2);

    fn catalog() -> Arc<Catalog> {
        // hp grows with id, so deck snapshots decide every round
        Arc::new(Catalog::from(
            (1..=6)
                .map(|i| {
                    Card::new(
                        i,
                        "card",
                        BTreeMap::from([("hp".to_string(), f64::from(i * 10))]),
                    )
                })
                .collect::<Vec<_>>(),
        ))
    }

    fn gateway() -> Gateway {
        Gateway::seeded(catalog(), 42)
    }

    fn join(room: &str) -> Action {
        Action::Join {
            room: room.to_string(),
        }
    }

    fn choose(room: &str, attribute: &str) -> Action {
        Action::Choose {
            room: room.to_string(),
            attribute: attribute.to_string(),
        }
    }

    /// Drives both joins and returns the started gateway plus the opening
    /// turn holder and deck snapshots.
    fn started() -> (Gateway, PlayerId, DeckMap) {
        let mut gw = gateway();
        gw.handle(A, join("r1"));
        let events = gw.handle(B, join("r1"));
        let (decks, turn) = events
            .iter()
            .find_map(|(_, e)| match e {
                Event::GameStart { decks, turn } => Some((decks.clone(), *turn)),
                _ => None,
            })
            .expect("game start");
        (gw, turn, decks)
    }

    #[test]
    fn first_join_waits() {
        let mut gw = gateway();
        let events = gw.handle(A, join("r1"));
        assert!(matches!(events[0], (id, Event::Joined { .. }) if id == A));
        assert!(matches!(events[1], (id, Event::Waiting { members: 1 }) if id == A));
        assert!(gw.registry().find("r1").map(|r| r.status()) == Some(Status::Waiting));
    }

    #[test]
    fn second_join_starts_for_both() {
        let (gw, turn, decks) = started();
        assert!(turn == A || turn == B);
        assert!(decks[&A].len() + decks[&B].len() == 6);
        assert!(gw.registry().find("r1").map(|r| r.status()) == Some(Status::Playing));
    }

    #[test]
    fn empty_key_falls_back_to_default() {
        let mut gw = gateway();
        let events = gw.handle(A, join(""));
        assert!(matches!(
            &events[0],
            (_, Event::Joined { room, .. }) if room == DEFAULT_ROOM
        ));
        assert!(gw.registry().find(DEFAULT_ROOM).is_some());
    }

    #[test]
    fn third_join_bounces() {
        let (mut gw, _, _) = started();
        let events = gw.handle(PlayerId(3), join("r1"));
        assert!(matches!(events[..], [(id, Event::RoomFull)] if id == PlayerId(3)));
        assert!(gw.registry().find("r1").map(|r| r.members()) == Some(vec![A, B]));
    }

    #[test]
    fn duplicate_join_reconfirms() {
        let mut gw = gateway();
        gw.handle(A, join("r1"));
        let events = gw.handle(A, join("r1"));
        assert!(matches!(events[..], [(id, Event::Joined { .. })] if id == A));
    }

    #[test]
    fn off_turn_call_is_rejected_quietly() {
        let (mut gw, turn, decks) = started();
        let loser = if turn == A { B } else { A };
        let events = gw.handle(loser, choose("r1", "hp"));
        assert!(matches!(events[..], [(id, Event::NotYourTurn)] if id == loser));
        assert!(gw.registry().find("r1").map(|r| r.snapshot()) == Some(decks));
    }

    #[test]
    fn unknown_room_call_is_rejected_quietly() {
        let mut gw = gateway();
        let events = gw.handle(A, choose("nowhere", "hp"));
        assert!(matches!(events[..], [(id, Event::NotYourTurn)] if id == A));
    }

    #[test]
    fn round_result_reaches_both() {
        let (mut gw, turn, decks) = started();
        let other = if turn == A { B } else { A };
        let events = gw.handle(turn, choose("r1", "hp"));
        let recipients = events
            .iter()
            .filter(|(_, e)| matches!(e, Event::RoundResult(_)))
            .map(|(id, _)| *id)
            .collect::<Vec<_>>();
        assert!(recipients.contains(&turn) && recipients.contains(&other));
        let Some((_, Event::RoundResult(resolution))) = events.first() else {
            panic!("expected round result");
        };
        // the comparison is decided by the dealt fronts
        let mine = resolution.caller_card.stat("hp").unwrap();
        let theirs = resolution.opponent_card.stat("hp").unwrap();
        assert!(resolution.caller_card == decks[&turn][0]);
        match resolution.outcome {
            RoundOutcome::Caller => assert!(mine > theirs && resolution.turn == turn),
            RoundOutcome::Opponent => assert!(theirs > mine && resolution.turn == other),
            RoundOutcome::Draw => assert!(mine == theirs && resolution.turn == turn),
        }
    }

    #[test]
    fn finished_game_clears_the_room() {
        // two-card catalog: the opening round must empty a deck
        let tiny = Arc::new(Catalog::from(vec![
            Card::new(1, "card", BTreeMap::from([("hp".to_string(), 10.0)])),
            Card::new(2, "card", BTreeMap::from([("hp".to_string(), 20.0)])),
        ]));
        let mut gw = Gateway::seeded(tiny, 5);
        gw.handle(A, join("r1"));
        let turn = gw
            .handle(B, join("r1"))
            .iter()
            .find_map(|(_, e)| match e {
                Event::GameStart { turn, .. } => Some(*turn),
                _ => None,
            })
            .expect("game start");
        let events = gw.handle(turn, choose("r1", "hp"));
        let winner = events
            .iter()
            .find_map(|(_, e)| match e {
                Event::GameOver { winner } => Some(*winner),
                _ => None,
            })
            .expect("terminated");
        assert!(winner == A || winner == B);
        assert!(events.iter().any(|(_, e)| matches!(e, Event::RoundResult(_))));
        assert!(gw.registry().is_empty());
        // the key is free again: a fresh join reopens a waiting room
        let events = gw.handle(PlayerId(9), join("r1"));
        assert!(matches!(events[1], (_, Event::Waiting { members: 1 })));
    }

    #[test]
    fn disconnect_mid_game_forfeits() {
        let (mut gw, turn, _) = started();
        let survivor = if turn == A { B } else { A };
        let events = gw.handle(turn, Action::Disconnect);
        assert!(events.contains(&(survivor, Event::PlayerLeft { left: turn })));
        assert!(events.contains(&(survivor, Event::GameOver { winner: survivor })));
        assert!(gw.registry().is_empty());
    }

    #[test]
    fn disconnect_while_waiting_drops_room() {
        let mut gw = gateway();
        gw.handle(A, join("r1"));
        let events = gw.handle(A, Action::Disconnect);
        assert!(events.is_empty());
        assert!(gw.registry().is_empty());
    }

    #[test]
    fn disconnect_of_stranger_is_silent() {
        let mut gw = gateway();
        assert!(gw.handle(PlayerId(9), Action::Disconnect).is_empty());
    }

    #[test]
    fn joining_elsewhere_leaves_first() {
        let (mut gw, turn, _) = started();
        let mover = if turn == A { B } else { A };
        let survivor = if mover == A { B } else { A };
        let events = gw.handle(mover, join("r2"));
        assert!(events.contains(&(survivor, Event::PlayerLeft { left: mover })));
        assert!(events.contains(&(survivor, Event::GameOver { winner: survivor })));
        assert!(gw.registry().find("r1").is_none());
        assert!(gw.registry().find("r2").map(|r| r.members()) == Some(vec![mover]));
    }
}
