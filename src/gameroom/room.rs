use super::*;
use crate::cards::Catalog;
use crate::cards::Deck;
use rand::Rng;
use std::collections::BTreeMap;

/// Where a room sits in its lifecycle.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum Status {
    #[default]
    Waiting,
    Playing,
    Finished,
}

/// One seated player: connection identity plus their remaining cards.
#[derive(Clone, Debug)]
struct Slot {
    id: PlayerId,
    deck: Deck,
}

/// What a join attempt came to.
#[derive(Clone, Debug)]
pub enum JoinOutcome {
    /// Caller was already seated; membership re-confirmed, nothing moved.
    Rejoined,
    /// Two strangers already hold the seats; caller stays unjoined.
    Full,
    /// Seated alone; the room keeps waiting for an opponent.
    Waiting { members: usize },
    /// Second seat filled: decks dealt, first turn drawn, game on.
    Started { decks: DeckMap, turn: PlayerId },
}

/// What an attribute call came to.
#[derive(Clone, Debug)]
pub enum ChooseOutcome {
    /// Not playing, or not the caller's turn. No state was touched.
    Rejected,
    /// A full round resolved; terminal when `winner` is set.
    Resolved(Resolution),
    /// A deck was already dry before the round. Ends the game on the
    /// spot for whichever side still holds cards.
    Forfeit { winner: PlayerId },
}

/// What a departure came to.
#[derive(Clone, Debug)]
pub enum DepartOutcome {
    NotMember,
    /// `forfeit` names the surviving winner when a live game was abandoned.
    Left {
        remaining: usize,
        forfeit: Option<PlayerId>,
    },
}

/// One game instance: at most two seats in join order, the decks they
/// hold, and the turn pointer. All mutation funnels through join, choose
/// and depart; everything handed back out is a value snapshot, never a
/// live reference into the decks.
///
/// Invariants held across every operation:
/// - at most two seats, ordered by joining
/// - while Playing, `turn` names a seated player
/// - cards are moved, never created or destroyed, so the decks of a
///   Playing room always sum to the dealt total
#[derive(Clone, Debug, Default)]
pub struct Room {
    slots: Vec<Slot>,
    turn: Option<PlayerId>,
    status: Status,
}

impl Room {
    pub fn status(&self) -> Status {
        self.status
    }
    pub fn turn(&self) -> Option<PlayerId> {
        self.turn
    }
    pub fn members(&self) -> Vec<PlayerId> {
        self.slots.iter().map(|slot| slot.id).collect()
    }
    pub fn contains(&self, id: PlayerId) -> bool {
        self.slots.iter().any(|slot| slot.id == id)
    }
    /// Value copy of every deck, keyed by owner.
    pub fn snapshot(&self) -> DeckMap {
        self.slots
            .iter()
            .map(|slot| (slot.id, slot.deck.snapshot()))
            .collect()
    }
    fn remaining(&self) -> BTreeMap<PlayerId, usize> {
        self.slots
            .iter()
            .map(|slot| (slot.id, slot.deck.len()))
            .collect()
    }
}

impl Room {
    /// Seat a player. Idempotent for current members; full rooms reject
    /// strangers untouched. The second seat deals the catalog and draws
    /// the opening turn uniformly between the two seats.
    pub fn join(
        &mut self,
        id: PlayerId,
        catalog: &Catalog,
        rng: &mut impl Rng,
    ) -> JoinOutcome {
        if self.contains(id) {
            return JoinOutcome::Rejoined;
        }
        if self.slots.len() >= 2 {
            return JoinOutcome::Full;
        }
        self.slots.push(Slot {
            id,
            deck: Deck::default(),
        });
        if self.slots.len() < 2 {
            return JoinOutcome::Waiting {
                members: self.slots.len(),
            };
        }
        let (first, second) = catalog.partition(rng);
        self.slots[0].deck = first;
        self.slots[1].deck = second;
        let turn = self.slots[rng.random_range(0..self.slots.len())].id;
        self.turn = Some(turn);
        self.status = Status::Playing;
        JoinOutcome::Started {
            decks: self.snapshot(),
            turn,
        }
    }

    /// Resolve one round on the named attribute. Only the turn holder of
    /// a Playing room gets through; everyone else bounces off with no
    /// effect, which is also how simultaneous calls settle.
    pub fn choose(&mut self, caller: PlayerId, attribute: &str) -> ChooseOutcome {
        if self.status != Status::Playing || self.turn != Some(caller) {
            return ChooseOutcome::Rejected;
        }
        let Some(i) = self.slots.iter().position(|slot| slot.id == caller) else {
            return ChooseOutcome::Rejected;
        };
        let j = 1 - i;
        let opponent = self.slots[j].id;
        // Unreachable while the Finished transition holds, but a dry deck
        // must end the game rather than wedge the room.
        if self.slots[i].deck.is_empty() || self.slots[j].deck.is_empty() {
            let winner = match self.slots[i].deck.is_empty() {
                true => opponent,
                false => caller,
            };
            self.status = Status::Finished;
            self.turn = None;
            return ChooseOutcome::Forfeit { winner };
        }
        let Some(mine) = self.slots[i].deck.draw() else {
            return ChooseOutcome::Rejected;
        };
        let Some(theirs) = self.slots[j].deck.draw() else {
            return ChooseOutcome::Rejected;
        };
        let outcome = duel(&mine, &theirs, attribute);
        match outcome {
            RoundOutcome::Caller => {
                self.slots[i].deck.tuck(mine.clone());
                self.slots[i].deck.tuck(theirs.clone());
            }
            RoundOutcome::Opponent => {
                self.slots[j].deck.tuck(theirs.clone());
                self.slots[j].deck.tuck(mine.clone());
                self.turn = Some(opponent);
            }
            RoundOutcome::Draw => {
                self.slots[i].deck.tuck(mine.clone());
                self.slots[j].deck.tuck(theirs.clone());
            }
        }
        let winner = match (self.slots[i].deck.is_empty(), self.slots[j].deck.is_empty()) {
            (true, _) => Some(opponent),
            (_, true) => Some(caller),
            _ => None,
        };
        if winner.is_some() {
            self.status = Status::Finished;
        }
        ChooseOutcome::Resolved(Resolution {
            caller,
            opponent,
            caller_card: mine,
            opponent_card: theirs,
            outcome,
            turn: self.turn.unwrap_or(caller),
            decks: self.snapshot(),
            remaining: self.remaining(),
            winner,
        })
    }

    /// Unseat a player. Abandoning a live game forfeits it to the
    /// survivor; the registry drops the room on forfeit or when the last
    /// seat empties.
    pub fn depart(&mut self, id: PlayerId) -> DepartOutcome {
        let Some(i) = self.slots.iter().position(|slot| slot.id == id) else {
            return DepartOutcome::NotMember;
        };
        self.slots.remove(i);
        let forfeit = match (self.status, self.slots.first()) {
            (Status::Playing, Some(survivor)) => Some(survivor.id),
            _ => None,
        };
        if forfeit.is_some() {
            self.status = Status::Finished;
        }
        if self.status != Status::Playing {
            self.turn = None;
        }
        DepartOutcome::Left {
            remaining: self.slots.len(),
            forfeit,
        }
    }
}
