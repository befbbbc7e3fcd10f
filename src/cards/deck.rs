use super::card::Card;
use std::collections::VecDeque;

/// A player's ordered remaining cards. The front card is the next one
/// played; cards won in a round are tucked at the back.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct Deck(VecDeque<Card>);

impl From<Vec<Card>> for Deck {
    fn from(cards: Vec<Card>) -> Self {
        Self(cards.into())
    }
}

impl Iterator for Deck {
    type Item = Card;
    fn next(&mut self) -> Option<Self::Item> {
        self.draw()
    }
}

impl Deck {
    /// Remove and return the front card.
    pub fn draw(&mut self) -> Option<Card> {
        self.0.pop_front()
    }
    /// Append a card at the back.
    pub fn tuck(&mut self, card: Card) {
        self.0.push_back(card);
    }
    pub fn len(&self) -> usize {
        self.0.len()
    }
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
    /// Value copy of the current ordering, for notifications.
    /// Later mutation never changes what was already communicated.
    pub fn snapshot(&self) -> Vec<Card> {
        self.0.iter().cloned().collect()
    }
}
