use super::card::Card;
use super::deck::Deck;
use rand::Rng;
use rand::seq::SliceRandom;

/// Embedded default card set. Deployments may point CARDS_PATH at their own.
const DEFAULT_CARDS: &str = include_str!("../../data/cards.json");

/// The immutable card set supplied from outside the engine.
/// The engine never authors or edits cards; it only deals them out once
/// per game and moves them between the two decks afterwards.
#[derive(Clone, Debug)]
pub struct Catalog(Vec<Card>);

impl From<Vec<Card>> for Catalog {
    fn from(cards: Vec<Card>) -> Self {
        Self(cards)
    }
}

impl Catalog {
    /// Load from the CARDS_PATH file, or the embedded set when unset.
    pub fn load() -> anyhow::Result<Self> {
        let text = match std::env::var("CARDS_PATH") {
            Ok(path) => std::fs::read_to_string(&path)
                .map_err(|e| anyhow::anyhow!("reading {}: {}", path, e))?,
            Err(_) => DEFAULT_CARDS.to_string(),
        };
        let cards = serde_json::from_str::<Vec<Card>>(&text)?;
        anyhow::ensure!(cards.len() >= 2, "catalog must hold at least two cards");
        Ok(Self(cards)).inspect(|c| log::info!("loaded catalog of {} cards", c.size()))
    }

    pub fn size(&self) -> usize {
        self.0.len()
    }

    /// Shuffle-and-split: two disjoint decks covering the catalog exactly
    /// once. Sizes differ by at most one; the extra card lands in the
    /// first deck. Assignment is wholly determined by the caller's rng.
    pub fn partition(&self, rng: &mut impl Rng) -> (Deck, Deck) {
        let mut cards = self.0.clone();
        cards.shuffle(rng);
        let second = cards.split_off(cards.len().div_ceil(2));
        (Deck::from(cards), Deck::from(second))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;
    use rand::rngs::SmallRng;
    use std::collections::BTreeMap;
    use std::collections::BTreeSet;

    fn catalog(n: u32) -> Catalog {
        Catalog::from(
            (1..=n)
                .map(|i| Card::new(i, "card", BTreeMap::new()))
                .collect::<Vec<_>>(),
        )
    }

    #[test]
    fn exact_cover() {
        let mut rng = SmallRng::seed_from_u64(1);
        let (a, b) = catalog(8).partition(&mut rng);
        let ids = a.chain(b).map(|c| c.id()).collect::<BTreeSet<_>>();
        assert!(ids == (1..=8).collect::<BTreeSet<_>>());
    }

    #[test]
    fn even_split() {
        let mut rng = SmallRng::seed_from_u64(2);
        let (a, b) = catalog(8).partition(&mut rng);
        assert!(a.len() == 4 && b.len() == 4);
    }

    #[test]
    fn odd_split_favors_first() {
        let mut rng = SmallRng::seed_from_u64(3);
        let (a, b) = catalog(5).partition(&mut rng);
        assert!(a.len() == 3 && b.len() == 2);
    }

    #[test]
    fn seeded_shuffle_repeats() {
        let lhs = catalog(8).partition(&mut SmallRng::seed_from_u64(4));
        let rhs = catalog(8).partition(&mut SmallRng::seed_from_u64(4));
        assert!(lhs == rhs);
    }

    #[test]
    fn embedded_catalog_parses() {
        let cards = serde_json::from_str::<Vec<Card>>(DEFAULT_CARDS).unwrap();
        assert!(cards.len() >= 2);
    }
}
