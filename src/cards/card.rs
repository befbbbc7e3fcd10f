use serde::Deserialize;
use serde::Serialize;
use std::collections::BTreeMap;
use std::fmt::Display;
use std::fmt::Formatter;
use std::fmt::Result;

/// A single card from the external catalog: a unique identifier, a display
/// name, and a table of numeric attributes. Cards are immutable; the engine
/// only ever moves them between decks.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Card {
    id: u32,
    name: String,
    stats: BTreeMap<String, f64>,
}

impl Card {
    pub fn new(id: u32, name: &str, stats: BTreeMap<String, f64>) -> Self {
        Self {
            id,
            name: name.to_string(),
            stats,
        }
    }
    pub fn id(&self) -> u32 {
        self.id
    }
    pub fn name(&self) -> &str {
        &self.name
    }
    /// Value of the given attribute, if this card carries it.
    /// The engine does not validate attribute keys against any schema.
    pub fn stat(&self, attribute: &str) -> Option<f64> {
        self.stats.get(attribute).copied()
    }
}

impl Display for Card {
    fn fmt(&self, f: &mut Formatter) -> Result {
        write!(f, "{}#{}", self.name, self.id)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn card() -> Card {
        Card::new(7, "Cinderjaw", BTreeMap::from([("hp".to_string(), 66.0)]))
    }

    #[test]
    fn known_attribute() {
        assert!(card().stat("hp") == Some(66.0));
    }

    #[test]
    fn unknown_attribute() {
        assert!(card().stat("mana").is_none());
    }
}
