use super::RoundOutcome;
use crate::cards::Card;
use std::cmp::Ordering;

/// Compares two front cards on the chosen attribute.
///
/// Total over all string inputs: an attribute absent from either card, or
/// a pair of values that do not order, is neither greater nor less and
/// falls to a draw. A bad key can therefore never wedge a room; it is
/// logged as client-data trouble and play continues.
pub fn duel(caller: &Card, opponent: &Card, attribute: &str) -> RoundOutcome {
    match (caller.stat(attribute), opponent.stat(attribute)) {
        (Some(mine), Some(theirs)) => match mine.partial_cmp(&theirs) {
            Some(Ordering::Greater) => RoundOutcome::Caller,
            Some(Ordering::Less) => RoundOutcome::Opponent,
            Some(Ordering::Equal) => RoundOutcome::Draw,
            None => {
                log::warn!("unordered {} values: {} vs {}", attribute, mine, theirs);
                RoundOutcome::Draw
            }
        },
        _ => {
            log::warn!("attribute {} missing on {} or {}", attribute, caller, opponent);
            RoundOutcome::Draw
        }
    }
}
