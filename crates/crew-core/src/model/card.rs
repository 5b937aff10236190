use crate::model::suit::Suit;
use crate::model::value::Value;
use core::cmp::Ordering;
use core::fmt;
use serde::{Deserialize, Serialize};

/// A single card. Any value/suit pair can be represented; the physical deck
/// only contains Rocket cards valued one through four (see [`Card::is_standard`]).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Card {
    pub value: Value,
    pub suit: Suit,
}

impl Card {
    /// The Rocket four marks the Commander.
    pub const COMMANDER: Card = Card::new(Value::Four, Suit::Rocket);

    pub const fn new(value: Value, suit: Suit) -> Self {
        Self { value, suit }
    }

    pub const fn is_rocket(self) -> bool {
        self.suit.is_rocket()
    }

    /// True if the card exists in the 40-card deck.
    pub const fn is_standard(self) -> bool {
        !self.suit.is_rocket() || self.value.value() <= 4
    }

    /// Whether `self` would take the lead from `winning` in a trick: it must be
    /// a Rocket or match the winning suit, and rank above it.
    pub fn beats(self, winning: Card) -> bool {
        (self.is_rocket() || self.suit == winning.suit) && compare(self, winning).is_gt()
    }
}

/// Total ranking of two cards.
///
/// Same suit compares by value. A Rocket outranks any other suit. Two
/// different colors fall back to [`Suit::precedence`].
pub fn compare(a: Card, b: Card) -> Ordering {
    if a.suit == b.suit {
        a.value.cmp(&b.value)
    } else if a.is_rocket() {
        Ordering::Greater
    } else if b.is_rocket() {
        Ordering::Less
    } else {
        a.suit.cmp(&b.suit)
    }
}

impl Ord for Card {
    fn cmp(&self, other: &Self) -> Ordering {
        compare(*self, *other)
    }
}

impl PartialOrd for Card {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl fmt::Display for Card {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {}", self.value, self.suit)
    }
}

#[cfg(test)]
mod tests {
    use super::{Card, compare};
    use crate::model::deck::Deck;
    use crate::model::suit::Suit;
    use crate::model::value::Value;
    use core::cmp::Ordering;

    #[test]
    fn same_suit_compares_by_value() {
        let low = Card::new(Value::Two, Suit::Pink);
        let high = Card::new(Value::Eight, Suit::Pink);
        assert_eq!(compare(high, low), Ordering::Greater);
        assert_eq!(compare(low, high), Ordering::Less);
    }

    #[test]
    fn rocket_outranks_any_color() {
        let rocket = Card::new(Value::One, Suit::Rocket);
        let nine = Card::new(Value::Nine, Suit::Blue);
        assert_eq!(compare(rocket, nine), Ordering::Greater);
        assert_eq!(compare(nine, rocket), Ordering::Less);
    }

    #[test]
    fn different_colors_fall_back_to_suit_precedence() {
        let blue = Card::new(Value::One, Suit::Blue);
        let yellow = Card::new(Value::Nine, Suit::Yellow);
        assert_eq!(compare(blue, yellow), Ordering::Greater);
    }

    #[test]
    fn off_suit_color_never_beats_winner() {
        let winning = Card::new(Value::Two, Suit::Yellow);
        assert!(!Card::new(Value::Nine, Suit::Blue).beats(winning));
        assert!(Card::new(Value::Three, Suit::Yellow).beats(winning));
        assert!(Card::new(Value::One, Suit::Rocket).beats(winning));
    }

    #[test]
    fn ordering_is_total_and_consistent_over_the_deck() {
        let deck = Deck::card_deck();
        let cards = deck.cards();
        for &a in cards {
            assert_eq!(compare(a, a), Ordering::Equal);
            for &b in cards {
                let forward = compare(a, b);
                assert_eq!(forward, compare(b, a).reverse(), "{a} vs {b}");
                assert_eq!(forward == Ordering::Equal, a == b);
                for &c in cards {
                    if forward.is_gt() && compare(b, c).is_gt() {
                        assert!(compare(a, c).is_gt(), "{a} > {b} > {c}");
                    }
                }
            }
        }
    }

    #[test]
    fn rocket_range_is_a_deck_property() {
        assert!(Card::COMMANDER.is_standard());
        assert!(!Card::new(Value::Seven, Suit::Rocket).is_standard());
        assert!(Card::new(Value::Seven, Suit::Green).is_standard());
    }

    #[test]
    fn display_is_value_then_suit() {
        assert_eq!(Card::COMMANDER.to_string(), "4 Rocket");
    }
}
