use crate::model::card::Card;
use crate::model::suit::Suit;
use crate::model::value::Value;
use core::fmt;
use rand::SeedableRng;
use rand::rngs::StdRng;
use rand::seq::SliceRandom;
use thiserror::Error;

pub const CARD_DECK_SIZE: usize = 40;
pub const TASK_DECK_SIZE: usize = 36;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum DeckError {
    #[error("cannot deal {requested} cards, only {remaining} remain")]
    InsufficientCards { requested: usize, remaining: usize },
}

/// An ordered pile of cards. Dealing pops from the tail.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Deck {
    cards: Vec<Card>,
}

impl Deck {
    pub fn new() -> Self {
        Self { cards: Vec::new() }
    }

    pub fn from_cards(cards: Vec<Card>) -> Self {
        Self { cards }
    }

    /// The 40 playing cards: nine of each color plus Rocket one to four. Unshuffled.
    pub fn card_deck() -> Self {
        let mut cards = Self::colored_cards(CARD_DECK_SIZE);
        cards.extend(
            Value::ROCKET
                .iter()
                .map(|&value| Card::new(value, Suit::Rocket)),
        );
        Self { cards }
    }

    /// The 36 task cards: nine of each color, no Rockets. Unshuffled.
    pub fn task_deck() -> Self {
        Self {
            cards: Self::colored_cards(TASK_DECK_SIZE),
        }
    }

    fn colored_cards(capacity: usize) -> Vec<Card> {
        let mut cards = Vec::with_capacity(capacity);
        for suit in Suit::COLORS.iter().copied() {
            for value in Value::ORDERED.iter().copied() {
                cards.push(Card::new(value, suit));
            }
        }
        cards
    }

    pub fn shuffle<R: rand::Rng + ?Sized>(&mut self, rng: &mut R) {
        self.cards.shuffle(rng);
    }

    /// Shuffles with a fresh `StdRng`; the same seed always yields the same order.
    /// Returns the seed that was used.
    pub fn shuffle_seeded(&mut self, seed: Option<u64>) -> u64 {
        let seed = seed.unwrap_or_else(rand::random);
        let mut rng = StdRng::seed_from_u64(seed);
        self.shuffle(&mut rng);
        seed
    }

    pub fn deal(&mut self, count: usize) -> Result<Vec<Card>, DeckError> {
        let remaining = self.cards.len();
        if count > remaining {
            return Err(DeckError::InsufficientCards {
                requested: count,
                remaining,
            });
        }
        let mut dealt = self.cards.split_off(remaining - count);
        dealt.reverse();
        Ok(dealt)
    }

    /// Stable sort by card ranking, lowest first.
    pub fn sort(&mut self) {
        self.cards.sort();
    }

    pub fn contains(&self, card: Card) -> bool {
        self.cards.contains(&card)
    }

    pub fn len(&self) -> usize {
        self.cards.len()
    }

    pub fn is_empty(&self) -> bool {
        self.cards.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &Card> {
        self.cards.iter()
    }

    pub fn cards(&self) -> &[Card] {
        &self.cards
    }
}

impl Extend<Card> for Deck {
    fn extend<T: IntoIterator<Item = Card>>(&mut self, iter: T) {
        self.cards.extend(iter);
    }
}

impl fmt::Display for Deck {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write_card_list(f, &self.cards)
    }
}

pub(crate) fn write_card_list(f: &mut fmt::Formatter<'_>, cards: &[Card]) -> fmt::Result {
    f.write_str("[")?;
    for (index, card) in cards.iter().enumerate() {
        if index > 0 {
            f.write_str(", ")?;
        }
        write!(f, "{card}")?;
    }
    f.write_str("]")
}

#[cfg(test)]
mod tests {
    use super::{CARD_DECK_SIZE, Deck, DeckError, TASK_DECK_SIZE};
    use crate::model::card::Card;
    use crate::model::suit::Suit;
    use crate::model::value::Value;
    use std::collections::HashSet;

    #[test]
    fn card_deck_has_forty_unique_cards() {
        let deck = Deck::card_deck();
        assert_eq!(deck.len(), CARD_DECK_SIZE);
        let unique: HashSet<_> = deck.iter().copied().collect();
        assert_eq!(unique.len(), CARD_DECK_SIZE);
        assert_eq!(deck.iter().filter(|card| card.is_rocket()).count(), 4);
        assert!(deck.iter().all(|card| card.is_standard()));
        assert_eq!(deck.iter().filter(|&&card| card == Card::COMMANDER).count(), 1);
    }

    #[test]
    fn task_deck_has_no_rockets() {
        let deck = Deck::task_deck();
        assert_eq!(deck.len(), TASK_DECK_SIZE);
        assert!(deck.iter().all(|card| !card.is_rocket()));
        for suit in Suit::COLORS {
            assert_eq!(deck.iter().filter(|card| card.suit == suit).count(), 9);
        }
    }

    #[test]
    fn shuffle_with_seed_is_deterministic() {
        let mut deck_a = Deck::card_deck();
        let mut deck_b = Deck::card_deck();
        deck_a.shuffle_seeded(Some(42));
        deck_b.shuffle_seeded(Some(42));
        assert_eq!(deck_a.deal(10).unwrap(), deck_b.deal(10).unwrap());
        assert_eq!(deck_a, deck_b);
    }

    #[test]
    fn shuffle_with_different_seeds_differs() {
        let mut deck_a = Deck::card_deck();
        let mut deck_b = Deck::card_deck();
        deck_a.shuffle_seeded(Some(1));
        deck_b.shuffle_seeded(Some(2));
        assert_ne!(deck_a.cards(), deck_b.cards());
    }

    #[test]
    fn deal_pops_from_the_tail() {
        let mut deck = Deck::from_cards(vec![
            Card::new(Value::One, Suit::Blue),
            Card::new(Value::Two, Suit::Blue),
            Card::new(Value::Three, Suit::Blue),
        ]);
        let dealt = deck.deal(2).unwrap();
        assert_eq!(
            dealt,
            vec![
                Card::new(Value::Three, Suit::Blue),
                Card::new(Value::Two, Suit::Blue)
            ]
        );
        assert_eq!(deck.cards(), &[Card::new(Value::One, Suit::Blue)]);
    }

    #[test]
    fn dealing_too_many_fails_without_consuming() {
        let mut deck = Deck::task_deck();
        deck.deal(30).unwrap();
        assert_eq!(
            deck.deal(7),
            Err(DeckError::InsufficientCards {
                requested: 7,
                remaining: 6
            })
        );
        assert_eq!(deck.len(), 6);
    }

    #[test]
    fn dealt_cards_restore_full_composition() {
        let mut deck = Deck::card_deck();
        deck.shuffle_seeded(Some(7));
        let dealt = deck.deal(17).unwrap();
        let mut rebuilt = deck.clone();
        rebuilt.extend(dealt);
        let rebuilt: HashSet<_> = rebuilt.iter().copied().collect();
        let original: HashSet<_> = Deck::card_deck().iter().copied().collect();
        assert_eq!(rebuilt, original);
    }

    #[test]
    fn dealt_task_cards_restore_full_composition() {
        let mut deck = Deck::task_deck();
        deck.shuffle_seeded(Some(11));
        let dealt = deck.deal(5).unwrap();
        let mut rebuilt = deck.clone();
        rebuilt.extend(dealt);
        assert_eq!(rebuilt.len(), TASK_DECK_SIZE);
        let rebuilt: HashSet<_> = rebuilt.iter().copied().collect();
        let original: HashSet<_> = Deck::task_deck().iter().copied().collect();
        assert_eq!(rebuilt, original);
    }

    #[test]
    fn sort_orders_by_card_ranking() {
        let mut deck = Deck::from_cards(vec![
            Card::new(Value::Two, Suit::Rocket),
            Card::new(Value::Nine, Suit::Yellow),
            Card::new(Value::One, Suit::Blue),
            Card::new(Value::Five, Suit::Yellow),
        ]);
        deck.sort();
        assert_eq!(deck.to_string(), "[5 Yellow, 9 Yellow, 1 Blue, 2 Rocket]");
    }
}
