use crate::model::card::Card;
use crate::model::deck::write_card_list;
use crate::model::suit::Suit;
use core::fmt;

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Hand {
    cards: Vec<Card>,
}

impl Hand {
    pub fn new() -> Self {
        Self { cards: Vec::new() }
    }

    pub fn with_cards(cards: Vec<Card>, sort: bool) -> Self {
        let mut hand = Self { cards };
        if sort {
            hand.sort();
        }
        hand
    }

    pub fn remove(&mut self, card: Card) -> bool {
        if let Some(index) = self.cards.iter().position(|&c| c == card) {
            self.cards.remove(index);
            true
        } else {
            false
        }
    }

    pub fn contains(&self, card: Card) -> bool {
        self.cards.contains(&card)
    }

    pub fn has_suit(&self, suit: Suit) -> bool {
        self.cards.iter().any(|card| card.suit == suit)
    }

    /// Cards offered to a selector: those following `lead`, or the whole hand
    /// when nothing is led or the hand is void in the led suit.
    pub fn playable(&self, lead: Option<Suit>) -> Vec<Card> {
        match lead {
            Some(suit) if self.has_suit(suit) => self
                .cards
                .iter()
                .copied()
                .filter(|card| card.suit == suit)
                .collect(),
            _ => self.cards.clone(),
        }
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

    pub fn sort(&mut self) {
        self.cards.sort();
    }
}

impl fmt::Display for Hand {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write_card_list(f, &self.cards)
    }
}
