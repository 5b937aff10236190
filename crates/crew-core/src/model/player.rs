use crate::model::card::Card;
use crate::model::hand::Hand;
use crate::model::trick::{Trick, TrickError};
use core::fmt;
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Index of a player in the game's seating order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Seat(usize);

impl Seat {
    pub const fn new(index: usize) -> Self {
        Self(index)
    }

    pub const fn index(self) -> usize {
        self.0
    }

    /// Next seat clockwise around a table of `seats` players.
    pub const fn next(self, seats: usize) -> Seat {
        Seat((self.0 + 1) % seats)
    }

    /// `seats` seats in turn order, starting with `self`.
    pub fn rotation(self, seats: usize) -> impl Iterator<Item = Seat> {
        (0..seats).map(move |offset| Seat((self.0 + offset) % seats))
    }
}

impl fmt::Display for Seat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Player {}", self.0 + 1)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum PlayError {
    #[error("player is not seated in a game")]
    NotInGame,
    #[error("{0} is not in the player's hand")]
    CardNotInHand(Card),
    #[error(transparent)]
    Trick(#[from] TrickError),
}

#[derive(Debug, Clone, Default)]
pub struct Player {
    seat: Option<Seat>,
    starting_hand: Vec<Card>,
    hand: Hand,
    tasks: Vec<Card>,
}

impl Player {
    /// A player that has not joined a game yet.
    pub fn new() -> Self {
        Self::default()
    }

    pub(crate) fn seated(seat: Seat) -> Self {
        Self {
            seat: Some(seat),
            ..Self::default()
        }
    }

    pub fn seat(&self) -> Option<Seat> {
        self.seat
    }

    pub(crate) fn take_seat(&mut self, seat: Seat) {
        self.seat = Some(seat);
    }

    /// Takes a freshly dealt hand. The dealt cards are kept as the starting
    /// hand, which later decides the Commander.
    pub fn draw(&mut self, cards: Vec<Card>, sort: bool) {
        self.hand = Hand::with_cards(cards.clone(), sort);
        self.starting_hand = cards;
    }

    pub fn is_commander(&self) -> bool {
        self.starting_hand.contains(&Card::COMMANDER)
    }

    pub fn starting_hand(&self) -> &[Card] {
        &self.starting_hand
    }

    pub fn hand(&self) -> &Hand {
        &self.hand
    }

    pub fn num_cards(&self) -> usize {
        self.hand.len()
    }

    pub fn tasks(&self) -> &[Card] {
        &self.tasks
    }

    pub fn has_task(&self, card: Card) -> bool {
        self.tasks.contains(&card)
    }

    pub fn assign_task(&mut self, card: Card) {
        self.tasks.push(card);
    }

    pub(crate) fn clear_tasks(&mut self) {
        self.tasks.clear();
    }

    /// Plays `card` into `trick`. Nothing changes unless every check passes.
    pub fn play_card(&mut self, trick: &mut Trick, card: Card) -> Result<(), PlayError> {
        let seat = self.seat.ok_or(PlayError::NotInGame)?;
        if !self.hand.contains(card) {
            return Err(PlayError::CardNotInHand(card));
        }
        trick.play(seat, card)?;
        self.hand.remove(card);
        Ok(())
    }
}
