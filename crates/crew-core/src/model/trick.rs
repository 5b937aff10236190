use crate::model::card::Card;
use crate::model::player::Seat;
use crate::model::suit::Suit;
use std::fmt;
use thiserror::Error;

/// One round of play: every seat contributes exactly one card.
#[derive(Debug, Clone)]
pub struct Trick {
    seats: usize,
    plays: Vec<Play>,
    winning: Option<usize>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Play {
    pub seat: Seat,
    pub card: Card,
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum TrickError {
    #[error("trick already complete")]
    TrickComplete,
    #[error("{0} has already played this trick")]
    AlreadyPlayed(Seat),
}

impl Trick {
    pub fn new(seats: usize) -> Self {
        Self {
            seats,
            plays: Vec::with_capacity(seats),
            winning: None,
        }
    }

    pub fn plays(&self) -> &[Play] {
        &self.plays
    }

    pub fn len(&self) -> usize {
        self.plays.len()
    }

    pub fn is_empty(&self) -> bool {
        self.plays.is_empty()
    }

    pub fn is_complete(&self) -> bool {
        self.plays.len() >= self.seats
    }

    pub fn lead_suit(&self) -> Option<Suit> {
        self.plays.first().map(|play| play.card.suit)
    }

    pub fn has_played(&self, seat: Seat) -> bool {
        self.plays.iter().any(|play| play.seat == seat)
    }

    pub fn contains(&self, card: Card) -> bool {
        self.plays.iter().any(|play| play.card == card)
    }

    pub fn play(&mut self, seat: Seat, card: Card) -> Result<(), TrickError> {
        if self.is_complete() {
            return Err(TrickError::TrickComplete);
        }

        if self.has_played(seat) {
            return Err(TrickError::AlreadyPlayed(seat));
        }

        let overtakes = match self.winning_card() {
            None => true,
            Some(winning) => card.beats(winning),
        };
        self.plays.push(Play { seat, card });
        if overtakes {
            self.winning = Some(self.plays.len() - 1);
        }
        tracing::debug!(%seat, %card, overtakes, "card played");
        Ok(())
    }

    fn winning_play(&self) -> Option<&Play> {
        self.winning.map(|index| &self.plays[index])
    }

    pub fn winning_seat(&self) -> Option<Seat> {
        self.winning_play().map(|play| play.seat)
    }

    pub fn winning_card(&self) -> Option<Card> {
        self.winning_play().map(|play| play.card)
    }
}

impl fmt::Display for Trick {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let cards: Vec<Card> = self.plays.iter().map(|play| play.card).collect();
        crate::model::deck::write_card_list(f, &cards)
    }
}

#[cfg(test)]
mod tests {
    use super::{Trick, TrickError};
    use crate::model::card::Card;
    use crate::model::player::Seat;
    use crate::model::suit::Suit;
    use crate::model::value::Value;

    fn card(value: u8, suit: Suit) -> Card {
        Card::new(Value::from_value(value).unwrap(), suit)
    }

    fn play_all(plays: &[Card]) -> Trick {
        let mut trick = Trick::new(plays.len());
        for (index, &card) in plays.iter().enumerate() {
            trick.play(Seat::new(index), card).unwrap();
        }
        trick
    }

    #[test]
    fn empty_trick_has_no_winner() {
        let trick = Trick::new(4);
        assert_eq!(trick.winning_seat(), None);
        assert_eq!(trick.winning_card(), None);
        assert_eq!(trick.lead_suit(), None);
    }

    #[test]
    fn first_play_sets_lead_and_winner() {
        let mut trick = Trick::new(4);
        trick.play(Seat::new(2), card(5, Suit::Pink)).unwrap();
        assert_eq!(trick.lead_suit(), Some(Suit::Pink));
        assert_eq!(trick.winning_seat(), Some(Seat::new(2)));
    }

    #[test]
    fn highest_of_led_suit_wins() {
        let trick = play_all(&[
            card(3, Suit::Blue),
            card(7, Suit::Green),
            card(8, Suit::Blue),
        ]);
        assert_eq!(trick.winning_card(), Some(card(8, Suit::Blue)));
        assert_eq!(trick.winning_seat(), Some(Seat::new(2)));
    }

    #[test]
    fn any_rocket_beats_the_led_suit() {
        let trick = play_all(&[
            card(3, Suit::Blue),
            card(7, Suit::Green),
            card(8, Suit::Blue),
            card(1, Suit::Rocket),
        ]);
        assert_eq!(trick.winning_card(), Some(card(1, Suit::Rocket)));
        assert_eq!(trick.winning_seat(), Some(Seat::new(3)));
    }

    #[test]
    fn only_a_higher_rocket_overtakes_a_rocket() {
        let trick = play_all(&[
            card(9, Suit::Yellow),
            card(2, Suit::Rocket),
            card(1, Suit::Rocket),
            card(9, Suit::Blue),
            card(4, Suit::Rocket),
        ]);
        assert_eq!(trick.winning_seat(), Some(Seat::new(4)));
    }

    #[test]
    fn off_suit_never_overtakes_even_when_its_suit_sorts_higher() {
        let trick = play_all(&[card(1, Suit::Yellow), card(9, Suit::Blue)]);
        assert_eq!(trick.winning_seat(), Some(Seat::new(0)));
    }

    #[test]
    fn winner_is_order_independent_when_following_suit() {
        let cards = [
            card(4, Suit::Green),
            card(9, Suit::Green),
            card(1, Suit::Green),
            card(6, Suit::Green),
        ];
        let orders: [[usize; 4]; 4] = [[0, 1, 2, 3], [3, 2, 1, 0], [1, 3, 0, 2], [2, 0, 3, 1]];
        for order in orders {
            let permuted: Vec<Card> = order.iter().map(|&i| cards[i]).collect();
            let trick = play_all(&permuted);
            assert_eq!(trick.winning_card(), Some(card(9, Suit::Green)));
        }
    }

    #[test]
    fn duplicate_play_is_rejected() {
        let mut trick = Trick::new(4);
        trick.play(Seat::new(0), card(2, Suit::Blue)).unwrap();
        assert_eq!(
            trick.play(Seat::new(0), card(3, Suit::Blue)),
            Err(TrickError::AlreadyPlayed(Seat::new(0)))
        );
        assert_eq!(trick.len(), 1);
    }

    #[test]
    fn full_trick_rejects_more_plays() {
        let mut trick = play_all(&[card(2, Suit::Blue), card(3, Suit::Blue)]);
        assert!(trick.is_complete());
        assert_eq!(
            trick.play(Seat::new(5), card(4, Suit::Blue)),
            Err(TrickError::TrickComplete)
        );
    }

    #[test]
    fn display_lists_cards_in_play_order() {
        let trick = play_all(&[card(2, Suit::Blue), card(1, Suit::Rocket)]);
        assert_eq!(trick.to_string(), "[2 Blue, 1 Rocket]");
        assert!(trick.contains(card(1, Suit::Rocket)));
    }
}
