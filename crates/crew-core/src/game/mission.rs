use crate::game::selector::Selector;
use crate::model::card::Card;
use crate::model::deck::{CARD_DECK_SIZE, Deck, DeckError, write_card_list};
use crate::model::player::{PlayError, Player, Seat};
use crate::model::trick::Trick;
use rand::SeedableRng;
use rand::rngs::StdRng;
use serde::{Deserialize, Serialize};
use std::fmt;
use thiserror::Error;
use tracing::{debug, info};

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum GameError {
    #[error("the game has no players")]
    NoPlayers,
    #[error("no player holds the 4 Rocket")]
    NoCommander,
    #[error("{0} is not seated at this table")]
    UnknownSeat(Seat),
    #[error("cannot seat a player while a trick is in progress")]
    TrickInProgress,
    #[error("{0} has no cards left to play")]
    EmptyHand(Seat),
    #[error("selection {index} is out of range for {len} candidates")]
    SelectionOutOfRange { index: usize, len: usize },
    #[error("trick is not complete: {played} of {seats} cards played")]
    TrickIncomplete { played: usize, seats: usize },
    #[error(transparent)]
    Deck(#[from] DeckError),
    #[error(transparent)]
    Play(#[from] PlayError),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct TaskAssignment {
    pub seat: Seat,
    pub card: Card,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TrickResult {
    pub winner: Seat,
    pub card: Card,
    /// Task cards in this trick taken by the player holding the task.
    pub completed: Vec<Card>,
    /// Task cards in this trick taken by anyone else.
    pub failed: Vec<Card>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum MissionStatus {
    InProgress,
    Succeeded,
    Failed,
}

/// One table of players working through a mission. Owns the roster, both
/// decks, the mission's task cards and the trick in progress.
#[derive(Debug, Clone)]
pub struct Game {
    players: Vec<Player>,
    deck: Deck,
    task_deck: Deck,
    task_cards: Vec<Card>,
    unchosen_tasks: Vec<Card>,
    completed_tasks: Vec<Card>,
    failed_tasks: Vec<Card>,
    trick: Trick,
    history: Vec<Trick>,
    leader: Seat,
    rng: StdRng,
    seed: u64,
}

impl Game {
    pub fn new(num_players: usize) -> Self {
        let seed: u64 = rand::random();
        Self::with_seed(num_players, seed)
    }

    pub fn with_seed(num_players: usize, seed: u64) -> Self {
        let mut rng = StdRng::seed_from_u64(seed);
        let mut deck = Deck::card_deck();
        deck.shuffle(&mut rng);
        let mut task_deck = Deck::task_deck();
        task_deck.shuffle(&mut rng);

        Self {
            players: (0..num_players).map(|i| Player::seated(Seat::new(i))).collect(),
            deck,
            task_deck,
            task_cards: Vec::new(),
            unchosen_tasks: Vec::new(),
            completed_tasks: Vec::new(),
            failed_tasks: Vec::new(),
            trick: Trick::new(num_players),
            history: Vec::new(),
            leader: Seat::new(0),
            rng,
            seed,
        }
    }

    /// Seats one player per hand, in order. The card deck is left empty and
    /// the first trick is led by whoever holds the 4 Rocket, or seat 0.
    pub fn from_hands(hands: Vec<Vec<Card>>, seed: u64) -> Self {
        let mut game = Self::with_seed(hands.len(), seed);
        game.deck = Deck::new();
        for (player, hand) in game.players.iter_mut().zip(hands) {
            player.draw(hand, true);
        }
        game.leader = game.commander().unwrap_or(Seat::new(0));
        game
    }

    pub fn seed(&self) -> u64 {
        self.seed
    }

    pub fn num_players(&self) -> usize {
        self.players.len()
    }

    pub fn players(&self) -> &[Player] {
        &self.players
    }

    pub fn player(&self, seat: Seat) -> Option<&Player> {
        self.players.get(seat.index())
    }

    pub fn deck(&self) -> &Deck {
        &self.deck
    }

    pub fn task_deck(&self) -> &Deck {
        &self.task_deck
    }

    pub fn task_cards(&self) -> &[Card] {
        &self.task_cards
    }

    pub fn unchosen_task_cards(&self) -> &[Card] {
        &self.unchosen_tasks
    }

    pub fn trick(&self) -> &Trick {
        &self.trick
    }

    pub fn tricks_played(&self) -> &[Trick] {
        &self.history
    }

    pub fn leader(&self) -> Seat {
        self.leader
    }

    /// Seats `player` at the end of the table. Only allowed between tricks.
    pub fn add_player(&mut self, mut player: Player) -> Result<Seat, GameError> {
        if !self.trick.is_empty() {
            return Err(GameError::TrickInProgress);
        }
        let seat = Seat::new(self.players.len());
        player.take_seat(seat);
        self.players.push(player);
        self.trick = Trick::new(self.players.len());
        Ok(seat)
    }

    pub fn add_new_players(&mut self, count: usize) -> Result<(), GameError> {
        for _ in 0..count {
            self.add_player(Player::new())?;
        }
        Ok(())
    }

    /// First seat whose starting hand held the 4 Rocket.
    pub fn commander(&self) -> Option<Seat> {
        self.players
            .iter()
            .position(Player::is_commander)
            .map(Seat::new)
    }

    /// Replaces decks, hands, task pools and the trick in one step. On error
    /// the game is left untouched.
    pub fn new_mission(&mut self) -> Result<(), GameError> {
        let mut deck = Deck::card_deck();
        deck.shuffle(&mut self.rng);
        let mut task_deck = Deck::task_deck();
        task_deck.shuffle(&mut self.rng);
        let hands = deal_hands(&mut deck, self.players.len())?;

        self.deck = deck;
        self.task_deck = task_deck;
        for (player, hand) in self.players.iter_mut().zip(hands) {
            player.draw(hand, true);
            player.clear_tasks();
        }
        self.task_cards.clear();
        self.unchosen_tasks.clear();
        self.completed_tasks.clear();
        self.failed_tasks.clear();
        self.history.clear();
        self.trick = Trick::new(self.players.len());
        self.leader = self.commander().unwrap_or(Seat::new(0));

        info!(
            players = self.players.len(),
            undealt = self.deck.len(),
            commander = ?self.commander(),
            "mission set up"
        );
        Ok(())
    }

    /// Fresh shuffled 40-card deck; hands are not touched.
    pub fn new_card_deck(&mut self) {
        let mut deck = Deck::card_deck();
        deck.shuffle(&mut self.rng);
        self.deck = deck;
    }

    pub fn new_task_deck(&mut self) {
        let mut task_deck = Deck::task_deck();
        task_deck.shuffle(&mut self.rng);
        self.task_deck = task_deck;
    }

    pub fn new_trick(&mut self) {
        self.trick = Trick::new(self.players.len());
    }

    /// Deals `40 / players` cards to every seat. The remainder stays in the deck.
    pub fn deal_cards(&mut self) -> Result<(), GameError> {
        let hands = deal_hands(&mut self.deck, self.players.len())?;
        for (player, hand) in self.players.iter_mut().zip(hands) {
            player.draw(hand, true);
        }
        Ok(())
    }

    /// Draws the mission's task cards; all of them start unchosen.
    pub fn deal_task_cards(&mut self, count: usize) -> Result<&[Card], GameError> {
        let cards = self.task_deck.deal(count)?;
        debug!(count, "task cards dealt");
        self.unchosen_tasks = cards.clone();
        self.task_cards = cards;
        self.completed_tasks.clear();
        self.failed_tasks.clear();
        Ok(&self.task_cards)
    }

    /// Starting with the Commander and moving seat by seat, each player takes
    /// one unchosen task until none are left.
    pub fn task_selection_rotation<S: Selector + ?Sized>(
        &mut self,
        selector: &mut S,
    ) -> Result<Vec<TaskAssignment>, GameError> {
        if self.unchosen_tasks.is_empty() {
            return Ok(Vec::new());
        }
        let mut seat = self.commander().ok_or(GameError::NoCommander)?;
        let seats = self.players.len();
        let mut assignments = Vec::with_capacity(self.unchosen_tasks.len());

        while !self.unchosen_tasks.is_empty() {
            let index = selector.choose_task(seat, &self.unchosen_tasks);
            if index >= self.unchosen_tasks.len() {
                return Err(GameError::SelectionOutOfRange {
                    index,
                    len: self.unchosen_tasks.len(),
                });
            }
            let card = self.unchosen_tasks.remove(index);
            self.players[seat.index()].assign_task(card);
            info!(%seat, %card, "task chosen");
            assignments.push(TaskAssignment { seat, card });
            seat = seat.next(seats);
        }

        Ok(assignments)
    }

    /// Cards `seat` may choose from under the follow-suit rule.
    pub fn valid_cards(&self, seat: Seat) -> Result<Vec<Card>, GameError> {
        let player = self.player(seat).ok_or(GameError::UnknownSeat(seat))?;
        Ok(player.hand().playable(self.trick.lead_suit()))
    }

    pub fn play_card(&mut self, seat: Seat, card: Card) -> Result<(), GameError> {
        let player = self
            .players
            .get_mut(seat.index())
            .ok_or(GameError::UnknownSeat(seat))?;
        player.play_card(&mut self.trick, card)?;
        Ok(())
    }

    /// Seat due to play next, counting round from the trick's leader.
    pub fn next_to_play(&self) -> Option<Seat> {
        if self.trick.is_complete() {
            return None;
        }
        self.leader
            .rotation(self.players.len())
            .find(|seat| !self.trick.has_played(*seat))
    }

    pub fn play_turn<S: Selector + ?Sized>(
        &mut self,
        seat: Seat,
        selector: &mut S,
    ) -> Result<Card, GameError> {
        let candidates = self.valid_cards(seat)?;
        if candidates.is_empty() {
            return Err(GameError::EmptyHand(seat));
        }
        let index = selector.choose_card(seat, &candidates);
        let card = *candidates
            .get(index)
            .ok_or(GameError::SelectionOutOfRange {
                index,
                len: candidates.len(),
            })?;
        self.play_card(seat, card)?;
        Ok(card)
    }

    /// Plays out the current trick from its leader and resolves it.
    pub fn play_trick<S: Selector + ?Sized>(
        &mut self,
        selector: &mut S,
    ) -> Result<TrickResult, GameError> {
        if self.players.is_empty() {
            return Err(GameError::NoPlayers);
        }
        while let Some(seat) = self.next_to_play() {
            self.play_turn(seat, selector)?;
        }
        self.resolve_trick()
    }

    /// Scores a full trick against the mission's tasks, files it in the
    /// history and hands the lead to its winner.
    pub fn resolve_trick(&mut self) -> Result<TrickResult, GameError> {
        if !self.trick.is_complete() {
            return Err(GameError::TrickIncomplete {
                played: self.trick.len(),
                seats: self.players.len(),
            });
        }
        let (Some(winner), Some(card)) = (self.trick.winning_seat(), self.trick.winning_card())
        else {
            return Err(GameError::NoPlayers);
        };

        let holder = &self.players[winner.index()];
        let mut completed = Vec::new();
        let mut failed = Vec::new();
        for &task in &self.task_cards {
            if !self.trick.contains(task) {
                continue;
            }
            if holder.has_task(task) {
                completed.push(task);
            } else {
                failed.push(task);
            }
        }
        self.completed_tasks.extend(completed.iter().copied());
        self.failed_tasks.extend(failed.iter().copied());

        let finished = std::mem::replace(&mut self.trick, Trick::new(self.players.len()));
        debug!(%winner, %card, trick = %finished, "trick resolved");
        self.history.push(finished);
        self.leader = winner;

        Ok(TrickResult {
            winner,
            card,
            completed,
            failed,
        })
    }

    pub fn mission_status(&self) -> MissionStatus {
        if !self.failed_tasks.is_empty() {
            return MissionStatus::Failed;
        }
        if self.task_cards.is_empty() {
            return MissionStatus::InProgress;
        }
        if self.completed_tasks.len() == self.task_cards.len() {
            MissionStatus::Succeeded
        } else if self.players.iter().all(|player| player.hand().is_empty()) {
            MissionStatus::Failed
        } else {
            MissionStatus::InProgress
        }
    }
}

fn deal_hands(deck: &mut Deck, players: usize) -> Result<Vec<Vec<Card>>, GameError> {
    if players == 0 {
        return Err(GameError::NoPlayers);
    }
    let per_player = CARD_DECK_SIZE / players;
    if deck.len() < per_player * players {
        return Err(DeckError::InsufficientCards {
            requested: per_player * players,
            remaining: deck.len(),
        }
        .into());
    }
    let mut hands = Vec::with_capacity(players);
    for _ in 0..players {
        hands.push(deck.deal(per_player)?);
    }
    debug!(players, per_player, undealt = deck.len(), "cards dealt");
    Ok(hands)
}

impl fmt::Display for Game {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (index, player) in self.players.iter().enumerate() {
            writeln!(f, "{}: {}", Seat::new(index), player.hand())?;
        }
        f.write_str("Task Cards: ")?;
        write_card_list(f, &self.task_cards)
    }
}
