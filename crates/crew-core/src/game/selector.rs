use crate::model::card::Card;
use crate::model::player::Seat;
use std::collections::VecDeque;

/// Chooses among candidates on behalf of a seat: a console prompt, a UI, or a
/// script. Implementations return an index into the slice they were given;
/// the game rejects indices past the end and checks nothing else.
pub trait Selector {
    fn choose_task(&mut self, seat: Seat, pool: &[Card]) -> usize;

    fn choose_card(&mut self, seat: Seat, candidates: &[Card]) -> usize;
}

/// Always takes the first candidate.
#[derive(Debug, Clone, Copy, Default)]
pub struct FirstChoice;

impl Selector for FirstChoice {
    fn choose_task(&mut self, _seat: Seat, _pool: &[Card]) -> usize {
        0
    }

    fn choose_card(&mut self, _seat: Seat, _candidates: &[Card]) -> usize {
        0
    }
}

/// Replays fixed index sequences, falling back to the first candidate once a
/// sequence runs out.
#[derive(Debug, Clone, Default)]
pub struct ScriptedSelector {
    tasks: VecDeque<usize>,
    cards: VecDeque<usize>,
}

impl ScriptedSelector {
    pub fn new(
        tasks: impl IntoIterator<Item = usize>,
        cards: impl IntoIterator<Item = usize>,
    ) -> Self {
        Self {
            tasks: tasks.into_iter().collect(),
            cards: cards.into_iter().collect(),
        }
    }

    pub fn tasks_remaining(&self) -> usize {
        self.tasks.len()
    }

    pub fn cards_remaining(&self) -> usize {
        self.cards.len()
    }
}

impl Selector for ScriptedSelector {
    fn choose_task(&mut self, _seat: Seat, _pool: &[Card]) -> usize {
        self.tasks.pop_front().unwrap_or(0)
    }

    fn choose_card(&mut self, _seat: Seat, _candidates: &[Card]) -> usize {
        self.cards.pop_front().unwrap_or(0)
    }
}
