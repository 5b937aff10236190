use std::collections::BTreeMap;
use std::fmt::Write as _;

use crew_core::Player;
use serde::Serialize;

/// Rocket cards in the 40-card deck.
pub const ROCKET_COUNT: usize = 4;

/// Tallies how Rocket cards land across hands over many deals.
#[derive(Debug, Clone)]
pub struct RocketCollector {
    players: usize,
    deals: u64,
    hands_with: [u64; ROCKET_COUNT + 1],
    deals_with: [u64; ROCKET_COUNT + 1],
}

impl RocketCollector {
    pub fn new(players: usize) -> Self {
        Self {
            players,
            deals: 0,
            hands_with: [0; ROCKET_COUNT + 1],
            deals_with: [0; ROCKET_COUNT + 1],
        }
    }

    pub fn deals(&self) -> u64 {
        self.deals
    }

    pub fn record_deal(&mut self, players: &[Player]) {
        let mut seen = [false; ROCKET_COUNT + 1];
        for player in players {
            let rockets = player
                .hand()
                .iter()
                .filter(|card| card.is_rocket())
                .count()
                .min(ROCKET_COUNT);
            self.hands_with[rockets] += 1;
            seen[rockets] = true;
        }
        for (count, hit) in seen.into_iter().enumerate() {
            if hit {
                self.deals_with[count] += 1;
            }
        }
        self.deals += 1;
    }

    pub fn summary(&self) -> RocketSummary {
        let hands = self.deals * self.players as u64;
        let per_hand = self
            .hands_with
            .iter()
            .enumerate()
            .filter(|&(_, &count)| count > 0)
            .map(|(rockets, &count)| (rockets, percent(count, hands)))
            .collect();
        let per_deal = self
            .deals_with
            .iter()
            .enumerate()
            .map(|(rockets, &count)| (rockets, percent(count, self.deals)))
            .collect();
        RocketSummary {
            players: self.players,
            deals: self.deals,
            per_hand,
            per_deal,
        }
    }
}

fn percent(count: u64, total: u64) -> f64 {
    if total == 0 {
        return 0.0;
    }
    let raw = 100.0 * count as f64 / total as f64;
    (raw * 1000.0).round() / 1000.0
}

#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct RocketSummary {
    pub players: usize,
    pub deals: u64,
    /// Percent of all dealt hands holding exactly n Rockets.
    pub per_hand: BTreeMap<usize, f64>,
    /// Percent of deals where at least one hand holds exactly n Rockets.
    pub per_deal: BTreeMap<usize, f64>,
}

impl RocketSummary {
    pub fn render_text(&self) -> String {
        let mut out = String::new();
        for (rockets, pct) in &self.per_hand {
            let _ = writeln!(out, "{rockets} Rockets : {pct}%");
        }
        for (rockets, pct) in &self.per_deal {
            let _ = writeln!(out, "Game with {rockets} Rockets : {pct}%");
        }
        out
    }
}
