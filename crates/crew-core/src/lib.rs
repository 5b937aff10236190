#![deny(warnings)]
pub mod game;
pub mod model;

pub use game::mission::{Game, GameError, MissionStatus, TaskAssignment, TrickResult};
pub use game::selector::{FirstChoice, ScriptedSelector, Selector};
pub use model::card::{Card, compare};
pub use model::deck::Deck;
pub use model::player::{Player, Seat};
pub use model::suit::Suit;
pub use model::trick::Trick;
pub use model::value::Value;

pub struct AppInfo;

impl AppInfo {
    pub const fn name() -> &'static str {
        "crew"
    }

    pub const fn codename() -> &'static str {
        "Mission Control"
    }

    pub const fn version() -> &'static str {
        env!("CARGO_PKG_VERSION")
    }
}

#[cfg(test)]
mod tests {
    use super::AppInfo;

    #[test]
    fn exposes_static_metadata() {
        assert_eq!(AppInfo::name(), "crew");
        assert_eq!(AppInfo::codename(), "Mission Control");
        assert!(!AppInfo::version().is_empty());
    }
}
