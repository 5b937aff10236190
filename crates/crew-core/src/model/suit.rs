use core::cmp::Ordering;
use core::fmt;
use core::str::FromStr;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Suit {
    Rocket,
    Blue,
    Green,
    Pink,
    Yellow,
}

impl Suit {
    pub const ALL: [Suit; 5] = [
        Suit::Rocket,
        Suit::Blue,
        Suit::Green,
        Suit::Pink,
        Suit::Yellow,
    ];

    /// The four colored suits, in deck-building order.
    pub const COLORS: [Suit; 4] = [Suit::Blue, Suit::Green, Suit::Pink, Suit::Yellow];

    pub const fn is_rocket(self) -> bool {
        matches!(self, Suit::Rocket)
    }

    /// Fixed tie-break order between suits: Rocket > Blue > Green > Pink > Yellow.
    /// Only meaningful when sorting mixed cards; a trick never ranks colors
    /// against each other.
    pub const fn precedence(self) -> u8 {
        match self {
            Suit::Rocket => 4,
            Suit::Blue => 3,
            Suit::Green => 2,
            Suit::Pink => 1,
            Suit::Yellow => 0,
        }
    }

    pub const fn as_str(self) -> &'static str {
        match self {
            Suit::Rocket => "Rocket",
            Suit::Blue => "Blue",
            Suit::Green => "Green",
            Suit::Pink => "Pink",
            Suit::Yellow => "Yellow",
        }
    }
}

impl Ord for Suit {
    fn cmp(&self, other: &Self) -> Ordering {
        self.precedence().cmp(&other.precedence())
    }
}

impl PartialOrd for Suit {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl fmt::Display for Suit {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unknown suit '{0}'")]
pub struct ParseSuitError(pub String);

impl FromStr for Suit {
    type Err = ParseSuitError;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value.trim().to_ascii_lowercase().as_str() {
            "rocket" => Ok(Suit::Rocket),
            "blue" => Ok(Suit::Blue),
            "green" => Ok(Suit::Green),
            "pink" => Ok(Suit::Pink),
            "yellow" => Ok(Suit::Yellow),
            _ => Err(ParseSuitError(value.to_string())),
        }
    }
}
