use core::fmt;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Ord, PartialOrd, Serialize, Deserialize)]
#[repr(u8)]
pub enum Value {
    One = 1,
    Two = 2,
    Three = 3,
    Four = 4,
    Five = 5,
    Six = 6,
    Seven = 7,
    Eight = 8,
    Nine = 9,
}

impl Value {
    pub const ORDERED: [Value; 9] = [
        Value::One,
        Value::Two,
        Value::Three,
        Value::Four,
        Value::Five,
        Value::Six,
        Value::Seven,
        Value::Eight,
        Value::Nine,
    ];

    /// Values printed on Rocket cards.
    pub const ROCKET: [Value; 4] = [Value::One, Value::Two, Value::Three, Value::Four];

    pub const fn from_value(value: u8) -> Option<Self> {
        match value {
            1 => Some(Value::One),
            2 => Some(Value::Two),
            3 => Some(Value::Three),
            4 => Some(Value::Four),
            5 => Some(Value::Five),
            6 => Some(Value::Six),
            7 => Some(Value::Seven),
            8 => Some(Value::Eight),
            9 => Some(Value::Nine),
            _ => None,
        }
    }

    pub const fn value(self) -> u8 {
        self as u8
    }
}

impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.value())
    }
}

#[cfg(test)]
mod tests {
    use super::Value;

    #[test]
    fn from_value_maps() {
        assert_eq!(Value::from_value(7), Some(Value::Seven));
        assert_eq!(Value::from_value(0), None);
        assert_eq!(Value::from_value(10), None);
    }

    #[test]
    fn ordered_is_ascending() {
        assert!(Value::ORDERED.windows(2).all(|pair| pair[0] < pair[1]));
        assert_eq!(Value::Nine.to_string(), "9");
    }
}
