pub mod mission;
pub mod selector;
