mod human;
mod lookahead;
mod selector;

pub use human::HumanSelector;
pub use lookahead::{LookaheadSelector, Priority};
pub use selector::MoveSelector;
