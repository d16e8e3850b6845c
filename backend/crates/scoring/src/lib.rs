pub mod condition;
pub mod engine;
pub mod rules;
pub mod trace;

pub use condition::{Condition, ConditionGuess, RankedGuessList};
pub use engine::{evaluate, score};
pub use trace::{FillPolicy, ScoreTrace};
