use serde::Serialize;

use crate::condition::RankedGuessList;

/// Which branch of the fill policy produced the result.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum FillPolicy {
    /// Three or more rules matched; extra matches were dropped.
    Truncated,
    /// One or two rules matched; generic guesses filled the rest.
    Padded,
    /// Nothing matched; the no-match list was returned as is.
    NoMatch,
}

#[derive(Debug, Clone, Serialize)]
pub struct ScoreTrace {
    pub matched_rules: Vec<&'static str>,
    pub policy: FillPolicy,
    pub guesses: RankedGuessList,
}
