use crate::condition::{ConditionGuess, RankedGuessList};
use crate::rules::{FILL_GUESSES, KEYWORD_RULES, NO_MATCH_GUESSES};
use crate::trace::{FillPolicy, ScoreTrace};

/// Rank candidate conditions for a set of reported symptom phrases.
///
/// Total and deterministic: every input, including an empty one, yields three guesses.
pub fn score<S: AsRef<str>>(symptoms: &[S]) -> RankedGuessList {
    evaluate(symptoms).guesses
}

/// Like [`score`], but also reports which rules fired and how the list was filled.
pub fn evaluate<S: AsRef<str>>(symptoms: &[S]) -> ScoreTrace {
    let text = search_text(symptoms);

    let mut matched_rules = Vec::new();
    let mut accumulated: Vec<ConditionGuess> = Vec::new();
    for rule in &KEYWORD_RULES {
        if rule.predicate.matches(&text) {
            matched_rules.push(rule.name);
            accumulated.push(rule.guess);
        }
    }

    let (policy, guesses) = match accumulated.len() {
        0 => (FillPolicy::NoMatch, NO_MATCH_GUESSES),
        n if n >= 3 => (
            FillPolicy::Truncated,
            [accumulated[0], accumulated[1], accumulated[2]],
        ),
        _ => (FillPolicy::Padded, pad(accumulated)),
    };

    ScoreTrace {
        matched_rules,
        policy,
        guesses: RankedGuessList::new(guesses),
    }
}

fn search_text<S: AsRef<str>>(symptoms: &[S]) -> String {
    symptoms
        .iter()
        .map(AsRef::as_ref)
        .collect::<Vec<_>>()
        .join(" ")
        .to_lowercase()
}

/// Only called with one or two matches. Keyword rules never emit a fill condition,
/// so three entries are always reached.
fn pad(mut accumulated: Vec<ConditionGuess>) -> [ConditionGuess; 3] {
    for fill in FILL_GUESSES {
        if accumulated.len() >= 3 {
            break;
        }
        if accumulated.iter().all(|g| g.condition != fill.condition) {
            accumulated.push(fill);
        }
    }
    [accumulated[0], accumulated[1], accumulated[2]]
}
