use crate::condition::{Condition, ConditionGuess};

/// Substring test over the joined, lower-cased symptom text.
#[derive(Debug, Clone, Copy)]
pub enum Predicate {
    /// At least one keyword occurs.
    Any(&'static [&'static str]),
    /// Every keyword occurs, anywhere and in any order.
    All(&'static [&'static str]),
}

impl Predicate {
    pub fn matches(&self, haystack: &str) -> bool {
        match self {
            Self::Any(keywords) => keywords.iter().any(|k| haystack.contains(k)),
            Self::All(keywords) => keywords.iter().all(|k| haystack.contains(k)),
        }
    }
}

#[derive(Debug, Clone, Copy)]
pub struct KeywordRule {
    pub name: &'static str,
    pub predicate: Predicate,
    pub guess: ConditionGuess,
}

/// Evaluated in order; confidences descend so matches come out already ranked.
pub const KEYWORD_RULES: [KeywordRule; 5] = [
    KeywordRule {
        name: "cough_or_breathing",
        predicate: Predicate::Any(&["cough", "breathing"]),
        guess: ConditionGuess::new(Condition::Bronchitis, 0.75),
    },
    KeywordRule {
        name: "short_and_breath",
        predicate: Predicate::All(&["short", "breath"]),
        guess: ConditionGuess::new(Condition::Asthma, 0.70),
    },
    KeywordRule {
        name: "fever_or_flu",
        predicate: Predicate::Any(&["fever", "flu"]),
        guess: ConditionGuess::new(Condition::Influenza, 0.65),
    },
    KeywordRule {
        name: "chest_and_pain",
        predicate: Predicate::All(&["chest", "pain"]),
        guess: ConditionGuess::new(Condition::Pneumonia, 0.60),
    },
    KeywordRule {
        name: "allergy_or_sneeze",
        predicate: Predicate::Any(&["allergy", "sneeze"]),
        guess: ConditionGuess::new(Condition::SeasonalAllergies, 0.55),
    },
];

/// Pads a partial match up to three entries.
pub const FILL_GUESSES: [ConditionGuess; 3] = [
    ConditionGuess::new(Condition::RespiratoryInfection, 0.45),
    ConditionGuess::new(Condition::CommonCold, 0.40),
    ConditionGuess::new(Condition::UpperRespiratoryTractInfection, 0.35),
];

/// Returned wholesale when no rule matches. Confidences differ from `FILL_GUESSES` on purpose.
pub const NO_MATCH_GUESSES: [ConditionGuess; 3] = [
    ConditionGuess::new(Condition::RespiratoryInfection, 0.50),
    ConditionGuess::new(Condition::CommonCold, 0.45),
    ConditionGuess::new(Condition::UpperRespiratoryTractInfection, 0.40),
];
