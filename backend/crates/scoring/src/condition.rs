use std::fmt;

use serde::{Serialize, Serializer};

/// Closed set of labels the scorer can emit.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Condition {
    Bronchitis,
    Asthma,
    Influenza,
    Pneumonia,
    SeasonalAllergies,
    RespiratoryInfection,
    CommonCold,
    UpperRespiratoryTractInfection,
}

impl Condition {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Bronchitis => "Bronchitis",
            Self::Asthma => "Asthma",
            Self::Influenza => "Influenza",
            Self::Pneumonia => "Pneumonia",
            Self::SeasonalAllergies => "Seasonal Allergies",
            Self::RespiratoryInfection => "Respiratory Infection",
            Self::CommonCold => "Common Cold",
            Self::UpperRespiratoryTractInfection => "Upper Respiratory Tract Infection",
        }
    }
}

impl fmt::Display for Condition {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl Serialize for Condition {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(self.as_str())
    }
}

/// A condition with its fixed, rule-assigned confidence in (0, 1].
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct ConditionGuess {
    #[serde(rename = "disease")]
    pub condition: Condition,
    #[serde(rename = "probability")]
    pub confidence: f64,
}

impl ConditionGuess {
    pub const fn new(condition: Condition, confidence: f64) -> Self {
        Self {
            condition,
            confidence,
        }
    }
}

/// Exactly three guesses with distinct conditions, in the order the rules produced them.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(transparent)]
pub struct RankedGuessList([ConditionGuess; 3]);

impl RankedGuessList {
    pub(crate) fn new(guesses: [ConditionGuess; 3]) -> Self {
        Self(guesses)
    }

    pub fn as_slice(&self) -> &[ConditionGuess] {
        &self.0
    }

    pub fn iter(&self) -> std::slice::Iter<'_, ConditionGuess> {
        self.0.iter()
    }

    pub fn first(&self) -> &ConditionGuess {
        &self.0[0]
    }
}

impl<'a> IntoIterator for &'a RankedGuessList {
    type Item = &'a ConditionGuess;
    type IntoIter = std::slice::Iter<'a, ConditionGuess>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}
