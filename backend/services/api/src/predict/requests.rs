use serde::Deserialize;
use serde_json::Value;

/// `symptoms` may be a single phrase or a list of phrases.
#[derive(Debug, Clone, Deserialize)]
#[serde(untagged)]
pub enum SymptomsInput {
    One(String),
    Many(Vec<String>),
}

impl SymptomsInput {
    pub fn into_vec(self) -> Vec<String> {
        match self {
            Self::One(phrase) => vec![phrase],
            Self::Many(phrases) => phrases,
        }
    }

    /// An empty list still counts as present; an empty string does not.
    fn is_present(&self) -> bool {
        match self {
            Self::One(phrase) => !phrase.is_empty(),
            Self::Many(_) => true,
        }
    }
}

/// `age` and `sex` are required but do not influence scoring.
#[derive(Debug, Deserialize)]
pub struct PredictRequest {
    pub symptoms: Option<SymptomsInput>,
    pub age: Option<Value>,
    pub sex: Option<Value>,
}

impl PredictRequest {
    /// Returns the normalised symptom list, or `None` when a required field is missing.
    pub fn into_symptoms(self) -> Option<Vec<String>> {
        let symptoms = self.symptoms.filter(SymptomsInput::is_present)?;
        if !is_present(self.age.as_ref()) || !is_present(self.sex.as_ref()) {
            return None;
        }
        Some(symptoms.into_vec())
    }
}

/// Null, `false`, zero and the empty string count as missing.
fn is_present(value: Option<&Value>) -> bool {
    match value {
        None | Some(Value::Null) => false,
        Some(Value::Bool(b)) => *b,
        Some(Value::Number(n)) => n.as_f64().is_some_and(|v| v != 0.0),
        Some(Value::String(s)) => !s.is_empty(),
        Some(Value::Array(_)) | Some(Value::Object(_)) => true,
    }
}
