use chrono::{DateTime, Utc};
use serde::Serialize;
use serde_json::{Map, Value};
use uuid::Uuid;

/// Free-form profile fields, keyed by an opaque user id.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct UserDocument {
    pub user_id: String,
    pub data: Map<String, Value>,
    pub updated_at: DateTime<Utc>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SymptomReport {
    pub id: Uuid,
    pub user_id: String,
    pub report: Map<String, Value>,
    pub created_at: DateTime<Utc>,
}

/// Shallow merge: top-level keys in `fields` replace those in `base`.
pub fn merge_fields(base: &mut Map<String, Value>, fields: Map<String, Value>) {
    for (key, value) in fields {
        base.insert(key, value);
    }
}
