use async_trait::async_trait;
use breezo_common::error::BreezoResult;
use breezo_common::types::Readiness;
use serde_json::{Map, Value};

use crate::user::models::{SymptomReport, UserDocument};

#[async_trait]
pub trait UserRepository: Send + Sync {
    fn readiness(&self) -> Readiness;

    /// Upsert: creates the document when absent, otherwise merges top-level fields.
    async fn merge_document(
        &self,
        user_id: &str,
        fields: Map<String, Value>,
    ) -> BreezoResult<UserDocument>;

    async fn get_document(&self, user_id: &str) -> BreezoResult<Option<UserDocument>>;

    async fn add_symptom_report(
        &self,
        user_id: &str,
        report: Map<String, Value>,
    ) -> BreezoResult<SymptomReport>;

    /// Newest first.
    async fn list_symptom_reports(&self, user_id: &str) -> BreezoResult<Vec<SymptomReport>>;
}
