use std::collections::HashMap;

use async_trait::async_trait;
use breezo_common::error::BreezoResult;
use breezo_common::types::Readiness;
use chrono::Utc;
use serde_json::{Map, Value};
use tokio::sync::RwLock;
use uuid::Uuid;

use crate::user::models::{merge_fields, SymptomReport, UserDocument};
use crate::user::repositories::UserRepository;

/// Process-local store with the same merge semantics as the Postgres repository.
#[derive(Default)]
pub struct InMemoryUserRepository {
    documents: RwLock<HashMap<String, UserDocument>>,
    // Appended in creation order.
    reports: RwLock<HashMap<String, Vec<SymptomReport>>>,
}

impl InMemoryUserRepository {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl UserRepository for InMemoryUserRepository {
    fn readiness(&self) -> Readiness {
        Readiness::Ready
    }

    async fn merge_document(
        &self,
        user_id: &str,
        fields: Map<String, Value>,
    ) -> BreezoResult<UserDocument> {
        let mut documents = self.documents.write().await;
        let doc = documents
            .entry(user_id.to_string())
            .or_insert_with(|| UserDocument {
                user_id: user_id.to_string(),
                data: Map::new(),
                updated_at: Utc::now(),
            });
        merge_fields(&mut doc.data, fields);
        doc.updated_at = Utc::now();
        Ok(doc.clone())
    }

    async fn get_document(&self, user_id: &str) -> BreezoResult<Option<UserDocument>> {
        Ok(self.documents.read().await.get(user_id).cloned())
    }

    async fn add_symptom_report(
        &self,
        user_id: &str,
        report: Map<String, Value>,
    ) -> BreezoResult<SymptomReport> {
        let saved = SymptomReport {
            id: Uuid::new_v4(),
            user_id: user_id.to_string(),
            report,
            created_at: Utc::now(),
        };
        self.reports
            .write()
            .await
            .entry(user_id.to_string())
            .or_default()
            .push(saved.clone());
        Ok(saved)
    }

    async fn list_symptom_reports(&self, user_id: &str) -> BreezoResult<Vec<SymptomReport>> {
        let reports = self.reports.read().await;
        Ok(reports
            .get(user_id)
            .map(|list| list.iter().rev().cloned().collect())
            .unwrap_or_default())
    }
}
