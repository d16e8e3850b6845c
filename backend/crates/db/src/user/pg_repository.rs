use async_trait::async_trait;
use breezo_common::error::{BreezoError, BreezoResult};
use breezo_common::types::Readiness;
use serde_json::{Map, Value};
use sqlx::{PgPool, Row};
use uuid::Uuid;

use crate::user::models::{SymptomReport, UserDocument};
use crate::user::repositories::UserRepository;

#[derive(Clone)]
pub struct PgUserRepository {
    pool: PgPool,
}

impl PgUserRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    pub fn pool(&self) -> &PgPool {
        &self.pool
    }
}

fn into_object(value: Value) -> Map<String, Value> {
    match value {
        Value::Object(map) => map,
        _ => Map::new(),
    }
}

fn map_document_row(row: &sqlx::postgres::PgRow) -> UserDocument {
    UserDocument {
        user_id: row.get("user_id"),
        data: into_object(row.get("data")),
        updated_at: row.get("updated_at"),
    }
}

fn map_report_row(row: &sqlx::postgres::PgRow) -> SymptomReport {
    SymptomReport {
        id: row.get("id"),
        user_id: row.get("user_id"),
        report: into_object(row.get("report")),
        created_at: row.get("created_at"),
    }
}

#[async_trait]
impl UserRepository for PgUserRepository {
    fn readiness(&self) -> Readiness {
        if self.pool.is_closed() {
            Readiness::NotReady("database pool is closed".to_string())
        } else {
            Readiness::Ready
        }
    }

    async fn merge_document(
        &self,
        user_id: &str,
        fields: Map<String, Value>,
    ) -> BreezoResult<UserDocument> {
        let row = sqlx::query(
            "insert into user_documents (user_id, data, updated_at)
             values ($1, $2, now())
             on conflict (user_id) do update set
               data = user_documents.data || excluded.data,
               updated_at = now()
             returning user_id, data, updated_at",
        )
        .bind(user_id)
        .bind(Value::Object(fields))
        .fetch_one(&self.pool)
        .await
        .map_err(|e| BreezoError::Database(e.to_string()))?;

        Ok(map_document_row(&row))
    }

    async fn get_document(&self, user_id: &str) -> BreezoResult<Option<UserDocument>> {
        let row = sqlx::query(
            "select user_id, data, updated_at from user_documents where user_id = $1",
        )
        .bind(user_id)
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| BreezoError::Database(e.to_string()))?;

        Ok(row.as_ref().map(map_document_row))
    }

    async fn add_symptom_report(
        &self,
        user_id: &str,
        report: Map<String, Value>,
    ) -> BreezoResult<SymptomReport> {
        let row = sqlx::query(
            "insert into symptom_reports (id, user_id, report, created_at)
             values ($1, $2, $3, now())
             returning id, user_id, report, created_at",
        )
        .bind(Uuid::new_v4())
        .bind(user_id)
        .bind(Value::Object(report))
        .fetch_one(&self.pool)
        .await
        .map_err(|e| BreezoError::Database(e.to_string()))?;

        Ok(map_report_row(&row))
    }

    async fn list_symptom_reports(&self, user_id: &str) -> BreezoResult<Vec<SymptomReport>> {
        let rows = sqlx::query(
            "select id, user_id, report, created_at from symptom_reports
             where user_id = $1
             order by created_at desc, id desc",
        )
        .bind(user_id)
        .fetch_all(&self.pool)
        .await
        .map_err(|e| BreezoError::Database(e.to_string()))?;

        Ok(rows.iter().map(map_report_row).collect())
    }
}
