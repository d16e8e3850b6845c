use breezo_db::user::models::SymptomReport;
use chrono::SecondsFormat;
use serde::Serialize;
use serde_json::{Map, Value};
use uuid::Uuid;

#[derive(Debug, Serialize)]
pub struct SuccessResponse {
    pub success: bool,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ReportCreatedResponse {
    pub success: bool,
    pub report_id: Uuid,
}

#[derive(Debug, Serialize)]
pub struct ListReportsResponse {
    pub reports: Vec<Map<String, Value>>,
    pub count: usize,
}

/// Report fields with `id` and `createdAt` laid over them.
pub fn report_view(report: SymptomReport) -> Map<String, Value> {
    let mut view = report.report;
    view.insert("id".to_string(), Value::String(report.id.to_string()));
    view.insert(
        "createdAt".to_string(),
        Value::String(report.created_at.to_rfc3339_opts(SecondsFormat::Millis, true)),
    );
    view
}
