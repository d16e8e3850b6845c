use serde::Deserialize;
use serde_json::Value;

#[derive(Debug, Deserialize)]
pub struct SaveUserDataRequest {
    #[serde(rename = "userId")]
    pub user_id: Option<String>,
    pub data: Option<Value>,
}

#[derive(Debug, Deserialize)]
pub struct UserIdQuery {
    #[serde(rename = "userId")]
    pub user_id: Option<String>,
}
