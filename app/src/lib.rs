use serde::Serialize;
use store::StoreError;

/// Response envelope shared by every endpoint snapshot: `success`/`data`/
/// `message` on the happy path, `success: false` with `error` and
/// `statusCode` on failure. The status code comes from the error kind, never
/// from matching on error text.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ApiResponse<T: Serialize> {
    pub success: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub data: Option<T>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub status_code: Option<u16>,
}

impl<T: Serialize> ApiResponse<T> {
    pub fn ok(data: T, message: impl Into<String>) -> Self {
        ApiResponse {
            success: true,
            data: Some(data),
            message: Some(message.into()),
            error: None,
            status_code: None,
        }
    }

    pub fn err(error: &StoreError) -> Self {
        ApiResponse {
            success: false,
            data: None,
            message: None,
            error: Some(error.to_string()),
            status_code: Some(error.status_code()),
        }
    }

    pub fn to_json(&self) -> String {
        serde_json::to_string_pretty(self).unwrap_or_else(|_| "{}".to_string())
    }
}
