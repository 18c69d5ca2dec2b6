//! Connect API Response Models
//!
//! Response bodies returned by the upload and activity services

use serde::Deserialize;

use crate::domain::repositories::remote_service::UploadReceipt;

// Response from the upload service
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UploadResponse {
    pub detailed_import_result: DetailedImportResult,
}

#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DetailedImportResult {
    #[serde(default)]
    pub successes: Vec<ImportEntry>,
    #[serde(default)]
    pub failures: Vec<ImportEntry>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ImportEntry {
    pub internal_id: Option<u64>,
    #[serde(default)]
    pub messages: Option<Vec<ImportMessage>>,
}

#[derive(Debug, Deserialize)]
pub struct ImportMessage {
    pub code: Option<i64>,
    pub content: String,
}

// Response from the activity name service
#[derive(Debug, Deserialize)]
pub struct NameResponse {
    pub display: DisplayValue,
}

#[derive(Debug, Deserialize)]
pub struct DisplayValue {
    pub value: String,
}

// Response from the activity type service
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TypeResponse {
    pub activity_type: ActivityTypeKey,
}

#[derive(Debug, Deserialize)]
pub struct ActivityTypeKey {
    pub key: String,
}

impl UploadResponse {
    /// Convert the import result into a receipt.
    /// The first success wins; otherwise the first failure message becomes the id.
    pub fn into_receipt(self) -> UploadReceipt {
        let result = self.detailed_import_result;

        if let Some(id) = result.successes.iter().find_map(|s| s.internal_id) {
            return UploadReceipt::success(id.to_string());
        }

        let message = result
            .failures
            .into_iter()
            .filter_map(|f| f.messages)
            .flatten()
            .map(|m| m.content)
            .next()
            .unwrap_or_else(|| "Upload rejected without message".to_string());

        UploadReceipt::failure(message)
    }
}

/// Interpret a raw upload response body
pub fn interpret_upload_response(body: &str) -> UploadReceipt {
    match serde_json::from_str::<UploadResponse>(body) {
        Ok(response) => response.into_receipt(),
        Err(e) => UploadReceipt::failure(format!("Unexpected upload response: {}", e)),
    }
}

/// Check that the name service echoed the requested name
pub fn name_applied(body: &str, name: &str) -> bool {
    serde_json::from_str::<NameResponse>(body)
        .map(|response| response.display.value == name)
        .unwrap_or(false)
}

/// Check that the type service echoed the requested type key
pub fn type_applied(body: &str, activity_type: &str) -> bool {
    serde_json::from_str::<TypeResponse>(body)
        .map(|response| response.activity_type.key == activity_type)
        .unwrap_or(false)
}
