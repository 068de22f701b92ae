use mongodb::bson::{self, Document};
use serde::{Deserialize, Serialize};
use serde_json::{Map, Number, Value};
use utoipa::ToSchema;
use crate::utils::{document_to_json, AppError};

/// A user's story-point vote for an issue (collection `estimation_result`).
///
/// Clients may submit extra attributes alongside the three known ones; they
/// are stored and returned untouched.
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct EstimationRecord {
    pub issue_key: String,
    pub user_name: String,
    /// Kept as submitted so an integer vote stays an integer
    #[schema(value_type = f64)]
    pub estimated_story_point: Number,
    #[serde(flatten)]
    #[schema(value_type = Object)]
    pub extra: Map<String, Value>,
}

impl EstimationRecord {
    pub fn validate(&self) -> Result<(), AppError> {
        if self.issue_key.trim().is_empty() {
            return Err(AppError::Validation("issueKey must not be empty".into()));
        }
        if self.user_name.trim().is_empty() {
            return Err(AppError::Validation("userName must not be empty".into()));
        }
        Ok(())
    }

    /// BSON form of the record. `_id` is never taken from client input.
    pub fn to_document(&self) -> Result<Document, AppError> {
        // Numbers beyond i64 pass JSON parsing but have no BSON form
        let mut doc = bson::to_document(self)
            .map_err(|e| AppError::Validation(format!("Unstorable estimation: {}", e)))?;
        doc.remove("_id");
        Ok(doc)
    }
}

/// A stored vote as returned to clients, whatever shape it was written in.
pub type StoredEstimation = Map<String, Value>;

/// JSON form of a stored vote without the internal `_id`.
pub fn stored_estimation(mut doc: Document) -> StoredEstimation {
    doc.remove("_id");
    document_to_json(doc)
}
