use crate::database::EstimationStore;
use crate::models::{EstimationRecord, StoredEstimation};
use crate::utils::AppError;

/// Records a user's vote on an issue.
///
/// First vote inserts the submitted payload. A repeated vote overlays the
/// submitted fields on the stored record (fields it does not mention are
/// kept) and writes the merged set back under the same id. Lookup and write
/// are separate calls; the unique (issueKey, userName) index makes a racing
/// second insert fail instead of duplicating the vote.
pub async fn submit_estimation(
    store: &dyn EstimationStore,
    record: &EstimationRecord,
) -> Result<(), AppError> {
    record.validate()?;
    let submitted = record.to_document()?;

    match store.find_one(&record.issue_key, &record.user_name).await? {
        None => {
            log::info!("🗳️  New estimation {} by {}", record.issue_key, record.user_name);
            store.insert_one(submitted).await
        }
        Some(mut existing) => {
            let record_id = existing.get_object_id("_id")?;
            existing.remove("_id");
            for (key, value) in submitted {
                existing.insert(key, value);
            }

            log::info!("🔁 Updating estimation {} by {}", record.issue_key, record.user_name);
            store.update_fields(&record_id, existing).await
        }
    }
}

pub async fn estimations_for_issue(
    store: &dyn EstimationStore,
    issue_key: &str,
) -> Result<Vec<StoredEstimation>, AppError> {
    store.find_all_by_issue_key(issue_key).await
}
