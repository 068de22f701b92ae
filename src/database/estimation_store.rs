use async_trait::async_trait;
use futures::stream::TryStreamExt;
use mongodb::bson::{doc, oid::ObjectId, Document};
use crate::database::{MongoDB, ESTIMATION_COLLECTION};
use crate::models::{stored_estimation, StoredEstimation};
use crate::utils::AppError;

/// Storage for estimation votes
#[async_trait]
pub trait EstimationStore: Send + Sync {
    /// The stored vote of `user_name` on `issue_key`, `_id` included
    async fn find_one(&self, issue_key: &str, user_name: &str) -> Result<Option<Document>, AppError>;

    async fn insert_one(&self, record: Document) -> Result<(), AppError>;

    /// Sets exactly the supplied fields on the record, leaving the rest alone
    async fn update_fields(&self, record_id: &ObjectId, fields: Document) -> Result<(), AppError>;

    /// Every vote on the issue as stored, without the internal identifier
    async fn find_all_by_issue_key(&self, issue_key: &str) -> Result<Vec<StoredEstimation>, AppError>;

    async fn ping(&self) -> Result<(), AppError>;
}

#[async_trait]
impl EstimationStore for MongoDB {
    async fn find_one(&self, issue_key: &str, user_name: &str) -> Result<Option<Document>, AppError> {
        let found = self
            .collection::<Document>(ESTIMATION_COLLECTION)
            .find_one(doc! { "issueKey": issue_key, "userName": user_name })
            .await?;
        Ok(found)
    }

    async fn insert_one(&self, record: Document) -> Result<(), AppError> {
        self.collection::<Document>(ESTIMATION_COLLECTION)
            .insert_one(record)
            .await?;
        Ok(())
    }

    async fn update_fields(&self, record_id: &ObjectId, fields: Document) -> Result<(), AppError> {
        self.collection::<Document>(ESTIMATION_COLLECTION)
            .update_one(doc! { "_id": *record_id }, doc! { "$set": fields })
            .await?;
        Ok(())
    }

    async fn find_all_by_issue_key(&self, issue_key: &str) -> Result<Vec<StoredEstimation>, AppError> {
        let mut cursor = self
            .collection::<Document>(ESTIMATION_COLLECTION)
            .find(doc! { "issueKey": issue_key })
            .projection(doc! { "_id": 0 })
            .await?;

        let mut records = Vec::new();
        while let Some(document) = cursor.try_next().await? {
            records.push(stored_estimation(document));
        }

        Ok(records)
    }

    async fn ping(&self) -> Result<(), AppError> {
        self.health_check().await?;
        Ok(())
    }
}
