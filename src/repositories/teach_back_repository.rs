use async_trait::async_trait;
use futures::TryStreamExt;
use mongodb::{bson::doc, Collection};

use crate::{
    db::{collections, Database},
    errors::AppResult,
    models::domain::TeachBackSubmission,
};

#[async_trait]
pub trait TeachBackRepository: Send + Sync {
    async fn create(&self, submission: TeachBackSubmission) -> AppResult<TeachBackSubmission>;
    async fn find_by_user(&self, user_id: &str) -> AppResult<Vec<TeachBackSubmission>>;
}

pub struct MongoTeachBackRepository {
    collection: Collection<TeachBackSubmission>,
}

impl MongoTeachBackRepository {
    pub fn new(db: &Database) -> Self {
        let collection = db.get_collection(collections::TEACH_BACK_SUBMISSIONS);
        Self { collection }
    }
}

#[async_trait]
impl TeachBackRepository for MongoTeachBackRepository {
    async fn create(&self, submission: TeachBackSubmission) -> AppResult<TeachBackSubmission> {
        self.collection.insert_one(&submission).await?;
        Ok(submission)
    }

    async fn find_by_user(&self, user_id: &str) -> AppResult<Vec<TeachBackSubmission>> {
        let cursor = self.collection.find(doc! { "user_id": user_id }).await?;
        let submissions: Vec<TeachBackSubmission> = cursor.try_collect().await?;
        Ok(submissions)
    }
}
