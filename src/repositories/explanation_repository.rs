use async_trait::async_trait;
use futures::TryStreamExt;
use log::info;
use mongodb::{bson::doc, Collection, IndexModel};

use crate::{
    db::{collections, Database},
    errors::AppResult,
    models::domain::Explanation,
};

#[async_trait]
pub trait ExplanationRepository: Send + Sync {
    async fn create(&self, explanation: Explanation) -> AppResult<Explanation>;
    async fn latest_for_user_topic(
        &self,
        user_id: &str,
        topic_id: &str,
    ) -> AppResult<Option<Explanation>>;
    /// Newest first, at most `limit` entries.
    async fn recent_for_user(&self, user_id: &str, limit: usize) -> AppResult<Vec<Explanation>>;
    async fn ensure_indexes(&self) -> AppResult<()>;
}

pub struct MongoExplanationRepository {
    collection: Collection<Explanation>,
}

impl MongoExplanationRepository {
    pub fn new(db: &Database) -> Self {
        let collection = db.get_collection(collections::EXPLANATIONS);
        Self { collection }
    }
}

#[async_trait]
impl ExplanationRepository for MongoExplanationRepository {
    async fn create(&self, explanation: Explanation) -> AppResult<Explanation> {
        self.collection.insert_one(&explanation).await?;
        Ok(explanation)
    }

    async fn latest_for_user_topic(
        &self,
        user_id: &str,
        topic_id: &str,
    ) -> AppResult<Option<Explanation>> {
        let latest = self
            .collection
            .find_one(doc! { "user_id": user_id, "topic_id": topic_id })
            .sort(doc! { "created_at": -1 })
            .await?;
        Ok(latest)
    }

    async fn recent_for_user(&self, user_id: &str, limit: usize) -> AppResult<Vec<Explanation>> {
        // A zero limit means "no limit" to the server.
        if limit == 0 {
            return Ok(Vec::new());
        }
        let cursor = self
            .collection
            .find(doc! { "user_id": user_id })
            .sort(doc! { "created_at": -1 })
            .limit(i64::try_from(limit).unwrap_or(i64::MAX))
            .await?;
        Ok(cursor.try_collect().await?)
    }

    async fn ensure_indexes(&self) -> AppResult<()> {
        let by_topic = IndexModel::builder()
            .keys(doc! { "user_id": 1, "topic_id": 1, "created_at": -1 })
            .build();
        let by_user = IndexModel::builder()
            .keys(doc! { "user_id": 1, "created_at": -1 })
            .build();
        self.collection.create_indexes([by_topic, by_user]).await?;
        info!("Created indexes on explanations (user_id/topic_id/created_at, user_id/created_at)");
        Ok(())
    }
}
