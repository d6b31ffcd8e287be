use async_trait::async_trait;
use futures::TryStreamExt;
use log::info;
use mongodb::{bson::doc, Collection, IndexModel};

use crate::{
    db::{collections, Database},
    errors::AppResult,
    models::domain::QuizAttempt,
};

/// Append-only attempt log. Reads return newest first.
#[async_trait]
pub trait QuizAttemptRepository: Send + Sync {
    async fn create(&self, attempt: QuizAttempt) -> AppResult<QuizAttempt>;
    async fn find_by_user(&self, user_id: &str) -> AppResult<Vec<QuizAttempt>>;
    async fn find_by_user_and_topic(
        &self,
        user_id: &str,
        topic_id: &str,
    ) -> AppResult<Vec<QuizAttempt>>;
    async fn ensure_indexes(&self) -> AppResult<()>;
}

pub struct MongoQuizAttemptRepository {
    collection: Collection<QuizAttempt>,
}

impl MongoQuizAttemptRepository {
    pub fn new(db: &Database) -> Self {
        let collection = db.get_collection(collections::QUIZ_ATTEMPTS);
        Self { collection }
    }

    async fn find_newest_first(
        &self,
        filter: mongodb::bson::Document,
    ) -> AppResult<Vec<QuizAttempt>> {
        let cursor = self
            .collection
            .find(filter)
            .sort(doc! { "created_at": -1 })
            .await?;
        Ok(cursor.try_collect().await?)
    }
}

#[async_trait]
impl QuizAttemptRepository for MongoQuizAttemptRepository {
    async fn create(&self, attempt: QuizAttempt) -> AppResult<QuizAttempt> {
        self.collection.insert_one(&attempt).await?;
        Ok(attempt)
    }

    async fn find_by_user(&self, user_id: &str) -> AppResult<Vec<QuizAttempt>> {
        self.find_newest_first(doc! { "user_id": user_id }).await
    }

    async fn find_by_user_and_topic(
        &self,
        user_id: &str,
        topic_id: &str,
    ) -> AppResult<Vec<QuizAttempt>> {
        self.find_newest_first(doc! { "user_id": user_id, "topic_id": topic_id })
            .await
    }

    async fn ensure_indexes(&self) -> AppResult<()> {
        let by_topic = IndexModel::builder()
            .keys(doc! { "user_id": 1, "topic_id": 1, "created_at": -1 })
            .build();
        let by_user = IndexModel::builder()
            .keys(doc! { "user_id": 1, "created_at": -1 })
            .build();
        self.collection.create_indexes([by_topic, by_user]).await?;
        info!("Created indexes on quiz_attempts (user_id/topic_id/created_at, user_id/created_at)");
        Ok(())
    }
}
