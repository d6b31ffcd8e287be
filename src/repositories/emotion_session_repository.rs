use async_trait::async_trait;
use futures::TryStreamExt;
use mongodb::{bson::doc, Collection};

use crate::{
    db::{collections, Database},
    errors::AppResult,
    models::domain::EmotionSession,
};

#[async_trait]
pub trait EmotionSessionRepository: Send + Sync {
    async fn create(&self, session: EmotionSession) -> AppResult<EmotionSession>;
    async fn find_by_user(&self, user_id: &str) -> AppResult<Vec<EmotionSession>>;
}

pub struct MongoEmotionSessionRepository {
    collection: Collection<EmotionSession>,
}

impl MongoEmotionSessionRepository {
    pub fn new(db: &Database) -> Self {
        let collection = db.get_collection(collections::EMOTION_SESSIONS);
        Self { collection }
    }
}

#[async_trait]
impl EmotionSessionRepository for MongoEmotionSessionRepository {
    async fn create(&self, session: EmotionSession) -> AppResult<EmotionSession> {
        self.collection.insert_one(&session).await?;
        Ok(session)
    }

    async fn find_by_user(&self, user_id: &str) -> AppResult<Vec<EmotionSession>> {
        let cursor = self.collection.find(doc! { "user_id": user_id }).await?;
        let sessions: Vec<EmotionSession> = cursor.try_collect().await?;
        Ok(sessions)
    }
}
