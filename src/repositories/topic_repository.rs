use async_trait::async_trait;
use futures::TryStreamExt;
use log::info;
use mongodb::{bson::doc, options::IndexOptions, Collection, IndexModel};

use crate::{
    db::{collections, Database},
    errors::AppResult,
    models::domain::Topic,
};

#[async_trait]
pub trait TopicRepository: Send + Sync {
    async fn create(&self, topic: Topic) -> AppResult<Topic>;
    async fn find_by_id(&self, id: &str) -> AppResult<Option<Topic>>;
    async fn find_by_name(&self, name: &str) -> AppResult<Option<Topic>>;
    /// All topics ordered by name.
    async fn find_all(&self) -> AppResult<Vec<Topic>>;
    async fn ensure_indexes(&self) -> AppResult<()>;
}

pub struct MongoTopicRepository {
    collection: Collection<Topic>,
}

impl MongoTopicRepository {
    pub fn new(db: &Database) -> Self {
        let collection = db.get_collection(collections::TOPICS);
        Self { collection }
    }
}

#[async_trait]
impl TopicRepository for MongoTopicRepository {
    async fn create(&self, topic: Topic) -> AppResult<Topic> {
        self.collection.insert_one(&topic).await?;
        Ok(topic)
    }

    async fn find_by_id(&self, id: &str) -> AppResult<Option<Topic>> {
        let topic = self.collection.find_one(doc! { "id": id }).await?;
        Ok(topic)
    }

    async fn find_by_name(&self, name: &str) -> AppResult<Option<Topic>> {
        let topic = self.collection.find_one(doc! { "name": name }).await?;
        Ok(topic)
    }

    async fn find_all(&self) -> AppResult<Vec<Topic>> {
        let cursor = self
            .collection
            .find(doc! {})
            .sort(doc! { "name": 1 })
            .await?;
        let topics: Vec<Topic> = cursor.try_collect().await?;
        Ok(topics)
    }

    async fn ensure_indexes(&self) -> AppResult<()> {
        for field in ["id", "name"] {
            let options = IndexOptions::builder().unique(true).build();
            let model = IndexModel::builder()
                .keys(doc! { field: 1 })
                .options(options)
                .build();
            self.collection.create_index(model).await?;
            info!("Created unique index on topics.{}", field);
        }
        Ok(())
    }
}
