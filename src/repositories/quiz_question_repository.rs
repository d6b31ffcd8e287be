use async_trait::async_trait;
use futures::TryStreamExt;
use log::info;
use mongodb::{
    bson::doc,
    options::{IndexOptions, ReplaceOptions},
    Collection, IndexModel,
};

use crate::{
    db::{collections, Database},
    errors::AppResult,
    models::domain::QuizQuestion,
};

#[async_trait]
pub trait QuizQuestionRepository: Send + Sync {
    async fn find_by_id(&self, id: &str) -> AppResult<Option<QuizQuestion>>;
    async fn find_by_topic(&self, topic_id: &str) -> AppResult<Vec<QuizQuestion>>;
    /// Inserts or replaces the question keyed by its id.
    async fn upsert(&self, question: QuizQuestion) -> AppResult<QuizQuestion>;
    async fn ensure_indexes(&self) -> AppResult<()>;
}

pub struct MongoQuizQuestionRepository {
    collection: Collection<QuizQuestion>,
}

impl MongoQuizQuestionRepository {
    pub fn new(db: &Database) -> Self {
        let collection = db.get_collection(collections::QUIZ_QUESTIONS);
        Self { collection }
    }
}

#[async_trait]
impl QuizQuestionRepository for MongoQuizQuestionRepository {
    async fn find_by_id(&self, id: &str) -> AppResult<Option<QuizQuestion>> {
        let question = self.collection.find_one(doc! { "id": id }).await?;
        Ok(question)
    }

    async fn find_by_topic(&self, topic_id: &str) -> AppResult<Vec<QuizQuestion>> {
        let cursor = self
            .collection
            .find(doc! { "topic_id": topic_id })
            .sort(doc! { "id": 1 })
            .await?;
        let questions: Vec<QuizQuestion> = cursor.try_collect().await?;
        Ok(questions)
    }

    async fn upsert(&self, question: QuizQuestion) -> AppResult<QuizQuestion> {
        let options = ReplaceOptions::builder().upsert(true).build();
        self.collection
            .replace_one(doc! { "id": &question.id }, &question)
            .with_options(options)
            .await?;
        Ok(question)
    }

    async fn ensure_indexes(&self) -> AppResult<()> {
        let options = IndexOptions::builder().unique(true).build();
        let id_model = IndexModel::builder()
            .keys(doc! { "id": 1 })
            .options(options)
            .build();
        self.collection.create_index(id_model).await?;
        info!("Created unique index on quiz_questions.id");

        let topic_model = IndexModel::builder()
            .keys(doc! { "topic_id": 1, "difficulty_level": 1 })
            .build();
        self.collection.create_index(topic_model).await?;
        info!("Created index on quiz_questions.topic_id");
        Ok(())
    }
}
