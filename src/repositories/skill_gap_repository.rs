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
    models::domain::SkillGap,
};

#[async_trait]
pub trait SkillGapRepository: Send + Sync {
    /// Replaces the snapshot for the (user, topic) pair, inserting it when absent.
    async fn upsert(&self, gap: SkillGap) -> AppResult<SkillGap>;
    async fn find_by_user(&self, user_id: &str) -> AppResult<Vec<SkillGap>>;
    async fn ensure_indexes(&self) -> AppResult<()>;
}

pub struct MongoSkillGapRepository {
    collection: Collection<SkillGap>,
}

impl MongoSkillGapRepository {
    pub fn new(db: &Database) -> Self {
        let collection = db.get_collection(collections::SKILL_GAPS);
        Self { collection }
    }
}

#[async_trait]
impl SkillGapRepository for MongoSkillGapRepository {
    async fn upsert(&self, gap: SkillGap) -> AppResult<SkillGap> {
        let options = ReplaceOptions::builder().upsert(true).build();
        self.collection
            .replace_one(
                doc! { "user_id": &gap.user_id, "topic_id": &gap.topic_id },
                &gap,
            )
            .with_options(options)
            .await?;
        Ok(gap)
    }

    async fn find_by_user(&self, user_id: &str) -> AppResult<Vec<SkillGap>> {
        let cursor = self.collection.find(doc! { "user_id": user_id }).await?;
        let gaps: Vec<SkillGap> = cursor.try_collect().await?;
        Ok(gaps)
    }

    async fn ensure_indexes(&self) -> AppResult<()> {
        let options = IndexOptions::builder().unique(true).build();
        let model = IndexModel::builder()
            .keys(doc! { "user_id": 1, "topic_id": 1 })
            .options(options)
            .build();
        self.collection.create_index(model).await?;
        info!("Created unique index on skill_gaps.user_id/topic_id");
        Ok(())
    }
}
