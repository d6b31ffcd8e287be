use async_trait::async_trait;
use log::info;
use mongodb::{
    bson::doc,
    options::{IndexOptions, ReplaceOptions},
    Collection, IndexModel,
};

use crate::{
    db::{collections, Database},
    errors::AppResult,
    models::domain::UserProfile,
};

#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait UserProfileRepository: Send + Sync {
    async fn find_by_user(&self, user_id: &str) -> AppResult<Option<UserProfile>>;
    /// Inserts or replaces the profile keyed by its user id.
    async fn upsert(&self, profile: UserProfile) -> AppResult<UserProfile>;
    async fn ensure_indexes(&self) -> AppResult<()>;
}

pub struct MongoUserProfileRepository {
    collection: Collection<UserProfile>,
}

impl MongoUserProfileRepository {
    pub fn new(db: &Database) -> Self {
        let collection = db.get_collection(collections::USER_PROFILES);
        Self { collection }
    }
}

#[async_trait]
impl UserProfileRepository for MongoUserProfileRepository {
    async fn find_by_user(&self, user_id: &str) -> AppResult<Option<UserProfile>> {
        let profile = self
            .collection
            .find_one(doc! { "user_id": user_id })
            .await?;
        Ok(profile)
    }

    async fn upsert(&self, profile: UserProfile) -> AppResult<UserProfile> {
        let options = ReplaceOptions::builder().upsert(true).build();
        self.collection
            .replace_one(doc! { "user_id": &profile.user_id }, &profile)
            .with_options(options)
            .await?;
        Ok(profile)
    }

    async fn ensure_indexes(&self) -> AppResult<()> {
        let options = IndexOptions::builder().unique(true).build();
        let model = IndexModel::builder()
            .keys(doc! { "user_id": 1 })
            .options(options)
            .build();
        self.collection.create_index(model).await?;
        info!("Created unique index on user_profiles.user_id");
        Ok(())
    }
}
