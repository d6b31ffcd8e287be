use async_trait::async_trait;
use log::info;
use mongodb::{
    bson::{doc, DateTime as BsonDateTime},
    options::IndexOptions,
    Collection, IndexModel,
};

use crate::{
    db::{collections, Database},
    errors::AppResult,
    models::domain::RefreshToken,
};

#[async_trait]
pub trait RefreshTokenRepository: Send + Sync {
    async fn create(&self, token: RefreshToken) -> AppResult<RefreshToken>;
    async fn find_by_token_hash(&self, hash: &str) -> AppResult<Option<RefreshToken>>;
    /// Atomically revokes a live token owned by `user_id` and returns it.
    /// `None` when the token is unknown, revoked, expired or owned by someone else,
    /// so a token can be rotated at most once.
    async fn consume(&self, hash: &str, user_id: &str) -> AppResult<Option<RefreshToken>>;
    /// Returns whether a stored token matched.
    async fn revoke(&self, hash: &str) -> AppResult<bool>;
    async fn delete_expired(&self) -> AppResult<u64>;
    async fn ensure_indexes(&self) -> AppResult<()>;
}

pub struct MongoRefreshTokenRepository {
    collection: Collection<RefreshToken>,
}

impl MongoRefreshTokenRepository {
    pub fn new(db: &Database) -> Self {
        Self {
            collection: db.get_collection(collections::REFRESH_TOKENS),
        }
    }
}

#[async_trait]
impl RefreshTokenRepository for MongoRefreshTokenRepository {
    async fn create(&self, token: RefreshToken) -> AppResult<RefreshToken> {
        self.collection.insert_one(&token).await?;
        Ok(token)
    }

    async fn find_by_token_hash(&self, hash: &str) -> AppResult<Option<RefreshToken>> {
        Ok(self.collection.find_one(doc! { "token_hash": hash }).await?)
    }

    async fn consume(&self, hash: &str, user_id: &str) -> AppResult<Option<RefreshToken>> {
        let filter = doc! {
            "token_hash": hash,
            "user_id": user_id,
            "revoked": false,
            "expires_at": { "$gt": BsonDateTime::now() },
        };
        let consumed = self
            .collection
            .find_one_and_update(filter, doc! { "$set": { "revoked": true } })
            .await?;
        Ok(consumed)
    }

    async fn revoke(&self, hash: &str) -> AppResult<bool> {
        let result = self
            .collection
            .update_one(doc! { "token_hash": hash }, doc! { "$set": { "revoked": true } })
            .await?;
        Ok(result.matched_count > 0)
    }

    async fn delete_expired(&self) -> AppResult<u64> {
        let result = self
            .collection
            .delete_many(doc! { "expires_at": { "$lt": BsonDateTime::now() } })
            .await?;
        Ok(result.deleted_count)
    }

    async fn ensure_indexes(&self) -> AppResult<()> {
        let unique_hash = IndexModel::builder()
            .keys(doc! { "token_hash": 1 })
            .options(IndexOptions::builder().unique(true).build())
            .build();
        let by_user = IndexModel::builder().keys(doc! { "user_id": 1 }).build();
        let by_expiry = IndexModel::builder().keys(doc! { "expires_at": 1 }).build();

        self.collection
            .create_indexes([unique_hash, by_user, by_expiry])
            .await?;
        info!("Created indexes on refresh_tokens (token_hash unique, user_id, expires_at)");
        Ok(())
    }
}
