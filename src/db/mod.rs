use std::time::Duration;

use mongodb::{
    bson::doc,
    options::{ClientOptions, ServerApi, ServerApiVersion},
    Client, Collection,
};

use crate::{config::Config, errors::AppResult};

/// Collection names, one per persisted record type.
pub mod collections {
    pub const USERS: &str = "users";
    pub const USER_PROFILES: &str = "user_profiles";
    pub const TOPICS: &str = "topics";
    pub const QUIZ_QUESTIONS: &str = "quiz_questions";
    pub const QUIZ_ATTEMPTS: &str = "quiz_attempts";
    pub const EXPLANATIONS: &str = "explanations";
    pub const TEACH_BACK_SUBMISSIONS: &str = "teach_back_submissions";
    pub const EMOTION_SESSIONS: &str = "emotion_sessions";
    pub const EXAM_READINESS_REPORTS: &str = "exam_readiness_reports";
    pub const SKILL_GAPS: &str = "skill_gaps";
    pub const REFRESH_TOKENS: &str = "refresh_tokens";
}

const APP_NAME: &str = "tutor-server";
const TIMEOUT: Duration = Duration::from_secs(5);

#[derive(Clone)]
pub struct Database {
    client: Client,
    db_name: String,
}

impl Database {
    /// Connects and pings before returning, so a bad connection string fails startup.
    pub async fn connect(config: &Config) -> AppResult<Self> {
        let mut options = ClientOptions::parse(&config.mongo_conn_string).await?;
        options.app_name = Some(APP_NAME.to_string());
        options.server_api = Some(ServerApi::builder().version(ServerApiVersion::V1).build());
        options.max_pool_size = Some(config.mongo_max_pool_size);
        options.min_pool_size = Some(config.mongo_min_pool_size.min(config.mongo_max_pool_size));
        options.connect_timeout = Some(TIMEOUT);
        options.server_selection_timeout = Some(TIMEOUT);

        let database = Self {
            client: Client::with_options(options)?,
            db_name: config.mongo_db_name.clone(),
        };
        database.health_check().await?;

        log::info!(
            "Connected to MongoDB database '{}' (pool {}..{})",
            database.db_name,
            config.mongo_min_pool_size,
            config.mongo_max_pool_size
        );
        Ok(database)
    }

    pub fn get_collection<T>(&self, name: &str) -> Collection<T>
    where
        T: Send + Sync,
    {
        self.client.database(&self.db_name).collection(name)
    }

    pub async fn health_check(&self) -> AppResult<()> {
        self.client
            .database("admin")
            .run_command(doc! { "ping": 1 })
            .await?;
        Ok(())
    }

    pub fn db_name(&self) -> &str {
        &self.db_name
    }
}
