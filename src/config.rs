use std::env;
use secrecy::SecretString;

const DEFAULT_JWT_SECRET: &str = "dev_secret_key_change_in_production";

#[derive(Clone, Debug)]
pub struct Config {
    pub app_env: String,
    pub mongo_conn_string: String,
    pub mongo_db_name: String,
    pub mongo_min_pool_size: u32,
    pub mongo_max_pool_size: u32,
    pub web_server_host: String,
    pub web_server_port: u16,
    pub cors_allowed_origin: String,
    pub jwt_secret: SecretString,
    pub jwt_expiration_hours: i64,
    pub refresh_token_expiration_hours: i64,
    pub bcrypt_cost: u32,
    pub hf_api_key: Option<SecretString>,
    pub hf_inference_base_url: String,
    pub llm_api_base: String,
    pub llm_model: String,
    pub emotion_model: String,
    pub max_image_bytes: usize,
    pub quiz_promotion_streak: usize,
    pub seed_catalog: Option<String>,
}

impl Config {
    pub fn from_env() -> Self {
        Self {
            app_env: env::var("APP_ENV").unwrap_or_else(|_| "development".to_string()),
            mongo_conn_string: env::var("MONGO_CONN_STRING")
                .unwrap_or_else(|_| "mongodb://localhost:27017".to_string()),
            mongo_db_name: env::var("MONGO_DB_NAME").unwrap_or_else(|_| "tutor-local".to_string()),
            mongo_min_pool_size: parse_var("MONGO_MIN_POOL_SIZE", 2),
            mongo_max_pool_size: parse_var("MONGO_MAX_POOL_SIZE", 10),
            web_server_host: env::var("WEB_SERVER_HOST")
                .unwrap_or_else(|_| "localhost".to_string()),
            web_server_port: parse_var("WEB_SERVER_PORT", 8000),
            cors_allowed_origin: env::var("CORS_ALLOWED_ORIGIN")
                .unwrap_or_else(|_| "http://localhost:3000".to_string()),
            jwt_secret: SecretString::from(
                env::var("JWT_SECRET").unwrap_or_else(|_| DEFAULT_JWT_SECRET.to_string()),
            ),
            jwt_expiration_hours: parse_var("JWT_EXPIRATION_HOURS", 1),
            refresh_token_expiration_hours: parse_var("REFRESH_TOKEN_EXPIRATION_HOURS", 168),
            bcrypt_cost: parse_var("BCRYPT_COST", bcrypt::DEFAULT_COST),
            hf_api_key: env::var("HUGGINGFACE_API_KEY")
                .ok()
                .filter(|key| !key.trim().is_empty())
                .map(SecretString::from),
            hf_inference_base_url: env::var("HF_INFERENCE_BASE_URL")
                .unwrap_or_else(|_| "https://api-inference.huggingface.co/models".to_string()),
            llm_api_base: env::var("LLM_API_BASE")
                .unwrap_or_else(|_| "https://router.huggingface.co/v1".to_string()),
            llm_model: env::var("LLM_MODEL")
                .unwrap_or_else(|_| "meta-llama/Llama-3.1-8B-Instruct".to_string()),
            emotion_model: env::var("EMOTION_MODEL")
                .unwrap_or_else(|_| "trpakov/vit-face-expression".to_string()),
            max_image_bytes: parse_var("MAX_IMAGE_BYTES", 5 * 1024 * 1024),
            quiz_promotion_streak: parse_var("QUIZ_PROMOTION_STREAK", 1usize).max(1),
            seed_catalog: env::var("SEED_CATALOG").ok().filter(|p| !p.trim().is_empty()),
        }
    }

    pub fn is_production(&self) -> bool {
        self.app_env.eq_ignore_ascii_case("production")
    }

    /// Validate that production-critical configuration is set
    /// Panics if required secrets are using default values
    pub fn validate_for_production(&self) {
        use secrecy::ExposeSecret;

        let jwt_secret = self.jwt_secret.expose_secret();

        if jwt_secret == DEFAULT_JWT_SECRET {
            panic!(
                "FATAL: JWT_SECRET is using default value! Set JWT_SECRET environment variable to a secure random string."
            );
        }

        if jwt_secret.len() < 32 {
            panic!(
                "FATAL: JWT_SECRET is too short ({}). Must be at least 32 characters for security.",
                jwt_secret.len()
            );
        }

        if self.hf_api_key.is_none() {
            log::warn!("HUGGINGFACE_API_KEY is not set; explanations and teach-back use local fallbacks and emotion detection is disabled");
        }
    }

    /// Cheap settings for unit and integration tests. No provider key is set.
    pub fn test_config() -> Self {
        Self {
            app_env: "test".to_string(),
            mongo_conn_string: "mongodb://localhost:27017".to_string(),
            mongo_db_name: "tutor-test".to_string(),
            mongo_min_pool_size: 1,
            mongo_max_pool_size: 4,
            web_server_host: "127.0.0.1".to_string(),
            web_server_port: 8000,
            cors_allowed_origin: "http://localhost:3000".to_string(),
            jwt_secret: SecretString::from("test_jwt_secret_key".to_string()),
            jwt_expiration_hours: 1,
            refresh_token_expiration_hours: 24,
            bcrypt_cost: 4,
            hf_api_key: None,
            hf_inference_base_url: "http://localhost:9".to_string(),
            llm_api_base: "http://localhost:9/v1".to_string(),
            llm_model: "test-model".to_string(),
            emotion_model: "test-emotion-model".to_string(),
            max_image_bytes: 1024,
            quiz_promotion_streak: 1,
            seed_catalog: None,
        }
    }
}

fn parse_var<T: std::str::FromStr>(name: &str, default: T) -> T {
    env::var(name)
        .ok()
        .and_then(|value| value.trim().parse().ok())
        .unwrap_or(default)
}
