pub mod auth_handler;
pub mod health_handler;
pub mod learning_handler;
pub mod profile_handler;
pub mod quiz_handler;
pub mod topic_handler;

use actix_web::{
    error::{JsonPayloadError, QueryPayloadError},
    web, HttpRequest,
};

use crate::errors::AppError;

fn json_error_handler(err: JsonPayloadError, _req: &HttpRequest) -> actix_web::Error {
    AppError::ValidationError(format!("Invalid request body: {}", err)).into()
}

fn query_error_handler(err: QueryPayloadError, _req: &HttpRequest) -> actix_web::Error {
    AppError::ValidationError(format!("Invalid query parameters: {}", err)).into()
}

/// JSON body limit that still admits a base64 image of `max_image_bytes`
/// wrapped in a data URL and the other request fields.
pub fn json_body_limit(max_image_bytes: usize) -> usize {
    max_image_bytes.div_ceil(3) * 4 + 64 * 1024
}

/// Registers every route plus the extractor error handlers.
pub fn configure(max_image_bytes: usize) -> impl FnOnce(&mut web::ServiceConfig) {
    move |cfg: &mut web::ServiceConfig| routes(cfg, json_body_limit(max_image_bytes))
}

fn routes(cfg: &mut web::ServiceConfig, json_limit: usize) {
    cfg.app_data(
        web::JsonConfig::default()
            .limit(json_limit)
            .error_handler(json_error_handler),
    )
    .app_data(web::QueryConfig::default().error_handler(query_error_handler))
    .service(health_handler::health_check)
    .service(health_handler::health_check_live)
    .service(health_handler::health_check_ready)
    .service(auth_handler::register)
    .service(auth_handler::login)
    .service(auth_handler::refresh)
    .service(auth_handler::logout)
    .service(topic_handler::list_topics)
    .service(topic_handler::explain_topic)
    .service(topic_handler::get_topic)
    .service(quiz_handler::get_adaptive_questions)
    .service(quiz_handler::submit_answer)
    .service(learning_handler::teach_back)
    .service(learning_handler::detect_emotion)
    .service(learning_handler::exam_readiness)
    .service(profile_handler::get_profile)
    .service(profile_handler::update_profile)
    .service(profile_handler::skill_gaps)
    .service(profile_handler::dashboard);
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn json_limit_covers_base64_growth() {
        let max = 5 * 1024 * 1024;
        assert!(json_body_limit(max) > max * 4 / 3);
        assert_eq!(json_body_limit(3), 4 + 64 * 1024);
        assert_eq!(json_body_limit(0), 64 * 1024);
    }
}
