use actix_web::{get, post, web, HttpResponse};

use crate::{
    app_state::AppState, auth::AuthenticatedUser, errors::AppError,
    models::dto::request::ExplainTopicRequest,
};

#[get("/api/topics")]
pub async fn list_topics(state: web::Data<AppState>) -> Result<HttpResponse, AppError> {
    let topics = state.topic_service.list_topics().await?;
    Ok(HttpResponse::Ok().json(topics))
}

#[get("/api/topics/{id}")]
pub async fn get_topic(
    state: web::Data<AppState>,
    id: web::Path<String>,
) -> Result<HttpResponse, AppError> {
    let topic = state.topic_service.get_topic(&id).await?;
    Ok(HttpResponse::Ok().json(topic))
}

#[post("/api/topics/explain")]
pub async fn explain_topic(
    state: web::Data<AppState>,
    request: web::Json<ExplainTopicRequest>,
    auth: AuthenticatedUser,
) -> Result<HttpResponse, AppError> {
    let response = state
        .topic_service
        .explain(auth.user_id(), request.into_inner())
        .await?;
    Ok(HttpResponse::Ok().json(response))
}
