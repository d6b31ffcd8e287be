//! Teach-back, emotion detection and exam readiness.

use actix_web::{post, web, HttpResponse};

use crate::{
    app_state::AppState,
    auth::AuthenticatedUser,
    errors::AppError,
    models::dto::request::{EmotionDetectRequest, ExamReadinessRequest, TeachBackRequest},
};

#[post("/api/teach-back")]
pub async fn teach_back(
    state: web::Data<AppState>,
    request: web::Json<TeachBackRequest>,
    auth: AuthenticatedUser,
) -> Result<HttpResponse, AppError> {
    let response = state
        .teach_back_service
        .submit(auth.user_id(), request.into_inner())
        .await?;
    Ok(HttpResponse::Ok().json(response))
}

#[post("/api/emotion/detect")]
pub async fn detect_emotion(
    state: web::Data<AppState>,
    request: web::Json<EmotionDetectRequest>,
    auth: AuthenticatedUser,
) -> Result<HttpResponse, AppError> {
    let response = state
        .emotion_service
        .detect(auth.user_id(), request.into_inner())
        .await?;
    Ok(HttpResponse::Ok().json(response))
}

#[post("/api/exam/readiness")]
pub async fn exam_readiness(
    state: web::Data<AppState>,
    request: web::Json<ExamReadinessRequest>,
    auth: AuthenticatedUser,
) -> Result<HttpResponse, AppError> {
    let response = state
        .readiness_service
        .readiness(auth.user_id(), request.into_inner())
        .await?;
    Ok(HttpResponse::Ok().json(response))
}
