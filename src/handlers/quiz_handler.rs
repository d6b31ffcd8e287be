use actix_web::{get, post, web, HttpResponse};

use crate::{
    app_state::AppState,
    auth::AuthenticatedUser,
    errors::AppError,
    models::dto::request::{AdaptiveQuizQuery, SubmitAnswerRequest},
};

#[get("/api/quiz/adaptive")]
pub async fn get_adaptive_questions(
    state: web::Data<AppState>,
    query: web::Query<AdaptiveQuizQuery>,
    auth: AuthenticatedUser,
) -> Result<HttpResponse, AppError> {
    let response = state
        .quiz_service
        .next_questions(auth.user_id(), query.into_inner())
        .await?;
    Ok(HttpResponse::Ok().json(response))
}

#[post("/api/quiz/adaptive")]
pub async fn submit_answer(
    state: web::Data<AppState>,
    request: web::Json<SubmitAnswerRequest>,
    auth: AuthenticatedUser,
) -> Result<HttpResponse, AppError> {
    let response = state
        .quiz_service
        .submit_answer(auth.user_id(), request.into_inner())
        .await?;
    Ok(HttpResponse::Ok().json(response))
}
