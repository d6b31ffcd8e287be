use actix_web::{get, put, web, HttpResponse};

use crate::{
    app_state::AppState, auth::AuthenticatedUser, errors::AppError,
    models::dto::request::UpdateProfileRequest,
};

#[get("/api/profile")]
pub async fn get_profile(
    state: web::Data<AppState>,
    auth: AuthenticatedUser,
) -> Result<HttpResponse, AppError> {
    let profile = state.profile_service.get_profile(auth.user_id()).await?;
    Ok(HttpResponse::Ok().json(profile))
}

#[put("/api/profile")]
pub async fn update_profile(
    state: web::Data<AppState>,
    request: web::Json<UpdateProfileRequest>,
    auth: AuthenticatedUser,
) -> Result<HttpResponse, AppError> {
    let profile = state
        .profile_service
        .update_profile(auth.user_id(), request.into_inner())
        .await?;
    Ok(HttpResponse::Ok().json(profile))
}

#[get("/api/skills/gaps")]
pub async fn skill_gaps(
    state: web::Data<AppState>,
    auth: AuthenticatedUser,
) -> Result<HttpResponse, AppError> {
    let response = state.analytics_service.skill_gaps(auth.user_id()).await?;
    Ok(HttpResponse::Ok().json(response))
}

#[get("/api/dashboard")]
pub async fn dashboard(
    state: web::Data<AppState>,
    auth: AuthenticatedUser,
) -> Result<HttpResponse, AppError> {
    let response = state.dashboard_service.dashboard(auth.user_id()).await?;
    Ok(HttpResponse::Ok().json(response))
}
