use actix_cors::Cors;
use actix_web::{http::header, middleware::Logger, web, App, HttpServer};

use tutor_server::{
    app_state::AppState,
    config::Config,
    handlers,
    middleware::{RequestIdMiddleware, REQUEST_ID_HEADER},
};

#[actix_web::main]
async fn main() -> std::io::Result<()> {
    dotenvy::dotenv().ok();
    env_logger::init_from_env(env_logger::Env::default().default_filter_or("info"));

    let config = Config::from_env();
    if config.is_production() {
        config.validate_for_production();
    }

    let host = config.web_server_host.clone();
    let port = config.web_server_port;
    let allowed_origin = config.cors_allowed_origin.clone();
    let max_image_bytes = config.max_image_bytes;

    let state = AppState::new(config)
        .await
        .map_err(|e| std::io::Error::other(e.to_string()))?;
    let jwt_service = web::Data::new(state.jwt_service.clone());
    let state = web::Data::new(state);

    log::info!("Starting HTTP server on {}:{}", host, port);

    HttpServer::new(move || {
        let cors = Cors::default()
            .allowed_origin(&allowed_origin)
            .allowed_methods(vec!["GET", "POST", "PUT", "OPTIONS"])
            .allowed_headers(vec![header::AUTHORIZATION, header::CONTENT_TYPE, header::ACCEPT])
            .expose_headers(vec![header::HeaderName::from_static(REQUEST_ID_HEADER)])
            .max_age(3600);

        App::new()
            .app_data(state.clone())
            .app_data(jwt_service.clone())
            .wrap(Logger::new("%a \"%r\" %s %b %Dms request_id=%{x-request-id}o"))
            .wrap(RequestIdMiddleware)
            .wrap(cors)
            .configure(handlers::configure(max_image_bytes))
    })
    .bind((host.as_str(), port))?
    .run()
    .await
}
