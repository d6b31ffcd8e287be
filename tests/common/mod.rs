#![allow(dead_code)]

use actix_web::{
    body::MessageBody,
    dev::{ServiceFactory, ServiceRequest, ServiceResponse},
    test, web, App, Error,
};
use serde_json::{json, Value};

use tutor_server::{
    app_state::{AppState, Providers},
    config::Config,
    handlers,
    middleware::RequestIdMiddleware,
    models::domain::{Difficulty, QuestionType, QuizOption, QuizQuestion, Topic},
    repositories::Repositories,
};

pub struct TestContext {
    pub state: AppState,
    pub repositories: Repositories,
}

impl TestContext {
    pub fn new() -> Self {
        Self::with_providers(Providers::offline())
    }

    pub fn with_providers(providers: Providers) -> Self {
        Self::with_config(Config::test_config(), providers)
    }

    pub fn with_config(config: Config, providers: Providers) -> Self {
        let repositories = Repositories::in_memory();
        let state = AppState::from_parts(config, repositories.clone(), providers);
        Self { state, repositories }
    }

    pub fn app(
        &self,
    ) -> App<
        impl ServiceFactory<
            ServiceRequest,
            Config = (),
            Response = ServiceResponse<impl MessageBody>,
            Error = Error,
            InitError = (),
        >,
    > {
        App::new()
            .app_data(web::Data::new(self.state.clone()))
            .app_data(web::Data::new(self.state.jwt_service.clone()))
            .wrap(RequestIdMiddleware)
            .configure(handlers::configure(self.state.config.max_image_bytes))
    }

    pub async fn seed_topic(&self, name: &str) -> Topic {
        self.repositories
            .topics
            .create(Topic::new(
                name,
                &format!("{} fundamentals", name),
                "Programming",
                Difficulty::BEGINNER,
            ))
            .await
            .unwrap()
    }

    pub async fn seed_question(&self, id: &str, topic_id: &str, level: u8) -> QuizQuestion {
        let difficulty_level = Difficulty::new(level).unwrap();
        self.repositories
            .questions
            .upsert(QuizQuestion {
                id: id.to_string(),
                topic_id: topic_id.to_string(),
                question_text: format!("Question {}", id),
                question_type: QuestionType::MultipleChoice,
                difficulty_level,
                points: i32::from(level),
                options: vec![
                    QuizOption::new("Right", true),
                    QuizOption::new("Wrong", false),
                ],
            })
            .await
            .unwrap()
    }
}

pub fn register_body(username: &str) -> Value {
    json!({
        "username": username,
        "email": format!("{}@example.com", username),
        "password": "supersecret",
        "password_confirm": "supersecret",
        "first_name": "Test",
        "last_name": "Learner"
    })
}

pub fn register_request(username: &str) -> test::TestRequest {
    test::TestRequest::post()
        .uri("/api/auth/register")
        .set_json(register_body(username))
}

/// Authorization header built from a register or login response body.
pub fn bearer(body: &Value) -> (&'static str, String) {
    let token = body["tokens"]["access"].as_str().unwrap_or_default();
    ("Authorization", format!("Bearer {}", token))
}
