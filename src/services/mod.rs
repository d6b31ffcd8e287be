pub mod analytics_service;
pub mod auth_service;
pub mod dashboard_service;
pub mod difficulty_stepper;
pub mod emotion_classifier;
pub mod emotion_service;
pub mod explainer;
pub mod model_service;
pub mod profile_service;
pub mod quiz_service;
pub mod readiness_service;
pub mod teach_back_scorer;
pub mod teach_back_service;
pub mod topic_service;
