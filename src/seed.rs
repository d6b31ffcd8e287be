//! Loads reference topics and quiz questions from a JSON catalog.
//!
//! Topics match on name and questions on id, so loading the same catalog
//! twice leaves the database unchanged.

use std::{path::Path, sync::Arc};

use serde::Deserialize;

use crate::{
    errors::{AppError, AppResult},
    models::domain::{Difficulty, QuestionType, QuizOption, QuizQuestion, Topic},
    repositories::{QuizQuestionRepository, TopicRepository},
};

#[derive(Debug, Deserialize)]
pub struct Catalog {
    pub topics: Vec<CatalogTopic>,
}

#[derive(Debug, Deserialize)]
pub struct CatalogTopic {
    pub name: String,
    #[serde(default)]
    pub description: String,
    #[serde(default = "default_category")]
    pub category: String,
    #[serde(default)]
    pub difficulty_level: Difficulty,
    #[serde(default)]
    pub questions: Vec<CatalogQuestion>,
}

#[derive(Debug, Deserialize)]
pub struct CatalogQuestion {
    pub id: String,
    pub question_text: String,
    pub question_type: QuestionType,
    pub difficulty_level: Difficulty,
    #[serde(default = "default_points")]
    pub points: i32,
    pub options: Vec<QuizOption>,
}

fn default_category() -> String {
    "General".to_string()
}

fn default_points() -> i32 {
    1
}

#[derive(Debug, Default, PartialEq, Eq)]
pub struct SeedSummary {
    pub topics_created: usize,
    pub questions_upserted: usize,
}

pub async fn load_catalog(path: impl AsRef<Path>) -> AppResult<Catalog> {
    let path = path.as_ref();
    let raw = tokio::fs::read_to_string(path).await.map_err(|e| {
        AppError::InternalError(format!("Failed to read catalog {}: {}", path.display(), e))
    })?;
    parse_catalog(&raw)
}

pub fn parse_catalog(raw: &str) -> AppResult<Catalog> {
    let catalog: Catalog = serde_json::from_str(raw)?;
    for topic in &catalog.topics {
        for question in &topic.questions {
            if question.points < 1 {
                return Err(AppError::ValidationError(format!(
                    "Question '{}' must be worth at least one point",
                    question.id
                )));
            }
            if question.correct_count() == 0 {
                return Err(AppError::ValidationError(format!(
                    "Question '{}' has no correct option",
                    question.id
                )));
            }
        }
    }
    Ok(catalog)
}

impl CatalogQuestion {
    fn correct_count(&self) -> usize {
        self.options.iter().filter(|o| o.is_correct).count()
    }
}

pub async fn apply_catalog(
    catalog: Catalog,
    topics: &Arc<dyn TopicRepository>,
    questions: &Arc<dyn QuizQuestionRepository>,
) -> AppResult<SeedSummary> {
    let mut summary = SeedSummary::default();

    for entry in catalog.topics {
        let topic = match topics.find_by_name(&entry.name).await? {
            Some(topic) => topic,
            None => {
                summary.topics_created += 1;
                topics
                    .create(Topic::new(
                        &entry.name,
                        &entry.description,
                        &entry.category,
                        entry.difficulty_level,
                    ))
                    .await?
            }
        };

        for question in entry.questions {
            questions
                .upsert(QuizQuestion {
                    id: question.id,
                    topic_id: topic.id.clone(),
                    question_text: question.question_text,
                    question_type: question.question_type,
                    difficulty_level: question.difficulty_level,
                    points: question.points,
                    options: question.options,
                })
                .await?;
            summary.questions_upserted += 1;
        }
    }

    log::info!(
        "Seed catalog applied: {} topics created, {} questions upserted",
        summary.topics_created,
        summary.questions_upserted
    );
    Ok(summary)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::repositories::Repositories;

    const CATALOG: &str = r#"{
        "topics": [{
            "name": "Rust",
            "description": "Systems programming",
            "difficulty_level": 2,
            "questions": [{
                "id": "rust-1",
                "question_text": "Which keyword makes a binding mutable?",
                "question_type": "multiple_choice",
                "difficulty_level": 1,
                "options": [
                    {"id": "rust-1-a", "option_text": "mut", "is_correct": true},
                    {"id": "rust-1-b", "option_text": "var", "is_correct": false}
                ]
            }]
        }]
    }"#;

    #[test]
    fn parse_applies_defaults() {
        let catalog = parse_catalog(CATALOG).unwrap();
        let topic = &catalog.topics[0];
        assert_eq!(topic.category, "General");
        assert_eq!(topic.difficulty_level, Difficulty::INTERMEDIATE);
        assert_eq!(topic.questions[0].points, 1);
    }

    #[test]
    fn parse_rejects_question_without_correct_option() {
        let raw = CATALOG.replace(r#""is_correct": true"#, r#""is_correct": false"#);
        assert!(matches!(parse_catalog(&raw), Err(AppError::ValidationError(_))));
    }

    #[tokio::test]
    async fn applying_twice_is_idempotent() {
        let store = Repositories::in_memory();

        let first = apply_catalog(parse_catalog(CATALOG).unwrap(), &store.topics, &store.questions)
            .await
            .unwrap();
        let second = apply_catalog(parse_catalog(CATALOG).unwrap(), &store.topics, &store.questions)
            .await
            .unwrap();

        assert_eq!(first.topics_created, 1);
        assert_eq!(second.topics_created, 0);
        let topics = store.topics.find_all().await.unwrap();
        assert_eq!(topics.len(), 1);
        assert_eq!(store.questions.find_by_topic(&topics[0].id).await.unwrap().len(), 1);
    }

    #[tokio::test]
    async fn bundled_catalog_parses() {
        let catalog = load_catalog(concat!(env!("CARGO_MANIFEST_DIR"), "/data/catalog.json"))
            .await
            .unwrap();
        assert!(!catalog.topics.is_empty());
    }
}
