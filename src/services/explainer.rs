use async_trait::async_trait;
use schemars::JsonSchema;
use serde::Deserialize;

use crate::{
    constants::prompts::{explanation_prompt, EXPLANATION_SYSTEM_PROMPT},
    errors::AppResult,
    models::{domain::LearningStyle, dto::response::ExplanationContent},
    services::model_service::ModelService,
};

pub const MAX_KEY_POINTS: usize = 5;
const MIN_KEY_POINTS: usize = 3;

#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait TopicExplainer: Send + Sync {
    async fn explain(
        &self,
        topic_name: &str,
        learning_style: LearningStyle,
    ) -> AppResult<ExplanationContent>;
}

#[derive(Debug, Deserialize, JsonSchema)]
struct GeneratedExplanation {
    explanation_text: String,
    #[serde(default)]
    key_points: Vec<String>,
    #[serde(default)]
    real_world_applications: Vec<String>,
    #[serde(default)]
    diagrams: Vec<String>,
}

pub struct HostedTopicExplainer {
    model: ModelService,
}

impl HostedTopicExplainer {
    pub fn new(model: ModelService) -> Self {
        Self { model }
    }
}

#[async_trait]
impl TopicExplainer for HostedTopicExplainer {
    async fn explain(
        &self,
        topic_name: &str,
        learning_style: LearningStyle,
    ) -> AppResult<ExplanationContent> {
        let generated: GeneratedExplanation = self
            .model
            .complete_json(
                EXPLANATION_SYSTEM_PROMPT,
                &explanation_prompt(topic_name, learning_style),
            )
            .await?;

        let mut key_points: Vec<String> = generated
            .key_points
            .into_iter()
            .map(|p| p.trim().to_string())
            .filter(|p| !p.is_empty())
            .collect();
        if key_points.len() < MIN_KEY_POINTS {
            key_points = extract_key_points(&generated.explanation_text);
        }
        key_points.truncate(MAX_KEY_POINTS);

        let real_world_applications = if generated.real_world_applications.is_empty() {
            default_applications(topic_name)
        } else {
            generated.real_world_applications
        };

        let diagrams = match learning_style {
            LearningStyle::Visual if generated.diagrams.is_empty() => visual_elements(topic_name),
            LearningStyle::Visual => generated.diagrams,
            _ => Vec::new(),
        };

        Ok(ExplanationContent {
            explanation_text: generated.explanation_text,
            key_points,
            diagrams,
            real_world_applications,
            learning_style,
        })
    }
}

/// Offline explainer used when no model key is configured.
pub struct TemplateTopicExplainer;

#[async_trait]
impl TopicExplainer for TemplateTopicExplainer {
    async fn explain(
        &self,
        topic_name: &str,
        learning_style: LearningStyle,
    ) -> AppResult<ExplanationContent> {
        let explanation_text = basic_explanation(topic_name);
        let diagrams = if learning_style == LearningStyle::Visual {
            visual_elements(topic_name)
        } else {
            Vec::new()
        };

        Ok(ExplanationContent {
            key_points: extract_key_points(&explanation_text),
            real_world_applications: default_applications(topic_name),
            explanation_text,
            diagrams,
            learning_style,
        })
    }
}

const KEY_PREFIXES: [&str; 5] = ["Key", "Core", "Fundamental", "Understanding", "Learning"];
const KEY_WORDS: [&str; 6] = ["important", "essential", "crucial", "fundamental", "core", "basic"];

/// Picks up to five key points from an explanation: bullet lines and sentences
/// that lead with or mention a key word first, then the remaining sentences in order.
pub fn extract_key_points(explanation: &str) -> Vec<String> {
    let fragments: Vec<(bool, String)> = explanation
        .lines()
        .flat_map(|line| {
            let trimmed = line.trim();
            let bullet = trimmed.starts_with('-') || trimmed.starts_with('*');
            trimmed
                .trim_start_matches(['-', '*'])
                .split(". ")
                .map(|s| s.trim().trim_end_matches('.').trim().to_string())
                .filter(|s| s.len() > 10 && !s.ends_with(':'))
                .map(move |s| (bullet, s))
                .collect::<Vec<_>>()
        })
        .collect();

    let mut key_points: Vec<String> = fragments
        .iter()
        .filter(|(bullet, sentence)| {
            let lower = sentence.to_lowercase();
            *bullet
                || KEY_PREFIXES.iter().any(|p| sentence.starts_with(p))
                || KEY_WORDS.iter().any(|w| lower.contains(w))
        })
        .map(|(_, s)| s.clone())
        .collect();

    if key_points.len() < MIN_KEY_POINTS {
        for (_, sentence) in &fragments {
            if key_points.len() >= MAX_KEY_POINTS {
                break;
            }
            if !key_points.contains(sentence) {
                key_points.push(sentence.clone());
            }
        }
    }

    key_points.truncate(MAX_KEY_POINTS);
    key_points
}

pub fn default_applications(topic: &str) -> Vec<String> {
    vec![
        format!("Understanding {} helps in problem-solving", topic),
        format!("Knowledge of {} is essential for career development", topic),
        format!("{} has applications in various industries", topic),
        format!("Learning {} improves critical thinking skills", topic),
        format!("{} is fundamental for advanced studies", topic),
    ]
}

pub fn visual_elements(topic: &str) -> Vec<String> {
    vec![
        format!("Flowchart showing {} process", topic),
        format!("Mind map of {} concepts", topic),
        format!("Diagram illustrating {} relationships", topic),
        format!("Timeline of {} development", topic),
        format!("Comparison chart of {} approaches", topic),
    ]
}

fn basic_explanation(topic: &str) -> String {
    let lower = topic.to_lowercase();

    let body = if lower.contains("python") {
        "is a high-level, interpreted programming language known for its simplicity and readability. \
It's widely used in web development, data science, artificial intelligence, and automation.\n\
Key concepts include:\n\
- Variables and data types (strings, integers, lists, dictionaries)\n\
- Control structures (if/else, loops, functions)\n\
- Object-oriented programming principles\n\
- File handling and data processing\n\
- Libraries and frameworks (NumPy, Pandas, Django, Flask)\n\
Python's syntax emphasizes code readability with significant whitespace and clear structure."
    } else if lower.contains("machine learning") {
        "is a subset of artificial intelligence that enables computers to learn and improve from experience \
without being explicitly programmed. It focuses on developing algorithms that can access data and learn from it.\n\
Core concepts include:\n\
- Supervised learning (classification, regression)\n\
- Unsupervised learning (clustering, dimensionality reduction)\n\
- Neural networks and deep learning\n\
- Model training, validation, and testing\n\
- Feature engineering and data preprocessing\n\
Applications range from recommendation systems to autonomous vehicles and medical diagnosis."
    } else if lower.contains("data structures") {
        "are specialized formats for organizing, processing, retrieving, and storing data. \
They provide efficient ways to manage information in computer programs.\n\
Fundamental structures include:\n\
- Arrays and linked lists for sequential data\n\
- Stacks and queues for ordered operations\n\
- Trees and graphs for hierarchical relationships\n\
- Hash tables for fast data retrieval\n\
- Heaps for priority-based operations\n\
Understanding data structures is crucial for writing efficient algorithms and programs."
    } else if lower.contains("web development") {
        "involves creating websites and web applications using various technologies and programming languages. \
It encompasses both frontend (user interface) and backend (server-side logic) development.\n\
Key areas include:\n\
- HTML, CSS, and JavaScript for frontend\n\
- Server-side languages (Python, Node.js, PHP)\n\
- Databases and data management\n\
- APIs and web services\n\
- Security and performance optimization\n\
Modern web development emphasizes responsive design, accessibility, and user experience."
    } else {
        "is a fundamental concept that involves understanding core principles and their applications. \
It's important to grasp the basic concepts first before moving to advanced topics.\n\
Key aspects include:\n\
- Understanding the fundamental principles\n\
- Learning through examples and practice\n\
- Applying knowledge to real-world situations\n\
- Building a strong foundation for advanced learning\n\
- Connecting concepts to related fields\n\
This topic is essential for developing critical thinking and problem-solving skills."
    };

    format!("{} {}", topic, body)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn template_explainer_uses_canned_subject() {
        let content = TemplateTopicExplainer
            .explain("Python", LearningStyle::Reading)
            .await
            .unwrap();

        assert!(content.explanation_text.starts_with("Python is a high-level"));
        assert!(content.diagrams.is_empty());
        assert_eq!(content.real_world_applications.len(), 5);
        assert!(!content.key_points.is_empty());
        assert!(content.key_points.len() <= MAX_KEY_POINTS);
    }

    #[tokio::test]
    async fn template_explainer_adds_diagrams_for_visual_learners() {
        let content = TemplateTopicExplainer
            .explain("Photosynthesis", LearningStyle::Visual)
            .await
            .unwrap();

        assert!(content.explanation_text.starts_with("Photosynthesis is a fundamental concept"));
        assert_eq!(content.diagrams[0], "Flowchart showing Photosynthesis process");
    }

    #[test]
    fn key_points_prefer_bullets() {
        let points = extract_key_points(
            "Rust is a language. Intro words here:\n- Ownership and borrowing rules\n- Traits for shared behaviour",
        );

        assert_eq!(points[0], "Ownership and borrowing rules");
        assert!(points.contains(&"Traits for shared behaviour".to_string()));
    }

    #[test]
    fn key_points_fill_from_plain_sentences() {
        let points = extract_key_points(
            "Cells divide by mitosis. Chromosomes are copied first. Each daughter cell is identical",
        );

        assert_eq!(points.len(), 3);
        assert_eq!(points[0], "Cells divide by mitosis");
    }

    #[test]
    fn key_points_are_capped() {
        let text = (0..10)
            .map(|i| format!("- Essential bullet point number {}", i))
            .collect::<Vec<_>>()
            .join("\n");
        assert_eq!(extract_key_points(&text).len(), MAX_KEY_POINTS);
    }
}
