use std::sync::Arc;

use validator::Validate;

use crate::{
    errors::{AppError, AppResult},
    models::{
        domain::{Difficulty, ExamReadinessReport, ImprovementResource, MockTestResults, QuizAttempt},
        dto::{request::ExamReadinessRequest, response::ReadinessResponse},
    },
    repositories::{QuizAttemptRepository, ReadinessReportRepository, TopicRepository},
    services::analytics_service::{proficiency, round_to},
};

const NO_HISTORY_SCORE: f64 = 50.0;
const RECENT_WINDOW: usize = 5;
const RECENT_WEIGHT: f64 = 0.7;
const OVERALL_WEIGHT: f64 = 0.3;

pub struct ReadinessService {
    topics: Arc<dyn TopicRepository>,
    attempts: Arc<dyn QuizAttemptRepository>,
    reports: Arc<dyn ReadinessReportRepository>,
}

impl ReadinessService {
    pub fn new(
        topics: Arc<dyn TopicRepository>,
        attempts: Arc<dyn QuizAttemptRepository>,
        reports: Arc<dyn ReadinessReportRepository>,
    ) -> Self {
        Self {
            topics,
            attempts,
            reports,
        }
    }

    pub async fn readiness(
        &self,
        user_id: &str,
        request: ExamReadinessRequest,
    ) -> AppResult<ReadinessResponse> {
        request.validate()?;

        let topic = self
            .topics
            .find_by_id(&request.topic_id)
            .await?
            .ok_or_else(|| {
                AppError::NotFound(format!("Topic with id '{}' not found", request.topic_id))
            })?;

        let attempts = self
            .attempts
            .find_by_user_and_topic(user_id, &topic.id)
            .await?;

        let score = readiness_score(&attempts);
        let weak = weak_areas(&attempts);
        let resources = improvement_resources(&topic.name, &weak);
        let mock = request.include_mock_test.then(|| mock_test_results(score));

        let report = self
            .reports
            .create(ExamReadinessReport::new(
                user_id, &topic.id, score, weak, resources, mock,
            ))
            .await?;

        Ok(ReadinessResponse {
            message: "Exam readiness assessment completed successfully".to_string(),
            readiness_report: report,
        })
    }
}

/// `attempts` must be ordered newest first.
pub fn readiness_score(attempts: &[QuizAttempt]) -> f64 {
    if attempts.is_empty() {
        return NO_HISTORY_SCORE;
    }
    let recent = &attempts[..attempts.len().min(RECENT_WINDOW)];
    let blended = RECENT_WEIGHT * proficiency(recent) + OVERALL_WEIGHT * proficiency(attempts);
    round_to(blended * 100.0, 1).clamp(0.0, 100.0)
}

pub fn weak_areas(attempts: &[QuizAttempt]) -> Vec<String> {
    if attempts.is_empty() {
        return vec!["Basic concepts".to_string(), "Fundamental principles".to_string()];
    }

    let levels = [
        (Difficulty::BEGINNER, 0.7, "Basic concepts"),
        (Difficulty::INTERMEDIATE, 0.6, "Intermediate concepts"),
        (Difficulty::ADVANCED, 0.5, "Advanced concepts"),
    ];

    let weak: Vec<String> = levels
        .iter()
        .filter_map(|(level, threshold, area)| {
            let at_level: Vec<QuizAttempt> = attempts
                .iter()
                .filter(|a| a.difficulty_level == *level)
                .cloned()
                .collect();
            (!at_level.is_empty() && proficiency(&at_level) < *threshold).then(|| area.to_string())
        })
        .collect();

    if weak.is_empty() {
        vec![
            "Application of concepts".to_string(),
            "Problem-solving skills".to_string(),
        ]
    } else {
        weak
    }
}

pub fn improvement_resources(topic_name: &str, weak_areas: &[String]) -> Vec<ImprovementResource> {
    weak_areas
        .iter()
        .map(|area| {
            let lowered = area.to_lowercase();
            let resources = if lowered.contains("basic") {
                vec![
                    format!("Review {} fundamentals", topic_name),
                    "Practice basic exercises".to_string(),
                    "Watch introductory videos".to_string(),
                ]
            } else if lowered.contains("intermediate") {
                vec![
                    format!("Study {} applications", topic_name),
                    "Solve practice problems".to_string(),
                    "Read case studies".to_string(),
                ]
            } else if lowered.contains("advanced") {
                vec![
                    format!("Explore advanced {} concepts", topic_name),
                    "Work on complex problems".to_string(),
                    "Research current developments".to_string(),
                ]
            } else {
                vec![
                    format!("Focus on {} in {}", lowered, topic_name),
                    "Practice related exercises".to_string(),
                    "Seek additional explanations".to_string(),
                ]
            };
            ImprovementResource {
                area: area.clone(),
                resources,
            }
        })
        .collect()
}

pub fn mock_test_results(readiness_score: f64) -> MockTestResults {
    let (performance, range) = if readiness_score >= 80.0 {
        ("Excellent", "85-95")
    } else if readiness_score >= 60.0 {
        ("Good", "65-80")
    } else if readiness_score >= 40.0 {
        ("Fair", "45-65")
    } else {
        ("Needs Improvement", "25-45")
    };

    let first = if readiness_score >= 70.0 {
        "Continue current study approach"
    } else {
        "Focus on weak areas"
    };

    MockTestResults {
        estimated_score_range: range.to_string(),
        performance_level: performance.to_string(),
        recommendations: vec![
            first.to_string(),
            "Take practice tests regularly".to_string(),
            "Review key concepts thoroughly".to_string(),
        ],
    }
}
