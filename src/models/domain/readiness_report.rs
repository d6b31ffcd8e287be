use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::models::domain::timestamp;

#[derive(Clone, Debug, PartialEq, Eq, Deserialize, Serialize)]
pub struct ImprovementResource {
    pub area: String,
    pub resources: Vec<String>,
}

#[derive(Clone, Debug, PartialEq, Eq, Deserialize, Serialize)]
pub struct MockTestResults {
    pub estimated_score_range: String,
    pub performance_level: String,
    pub recommendations: Vec<String>,
}

#[derive(Clone, Debug, PartialEq, Deserialize, Serialize)]
pub struct ExamReadinessReport {
    pub id: String,
    pub user_id: String,
    pub topic_id: String,
    pub readiness_score: f64,
    pub weak_areas: Vec<String>,
    pub improvement_resources: Vec<ImprovementResource>,
    #[serde(default)]
    pub mock_test_results: Option<MockTestResults>,
    #[serde(with = "timestamp")]
    pub created_at: DateTime<Utc>,
}

impl ExamReadinessReport {
    pub fn new(
        user_id: &str,
        topic_id: &str,
        readiness_score: f64,
        weak_areas: Vec<String>,
        improvement_resources: Vec<ImprovementResource>,
        mock_test_results: Option<MockTestResults>,
    ) -> Self {
        ExamReadinessReport {
            id: Uuid::new_v4().to_string(),
            user_id: user_id.to_string(),
            topic_id: topic_id.to_string(),
            readiness_score,
            weak_areas,
            improvement_resources,
            mock_test_results,
            created_at: timestamp::now(),
        }
    }
}
