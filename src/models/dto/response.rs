use std::collections::BTreeMap;

use chrono::{DateTime, Utc};
use serde::Serialize;

use crate::models::domain::{
    Difficulty, Emotion, EmotionSession, ExamReadinessReport, Explanation, LearningStyle,
    ProficiencyBand, QuizAttempt, SkillGap, TeachBackSubmission, User, UserProfile,
};

/// Public view of a user. The password hash never leaves the server.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct UserDto {
    pub id: String,
    pub username: String,
    pub email: String,
    pub first_name: String,
    pub last_name: String,
    pub date_joined: DateTime<Utc>,
}

impl From<User> for UserDto {
    fn from(user: User) -> Self {
        UserDto {
            id: user.id,
            username: user.username,
            email: user.email,
            first_name: user.first_name,
            last_name: user.last_name,
            date_joined: user.date_joined,
        }
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct TokenPair {
    pub access: String,
    pub refresh: String,
}

#[derive(Debug, Serialize)]
pub struct AuthResponse {
    pub message: String,
    pub user: UserDto,
    pub tokens: TokenPair,
}

#[derive(Debug, Serialize)]
pub struct MessageResponse {
    pub message: String,
}

impl MessageResponse {
    pub fn new(message: impl Into<String>) -> Self {
        MessageResponse {
            message: message.into(),
        }
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct ProfileDto {
    pub user: UserDto,
    pub learning_style: LearningStyle,
    pub preferred_difficulty: Difficulty,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl ProfileDto {
    pub fn new(user: User, profile: UserProfile) -> Self {
        ProfileDto {
            user: user.into(),
            learning_style: profile.learning_style,
            preferred_difficulty: profile.preferred_difficulty,
            created_at: profile.created_at,
            updated_at: profile.updated_at,
        }
    }
}

/// Generated material returned alongside the stored explanation.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ExplanationContent {
    pub explanation_text: String,
    pub key_points: Vec<String>,
    pub diagrams: Vec<String>,
    pub real_world_applications: Vec<String>,
    pub learning_style: LearningStyle,
}

#[derive(Debug, Serialize)]
pub struct ExplainResponse {
    pub message: String,
    pub explanation: Explanation,
    pub ai_data: ExplanationContent,
}

#[derive(Debug, Serialize)]
pub struct TeachBackResponse {
    pub message: String,
    pub teach_back: TeachBackSubmission,
}

#[derive(Debug, Clone, Serialize)]
pub struct EmotionResult {
    pub detected_emotion: Emotion,
    pub confidence_score: f64,
    pub all_emotions: BTreeMap<String, f64>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ContentAdaptation {
    pub difficulty: &'static str,
    pub tone: &'static str,
    pub pace: &'static str,
}

#[derive(Debug, Clone, Serialize)]
pub struct EmotionInsights {
    pub emotion: Emotion,
    pub confidence: f64,
    pub learning_recommendations: Vec<&'static str>,
    pub content_adaptation: ContentAdaptation,
    pub mood_analysis: &'static str,
    pub recommended_learning_style: LearningStyle,
    pub difficulty_adjustment: i8,
}

#[derive(Debug, Serialize)]
pub struct EmotionResponse {
    pub message: String,
    pub emotion_result: EmotionResult,
    pub insights: EmotionInsights,
    pub session: EmotionSession,
}

#[derive(Debug, Clone, Serialize)]
pub struct SkillGapDto {
    pub topic_id: String,
    pub topic_name: String,
    pub proficiency: f64,
    pub band: ProficiencyBand,
    pub total_attempts: i64,
    pub correct_attempts: i64,
    pub last_updated: DateTime<Utc>,
}

impl SkillGapDto {
    pub fn from_snapshot(topic_name: String, gap: SkillGap) -> Self {
        Self {
            band: gap.band(),
            topic_id: gap.topic_id,
            topic_name,
            proficiency: gap.proficiency,
            total_attempts: gap.total_attempts,
            correct_attempts: gap.correct_attempts,
            last_updated: gap.last_updated,
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct OverallProficiency {
    pub average_proficiency: f64,
    pub total_topics: usize,
    pub strong_areas: usize,
    pub weak_areas: usize,
    pub improvement_needed: usize,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct HeatmapData {
    pub labels: Vec<String>,
    pub data: Vec<f64>,
    pub colors: Vec<&'static str>,
}

#[derive(Debug, Serialize)]
pub struct SkillGapsResponse {
    pub message: String,
    pub skill_gaps: Vec<SkillGapDto>,
    pub overall_proficiency: OverallProficiency,
    pub heatmap_data: HeatmapData,
}

#[derive(Debug, Serialize)]
pub struct ReadinessResponse {
    pub message: String,
    pub readiness_report: ExamReadinessReport,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct PerformanceSummary {
    pub total_quizzes: usize,
    pub correct_quizzes: usize,
    pub accuracy_percentage: f64,
    pub strong_topics: usize,
    pub weak_topics: usize,
}

#[derive(Debug, Serialize)]
pub struct RecentActivity {
    pub quiz_attempts: Vec<QuizAttempt>,
    pub explanations: Vec<Explanation>,
}

#[derive(Debug, Serialize)]
pub struct DashboardData {
    pub user_profile: ProfileDto,
    pub recent_activity: RecentActivity,
    pub performance_summary: PerformanceSummary,
}

#[derive(Debug, Serialize)]
pub struct DashboardResponse {
    pub message: String,
    pub dashboard: DashboardData,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn user_dto_omits_password_hash() {
        let user = User::new("johndoe", "john@example.com", "John", "Doe", "secret-hash".into());
        let json = serde_json::to_value(UserDto::from(user)).unwrap();

        assert_eq!(json["username"], "johndoe");
        assert!(json.get("password_hash").is_none());
    }

    #[test]
    fn profile_dto_serialises_difficulty_as_number() {
        let user = User::new("johndoe", "john@example.com", "John", "Doe", "hash".into());
        let profile = UserProfile::default_for(&user.id);
        let json = serde_json::to_value(ProfileDto::new(user, profile)).unwrap();

        assert_eq!(json["preferred_difficulty"], 1);
        assert_eq!(json["learning_style"], "visual");
    }

    #[test]
    fn skill_gap_dto_takes_band_from_snapshot() {
        let gap = SkillGap {
            user_id: "u1".into(),
            topic_id: "t1".into(),
            proficiency: 0.4,
            total_attempts: 5,
            correct_attempts: 2,
            last_updated: Utc::now(),
        };
        let dto = SkillGapDto::from_snapshot("Algebra".into(), gap);

        assert_eq!(dto.band, ProficiencyBand::Weak);
        assert_eq!(dto.topic_name, "Algebra");
        assert_eq!(dto.topic_id, "t1");
        assert_eq!(serde_json::to_value(&dto).unwrap()["band"], "weak");
    }
}
