pub mod difficulty;
pub mod emotion_session;
pub mod explanation;
pub mod quiz_attempt;
pub mod quiz_question;
pub mod readiness_report;
pub mod refresh_token;
pub mod skill_gap;
pub mod teach_back;
pub mod timestamp;
pub mod topic;
pub mod user;
pub mod user_profile;

pub use difficulty::Difficulty;
pub use emotion_session::{Emotion, EmotionSession};
pub use explanation::Explanation;
pub use quiz_attempt::QuizAttempt;
pub use quiz_question::{QuestionType, QuizOption, QuizQuestion};
pub use readiness_report::{ExamReadinessReport, ImprovementResource, MockTestResults};
pub use refresh_token::{hash_token, RefreshToken};
pub use skill_gap::{ProficiencyBand, SkillGap};
pub use teach_back::TeachBackSubmission;
pub use topic::Topic;
pub use user::User;
pub use user_profile::{LearningStyle, UserProfile};
