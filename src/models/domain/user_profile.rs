use std::fmt;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::models::domain::{timestamp, Difficulty};

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Deserialize, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum LearningStyle {
    #[default]
    Visual,
    Auditory,
    Kinesthetic,
    Reading,
}

impl LearningStyle {
    pub fn as_str(&self) -> &'static str {
        match self {
            LearningStyle::Visual => "visual",
            LearningStyle::Auditory => "auditory",
            LearningStyle::Kinesthetic => "kinesthetic",
            LearningStyle::Reading => "reading",
        }
    }
}

impl fmt::Display for LearningStyle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Clone, Debug, PartialEq, Eq, Deserialize, Serialize)]
pub struct UserProfile {
    pub user_id: String,
    pub learning_style: LearningStyle,
    pub preferred_difficulty: Difficulty,
    #[serde(with = "timestamp")]
    pub created_at: DateTime<Utc>,
    #[serde(with = "timestamp")]
    pub updated_at: DateTime<Utc>,
}

impl UserProfile {
    pub fn new(user_id: &str, learning_style: LearningStyle, preferred_difficulty: Difficulty) -> Self {
        let now = timestamp::now();
        UserProfile {
            user_id: user_id.to_string(),
            learning_style,
            preferred_difficulty,
            created_at: now,
            updated_at: now,
        }
    }

    pub fn default_for(user_id: &str) -> Self {
        Self::new(user_id, LearningStyle::default(), Difficulty::default())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn learning_style_uses_lowercase_wire_names() {
        let style: LearningStyle = serde_json::from_str("\"kinesthetic\"").unwrap();
        assert_eq!(style, LearningStyle::Kinesthetic);
        assert!(serde_json::from_str::<LearningStyle>("\"telepathic\"").is_err());
    }

    #[test]
    fn default_profile_starts_visual_at_beginner() {
        let profile = UserProfile::default_for("user-1");
        assert_eq!(profile.learning_style, LearningStyle::Visual);
        assert_eq!(profile.preferred_difficulty, Difficulty::BEGINNER);
    }
}
