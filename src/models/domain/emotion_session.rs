use std::{collections::BTreeMap, fmt};

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::models::domain::timestamp;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Deserialize, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Emotion {
    Angry,
    Disgust,
    Fear,
    Happy,
    Sad,
    Surprise,
    Neutral,
}

impl Emotion {
    /// Maps a classifier label onto the canonical emotion set.
    /// Unrecognised labels fall back to neutral.
    pub fn from_label(label: &str) -> Self {
        match label.trim().to_lowercase().as_str() {
            "angry" | "anger" => Emotion::Angry,
            "disgust" | "disgusted" => Emotion::Disgust,
            "fear" | "fearful" | "scared" => Emotion::Fear,
            "happy" | "happiness" | "joy" => Emotion::Happy,
            "sad" | "sadness" => Emotion::Sad,
            "surprise" | "surprised" => Emotion::Surprise,
            _ => Emotion::Neutral,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Emotion::Angry => "angry",
            Emotion::Disgust => "disgust",
            Emotion::Fear => "fear",
            Emotion::Happy => "happy",
            Emotion::Sad => "sad",
            Emotion::Surprise => "surprise",
            Emotion::Neutral => "neutral",
        }
    }
}

impl fmt::Display for Emotion {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Clone, Debug, PartialEq, Deserialize, Serialize)]
pub struct EmotionSession {
    pub id: String,
    pub user_id: String,
    pub session_id: String,
    pub detected_emotion: Emotion,
    pub confidence_score: f64,
    pub all_emotions: BTreeMap<String, f64>,
    #[serde(with = "timestamp")]
    pub created_at: DateTime<Utc>,
}

impl EmotionSession {
    pub fn new(
        user_id: &str,
        session_id: &str,
        detected_emotion: Emotion,
        confidence_score: f64,
        all_emotions: BTreeMap<String, f64>,
    ) -> Self {
        EmotionSession {
            id: Uuid::new_v4().to_string(),
            user_id: user_id.to_string(),
            session_id: session_id.to_string(),
            detected_emotion,
            confidence_score,
            all_emotions,
            created_at: timestamp::now(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn labels_are_normalised() {
        assert_eq!(Emotion::from_label("Happy"), Emotion::Happy);
        assert_eq!(Emotion::from_label(" SADNESS "), Emotion::Sad);
        assert_eq!(Emotion::from_label("fearful"), Emotion::Fear);
        assert_eq!(Emotion::from_label("contempt"), Emotion::Neutral);
    }
}
