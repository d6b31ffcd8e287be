use std::{collections::BTreeMap, sync::Arc};

use base64::{engine::general_purpose, Engine as _};
use validator::Validate;

use crate::{
    errors::{AppError, AppResult},
    models::{
        domain::{Emotion, EmotionSession, LearningStyle},
        dto::{
            request::EmotionDetectRequest,
            response::{ContentAdaptation, EmotionInsights, EmotionResponse, EmotionResult},
        },
    },
    repositories::EmotionSessionRepository,
    services::emotion_classifier::{EmotionClassifier, LabelScore},
};

const DEFAULT_SESSION_ID: &str = "default";

pub struct EmotionService {
    sessions: Arc<dyn EmotionSessionRepository>,
    classifier: Arc<dyn EmotionClassifier>,
    max_image_bytes: usize,
}

impl EmotionService {
    pub fn new(
        sessions: Arc<dyn EmotionSessionRepository>,
        classifier: Arc<dyn EmotionClassifier>,
        max_image_bytes: usize,
    ) -> Self {
        Self {
            sessions,
            classifier,
            max_image_bytes,
        }
    }

    pub async fn detect(
        &self,
        user_id: &str,
        request: EmotionDetectRequest,
    ) -> AppResult<EmotionResponse> {
        request.validate()?;
        let image = decode_image(&request.image_data, self.max_image_bytes)?;

        let labels = self
            .classifier
            .classify(image)
            .await
            .map_err(|e| AppError::provider_failure("Emotion detection", e))?;
        let (detected_emotion, confidence_score, all_emotions) = summarize(&labels)
            .ok_or_else(|| {
                AppError::ExternalService(
                    "Emotion detection failed: classifier returned no labels".to_string(),
                )
            })?;

        let session_id = request
            .session_id
            .as_deref()
            .map(str::trim)
            .filter(|id| !id.is_empty())
            .unwrap_or(DEFAULT_SESSION_ID);

        let session = self
            .sessions
            .create(EmotionSession::new(
                user_id,
                session_id,
                detected_emotion,
                confidence_score,
                all_emotions.clone(),
            ))
            .await?;

        Ok(EmotionResponse {
            message: "Emotion detected successfully".to_string(),
            emotion_result: EmotionResult {
                detected_emotion,
                confidence_score,
                all_emotions,
            },
            insights: insights(detected_emotion, confidence_score),
            session,
        })
    }
}

/// Accepts bare base64 or a `data:image/...;base64,` URL.
pub fn decode_image(image_data: &str, max_bytes: usize) -> AppResult<Vec<u8>> {
    let failed = || AppError::ValidationError("Failed to decode image".to_string());

    let payload = image_data.trim();
    let payload = match payload.strip_prefix("data:") {
        Some(rest) => rest.split_once(',').map(|(_, data)| data).ok_or_else(failed)?,
        None => payload,
    };

    let bytes = general_purpose::STANDARD
        .decode(payload.trim())
        .map_err(|_| failed())?;
    if bytes.is_empty() || bytes.len() > max_bytes {
        return Err(failed());
    }
    Ok(bytes)
}

/// Folds raw labels onto canonical emotions, keeping the best score per
/// emotion, and picks the top one.
pub fn summarize(labels: &[LabelScore]) -> Option<(Emotion, f64, BTreeMap<String, f64>)> {
    let mut best: BTreeMap<Emotion, f64> = BTreeMap::new();
    for label in labels {
        let score = label.score.clamp(0.0, 1.0);
        let entry = best.entry(Emotion::from_label(&label.label)).or_insert(score);
        if score > *entry {
            *entry = score;
        }
    }

    let (top, confidence) = best
        .iter()
        .fold(None, |acc: Option<(Emotion, f64)>, (emotion, score)| match acc {
            Some((_, top)) if top >= *score => acc,
            _ => Some((*emotion, *score)),
        })?;

    let all = best
        .into_iter()
        .map(|(emotion, score)| (emotion.as_str().to_string(), score))
        .collect();
    Some((top, confidence, all))
}

pub fn insights(emotion: Emotion, confidence: f64) -> EmotionInsights {
    let (learning_recommendations, content_adaptation, mood_analysis) = match emotion {
        Emotion::Happy => (
            vec![
                "Great mood! This is perfect for tackling challenging topics.",
                "Your positive energy will help with retention and understanding.",
                "Consider exploring advanced concepts while you're feeling confident.",
            ],
            adaptation("increase", "encouraging", "moderate"),
            "You're in an excellent learning state with high engagement potential.",
        ),
        Emotion::Sad => (
            vec![
                "Take it easy and focus on familiar, comfortable topics.",
                "Break down complex concepts into smaller, manageable parts.",
                "Consider taking short breaks between learning sessions.",
            ],
            adaptation("decrease", "gentle", "slow"),
            "You might benefit from a more supportive and gradual learning approach.",
        ),
        Emotion::Angry => (
            vec![
                "Try some breathing exercises before starting.",
                "Focus on practical, hands-on learning activities.",
                "Consider switching to a different subject temporarily.",
            ],
            adaptation("maintain", "calm", "slow"),
            "Your current state might affect concentration; consider stress-reduction techniques.",
        ),
        Emotion::Fear => (
            vec![
                "Start with review materials to build confidence.",
                "Use positive reinforcement and celebrate small achievements.",
                "Consider learning in shorter, focused sessions.",
            ],
            adaptation("decrease", "reassuring", "very_slow"),
            "Anxiety can impact learning; focus on building confidence through familiar content.",
        ),
        Emotion::Neutral => (
            vec![
                "You're in a balanced state - good for focused learning.",
                "Try to maintain this calm focus throughout your session.",
                "This is ideal for learning new concepts.",
            ],
            adaptation("maintain", "neutral", "normal"),
            "Neutral emotional state provides optimal conditions for learning and retention.",
        ),
        Emotion::Surprise | Emotion::Disgust => (
            vec![
                "Your current state might be distracting from learning.",
                "Consider taking a moment to center yourself.",
                "Try engaging with familiar, comfortable topics.",
            ],
            adaptation("maintain", "neutral", "normal"),
            "Consider returning to learning when you're in a more stable emotional state.",
        ),
    };

    EmotionInsights {
        emotion,
        confidence,
        learning_recommendations,
        content_adaptation,
        mood_analysis,
        recommended_learning_style: recommended_style(emotion),
        difficulty_adjustment: difficulty_adjustment(emotion, confidence),
    }
}

fn adaptation(difficulty: &'static str, tone: &'static str, pace: &'static str) -> ContentAdaptation {
    ContentAdaptation {
        difficulty,
        tone,
        pace,
    }
}

pub fn recommended_style(emotion: Emotion) -> LearningStyle {
    match emotion {
        Emotion::Happy | Emotion::Angry => LearningStyle::Kinesthetic,
        Emotion::Fear | Emotion::Neutral => LearningStyle::Reading,
        Emotion::Sad | Emotion::Surprise | Emotion::Disgust => LearningStyle::Visual,
    }
}

pub fn difficulty_adjustment(emotion: Emotion, confidence: f64) -> i8 {
    match emotion {
        Emotion::Happy if confidence > 0.7 => 1,
        Emotion::Sad | Emotion::Fear if confidence > 0.6 => -1,
        _ => 0,
    }
}
