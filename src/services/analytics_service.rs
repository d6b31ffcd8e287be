use std::{collections::HashMap, sync::Arc};

use crate::{
    errors::AppResult,
    models::{
        domain::{timestamp, ProficiencyBand, QuizAttempt, SkillGap},
        dto::response::{HeatmapData, OverallProficiency, SkillGapDto, SkillGapsResponse},
    },
    repositories::{QuizAttemptRepository, SkillGapRepository, TopicRepository},
};

const IMPROVEMENT_THRESHOLD: f64 = 0.6;

pub struct AnalyticsService {
    topics: Arc<dyn TopicRepository>,
    attempts: Arc<dyn QuizAttemptRepository>,
    skill_gaps: Arc<dyn SkillGapRepository>,
}

impl AnalyticsService {
    pub fn new(
        topics: Arc<dyn TopicRepository>,
        attempts: Arc<dyn QuizAttemptRepository>,
        skill_gaps: Arc<dyn SkillGapRepository>,
    ) -> Self {
        Self {
            topics,
            attempts,
            skill_gaps,
        }
    }

    /// Live proficiency for every topic, computed from the attempt history.
    pub async fn topic_proficiencies(&self, user_id: &str) -> AppResult<Vec<SkillGapDto>> {
        Ok(self
            .snapshots(user_id)
            .await?
            .into_iter()
            .map(|(topic_name, gap)| SkillGapDto::from_snapshot(topic_name, gap))
            .collect())
    }

    /// Recomputes and stores the snapshot for every topic, then summarises it.
    pub async fn skill_gaps(&self, user_id: &str) -> AppResult<SkillGapsResponse> {
        let mut gaps = Vec::new();
        for (topic_name, gap) in self.snapshots(user_id).await? {
            let stored = self.skill_gaps.upsert(gap).await?;
            gaps.push(SkillGapDto::from_snapshot(topic_name, stored));
        }

        Ok(SkillGapsResponse {
            message: "Skill gap analysis retrieved successfully".to_string(),
            overall_proficiency: overall_proficiency(&gaps),
            heatmap_data: heatmap(&gaps),
            skill_gaps: gaps,
        })
    }

    /// (topic name, snapshot) for every topic, ordered by topic name.
    async fn snapshots(&self, user_id: &str) -> AppResult<Vec<(String, SkillGap)>> {
        let topics = self.topics.find_all().await?;
        let attempts = self.attempts.find_by_user(user_id).await?;

        let mut by_topic: HashMap<&str, Vec<&QuizAttempt>> = HashMap::new();
        for attempt in &attempts {
            by_topic.entry(&attempt.topic_id).or_default().push(attempt);
        }

        let now = timestamp::now();
        Ok(topics
            .into_iter()
            .map(|topic| {
                let history = by_topic.get(topic.id.as_str()).map(Vec::as_slice).unwrap_or(&[]);
                let total = history.len() as i64;
                let correct = history.iter().filter(|a| a.is_correct).count() as i64;
                let gap = SkillGap {
                    user_id: user_id.to_string(),
                    topic_id: topic.id,
                    proficiency: ratio(correct, total),
                    total_attempts: total,
                    correct_attempts: correct,
                    last_updated: now,
                };
                (topic.name, gap)
            })
            .collect())
    }
}

/// correct / total clamped to [0, 1]; zero when there is nothing to count.
pub fn ratio(correct: i64, total: i64) -> f64 {
    if total <= 0 {
        return 0.0;
    }
    (correct as f64 / total as f64).clamp(0.0, 1.0)
}

pub fn proficiency(attempts: &[QuizAttempt]) -> f64 {
    let correct = attempts.iter().filter(|a| a.is_correct).count() as i64;
    ratio(correct, attempts.len() as i64)
}

pub fn round_to(value: f64, decimals: i32) -> f64 {
    let factor = 10f64.powi(decimals);
    (value * factor).round() / factor
}

pub fn overall_proficiency(gaps: &[SkillGapDto]) -> OverallProficiency {
    if gaps.is_empty() {
        return OverallProficiency::default();
    }

    let average = gaps.iter().map(|g| g.proficiency).sum::<f64>() / gaps.len() as f64;
    OverallProficiency {
        average_proficiency: round_to(average, 3),
        total_topics: gaps.len(),
        strong_areas: count_band(gaps, ProficiencyBand::Strong),
        weak_areas: count_band(gaps, ProficiencyBand::Weak),
        improvement_needed: gaps
            .iter()
            .filter(|g| g.proficiency < IMPROVEMENT_THRESHOLD)
            .count(),
    }
}

pub fn count_band(gaps: &[SkillGapDto], band: ProficiencyBand) -> usize {
    gaps.iter().filter(|g| g.band == band).count()
}

pub fn heatmap(gaps: &[SkillGapDto]) -> HeatmapData {
    HeatmapData {
        labels: gaps.iter().map(|g| g.topic_name.clone()).collect(),
        data: gaps.iter().map(|g| g.proficiency).collect(),
        colors: gaps.iter().map(|g| g.band.color()).collect(),
    }
}
