use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::models::domain::timestamp;

pub const STRONG_THRESHOLD: f64 = 0.7;
pub const WEAK_THRESHOLD: f64 = 0.4;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Deserialize, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum ProficiencyBand {
    Strong,
    Moderate,
    Weak,
}

impl ProficiencyBand {
    pub fn from_proficiency(proficiency: f64) -> Self {
        if proficiency >= STRONG_THRESHOLD {
            ProficiencyBand::Strong
        } else if proficiency <= WEAK_THRESHOLD {
            ProficiencyBand::Weak
        } else {
            ProficiencyBand::Moderate
        }
    }

    pub fn color(&self) -> &'static str {
        match self {
            ProficiencyBand::Strong => "#28a745",
            ProficiencyBand::Moderate => "#ffc107",
            ProficiencyBand::Weak => "#dc3545",
        }
    }
}

/// Per user and topic proficiency snapshot. Unique on (user_id, topic_id).
#[derive(Clone, Debug, PartialEq, Deserialize, Serialize)]
pub struct SkillGap {
    pub user_id: String,
    pub topic_id: String,
    pub proficiency: f64,
    pub total_attempts: i64,
    pub correct_attempts: i64,
    #[serde(with = "timestamp")]
    pub last_updated: DateTime<Utc>,
}

impl SkillGap {
    pub fn band(&self) -> ProficiencyBand {
        ProficiencyBand::from_proficiency(self.proficiency)
    }
}
