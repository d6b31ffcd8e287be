use std::fmt;

use serde::{Deserialize, Serialize};

/// Question difficulty, always within 1..=3.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(try_from = "u8", into = "u8")]
pub struct Difficulty(u8);

impl Difficulty {
    pub const BEGINNER: Difficulty = Difficulty(1);
    pub const INTERMEDIATE: Difficulty = Difficulty(2);
    pub const ADVANCED: Difficulty = Difficulty(3);

    pub const ALL: [Difficulty; 3] = [Self::BEGINNER, Self::INTERMEDIATE, Self::ADVANCED];

    pub fn new(level: u8) -> Option<Self> {
        Self::ALL.into_iter().find(|d| d.0 == level)
    }

    pub fn level(self) -> u8 {
        self.0
    }

    pub fn harder(self) -> Self {
        Difficulty((self.0 + 1).min(Self::ADVANCED.0))
    }

    pub fn easier(self) -> Self {
        Difficulty(self.0.saturating_sub(1).max(Self::BEGINNER.0))
    }

    pub fn distance(self, other: Difficulty) -> u8 {
        self.0.abs_diff(other.0)
    }

    pub fn label(self) -> &'static str {
        match self.0 {
            1 => "Beginner",
            2 => "Intermediate",
            _ => "Advanced",
        }
    }
}

impl Default for Difficulty {
    fn default() -> Self {
        Self::BEGINNER
    }
}

impl TryFrom<u8> for Difficulty {
    type Error = String;

    fn try_from(level: u8) -> Result<Self, Self::Error> {
        Difficulty::new(level)
            .ok_or_else(|| format!("difficulty level must be between 1 and 3, got {}", level))
    }
}

impl From<Difficulty> for u8 {
    fn from(difficulty: Difficulty) -> Self {
        difficulty.0
    }
}

impl fmt::Display for Difficulty {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}
