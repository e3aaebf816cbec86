use crate::hint::HintPolicy;
use crate::types::Difficulty;
use serde::{Deserialize, Serialize};
use std::time::Duration;

/// Per-tier settings
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct TierConfig {
    /// Words sampled for the layout provider
    pub word_count: usize,
    pub hints: HintPolicy,
}

impl TierConfig {
    pub fn for_difficulty(difficulty: Difficulty) -> Self {
        Self {
            word_count: difficulty.word_count(),
            hints: HintPolicy::for_difficulty(difficulty),
        }
    }
}

/// Configuration for a play session
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SessionConfig {
    /// Score when nothing is stored, and after a manual difficulty change
    pub initial_score: u32,
    /// Quiet period before completion is re-checked after an edit
    pub completion_debounce: Duration,
    /// Period of the elapsed-time counter; each tick adds this much play time
    pub timer_period: Duration,
    pub easy: TierConfig,
    pub normal: TierConfig,
    pub hard: TierConfig,
}

impl Default for SessionConfig {
    fn default() -> Self {
        Self {
            initial_score: 100,
            completion_debounce: Duration::from_millis(100),
            timer_period: Duration::from_secs(1),
            easy: TierConfig::for_difficulty(Difficulty::Easy),
            normal: TierConfig::for_difficulty(Difficulty::Normal),
            hard: TierConfig::for_difficulty(Difficulty::Hard),
        }
    }
}

impl SessionConfig {
    pub fn tier(&self, difficulty: Difficulty) -> &TierConfig {
        match difficulty {
            Difficulty::Easy => &self.easy,
            Difficulty::Normal => &self.normal,
            Difficulty::Hard => &self.hard,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_tiers_follow_word_count_table() {
        let config = SessionConfig::default();
        for &difficulty in Difficulty::all() {
            assert_eq!(config.tier(difficulty).word_count, difficulty.word_count());
        }
        assert_eq!(config.tier(Difficulty::Hard).hints.quota, Some(5));
    }

    #[test]
    fn test_config_deserializes_from_json() {
        let json = serde_json::to_string(&SessionConfig::default()).unwrap();
        let mut value: serde_json::Value = serde_json::from_str(&json).unwrap();
        value["initial_score"] = serde_json::json!(250);
        let config: SessionConfig = serde_json::from_value(value).unwrap();
        assert_eq!(config.initial_score, 250);
        assert_eq!(config.timer_period, Duration::from_secs(1));
    }
}
