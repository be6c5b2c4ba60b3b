//! Scoring and demo configuration
//!
//! Defaults match the mobile app's constants. Every value can be overridden
//! through environment variables (a `.env` file is honoured by the binary).

use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// Points for voting for the correct answer
pub const SCORE_CORRECT_ANSWER: u32 = 500;
/// Points per player tricked by your answer
pub const SCORE_TRICKED_PLAYER: u32 = 300;
/// Answers shown for voting before fillers stop being added
pub const MIN_ANSWER_OPTIONS: usize = 4;

/// What to do with submissions that are empty or whitespace only
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum BlankSubmissionPolicy {
    /// Treat them like any other text
    #[default]
    Keep,
    /// Drop them before grouping
    Discard,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ScoringConfig {
    pub correct_answer_points: u32,
    pub tricked_player_points: u32,
    pub min_answer_options: usize,
    pub blank_submissions: BlankSubmissionPolicy,
}

impl Default for ScoringConfig {
    fn default() -> Self {
        Self {
            correct_answer_points: SCORE_CORRECT_ANSWER,
            tricked_player_points: SCORE_TRICKED_PLAYER,
            min_answer_options: MIN_ANSWER_OPTIONS,
            blank_submissions: BlankSubmissionPolicy::Keep,
        }
    }
}

impl ScoringConfig {
    /// Load config from environment variables
    pub fn from_env() -> Self {
        let defaults = Self::default();

        let correct_answer_points = env_parse("QUIZ_SCORE_CORRECT_ANSWER")
            .unwrap_or(defaults.correct_answer_points);

        let tricked_player_points = env_parse("QUIZ_SCORE_TRICKED_PLAYER")
            .unwrap_or(defaults.tricked_player_points);

        let min_answer_options =
            env_parse("QUIZ_MIN_ANSWER_OPTIONS").unwrap_or(defaults.min_answer_options);

        let blank_submissions = if env_flag("QUIZ_DISCARD_BLANK_ANSWERS").unwrap_or(false) {
            BlankSubmissionPolicy::Discard
        } else {
            BlankSubmissionPolicy::Keep
        };

        tracing::info!(
            correct_answer_points,
            tricked_player_points,
            min_answer_options,
            ?blank_submissions,
            "Scoring config loaded"
        );

        Self {
            correct_answer_points,
            tricked_player_points,
            min_answer_options,
            blank_submissions,
        }
    }
}

/// Settings for the simulated demo game
#[derive(Debug, Clone)]
pub struct DemoConfig {
    pub rounds: u32,
    pub bots: usize,
    /// JSON question bank; the built-in sample is used when unset
    pub question_bank: Option<PathBuf>,
    pub category: Option<String>,
}

impl Default for DemoConfig {
    fn default() -> Self {
        Self {
            rounds: 3,
            bots: 3,
            question_bank: None,
            category: None,
        }
    }
}

impl DemoConfig {
    pub fn from_env() -> Self {
        let defaults = Self::default();

        let rounds = env_parse("QUIZ_DEMO_ROUNDS").unwrap_or(defaults.rounds);
        let bots = env_parse("QUIZ_DEMO_BOTS").unwrap_or(defaults.bots);
        let question_bank = std::env::var("QUIZ_QUESTION_BANK")
            .ok()
            .filter(|v| !v.trim().is_empty())
            .map(PathBuf::from);
        let category = std::env::var("QUIZ_CATEGORY")
            .ok()
            .filter(|v| !v.trim().is_empty());

        tracing::info!(
            rounds,
            bots,
            question_bank = ?question_bank,
            category = ?category,
            "Demo config loaded"
        );

        Self {
            rounds,
            bots,
            question_bank,
            category,
        }
    }
}

fn env_parse<T: std::str::FromStr>(key: &str) -> Option<T> {
    let raw = std::env::var(key).ok()?;
    match raw.trim().parse() {
        Ok(value) => Some(value),
        Err(_) => {
            tracing::warn!("Ignoring unparseable {}={:?}, using default", key, raw);
            None
        }
    }
}

fn env_flag(key: &str) -> Option<bool> {
    std::env::var(key)
        .ok()
        .map(|v| v != "0" && v.to_lowercase() != "false")
}

#[cfg(test)]
mod tests {
    use super::*;
    use serial_test::serial;

    const KEYS: &[&str] = &[
        "QUIZ_SCORE_CORRECT_ANSWER",
        "QUIZ_SCORE_TRICKED_PLAYER",
        "QUIZ_MIN_ANSWER_OPTIONS",
        "QUIZ_DISCARD_BLANK_ANSWERS",
        "QUIZ_DEMO_ROUNDS",
        "QUIZ_DEMO_BOTS",
        "QUIZ_QUESTION_BANK",
        "QUIZ_CATEGORY",
    ];

    fn clear_env() {
        for key in KEYS {
            std::env::remove_var(key);
        }
    }

    fn set_env(key: &str, value: &str) {
        std::env::set_var(key, value);
    }

    #[test]
    fn test_defaults_match_app_constants() {
        let config = ScoringConfig::default();
        assert_eq!(config.correct_answer_points, 500);
        assert_eq!(config.tricked_player_points, 300);
        assert_eq!(config.min_answer_options, 4);
        assert_eq!(config.blank_submissions, BlankSubmissionPolicy::Keep);
    }

    #[test]
    #[serial]
    fn test_from_env_without_overrides() {
        clear_env();
        assert_eq!(ScoringConfig::from_env(), ScoringConfig::default());
    }

    #[test]
    #[serial]
    fn test_from_env_overrides() {
        clear_env();
        set_env("QUIZ_SCORE_CORRECT_ANSWER", "1000");
        set_env("QUIZ_SCORE_TRICKED_PLAYER", " 250 ");
        set_env("QUIZ_MIN_ANSWER_OPTIONS", "6");
        set_env("QUIZ_DISCARD_BLANK_ANSWERS", "true");

        let config = ScoringConfig::from_env();
        assert_eq!(config.correct_answer_points, 1000);
        assert_eq!(config.tricked_player_points, 250);
        assert_eq!(config.min_answer_options, 6);
        assert_eq!(config.blank_submissions, BlankSubmissionPolicy::Discard);

        clear_env();
    }

    #[test]
    #[serial]
    fn test_from_env_ignores_garbage() {
        clear_env();
        set_env("QUIZ_SCORE_CORRECT_ANSWER", "lots");
        set_env("QUIZ_DISCARD_BLANK_ANSWERS", "0");

        let config = ScoringConfig::from_env();
        assert_eq!(config.correct_answer_points, SCORE_CORRECT_ANSWER);
        assert_eq!(config.blank_submissions, BlankSubmissionPolicy::Keep);

        clear_env();
    }

    #[test]
    #[serial]
    fn test_demo_config_from_env() {
        clear_env();
        set_env("QUIZ_DEMO_ROUNDS", "5");
        set_env("QUIZ_QUESTION_BANK", "questions.json");
        set_env("QUIZ_CATEGORY", "  ");

        let config = DemoConfig::from_env();
        assert_eq!(config.rounds, 5);
        assert_eq!(config.bots, 3);
        assert_eq!(config.question_bank, Some(PathBuf::from("questions.json")));
        assert_eq!(config.category, None);

        clear_env();
    }
}
