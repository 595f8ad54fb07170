//! Game configuration
//!
//! Loaded from JSON. Every field falls back to the built-in defaults, so a
//! config file only needs the values it wants to change. Validation happens
//! when a session is built from these settings.

use std::path::Path;

use glam::{Vec2, Vec4};
use serde::{Deserialize, Serialize};

use crate::duck::{AudioCue, TaskGoal};
use crate::error::ConfigError;
use crate::quiz::{AnswerData, Grade, QuestionData};

/// Drag-duck-to-tub settings
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct DuckSettings {
    /// Rounds per session
    pub rounds: u32,
    /// Number of duck/tub tasks on screen
    pub task_count: usize,
    /// Tub slot positions (world space, x grows to the right)
    pub slots: Vec<Vec2>,
    /// Color/audio pairs assigned to tasks each round
    pub goals: Vec<TaskGoal>,

    // === Sequencing (seconds) ===
    /// Intro timeline length
    pub intro_duration: f32,
    /// Round-win celebration length
    pub celebration_duration: f32,
    /// Per-task outro timeline length
    pub outro_duration: f32,
    /// Delay between consecutive tub reveals and outros
    pub tub_interval: f32,
    /// Delay between consecutive round markers in the HUD
    pub round_marker_interval: f32,

    // === Help ===
    /// Idle time before a hint is shown
    pub hint_cooldown: f32,
    /// How long a hint stays visible (both loops of the hand animation)
    pub hint_duration: f32,

    // === Audio ===
    /// Narrator line after a failed attempt
    pub try_again_cue: AudioCue,
    /// Played by a duck when it arrives at its idle point
    pub quack_cue: AudioCue,

    /// Longest wait on a collaborator callback before moving on anyway
    pub callback_timeout: f32,
}

impl Default for DuckSettings {
    fn default() -> Self {
        Self {
            rounds: 3,
            task_count: 3,
            slots: vec![
                Vec2::new(-4.0, -2.0),
                Vec2::new(0.0, -2.5),
                Vec2::new(4.0, -2.0),
            ],
            goals: vec![
                TaskGoal::new(Vec4::new(0.93, 0.26, 0.21, 1.0), "color_red"),
                TaskGoal::new(Vec4::new(0.98, 0.82, 0.18, 1.0), "color_yellow"),
                TaskGoal::new(Vec4::new(0.20, 0.47, 0.93, 1.0), "color_blue"),
            ],

            intro_duration: 4.0,
            celebration_duration: 3.0,
            outro_duration: 1.5,
            tub_interval: 0.3,
            round_marker_interval: 0.25,

            hint_cooldown: 8.0,
            hint_duration: 3.0,

            try_again_cue: AudioCue::new("try_again"),
            quack_cue: AudioCue::new("quack"),

            callback_timeout: 10.0,
        }
    }
}

/// Quiz settings
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct QuizSettings {
    /// Question pool to sample from
    pub questions: Vec<QuestionData>,
    /// Questions drawn per session
    pub questions_per_session: usize,
    /// Answer buttons available in the view
    pub button_slots: usize,
    /// Grade tiers, lowest threshold first
    pub grades: Vec<Grade>,

    // === Sequencing (seconds) ===
    /// Delay between answer buttons appearing
    pub answer_reveal_stagger: f32,
    /// Pause between the last answer animation and the question outro
    pub outro_lead: f32,
    /// Question outro length
    pub outro_tail: f32,

    /// Longest wait on a collaborator callback before moving on anyway
    pub callback_timeout: f32,
}

impl Default for QuizSettings {
    fn default() -> Self {
        use crate::consts::{ANSWER_REVEAL_STAGGER, QUESTION_OUTRO_LEAD, QUESTION_OUTRO_TAIL};

        Self {
            questions: default_questions(),
            questions_per_session: 4,
            button_slots: 4,
            grades: vec![
                Grade::new("Keep practicing", Vec4::new(0.85, 0.30, 0.25, 1.0), 0.0),
                Grade::new("Good", Vec4::new(0.95, 0.75, 0.20, 1.0), 0.5),
                Grade::new("Excellent", Vec4::new(0.30, 0.80, 0.35, 1.0), 0.8),
            ],

            answer_reveal_stagger: ANSWER_REVEAL_STAGGER,
            outro_lead: QUESTION_OUTRO_LEAD,
            outro_tail: QUESTION_OUTRO_TAIL,

            callback_timeout: 10.0,
        }
    }
}

fn default_questions() -> Vec<QuestionData> {
    fn q(text: &str, answers: &[(&str, bool)]) -> QuestionData {
        QuestionData::new(
            text,
            answers
                .iter()
                .map(|&(a, correct)| AnswerData::new(a, correct))
                .collect(),
        )
    }

    vec![
        q(
            "Which color do you get by mixing blue and yellow?",
            &[("Green", true), ("Purple", false), ("Orange", false), ("Brown", false)],
        ),
        q(
            "How many legs does a duck have?",
            &[("One", false), ("Two", true), ("Four", false)],
        ),
        q(
            "Which of these animals can swim?",
            &[("Duck", true), ("Fish", true), ("Cat", false), ("Frog", true)],
        ),
        q(
            "What sound does a duck make?",
            &[("Moo", false), ("Woof", false), ("Quack", true), ("Meow", false)],
        ),
        q(
            "Which of these is a primary color?",
            &[("Red", true), ("Pink", false), ("Grey", false)],
        ),
        q(
            "Where do ducks like to swim?",
            &[("Pond", true), ("Desert", false), ("Volcano", false), ("Cloud", false)],
        ),
    ]
}

/// Top-level configuration for both games
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct GameConfig {
    pub duck: DuckSettings,
    pub quiz: QuizSettings,
}

impl GameConfig {
    /// Parse a JSON config string
    pub fn from_json(json: &str) -> Result<Self, ConfigError> {
        Ok(serde_json::from_str(json)?)
    }

    /// Load a JSON config file
    pub fn load(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let json = std::fs::read_to_string(path)?;
        let config = Self::from_json(&json)?;
        log::info!("Loaded config from {}", path.display());
        Ok(config)
    }

    /// Serialize to pretty JSON
    pub fn to_json(&self) -> Result<String, ConfigError> {
        Ok(serde_json::to_string_pretty(self)?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_are_consistent() {
        let config = GameConfig::default();
        assert_eq!(config.duck.task_count, config.duck.slots.len());
        assert_eq!(config.duck.task_count, config.duck.goals.len());
        assert!(config.quiz.questions_per_session <= config.quiz.questions.len());
        assert_eq!(config.quiz.grades[0].threshold, 0.0);
    }

    #[test]
    fn test_partial_json_uses_defaults() {
        let config = GameConfig::from_json(r#"{ "duck": { "rounds": 5 } }"#).unwrap();
        assert_eq!(config.duck.rounds, 5);
        assert_eq!(config.duck.task_count, 3);
        assert_eq!(config.quiz.button_slots, 4);
    }

    #[test]
    fn test_json_round_trip_keeps_pool() {
        let config = GameConfig::default();
        let json = config.to_json().unwrap();
        let parsed = GameConfig::from_json(&json).unwrap();
        assert_eq!(parsed.quiz.questions.len(), config.quiz.questions.len());
        assert_eq!(parsed.duck.slots, config.duck.slots);
    }

    #[test]
    fn test_bad_json_is_parse_error() {
        let err = GameConfig::from_json("{ not json").unwrap_err();
        assert!(matches!(err, ConfigError::Parse(_)));
    }

    #[test]
    fn test_missing_file_is_io_error() {
        let err = GameConfig::load("/definitely/not/here.json").unwrap_err();
        assert!(matches!(err, ConfigError::Io(_)));
    }
}
