//! Configuration errors
//!
//! Everything that can go wrong in this crate is a setup problem: the
//! sessions validate their inputs before emitting a single command. Wrong
//! drops and missed answers are normal gameplay signals, not errors.

/// A configuration problem detected before a session starts
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("mismatched pools: {tasks} tasks, {slots} tub slots, {goals} goals")]
    MismatchedPools {
        tasks: usize,
        slots: usize,
        goals: usize,
    },

    #[error("duck session needs at least one task")]
    NoTasks,

    #[error("duck session needs at least one round")]
    NoRounds,

    #[error("question {question:?} has no answers")]
    NoAnswers { question: String },

    #[error("question {question:?} has no correct answer")]
    NoCorrectAnswer { question: String },

    #[error("question {question:?} has {answers} answers but only {slots} button slots")]
    TooManyAnswers {
        question: String,
        answers: usize,
        slots: usize,
    },

    #[error("requested {requested} questions but the pool only holds {available}")]
    SampleExceedsPool { requested: usize, available: usize },

    #[error("quiz session needs at least one question")]
    NoQuestions,

    #[error("grade table is empty")]
    EmptyGradeTable,

    #[error("first grade {name:?} must be a catch-all (threshold 0), found {threshold}")]
    MissingFallbackGrade { name: String, threshold: f32 },

    #[error("grade {name:?} threshold {threshold} is outside 0..=1")]
    ThresholdOutOfRange { name: String, threshold: f32 },

    #[error("failed to read config: {0}")]
    Io(#[from] std::io::Error),

    #[error("failed to parse config: {0}")]
    Parse(#[from] serde_json::Error),
}
