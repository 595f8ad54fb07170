//! Multiple-choice quiz
//!
//! A session samples questions from the pool, runs one `QuestionRound` per
//! question, and grades the tally against a threshold table.

pub mod grade;
pub mod question;
pub mod round;
pub mod session;

use crate::Rgba;

pub use grade::{Grade, GradeTable};
pub use question::{AnswerData, QuestionData};
pub use round::{QuestionRound, QuestionTimings, RoundPhase};
pub use session::{QuizInput, QuizPhase, QuizResult, QuizSession, tick};

/// Index of an answer button in the view
pub type Slot = usize;

/// Which button animation finished
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ButtonAnimation {
    Correct,
    Incorrect,
}

/// Collaborator callbacks from the quiz view
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum QuizEvent {
    /// Question start animation ended
    StartAnimationFinished,
    /// Player pressed an answer button
    AnswerPressed(Slot),
    /// A correct/incorrect button animation ended
    AnimationFinished { slot: Slot, kind: ButtonAnimation },
}

/// Presentation commands emitted by the quiz session
#[derive(Debug, Clone, PartialEq)]
pub enum QuizCommand {
    /// Question text plus "current/total" progress (1-based)
    ShowQuestion {
        text: String,
        current: usize,
        total: usize,
    },
    /// Deactivate every button slot
    HideButtons,
    /// Fill a button with its answer text (still hidden)
    SetupButton { slot: Slot, text: String },
    PlayStartAnimation,
    /// Activate a button and play its enable animation
    RevealButton { slot: Slot },
    SetButtonsInteractable(bool),
    /// The host answers with `AnimationFinished { kind: Correct }`
    AnimateCorrect { slot: Slot },
    /// The host answers with `AnimationFinished { kind: Incorrect }`
    AnimateIncorrect { slot: Slot },
    PlayEndAnimation,
    AnimateDisable { slot: Slot },
    ShowResult {
        grade: String,
        color: Rgba,
        correct: usize,
        total: usize,
    },
}
