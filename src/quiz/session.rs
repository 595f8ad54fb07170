//! Quiz session
//!
//! Draws the questions for a session without replacement, runs them one
//! after another, and grades the tally at the end.

use rand_pcg::Pcg32;

use super::grade::{Grade, GradeTable};
use super::question::QuestionData;
use super::round::{QuestionRound, QuestionTimings};
use super::{QuizCommand, QuizEvent};
use crate::error::ConfigError;
use crate::rng::{Randomness, RngState};
use crate::settings::QuizSettings;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum QuizPhase {
    /// A question is on screen
    Questions,
    /// Result screen shown
    Result,
}

#[derive(Debug, Clone, PartialEq)]
pub struct QuizResult {
    pub grade: Grade,
    pub correct: usize,
    pub total: usize,
}

/// Collaborator events delivered during one tick
#[derive(Debug, Clone, Default)]
pub struct QuizInput {
    pub events: Vec<QuizEvent>,
}

impl QuizInput {
    pub fn single(event: QuizEvent) -> Self {
        Self {
            events: vec![event],
        }
    }
}

#[derive(Debug)]
pub struct QuizSession {
    pool: Vec<QuestionData>,
    question_count: usize,
    button_slots: usize,
    timings: QuestionTimings,
    grades: GradeTable,
    rng_state: RngState,
    rng: Pcg32,
    selected: Vec<QuestionData>,
    index: usize,
    correct: usize,
    round: Option<QuestionRound>,
    phase: QuizPhase,
    result: Option<QuizResult>,
    commands: Vec<QuizCommand>,
}

impl QuizSession {
    /// Validate everything, draw `question_count` questions and show the
    /// first one. No command is emitted when validation fails.
    pub fn start(
        settings: &QuizSettings,
        question_count: usize,
        rng_state: RngState,
    ) -> Result<Self, ConfigError> {
        if question_count == 0 {
            return Err(ConfigError::NoQuestions);
        }
        if question_count > settings.questions.len() {
            return Err(ConfigError::SampleExceedsPool {
                requested: question_count,
                available: settings.questions.len(),
            });
        }
        for question in &settings.questions {
            question.validate(settings.button_slots)?;
        }
        let grades = GradeTable::new(settings.grades.clone())?;

        let mut session = Self {
            pool: settings.questions.clone(),
            question_count,
            button_slots: settings.button_slots,
            timings: QuestionTimings::from(settings),
            grades,
            rng_state,
            rng: rng_state.to_rng(),
            selected: Vec::new(),
            index: 0,
            correct: 0,
            round: None,
            phase: QuizPhase::Questions,
            result: None,
            commands: Vec::new(),
        };
        log::info!(
            "Quiz session starting: {} of {} questions, seed {}",
            question_count,
            session.pool.len(),
            rng_state.seed
        );
        session.begin()?;
        Ok(session)
    }

    /// Start with the configured question count and a fresh random seed
    pub fn start_random(settings: &QuizSettings) -> Result<Self, ConfigError> {
        Self::start(
            settings,
            settings.questions_per_session,
            RngState::from_entropy(),
        )
    }

    /// Play again from the result screen with a fresh sample
    pub fn restart(&mut self) -> Result<(), ConfigError> {
        log::info!("Quiz restarting");
        self.begin()
    }

    fn begin(&mut self) -> Result<(), ConfigError> {
        let mut order: Vec<usize> = (0..self.pool.len()).collect();
        self.rng.shuffle_slice(&mut order);
        self.selected = order
            .into_iter()
            .take(self.question_count)
            .map(|i| self.pool[i].clone())
            .collect();
        self.index = 0;
        self.correct = 0;
        self.result = None;
        self.phase = QuizPhase::Questions;
        self.start_question()
    }

    fn start_question(&mut self) -> Result<(), ConfigError> {
        let question = self.selected[self.index].clone();
        let mut round = QuestionRound::new(question, self.button_slots, self.timings)?;
        round.begin(self.index + 1, self.selected.len(), &mut self.commands);
        self.round = Some(round);
        Ok(())
    }

    fn finish(&mut self) {
        let total = self.selected.len();
        let grade = self.grades.grade(self.correct, total).clone();
        log::info!(
            "Quiz finished: {}/{} correct, grade {}",
            self.correct,
            total,
            grade.name
        );
        self.commands.push(QuizCommand::ShowResult {
            grade: grade.name.clone(),
            color: grade.color,
            correct: self.correct,
            total,
        });
        self.result = Some(QuizResult {
            grade,
            correct: self.correct,
            total,
        });
        self.round = None;
        self.phase = QuizPhase::Result;
    }

    pub fn phase(&self) -> QuizPhase {
        self.phase
    }

    pub fn is_finished(&self) -> bool {
        self.phase == QuizPhase::Result
    }

    pub fn selected(&self) -> &[QuestionData] {
        &self.selected
    }

    /// 0-based index of the current question
    pub fn index(&self) -> usize {
        self.index
    }

    pub fn correct(&self) -> usize {
        self.correct
    }

    pub fn current(&self) -> Option<&QuestionRound> {
        self.round.as_ref()
    }

    pub fn result(&self) -> Option<&QuizResult> {
        self.result.as_ref()
    }

    pub fn seed(&self) -> u64 {
        self.rng_state.seed
    }

    pub fn drain_commands(&mut self) -> Vec<QuizCommand> {
        std::mem::take(&mut self.commands)
    }
}

/// Advance the quiz by one timestep
pub fn tick(session: &mut QuizSession, input: &QuizInput, dt: f32) {
    let Some(round) = session.round.as_mut() else {
        return;
    };
    for &event in &input.events {
        round.handle(event, &mut session.commands);
    }
    let Some(won) = round.tick(dt, &mut session.commands) else {
        return;
    };

    if won {
        session.correct += 1;
    }
    session.index += 1;
    if session.index < session.selected.len() {
        // Pool was validated up front, so the next round cannot fail
        if let Err(err) = session.start_question() {
            log::warn!("Skipping to result: {}", err);
            session.finish();
        }
    } else {
        session.finish();
    }
}
