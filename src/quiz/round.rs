//! Per-question state machine
//!
//! `Setup -> AwaitingAnswer -> Settling -> Done`. The first press locks
//! every button. A wrong press shows the incorrect animation, then every
//! correct answer's animation behind an explicit wait-all barrier, so each
//! correct answer animates exactly once no matter how many there are.

use super::question::QuestionData;
use super::{ButtonAnimation, QuizCommand, QuizEvent, Slot};
use crate::consts::{ANSWER_REVEAL_STAGGER, QUESTION_OUTRO_LEAD, QUESTION_OUTRO_TAIL};
use crate::countdown;
use crate::error::ConfigError;
use crate::settings::QuizSettings;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RoundPhase {
    /// Question shown, start animation playing
    Setup,
    /// Buttons live, waiting for a press
    AwaitingAnswer,
    /// Answer animations and outro playing
    Settling,
    /// Outcome reported
    Done,
}

/// Sub-steps of `Settling`
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Settle {
    /// Waiting on the pressed button's animation
    Pressed { correct: bool },
    /// Waiting on every correct answer's animation
    Affirming,
    OutroLead,
    OutroTail,
}

/// Timing knobs for a question round
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct QuestionTimings {
    pub reveal_stagger: f32,
    pub outro_lead: f32,
    pub outro_tail: f32,
    pub callback_timeout: f32,
}

impl Default for QuestionTimings {
    fn default() -> Self {
        Self {
            reveal_stagger: ANSWER_REVEAL_STAGGER,
            outro_lead: QUESTION_OUTRO_LEAD,
            outro_tail: QUESTION_OUTRO_TAIL,
            callback_timeout: 10.0,
        }
    }
}

impl From<&QuizSettings> for QuestionTimings {
    fn from(settings: &QuizSettings) -> Self {
        Self {
            reveal_stagger: settings.answer_reveal_stagger,
            outro_lead: settings.outro_lead,
            outro_tail: settings.outro_tail,
            callback_timeout: settings.callback_timeout,
        }
    }
}

#[derive(Debug, Clone)]
pub struct QuestionRound {
    question: QuestionData,
    timings: QuestionTimings,
    phase: RoundPhase,
    settle: Settle,
    /// Buttons revealed so far
    revealed: usize,
    reveal_timer: f32,
    pressed: Option<Slot>,
    won: bool,
    /// Animations the barrier is still waiting on
    pending: Vec<(Slot, ButtonAnimation)>,
    timer: f32,
    waited: f32,
    /// Correct animations started this round
    affirmations: usize,
}

impl QuestionRound {
    /// Validate the question against the available button slots
    pub fn new(
        question: QuestionData,
        button_slots: usize,
        timings: QuestionTimings,
    ) -> Result<Self, ConfigError> {
        question.validate(button_slots)?;
        Ok(Self {
            question,
            timings,
            phase: RoundPhase::Setup,
            settle: Settle::OutroLead,
            revealed: 0,
            reveal_timer: 0.0,
            pressed: None,
            won: false,
            pending: Vec::new(),
            timer: 0.0,
            waited: 0.0,
            affirmations: 0,
        })
    }

    pub fn question(&self) -> &QuestionData {
        &self.question
    }

    pub fn phase(&self) -> RoundPhase {
        self.phase
    }

    pub fn pressed(&self) -> Option<Slot> {
        self.pressed
    }

    pub fn affirmations(&self) -> usize {
        self.affirmations
    }

    pub fn revealed(&self) -> usize {
        self.revealed
    }

    /// Lay out the buttons and play the start animation.
    /// `current` is 1-based.
    pub fn begin(&mut self, current: usize, total: usize, out: &mut Vec<QuizCommand>) {
        out.push(QuizCommand::ShowQuestion {
            text: self.question.text.clone(),
            current,
            total,
        });
        out.push(QuizCommand::HideButtons);
        for (slot, answer) in self.question.answers.iter().enumerate() {
            out.push(QuizCommand::SetupButton {
                slot,
                text: answer.text.clone(),
            });
        }
        out.push(QuizCommand::PlayStartAnimation);
        self.phase = RoundPhase::Setup;
        self.waited = 0.0;
    }

    pub fn handle(&mut self, event: QuizEvent, out: &mut Vec<QuizCommand>) {
        match (self.phase, event) {
            (RoundPhase::Setup, QuizEvent::StartAnimationFinished) => self.open(out),
            (RoundPhase::AwaitingAnswer, QuizEvent::AnswerPressed(slot)) => self.press(slot, out),
            (RoundPhase::Settling, QuizEvent::AnimationFinished { slot, kind }) => {
                let before = self.pending.len();
                self.pending.retain(|&p| p != (slot, kind));
                if self.pending.len() != before && self.pending.is_empty() {
                    self.barrier_released(out);
                }
            }
            (phase, event) => {
                log::debug!("Question ignored {:?} in {:?}", event, phase);
            }
        }
    }

    fn open(&mut self, out: &mut Vec<QuizCommand>) {
        self.phase = RoundPhase::AwaitingAnswer;
        self.revealed = 0;
        self.reveal_timer = 0.0;
        out.push(QuizCommand::SetButtonsInteractable(true));
    }

    fn press(&mut self, slot: Slot, out: &mut Vec<QuizCommand>) {
        if slot >= self.question.answers.len() {
            log::debug!("Press on unused slot {}", slot);
            return;
        }
        out.push(QuizCommand::SetButtonsInteractable(false));
        self.pressed = Some(slot);
        self.phase = RoundPhase::Settling;
        self.waited = 0.0;

        let correct = self.question.is_correct(slot);
        self.won = correct;
        if correct {
            self.affirmations += 1;
            out.push(QuizCommand::AnimateCorrect { slot });
            self.pending = vec![(slot, ButtonAnimation::Correct)];
        } else {
            out.push(QuizCommand::AnimateIncorrect { slot });
            self.pending = vec![(slot, ButtonAnimation::Incorrect)];
        }
        self.settle = Settle::Pressed { correct };
        log::debug!("Answer {} pressed ({})", slot, if correct { "correct" } else { "incorrect" });
    }

    /// Every awaited animation has finished
    fn barrier_released(&mut self, out: &mut Vec<QuizCommand>) {
        self.waited = 0.0;
        match self.settle {
            Settle::Pressed { correct: false } => {
                let slots = self.question.correct_slots();
                self.affirmations += slots.len();
                self.pending = slots
                    .iter()
                    .map(|&slot| (slot, ButtonAnimation::Correct))
                    .collect();
                for slot in slots {
                    out.push(QuizCommand::AnimateCorrect { slot });
                }
                self.settle = Settle::Affirming;
            }
            Settle::Pressed { correct: true } | Settle::Affirming => {
                self.settle = Settle::OutroLead;
                self.timer = self.timings.outro_lead;
            }
            Settle::OutroLead | Settle::OutroTail => {}
        }
    }

    /// Advance timers. Returns the outcome once, on the tick the round ends.
    pub fn tick(&mut self, dt: f32, out: &mut Vec<QuizCommand>) -> Option<bool> {
        if matches!(self.phase, RoundPhase::AwaitingAnswer | RoundPhase::Settling) {
            self.step_reveal(dt, out);
        }

        match self.phase {
            RoundPhase::Setup => {
                self.waited += dt;
                if self.waited > self.timings.callback_timeout {
                    log::warn!("Start animation callback missing, opening question");
                    self.open(out);
                }
                None
            }
            RoundPhase::AwaitingAnswer | RoundPhase::Done => None,
            RoundPhase::Settling => self.step_settle(dt, out),
        }
    }

    fn step_reveal(&mut self, dt: f32, out: &mut Vec<QuizCommand>) {
        if self.revealed >= self.question.answers.len() {
            return;
        }
        if countdown(&mut self.reveal_timer, dt) {
            out.push(QuizCommand::RevealButton {
                slot: self.revealed,
            });
            self.revealed += 1;
            self.reveal_timer = self.timings.reveal_stagger;
        }
    }

    fn step_settle(&mut self, dt: f32, out: &mut Vec<QuizCommand>) -> Option<bool> {
        match self.settle {
            Settle::Pressed { .. } | Settle::Affirming => {
                self.waited += dt;
                if self.waited > self.timings.callback_timeout {
                    log::warn!(
                        "Answer animation callbacks missing ({} pending), continuing",
                        self.pending.len()
                    );
                    self.pending.clear();
                    self.barrier_released(out);
                }
                None
            }
            Settle::OutroLead => {
                if countdown(&mut self.timer, dt) {
                    out.push(QuizCommand::PlayEndAnimation);
                    for slot in 0..self.question.answers.len() {
                        out.push(QuizCommand::AnimateDisable { slot });
                    }
                    self.settle = Settle::OutroTail;
                    self.timer = self.timings.outro_tail;
                }
                None
            }
            Settle::OutroTail => {
                if countdown(&mut self.timer, dt) {
                    self.phase = RoundPhase::Done;
                    Some(self.won)
                } else {
                    None
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::consts::SIM_DT;
    use crate::quiz::AnswerData;

    fn four_answers(correct: &[usize]) -> QuestionData {
        QuestionData::new(
            "Pick one",
            (0..4)
                .map(|i| AnswerData::new(format!("answer {i}"), correct.contains(&i)))
                .collect(),
        )
    }

    fn opened(question: QuestionData, out: &mut Vec<QuizCommand>) -> QuestionRound {
        let mut round = QuestionRound::new(question, 4, QuestionTimings::default()).unwrap();
        round.begin(1, 3, out);
        round.handle(QuizEvent::StartAnimationFinished, out);
        assert_eq!(round.phase(), RoundPhase::AwaitingAnswer);
        round
    }

    /// Tick, answering every correct/incorrect animation, until the round ends
    fn settle(round: &mut QuestionRound, out: &mut Vec<QuizCommand>) -> bool {
        let mut seen = 0;
        for _ in 0..1000 {
            let fresh: Vec<QuizCommand> = out[seen..].to_vec();
            seen = out.len();
            for command in fresh {
                let event = match command {
                    QuizCommand::AnimateCorrect { slot } => QuizEvent::AnimationFinished {
                        slot,
                        kind: ButtonAnimation::Correct,
                    },
                    QuizCommand::AnimateIncorrect { slot } => QuizEvent::AnimationFinished {
                        slot,
                        kind: ButtonAnimation::Incorrect,
                    },
                    _ => continue,
                };
                round.handle(event, out);
            }
            if let Some(won) = round.tick(SIM_DT, out) {
                return won;
            }
        }
        panic!("round never finished");
    }

    fn count_correct_animations(out: &[QuizCommand], slot: Slot) -> usize {
        out.iter()
            .filter(|c| **c == QuizCommand::AnimateCorrect { slot })
            .count()
    }

    #[test]
    fn test_begin_lays_out_buttons() {
        let mut out = Vec::new();
        let mut round =
            QuestionRound::new(four_answers(&[1]), 4, QuestionTimings::default()).unwrap();
        round.begin(2, 5, &mut out);
        assert_eq!(
            out[0],
            QuizCommand::ShowQuestion {
                text: "Pick one".into(),
                current: 2,
                total: 5
            }
        );
        assert_eq!(
            out.iter()
                .filter(|c| matches!(c, QuizCommand::SetupButton { .. }))
                .count(),
            4
        );
        assert_eq!(out.last(), Some(&QuizCommand::PlayStartAnimation));
    }

    #[test]
    fn test_too_many_answers_for_slots() {
        let err = QuestionRound::new(four_answers(&[0]), 3, QuestionTimings::default()).unwrap_err();
        assert!(matches!(err, ConfigError::TooManyAnswers { .. }));
    }

    #[test]
    fn test_buttons_reveal_staggered() {
        let mut out = Vec::new();
        let mut round = opened(four_answers(&[0]), &mut out);
        round.tick(0.01, &mut out);
        assert_eq!(round.revealed(), 1);
        round.tick(0.05, &mut out);
        assert_eq!(round.revealed(), 1);
        round.tick(0.06, &mut out);
        assert_eq!(round.revealed(), 2);
        for _ in 0..10 {
            round.tick(0.1, &mut out);
        }
        assert_eq!(round.revealed(), 4);
    }

    #[test]
    fn test_press_before_open_ignored() {
        let mut out = Vec::new();
        let mut round =
            QuestionRound::new(four_answers(&[0]), 4, QuestionTimings::default()).unwrap();
        round.begin(1, 1, &mut out);
        round.handle(QuizEvent::AnswerPressed(0), &mut out);
        assert_eq!(round.phase(), RoundPhase::Setup);
        assert_eq!(round.pressed(), None);
    }

    #[test]
    fn test_correct_press_wins() {
        let mut out = Vec::new();
        let mut round = opened(four_answers(&[2]), &mut out);
        round.handle(QuizEvent::AnswerPressed(2), &mut out);
        assert!(out.contains(&QuizCommand::SetButtonsInteractable(false)));

        assert!(settle(&mut round, &mut out));
        assert_eq!(round.phase(), RoundPhase::Done);
        assert_eq!(round.affirmations(), 1);
        assert_eq!(count_correct_animations(&out, 2), 1);
        assert!(out.contains(&QuizCommand::PlayEndAnimation));
    }

    #[test]
    fn test_incorrect_press_loses_and_shows_correct_once() {
        let mut out = Vec::new();
        let mut round = opened(four_answers(&[2]), &mut out);
        round.handle(QuizEvent::AnswerPressed(0), &mut out);
        assert!(out.contains(&QuizCommand::AnimateIncorrect { slot: 0 }));
        // Correct answer waits for the incorrect animation
        assert_eq!(count_correct_animations(&out, 2), 0);

        assert!(!settle(&mut round, &mut out));
        assert_eq!(count_correct_animations(&out, 2), 1);
        assert_eq!(round.affirmations(), 1);
    }

    #[test]
    fn test_multiple_correct_wait_for_all() {
        let mut out = Vec::new();
        let mut round = opened(four_answers(&[1, 3]), &mut out);
        round.handle(QuizEvent::AnswerPressed(0), &mut out);
        round.handle(
            QuizEvent::AnimationFinished {
                slot: 0,
                kind: ButtonAnimation::Incorrect,
            },
            &mut out,
        );
        assert_eq!(count_correct_animations(&out, 1), 1);
        assert_eq!(count_correct_animations(&out, 3), 1);

        // Only one of the two finished: still waiting
        round.handle(
            QuizEvent::AnimationFinished {
                slot: 1,
                kind: ButtonAnimation::Correct,
            },
            &mut out,
        );
        for _ in 0..120 {
            assert_eq!(round.tick(SIM_DT, &mut out), None);
        }
        assert!(!out.contains(&QuizCommand::PlayEndAnimation));

        round.handle(
            QuizEvent::AnimationFinished {
                slot: 3,
                kind: ButtonAnimation::Correct,
            },
            &mut out,
        );
        assert!(!settle(&mut round, &mut out));
        assert_eq!(round.affirmations(), 2);
    }

    #[test]
    fn test_second_press_ignored() {
        let mut out = Vec::new();
        let mut round = opened(four_answers(&[0]), &mut out);
        round.handle(QuizEvent::AnswerPressed(1), &mut out);
        round.handle(QuizEvent::AnswerPressed(0), &mut out);
        assert_eq!(round.pressed(), Some(1));
        assert!(!settle(&mut round, &mut out));
    }

    #[test]
    fn test_unused_slot_press_ignored() {
        let mut out = Vec::new();
        let question = QuestionData::new(
            "Two",
            vec![AnswerData::new("a", true), AnswerData::new("b", false)],
        );
        let mut round = opened(question, &mut out);
        round.handle(QuizEvent::AnswerPressed(3), &mut out);
        assert_eq!(round.phase(), RoundPhase::AwaitingAnswer);
    }

    #[test]
    fn test_missing_animation_callback_times_out() {
        let mut out = Vec::new();
        let timings = QuestionTimings {
            callback_timeout: 1.0,
            ..QuestionTimings::default()
        };
        let mut round = QuestionRound::new(four_answers(&[0]), 4, timings).unwrap();
        round.begin(1, 1, &mut out);
        round.handle(QuizEvent::StartAnimationFinished, &mut out);
        round.handle(QuizEvent::AnswerPressed(0), &mut out);

        let mut outcome = None;
        for _ in 0..300 {
            outcome = round.tick(SIM_DT, &mut out);
            if outcome.is_some() {
                break;
            }
        }
        assert_eq!(outcome, Some(true));
    }

    #[test]
    fn test_outcome_reported_once() {
        let mut out = Vec::new();
        let mut round = opened(four_answers(&[0]), &mut out);
        round.handle(QuizEvent::AnswerPressed(0), &mut out);
        assert!(settle(&mut round, &mut out));
        for _ in 0..10 {
            assert_eq!(round.tick(SIM_DT, &mut out), None);
        }
    }
}
