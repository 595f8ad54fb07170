//! Question data

use serde::{Deserialize, Serialize};

use super::Slot;
use crate::error::ConfigError;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AnswerData {
    pub text: String,
    #[serde(default)]
    pub correct: bool,
}

impl AnswerData {
    pub fn new(text: impl Into<String>, correct: bool) -> Self {
        Self {
            text: text.into(),
            correct,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct QuestionData {
    pub text: String,
    pub answers: Vec<AnswerData>,
}

impl QuestionData {
    pub fn new(text: impl Into<String>, answers: Vec<AnswerData>) -> Self {
        Self {
            text: text.into(),
            answers,
        }
    }

    /// Check the question fits the view and can be answered
    pub fn validate(&self, button_slots: usize) -> Result<(), ConfigError> {
        if self.answers.is_empty() {
            return Err(ConfigError::NoAnswers {
                question: self.text.clone(),
            });
        }
        if self.answers.len() > button_slots {
            return Err(ConfigError::TooManyAnswers {
                question: self.text.clone(),
                answers: self.answers.len(),
                slots: button_slots,
            });
        }
        if !self.answers.iter().any(|a| a.correct) {
            return Err(ConfigError::NoCorrectAnswer {
                question: self.text.clone(),
            });
        }
        Ok(())
    }

    pub fn is_correct(&self, slot: Slot) -> bool {
        self.answers.get(slot).is_some_and(|a| a.correct)
    }

    /// Slots holding a correct answer, in button order
    pub fn correct_slots(&self) -> Vec<Slot> {
        self.answers
            .iter()
            .enumerate()
            .filter(|(_, a)| a.correct)
            .map(|(i, _)| i)
            .collect()
    }
}
