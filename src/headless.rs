//! Headless collaborators
//!
//! Stand-ins for the engine side of both games: they consume the session's
//! commands, fake animation timing, and play the game automatically. The
//! native binary runs on these, and so do the end-to-end tests.

use glam::Vec2;
use rand::Rng;
use rand_pcg::Pcg32;

use crate::consts::{DUCK_JUMP_DURATION, DUCK_JUMP_HALFWAY, DUCK_SWIM_DURATION};
use crate::duck::{
    ActorEvent, CircleZones, DuckCommand, DuckInput, DuckSession, TaskId, classify_release,
};
use crate::quiz::{
    ButtonAnimation, QuestionData, QuizCommand, QuizEvent, QuizInput, QuizSession, Slot,
};
use crate::rng::{Randomness, RngState};

/// Tub trigger radius used by the headless duck host
pub const TUB_RADIUS: f32 = 1.0;
/// Where ducks wait before they are dragged
const DUCK_HOME_Y: f32 = 3.0;

/// An event scheduled for a later tick
#[derive(Debug, Clone, Copy)]
struct Pending<E> {
    at: f32,
    event: E,
}

/// How the autoplayer picks the next duck
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PickOrder {
    /// Lowest task id first
    InOrder,
    Random,
}

/// Autoplay tuning for the duck host
#[derive(Debug, Clone, Copy)]
pub struct DuckAutoplay {
    /// Seconds between finishing one drag and grabbing the next duck
    pub think_time: f32,
    /// Chance a drag ends somewhere other than the duck's own tub
    pub mistake_rate: f64,
    pub order: PickOrder,
}

impl Default for DuckAutoplay {
    fn default() -> Self {
        Self {
            think_time: 1.0,
            mistake_rate: 0.2,
            order: PickOrder::Random,
        }
    }
}

/// Simulated duck/tub actors plus an autoplaying player
#[derive(Debug)]
pub struct DuckHost {
    autoplay: DuckAutoplay,
    rng: Pcg32,
    zones: CircleZones,
    clock: f32,
    pending: Vec<Pending<(TaskId, ActorEvent)>>,
    interactable: Vec<bool>,
    done: Vec<bool>,
    /// Player is mid-drag or a jump is in the air
    busy_until: f32,
    pub hints_seen: u32,
    pub commands_seen: usize,
}

impl DuckHost {
    /// `mistake_rate` is clamped into 0-1
    pub fn new(task_count: usize, mut autoplay: DuckAutoplay, rng_state: RngState) -> Self {
        autoplay.mistake_rate = probability(autoplay.mistake_rate);
        Self {
            autoplay,
            rng: rng_state.to_rng(),
            zones: CircleZones::new(task_count, TUB_RADIUS),
            clock: 0.0,
            pending: Vec::new(),
            interactable: vec![false; task_count],
            done: vec![false; task_count],
            busy_until: 0.0,
            hints_seen: 0,
            commands_seen: 0,
        }
    }

    /// Apply the session's commands and produce the next tick's input
    pub fn respond(&mut self, commands: &[DuckCommand], dt: f32) -> DuckInput {
        self.clock += dt;
        self.commands_seen += commands.len();
        for command in commands {
            self.apply(command);
        }

        let mut input = DuckInput::default();
        let clock = self.clock;
        self.pending.retain(|p| {
            if p.at <= clock {
                input.push(p.event.0, p.event.1);
                false
            } else {
                true
            }
        });

        if self.clock >= self.busy_until {
            self.play(&mut input);
        }
        input
    }

    fn apply(&mut self, command: &DuckCommand) {
        match *command {
            DuckCommand::PlaceTask { task, slot, .. } => {
                self.zones.set_tub(task, slot);
                self.zones.set_duck(task, home(task));
                if let Some(d) = self.done.get_mut(task) {
                    *d = false;
                }
            }
            DuckCommand::SwimDuck { task } => {
                self.schedule(DUCK_SWIM_DURATION, task, ActorEvent::EntranceArrived);
            }
            DuckCommand::SetDuckInteractable { task, interactable } => {
                if let Some(i) = self.interactable.get_mut(task) {
                    *i = interactable;
                }
            }
            DuckCommand::HideTask { task } => {
                if let Some(i) = self.interactable.get_mut(task) {
                    *i = false;
                }
            }
            DuckCommand::Splash { task } => {
                if let Some(d) = self.done.get_mut(task) {
                    *d = true;
                }
            }
            DuckCommand::ShowHint { .. } => self.hints_seen += 1,
            _ => {}
        }
    }

    fn schedule(&mut self, delay: f32, task: TaskId, event: ActorEvent) {
        self.pending.push(Pending {
            at: self.clock + delay,
            event: (task, event),
        });
    }

    /// Grab a duck and drop it somewhere
    fn play(&mut self, input: &mut DuckInput) {
        let candidates: Vec<TaskId> = (0..self.zones.len())
            .filter(|&t| self.interactable[t] && !self.done[t])
            .collect();
        let pick = match self.autoplay.order {
            PickOrder::InOrder => candidates.first().copied(),
            PickOrder::Random => self.rng.pick_index(candidates.len()).map(|i| candidates[i]),
        };
        let Some(duck) = pick else {
            return;
        };

        input.push(duck, ActorEvent::GrabStart);

        let drop_at = if self.rng.random_bool(self.autoplay.mistake_rate) {
            self.mistaken_drop(duck)
        } else {
            self.zones.tub(duck).unwrap_or_else(|| home(duck))
        };
        self.zones.set_duck(duck, drop_at);

        let event = classify_release(duck, 0..self.zones.len(), &self.zones);
        input.push(duck, event);
        if event == ActorEvent::DropInCorrectTargetStart {
            self.schedule(
                DUCK_JUMP_DURATION - DUCK_JUMP_HALFWAY,
                duck,
                ActorEvent::DropInCorrectTargetFinish,
            );
        } else {
            self.zones.set_duck(duck, home(duck));
        }
        self.busy_until = self.clock + DUCK_JUMP_DURATION + self.autoplay.think_time;
    }

    /// Another task's tub, or open water when there is only one tub
    fn mistaken_drop(&mut self, duck: TaskId) -> Vec2 {
        let others: Vec<TaskId> = (0..self.zones.len()).filter(|&t| t != duck).collect();
        match self.rng.pick_index(others.len()) {
            Some(i) => self.zones.tub(others[i]).unwrap_or_else(|| home(duck)),
            None => home(duck),
        }
    }
}

/// Clamp into a valid chance; NaN counts as never
fn probability(p: f64) -> f64 {
    if p.is_nan() { 0.0 } else { p.clamp(0.0, 1.0) }
}

fn home(task: TaskId) -> Vec2 {
    Vec2::new(task as f32 * 3.0, DUCK_HOME_Y)
}

/// Run a duck session to the end on the headless host.
///
/// Returns false when `max_seconds` of simulated time pass first.
pub fn run_duck_session(
    session: &mut DuckSession,
    host: &mut DuckHost,
    dt: f32,
    max_seconds: f32,
) -> bool {
    let mut input = DuckInput::default();
    let mut elapsed = 0.0;
    while !session.is_finished() && elapsed < max_seconds {
        crate::duck::tick(session, &input, dt);
        let commands = session.drain_commands();
        input = host.respond(&commands, dt);
        elapsed += dt;
    }
    session.is_finished()
}

/// Autoplay tuning for the quiz host
#[derive(Debug, Clone, Copy)]
pub struct QuizAutoplay {
    /// Start animation length
    pub start_animation: f32,
    /// Correct/incorrect animation length
    pub answer_animation: f32,
    /// Delay between the buttons going live and the press
    pub think_time: f32,
    /// Chance of pressing a correct answer
    pub accuracy: f64,
}

impl Default for QuizAutoplay {
    fn default() -> Self {
        Self {
            start_animation: 0.6,
            answer_animation: 0.8,
            think_time: 1.5,
            accuracy: 0.7,
        }
    }
}

/// Simulated quiz view plus a player who knows the answer `accuracy` of the time
#[derive(Debug)]
pub struct QuizHost {
    autoplay: QuizAutoplay,
    rng: Pcg32,
    clock: f32,
    pending: Vec<Pending<QuizEvent>>,
    buttons: usize,
    press_at: Option<f32>,
    pub results_seen: u32,
}

impl QuizHost {
    /// `accuracy` is clamped into 0-1
    pub fn new(mut autoplay: QuizAutoplay, rng_state: RngState) -> Self {
        autoplay.accuracy = probability(autoplay.accuracy);
        Self {
            autoplay,
            rng: rng_state.to_rng(),
            clock: 0.0,
            pending: Vec::new(),
            buttons: 0,
            press_at: None,
            results_seen: 0,
        }
    }

    /// Apply the session's commands and produce the next tick's input.
    ///
    /// `question` is what the player is looking at.
    pub fn respond(
        &mut self,
        commands: &[QuizCommand],
        question: Option<&QuestionData>,
        dt: f32,
    ) -> QuizInput {
        self.clock += dt;
        for command in commands {
            self.apply(command);
        }

        let mut input = QuizInput::default();
        let clock = self.clock;
        self.pending.retain(|p| {
            if p.at <= clock {
                input.events.push(p.event);
                false
            } else {
                true
            }
        });

        if self.press_at.is_some_and(|at| at <= clock) {
            self.press_at = None;
            if let Some(slot) = self.choose(question) {
                input.events.push(QuizEvent::AnswerPressed(slot));
            }
        }
        input
    }

    fn choose(&mut self, question: Option<&QuestionData>) -> Option<Slot> {
        let Some(question) = question else {
            return self.rng.pick_index(self.buttons);
        };
        let knows = self.rng.random_bool(self.autoplay.accuracy);
        let options: Vec<Slot> = (0..self.buttons)
            .filter(|&slot| question.is_correct(slot) == knows)
            .collect();
        match self.rng.pick_index(options.len()) {
            Some(i) => Some(options[i]),
            None => self.rng.pick_index(self.buttons),
        }
    }

    fn apply(&mut self, command: &QuizCommand) {
        match *command {
            QuizCommand::HideButtons => self.buttons = 0,
            QuizCommand::SetupButton { slot, .. } => self.buttons = self.buttons.max(slot + 1),
            QuizCommand::PlayStartAnimation => {
                self.schedule(self.autoplay.start_animation, QuizEvent::StartAnimationFinished);
            }
            QuizCommand::SetButtonsInteractable(true) => {
                self.press_at = Some(self.clock + self.autoplay.think_time);
            }
            QuizCommand::SetButtonsInteractable(false) => self.press_at = None,
            QuizCommand::AnimateCorrect { slot } => self.finish_later(slot, ButtonAnimation::Correct),
            QuizCommand::AnimateIncorrect { slot } => {
                self.finish_later(slot, ButtonAnimation::Incorrect)
            }
            QuizCommand::ShowResult { .. } => self.results_seen += 1,
            _ => {}
        }
    }

    fn finish_later(&mut self, slot: Slot, kind: ButtonAnimation) {
        self.schedule(
            self.autoplay.answer_animation,
            QuizEvent::AnimationFinished { slot, kind },
        );
    }

    fn schedule(&mut self, delay: f32, event: QuizEvent) {
        self.pending.push(Pending {
            at: self.clock + delay,
            event,
        });
    }
}

/// Run a quiz session to its result on the headless host.
///
/// Returns false when `max_seconds` of simulated time pass first.
pub fn run_quiz_session(
    session: &mut QuizSession,
    host: &mut QuizHost,
    dt: f32,
    max_seconds: f32,
) -> bool {
    // Commands from `start` are already queued
    let commands = session.drain_commands();
    let mut input = host.respond(&commands, current_question(session), 0.0);
    let mut elapsed = 0.0;
    while !session.is_finished() && elapsed < max_seconds {
        crate::quiz::tick(session, &input, dt);
        let commands = session.drain_commands();
        input = host.respond(&commands, current_question(session), dt);
        elapsed += dt;
    }
    session.is_finished()
}

/// Question on screen, if any
pub fn current_question(session: &QuizSession) -> Option<&QuestionData> {
    session.current().map(|round| round.question())
}
