//! Per-task state machine
//!
//! `Inert -> EntranceActive -> Idle -> Active -> Completed`, reset to
//! `Inert` between rounds. A task only reacts to its own duck's events and
//! reports back to the session through the returned `TaskSignal`.

use super::actor::ActorEvent;
use super::assign::TaskAssignment;
use super::{DuckCommand, TaskId};

/// Lifecycle of one duck/tub task within a round
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TaskPhase {
    /// Hidden, waiting for a round to start
    Inert,
    /// Duck is swimming in
    EntranceActive,
    /// Duck arrived, not yet interactive
    Idle,
    /// Player can drag the duck
    Active,
    /// Duck landed in its tub
    Completed,
}

/// What a task reports to the session after handling an event
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TaskSignal {
    EntranceFinished,
    Grabbed,
    /// Correct drop started (the jump is still in the air)
    Progress,
    FailedAttempt,
    Completed,
}

#[derive(Debug, Clone)]
pub struct DuckTask {
    id: TaskId,
    phase: TaskPhase,
    assignment: Option<TaskAssignment>,
    entrance_finished: bool,
    completed: bool,
    /// Routed actor events are accepted only while subscribed
    subscribed: bool,
    /// Seconds left on the visible hint
    hint_remaining: Option<f32>,
}

impl DuckTask {
    pub fn new(id: TaskId) -> Self {
        Self {
            id,
            phase: TaskPhase::Inert,
            assignment: None,
            entrance_finished: false,
            completed: false,
            subscribed: false,
            hint_remaining: None,
        }
    }

    pub fn id(&self) -> TaskId {
        self.id
    }

    pub fn phase(&self) -> TaskPhase {
        self.phase
    }

    pub fn assignment(&self) -> Option<&TaskAssignment> {
        self.assignment.as_ref()
    }

    pub fn is_completed(&self) -> bool {
        self.completed
    }

    pub fn entrance_finished(&self) -> bool {
        self.entrance_finished
    }

    pub fn is_subscribed(&self) -> bool {
        self.subscribed
    }

    pub fn hint_active(&self) -> bool {
        self.hint_remaining.is_some()
    }

    /// Slot x used for left-to-right ordering (unassigned tasks sort first)
    pub fn slot_x(&self) -> f32 {
        self.assignment
            .as_ref()
            .map(|a| a.slot.x)
            .unwrap_or(f32::NEG_INFINITY)
    }

    /// Take on this round's goal. Only valid from `Inert`.
    pub fn initialize(&mut self, assignment: TaskAssignment, out: &mut Vec<DuckCommand>) -> bool {
        if self.phase != TaskPhase::Inert {
            log::warn!("Task {}: initialize ignored in {:?}", self.id, self.phase);
            return false;
        }
        out.push(DuckCommand::PlaceTask {
            task: self.id,
            slot: assignment.slot,
            color: assignment.goal.color,
        });
        self.assignment = Some(assignment);
        true
    }

    /// Swim the duck in. Valid from `Inert` (once assigned) or `Idle`.
    pub fn play_entrance(&mut self, out: &mut Vec<DuckCommand>) -> bool {
        let ready = match self.phase {
            TaskPhase::Inert => self.assignment.is_some(),
            TaskPhase::Idle => true,
            _ => false,
        };
        if !ready {
            log::warn!("Task {}: entrance ignored in {:?}", self.id, self.phase);
            return false;
        }
        self.phase = TaskPhase::EntranceActive;
        self.entrance_finished = false;
        out.push(DuckCommand::SetDuckInteractable {
            task: self.id,
            interactable: false,
        });
        out.push(DuckCommand::SwimDuck { task: self.id });
        true
    }

    /// Reveal this task's tub (not yet interactive)
    pub fn enable_tub(&self, out: &mut Vec<DuckCommand>) {
        out.push(DuckCommand::ShowTub { task: self.id });
    }

    /// Open the task to player input. Only valid from `Idle`.
    pub fn enable_interaction(&mut self, out: &mut Vec<DuckCommand>) -> bool {
        if self.phase != TaskPhase::Idle {
            log::warn!("Task {}: enable_interaction ignored in {:?}", self.id, self.phase);
            return false;
        }
        self.phase = TaskPhase::Active;
        self.completed = false;
        self.subscribed = true;
        out.push(DuckCommand::SetDuckInteractable {
            task: self.id,
            interactable: true,
        });
        out.push(DuckCommand::SetTubInteractable {
            task: self.id,
            interactable: true,
        });
        true
    }

    /// Stop accepting actor events. Safe to call repeatedly.
    pub fn unsubscribe(&mut self) {
        self.subscribed = false;
    }

    /// React to one event from this task's duck
    pub fn handle(&mut self, event: ActorEvent, out: &mut Vec<DuckCommand>) -> Option<TaskSignal> {
        match (self.phase, event) {
            (TaskPhase::EntranceActive, ActorEvent::EntranceArrived) => Some(self.arrive(out)),
            (TaskPhase::Active, _) if !self.subscribed => None,
            (TaskPhase::Active, ActorEvent::GrabStart) => {
                self.disable_hint(out);
                Some(TaskSignal::Grabbed)
            }
            (TaskPhase::Active, ActorEvent::DropInCorrectTargetStart) => Some(TaskSignal::Progress),
            (TaskPhase::Active, ActorEvent::DropInCorrectTargetFinish) => Some(self.complete(out)),
            (TaskPhase::Active, ActorEvent::DropInWrongTarget | ActorEvent::DropOutsideTarget) => {
                Some(TaskSignal::FailedAttempt)
            }
            (phase, event) => {
                log::debug!("Task {}: {:?} ignored in {:?}", self.id, event, phase);
                None
            }
        }
    }

    /// Treat the entrance as finished without the collaborator callback
    pub fn force_arrival(&mut self, out: &mut Vec<DuckCommand>) -> Option<TaskSignal> {
        (self.phase == TaskPhase::EntranceActive).then(|| self.arrive(out))
    }

    fn arrive(&mut self, out: &mut Vec<DuckCommand>) -> TaskSignal {
        self.phase = TaskPhase::Idle;
        self.entrance_finished = true;
        out.push(DuckCommand::Quack { task: self.id });
        TaskSignal::EntranceFinished
    }

    fn complete(&mut self, out: &mut Vec<DuckCommand>) -> TaskSignal {
        self.phase = TaskPhase::Completed;
        self.completed = true;
        self.unsubscribe();
        self.disable_hint(out);
        out.push(DuckCommand::Splash { task: self.id });
        out.push(DuckCommand::SetDuckInteractable {
            task: self.id,
            interactable: false,
        });
        out.push(DuckCommand::SetTubInteractable {
            task: self.id,
            interactable: false,
        });
        TaskSignal::Completed
    }

    /// Show the guidance hand toward the tub for `duration` seconds
    pub fn enable_hint(&mut self, duration: f32, out: &mut Vec<DuckCommand>) -> bool {
        if self.phase != TaskPhase::Active {
            return false;
        }
        let Some(target) = self.assignment.as_ref().map(|a| a.slot) else {
            return false;
        };
        self.hint_remaining = Some(duration);
        out.push(DuckCommand::ShowHint {
            task: self.id,
            target,
        });
        true
    }

    fn disable_hint(&mut self, out: &mut Vec<DuckCommand>) {
        if self.hint_remaining.take().is_some() {
            out.push(DuckCommand::HideHint { task: self.id });
        }
    }

    /// Advance the hint timer
    pub fn tick(&mut self, dt: f32, out: &mut Vec<DuckCommand>) {
        let expired = self
            .hint_remaining
            .as_mut()
            .is_some_and(|remaining| crate::countdown(remaining, dt));
        if expired {
            self.disable_hint(out);
        }
    }

    pub fn play_outro(&self, out: &mut Vec<DuckCommand>) {
        out.push(DuckCommand::PlayOutro { task: self.id });
    }

    pub fn hide(&self, out: &mut Vec<DuckCommand>) {
        out.push(DuckCommand::HideTask { task: self.id });
    }

    /// Back to `Inert` between rounds
    pub fn reset(&mut self, out: &mut Vec<DuckCommand>) {
        self.disable_hint(out);
        self.phase = TaskPhase::Inert;
        self.assignment = None;
        self.entrance_finished = false;
        self.completed = false;
        self.unsubscribe();
        self.hide(out);
    }
}
