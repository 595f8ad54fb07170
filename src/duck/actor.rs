//! Actor interaction boundary
//!
//! Ducks and tubs live in the host. The core only sees the events they
//! raise and asks one spatial question: is this duck inside that tub?

use glam::Vec2;

use super::TaskId;

/// Events raised by a task's duck
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ActorEvent {
    /// Entrance swim reached the idle point
    EntranceArrived,
    /// Player picked the duck up
    GrabStart,
    /// Released over a tub of another color
    DropInWrongTarget,
    /// Released away from every tub
    DropOutsideTarget,
    /// Released over its own tub, jump started
    DropInCorrectTargetStart,
    /// Jump into its own tub landed
    DropInCorrectTargetFinish,
}

/// Spatial containment predicate (stands in for trigger volumes)
pub trait Containment {
    fn is_inside_target(&self, duck: TaskId, tub: TaskId) -> bool;
}

/// Turn a duck release into the matching actor event.
///
/// Overlapping its own tub wins over overlapping any other tub.
pub fn classify_release(
    duck: TaskId,
    tubs: impl IntoIterator<Item = TaskId>,
    zones: &impl Containment,
) -> ActorEvent {
    let mut inside_any = false;
    for tub in tubs {
        if zones.is_inside_target(duck, tub) {
            if tub == duck {
                return ActorEvent::DropInCorrectTargetStart;
            }
            inside_any = true;
        }
    }
    if inside_any {
        ActorEvent::DropInWrongTarget
    } else {
        ActorEvent::DropOutsideTarget
    }
}

/// Circle-vs-point containment for headless hosts
#[derive(Debug, Clone)]
pub struct CircleZones {
    ducks: Vec<Vec2>,
    tubs: Vec<Vec2>,
    /// Tub trigger radius
    pub radius: f32,
}

impl CircleZones {
    pub fn new(count: usize, radius: f32) -> Self {
        Self {
            ducks: vec![Vec2::ZERO; count],
            tubs: vec![Vec2::ZERO; count],
            radius,
        }
    }

    pub fn set_duck(&mut self, task: TaskId, pos: Vec2) {
        if let Some(p) = self.ducks.get_mut(task) {
            *p = pos;
        }
    }

    pub fn set_tub(&mut self, task: TaskId, pos: Vec2) {
        if let Some(p) = self.tubs.get_mut(task) {
            *p = pos;
        }
    }

    pub fn tub(&self, task: TaskId) -> Option<Vec2> {
        self.tubs.get(task).copied()
    }

    pub fn len(&self) -> usize {
        self.tubs.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tubs.is_empty()
    }
}

impl Containment for CircleZones {
    fn is_inside_target(&self, duck: TaskId, tub: TaskId) -> bool {
        match (self.ducks.get(duck), self.tubs.get(tub)) {
            (Some(d), Some(t)) => d.distance(*t) <= self.radius,
            _ => false,
        }
    }
}
