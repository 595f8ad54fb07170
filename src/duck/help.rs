//! Inactivity hints
//!
//! While a round's tasks are live, idle time accumulates. Once it passes the
//! cooldown, one incomplete task is picked at random to show its hint.
//! Progress and grabs reset the timer; failed attempts do not.

use super::TaskId;
use super::task::DuckTask;
use crate::rng::Randomness;

#[derive(Debug, Clone)]
pub struct HelpAdvisor {
    cooldown: f32,
    idle: f32,
    active: bool,
}

impl HelpAdvisor {
    pub fn new(cooldown: f32) -> Self {
        Self {
            cooldown,
            idle: 0.0,
            active: false,
        }
    }

    pub fn is_active(&self) -> bool {
        self.active
    }

    pub fn idle_time(&self) -> f32 {
        self.idle
    }

    pub fn on_round_started(&mut self) {
        self.active = true;
        self.idle = 0.0;
    }

    pub fn on_round_completed(&mut self) {
        self.active = false;
        self.idle = 0.0;
    }

    pub fn on_progress(&mut self) {
        self.idle = 0.0;
    }

    /// Accumulate idle time and pick a task to hint once the cooldown passes
    pub fn tick(
        &mut self,
        dt: f32,
        tasks: &[DuckTask],
        rng: &mut impl Randomness,
    ) -> Option<TaskId> {
        if !self.active {
            return None;
        }
        self.idle += dt;
        if self.idle <= self.cooldown {
            return None;
        }

        let remaining: Vec<TaskId> = tasks
            .iter()
            .filter(|t| !t.is_completed())
            .map(DuckTask::id)
            .collect();
        let pick = rng.pick_index(remaining.len())?;
        self.idle = 0.0;
        Some(remaining[pick])
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::duck::{ActorEvent, TaskAssignment, TaskGoal};
    use crate::rng::RngState;
    use glam::{Vec2, Vec4};

    fn active_tasks(n: usize) -> Vec<DuckTask> {
        let mut out = Vec::new();
        (0..n)
            .map(|i| {
                let mut t = DuckTask::new(i);
                t.initialize(
                    TaskAssignment {
                        task: i,
                        slot_index: i,
                        slot: Vec2::new(i as f32, 0.0),
                        goal_index: i,
                        goal: TaskGoal::new(Vec4::ONE, "cue"),
                    },
                    &mut out,
                );
                t.play_entrance(&mut out);
                t.handle(ActorEvent::EntranceArrived, &mut out);
                t.enable_interaction(&mut out);
                t
            })
            .collect()
    }

    #[test]
    fn test_inactive_never_hints() {
        let tasks = active_tasks(3);
        let mut rng = RngState::new(1).to_rng();
        let mut help = HelpAdvisor::new(1.0);
        for _ in 0..100 {
            assert_eq!(help.tick(0.1, &tasks, &mut rng), None);
        }
    }

    #[test]
    fn test_hints_after_cooldown() {
        let tasks = active_tasks(3);
        let mut rng = RngState::new(1).to_rng();
        let mut help = HelpAdvisor::new(1.0);
        help.on_round_started();

        assert_eq!(help.tick(0.6, &tasks, &mut rng), None);
        let pick = help.tick(0.6, &tasks, &mut rng);
        assert!(pick.is_some_and(|id| id < 3));
        assert_eq!(help.idle_time(), 0.0);
    }

    #[test]
    fn test_progress_resets_idle() {
        let tasks = active_tasks(2);
        let mut rng = RngState::new(2).to_rng();
        let mut help = HelpAdvisor::new(1.0);
        help.on_round_started();

        for _ in 0..5 {
            assert_eq!(help.tick(0.5, &tasks, &mut rng), None);
            help.on_progress();
        }
    }

    #[test]
    fn test_never_picks_completed() {
        let mut tasks = active_tasks(4);
        let mut out = Vec::new();
        for id in [0, 2, 3] {
            tasks[id].handle(ActorEvent::DropInCorrectTargetFinish, &mut out);
        }
        let mut rng = RngState::new(9).to_rng();
        let mut help = HelpAdvisor::new(0.5);
        help.on_round_started();
        for _ in 0..200 {
            if let Some(id) = help.tick(0.3, &tasks, &mut rng) {
                assert_eq!(id, 1);
            }
        }
    }

    #[test]
    fn test_all_completed_is_silent() {
        let mut tasks = active_tasks(2);
        let mut out = Vec::new();
        for t in &mut tasks {
            t.handle(ActorEvent::DropInCorrectTargetFinish, &mut out);
        }
        let mut rng = RngState::new(4).to_rng();
        let mut help = HelpAdvisor::new(0.1);
        help.on_round_started();
        assert_eq!(help.tick(1.0, &tasks, &mut rng), None);
    }

    #[test]
    fn test_round_completed_stops_hints() {
        let tasks = active_tasks(2);
        let mut rng = RngState::new(4).to_rng();
        let mut help = HelpAdvisor::new(0.1);
        help.on_round_started();
        help.on_round_completed();
        assert!(!help.is_active());
        assert_eq!(help.tick(1.0, &tasks, &mut rng), None);
    }
}
