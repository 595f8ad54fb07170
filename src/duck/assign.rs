//! Round assignments
//!
//! Each round every task gets one tub slot and one color/audio goal. Slots
//! and goals are shuffled independently and paired with tasks 1:1, so the
//! result is always a bijection over both pools.

use glam::Vec2;
use serde::{Deserialize, Serialize};

use super::{AudioCue, TaskId};
use crate::Rgba;
use crate::error::ConfigError;
use crate::rng::Randomness;

/// Goal data for one task: the color to match and its narrator cue
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TaskGoal {
    pub color: Rgba,
    pub audio: AudioCue,
}

impl TaskGoal {
    pub fn new(color: Rgba, audio: impl Into<String>) -> Self {
        Self {
            color,
            audio: AudioCue::new(audio),
        }
    }
}

/// What a task plays for during one round
#[derive(Debug, Clone, PartialEq)]
pub struct TaskAssignment {
    pub task: TaskId,
    /// Index into the slot pool
    pub slot_index: usize,
    pub slot: Vec2,
    /// Index into the goal pool
    pub goal_index: usize,
    pub goal: TaskGoal,
}

/// Validated slot and goal pools, one entry per task
#[derive(Debug, Clone)]
pub struct AssignmentPool {
    slots: Vec<Vec2>,
    goals: Vec<TaskGoal>,
}

impl AssignmentPool {
    /// Build the pool, failing when the three counts disagree
    pub fn new(
        task_count: usize,
        slots: Vec<Vec2>,
        goals: Vec<TaskGoal>,
    ) -> Result<Self, ConfigError> {
        if task_count == 0 {
            return Err(ConfigError::NoTasks);
        }
        if slots.len() != task_count || goals.len() != task_count {
            return Err(ConfigError::MismatchedPools {
                tasks: task_count,
                slots: slots.len(),
                goals: goals.len(),
            });
        }
        Ok(Self { slots, goals })
    }

    pub fn task_count(&self) -> usize {
        self.slots.len()
    }

    pub fn slots(&self) -> &[Vec2] {
        &self.slots
    }

    pub fn goals(&self) -> &[TaskGoal] {
        &self.goals
    }

    /// Draw a fresh assignment for every task, indexed by task id
    pub fn draw(&self, rng: &mut impl Randomness) -> Vec<TaskAssignment> {
        let n = self.task_count();
        let mut slot_order: Vec<usize> = (0..n).collect();
        let mut goal_order: Vec<usize> = (0..n).collect();
        rng.shuffle_slice(&mut slot_order);
        rng.shuffle_slice(&mut goal_order);

        slot_order
            .into_iter()
            .zip(goal_order)
            .enumerate()
            .map(|(task, (slot_index, goal_index))| TaskAssignment {
                task,
                slot_index,
                slot: self.slots[slot_index],
                goal_index,
                goal: self.goals[goal_index].clone(),
            })
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::rng::RngState;
    use glam::Vec4;
    use proptest::prelude::*;

    fn pool(n: usize) -> AssignmentPool {
        let slots = (0..n).map(|i| Vec2::new(i as f32, 0.0)).collect();
        let goals = (0..n)
            .map(|i| TaskGoal::new(Vec4::splat(i as f32 / n as f32), format!("cue_{i}")))
            .collect();
        AssignmentPool::new(n, slots, goals).unwrap()
    }

    #[test]
    fn test_mismatched_pools_rejected() {
        let err = AssignmentPool::new(3, vec![Vec2::ZERO; 2], vec![]).unwrap_err();
        assert!(matches!(
            err,
            ConfigError::MismatchedPools {
                tasks: 3,
                slots: 2,
                goals: 0
            }
        ));
    }

    #[test]
    fn test_empty_pool_rejected() {
        let err = AssignmentPool::new(0, vec![], vec![]).unwrap_err();
        assert!(matches!(err, ConfigError::NoTasks));
    }

    #[test]
    fn test_draw_varies_between_rounds() {
        let pool = pool(6);
        let mut rng = RngState::new(3).to_rng();
        let first: Vec<usize> = pool.draw(&mut rng).iter().map(|a| a.slot_index).collect();
        let differs = (0..20).any(|_| {
            let next: Vec<usize> = pool.draw(&mut rng).iter().map(|a| a.slot_index).collect();
            next != first
        });
        assert!(differs);
    }

    proptest! {
        #[test]
        fn prop_draw_is_bijection(seed in any::<u64>(), n in 1usize..8) {
            let pool = pool(n);
            let mut rng = RngState::new(seed).to_rng();
            let assignments = pool.draw(&mut rng);

            prop_assert_eq!(assignments.len(), n);

            let mut slots: Vec<usize> = assignments.iter().map(|a| a.slot_index).collect();
            let mut goals: Vec<usize> = assignments.iter().map(|a| a.goal_index).collect();
            slots.sort();
            goals.sort();
            prop_assert_eq!(slots, (0..n).collect::<Vec<_>>());
            prop_assert_eq!(goals, (0..n).collect::<Vec<_>>());

            for (task, a) in assignments.iter().enumerate() {
                prop_assert_eq!(a.task, task);
                prop_assert_eq!(a.slot, pool.slots()[a.slot_index]);
                prop_assert_eq!(&a.goal, &pool.goals()[a.goal_index]);
            }
        }
    }
}
