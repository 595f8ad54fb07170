//! Drag-duck-to-tub game
//!
//! Each round pairs every duck/tub task with a shuffled tub slot and goal
//! color, brings the ducks in, reveals the tubs left to right, and waits for
//! the player to drop every duck in the tub of its own color.
//!
//! The session never touches the engine directly:
//! - Collaborator callbacks arrive as `ActorEvent`s in a `DuckInput`
//! - Presentation work leaves as `DuckCommand`s
//! - Game-level observers read `DuckNotice`s

pub mod actor;
pub mod assign;
pub mod help;
pub mod hud;
pub mod session;
pub mod task;
pub mod tick;

use glam::Vec2;
use serde::{Deserialize, Serialize};

use crate::Rgba;

pub use actor::{ActorEvent, CircleZones, Containment, classify_release};
pub use assign::{AssignmentPool, TaskAssignment, TaskGoal};
pub use help::HelpAdvisor;
pub use hud::RoundHud;
pub use session::{DuckPhase, DuckSession, DuckStats};
pub use task::{DuckTask, TaskPhase, TaskSignal};
pub use tick::{DuckInput, tick};

/// Index of a duck/tub task (also identifies its duck and its tub)
pub type TaskId = usize;

/// Reference to an audio clip owned by the host
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct AudioCue(pub String);

impl AudioCue {
    pub fn new(name: impl Into<String>) -> Self {
        Self(name.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

/// Named timelines owned by the host
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Sequence {
    /// Level intro, played once per session
    Intro,
    /// Celebration after every task in a round is complete (1-based round)
    RoundWin { round: u32 },
}

/// Presentation commands emitted by the duck session
#[derive(Debug, Clone, PartialEq)]
pub enum DuckCommand {
    PlaySequence(Sequence),
    PlayAudio(AudioCue),
    /// Show the HUD marker for a round (0-based)
    RevealRoundMarker(u32),
    /// Mark a round's HUD marker as won (0-based, same index as the reveal)
    CompleteRoundMarker(u32),
    /// Move the task's tub to its slot and tint its duck and tub
    PlaceTask { task: TaskId, slot: Vec2, color: Rgba },
    /// Show the duck at its start point and swim it to the idle point.
    /// The host answers with `ActorEvent::EntranceArrived`.
    SwimDuck { task: TaskId },
    Quack { task: TaskId },
    /// Activate the tub (scale-in)
    ShowTub { task: TaskId },
    SetDuckInteractable { task: TaskId, interactable: bool },
    SetTubInteractable { task: TaskId, interactable: bool },
    Splash { task: TaskId },
    PlayOutro { task: TaskId },
    /// Deactivate the task's duck and tub
    HideTask { task: TaskId },
    /// Glow the duck and loop the helper hand toward the tub
    ShowHint { task: TaskId, target: Vec2 },
    HideHint { task: TaskId },
}

/// Session-level events for observers (HUD, analytics, tests)
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DuckNotice {
    /// A new round was set up (1-based)
    RoundStarted(u32),
    /// Tasks of the round became interactive
    RoundTasksStarted(u32),
    AnyProgressMade,
    FailedAttempt(TaskId),
    TaskCompleted(TaskId),
    /// Every task of the round is complete (1-based)
    RoundWon(u32),
    HintShown(TaskId),
    SessionEnded,
}
