//! Duck Quiz - orchestration core for two casual minigames
//!
//! Core modules:
//! - `duck`: Drag-duck-to-tub rounds (tasks, hint advisor, round session)
//! - `quiz`: Multiple-choice quiz (question rounds, grading, session)
//! - `settings`: Data-driven game configuration
//! - `rng`: Randomness capability over `rand`
//! - `headless`: Simulated collaborators for autoplay and end-to-end runs
//!
//! Both games are deterministic state machines advanced by a fixed timestep.
//! Hosts feed collaborator events in through a per-tick input and drain the
//! resulting presentation commands.

pub mod duck;
pub mod error;
pub mod headless;
pub mod quiz;
pub mod rng;
pub mod settings;

pub use error::ConfigError;
pub use settings::{DuckSettings, GameConfig, QuizSettings};

/// RGBA color, components in 0-1
pub type Rgba = glam::Vec4;

/// Game configuration constants
pub mod consts {
    /// Fixed simulation timestep (60 Hz is plenty for sequencing)
    pub const SIM_DT: f32 = 1.0 / 60.0;
    /// Maximum substeps per frame to prevent spiral of death
    pub const MAX_SUBSTEPS: u32 = 8;

    /// Duck swim from start point to idle point (seconds)
    pub const DUCK_SWIM_DURATION: f32 = 3.0;
    /// Duck jump arc into a tub or back home (seconds)
    pub const DUCK_JUMP_DURATION: f32 = 0.5;
    /// Halfway point of the jump, where the correct-drop progress fires
    pub const DUCK_JUMP_HALFWAY: f32 = DUCK_JUMP_DURATION * 0.5;

    /// Delay between answer buttons appearing
    pub const ANSWER_REVEAL_STAGGER: f32 = 0.1;
    /// Pause after the last answer animation before the question outro
    pub const QUESTION_OUTRO_LEAD: f32 = 0.5;
    /// Length of the question outro (end animation + button disable)
    pub const QUESTION_OUTRO_TAIL: f32 = 0.5;
}

/// Advance a countdown timer, returning true once it has run out.
///
/// A zero-length wait expires on the first tick.
#[inline]
pub fn countdown(timer: &mut f32, dt: f32) -> bool {
    *timer -= dt;
    *timer <= 0.0
}
