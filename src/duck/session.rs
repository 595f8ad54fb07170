//! Duck session state
//!
//! Everything a running session needs lives here; `tick` advances it.

use rand_pcg::Pcg32;

use super::assign::AssignmentPool;
use super::help::HelpAdvisor;
use super::hud::RoundHud;
use super::task::DuckTask;
use super::{DuckCommand, DuckNotice, Sequence, TaskId};
use crate::error::ConfigError;
use crate::rng::RngState;
use crate::settings::DuckSettings;

/// Session phase
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DuckPhase {
    /// Intro timeline playing
    Intro,
    /// Tasks reset and reassigned (instantaneous)
    RoundSetup,
    /// Ducks swimming in; waits for every task
    EntranceWait,
    /// Tubs appearing left to right
    TubReveal,
    /// Player is matching ducks
    TasksActive,
    /// Round-win timeline playing
    RoundCelebration,
    /// Task outros playing left to right
    OutroReveal,
    /// All rounds done
    SessionEnd,
}

/// Where an outro step is within the current task
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum OutroStep {
    Playing,
    Gap,
}

/// Counters for observers and tests
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct DuckStats {
    pub celebrations: u32,
    pub completions: u32,
    pub failed_attempts: u32,
    pub hints_shown: u32,
    /// Waits that ended on the stall guard instead of a callback
    pub stalls: u32,
}

#[derive(Debug)]
pub struct DuckSession {
    pub(crate) settings: DuckSettings,
    pub(crate) pool: AssignmentPool,
    pub(crate) rng_state: RngState,
    pub(crate) rng: Pcg32,
    pub(crate) phase: DuckPhase,
    pub(crate) tasks: Vec<DuckTask>,
    pub(crate) help: HelpAdvisor,
    pub(crate) hud: RoundHud,
    /// Rounds started so far (1-based once the first round begins)
    pub(crate) round: u32,
    /// Countdown for the current timed step
    pub(crate) timer: f32,
    /// Time spent waiting on collaborator callbacks in this phase
    pub(crate) waited: f32,
    /// Left-to-right task order for tub reveal and outro
    pub(crate) order: Vec<TaskId>,
    pub(crate) cursor: usize,
    pub(crate) outro_step: OutroStep,
    pub(crate) commands: Vec<DuckCommand>,
    pub(crate) notices: Vec<DuckNotice>,
    pub(crate) stats: DuckStats,
}

impl DuckSession {
    /// Validate the settings and start the intro.
    ///
    /// Fails before any command is emitted when the pools disagree or the
    /// session has no rounds.
    pub fn start(settings: DuckSettings, rng_state: RngState) -> Result<Self, ConfigError> {
        if settings.rounds == 0 {
            return Err(ConfigError::NoRounds);
        }
        let pool = AssignmentPool::new(
            settings.task_count,
            settings.slots.clone(),
            settings.goals.clone(),
        )?;

        let tasks = (0..pool.task_count()).map(DuckTask::new).collect();
        let help = HelpAdvisor::new(settings.hint_cooldown);
        let hud = RoundHud::new(settings.rounds, settings.round_marker_interval);

        let mut session = Self {
            rng: rng_state.to_rng(),
            rng_state,
            phase: DuckPhase::Intro,
            tasks,
            help,
            hud,
            round: 0,
            timer: settings.intro_duration,
            waited: 0.0,
            order: Vec::new(),
            cursor: 0,
            outro_step: OutroStep::Playing,
            commands: Vec::new(),
            notices: Vec::new(),
            stats: DuckStats::default(),
            pool,
            settings,
        };
        session
            .commands
            .push(DuckCommand::PlaySequence(Sequence::Intro));

        log::info!(
            "Duck session starting: {} rounds, {} tasks, seed {}",
            session.settings.rounds,
            session.tasks.len(),
            session.rng_state.seed
        );
        Ok(session)
    }

    /// Start with a fresh random seed
    pub fn start_random(settings: DuckSettings) -> Result<Self, ConfigError> {
        Self::start(settings, RngState::from_entropy())
    }

    pub fn phase(&self) -> DuckPhase {
        self.phase
    }

    pub fn is_finished(&self) -> bool {
        self.phase == DuckPhase::SessionEnd
    }

    /// Rounds started so far
    pub fn round(&self) -> u32 {
        self.round
    }

    pub fn total_rounds(&self) -> u32 {
        self.settings.rounds
    }

    pub fn tasks(&self) -> &[DuckTask] {
        &self.tasks
    }

    pub fn task(&self, id: TaskId) -> Option<&DuckTask> {
        self.tasks.get(id)
    }

    pub fn settings(&self) -> &DuckSettings {
        &self.settings
    }

    pub fn seed(&self) -> u64 {
        self.rng_state.seed
    }

    pub fn stats(&self) -> DuckStats {
        self.stats
    }

    pub fn help(&self) -> &HelpAdvisor {
        &self.help
    }

    /// Take the presentation commands queued since the last drain
    pub fn drain_commands(&mut self) -> Vec<DuckCommand> {
        std::mem::take(&mut self.commands)
    }

    /// Take the notices queued since the last drain
    pub fn drain_notices(&mut self) -> Vec<DuckNotice> {
        std::mem::take(&mut self.notices)
    }
}
