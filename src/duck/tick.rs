//! Fixed timestep session tick
//!
//! Advances the duck session: routes actor events to their tasks, runs the
//! hint and HUD timers, and moves through the round phases.

use super::actor::ActorEvent;
use super::session::{DuckPhase, DuckSession, OutroStep};
use super::task::TaskSignal;
use super::{DuckCommand, DuckNotice, Sequence, TaskId};
use crate::countdown;

/// Collaborator events delivered during one tick
#[derive(Debug, Clone, Default)]
pub struct DuckInput {
    pub events: Vec<(TaskId, ActorEvent)>,
}

impl DuckInput {
    pub fn single(task: TaskId, event: ActorEvent) -> Self {
        Self {
            events: vec![(task, event)],
        }
    }

    pub fn push(&mut self, task: TaskId, event: ActorEvent) {
        self.events.push((task, event));
    }

    pub fn is_empty(&self) -> bool {
        self.events.is_empty()
    }
}

/// Advance the session by one timestep
pub fn tick(session: &mut DuckSession, input: &DuckInput, dt: f32) {
    if session.phase == DuckPhase::SessionEnd {
        return;
    }

    for task in &mut session.tasks {
        task.tick(dt, &mut session.commands);
    }

    for &(task_id, event) in &input.events {
        route_event(session, task_id, event);
    }

    match session.phase {
        DuckPhase::Intro => {
            if countdown(&mut session.timer, dt) {
                log::info!("Intro finished");
                session.hud.begin_reveal();
                start_round(session);
            }
        }
        DuckPhase::RoundSetup => start_round(session),
        DuckPhase::EntranceWait => step_entrance(session, dt),
        DuckPhase::TubReveal => step_tub_reveal(session, dt),
        DuckPhase::TasksActive => step_tasks(session, dt),
        DuckPhase::RoundCelebration => {
            if countdown(&mut session.timer, dt) {
                begin_outro(session);
            }
        }
        DuckPhase::OutroReveal => step_outro(session, dt),
        DuckPhase::SessionEnd => {}
    }

    session.hud.tick(dt, &mut session.commands);
}

fn route_event(session: &mut DuckSession, task_id: TaskId, event: ActorEvent) {
    let Some(task) = session.tasks.get_mut(task_id) else {
        log::warn!("Event {:?} for unknown task {}", event, task_id);
        return;
    };
    if let Some(signal) = task.handle(event, &mut session.commands) {
        on_signal(session, task_id, signal);
    }
}

fn on_signal(session: &mut DuckSession, task_id: TaskId, signal: TaskSignal) {
    match signal {
        TaskSignal::EntranceFinished => {
            log::debug!("Task {} entrance finished", task_id);
            session
                .commands
                .push(DuckCommand::PlayAudio(session.settings.quack_cue.clone()));
        }
        TaskSignal::Grabbed => {
            session.help.on_progress();
        }
        TaskSignal::Progress => {
            session.help.on_progress();
            session.notices.push(DuckNotice::AnyProgressMade);
        }
        TaskSignal::FailedAttempt => {
            log::debug!("Task {} failed attempt", task_id);
            session.stats.failed_attempts += 1;
            session
                .commands
                .push(DuckCommand::PlayAudio(session.settings.try_again_cue.clone()));
            session.notices.push(DuckNotice::FailedAttempt(task_id));
        }
        TaskSignal::Completed => on_task_completed(session, task_id),
    }
}

fn on_task_completed(session: &mut DuckSession, task_id: TaskId) {
    session.stats.completions += 1;
    if let Some(goal) = session.tasks[task_id].assignment().map(|a| a.goal.audio.clone()) {
        session.commands.push(DuckCommand::PlayAudio(goal));
    }
    session.notices.push(DuckNotice::TaskCompleted(task_id));
    log::debug!("Task {} completed", task_id);

    if session.phase == DuckPhase::TasksActive && session.tasks.iter().all(|t| t.is_completed()) {
        celebrate(session);
    }
}

/// RoundSetup: reset, reassign and send every duck in
fn start_round(session: &mut DuckSession) {
    session.phase = DuckPhase::RoundSetup;
    session.round += 1;

    for task in &mut session.tasks {
        task.reset(&mut session.commands);
    }
    let assignments = session.pool.draw(&mut session.rng);
    for assignment in assignments {
        let id = assignment.task;
        session.tasks[id].initialize(assignment, &mut session.commands);
    }
    session.notices.push(DuckNotice::RoundStarted(session.round));
    log::info!("Round {}/{} started", session.round, session.settings.rounds);

    for task in &mut session.tasks {
        task.play_entrance(&mut session.commands);
    }
    session.phase = DuckPhase::EntranceWait;
    session.waited = 0.0;
}

fn step_entrance(session: &mut DuckSession, dt: f32) {
    if !session.tasks.iter().all(|t| t.entrance_finished()) {
        session.waited += dt;
        if session.waited <= session.settings.callback_timeout {
            return;
        }
        log::warn!(
            "Entrance callbacks missing after {:.1}s, continuing",
            session.waited
        );
        session.stats.stalls += 1;
        for id in 0..session.tasks.len() {
            if let Some(signal) = session.tasks[id].force_arrival(&mut session.commands) {
                on_signal(session, id, signal);
            }
        }
    }
    session.order = left_to_right(session);
    session.cursor = 0;
    session.timer = 0.0;
    session.phase = DuckPhase::TubReveal;
}

/// Enable one tub, wait the interval, repeat; then open the tasks
fn step_tub_reveal(session: &mut DuckSession, dt: f32) {
    if !countdown(&mut session.timer, dt) {
        return;
    }
    if let Some(&id) = session.order.get(session.cursor) {
        session.tasks[id].enable_tub(&mut session.commands);
        session.cursor += 1;
        session.timer = session.settings.tub_interval;
        return;
    }

    for task in &mut session.tasks {
        task.enable_interaction(&mut session.commands);
    }
    session.help.on_round_started();
    session.phase = DuckPhase::TasksActive;
    session.notices.push(DuckNotice::RoundTasksStarted(session.round));
    log::info!("Round {} tasks active", session.round);
}

fn step_tasks(session: &mut DuckSession, dt: f32) {
    if let Some(id) = session.help.tick(dt, &session.tasks, &mut session.rng) {
        let duration = session.settings.hint_duration;
        if session.tasks[id].enable_hint(duration, &mut session.commands) {
            log::debug!("Hint shown for task {}", id);
            session.stats.hints_shown += 1;
            session.notices.push(DuckNotice::HintShown(id));
        }
    }
}

fn celebrate(session: &mut DuckSession) {
    session.help.on_round_completed();
    session.stats.celebrations += 1;
    session.notices.push(DuckNotice::RoundWon(session.round));
    session.hud.complete(session.round, &mut session.commands);
    session.commands.push(DuckCommand::PlaySequence(Sequence::RoundWin {
        round: session.round,
    }));
    session.timer = session.settings.celebration_duration;
    session.phase = DuckPhase::RoundCelebration;
    log::info!("Round {} won", session.round);
}

fn begin_outro(session: &mut DuckSession) {
    session.order = left_to_right(session);
    session.cursor = 0;
    session.phase = DuckPhase::OutroReveal;
    play_current_outro(session);
}

fn play_current_outro(session: &mut DuckSession) {
    match session.order.get(session.cursor) {
        Some(&id) => {
            session.tasks[id].play_outro(&mut session.commands);
            session.outro_step = OutroStep::Playing;
            session.timer = session.settings.outro_duration;
        }
        None => finish_round(session),
    }
}

/// Outro, hide, gap; next task
fn step_outro(session: &mut DuckSession, dt: f32) {
    if !countdown(&mut session.timer, dt) {
        return;
    }
    match session.outro_step {
        OutroStep::Playing => {
            if let Some(&id) = session.order.get(session.cursor) {
                session.tasks[id].hide(&mut session.commands);
            }
            session.outro_step = OutroStep::Gap;
            session.timer = session.settings.tub_interval;
        }
        OutroStep::Gap => {
            session.cursor += 1;
            play_current_outro(session);
        }
    }
}

fn finish_round(session: &mut DuckSession) {
    if session.round < session.settings.rounds {
        start_round(session);
    } else {
        session.phase = DuckPhase::SessionEnd;
        session.notices.push(DuckNotice::SessionEnded);
        log::info!(
            "Duck session finished after {} rounds ({} failed attempts, {} hints)",
            session.round,
            session.stats.failed_attempts,
            session.stats.hints_shown
        );
    }
}

fn left_to_right(session: &DuckSession) -> Vec<TaskId> {
    let mut order: Vec<TaskId> = (0..session.tasks.len()).collect();
    order.sort_by(|&a, &b| {
        session.tasks[a]
            .slot_x()
            .total_cmp(&session.tasks[b].slot_x())
    });
    order
}
