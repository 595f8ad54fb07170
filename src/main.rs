//! Duck Quiz entry point
//!
//! Native builds run both games headless on the simulated collaborators and
//! print the outcome. Pass a JSON config path as the first argument to
//! override the built-in content.

#[cfg(not(target_arch = "wasm32"))]
mod native {
    use duck_quiz::GameConfig;
    use duck_quiz::consts::{MAX_SUBSTEPS, SIM_DT};
    use duck_quiz::duck::{self, DuckInput, DuckSession};
    use duck_quiz::headless::{DuckAutoplay, DuckHost, QuizAutoplay, QuizHost, current_question};
    use duck_quiz::quiz::{self, QuizInput, QuizSession};
    use duck_quiz::rng::RngState;

    /// Host frame length; the sim catches up in fixed substeps
    const FRAME_DT: f32 = 1.0 / 30.0;
    /// Give up after this much simulated time
    const MAX_SIM_SECONDS: f32 = 900.0;

    /// Drive a session at `FRAME_DT` with a fixed-step accumulator
    struct FrameLoop {
        accumulator: f32,
        elapsed: f32,
    }

    impl FrameLoop {
        fn new() -> Self {
            Self {
                accumulator: 0.0,
                elapsed: 0.0,
            }
        }

        /// Number of sim steps to run for the next frame
        fn frame(&mut self) -> u32 {
            self.accumulator += FRAME_DT;
            self.elapsed += FRAME_DT;
            let mut substeps = 0;
            while self.accumulator >= SIM_DT && substeps < MAX_SUBSTEPS {
                self.accumulator -= SIM_DT;
                substeps += 1;
            }
            substeps
        }

        fn timed_out(&self) -> bool {
            self.elapsed >= MAX_SIM_SECONDS
        }
    }

    fn run_duck(config: &GameConfig, seed: u64) {
        let mut session = match DuckSession::start(config.duck.clone(), RngState::new(seed)) {
            Ok(session) => session,
            Err(err) => {
                log::error!("Duck game config rejected: {}", err);
                return;
            }
        };
        let mut host = DuckHost::new(
            config.duck.task_count,
            DuckAutoplay::default(),
            RngState::new(seed.wrapping_add(1)),
        );

        let mut frames = FrameLoop::new();
        let mut input = DuckInput::default();
        while !session.is_finished() && !frames.timed_out() {
            for _ in 0..frames.frame() {
                duck::tick(&mut session, &input, SIM_DT);
                let commands = session.drain_commands();
                input = host.respond(&commands, SIM_DT);
            }
            for notice in session.drain_notices() {
                log::debug!("{:?}", notice);
            }
        }

        let stats = session.stats();
        if session.is_finished() {
            log::info!("Duck game finished after {:.1}s", frames.elapsed);
        } else {
            log::warn!("Duck game timed out in {:?}", session.phase());
        }
        println!(
            "Ducks: {}/{} rounds, {} tasks done, {} misses, {} hints, {} stalls",
            stats.celebrations,
            session.total_rounds(),
            stats.completions,
            stats.failed_attempts,
            stats.hints_shown,
            stats.stalls
        );
    }

    fn run_quiz(config: &GameConfig, seed: u64) {
        let questions = config.quiz.questions_per_session;
        let mut session = match QuizSession::start(&config.quiz, questions, RngState::new(seed)) {
            Ok(session) => session,
            Err(err) => {
                log::error!("Quiz config rejected: {}", err);
                return;
            }
        };
        let mut host = QuizHost::new(QuizAutoplay::default(), RngState::new(seed.wrapping_add(1)));

        let mut frames = FrameLoop::new();
        let commands = session.drain_commands();
        let mut input: QuizInput = host.respond(&commands, current_question(&session), 0.0);
        while !session.is_finished() && !frames.timed_out() {
            for _ in 0..frames.frame() {
                quiz::tick(&mut session, &input, SIM_DT);
                let commands = session.drain_commands();
                input = host.respond(&commands, current_question(&session), SIM_DT);
            }
        }

        match session.result() {
            Some(result) => println!(
                "Quiz: {}/{} correct, grade \"{}\"",
                result.correct, result.total, result.grade.name
            ),
            None => log::warn!("Quiz timed out on question {}", session.index() + 1),
        }
    }

    pub fn run() {
        env_logger::init();
        log::info!("Duck Quiz (headless) starting...");

        let config = match std::env::args().nth(1) {
            Some(path) => match GameConfig::load(&path) {
                Ok(config) => config,
                Err(err) => {
                    log::error!("Failed to load {}: {}", path, err);
                    std::process::exit(1);
                }
            },
            None => GameConfig::default(),
        };

        let seed = RngState::from_entropy().seed;
        log::info!("Seed: {}", seed);
        run_duck(&config, seed);
        run_quiz(&config, seed);
    }
}

#[cfg(not(target_arch = "wasm32"))]
fn main() {
    native::run();
}

#[cfg(target_arch = "wasm32")]
fn main() {
    // Web hosts drive the library directly
}
