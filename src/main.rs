//! Fruit Catcher entry point
//!
//! Native builds run a headless round: lane labels are read from stdin (one per
//! line, e.g. `left`, `Center_Tilt`, `right`; `stop` ends the round early) and
//! the frame loop runs at ~60 Hz. Web builds start from `wasm_start` in the
//! library.

#[cfg(not(target_arch = "wasm32"))]
mod native {
    use std::cell::Cell;
    use std::io::BufRead;
    use std::rc::Rc;
    use std::sync::mpsc::{self, Receiver, TryRecvError};
    use std::time::{Duration, Instant, SystemTime, UNIX_EPOCH};

    use fruit_catcher::GameEngine;
    use fruit_catcher::persistence::FileStore;

    const FRAME_TIME: Duration = Duration::from_micros(16_667);
    const DATA_DIR_ENV: &str = "FRUIT_CATCHER_DATA";
    const DEFAULT_DATA_DIR: &str = ".fruit-catcher";

    /// Forward stdin lines to the frame loop so the engine is only touched there
    fn spawn_input_reader() -> Receiver<String> {
        let (tx, rx) = mpsc::channel();
        std::thread::spawn(move || {
            let stdin = std::io::stdin();
            for line in stdin.lock().lines() {
                let Ok(line) = line else { break };
                if tx.send(line.trim().to_string()).is_err() {
                    break;
                }
            }
        });
        rx
    }

    fn seed_from_clock() -> u64 {
        SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .map(|d| d.as_nanos() as u64)
            .unwrap_or(0)
    }

    pub fn run() {
        let data_dir = std::env::var(DATA_DIR_ENV).unwrap_or_else(|_| DEFAULT_DATA_DIR.to_string());
        let seed = seed_from_clock();
        log::info!("Using data dir {data_dir}, seed {seed}");

        let mut engine = GameEngine::new(FileStore::new(&data_dir), seed);

        engine.set_score_change_callback(|score, _level| {
            log::info!("Score: {score}");
        });

        let ended = Rc::new(Cell::new(None));
        {
            let ended = ended.clone();
            engine.set_game_end_callback(move |score, level| ended.set(Some((score, level))));
        }

        let input = spawn_input_reader();
        let mut input_open = true;

        println!("Fruit Catcher: type left / center / right (Enter) to move the basket, stop to quit");
        engine.start();

        let mut last = Instant::now();
        let mut last_shown_secs = engine.remaining_secs();

        loop {
            let frame_start = Instant::now();

            while input_open {
                match input.try_recv() {
                    Ok(line) if line.eq_ignore_ascii_case("stop") => engine.stop(),
                    Ok(line) => engine.receive_lane_input(&line),
                    Err(TryRecvError::Empty) => break,
                    Err(TryRecvError::Disconnected) => {
                        log::info!("Input closed; round continues until the clock runs out");
                        input_open = false;
                    }
                }
            }

            engine.update();
            let commands = engine.render_frame();

            let now = Instant::now();
            engine.advance_clock(now - last);
            last = now;

            if engine.remaining_secs() != last_shown_secs && engine.is_active() {
                last_shown_secs = engine.remaining_secs();
                log::debug!(
                    "Time {} | score {} | {} items | {} draw commands",
                    last_shown_secs,
                    engine.score(),
                    engine.state().items.len(),
                    commands.len()
                );
            }

            if let Some((score, _level)) = ended.take() {
                for warning in engine.take_warnings() {
                    log::warn!("{warning}");
                }
                println!("Game Over! Your Score: {score}");
                engine.set_show_summary(true);
                print_leaderboard(&engine);
                break;
            }

            if let Some(rest) = FRAME_TIME.checked_sub(frame_start.elapsed()) {
                std::thread::sleep(rest);
            }
        }
    }

    fn print_leaderboard(engine: &GameEngine) {
        println!("HALL OF FAME");
        for (index, entry) in engine.leaderboard().entries.iter().enumerate() {
            println!("{}. {} pts ({})", index + 1, entry.score, entry.date);
        }
    }
}

#[cfg(not(target_arch = "wasm32"))]
fn main() {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();
    log::info!("Fruit Catcher (native) starting...");
    native::run();
}

#[cfg(target_arch = "wasm32")]
fn main() {
    // WASM entry point is wasm_start in the library, this is just to satisfy the compiler
}
