//! Game engine: the single owner of session state
//!
//! The driver holds one `GameEngine` and calls into it from three places:
//! - `update()` / `render_frame()` once per animation frame
//! - `receive_lane_input()` whenever the classifier produces a label
//! - `advance_clock()` with wall-clock deltas (or `tick_second()` from a 1 Hz timer)
//!
//! All three run to completion synchronously. On a platform that delivers
//! these from several threads, wrap the engine in a single mutex.

use std::time::Duration;

use chrono::Local;
use rand::SeedableRng;
use rand_pcg::Pcg32;

use crate::error::EngineWarning;
use crate::highscores::{HighScores, format_date};
use crate::input::parse_lane_signal;
use crate::persistence::KeyValueStore;
use crate::renderer::{DrawCommand, compose_frame};
use crate::settings::GameSettings;
use crate::sim::{Countdown, FrameReport, GamePhase, GameState, Lane, advance_frame};

/// Handler receiving `(score, level)`.
///
/// Handlers run inside engine calls and must not call back into the engine.
pub type ScoreHandler = Box<dyn FnMut(i64, u32)>;

pub struct GameEngine {
    settings: GameSettings,
    state: GameState,
    rng: Pcg32,
    countdown: Countdown,
    store: Box<dyn KeyValueStore>,
    /// Last known leaderboard, so rendering never touches storage
    leaderboard: HighScores,
    on_score_change: Option<ScoreHandler>,
    on_game_end: Option<ScoreHandler>,
    warnings: Vec<EngineWarning>,
}

impl GameEngine {
    /// Engine with the standard rules
    pub fn new(store: impl KeyValueStore + 'static, seed: u64) -> Self {
        Self::with_settings(GameSettings::default(), store, seed)
    }

    pub fn with_settings(
        settings: GameSettings,
        store: impl KeyValueStore + 'static,
        seed: u64,
    ) -> Self {
        let leaderboard = HighScores::load(&store, &settings.storage_key);
        Self {
            state: GameState::new(settings.time_limit),
            rng: Pcg32::seed_from_u64(seed),
            countdown: Countdown::new(),
            store: Box::new(store),
            leaderboard,
            on_score_change: None,
            on_game_end: None,
            warnings: Vec::new(),
            settings,
        }
    }

    // === Lifecycle ===

    /// Begin a new round, unconditionally resetting all session state
    pub fn start(&mut self) {
        self.countdown.cancel();
        self.state = GameState::new(self.settings.time_limit);
        self.state.active = true;
        self.countdown.arm();
        log::info!("Round started ({} s)", self.settings.time_limit);
    }

    /// End the round. No-op if already inactive.
    ///
    /// Records the final score and fires the game-end handler exactly once per
    /// round. A leaderboard write failure does not abort the stop; it is queued
    /// as a warning (see `take_warnings`).
    pub fn stop(&mut self) {
        if !self.state.active {
            return;
        }

        self.state.active = false;
        self.countdown.cancel();

        let score = self.state.score;
        let level = self.state.level;
        log::info!("Round over: score {score}");

        self.record_score(score);

        if let Some(handler) = self.on_game_end.as_mut() {
            handler(score, level);
        }
    }

    /// Append a score to the persisted leaderboard.
    /// Returns the rank achieved (1-indexed) if it made the top 5.
    pub fn record_score(&mut self, score: i64) -> Option<usize> {
        let key = &self.settings.storage_key;
        let mut board = HighScores::load(&*self.store, key);
        let rank = board.record(score, format_date(Local::now()));

        if let Err(source) = board.save(&mut *self.store, key) {
            log::warn!("Failed to save high scores: {source}");
            self.warnings
                .push(EngineWarning::LeaderboardWrite { score, source });
        }

        match rank {
            Some(rank) => log::info!("Score {score} placed #{rank} on the leaderboard"),
            None => log::info!("Score {score} did not make the leaderboard"),
        }

        self.leaderboard = board;
        rank
    }

    /// Show or hide the post-game leaderboard overlay
    pub fn set_show_summary(&mut self, show: bool) {
        self.state.show_summary = show;
    }

    // === Per-frame ===

    /// Advance one frame and fire score handlers for any catches.
    /// No-op while inactive.
    pub fn update(&mut self) -> FrameReport {
        let report = advance_frame(&mut self.state, &self.settings, &mut self.rng);

        if let Some(handler) = self.on_score_change.as_mut() {
            for catch in &report.catches {
                handler(catch.score_after, self.state.level);
            }
        }

        report
    }

    /// Draw commands for the current state.
    ///
    /// Only the summary screen's blink timer advances here; score, time and
    /// items are never touched.
    pub fn render_frame(&mut self) -> Vec<DrawCommand> {
        if self.state.show_summary && !self.state.active {
            self.state.frame_count = self.state.frame_count.wrapping_add(1);
        }
        compose_frame(&self.state, &self.settings, &self.leaderboard)
    }

    /// `render_frame` as a JSON array, for hosts that draw outside Rust
    pub fn render_frame_json(&mut self) -> Result<String, serde_json::Error> {
        serde_json::to_string(&self.render_frame())
    }

    // === Input ===

    /// Move the basket from a classifier label. Unrecognized labels and
    /// inactive rounds are ignored.
    pub fn receive_lane_input(&mut self, signal: &str) {
        if !self.state.active {
            return;
        }
        if let Some(lane) = parse_lane_signal(signal) {
            self.state.basket = lane;
        }
    }

    // === Clock ===

    /// Feed elapsed wall time to the round countdown
    pub fn advance_clock(&mut self, dt: Duration) {
        let fired = self.countdown.advance(dt);
        for _ in 0..fired {
            if !self.state.active {
                break;
            }
            self.tick_second();
        }
    }

    /// One countdown second. Ends the round when the clock reaches zero.
    pub fn tick_second(&mut self) {
        if !self.state.active {
            return;
        }
        self.state.remaining_secs = self.state.remaining_secs.saturating_sub(1);
        if self.state.remaining_secs == 0 {
            self.stop();
        }
    }

    // === Handlers ===

    /// Register the catch handler; replaces any previous one
    pub fn set_score_change_callback(&mut self, handler: impl FnMut(i64, u32) + 'static) {
        self.on_score_change = Some(Box::new(handler));
    }

    /// Register the round-end handler; replaces any previous one
    pub fn set_game_end_callback(&mut self, handler: impl FnMut(i64, u32) + 'static) {
        self.on_game_end = Some(Box::new(handler));
    }

    /// Drain warnings collected since the last call
    pub fn take_warnings(&mut self) -> Vec<EngineWarning> {
        std::mem::take(&mut self.warnings)
    }

    // === Accessors ===

    pub fn state(&self) -> &GameState {
        &self.state
    }

    /// Raw state access for placing items in tests; bypasses the countdown
    #[cfg(test)]
    pub(crate) fn state_mut(&mut self) -> &mut GameState {
        &mut self.state
    }

    pub fn settings(&self) -> &GameSettings {
        &self.settings
    }

    pub fn leaderboard(&self) -> &HighScores {
        &self.leaderboard
    }

    pub fn is_active(&self) -> bool {
        self.state.active
    }

    pub fn phase(&self) -> GamePhase {
        self.state.phase()
    }

    pub fn score(&self) -> i64 {
        self.state.score
    }

    pub fn remaining_secs(&self) -> u32 {
        self.state.remaining_secs
    }

    pub fn basket(&self) -> Lane {
        self.state.basket
    }

    pub fn is_clock_running(&self) -> bool {
        self.countdown.is_armed()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::StorageError;
    use crate::persistence::MemoryStore;
    use crate::sim::ItemKind;
    use std::cell::RefCell;
    use std::rc::Rc;

    type Calls = Rc<RefCell<Vec<(i64, u32)>>>;

    fn engine() -> (GameEngine, MemoryStore) {
        let store = MemoryStore::new();
        (GameEngine::new(store.clone(), 42), store)
    }

    fn record_calls(engine: &mut GameEngine) -> (Calls, Calls) {
        let scores: Calls = Rc::default();
        let ends: Calls = Rc::default();
        let s = scores.clone();
        engine.set_score_change_callback(move |score, level| s.borrow_mut().push((score, level)));
        let e = ends.clone();
        engine.set_game_end_callback(move |score, level| e.borrow_mut().push((score, level)));
        (scores, ends)
    }

    fn stored_board(store: &MemoryStore) -> HighScores {
        HighScores::load(store, "fruitCatcherHighScores")
    }

    struct ReadOnlyStore;

    impl KeyValueStore for ReadOnlyStore {
        fn get(&self, _key: &str) -> Result<Option<String>, StorageError> {
            Ok(None)
        }

        fn set(&mut self, _key: &str, _value: &str) -> Result<(), StorageError> {
            Err(StorageError::Unavailable("read-only".to_string()))
        }
    }

    #[test]
    fn test_new_engine_is_idle() {
        let (engine, _) = engine();
        assert_eq!(engine.phase(), GamePhase::Idle);
        assert!(!engine.is_clock_running());
    }

    #[test]
    fn test_start_resets_everything() {
        let (mut engine, _) = engine();
        engine.start();
        engine.receive_lane_input("left");
        engine.state_mut().score = 120;
        engine.state_mut().push_item(Lane::Left, 100.0, ItemKind::Bomb);
        engine.tick_second();
        engine.stop();
        engine.set_show_summary(true);

        engine.start();
        assert!(engine.is_active());
        assert_eq!(engine.score(), 0);
        assert_eq!(engine.remaining_secs(), 30);
        assert!(engine.state().items.is_empty());
        assert_eq!(engine.basket(), Lane::Center);
        assert_eq!(engine.state().frame_count, 0);
        assert!(!engine.state().show_summary);
        assert!(engine.is_clock_running());
    }

    #[test]
    fn test_start_while_active_restarts() {
        let (mut engine, store) = engine();
        let (_, ends) = record_calls(&mut engine);
        engine.start();
        engine.state_mut().score = 50;
        engine.start();
        assert_eq!(engine.score(), 0);
        assert!(ends.borrow().is_empty());
        assert!(stored_board(&store).is_empty());
    }

    #[test]
    fn test_catch_fires_score_change() {
        let (mut engine, _) = engine();
        let (scores, _) = record_calls(&mut engine);
        engine.start();
        engine.state_mut().push_item(Lane::Center, 520.0, ItemKind::Apple);
        engine.state_mut().basket = Lane::Center;

        let report = engine.update();
        assert!(report.spawned.is_none());
        assert_eq!(engine.score(), 10);
        assert!(engine.state().items.is_empty());
        assert_eq!(*scores.borrow(), vec![(10, 1)]);
    }

    #[test]
    fn test_apple_then_bomb_scores_negative() {
        let (mut engine, _) = engine();
        let (scores, _) = record_calls(&mut engine);
        engine.start();
        engine.state_mut().push_item(Lane::Center, 510.0, ItemKind::Apple);
        engine.update();
        engine.state_mut().push_item(Lane::Center, 510.0, ItemKind::Bomb);
        engine.update();
        assert_eq!(engine.score(), -40);
        assert_eq!(*scores.borrow(), vec![(10, 1), (-40, 1)]);
    }

    #[test]
    fn test_update_inactive_is_noop() {
        let (mut engine, _) = engine();
        engine.state_mut().push_item(Lane::Center, 520.0, ItemKind::Apple);
        engine.update();
        assert_eq!(engine.score(), 0);
        assert_eq!(engine.state().frame_count, 0);
        assert_eq!(engine.state().items.len(), 1);
    }

    #[test]
    fn test_stop_is_idempotent() {
        let (mut engine, store) = engine();
        let (_, ends) = record_calls(&mut engine);
        engine.start();
        engine.state_mut().score = 30;
        engine.stop();
        engine.stop();

        assert_eq!(*ends.borrow(), vec![(30, 1)]);
        assert_eq!(stored_board(&store).entries.len(), 1);
        assert_eq!(engine.leaderboard().top_score(), Some(30));
        assert!(!engine.is_clock_running());
    }

    #[test]
    fn test_stop_before_start_does_nothing() {
        let (mut engine, store) = engine();
        let (_, ends) = record_calls(&mut engine);
        engine.stop();
        assert!(ends.borrow().is_empty());
        assert!(stored_board(&store).is_empty());
    }

    #[test]
    fn test_clock_expiry_ends_round_once() {
        let (mut engine, store) = engine();
        let (_, ends) = record_calls(&mut engine);
        engine.start();

        engine.advance_clock(Duration::from_millis(29_500));
        assert!(engine.is_active());
        assert_eq!(engine.remaining_secs(), 1);

        engine.advance_clock(Duration::from_millis(600));
        assert!(!engine.is_active());
        assert_eq!(engine.remaining_secs(), 0);
        assert_eq!(ends.borrow().len(), 1);

        // An explicit stop racing the timer changes nothing
        engine.stop();
        engine.advance_clock(Duration::from_secs(10));
        assert_eq!(ends.borrow().len(), 1);
        assert_eq!(stored_board(&store).entries.len(), 1);
    }

    #[test]
    fn test_oversized_clock_step_stops_at_zero() {
        let (mut engine, _) = engine();
        engine.start();
        engine.advance_clock(Duration::from_secs(45));
        assert!(!engine.is_active());
        assert_eq!(engine.remaining_secs(), 0);
    }

    #[test]
    fn test_render_frame_json_matches_commands() {
        let (mut engine, _) = engine();
        engine.start();
        engine.receive_lane_input("left");
        let json = engine.render_frame_json().unwrap();
        let decoded: Vec<DrawCommand> = serde_json::from_str(&json).unwrap();
        assert_eq!(
            decoded,
            compose_frame(engine.state(), engine.settings(), engine.leaderboard())
        );
    }

    #[test]
    fn test_unbounded_clock_step_ends_round_once() {
        let (mut engine, store) = engine();
        let (_, ends) = record_calls(&mut engine);
        engine.start();
        engine.advance_clock(Duration::MAX);
        assert!(!engine.is_active());
        assert_eq!(engine.remaining_secs(), 0);
        assert_eq!(ends.borrow().len(), 1);
        assert_eq!(stored_board(&store).entries.len(), 1);
    }

    #[test]
    fn test_clock_runs_only_while_active() {
        let (mut engine, _) = engine();
        assert_eq!(engine.is_active(), engine.is_clock_running());
        engine.start();
        assert!(engine.is_active() && engine.is_clock_running());
        engine.stop();
        assert!(!engine.is_active() && !engine.is_clock_running());
        engine.set_show_summary(true);
        assert!(!engine.is_clock_running());
    }

    #[test]
    fn test_record_score_reports_rank() {
        let (mut engine, _) = engine();
        assert_eq!(engine.record_score(20), Some(1));
        assert_eq!(engine.record_score(40), Some(1));
        assert_eq!(engine.record_score(30), Some(2));
        for _ in 0..2 {
            engine.record_score(100);
        }
        assert_eq!(engine.record_score(-5), None);
        assert_eq!(engine.leaderboard().entries.len(), 5);
    }

    #[test]
    fn test_restarts_do_not_compound_ticks() {
        let (mut engine, _) = engine();
        for _ in 0..3 {
            engine.start();
            engine.advance_clock(Duration::from_millis(700));
            engine.stop();
        }
        engine.start();
        engine.advance_clock(Duration::from_millis(999));
        assert_eq!(engine.remaining_secs(), 30);
        engine.advance_clock(Duration::from_millis(1));
        assert_eq!(engine.remaining_secs(), 29);
    }

    #[test]
    fn test_frozen_after_stop() {
        let (mut engine, _) = engine();
        engine.start();
        engine.tick_second();
        engine.state_mut().push_item(Lane::Center, 100.0, ItemKind::Apple);
        engine.stop();

        engine.update();
        engine.tick_second();
        engine.receive_lane_input("left");
        assert_eq!(engine.remaining_secs(), 29);
        assert_eq!(engine.state().items[0].y, 100.0);
        assert_eq!(engine.basket(), Lane::Center);
    }

    #[test]
    fn test_lane_input() {
        let (mut engine, _) = engine();
        engine.start();
        engine.receive_lane_input("Left_Tilt_Strong");
        assert_eq!(engine.basket(), Lane::Left);
        engine.receive_lane_input("jump");
        assert_eq!(engine.basket(), Lane::Left);
    }

    #[test]
    fn test_last_input_wins_before_update() {
        let (mut engine, _) = engine();
        let (scores, _) = record_calls(&mut engine);
        engine.start();
        engine.state_mut().push_item(Lane::Right, 520.0, ItemKind::Orange);
        engine.receive_lane_input("left");
        engine.receive_lane_input("center");
        engine.receive_lane_input("RIGHT");
        engine.update();
        assert_eq!(*scores.borrow(), vec![(20, 1)]);
    }

    #[test]
    fn test_last_registered_handler_wins() {
        let (mut engine, _) = engine();
        let first: Calls = Rc::default();
        let f = first.clone();
        engine.set_score_change_callback(move |s, l| f.borrow_mut().push((s, l)));
        let (scores, _) = record_calls(&mut engine);

        engine.start();
        engine.state_mut().push_item(Lane::Center, 520.0, ItemKind::Banana);
        engine.update();
        assert!(first.borrow().is_empty());
        assert_eq!(*scores.borrow(), vec![(30, 1)]);
    }

    #[test]
    fn test_leaderboard_keeps_top_five() {
        let (mut engine, store) = engine();
        for score in [50, 40, 30, 20, 10, 5] {
            engine.start();
            engine.state_mut().score = score;
            engine.stop();
        }
        let board = stored_board(&store);
        let scores: Vec<i64> = board.entries.iter().map(|e| e.score).collect();
        assert_eq!(scores, vec![50, 40, 30, 20, 10]);
    }

    #[test]
    fn test_write_failure_is_a_warning() {
        let mut engine = GameEngine::new(ReadOnlyStore, 1);
        let (_, ends) = record_calls(&mut engine);
        engine.start();
        engine.state_mut().score = 10;
        engine.stop();

        assert!(!engine.is_active());
        assert_eq!(ends.borrow().len(), 1);
        let warnings = engine.take_warnings();
        assert_eq!(warnings.len(), 1);
        assert!(matches!(
            warnings[0],
            EngineWarning::LeaderboardWrite { score: 10, .. }
        ));
        assert!(engine.take_warnings().is_empty());
    }

    #[test]
    fn test_corrupt_storage_loads_empty() {
        let mut store = MemoryStore::new();
        store.set("fruitCatcherHighScores", "garbage").unwrap();
        let mut engine = GameEngine::new(store.clone(), 3);
        assert!(engine.leaderboard().is_empty());

        engine.start();
        engine.stop();
        assert_eq!(stored_board(&store).entries.len(), 1);
    }

    #[test]
    fn test_render_does_not_mutate_game() {
        let (mut engine, _) = engine();
        engine.start();
        engine.state_mut().push_item(Lane::Left, 200.0, ItemKind::Apple);
        let before = engine.state().clone();
        engine.render_frame();
        engine.render_frame();
        let after = engine.state();
        assert_eq!(before.items, after.items);
        assert_eq!(before.score, after.score);
        assert_eq!(before.remaining_secs, after.remaining_secs);
        assert_eq!(before.frame_count, after.frame_count);
    }

    #[test]
    fn test_summary_hint_blinks_across_frames() {
        let (mut engine, _) = engine();
        engine.start();
        engine.stop();
        engine.set_show_summary(true);
        assert_eq!(engine.phase(), GamePhase::Summary);

        let hint_visible = |cmds: &[DrawCommand]| {
            cmds.iter().any(|c| {
                matches!(c, DrawCommand::Text { text, .. } if text.starts_with("Press Restart"))
            })
        };

        let mut visible = Vec::new();
        for _ in 0..60 {
            visible.push(hint_visible(&engine.render_frame()));
        }
        assert!(visible.iter().any(|v| *v));
        assert!(visible.iter().any(|v| !*v));
        assert_eq!(engine.score(), 0);
    }

    #[test]
    fn test_time_limit_drives_difficulty() {
        let settings = GameSettings {
            time_limit: 60,
            ..Default::default()
        };
        let mut engine = GameEngine::with_settings(settings, MemoryStore::new(), 9);
        engine.start();
        assert_eq!(engine.remaining_secs(), 60);
        engine.state_mut().push_item(Lane::Left, 0.0, ItemKind::Apple);
        engine.update();
        // Round start: base speed, not the 30-seconds-elapsed ramp
        assert_eq!(engine.state().items[0].y, 5.0);
    }
}
