//! Frame driver
//!
//! One simulation tick and one render per host frame, no fixed-timestep
//! accumulator. When the ship is destroyed the driver reports the session's
//! final score and immediately starts a fresh session.

use rand::RngCore;

use crate::platform::InputLatch;
use crate::renderer::{Surface, render};
use crate::settings::{Settings, SettingsError};
use crate::sim::{GameEvent, GameState, tick};

/// Final result of a session, raised once when the ship is destroyed
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SessionEnd {
    /// 1-based session counter since the loop was created
    pub session: u32,
    pub score: u64,
    /// Ticks the session lasted
    pub ticks: u64,
    /// Seed the session was started with
    pub seed: u64,
}

/// Owns the game state and input latch; the host calls `frame` once per refresh
pub struct GameLoop {
    state: GameState,
    input: InputLatch,
    session: u32,
    frames: u64,
    running: bool,
    last_events: Vec<GameEvent>,
}

impl GameLoop {
    /// Start the first session
    pub fn new(seed: u64, settings: Settings) -> Result<Self, SettingsError> {
        settings.validate()?;
        log::info!("Session 1 starting with seed {}", seed);
        Ok(Self {
            state: GameState::new(seed, settings),
            input: InputLatch::new(),
            session: 1,
            frames: 0,
            running: true,
            last_events: Vec::new(),
        })
    }

    pub fn state(&self) -> &GameState {
        &self.state
    }

    /// Direct access for hosts and tests that stage a situation
    pub fn state_mut(&mut self) -> &mut GameState {
        &mut self.state
    }

    pub fn input(&self) -> &InputLatch {
        &self.input
    }

    pub fn input_mut(&mut self) -> &mut InputLatch {
        &mut self.input
    }

    /// Current session number (1-based)
    pub fn session(&self) -> u32 {
        self.session
    }

    /// Frames run since creation
    pub fn frames(&self) -> u64 {
        self.frames
    }

    /// Events raised by the most recent frame
    pub fn last_events(&self) -> &[GameEvent] {
        &self.last_events
    }

    pub fn is_running(&self) -> bool {
        self.running
    }

    /// Stop the loop; later `frame` calls do nothing
    pub fn stop(&mut self) {
        if self.running {
            log::info!("Game loop stopped after {} frames", self.frames);
        }
        self.running = false;
    }

    /// Throw away the current session and start another with `seed`
    pub fn restart(&mut self, seed: u64) {
        let settings = self.state.settings.clone();
        self.state = GameState::new(seed, settings);
        self.input = InputLatch::new();
        self.session += 1;
        log::info!("Session {} starting with seed {}", self.session, seed);
    }

    /// Run one frame: tick, render, and restart on game over
    pub fn frame<S: Surface + ?Sized>(&mut self, surface: &mut S) -> Option<SessionEnd> {
        if !self.running {
            return None;
        }
        self.frames += 1;

        let input = self.input.snapshot();
        tick(&mut self.state, &input);
        self.last_events = self.state.drain_events();

        render(&self.state, surface);

        let score = self.last_events.iter().find_map(|e| match e {
            GameEvent::ShipDestroyed { score } => Some(*score),
            _ => None,
        })?;

        let end = SessionEnd {
            session: self.session,
            score,
            ticks: self.state.time_ticks,
            seed: self.state.seed,
        };
        log::info!(
            "Game over! Session {} score {} after {} ticks",
            end.session,
            end.score,
            end.ticks
        );

        // Next seed comes from this session's stream so replays stay deterministic
        let next_seed = self.state.rng.next_u64();
        self.restart(next_seed);

        Some(end)
    }

    /// Run up to `max_frames` frames with the current input, stopping early if stopped
    pub fn run<S: Surface + ?Sized>(
        &mut self,
        surface: &mut S,
        max_frames: u64,
    ) -> Vec<SessionEnd> {
        let mut ends = Vec::new();
        for _ in 0..max_frames {
            if !self.running {
                break;
            }
            if let Some(end) = self.frame(surface) {
                ends.push(end);
            }
        }
        ends
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::platform::Control;
    use crate::renderer::{CommandList, DrawCommand};
    use crate::sim::{GamePhase, Obstacle};
    use glam::Vec2;

    fn stage_collision(game: &mut GameLoop, score: u64) {
        let state = game.state_mut();
        state.obstacles.clear();
        state.ship.pos = Vec2::new(100.0, 100.0);
        let id = state.next_entity_id();
        state.obstacles.push(Obstacle {
            id,
            pos: Vec2::new(110.0, 100.0),
            angle: 0.0,
            radius: 20.0,
            speed: 0.0,
        });
        state.score = score;
    }

    #[test]
    fn test_rejects_invalid_settings() {
        let settings = Settings {
            initial_obstacles: 0,
            ..Settings::default()
        };
        assert!(matches!(
            GameLoop::new(1, settings),
            Err(SettingsError::NoObstacles)
        ));
    }

    #[test]
    fn test_frame_ticks_then_renders() {
        let mut game = GameLoop::new(42, Settings::default()).unwrap();
        let mut list = CommandList::new();

        assert_eq!(game.frame(&mut list), None);
        assert_eq!(game.state().time_ticks, 1);
        assert_eq!(game.frames(), 1);
        assert!(matches!(list.commands()[0], DrawCommand::Clear { .. }));
        assert_eq!(list.texts().collect::<Vec<_>>(), vec!["Score: 0"]);
    }

    #[test]
    fn test_fire_press_fires_once() {
        let mut game = GameLoop::new(42, Settings::default()).unwrap();
        let mut list = CommandList::new();
        let fired = |game: &GameLoop| {
            game.last_events()
                .iter()
                .filter(|e| matches!(e, GameEvent::ProjectileFired { .. }))
                .count()
        };

        game.input_mut().press(Control::Fire);
        game.frame(&mut list);
        assert_eq!(fired(&game), 1);
        assert_eq!(game.state().projectiles.len(), 1);

        // Still held, no second shot
        game.frame(&mut list);
        assert_eq!(fired(&game), 0);
        assert_eq!(game.state().projectiles.len(), 1);
    }

    #[test]
    fn test_two_taps_in_one_frame_fire_on_consecutive_frames() {
        let mut game = GameLoop::new(42, Settings::default()).unwrap();
        let mut list = CommandList::new();
        for _ in 0..2 {
            game.input_mut().press(Control::Fire);
            game.input_mut().release(Control::Fire);
        }

        game.frame(&mut list);
        assert_eq!(game.state().projectiles.len(), 1);
        game.frame(&mut list);
        assert_eq!(game.state().projectiles.len(), 2);
        game.frame(&mut list);
        assert_eq!(game.state().projectiles.len(), 2);
    }

    #[test]
    fn test_game_over_reports_and_resets() {
        let mut game = GameLoop::new(42, Settings::default()).unwrap();
        let mut list = CommandList::new();
        game.input_mut().press(Control::Thrust);
        stage_collision(&mut game, 4);

        let end = game.frame(&mut list).expect("session should end");
        assert_eq!(end.session, 1);
        assert_eq!(end.score, 4);
        assert_eq!(end.ticks, 1);
        assert_eq!(end.seed, 42);

        // The crash frame was still drawn
        assert_eq!(list.texts().collect::<Vec<_>>(), vec!["Score: 4"]);

        // Fresh session
        let state = game.state();
        assert_eq!(game.session(), 2);
        assert_eq!(state.phase, GamePhase::Playing);
        assert_eq!(state.score, 0);
        assert_eq!(state.time_ticks, 0);
        assert_eq!(state.obstacles.len(), 5);
        assert!(state.projectiles.is_empty());
        assert_eq!(state.ship.pos, Vec2::new(400.0, 300.0));
        assert_eq!(state.ship.speed, 0.0);
        assert!(!game.input().is_held(Control::Thrust));
    }

    #[test]
    fn test_reset_seed_is_deterministic() {
        let mut a = GameLoop::new(7, Settings::default()).unwrap();
        let mut b = GameLoop::new(7, Settings::default()).unwrap();
        let mut list = CommandList::new();
        stage_collision(&mut a, 0);
        stage_collision(&mut b, 0);
        a.frame(&mut list);
        b.frame(&mut list);
        assert_eq!(a.state().seed, b.state().seed);
        assert_ne!(a.state().seed, 7);
        for (oa, ob) in a.state().obstacles.iter().zip(&b.state().obstacles) {
            assert_eq!(oa.pos, ob.pos);
        }
    }

    #[test]
    fn test_stop_halts_frames() {
        let mut game = GameLoop::new(42, Settings::default()).unwrap();
        let mut list = CommandList::new();
        game.run(&mut list, 10);
        assert_eq!(game.frames(), 10);

        game.stop();
        assert!(!game.is_running());
        assert_eq!(game.frame(&mut list), None);
        assert!(game.run(&mut list, 10).is_empty());
        assert_eq!(game.frames(), 10);
        assert_eq!(game.state().time_ticks, 10);
    }

    #[test]
    fn test_run_collects_session_ends() {
        let mut game = GameLoop::new(42, Settings::default()).unwrap();
        let mut list = CommandList::new();
        stage_collision(&mut game, 2);
        let ends = game.run(&mut list, 3);
        assert_eq!(ends.len(), 1);
        assert_eq!(ends[0].score, 2);
        assert_eq!(game.frames(), 3);
        assert!(game.is_running());
    }
}
