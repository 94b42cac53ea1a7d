//! Fixed timestep game loop
//!
//! Decouples the simulation rate from whatever drives frames. A platform
//! calls [`GameLoop::advance`] with the elapsed wall time; tests call
//! [`GameLoop::step`] to run exactly one tick.

use crate::consts::{MAX_FRAME_DT, MAX_SUBSTEPS, SIM_DT};
use crate::platform::{FrameSnapshot, InputProvider, Renderer};
use crate::settings::SimConfig;
use crate::sim::{GameState, TickInput, tick};

/// Owns the session and the time accumulator
#[derive(Debug, Clone)]
pub struct GameLoop {
    state: GameState,
    accumulator: f32,
}

impl GameLoop {
    pub fn new(seed: u64) -> Self {
        Self::from_state(GameState::new(seed))
    }

    pub fn with_config(config: SimConfig, seed: u64) -> Self {
        Self::from_state(GameState::with_config(config, seed))
    }

    pub fn from_state(state: GameState) -> Self {
        Self {
            state,
            accumulator: 0.0,
        }
    }

    pub fn state(&self) -> &GameState {
        &self.state
    }

    pub fn into_state(self) -> GameState {
        self.state
    }

    /// Run exactly one tick
    pub fn step(&mut self, input: &TickInput) {
        tick(&mut self.state, input);
    }

    /// Run one tick with polled input and hand the result to the renderer
    pub fn step_with(&mut self, input: &mut dyn InputProvider, renderer: &mut dyn Renderer) {
        let input = input.poll();
        tick(&mut self.state, &input);
        renderer.render(&FrameSnapshot::of(&self.state));
    }

    /// Feed elapsed wall time; runs as many whole ticks as fit (capped).
    /// Returns the number of ticks run.
    pub fn advance(
        &mut self,
        dt: f32,
        input: &mut dyn InputProvider,
        renderer: &mut dyn Renderer,
    ) -> u32 {
        self.accumulator += dt.clamp(0.0, MAX_FRAME_DT);

        let mut substeps = 0;
        while self.accumulator >= SIM_DT && substeps < MAX_SUBSTEPS {
            self.step_with(input, renderer);
            self.accumulator -= SIM_DT;
            substeps += 1;
        }
        if substeps == MAX_SUBSTEPS && self.accumulator >= SIM_DT {
            log::warn!("Dropping {:.3}s of backlog", self.accumulator);
            self.accumulator = 0.0;
        }
        substeps
    }

    /// Start a fresh session with a new seed, keeping the config
    pub fn restart(&mut self, seed: u64) {
        let config = self.state.config.clone();
        self.state = GameState::with_config(config, seed);
        self.accumulator = 0.0;
        log::info!("Game restarted with seed: {}", seed);
    }

    /// Swap in a loaded session
    pub fn load_state(&mut self, state: GameState) {
        self.state = state;
        self.accumulator = 0.0;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::platform::{NullRenderer, ScriptedInput};

    /// Counts frames and checks the snapshot tick matches the call order
    #[derive(Default)]
    struct CountingRenderer {
        frames: u64,
    }

    impl Renderer for CountingRenderer {
        fn render(&mut self, frame: &FrameSnapshot<'_>) {
            self.frames += 1;
            assert_eq!(frame.tick, self.frames);
        }
    }

    fn small() -> SimConfig {
        SimConfig {
            world_width: 40,
            world_height: 30,
            ..SimConfig::default()
        }
    }

    #[test]
    fn test_step_runs_one_tick() {
        let mut game = GameLoop::with_config(small(), 1);
        game.step(&TickInput::default());
        game.step(&TickInput::default());
        assert_eq!(game.state().time_ticks, 2);
    }

    #[test]
    fn test_advance_accumulates_partial_frames() {
        let mut game = GameLoop::with_config(small(), 1);
        let mut input = ScriptedInput::default();
        let mut renderer = CountingRenderer::default();

        assert_eq!(game.advance(SIM_DT * 0.5, &mut input, &mut renderer), 0);
        assert_eq!(game.advance(SIM_DT * 0.6, &mut input, &mut renderer), 1);
        assert_eq!(game.advance(SIM_DT * 2.5, &mut input, &mut renderer), 2);
        assert_eq!(renderer.frames, 3);
        assert_eq!(game.state().time_ticks, 3);
    }

    #[test]
    fn test_advance_caps_substeps() {
        let mut game = GameLoop::with_config(small(), 1);
        let ran = game.advance(10.0, &mut ScriptedInput::default(), &mut NullRenderer);
        // frame dt is capped at 0.1s, about 6 ticks at 60 Hz
        assert!((5..=6).contains(&ran));
        assert!(ran <= MAX_SUBSTEPS);
        assert_eq!(game.state().time_ticks, ran as u64);
    }

    #[test]
    fn test_restart_resets_session() {
        let mut game = GameLoop::with_config(small(), 1);
        game.step(&TickInput::default());
        game.restart(2);
        assert_eq!(game.state().time_ticks, 0);
        assert_eq!(game.state().seed, 2);
        assert_eq!(game.state().config.world_width, 40);
    }

    #[test]
    fn test_load_state_swaps_session() {
        let mut game = GameLoop::with_config(small(), 1);
        let mut input = ScriptedInput::default();
        game.advance(SIM_DT * 0.5, &mut input, &mut NullRenderer);

        let mut loaded = GameState::with_config(small(), 7);
        loaded.time_ticks = 500;
        game.load_state(loaded);
        assert_eq!(game.state().seed, 7);

        // Leftover partial frame was discarded with the old session
        assert_eq!(game.advance(SIM_DT * 0.6, &mut input, &mut NullRenderer), 0);
        game.step(&TickInput::default());

        let state = game.into_state();
        assert_eq!(state.time_ticks, 501);
    }
}
