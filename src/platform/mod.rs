//! Platform abstraction layer
//!
//! The simulation never registers device listeners or draws pixels. A
//! platform supplies:
//! - an [`InputProvider`] polled once per tick
//! - a [`Renderer`] that receives a read-only [`FrameSnapshot`] after each tick

use std::collections::VecDeque;

use glam::Vec2;

use crate::sim::{Camera, GameEvent, GameState, Inventory, MiningState, Player, TickInput, WorldGrid};

/// Source of per-tick input (keyboard, touch buttons, replay, AI)
pub trait InputProvider {
    fn poll(&mut self) -> TickInput;
}

/// Pixel output; must not (and cannot) mutate the simulation
pub trait Renderer {
    fn render(&mut self, frame: &FrameSnapshot<'_>);
}

/// Everything a renderer may look at for one tick
#[derive(Debug, Clone, Copy)]
pub struct FrameSnapshot<'a> {
    pub tick: u64,
    pub world: &'a WorldGrid,
    pub player: &'a Player,
    pub camera: &'a Camera,
    pub inventory: &'a Inventory,
    pub mining: Option<&'a MiningState>,
    /// Mining progress in [0, 1] for the in-flight tile
    pub mining_fraction: f32,
    pub events: &'a [GameEvent],
    pub tile_size: f32,
    pub viewport: Vec2,
}

impl<'a> FrameSnapshot<'a> {
    pub fn of(state: &'a GameState) -> Self {
        let mining = state.interaction.mining();
        let duration = state.config.interaction.effective_duration();
        Self {
            tick: state.time_ticks,
            world: &state.world,
            player: &state.player,
            camera: &state.camera,
            inventory: &state.inventory,
            mining,
            mining_fraction: mining.map_or(0.0, |m| m.fraction(duration)),
            events: &state.events,
            tile_size: state.config.tile_size,
            viewport: state.config.camera.viewport,
        }
    }

    /// Tile window to draw, clipped to the world
    pub fn visible_tiles(&self) -> (i32, i32, i32, i32) {
        let (x0, y0, x1, y1) = self.camera.visible_tiles(self.viewport, self.tile_size);
        (
            x0.max(0),
            y0.max(0),
            x1.min(self.world.width() as i32),
            y1.min(self.world.height() as i32),
        )
    }
}

/// Replays a fixed input sequence, then repeats a fallback (idle by default)
#[derive(Debug, Clone, Default)]
pub struct ScriptedInput {
    queue: VecDeque<TickInput>,
    fallback: TickInput,
}

impl ScriptedInput {
    pub fn new(inputs: impl IntoIterator<Item = TickInput>) -> Self {
        Self {
            queue: inputs.into_iter().collect(),
            fallback: TickInput::default(),
        }
    }

    pub fn with_fallback(mut self, fallback: TickInput) -> Self {
        self.fallback = fallback;
        self
    }

    pub fn remaining(&self) -> usize {
        self.queue.len()
    }
}

impl InputProvider for ScriptedInput {
    fn poll(&mut self) -> TickInput {
        self.queue.pop_front().unwrap_or(self.fallback)
    }
}

/// Renderer that draws nothing
#[derive(Debug, Clone, Copy, Default)]
pub struct NullRenderer;

impl Renderer for NullRenderer {
    fn render(&mut self, _frame: &FrameSnapshot<'_>) {}
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::settings::SimConfig;

    #[test]
    fn test_scripted_input_then_fallback() {
        let jump = TickInput {
            jump: true,
            ..Default::default()
        };
        let right = TickInput {
            move_right: true,
            ..Default::default()
        };
        let mut input = ScriptedInput::new([jump]).with_fallback(right);
        assert_eq!(input.remaining(), 1);
        assert_eq!(input.poll(), jump);
        assert_eq!(input.poll(), right);
        assert_eq!(input.poll(), right);
    }

    #[test]
    fn test_snapshot_window_clipped_to_world() {
        let config = SimConfig {
            world_width: 20,
            world_height: 10,
            ..SimConfig::default()
        };
        let state = GameState::with_config(config, 3);
        let frame = FrameSnapshot::of(&state);
        let (x0, y0, x1, y1) = frame.visible_tiles();
        assert_eq!((x0, y0), (0, 0));
        assert_eq!((x1, y1), (20, 10));
        assert!(frame.mining.is_none());
        assert_eq!(frame.mining_fraction, 0.0);
    }
}
