//! Tile Sandbox entry point
//!
//! Headless native runner: loads config, resumes or starts a session,
//! plays a short scripted demo through the fixed-step loop and saves.
//!
//! Usage: `tile-sandbox [config.json] [seed] [save.json]`

#[cfg(not(target_arch = "wasm32"))]
mod native {
    use std::path::PathBuf;

    use tile_sandbox::consts::SIM_DT;
    use tile_sandbox::persistence::{load_from_path, save_to_path};
    use tile_sandbox::platform::{FrameSnapshot, Renderer, ScriptedInput};
    use tile_sandbox::sim::{ActionMode, GameEvent, Pointer, TickInput};
    use tile_sandbox::{GameLoop, SimConfig};

    /// Renderer that reports gameplay events to the log
    #[derive(Default)]
    struct LogRenderer {
        frames: u64,
    }

    impl Renderer for LogRenderer {
        fn render(&mut self, frame: &FrameSnapshot<'_>) {
            self.frames += 1;
            for event in frame.events {
                match event {
                    GameEvent::TileMined { x, y, kind } => {
                        log::info!("Mined {} at ({}, {})", kind.name(), x, y)
                    }
                    GameEvent::TileBuilt { x, y, kind } => {
                        log::info!("Built {} at ({}, {})", kind.name(), x, y)
                    }
                    GameEvent::PlayerRespawned { cause } => {
                        log::info!("Respawned ({:?})", cause)
                    }
                }
            }
            if frame.tick % 60 == 0 {
                let (x0, y0, x1, y1) = frame.visible_tiles();
                log::debug!(
                    "tick {} player ({:.1}, {:.1}) hp {:.2} food {:.0} view {}..{} x {}..{}",
                    frame.tick,
                    frame.player.pos.x,
                    frame.player.pos.y,
                    frame.player.health,
                    frame.player.hunger,
                    x0,
                    x1,
                    y0,
                    y1
                );
            }
        }
    }

    /// Walk right, jump, then dig below the player's feet and build it back
    fn demo_script(viewport_center: (f32, f32)) -> ScriptedInput {
        let (cx, cy) = viewport_center;
        let walk = TickInput {
            move_right: true,
            ..Default::default()
        };
        let jump = TickInput {
            move_right: true,
            jump: true,
            ..Default::default()
        };
        let dig = TickInput {
            pointer: Pointer::pressed_at(cx, cy + 40.0),
            ..Default::default()
        };
        let place = TickInput {
            action_mode: ActionMode::Build,
            pointer: Pointer::pressed_at(cx, cy + 40.0),
            select_slot: Some(0),
            ..Default::default()
        };

        let mut inputs = Vec::new();
        inputs.extend(std::iter::repeat_n(walk, 90));
        inputs.push(jump);
        inputs.extend(std::iter::repeat_n(walk, 30));
        inputs.extend(std::iter::repeat_n(TickInput::default(), 30));
        inputs.extend(std::iter::repeat_n(dig, 40));
        inputs.push(TickInput::default());
        inputs.push(place);
        ScriptedInput::new(inputs)
    }

    pub fn run() {
        env_logger::init();
        log::info!("Tile Sandbox (native) starting...");

        let mut args = std::env::args().skip(1);
        let config = match args.next() {
            Some(path) => SimConfig::load(path),
            None => SimConfig::default(),
        };
        let seed = args
            .next()
            .and_then(|s| s.parse::<u64>().ok())
            .unwrap_or(12345);
        let save_path = args.next().map(PathBuf::from);

        let mut game = GameLoop::with_config(config.clone(), seed);
        if let Some(path) = save_path.as_ref().filter(|p| p.exists()) {
            match load_from_path(path, config) {
                Ok(state) => game.load_state(state),
                Err(e) => log::warn!("Could not load {}: {}", path.display(), e),
            }
        }

        let viewport = game.state().config.camera.viewport;
        let mut input = demo_script((viewport.x / 2.0, viewport.y / 2.0));
        let mut renderer = LogRenderer::default();

        // Feed wall time in uneven frames to drive the accumulator
        let frames = [SIM_DT * 0.7, SIM_DT * 1.3, SIM_DT];
        let mut i = 0;
        while input.remaining() > 0 {
            game.advance(frames[i % frames.len()], &mut input, &mut renderer);
            i += 1;
        }

        let state = game.into_state();
        log::info!(
            "Demo finished after {} ticks ({} frames), inventory: {} blocks",
            state.time_ticks,
            renderer.frames,
            state.inventory.total()
        );

        if let Some(path) = save_path {
            if let Err(e) = save_to_path(&state, &path) {
                log::error!("Failed to save {}: {}", path.display(), e);
            }
        }
    }
}

#[cfg(not(target_arch = "wasm32"))]
fn main() {
    native::run();
}

#[cfg(target_arch = "wasm32")]
fn main() {
    // No browser shell; the library is driven by the embedding page
}
