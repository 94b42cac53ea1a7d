//! Mine/build interaction and inventory
//!
//! The pointer is mapped through the camera onto a tile. In Mine mode a held
//! pointer accumulates progress on one tile; in Build mode a press places the
//! selected inventory kind into an empty tile.

use std::collections::BTreeMap;

use glam::Vec2;
use serde::{Deserialize, Serialize};

use super::camera::Camera;
use super::state::{GameEvent, Player};
use super::tile::TileKind;
use super::world::WorldGrid;
use crate::pixel_to_tile;
use crate::settings::InteractionConfig;

/// What the pointer does
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum ActionMode {
    #[default]
    Mine,
    Build,
}

/// Pointer/tap state in screen pixels
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Pointer {
    pub screen_x: f32,
    pub screen_y: f32,
    /// Button held / finger down
    pub active: bool,
}

impl Pointer {
    pub fn pressed_at(screen_x: f32, screen_y: f32) -> Self {
        Self {
            screen_x,
            screen_y,
            active: true,
        }
    }

    pub fn screen(&self) -> Vec2 {
        Vec2::new(self.screen_x, self.screen_y)
    }
}

/// Tile under a screen point, given the camera offset
pub fn screen_to_tile(screen: Vec2, camera_pos: Vec2, tile_size: f32) -> (i32, i32) {
    let world = screen + camera_pos;
    (
        pixel_to_tile(world.x, tile_size),
        pixel_to_tile(world.y, tile_size),
    )
}

/// Placeable kinds in hotbar order
pub const HOTBAR: [TileKind; 7] = [
    TileKind::Dirt,
    TileKind::Grass,
    TileKind::Stone,
    TileKind::Wood,
    TileKind::Leaves,
    TileKind::CoalOre,
    TileKind::IronOre,
];

/// Block counts plus the selected hotbar slot
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct Inventory {
    counts: BTreeMap<TileKind, u32>,
    selected_slot: usize,
}

impl Inventory {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn count(&self, kind: TileKind) -> u32 {
        self.counts.get(&kind).copied().unwrap_or(0)
    }

    /// Add one block; Air is not collectable
    pub fn add(&mut self, kind: TileKind) {
        if kind.is_air() {
            return;
        }
        let count = self.counts.entry(kind).or_insert(0);
        *count = count.saturating_add(1);
    }

    /// Take one block if any are held
    pub fn remove_one(&mut self, kind: TileKind) -> bool {
        match self.counts.get_mut(&kind) {
            Some(count) if *count > 0 => {
                *count -= 1;
                true
            }
            _ => false,
        }
    }

    pub fn set_count(&mut self, kind: TileKind, count: u32) {
        if !kind.is_air() {
            self.counts.insert(kind, count);
        }
    }

    /// Select a hotbar slot. Out-of-range indices are stored as-is and
    /// make building a no-op until a valid slot is chosen.
    pub fn select_slot(&mut self, slot: usize) {
        self.selected_slot = slot;
    }

    pub fn selected_slot(&self) -> usize {
        self.selected_slot
    }

    pub fn selected_kind(&self) -> Option<TileKind> {
        HOTBAR.get(self.selected_slot).copied()
    }

    /// Non-zero stacks in tile order
    pub fn stacks(&self) -> impl Iterator<Item = (TileKind, u32)> + '_ {
        self.counts
            .iter()
            .filter(|(_, c)| **c > 0)
            .map(|(k, c)| (*k, *c))
    }

    pub fn total(&self) -> u64 {
        self.counts.values().map(|&c| c as u64).sum()
    }
}

/// In-flight progressive mining
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct MiningState {
    pub x: i32,
    pub y: i32,
    /// Ticks of sustained action so far
    pub progress: u32,
}

impl MiningState {
    pub fn new(x: i32, y: i32) -> Self {
        Self { x, y, progress: 0 }
    }

    /// Completion in [0, 1] for crack overlays
    pub fn fraction(&self, duration: u32) -> f32 {
        if duration == 0 {
            1.0
        } else {
            (self.progress as f32 / duration as f32).min(1.0)
        }
    }
}

/// Mine/build state machine
#[derive(Debug, Clone, Default)]
pub struct InteractionController {
    mode: ActionMode,
    mining: Option<MiningState>,
    pointer_was_active: bool,
}

impl InteractionController {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn mode(&self) -> ActionMode {
        self.mode
    }

    pub fn mining(&self) -> Option<&MiningState> {
        self.mining.as_ref()
    }

    pub fn cancel_mining(&mut self) {
        if let Some(m) = self.mining.take() {
            log::debug!("Mining of ({}, {}) cancelled at {}", m.x, m.y, m.progress);
        }
    }

    /// Apply one tick of pointer input
    #[allow(clippy::too_many_arguments)]
    pub fn update(
        &mut self,
        mode: ActionMode,
        pointer: Pointer,
        camera: &Camera,
        world: &mut WorldGrid,
        inventory: &mut Inventory,
        player: &Player,
        config: &InteractionConfig,
        tile_size: f32,
    ) -> Option<GameEvent> {
        let pressed = pointer.active && !self.pointer_was_active;
        self.pointer_was_active = pointer.active;

        if mode != self.mode {
            self.cancel_mining();
            self.mode = mode;
        }

        if !pointer.active {
            self.cancel_mining();
            return None;
        }

        let (x, y) = screen_to_tile(pointer.screen(), camera.pos, tile_size);
        if !world.in_bounds(x, y) {
            self.cancel_mining();
            return None;
        }

        match mode {
            ActionMode::Mine => self.mine(x, y, pressed, world, inventory, config),
            ActionMode::Build if pressed => build(x, y, world, inventory, player, tile_size),
            ActionMode::Build => None,
        }
    }

    fn mine(
        &mut self,
        x: i32,
        y: i32,
        pressed: bool,
        world: &mut WorldGrid,
        inventory: &mut Inventory,
        config: &InteractionConfig,
    ) -> Option<GameEvent> {
        let kind = world.get_tile(x, y);
        if kind.is_air() {
            self.cancel_mining();
            return None;
        }

        let duration = config.effective_duration();
        if duration == 0 {
            return pressed.then(|| break_tile(x, y, kind, world, inventory));
        }

        let same_target = matches!(self.mining, Some(m) if m.x == x && m.y == y);
        if !same_target {
            self.cancel_mining();
            self.mining = Some(MiningState::new(x, y));
        }

        let state = self.mining.as_mut()?;
        state.progress += 1;
        if state.progress < duration {
            return None;
        }

        self.mining = None;
        Some(break_tile(x, y, kind, world, inventory))
    }
}

fn break_tile(
    x: i32,
    y: i32,
    kind: TileKind,
    world: &mut WorldGrid,
    inventory: &mut Inventory,
) -> GameEvent {
    world.set_tile(x, y, TileKind::Air);
    inventory.add(kind);
    log::debug!("Mined {} at ({}, {})", kind.name(), x, y);
    GameEvent::TileMined { x, y, kind }
}

/// Place the selected kind into an Air tile. Solid kinds are refused where
/// they would overlap the player.
fn build(
    x: i32,
    y: i32,
    world: &mut WorldGrid,
    inventory: &mut Inventory,
    player: &Player,
    tile_size: f32,
) -> Option<GameEvent> {
    let kind = inventory.selected_kind()?;
    if !world.get_tile(x, y).is_air() || inventory.count(kind) == 0 {
        return None;
    }
    if world.kind_is_solid(kind) && player.overlaps_tile(x, y, tile_size) {
        return None;
    }

    world.set_tile(x, y, kind);
    inventory.remove_one(kind);
    log::debug!("Built {} at ({}, {})", kind.name(), x, y);
    Some(GameEvent::TileBuilt { x, y, kind })
}
