//! Tile kinds

use serde::{Deserialize, Serialize};

/// Contents of a single world cell
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default, Serialize, Deserialize,
)]
pub enum TileKind {
    #[default]
    Air,
    Dirt,
    Grass,
    Stone,
    Wood,
    Leaves,
    CoalOre,
    IronOre,
}

impl TileKind {
    /// Every kind, in declaration order
    pub const ALL: [TileKind; 8] = [
        TileKind::Air,
        TileKind::Dirt,
        TileKind::Grass,
        TileKind::Stone,
        TileKind::Wood,
        TileKind::Leaves,
        TileKind::CoalOre,
        TileKind::IronOre,
    ];

    /// Whether this kind blocks movement unless the world marks it pass-through
    pub fn is_solid_by_default(&self) -> bool {
        *self != TileKind::Air
    }

    pub fn is_air(&self) -> bool {
        *self == TileKind::Air
    }

    pub fn name(&self) -> &'static str {
        match self {
            TileKind::Air => "air",
            TileKind::Dirt => "dirt",
            TileKind::Grass => "grass",
            TileKind::Stone => "stone",
            TileKind::Wood => "wood",
            TileKind::Leaves => "leaves",
            TileKind::CoalOre => "coal_ore",
            TileKind::IronOre => "iron_ore",
        }
    }

    pub fn from_name(s: &str) -> Option<Self> {
        let s = s.to_lowercase();
        Self::ALL.into_iter().find(|k| k.name() == s)
    }
}
