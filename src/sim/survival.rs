//! Hunger and health feedback loop
//!
//! Hunger ticks down on a fixed schedule. An empty stomach occasionally costs
//! health; a well-fed player slowly heals. Neither depends on movement.

use rand::Rng;

use super::state::Player;
use crate::settings::SurvivalConfig;

/// Result of a survival tick
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Vitals {
    Alive,
    /// Health reached zero this tick
    Dead,
}

#[derive(Debug, Clone, Default)]
pub struct SurvivalController {
    /// Ticks since hunger last dropped
    hunger_ticks: u32,
}

impl SurvivalController {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn reset(&mut self) {
        self.hunger_ticks = 0;
    }

    pub fn hunger_ticks(&self) -> u32 {
        self.hunger_ticks
    }

    pub fn update<R: Rng>(
        &mut self,
        player: &mut Player,
        rng: &mut R,
        config: &SurvivalConfig,
    ) -> Vitals {
        self.hunger_ticks += 1;
        if self.hunger_ticks >= config.hunger_decay_ticks.max(1) {
            self.hunger_ticks = 0;
            player.hunger -= 1.0;
        }
        player.hunger = player.hunger.clamp(0.0, config.max_hunger);

        if player.hunger <= 0.0 {
            let chance = config.starvation_damage_chance.clamp(0.0, 1.0);
            if rng.random_bool(chance) {
                player.health -= 1.0;
                log::debug!("Starving: health {}", player.health.max(0.0));
            }
        } else if player.hunger > config.regen_threshold * config.max_hunger
            && player.health < config.max_health
        {
            player.health += config.regen_per_tick;
        }
        player.health = player.health.clamp(0.0, config.max_health);

        if player.health <= 0.0 {
            Vitals::Dead
        } else {
            Vitals::Alive
        }
    }
}
