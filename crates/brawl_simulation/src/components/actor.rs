//! Базовые компоненты акторов: Health, Enemy

use bevy::prelude::*;

use crate::components::MovementCommand;

/// Здоровье актора
///
/// Инвариант: 0 ≤ current ≤ max.
/// Боевое ядро урон не считает — только читает `current` (liveness, last-hit).
#[derive(Component, Debug, Clone, Copy)]
pub struct Health {
    pub current: u32,
    pub max: u32,
}

impl Default for Health {
    fn default() -> Self {
        Self::new(100) // Default 100 HP
    }
}

impl Health {
    pub fn new(max: u32) -> Self {
        Self { current: max, max }
    }

    pub fn is_alive(&self) -> bool {
        self.current > 0
    }

    pub fn take_damage(&mut self, amount: u32) {
        self.current = self.current.saturating_sub(amount);
    }
}

/// Hostile actor that the player can lock onto.
///
/// Written by the enemy AI (tactical layer): `preparing_attack` is true while
/// the enemy telegraphs a strike, which opens the player's counter window.
/// The melee core only reads it.
#[derive(Component, Debug, Clone, Copy, Default)]
#[require(Health, MovementCommand)]
pub struct Enemy {
    /// Enemy is winding up an attack (counter window open)
    pub preparing_attack: bool,
}

impl Enemy {
    /// Enemy telegraphing an attack.
    pub fn preparing() -> Self {
        Self {
            preparing_attack: true,
        }
    }
}
