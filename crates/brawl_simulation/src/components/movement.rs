//! Movement компоненты: команды перемещения врагов, locomotion игрока

use bevy::prelude::*;

use crate::movement::AccelerationRamp;

/// Команда движения для актора (выполняется tactical layer)
///
/// Архитектура:
/// - Enemy AI пишет MovementCommand (high-level intent)
/// - Melee core пишет только `Stop`, когда игрок начинает сближение
/// - Engine конвертирует в navigation target / velocity
#[derive(Component, Debug, Clone, PartialEq, Default)]
pub enum MovementCommand {
    /// Стоять на месте
    #[default]
    Idle,
    /// Остановиться немедленно (сбросить velocity)
    Stop,
}

/// Player locomotion controller state (free movement from stick input).
///
/// The melee core disables it for the duration of a combo, a dodge or a
/// hit-stun, and afterwards ramps `acceleration` back from 0 to 1 so movement
/// resumes smoothly.
#[derive(Component, Debug, Clone, PartialEq)]
pub struct Locomotion {
    /// Free movement allowed
    pub enabled: bool,
    /// Acceleration multiplier in [0, 1]
    pub acceleration: f32,
    /// Running acceleration interpolation (last command wins)
    pub ramp: Option<AccelerationRamp>,
}

impl Default for Locomotion {
    fn default() -> Self {
        Self {
            enabled: true,
            acceleration: 1.0,
            ramp: None,
        }
    }
}
