//! Player control marker component
//!
//! Отмечает entity которым управляет игрок через input (в отличие от AI).

use bevy::prelude::Component;

/// Marker component для player-controlled entity
///
/// Input layer шлёт `AttackIntent` / `CounterIntent` только для акторов
/// с этим компонентом; headless демо и тесты используют `With<Player>`
/// чтобы найти бойца.
#[derive(Component, Debug, Clone, Copy, Default)]
pub struct Player;
