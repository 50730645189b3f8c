//! ECS Components для игровых entity
//!
//! Организация по доменам:
//! - actor: базовые характеристики (Health, Enemy)
//! - movement: команды перемещения врагов и locomotion игрока
//! - animation: combo stage parameter + reported playback state
//! - player: player control marker (Player)

pub mod actor;
pub mod animation;
pub mod movement;
pub mod player;

// Re-exports для удобного импорта
pub use actor::*;
pub use animation::*;
pub use movement::*;
pub use player::*;
