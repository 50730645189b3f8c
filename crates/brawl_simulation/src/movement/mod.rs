//! Movement/animation coordinator — исполняет команды melee state machines
//!
//! Содержит:
//! - MotorCommand + MotorCommandIssued (command surface)
//! - apply_motor_commands (commands → Animator / Locomotion / tweens)
//! - MotionTweens, AccelerationRamp (fire-and-forget interpolations)
//!
//! Своего состояния, кроме живых интерполяций, у координатора нет.

pub mod motor;
pub mod tween;

// Re-export all components, events and systems
pub use motor::*;
pub use tween::*;
