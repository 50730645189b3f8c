//! Movement/animation command surface.
//!
//! Combo и counter state machines не трогают Transform/Animator напрямую:
//! они выдают `MotorCommand`, а `apply_motor_commands` исполняет их в том же
//! FixedUpdate тике (после всех combat систем).

use bevy::prelude::*;

use crate::components::{AnimationTrigger, Animator, Enemy, Locomotion, MovementCommand};
use crate::movement::{AccelerationRamp, MotionTweens, RotationTween, TranslationTween, TweenClock};

/// Low-level command issued by the melee state machines.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum MotorCommand {
    /// Discrete combo stage animator parameter
    SetComboStage(u8),
    /// One-shot animation trigger
    FireTrigger(AnimationTrigger),
    /// Rotate to face `point` over `duration`
    LookAt { point: Vec3, duration: f32 },
    /// Translate to `point` over `duration`
    MoveTo { point: Vec3, duration: f32 },
    /// Enable/disable free locomotion
    SetLocomotion(bool),
    /// Set acceleration immediately (cancels a running ramp)
    SetAcceleration(f32),
    /// Linear acceleration ramp (starts at `from` immediately)
    RampAcceleration { from: f32, to: f32, duration: f32 },
    /// Tell a hostile to stop its own movement
    StopTarget(Entity),
}

/// Event: command for the combatant's movement/animation coordinator.
#[derive(Event, Debug, Clone)]
pub struct MotorCommandIssued {
    pub combatant: Entity,
    pub command: MotorCommand,
}

/// Event: one-shot trigger for the animation layer (Dodge, Hit).
#[derive(Event, Debug, Clone)]
pub struct AnimationTriggered {
    pub entity: Entity,
    pub trigger: AnimationTrigger,
}

/// Rotation that faces `point` from `from`; `None` when the points coincide.
pub fn look_at_rotation(from: Vec3, point: Vec3) -> Option<Quat> {
    if from.distance_squared(point) <= f32::EPSILON {
        return None;
    }
    Some(Transform::from_translation(from).looking_at(point, Vec3::Y).rotation)
}

/// System: execute motor commands in issue order.
pub fn apply_motor_commands(
    mut commands_issued: EventReader<MotorCommandIssued>,
    mut combatants: Query<(&Transform, &mut Animator, &mut Locomotion, &mut MotionTweens)>,
    mut enemies: Query<&mut MovementCommand, With<Enemy>>,
    mut triggers: EventWriter<AnimationTriggered>,
) {
    for issued in commands_issued.read() {
        // StopTarget адресован врагу, а не бойцу
        if let MotorCommand::StopTarget(target) = issued.command {
            if let Ok(mut movement) = enemies.get_mut(target) {
                *movement = MovementCommand::Stop;
            }
            continue;
        }

        let Ok((transform, mut animator, mut locomotion, mut tweens)) =
            combatants.get_mut(issued.combatant)
        else {
            crate::log(&format!(
                "⚠️ Motor: combatant {:?} has no coordinator components, {:?} dropped",
                issued.combatant, issued.command
            ));
            continue;
        };

        match issued.command {
            MotorCommand::SetComboStage(stage) => {
                animator.combo_stage = stage;
            }
            MotorCommand::FireTrigger(trigger) => {
                crate::log(&format!(
                    "🎬 Motor: trigger {} (entity: {:?})",
                    trigger.as_str(),
                    issued.combatant
                ));
                triggers.write(AnimationTriggered {
                    entity: issued.combatant,
                    trigger,
                });
            }
            MotorCommand::LookAt { point, duration } => {
                // Стартуем от текущего rotation (in-flight tween перезаписывается)
                if let Some(to) = look_at_rotation(transform.translation, point) {
                    tweens.rotation = Some(RotationTween {
                        from: transform.rotation,
                        to,
                        clock: TweenClock::new(duration),
                    });
                }
            }
            MotorCommand::MoveTo { point, duration } => {
                tweens.translation = Some(TranslationTween {
                    from: transform.translation,
                    to: point,
                    clock: TweenClock::new(duration),
                });
            }
            MotorCommand::SetLocomotion(enabled) => {
                locomotion.enabled = enabled;
            }
            MotorCommand::SetAcceleration(value) => {
                locomotion.acceleration = value;
                locomotion.ramp = None;
            }
            MotorCommand::RampAcceleration { from, to, duration } => {
                locomotion.acceleration = from;
                locomotion.ramp = Some(AccelerationRamp::new(from, to, duration));
            }
            MotorCommand::StopTarget(_) => {}
        }
    }
}
