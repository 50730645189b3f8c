//! Fire-and-forget interpolations: translation, rotation, acceleration.
//!
//! Каждый канал — single slot (`Option`): новая команда перезаписывает
//! текущую интерполяцию (last command wins), очереди нет.

use bevy::prelude::*;

use crate::components::Locomotion;

/// Linear interpolation progress over a fixed duration.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TweenClock {
    pub elapsed: f32,
    pub duration: f32,
}

impl TweenClock {
    pub fn new(duration: f32) -> Self {
        Self {
            elapsed: 0.0,
            duration: duration.max(0.0),
        }
    }

    /// Advance and return progress in [0, 1].
    pub fn advance(&mut self, delta: f32) -> f32 {
        self.elapsed = (self.elapsed + delta).min(self.duration);
        self.progress()
    }

    pub fn progress(&self) -> f32 {
        if self.duration <= f32::EPSILON {
            1.0
        } else {
            (self.elapsed / self.duration).clamp(0.0, 1.0)
        }
    }

    pub fn is_finished(&self) -> bool {
        self.progress() >= 1.0
    }
}

/// Translation interpolation (move-toward / dodge).
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TranslationTween {
    pub from: Vec3,
    pub to: Vec3,
    pub clock: TweenClock,
}

/// Rotation interpolation (look-at).
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RotationTween {
    pub from: Quat,
    pub to: Quat,
    pub clock: TweenClock,
}

/// Acceleration ramp, applied to `Locomotion::acceleration`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct AccelerationRamp {
    pub from: f32,
    pub to: f32,
    pub clock: TweenClock,
}

impl AccelerationRamp {
    pub fn new(from: f32, to: f32, duration: f32) -> Self {
        Self {
            from,
            to,
            clock: TweenClock::new(duration),
        }
    }

    /// Advance and return the interpolated acceleration.
    pub fn advance(&mut self, delta: f32) -> f32 {
        let t = self.clock.advance(delta);
        self.from + (self.to - self.from) * t
    }
}

/// In-flight transform interpolations of a combatant.
#[derive(Component, Debug, Clone, Default, PartialEq)]
pub struct MotionTweens {
    pub translation: Option<TranslationTween>,
    pub rotation: Option<RotationTween>,
}

impl MotionTweens {
    pub fn is_idle(&self) -> bool {
        self.translation.is_none() && self.rotation.is_none()
    }
}

/// System: step translation/rotation tweens and write the Transform.
pub fn advance_motion_tweens(
    mut query: Query<(&mut Transform, &mut MotionTweens)>,
    time: Res<Time<Fixed>>,
) {
    let delta = time.delta_secs();

    for (mut transform, mut tweens) in query.iter_mut() {
        if let Some(tween) = tweens.translation.as_mut() {
            let t = tween.clock.advance(delta);
            transform.translation = tween.from.lerp(tween.to, t);
            if tween.clock.is_finished() {
                tweens.translation = None;
            }
        }

        if let Some(tween) = tweens.rotation.as_mut() {
            let t = tween.clock.advance(delta);
            transform.rotation = tween.from.slerp(tween.to, t);
            if tween.clock.is_finished() {
                tweens.rotation = None;
            }
        }
    }
}

/// System: step acceleration ramps.
pub fn advance_acceleration_ramps(mut query: Query<&mut Locomotion>, time: Res<Time<Fixed>>) {
    let delta = time.delta_secs();

    for mut locomotion in query.iter_mut() {
        let Some(mut ramp) = locomotion.ramp else {
            continue;
        };

        locomotion.acceleration = ramp.advance(delta);
        locomotion.ramp = if ramp.clock.is_finished() { None } else { Some(ramp) };
    }
}
