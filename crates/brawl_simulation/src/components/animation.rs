//! Animation компоненты: discrete combo stage + reported playback state
//!
//! Анимацию проигрывает tactical layer (AnimationTree/Animator).
//! ECS пишет `combo_stage` (integer parameter) и читает `current_state`,
//! который движок обновляет по фактической позиции проигрывания.

use bevy::prelude::*;

/// Animation state currently playing on the combatant's base layer.
///
/// Reported by the animation layer. Combo advancement is gated on this
/// value so input can never race ahead of the visual punch sequence.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum PunchAnimation {
    /// Locomotion / idle / any non-punch clip
    #[default]
    Locomotion,
    LightPunch1,
    LightPunch2,
    LightPunch3,
}

impl PunchAnimation {
    /// Clip played for a combo stage.
    pub fn for_stage(stage: u8) -> Self {
        match stage {
            1 => Self::LightPunch1,
            2 => Self::LightPunch2,
            3 => Self::LightPunch3,
            _ => Self::Locomotion,
        }
    }
}

/// One-shot animation triggers.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum AnimationTrigger {
    /// Counter dodge
    Dodge,
    /// Hit reaction
    Hit,
}

impl AnimationTrigger {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Dodge => "Dodge",
            Self::Hit => "Hit",
        }
    }
}

/// Animator parameters shared between ECS and the animation layer.
#[derive(Component, Debug, Clone, Default, PartialEq)]
pub struct Animator {
    /// Discrete combo stage parameter (0 = none, 1–3 = punch stages)
    pub combo_stage: u8,
    /// State the animation layer is currently playing
    pub current_state: PunchAnimation,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_punch_animation_stage_mapping() {
        assert_eq!(PunchAnimation::for_stage(1), PunchAnimation::LightPunch1);
        assert_eq!(PunchAnimation::for_stage(2), PunchAnimation::LightPunch2);
        assert_eq!(PunchAnimation::for_stage(3), PunchAnimation::LightPunch3);
        assert_eq!(PunchAnimation::for_stage(0), PunchAnimation::Locomotion);
        assert_eq!(PunchAnimation::for_stage(7), PunchAnimation::Locomotion);
    }
}
