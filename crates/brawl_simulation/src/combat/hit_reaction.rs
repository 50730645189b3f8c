//! Hit/damage re-entry points (animation keyframe callbacks).

use crate::combat::effects::{CombatNotice, MeleeEffects};
use crate::combat::MeleeCombatant;
use crate::components::AnimationTrigger;
use crate::config::MeleeConfig;
use crate::movement::MotorCommand;
use crate::roster::RosterSnapshot;

impl MeleeCombatant {
    /// Finishing blow: the lock is the last alive enemy and has ≤ 1 HP.
    pub fn is_last_hit(&self, roster: &RosterSnapshot) -> bool {
        let Some(target) = self.locked_target.and_then(|entity| roster.live(entity)) else {
            return false;
        };

        roster.alive_count() == 1 && target.health <= 1
    }

    /// Punch keyframe reached: notify listeners if the lock is still valid.
    pub fn hit_event(&self, roster: &RosterSnapshot, effects: &mut MeleeEffects) {
        if roster.alive_count() == 0 {
            return;
        }
        let Some(target) = self.locked_target.and_then(|entity| roster.live(entity)) else {
            return;
        };

        effects.notify(CombatNotice::HitLanded {
            target: target.entity,
            last_hit: self.is_last_hit(roster),
        });
    }

    /// Took damage: hit reaction + locomotion lock.
    ///
    /// The caller (re)schedules the hit-stun delay; a pending one is replaced.
    pub fn damage_event(&self, effects: &mut MeleeEffects) {
        effects.command(MotorCommand::FireTrigger(AnimationTrigger::Hit));
        effects.command(MotorCommand::SetLocomotion(false));
    }

    /// Hit-stun elapsed: give locomotion back with a smooth acceleration ramp.
    pub fn recover_from_stun(&self, config: &MeleeConfig, effects: &mut MeleeEffects) {
        effects.command(MotorCommand::SetLocomotion(true));
        effects.command(MotorCommand::RampAcceleration {
            from: 0.0,
            to: 1.0,
            duration: config.acceleration_ramp_duration,
        });
        effects.notify(CombatNotice::StunRecovered);
    }
}
