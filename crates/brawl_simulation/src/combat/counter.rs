//! Counter-attack: Idle → Countering → Idle.
//!
//! Guard: не во время комбо, не во время контратаки, и хотя бы один враг
//! замахивается. Близкий враг (≤ counter_range) → dodge + отложенная атака,
//! дальний → обычная атака сразу (только после attack cooldown).

use bevy::prelude::*;

use crate::combat::effects::{CombatNotice, MeleeEffects};
use crate::combat::targeting::target_distance;
use crate::combat::MeleeCombatant;
use crate::components::AnimationTrigger;
use crate::config::MeleeConfig;
use crate::movement::MotorCommand;
use crate::roster::RosterSnapshot;

/// What a counter intent turned into.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum CounterDecision {
    /// Guard refused (already busy, or nobody is winding up)
    Refused,
    /// Target too far for a dodge: regular attack issued immediately
    Lunge { target: Entity, distance: f32 },
    /// Dodge started; the caller schedules the counter delay
    Dodge { target: Entity, delay: f32 },
}

impl MeleeCombatant {
    /// Counter intent: pick the closest winding-up enemy and react.
    pub fn counter_check(
        &mut self,
        roster: &RosterSnapshot,
        origin: Vec3,
        config: &MeleeConfig,
        effects: &mut MeleeEffects,
    ) -> CounterDecision {
        if self.is_countering || self.is_attacking_enemy || !roster.any_preparing_attack() {
            return CounterDecision::Refused;
        }

        // Guard и scan читают один snapshot, но scan всё равно может вернуть None
        let Some(target) = roster.closest_counter_enemy(origin).copied() else {
            return CounterDecision::Refused;
        };

        let distance = target_distance(origin, target.position);
        let lunge = distance > config.counter_range;

        // Lunge — обычный удар: подчиняется attack cooldown как и ввод
        if lunge && self.cooldown_timer > 0.0 {
            return CounterDecision::Refused;
        }

        self.locked_target = Some(target.entity);
        effects.notify(CombatNotice::CounterTriggered {
            target: target.entity,
        });

        if lunge {
            crate::log(&format!(
                "⚡ Counter: {:?} out of dodge range ({:.1}m) → attack",
                target.entity, distance
            ));
            self.attack(Some(&target), distance, origin, config, effects);
            return CounterDecision::Lunge {
                target: target.entity,
                distance,
            };
        }

        effects.command(MotorCommand::FireTrigger(AnimationTrigger::Dodge));
        effects.command(MotorCommand::LookAt {
            point: target.position,
            duration: config.look_at_duration,
        });
        effects.command(MotorCommand::MoveTo {
            point: origin + target.forward * config.dodge_distance,
            duration: config.dodge_duration,
        });

        self.is_countering = true;
        effects.command(MotorCommand::SetLocomotion(false));

        crate::log(&format!(
            "⚡ Counter: dodge vs {:?} ({:.1}m)",
            target.entity, distance
        ));

        CounterDecision::Dodge {
            target: target.entity,
            delay: config.dodge_duration,
        }
    }

    /// Counter delay elapsed: attack the (revalidated) lock at its current distance.
    ///
    /// Committed follow-through of the dodge: not gated by the attack cooldown.
    pub fn complete_counter(
        &mut self,
        roster: &RosterSnapshot,
        origin: Vec3,
        config: &MeleeConfig,
        effects: &mut MeleeEffects,
    ) {
        let target = self.locked_target.and_then(|entity| roster.live(entity)).copied();
        let distance = target.map_or(0.0, |t| target_distance(origin, t.position));

        self.attack(target.as_ref(), distance, origin, config, effects);
        self.is_countering = false;

        crate::log(&format!(
            "⚡ Counter: completed (target: {:?})",
            target.map(|t| t.entity)
        ));
    }
}
