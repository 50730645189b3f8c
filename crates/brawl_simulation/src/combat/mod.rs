//! Melee combat module (player punch combo + counter-attack)
//!
//! ECS ответственность:
//! - Game state: combo progress, flags, locked target, deferred actions
//! - Combat rules: target acquisition, combo/counter state machines
//! - Events: TrajectoryStarted, HitLanded, CounterTriggered, StunRecovered
//!
//! Tactical layer ответственность:
//! - Animator: проигрывает punch клипы, шлёт ComboWindowReached / HitKeyframe
//! - Input: AttackIntent / CounterIntent (edge-triggered), stick direction
//! - Enemy AI: `Enemy::preparing_attack`, исполняет `MovementCommand::Stop`

use bevy::prelude::*;

pub mod combatant;
pub mod counter;
pub mod deferred;
pub mod effects;
pub mod events;
pub mod hit_reaction;
pub mod systems;
pub mod targeting;

// Tests (separate files with _tests suffix)
#[cfg(test)]
mod combatant_tests;

// Re-export основных типов
pub use combatant::{ComboStep, MeleeCombatant};
pub use counter::CounterDecision;
pub use deferred::{DeferredActions, Delay};
pub use effects::{CombatNotice, MeleeEffects, MeleeOutbox};
pub use events::*;
pub use targeting::{
    acquire_target, directional_candidate, target_distance, target_offset, DirectionalTargeting,
    TargetAcquisition,
};

use crate::config::MeleeConfig;
use crate::movement::{self, AnimationTriggered, MotorCommandIssued};
use crate::roster::{self, EnemyRoster};
use crate::DeterministicRng;

/// Melee Combat Plugin
///
/// Регистрирует melee системы в FixedUpdate (60Hz).
///
/// Порядок выполнения:
/// 1. register_spawned_enemies / prune_roster — актуализация roster
/// 2. tick_attack_cooldowns — attack cooldown таймеры
/// 3. update_directional_targets — stick → directional target
/// 4. tick_deferred_actions — counter completion, hit-stun recovery
/// 5. process_*_intents / process_combo_windows / process_hit_keyframes /
///    process_damage_received — state machines
/// 6. apply_motor_commands — MotorCommand → Animator / Locomotion / tweens
/// 7. advance_motion_tweens / advance_acceleration_ramps — интерполяции
pub struct MeleeCombatPlugin;

impl Plugin for MeleeCombatPlugin {
    fn build(&self, app: &mut App) {
        app.init_resource::<MeleeConfig>()
            .init_resource::<EnemyRoster>();

        // Random target pick требует RNG; seed по умолчанию если никто не вставил
        if !app.world().contains_resource::<DeterministicRng>() {
            app.insert_resource(DeterministicRng::new(42));
        }

        // Регистрация событий
        app.add_event::<AttackIntent>()
            .add_event::<CounterIntent>()
            .add_event::<ComboWindowReached>()
            .add_event::<HitKeyframe>()
            .add_event::<DamageReceived>()
            .add_event::<TrajectoryStarted>()
            .add_event::<HitLanded>()
            .add_event::<CounterTriggered>()
            .add_event::<StunRecovered>()
            .add_event::<MotorCommandIssued>()
            .add_event::<AnimationTriggered>();

        app.add_systems(
            FixedUpdate,
            (
                // Фаза 1: Roster + timers
                roster::register_spawned_enemies,
                roster::prune_roster,
                systems::tick_attack_cooldowns,
                targeting::update_directional_targets,
                systems::tick_deferred_actions,
                // Фаза 2: State machines (input + animation callbacks)
                systems::process_attack_intents,
                systems::process_counter_intents,
                systems::process_combo_windows,
                systems::process_hit_keyframes,
                systems::process_damage_received,
                // Фаза 3: Movement/animation coordinator
                movement::apply_motor_commands,
                movement::advance_motion_tweens,
                movement::advance_acceleration_ramps,
            )
                .chain(), // Последовательное выполнение
        );
    }
}
