//! Melee ECS systems (strategic layer glue).
//!
//! Каждая система: читает events → строит `RosterSnapshot` → вызывает чистый
//! метод `MeleeCombatant` → сбрасывает `MeleeEffects` в `MeleeOutbox`.
//! Порядок задаётся `.chain()` в `MeleeCombatPlugin`.

use bevy::prelude::*;

use crate::combat::effects::{MeleeEffects, MeleeOutbox};
use crate::combat::events::{
    AttackIntent, ComboWindowReached, CounterIntent, DamageReceived, HitKeyframe,
};
use crate::combat::targeting::{acquire_target, target_distance, TargetAcquisition};
use crate::combat::{CounterDecision, DeferredActions, DirectionalTargeting, MeleeCombatant};
use crate::components::Animator;
use crate::config::MeleeConfig;
use crate::roster::{EnemyRoster, EnemyViewQuery, RosterSnapshot};
use crate::DeterministicRng;

/// System: attack cooldown timers.
pub fn tick_attack_cooldowns(mut query: Query<&mut MeleeCombatant>, time: Res<Time<Fixed>>) {
    let delta = time.delta_secs();

    for mut combatant in query.iter_mut() {
        if combatant.cooldown_timer > 0.0 {
            combatant.tick_cooldown(delta);
        }
    }
}

/// System: resume deferred actions whose delay elapsed (counter, hit-stun).
///
/// Runs before intent processing: a delay scheduled this tick starts counting
/// on the next one.
pub fn tick_deferred_actions(
    mut combatants: Query<(Entity, &mut MeleeCombatant, &Transform, &mut DeferredActions)>,
    roster: Res<EnemyRoster>,
    enemies: EnemyViewQuery,
    config: Res<MeleeConfig>,
    time: Res<Time<Fixed>>,
    mut outbox: MeleeOutbox,
) {
    let delta = time.delta_secs();
    let mut snapshot: Option<RosterSnapshot> = None;

    for (entity, mut combatant, transform, mut deferred) in combatants.iter_mut() {
        let mut effects = MeleeEffects::default();

        if deferred.tick_counter(delta) {
            let snapshot = snapshot.get_or_insert_with(|| RosterSnapshot::capture(&roster, &enemies));
            combatant.complete_counter(snapshot, transform.translation, &config, &mut effects);
        }

        if deferred.tick_hit_stun(delta) {
            combatant.recover_from_stun(&config, &mut effects);
            crate::log(&format!("✅ Melee: hit-stun over (entity: {:?})", entity));
        }

        outbox.flush(entity, &mut effects);
    }
}

/// System: attack intents → target acquisition → Attack.
pub fn process_attack_intents(
    mut intents: EventReader<AttackIntent>,
    mut combatants: Query<(&mut MeleeCombatant, &Transform, &DirectionalTargeting)>,
    roster: Res<EnemyRoster>,
    enemies: EnemyViewQuery,
    config: Res<MeleeConfig>,
    mut rng: ResMut<DeterministicRng>,
    mut outbox: MeleeOutbox,
) {
    if intents.is_empty() {
        return;
    }
    let snapshot = RosterSnapshot::capture(&roster, &enemies);

    for intent in intents.read() {
        let Ok((mut combatant, transform, directional)) = combatants.get_mut(intent.combatant) else {
            crate::log(&format!(
                "⚠️ Melee: attack intent for non-combatant {:?}",
                intent.combatant
            ));
            continue;
        };

        // Зафиксированное комбо (или cooldown) игнорирует ввод
        if !combatant.accepts_attack_input() {
            continue;
        }

        let origin = transform.translation;
        let mut effects = MeleeEffects::default();

        match acquire_target(
            combatant.locked_target,
            Some(directional),
            &snapshot,
            &config,
            &mut rng.rng,
        ) {
            TargetAcquisition::Air => {
                combatant.locked_target = None;
                combatant.attack(None, 0.0, origin, &config, &mut effects);
            }
            TargetAcquisition::Engage(target) => {
                combatant.locked_target = Some(target.entity);
                let distance = target_distance(origin, target.position);
                combatant.attack(Some(&target), distance, origin, &config, &mut effects);
            }
        }

        outbox.flush(intent.combatant, &mut effects);
    }
}

/// System: counter intents → counter state machine.
pub fn process_counter_intents(
    mut intents: EventReader<CounterIntent>,
    mut combatants: Query<(&mut MeleeCombatant, &Transform, &mut DeferredActions)>,
    roster: Res<EnemyRoster>,
    enemies: EnemyViewQuery,
    config: Res<MeleeConfig>,
    mut outbox: MeleeOutbox,
) {
    if intents.is_empty() {
        return;
    }
    let snapshot = RosterSnapshot::capture(&roster, &enemies);

    for intent in intents.read() {
        let Ok((mut combatant, transform, mut deferred)) = combatants.get_mut(intent.combatant) else {
            continue;
        };

        let mut effects = MeleeEffects::default();
        let decision =
            combatant.counter_check(&snapshot, transform.translation, &config, &mut effects);

        if let CounterDecision::Dodge { delay, .. } = decision {
            if deferred.schedule_counter(delay) {
                crate::log("⚡ Counter: pending counter replaced");
            }
        }

        outbox.flush(intent.combatant, &mut effects);
    }
}

/// System: combo window callbacks from the animation layer.
pub fn process_combo_windows(
    mut windows: EventReader<ComboWindowReached>,
    mut combatants: Query<(&mut MeleeCombatant, &Transform, &Animator)>,
    roster: Res<EnemyRoster>,
    enemies: EnemyViewQuery,
    config: Res<MeleeConfig>,
    mut outbox: MeleeOutbox,
) {
    if windows.is_empty() {
        return;
    }
    let snapshot = RosterSnapshot::capture(&roster, &enemies);

    for window in windows.read() {
        let Ok((mut combatant, transform, animator)) = combatants.get_mut(window.combatant) else {
            continue;
        };

        let target = combatant
            .locked_target
            .and_then(|entity| snapshot.live(entity))
            .copied();

        let mut effects = MeleeEffects::default();
        combatant.check_light_combo(
            animator.current_state,
            target.as_ref(),
            transform.translation,
            &config,
            &mut effects,
        );

        outbox.flush(window.combatant, &mut effects);
    }
}

/// System: punch keyframes → HitLanded.
pub fn process_hit_keyframes(
    mut keyframes: EventReader<HitKeyframe>,
    combatants: Query<&MeleeCombatant>,
    roster: Res<EnemyRoster>,
    enemies: EnemyViewQuery,
    mut outbox: MeleeOutbox,
) {
    if keyframes.is_empty() {
        return;
    }
    let snapshot = RosterSnapshot::capture(&roster, &enemies);

    for keyframe in keyframes.read() {
        let Ok(combatant) = combatants.get(keyframe.combatant) else {
            continue;
        };

        let mut effects = MeleeEffects::default();
        combatant.hit_event(&snapshot, &mut effects);
        outbox.flush(keyframe.combatant, &mut effects);
    }
}

/// System: damage taken → hit reaction + (re)scheduled hit-stun.
pub fn process_damage_received(
    mut damage: EventReader<DamageReceived>,
    mut combatants: Query<(&MeleeCombatant, &mut DeferredActions)>,
    config: Res<MeleeConfig>,
    mut outbox: MeleeOutbox,
) {
    for event in damage.read() {
        let Ok((combatant, mut deferred)) = combatants.get_mut(event.combatant) else {
            continue;
        };

        let mut effects = MeleeEffects::default();
        combatant.damage_event(&mut effects);

        if deferred.schedule_hit_stun(config.hit_stun_duration) {
            crate::log(&format!(
                "💢 Melee: hit-stun restarted (entity: {:?})",
                event.combatant
            ));
        } else {
            crate::log(&format!("💢 Melee: hit-stun (entity: {:?})", event.combatant));
        }

        outbox.flush(event.combatant, &mut effects);
    }
}
