//! Property-based тесты combo/counter state machines
//!
//! Инварианты для ЛЮБОЙ последовательности входов:
//! - punch_count ≤ 3, уменьшается только через конец комбо
//! - после конца комбо: can_punch, !is_attacking_enemy, punch_count == 0
//! - combo window с Advanced фиксирует комбо (is_attacking_enemy)
//! - контратака не стартует во время комбо или другой контратаки,
//!   lunge не обходит attack cooldown

use bevy::prelude::*;
use brawl_simulation::combat::{ComboStep, CounterDecision, MeleeEffects};
use brawl_simulation::{MeleeCombatant, MeleeConfig, PunchAnimation, RosterSnapshot, TargetView};
use proptest::prelude::*;

#[derive(Debug, Clone)]
enum Input {
    /// Attack по цели на дистанции (None → воздух)
    Attack(Option<f32>),
    /// Combo window с текущим клипом
    Window(PunchAnimation),
    /// Counter intent (враг замахивается на дистанции)
    Counter(f32),
    /// Counter delay истёк
    CounterComplete,
    Cooldown(f32),
}

fn clip() -> impl Strategy<Value = PunchAnimation> {
    prop_oneof![
        Just(PunchAnimation::Locomotion),
        Just(PunchAnimation::LightPunch1),
        Just(PunchAnimation::LightPunch2),
        Just(PunchAnimation::LightPunch3),
    ]
}

fn input() -> impl Strategy<Value = Input> {
    prop_oneof![
        proptest::option::of(0.5f32..25.0).prop_map(Input::Attack),
        clip().prop_map(Input::Window),
        (0.5f32..6.0).prop_map(Input::Counter),
        Just(Input::CounterComplete),
        (0.0f32..0.5).prop_map(Input::Cooldown),
    ]
}

fn target(distance: f32, preparing_attack: bool) -> TargetView {
    TargetView {
        entity: Entity::from_raw(1),
        position: Vec3::new(distance, 0.0, 0.0),
        forward: Vec3::NEG_X,
        health: 10,
        preparing_attack,
    }
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(256))]

    #[test]
    fn prop_combo_invariants_hold(inputs in prop::collection::vec(input(), 1..64)) {
        let config = MeleeConfig::default();
        let mut combatant = MeleeCombatant::default();
        let mut pending_counter = false;

        for input in inputs {
            let before = combatant.clone();
            let mut effects = MeleeEffects::default();
            let mut ended = false;

            match input {
                Input::Attack(distance) => {
                    let view = distance.map(|d| target(d, false));
                    combatant.attack(view.as_ref(), distance.unwrap_or(0.0), Vec3::ZERO, &config, &mut effects);
                }
                Input::Window(clip) => {
                    let view = target(2.0, false);
                    let step = combatant.check_light_combo(clip, Some(&view), Vec3::ZERO, &config, &mut effects);
                    ended = step == ComboStep::Ended;
                    if step == ComboStep::Hold {
                        prop_assert_eq!(&combatant, &before);
                    }
                    // Пройденное окно фиксирует комбо: дальше ввод не принимается
                    if matches!(step, ComboStep::Advanced(_)) {
                        prop_assert!(combatant.is_attacking_enemy);
                        prop_assert!(!combatant.accepts_attack_input());
                    }
                }
                Input::Counter(distance) => {
                    let roster = RosterSnapshot::from_views(vec![target(distance, true)]);
                    let decision = combatant.counter_check(&roster, Vec3::ZERO, &config, &mut effects);
                    if before.is_attacking_enemy || before.is_countering {
                        prop_assert_eq!(decision, CounterDecision::Refused);
                        prop_assert!(effects.is_empty());
                    }
                    if matches!(decision, CounterDecision::Lunge { .. }) {
                        prop_assert!(before.cooldown_timer <= 0.0);
                    }
                    if matches!(decision, CounterDecision::Dodge { .. }) {
                        pending_counter = true;
                    }
                }
                Input::CounterComplete => {
                    if pending_counter {
                        let roster = RosterSnapshot::from_views(vec![target(1.0, true)]);
                        combatant.complete_counter(&roster, Vec3::ZERO, &config, &mut effects);
                        pending_counter = false;
                        prop_assert!(!combatant.is_countering);
                    }
                }
                Input::Cooldown(delta) => {
                    combatant.tick_cooldown(delta);
                    prop_assert!(combatant.cooldown_timer >= 0.0);
                }
            }

            prop_assert!(combatant.punch_count <= 3, "punch_count = {}", combatant.punch_count);

            if ended {
                prop_assert_eq!(combatant.punch_count, 0);
                prop_assert!(combatant.can_punch);
                prop_assert!(!combatant.is_attacking_enemy);
            } else {
                // Без конца комбо счётчик не уменьшается и растёт максимум на 1
                prop_assert!(combatant.punch_count >= before.punch_count);
                prop_assert!(combatant.punch_count <= before.punch_count + 1);
            }

            if combatant.is_attacking_enemy {
                prop_assert!(combatant.punch_count > 0);
            }
        }
    }

    #[test]
    fn prop_out_of_range_never_locks(distance in 15.0f32..100.0) {
        let config = MeleeConfig::default();
        let mut combatant = MeleeCombatant::default();
        let mut effects = MeleeEffects::default();
        let view = target(distance, false);

        combatant.attack(Some(&view), distance, Vec3::ZERO, &config, &mut effects);

        prop_assert_eq!(combatant.locked_target, None);
        prop_assert!(!effects.moves_or_turns());
    }

    #[test]
    fn prop_air_strike_never_moves(attacks in 1usize..6) {
        let config = MeleeConfig::default();
        let mut combatant = MeleeCombatant::default();
        let mut effects = MeleeEffects::default();

        for _ in 0..attacks {
            combatant.attack(None, 0.0, Vec3::ZERO, &config, &mut effects);
        }

        prop_assert!(!effects.moves_or_turns());
        prop_assert!(effects.notices.is_empty());
    }
}
