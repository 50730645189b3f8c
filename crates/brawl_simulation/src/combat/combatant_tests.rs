//! Tests for the light punch combo state machine and hit reactions.

#[cfg(test)]
mod tests {
    use crate::combat::{CombatNotice, ComboStep, MeleeCombatant, MeleeEffects};
    use crate::components::{AnimationTrigger, PunchAnimation};
    use crate::config::MeleeConfig;
    use crate::movement::MotorCommand;
    use crate::roster::{RosterSnapshot, TargetView};
    use bevy::prelude::*;

    fn enemy(index: u32, position: Vec3, health: u32) -> TargetView {
        TargetView {
            entity: Entity::from_raw(index),
            position,
            forward: Vec3::NEG_Z,
            health,
            preparing_attack: false,
        }
    }

    /// Боец с зарегистрированным первым ударом по `target`
    fn engaged(target: &TargetView, config: &MeleeConfig) -> MeleeCombatant {
        let mut combatant = MeleeCombatant::default();
        let mut effects = MeleeEffects::default();
        let distance = target.position.length();
        combatant.attack(Some(target), distance, Vec3::ZERO, config, &mut effects);
        combatant
    }

    #[test]
    fn test_first_strike_engages_target() {
        let config = MeleeConfig::default();
        let target = enemy(1, Vec3::new(5.0, 0.0, 0.0), 10);
        let mut combatant = MeleeCombatant::new(0.35);
        let mut effects = MeleeEffects::default();

        let registered = combatant.attack(Some(&target), 5.0, Vec3::ZERO, &config, &mut effects);

        assert!(registered);
        assert_eq!(combatant.punch_count, 1);
        // Комбо ещё не зафиксировано: до первого window ввод набирает удары
        assert!(!combatant.is_attacking_enemy);
        assert_eq!(combatant.locked_target, Some(target.entity));
        assert_eq!(combatant.cooldown_timer, 0.35);

        // Порядок команд: stage → accel → locomotion → stop врага → look → move
        assert_eq!(effects.motor[0], MotorCommand::SetComboStage(1));
        assert_eq!(effects.motor[1], MotorCommand::SetAcceleration(0.0));
        assert_eq!(effects.motor[2], MotorCommand::SetLocomotion(false));
        assert_eq!(effects.motor[3], MotorCommand::StopTarget(target.entity));
        assert_eq!(
            effects.motor[4],
            MotorCommand::LookAt {
                point: target.position,
                duration: config.look_at_duration,
            }
        );
        match effects.motor[5] {
            MotorCommand::MoveTo { point, duration } => {
                assert!(point.distance(Vec3::new(4.05, 0.0, 0.0)) < 1e-4, "point = {:?}", point);
                assert_eq!(duration, config.approach_duration);
            }
            other => panic!("expected MoveTo, got {:?}", other),
        }
        assert_eq!(
            effects.notices,
            vec![CombatNotice::TrajectoryStarted {
                target: target.entity
            }]
        );
    }

    #[test]
    fn test_target_out_of_range_degrades_to_air_strike() {
        let config = MeleeConfig::default();
        let target = enemy(1, Vec3::new(20.0, 0.0, 0.0), 10);
        let mut combatant = MeleeCombatant::default();
        combatant.locked_target = Some(target.entity);
        let mut effects = MeleeEffects::default();

        combatant.attack(Some(&target), 20.0, Vec3::ZERO, &config, &mut effects);

        assert_eq!(combatant.punch_count, 1);
        assert_eq!(combatant.locked_target, None);
        assert_eq!(combatant.cooldown_timer, config.air_strike_cooldown);
        assert!(!effects.moves_or_turns());
        assert!(effects.notices.is_empty());
    }

    #[test]
    fn test_air_strike_without_target() {
        let config = MeleeConfig::default();
        let mut combatant = MeleeCombatant::default();
        let mut effects = MeleeEffects::default();

        combatant.attack(None, 0.0, Vec3::ZERO, &config, &mut effects);

        assert_eq!(combatant.punch_count, 1);
        assert_eq!(combatant.cooldown_timer, config.air_strike_cooldown);
        assert!(!combatant.is_attacking_enemy);
        assert_eq!(effects.motor[0], MotorCommand::SetComboStage(1));
        assert!(!effects.moves_or_turns());
        assert!(!effects.motor.iter().any(|c| matches!(c, MotorCommand::StopTarget(_))));
    }

    #[test]
    fn test_strike_refused_when_punch_closed() {
        let config = MeleeConfig::default();
        let mut combatant = MeleeCombatant::default();
        combatant.can_punch = false;
        let mut effects = MeleeEffects::default();

        let registered = combatant.attack(None, 0.0, Vec3::ZERO, &config, &mut effects);

        assert!(!registered);
        assert_eq!(combatant.punch_count, 0);
        assert!(effects.is_empty());
    }

    #[test]
    fn test_punch_count_caps_at_three() {
        let config = MeleeConfig::default();
        let mut combatant = MeleeCombatant::default();
        let mut effects = MeleeEffects::default();

        for _ in 0..5 {
            combatant.attack(None, 0.0, Vec3::ZERO, &config, &mut effects);
        }

        assert_eq!(combatant.punch_count, 3);
        // Только первый удар запускает stage 1
        let stage_commands = effects
            .motor
            .iter()
            .filter(|c| matches!(c, MotorCommand::SetComboStage(_)))
            .count();
        assert_eq!(stage_commands, 1);
    }

    #[test]
    fn test_presses_before_first_window_build_combo() {
        let config = MeleeConfig::default();
        let target = enemy(1, Vec3::new(2.0, 0.0, 0.0), 10);
        let mut combatant = MeleeCombatant::new(0.15);
        let mut effects = MeleeEffects::default();

        for _ in 0..3 {
            assert!(combatant.accepts_attack_input());
            combatant.attack(Some(&target), 2.0, Vec3::ZERO, &config, &mut effects);
            // Cooldown короче клипа: следующее нажатие влезает до window
            combatant.tick_cooldown(0.15);
        }
        assert_eq!(combatant.punch_count, 3);

        let mut effects = MeleeEffects::default();
        let step = combatant.check_light_combo(
            PunchAnimation::LightPunch1,
            Some(&target),
            Vec3::ZERO,
            &config,
            &mut effects,
        );

        assert_eq!(step, ComboStep::Advanced(2));
        assert!(combatant.is_attacking_enemy);
        assert!(!combatant.accepts_attack_input());

        let step = combatant.check_light_combo(
            PunchAnimation::LightPunch2,
            Some(&target),
            Vec3::ZERO,
            &config,
            &mut effects,
        );
        assert_eq!(step, ComboStep::Advanced(3));
        assert!(!combatant.can_punch);
    }

    #[test]
    fn test_window_single_punch_ends_combo() {
        let config = MeleeConfig::default();
        let target = enemy(1, Vec3::new(3.0, 0.0, 0.0), 10);
        let mut combatant = engaged(&target, &config);
        let mut effects = MeleeEffects::default();

        let step = combatant.check_light_combo(
            PunchAnimation::LightPunch1,
            Some(&target),
            Vec3::ZERO,
            &config,
            &mut effects,
        );

        assert_eq!(step, ComboStep::Ended);
        assert_eq!(combatant.punch_count, 0);
        assert!(combatant.can_punch);
        assert!(!combatant.is_attacking_enemy);
        assert_eq!(
            effects.motor,
            vec![
                MotorCommand::SetComboStage(0),
                MotorCommand::SetLocomotion(true),
                MotorCommand::RampAcceleration {
                    from: 0.0,
                    to: 1.0,
                    duration: config.acceleration_ramp_duration,
                },
            ]
        );
    }

    #[test]
    fn test_window_advances_to_stage_two() {
        let config = MeleeConfig::default();
        let target = enemy(1, Vec3::new(3.0, 0.0, 0.0), 10);
        let mut combatant = engaged(&target, &config);
        combatant.punch_count = 2;
        let mut effects = MeleeEffects::default();

        let step = combatant.check_light_combo(
            PunchAnimation::LightPunch1,
            Some(&target),
            Vec3::ZERO,
            &config,
            &mut effects,
        );

        assert_eq!(step, ComboStep::Advanced(2));
        assert!(combatant.can_punch);
        assert!(combatant.is_attacking_enemy);
        assert_eq!(effects.motor[0], MotorCommand::SetComboStage(2));
        // Повторное сближение с целью
        assert!(effects.moves_or_turns());
    }

    #[test]
    fn test_window_stage_three_is_terminal() {
        let config = MeleeConfig::default();
        let target = enemy(1, Vec3::new(3.0, 0.0, 0.0), 10);
        let mut combatant = engaged(&target, &config);
        combatant.punch_count = 3;
        let mut effects = MeleeEffects::default();

        let step = combatant.check_light_combo(
            PunchAnimation::LightPunch2,
            Some(&target),
            Vec3::ZERO,
            &config,
            &mut effects,
        );

        assert_eq!(step, ComboStep::Advanced(3));
        assert!(!combatant.can_punch);
        assert_eq!(effects.motor[0], MotorCommand::SetComboStage(3));

        let mut effects = MeleeEffects::default();
        let step = combatant.check_light_combo(
            PunchAnimation::LightPunch3,
            Some(&target),
            Vec3::ZERO,
            &config,
            &mut effects,
        );
        assert_eq!(step, ComboStep::Ended);
        assert_eq!(combatant.punch_count, 0);
    }

    #[test]
    fn test_window_stage_two_without_third_punch_ends() {
        let config = MeleeConfig::default();
        let mut combatant = MeleeCombatant::default();
        combatant.punch_count = 2;
        combatant.is_attacking_enemy = true;
        let mut effects = MeleeEffects::default();

        let step = combatant.check_light_combo(
            PunchAnimation::LightPunch2,
            None,
            Vec3::ZERO,
            &config,
            &mut effects,
        );

        assert_eq!(step, ComboStep::Ended);
        assert_eq!(combatant.punch_count, 0);
    }

    #[test]
    fn test_window_holds_during_locomotion() {
        let config = MeleeConfig::default();
        let mut combatant = MeleeCombatant::default();
        combatant.punch_count = 1;
        combatant.is_attacking_enemy = true;
        let before = combatant.clone();
        let mut effects = MeleeEffects::default();

        let step = combatant.check_light_combo(
            PunchAnimation::Locomotion,
            None,
            Vec3::ZERO,
            &config,
            &mut effects,
        );

        assert_eq!(step, ComboStep::Hold);
        assert_eq!(combatant, before);
        assert!(effects.is_empty());
    }

    #[test]
    fn test_window_without_combo_holds() {
        let config = MeleeConfig::default();
        let mut combatant = MeleeCombatant::default();
        let mut effects = MeleeEffects::default();

        let step = combatant.check_light_combo(
            PunchAnimation::LightPunch1,
            None,
            Vec3::ZERO,
            &config,
            &mut effects,
        );

        assert_eq!(step, ComboStep::Hold);
        assert!(effects.is_empty());
    }

    #[test]
    fn test_cooldown_ticks_to_zero() {
        let mut combatant = MeleeCombatant::new(0.35);
        combatant.cooldown_timer = 0.1;

        combatant.tick_cooldown(0.25);
        assert_eq!(combatant.cooldown_timer, 0.0);
        assert!(combatant.accepts_attack_input());
    }

    #[test]
    fn test_last_hit_requires_single_survivor_low_health() {
        let finisher = enemy(1, Vec3::X, 1);
        let mut combatant = MeleeCombatant::default();
        combatant.locked_target = Some(finisher.entity);

        let alone = RosterSnapshot::from_views(vec![finisher, enemy(2, Vec3::Y, 0)]);
        assert!(combatant.is_last_hit(&alone));

        let crowded = RosterSnapshot::from_views(vec![finisher, enemy(2, Vec3::Y, 4)]);
        assert!(!combatant.is_last_hit(&crowded));

        let healthy = RosterSnapshot::from_views(vec![enemy(1, Vec3::X, 2)]);
        assert!(!combatant.is_last_hit(&healthy));
    }

    #[test]
    fn test_hit_event_requires_valid_lock() {
        let target = enemy(1, Vec3::X, 5);
        let mut combatant = MeleeCombatant::default();
        let roster = RosterSnapshot::from_views(vec![target]);

        let mut effects = MeleeEffects::default();
        combatant.hit_event(&roster, &mut effects);
        assert!(effects.is_empty(), "no lock → no notification");

        combatant.locked_target = Some(target.entity);
        combatant.hit_event(&roster, &mut effects);
        assert_eq!(
            effects.notices,
            vec![CombatNotice::HitLanded {
                target: target.entity,
                last_hit: false,
            }]
        );

        // Цель умерла — lock протух
        let dead = RosterSnapshot::from_views(vec![enemy(1, Vec3::X, 0)]);
        let mut effects = MeleeEffects::default();
        combatant.hit_event(&dead, &mut effects);
        assert!(effects.is_empty());
    }

    #[test]
    fn test_damage_and_stun_recovery_commands() {
        let config = MeleeConfig::default();
        let combatant = MeleeCombatant::default();

        let mut effects = MeleeEffects::default();
        combatant.damage_event(&mut effects);
        assert_eq!(
            effects.motor,
            vec![
                MotorCommand::FireTrigger(AnimationTrigger::Hit),
                MotorCommand::SetLocomotion(false),
            ]
        );

        let mut effects = MeleeEffects::default();
        combatant.recover_from_stun(&config, &mut effects);
        assert_eq!(effects.motor[0], MotorCommand::SetLocomotion(true));
        assert!(matches!(
            effects.motor[1],
            MotorCommand::RampAcceleration { from, to, .. } if from == 0.0 && to == 1.0
        ));
        assert_eq!(effects.notices, vec![CombatNotice::StunRecovered]);
    }
}
