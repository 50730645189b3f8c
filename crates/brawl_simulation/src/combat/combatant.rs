//! Light punch combo state machine.
//!
//! # States
//!
//! ```text
//! Idle ──attack──> Punch1 ──window(count≥2)──> Punch2 ──window(count≥3)──> Punch3
//!                    │                           │                           │
//!                    └─window(count≤1)──┐        └─window(count≤2)──┐        └─window
//!                                       ▼                           ▼               ▼
//!                                      Idle (EndLightPunchCombo) <──────────────────┘
//! ```
//!
//! Переходы между стадиями делает animation layer через `ComboWindowReached`:
//! ветвление идёт по фактически играющему клипу (`PunchAnimation`), а не по
//! внутреннему таймеру — ввод не может обогнать визуальное комбо.
//!
//! Удары 2 и 3 набираются нажатиями во время первого клипа (до его combo
//! window); окно фиксирует комбо и дальше ввод игнорируется.

use bevy::prelude::*;

use crate::combat::effects::{CombatNotice, MeleeEffects};
use crate::combat::targeting::target_offset;
use crate::combat::{DeferredActions, DirectionalTargeting};
use crate::components::{Animator, Locomotion, PunchAnimation};
use crate::config::{MeleeConfig, MAX_PUNCH_COUNT};
use crate::movement::{MotionTweens, MotorCommand};
use crate::roster::TargetView;

/// Player melee combatant: combo progress, flags, cooldown and lock.
///
/// Инварианты:
/// - `punch_count` ∈ 0..=3, растёт максимум на 1 за strike, сбрасывается
///   только `end_light_punch_combo`
/// - `is_attacking_enemy` == true от первого combo window до конца комбо;
///   до этого окна ввод набирает удары 2 и 3
/// - `locked_target` — non-owning ссылка, ревалидируется перед использованием
#[derive(Component, Debug, Clone, PartialEq)]
#[require(Animator, Locomotion, MotionTweens, DeferredActions, DirectionalTargeting)]
pub struct MeleeCombatant {
    /// Punches registered in the current combo (0–3)
    pub punch_count: u8,
    /// Combo committed (first combo window reached); input is ignored
    pub is_attacking_enemy: bool,
    /// Counter dodge in progress
    pub is_countering: bool,
    /// Next strike may register
    pub can_punch: bool,
    /// Cooldown armed by an engaged strike (seconds)
    pub attack_cooldown: f32,
    /// Remaining cooldown (уменьшается до 0)
    pub cooldown_timer: f32,
    /// Currently engaged hostile
    pub locked_target: Option<Entity>,
}

impl Default for MeleeCombatant {
    fn default() -> Self {
        Self::new(0.15)
    }
}

/// Outcome of a combo-window check.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ComboStep {
    /// Not a punch clip (or no combo running): nothing changed
    Hold,
    /// Advanced to the given stage
    Advanced(u8),
    /// Combo finished
    Ended,
}

impl MeleeCombatant {
    pub fn new(attack_cooldown: f32) -> Self {
        Self {
            punch_count: 0,
            is_attacking_enemy: false,
            is_countering: false,
            can_punch: true,
            attack_cooldown,
            cooldown_timer: 0.0,
            locked_target: None,
        }
    }

    /// Attack intents are accepted (combo not committed yet, cooldown elapsed).
    pub fn accepts_attack_input(&self) -> bool {
        !self.is_attacking_enemy && self.cooldown_timer <= 0.0
    }

    /// At least one punch registered since the last combo end.
    pub fn combo_in_progress(&self) -> bool {
        self.punch_count > 0
    }

    /// Strike `target` at `distance`, or the air when there is none.
    ///
    /// Targets at or beyond `engage_range` clear the lock and degrade to an
    /// air strike (no approach, short cooldown).
    pub fn attack(
        &mut self,
        target: Option<&TargetView>,
        distance: f32,
        origin: Vec3,
        config: &MeleeConfig,
        effects: &mut MeleeEffects,
    ) -> bool {
        let Some(target) = target else {
            return self.attack_type(config.air_strike_cooldown, None, origin, config, effects);
        };

        if distance < config.engage_range {
            self.locked_target = Some(target.entity);
            self.attack_type(self.attack_cooldown, Some(target), origin, config, effects)
        } else {
            crate::log(&format!(
                "🌫️ Melee: target {:?} too far ({:.1}m), lock cleared",
                target.entity, distance
            ));
            self.locked_target = None;
            self.attack_type(config.air_strike_cooldown, None, origin, config, effects)
        }
    }

    /// Register a strike; the first one of a combo enters stage 1.
    ///
    /// Returns true if the punch registered.
    pub fn attack_type(
        &mut self,
        cooldown: f32,
        target: Option<&TargetView>,
        origin: Vec3,
        config: &MeleeConfig,
        effects: &mut MeleeEffects,
    ) -> bool {
        if !self.can_punch || self.punch_count >= MAX_PUNCH_COUNT {
            return false;
        }

        self.punch_count += 1;
        self.cooldown_timer = cooldown;

        if self.punch_count == 1 {
            effects.command(MotorCommand::SetComboStage(1));
            effects.command(MotorCommand::SetAcceleration(0.0));
            effects.command(MotorCommand::SetLocomotion(false));
            self.move_to_target(target, origin, config, effects);

            crate::log(&format!(
                "👊 Melee: combo started (target: {:?})",
                target.map(|t| t.entity)
            ));
        }

        true
    }

    /// Close distance with the locked target: stop it, face it, move in.
    pub fn move_to_target(
        &self,
        target: Option<&TargetView>,
        origin: Vec3,
        config: &MeleeConfig,
        effects: &mut MeleeEffects,
    ) {
        let Some(target) = target else {
            return;
        };
        if self.locked_target != Some(target.entity) {
            return;
        }

        effects.command(MotorCommand::StopTarget(target.entity));
        effects.notify(CombatNotice::TrajectoryStarted {
            target: target.entity,
        });
        effects.command(MotorCommand::LookAt {
            point: target.position,
            duration: config.look_at_duration,
        });
        effects.command(MotorCommand::MoveTo {
            point: target_offset(target.position, origin, config.stop_short_distance),
            duration: config.approach_duration,
        });
    }

    /// Combo window: advance, end or hold based on the clip playing now.
    ///
    /// `target` is the revalidated lock (used to re-approach on advance).
    pub fn check_light_combo(
        &mut self,
        current: PunchAnimation,
        target: Option<&TargetView>,
        origin: Vec3,
        config: &MeleeConfig,
        effects: &mut MeleeEffects,
    ) -> ComboStep {
        if !self.combo_in_progress() || current == PunchAnimation::Locomotion {
            return ComboStep::Hold;
        }

        // Окно первого клипа закрывает приём ввода: удары, набранные до него,
        // решают, до какой стадии дойдёт комбо
        self.is_attacking_enemy = true;
        self.can_punch = false;

        match (current, self.punch_count) {
            (PunchAnimation::LightPunch1, count) if count >= 2 => {
                effects.command(MotorCommand::SetComboStage(2));
                self.move_to_target(target, origin, config, effects);
                self.can_punch = true;
                crate::log("👊 Melee: combo → stage 2");
                ComboStep::Advanced(2)
            }
            (PunchAnimation::LightPunch2, count) if count >= 3 => {
                effects.command(MotorCommand::SetComboStage(3));
                self.move_to_target(target, origin, config, effects);
                // Stage 3 терминальная: ввод больше не продлевает комбо
                self.can_punch = false;
                crate::log("👊 Melee: combo → stage 3 (finisher)");
                ComboStep::Advanced(3)
            }
            _ => {
                self.end_light_punch_combo(config, effects);
                ComboStep::Ended
            }
        }
    }

    /// Reset the combo and hand control back to locomotion.
    pub fn end_light_punch_combo(&mut self, config: &MeleeConfig, effects: &mut MeleeEffects) {
        effects.command(MotorCommand::SetComboStage(0));
        self.punch_count = 0;
        self.can_punch = true;
        effects.command(MotorCommand::SetLocomotion(true));
        self.is_attacking_enemy = false;
        effects.command(MotorCommand::RampAcceleration {
            from: 0.0,
            to: 1.0,
            duration: config.acceleration_ramp_duration,
        });

        crate::log("✅ Melee: combo ended");
    }

    /// Count down the attack cooldown.
    pub fn tick_cooldown(&mut self, delta: f32) {
        if self.cooldown_timer > 0.0 {
            self.cooldown_timer = (self.cooldown_timer - delta).max(0.0);
        }
    }
}
