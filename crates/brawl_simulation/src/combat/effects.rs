//! Side effects collected by the melee state machines.
//!
//! State machine методы чистые: они мутируют только `MeleeCombatant` и
//! складывают команды/нотификации в `MeleeEffects`. Системы потом сбрасывают
//! буфер в Bevy events через `MeleeOutbox`.

use bevy::ecs::system::SystemParam;
use bevy::prelude::*;

use crate::combat::events::{CounterTriggered, HitLanded, StunRecovered, TrajectoryStarted};
use crate::movement::{MotorCommand, MotorCommandIssued};

/// Notification produced by the state machines.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum CombatNotice {
    TrajectoryStarted { target: Entity },
    HitLanded { target: Entity, last_hit: bool },
    CounterTriggered { target: Entity },
    StunRecovered,
}

/// Ordered buffer of motor commands and notifications.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct MeleeEffects {
    pub motor: Vec<MotorCommand>,
    pub notices: Vec<CombatNotice>,
}

impl MeleeEffects {
    pub fn command(&mut self, command: MotorCommand) {
        self.motor.push(command);
    }

    pub fn notify(&mut self, notice: CombatNotice) {
        self.notices.push(notice);
    }

    pub fn is_empty(&self) -> bool {
        self.motor.is_empty() && self.notices.is_empty()
    }

    /// True if any translation or rotation was requested.
    pub fn moves_or_turns(&self) -> bool {
        self.motor
            .iter()
            .any(|c| matches!(c, MotorCommand::MoveTo { .. } | MotorCommand::LookAt { .. }))
    }
}

/// Event writers every melee system flushes into.
#[derive(SystemParam)]
pub struct MeleeOutbox<'w> {
    motor: EventWriter<'w, MotorCommandIssued>,
    trajectory: EventWriter<'w, TrajectoryStarted>,
    hits: EventWriter<'w, HitLanded>,
    counters: EventWriter<'w, CounterTriggered>,
    recoveries: EventWriter<'w, StunRecovered>,
}

impl MeleeOutbox<'_> {
    /// Drain `effects` into events, preserving issue order per channel.
    pub fn flush(&mut self, combatant: Entity, effects: &mut MeleeEffects) {
        for command in effects.motor.drain(..) {
            self.motor.write(MotorCommandIssued { combatant, command });
        }

        for notice in effects.notices.drain(..) {
            match notice {
                CombatNotice::TrajectoryStarted { target } => {
                    self.trajectory.write(TrajectoryStarted { combatant, target });
                }
                CombatNotice::HitLanded { target, last_hit } => {
                    self.hits.write(HitLanded {
                        combatant,
                        target,
                        last_hit,
                    });
                }
                CombatNotice::CounterTriggered { target } => {
                    self.counters.write(CounterTriggered { combatant, target });
                }
                CombatNotice::StunRecovered => {
                    self.recoveries.write(StunRecovered { combatant });
                }
            }
        }
    }
}
