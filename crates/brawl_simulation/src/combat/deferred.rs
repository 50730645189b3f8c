//! Cooperative delayed actions (counter completion, hit-stun recovery).
//!
//! Один слот на вид действия. Новый запуск перезаписывает слот — предыдущее
//! действие отменяется (last-writer-wins, без очереди). Таймер, запущенный в
//! тике N, начинает убывать с тика N+1.

use bevy::prelude::*;

/// Countdown until a deferred action resumes.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Delay {
    pub remaining: f32,
}

impl Delay {
    pub fn new(duration: f32) -> Self {
        Self {
            remaining: duration,
        }
    }

    /// Count down; true once the delay has fully elapsed.
    pub fn tick(&mut self, delta: f32) -> bool {
        self.remaining -= delta;
        // допуск на накопленную ошибку float при шаге 1/60
        self.remaining <= 1e-4
    }
}

/// Single-slot deferred actions owned by a combatant.
#[derive(Component, Debug, Clone, Default, PartialEq)]
pub struct DeferredActions {
    /// Counter dodge → attack
    pub counter: Option<Delay>,
    /// Hit-stun → locomotion restore
    pub hit_stun: Option<Delay>,
}

impl DeferredActions {
    /// Start (or restart) the counter delay; returns true if one was cancelled.
    pub fn schedule_counter(&mut self, duration: f32) -> bool {
        self.counter.replace(Delay::new(duration)).is_some()
    }

    /// Start (or restart) the hit-stun delay; returns true if one was cancelled.
    pub fn schedule_hit_stun(&mut self, duration: f32) -> bool {
        self.hit_stun.replace(Delay::new(duration)).is_some()
    }

    /// Advance the counter slot; true exactly once when it fires.
    pub fn tick_counter(&mut self, delta: f32) -> bool {
        Self::tick_slot(&mut self.counter, delta)
    }

    /// Advance the hit-stun slot; true exactly once when it fires.
    pub fn tick_hit_stun(&mut self, delta: f32) -> bool {
        Self::tick_slot(&mut self.hit_stun, delta)
    }

    fn tick_slot(slot: &mut Option<Delay>, delta: f32) -> bool {
        let Some(delay) = slot.as_mut() else {
            return false;
        };

        if delay.tick(delta) {
            *slot = None;
            true
        } else {
            false
        }
    }
}
