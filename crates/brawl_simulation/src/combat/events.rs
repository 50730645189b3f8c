//! Melee events: input intents, animation callbacks, outgoing notifications.
//!
//! Входящие (tactical layer → ECS):
//! - `AttackIntent` / `CounterIntent` — edge-triggered кнопки
//! - `ComboWindowReached` — animation callback "можно продолжить комбо"
//! - `HitKeyframe` — кулак достиг цели (keyframe)
//! - `DamageReceived` — бойца ударили
//!
//! Исходящие (ECS → camera shake, VFX, audio): кто слушает — core не знает.

use bevy::prelude::*;

// ============================================================================
// Input intents
// ============================================================================

/// Player pressed attack this tick (edge-triggered).
#[derive(Event, Debug, Clone)]
pub struct AttackIntent {
    pub combatant: Entity,
}

/// Player pressed counter this tick (edge-triggered).
#[derive(Event, Debug, Clone)]
pub struct CounterIntent {
    pub combatant: Entity,
}

// ============================================================================
// Animation callbacks
// ============================================================================

/// Combo window reached during punch playback.
///
/// The animation layer decides when this fires; the combo state machine only
/// decides whether to advance, end or hold.
#[derive(Event, Debug, Clone)]
pub struct ComboWindowReached {
    pub combatant: Entity,
}

/// Punch keyframe: the strike connects.
#[derive(Event, Debug, Clone)]
pub struct HitKeyframe {
    pub combatant: Entity,
}

/// Combatant was hit by an enemy.
#[derive(Event, Debug, Clone)]
pub struct DamageReceived {
    pub combatant: Entity,
}

// ============================================================================
// Notifications
// ============================================================================

/// Combatant started closing distance with its target.
#[derive(Event, Debug, Clone, PartialEq)]
pub struct TrajectoryStarted {
    pub combatant: Entity,
    pub target: Entity,
}

/// Strike landed on the locked target.
#[derive(Event, Debug, Clone, PartialEq)]
pub struct HitLanded {
    pub combatant: Entity,
    pub target: Entity,
    /// Last alive enemy with ≤ 1 HP (finisher camera, slow-mo)
    pub last_hit: bool,
}

/// Counter-attack triggered against a winding-up enemy.
#[derive(Event, Debug, Clone, PartialEq)]
pub struct CounterTriggered {
    pub combatant: Entity,
    pub target: Entity,
}

/// Hit-stun ended, locomotion restored.
#[derive(Event, Debug, Clone, PartialEq)]
pub struct StunRecovered {
    pub combatant: Entity,
}
