//! Target acquisition: lock, directional override, random fallback.
//!
//! # Resolution order (attack intent)
//!
//! ```text
//! valid lock? ──no──> roster empty? ──yes──> Air strike
//!      │                    │no
//!      │               random live member
//!      ▼
//! stick > deadzone? ──yes──> directional target (may be none)
//!      ▼
//! unresolved? ──yes──> random live member
//!      ▼
//! Engage(target)
//! ```

use bevy::prelude::*;
use rand::Rng;

use crate::components::Player;
use crate::config::MeleeConfig;
use crate::roster::{EnemyRoster, EnemyViewQuery, RosterSnapshot, TargetView};

/// Directional-targeting input + its current pick.
///
/// `input` — world-space stick direction (camera-relative conversion happens
/// in the input layer). `current_target` is refreshed by
/// `update_directional_targets` every tick.
#[derive(Component, Debug, Clone, Default, PartialEq)]
pub struct DirectionalTargeting {
    pub input: Vec3,
    pub current_target: Option<Entity>,
}

impl DirectionalTargeting {
    pub fn input_magnitude(&self) -> f32 {
        self.input.length()
    }
}

/// Result of target acquisition.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum TargetAcquisition {
    /// Nobody to hit: strike at nothing
    Air,
    /// Engage this roster member
    Engage(TargetView),
}

/// Straight-line distance.
pub fn target_distance(origin: Vec3, target: Vec3) -> f32 {
    origin.distance(target)
}

/// Point `stop_short` units from `target` toward `origin`, never past `origin`.
pub fn target_offset(target: Vec3, origin: Vec3, stop_short: f32) -> Vec3 {
    let to_origin = origin - target;
    let distance = to_origin.length();

    if distance <= stop_short || distance <= f32::EPSILON {
        return origin;
    }

    target + to_origin / distance * stop_short
}

/// Resolve which hostile an attack intent engages.
///
/// Mid-combo re-entrancy is checked by the caller.
pub fn acquire_target<R: Rng + ?Sized>(
    locked: Option<Entity>,
    directional: Option<&DirectionalTargeting>,
    roster: &RosterSnapshot,
    config: &MeleeConfig,
    rng: &mut R,
) -> TargetAcquisition {
    // Ревалидация lock'а: ссылка не инвалидируется сама при смерти цели
    let mut resolved = locked.and_then(|entity| roster.live(entity)).copied();

    if resolved.is_none() {
        if roster.alive_count() == 0 {
            return TargetAcquisition::Air;
        }
        resolved = roster.random_alive(rng).copied();
    }

    if let Some(directional) = directional {
        if directional.input_magnitude() > config.directional_deadzone {
            resolved = directional
                .current_target
                .and_then(|entity| roster.live(entity))
                .copied();
        }
    }

    if resolved.is_none() {
        resolved = roster.random_alive(rng).copied();
    }

    match resolved {
        Some(target) => TargetAcquisition::Engage(target),
        None => TargetAcquisition::Air,
    }
}

/// Approximate sphere cast from `origin` along `direction`.
///
/// Returns the live member hit first (smallest distance along the ray);
/// equal distances keep roster order.
pub fn directional_candidate(
    origin: Vec3,
    direction: Vec3,
    roster: &RosterSnapshot,
    radius: f32,
    range: f32,
) -> Option<Entity> {
    let direction = direction.normalize_or_zero();
    if direction == Vec3::ZERO {
        return None;
    }

    let mut best: Option<(Entity, f32)> = None;

    for member in roster.members().iter().filter(|m| m.is_alive()) {
        let offset = member.position - origin;
        let along = offset.dot(direction);
        if along <= 0.0 || along > range + radius {
            continue;
        }

        let lateral = (offset - direction * along).length();
        if lateral > radius {
            continue;
        }

        match best {
            Some((_, best_along)) if along >= best_along => {}
            _ => best = Some((member.entity, along)),
        }
    }

    best.map(|(entity, _)| entity)
}

/// System: refresh directional targets from stick input.
///
/// Nothing in the cast → keep the previous pick; a dead pick is dropped.
pub fn update_directional_targets(
    mut players: Query<(&Transform, &mut DirectionalTargeting), With<Player>>,
    roster: Res<EnemyRoster>,
    enemies: EnemyViewQuery,
    config: Res<MeleeConfig>,
) {
    let snapshot = RosterSnapshot::capture(&roster, &enemies);

    for (transform, mut targeting) in players.iter_mut() {
        let stale = targeting
            .current_target
            .is_some_and(|current| snapshot.live(current).is_none());
        if stale {
            targeting.current_target = None;
        }

        if targeting.input_magnitude() <= config.directional_deadzone {
            continue;
        }

        if let Some(hit) = directional_candidate(
            transform.translation,
            targeting.input,
            &snapshot,
            config.detection_radius,
            config.detection_range,
        ) {
            targeting.current_target = Some(hit);
        }
    }
}
