//! Enemy roster — ordered set of hostiles the player can engage.
//!
//! Архитектура:
//! - `EnemyRoster` (resource) хранит Entity в порядке spawn'а
//! - Порядок важен: tie-break при выборе ближайшей цели для контратаки
//! - Melee core роster не мутирует, только читает через `RosterSnapshot`
//!
//! `RosterSnapshot` — per-tick копия позиций/здоровья. Locked target хранится
//! как `Entity` (non-owning) и ревалидируется через `RosterSnapshot::live`
//! при каждом использовании.

use bevy::prelude::*;
use rand::seq::SliceRandom;
use rand::Rng;

use crate::components::{Enemy, Health};

/// All hostiles in spawn order (alive and dead until despawned).
#[derive(Resource, Debug, Clone, Default)]
pub struct EnemyRoster {
    pub members: Vec<Entity>,
}

/// Query shape used to snapshot roster members.
pub type EnemyViewQuery<'w, 's> =
    Query<'w, 's, (&'static Transform, &'static Health, &'static Enemy)>;

/// Read-only view of one roster member for the current tick.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TargetView {
    pub entity: Entity,
    pub position: Vec3,
    /// World-space forward (-Z local)
    pub forward: Vec3,
    pub health: u32,
    pub preparing_attack: bool,
}

impl TargetView {
    pub fn is_alive(&self) -> bool {
        self.health > 0
    }
}

/// Roster members resolved to positions/health, in roster order.
#[derive(Debug, Clone, Default)]
pub struct RosterSnapshot {
    members: Vec<TargetView>,
}

impl RosterSnapshot {
    /// Build from explicit views (tests, replays).
    pub fn from_views(members: Vec<TargetView>) -> Self {
        Self { members }
    }

    /// Resolve roster entities through the enemy query.
    ///
    /// Entities without the enemy components (despawned this tick) are skipped.
    pub fn capture(roster: &EnemyRoster, enemies: &EnemyViewQuery) -> Self {
        let members = roster
            .members
            .iter()
            .filter_map(|&entity| {
                let Ok((transform, health, enemy)) = enemies.get(entity) else {
                    return None;
                };
                Some(TargetView {
                    entity,
                    position: transform.translation,
                    forward: transform.forward().as_vec3(),
                    health: health.current,
                    preparing_attack: enemy.preparing_attack,
                })
            })
            .collect();

        Self { members }
    }

    /// Every member in roster order (dead ones included).
    pub fn members(&self) -> &[TargetView] {
        &self.members
    }

    pub fn alive_count(&self) -> usize {
        self.members.iter().filter(|m| m.is_alive()).count()
    }

    /// Revalidate a non-owning reference: `Some` only for a live member.
    pub fn live(&self, entity: Entity) -> Option<&TargetView> {
        self.members
            .iter()
            .find(|m| m.entity == entity && m.is_alive())
    }

    /// Uniformly random live member.
    pub fn random_alive<R: Rng + ?Sized>(&self, rng: &mut R) -> Option<&TargetView> {
        let alive: Vec<&TargetView> = self.members.iter().filter(|m| m.is_alive()).collect();
        alive.choose(rng).copied()
    }

    /// Any live member telegraphing an attack (counter window open).
    pub fn any_preparing_attack(&self) -> bool {
        self.members
            .iter()
            .any(|m| m.is_alive() && m.preparing_attack)
    }

    /// Closest live member preparing an attack.
    ///
    /// Linear scan in roster order, strict `<` comparison: equal distances
    /// keep the first encountered. `None` when nobody is preparing.
    pub fn closest_counter_enemy(&self, origin: Vec3) -> Option<&TargetView> {
        let mut best: Option<(&TargetView, f32)> = None;

        for member in self.members.iter().filter(|m| m.is_alive() && m.preparing_attack) {
            let distance = origin.distance(member.position);
            match best {
                Some((_, best_distance)) if distance >= best_distance => {}
                _ => best = Some((member, distance)),
            }
        }

        best.map(|(member, _)| member)
    }
}

/// System: append newly spawned enemies (spawn order preserved).
pub fn register_spawned_enemies(
    spawned: Query<Entity, Added<Enemy>>,
    mut roster: ResMut<EnemyRoster>,
) {
    for entity in spawned.iter() {
        if !roster.members.contains(&entity) {
            roster.members.push(entity);
            crate::log(&format!("👹 Roster: enemy {:?} registered", entity));
        }
    }
}

/// System: drop despawned enemies (dead-but-present ones stay, liveness is
/// checked by consumers).
pub fn prune_roster(existing: Query<(), With<Enemy>>, mut roster: ResMut<EnemyRoster>) {
    let before = roster.members.len();
    roster.members.retain(|&entity| existing.contains(entity));

    if roster.members.len() != before {
        crate::log(&format!(
            "🧹 Roster: pruned {} despawned enemies",
            before - roster.members.len()
        ));
    }
}
