//! Headless симуляция melee боя
//!
//! Скриптованная стычка без рендера: игрок против трёх врагов.
//! Animation layer замокан: клип берётся из `Animator::combo_stage`,
//! hit keyframe и combo window шлём по таймеру от начала клипа.

use bevy::prelude::*;
use brawl_simulation::{
    advance_fixed_tick, create_headless_app, log_info, Animator, AttackIntent, ComboWindowReached,
    CounterIntent, DamageReceived, Enemy, Health, HitKeyframe, HitLanded, MeleeCombatant,
    Player, PunchAnimation, SimulationPlugin, SIMULATION_HZ,
};

const TICKS: usize = 600;

/// Длина клипа удара в тиках: keyframe на середине, combo window в конце
const CLIP_TICKS: usize = 24;

/// Mock animation layer: проигрывает клип текущей combo stage
#[derive(Default)]
struct MockAnimationLayer {
    stage: u8,
    clip_started: usize,
}

impl MockAnimationLayer {
    fn update(&mut self, app: &mut App, player: Entity, tick: usize) {
        let stage = app
            .world()
            .get::<Animator>(player)
            .map(|a| a.combo_stage)
            .unwrap_or_default();

        // Новая stage → клип начинается заново
        if stage != self.stage {
            self.stage = stage;
            self.clip_started = tick;
        }
        if let Some(mut animator) = app.world_mut().get_mut::<Animator>(player) {
            animator.current_state = PunchAnimation::for_stage(stage);
        }
        if stage == 0 {
            return;
        }

        let elapsed = tick - self.clip_started;
        if elapsed == CLIP_TICKS / 2 {
            app.world_mut().send_event(HitKeyframe { combatant: player });
        }
        if elapsed == CLIP_TICKS {
            app.world_mut()
                .send_event(ComboWindowReached { combatant: player });
        }
    }
}

fn main() {
    let seed = 42;
    println!("Starting brawl headless simulation (seed: {})", seed);

    let mut app = create_headless_app(seed);
    app.add_plugins(SimulationPlugin);
    app.update();

    let player = app
        .world_mut()
        .spawn((Player, MeleeCombatant::default(), Transform::default()))
        .id();
    let enemies: Vec<Entity> = [
        Vec3::new(4.0, 0.0, 0.0),
        Vec3::new(-3.0, 0.0, -2.0),
        Vec3::new(0.0, 0.0, -1.5),
    ]
    .into_iter()
    .map(|position| {
        app.world_mut()
            .spawn((
                Enemy::default(),
                Health::new(2),
                Transform::from_translation(position),
            ))
            .id()
    })
    .collect();

    let delta = (1.0 / SIMULATION_HZ) as f32;
    let mut animation = MockAnimationLayer::default();

    for tick in 0..TICKS {
        match tick {
            // Полное комбо: 2-е и 3-е нажатия до combo window первого клипа
            10 | 22 | 34 | 120 | 240 | 252 => {
                app.world_mut().send_event(AttackIntent { combatant: player });
            }
            300 => {
                // Ближний враг замахивается → окно контратаки
                if let Some(mut enemy) = app.world_mut().get_mut::<Enemy>(enemies[2]) {
                    enemy.preparing_attack = true;
                }
                app.world_mut().send_event(CounterIntent { combatant: player });
            }
            420 | 426 => {
                app.world_mut()
                    .send_event(DamageReceived { combatant: player });
            }
            _ => {}
        }

        animation.update(&mut app, player, tick);
        advance_fixed_tick(&mut app, delta);

        // Урон по цели считает не melee core — демо просто снимает 1 HP за удар
        let hits: Vec<HitLanded> = app
            .world()
            .resource::<Events<HitLanded>>()
            .iter_current_update_events()
            .cloned()
            .collect();
        app.world_mut().resource_mut::<Events<HitLanded>>().clear();
        for hit in hits {
            if let Some(mut health) = app.world_mut().get_mut::<Health>(hit.target) {
                health.take_damage(1);
            }
            log_info(&format!(
                "💥 Tick {}: hit {:?} (last hit: {})",
                tick, hit.target, hit.last_hit
            ));
        }

        if tick % 100 == 0 {
            if let Some(combatant) = app.world().get::<MeleeCombatant>(player) {
                println!(
                    "Tick {}: punches {}, attacking {}, countering {}, lock {:?}",
                    tick,
                    combatant.punch_count,
                    combatant.is_attacking_enemy,
                    combatant.is_countering,
                    combatant.locked_target
                );
            }
        }
    }

    let alive = enemies
        .iter()
        .filter(|&&e| app.world().get::<Health>(e).is_some_and(|h| h.is_alive()))
        .count();
    println!("Simulation complete! Enemies alive: {}", alive);
}
