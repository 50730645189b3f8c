//! Brawl Simulation Core
//!
//! ECS-симуляция melee боя игрока на Bevy 0.16 (strategic layer)
//!
//! HYBRID ARCHITECTURE:
//! - ECS = strategic layer (target lock, combo/counter state machines, timers)
//! - Engine = tactical layer (animation playback, rendering, enemy AI, input polling)
//!
//! Взаимодействие только через components (Animator, Enemy, DirectionalTargeting)
//! и events (intents, animation callbacks, notifications).

use std::time::Duration;

use bevy::prelude::*;
use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;

// Публичные модули
pub mod combat;
pub mod components;
pub mod config;
pub mod logger;
pub mod movement;
pub mod roster;

// Re-export базовых типов для удобства
pub use combat::{
    AttackIntent, ComboWindowReached, CounterIntent, CounterTriggered, DamageReceived,
    HitKeyframe, HitLanded, MeleeCombatPlugin, MeleeCombatant, StunRecovered, TrajectoryStarted,
};
pub use components::*;
pub use config::{MeleeConfig, MAX_PUNCH_COUNT};
pub use logger::{init_logger, log, log_error, log_info, log_warning};
pub use roster::{EnemyRoster, RosterSnapshot, TargetView};

/// Simulation tick rate (FixedUpdate)
pub const SIMULATION_HZ: f64 = 60.0;

/// Главный plugin симуляции (объединяет все подсистемы)
pub struct SimulationPlugin;

impl Plugin for SimulationPlugin {
    fn build(&self, app: &mut App) {
        app
            // Fixed timestep 60Hz для simulation tick
            .insert_resource(Time::<Fixed>::from_hz(SIMULATION_HZ))
            .init_resource::<MeleeConfig>()
            .add_plugins(MeleeCombatPlugin);

        if !app.world().contains_resource::<DeterministicRng>() {
            app.insert_resource(DeterministicRng::new(42));
        }
    }
}

/// Детерминистичный RNG resource (seeded)
#[derive(Resource)]
pub struct DeterministicRng {
    pub rng: ChaCha8Rng,
    pub seed: u64,
}

impl DeterministicRng {
    pub fn new(seed: u64) -> Self {
        Self {
            rng: ChaCha8Rng::seed_from_u64(seed),
            seed,
        }
    }
}

/// Создаёт minimal Bevy App для headless симуляции
pub fn create_headless_app(seed: u64) -> App {
    let mut app = App::new();
    init_logger();
    app.add_plugins(MinimalPlugins)
        .insert_resource(DeterministicRng::new(seed))
        .insert_resource(Time::<Fixed>::from_hz(SIMULATION_HZ)); // 60Hz FixedUpdate

    app
}

/// Run exactly one FixedUpdate step of `delta` seconds.
///
/// Headless drivers (demo binary, integration tests) step the simulation
/// manually instead of depending on wall-clock time.
pub fn advance_fixed_tick(app: &mut App, delta: f32) {
    app.world_mut()
        .resource_mut::<Time<Fixed>>()
        .advance_by(Duration::from_secs_f32(delta));
    app.world_mut().run_schedule(FixedUpdate);
}
