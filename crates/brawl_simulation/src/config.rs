//! Melee tuning table (resource).
//!
//! Все длительности в секундах, расстояния в метрах.
//! Defaults совпадают с тем, как бой тюнился в движке; override через RON:
//!
//! ```ron
//! (engage_range: 12.0, counter_range: 2.5)
//! ```

use bevy::prelude::*;
use serde::{Deserialize, Serialize};

/// Max punches in one light combo (stage 3 is terminal).
pub const MAX_PUNCH_COUNT: u8 = 3;

/// Tuning constants shared by targeting, combo, counter and hit-reaction logic.
#[derive(Resource, Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct MeleeConfig {
    /// Targets at or beyond this distance are "too far": lock cleared, air strike
    pub engage_range: f32,
    /// Stick magnitude above which directional targeting overrides the lock
    pub directional_deadzone: f32,
    /// Directional detection: sphere-cast radius
    pub detection_radius: f32,
    /// Directional detection: sphere-cast length
    pub detection_range: f32,
    /// Internal cooldown of a strike at nothing
    pub air_strike_cooldown: f32,
    /// Approach (move-toward-target) duration
    pub approach_duration: f32,
    /// Look-at rotation duration (approach and dodge)
    pub look_at_duration: f32,
    /// Approach stops this far short of the target centre
    pub stop_short_distance: f32,
    /// Acceleration ramp 0 → 1 after combo end / hit-stun
    pub acceleration_ramp_duration: f32,
    /// Locomotion lock after taking damage
    pub hit_stun_duration: f32,
    /// Beyond this distance a counter degrades into a regular attack
    pub counter_range: f32,
    /// Counter dodge duration (also the counter delay)
    pub dodge_duration: f32,
    /// Dodge displacement along the enemy's forward
    pub dodge_distance: f32,
}

impl Default for MeleeConfig {
    fn default() -> Self {
        Self {
            engage_range: 15.0,
            directional_deadzone: 0.2,
            detection_radius: 3.0,
            detection_range: 10.0,
            air_strike_cooldown: 0.2,
            approach_duration: 0.5,
            look_at_duration: 0.2,
            stop_short_distance: 0.95,
            acceleration_ramp_duration: 0.6,
            hit_stun_duration: 0.5,
            counter_range: 2.0,
            dodge_duration: 0.2,
            dodge_distance: 1.0,
        }
    }
}

impl MeleeConfig {
    /// Parse a (possibly partial) RON override; missing fields keep defaults.
    pub fn from_ron(source: &str) -> Result<Self, ron::error::SpannedError> {
        ron::from_str(source)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_config_defaults() {
        let config = MeleeConfig::default();
        assert_eq!(config.engage_range, 15.0);
        assert_eq!(config.directional_deadzone, 0.2);
        assert_eq!(config.counter_range, 2.0);
        assert_eq!(config.hit_stun_duration, 0.5);
        assert_eq!(config.acceleration_ramp_duration, 0.6);
    }

    #[test]
    fn test_config_partial_ron_override() {
        let config = MeleeConfig::from_ron("(engage_range: 12.0, counter_range: 2.5)")
            .expect("valid RON");
        assert_eq!(config.engage_range, 12.0);
        assert_eq!(config.counter_range, 2.5);
        // Не указанные поля → defaults
        assert_eq!(config.dodge_duration, 0.2);
    }

    #[test]
    fn test_config_invalid_ron() {
        assert!(MeleeConfig::from_ron("(engage_range: \"far\")").is_err());
    }
}
