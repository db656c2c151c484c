//! Game configuration constants and tunable parameters.
//!
//! Every section implements [`Default`] and is `#[serde(default)]`, so a
//! configuration file only needs to list the values it overrides.

use std::time::Duration;

use crate::sound::SoundProfile;

/// Root configuration shared by the core and the runtime.
#[derive(Clone, Debug, Default, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct GameConfig {
    pub ai: AiTuning,
    pub agent: AgentDefaults,
    pub actions: ActionTuning,
    pub sound: SoundPresets,
}

/// Constants read by the considerations.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct AiTuning {
    /// Receiver intensity above which a noise counts as heard.
    pub noise_threshold: f32,
    /// Score returned by sight considerations instead of a hard zero.
    pub sight_epsilon: f64,
    /// Offset in the not-close formula `1 - (offset - distance / sight_range)`.
    pub not_close_offset: f64,
}

impl AiTuning {
    pub const DEFAULT_NOISE_THRESHOLD: f32 = 0.2;
    pub const DEFAULT_SIGHT_EPSILON: f64 = 0.01;
    pub const DEFAULT_NOT_CLOSE_OFFSET: f64 = 1.3;
}

impl Default for AiTuning {
    fn default() -> Self {
        Self {
            noise_threshold: Self::DEFAULT_NOISE_THRESHOLD,
            sight_epsilon: Self::DEFAULT_SIGHT_EPSILON,
            not_close_offset: Self::DEFAULT_NOT_CLOSE_OFFSET,
        }
    }
}

/// Vitals and perception given to agents spawned without an explicit template.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct AgentDefaults {
    pub max_energy: f32,
    pub health: f32,
    pub sight_range: f32,
    /// Full field-of-view cone in degrees.
    pub sight_angle: f32,
}

impl AgentDefaults {
    pub const MAX_HEALTH: f32 = 100.0;
}

impl Default for AgentDefaults {
    fn default() -> Self {
        Self {
            max_energy: 100.0,
            health: Self::MAX_HEALTH,
            sight_range: 10.0,
            sight_angle: 90.0,
        }
    }
}

/// Timing and cost parameters of the executing actions.
///
/// Durations are stored as seconds so they read naturally in TOML.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct ActionTuning {
    /// Interval between completion checks of movement actions.
    pub check_interval_secs: f32,
    /// Interval between destination refreshes while following the player.
    pub follow_refresh_secs: f32,
    /// Remaining path distance under which a destination counts as reached.
    pub arrive_distance: f32,
    /// Maximum distance of a wander destination from the agent.
    pub wander_radius: f32,
    /// Upper bound on a single wander or investigation leg.
    pub max_travel_secs: f32,
    pub follow_duration_secs: f32,
    pub attack_damage: f32,
    pub attack_cooldown_secs: f32,
    pub rest_duration_secs: f32,
    /// Energy recovered per second of rest.
    pub rest_rate: f32,
    /// Energy spent per second of wandering.
    pub wander_energy_cost: f32,
    /// Energy spent per second of following or investigating.
    pub chase_energy_cost: f32,
    /// Energy spent per strike.
    pub attack_energy_cost: f32,
}

impl ActionTuning {
    pub fn check_interval(&self) -> Duration {
        secs(self.check_interval_secs)
    }

    pub fn follow_refresh(&self) -> Duration {
        secs(self.follow_refresh_secs)
    }

    pub fn max_travel(&self) -> Duration {
        secs(self.max_travel_secs)
    }

    pub fn follow_duration(&self) -> Duration {
        secs(self.follow_duration_secs)
    }

    pub fn attack_cooldown(&self) -> Duration {
        secs(self.attack_cooldown_secs)
    }

    pub fn rest_duration(&self) -> Duration {
        secs(self.rest_duration_secs)
    }
}

impl Default for ActionTuning {
    fn default() -> Self {
        Self {
            check_interval_secs: 0.5,
            follow_refresh_secs: 0.1,
            arrive_distance: 0.5,
            wander_radius: 6.0,
            max_travel_secs: 20.0,
            follow_duration_secs: 3.0,
            attack_damage: 10.0,
            attack_cooldown_secs: 1.0,
            rest_duration_secs: 4.0,
            rest_rate: 10.0,
            wander_energy_cost: 1.0,
            chase_energy_cost: 2.0,
            attack_energy_cost: 5.0,
        }
    }
}

/// Named emitter presets.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct SoundPresets {
    pub footstep: SoundProfile,
    pub gunshot: SoundProfile,
}

impl Default for SoundPresets {
    fn default() -> Self {
        Self {
            footstep: SoundProfile {
                radius: 8.0,
                intensity: 0.6,
                decay: 0.9,
                decay_delay: 1.0,
            },
            gunshot: SoundProfile {
                radius: 25.0,
                intensity: 1.0,
                decay: 0.95,
                decay_delay: 2.0,
            },
        }
    }
}

/// Negative or non-finite seconds collapse to zero.
fn secs(value: f32) -> Duration {
    Duration::try_from_secs_f32(value).unwrap_or(Duration::ZERO)
}
