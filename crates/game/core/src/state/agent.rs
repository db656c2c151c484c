use crate::config::AgentDefaults;
use crate::sound::ReceiverId;
use crate::state::EntityId;

/// Sight parameters of an agent.
#[derive(Clone, Copy, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct SightProfile {
    /// Maximum distance at which the player can be seen.
    pub range: f32,
    /// Full field-of-view cone in degrees.
    pub angle: f32,
}

impl SightProfile {
    pub const fn new(range: f32, angle: f32) -> Self {
        Self { range, angle }
    }

    pub const fn half_angle(&self) -> f32 {
        self.angle * 0.5
    }
}

/// Spawn parameters of an agent.
#[derive(Clone, Copy, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct AgentTemplate {
    pub max_energy: f32,
    pub energy: f32,
    pub health: f32,
    pub sight: SightProfile,
}

impl From<&AgentDefaults> for AgentTemplate {
    fn from(defaults: &AgentDefaults) -> Self {
        Self {
            max_energy: defaults.max_energy,
            energy: defaults.max_energy,
            health: defaults.health,
            sight: SightProfile::new(defaults.sight_range, defaults.sight_angle),
        }
    }
}

impl Default for AgentTemplate {
    fn default() -> Self {
        Self::from(&AgentDefaults::default())
    }
}

/// Vitals and perception of a non-player character.
///
/// Energy stays within `[0, max_energy]` and health within `[0, MAX_HEALTH]`;
/// every mutation goes through the clamping methods below.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct AgentState {
    pub id: EntityId,
    energy: f32,
    max_energy: f32,
    health: f32,
    pub sight: SightProfile,
    /// Handle of this agent's hearing in the session's sound system.
    pub receiver: ReceiverId,
}

impl AgentState {
    pub fn new(id: EntityId, template: &AgentTemplate, receiver: ReceiverId) -> Self {
        let max_energy = template.max_energy.max(0.0);
        Self {
            id,
            energy: template.energy.clamp(0.0, max_energy),
            max_energy,
            health: template.health.clamp(0.0, AgentDefaults::MAX_HEALTH),
            sight: template.sight,
            receiver,
        }
    }

    pub fn energy(&self) -> f32 {
        self.energy
    }

    pub fn max_energy(&self) -> f32 {
        self.max_energy
    }

    pub fn health(&self) -> f32 {
        self.health
    }

    /// Energy as a fraction of the maximum; `0.0` when the maximum is zero.
    pub fn energy_ratio(&self) -> f32 {
        if self.max_energy <= 0.0 {
            0.0
        } else {
            self.energy / self.max_energy
        }
    }

    /// Adds `delta` (which may be negative) and clamps to `[0, max_energy]`.
    pub fn apply_energy(&mut self, delta: f32) {
        self.energy = (self.energy + delta).clamp(0.0, self.max_energy);
    }

    /// Subtracts `amount` from health, never dropping below zero.
    pub fn take_damage(&mut self, amount: f32) {
        self.health = (self.health - amount.max(0.0)).clamp(0.0, AgentDefaults::MAX_HEALTH);
    }

    pub fn is_dead(&self) -> bool {
        self.health <= 0.0
    }
}
