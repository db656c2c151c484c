use glam::Vec2;

use crate::config::AiTuning;
use crate::env::{Capability, CapabilityError, EntityTag, GameEnv, LayerMask};
use crate::sound::SoundReceiver;
use crate::state::{AgentState, EntityId, Pose};

/// Everything one agent can perceive during a decision.
#[derive(Clone, Copy)]
pub struct AgentView<'a> {
    pub agent: &'a AgentState,
    pub pose: Pose,
    pub hearing: SoundReceiver,
    pub env: GameEnv<'a>,
    pub tuning: &'a AiTuning,
}

impl<'a> AgentView<'a> {
    pub fn new(
        agent: &'a AgentState,
        pose: Pose,
        hearing: SoundReceiver,
        env: GameEnv<'a>,
        tuning: &'a AiTuning,
    ) -> Self {
        Self {
            agent,
            pose,
            hearing,
            env,
            tuning,
        }
    }

    /// Id and pose of the player entity.
    pub fn player(&self) -> Result<(EntityId, Pose), CapabilityError> {
        let entities = self.env.entities()?;
        let player = entities
            .find_by_tag(EntityTag::Player)
            .ok_or(CapabilityError::MissingCapability(Capability::PlayerEntity))?;
        let pose = entities
            .pose(player)
            .ok_or(CapabilityError::MissingCapability(Capability::EntityPose))?;
        Ok((player, pose))
    }

    pub fn distance_to_player(&self) -> Result<f32, CapabilityError> {
        let (_, player) = self.player()?;
        Ok(self.pose.position.distance(player.position))
    }

    /// Distance to the player divided by the sight range.
    pub fn normalized_player_distance(&self) -> Result<f32, CapabilityError> {
        let range = self.agent.sight.range.max(f32::EPSILON);
        Ok(self.distance_to_player()? / range)
    }

    /// Returns true if the player is within range, inside the sight cone and
    /// the first thing a ray toward it strikes.
    pub fn can_see_player(&self) -> Result<bool, CapabilityError> {
        let (player, player_pose) = self.player()?;
        let spatial = self.env.spatial()?;

        let to_player = player_pose.position - self.pose.position;
        let distance = to_player.length();
        if distance > self.agent.sight.range {
            return Ok(false);
        }
        let Some(direction) = to_player.try_normalize() else {
            // Overlapping bodies
            return Ok(true);
        };
        if angle_between_degrees(self.pose.heading(), direction) >= self.agent.sight.half_angle() {
            return Ok(false);
        }

        let hit = spatial.raycast(
            self.pose.position,
            direction,
            self.agent.sight.range,
            LayerMask::all(),
            Some(self.agent.id),
        );
        Ok(hit.is_some_and(|hit| hit.entity == Some(player)))
    }

    pub fn noise_intensity(&self) -> f32 {
        self.hearing.intensity
    }

    pub fn energy_ratio(&self) -> f32 {
        self.agent.energy_ratio()
    }
}

fn angle_between_degrees(a: Vec2, b: Vec2) -> f32 {
    a.dot(b).clamp(-1.0, 1.0).acos().to_degrees()
}
