use utility_ai::Consideration;

use super::view::AgentView;

/// The eight perception scores an action can be gated on.
///
/// When the player or a world capability is not resolved yet, positive
/// variants (`PlayerOnSight`, `CloseToPlayer`) score `0.0` and their
/// complements score `1.0`.
#[derive(
    Clone, Copy, Debug, PartialEq, Eq, Hash, strum::Display, strum::AsRefStr, strum::EnumIter,
)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum ConsiderationKind {
    PlayerOnSight,
    PlayerNotOnSight,
    NoiseHeard,
    NoNoiseHeard,
    HasEnergy,
    HasNoEnergy,
    CloseToPlayer,
    NotCloseToPlayer,
}

impl ConsiderationKind {
    /// Raw score before framework clamping.
    pub fn raw_score(self, view: &AgentView<'_>) -> f64 {
        let tuning = view.tuning;
        match self {
            Self::PlayerOnSight => match view.can_see_player() {
                Ok(true) => 1.0,
                Ok(false) => tuning.sight_epsilon,
                Err(_) => 0.0,
            },
            Self::PlayerNotOnSight => match view.can_see_player() {
                Ok(true) => tuning.sight_epsilon,
                Ok(false) | Err(_) => 1.0,
            },
            Self::NoiseHeard => {
                let intensity = view.noise_intensity();
                if intensity > tuning.noise_threshold {
                    f64::from(intensity)
                } else {
                    0.0
                }
            }
            Self::NoNoiseHeard => {
                if view.noise_intensity() <= tuning.noise_threshold {
                    1.0
                } else {
                    0.0
                }
            }
            Self::HasEnergy => f64::from(view.energy_ratio()),
            Self::HasNoEnergy => 1.0 - f64::from(view.energy_ratio()),
            Self::CloseToPlayer => match view.normalized_player_distance() {
                Ok(x) => 1.0 - f64::from(x),
                Err(_) => 0.0,
            },
            Self::NotCloseToPlayer => match view.normalized_player_distance() {
                Ok(x) => 1.0 - (tuning.not_close_offset - f64::from(x)),
                Err(_) => 1.0,
            },
        }
    }
}

impl Consideration<AgentView<'_>> for ConsiderationKind {
    fn score(&self, view: &AgentView<'_>) -> f64 {
        self.raw_score(view)
    }

    fn label(&self) -> &str {
        self.as_ref()
    }
}
