use glam::Vec2;

use super::error::SoundError;
use crate::config::SoundPresets;

/// Acoustic parameters of one kind of sound.
#[derive(Clone, Copy, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct SoundProfile {
    /// Distance at which the linear falloff reaches zero.
    pub radius: f32,
    /// Intensity at the source.
    pub intensity: f32,
    /// Exponential decay base, in `(0, 1]`.
    pub decay: f32,
    /// Distance over which one decay step applies.
    pub decay_delay: f32,
}

impl SoundProfile {
    /// Checks that the profile describes a propagatable sound.
    pub fn validate(&self) -> Result<(), SoundError> {
        let reason = if !(self.radius.is_finite() && self.radius > 0.0) {
            "radius must be positive"
        } else if !(self.decay_delay.is_finite() && self.decay_delay > 0.0) {
            "decay delay must be positive"
        } else if !(self.decay > 0.0 && self.decay <= 1.0) {
            "decay must be in (0, 1]"
        } else if !(self.intensity.is_finite() && self.intensity >= 0.0) {
            "intensity must be non-negative"
        } else {
            return Ok(());
        };
        Err(SoundError::InvalidEmitter { reason })
    }
}

/// A sound source active for the current tick.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct SoundEmitter {
    pub position: Vec2,
    pub profile: SoundProfile,
    /// Emitters that are not playing are skipped by propagation.
    pub playing: bool,
}

impl SoundEmitter {
    /// Creates a playing emitter after validating `profile`.
    pub fn new(position: Vec2, profile: SoundProfile) -> Result<Self, SoundError> {
        profile.validate()?;
        Ok(Self {
            position,
            profile,
            playing: true,
        })
    }

    pub fn footstep(position: Vec2, presets: &SoundPresets) -> Result<Self, SoundError> {
        Self::new(position, presets.footstep)
    }

    pub fn gunshot(position: Vec2, presets: &SoundPresets) -> Result<Self, SoundError> {
        Self::new(position, presets.gunshot)
    }

    pub fn muted(mut self) -> Self {
        self.playing = false;
        self
    }
}

/// Intensity of `emitter` heard at `listener`.
///
/// `intensity * (1 - d / radius) * decay^(d / decay_delay)`, clamped at zero.
pub fn sample_intensity(emitter: &SoundEmitter, listener: Vec2) -> f32 {
    let p = &emitter.profile;
    let distance = listener.distance(emitter.position);
    let decay_multiplier = p.decay.powf(distance / p.decay_delay);
    let intensity = p.intensity * (1.0 - distance / p.radius) * decay_multiplier;
    if intensity.is_nan() { 0.0 } else { intensity.max(0.0) }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn profile() -> SoundProfile {
        SoundProfile {
            radius: 10.0,
            intensity: 0.8,
            decay: 0.5,
            decay_delay: 2.0,
        }
    }

    #[test]
    fn source_position_hears_full_intensity() {
        let emitter = SoundEmitter::new(Vec2::new(3.0, 4.0), profile()).unwrap();
        assert_eq!(sample_intensity(&emitter, Vec2::new(3.0, 4.0)), 0.8);
    }

    #[test]
    fn beyond_radius_is_exactly_zero() {
        let emitter = SoundEmitter::new(Vec2::ZERO, profile()).unwrap();
        assert_eq!(sample_intensity(&emitter, Vec2::new(10.0, 0.0)), 0.0);
        assert_eq!(sample_intensity(&emitter, Vec2::new(0.0, 25.0)), 0.0);
    }

    #[test]
    fn applies_linear_falloff_and_decay() {
        let emitter = SoundEmitter::new(Vec2::ZERO, profile()).unwrap();
        // d = 4: 0.8 * 0.6 * 0.5^2
        let heard = sample_intensity(&emitter, Vec2::new(0.0, 4.0));
        assert!((heard - 0.12).abs() < 1e-6);
    }

    #[test]
    fn rejects_invalid_profiles() {
        let bad = [
            SoundProfile { radius: 0.0, ..profile() },
            SoundProfile { decay_delay: -1.0, ..profile() },
            SoundProfile { decay: 0.0, ..profile() },
            SoundProfile { decay: 1.5, ..profile() },
            SoundProfile { intensity: f32::NAN, ..profile() },
        ];
        for p in bad {
            assert!(SoundEmitter::new(Vec2::ZERO, p).is_err(), "{p:?}");
        }
    }

    #[test]
    fn presets_are_valid() {
        let presets = SoundPresets::default();
        assert!(SoundEmitter::footstep(Vec2::ZERO, &presets).is_ok());
        assert!(SoundEmitter::gunshot(Vec2::ZERO, &presets).is_ok());
    }
}
