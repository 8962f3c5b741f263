use crate::error::{Error, Result};

// ===================================================================================
// Default Constants
// ===================================================================================

pub const DEFAULT_PARTICLE_COUNT: usize = 100;
pub const DEFAULT_TEMPERATURE: f64 = 1000.0;
pub const DEFAULT_CONTAINER_WIDTH: f64 = 800.0;
pub const DEFAULT_CONTAINER_HEIGHT: f64 = 600.0;
pub const DEFAULT_DT: f64 = 0.1;
pub const DEFAULT_COLLISION_RADIUS: f64 = 10.0;
pub const DEFAULT_STEPS: usize = 100;

// ===================================================================================
// Simulation Configuration
// ===================================================================================

/// Everything needed to build and run a gas box.
///
/// `temperature` is used directly as the variance of each velocity component
/// (Boltzmann's constant and the particle mass are both taken as 1).
#[derive(Debug, Clone, PartialEq)]
pub struct SimulationConfig {
    pub particle_count: usize,
    pub temperature: f64,
    pub container_width: f64,
    pub container_height: f64,
    pub dt: f64,
    pub collision_radius: f64,
    pub steps: usize,
    /// `None` draws a fresh seed from the OS.
    pub random_seed: Option<u64>,
    /// Also snap a particle back onto the wall it crossed. Off by default: only the
    /// velocity component is reversed and the particle may overshoot the wall.
    pub clamp_to_walls: bool,
}

impl Default for SimulationConfig {
    fn default() -> Self {
        SimulationConfig {
            particle_count: DEFAULT_PARTICLE_COUNT,
            temperature: DEFAULT_TEMPERATURE,
            container_width: DEFAULT_CONTAINER_WIDTH,
            container_height: DEFAULT_CONTAINER_HEIGHT,
            dt: DEFAULT_DT,
            collision_radius: DEFAULT_COLLISION_RADIUS,
            steps: DEFAULT_STEPS,
            random_seed: None,
            clamp_to_walls: false,
        }
    }
}

impl SimulationConfig {
    /// Same configuration with a fixed RNG seed.
    pub fn with_seed(mut self, seed: u64) -> Self {
        self.random_seed = Some(seed);
        self
    }

    /// Checks every field.
    ///
    /// Errors:
    /// - `Error::Config` naming the first offending field.
    pub fn validate(&self) -> Result<()> {
        if self.particle_count == 0 {
            return Err(Error::Config("particle_count must be > 0".into()));
        }
        if !self.temperature.is_finite() || self.temperature < 0.0 {
            return Err(Error::Config(
                "temperature must be finite and >= 0".into(),
            ));
        }
        positive("container_width", self.container_width)?;
        positive("container_height", self.container_height)?;
        positive("dt", self.dt)?;
        positive("collision_radius", self.collision_radius)?;
        Ok(())
    }
}

fn positive(name: &str, value: f64) -> Result<()> {
    if value.is_finite() && value > 0.0 {
        Ok(())
    } else {
        Err(Error::Config(format!("{name} must be finite and > 0, got {value}")))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_are_valid() -> Result<()> {
        let cfg = SimulationConfig::default();
        cfg.validate()?;
        assert_eq!(cfg.collision_radius, 10.0);
        assert_eq!(cfg.random_seed, None);
        assert!(!cfg.clamp_to_walls);
        Ok(())
    }

    #[test]
    fn zero_particles_rejected() {
        let cfg = SimulationConfig {
            particle_count: 0,
            ..Default::default()
        };
        let msg = cfg.validate().unwrap_err().to_string();
        assert!(msg.contains("particle_count"));
    }

    #[test]
    fn negative_temperature_rejected() {
        let cfg = SimulationConfig {
            temperature: -1.0,
            ..Default::default()
        };
        let msg = cfg.validate().unwrap_err().to_string();
        assert!(msg.contains("temperature"));
    }

    #[test]
    fn zero_temperature_allowed() -> Result<()> {
        let cfg = SimulationConfig {
            temperature: 0.0,
            ..Default::default()
        };
        cfg.validate()
    }

    #[test]
    fn non_positive_geometry_rejected() {
        for cfg in [
            SimulationConfig { dt: 0.0, ..Default::default() },
            SimulationConfig { container_width: -5.0, ..Default::default() },
            SimulationConfig { container_height: f64::NAN, ..Default::default() },
            SimulationConfig { collision_radius: 0.0, ..Default::default() },
        ] {
            assert!(matches!(cfg.validate(), Err(Error::Config(_))));
        }
    }

    #[test]
    fn with_seed_sets_seed() {
        let cfg = SimulationConfig::default().with_seed(7);
        assert_eq!(cfg.random_seed, Some(7));
    }
}
