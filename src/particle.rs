use crate::error::{Error, Result};

/// Spatial dimension of the box.
pub const DIM: usize = 2;

/// A point particle.
///
/// Position is not constrained to the container: a particle may sit outside
/// the walls for a few steps until its reversed velocity brings it back.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Particle {
    /// Position (x, y).
    pub r: [f64; DIM],
    /// Velocity (vx, vy).
    pub v: [f64; DIM],
    /// Mass (> 0).
    pub mass: f64,
}

impl Particle {
    /// Unit-mass particle.
    pub fn new(r: [f64; DIM], v: [f64; DIM]) -> Self {
        Self { r, v, mass: 1.0 }
    }

    /// Particle with an explicit mass.
    ///
    /// Errors:
    /// - `Error::Config` if `mass` is non-positive or not finite.
    pub fn with_mass(r: [f64; DIM], v: [f64; DIM], mass: f64) -> Result<Self> {
        if !mass.is_finite() || mass <= 0.0 {
            return Err(Error::Config("mass must be finite and > 0".into()));
        }
        Ok(Self { r, v, mass })
    }

    /// 1/2 m |v|^2.
    #[inline]
    pub fn kinetic_energy(&self) -> f64 {
        0.5 * self.mass * self.speed_squared()
    }

    #[inline]
    pub fn speed_squared(&self) -> f64 {
        self.v[0] * self.v[0] + self.v[1] * self.v[1]
    }

    #[inline]
    pub fn speed(&self) -> f64 {
        self.v[0].hypot(self.v[1])
    }
}

// ===================================================================================
// Particle System
// ===================================================================================

/// The particles plus the container they bounce around in.
///
/// The container spans `[0, width] x [0, height]`.
#[derive(Debug, Clone, PartialEq)]
pub struct ParticleSystem {
    pub particles: Vec<Particle>,
    width: f64,
    height: f64,
}

impl ParticleSystem {
    /// Errors:
    /// - `Error::Config` if either container edge is non-positive or not finite.
    pub fn new(particles: Vec<Particle>, width: f64, height: f64) -> Result<Self> {
        if !(width.is_finite() && width > 0.0 && height.is_finite() && height > 0.0) {
            return Err(Error::Config(
                "container width and height must be finite and > 0".into(),
            ));
        }
        Ok(Self {
            particles,
            width,
            height,
        })
    }

    #[inline]
    pub fn width(&self) -> f64 {
        self.width
    }

    #[inline]
    pub fn height(&self) -> f64 {
        self.height
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.particles.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.particles.is_empty()
    }

    /// Sum of m v over all particles.
    pub fn total_momentum(&self) -> [f64; DIM] {
        self.particles.iter().fold([0.0; DIM], |acc, p| {
            [acc[0] + p.mass * p.v[0], acc[1] + p.mass * p.v[1]]
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_mass_is_one() {
        let p = Particle::new([1.0, 2.0], [3.0, 4.0]);
        assert_eq!(p.mass, 1.0);
    }

    #[test]
    fn kinetic_energy_computed() -> Result<()> {
        // |v|^2 = 25; KE = 0.5 * 2 * 25
        let p = Particle::with_mass([0.0, 0.0], [3.0, 4.0], 2.0)?;
        assert!((p.kinetic_energy() - 25.0).abs() < 1e-12);
        assert!((p.speed() - 5.0).abs() < 1e-12);
        Ok(())
    }

    #[test]
    fn invalid_mass_rejected() {
        let err = Particle::with_mass([0.0, 0.0], [0.0, 0.0], 0.0).unwrap_err();
        assert!(err.to_string().contains("mass"));
    }

    #[test]
    fn invalid_container_rejected() {
        assert!(ParticleSystem::new(vec![], 0.0, 10.0).is_err());
        assert!(ParticleSystem::new(vec![], 10.0, f64::INFINITY).is_err());
    }

    #[test]
    fn total_momentum_sums_particles() -> Result<()> {
        let system = ParticleSystem::new(
            vec![
                Particle::new([0.0, 0.0], [1.0, -2.0]),
                Particle::with_mass([1.0, 1.0], [0.5, 1.0], 2.0)?,
            ],
            10.0,
            10.0,
        )?;
        assert_eq!(system.total_momentum(), [2.0, 0.0]);
        Ok(())
    }
}
