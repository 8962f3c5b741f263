use crate::config::SimulationConfig;
use crate::error::{Error, Result};
use crate::particle::{Particle, ParticleSystem};
use rand::{Rng, SeedableRng, rngs::StdRng};
use rand_distr::{Distribution, Normal};

/// Build the RNG for a configuration: seeded when `random_seed` is set,
/// otherwise seeded from the OS.
pub fn rng_for(config: &SimulationConfig) -> StdRng {
    match config.random_seed {
        Some(seed) => StdRng::seed_from_u64(seed),
        None => StdRng::from_os_rng(),
    }
}

/// Scatter `particle_count` unit-mass particles uniformly over the container and draw
/// each velocity component from Normal(0, sqrt(temperature)).
///
/// Draw order per particle is x, y, vx, vy, so a fixed seed reproduces the ensemble.
///
/// Errors:
/// - `Error::Config` if the configuration fails validation.
pub fn initialize<R: Rng + ?Sized>(config: &SimulationConfig, rng: &mut R) -> Result<ParticleSystem> {
    config.validate()?;

    let sigma = config.temperature.sqrt();
    let velocity = Normal::new(0.0, sigma)
        .map_err(|e| Error::Config(format!("velocity distribution: {e}")))?;

    let (w, h) = (config.container_width, config.container_height);
    let mut particles = Vec::with_capacity(config.particle_count);
    for _ in 0..config.particle_count {
        let x = rng.random_range(0.0..=w);
        let y = rng.random_range(0.0..=h);
        let vx = velocity.sample(&mut *rng);
        let vy = velocity.sample(&mut *rng);
        particles.push(Particle::new([x, y], [vx, vy]));
    }

    log::info!(
        "initialized {} particles in {}x{} box at temperature {}",
        particles.len(),
        w,
        h,
        config.temperature
    );
    ParticleSystem::new(particles, w, h)
}
