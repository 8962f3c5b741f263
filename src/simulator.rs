use crate::config::SimulationConfig;
use crate::error::{Error, Result};
use crate::init::{initialize, rng_for};
use crate::particle::ParticleSystem;
use crate::physics::{CollisionStats, advance};

/// Receives the particle state after every completed step.
///
/// Observers get a shared borrow and cannot mutate the simulation; anything they
/// want to keep past the call has to be copied out.
pub trait StepObserver {
    fn on_step(&mut self, step: usize, system: &ParticleSystem);
}

impl<F: FnMut(usize, &ParticleSystem)> StepObserver for F {
    fn on_step(&mut self, step: usize, system: &ParticleSystem) {
        self(step, system)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SimState {
    /// At least one step remains.
    Running,
    /// Every configured step has run. Terminal until `reset()`.
    Finished,
}

/// Owns the particle system and drives it for a fixed number of steps.
///
/// One step is free flight, wall reflection, then collisions, in that order.
/// Stepping a finished simulator returns `Error::Finished` and changes nothing.
pub struct Simulator {
    config: SimulationConfig,
    seed: Option<u64>,
    initial: ParticleSystem,
    system: ParticleSystem,
    completed: usize,
    last_stats: CollisionStats,
    observers: Vec<Box<dyn StepObserver>>,
}

impl Simulator {
    /// Validate `config` and build the initial ensemble.
    ///
    /// A config without a seed gets one drawn here; `seed()` reports it.
    pub fn new(config: SimulationConfig) -> Result<Self> {
        let seed = match config.random_seed {
            Some(seed) => seed,
            None => rand::random(),
        };
        let config = config.with_seed(seed);
        let system = initialize(&config, &mut rng_for(&config))?;
        Ok(Self::with_system(config, Some(seed), system))
    }

    /// Run a prepared particle system under `config`'s timestep, radius and step count.
    ///
    /// `config.particle_count`, `temperature` and `random_seed` are ignored; the
    /// container comes from `system`, and `reset()` returns to it.
    pub fn from_system(config: SimulationConfig, system: ParticleSystem) -> Result<Self> {
        config.validate()?;
        Ok(Self::with_system(config, None, system))
    }

    fn with_system(config: SimulationConfig, seed: Option<u64>, system: ParticleSystem) -> Self {
        Self {
            config,
            seed,
            initial: system.clone(),
            system,
            completed: 0,
            last_stats: CollisionStats::default(),
            observers: Vec::new(),
        }
    }

    pub fn add_observer(&mut self, observer: impl StepObserver + 'static) {
        self.observers.push(Box::new(observer));
    }

    pub fn state(&self) -> SimState {
        if self.completed < self.config.steps {
            SimState::Running
        } else {
            SimState::Finished
        }
    }

    pub fn is_finished(&self) -> bool {
        self.state() == SimState::Finished
    }

    pub fn remaining_steps(&self) -> usize {
        self.config.steps - self.completed
    }

    pub fn completed_steps(&self) -> usize {
        self.completed
    }

    pub fn config(&self) -> &SimulationConfig {
        &self.config
    }

    /// Seed the initial ensemble was drawn with; `None` for a prepared system.
    pub fn seed(&self) -> Option<u64> {
        self.seed
    }

    /// Read-only view of the current state.
    pub fn system(&self) -> &ParticleSystem {
        &self.system
    }

    /// Owned copy of the current state, detached from the simulator.
    pub fn snapshot(&self) -> ParticleSystem {
        self.system.clone()
    }

    /// Collision counts from the most recent step.
    pub fn last_stats(&self) -> CollisionStats {
        self.last_stats
    }

    /// Advance one step and notify observers.
    ///
    /// Errors:
    /// - `Error::Finished` if no steps remain; state is left untouched.
    pub fn step(&mut self) -> Result<&ParticleSystem> {
        if self.is_finished() {
            log::warn!("step() called on a finished simulation");
            return Err(Error::Finished {
                steps: self.completed,
            });
        }

        let cfg = &self.config;
        self.last_stats = advance(&mut self.system, cfg.dt, cfg.collision_radius, cfg.clamp_to_walls);
        self.completed += 1;
        log::debug!(
            "step {}/{}: {} collisions, {} coincident pairs",
            self.completed,
            cfg.steps,
            self.last_stats.resolved,
            self.last_stats.degenerate
        );

        for observer in &mut self.observers {
            observer.on_step(self.completed, &self.system);
        }
        if self.is_finished() {
            log::info!("simulation finished after {} steps", self.completed);
        }
        Ok(&self.system)
    }

    /// Run every remaining step and return the final state.
    pub fn run(&mut self) -> &ParticleSystem {
        while !self.is_finished() {
            if self.step().is_err() {
                break;
            }
        }
        &self.system
    }

    /// Restore the initial ensemble and start over. Observers stay registered.
    pub fn reset(&mut self) {
        self.system.clone_from(&self.initial);
        self.completed = 0;
        self.last_stats = CollisionStats::default();
    }
}
