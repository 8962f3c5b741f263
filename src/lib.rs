//! A 2-D gas of point particles in a rectangular box.
//!
//! Particles fly freely, bounce off the walls by reversing a velocity component, and
//! exchange momentum with any neighbour inside a fixed interaction radius. The
//! [`Simulator`] owns the particles and hands a read-only view to observers after
//! every step; [`analysis`] turns a snapshot into a kinetic-energy distribution.
//!
//! ```no_run
//! use gas_box::{SimulationConfig, Simulator, analysis};
//!
//! let mut sim = Simulator::new(SimulationConfig::default().with_seed(42))?;
//! let energies = analysis::kinetic_energies(sim.run());
//! # Ok::<(), gas_box::Error>(())
//! ```

pub mod analysis;
pub mod config;
pub mod error;
pub mod init;
pub mod particle;
pub mod physics;
pub mod simulator;

pub use analysis::kinetic_energies;
pub use config::SimulationConfig;
pub use error::{Error, Result};
pub use init::initialize;
pub use particle::{Particle, ParticleSystem};
pub use physics::{CollisionStats, advance};
pub use simulator::{SimState, Simulator, StepObserver};
