use clap::Parser;

use gas_box::analysis::{self, DEFAULT_BINS};
use gas_box::config::*;
use gas_box::{ParticleSystem, Result, SimulationConfig, Simulator};

#[cfg(feature = "gui")]
mod viewer;

// ===================================================================================
// Command Line
// ===================================================================================

const DEFAULT_ROLLING_FRAMES: usize = 20;

/// 2-D elastic gas in a box.
///
/// Opens an animated view by default; `--headless` runs every step and prints the
/// final kinetic-energy histogram instead. Builds without the `gui` feature always
/// run headless.
#[derive(Parser, Debug)]
#[command(name = "gas_box", version)]
#[cfg_attr(not(feature = "gui"), allow(dead_code))]
struct Args {
    #[arg(long, default_value_t = DEFAULT_PARTICLE_COUNT)]
    particles: usize,
    /// Variance of each velocity component at start.
    #[arg(long, default_value_t = DEFAULT_TEMPERATURE)]
    temperature: f64,
    #[arg(long, default_value_t = DEFAULT_CONTAINER_WIDTH)]
    width: f64,
    #[arg(long, default_value_t = DEFAULT_CONTAINER_HEIGHT)]
    height: f64,
    #[arg(long, default_value_t = DEFAULT_DT)]
    dt: f64,
    /// Pairs closer than this exchange momentum.
    #[arg(long, default_value_t = DEFAULT_COLLISION_RADIUS)]
    radius: f64,
    #[arg(long, default_value_t = DEFAULT_STEPS)]
    steps: usize,
    #[arg(long)]
    seed: Option<u64>,
    /// Also pull particles back onto the wall they crossed.
    #[arg(long)]
    clamp_walls: bool,
    /// Histogram bins for the energy report.
    #[arg(long, default_value_t = DEFAULT_BINS)]
    bins: usize,
    /// Frames averaged in the live energy histogram.
    #[arg(long, default_value_t = DEFAULT_ROLLING_FRAMES)]
    rolling_frames: usize,
    /// Run without a window.
    #[arg(long)]
    headless: bool,
}

impl Args {
    fn config(&self) -> SimulationConfig {
        SimulationConfig {
            particle_count: self.particles,
            temperature: self.temperature,
            container_width: self.width,
            container_height: self.height,
            dt: self.dt,
            collision_radius: self.radius,
            steps: self.steps,
            random_seed: self.seed,
            clamp_to_walls: self.clamp_walls,
        }
    }
}

// ===================================================================================
// Headless report
// ===================================================================================

fn run_headless(config: SimulationConfig, bins: usize) -> Result<()> {
    let mut sim = Simulator::new(config)?;
    let initial = analysis::total_kinetic_energy(sim.system());
    sim.add_observer(|step: usize, system: &ParticleSystem| {
        if step % 10 == 0 {
            log::debug!(
                "step {step}: mean kinetic energy {:.3}",
                analysis::mean_kinetic_energy(system)
            );
        }
    });

    let energies = analysis::kinetic_energies(sim.run());
    let total: f64 = energies.iter().sum();
    log::info!("total kinetic energy {initial:.3} -> {total:.3}");

    let hist = analysis::histogram(&energies, bins)?;
    let peak = hist.counts.iter().copied().max().unwrap_or(0).max(1);
    match sim.seed() {
        Some(seed) => println!("Kinetic energy histogram ({} particles, seed {seed})", energies.len()),
        None => println!("Kinetic energy histogram ({} particles)", energies.len()),
    }
    for (e, &count) in hist.edges.windows(2).zip(&hist.counts) {
        let bar = "#".repeat(count * 50 / peak);
        println!("{:>12.3} .. {:>12.3} | {:>5} {}", e[0], e[1], count, bar);
    }
    Ok(())
}

// ===================================================================================
// main
// ===================================================================================

fn main() -> Result<()> {
    env_logger::init();
    let args = Args::parse();
    let config = args.config();
    config.validate()?;

    if let Err(e) = rayon::ThreadPoolBuilder::new()
        .num_threads(num_cpus::get_physical())
        .build_global()
    {
        log::warn!("using default rayon pool: {e}");
    }

    #[cfg(feature = "gui")]
    if !args.headless {
        let view = viewer::ViewParams {
            num_bins: args.bins,
            rolling_frames: args.rolling_frames,
        };
        return viewer::run(config, view);
    }

    run_headless(config, args.bins)
}
