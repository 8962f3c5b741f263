use gas_box::analysis::{self, histogram};
use gas_box::physics::{integrate, reflect_walls, resolve_collisions};
use gas_box::{
    Error, Particle, ParticleSystem, Result, SimState, SimulationConfig, Simulator, advance,
    initialize, kinetic_energies,
};
use rand::{SeedableRng, rngs::StdRng};

fn head_on_pair() -> Result<ParticleSystem> {
    ParticleSystem::new(
        vec![
            Particle::new([0.0, 0.0], [1.0, 0.0]),
            Particle::new([5.0, 0.0], [-1.0, 0.0]),
        ],
        800.0,
        600.0,
    )
}

#[test]
fn head_on_pair_swaps_after_one_step() -> Result<()> {
    let cfg = SimulationConfig {
        dt: 1.0,
        collision_radius: 10.0,
        steps: 1,
        ..Default::default()
    };
    let mut sim = Simulator::from_system(cfg, head_on_pair()?)?;
    let system = sim.step()?;

    assert_eq!(system.particles[0].r, [1.0, 0.0]);
    assert_eq!(system.particles[1].r, [4.0, 0.0]);
    let (a, b) = (system.particles[0].v, system.particles[1].v);
    assert!((a[0] + 1.0).abs() < 1e-12 && a[1].abs() < 1e-12);
    assert!((b[0] - 1.0).abs() < 1e-12 && b[1].abs() < 1e-12);
    assert_eq!(sim.state(), SimState::Finished);
    Ok(())
}

#[test]
fn free_function_step_matches_simulator() -> Result<()> {
    let mut by_hand = head_on_pair()?;
    let stats = advance(&mut by_hand, 1.0, 10.0, false);
    assert_eq!(stats.resolved, 1);

    let cfg = SimulationConfig {
        dt: 1.0,
        steps: 1,
        ..Default::default()
    };
    let mut sim = Simulator::from_system(cfg, head_on_pair()?)?;
    assert_eq!(sim.step()?, &by_hand);
    Ok(())
}

#[test]
fn isolated_collision_conserves_momentum_and_energy() -> Result<()> {
    // well inside the box, so no wall interferes
    let mut system = ParticleSystem::new(
        vec![
            Particle::new([400.0, 300.0], [12.0, -7.5]),
            Particle::new([404.0, 303.0], [-3.25, 9.0]),
        ],
        800.0,
        600.0,
    )?;
    integrate(&mut system.particles, 0.1);
    reflect_walls(&mut system.particles, 800.0, 600.0, false);
    let (p0, e0) = (system.total_momentum(), analysis::total_kinetic_energy(&system));

    let stats = resolve_collisions(&mut system.particles, 10.0);
    assert_eq!(stats.resolved, 1);

    let (p1, e1) = (system.total_momentum(), analysis::total_kinetic_energy(&system));
    assert!((p0[0] - p1[0]).abs() < 1e-12);
    assert!((p0[1] - p1[1]).abs() < 1e-12);
    assert!((e0 - e1).abs() < 1e-10);
    Ok(())
}

#[test]
fn wall_overshoot_is_not_clamped() -> Result<()> {
    let cfg = SimulationConfig {
        dt: 1.0,
        steps: 1,
        ..Default::default()
    };
    let system = ParticleSystem::new(vec![Particle::new([795.0, 300.0], [50.0, 0.0])], 800.0, 600.0)?;
    let mut sim = Simulator::from_system(cfg, system)?;
    let p = sim.step()?.particles[0];
    assert_eq!(p.r, [845.0, 300.0]);
    assert_eq!(p.v, [-50.0, 0.0]);
    Ok(())
}

#[test]
fn clamping_is_opt_in() -> Result<()> {
    let cfg = SimulationConfig {
        dt: 1.0,
        steps: 1,
        clamp_to_walls: true,
        ..Default::default()
    };
    let system = ParticleSystem::new(vec![Particle::new([795.0, 300.0], [50.0, 0.0])], 800.0, 600.0)?;
    let mut sim = Simulator::from_system(cfg, system)?;
    let p = sim.step()?.particles[0];
    assert_eq!(p.r, [800.0, 300.0]);
    assert_eq!(p.v, [-50.0, 0.0]);
    Ok(())
}

#[test]
fn coincident_particles_do_not_disturb_a_run() -> Result<()> {
    let cfg = SimulationConfig {
        steps: 1,
        ..Default::default()
    };
    let system = ParticleSystem::new(
        vec![
            Particle::new([100.0, 100.0], [2.0, 1.0]),
            Particle::new([100.0, 100.0], [2.0, 1.0]),
        ],
        800.0,
        600.0,
    )?;
    let mut sim = Simulator::from_system(cfg, system)?;
    let out = sim.step()?;
    assert_eq!(out.particles[0].v, [2.0, 1.0]);
    assert_eq!(out.particles[1].v, [2.0, 1.0]);
    assert_eq!(sim.last_stats().degenerate, 1);
    Ok(())
}

#[test]
fn same_seed_same_trajectory() -> Result<()> {
    let cfg = SimulationConfig {
        particle_count: 60,
        steps: 25,
        ..Default::default()
    }
    .with_seed(2024);

    let mut a = Simulator::new(cfg.clone())?;
    let mut b = Simulator::new(cfg)?;
    while !a.is_finished() {
        assert_eq!(a.step()?, b.step()?);
    }
    assert!(b.is_finished());
    Ok(())
}

#[test]
fn different_seeds_differ() -> Result<()> {
    let cfg = SimulationConfig::default();
    let a = initialize(&cfg, &mut StdRng::seed_from_u64(1))?;
    let b = initialize(&cfg, &mut StdRng::seed_from_u64(2))?;
    assert_ne!(a, b);
    Ok(())
}

#[test]
fn total_energy_survives_a_crowded_run() -> Result<()> {
    // walls and equal-mass exchanges both preserve |v|
    let cfg = SimulationConfig {
        particle_count: 200,
        temperature: 50.0,
        container_width: 200.0,
        container_height: 150.0,
        dt: 0.1,
        steps: 200,
        ..Default::default()
    }
    .with_seed(99);
    let mut sim = Simulator::new(cfg)?;
    let before = analysis::total_kinetic_energy(sim.system());
    let after = analysis::total_kinetic_energy(sim.run());
    assert!(((after - before) / before).abs() < 1e-9, "{before} -> {after}");
    Ok(())
}

#[test]
fn equal_speed_gas_reports_single_spike() -> Result<()> {
    let speed = 4.0_f64;
    let particles = (0..40)
        .map(|i| Particle::new([i as f64, 0.0], if i % 2 == 0 { [speed, 0.0] } else { [0.0, -speed] }))
        .collect();
    let system = ParticleSystem::new(particles, 100.0, 100.0)?;
    let energies = kinetic_energies(&system);
    assert!(energies.iter().all(|&e| e == 0.5 * speed * speed));

    let hist = histogram(&energies, analysis::DEFAULT_BINS)?;
    assert_eq!(hist.counts.iter().filter(|&&c| c > 0).count(), 1);
    assert_eq!(hist.total(), 40);
    Ok(())
}

#[test]
fn invalid_config_never_starts() {
    let cfg = SimulationConfig {
        particle_count: 0,
        ..Default::default()
    };
    assert!(matches!(Simulator::new(cfg), Err(Error::Config(_))));
}
