//! The per-step update: free flight, wall bounce, pairwise elastic collisions.
//!
//! Free flight and the wall check touch one particle at a time, so they run across
//! the rayon pool. The collision pass stays single-threaded: a particle hit by two
//! neighbours in one step must see the first exchange before the second.

use crate::particle::{Particle, ParticleSystem};
use rayon::prelude::*;

/// `r += v * dt` for every particle.
pub fn integrate(particles: &mut [Particle], dt: f64) {
    particles.par_iter_mut().for_each(|p| {
        p.r[0] += p.v[0] * dt;
        p.r[1] += p.v[1] * dt;
    });
}

/// Reverse each velocity component whose coordinate lies outside `[0, width] x [0, height]`.
///
/// The position itself is left where it is unless `clamp` is set, in which case the
/// coordinate is also pulled back onto the wall it crossed.
pub fn reflect_walls(particles: &mut [Particle], width: f64, height: f64, clamp: bool) {
    particles.par_iter_mut().for_each(|p| {
        for (axis, bound) in [(0, width), (1, height)] {
            let outside = p.r[axis] < 0.0 || p.r[axis] > bound;
            if outside {
                p.v[axis] = -p.v[axis];
                if clamp {
                    p.r[axis] = p.r[axis].clamp(0.0, bound);
                }
            }
        }
    });
}

/// What one collision pass did.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct CollisionStats {
    /// Pairs that were closer than the interaction radius and exchanged momentum.
    pub resolved: usize,
    /// Pairs sitting on exactly the same point, skipped.
    pub degenerate: usize,
}

/// Runs an O(n^2) sweep over every unordered pair `(i, j)`, `i < j`, in index order
/// and resolves each pair closer than `radius` as an equal-mass elastic collision.
///
/// Each pair swaps the velocity components along the line of centres and keeps the
/// tangential ones. Both new velocities come from the pair's values before the
/// exchange; a later pair in the same sweep sees the already-updated velocities.
pub fn resolve_collisions(particles: &mut [Particle], radius: f64) -> CollisionStats {
    let mut stats = CollisionStats::default();
    let n = particles.len();

    for i in 0..n {
        for j in (i + 1)..n {
            let (head, tail) = particles.split_at_mut(j);
            let (a, b) = (&mut head[i], &mut tail[0]);

            let dx = b.r[0] - a.r[0];
            let dy = b.r[1] - a.r[1];
            let dist = dx.hypot(dy);
            if dist == 0.0 {
                log::trace!("particles {i} and {j} coincide, skipping pair");
                stats.degenerate += 1;
                continue;
            }
            if dist >= radius {
                continue;
            }

            let (nx, ny) = (dx / dist, dy / dist);
            let (tx, ty) = (-ny, nx);

            let v1n = a.v[0] * nx + a.v[1] * ny;
            let v2n = b.v[0] * nx + b.v[1] * ny;
            let v1t = a.v[0] * tx + a.v[1] * ty;
            let v2t = b.v[0] * tx + b.v[1] * ty;

            // swap normal components
            a.v = [v2n * nx + v1t * tx, v2n * ny + v1t * ty];
            b.v = [v1n * nx + v2t * tx, v1n * ny + v2t * ty];

            stats.resolved += 1;
        }
    }
    stats
}

/// One full step: free flight, then walls, then collisions.
pub fn advance(system: &mut ParticleSystem, dt: f64, radius: f64, clamp: bool) -> CollisionStats {
    let (w, h) = (system.width(), system.height());
    integrate(&mut system.particles, dt);
    reflect_walls(&mut system.particles, w, h, clamp);
    resolve_collisions(&mut system.particles, radius)
}
