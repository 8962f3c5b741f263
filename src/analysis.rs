//! Kinetic-energy statistics over a particle snapshot.

use crate::error::{Error, Result};
use crate::particle::ParticleSystem;

/// Number of bins the end-of-run energy report uses.
pub const DEFAULT_BINS: usize = 20;

/// 1/2 m |v|^2 per particle, in particle order.
pub fn kinetic_energies(system: &ParticleSystem) -> Vec<f64> {
    system.particles.iter().map(|p| p.kinetic_energy()).collect()
}

/// |v| per particle, in particle order.
pub fn speeds(system: &ParticleSystem) -> Vec<f64> {
    system.particles.iter().map(|p| p.speed()).collect()
}

pub fn total_kinetic_energy(system: &ParticleSystem) -> f64 {
    system.particles.iter().map(|p| p.kinetic_energy()).sum()
}

/// Mean kinetic energy per particle; `0.0` for an empty system.
///
/// With two translational degrees of freedom and k_B = 1 this is also the
/// kinetic temperature of the gas.
pub fn mean_kinetic_energy(system: &ParticleSystem) -> f64 {
    if system.is_empty() {
        return 0.0;
    }
    total_kinetic_energy(system) / system.len() as f64
}

// ===================================================================================
// Histograms
// ===================================================================================

/// Equal-width histogram. `edges` has `counts.len() + 1` entries.
#[derive(Debug, Clone, PartialEq)]
pub struct Histogram {
    pub edges: Vec<f64>,
    pub counts: Vec<usize>,
}

impl Histogram {
    pub fn bin_width(&self) -> f64 {
        match (self.edges.first(), self.edges.last()) {
            (Some(lo), Some(hi)) if !self.counts.is_empty() => (hi - lo) / self.counts.len() as f64,
            _ => 0.0,
        }
    }

    pub fn total(&self) -> usize {
        self.counts.iter().sum()
    }
}

/// Histogram spanning the data's own min..max.
///
/// When every value is identical the range is widened to `value ± 0.5` (or a few
/// ulps of the value, if larger) so the spike lands in the middle bin. Non-finite
/// values are ignored.
///
/// Errors:
/// - `Error::Config` if `bins == 0`.
pub fn histogram(values: &[f64], bins: usize) -> Result<Histogram> {
    let finite = values.iter().copied().filter(|v| v.is_finite());
    let (lo, hi) = finite.fold((f64::INFINITY, f64::NEG_INFINITY), |(lo, hi), v| {
        (lo.min(v), hi.max(v))
    });
    let (lo, hi) = if lo > hi {
        (0.0, 1.0)
    } else if lo == hi {
        let pad = 0.5_f64.max(lo.abs() * f64::EPSILON * 4.0);
        (lo - pad, hi + pad)
    } else {
        (lo, hi)
    };
    histogram_in(values, bins, lo, hi)
}

/// Histogram over a fixed `[lo, hi]` range; values outside are clamped into the
/// first or last bin so the total always matches the particle count.
///
/// Errors:
/// - `Error::Config` if `bins == 0` or the range is empty or not finite.
pub fn histogram_in(values: &[f64], bins: usize, lo: f64, hi: f64) -> Result<Histogram> {
    if bins == 0 {
        return Err(Error::Config("histogram needs at least one bin".into()));
    }
    if !(lo.is_finite() && hi.is_finite() && hi > lo) {
        return Err(Error::Config(format!(
            "histogram range must be finite with hi > lo, got [{lo}, {hi}]"
        )));
    }

    let bin_size = (hi - lo) / bins as f64;
    let edges = (0..=bins).map(|i| lo + i as f64 * bin_size).collect();
    let mut counts = vec![0usize; bins];
    for &v in values.iter().filter(|v| v.is_finite()) {
        let bin = ((v - lo) / bin_size).max(0.0) as usize;
        counts[bin.min(bins - 1)] += 1;
    }
    Ok(Histogram { edges, counts })
}

// ===================================================================================
// Rolling average
// ===================================================================================

/// Ring buffer of per-frame histogram counts, averaged bin by bin.
///
/// Smooths the frame-to-frame noise of a small ensemble in the live view.
#[derive(Debug, Clone)]
pub struct RollingHistogram {
    ring: Vec<Vec<f64>>,
    index: usize,
    stored: usize,
    smooth: Vec<f64>,
}

impl RollingHistogram {
    /// Errors:
    /// - `Error::Config` if `bins` or `frames` is zero.
    pub fn new(bins: usize, frames: usize) -> Result<Self> {
        if bins == 0 || frames == 0 {
            return Err(Error::Config(
                "rolling histogram needs at least one bin and one frame".into(),
            ));
        }
        Ok(Self {
            ring: vec![vec![0.0; bins]; frames],
            index: 0,
            stored: 0,
            smooth: vec![0.0; bins],
        })
    }

    pub fn bins(&self) -> usize {
        self.smooth.len()
    }

    /// Number of frames currently contributing to the average.
    pub fn stored_frames(&self) -> usize {
        self.stored
    }

    /// Push the current frame's counts, then recompute the average.
    ///
    /// Counts beyond `bins()` are dropped; missing bins count as zero.
    pub fn push(&mut self, counts: &[usize]) -> &[f64] {
        let slot = &mut self.ring[self.index];
        slot.fill(0.0);
        for (dst, &c) in slot.iter_mut().zip(counts) {
            *dst = c as f64;
        }
        self.index = (self.index + 1) % self.ring.len();
        if self.stored < self.ring.len() {
            self.stored += 1;
        }

        self.smooth.fill(0.0);
        for frame in &self.ring[..self.stored] {
            for (acc, &val) in self.smooth.iter_mut().zip(frame) {
                *acc += val;
            }
        }
        let denom = self.stored as f64;
        for acc in &mut self.smooth {
            *acc /= denom;
        }
        &self.smooth
    }

    pub fn smoothed(&self) -> &[f64] {
        &self.smooth
    }

    pub fn clear(&mut self) {
        for frame in &mut self.ring {
            frame.fill(0.0);
        }
        self.smooth.fill(0.0);
        self.index = 0;
        self.stored = 0;
    }
}
