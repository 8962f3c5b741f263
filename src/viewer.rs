/// The `egui` re-export for building native GUIs with the eframe framework.
use eframe::egui::{self, Color32, Stroke};
/// Additional 2D geometric tools from eframe, e.g. `Vec2`.
use eframe::epaint::Vec2;
/// The `egui_plot` crate for plotting data in an egui-based app.
use egui_plot::{Line, Plot, PlotPoints};

use gas_box::analysis::{self, RollingHistogram};
use gas_box::{Error, ParticleSystem, Result, SimulationConfig, Simulator};

// ===================================================================================
// View Parameters
// ===================================================================================

/// Settings of the live view that don't affect the physics.
#[derive(Clone)]
pub struct ViewParams {
    pub num_bins: usize,
    pub rolling_frames: usize,
}

/// Upper edge of the live histogram, in multiples of the initial temperature.
/// The 2-D energy distribution is exponential, so almost nothing lies beyond this.
const ENERGY_RANGE_FACTOR: f64 = 8.0;

// ===================================================================================
// Main Application
// ===================================================================================

/// The viewer state:
/// - A configuration UI (sliders, etc.) used to set up the run
/// - The "running" flag indicating if the animation is advancing
/// - The simulator, which owns the particles; the view only borrows them
/// - A rolling average of the per-frame energy histogram
struct GasApp {
    // -------------- Config / UI --------------
    params: SimulationConfig, // user-chosen parameters
    view: ViewParams,
    running: bool,     // is the animation advancing?
    needs_reset: bool, // sliders changed since the last init

    // -------------- Simulation Data --------------
    sim: Simulator,
    energy_hist: RollingHistogram,
    max_energy: f64,
}

impl GasApp {
    fn new(params: SimulationConfig, view: ViewParams) -> Result<Self> {
        let sim = Simulator::new(params.clone())?;
        let energy_hist = RollingHistogram::new(view.num_bins, view.rolling_frames)?;
        let mut app = Self {
            params,
            view,
            running: false,
            needs_reset: false,
            sim,
            energy_hist,
            max_energy: 1.0,
        };
        app.refresh_energy_range();
        app.record_frame();
        Ok(app)
    }

    /// Re-initialises the simulation from the current slider values.
    ///
    /// Without a `--seed` every call draws a fresh ensemble; use `replay` to rerun
    /// the current one.
    fn reset_simulation(&mut self) {
        match Simulator::new(self.params.clone()) {
            Ok(sim) => self.sim = sim,
            Err(e) => {
                log::error!("cannot reset simulation: {e}");
                return;
            }
        }
        self.restart_view();
        self.needs_reset = false;
    }

    /// Rewind the current ensemble to its first frame.
    fn replay(&mut self) {
        self.sim.reset();
        self.restart_view();
    }

    fn restart_view(&mut self) {
        self.energy_hist.clear();
        self.refresh_energy_range();
        self.record_frame();
    }

    fn refresh_energy_range(&mut self) {
        let t = analysis::mean_kinetic_energy(self.sim.system());
        self.max_energy = if t > 0.0 { ENERGY_RANGE_FACTOR * t } else { 1.0 };
    }

    /// Bin the current energies and fold them into the rolling average.
    fn record_frame(&mut self) {
        let energies = analysis::kinetic_energies(self.sim.system());
        match analysis::histogram_in(&energies, self.view.num_bins, 0.0, self.max_energy) {
            Ok(hist) => {
                self.energy_hist.push(&hist.counts);
            }
            Err(e) => log::warn!("skipping histogram frame: {e}"),
        }
    }

    fn advance(&mut self) {
        match self.sim.step().map(|_| ()) {
            Ok(()) => self.record_frame(),
            Err(e) => {
                log::info!("{e}");
                self.running = false;
            }
        }
        if self.sim.is_finished() {
            self.running = false;
        }
    }

    fn histogram_points(&self) -> (Vec<[f64; 2]>, Vec<[f64; 2]>) {
        let bins = self.energy_hist.bins();
        let bin_width = self.max_energy / bins as f64;
        let measured = self
            .energy_hist
            .smoothed()
            .iter()
            .enumerate()
            .map(|(i, &count)| [(i as f64 + 0.5) * bin_width, count])
            .collect();

        // N * dE / T * exp(-E / T), the relaxed 2-D distribution
        let system = self.sim.system();
        let t = analysis::mean_kinetic_energy(system);
        let n = system.len() as f64;
        let expected = if t > 0.0 {
            (0..bins)
                .map(|i| {
                    let e = (i as f64 + 0.5) * bin_width;
                    [e, n * bin_width / t * (-e / t).exp()]
                })
                .collect()
        } else {
            Vec::new()
        };
        (measured, expected)
    }
}

impl eframe::App for GasApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        // --------------------------
        // Sidebar with configuration
        // --------------------------
        egui::SidePanel::left("config_panel").show(ctx, |ui| {
            ui.heading("Simulation Controls");

            if !self.running {
                let p = &mut self.params;
                let mut changed = false;
                changed |= ui.add(egui::Slider::new(&mut p.particle_count, 1..=1000).text("Particles")).changed();
                changed |= ui.add(egui::Slider::new(&mut p.temperature, 0.0..=5000.0).text("Temperature")).changed();
                changed |= ui.add(egui::Slider::new(&mut p.container_width, 100.0..=2000.0).text("Box Width")).changed();
                changed |= ui.add(egui::Slider::new(&mut p.container_height, 100.0..=2000.0).text("Box Height")).changed();
                changed |= ui.add(egui::Slider::new(&mut p.dt, 0.001..=1.0).text("DT")).changed();
                changed |= ui.add(egui::Slider::new(&mut p.collision_radius, 0.5..=50.0).text("Collision Radius")).changed();
                changed |= ui.add(egui::Slider::new(&mut p.steps, 0..=10_000).text("Steps")).changed();
                changed |= ui.checkbox(&mut p.clamp_to_walls, "Clamp to walls").changed();
                self.needs_reset |= changed;
            } else {
                ui.label("Parameters locked while running. Stop to change.");
            }

            ui.separator();

            // Start / Stop
            if self.running {
                if ui.button("Stop").clicked() {
                    self.running = false;
                }
            } else if ui.button("Start").clicked() {
                if self.needs_reset || self.sim.is_finished() {
                    self.reset_simulation();
                }
                self.running = !self.sim.is_finished();
            }

            if ui.button("Reset").clicked() {
                self.reset_simulation();
                self.running = false;
            }

            if ui.button("Replay").clicked() {
                self.replay();
                self.running = false;
            }

            ui.separator();
            ui.label(format!("Step {}/{}", self.sim.completed_steps(), self.sim.config().steps));
            if let Some(seed) = self.sim.seed() {
                ui.label(format!("Seed {seed}"));
            }
        });

        // ------------------------------------
        // If we're running, advance one step per frame
        // ------------------------------------
        if self.running {
            self.advance();
        }

        egui::TopBottomPanel::top("top_panel").show(ctx, |ui| {
            let system = self.sim.system();
            ui.heading("2D Gas Simulation (Elastic Collisions)");
            ui.label(format!(
                "Particle count: {}   Total KE: {:.1}   Collisions last step: {}",
                system.len(),
                analysis::total_kinetic_energy(system),
                self.sim.last_stats().resolved,
            ));
        });

        egui::SidePanel::right("right_panel")
            .resizable(true)
            .show(ctx, |ui| {
                ui.label("Kinetic energy distribution (rolling average)");
                let (measured, expected) = self.histogram_points();
                let plot = Plot::new("energy_histogram")
                    .width(260.0)
                    .height(400.0)
                    .allow_scroll(true)
                    .allow_drag(true);

                plot.show(ui, |plot_ui| {
                    plot_ui.line(Line::new(PlotPoints::from(measured)).name("measured"));
                    if !expected.is_empty() {
                        plot_ui.line(Line::new(PlotPoints::from(expected)).name("exp(-E/T)"));
                    }
                });
            });

        egui::CentralPanel::default().show(ctx, |ui| {
            draw_particles(ui, self.sim.system());
        });

        if self.running {
            ctx.request_repaint();
        }
    }
}

/// Scatter the particles over the panel, y up, circle area proportional to mass.
fn draw_particles(ui: &egui::Ui, system: &ParticleSystem) {
    let painter = ui.painter();
    let rect = ui.max_rect();

    // Scale from simulation box to the drawing area:
    let scale_x = rect.width() / system.width() as f32;
    let scale_y = rect.height() / system.height() as f32;
    let scale = scale_x.min(scale_y);

    let box_rect = egui::Rect::from_min_size(
        rect.min,
        Vec2::new(system.width() as f32 * scale, system.height() as f32 * scale),
    );
    painter.rect_stroke(box_rect, 0.0, Stroke::new(1.0, Color32::GRAY));

    let outline = Stroke::new(0.5, Color32::BLACK);
    for p in &system.particles {
        let px = p.r[0] as f32 * scale;
        let py = (system.height() - p.r[1]) as f32 * scale;
        let pos = rect.min + Vec2::new(px, py);
        let radius = 0.5 * (20.0 * p.mass as f32).sqrt();
        painter.circle(pos, radius, Color32::RED, outline);
    }
}

/// Open the window and animate until it is closed.
pub fn run(config: SimulationConfig, view: ViewParams) -> Result<()> {
    let app = GasApp::new(config, view)?;
    let native_options = eframe::NativeOptions {
        ..Default::default()
    };

    eframe::run_native(
        "2D Gas Simulation",
        native_options,
        Box::new(move |_cc| Ok(Box::new(app))),
    )
    .map_err(|e| Error::Gui(e.to_string()))
}
