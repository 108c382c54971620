/*
 * Application Module
 *
 * This module defines the nannou application model for the simulation and
 * wires it into nannou's update and view callbacks.
 *
 * - update: collect control panel changes, then let the scheduler run one
 *   tick, which renders into the model's Scene
 * - view: replay that Scene onto the window and draw the control panel
 */

use std::sync::OnceLock;

use nannou::prelude::*;
use nannou_egui::Egui;

use crate::debug::DebugInfo;
use crate::input;
use crate::params::ConfigFile;
use crate::renderer::Scene;
use crate::scheduler::{Scheduler, TickOutcome};
use crate::simulation::Simulation;
use crate::surface::SurfaceBounds;
use crate::ui;

// nannou builds the model from a plain function pointer, so the launch
// configuration is handed over here
static LAUNCH_CONFIG: OnceLock<ConfigFile> = OnceLock::new();

// Main model for the application
pub struct Model {
    pub sim: Simulation,
    pub scheduler: Scheduler,
    pub scene: Scene,
    pub egui: Egui,
    pub debug_info: DebugInfo,
    pub mouse_position: Vec2,
    pub mouse_down: bool,
}

// Open the window and run until it closes or the scheduler is stopped
pub fn run(config: ConfigFile) {
    if LAUNCH_CONFIG.set(config).is_err() {
        tracing::warn!("Simulation already launched, keeping the first configuration");
    }

    nannou::app(model).update(update).run();
}

// Initialize the model
pub fn model(app: &App) -> Model {
    let config = LAUNCH_CONFIG.get().cloned().unwrap_or_default();

    // 80% of the primary monitor, when there is one
    let (window_width, window_height) = app
        .primary_monitor()
        .map(|monitor| {
            let size = monitor.size();
            (size.width as f32 * 0.8, size.height as f32 * 0.8)
        })
        .unwrap_or((1024.0, 768.0));

    let window_id = app
        .new_window()
        .title("Charged Boids")
        .size(window_width as u32, window_height as u32)
        .view(view)
        .mouse_moved(input::mouse_moved)
        .mouse_pressed(input::mouse_pressed)
        .mouse_released(input::mouse_released)
        .key_pressed(input::key_pressed)
        .resized(input::resized)
        .raw_event(input::raw_window_event)
        .build()
        .expect("Failed to build the simulation window");

    let window = app
        .window(window_id)
        .expect("Simulation window closed before it was used");
    let egui = Egui::from_window(&window);

    let (width, height) = window.inner_size_points();
    let bounds = SurfaceBounds::new(width, height);
    tracing::info!("Starting simulation on a {width}x{height} surface");

    let sim = Simulation::new(config.params, bounds).with_color_scheme(config.color_scheme);

    Model {
        sim,
        scheduler: Scheduler::default(),
        scene: Scene::default(),
        egui,
        debug_info: DebugInfo::default(),
        mouse_position: Vec2::ZERO,
        mouse_down: false,
    }
}

// Update the model, once per frame
pub fn update(app: &App, model: &mut Model, _update: Update) {
    model.debug_info.fps = app.fps();

    for event in ui::update_ui(&mut model.egui, &model.sim, &model.debug_info) {
        model.sim.push_input(event);
    }

    match model.scheduler.tick(&mut model.sim, &mut model.scene) {
        TickOutcome::Ran(report) => {
            model.debug_info.record(
                &report,
                model.scheduler.frame_time(),
                model.scheduler.ticks(),
            );
        }
        TickOutcome::Cancelled => app.quit(),
    }
}

// Render the model
pub fn view(app: &App, model: &Model, frame: Frame) {
    let draw = app.draw();
    model.scene.paint(&draw, model.sim.bounds(), app.window_rect());

    if let Err(err) = draw.to_frame(app, &frame) {
        tracing::error!("Couldn't draw the simulation: {err:?}");
    }
    if let Err(err) = model.egui.draw_to_frame(&frame) {
        tracing::error!("Couldn't draw the control panel: {err:?}");
    }
}
