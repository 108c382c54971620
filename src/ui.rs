/*
 * UI Module
 *
 * This module contains the control panel, built with nannou_egui. The panel
 * never touches the simulation directly: the sliders work on a copy of the
 * current parameters, and whatever differs afterwards is returned as
 * InputEvents for the next tick.
 */

use nannou_egui::{egui, Egui};

use crate::debug::DebugInfo;
use crate::input::InputEvent;
use crate::params::{ColorScheme, SimulationParams};
use crate::simulation::Simulation;
use crate::TICKS_PER_SECOND;

// Draw the control panel and collect the changes the user made
pub fn update_ui(egui: &mut Egui, sim: &Simulation, debug_info: &DebugInfo) -> Vec<InputEvent> {
    let mut events = Vec::new();
    let mut draft = sim.params().clone();
    let mut lifespan_seconds = draft.lifespan_seconds();
    let mut alternative_colours = sim.color_scheme() == ColorScheme::Alternative;

    let ctx = egui.begin_frame();

    egui::Window::new("Simulation Controls")
        .default_pos([10.0, 10.0])
        .show(&ctx, |ui| {
            ui.add(egui::Slider::new(&mut draft.repulsion_distance, SimulationParams::get_distance_range()).text("Repulsion Distance"));
            ui.add(egui::Slider::new(&mut draft.attraction_distance, SimulationParams::get_distance_range()).text("Attraction Distance"));
            ui.add(egui::Slider::new(&mut lifespan_seconds, SimulationParams::get_lifespan_seconds_range()).step_by(10.0).text("Lifespan (s)"));
            ui.add(egui::Slider::new(&mut draft.spawn_rate, SimulationParams::get_spawn_rate_range()).text("Growth Rate"));
            ui.add(egui::Slider::new(&mut draft.max_speed, SimulationParams::get_max_speed_range()).text("Max Speed"));
            ui.add(egui::Slider::new(&mut draft.capacity, SimulationParams::get_capacity_range()).text("Capacity"));

            ui.horizontal(|ui| {
                let label = if sim.is_paused() { "Resume" } else { "Pause" };
                if ui.button(label).clicked() {
                    events.push(InputEvent::TogglePause);
                }
                if ui.button("Randomize").clicked() {
                    events.push(InputEvent::RandomizeDistances);
                }
                if ui.checkbox(&mut alternative_colours, "Alternative colors").changed() {
                    events.push(InputEvent::SetColorScheme(sim.color_scheme().toggled()));
                }
            });

            ui.label(sim.summary());

            ui.collapsing("Performance", |ui| {
                ui.label(format!("FPS: {:.1}", debug_info.fps));
                ui.label(format!("Frame time: {:.2} ms", debug_info.frame_time.as_secs_f64() * 1000.0));
                ui.label(format!("Boids: {} / {}", debug_info.population, sim.params().capacity));
                ui.label(format!("Spawned: {} (total {})", debug_info.spawned, debug_info.total_spawned));
                ui.label(format!("Expired: {} (total {})", debug_info.expired, debug_info.total_expired));
                ui.label(format!("Refused at capacity: {}", debug_info.dropped));
                ui.label(format!("Ticks: {}", debug_info.ticks));
            });
        });

    // Lifespans loaded in ticks need not be whole seconds, leave them alone
    // unless the slider moved
    if lifespan_seconds != sim.params().lifespan_seconds() {
        draft.lifespan_ticks = lifespan_seconds * TICKS_PER_SECOND;
    }
    events.extend(
        draft
            .changes_since(sim.params())
            .into_iter()
            .map(InputEvent::SetParam),
    );

    events
}
