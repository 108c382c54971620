/*
 * Input Module
 *
 * This module turns user input into InputEvents. Events are not applied
 * where they happen: they wait in the simulation's InputQueue until the
 * scheduler drains it at the start of the next tick, which keeps the timing
 * of every change deterministic.
 *
 * Features:
 * - Spawning boids at the pointer by clicking or dragging
 * - Keyboard shortcuts for pause, randomize, colors and quit
 * - Forwarding window resizes to the simulation
 * - Ignoring pointer input aimed at the control panel
 */

use std::collections::VecDeque;
use std::time::Instant;

use nannou::prelude::*;
use nannou::winit::event::{MouseButton, WindowEvent};

use crate::app::Model;
use crate::params::{ColorScheme, ParamUpdate};
use crate::scheduler::Clock as _;

// Everything the control surface can ask of the simulation
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum InputEvent {
    SetParam(ParamUpdate),
    TogglePause,
    RandomizeDistances,
    SetColorScheme(ColorScheme),
    // `position` is in surface space, `at` is when the request was made
    SpawnAt { position: Point2, at: Instant },
    Resize { width: f32, height: f32 },
}

#[derive(Clone, Debug, Default)]
pub struct InputQueue {
    events: VecDeque<InputEvent>,
}

impl InputQueue {
    pub fn push(&mut self, event: InputEvent) {
        self.events.push_back(event);
    }

    // Take every pending event, oldest first
    pub fn drain(&mut self) -> impl Iterator<Item = InputEvent> + '_ {
        self.events.drain(..)
    }

    pub fn len(&self) -> usize {
        self.events.len()
    }

    pub fn is_empty(&self) -> bool {
        self.events.is_empty()
    }
}

// Queue a spawn at the current pointer position
fn request_spawn(app: &App, model: &mut Model) {
    let position = model
        .sim
        .bounds()
        .to_surface(model.mouse_position, app.window_rect());
    let at = model.scheduler.clock().now();
    model.sim.push_input(InputEvent::SpawnAt { position, at });
}

// Mouse moved event handler, dragging with the left button held keeps spawning
pub fn mouse_moved(app: &App, model: &mut Model, pos: Point2) {
    model.mouse_position = pos;

    if model.mouse_down && !model.egui.ctx().is_pointer_over_area() {
        request_spawn(app, model);
    }
}

// Mouse pressed event handler
pub fn mouse_pressed(app: &App, model: &mut Model, button: MouseButton) {
    // Clicks on the control panel belong to the control panel
    if button == MouseButton::Left && !model.egui.ctx().is_pointer_over_area() {
        model.mouse_down = true;
        request_spawn(app, model);
    }
}

// Mouse released event handler
pub fn mouse_released(_app: &App, model: &mut Model, button: MouseButton) {
    if button == MouseButton::Left {
        model.mouse_down = false;
    }
}

// Keyboard shortcuts
pub fn key_pressed(_app: &App, model: &mut Model, key: Key) {
    if model.egui.ctx().wants_keyboard_input() {
        return;
    }

    match key {
        Key::Space => model.sim.push_input(InputEvent::TogglePause),
        Key::R => model.sim.push_input(InputEvent::RandomizeDistances),
        Key::C => {
            let scheme = model.sim.color_scheme().toggled();
            model.sim.push_input(InputEvent::SetColorScheme(scheme));
        }
        Key::Escape => model.scheduler.stop_handle().cancel(),
        _ => {}
    }
}

// Window resized event handler
pub fn resized(_app: &App, model: &mut Model, size: Vec2) {
    model.sim.push_input(InputEvent::Resize {
        width: size.x,
        height: size.y,
    });
}

// Handle raw window events for egui
pub fn raw_window_event(_app: &App, model: &mut Model, event: &WindowEvent) {
    model.egui.handle_raw_event(event);
}
