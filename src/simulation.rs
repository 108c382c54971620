/*
 * Simulation Module
 *
 * This module defines the Simulation struct, the engine that owns the boids
 * together with everything that decides their fate: the parameters, the
 * surface bounds, the spawn gates and the queue of pending input.
 *
 * One tick of the simulation, in order:
 * 1. Apply every queued input event
 * 2. If not paused, age the boids and remove the expired ones
 * 3. Spawn the boids requested through input, paused or not
 * 4. If not paused, spawn automatically and run the force and integration
 *    step over the boids that were alive before any of this tick's spawns
 * Rendering is separate (see `render`), so it can happen while paused.
 */

use std::time::Instant;

use nannou::prelude::*;

use crate::boid::Boid;
use crate::input::{InputEvent, InputQueue};
use crate::lifecycle::{Lifecycle, SpawnOutcome};
use crate::params::{ColorScheme, ParamUpdate, SimulationParams};
use crate::physics;
use crate::renderer::{self, Painter};
use crate::surface::SurfaceBounds;

// What happened during one tick
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct TickReport {
    pub paused: bool,
    pub expired: usize,
    pub spawned: usize,
    pub dropped: usize, // Spawn requests refused because of capacity
    pub population: usize,
}

impl TickReport {
    fn count(&mut self, outcome: SpawnOutcome) {
        match outcome {
            SpawnOutcome::Spawned => self.spawned += 1,
            SpawnOutcome::AtCapacity => self.dropped += 1,
            SpawnOutcome::Gated | SpawnOutcome::Paused => {}
        }
    }
}

#[derive(Clone, Debug)]
pub struct Simulation {
    boids: Vec<Boid>,
    params: SimulationParams,
    bounds: SurfaceBounds,
    color_scheme: ColorScheme,
    lifecycle: Lifecycle,
    inputs: InputQueue,
    summary: String,
}

impl Simulation {
    pub fn new(params: SimulationParams, bounds: SurfaceBounds) -> Self {
        let summary = params.summary();
        Self {
            boids: Vec::new(),
            params,
            bounds,
            color_scheme: ColorScheme::default(),
            lifecycle: Lifecycle::new(),
            inputs: InputQueue::default(),
            summary,
        }
    }

    pub fn with_color_scheme(mut self, color_scheme: ColorScheme) -> Self {
        self.color_scheme = color_scheme;
        self
    }

    pub fn boids(&self) -> &[Boid] {
        &self.boids
    }

    pub fn population(&self) -> usize {
        self.boids.len()
    }

    pub fn params(&self) -> &SimulationParams {
        &self.params
    }

    pub fn bounds(&self) -> SurfaceBounds {
        self.bounds
    }

    pub fn color_scheme(&self) -> ColorScheme {
        self.color_scheme
    }

    pub fn is_paused(&self) -> bool {
        self.params.paused
    }

    // Human readable summary of the key parameters, kept in step with them
    pub fn summary(&self) -> &str {
        &self.summary
    }

    pub fn pending_inputs(&self) -> usize {
        self.inputs.len()
    }

    pub fn configure(&mut self, update: ParamUpdate) {
        tracing::debug!("Setting {update:?}");
        update.apply(&mut self.params);
        self.summary = self.params.summary();
    }

    pub fn pause(&mut self) {
        if !self.params.paused {
            tracing::info!("Pausing simulation");
            self.params.paused = true;
        }
    }

    pub fn resume(&mut self) {
        if self.params.paused {
            tracing::info!("Resuming simulation");
            self.params.paused = false;
        }
    }

    pub fn toggle_pause(&mut self) {
        if self.params.paused {
            self.resume();
        } else {
            self.pause();
        }
    }

    pub fn randomize_distances(&mut self) {
        self.params.randomize_distances(&mut rand::thread_rng());
        tracing::debug!(
            "Randomized distances to repulsion {} and attraction {}",
            self.params.repulsion_distance,
            self.params.attraction_distance
        );
        self.summary = self.params.summary();
    }

    pub fn set_color_scheme(&mut self, color_scheme: ColorScheme) {
        self.color_scheme = color_scheme;
    }

    // Only the bounds change, the boids stay where they are
    pub fn resize(&mut self, width: f32, height: f32) {
        tracing::debug!("Resizing surface to {width}x{height}");
        self.bounds = SurfaceBounds::new(width, height);
    }

    // Spawn a boid at `position` (surface space) right away, subject to the
    // manual spawn gate and capacity but not to pause
    pub fn spawn_at(&mut self, position: Point2, now: Instant) -> SpawnOutcome {
        self.lifecycle
            .manual_spawn(&mut self.boids, &self.params, position, now)
    }

    // Add an existing boid if there is room for it
    pub fn insert(&mut self, boid: Boid) -> bool {
        if self.boids.len() >= self.params.capacity {
            return false;
        }
        self.boids.push(boid);
        true
    }

    // Queue an event for the start of the next tick
    pub fn push_input(&mut self, event: InputEvent) {
        self.inputs.push(event);
    }

    // Apply all queued events, handing back the spawn requests among them
    fn apply_inputs(&mut self) -> Vec<(Point2, Instant)> {
        let events: Vec<InputEvent> = self.inputs.drain().collect();
        let mut spawns = Vec::new();

        for event in events {
            match event {
                InputEvent::SetParam(update) => self.configure(update),
                InputEvent::TogglePause => self.toggle_pause(),
                InputEvent::RandomizeDistances => self.randomize_distances(),
                InputEvent::SetColorScheme(scheme) => self.set_color_scheme(scheme),
                InputEvent::SpawnAt { position, at } => spawns.push((position, at)),
                InputEvent::Resize { width, height } => self.resize(width, height),
            }
        }

        spawns
    }

    // Advance the simulation by one tick
    pub fn step(&mut self, now: Instant) -> TickReport {
        let spawns = self.apply_inputs();
        let paused = self.params.paused;
        let mut report = TickReport {
            paused,
            ..TickReport::default()
        };

        if !paused {
            report.expired = Lifecycle::age(&mut self.boids, self.params.capacity);
        }

        // Boids spawned from here on wait for the next tick to move
        let settled = self.boids.len();

        for (position, at) in spawns {
            let outcome = self
                .lifecycle
                .manual_spawn(&mut self.boids, &self.params, position, at);
            report.count(outcome);
        }

        if !paused {
            let outcome =
                self.lifecycle
                    .auto_spawn(&mut self.boids, &self.params, self.bounds, now);
            report.count(outcome);

            physics::update_boids(&mut self.boids[..settled], &self.params, self.bounds);
        }

        report.population = self.boids.len();
        report
    }

    // The render step, never changes the boids
    pub fn render<P: Painter>(&self, painter: &mut P) {
        renderer::render(&self.boids, self.color_scheme, painter);
    }
}
