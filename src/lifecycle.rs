/*
 * Lifecycle Module
 *
 * This module handles the birth and death of boids. Every unpaused tick each
 * boid loses one tick of life and is removed once it has none left. New boids
 * arrive in two ways, each throttled by its own SpawnGate:
 * - Automatically, at a random position, at most once per 1000ms / spawn rate
 * - Manually, at the pointer, at most once per 100ms / spawn rate
 * Neither kind of spawn ever pushes the population over capacity.
 */

use std::time::{Duration, Instant};

use nannou::prelude::*;

use crate::boid::Boid;
use crate::params::SimulationParams;
use crate::surface::SurfaceBounds;
use crate::{AUTO_SPAWN_WINDOW, MANUAL_SPAWN_WINDOW};

// What became of a spawn request
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum SpawnOutcome {
    Spawned,
    Gated,
    AtCapacity,
    Paused,
}

// Enforces a minimum interval between accepted spawns of one kind. The
// interval is the gate's window divided by the current spawn rate.
#[derive(Clone, Debug)]
pub struct SpawnGate {
    window: Duration,
    last_accepted: Option<Instant>,
}

impl SpawnGate {
    pub fn new(window: Duration) -> Self {
        Self {
            window,
            last_accepted: None,
        }
    }

    // `None` for rates that can never be met (zero, negative, NaN)
    pub fn interval(&self, spawn_rate: f32) -> Option<Duration> {
        if !(spawn_rate > 0.0) {
            return None;
        }
        Duration::try_from_secs_f64(self.window.as_secs_f64() / <f64 as From<f32>>::from(spawn_rate)).ok()
    }

    pub fn is_open(&self, now: Instant, spawn_rate: f32) -> bool {
        let Some(interval) = self.interval(spawn_rate) else {
            return false;
        };

        match self.last_accepted {
            Some(last) => now.saturating_duration_since(last) >= interval,
            None => true,
        }
    }

    // Let a request through if the gate is open, closing it behind the request
    pub fn try_pass(&mut self, now: Instant, spawn_rate: f32) -> bool {
        if self.is_open(now, spawn_rate) {
            self.last_accepted = Some(now);
            true
        } else {
            false
        }
    }
}

#[derive(Clone, Debug)]
pub struct Lifecycle {
    auto_gate: SpawnGate,
    manual_gate: SpawnGate,
}

impl Default for Lifecycle {
    fn default() -> Self {
        Self {
            auto_gate: SpawnGate::new(AUTO_SPAWN_WINDOW),
            manual_gate: SpawnGate::new(MANUAL_SPAWN_WINDOW),
        }
    }
}

impl Lifecycle {
    pub fn new() -> Self {
        Self::default()
    }

    // Age every boid by one tick and drop the expired ones. If capacity was
    // lowered below the population the newest boids are dropped as well.
    // Returns how many boids were removed.
    pub fn age(boids: &mut Vec<Boid>, capacity: usize) -> usize {
        let before = boids.len();
        boids.retain_mut(Boid::age);

        if boids.len() > capacity {
            tracing::debug!(
                "Trimming {} boids above the new capacity of {capacity}",
                boids.len() - capacity
            );
            boids.truncate(capacity);
        }

        before - boids.len()
    }

    // Spawn a boid at a random position if the automatic gate allows it.
    // The gate is only consumed by a boid that actually spawns.
    pub fn auto_spawn(
        &mut self,
        boids: &mut Vec<Boid>,
        params: &SimulationParams,
        bounds: SurfaceBounds,
        now: Instant,
    ) -> SpawnOutcome {
        if params.paused {
            return SpawnOutcome::Paused;
        }
        if boids.len() >= params.capacity {
            return SpawnOutcome::AtCapacity;
        }
        if !self.auto_gate.try_pass(now, params.spawn_rate) {
            return SpawnOutcome::Gated;
        }

        let position = bounds.random_point(&mut rand::thread_rng());
        boids.push(Boid::new(position.x, position.y, params.lifespan_ticks));
        SpawnOutcome::Spawned
    }

    // Spawn a boid at `position` on request, whether paused or not. A request
    // that gets through the gate closes it even if capacity then drops it.
    pub fn manual_spawn(
        &mut self,
        boids: &mut Vec<Boid>,
        params: &SimulationParams,
        position: Point2,
        now: Instant,
    ) -> SpawnOutcome {
        if !self.manual_gate.try_pass(now, params.spawn_rate) {
            return SpawnOutcome::Gated;
        }
        if boids.len() >= params.capacity {
            tracing::trace!("Dropping spawn at ({}, {}), at capacity", position.x, position.y);
            return SpawnOutcome::AtCapacity;
        }

        boids.push(Boid::new(position.x, position.y, params.lifespan_ticks));
        SpawnOutcome::Spawned
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn params(capacity: usize, spawn_rate: f32) -> SimulationParams {
        SimulationParams {
            capacity,
            spawn_rate,
            ..SimulationParams::default()
        }
    }

    #[test]
    fn gate_opens_after_its_interval() {
        let start = Instant::now();
        let mut gate = SpawnGate::new(Duration::from_millis(1000));

        assert_eq!(gate.interval(10.0), Some(Duration::from_millis(100)));
        assert!(gate.try_pass(start, 10.0));
        assert!(!gate.try_pass(start + Duration::from_millis(99), 10.0));
        assert!(gate.try_pass(start + Duration::from_millis(100), 10.0));
    }

    #[test]
    fn impossible_rates_keep_the_gate_shut() {
        let gate = SpawnGate::new(Duration::from_millis(1000));
        for rate in [0.0, -3.0, f32::NAN] {
            assert_eq!(gate.interval(rate), None);
            assert!(!gate.is_open(Instant::now(), rate));
        }
    }

    #[test]
    fn manual_gate_is_ten_times_more_permissive() {
        let lifecycle = Lifecycle::new();
        let auto = lifecycle.auto_gate.interval(100.0).unwrap();
        let manual = lifecycle.manual_gate.interval(100.0).unwrap();
        assert_eq!(auto, manual * 10);
    }

    #[test]
    fn ageing_removes_expired_boids() {
        let mut boids = vec![Boid::new(1.0, 1.0, 1), Boid::new(2.0, 2.0, 3)];

        assert_eq!(Lifecycle::age(&mut boids, 10), 1);
        assert_eq!(boids.len(), 1);
        assert_eq!(boids[0].lifespan, 2);
    }

    #[test]
    fn ageing_enforces_a_lowered_capacity() {
        let mut boids: Vec<Boid> = (0..5).map(|_| Boid::new(1.0, 1.0, 10)).collect();

        assert_eq!(Lifecycle::age(&mut boids, 3), 2);
        assert_eq!(boids.len(), 3);
    }

    #[test]
    fn auto_spawn_respects_gate_capacity_and_pause() {
        let mut lifecycle = Lifecycle::new();
        let bounds = SurfaceBounds::new(100.0, 100.0);
        let start = Instant::now();
        let mut boids = Vec::new();
        let params = params(2, 10.0);

        assert_eq!(lifecycle.auto_spawn(&mut boids, &params, bounds, start), SpawnOutcome::Spawned);
        assert_eq!(lifecycle.auto_spawn(&mut boids, &params, bounds, start), SpawnOutcome::Gated);

        let later = start + Duration::from_millis(100);
        assert_eq!(lifecycle.auto_spawn(&mut boids, &params, bounds, later), SpawnOutcome::Spawned);

        let much_later = later + Duration::from_secs(1);
        assert_eq!(
            lifecycle.auto_spawn(&mut boids, &params, bounds, much_later),
            SpawnOutcome::AtCapacity
        );
        assert_eq!(boids.len(), 2);

        let paused = SimulationParams {
            paused: true,
            ..params
        };
        boids.clear();
        assert_eq!(
            lifecycle.auto_spawn(&mut boids, &paused, bounds, much_later),
            SpawnOutcome::Paused
        );
        assert!(boids.is_empty());
    }

    #[test]
    fn auto_spawned_boids_land_on_the_surface() {
        let mut lifecycle = Lifecycle::new();
        let bounds = SurfaceBounds::new(300.0, 200.0);
        let start = Instant::now();
        let mut boids = Vec::new();
        let params = params(100, 10.0);

        for i in 0..50 {
            let now = start + Duration::from_millis(100 * i);
            lifecycle.auto_spawn(&mut boids, &params, bounds, now);
        }

        assert_eq!(boids.len(), 50);
        for boid in &boids {
            assert!((0.0..=300.0).contains(&boid.position.x));
            assert!((0.0..=200.0).contains(&boid.position.y));
            assert_eq!(boid.lifespan, params.lifespan_ticks);
        }
    }

    #[test]
    fn manual_spawn_ignores_pause_but_not_capacity() {
        let mut lifecycle = Lifecycle::new();
        let start = Instant::now();
        let mut boids = Vec::new();
        let params = SimulationParams {
            paused: true,
            ..params(1, 10.0)
        };

        assert_eq!(
            lifecycle.manual_spawn(&mut boids, &params, pt2(5.0, 6.0), start),
            SpawnOutcome::Spawned
        );
        assert_eq!(boids[0].position, pt2(5.0, 6.0));

        let later = start + Duration::from_millis(10);
        assert_eq!(
            lifecycle.manual_spawn(&mut boids, &params, pt2(7.0, 8.0), later),
            SpawnOutcome::AtCapacity
        );
        assert_eq!(boids.len(), 1);
    }

    #[test]
    fn manual_spawns_are_rate_limited() {
        let mut lifecycle = Lifecycle::new();
        let start = Instant::now();
        let mut boids = Vec::new();
        let params = params(100, 10.0);

        assert_eq!(
            lifecycle.manual_spawn(&mut boids, &params, pt2(1.0, 1.0), start),
            SpawnOutcome::Spawned
        );
        assert_eq!(
            lifecycle.manual_spawn(&mut boids, &params, pt2(2.0, 2.0), start + Duration::from_millis(9)),
            SpawnOutcome::Gated
        );
        assert_eq!(
            lifecycle.manual_spawn(&mut boids, &params, pt2(3.0, 3.0), start + Duration::from_millis(10)),
            SpawnOutcome::Spawned
        );
        assert_eq!(boids.len(), 2);
    }
}
