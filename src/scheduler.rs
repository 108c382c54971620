/*
 * Scheduler Module
 *
 * This module drives the simulation one tick per animation frame. The host
 * (nannou's update loop, or a test) decides when frames happen; each call to
 * Scheduler::tick reads the clock once, advances the simulation and renders
 * it, paused or not.
 *
 * The clock is pluggable so tests can step time by hand, and the loop can be
 * stopped from anywhere through a StopHandle.
 */

use std::cell::Cell;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::time::{Duration, Instant};

use crate::renderer::Painter;
use crate::simulation::{Simulation, TickReport};

pub trait Clock {
    fn now(&self) -> Instant;
}

// The real, monotonic clock
#[derive(Clone, Copy, Debug, Default)]
pub struct MonotonicClock;

impl Clock for MonotonicClock {
    fn now(&self) -> Instant {
        Instant::now()
    }
}

// A clock that only moves when told to
#[derive(Clone, Debug)]
pub struct ManualClock {
    now: Cell<Instant>,
}

impl Default for ManualClock {
    fn default() -> Self {
        Self::new()
    }
}

impl ManualClock {
    pub fn new() -> Self {
        Self {
            now: Cell::new(Instant::now()),
        }
    }

    pub fn advance(&self, by: Duration) {
        self.now.set(self.now.get() + by);
    }
}

impl Clock for ManualClock {
    fn now(&self) -> Instant {
        self.now.get()
    }
}

// Cancels the scheduler it came from, from any thread
#[derive(Clone, Debug, Default)]
pub struct StopHandle(Arc<AtomicBool>);

impl StopHandle {
    pub fn cancel(&self) {
        if !self.0.swap(true, Ordering::AcqRel) {
            tracing::info!("Stopping the simulation loop");
        }
    }

    pub fn is_cancelled(&self) -> bool {
        self.0.load(Ordering::Acquire)
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum TickOutcome {
    Ran(TickReport),
    Cancelled,
}

#[derive(Debug)]
pub struct Scheduler<C: Clock = MonotonicClock> {
    clock: C,
    stop: StopHandle,
    ticks: u64,
    last_tick: Option<Instant>,
    frame_time: Duration,
}

impl Default for Scheduler<MonotonicClock> {
    fn default() -> Self {
        Self::new(MonotonicClock)
    }
}

impl<C: Clock> Scheduler<C> {
    pub fn new(clock: C) -> Self {
        Self {
            clock,
            stop: StopHandle::default(),
            ticks: 0,
            last_tick: None,
            frame_time: Duration::ZERO,
        }
    }

    pub fn clock(&self) -> &C {
        &self.clock
    }

    pub fn stop_handle(&self) -> StopHandle {
        self.stop.clone()
    }

    pub fn is_cancelled(&self) -> bool {
        self.stop.is_cancelled()
    }

    // Completed ticks so far
    pub fn ticks(&self) -> u64 {
        self.ticks
    }

    // Time between the last two ticks
    pub fn frame_time(&self) -> Duration {
        self.frame_time
    }

    // Run one full tick: advance the simulation, then render it. Once
    // cancelled, nothing runs anymore.
    pub fn tick<P: Painter>(&mut self, sim: &mut Simulation, painter: &mut P) -> TickOutcome {
        if self.stop.is_cancelled() {
            return TickOutcome::Cancelled;
        }

        let now = self.clock.now();
        self.frame_time = self
            .last_tick
            .map_or(Duration::ZERO, |last| now.saturating_duration_since(last));
        self.last_tick = Some(now);

        let report = sim.step(now);
        sim.render(painter);

        self.ticks += 1;
        TickOutcome::Ran(report)
    }
}

impl Scheduler<ManualClock> {
    // Move the clock on by `frame` and run a tick
    pub fn advance_and_tick<P: Painter>(
        &mut self,
        sim: &mut Simulation,
        painter: &mut P,
        frame: Duration,
    ) -> TickOutcome {
        self.clock.advance(frame);
        self.tick(sim, painter)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::params::SimulationParams;
    use crate::renderer::Scene;
    use crate::surface::SurfaceBounds;

    fn sim() -> Simulation {
        Simulation::new(SimulationParams::default(), SurfaceBounds::new(200.0, 200.0))
    }

    #[test]
    fn manual_clock_moves_only_when_told() {
        let clock = ManualClock::new();
        let start = clock.now();
        assert_eq!(clock.now(), start);
        clock.advance(Duration::from_millis(40));
        assert_eq!(clock.now() - start, Duration::from_millis(40));
    }

    #[test]
    fn ticks_render_every_time() {
        let mut scheduler = Scheduler::new(ManualClock::new());
        let mut sim = sim();
        let mut scene = Scene::default();

        for _ in 0..5 {
            let outcome = scheduler.advance_and_tick(&mut sim, &mut scene, Duration::from_millis(33));
            assert!(matches!(outcome, TickOutcome::Ran(_)));
        }

        assert_eq!(scheduler.ticks(), 5);
        assert_eq!(scene.frames, 5);
        assert_eq!(scheduler.frame_time(), Duration::from_millis(33));
    }

    #[test]
    fn cancelled_scheduler_stops_ticking() {
        let mut scheduler = Scheduler::new(ManualClock::new());
        let mut sim = sim();
        let mut scene = Scene::default();
        let stop = scheduler.stop_handle();

        scheduler.tick(&mut sim, &mut scene);
        stop.cancel();
        stop.cancel();

        assert!(scheduler.is_cancelled());
        for _ in 0..3 {
            assert_eq!(scheduler.tick(&mut sim, &mut scene), TickOutcome::Cancelled);
        }
        assert_eq!(scheduler.ticks(), 1);
        assert_eq!(scene.frames, 1);
    }

    #[test]
    fn stop_handle_works_across_threads() {
        let scheduler = Scheduler::new(ManualClock::new());
        let stop = scheduler.stop_handle();

        std::thread::spawn(move || stop.cancel())
            .join()
            .unwrap();

        assert!(scheduler.is_cancelled());
    }
}
