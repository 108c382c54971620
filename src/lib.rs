/*
 * Charged Boids - Module Definitions
 *
 * This file defines the module structure for the charged boid simulation.
 * It organizes the code into logical components for better maintainability.
 */

use std::time::Duration;

// Re-export key components for easier access
pub use boid::Boid;
pub use debug::DebugInfo;
pub use input::{InputEvent, InputQueue};
pub use params::{ColorScheme, ParamUpdate, SimulationParams};
pub use renderer::{Painter, Scene};
pub use scheduler::{Clock, ManualClock, MonotonicClock, Scheduler, StopHandle, TickOutcome};
pub use simulation::{Simulation, TickReport};
pub use surface::SurfaceBounds;

// Define modules
pub mod app;
pub mod boid;
pub mod cli_args;
pub mod debug;
pub mod input;
pub mod lifecycle;
pub mod params;
pub mod physics;
pub mod renderer;
pub mod scheduler;
pub mod simulation;
pub mod surface;
pub mod ui;

// Constants
pub const BOID_RADIUS: f32 = 2.0;
pub const DRAG: f32 = 0.99;
pub const BOUNCE_FACTOR: f32 = -0.5;
pub const TICKS_PER_SECOND: u32 = 30;
pub const AUTO_SPAWN_WINDOW: Duration = Duration::from_millis(1000);
pub const MANUAL_SPAWN_WINDOW: Duration = Duration::from_millis(100);
