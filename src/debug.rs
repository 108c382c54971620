/*
 * Debug Information Module
 *
 * This module defines the DebugInfo struct that contains performance metrics
 * and other debug information to be displayed in the UI.
 *
 * Includes metrics for:
 * - FPS (frames per second)
 * - Frame time
 * - Population against capacity
 * - Boids spawned, expired and refused in the last tick
 */

use std::time::Duration;

use crate::simulation::TickReport;

// Debug information to display
#[derive(Clone, Debug, Default)]
pub struct DebugInfo {
    pub fps: f32,
    pub frame_time: Duration,
    pub ticks: u64,
    pub population: usize,
    pub spawned: usize,
    pub expired: usize,
    pub dropped: usize,
    pub total_spawned: u64,
    pub total_expired: u64,
}

impl DebugInfo {
    // Fold the result of one tick into the running figures
    pub fn record(&mut self, report: &TickReport, frame_time: Duration, ticks: u64) {
        self.frame_time = frame_time;
        self.ticks = ticks;
        self.population = report.population;
        self.spawned = report.spawned;
        self.expired = report.expired;
        self.dropped = report.dropped;
        self.total_spawned += report.spawned as u64;
        self.total_expired += report.expired as u64;
    }
}
