/*
 * Boid Module
 *
 * This module defines the Boid struct: a single charged particle with a
 * position, a velocity and a limited number of ticks left to live.
 * Each tick a boid:
 * 1. Moves by its velocity
 * 2. Bounces off the edges of the surface, losing half its speed
 * 3. Slows down slightly from drag
 * 4. Is held to the maximum speed
 */

use nannou::prelude::*;
use rand::Rng;

use crate::surface::SurfaceBounds;
use crate::{BOID_RADIUS, BOUNCE_FACTOR, DRAG};

#[derive(Clone, Debug, PartialEq)]
pub struct Boid {
    pub position: Point2,
    pub velocity: Vec2,
    pub radius: f32,
    pub lifespan: u32, // Ticks left to live
}

impl Boid {
    pub fn new(x: f32, y: f32, lifespan: u32) -> Self {
        let mut rng = rand::thread_rng();

        // Random initial velocity, each component in [-1, 1]
        let vx = rng.gen_range(-1.0..=1.0);
        let vy = rng.gen_range(-1.0..=1.0);

        Self::with_velocity(pt2(x, y), vec2(vx, vy), lifespan)
    }

    pub fn with_velocity(position: Point2, velocity: Vec2, lifespan: u32) -> Self {
        Self {
            position,
            velocity,
            radius: BOID_RADIUS,
            lifespan,
        }
    }

    // Count down one tick of life, returns whether the boid is still alive
    pub fn age(&mut self) -> bool {
        self.lifespan = self.lifespan.saturating_sub(1);
        self.lifespan > 0
    }

    // Move, bounce, drag and limit speed, in that order
    pub fn integrate(&mut self, bounds: SurfaceBounds, max_speed: f32) {
        self.position += self.velocity;
        self.bounce_off_edges(bounds);
        self.velocity *= DRAG;
        self.limit_speed(max_speed);
    }

    // Reverse and dampen the velocity on any axis that left the surface, then
    // take a single corrective step along that axis
    pub fn bounce_off_edges(&mut self, bounds: SurfaceBounds) {
        if self.position.x < self.radius || self.position.x > bounds.width - self.radius {
            self.velocity.x *= BOUNCE_FACTOR;
            self.position.x += self.velocity.x;
        }

        if self.position.y < self.radius || self.position.y > bounds.height - self.radius {
            self.velocity.y *= BOUNCE_FACTOR;
            self.position.y += self.velocity.y;
        }
    }

    // Rescale to exactly `max_speed` when faster, slow boids are left alone
    pub fn limit_speed(&mut self, max_speed: f32) {
        let speed = self.velocity.length();
        if speed > max_speed && speed > 0.0 {
            self.velocity *= max_speed / speed;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn bounds() -> SurfaceBounds {
        SurfaceBounds::new(100.0, 100.0)
    }

    #[test]
    fn new_boids_start_slow_with_full_life() {
        for _ in 0..500 {
            let boid = Boid::new(10.0, 20.0, 90);
            assert_eq!(boid.position, pt2(10.0, 20.0));
            assert!(boid.velocity.x.abs() <= 1.0);
            assert!(boid.velocity.y.abs() <= 1.0);
            assert_eq!(boid.radius, BOID_RADIUS);
            assert_eq!(boid.lifespan, 90);
        }
    }

    #[test]
    fn ageing_counts_down_to_death() {
        let mut boid = Boid::new(0.0, 0.0, 2);
        assert!(boid.age());
        assert_eq!(boid.lifespan, 1);
        assert!(!boid.age());
        assert_eq!(boid.lifespan, 0);
    }

    #[test]
    fn bounce_reverses_and_halves_perpendicular_velocity() {
        // Crossing the right edge
        let mut boid = Boid::with_velocity(pt2(99.5, 50.0), vec2(4.0, 1.0), 10);
        boid.bounce_off_edges(bounds());
        assert_eq!(boid.velocity, vec2(-2.0, 1.0));
        assert_eq!(boid.position, pt2(97.5, 50.0));

        // Crossing the top edge
        let mut boid = Boid::with_velocity(pt2(50.0, 1.0), vec2(0.5, -3.0), 10);
        boid.bounce_off_edges(bounds());
        assert_eq!(boid.velocity, vec2(0.5, 1.5));
        assert_eq!(boid.position, pt2(50.0, 2.5));
    }

    #[test]
    fn bounce_leaves_boids_inside_alone() {
        let mut boid = Boid::with_velocity(pt2(50.0, 50.0), vec2(3.0, -3.0), 10);
        boid.bounce_off_edges(bounds());
        assert_eq!(boid.velocity, vec2(3.0, -3.0));
        assert_eq!(boid.position, pt2(50.0, 50.0));
    }

    #[test]
    fn integrate_applies_bounce_then_drag() {
        let mut boid = Boid::with_velocity(pt2(97.0, 50.0), vec2(2.0, 0.0), 10);
        boid.integrate(bounds(), 5.0);
        assert!((boid.velocity.x - (-1.0 * DRAG)).abs() < 1e-6);
        assert!((boid.position.x - 98.0).abs() < 1e-6);
    }

    #[test]
    fn speed_is_clamped_to_max_speed() {
        let mut boid = Boid::with_velocity(pt2(50.0, 50.0), vec2(30.0, 40.0), 10);
        boid.limit_speed(5.0);
        assert!((boid.velocity.length() - 5.0).abs() < 1e-5);
        assert!((boid.velocity - vec2(3.0, 4.0)).length() < 1e-5);
    }

    #[test]
    fn slow_boids_are_not_rescaled() {
        let mut boid = Boid::with_velocity(pt2(50.0, 50.0), vec2(0.3, -0.4), 10);
        boid.limit_speed(5.0);
        assert_eq!(boid.velocity, vec2(0.3, -0.4));
    }
}
