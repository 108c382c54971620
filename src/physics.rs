/*
 * Physics Module
 *
 * This module handles the force and integration step of the simulation.
 * Every boid is pushed away from each other boid closer than the repulsion
 * distance and pulled towards each other boid closer than the attraction
 * distance. Both ranges may overlap, in which case both forces apply.
 *
 * Boids are updated one after another in place, so a boid sees the already
 * updated positions of the boids before it in the store.
 */

use nannou::prelude::*;

use crate::boid::Boid;
use crate::params::SimulationParams;
use crate::surface::SurfaceBounds;

// Velocity change caused by a single neighbour. `delta` points from the boid
// towards the neighbour. Coincident boids have no direction and so no force.
pub fn pair_force(
    delta: Vec2,
    distance: f32,
    repulsion_distance: f32,
    attraction_distance: f32,
) -> Vec2 {
    if distance <= 0.0 {
        return Vec2::ZERO;
    }

    let direction = delta / distance;
    let mut force = Vec2::ZERO;

    if distance < repulsion_distance {
        force -= direction;
    }
    if distance < attraction_distance {
        force += direction;
    }

    force
}

// Sum of the forces from every other boid acting on the boid at `index`
pub fn accumulate_forces(boids: &[Boid], index: usize, params: &SimulationParams) -> Vec2 {
    let position = boids[index].position;

    boids
        .iter()
        .enumerate()
        .filter(|&(other_index, _)| other_index != index)
        .fold(Vec2::ZERO, |force, (_, other)| {
            let delta = other.position - position;
            force
                + pair_force(
                    delta,
                    delta.length(),
                    params.repulsion_distance,
                    params.attraction_distance,
                )
        })
}

// Run the force and integration step over every boid in `boids`, O(n²)
pub fn update_boids(boids: &mut [Boid], params: &SimulationParams, bounds: SurfaceBounds) {
    for i in 0..boids.len() {
        let force = accumulate_forces(boids, i, params);

        let boid = &mut boids[i];
        boid.velocity += force;
        boid.integrate(bounds, params.max_speed);
    }
}
