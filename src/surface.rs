/*
 * Surface Module
 *
 * This module defines the SurfaceBounds struct describing the drawable area
 * the particles live in. Simulation space has its origin in the top-left
 * corner with y growing downwards, while nannou windows are centred with y
 * growing upwards, so it also provides the transformations between the two.
 */

use nannou::prelude::*;
use rand::Rng;
use serde::{Deserialize, Serialize};

#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct SurfaceBounds {
    pub width: f32,
    pub height: f32,
}

impl Default for SurfaceBounds {
    fn default() -> Self {
        Self {
            width: 1024.0,
            height: 768.0,
        }
    }
}

impl SurfaceBounds {
    pub fn new(width: f32, height: f32) -> Self {
        Self { width, height }
    }

    // Uniformly random point inside the surface. Scaling a unit sample keeps
    // this well defined for a zero-sized surface, unlike `gen_range`.
    pub fn random_point<R: Rng + ?Sized>(&self, rng: &mut R) -> Vec2 {
        vec2(rng.gen::<f32>() * self.width, rng.gen::<f32>() * self.height)
    }

    // Convert a point from surface space to window (screen) space
    pub fn to_screen(&self, point: Vec2, window_rect: Rect) -> Vec2 {
        vec2(window_rect.left() + point.x, window_rect.top() - point.y)
    }

    // Convert a point from window (screen) space to surface space
    pub fn to_surface(&self, point: Vec2, window_rect: Rect) -> Vec2 {
        vec2(point.x - window_rect.left(), window_rect.top() - point.y)
    }
}
