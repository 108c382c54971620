/*
 * Renderer Module
 *
 * This module handles the rendering of the simulation. The render step
 * clears the surface to the color scheme's background and draws every boid
 * as a disc with a soft drop shadow. It only reads the boids.
 *
 * Drawing goes through the Painter trait. Each tick the scheduler paints
 * into a Scene, a retained list of shapes, and nannou's view callback then
 * replays that Scene onto the window.
 */

use nannou::prelude::*;

use crate::boid::Boid;
use crate::params::ColorScheme;
use crate::surface::SurfaceBounds;

// How many translucent rings approximate the shadow's blur
const SHADOW_LAYERS: u32 = 3;

// A drop shadow, offset in surface space
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Shadow {
    pub offset: (f32, f32),
    pub blur: f32,
    pub alpha: f32,
}

pub const SOFT_SHADOW: Shadow = Shadow {
    offset: (0.0, 3.0),
    blur: 5.0,
    alpha: 0.4,
};

pub trait Painter {
    // Fill the whole surface with one color
    fn clear(&mut self, colour: Rgb<u8>);
    // A filled disc centred at `centre` in surface space
    fn disc(&mut self, centre: Point2, radius: f32, fill: Rgb<u8>, shadow: Shadow);
}

pub fn background(scheme: ColorScheme) -> Rgb<u8> {
    match scheme {
        ColorScheme::Default => rgb(0x33, 0x68, 0xF6),
        ColorScheme::Alternative => rgb(255, 255, 255),
    }
}

pub fn foreground(scheme: ColorScheme) -> Rgb<u8> {
    match scheme {
        ColorScheme::Default => rgb(255, 255, 255),
        ColorScheme::Alternative => rgb(0, 0, 0),
    }
}

// The render step
pub fn render<P: Painter>(boids: &[Boid], scheme: ColorScheme, painter: &mut P) {
    painter.clear(background(scheme));

    let fill = foreground(scheme);
    for boid in boids {
        painter.disc(boid.position, boid.radius, fill, SOFT_SHADOW);
    }
}

#[derive(Clone, Debug)]
pub struct Disc {
    pub centre: Point2,
    pub radius: f32,
    pub fill: Rgb<u8>,
    pub shadow: Shadow,
}

// The shapes of one rendered frame
#[derive(Clone, Debug, Default)]
pub struct Scene {
    pub background: Option<Rgb<u8>>,
    pub discs: Vec<Disc>,
    pub frames: u64, // How many times the scene has been cleared
}

impl Painter for Scene {
    fn clear(&mut self, colour: Rgb<u8>) {
        self.background = Some(colour);
        self.discs.clear();
        self.frames += 1;
    }

    fn disc(&mut self, centre: Point2, radius: f32, fill: Rgb<u8>, shadow: Shadow) {
        self.discs.push(Disc {
            centre,
            radius,
            fill,
            shadow,
        });
    }
}

impl Scene {
    // Replay the scene onto a nannou Draw
    pub fn paint(&self, draw: &Draw, bounds: SurfaceBounds, window_rect: Rect) {
        if let Some(colour) = self.background {
            draw.background().color(colour);
        }

        for disc in &self.discs {
            let (offset_x, offset_y) = disc.shadow.offset;
            let shadow_centre = bounds.to_screen(
                disc.centre + vec2(offset_x, offset_y),
                window_rect,
            );

            // Widest and faintest ring first
            for layer in (1..=SHADOW_LAYERS).rev() {
                let spread = disc.shadow.blur * layer as f32 / SHADOW_LAYERS as f32;
                draw.ellipse()
                    .xy(shadow_centre)
                    .radius(disc.radius + spread * 0.5)
                    .color(rgba(0.0, 0.0, 0.0, disc.shadow.alpha / SHADOW_LAYERS as f32));
            }

            draw.ellipse()
                .xy(bounds.to_screen(disc.centre, window_rect))
                .radius(disc.radius)
                .color(disc.fill);
        }
    }
}
