//! Shape rasterisers for game entities
//!
//! Everything is specified in world coordinates (800x600) and mapped onto
//! the canvas through a `Viewport`.

use glam::Vec2;
use std::f32::consts::TAU;

use super::canvas::{Canvas, Rgb};
use crate::consts::{MAX_BOOST, SCREEN_HEIGHT, SCREEN_WIDTH, TRAIL_LENGTH};
use crate::sim::{NeonColor, NeonGrid, Obstacle, Particle, Pickup, Player};

pub const GRID_LINE: Rgb = Rgb(20, 20, 50);
pub const GRID_HIGHLIGHT: Rgb = Rgb(40, 40, 100);
pub const METER_BACKGROUND: Rgb = Rgb(50, 50, 50);

pub fn neon_rgb(color: NeonColor) -> Rgb {
    match color {
        NeonColor::Cyan => Rgb(0, 255, 255),
        NeonColor::Magenta => Rgb(255, 0, 255),
        NeonColor::Yellow => Rgb(255, 255, 0),
        NeonColor::Lime => Rgb(0, 255, 0),
    }
}

/// Uniform world-to-canvas scale, letterboxed to keep the 4:3 playfield
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Viewport {
    pub scale: f32,
    pub offset: Vec2,
}

impl Viewport {
    pub fn fit(canvas_w: usize, canvas_h: usize) -> Self {
        let scale = (canvas_w as f32 / SCREEN_WIDTH).min(canvas_h as f32 / SCREEN_HEIGHT);
        let offset = Vec2::new(
            (canvas_w as f32 - SCREEN_WIDTH * scale) * 0.5,
            (canvas_h as f32 - SCREEN_HEIGHT * scale) * 0.5,
        );
        Self { scale, offset }
    }

    pub fn point(&self, world: Vec2) -> Vec2 {
        self.offset + world * self.scale
    }

    pub fn length(&self, world: f32) -> f32 {
        world * self.scale
    }

    /// Canvas rect for a world rect, at least one pixel in each direction
    fn rect(&self, pos: Vec2, size: Vec2) -> (i32, i32, i32, i32) {
        let p = self.point(pos);
        let s = size * self.scale;
        (
            p.x.floor() as i32,
            p.y.floor() as i32,
            s.x.round().max(1.0) as i32,
            s.y.round().max(1.0) as i32,
        )
    }
}

fn fill_world_rect(canvas: &mut Canvas, vp: &Viewport, pos: Vec2, size: Vec2, c: Rgb, alpha: f32) {
    if size.x <= 0.0 || size.y <= 0.0 {
        return;
    }
    let (x, y, w, h) = vp.rect(pos, size);
    canvas.fill_rect(x, y, w, h, c, alpha);
}

/// Clear the playfield and draw the scrolling grid with its horizon line
pub fn draw_grid(canvas: &mut Canvas, vp: &Viewport, grid: &NeonGrid) {
    canvas.clear(Rgb::BLACK);
    let cell = grid.cell_size;

    // Horizontal lines brighten toward the bottom of the screen
    let mut y = -cell;
    while y < SCREEN_HEIGHT + cell {
        let actual_y = y + grid.offset_y;
        if (0.0..SCREEN_HEIGHT).contains(&actual_y) {
            let distance = 1.0 - (actual_y - SCREEN_HEIGHT).abs() / SCREEN_HEIGHT;
            let c = GRID_LINE.lerp(GRID_HIGHLIGHT, distance);
            fill_world_rect(canvas, vp, Vec2::new(0.0, actual_y), Vec2::new(SCREEN_WIDTH, 1.0), c, 1.0);
        }
        y += cell;
    }

    let mut x = 0.0;
    while x <= SCREEN_WIDTH {
        fill_world_rect(canvas, vp, Vec2::new(x, 0.0), Vec2::new(1.0, SCREEN_HEIGHT), GRID_LINE, 1.0);
        x += cell;
    }

    let width = 3.0 + grid.pulse.sin() * 2.0;
    let horizon = Vec2::new(0.0, SCREEN_HEIGHT / 2.0 - width / 2.0);
    fill_world_rect(canvas, vp, horizon, Vec2::new(SCREEN_WIDTH, width), GRID_HIGHLIGHT, 1.0);
}

/// Fading trail circles, newest first
pub fn draw_trail(canvas: &mut Canvas, vp: &Viewport, player: &Player) {
    let color = neon_rgb(player.color);
    for (i, point) in player.trail.iter().enumerate() {
        let t = i as f32 / TRAIL_LENGTH as f32;
        let alpha = 1.0 - t;
        let radius = player.size.x / 3.0 * (1.0 - t);
        let center = vp.point(point.pos);
        canvas.fill_circle(center, vp.length(radius), color, alpha);
        if radius > 2.0 {
            canvas.fill_circle(center, vp.length(radius / 2.0), Rgb::WHITE, alpha * 0.5);
        }
    }
}

/// Triangle ship with glow, white core and boost meter below
pub fn draw_player(canvas: &mut Canvas, vp: &Viewport, player: &Player) {
    let color = neon_rgb(player.color);
    let Vec2 { x, y } = player.pos;
    let Vec2 { x: w, y: h } = player.size;

    let top = Vec2::new(x + w / 2.0, y);
    let left = Vec2::new(x, y + h);
    let right = Vec2::new(x + w, y + h);

    for i in (1..=3).rev() {
        let g = i as f32;
        canvas.fill_triangle(
            vp.point(top - Vec2::new(0.0, g * 2.0)),
            vp.point(left + Vec2::new(-g * 2.0, g)),
            vp.point(right + Vec2::new(g * 2.0, g)),
            color,
            (100.0 - g * 30.0) / 255.0,
        );
    }
    canvas.fill_triangle(vp.point(top), vp.point(left), vp.point(right), color, 1.0);
    canvas.fill_triangle(
        vp.point(Vec2::new(x + w / 2.0, y + 10.0)),
        vp.point(Vec2::new(x + 10.0, y + h - 10.0)),
        vp.point(Vec2::new(x + w - 10.0, y + h - 10.0)),
        Rgb::WHITE,
        1.0,
    );

    const METER_WIDTH: f32 = 50.0;
    const METER_HEIGHT: f32 = 5.0;
    let meter_pos = Vec2::new(x + (w - METER_WIDTH) / 2.0, y + h + 10.0);
    fill_world_rect(canvas, vp, meter_pos, Vec2::new(METER_WIDTH, METER_HEIGHT), METER_BACKGROUND, 1.0);
    let fill = METER_WIDTH * (player.boost_meter / MAX_BOOST);
    fill_world_rect(canvas, vp, meter_pos, Vec2::new(fill, METER_HEIGHT), boost_meter_color(player), 1.0);
}

/// Yellow while boosting, lime otherwise
pub fn boost_meter_color(player: &Player) -> Rgb {
    if player.is_boosting() {
        neon_rgb(NeonColor::Yellow)
    } else {
        neon_rgb(NeonColor::Lime)
    }
}

pub fn draw_obstacle(canvas: &mut Canvas, vp: &Viewport, obstacle: &Obstacle) {
    let color = neon_rgb(obstacle.color);
    let glow = 5.0 + 3.0 * obstacle.pulse;
    fill_world_rect(
        canvas,
        vp,
        obstacle.pos - Vec2::splat(glow),
        obstacle.size + Vec2::splat(glow * 2.0),
        color,
        100.0 / 255.0,
    );
    fill_world_rect(canvas, vp, obstacle.pos, obstacle.size, color, 1.0);
    fill_world_rect(
        canvas,
        vp,
        obstacle.pos + Vec2::splat(5.0),
        obstacle.size - Vec2::splat(10.0),
        Rgb::WHITE,
        150.0 / 255.0,
    );
}

pub fn draw_pickup(canvas: &mut Canvas, vp: &Viewport, pickup: &Pickup) {
    let color = neon_rgb(pickup.color);
    let radius = pickup.radius + (pickup.pulse.sin() * 3.0).trunc();
    let center = vp.point(pickup.pos);

    for i in (1..=3).rev() {
        let g = i as f32;
        canvas.fill_circle(center, vp.length(radius + g * 3.0), color, (70.0 - g * 20.0) / 255.0);
    }
    canvas.fill_circle(center, vp.length(radius), color, 1.0);
    canvas.fill_circle(center, vp.length((radius / 2.0).max(2.0)), Rgb::WHITE, 1.0);

    // One spoke per point for multi-point pickups
    if pickup.value > 1 {
        let spoke = radius + 5.0;
        for i in 0..pickup.value {
            let angle = i as f32 * TAU / pickup.value as f32;
            let dir = Vec2::from_angle(angle);
            let steps = vp.length(spoke).ceil().max(1.0) as i32;
            for s in 0..=steps {
                let p = center + dir * (s as f32);
                canvas.set(p.x.floor() as i32, p.y.floor() as i32, Rgb::WHITE);
            }
        }
    }
}

pub fn draw_particle(canvas: &mut Canvas, vp: &Viewport, particle: &Particle) {
    // Always covers at least one pixel center
    let radius = vp.length(particle.size).max(0.75);
    canvas.fill_circle(vp.point(particle.pos), radius, neon_rgb(particle.color), particle.alpha());
}
