//! Pixel canvas with half-block terminal output
//!
//! Each terminal cell shows two vertically stacked pixels using the upper
//! half block glyph: foreground is the top pixel, background the bottom.

use std::io::{self, Write};

use crossterm::{
    cursor, queue,
    style::{self, Color},
};
use glam::Vec2;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Rgb(pub u8, pub u8, pub u8);

impl Rgb {
    pub const BLACK: Rgb = Rgb(0, 0, 0);
    pub const WHITE: Rgb = Rgb(255, 255, 255);

    /// Linear blend toward `other` by `t` in [0, 1]
    pub fn lerp(self, other: Rgb, t: f32) -> Rgb {
        let t = t.clamp(0.0, 1.0);
        let mix = |a: u8, b: u8| (a as f32 + (b as f32 - a as f32) * t).round() as u8;
        Rgb(mix(self.0, other.0), mix(self.1, other.1), mix(self.2, other.2))
    }

    /// Scale brightness by `f` in [0, 1]
    pub fn dim(self, f: f32) -> Rgb {
        Rgb::BLACK.lerp(self, f)
    }

    fn to_color(self) -> Color {
        Color::Rgb {
            r: self.0,
            g: self.1,
            b: self.2,
        }
    }
}

/// Row-major pixel buffer; height is twice the terminal row count
#[derive(Debug, Clone)]
pub struct Canvas {
    w: usize,
    h: usize,
    px: Vec<Rgb>,
}

impl Canvas {
    pub fn new(w: usize, h: usize) -> Self {
        Self {
            w,
            h,
            px: vec![Rgb::BLACK; w * h],
        }
    }

    pub fn width(&self) -> usize {
        self.w
    }

    pub fn height(&self) -> usize {
        self.h
    }

    pub fn resize(&mut self, w: usize, h: usize) {
        self.w = w;
        self.h = h;
        self.px.clear();
        self.px.resize(w * h, Rgb::BLACK);
    }

    pub fn clear(&mut self, c: Rgb) {
        self.px.fill(c);
    }

    pub fn get(&self, x: usize, y: usize) -> Rgb {
        self.px[y * self.w + x]
    }

    pub fn set(&mut self, x: i32, y: i32, c: Rgb) {
        if x >= 0 && y >= 0 && (x as usize) < self.w && (y as usize) < self.h {
            self.px[y as usize * self.w + x as usize] = c;
        }
    }

    /// Alpha-blend `c` over the existing pixel
    pub fn blend(&mut self, x: i32, y: i32, c: Rgb, alpha: f32) {
        if x >= 0 && y >= 0 && (x as usize) < self.w && (y as usize) < self.h {
            let i = y as usize * self.w + x as usize;
            self.px[i] = self.px[i].lerp(c, alpha);
        }
    }

    pub fn fill_rect(&mut self, x: i32, y: i32, w: i32, h: i32, c: Rgb, alpha: f32) {
        for dy in 0..h.max(0) {
            for dx in 0..w.max(0) {
                self.blend(x + dx, y + dy, c, alpha);
            }
        }
    }

    pub fn fill_circle(&mut self, center: Vec2, radius: f32, c: Rgb, alpha: f32) {
        if radius <= 0.0 {
            return;
        }
        let r2 = radius * radius;
        let (x0, x1) = ((center.x - radius).floor() as i32, (center.x + radius).ceil() as i32);
        let (y0, y1) = ((center.y - radius).floor() as i32, (center.y + radius).ceil() as i32);
        for y in y0..=y1 {
            for x in x0..=x1 {
                let d = Vec2::new(x as f32 + 0.5, y as f32 + 0.5) - center;
                if d.length_squared() <= r2 {
                    self.blend(x, y, c, alpha);
                }
            }
        }
    }

    /// Fill a triangle using edge functions at pixel centers
    pub fn fill_triangle(&mut self, a: Vec2, b: Vec2, c: Vec2, color: Rgb, alpha: f32) {
        let min = a.min(b).min(c).floor();
        let max = a.max(b).max(c).ceil();
        let edge = |p: Vec2, q: Vec2, r: Vec2| (q - p).perp_dot(r - p);
        let area = edge(a, b, c);
        if area.abs() < f32::EPSILON {
            return;
        }
        for y in min.y as i32..=max.y as i32 {
            for x in min.x as i32..=max.x as i32 {
                let p = Vec2::new(x as f32 + 0.5, y as f32 + 0.5);
                let w0 = edge(b, c, p) * area.signum();
                let w1 = edge(c, a, p) * area.signum();
                let w2 = edge(a, b, p) * area.signum();
                if w0 >= 0.0 && w1 >= 0.0 && w2 >= 0.0 {
                    self.blend(x, y, color, alpha);
                }
            }
        }
    }

    /// Darken the whole canvas (overlay screens)
    pub fn dim(&mut self, f: f32) {
        for p in &mut self.px {
            *p = p.dim(f);
        }
    }

    /// Queue the canvas as half-block cells starting at the top-left
    pub fn write_to(&self, out: &mut impl Write) -> io::Result<()> {
        queue!(out, cursor::MoveTo(0, 0))?;
        let rows = self.h / 2;
        let mut prev_fg: Option<Rgb> = None;
        let mut prev_bg: Option<Rgb> = None;

        for row in 0..rows {
            queue!(out, cursor::MoveTo(0, row as u16))?;
            for col in 0..self.w {
                let top = self.get(col, row * 2);
                let bot = self.get(col, row * 2 + 1);

                if prev_bg != Some(bot) {
                    queue!(out, style::SetBackgroundColor(bot.to_color()))?;
                    prev_bg = Some(bot);
                }
                if top == bot {
                    queue!(out, style::Print(' '))?;
                } else {
                    if prev_fg != Some(top) {
                        queue!(out, style::SetForegroundColor(top.to_color()))?;
                        prev_fg = Some(top);
                    }
                    queue!(out, style::Print('\u{2580}'))?; // ▀
                }
            }
        }
        queue!(out, style::ResetColor)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_set_ignores_out_of_bounds() {
        let mut canvas = Canvas::new(4, 4);
        canvas.set(-1, 0, Rgb::WHITE);
        canvas.set(4, 0, Rgb::WHITE);
        canvas.set(0, 4, Rgb::WHITE);
        assert!((0..4).all(|y| (0..4).all(|x| canvas.get(x, y) == Rgb::BLACK)));
    }

    #[test]
    fn test_blend_half() {
        let mut canvas = Canvas::new(1, 1);
        canvas.blend(0, 0, Rgb(200, 100, 0), 0.5);
        assert_eq!(canvas.get(0, 0), Rgb(100, 50, 0));
    }

    #[test]
    fn test_fill_rect_clipped() {
        let mut canvas = Canvas::new(4, 4);
        canvas.fill_rect(2, 2, 10, 10, Rgb::WHITE, 1.0);
        assert_eq!(canvas.get(3, 3), Rgb::WHITE);
        assert_eq!(canvas.get(1, 1), Rgb::BLACK);
    }

    #[test]
    fn test_fill_circle_center_and_corner() {
        let mut canvas = Canvas::new(10, 10);
        canvas.fill_circle(Vec2::new(5.0, 5.0), 3.0, Rgb::WHITE, 1.0);
        assert_eq!(canvas.get(5, 5), Rgb::WHITE);
        assert_eq!(canvas.get(0, 0), Rgb::BLACK);
    }

    #[test]
    fn test_fill_triangle_either_winding() {
        for (a, b, c) in [
            (Vec2::new(0.0, 0.0), Vec2::new(8.0, 0.0), Vec2::new(0.0, 8.0)),
            (Vec2::new(0.0, 0.0), Vec2::new(0.0, 8.0), Vec2::new(8.0, 0.0)),
        ] {
            let mut canvas = Canvas::new(10, 10);
            canvas.fill_triangle(a, b, c, Rgb::WHITE, 1.0);
            assert_eq!(canvas.get(1, 1), Rgb::WHITE);
            assert_eq!(canvas.get(7, 7), Rgb::BLACK);
        }
    }

    #[test]
    fn test_write_to_emits_half_blocks() {
        let mut canvas = Canvas::new(2, 2);
        canvas.set(0, 0, Rgb::WHITE);
        let mut out = Vec::new();
        canvas.write_to(&mut out).expect("write to memory");
        let text = String::from_utf8_lossy(&out);
        assert!(text.contains('\u{2580}'));
    }
}
