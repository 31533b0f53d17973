//! Terminal renderer
//!
//! Consumes read-only [`Snapshot`]s and never feeds anything back into the
//! simulation. The world is scaled uniformly to fit the terminal and
//! centered; the rest of the screen is letterboxed.

pub mod clouds;
pub mod font;
pub mod pixels;

use std::io::{self, Write};

use clouds::Clouds;
use font::{draw_text, draw_text_centered, text_height, text_width};
use pixels::{PixelBuf, Rgb};

use crate::config::Tuning;
use crate::sim::{Bird, PhaseKind, Rect, Snapshot};

// ── Colors ──────────────────────────────────────────────────────────────────

const LETTERBOX: Rgb = Rgb(18, 18, 28);
const SKY_TOP: Rgb = Rgb(70, 180, 200);
const SKY_BOT: Rgb = Rgb(190, 232, 245);
const CLOUD: Rgb = Rgb(255, 255, 255);
const GRASS: Rgb = Rgb(84, 168, 55);
const GRASS_LIGHT: Rgb = Rgb(110, 200, 70);
const DIRT: Rgb = Rgb(210, 185, 110);
const DIRT_DARK: Rgb = Rgb(185, 160, 90);
const PIPE_L: Rgb = Rgb(74, 122, 26);
const PIPE_M: Rgb = Rgb(100, 170, 40);
const PIPE_R: Rgb = Rgb(115, 191, 46);
const PIPE_HI: Rgb = Rgb(145, 215, 62);
const CAP_DARK: Rgb = Rgb(60, 100, 20);
const BIRD_Y: Rgb = Rgb(245, 200, 66);
const BIRD_HI: Rgb = Rgb(255, 225, 100);
const BIRD_WING: Rgb = Rgb(215, 165, 35);
const BIRD_EYE: Rgb = Rgb(255, 255, 255);
const BIRD_PUPIL: Rgb = Rgb(20, 20, 20);
const BIRD_BEAK: Rgb = Rgb(225, 75, 35);
const BIRD_BEAK_HI: Rgb = Rgb(240, 110, 50);
const PANEL: Rgb = Rgb(220, 195, 120);
const PANEL_EDGE: Rgb = Rgb(30, 30, 30);
const WHITE: Rgb = Rgb(255, 255, 255);

/// Pipe cap overhang and height, world units
const CAP_OVERHANG: f64 = 6.0;
const CAP_HEIGHT: f64 = 20.0;
/// Grass band on top of the ground, world units
const GRASS_DEPTH: f64 = 8.0;

/// Where the world lands in the pixel buffer.
#[derive(Debug, Clone, Copy, PartialEq)]
struct Viewport {
    x0: i32,
    y0: i32,
    w: i32,
    h: i32,
    scale: f64,
}

impl Viewport {
    fn fit(pw: usize, ph: usize, tuning: &Tuning) -> Self {
        let scale = (pw as f64 / tuning.world_width).min(ph as f64 / tuning.world_height);
        let w = (tuning.world_width * scale).round() as i32;
        let h = (tuning.world_height * scale).round() as i32;
        Self {
            x0: (pw as i32 - w) / 2,
            y0: (ph as i32 - h) / 2,
            w,
            h,
            scale,
        }
    }

    fn px(&self, wx: f64) -> i32 {
        self.x0 + (wx * self.scale).round() as i32
    }

    fn py(&self, wy: f64) -> i32 {
        self.y0 + (wy * self.scale).round() as i32
    }

    /// World coordinates of a pixel center.
    fn world(&self, px: i32, py: i32) -> (f64, f64) {
        (
            (px - self.x0) as f64 / self.scale + 0.5 / self.scale,
            (py - self.y0) as f64 / self.scale + 0.5 / self.scale,
        )
    }

    /// Pixel span of a world rect, clipped to the viewport: (x0, y0, x1, y1).
    fn clip(&self, r: &Rect) -> (i32, i32, i32, i32) {
        (
            self.px(r.x).max(self.x0),
            self.py(r.y).max(self.y0),
            self.px(r.right()).min(self.x0 + self.w),
            self.py(r.bottom()).min(self.y0 + self.h),
        )
    }

    /// Pixel bounding box of a world circle, clipped.
    fn circle_box(&self, cx: f64, cy: f64, r: f64) -> (i32, i32, i32, i32) {
        self.clip(&Rect::new(cx - r, cy - r, r * 2.0, r * 2.0))
    }

    /// Glyph pixel size for HUD text.
    fn zoom(&self) -> i32 {
        ((self.scale * 8.0).round() as i32).max(1)
    }
}

pub struct Renderer {
    buf: PixelBuf,
    view: Viewport,
    tuning: Tuning,
    clouds: Clouds,
    frame: u64,
}

impl Renderer {
    /// `cols` x `rows` terminal cells; each cell is two pixels tall.
    pub fn new(cols: u16, rows: u16, tuning: &Tuning, seed: u64) -> Self {
        let (pw, ph) = (cols as usize, rows as usize * 2);
        Self {
            buf: PixelBuf::new(pw, ph, LETTERBOX),
            view: Viewport::fit(pw, ph, tuning),
            tuning: *tuning,
            clouds: Clouds::new(tuning.world_width, seed),
            frame: 0,
        }
    }

    pub fn resize(&mut self, cols: u16, rows: u16) {
        let (pw, ph) = (cols as usize, rows as usize * 2);
        log::trace!("resize to {pw}x{ph} px");
        self.buf.resize(pw, ph, LETTERBOX);
        self.view = Viewport::fit(pw, ph, &self.tuning);
    }

    pub fn buffer(&self) -> &PixelBuf {
        &self.buf
    }

    /// Compose one frame. Decoration keeps moving even when the run is over.
    pub fn draw(&mut self, snap: &Snapshot<'_>) {
        self.frame += 1;
        self.clouds.update();

        self.buf.fill(LETTERBOX);
        self.draw_sky(snap.tuning);
        self.draw_clouds();
        self.draw_pipes(snap);
        self.draw_ground(snap);
        self.draw_bird(snap.bird, snap.tuning);
        self.draw_score(snap);

        if snap.phase == PhaseKind::GameOver {
            self.draw_game_over(snap);
        }
    }

    pub fn present(&self, out: &mut impl Write) -> io::Result<()> {
        self.buf.render(out)
    }

    fn draw_sky(&mut self, tuning: &Tuning) {
        let v = self.view;
        let top = v.y0;
        let bottom = v.py(tuning.ground_top());
        for y in top..bottom {
            let t = ((y - top) * 256 / (bottom - top).max(1)) as u16;
            self.buf
                .fill_rect(v.x0, y, v.w, 1, Rgb::lerp(SKY_TOP, SKY_BOT, t));
        }
    }

    fn draw_clouds(&mut self) {
        let v = self.view;
        for cloud in self.clouds.iter() {
            for puff in &cloud.puffs {
                let (cx, cy) = (cloud.x + puff.dx, cloud.y + puff.dy);
                fill_circle(&mut self.buf, &v, cx, cy, puff.radius, CLOUD, 191);
                let (ix, iy) = (cloud.x + puff.dx * 0.95, cloud.y + puff.dy * 0.92);
                fill_circle(&mut self.buf, &v, ix, iy, puff.radius * 0.7, CLOUD, 110);
            }
        }
    }

    fn draw_pipes(&mut self, snap: &Snapshot<'_>) {
        let t = snap.tuning;
        let v = self.view;
        for pipe in snap.pipes {
            let top = pipe.top_rect(t);
            let bottom = pipe.bottom_rect(t);
            let cap_x = pipe.x - CAP_OVERHANG;
            let cap_w = t.pipe_width + CAP_OVERHANG * 2.0;

            let top_body = Rect::new(top.x, top.y, top.w, (top.h - CAP_HEIGHT).max(0.0));
            let top_cap = Rect::new(cap_x, top.bottom() - CAP_HEIGHT, cap_w, CAP_HEIGHT);
            let bottom_cap = Rect::new(cap_x, bottom.y, cap_w, CAP_HEIGHT);
            let bottom_body = Rect::new(
                bottom.x,
                bottom.y + CAP_HEIGHT,
                bottom.w,
                (bottom.h - CAP_HEIGHT).max(0.0),
            );

            for body in [top_body, bottom_body] {
                fill_shaded(&mut self.buf, &v, &body);
            }
            for cap in [top_cap, bottom_cap] {
                fill_shaded(&mut self.buf, &v, &cap);
                let (x0, y0, x1, y1) = v.clip(&cap);
                if x1 > x0 && y1 > y0 {
                    self.buf.fill_rect(x0, y0, x1 - x0, 1, CAP_DARK);
                    self.buf.fill_rect(x0, y1 - 1, x1 - x0, 1, CAP_DARK);
                }
            }
        }
    }

    fn draw_ground(&mut self, snap: &Snapshot<'_>) {
        let t = snap.tuning;
        let v = self.view;
        let (x0, y0, x1, y1) = v.clip(&Rect::new(0.0, t.ground_top(), t.world_width, t.ground_height));
        let segments = [snap.ground.x1, snap.ground.x2];
        for px in x0..x1 {
            for py in y0..y1 {
                let (wx, wy) = v.world(px, py);
                // Local x within whichever segment covers this column
                let Some(u) = segments
                    .iter()
                    .find(|&&s| wx >= s && wx < s + t.world_width)
                    .map(|s| wx - s)
                else {
                    continue;
                };
                let depth = wy - t.ground_top();
                let c = if depth < GRASS_DEPTH {
                    if (u / 12.0) as i32 % 2 == 0 { GRASS } else { GRASS_LIGHT }
                } else if ((u + depth * 2.0) as i32).rem_euclid(24) < 12 {
                    DIRT
                } else {
                    DIRT_DARK
                };
                self.buf.set(px, py, c);
            }
        }
    }

    fn draw_bird(&mut self, bird: &Bird, tuning: &Tuning) {
        let v = self.view;
        let r = tuning.bird_radius;
        let wing_up = bird.alive && (bird.velocity < -1.5 || (self.frame / 8) % 2 == 0);
        let (sin, cos) = bird.angle.to_radians().sin_cos();

        let (x0, y0, x1, y1) = v.circle_box(bird.x, bird.y, r * 1.7);
        for px in x0..x1 {
            for py in y0..y1 {
                let (wx, wy) = v.world(px, py);
                let (dx, dy) = (wx - bird.x, wy - bird.y);
                // Undo the tilt to get body-local coordinates
                let u = (dx * cos + dy * sin) / r;
                let w = (-dx * sin + dy * cos) / r;
                if let Some(c) = bird_color(u, w, wing_up) {
                    self.buf.set(px, py, c);
                }
            }
        }
    }

    fn draw_score(&mut self, snap: &Snapshot<'_>) {
        let v = self.view;
        let zoom = v.zoom();
        let cx = v.px(snap.tuning.world_width / 2.0);
        let y = v.py(80.0) - text_height(zoom) / 2;
        draw_text_centered(&mut self.buf, cx, y, &snap.score.current.to_string(), zoom, WHITE);

        // Session best sits on the ground strip, out of the way of the score
        let hi = format!("HI {}", snap.score.high);
        let small = (zoom / 2).max(1);
        let ground_mid = snap.tuning.ground_top() + snap.tuning.ground_height / 2.0;
        let hy = v.py(ground_mid) - text_height(small) / 2;
        draw_text(&mut self.buf, v.px(12.0), hy, &hi, small, WHITE);
    }

    fn draw_game_over(&mut self, snap: &Snapshot<'_>) {
        let v = self.view;
        for y in v.y0..v.y0 + v.h {
            for x in v.x0..v.x0 + v.w {
                let c = self.buf.get(x, y);
                self.buf.set(x, y, c.darken());
            }
        }

        let zoom = v.zoom();
        let small = (zoom / 2).max(1);
        let panel_w = (280.0 * v.scale).round().max(20.0) as i32;
        let score = snap.score.current.to_string();
        let best = snap.score.high.to_string();
        let lines = [
            ("GAME OVER", zoom, WHITE),
            (score.as_str(), zoom, WHITE),
            (best.as_str(), zoom, BIRD_Y),
            ("SPACE TO RETRY", small, WHITE),
        ];
        // Drop captions that do not fit; the numbers always show
        let lines: Vec<_> = lines
            .into_iter()
            .filter(|(text, z, _)| {
                text.chars().all(|c| c.is_ascii_digit()) || text_width(text, *z) + 2 <= panel_w
            })
            .collect();

        let gap = zoom * 2;
        let pad = zoom * 2;
        let content_h: i32 =
            lines.iter().map(|(_, z, _)| text_height(*z)).sum::<i32>() + gap * (lines.len() as i32 - 1);
        let panel_h = content_h + pad * 2;
        let cx = v.x0 + v.w / 2;
        let px = cx - panel_w / 2;
        let py = v.y0 + (v.h - panel_h) / 2;

        self.buf
            .fill_rect(px - 1, py - 1, panel_w + 2, panel_h + 2, PANEL_EDGE);
        self.buf.fill_rect(px, py, panel_w, panel_h, DIRT);
        self.buf
            .fill_rect(px + 1, py + 1, panel_w - 2, panel_h - 2, PANEL);

        let mut y = py + pad;
        for (text, z, color) in lines {
            draw_text_centered(&mut self.buf, cx, y, text, z, color);
            y += text_height(z) + gap;
        }
    }
}

/// Body-local bird shape, coordinates in units of the bird radius with the
/// beak pointing toward +u.
fn bird_color(u: f64, v: f64, wing_up: bool) -> Option<Rgb> {
    let in_ellipse = |cu: f64, cv: f64, ru: f64, rv: f64| {
        let (a, b) = ((u - cu) / ru, (v - cv) / rv);
        a * a + b * b <= 1.0
    };

    // Pupil, eye, beak, wing over the body; tail behind it
    if in_ellipse(0.6, -0.35, 0.14, 0.14) {
        return Some(BIRD_PUPIL);
    }
    if in_ellipse(0.5, -0.35, 0.3, 0.3) {
        return Some(BIRD_EYE);
    }
    // Triangle from the face to the tip at (1.6, 0.1)
    if (0.85..=1.6).contains(&u) {
        let half = 0.3 * (1.6 - u) / 0.75;
        if (v - 0.1).abs() <= half {
            return Some(if v < 0.1 { BIRD_BEAK_HI } else { BIRD_BEAK });
        }
    }
    let wing_v = if wing_up { -0.15 } else { 0.25 };
    if in_ellipse(-0.4, wing_v, 0.55, 0.3) {
        return Some(BIRD_WING);
    }
    if in_ellipse(0.0, 0.0, 1.15, 0.95) {
        return Some(if v < -0.6 { BIRD_HI } else { BIRD_Y });
    }
    if (-1.45..=-1.0).contains(&u) && (-0.2..=0.15).contains(&v) {
        return Some(BIRD_WING);
    }
    None
}

fn pipe_shade(x: i32, total_w: i32) -> Rgb {
    if total_w <= 1 {
        return PIPE_M;
    }
    let t = (x.clamp(0, total_w - 1) as f64 / (total_w - 1) as f64 * 256.0) as u16;
    if t < 64 {
        Rgb::lerp(PIPE_L, PIPE_M, (t * 4).min(256))
    } else if t < 100 {
        Rgb::lerp(PIPE_M, PIPE_HI, ((t - 64) * 7).min(256))
    } else if t < 160 {
        Rgb::lerp(PIPE_HI, PIPE_R, ((t - 100) * 4).min(256))
    } else {
        Rgb::lerp(PIPE_R, PIPE_L, ((t - 160) * 3).min(256))
    }
}

/// Fill a world rect with the cylindrical pipe shading, clipped to the view.
fn fill_shaded(buf: &mut PixelBuf, v: &Viewport, r: &Rect) {
    let (x0, y0, x1, y1) = v.clip(r);
    let left = v.px(r.x);
    let total = v.px(r.right()) - left;
    for x in x0..x1 {
        let c = pipe_shade(x - left, total);
        for y in y0..y1 {
            buf.set(x, y, c);
        }
    }
}

fn fill_circle(buf: &mut PixelBuf, v: &Viewport, cx: f64, cy: f64, r: f64, c: Rgb, alpha_256: u16) {
    let (x0, y0, x1, y1) = v.circle_box(cx, cy, r);
    for px in x0..x1 {
        for py in y0..y1 {
            let (wx, wy) = v.world(px, py);
            if (wx - cx).powi(2) + (wy - cy).powi(2) <= r * r {
                buf.blend(px, py, c, alpha_256);
            }
        }
    }
}
