use std::f64::consts::PI;
use crate::config::StarfieldConfig;
use crate::constants::*;
use crate::rng::Xorshift64;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StarColor {
    WarmWhite,
    WarmAmber,
    CoolBlue,
}

pub const STAR_PALETTE: [StarColor; 3] = [StarColor::WarmWhite, StarColor::WarmAmber, StarColor::CoolBlue];

impl StarColor {
    pub fn rgb(self) -> (u8, u8, u8) {
        match self {
            StarColor::WarmWhite => (255, 255, 255),
            StarColor::WarmAmber => (255, 244, 200),
            StarColor::CoolBlue => (200, 220, 255),
        }
    }
}

/// Drawing calls a frame needs; the canvas surface in the browser, a recorder in tests.
pub trait Painter {
    fn clear(&mut self, w: f64, h: f64);
    fn fill_vertical_gradient(&mut self, w: f64, h: f64, top: &str, bottom: &str);
    fn fill_circle(&mut self, x: f64, y: f64, r: f64, color: StarColor, alpha: f64);
}

#[derive(Debug, Clone, PartialEq)]
pub struct Star {
    pub x: f64,
    pub y: f64,
    pub r: f64,
    pub base_alpha: f64,
    pub phase: f64,
    pub speed: f64,
    pub color: StarColor,
    pub vx: f64,
    pub vy: f64,
}

impl Star {
    fn random(w: f64, h: f64, rng: &mut Xorshift64) -> Self {
        let boost = if rng.next_f64() < BRIGHT_STAR_CHANCE { BRIGHT_STAR_BOOST } else { 0.0 };
        let r = rng.next_f64() * BASE_RADIUS + boost;
        Star {
            x: rng.next_f64() * w,
            y: rng.next_f64() * h,
            r,
            base_alpha: rng.next_f64() * BASE_ALPHA_SPAN + MIN_BASE_ALPHA,
            phase: rng.next_f64() * PI * 2.0,
            speed: rng.next_f64() * TWINKLE_SPEED_SPAN + MIN_TWINKLE_SPEED,
            color: STAR_PALETTE[rng.pick(STAR_PALETTE.len())],
            vx: (rng.next_f64() - 0.5) * DRIFT_SPAN_X,
            vy: (rng.next_f64() - 0.5) * DRIFT_SPAN_Y,
        }
    }

    pub fn alpha(&self) -> f64 {
        let wave = 0.5 + 0.5 * self.phase.sin();
        (self.base_alpha * (TWINKLE_FLOOR + TWINKLE_RANGE * wave)).clamp(0.0, 1.0)
    }

    fn advance(&mut self, dt: f64, w: f64, h: f64) {
        self.phase = (self.phase + self.speed * dt) % (PI * 2.0);
        self.x = wrap(self.x + self.vx * dt * DRIFT_STEP_PER_MS, w);
        self.y = wrap(self.y + self.vy * dt * DRIFT_STEP_PER_MS, h);
    }
}

// Modular wrap into [0, extent); leaving one edge re-enters at the other.
fn wrap(v: f64, extent: f64) -> f64 {
    let wrapped = v.rem_euclid(extent);
    // rem_euclid can round up to exactly `extent` for tiny negative inputs
    if wrapped >= extent { 0.0 } else { wrapped }
}

// Rebuilt from scratch on every resize
#[derive(Debug, Clone)]
pub struct StarField {
    w: f64,
    h: f64,
    stars: Vec<Star>,
}

impl StarField {
    pub fn generate(w: f64, h: f64, config: &StarfieldConfig, rng: &mut Xorshift64) -> Self {
        let w = w.max(1.0);
        let h = h.max(1.0);
        let count = config.star_count(w, h);
        let stars = (0..count).map(|_| Star::random(w, h, rng)).collect();
        Self { w, h, stars }
    }

    pub fn size(&self) -> (f64, f64) {
        (self.w, self.h)
    }

    #[cfg(test)]
    pub fn stars(&self) -> &[Star] {
        &self.stars
    }

    pub fn len(&self) -> usize {
        self.stars.len()
    }

    // dt in ms
    pub fn update(&mut self, dt: f64) {
        let (w, h) = (self.w, self.h);
        for star in self.stars.iter_mut() {
            star.advance(dt, w, h);
        }
    }

    pub fn draw(&self, painter: &mut impl Painter) {
        painter.clear(self.w, self.h);
        painter.fill_vertical_gradient(self.w, self.h, GRADIENT_TOP, GRADIENT_BOTTOM);
        for star in &self.stars {
            painter.fill_circle(star.x, star.y, star.r, star.color, star.alpha());
        }
    }

    pub fn tick(&mut self, dt: f64, painter: &mut impl Painter) {
        self.update(dt);
        self.draw(painter);
    }
}
