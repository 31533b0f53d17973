//! Parallax cloud decoration
//!
//! Owned by the renderer and driven by its own RNG, so it never touches the
//! simulation.

use rand::{Rng, SeedableRng};
use rand_pcg::Pcg32;

/// (speed, base radius, base height) per layer, far to near
const LAYERS: [(f64, f64, f64); 3] = [(0.25, 56.0, 60.0), (0.4, 48.0, 110.0), (0.65, 36.0, 160.0)];
const CLOUDS_PER_LAYER: usize = 3;

/// A circle making up part of a cloud, relative to the cloud center.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Puff {
    pub dx: f64,
    pub dy: f64,
    pub radius: f64,
}

#[derive(Debug, Clone, PartialEq)]
pub struct Cloud {
    pub x: f64,
    pub y: f64,
    pub base_radius: f64,
    pub speed: f64,
    pub puffs: Vec<Puff>,
}

impl Cloud {
    pub fn width(&self) -> f64 {
        self.base_radius * 3.5
    }
}

pub struct Clouds {
    clouds: Vec<Cloud>,
    world_width: f64,
    rng: Pcg32,
}

impl Clouds {
    pub fn new(world_width: f64, seed: u64) -> Self {
        let mut rng = Pcg32::seed_from_u64(seed);
        let mut clouds = Vec::with_capacity(LAYERS.len() * CLOUDS_PER_LAYER);
        for (speed, base_radius, base_y) in LAYERS {
            for _ in 0..CLOUDS_PER_LAYER {
                let radius = rng.random_range(base_radius * 0.85..=base_radius * 1.15);
                let x = rng.random_range(0.0..=world_width);
                let y = rng.random_range(base_y - 20.0..=base_y + 40.0);
                let puffs = puffs(&mut rng, radius);
                clouds.push(Cloud {
                    x,
                    y,
                    base_radius: radius,
                    speed,
                    puffs,
                });
            }
        }
        Self {
            clouds,
            world_width,
            rng,
        }
    }

    pub fn iter(&self) -> impl Iterator<Item = &Cloud> {
        self.clouds.iter()
    }

    /// Drift left; a cloud that leaves re-enters on the right at a new height.
    pub fn update(&mut self) {
        for cloud in &mut self.clouds {
            cloud.x -= cloud.speed;
            if cloud.x < -cloud.width() {
                cloud.x = self.world_width + self.rng.random_range(20.0..=120.0);
                cloud.y = self.rng.random_range(40.0..=240.0);
            }
        }
    }
}

/// Five puffs along the body, the ends smaller and the middle largest, plus
/// one on top.
fn puffs(rng: &mut Pcg32, base_radius: f64) -> Vec<Puff> {
    const TEMPLATE: [f64; 5] = [-1.2, -0.5, 0.0, 0.7, 1.3];
    let mut puffs = Vec::with_capacity(TEMPLATE.len() + 1);
    for (i, factor) in TEMPLATE.iter().enumerate() {
        let dx = factor * base_radius * 0.7 + rng.random_range(-6.0..=6.0);
        let dy = rng.random_range(-12.0..=12.0);
        let min_scale = if i == 0 || i == TEMPLATE.len() - 1 { 0.65 } else { 0.85 };
        let max_scale = if i == 2 { 1.15 } else { 1.0 };
        let radius = base_radius * rng.random_range(min_scale..=max_scale);
        puffs.push(Puff { dx, dy, radius });
    }
    puffs.push(Puff {
        dx: rng.random_range(-0.3..=0.4) * base_radius,
        dy: -base_radius * 0.8,
        radius: base_radius * 0.45,
    });
    puffs
}
