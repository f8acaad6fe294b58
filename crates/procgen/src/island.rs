//! Island heightfield generation.
//!
//! A dome with fractal noise on top, sunk so its rim sits under sea level.
//! Interior grid vertices are jittered in XZ so the triangulation is
//! irregular, like a hand-modelled island.

use engine_core::{MeshData, Vec3};
use noise::{NoiseFn, Perlin};
use rand::prelude::*;

/// Derive a deterministic u32 noise seed from a world seed and an offset.
#[inline]
fn deterministic_noise_seed(seed: u64, offset: u64) -> u32 {
    ((seed.wrapping_add(offset))
        .wrapping_mul(0x9e3779b97f4a7c15_u64)
        .wrapping_add(offset.wrapping_mul(0x6c078965_u64))
        >> 32) as u32
}

/// Configuration for island generation.
#[derive(Debug, Clone)]
pub struct IslandConfig {
    /// Edge length of the square grid in world units.
    pub size: f32,
    /// Number of vertices per side.
    pub resolution: u32,
    /// Height of the dome at the center.
    pub peak_height: f32,
    /// How far the rim is pushed under the sea.
    pub sea_depth: f32,
    /// Noise frequency (lower = smoother).
    pub frequency: f64,
    /// Number of octaves for fractal noise.
    pub octaves: u32,
    /// Noise amplitude in world units.
    pub roughness: f32,
    /// Fraction of a grid cell interior vertices may be nudged by.
    pub jitter: f32,
    /// Seed for random generation.
    pub seed: u64,
}

impl Default for IslandConfig {
    fn default() -> Self {
        Self {
            size: 80.0,
            resolution: 12,
            peak_height: 3.0,
            sea_depth: 1.5,
            frequency: 0.08,
            octaves: 3,
            roughness: 0.6,
            jitter: 0.25,
            seed: 7,
        }
    }
}

/// Generate the island mesh in its local frame (sea level at y = 0).
pub fn generate_island(config: &IslandConfig) -> MeshData {
    let perlin = Perlin::new(deterministic_noise_seed(config.seed, 0));
    let mut rng = StdRng::seed_from_u64(config.seed);

    let res = config.resolution.max(2) as usize;
    let step = config.size / (res - 1) as f32;
    let half = config.size / 2.0;

    let mut positions = Vec::with_capacity(res * res);
    for z in 0..res {
        for x in 0..res {
            let mut world_x = x as f32 * step - half;
            let mut world_z = z as f32 * step - half;

            let interior = x > 0 && z > 0 && x < res - 1 && z < res - 1;
            if interior && config.jitter > 0.0 {
                let j = config.jitter * step;
                world_x += rng.gen_range(-j..=j);
                world_z += rng.gen_range(-j..=j);
            }

            let y = island_height(&perlin, world_x, world_z, config);
            positions.push(Vec3::new(world_x, y, world_z));
        }
    }

    let mut indices = Vec::with_capacity((res - 1) * (res - 1) * 6);
    for z in 0..(res - 1) {
        for x in 0..(res - 1) {
            let top_left = (z * res + x) as u32;
            let top_right = top_left + 1;
            let bottom_left = ((z + 1) * res + x) as u32;
            let bottom_right = bottom_left + 1;

            indices.extend_from_slice(&[top_left, bottom_left, top_right]);
            indices.extend_from_slice(&[top_right, bottom_left, bottom_right]);
        }
    }

    MeshData::new(positions, indices)
}

fn island_height(perlin: &Perlin, x: f32, z: f32, config: &IslandConfig) -> f32 {
    let half = config.size / 2.0;
    let r = (x * x + z * z).sqrt() / half;
    // Smoothstep dome: 1 at the center, 0 at the rim.
    let t = (1.0 - r).clamp(0.0, 1.0);
    let dome = t * t * (3.0 - 2.0 * t);

    let mut total = 0.0;
    let mut amplitude = 1.0;
    let mut frequency = config.frequency;
    let mut max_value = 0.0;
    for _ in 0..config.octaves.max(1) {
        total += perlin.get([x as f64 * frequency, z as f64 * frequency]) * amplitude;
        max_value += amplitude;
        amplitude *= 0.5;
        frequency *= 2.0;
    }
    let detail = (total / max_value) as f32 * config.roughness * dome;

    (config.peak_height + config.sea_depth) * dome - config.sea_depth + detail
}
