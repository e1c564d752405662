//! Background stars, scattered in a thick spherical shell around the scene.

use std::f32::consts::TAU;

use nalgebra::{Point3, Vector3};
use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct StarFieldParams {
    /// Inner radius of the shell.
    pub radius: f32,
    /// Thickness of the shell.
    pub depth: f32,
    pub count: usize,
    pub seed: u64,
    /// Dim stars towards the outside of the shell.
    pub fade: bool,
}

impl Default for StarFieldParams {
    fn default() -> Self {
        StarFieldParams {
            radius: 200.0,
            depth: 100.0,
            count: 10000,
            seed: 0x5eed_5a75,
            fade: true,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Star {
    pub position: Point3<f32>,
    // Grey level in [0, 1]
    pub brightness: f32,
}

#[derive(Debug, Clone)]
pub struct StarField {
    stars: Vec<Star>,
}

impl StarField {
    /// Same params, same stars.
    pub fn generate(params: &StarFieldParams) -> Self {
        let mut rng = ChaCha8Rng::seed_from_u64(params.seed);
        let stars = (0..params.count)
            .map(|_| {
                // Uniform direction: uniform z in [-1, 1] and uniform azimuth
                let z = 2.0 * rng.random::<f32>() - 1.0;
                let azimuth = TAU * rng.random::<f32>();
                let ring = (1.0 - z * z).sqrt();
                let direction = Vector3::new(ring * azimuth.cos(), z, ring * azimuth.sin());

                let depth_fraction = rng.random::<f32>();
                let distance = params.radius + params.depth * depth_fraction;

                let base = 0.5 + 0.5 * rng.random::<f32>();
                let brightness = if params.fade {
                    base * (1.0 - 0.7 * depth_fraction)
                } else {
                    base
                };

                Star {
                    position: Point3::from(direction * distance),
                    brightness,
                }
            })
            .collect();
        StarField { stars }
    }

    pub fn stars(&self) -> &[Star] {
        &self.stars
    }

    pub fn len(&self) -> usize {
        self.stars.len()
    }

    pub fn is_empty(&self) -> bool {
        self.stars.is_empty()
    }
}
