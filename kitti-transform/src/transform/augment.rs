use std::f32::consts::TAU;

use kitti_core::pointcloud::point::ScanPoint;
use rand::{Rng, RngCore};

use super::ScanTransform;

/// Rotates the scan about the vertical axis by a uniform random yaw.
#[derive(Clone, Debug)]
pub struct RandomRotation {
    /// Width of the angle interval in radians, drawn from `[0, range)`.
    pub range: f32,
}

impl Default for RandomRotation {
    fn default() -> Self {
        Self { range: TAU }
    }
}

impl ScanTransform for RandomRotation {
    fn apply(&self, mut points: Vec<ScanPoint>, rng: &mut dyn RngCore) -> Vec<ScanPoint> {
        if self.range <= 0.0 {
            return points;
        }
        let angle = rng.gen::<f32>() * self.range;
        let (sin, cos) = angle.sin_cos();

        for p in &mut points {
            let x = p.x * cos - p.y * sin;
            let y = p.x * sin + p.y * cos;
            p.x = x;
            p.y = y;
        }
        points
    }
}

/// Removes every point inside a random azimuth sector, simulating a
/// blocked field of view.
#[derive(Clone, Debug)]
pub struct RandomOcclusion {
    /// Full width of the removed sector in degrees.
    pub sector_deg: f32,
}

impl Default for RandomOcclusion {
    fn default() -> Self {
        Self { sector_deg: 30.0 }
    }
}

impl ScanTransform for RandomOcclusion {
    fn apply(&self, points: Vec<ScanPoint>, rng: &mut dyn RngCore) -> Vec<ScanPoint> {
        if self.sector_deg <= 0.0 {
            return points;
        }
        let center = rng.gen_range(-180.0..180.0f32);
        let half = self.sector_deg / 2.0;

        points
            .into_iter()
            .filter(|p| {
                let mut delta = (p.azimuth_deg() - center).abs();
                if delta > 180.0 {
                    delta = 360.0 - delta;
                }
                delta > half
            })
            .collect()
    }
}

/// Scales the whole scan by a uniform random factor. All four channels
/// scale together, the reflectance included.
#[derive(Clone, Debug)]
pub struct RandomScale {
    pub min_scale: f32,
    pub max_scale: f32,
}

impl RandomScale {
    /// Fraction of applications that actually scale; the rest pass the
    /// scan through unchanged.
    pub const APPLY_PROBABILITY: f64 = 0.95;

    pub fn new(min_scale: f32, max_scale: f32) -> Self {
        Self {
            min_scale,
            max_scale,
        }
    }
}

impl ScanTransform for RandomScale {
    fn apply(&self, mut points: Vec<ScanPoint>, rng: &mut dyn RngCore) -> Vec<ScanPoint> {
        if rng.gen::<f64>() >= Self::APPLY_PROBABILITY {
            return points;
        }
        let scale = self.min_scale + (self.max_scale - self.min_scale) * rng.gen::<f32>();

        for p in &mut points {
            p.x *= scale;
            p.y *= scale;
            p.z *= scale;
            p.reflectance *= scale;
        }
        points
    }
}
