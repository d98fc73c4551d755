use kitti_core::pointcloud::point::ScanPoint;
use nalgebra::Vector3;
use rand::{Rng, RngCore};

use super::ScanTransform;

/// Configuration for RANSAC plane segmentation over the XYZ channels.
#[derive(Clone, Debug)]
pub struct PlaneSegmentationConfig {
    /// Maximum point-to-plane distance for an inlier (meters).
    /// Default: 0.2
    pub distance_threshold: f32,

    /// Size of the minimal sample; also the smallest cloud that gets
    /// segmented at all.
    /// Default: 3
    pub min_points: usize,

    /// Number of sampling rounds.
    /// Default: 250
    pub iterations: usize,
}

impl Default for PlaneSegmentationConfig {
    fn default() -> Self {
        Self {
            distance_threshold: 0.2,
            min_points: 3,
            iterations: 250,
        }
    }
}

/// Indices of the inliers of the best plane found, empty when the cloud is
/// too small or every sample was degenerate.
pub fn segment_plane(
    points: &[ScanPoint],
    config: &PlaneSegmentationConfig,
    rng: &mut dyn RngCore,
) -> Vec<usize> {
    if points.len() < config.min_points.max(3) {
        return Vec::new();
    }

    let mut best: Vec<usize> = Vec::new();
    for _ in 0..config.iterations {
        let i = rng.gen_range(0..points.len());
        let mut j = rng.gen_range(0..points.len());
        while j == i {
            j = rng.gen_range(0..points.len());
        }
        let mut k = rng.gen_range(0..points.len());
        while k == i || k == j {
            k = rng.gen_range(0..points.len());
        }

        let a = Vector3::new(points[i].x, points[i].y, points[i].z);
        let b = Vector3::new(points[j].x, points[j].y, points[j].z);
        let c = Vector3::new(points[k].x, points[k].y, points[k].z);

        let normal = (b - a).cross(&(c - a));
        let norm = normal.norm();
        if norm < 1e-8 {
            // collinear sample
            continue;
        }
        let normal = normal / norm;
        let d = -normal.dot(&a);

        let inliers: Vec<usize> = points
            .iter()
            .enumerate()
            .filter(|(_, p)| {
                (normal.x * p.x + normal.y * p.y + normal.z * p.z + d).abs()
                    <= config.distance_threshold
            })
            .map(|(idx, _)| idx)
            .collect();

        if inliers.len() > best.len() {
            best = inliers;
        }
    }

    best
}

/// Drops the points of the dominant plane, i.e. the road surface in a
/// typical odometry scan.
#[derive(Clone, Debug, Default)]
pub struct GroundRemoval {
    pub config: PlaneSegmentationConfig,
}

impl GroundRemoval {
    pub fn new() -> Self {
        Self::default()
    }
}

impl ScanTransform for GroundRemoval {
    fn apply(&self, points: Vec<ScanPoint>, rng: &mut dyn RngCore) -> Vec<ScanPoint> {
        let inliers = segment_plane(&points, &self.config, rng);
        if inliers.is_empty() {
            return points;
        }

        let mut keep = vec![true; points.len()];
        for idx in inliers {
            keep[idx] = false;
        }
        points
            .into_iter()
            .zip(keep)
            .filter_map(|(p, kept)| kept.then_some(p))
            .collect()
    }
}
