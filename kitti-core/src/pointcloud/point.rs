use serde::{Deserialize, Serialize};

/// One LiDAR return: sensor-frame coordinates plus the reflectance channel.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ScanPoint {
    pub x: f32,
    pub y: f32,
    pub z: f32,
    pub reflectance: f32,
}

impl ScanPoint {
    pub fn new(x: f32, y: f32, z: f32, reflectance: f32) -> Self {
        Self {
            x,
            y,
            z,
            reflectance,
        }
    }

    /// Distance from the sensor axis in the horizontal plane.
    pub fn planar_range(&self) -> f32 {
        (self.x * self.x + self.y * self.y).sqrt()
    }

    /// Horizontal angle of the return in degrees, in (-180, 180].
    pub fn azimuth_deg(&self) -> f32 {
        self.y.atan2(self.x).to_degrees()
    }
}

/// Identifies one scan within the dataset: the driving sequence and the
/// time step inside it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ScanMeta {
    pub sequence: u32,
    pub index: u32,
}

#[derive(Debug, Clone, PartialEq)]
pub struct Scan {
    pub points: Vec<ScanPoint>,
    pub meta: ScanMeta,
}

impl Scan {
    pub fn new(points: Vec<ScanPoint>, meta: ScanMeta) -> Self {
        Scan { points, meta }
    }

    pub fn len(&self) -> usize {
        self.points.len()
    }

    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    pub fn bounding_volume(&self) -> BoundingVolume {
        let mut bounding_volume = BoundingVolume {
            min: [f32::MAX, f32::MAX, f32::MAX],
            max: [f32::MIN, f32::MIN, f32::MIN],
        };

        for point in &self.points {
            bounding_volume.max[0] = bounding_volume.max[0].max(point.x);
            bounding_volume.max[1] = bounding_volume.max[1].max(point.y);
            bounding_volume.max[2] = bounding_volume.max[2].max(point.z);
            bounding_volume.min[0] = bounding_volume.min[0].min(point.x);
            bounding_volume.min[1] = bounding_volume.min[1].min(point.y);
            bounding_volume.min[2] = bounding_volume.min[2].min(point.z);
        }

        bounding_volume
    }
}

#[derive(Debug, Clone, Default)]
pub struct BoundingVolume {
    pub min: [f32; 3],
    pub max: [f32; 3],
}
