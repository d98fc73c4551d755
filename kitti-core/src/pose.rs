use std::collections::BTreeMap;

use nalgebra::Matrix4;

/// Rigid-body pose as a 4x4 homogeneous transform.
pub type Pose = Matrix4<f64>;

/// Poses keyed by frame index, in LiDAR frame.
pub type PoseMap = BTreeMap<i64, Pose>;

/// Translation extracted from a pose file line, in file order.
/// Axes follow the evaluation convention (x, z, y).
pub type Position = [f64; 3];
