//! Preprocessing chain for raw LiDAR scans: ground-plane removal and the
//! random training-time augmentations.

pub mod builder;
pub mod transform;

pub use builder::PreprocessBuilder;
pub use transform::{CompositeTransform, ScanTransform};
