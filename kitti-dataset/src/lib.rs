//! Dataset index over the KITTI odometry benchmark: enumerates the
//! configured sequences once, then serves preprocessed scans by position.

pub mod config;
pub mod dataset;
pub mod error;

pub use config::{DataSplit, DatasetConfig, Phase};
pub use dataset::KittiDataset;
pub use error::DatasetError;
