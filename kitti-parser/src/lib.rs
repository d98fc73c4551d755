//! Readers for the on-disk layout of the KITTI odometry benchmark:
//! binary velodyne scans, pose files, and timestamp files.

pub mod error;
pub mod pose;
pub mod scan;
pub mod timestamps;

pub use error::Error;
