pub mod pointcloud;
pub mod pose;
