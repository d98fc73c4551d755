use thiserror::Error;

#[derive(Debug, Error)]
pub enum DatasetError {
    #[error("dataset index {index} is out of range (len {len})")]
    OutOfRange { index: usize, len: usize },

    #[error(transparent)]
    Parse(#[from] kitti_parser::Error),
}
