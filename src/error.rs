use std::io;

#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("invalid region: {axis} axis needs at least 2 steps, got {steps}")]
    InvalidRegion { axis: char, steps: usize },
    #[error("cannot reshape {len} values into {height} rows of {width}")]
    Shape {
        len: usize,
        width: usize,
        height: usize,
    },
    #[error("unknown colormap: {0}")]
    UnknownColormap(String),
    #[error("unknown origin: {0} (expected \"lower\" or \"upper\")")]
    UnknownOrigin(String),
    #[error("unknown image format: {0}")]
    UnknownFormat(String),
    #[error("worker pool failure: {0}")]
    Worker(String),
    #[error("io error: {0}")]
    Io(#[from] io::Error),
    #[error("image error: {0}")]
    Image(#[from] image::ImageError),
}

pub type Result<T> = std::result::Result<T, Error>;
