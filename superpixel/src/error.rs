use std::io;

#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("IO error: {0}")]
    Io(#[from] io::Error),
    #[error("Invalid file extension: {0}")]
    InvalidExtension(String),
    #[error("Unsupported format: {0}")]
    UnsupportedFormat(String),
    #[error("Pixel ({x}, {y}) is outside of {width}x{height} image")]
    IndexOutOfRange {
        x: usize,
        y: usize,
        width: usize,
        height: usize,
    },
    #[error("Invalid pixel data: {0}")]
    InvalidData(String),
    #[error("Encoding error: {0}")]
    Encoding(#[from] image::ImageError),
}

pub type Result<T> = std::result::Result<T, Error>;
