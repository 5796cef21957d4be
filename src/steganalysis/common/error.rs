use thiserror::Error;

#[derive(Error, Debug)]
pub enum AnalysisError {
    #[error("Failed to read input file: {0}")]
    InputReadError(String),

    #[error("Failed to decode image: {0}")]
    DecodeError(String),

    #[error("Image has no pixels: width={0}, height={1}")]
    EmptyImage(u32, u32),

    #[error("Failed to traverse directory entry: {0}")]
    DiscoveryError(String),

    #[error("Failed to write report: {0}")]
    ReportWriteError(String),

    #[error("Analysis aborted: {0}")]
    Panicked(String),

    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),
}

pub type Result<T> = std::result::Result<T, AnalysisError>;
