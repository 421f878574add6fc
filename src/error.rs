use thiserror::Error;

pub type MapResult<T> = Result<T, MapError>;

#[derive(Debug, Error)]
pub enum MapError {
    #[error("invalid display size: width={width}, height={height}")]
    InvalidViewport { width: u32, height: u32 },

    #[error("invalid data: {0}")]
    InvalidData(String),

    #[error("invalid operation: {0}")]
    InvalidOperation(String),

    #[error("display backend failure: {0}")]
    Backend(String),

    #[error("render callback failure: {0}")]
    Render(String),
}
