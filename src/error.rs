use thiserror::Error;

pub type ChartResult<T> = Result<T, ChartError>;

#[derive(Debug, Error)]
pub enum ChartError {
    #[error("invalid viewport size: width={width}, height={height}")]
    InvalidViewport { width: u32, height: u32 },

    #[error("invalid data: {0}")]
    InvalidData(String),

    #[error("invalid reference code: {0}")]
    InvalidReferenceCode(String),

    #[error("unknown table index: {0}")]
    UnknownTable(usize),

    #[error("table intake failed: {0}")]
    Intake(String),
}
