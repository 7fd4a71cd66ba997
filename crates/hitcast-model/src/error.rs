use thiserror::Error;

#[derive(Debug, Error)]
pub enum ModelError {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    #[error("input table has no rows")]
    EmptyDataset,

    #[error("training error: {0}")]
    Train(String),

    #[error("chart rendering error: {0}")]
    Plot(String),
}

pub type ModelResult<T> = std::result::Result<T, ModelError>;
