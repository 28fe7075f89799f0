use thiserror::Error;

#[derive(Debug, Error)]
pub enum Error {
    #[error("repetition {index} is outside 1..={reps}")]
    RepetitionOutOfRange { index: u32, reps: u32 },

    #[error("io error: {0}")]
    Io(#[from] std::io::Error),

    #[error("invalid preferences file: {0}")]
    Json(#[from] serde_json::Error),
}

pub type Result<T> = std::result::Result<T, Error>;
