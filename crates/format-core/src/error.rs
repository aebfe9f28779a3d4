use thiserror::Error;

#[derive(Error, Debug)]
pub enum FormatError {
    #[error("Invalid payload: {0}")]
    InvalidPayload(#[from] serde_json::Error),
}
