use crate::error::AppError;

#[derive(Debug, thiserror::Error)]
pub enum TtsJobServiceError {
    #[error("dependency error: {0}")]
    Dependency(String),
    #[error("validation failed: {0}")]
    Validation(String),
    #[error("TTS job not found")]
    NotFound,
    #[error("no updatable fields provided")]
    EmptyUpdate,
    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

impl From<AppError> for TtsJobServiceError {
    fn from(err: AppError) -> Self {
        match err {
            AppError::Validation(msg) => TtsJobServiceError::Validation(msg),
            AppError::NotFound(_) => TtsJobServiceError::NotFound,
            _ => TtsJobServiceError::Dependency(err.to_string()),
        }
    }
}

impl From<TtsJobServiceError> for AppError {
    fn from(err: TtsJobServiceError) -> Self {
        match err {
            TtsJobServiceError::Validation(msg) => AppError::Validation(msg),
            TtsJobServiceError::NotFound => AppError::NotFound("TTS job not found".to_string()),
            TtsJobServiceError::EmptyUpdate => {
                AppError::BadRequest("No updatable fields provided".to_string())
            }
            TtsJobServiceError::Dependency(msg) => AppError::Internal(msg),
            TtsJobServiceError::Other(e) => AppError::Internal(e.to_string()),
        }
    }
}
