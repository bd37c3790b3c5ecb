use thiserror::Error;

#[derive(Debug, Error)]
pub enum ServiceError {
    #[error("validation error: {0}")]
    Validation(String),
    #[error("not found: {0}")]
    NotFound(String),
    /// The favorites document could not be read or written.
    #[error("persistence error: {0}")]
    Persistence(String),
    /// The existence check itself failed, as opposed to reporting absence.
    #[error("file check error: {0}")]
    Oracle(String),
}

impl ServiceError {
    pub fn file_id_required() -> Self { Self::Validation("fileId is required".into()) }

    pub fn file_not_found() -> Self { Self::NotFound("File not found".into()) }

    pub fn persistence(e: impl std::fmt::Display) -> Self { Self::Persistence(e.to_string()) }

    pub fn oracle(e: impl std::fmt::Display) -> Self { Self::Oracle(e.to_string()) }
}
