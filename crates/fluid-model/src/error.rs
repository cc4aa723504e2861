use thiserror::Error;

#[derive(Debug, Error)]
pub enum ModelError {
    #[error("unknown engine kind: {0}")]
    UnknownEngineKind(String),

    #[error("missing field: {0}")]
    MissingField(&'static str),
}

pub type ModelResult<T> = Result<T, ModelError>;
