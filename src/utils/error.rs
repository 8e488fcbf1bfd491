use thiserror::Error;
use crate::render::validation::ValidationError;
use std::io;

#[derive(Debug, Error)]
pub enum ShaderError {
    #[error("IO error: {0}")]
    Io(#[from] io::Error),

    #[error("Shader config error: {0}")]
    Config(String),

    #[error("Shader validation error: {0}")]
    Validation(#[from] ValidationError),
}

pub type Result<T> = std::result::Result<T, ShaderError>;
