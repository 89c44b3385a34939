//! Error types for cobertura-conformance

use std::path::PathBuf;

use thiserror::Error;

#[derive(Error, Debug)]
pub enum Error {
    #[error("input file not found: {0}")]
    MissingInput(PathBuf),

    #[error("XML parsing error: {0}")]
    ParseError(String),

    #[error("failed to launch {program}: {message}")]
    ProcessError { program: String, message: String },

    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),
}

pub type Result<T> = std::result::Result<T, Error>;
