use std::io;
use thiserror::Error;

/// Errors raised while configuring or running a conversion.
#[derive(Debug, Error)]
pub enum MdroffError {
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),

    /// A back-tick code span runs to the end of the document.
    #[error("inline code span opened on line {line} is never closed")]
    UnterminatedCodeSpan { line: usize },

    #[error("list nesting deeper than {max} levels on line {line}")]
    ListTooDeep { line: usize, max: usize },

    #[error("invalid option value: {0}")]
    InvalidOption(String),

    #[error("yaml parse error: {0}")]
    Yaml(String),

    #[error("schema validation error: {0}")]
    Schema(String),

    #[error("configuration error: {0}")]
    Config(String),

    #[error("dictionary pattern error: {0}")]
    Dictionary(#[from] regex::Error),
}

pub type Result<T> = std::result::Result<T, MdroffError>;
