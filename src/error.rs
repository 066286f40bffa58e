use miette::Diagnostic;
use thiserror::Error;

/// Main error type for mosaic operations
#[derive(Error, Diagnostic, Debug)]
pub enum MosaicError {
    #[error("Input error: {message}")]
    #[diagnostic(code(mosaic::input))]
    Input {
        message: String,
        #[help]
        help: Option<String>,
    },

    #[error("Environment error: {message}")]
    #[diagnostic(code(mosaic::environment))]
    Environment {
        message: String,
        #[help]
        help: Option<String>,
    },

    #[error("IO error: {0}")]
    #[diagnostic(code(mosaic::io))]
    IoError(#[from] std::io::Error),

    #[error("IO error with {path}: {message}")]
    #[diagnostic(code(mosaic::io))]
    Io {
        path: std::path::PathBuf,
        message: String,
    },

    #[error("Parse error: {message}")]
    #[diagnostic(code(mosaic::parse))]
    Parse {
        message: String,
        #[help]
        help: Option<String>,
    },
}

pub type Result<T> = std::result::Result<T, MosaicError>;
