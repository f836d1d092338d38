use thiserror::Error;

/// Application-wide result type alias.
pub type Result<T> = std::result::Result<T, AppError>;

/// Application error types.
///
/// Only the terminal front-end can fail. Model and view code signals every
/// boundary with `Option` instead.
#[derive(Debug, Error)]
pub enum AppError {
    /// I/O errors from the terminal or the log file.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Terminal initialization or event channel errors.
    #[error("Terminal error: {0}")]
    Terminal(String),

    /// Invalid configuration value supplied on the command line.
    #[error("Config error: {0}")]
    Config(String),

    /// The tracing subscriber could not be installed.
    #[error("Logging error: {0}")]
    Logging(String),
}
