//! Error types for the Courtside server binary.

/// Top-level error for the server binary.
///
/// Wraps every startup and serving failure so `main` can propagate
/// with `?`.
#[derive(Debug, thiserror::Error)]
pub enum EngineError {
    /// Configuration loading failed.
    #[error("config error: {source}")]
    Config {
        /// The underlying config error.
        #[from]
        source: courtside_core::config::ConfigError,
    },

    /// The logging directive in the config could not be parsed.
    #[error("invalid log filter {directive:?}: {message}")]
    LogFilter {
        /// The rejected directive.
        directive: String,
        /// Parser message.
        message: String,
    },

    /// The HTTP server failed to bind or serve.
    #[error("server error: {source}")]
    Server {
        /// The underlying server error.
        #[from]
        source: courtside_observer::ServerError,
    },
}
