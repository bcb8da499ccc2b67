//! Error types for the engine binary.

/// Errors that can occur during engine startup.
#[derive(Debug, thiserror::Error)]
pub enum EngineError {
    /// Configuration loading or validation failed.
    #[error("configuration error: {source}")]
    Config {
        /// The underlying configuration error.
        #[from]
        source: fishradar_core::ConfigError,
    },

    /// Demo fleet seeding failed.
    #[error("fleet spawner error: {message}")]
    Spawner {
        /// Explanation of the spawner failure.
        message: String,
    },
}
