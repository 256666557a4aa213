//! Error type shared by the server and client config loaders.

/// A config file could not be loaded.
///
/// Records where in the loader the problem was detected.
#[derive(Debug, Clone, PartialEq, Eq, derive_more::Display, derive_more::Error)]
#[display("Invalid configuration: {} ({}:{})", message, file, line)]
pub struct ConfigError {
    /// What went wrong.
    pub message: String,
    /// Loader source file that raised it.
    pub file: &'static str,
    /// Line in `file`.
    pub line: u32,
}

impl ConfigError {
    /// Creates an error located at the caller.
    #[track_caller]
    pub fn new(message: impl Into<String>) -> Self {
        let caller = std::panic::Location::caller();
        Self {
            message: message.into(),
            file: caller.file(),
            line: caller.line(),
        }
    }
}
