//! Domain error types.
//!
//! Insufficient history is never an error here: indicators and the change
//! summary report it per value as `None`.

/// Top-level error type for tikrscope.
#[derive(Debug, thiserror::Error)]
pub enum TikrscopeError {
    #[error("config parse error in {file}: {reason}")]
    ConfigParse { file: String, reason: String },

    #[error("invalid config value [{section}] {key}: {reason}")]
    ConfigInvalid {
        section: String,
        key: String,
        reason: String,
    },

    #[error("invalid parameter {name}: {reason}")]
    InvalidParameter { name: String, reason: String },

    #[error("unknown {kind} key '{key}'")]
    UnknownKey { kind: &'static str, key: String },

    #[error("overlay '{key}' requested more than once")]
    DuplicateOverlay { key: String },

    #[error("invalid bar series: {reason}")]
    InvalidSeries { reason: String },

    #[error("data error: {reason}")]
    Data { reason: String },

    #[error("render error: {reason}")]
    Render { reason: String },

    #[error(transparent)]
    Io(#[from] std::io::Error),
}

impl TikrscopeError {
    /// True for every variant that stems from bad configuration or parameters.
    pub fn is_configuration(&self) -> bool {
        matches!(
            self,
            TikrscopeError::ConfigParse { .. }
                | TikrscopeError::ConfigInvalid { .. }
                | TikrscopeError::InvalidParameter { .. }
                | TikrscopeError::UnknownKey { .. }
                | TikrscopeError::DuplicateOverlay { .. }
        )
    }
}

impl From<&TikrscopeError> for std::process::ExitCode {
    fn from(err: &TikrscopeError) -> Self {
        let code: u8 = match err {
            TikrscopeError::Io(_) => 1,
            TikrscopeError::ConfigParse { .. }
            | TikrscopeError::ConfigInvalid { .. }
            | TikrscopeError::InvalidParameter { .. }
            | TikrscopeError::UnknownKey { .. }
            | TikrscopeError::DuplicateOverlay { .. } => 2,
            TikrscopeError::InvalidSeries { .. } | TikrscopeError::Data { .. } => 3,
            TikrscopeError::Render { .. } => 4,
        };
        std::process::ExitCode::from(code)
    }
}
