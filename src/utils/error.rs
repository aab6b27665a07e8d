use std::error::Error;
use std::path::PathBuf;
use thiserror::Error;

/// Boxed failure reported by an upstream collaborator (detector, recognizer, MRZ reader).
pub type SourceError = Box<dyn Error + Send + Sync + 'static>;

/// Whether a hard failure can be fixed by the caller or needs a bug report.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorCategory {
    /// Retry with a better image.
    UserCorrectable,
    /// Report a bug; the input is not at fault.
    Internal,
}

#[derive(Debug, Error)]
pub enum ScanError {
    #[error("{0}")]
    NoEvidence(String),

    #[error("{0}")]
    UnparseableMrz(String),

    #[error("Internal error during {context}: {source}")]
    Internal {
        context: String,
        #[source]
        source: SourceError,
    },
}

impl ScanError {
    pub fn no_id_fields() -> Self {
        ScanError::NoEvidence(
            "No Emirates ID fields detected. Please ensure the image is clear and contains an Emirates ID."
                .to_string(),
        )
    }

    pub fn no_mrz() -> Self {
        ScanError::NoEvidence(
            "No MRZ detected in image. Ensure passport MRZ is visible and clear.".to_string(),
        )
    }

    pub fn unparseable_mrz() -> Self {
        ScanError::UnparseableMrz("MRZ detected but could not be parsed".to_string())
    }

    pub fn internal(context: impl Into<String>, source: impl Into<SourceError>) -> Self {
        ScanError::Internal {
            context: context.into(),
            source: source.into(),
        }
    }

    pub fn category(&self) -> ErrorCategory {
        match self {
            ScanError::NoEvidence(_) | ScanError::UnparseableMrz(_) => ErrorCategory::UserCorrectable,
            ScanError::Internal { .. } => ErrorCategory::Internal,
        }
    }

    pub fn is_user_correctable(&self) -> bool {
        self.category() == ErrorCategory::UserCorrectable
    }

    /// Message that is safe to hand back to the caller. Internal causes stay in the logs.
    pub fn public_message(&self) -> String {
        match self {
            ScanError::NoEvidence(msg) | ScanError::UnparseableMrz(msg) => msg.clone(),
            ScanError::Internal { context, .. } => {
                format!("Internal server error during {} processing", context)
            }
        }
    }
}

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read config file {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to parse config file {path}: {source}")]
    Parse {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    #[error("invalid config: {0}")]
    Invalid(String),
}
