use thiserror::Error;

#[derive(Error, Debug)]
pub enum VariantError {
    #[error("Source unreadable: {handle} ({reason})")]
    SourceUnreadable { handle: String, reason: String },

    #[error("Image decode failed: {reason}")]
    DecodeFailed { reason: String },

    #[error("Write failed for {path}: {reason}")]
    WriteFailed { path: String, reason: String },

    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    #[error("Configuration error: {message}")]
    ConfigError { message: String },

    #[error("Configuration validation failed for '{field}': {message}")]
    ConfigValidationError { field: String, message: String },

    #[error("Invalid value '{value}' for '{field}': {reason}")]
    InvalidConfigValueError {
        field: String,
        value: String,
        reason: String,
    },

    #[error("Worker task failed: {message}")]
    TaskFailed { message: String },
}

pub type Result<T> = std::result::Result<T, VariantError>;

/// The failure classes a caller of the pipeline can observe.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum VariantErrorKind {
    SourceUnreadable,
    DecodeFailed,
    WriteFailed,
    Config,
    Internal,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorCategory {
    Input,
    Processing,
    Storage,
    Configuration,
    System,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum ErrorSeverity {
    Low,
    Medium,
    High,
    Critical,
}

impl VariantError {
    pub fn source_unreadable(handle: impl Into<String>, reason: impl ToString) -> Self {
        Self::SourceUnreadable {
            handle: handle.into(),
            reason: reason.to_string(),
        }
    }

    pub fn decode_failed(reason: impl ToString) -> Self {
        Self::DecodeFailed {
            reason: reason.to_string(),
        }
    }

    pub fn write_failed(path: impl AsRef<std::path::Path>, reason: impl ToString) -> Self {
        Self::WriteFailed {
            path: path.as_ref().display().to_string(),
            reason: reason.to_string(),
        }
    }

    pub fn kind(&self) -> VariantErrorKind {
        match self {
            Self::SourceUnreadable { .. } => VariantErrorKind::SourceUnreadable,
            Self::DecodeFailed { .. } => VariantErrorKind::DecodeFailed,
            Self::WriteFailed { .. } | Self::IoError(_) => VariantErrorKind::WriteFailed,
            Self::ConfigError { .. }
            | Self::ConfigValidationError { .. }
            | Self::InvalidConfigValueError { .. } => VariantErrorKind::Config,
            Self::TaskFailed { .. } => VariantErrorKind::Internal,
        }
    }

    pub fn category(&self) -> ErrorCategory {
        match self.kind() {
            VariantErrorKind::SourceUnreadable => ErrorCategory::Input,
            VariantErrorKind::DecodeFailed => ErrorCategory::Processing,
            VariantErrorKind::WriteFailed => ErrorCategory::Storage,
            VariantErrorKind::Config => ErrorCategory::Configuration,
            VariantErrorKind::Internal => ErrorCategory::System,
        }
    }

    pub fn severity(&self) -> ErrorSeverity {
        match self.category() {
            ErrorCategory::Input => ErrorSeverity::Medium,
            ErrorCategory::Processing => ErrorSeverity::High,
            ErrorCategory::Storage => ErrorSeverity::High,
            ErrorCategory::Configuration | ErrorCategory::System => ErrorSeverity::Critical,
        }
    }

    /// Pipeline failures are deterministic for a given input.
    pub fn is_retryable(&self) -> bool {
        false
    }

    pub fn user_friendly_message(&self) -> String {
        match self {
            Self::SourceUnreadable { handle, .. } => {
                format!("Could not open the selected file: {}", handle)
            }
            Self::DecodeFailed { .. } => "The selected file is not a supported image".to_string(),
            Self::WriteFailed { path, .. } => format!("Could not save image to {}", path),
            Self::IoError(e) => format!("File system error: {}", e),
            Self::ConfigError { message } => format!("Configuration problem: {}", message),
            Self::ConfigValidationError { field, message } => {
                format!("Configuration problem in '{}': {}", field, message)
            }
            Self::InvalidConfigValueError { field, reason, .. } => {
                format!("Invalid setting '{}': {}", field, reason)
            }
            Self::TaskFailed { .. } => "Internal error while producing image variants".to_string(),
        }
    }

    pub fn recovery_suggestion(&self) -> &'static str {
        match self.kind() {
            VariantErrorKind::SourceUnreadable => {
                "Check that the file exists, is readable and has a file name"
            }
            VariantErrorKind::DecodeFailed => {
                "Pick a JPEG, PNG, WebP, GIF or BMP image at least 6 pixels on each side"
            }
            VariantErrorKind::WriteFailed => {
                "Check free disk space and permissions of the cache and files directories"
            }
            VariantErrorKind::Config => "Fix the configuration file or command line flags",
            VariantErrorKind::Internal => "Re-run with --verbose and report the log",
        }
    }
}
