use thiserror::Error;

/// Result type alias using EnvDeltaError
pub type Result<T> = std::result::Result<T, EnvDeltaError>;

// ========== Error Facility ==========

/// Canonical error kind taxonomy
///
/// Each kind maps to a stable error code that adapters (CLI, HTTP) can use
/// for programmatic handling and user-facing messages.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExErrorKind {
    // Export
    UnsupportedFormat,

    // Conflict workflow
    IncompleteResolution,
    UnresolvedConflict,
    ResolutionCancelled,

    // Structural/Validation
    InvalidSnapshot,
    InvalidChangeSummary,

    // Integration/IO
    Serialization,
    Prompt,
    Io,
}

impl ExErrorKind {
    /// Get the stable error code for this kind
    pub fn code(&self) -> &'static str {
        match self {
            ExErrorKind::UnsupportedFormat => "ERR_UNSUPPORTED_FORMAT",
            ExErrorKind::IncompleteResolution => "ERR_INCOMPLETE_RESOLUTION",
            ExErrorKind::UnresolvedConflict => "ERR_UNRESOLVED_CONFLICT",
            ExErrorKind::ResolutionCancelled => "ERR_RESOLUTION_CANCELLED",
            ExErrorKind::InvalidSnapshot => "ERR_INVALID_SNAPSHOT",
            ExErrorKind::InvalidChangeSummary => "ERR_INVALID_CHANGE_SUMMARY",
            ExErrorKind::Serialization => "ERR_SERIALIZATION",
            ExErrorKind::Prompt => "ERR_PROMPT",
            ExErrorKind::Io => "ERR_IO",
        }
    }

    /// True for the neutral "user aborted" outcome, which adapters report
    /// without escalating the exit status.
    pub fn is_cancellation(&self) -> bool {
        matches!(self, ExErrorKind::ResolutionCancelled)
    }
}

/// Canonical structured error type
///
/// Carries the classification used for logging and adapters plus the
/// variable keys involved. Values are never stored on an error.
#[derive(Debug, Clone)]
pub struct ExError {
    kind: ExErrorKind,
    op: Option<String>,
    key: Option<String>,
    keys: Option<Vec<String>>,
    message: String,
}

impl ExError {
    /// Create a new error with the specified kind
    pub fn new(kind: ExErrorKind) -> Self {
        Self {
            kind,
            op: None,
            key: None,
            keys: None,
            message: String::new(),
        }
    }

    /// Add operation context
    pub fn with_op(mut self, op: impl Into<String>) -> Self {
        self.op = Some(op.into());
        self
    }

    /// Add the single variable key the error is about
    pub fn with_key(mut self, key: impl Into<String>) -> Self {
        self.key = Some(key.into());
        self
    }

    /// Add the set of variable keys the error is about (e.g. missing resolutions)
    pub fn with_keys(mut self, keys: Vec<String>) -> Self {
        self.keys = Some(keys);
        self
    }

    /// Add custom message
    pub fn with_message(mut self, message: impl Into<String>) -> Self {
        self.message = message.into();
        self
    }

    /// Get the error kind
    pub fn kind(&self) -> ExErrorKind {
        self.kind
    }

    /// Get the stable error code
    pub fn code(&self) -> &'static str {
        self.kind.code()
    }

    /// Get the operation context, if any
    pub fn op(&self) -> Option<&str> {
        self.op.as_deref()
    }

    /// Get the key context, if any
    pub fn key(&self) -> Option<&str> {
        self.key.as_deref()
    }

    /// Get the keys context, if any
    pub fn keys(&self) -> Option<&[String]> {
        self.keys.as_deref()
    }

    /// Get the error message
    pub fn message(&self) -> &str {
        &self.message
    }
}

impl std::fmt::Display for ExError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "[{}]", self.code())?;
        if let Some(op) = &self.op {
            write!(f, " in operation '{}'", op)?;
        }
        if !self.message.is_empty() {
            write!(f, ": {}", self.message)?;
        }
        if let Some(key) = &self.key {
            write!(f, " (key: {})", key)?;
        }
        if let Some(keys) = &self.keys {
            write!(f, " (keys: {})", keys.join(", "))?;
        }
        Ok(())
    }
}

impl std::error::Error for ExError {}

// ========== End Error Facility ==========

/// Error taxonomy for diff, export and conflict-resolution operations
#[derive(Error, Debug, Clone, PartialEq)]
pub enum EnvDeltaError {
    // ===== Export Errors =====
    /// Export format outside {text, json, csv}
    #[error("Unsupported export format: {format} (expected text, json or csv)")]
    UnsupportedFormat { format: String },

    // ===== Conflict Errors =====
    /// Caller-supplied resolution map does not cover every conflicting key
    #[error("Incomplete resolution: no choice for {}", missing.join(", "))]
    IncompleteResolution { missing: Vec<String> },

    /// Merge attempted while conflicts are unresolved or deferred
    #[error("Unresolved conflicts: {}", keys.join(", "))]
    UnresolvedConflict { keys: Vec<String> },

    /// Interactive resolution was aborted at the given key
    #[error("Conflict resolution cancelled at {key}")]
    ResolutionCancelled { key: String },

    // ===== Validation Errors =====
    /// Snapshot input violates the snapshot invariants
    #[error("Invalid snapshot: {reason}")]
    InvalidSnapshot { reason: String },

    /// Stored change summary failed validation on read
    #[error("Invalid change summary: {reason}")]
    InvalidChangeSummary { reason: String },

    // ===== Generic Errors =====
    /// Serialization error (JSON encoding/decoding)
    #[error("Serialization error: {message}")]
    Serialization { message: String },

    /// The injected prompt failed for a reason other than cancellation
    #[error("Prompt failed: {message}")]
    Prompt { message: String },
}

impl EnvDeltaError {
    /// Stable kind of this error
    pub fn kind(&self) -> ExErrorKind {
        match self {
            EnvDeltaError::UnsupportedFormat { .. } => ExErrorKind::UnsupportedFormat,
            EnvDeltaError::IncompleteResolution { .. } => ExErrorKind::IncompleteResolution,
            EnvDeltaError::UnresolvedConflict { .. } => ExErrorKind::UnresolvedConflict,
            EnvDeltaError::ResolutionCancelled { .. } => ExErrorKind::ResolutionCancelled,
            EnvDeltaError::InvalidSnapshot { .. } => ExErrorKind::InvalidSnapshot,
            EnvDeltaError::InvalidChangeSummary { .. } => ExErrorKind::InvalidChangeSummary,
            EnvDeltaError::Serialization { .. } => ExErrorKind::Serialization,
            EnvDeltaError::Prompt { .. } => ExErrorKind::Prompt,
        }
    }

    /// True if this is a user cancellation rather than a failure
    pub fn is_cancellation(&self) -> bool {
        self.kind().is_cancellation()
    }
}

/// Conversion from EnvDeltaError to ExError
impl From<EnvDeltaError> for ExError {
    fn from(err: EnvDeltaError) -> Self {
        let kind = err.kind();
        match err {
            EnvDeltaError::UnsupportedFormat { format } => ExError::new(kind)
                .with_op("export")
                .with_message(format!("format '{}' is not one of text, json, csv", format)),

            EnvDeltaError::IncompleteResolution { missing } => ExError::new(kind)
                .with_op("resolve")
                .with_message("resolution map does not cover every conflict")
                .with_keys(missing),

            EnvDeltaError::UnresolvedConflict { keys } => ExError::new(kind)
                .with_op("merge")
                .with_message("conflicts must be resolved before merging")
                .with_keys(keys),

            EnvDeltaError::ResolutionCancelled { key } => ExError::new(kind)
                .with_op("resolve")
                .with_key(key)
                .with_message("cancelled by user"),

            EnvDeltaError::InvalidSnapshot { reason } => {
                ExError::new(kind).with_message(reason)
            }

            EnvDeltaError::InvalidChangeSummary { reason } => ExError::new(kind)
                .with_op("change_summary_from_json")
                .with_message(reason),

            EnvDeltaError::Serialization { message } => ExError::new(kind).with_message(message),

            EnvDeltaError::Prompt { message } => ExError::new(kind)
                .with_op("resolve")
                .with_message(message),
        }
    }
}

/// Conversion from serde_json::Error to EnvDeltaError
impl From<serde_json::Error> for EnvDeltaError {
    fn from(err: serde_json::Error) -> Self {
        EnvDeltaError::Serialization {
            message: err.to_string(),
        }
    }
}
