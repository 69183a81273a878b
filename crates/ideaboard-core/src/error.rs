use std::fmt;
use std::io;

/// Machine-readable error codes for scripted callers.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorCode {
    NotInitialized,
    ConfigParseError,
    IdeaNotFound,
    AmbiguousId,
    PermissionDenied,
    ValidationFailed,
    EmptyName,
    InvalidImport,
    StorageWriteFailed,
    InternalUnexpected,
}

impl ErrorCode {
    /// Stable code identifier (`E####`) for machine parsing.
    #[must_use]
    pub const fn code(self) -> &'static str {
        match self {
            Self::NotInitialized => "E1001",
            Self::ConfigParseError => "E1002",
            Self::IdeaNotFound => "E2001",
            Self::AmbiguousId => "E2002",
            Self::PermissionDenied => "E2003",
            Self::ValidationFailed => "E2004",
            Self::EmptyName => "E2005",
            Self::InvalidImport => "E3001",
            Self::StorageWriteFailed => "E5001",
            Self::InternalUnexpected => "E9001",
        }
    }

    /// Short human-facing summary for logs and terminal output.
    #[must_use]
    pub const fn message(self) -> &'static str {
        match self {
            Self::NotInitialized => "Board not initialized",
            Self::ConfigParseError => "Config file parse error",
            Self::IdeaNotFound => "Idea not found",
            Self::AmbiguousId => "Ambiguous idea ID",
            Self::PermissionDenied => "Action not permitted",
            Self::ValidationFailed => "Invalid idea fields",
            Self::EmptyName => "Display name is empty",
            Self::InvalidImport => "Invalid import file",
            Self::StorageWriteFailed => "Storage write failed",
            Self::InternalUnexpected => "Internal unexpected error",
        }
    }

    /// Optional remediation hint surfaced next to the error.
    #[must_use]
    pub const fn hint(self) -> Option<&'static str> {
        match self {
            Self::NotInitialized => Some("Run `ib init` to create a board in this directory."),
            Self::ConfigParseError => Some("Fix syntax in .ideaboard/config.toml and retry."),
            Self::IdeaNotFound => Some("Run `ib list` to see available idea IDs."),
            Self::AmbiguousId => Some("Use a longer ID prefix to disambiguate."),
            Self::PermissionDenied => {
                Some("Sign in with `ib login <name>`; only the author may edit or delete.")
            }
            Self::ValidationFailed => Some("Title and description must not be blank."),
            Self::EmptyName => Some("Pass a non-blank display name."),
            Self::InvalidImport => Some("Import a JSON array of ideas, as written by `ib export`."),
            Self::StorageWriteFailed => Some("Check disk space and write permissions."),
            Self::InternalUnexpected => Some("Retry once. If persistent, report a bug with logs."),
        }
    }
}

impl fmt::Display for ErrorCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.code())
    }
}

/// Why an import document was rejected.
#[derive(Debug, thiserror::Error)]
pub enum ImportError {
    #[error("file is not valid JSON: {0}")]
    InvalidJson(#[source] serde_json::Error),
    #[error("expected a JSON array of ideas, found {found}")]
    NotAnArray { found: &'static str },
}

/// Errors returned by user-initiated board operations.
///
/// Malformed external input (stored blobs, view queries) never surfaces
/// here; it degrades to defaults at the boundary instead.
#[derive(Debug, thiserror::Error)]
pub enum IdeaError {
    #[error("no idea board found at or above {0}")]
    NotInitialized(String),

    #[error("idea '{0}' not found")]
    IdeaNotFound(String),

    #[error("idea prefix '{prefix}' matches {count} ideas")]
    AmbiguousId { prefix: String, count: usize },

    #[error("{0}")]
    PermissionDenied(String),

    #[error("{0}")]
    Validation(String),

    #[error("display name must not be empty")]
    EmptyName,

    #[error(transparent)]
    Import(#[from] ImportError),

    #[error("storage error: {0}")]
    Storage(#[from] io::Error),

    #[error("failed to serialize ideas: {0}")]
    Serialize(#[from] serde_json::Error),

    #[error("invalid config {path}: {message}")]
    Config { path: String, message: String },
}

impl IdeaError {
    /// Machine-readable code for this error.
    #[must_use]
    pub const fn code(&self) -> ErrorCode {
        match self {
            Self::NotInitialized(_) => ErrorCode::NotInitialized,
            Self::IdeaNotFound(_) => ErrorCode::IdeaNotFound,
            Self::AmbiguousId { .. } => ErrorCode::AmbiguousId,
            Self::PermissionDenied(_) => ErrorCode::PermissionDenied,
            Self::Validation(_) => ErrorCode::ValidationFailed,
            Self::EmptyName => ErrorCode::EmptyName,
            Self::Import(_) => ErrorCode::InvalidImport,
            Self::Storage(_) => ErrorCode::StorageWriteFailed,
            Self::Serialize(_) => ErrorCode::InternalUnexpected,
            Self::Config { .. } => ErrorCode::ConfigParseError,
        }
    }

    /// Remediation text, falling back to the code summary.
    #[must_use]
    pub fn suggestion(&self) -> String {
        let code = self.code();
        code.hint().unwrap_or_else(|| code.message()).to_string()
    }
}

pub type Result<T, E = IdeaError> = std::result::Result<T, E>;
