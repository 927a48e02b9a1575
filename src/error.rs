//! Centralized error handling for the PDI editor
//!
//! One error type covers configuration, local I/O and every interaction with
//! the hosted backend (authentication, document rows, activity rows).

use log::warn;
use std::fmt;
use std::io;
use std::path::PathBuf;

// ─────────────────────────────────────────────────────────────────────────────
// Custom Result Type Alias
// ─────────────────────────────────────────────────────────────────────────────

/// A specialized `Result` type for the application.
pub type Result<T> = std::result::Result<T, Error>;

/// PostgREST error code returned when a single-object request matched no rows.
pub const NOT_FOUND_CODE: &str = "PGRST116";

/// The centralized error type for the application.
#[derive(Debug)]
pub enum Error {
    // ─────────────────────────────────────────────────────────────────────────
    // Local I/O and Configuration
    // ─────────────────────────────────────────────────────────────────────────
    /// Generic I/O error wrapper
    Io(io::Error),

    /// Failed to load configuration file
    ConfigLoad {
        path: PathBuf,
        source: Box<dyn std::error::Error + Send + Sync>,
    },

    /// Failed to save configuration file
    ConfigSave {
        path: PathBuf,
        source: Box<dyn std::error::Error + Send + Sync>,
    },

    /// Failed to parse configuration or a JSON payload
    ConfigParse {
        message: String,
        source: Option<Box<dyn std::error::Error + Send + Sync>>,
    },

    /// Configuration directory not found or inaccessible
    ConfigDirNotFound,

    // ─────────────────────────────────────────────────────────────────────────
    // Backend
    // ─────────────────────────────────────────────────────────────────────────
    /// Transport-level failure (DNS, TLS, timeout, body decoding)
    Http(reqwest::Error),

    /// Sign-in was rejected or no session is available
    Auth(String),

    /// The requested row does not exist (PostgREST `PGRST116`)
    NotFound { table: String },

    /// The backend answered with an error status
    Backend {
        status: u16,
        code: Option<String>,
        message: String,
    },

    // ─────────────────────────────────────────────────────────────────────────
    // Application Errors
    // ─────────────────────────────────────────────────────────────────────────
    /// Generic application error with a message
    Application(String),
}

impl Error {
    /// Whether this error is the store's "no such row" answer.
    pub fn is_not_found(&self) -> bool {
        matches!(self, Error::NotFound { .. })
    }
}

impl From<io::Error> for Error {
    fn from(err: io::Error) -> Self {
        Error::Io(err)
    }
}

impl From<serde_json::Error> for Error {
    fn from(err: serde_json::Error) -> Self {
        Error::ConfigParse {
            message: err.to_string(),
            source: Some(Box::new(err)),
        }
    }
}

impl From<reqwest::Error> for Error {
    fn from(err: reqwest::Error) -> Self {
        Error::Http(err)
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// Display trait implementation for user-friendly error messages
// ─────────────────────────────────────────────────────────────────────────────
impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Error::Io(err) => write!(f, "I/O error: {}", err),

            Error::ConfigLoad { path, source } => {
                write!(
                    f,
                    "Failed to load configuration from '{}': {}",
                    path.display(),
                    source
                )
            }
            Error::ConfigSave { path, source } => {
                write!(
                    f,
                    "Failed to save configuration to '{}': {}",
                    path.display(),
                    source
                )
            }
            Error::ConfigParse { message, .. } => {
                write!(f, "Invalid configuration format: {}", message)
            }
            Error::ConfigDirNotFound => {
                write!(f, "Configuration directory not found")
            }

            Error::Http(err) => write!(f, "Network error: {}", err),
            Error::Auth(msg) => write!(f, "Authentication failed: {}", msg),
            Error::NotFound { table } => write!(f, "No row found in '{}'", table),
            Error::Backend {
                status,
                code,
                message,
            } => match code {
                Some(code) => write!(f, "Backend error {} ({}): {}", status, code, message),
                None => write!(f, "Backend error {}: {}", status, message),
            },

            Error::Application(msg) => write!(f, "{}", msg),
        }
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// std::error::Error trait implementation for error chaining
// ─────────────────────────────────────────────────────────────────────────────
impl std::error::Error for Error {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Error::Io(err) => Some(err),
            Error::Http(err) => Some(err),
            Error::ConfigLoad { source, .. } => Some(source.as_ref()),
            Error::ConfigSave { source, .. } => Some(source.as_ref()),
            Error::ConfigParse { source, .. } => source
                .as_ref()
                .map(|s| s.as_ref() as &(dyn std::error::Error + 'static)),
            Error::ConfigDirNotFound
            | Error::Auth(_)
            | Error::NotFound { .. }
            | Error::Backend { .. }
            | Error::Application(_) => None,
        }
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// Graceful Degradation Helpers
// ─────────────────────────────────────────────────────────────────────────────

/// Extension trait for Result to support graceful degradation.
pub trait ResultExt<T> {
    /// If the result is an error, log it at warning level and return the provided default.
    fn unwrap_or_warn_default(self, default: T, context: &str) -> T;

    /// If the result is an error, log it at warning level and discard it.
    fn ok_or_warn(self, context: &str) -> Option<T>;
}

impl<T> ResultExt<T> for Result<T> {
    fn unwrap_or_warn_default(self, default: T, context: &str) -> T {
        match self {
            Ok(value) => value,
            Err(err) => {
                warn!("{}: {}. Using default.", context, err);
                default
            }
        }
    }

    fn ok_or_warn(self, context: &str) -> Option<T> {
        match self {
            Ok(value) => Some(value),
            Err(err) => {
                warn!("{}: {}", context, err);
                None
            }
        }
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// Tests
// ─────────────────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_io_error_creation() {
        let io_err = io::Error::new(io::ErrorKind::NotFound, "test error");
        let err = Error::from(io_err);
        assert!(matches!(err, Error::Io(_)));
    }

    #[test]
    fn test_serde_json_error_conversion() {
        let json_result: std::result::Result<String, _> = serde_json::from_str("invalid json");
        let err = Error::from(json_result.unwrap_err());
        assert!(matches!(err, Error::ConfigParse { .. }));
    }

    #[test]
    fn test_not_found_is_distinguished() {
        let err = Error::NotFound {
            table: "pdi_data".to_string(),
        };
        assert!(err.is_not_found());

        let err = Error::Backend {
            status: 500,
            code: None,
            message: "boom".to_string(),
        };
        assert!(!err.is_not_found());
    }

    #[test]
    fn test_display_backend_error_with_code() {
        let err = Error::Backend {
            status: 409,
            code: Some("23505".to_string()),
            message: "duplicate key".to_string(),
        };
        assert_eq!(
            err.to_string(),
            "Backend error 409 (23505): duplicate key"
        );
    }

    #[test]
    fn test_display_backend_error_without_code() {
        let err = Error::Backend {
            status: 502,
            code: None,
            message: "bad gateway".to_string(),
        };
        assert_eq!(err.to_string(), "Backend error 502: bad gateway");
    }

    #[test]
    fn test_display_auth_error() {
        let err = Error::Auth("invalid login credentials".to_string());
        assert!(err.to_string().contains("invalid login credentials"));
    }

    #[test]
    fn test_display_config_dir_not_found() {
        let err = Error::ConfigDirNotFound;
        assert_eq!(err.to_string(), "Configuration directory not found");
    }

    #[test]
    fn test_error_source_none_for_simple_variants() {
        use std::error::Error as StdError;
        assert!(Error::Application("test".to_string()).source().is_none());
        assert!(Error::Auth("x".to_string()).source().is_none());
        assert!(Error::ConfigDirNotFound.source().is_none());
    }

    #[test]
    fn test_error_source_io() {
        use std::error::Error as StdError;
        let err = Error::Io(io::Error::new(io::ErrorKind::NotFound, "not found"));
        assert!(err.source().is_some());
    }

    #[test]
    fn test_unwrap_or_warn_default() {
        let ok: Result<i32> = Ok(42);
        assert_eq!(ok.unwrap_or_warn_default(0, "ctx"), 42);

        let err: Result<i32> = Err(Error::Application("test".to_string()));
        assert_eq!(err.unwrap_or_warn_default(0, "ctx"), 0);
    }

    #[test]
    fn test_ok_or_warn() {
        let ok: Result<&str> = Ok("value");
        assert_eq!(ok.ok_or_warn("ctx"), Some("value"));

        let err: Result<&str> = Err(Error::Auth("nope".to_string()));
        assert_eq!(err.ok_or_warn("ctx"), None);
    }
}
