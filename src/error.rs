//! # Error Handling
//!
//! Error types for the sharing bridge.
//!
//! ## Error Hierarchy
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                           ERROR HIERARCHY                               │
//! ├─────────────────────────────────────────────────────────────────────────┤
//! │                                                                         │
//! │  Error (top-level)                                                     │
//! │  │                                                                      │
//! │  ├── Lifecycle Errors (100-199)                                        │
//! │  │   ├── NotInitialized        - FFI state not initialized             │
//! │  │   ├── AlreadyInitialized    - FFI state already initialized         │
//! │  │   └── UnknownShareAttempt   - No in-flight attempt with that id     │
//! │  │                                                                      │
//! │  ├── Share Errors (200-299)                                            │
//! │  │   └── Share(ShareError)     - Mapped from the share error domain    │
//! │  │                                                                      │
//! │  ├── Bridging Errors (300-399)                                         │
//! │  │   └── BridgingFailed        - Native results did not parse          │
//! │  │                                                                      │
//! │  ├── Native Errors (400-499)                                           │
//! │  │   └── Native(NativeError)   - Platform error passed through         │
//! │  │                                                                      │
//! │  ├── Content Errors (500-599)                                          │
//! │  │   ├── InvalidContent        - Content failed validation             │
//! │  │   └── InvalidHashtag        - Hashtag is malformed                  │
//! │  │                                                                      │
//! │  └── Internal Errors (900-999)                                         │
//! │      ├── SerializationError                                            │
//! │      └── DeserializationError                                          │
//! │                                                                         │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! Errors produced while a share attempt is in flight never unwind across the
//! native boundary. They are delivered to the completion callback inside
//! [`ShareOutcome::Failed`](crate::ShareOutcome::Failed).

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::content::NativeResults;

/// Result type alias for sharing operations
pub type Result<T> = std::result::Result<T, Error>;

/// Error domain used by the native SDK for share-specific failures
pub const SHARE_ERROR_DOMAIN: &str = "com.facebook.sdk.share";

/// Main error type for the sharing bridge
#[derive(Error, Debug, Clone, PartialEq)]
pub enum Error {
    // ========================================================================
    // Lifecycle Errors (100-199)
    // ========================================================================

    /// FFI state has not been initialized
    #[error("Sharing core has not been initialized. Call sharing_init() first.")]
    NotInitialized,

    /// FFI state has already been initialized
    #[error("Sharing core has already been initialized.")]
    AlreadyInitialized,

    /// No in-flight share attempt has this id
    #[error("Unknown or finished share attempt: {0}")]
    UnknownShareAttempt(String),

    // ========================================================================
    // Share Errors (200-299)
    // ========================================================================

    /// A native error from the share error domain
    #[error("Share error: {0}")]
    Share(ShareError),

    // ========================================================================
    // Bridging Errors (300-399)
    // ========================================================================

    /// Sharing completed but the native results did not parse
    #[error(transparent)]
    BridgingFailed(#[from] BridgingFailedError),

    // ========================================================================
    // Native Errors (400-499)
    // ========================================================================

    /// A platform error with no domain mapping, passed through unchanged
    #[error("Native error: {0}")]
    Native(NativeError),

    // ========================================================================
    // Content Errors (500-599)
    // ========================================================================

    /// Content failed validation before the share attempt started
    #[error("Invalid share content: {0}")]
    InvalidContent(String),

    /// Hashtag is not `#` followed by word characters
    #[error("Invalid hashtag: {0:?}")]
    InvalidHashtag(String),

    // ========================================================================
    // Internal Errors (900-999)
    // ========================================================================

    /// Serialization error
    #[error("Serialization error: {0}")]
    SerializationError(String),

    /// Deserialization error
    #[error("Deserialization error: {0}")]
    DeserializationError(String),
}

impl Error {
    /// Translate a platform error into the domain error when a mapping
    /// exists, else pass it through unchanged.
    pub fn from_native(error: NativeError) -> Self {
        match ShareError::from_native(&error) {
            Some(share_error) => Error::Share(share_error),
            None => Error::Native(error),
        }
    }

    /// Get the error code for FFI
    ///
    /// Error codes are organized by category:
    /// - 100-199: Lifecycle
    /// - 200-299: Share domain (same numbers as the native codes)
    /// - 300-399: Bridging
    /// - 400-499: Native passthrough
    /// - 500-599: Content validation
    /// - 900-999: Internal
    pub fn code(&self) -> i32 {
        match self {
            // Lifecycle (100-199)
            Error::NotInitialized => 100,
            Error::AlreadyInitialized => 101,
            Error::UnknownShareAttempt(_) => 102,

            // Share (200-299)
            Error::Share(share_error) => share_error.code(),

            // Bridging (300-399)
            Error::BridgingFailed(_) => 300,

            // Native (400-499)
            Error::Native(_) => 400,

            // Content (500-599)
            Error::InvalidContent(_) => 500,
            Error::InvalidHashtag(_) => 501,

            // Internal (900-999)
            Error::SerializationError(_) => 902,
            Error::DeserializationError(_) => 903,
        }
    }

    /// Check if this error was caused by the content handed to the sharer
    ///
    /// These need fixing by the caller; retrying the same content fails again.
    pub fn is_content_error(&self) -> bool {
        matches!(self, Error::InvalidContent(_) | Error::InvalidHashtag(_))
    }
}

// ============================================================================
// SHARE DOMAIN
// ============================================================================

/// Share-specific failures reported by the native SDK
///
/// Only errors in [`SHARE_ERROR_DOMAIN`] with one of these codes are mapped;
/// everything else stays an [`Error::Native`].
#[derive(Error, Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ShareError {
    /// Reserved code
    #[error("reserved share error")]
    Reserved,

    /// Open Graph content or action was rejected
    #[error("Open Graph error")]
    OpenGraph,

    /// No dialog is available to share the content
    #[error("share dialog is not available")]
    DialogNotAvailable,

    /// Unknown share failure
    #[error("unknown share error")]
    Unknown,
}

impl ShareError {
    /// Map a native error code in the share domain
    pub fn from_code(code: i64) -> Option<Self> {
        match code {
            200 => Some(ShareError::Reserved),
            201 => Some(ShareError::OpenGraph),
            202 => Some(ShareError::DialogNotAvailable),
            203 => Some(ShareError::Unknown),
            _ => None,
        }
    }

    /// Map a native error, if it belongs to the share domain
    pub fn from_native(error: &NativeError) -> Option<Self> {
        if error.domain != SHARE_ERROR_DOMAIN {
            return None;
        }
        Self::from_code(error.code)
    }

    /// Native code for this error
    pub fn code(self) -> i32 {
        match self {
            ShareError::Reserved => 200,
            ShareError::OpenGraph => 201,
            ShareError::DialogNotAvailable => 202,
            ShareError::Unknown => 203,
        }
    }
}

// ============================================================================
// NATIVE ERROR
// ============================================================================

/// Error reported by the native sharing subsystem
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NativeError {
    /// Error domain, e.g. [`SHARE_ERROR_DOMAIN`]
    pub domain: String,
    /// Domain-specific code
    pub code: i64,
    /// Localized description, if the platform supplied one
    pub message: Option<String>,
    /// Extra platform data attached to the error
    #[serde(default)]
    pub user_info: NativeResults,
}

impl NativeError {
    /// Create an error with just a domain and code
    pub fn new(domain: impl Into<String>, code: i64) -> Self {
        Self {
            domain: domain.into(),
            code,
            message: None,
            user_info: NativeResults::new(),
        }
    }

    /// Attach a description
    pub fn with_message(mut self, message: impl Into<String>) -> Self {
        self.message = Some(message.into());
        self
    }
}

impl std::fmt::Display for NativeError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{} code {}", self.domain, self.code)?;
        if let Some(ref message) = self.message {
            write!(f, ": {}", message)?;
        }
        Ok(())
    }
}

impl std::error::Error for NativeError {}

// ============================================================================
// BRIDGING FAILURE
// ============================================================================

/// The native layer reported success but its results did not parse
///
/// Carries the original, unflattened payload so callers can see what the
/// platform actually returned.
#[derive(Error, Debug, Clone, PartialEq)]
#[error("failed to bridge native share results for {content_type}")]
pub struct BridgingFailedError {
    /// Type name of the content that was shared
    pub content_type: &'static str,
    /// Raw results exactly as the native layer delivered them
    pub native_results: NativeResults,
}

// ============================================================================
// ERROR CONVERSIONS
// ============================================================================

impl From<serde_json::Error> for Error {
    fn from(err: serde_json::Error) -> Self {
        Error::SerializationError(err.to_string())
    }
}

// ============================================================================
// FFI ERROR REPRESENTATION
// ============================================================================

/// FFI-friendly error representation
#[derive(Debug, Clone)]
pub struct FfiError {
    /// Numeric error code
    pub code: i32,
    /// Human-readable error message
    pub message: String,
}

impl From<Error> for FfiError {
    fn from(err: Error) -> Self {
        Self {
            code: err.code(),
            message: err.to_string(),
        }
    }
}

// ============================================================================
// TESTS
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_codes() {
        assert_eq!(Error::NotInitialized.code(), 100);
        assert_eq!(Error::Share(ShareError::Reserved).code(), 200);
        assert_eq!(Error::Share(ShareError::DialogNotAvailable).code(), 202);
        assert_eq!(Error::Native(NativeError::new("x", 5)).code(), 400);
        assert_eq!(Error::InvalidContent("test".into()).code(), 500);
        assert_eq!(Error::DeserializationError("test".into()).code(), 903);
    }

    #[test]
    fn test_share_domain_mapping() {
        let native = NativeError::new(SHARE_ERROR_DOMAIN, 202);
        assert_eq!(
            Error::from_native(native),
            Error::Share(ShareError::DialogNotAvailable)
        );
    }

    #[test]
    fn test_unmapped_native_error_passes_through() {
        let native = NativeError::new("com.example.platform", 5).with_message("boom");
        assert_eq!(Error::from_native(native.clone()), Error::Native(native));

        // Right domain, unknown code
        let native = NativeError::new(SHARE_ERROR_DOMAIN, 5);
        assert_eq!(Error::from_native(native.clone()), Error::Native(native));
    }

    #[test]
    fn test_share_error_codes_round_trip() {
        for code in 200..=203 {
            let share_error = ShareError::from_code(code).unwrap();
            assert_eq!(share_error.code() as i64, code);
        }
        assert!(ShareError::from_code(204).is_none());
    }

    #[test]
    fn test_content_errors() {
        assert!(Error::InvalidHashtag("nope".into()).is_content_error());
        assert!(!Error::Share(ShareError::Unknown).is_content_error());
    }

    #[test]
    fn test_native_error_display() {
        let err = NativeError::new("com.example", 7).with_message("no network");
        assert_eq!(err.to_string(), "com.example code 7: no network");
    }

    #[test]
    fn test_ffi_error_conversion() {
        let err = Error::InvalidContent("missing url".into());
        let ffi_err: FfiError = err.into();

        assert_eq!(ffi_err.code, 500);
        assert!(ffi_err.message.contains("missing url"));
    }
}
