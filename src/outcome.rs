//! # Share Outcome
//!
//! The single, terminal result of one share attempt.

use std::fmt;

use serde::Serialize;
use serde_json::json;

use crate::content::ShareableContent;
use crate::error::Error;

/// Outcome of a share attempt for content `C`
///
/// Built exactly once per attempt and handed to the completion callback.
pub enum ShareOutcome<C: ShareableContent> {
    /// Sharing completed and the native results parsed
    Success(C::Result),
    /// The native layer reported an error, the results did not parse, or the
    /// content was rejected before the attempt started
    Failed(Error),
    /// The user backed out of the share flow
    Cancelled,
}

impl<C: ShareableContent> ShareOutcome<C> {
    /// Whether the share succeeded
    pub fn is_success(&self) -> bool {
        matches!(self, ShareOutcome::Success(_))
    }

    /// Whether the user cancelled
    pub fn is_cancelled(&self) -> bool {
        matches!(self, ShareOutcome::Cancelled)
    }

    /// The parsed result, if the share succeeded
    pub fn result(&self) -> Option<&C::Result> {
        match self {
            ShareOutcome::Success(result) => Some(result),
            _ => None,
        }
    }

    /// The error, if the share failed
    pub fn error(&self) -> Option<&Error> {
        match self {
            ShareOutcome::Failed(error) => Some(error),
            _ => None,
        }
    }

    /// Short status label, also used as the `status` field of the JSON form
    pub fn status(&self) -> &'static str {
        match self {
            ShareOutcome::Success(_) => "success",
            ShareOutcome::Failed(_) => "failed",
            ShareOutcome::Cancelled => "cancelled",
        }
    }

    /// Convert into a plain `Result`, with cancellation as `Ok(None)`
    pub fn into_result(self) -> crate::Result<Option<C::Result>> {
        match self {
            ShareOutcome::Success(result) => Ok(Some(result)),
            ShareOutcome::Failed(error) => Err(error),
            ShareOutcome::Cancelled => Ok(None),
        }
    }
}

impl<C: ShareableContent> ShareOutcome<C>
where
    C::Result: Serialize,
{
    /// JSON form pushed to native hosts
    ///
    /// ```text
    /// {"status":"success","result":{...}}
    /// {"status":"failed","error":{"code":300,"message":"...","native_results":{...}}}
    /// {"status":"cancelled"}
    /// ```
    pub fn to_json(&self) -> serde_json::Value {
        match self {
            ShareOutcome::Success(result) => {
                let result = serde_json::to_value(result).unwrap_or_else(|e| {
                    tracing::error!("Failed to encode share result: {}", e);
                    serde_json::Value::Null
                });
                json!({ "status": self.status(), "result": result })
            }
            ShareOutcome::Failed(error) => {
                let mut body = json!({ "code": error.code(), "message": error.to_string() });
                if let Error::BridgingFailed(bridging) = error {
                    body["native_results"] = serde_json::Value::Object(bridging.native_results.clone());
                }
                json!({ "status": self.status(), "error": body })
            }
            ShareOutcome::Cancelled => json!({ "status": self.status() }),
        }
    }
}

impl<C: ShareableContent> fmt::Debug for ShareOutcome<C>
where
    C::Result: fmt::Debug,
{
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ShareOutcome::Success(result) => f.debug_tuple("Success").field(result).finish(),
            ShareOutcome::Failed(error) => f.debug_tuple("Failed").field(error).finish(),
            ShareOutcome::Cancelled => f.write_str("Cancelled"),
        }
    }
}

impl<C: ShareableContent> PartialEq for ShareOutcome<C>
where
    C::Result: PartialEq,
{
    fn eq(&self, other: &Self) -> bool {
        match (self, other) {
            (ShareOutcome::Success(a), ShareOutcome::Success(b)) => a == b,
            (ShareOutcome::Failed(a), ShareOutcome::Failed(b)) => a == b,
            (ShareOutcome::Cancelled, ShareOutcome::Cancelled) => true,
            _ => false,
        }
    }
}

impl<C: ShareableContent> Clone for ShareOutcome<C>
where
    C::Result: Clone,
{
    fn clone(&self) -> Self {
        match self {
            ShareOutcome::Success(result) => ShareOutcome::Success(result.clone()),
            ShareOutcome::Failed(error) => ShareOutcome::Failed(error.clone()),
            ShareOutcome::Cancelled => ShareOutcome::Cancelled,
        }
    }
}

// ============================================================================
// TESTS
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::content::{LinkShareContent, NativeResults, PostSharingResult};
    use crate::error::{BridgingFailedError, ShareError};

    type LinkOutcome = ShareOutcome<LinkShareContent>;

    #[test]
    fn test_outcome_accessors() {
        let success = LinkOutcome::Success(PostSharingResult {
            post_id: "1".into(),
        });
        assert!(success.is_success());
        assert_eq!(success.result().map(|r| r.post_id.as_str()), Some("1"));
        assert!(success.error().is_none());

        let cancelled = LinkOutcome::Cancelled;
        assert!(cancelled.is_cancelled());
        assert_eq!(cancelled.into_result(), Ok(None));
    }

    #[test]
    fn test_success_json() {
        let outcome = LinkOutcome::Success(PostSharingResult {
            post_id: "123".into(),
        });
        assert_eq!(
            outcome.to_json(),
            json!({ "status": "success", "result": { "post_id": "123" } })
        );
    }

    #[test]
    fn test_bridging_failure_json_carries_native_results() {
        let mut native_results = NativeResults::new();
        native_results.insert("post_id".into(), json!(123));
        let outcome = LinkOutcome::Failed(Error::BridgingFailed(BridgingFailedError {
            content_type: "LinkShareContent",
            native_results,
        }));

        let value = outcome.to_json();
        assert_eq!(value["status"], "failed");
        assert_eq!(value["error"]["code"], 300);
        assert_eq!(value["error"]["native_results"], json!({ "post_id": 123 }));
    }

    #[test]
    fn test_share_error_json() {
        let outcome = LinkOutcome::Failed(Error::Share(ShareError::DialogNotAvailable));
        let value = outcome.to_json();
        assert_eq!(value["error"]["code"], 202);
        assert!(value["error"].get("native_results").is_none());
        assert_eq!(LinkOutcome::Cancelled.to_json(), json!({ "status": "cancelled" }));
    }
}
