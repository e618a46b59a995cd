//! # C API
//!
//! `extern "C"` entry points for iOS (Swift) and Android (via a JNI shim).
//!
//! ## Attempt lifecycle
//!
//! ```text
//! native                                   sharing-core
//! ──────                                   ────────────
//! sharing_attempt_begin("link")   ───────▶ bridge stored in attempt table
//!                                 ◀─────── attempt id
//! (native dialog runs)
//! sharing_attempt_completed(id, json) ───▶ bridge removed, outcome built
//!                                 ◀─────── outcome callback(id, outcome json)
//! ```
//!
//! Each attempt id accepts exactly one terminal call. Later calls for the
//! same id return error 102.

use std::ffi::CStr;
use std::os::raw::c_char;
use std::sync::Arc;

use serde::Serialize;
use tracing::{debug, info};

use super::events;
use super::state::{get_state, init_state, FfiState};
use super::types::{cstr_to_string, into_c_string, FfiResult};
use crate::bridge::{SharingDelegate, SharingDelegateBridge};
use crate::content::{
    LinkShareContent, NativeResults, PhotoShareContent, ShareableContent, VideoShareContent,
};
use crate::error::{Error, NativeError, Result};
use crate::logging_behavior::LoggingBehavior;
use crate::outcome::ShareOutcome;

// ============================================================================
// INITIALIZATION
// ============================================================================

/// Initialize the sharing core
///
/// Must be called once before any other attempt or settings function.
#[no_mangle]
pub extern "C" fn sharing_init() -> FfiResult {
    match init_state(FfiState::new()) {
        Ok(()) => {
            info!("sharing-core initialized");
            FfiResult::ok_empty()
        }
        Err(e) => e.into(),
    }
}

/// Library version
///
/// The returned string must be released with `sharing_free_string`.
#[no_mangle]
pub extern "C" fn sharing_version() -> *mut c_char {
    into_c_string(crate::version().to_string())
}

// ============================================================================
// SHARE ATTEMPTS
// ============================================================================

/// Start tracking a share attempt for `content_kind` (`link`, `photo` or `video`)
///
/// On success `data` holds the attempt id to pass to the terminal calls.
///
/// # Safety
/// `content_kind` must be a valid null-terminated string.
#[no_mangle]
pub unsafe extern "C" fn sharing_attempt_begin(content_kind: *const c_char) -> FfiResult {
    let kind = match cstr_to_string(content_kind) {
        Some(k) => k,
        None => return FfiResult::err(500, "Invalid content kind".into()),
    };

    let attempt = match kind.as_str() {
        "link" => begin_attempt::<LinkShareContent>(),
        "photo" => begin_attempt::<PhotoShareContent>(),
        "video" => begin_attempt::<VideoShareContent>(),
        other => Err(Error::InvalidContent(format!("unknown content kind: {}", other))),
    };
    FfiResult::from_result(attempt)
}

/// Report that the native dialog finished with `results_json`
///
/// A null `results_json` is an empty payload. A payload that isn't UTF-8
/// JSON is rejected with 903 and the attempt stays open.
///
/// # Safety
/// `attempt_id` must be a valid null-terminated string; `results_json` must
/// be null or a valid null-terminated string.
#[no_mangle]
pub unsafe extern "C" fn sharing_attempt_completed(
    attempt_id: *const c_char,
    results_json: *const c_char,
) -> FfiResult {
    let id = match cstr_to_string(attempt_id) {
        Some(id) => id,
        None => return FfiResult::err(102, "Invalid attempt id".into()),
    };
    let results: NativeResults = if results_json.is_null() {
        NativeResults::new()
    } else {
        let parsed = CStr::from_ptr(results_json)
            .to_str()
            .map_err(|e| Error::DeserializationError(e.to_string()))
            .and_then(|json| {
                serde_json::from_str(json).map_err(|e| Error::DeserializationError(e.to_string()))
            });
        match parsed {
            Ok(results) => results,
            Err(e) => return e.into(),
        }
    };

    match take_attempt(&id) {
        Ok(delegate) => {
            delegate.on_completed(results);
            FfiResult::ok_empty()
        }
        Err(e) => e.into(),
    }
}

/// Report that the native dialog failed
///
/// `message` may be null.
///
/// # Safety
/// `attempt_id` and `domain` must be valid null-terminated strings; `message`
/// must be null or a valid null-terminated string.
#[no_mangle]
pub unsafe extern "C" fn sharing_attempt_failed(
    attempt_id: *const c_char,
    domain: *const c_char,
    code: i64,
    message: *const c_char,
) -> FfiResult {
    let id = match cstr_to_string(attempt_id) {
        Some(id) => id,
        None => return FfiResult::err(102, "Invalid attempt id".into()),
    };
    let domain = cstr_to_string(domain).unwrap_or_default();
    let mut error = NativeError::new(domain, code);
    if let Some(message) = cstr_to_string(message) {
        error = error.with_message(message);
    }

    match take_attempt(&id) {
        Ok(delegate) => {
            delegate.on_failed(error);
            FfiResult::ok_empty()
        }
        Err(e) => e.into(),
    }
}

/// Report that the user cancelled the native dialog
///
/// # Safety
/// `attempt_id` must be a valid null-terminated string.
#[no_mangle]
pub unsafe extern "C" fn sharing_attempt_cancelled(attempt_id: *const c_char) -> FfiResult {
    let id = match cstr_to_string(attempt_id) {
        Some(id) => id,
        None => return FfiResult::err(102, "Invalid attempt id".into()),
    };

    match take_attempt(&id) {
        Ok(delegate) => {
            delegate.on_cancelled();
            FfiResult::ok_empty()
        }
        Err(e) => e.into(),
    }
}

// ============================================================================
// SETTINGS
// ============================================================================

/// Enabled logging behaviors as a JSON array of identifiers
#[no_mangle]
pub extern "C" fn sharing_logging_behaviors() -> FfiResult {
    let result = get_state().and_then(|state| {
        let behaviors: Vec<LoggingBehavior> =
            state.read().settings.logging_behaviors().into_iter().collect();
        Ok(serde_json::to_string(&behaviors)?)
    });
    FfiResult::from_result(result)
}

/// Replace the enabled logging behaviors from a JSON array of identifiers
///
/// Identifiers this crate doesn't recognize are dropped.
///
/// # Safety
/// `behaviors_json` must be a valid null-terminated string.
#[no_mangle]
pub unsafe extern "C" fn sharing_set_logging_behaviors(behaviors_json: *const c_char) -> FfiResult {
    let json = match cstr_to_string(behaviors_json) {
        Some(j) => j,
        None => return FfiResult::err(903, "Invalid behaviors JSON".into()),
    };

    let result = get_state().and_then(|state| {
        let ids: Vec<String> = serde_json::from_str(&json)
            .map_err(|e| Error::DeserializationError(e.to_string()))?;
        let behaviors = ids.iter().filter_map(|id| {
            let behavior = LoggingBehavior::from_sdk_str(id);
            if behavior.is_none() {
                debug!(id = %id, "dropping unknown logging behavior");
            }
            behavior
        });
        state.read().settings.set_logging_behaviors(behaviors);
        Ok(())
    });
    match result {
        Ok(()) => FfiResult::ok_empty(),
        Err(e) => e.into(),
    }
}

// ============================================================================
// HELPERS
// ============================================================================

fn begin_attempt<C>() -> Result<String>
where
    C: ShareableContent,
    C::Result: Serialize,
{
    let state = get_state()?;

    let bridge = SharingDelegateBridge::<C>::new();
    let attempt_id = bridge.attempt_id();
    let event_id = attempt_id.to_string();
    bridge.set_completion(move |outcome: ShareOutcome<C>| {
        events::emit_outcome(&event_id, &outcome.to_json().to_string());
    });

    state.write().attempts.insert(attempt_id, Arc::new(bridge));
    debug!(attempt = %attempt_id, "share attempt started");
    Ok(attempt_id.to_string())
}

/// Remove the attempt before firing it so the outcome callback runs without
/// the state lock held.
fn take_attempt(attempt_id: &str) -> Result<Arc<dyn SharingDelegate>> {
    let state = get_state()?;
    let delegate = state.write().take_attempt(attempt_id)?;
    Ok(delegate)
}

// ============================================================================
// TESTS
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ffi::{sharing_free_result, sharing_register_outcome_callback};
    use once_cell::sync::Lazy;
    use parking_lot::Mutex;
    use std::ffi::CString;

    static OUTCOMES: Lazy<Mutex<Vec<(String, serde_json::Value)>>> =
        Lazy::new(|| Mutex::new(Vec::new()));

    extern "C" fn record_outcome(attempt_id: *const c_char, outcome_json: *const c_char) {
        let (id, json) = unsafe {
            (
                CStr::from_ptr(attempt_id).to_string_lossy().into_owned(),
                CStr::from_ptr(outcome_json).to_string_lossy().into_owned(),
            )
        };
        OUTCOMES
            .lock()
            .push((id, serde_json::from_str(&json).unwrap()));
    }

    fn outcome_for(id: &str) -> Option<serde_json::Value> {
        OUTCOMES
            .lock()
            .iter()
            .find(|(attempt, _)| attempt == id)
            .map(|(_, outcome)| outcome.clone())
    }

    unsafe fn begin(kind: &str) -> String {
        let kind = CString::new(kind).unwrap();
        let result = sharing_attempt_begin(kind.as_ptr());
        assert_eq!(result.success, 1);
        let id = CStr::from_ptr(result.data).to_str().unwrap().to_string();
        sharing_free_result(result);
        id
    }

    // One test drives the whole surface: the state and callback are global.
    #[test]
    fn test_attempt_lifecycle_through_c_api() {
        let init = sharing_init();
        assert!(init.success == 1 || init.error_code == 101);
        unsafe { sharing_free_result(init) };
        sharing_register_outcome_callback(record_outcome);

        unsafe {
            // Completed with a parsable result
            let link = begin("link");
            let id = CString::new(link.clone()).unwrap();
            let json = CString::new(r#"{"post_id":"42_7","extra":1}"#).unwrap();
            let result = sharing_attempt_completed(id.as_ptr(), json.as_ptr());
            assert_eq!(result.success, 1);
            sharing_free_result(result);

            let outcome = outcome_for(&link).unwrap();
            assert_eq!(outcome["status"], "success");
            assert_eq!(outcome["result"]["post_id"], "42_7");

            // A second terminal call for the same attempt is rejected
            let again = sharing_attempt_cancelled(id.as_ptr());
            assert_eq!(again.success, 0);
            assert_eq!(again.error_code, 102);
            sharing_free_result(again);

            // Completed without a post id becomes a bridging failure, but a
            // payload that isn't UTF-8 is rejected and leaves the attempt open
            let photo = begin("photo");
            let id = CString::new(photo.clone()).unwrap();
            let not_utf8 = CString::new(vec![b'{', 0xff, 0xfe, b'}']).unwrap();
            let result = sharing_attempt_completed(id.as_ptr(), not_utf8.as_ptr());
            assert_eq!(result.success, 0);
            assert_eq!(result.error_code, 903);
            sharing_free_result(result);
            assert!(outcome_for(&photo).is_none());

            let json = CString::new("{}").unwrap();
            let result = sharing_attempt_completed(id.as_ptr(), json.as_ptr());
            sharing_free_result(result);
            let outcome = outcome_for(&photo).unwrap();
            assert_eq!(outcome["status"], "failed");
            assert_eq!(outcome["error"]["code"], 300);

            // Share-domain failure maps to its share error code
            let video = begin("video");
            let id = CString::new(video.clone()).unwrap();
            let domain = CString::new(crate::error::SHARE_ERROR_DOMAIN).unwrap();
            let message = CString::new("dialog unavailable").unwrap();
            let result = sharing_attempt_failed(id.as_ptr(), domain.as_ptr(), 202, message.as_ptr());
            sharing_free_result(result);
            let outcome = outcome_for(&video).unwrap();
            assert_eq!(outcome["status"], "failed");
            assert_eq!(outcome["error"]["code"], 202);

            // Cancellation
            let cancelled = begin("link");
            let id = CString::new(cancelled.clone()).unwrap();
            let result = sharing_attempt_cancelled(id.as_ptr());
            sharing_free_result(result);
            assert_eq!(outcome_for(&cancelled).unwrap()["status"], "cancelled");

            // Unknown content kind
            let kind = CString::new("story").unwrap();
            let result = sharing_attempt_begin(kind.as_ptr());
            assert_eq!(result.success, 0);
            assert_eq!(result.error_code, 500);
            sharing_free_result(result);

            // Unknown attempt id
            let bogus = CString::new("not-an-attempt").unwrap();
            let result = sharing_attempt_cancelled(bogus.as_ptr());
            assert_eq!(result.error_code, 102);
            sharing_free_result(result);

            // Settings
            let json = CString::new(r#"["app_events","network_requests"]"#).unwrap();
            let result = sharing_set_logging_behaviors(json.as_ptr());
            assert_eq!(result.success, 1);
            sharing_free_result(result);

            let result = sharing_logging_behaviors();
            assert_eq!(result.success, 1);
            let data = CStr::from_ptr(result.data).to_str().unwrap().to_string();
            sharing_free_result(result);
            assert_eq!(data, r#"["app_events","network_requests"]"#);

            let mixed = CString::new(r#"["verbose","cache_errors"]"#).unwrap();
            let result = sharing_set_logging_behaviors(mixed.as_ptr());
            assert_eq!(result.success, 1);
            sharing_free_result(result);
            let result = sharing_logging_behaviors();
            let data = CStr::from_ptr(result.data).to_str().unwrap().to_string();
            sharing_free_result(result);
            assert_eq!(data, r#"["cache_errors"]"#);

            let bad = CString::new("not json").unwrap();
            let result = sharing_set_logging_behaviors(bad.as_ptr());
            assert_eq!(result.error_code, 903);
            sharing_free_result(result);
        }
    }
}
