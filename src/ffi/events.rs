//! # FFI Event System
//!
//! Pushes share outcomes from Rust to Swift/Kotlin via a registered C callback.

use std::ffi::CString;
use std::os::raw::c_char;

use once_cell::sync::Lazy;
use parking_lot::RwLock;

/// C callback receiving `(attempt_id, outcome_json)`
pub type OutcomeCallback = extern "C" fn(attempt_id: *const c_char, outcome_json: *const c_char);

// ============================================================================
// GLOBAL CALLBACK
// ============================================================================

static OUTCOME_CB: Lazy<RwLock<Option<OutcomeCallback>>> = Lazy::new(|| RwLock::new(None));

/// Register the outcome callback from the native side (Swift/Kotlin).
/// Replaces any earlier registration.
#[no_mangle]
pub extern "C" fn sharing_register_outcome_callback(cb: OutcomeCallback) {
    *OUTCOME_CB.write() = Some(cb);
}

// ============================================================================
// EVENT EMISSION
// ============================================================================

/// Emit a finished attempt's outcome to the native layer.
/// `data` is the JSON string from [`ShareOutcome::to_json`](crate::ShareOutcome::to_json)
pub(crate) fn emit_outcome(attempt_id: &str, data: &str) {
    let cb = *OUTCOME_CB.read();
    match cb {
        Some(cb) => {
            deliver(cb, attempt_id, data);
        }
        None => tracing::warn!(attempt = attempt_id, "No outcome callback registered; dropping outcome"),
    }
}

/// Hand one outcome to `cb`; returns whether it was delivered
fn deliver(cb: OutcomeCallback, attempt_id: &str, data: &str) -> bool {
    match (CString::new(attempt_id), CString::new(data)) {
        (Ok(id), Ok(json)) => {
            cb(id.as_ptr(), json.as_ptr());
            true
        }
        _ => {
            tracing::warn!(
                attempt = attempt_id,
                "Outcome contains an interior NUL; dropping outcome"
            );
            false
        }
    }
}
