//! # FFI Bindings
//!
//! C bindings that let the native share dialogs on iOS and Android report
//! back into the Rust core.
//!
//! ## Architecture
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                         FFI ARCHITECTURE                                │
//! ├─────────────────────────────────────────────────────────────────────────┤
//! │                                                                         │
//! │  Swift/Kotlin share dialog                                              │
//! │         │  sharing_attempt_completed / _failed / _cancelled             │
//! │         ▼                                                               │
//! │  ┌─────────────────────────────────────────────────────────────────┐   │
//! │  │  Attempt table (attempt id → SharingDelegateBridge)             │   │
//! │  └─────────────────────────────────────────────────────────────────┘   │
//! │         │  ShareOutcome → JSON                                          │
//! │         ▼                                                               │
//! │  Outcome callback (registered by the host)                             │
//! │                                                                         │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Error Handling
//!
//! Every call returns an [`FfiResult`] carrying [`Error::code`](crate::Error::code)
//! and its message on failure.

mod c_api;
mod events;
mod state;
mod types;

pub use c_api::*;
pub use events::{sharing_register_outcome_callback, OutcomeCallback};
pub use types::{cstr_to_string, sharing_free_result, sharing_free_string, FfiResult};
