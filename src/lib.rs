//! # Sharing Core
//!
//! Typed share results on top of a native social-sharing SDK.
//!
//! The native sharer reports back through an untyped delegate: a loose
//! dictionary on success, a platform error on failure, or a bare cancel.
//! This crate turns those events into a single [`ShareOutcome`] typed by the
//! content that was shared, and hands it to a completion exactly once.
//!
//! ## Architecture Overview
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                        SHARING CORE MODULES                             │
//! ├─────────────────────────────────────────────────────────────────────────┤
//! │                                                                         │
//! │  ┌─────────────┐     ┌──────────────────┐     ┌──────────────────┐     │
//! │  │   Content   │     │      Sharer      │     │     Outcome      │     │
//! │  │             │     │                  │     │                  │     │
//! │  │ - Link      │────►│ - set params     │     │ - Success(R)     │     │
//! │  │ - Photo     │     │ - show dialog    │     │ - Failed(Error)  │     │
//! │  │ - Video     │     │ - DelegateSlot   │     │ - Cancelled      │     │
//! │  └─────────────┘     └────────┬─────────┘     └────────▲─────────┘     │
//! │                               │ completed / failed /   │               │
//! │                               │ cancelled              │               │
//! │                               ▼                        │               │
//! │                      ┌──────────────────────────────────┴──────┐        │
//! │                      │      SharingDelegateBridge<C>           │        │
//! │                      │                                         │        │
//! │                      │ - flatten + parse C::Result             │        │
//! │                      │ - map share-domain errors               │        │
//! │                      │ - deliver completion exactly once       │        │
//! │                      └─────────────────────────────────────────┘        │
//! │                                                                         │
//! │  ┌─────────────┐     ┌──────────────────┐                              │
//! │  │  Settings   │────►│ LoggingBehavior  │                              │
//! │  └─────────────┘     └──────────────────┘                              │
//! │                                                                         │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Module Hierarchy
//!
//! - [`error`] - Error types for the entire library
//! - [`content`] - Shareable content and typed sharing results
//! - [`outcome`] - The outcome of one share attempt
//! - [`bridge`] - Delegate bridge from native events to outcomes
//! - [`sharer`] - The native sharer seam and the content sharer facade
//! - [`logging_behavior`] - SDK logging behaviors
//! - [`settings`] - Typed settings facade
//! - `ffi` - C bindings for native hosts (feature `ffi`)

#![warn(missing_docs)]
#![warn(rustdoc::missing_crate_level_docs)]
#![cfg_attr(docsrs, feature(doc_cfg))]

// ============================================================================
// MODULE DECLARATIONS
// ============================================================================

pub mod bridge;
pub mod content;
pub mod error;
pub mod logging_behavior;
pub mod outcome;
pub mod settings;
pub mod sharer;

#[cfg(feature = "ffi")]
pub mod ffi;

// ============================================================================
// RE-EXPORTS
// ============================================================================

pub use bridge::{Completion, DelegateSlot, SharingDelegate, SharingDelegateBridge};
pub use content::{
    Hashtag, LinkShareContent, Photo, PhotoShareContent, PostSharingResult, ShareCommon,
    ShareableContent, SharingResult, VideoShareContent,
};
pub use error::{BridgingFailedError, Error, NativeError, Result, ShareError};
pub use logging_behavior::LoggingBehavior;
pub use outcome::ShareOutcome;
pub use settings::{MemorySettingsStore, Settings, SettingsStore};
pub use sharer::{share, ContentSharer, Sharer};

// ============================================================================
// VERSION INFO
// ============================================================================

/// Returns the version of the sharing core
pub fn version() -> &'static str {
    env!("CARGO_PKG_VERSION")
}

// ============================================================================
// TESTS
// ============================================================================
