//! # Settings
//!
//! Typed access to the process-wide settings store.
//!
//! The store itself belongs to the native SDK and only speaks identifier
//! strings. [`Settings`] translates through [`LoggingBehavior`] so callers
//! never handle raw identifiers. [`MemorySettingsStore`] stands in for the
//! native store on hosts without one and in tests.

use std::collections::BTreeSet;

use parking_lot::RwLock;

use crate::logging_behavior::LoggingBehavior;

/// Behaviors enabled when nothing has been configured
pub const DEFAULT_LOGGING_BEHAVIORS: [LoggingBehavior; 1] = [LoggingBehavior::DeveloperErrors];

/// Backing store for SDK settings
pub trait SettingsStore: Send + Sync {
    /// Identifiers of the enabled logging behaviors
    fn logging_behaviors(&self) -> BTreeSet<String>;

    /// Replace the enabled logging behaviors
    fn set_logging_behaviors(&self, behaviors: BTreeSet<String>);
}

/// In-memory settings store
#[derive(Debug)]
pub struct MemorySettingsStore {
    logging_behaviors: RwLock<BTreeSet<String>>,
}

impl MemorySettingsStore {
    /// Create a store with the default behaviors enabled
    pub fn new() -> Self {
        Self {
            logging_behaviors: RwLock::new(
                DEFAULT_LOGGING_BEHAVIORS
                    .iter()
                    .map(|b| b.as_sdk_str().to_owned())
                    .collect(),
            ),
        }
    }
}

impl Default for MemorySettingsStore {
    fn default() -> Self {
        Self::new()
    }
}

impl SettingsStore for MemorySettingsStore {
    fn logging_behaviors(&self) -> BTreeSet<String> {
        self.logging_behaviors.read().clone()
    }

    fn set_logging_behaviors(&self, behaviors: BTreeSet<String>) {
        *self.logging_behaviors.write() = behaviors;
    }
}

/// Typed facade over a [`SettingsStore`]
#[derive(Debug, Default)]
pub struct Settings<S: SettingsStore = MemorySettingsStore> {
    store: S,
}

impl<S: SettingsStore> Settings<S> {
    /// Wrap a store
    pub fn new(store: S) -> Self {
        Self { store }
    }

    /// The underlying store
    pub fn store(&self) -> &S {
        &self.store
    }

    /// Enabled logging behaviors
    ///
    /// Identifiers this crate doesn't recognize are skipped.
    pub fn logging_behaviors(&self) -> BTreeSet<LoggingBehavior> {
        self.store
            .logging_behaviors()
            .iter()
            .filter_map(|id| {
                let behavior = LoggingBehavior::from_sdk_str(id);
                if behavior.is_none() {
                    tracing::trace!(id = %id, "skipping unknown logging behavior");
                }
                behavior
            })
            .collect()
    }

    /// Replace the enabled logging behaviors
    pub fn set_logging_behaviors<I>(&self, behaviors: I)
    where
        I: IntoIterator<Item = LoggingBehavior>,
    {
        let ids: BTreeSet<String> = behaviors
            .into_iter()
            .map(|b| b.as_sdk_str().to_owned())
            .collect();
        tracing::debug!(count = ids.len(), "updating logging behaviors");
        self.store.set_logging_behaviors(ids);
    }

    /// Enable one behavior, keeping the rest
    pub fn enable_logging_behavior(&self, behavior: LoggingBehavior) {
        let mut ids = self.store.logging_behaviors();
        if ids.insert(behavior.as_sdk_str().to_owned()) {
            self.store.set_logging_behaviors(ids);
        }
    }

    /// Disable one behavior, keeping the rest
    pub fn disable_logging_behavior(&self, behavior: LoggingBehavior) {
        let mut ids = self.store.logging_behaviors();
        if ids.remove(behavior.as_sdk_str()) {
            self.store.set_logging_behaviors(ids);
        }
    }

    /// Whether `behavior` is enabled
    pub fn is_logging_behavior_enabled(&self, behavior: LoggingBehavior) -> bool {
        self.store.logging_behaviors().contains(behavior.as_sdk_str())
    }
}

// ============================================================================
// TESTS
// ============================================================================
