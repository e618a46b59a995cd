//! # Shared FFI State
//!
//! Global settings and the table of in-flight share attempts.
//!
//! The attempt table is what keeps each bridge alive on the native side of
//! the boundary: the native host only holds the attempt id.

use std::collections::HashMap;
use std::sync::Arc;

use once_cell::sync::OnceCell;
use parking_lot::RwLock;
use uuid::Uuid;

use crate::bridge::SharingDelegate;
use crate::error::{Error, Result};
use crate::settings::Settings;

/// Global state
static STATE: OnceCell<Arc<RwLock<FfiState>>> = OnceCell::new();

/// FFI state
pub(crate) struct FfiState {
    pub settings: Settings,
    pub attempts: HashMap<Uuid, Arc<dyn SharingDelegate>>,
}

impl FfiState {
    pub fn new() -> Self {
        Self {
            settings: Settings::default(),
            attempts: HashMap::new(),
        }
    }

    /// Remove an attempt, handing back its owning reference
    pub fn take_attempt(&mut self, attempt_id: &str) -> Result<Arc<dyn SharingDelegate>> {
        Uuid::parse_str(attempt_id)
            .ok()
            .and_then(|id| self.attempts.remove(&id))
            .ok_or_else(|| Error::UnknownShareAttempt(attempt_id.to_string()))
    }
}

pub(crate) fn get_state() -> Result<Arc<RwLock<FfiState>>> {
    STATE.get().cloned().ok_or(Error::NotInitialized)
}

pub(crate) fn init_state(state: FfiState) -> Result<()> {
    STATE
        .set(Arc::new(RwLock::new(state)))
        .map_err(|_| Error::AlreadyInitialized)
}
