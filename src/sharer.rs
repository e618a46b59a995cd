//! # Content Sharer
//!
//! The native sharer handle and a typed driver for one share attempt.
//!
//! ```text
//!   share(sharer, content, completion)
//!       │
//!       ├── validate()  ── Err ──► completion(Failed(err))   (sharer untouched)
//!       │
//!       ├── sharer.set_share_parameters(content.to_parameters())
//!       ├── SharingDelegateBridge::with_completion(completion).attach(sharer)
//!       └── sharer.show()  ─────► outcome arrives later via the delegate
//! ```

use std::sync::Arc;

use crate::bridge::{SharingDelegate, SharingDelegateBridge};
use crate::content::{ShareParameters, ShareableContent};
use crate::outcome::ShareOutcome;

/// A native component that runs a share flow and reports one terminal event
///
/// Implementations own the delegate they are given until they report a
/// terminal event; [`DelegateSlot`](crate::DelegateSlot) handles that.
pub trait Sharer {
    /// Attach the event sink for the next attempt
    fn set_delegate(&mut self, delegate: Option<Arc<dyn SharingDelegate>>);

    /// The attached event sink
    fn delegate(&self) -> Option<Arc<dyn SharingDelegate>>;

    /// Content to share, already flattened
    fn set_share_parameters(&mut self, parameters: ShareParameters);

    /// Start the share flow
    ///
    /// Failures to present are reported through the delegate, not returned.
    fn show(&mut self);
}

/// Run one share attempt of `content` on `sharer`
pub fn share<C, S, F>(sharer: &mut S, content: &C, completion: F)
where
    C: ShareableContent,
    S: Sharer + ?Sized,
    F: FnOnce(ShareOutcome<C>) + Send + 'static,
{
    if let Err(e) = content.validate() {
        tracing::warn!("Rejected share content: {}", e);
        completion(ShareOutcome::Failed(e));
        return;
    }

    sharer.set_share_parameters(content.to_parameters());
    Arc::new(SharingDelegateBridge::<C>::with_completion(completion)).attach(sharer);
    sharer.show();
}

/// Typed wrapper pairing a native sharer with the content it shares
#[derive(Debug)]
pub struct ContentSharer<C: ShareableContent, S: Sharer> {
    sharer: S,
    content: C,
}

impl<C: ShareableContent, S: Sharer> ContentSharer<C, S> {
    /// Wrap `sharer` to share `content`
    pub fn new(sharer: S, content: C) -> Self {
        Self { sharer, content }
    }

    /// Content that will be shared
    pub fn content(&self) -> &C {
        &self.content
    }

    /// Replace the content for the next attempt
    pub fn set_content(&mut self, content: C) {
        self.content = content;
    }

    /// The wrapped native sharer
    pub fn sharer(&self) -> &S {
        &self.sharer
    }

    /// Mutable access to the wrapped native sharer
    pub fn sharer_mut(&mut self) -> &mut S {
        &mut self.sharer
    }

    /// Start a share attempt; `completion` receives its outcome exactly once
    pub fn share<F>(&mut self, completion: F)
    where
        F: FnOnce(ShareOutcome<C>) + Send + 'static,
    {
        share(&mut self.sharer, &self.content, completion);
    }

    /// Unwrap into the sharer and content
    pub fn into_parts(self) -> (S, C) {
        (self.sharer, self.content)
    }
}

// ============================================================================
// TEST SUPPORT
// ============================================================================

#[cfg(test)]
pub(crate) mod testing {
    use super::*;
    use crate::bridge::DelegateSlot;

    /// In-memory sharer that records what it was asked to do
    #[derive(Debug, Default)]
    pub(crate) struct RecordingSharer {
        pub slot: DelegateSlot,
        pub parameters: Option<ShareParameters>,
        pub shown: usize,
    }

    impl Sharer for RecordingSharer {
        fn set_delegate(&mut self, delegate: Option<Arc<dyn SharingDelegate>>) {
            self.slot.set(delegate);
        }

        fn delegate(&self) -> Option<Arc<dyn SharingDelegate>> {
            self.slot.get()
        }

        fn set_share_parameters(&mut self, parameters: ShareParameters) {
            self.parameters = Some(parameters);
        }

        fn show(&mut self) {
            self.shown += 1;
        }
    }
}

// ============================================================================
// TESTS
// ============================================================================
