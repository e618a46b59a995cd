//! Walk through one share attempt per outcome against a scripted sharer.
//!
//! ```text
//! RUST_LOG=debug cargo run --example share_flow
//! ```

use std::sync::Arc;

use serde_json::json;
use sharing_core::content::ShareParameters;
use sharing_core::error::SHARE_ERROR_DOMAIN;
use sharing_core::{
    ContentSharer, DelegateSlot, Hashtag, LinkShareContent, LoggingBehavior, MemorySettingsStore,
    NativeError, Photo, PhotoShareContent, Settings, ShareOutcome, ShareableContent, Sharer,
    SharingDelegate, VideoShareContent,
};

/// What the pretend dialog does once shown
enum Script {
    Post(&'static str),
    EmptyResults,
    Fail(NativeError),
    Cancel,
}

/// Stand-in for a platform share dialog
struct ScriptedSharer {
    slot: DelegateSlot,
    script: Option<Script>,
}

impl ScriptedSharer {
    fn new(script: Script) -> Self {
        Self {
            slot: DelegateSlot::new(),
            script: Some(script),
        }
    }
}

impl Sharer for ScriptedSharer {
    fn set_delegate(&mut self, delegate: Option<Arc<dyn SharingDelegate>>) {
        self.slot.set(delegate);
    }

    fn delegate(&self) -> Option<Arc<dyn SharingDelegate>> {
        self.slot.get()
    }

    fn set_share_parameters(&mut self, parameters: ShareParameters) {
        tracing::info!(?parameters, "dialog received parameters");
    }

    fn show(&mut self) {
        match self.script.take() {
            Some(Script::Post(id)) => {
                let results = json!({ "post_id": id, "completionGesture": "post" });
                if let serde_json::Value::Object(results) = results {
                    self.slot.complete(results);
                }
            }
            Some(Script::EmptyResults) => {
                self.slot.complete(Default::default());
            }
            Some(Script::Fail(error)) => {
                self.slot.fail(error);
            }
            Some(Script::Cancel) => {
                self.slot.cancel();
            }
            None => tracing::warn!("dialog already used"),
        }
    }
}

fn report<C>(label: &'static str) -> impl FnOnce(ShareOutcome<C>) + Send + 'static
where
    C: ShareableContent,
    C::Result: serde::Serialize,
{
    move |outcome: ShareOutcome<C>| tracing::info!(label, outcome = %outcome.to_json(), "share finished")
}

fn main() -> sharing_core::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "info,sharing_core=debug".into()),
        )
        .init();

    tracing::info!("sharing-core v{}", sharing_core::version());

    let settings = Settings::new(MemorySettingsStore::new());
    settings.enable_logging_behavior(LoggingBehavior::NetworkRequests);
    tracing::info!(behaviors = ?settings.logging_behaviors(), "logging behaviors");

    let mut link = LinkShareContent::new("https://example.com/article").with_quote("Worth a read");
    link.common.hashtag = Some(Hashtag::new("#rustlang")?);

    let mut sharer = ContentSharer::new(ScriptedSharer::new(Script::Post("1234_5678")), link.clone());
    sharer.share(report::<LinkShareContent>("link posted"));

    let mut sharer = ContentSharer::new(ScriptedSharer::new(Script::EmptyResults), link);
    sharer.share(report::<LinkShareContent>("link without post id"));

    let photos = PhotoShareContent::new(vec![Photo::new("file:///tmp/cat.jpg")]);
    let dialog_missing =
        NativeError::new(SHARE_ERROR_DOMAIN, 202).with_message("no share dialog installed");
    let mut sharer = ContentSharer::new(ScriptedSharer::new(Script::Fail(dialog_missing)), photos);
    sharer.share(report::<PhotoShareContent>("photo"));

    let video = VideoShareContent::new("file:///tmp/clip.mp4");
    let mut sharer = ContentSharer::new(ScriptedSharer::new(Script::Cancel), video);
    sharer.share(report::<VideoShareContent>("video"));

    // Rejected before the dialog is touched
    let mut sharer = ContentSharer::new(
        ScriptedSharer::new(Script::Cancel),
        PhotoShareContent::new(Vec::new()),
    );
    sharer.share(report::<PhotoShareContent>("empty photo set"));

    Ok(())
}
