//! # Shareable Content
//!
//! Content types that can be handed to a native sharer, and the results they
//! parse back out of a completed share.
//!
//! ## Data Flow
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                         CONTENT ROUND TRIP                              │
//! ├─────────────────────────────────────────────────────────────────────────┤
//! │                                                                         │
//! │  LinkShareContent ─┐                                                    │
//! │  PhotoShareContent ├──► to_parameters() ──► ShareParameters ──► Sharer  │
//! │  VideoShareContent ┘      (String → String)                     │       │
//! │                                                                 │       │
//! │                                                                 ▼       │
//! │  C::Result ◄── from_results() ◄── flatten ◄── NativeResults (String →   │
//! │  (PostSharingResult)        (String → String)      any JSON value)      │
//! │                                                                         │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! Flattening keeps only string values. Anything else the native layer put
//! in the payload (numbers, nested objects) is dropped before parsing; the
//! untouched payload is still available through
//! [`BridgingFailedError`](crate::error::BridgingFailedError) when parsing
//! fails.

mod link;
mod photo;
mod result;
mod video;

pub use link::LinkShareContent;
pub use photo::{Photo, PhotoShareContent, MAX_PHOTOS};
pub use result::PostSharingResult;
pub use video::VideoShareContent;

use std::collections::{BTreeMap, HashMap};

use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};

/// Flat parameters submitted to the native sharer
pub type ShareParameters = BTreeMap<String, String>;

/// Flattened native results handed to [`SharingResult::from_results`]
pub type SharingResults = HashMap<String, String>;

/// Results exactly as the native layer reported them
pub type NativeResults = serde_json::Map<String, serde_json::Value>;

/// Parameter keys shared by every content type
pub mod params {
    /// Link being shared
    pub const LINK: &str = "link";
    /// Quote highlighted alongside a link
    pub const QUOTE: &str = "quote";
    /// Hashtag attached to the post
    pub const HASHTAG: &str = "hashtag";
    /// Tagged place
    pub const PLACE: &str = "place";
    /// Comma-separated tagged people
    pub const TAGS: &str = "tags";
    /// Caller-defined reference for insights
    pub const REF: &str = "ref";
    /// JSON-encoded photo list
    pub const PHOTOS: &str = "photos";
    /// Video location
    pub const VIDEO_URL: &str = "video_url";
    /// Video preview image
    pub const PREVIEW_IMAGE: &str = "preview_image";
}

// ============================================================================
// TRAITS
// ============================================================================

/// A value that can be shared through a native sharer
///
/// Implementors describe how they serialize into the flat mapping the native
/// layer accepts, and which [`SharingResult`] a successful share produces.
pub trait ShareableContent: Send + 'static {
    /// Result parsed out of a successful share
    type Result: SharingResult + Send + 'static;

    /// Serialize into the flat mapping submitted to the native sharer
    fn to_parameters(&self) -> ShareParameters;

    /// Check the content before a share attempt starts
    fn validate(&self) -> Result<()> {
        Ok(())
    }
}

/// Content-specific data parsed out of a successful share
pub trait SharingResult: Sized {
    /// Parse from flattened native results, or `None` if they don't match
    fn from_results(results: &SharingResults) -> Option<Self>;
}

/// Project native results down to string values
///
/// Entries whose value is not a JSON string are dropped. This is lossy on
/// purpose: the parse step only ever reads strings.
pub fn flatten_native_results(raw: &NativeResults) -> SharingResults {
    raw.iter()
        .filter_map(|(key, value)| match value.as_str() {
            Some(s) => Some((key.clone(), s.to_owned())),
            None => {
                tracing::debug!(key = %key, "dropping non-string native result value");
                None
            }
        })
        .collect()
}

// ============================================================================
// COMMON FIELDS
// ============================================================================

/// A validated hashtag, e.g. `#rustlang`
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct Hashtag(String);

impl Hashtag {
    /// Create a hashtag, checking it is `#` followed by word characters
    pub fn new(value: impl Into<String>) -> Result<Self> {
        let value = value.into();
        let valid = match value.strip_prefix('#') {
            Some(rest) => {
                !rest.is_empty() && rest.chars().all(|c| c.is_alphanumeric() || c == '_')
            }
            None => false,
        };

        if valid {
            Ok(Self(value))
        } else {
            Err(Error::InvalidHashtag(value))
        }
    }

    /// The hashtag including its leading `#`
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl TryFrom<String> for Hashtag {
    type Error = Error;

    fn try_from(value: String) -> Result<Self> {
        Self::new(value)
    }
}

impl From<Hashtag> for String {
    fn from(hashtag: Hashtag) -> Self {
        hashtag.0
    }
}

impl std::fmt::Display for Hashtag {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

/// Fields every content type can carry
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ShareCommon {
    /// Hashtag attached to the post
    pub hashtag: Option<Hashtag>,
    /// Tagged place id
    pub place_id: Option<String>,
    /// Ids of tagged people
    #[serde(default)]
    pub people_ids: Vec<String>,
    /// Caller-defined reference, echoed back in insights
    pub reference: Option<String>,
}

impl ShareCommon {
    /// Write the non-empty common fields into `parameters`
    pub(crate) fn write_parameters(&self, parameters: &mut ShareParameters) {
        if let Some(ref hashtag) = self.hashtag {
            parameters.insert(params::HASHTAG.into(), hashtag.to_string());
        }
        insert_non_empty(parameters, params::PLACE, self.place_id.as_deref());
        if !self.people_ids.is_empty() {
            parameters.insert(params::TAGS.into(), self.people_ids.join(","));
        }
        insert_non_empty(parameters, params::REF, self.reference.as_deref());
    }
}

pub(crate) fn insert_non_empty(parameters: &mut ShareParameters, key: &str, value: Option<&str>) {
    if let Some(value) = value.filter(|v| !v.is_empty()) {
        parameters.insert(key.to_owned(), value.to_owned());
    }
}

// ============================================================================
// TESTS
// ============================================================================
