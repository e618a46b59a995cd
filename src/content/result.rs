//! Result of a share that produced a post.

use serde::{Deserialize, Serialize};

use super::{SharingResult, SharingResults};

/// Key the native layer uses for the created post's id
pub const POST_ID: &str = "post_id";

/// A successful share that created a post
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PostSharingResult {
    /// Id of the created post
    pub post_id: String,
}

impl SharingResult for PostSharingResult {
    fn from_results(results: &SharingResults) -> Option<Self> {
        let post_id = results.get(POST_ID)?;
        Some(Self {
            post_id: post_id.clone(),
        })
    }
}
