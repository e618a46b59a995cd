//! Video content.

use serde::{Deserialize, Serialize};

use super::{insert_non_empty, params, PostSharingResult, ShareCommon, ShareParameters, ShareableContent};
use crate::error::{Error, Result};

/// A video to share
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct VideoShareContent {
    /// Location of the video asset
    pub video_url: String,
    /// Image shown before playback starts
    pub preview_photo_url: Option<String>,
    /// Hashtag, place, people and reference
    #[serde(flatten)]
    pub common: ShareCommon,
}

impl VideoShareContent {
    /// Create video content for `video_url`
    pub fn new(video_url: impl Into<String>) -> Self {
        Self {
            video_url: video_url.into(),
            ..Default::default()
        }
    }
}

impl ShareableContent for VideoShareContent {
    type Result = PostSharingResult;

    fn to_parameters(&self) -> ShareParameters {
        let mut parameters = ShareParameters::new();
        insert_non_empty(&mut parameters, params::VIDEO_URL, Some(self.video_url.as_str()));
        insert_non_empty(
            &mut parameters,
            params::PREVIEW_IMAGE,
            self.preview_photo_url.as_deref(),
        );
        self.common.write_parameters(&mut parameters);
        parameters
    }

    fn validate(&self) -> Result<()> {
        if self.video_url.trim().is_empty() {
            return Err(Error::InvalidContent("video content requires a video url".into()));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_video_parameters() {
        let mut content = VideoShareContent::new("assets-library://video.mov");
        content.preview_photo_url = Some("file:///tmp/preview.png".into());
        content.common.reference = Some("onboarding".into());

        let parameters = content.to_parameters();
        assert_eq!(
            parameters.get("video_url").map(String::as_str),
            Some("assets-library://video.mov")
        );
        assert_eq!(
            parameters.get("preview_image").map(String::as_str),
            Some("file:///tmp/preview.png")
        );
        assert_eq!(parameters.get("ref").map(String::as_str), Some("onboarding"));
    }

    #[test]
    fn test_video_requires_url() {
        assert!(VideoShareContent::new("").validate().is_err());
    }
}
