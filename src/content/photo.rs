//! Photo content.

use serde::{Deserialize, Serialize};

use super::{params, PostSharingResult, ShareCommon, ShareParameters, ShareableContent};
use crate::error::{Error, Result};

/// Most photos a single share can carry
pub const MAX_PHOTOS: usize = 6;

/// A single photo in a photo share
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Photo {
    /// Location of the image
    pub url: String,
    /// Caption shown with the photo
    #[serde(skip_serializing_if = "Option::is_none")]
    pub caption: Option<String>,
    /// Whether the photo was taken by the user rather than picked from elsewhere
    #[serde(default)]
    pub user_generated: bool,
}

impl Photo {
    /// Create a photo from an image location
    pub fn new(url: impl Into<String>) -> Self {
        Self {
            url: url.into(),
            caption: None,
            user_generated: false,
        }
    }
}

/// One or more photos to share
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct PhotoShareContent {
    /// Photos to share, at most [`MAX_PHOTOS`]
    pub photos: Vec<Photo>,
    /// Hashtag, place, people and reference
    #[serde(flatten)]
    pub common: ShareCommon,
}

impl PhotoShareContent {
    /// Create photo content
    pub fn new(photos: Vec<Photo>) -> Self {
        Self {
            photos,
            ..Default::default()
        }
    }
}

impl ShareableContent for PhotoShareContent {
    type Result = PostSharingResult;

    fn to_parameters(&self) -> ShareParameters {
        let mut parameters = ShareParameters::new();
        // Photo has only string and bool fields, so this cannot fail
        match serde_json::to_string(&self.photos) {
            Ok(photos) => {
                parameters.insert(params::PHOTOS.into(), photos);
            }
            Err(e) => tracing::error!("Failed to encode photos: {}", e),
        }
        self.common.write_parameters(&mut parameters);
        parameters
    }

    fn validate(&self) -> Result<()> {
        if self.photos.is_empty() {
            return Err(Error::InvalidContent("photo content requires at least one photo".into()));
        }
        if self.photos.len() > MAX_PHOTOS {
            return Err(Error::InvalidContent(format!(
                "photo content supports at most {} photos, got {}",
                MAX_PHOTOS,
                self.photos.len()
            )));
        }
        if let Some(index) = self.photos.iter().position(|p| p.url.trim().is_empty()) {
            return Err(Error::InvalidContent(format!("photo {} has no url", index)));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_photo_parameters_encode_list() {
        let mut photo = Photo::new("file:///tmp/a.jpg");
        photo.caption = Some("sunset".into());
        let content = PhotoShareContent::new(vec![photo.clone(), Photo::new("file:///tmp/b.jpg")]);

        let parameters = content.to_parameters();
        let encoded = parameters.get("photos").unwrap();
        let decoded: Vec<Photo> = serde_json::from_str(encoded).unwrap();

        assert_eq!(decoded.len(), 2);
        assert_eq!(decoded[0], photo);
    }

    #[test]
    fn test_photo_validation() {
        assert!(PhotoShareContent::new(vec![]).validate().is_err());

        let too_many = (0..=MAX_PHOTOS).map(|i| Photo::new(format!("p{}", i))).collect();
        assert!(PhotoShareContent::new(too_many).validate().is_err());

        let blank = PhotoShareContent::new(vec![Photo::new("ok"), Photo::new("")]);
        assert_eq!(
            blank.validate(),
            Err(Error::InvalidContent("photo 1 has no url".into()))
        );

        assert!(PhotoShareContent::new(vec![Photo::new("ok")]).validate().is_ok());
    }
}
