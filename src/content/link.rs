//! Link content.

use serde::{Deserialize, Serialize};

use super::{insert_non_empty, params, PostSharingResult, ShareCommon, ShareParameters, ShareableContent};
use crate::error::{Error, Result};

/// A link to share, optionally with a highlighted quote
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct LinkShareContent {
    /// URL being shared
    pub url: String,
    /// Quote displayed alongside the link
    pub quote: Option<String>,
    /// Hashtag, place, people and reference
    #[serde(flatten)]
    pub common: ShareCommon,
}

impl LinkShareContent {
    /// Create link content for `url`
    pub fn new(url: impl Into<String>) -> Self {
        Self {
            url: url.into(),
            ..Default::default()
        }
    }

    /// Attach a quote
    pub fn with_quote(mut self, quote: impl Into<String>) -> Self {
        self.quote = Some(quote.into());
        self
    }
}

impl ShareableContent for LinkShareContent {
    type Result = PostSharingResult;

    fn to_parameters(&self) -> ShareParameters {
        let mut parameters = ShareParameters::new();
        insert_non_empty(&mut parameters, params::LINK, Some(self.url.as_str()));
        insert_non_empty(&mut parameters, params::QUOTE, self.quote.as_deref());
        self.common.write_parameters(&mut parameters);
        parameters
    }

    fn validate(&self) -> Result<()> {
        if self.url.trim().is_empty() {
            return Err(Error::InvalidContent("link content requires a url".into()));
        }
        Ok(())
    }
}
