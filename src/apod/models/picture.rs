use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MediaType {
    Image,
    Video,
    #[serde(other)]
    Other,
}

/// One entry of the astronomy picture of the day feed.
///
/// `date` identifies the entry inside a query window.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Picture {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub copyright: Option<String>,
    pub date: String,
    #[serde(default)]
    pub explanation: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub hdurl: Option<String>,
    pub media_type: MediaType,
    #[serde(default)]
    pub service_version: String,
    #[serde(default)]
    pub title: String,
    /// Empty for entries the feed publishes without a link.
    #[serde(default)]
    pub url: String,
}

impl Picture {
    pub fn date(&self) -> &str {
        &self.date
    }

    pub fn is_video(&self) -> bool {
        self.media_type == MediaType::Video
    }

    /// Link handed out by the share action: the high definition file for
    /// images, the plain url for everything else.
    pub fn share_url(&self) -> &str {
        match (self.media_type, &self.hdurl) {
            (MediaType::Image, Some(hdurl)) => hdurl,
            _ => &self.url,
        }
    }

    pub fn byline(&self) -> String {
        match &self.copyright {
            Some(copyright) => format!("{} - {}", self.date, copyright),
            None => self.date.clone(),
        }
    }
}
