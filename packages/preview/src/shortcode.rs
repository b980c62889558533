//! Shortcode wire types and the remote render collaborator

use async_trait::async_trait;
use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

use crate::errors::PreviewError;

// Preview frame dimensions sent with attachment-backed renders.
const PREVIEW_WIDTH: &str = "250";
const PREVIEW_HEIGHT: &str = "150";

/// A derived shorthand representation of the current fields: tag plus
/// rendering attributes, ready to be expanded remotely.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ShortcodeRequest {
    pub tag: String,
    pub attributes: IndexMap<String, String>,
    /// Body content; used by the embed path which has no attributes to
    /// hang the URL on
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub content: Option<String>,
}

impl ShortcodeRequest {
    /// Attachment-backed video render
    pub fn video(src: &str, autoplay: bool, looping: bool, preload: &str) -> Self {
        let mut attributes = IndexMap::new();
        attributes.insert("src".to_string(), src.to_string());
        attributes.insert("width".to_string(), PREVIEW_WIDTH.to_string());
        attributes.insert("height".to_string(), PREVIEW_HEIGHT.to_string());
        if autoplay {
            attributes.insert("autoplay".to_string(), "1".to_string());
        }
        if looping {
            attributes.insert("loop".to_string(), "1".to_string());
        }
        attributes.insert("preload".to_string(), preload.to_string());
        Self {
            tag: "video".to_string(),
            attributes,
            content: None,
        }
    }

    /// URL-only render with no backing attachment. Known degraded path:
    /// the remote side often cannot resolve it, which surfaces as a
    /// normal render failure.
    pub fn embed(url: &str) -> Self {
        Self {
            tag: "embed".to_string(),
            attributes: IndexMap::new(),
            content: Some(url.to_string()),
        }
    }
}

/// Markup fragments returned by a successful remote render
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PreviewMarkup {
    pub head: String,
    pub body: String,
}

/// The remote preview rendering collaborator.
///
/// Injected into the control; the round trip is the only suspension
/// point in the editing flow.
#[async_trait]
pub trait RemoteRenderer: Send + Sync {
    async fn parse_shortcode(
        &self,
        request: ShortcodeRequest,
    ) -> Result<PreviewMarkup, PreviewError>;
}
