//! Render planning, request tokens, and the preview surface state

use mediakit_schema::InstanceRecord;
use serde::{Deserialize, Serialize};

use crate::attachment::AttachmentSnapshot;
use crate::errors::PreviewError;
use crate::shortcode::{PreviewMarkup, ShortcodeRequest};

/// Monotonically increasing token identifying one preview request.
/// Responses carrying anything but the latest token are discarded.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
pub struct RequestToken(u64);

/// What the renderer decided to do for the current state
#[derive(Debug, Clone, PartialEq)]
pub enum RenderPlan {
    /// Nothing to preview: no attachment id and no URL
    Skip,
    /// Terminal error rendered locally, zero network
    LocalError(PreviewError),
    /// Asynchronous round trip through the remote renderer
    Remote {
        token: RequestToken,
        request: ShortcodeRequest,
    },
}

/// A remote render that still needs to be driven to completion
#[derive(Debug, Clone, PartialEq)]
pub struct PreviewJob {
    pub token: RequestToken,
    pub request: ShortcodeRequest,
}

/// State of the preview surface; failures replace content outright so
/// stale markup is never displayed silently
#[derive(Debug, Clone, PartialEq, Default)]
pub enum PreviewState {
    #[default]
    Empty,
    Waiting {
        token: RequestToken,
    },
    Rendered {
        markup: PreviewMarkup,
    },
    Failed {
        error: PreviewError,
    },
}

/// Decides between local and remote rendering and owns the token counter
#[derive(Debug, Default)]
pub struct PreviewRenderer {
    latest: u64,
}

impl PreviewRenderer {
    pub fn new() -> Self {
        Self::default()
    }

    /// Plan the next render from the current attachment snapshot and
    /// editing model values. Every plan supersedes whatever was in
    /// flight before it, including `Skip`: clearing the media fields
    /// invalidates a pending remote response just like a new request.
    pub fn plan(
        &mut self,
        attachment: Option<&AttachmentSnapshot>,
        record: &InstanceRecord,
    ) -> RenderPlan {
        self.latest += 1;

        if let Some(snapshot) = attachment {
            if let Some(error) = &snapshot.error {
                tracing::debug!(?error, "attachment carries error marker, rendering locally");
                return if snapshot.is_missing() {
                    RenderPlan::LocalError(PreviewError::MissingAttachment)
                } else {
                    RenderPlan::LocalError(PreviewError::RenderFailed(
                        "attachment could not be resolved".to_string(),
                    ))
                };
            }
        }

        let attachment_id = record
            .get("attachment_id")
            .and_then(|v| v.as_int())
            .unwrap_or(0);
        let url = record
            .get("url")
            .and_then(|v| v.as_str())
            .unwrap_or_default();

        let request = if attachment_id > 0 {
            let autoplay = record
                .get("autoplay")
                .and_then(|v| v.as_bool())
                .unwrap_or(false);
            let looping = record.get("loop").and_then(|v| v.as_bool()).unwrap_or(false);
            let preload = record
                .get("preload")
                .and_then(|v| v.as_str())
                .unwrap_or("none");
            ShortcodeRequest::video(url, autoplay, looping, preload)
        } else if !url.is_empty() {
            ShortcodeRequest::embed(url)
        } else {
            return RenderPlan::Skip;
        };

        let token = RequestToken(self.latest);
        tracing::debug!(token = self.latest, tag = %request.tag, "planned remote preview");
        RenderPlan::Remote { token, request }
    }

    /// Whether a response for `token` may still be applied
    pub fn accept(&self, token: RequestToken) -> bool {
        token.0 == self.latest
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use mediakit_schema::video_schema;

    fn record_with(id: i64, url: &str) -> InstanceRecord {
        let mut record = video_schema().defaults();
        record.insert("attachment_id", id);
        record.insert("url", url);
        record
    }

    #[test]
    fn test_attachment_path_plans_video_shortcode() {
        let mut renderer = PreviewRenderer::new();
        let attachment = AttachmentSnapshot::new(7, "https://x.test/v.mp4");
        let record = record_with(7, "https://x.test/v.mp4");

        match renderer.plan(Some(&attachment), &record) {
            RenderPlan::Remote { request, .. } => {
                assert_eq!(request.tag, "video");
                assert_eq!(request.attributes["src"], "https://x.test/v.mp4");
            }
            other => panic!("expected remote plan, got {:?}", other),
        }
    }

    #[test]
    fn test_url_only_degraded_path_uses_embed() {
        let mut renderer = PreviewRenderer::new();
        let record = record_with(0, "https://x.test/v.mp4");

        match renderer.plan(None, &record) {
            RenderPlan::Remote { request, .. } => assert_eq!(request.tag, "embed"),
            other => panic!("expected remote plan, got {:?}", other),
        }
    }

    #[test]
    fn test_nothing_selected_skips() {
        let mut renderer = PreviewRenderer::new();
        let record = record_with(0, "");
        assert_eq!(renderer.plan(None, &record), RenderPlan::Skip);
    }

    #[test]
    fn test_missing_marker_renders_locally() {
        let mut renderer = PreviewRenderer::new();
        let attachment = AttachmentSnapshot::missing(7);
        let record = record_with(7, "https://x.test/v.mp4");

        assert_eq!(
            renderer.plan(Some(&attachment), &record),
            RenderPlan::LocalError(PreviewError::MissingAttachment)
        );
    }

    #[test]
    fn test_stale_token_rejected() {
        let mut renderer = PreviewRenderer::new();
        let record = record_with(3, "https://x.test/v.mp4");

        let first = match renderer.plan(None, &record) {
            RenderPlan::Remote { token, .. } => token,
            other => panic!("expected remote plan, got {:?}", other),
        };
        let second = match renderer.plan(None, &record) {
            RenderPlan::Remote { token, .. } => token,
            other => panic!("expected remote plan, got {:?}", other),
        };

        assert!(!renderer.accept(first));
        assert!(renderer.accept(second));
    }

    #[test]
    fn test_skip_supersedes_pending_remote() {
        let mut renderer = PreviewRenderer::new();
        let record = record_with(0, "https://x.test/v.mp4");

        let pending = match renderer.plan(None, &record) {
            RenderPlan::Remote { token, .. } => token,
            other => panic!("expected remote plan, got {:?}", other),
        };

        // Media fields cleared: the pending response must not land.
        let cleared = record_with(0, "");
        assert_eq!(renderer.plan(None, &cleared), RenderPlan::Skip);
        assert!(!renderer.accept(pending));
    }

    #[test]
    fn test_local_error_supersedes_pending_remote() {
        let mut renderer = PreviewRenderer::new();
        let record = record_with(3, "https://x.test/v.mp4");

        let pending = match renderer.plan(None, &record) {
            RenderPlan::Remote { token, .. } => token,
            other => panic!("expected remote plan, got {:?}", other),
        };

        let attachment = AttachmentSnapshot::missing(3);
        renderer.plan(Some(&attachment), &record);
        assert!(!renderer.accept(pending));
    }
}
