//! Control label catalogs
//!
//! Label text the control surfaces around the preview and picker
//! buttons. Translation lookup happens outside this engine; these are
//! the per-widget-kind label keys with their default English text.

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ControlLabels {
    pub no_media_selected: String,
    pub select_media: String,
    pub change_media: String,
    pub edit_media: String,
    pub missing_attachment: String,
    pub media_library_state_multi: String,
    pub media_library_state_single: String,
}

impl ControlLabels {
    /// Labels for the video widget kind
    pub fn video() -> Self {
        Self {
            no_media_selected: "No video selected".to_string(),
            select_media: "Select Video".to_string(),
            change_media: "Change Video".to_string(),
            edit_media: "Edit Video".to_string(),
            missing_attachment:
                "We can't find that video. Check your media library and make sure it wasn't deleted."
                    .to_string(),
            media_library_state_multi: "Video Widget (%d)".to_string(),
            media_library_state_single: "Video Widget".to_string(),
        }
    }
}
