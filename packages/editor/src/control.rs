//! # Media Control
//!
//! The single coordinator of an editing session. Owns the editing model
//! and the selected-attachment snapshot, drives selection sessions, and
//! schedules preview refreshes. All collaborators — schema, instance
//! store, remote renderer — are injected at construction.
//!
//! One control owns one widget instance for one editing session; it is
//! not shared across concurrent editing contexts. Everything here runs
//! to completion synchronously except the remote preview round trip,
//! which is token-guarded so stale responses are discarded.

use mediakit_preview::{
    AttachmentSnapshot, PreviewError, PreviewJob, PreviewMarkup, PreviewRenderer, PreviewState,
    RemoteRenderer, RenderPlan, RequestToken,
};
use mediakit_schema::{FieldValue, InstanceRecord, Schema, SchemaExport};
use mediakit_store::InstanceStore;

use crate::errors::EditorError;
use crate::l10n::ControlLabels;
use crate::model::{EditingModel, FieldChange};
use crate::session::{PickerMode, PickerRequest, PickerSelection, SelectionSession, SessionState};

/// Fields whose edits change what the preview would show
const PREVIEW_FIELDS: &[&str] = &["attachment_id", "url", "autoplay", "loop", "preload"];

/// What a save did: the persisted record, any fields reverted to their
/// defaults, and the preview job the save scheduled (if a remote render
/// is needed).
#[derive(Debug)]
pub struct SaveReport {
    pub record: InstanceRecord,
    pub reverted: Vec<String>,
    pub preview: Option<PreviewJob>,
}

pub struct MediaControl {
    widget_id: String,
    schema: Schema,
    export: SchemaExport,
    labels: ControlLabels,
    model: EditingModel,
    attachment: Option<AttachmentSnapshot>,
    session: Option<SelectionSession>,
    store: Box<dyn InstanceStore>,
    remote: Box<dyn RemoteRenderer>,
    renderer: PreviewRenderer,
    surface: PreviewState,
}

impl MediaControl {
    /// Load the instance record for `widget_id` and build the control
    /// around it.
    pub fn new(
        widget_id: impl Into<String>,
        schema: Schema,
        labels: ControlLabels,
        store: Box<dyn InstanceStore>,
        remote: Box<dyn RemoteRenderer>,
    ) -> Result<Self, EditorError> {
        let widget_id = widget_id.into();
        let loaded = store.load(&widget_id)?;
        tracing::debug!(widget_id = %widget_id, fields = loaded.len(), "editing session started");

        let export = schema.export();
        let model = EditingModel::new(schema.clone(), loaded);
        Ok(Self {
            widget_id,
            schema,
            export,
            labels,
            model,
            attachment: None,
            session: None,
            store,
            remote,
            renderer: PreviewRenderer::new(),
            surface: PreviewState::Empty,
        })
    }

    pub fn widget_id(&self) -> &str {
        &self.widget_id
    }

    pub fn model(&self) -> &EditingModel {
        &self.model
    }

    pub fn labels(&self) -> &ControlLabels {
        &self.labels
    }

    /// Schema metadata in the shape handed to front-end form builders
    pub fn exported_schema(&self) -> &SchemaExport {
        &self.export
    }

    pub fn attachment(&self) -> Option<&AttachmentSnapshot> {
        self.attachment.as_ref()
    }

    pub fn preview(&self) -> &PreviewState {
        &self.surface
    }

    pub fn session_state(&self) -> Option<SessionState> {
        self.session.as_ref().map(|s| s.state())
    }

    /// Observe editing model changes (synchronous delivery)
    pub fn subscribe(&mut self, subscriber: impl FnMut(&FieldChange) + Send + 'static) {
        self.model.subscribe(subscriber);
    }

    // ---- selection ----

    /// Enter a selection session; hand the returned request to the
    /// external picker. A still-active previous session is abandoned.
    pub fn start_selection(&mut self, mode: PickerMode) -> PickerRequest {
        let seed = match mode {
            PickerMode::SelectNew => None,
            PickerMode::ReplaceEmbed | PickerMode::EditDetails => self
                .model
                .get("attachment_id")
                .and_then(|v| v.as_int())
                .filter(|id| *id > 0)
                .map(|id| id as u64),
        };
        let session = SelectionSession::new(mode, seed);
        let request = session.request();
        self.session = Some(session);
        request
    }

    /// Picker is ready for user interaction
    pub fn picker_opened(&mut self) -> Result<(), EditorError> {
        self.session
            .as_mut()
            .ok_or(EditorError::NoActiveSession)?
            .opened()
    }

    /// Picker yielded a confirmed selection. Applies the derived
    /// property set to both the attachment snapshot (wholesale) and the
    /// editing model (field by field) in a single step, then schedules
    /// exactly one preview refresh.
    pub fn picker_confirmed(
        &mut self,
        selection: PickerSelection,
    ) -> Result<Option<PreviewJob>, EditorError> {
        let active_link = self
            .model
            .get("link_type")
            .and_then(|v| v.as_str())
            .unwrap_or("none")
            .to_string();

        let mut session = self.session.take().ok_or(EditorError::NoActiveSession)?;
        let props = match session.resolve(selection, &active_link) {
            Ok(props) => props,
            Err(err) => {
                // Leave the session in place so the caller can still
                // cancel it through the normal path.
                self.session = Some(session);
                return Err(err);
            }
        };
        session.close()?;

        self.attachment = Some(AttachmentSnapshot {
            id: props.attachment_id,
            url: props.url.clone(),
            caption: props.caption.clone(),
            description: props.description.clone(),
            error: None,
        });

        // An id the field type cannot hold degrades to the no-attachment
        // sentinel rather than wrapping.
        let attachment_id = i64::try_from(props.attachment_id).unwrap_or(0);
        self.set_if_declared("attachment_id", FieldValue::Int(attachment_id))?;
        self.set_if_declared("url", props.url.into())?;
        self.set_if_declared("caption", props.caption.into())?;
        self.set_if_declared("description", props.description.into())?;
        self.set_if_declared("link_type", props.link_type.into())?;

        Ok(self.refresh_preview())
    }

    /// Picker dismissed without confirming; the editing model is
    /// untouched and no preview refresh happens.
    pub fn picker_cancelled(&mut self) -> Result<(), EditorError> {
        let session = self.session.as_mut().ok_or(EditorError::NoActiveSession)?;
        session.cancel()?;
        session.close()?;
        self.session = None;
        tracing::debug!("selection cancelled, editing model untouched");
        Ok(())
    }

    /// Replace the attachment snapshot wholesale (e.g., after the
    /// ambient media resolver fetched metadata or flagged it missing)
    /// and refresh the preview.
    pub fn set_attachment(&mut self, snapshot: AttachmentSnapshot) -> Option<PreviewJob> {
        self.attachment = Some(snapshot);
        self.refresh_preview()
    }

    // ---- editing ----

    /// Route a user edit into the editing model; preview-relevant fields
    /// schedule a refresh.
    pub fn on_field_changed(
        &mut self,
        field: &str,
        value: FieldValue,
    ) -> Result<Option<PreviewJob>, EditorError> {
        self.model.set(field, value)?;
        if PREVIEW_FIELDS.contains(&field) {
            Ok(self.refresh_preview())
        } else {
            Ok(None)
        }
    }

    /// Persist the editing model snapshot.
    ///
    /// Fields the store reverted to defaults are written back into the
    /// model (emitting change events so the form reflects the reset);
    /// the rest of the save proceeds — partial failure, not
    /// all-or-nothing.
    pub fn save(&mut self) -> Result<SaveReport, EditorError> {
        let outcome = self.store.save(&self.widget_id, &self.model.to_record())?;

        for field in &outcome.reverted {
            if let Some(descriptor) = self.schema.field(field) {
                self.model.set(field, descriptor.default.clone())?;
            }
        }

        let preview = self.refresh_preview();
        Ok(SaveReport {
            record: outcome.record,
            reverted: outcome.reverted,
            preview,
        })
    }

    // ---- preview ----

    /// Re-plan the preview from current state. At most one job is in
    /// flight: a newer plan supersedes any pending one, and a stale
    /// response is dropped at [`apply_preview_response`].
    ///
    /// [`apply_preview_response`]: MediaControl::apply_preview_response
    pub fn refresh_preview(&mut self) -> Option<PreviewJob> {
        match self
            .renderer
            .plan(self.attachment.as_ref(), &self.model.to_record())
        {
            RenderPlan::Skip => {
                self.surface = PreviewState::Empty;
                None
            }
            RenderPlan::LocalError(error) => {
                self.surface = PreviewState::Failed { error };
                None
            }
            RenderPlan::Remote { token, request } => {
                self.surface = PreviewState::Waiting { token };
                Some(PreviewJob { token, request })
            }
        }
    }

    /// Apply a remote render response, unless a newer request superseded
    /// the token it carries.
    pub fn apply_preview_response(
        &mut self,
        token: RequestToken,
        result: Result<PreviewMarkup, PreviewError>,
    ) {
        if !self.renderer.accept(token) {
            tracing::debug!(?token, "discarding stale preview response");
            return;
        }
        self.surface = match result {
            Ok(markup) => PreviewState::Rendered { markup },
            Err(error) => PreviewState::Failed { error },
        };
    }

    /// Drive one preview job through the remote renderer to completion.
    pub async fn drive_preview(&mut self, job: PreviewJob) {
        let result = self.remote.parse_shortcode(job.request).await;
        self.apply_preview_response(job.token, result);
    }

    /// Plan and, if remote work is needed, drive it. Convenience for
    /// callers that do not interleave edits with in-flight renders.
    pub async fn render_preview(&mut self) {
        if let Some(job) = self.refresh_preview() {
            self.drive_preview(job).await;
        }
    }

    /// Set a model field, skipping fields this widget kind's schema does
    /// not declare (a picker payload can carry more than the schema
    /// persists).
    fn set_if_declared(&mut self, field: &str, value: FieldValue) -> Result<(), EditorError> {
        if self.schema.field(field).is_none() {
            tracing::debug!(field = %field, "ignoring undeclared field from picker payload");
            return Ok(());
        }
        self.model.set(field, value)
    }
}
