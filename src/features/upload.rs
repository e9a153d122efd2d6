use serde_json::Value;
use std::path::Path;
use std::time::Instant;

use crate::error::ClientError;
use crate::features::form::build_form;
use crate::features::service::UploadResponse;
use crate::state::AppState;
use crate::ui::{node, Button as UiButton, Text as UiText};

pub const UPLOAD_FALLBACK: &str = "Failed to upload PDF.";

pub fn apply_upload_result(
    state: &mut AppState,
    source: &Path,
    value: Result<UploadResponse, ClientError>,
    now: Instant,
) {
    match value {
        Ok(response) => apply_upload_success(state, response),
        Err(err) => {
            tracing::warn!(source = %source.display(), error = %err, "pdf upload failed");
            apply_upload_failure(state, &err.user_message(UPLOAD_FALLBACK), now);
        }
    }
}

pub fn apply_upload_success(state: &mut AppState, response: UploadResponse) {
    tracing::info!(
        pdf_id = %response.pdf_id,
        fields = response.fields.len(),
        "pdf uploaded"
    );
    state.session.pdf_id = Some(response.pdf_id);
    state.form = build_form(&response.fields);
    state.form_visible = true;
    state.result_visible = false;
    state.error.clear();
}

/// Session identifier and previously received fields are kept; only the
/// form section is hidden.
pub fn apply_upload_failure(state: &mut AppState, message: &str, now: Instant) {
    state.error.show(message, now);
    state.form_visible = false;
}

pub fn render_upload_control(state: &AppState) -> Vec<Value> {
    let mut children = vec![node(
        UiButton::new("Choose PDF", "upload")
            .id("pdf-upload")
            .requires_file_picker(true)
            .accept("application/pdf")
            .enabled(!state.upload_in_flight)
            .content_description("Pick a PDF form to fill"),
    )];
    if state.upload_in_flight {
        children.push(node(
            UiText::new("Uploading...")
                .size(12.0)
                .content_description("upload_status"),
        ));
    }
    children
}
