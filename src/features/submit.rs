use serde_json::Value;
use std::path::Path;
use std::time::Instant;

use crate::error::ClientError;
use crate::features::download::DownloadSlot;
use crate::features::form::{collect_form_data, render_form};
use crate::features::service::SubmitPayload;
use crate::features::signature::render_signature_pad;
use crate::state::AppState;
use crate::ui::{
    node, Button as UiButton, DownloadLink as UiDownloadLink, Section as UiSection,
    Text as UiText,
};

pub const SUBMIT_FALLBACK: &str = "Failed to generate PDF.";

/// Gather what the user entered into the payload sent to the service.
/// No identifier or required-field validation is done here.
pub fn build_payload(state: &AppState) -> Result<SubmitPayload, ClientError> {
    Ok(SubmitPayload {
        pdf_id: state.session.pdf_id.clone(),
        form_data: collect_form_data(&state.form),
        signature: state.signature.export()?,
    })
}

pub fn apply_submit_result(
    state: &mut AppState,
    download_dir: &Path,
    value: Result<Vec<u8>, ClientError>,
    now: Instant,
) {
    let stored = value.and_then(|bytes| DownloadSlot::create(download_dir, &bytes));
    match stored {
        Ok(slot) => {
            tracing::info!(
                path = %slot.path().display(),
                bytes = slot.size(),
                "filled pdf ready"
            );
            // Replacing the slot deletes the previous file.
            state.download = Some(slot);
            state.result_visible = true;
            state.error.clear();
        }
        Err(err) => {
            tracing::warn!(error = %err, "pdf submission failed");
            state.error.show(err.user_message(SUBMIT_FALLBACK), now);
        }
    }
}

pub fn render_form_section(state: &AppState) -> Value {
    let mut children = vec![node(UiText::new("Fill in the form").size(16.0))];
    children.extend(render_form(&state.form));
    children.push(node(UiText::new("Signature").size(14.0)));
    children.extend(render_signature_pad(state));
    children.push(node(
        UiButton::new("Generate filled PDF", "submit")
            .id("submit-form")
            .enabled(!state.submit_in_flight),
    ));
    if state.submit_in_flight {
        children.push(node(
            UiText::new("Generating...")
                .size(12.0)
                .content_description("submit_status"),
        ));
    }
    node(UiSection::new("form-section", children))
}

pub fn render_result_section(state: &AppState) -> Value {
    let mut children = vec![node(UiText::new("Your PDF is ready.").size(16.0))];
    if let Some(slot) = &state.download {
        let path = slot.path().to_string_lossy();
        children.push(node(UiDownloadLink::new(
            "Download filled PDF",
            &path,
            slot.size(),
        )));
    }
    node(UiSection::new("result-section", children).title("Result"))
}
