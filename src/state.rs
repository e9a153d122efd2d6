use std::time::{Duration, Instant};

use crate::config::Settings;
use crate::features::download::DownloadSlot;
use crate::features::form::FormInput;
use crate::features::signature::SignatureSurface;

/// Identifier of the server-side document the form belongs to.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Session {
    pub pdf_id: Option<String>,
}

/// Transient error message. A newer message replaces the old one and gets
/// the full timeout.
#[derive(Debug)]
pub struct ErrorDisplay {
    message: Option<String>,
    expires_at: Option<Instant>,
    timeout: Duration,
}

impl ErrorDisplay {
    pub fn new(timeout: Duration) -> Self {
        Self {
            message: None,
            expires_at: None,
            timeout,
        }
    }

    pub fn show(&mut self, message: impl Into<String>, now: Instant) {
        self.message = Some(message.into());
        self.expires_at = now.checked_add(self.timeout);
    }

    pub fn clear(&mut self) {
        self.message = None;
        self.expires_at = None;
    }

    pub fn expire(&mut self, now: Instant) {
        if matches!(self.expires_at, Some(deadline) if now >= deadline) {
            self.clear();
        }
    }

    pub fn message(&self) -> Option<&str> {
        self.message.as_deref()
    }
}

pub struct AppState {
    pub session: Session,
    pub form: Vec<FormInput>,
    pub form_visible: bool,
    pub result_visible: bool,
    pub error: ErrorDisplay,
    pub signature: SignatureSurface,
    pub download: Option<DownloadSlot>,
    pub upload_in_flight: bool,
    pub submit_in_flight: bool,
    /// Bumped on reset; completions tagged with an older epoch are dropped.
    pub epoch: u64,
}

impl AppState {
    pub fn new(settings: &Settings) -> Self {
        Self {
            session: Session::default(),
            form: Vec::new(),
            form_visible: false,
            result_visible: false,
            error: ErrorDisplay::new(Duration::from_millis(settings.display.error_timeout_ms)),
            signature: SignatureSurface::from_settings(&settings.signature),
            download: None,
            upload_in_flight: false,
            submit_in_flight: false,
            epoch: 0,
        }
    }

    /// Page-load reset: everything but the configuration goes back to its initial value.
    pub fn reset_runtime(&mut self) {
        self.session = Session::default();
        self.form.clear();
        self.form_visible = false;
        self.result_visible = false;
        self.error.clear();
        self.signature.clear();
        self.download = None;
        self.upload_in_flight = false;
        self.submit_in_flight = false;
        self.epoch = self.epoch.wrapping_add(1);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn error_clears_only_after_deadline() {
        let start = Instant::now();
        let mut display = ErrorDisplay::new(Duration::from_secs(5));
        display.show("bad file", start);

        display.expire(start + Duration::from_millis(4_999));
        assert_eq!(display.message(), Some("bad file"));

        display.expire(start + Duration::from_secs(5));
        assert_eq!(display.message(), None);
        // Nothing left to expire: a later check keeps it cleared.
        display.expire(start + Duration::from_secs(60));
        assert_eq!(display.message(), None);
    }

    #[test]
    fn newer_error_gets_full_timeout() {
        let start = Instant::now();
        let mut display = ErrorDisplay::new(Duration::from_secs(5));
        display.show("first", start);
        display.show("second", start + Duration::from_secs(4));

        display.expire(start + Duration::from_secs(6));
        assert_eq!(display.message(), Some("second"));
        display.expire(start + Duration::from_secs(9));
        assert_eq!(display.message(), None);
    }

    #[test]
    fn reset_restores_initial_state_and_bumps_epoch() {
        let settings = Settings::default();
        let mut state = AppState::new(&settings);
        state.session.pdf_id = Some("abc".into());
        state.form_visible = true;
        state.result_visible = true;
        state.upload_in_flight = true;
        state.signature.add_stroke(vec![(1.0, 1.0)]);
        state.error.show("oops", Instant::now());

        state.reset_runtime();
        assert_eq!(state.session.pdf_id, None);
        assert!(!state.form_visible);
        assert!(!state.result_visible);
        assert!(!state.upload_in_flight);
        assert!(state.signature.is_empty());
        assert_eq!(state.error.message(), None);
        assert_eq!(state.epoch, 1);
    }
}
