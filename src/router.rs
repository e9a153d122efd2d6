use crate::config::Settings;
use crate::error::ClientError;
use crate::features::form::apply_bindings;
use crate::features::service::DocumentService;
use crate::features::signature::{handle_signature_clear, handle_signature_stroke, Point};
use crate::features::submit::{
    apply_submit_result, build_payload, render_form_section, render_result_section,
    SUBMIT_FALLBACK,
};
use crate::features::upload::{apply_upload_failure, apply_upload_result, render_upload_control};
use crate::state::AppState;
use crate::ui::{node, Column as UiColumn, Text as UiText};
use crate::worker::{WorkerJob, WorkerMode, WorkerResult, WorkerRuntime};

use serde::Deserialize;
use serde_json::{json, Value};
use std::{collections::HashMap, path::PathBuf, time::Instant};

/// One host event, as sent over the JSON boundary.
#[derive(Debug, Default, Deserialize)]
pub struct Command {
    pub action: String,
    pub path: Option<String>,
    pub error: Option<String>,
    pub points: Option<Vec<[f32; 2]>>,
    pub bindings: Option<HashMap<String, String>>,
}

impl Command {
    pub fn new(action: impl Into<String>) -> Self {
        Self {
            action: action.into(),
            ..Self::default()
        }
    }
}

#[derive(Debug)]
enum Action {
    Init,
    Reset,
    Tick,
    Upload {
        path: Option<PathBuf>,
        error: Option<String>,
    },
    SignatureStroke {
        points: Vec<Point>,
    },
    SignatureClear,
    Submit {
        bindings: HashMap<String, String>,
    },
}

fn parse_action(command: Command) -> Result<Action, String> {
    let Command {
        action,
        path,
        error,
        points,
        bindings,
    } = command;

    match action.as_str() {
        "init" => Ok(Action::Init),
        "reset" => Ok(Action::Reset),
        "tick" => Ok(Action::Tick),
        "upload" => Ok(Action::Upload {
            path: path.filter(|p| !p.is_empty()).map(PathBuf::from),
            error,
        }),
        "signature_stroke" => {
            let points = points.ok_or_else(|| "missing_points".to_string())?;
            Ok(Action::SignatureStroke {
                points: points.into_iter().map(|[x, y]| (x, y)).collect(),
            })
        }
        "signature_clear" => Ok(Action::SignatureClear),
        "submit" => Ok(Action::Submit {
            bindings: bindings.unwrap_or_default(),
        }),
        other => Err(error.unwrap_or_else(|| format!("unknown_action:{other}"))),
    }
}

/// Page controller: owns the session, the rendered form, the signature
/// surface and the network worker.
pub struct FormClient {
    state: AppState,
    settings: Settings,
    worker: WorkerRuntime,
}

impl FormClient {
    pub fn new(settings: Settings) -> Result<Self, ClientError> {
        Self::with_mode(settings, WorkerMode::Background)
    }

    pub fn with_mode(settings: Settings, mode: WorkerMode) -> Result<Self, ClientError> {
        let service = DocumentService::new(&settings.service)?;
        let worker = WorkerRuntime::new(service, mode)?;
        Ok(Self {
            state: AppState::new(&settings),
            settings,
            worker,
        })
    }

    pub fn state(&self) -> &AppState {
        &self.state
    }

    pub fn settings(&self) -> &Settings {
        &self.settings
    }

    pub fn mode(&self) -> WorkerMode {
        self.worker.mode()
    }

    /// True while an upload or submission awaits its response.
    pub fn is_busy(&self) -> bool {
        self.state.upload_in_flight || self.state.submit_in_flight
    }

    /// JSON in, JSON out. Never panics across the boundary.
    pub fn dispatch(&mut self, input: &str) -> String {
        let response = std::panic::catch_unwind(std::panic::AssertUnwindSafe(|| {
            match serde_json::from_str::<Command>(input) {
                Ok(command) => self.handle_command(command),
                Err(e) => Err(format!("invalid_json:{e}")),
            }
        }));

        let json_value = match response {
            Ok(Ok(value)) => value,
            Ok(Err(err)) => error_ui(&err),
            Err(_) => error_ui("panic"),
        };
        json_value.to_string()
    }

    pub fn handle_command(&mut self, command: Command) -> Result<Value, String> {
        self.handle_command_at(command, Instant::now())
    }

    pub(crate) fn handle_command_at(
        &mut self,
        command: Command,
        now: Instant,
    ) -> Result<Value, String> {
        self.apply_worker_results(now);
        self.state.error.expire(now);

        let action = match parse_action(command) {
            Ok(action) => action,
            Err(err) => {
                self.state.error.show(err, now);
                return Ok(self.render());
            }
        };

        match action {
            Action::Init | Action::Tick => {}
            Action::Reset => self.state.reset_runtime(),
            Action::Upload { path, error } => self.handle_upload(path, error, now)?,
            Action::SignatureStroke { points } => handle_signature_stroke(&mut self.state, points),
            Action::SignatureClear => handle_signature_clear(&mut self.state),
            Action::Submit { bindings } => self.handle_submit(&bindings, now)?,
        }

        // Inline jobs have already completed; apply them in this same step.
        self.apply_worker_results(now);
        Ok(self.render())
    }

    pub fn render(&self) -> Value {
        render_ui(&self.state)
    }

    fn handle_upload(
        &mut self,
        path: Option<PathBuf>,
        error: Option<String>,
        now: Instant,
    ) -> Result<(), String> {
        if let Some(err) = error {
            apply_upload_failure(&mut self.state, &err, now);
            return Ok(());
        }
        let Some(source) = path else {
            // Nothing was selected.
            return Ok(());
        };
        if self.state.upload_in_flight {
            tracing::debug!(source = %source.display(), "upload already in flight; ignoring");
            return Ok(());
        }

        self.state.upload_in_flight = true;
        let job = WorkerJob::Upload {
            epoch: self.state.epoch,
            source,
        };
        if let Err(e) = self.worker.enqueue(job) {
            self.state.upload_in_flight = false;
            return Err(e);
        }
        Ok(())
    }

    fn handle_submit(
        &mut self,
        bindings: &HashMap<String, String>,
        now: Instant,
    ) -> Result<(), String> {
        // Typed values are kept even when the submission itself is dropped.
        apply_bindings(&mut self.state.form, bindings);
        if self.state.submit_in_flight {
            tracing::debug!("submission already in flight; ignoring");
            return Ok(());
        }
        let payload = match build_payload(&self.state) {
            Ok(payload) => payload,
            Err(err) => {
                tracing::warn!(error = %err, "could not prepare submission");
                self.state.error.show(err.user_message(SUBMIT_FALLBACK), now);
                return Ok(());
            }
        };

        self.state.submit_in_flight = true;
        let job = WorkerJob::Submit {
            epoch: self.state.epoch,
            payload,
        };
        if let Err(e) = self.worker.enqueue(job) {
            self.state.submit_in_flight = false;
            return Err(e);
        }
        Ok(())
    }

    fn apply_worker_results(&mut self, now: Instant) {
        for result in self.worker.drain() {
            self.apply_worker_result(result, now);
        }
    }

    fn apply_worker_result(&mut self, result: WorkerResult, now: Instant) {
        match result {
            WorkerResult::Upload {
                epoch,
                source,
                value,
            } => {
                if epoch != self.state.epoch {
                    tracing::debug!(source = %source.display(), "dropping upload result from before reset");
                    return;
                }
                self.state.upload_in_flight = false;
                apply_upload_result(&mut self.state, &source, value, now);
            }
            WorkerResult::Submit { epoch, value } => {
                if epoch != self.state.epoch {
                    tracing::debug!("dropping submission result from before reset");
                    return;
                }
                self.state.submit_in_flight = false;
                let dir = self.settings.download.resolved_dir();
                apply_submit_result(&mut self.state, &dir, value, now);
            }
        }
    }
}

fn error_ui(message: &str) -> Value {
    json!({
        "type": "Column",
        "padding": 24,
        "children": [
            { "type": "Text", "text": "Error", "size": 18.0 },
            { "type": "Text", "text": message }
        ]
    })
}

fn render_ui(state: &AppState) -> Value {
    let mut children = vec![
        node(UiText::new("PDF form filler").size(20.0)),
        node(
            UiText::new("Upload a fillable PDF, complete the fields, sign, then generate the filled copy.")
                .size(14.0),
        ),
    ];
    children.extend(render_upload_control(state));

    if state.form_visible {
        children.push(render_form_section(state));
    }
    if state.result_visible {
        children.push(render_result_section(state));
    }

    children.push(node(
        UiText::new(state.error.message().unwrap_or(""))
            .size(12.0)
            .content_description("error_message"),
    ));

    node(UiColumn::new(children).padding(20))
}
