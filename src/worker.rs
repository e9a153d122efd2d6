use std::path::PathBuf;
use std::sync::mpsc;
use std::thread;

use crate::error::ClientError;
use crate::features::service::{DocumentService, SubmitPayload, UploadResponse};

/// How network jobs run.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WorkerMode {
    /// On a dedicated thread; completions are picked up by the next dispatch.
    Background,
    /// On the caller's thread; the completion is ready when `enqueue` returns.
    Inline,
}

pub(crate) enum WorkerJob {
    Upload { epoch: u64, source: PathBuf },
    Submit { epoch: u64, payload: SubmitPayload },
}

pub(crate) enum WorkerResult {
    Upload {
        epoch: u64,
        source: PathBuf,
        value: Result<UploadResponse, ClientError>,
    },
    Submit {
        epoch: u64,
        value: Result<Vec<u8>, ClientError>,
    },
}

pub(crate) struct WorkerRuntime {
    mode: WorkerMode,
    service: DocumentService,
    jobs: Option<mpsc::Sender<WorkerJob>>,
    results_tx: mpsc::Sender<WorkerResult>,
    results_rx: mpsc::Receiver<WorkerResult>,
}

impl WorkerRuntime {
    pub(crate) fn new(service: DocumentService, mode: WorkerMode) -> Result<Self, ClientError> {
        let (results_tx, results_rx) = mpsc::channel::<WorkerResult>();
        let jobs = match mode {
            WorkerMode::Inline => None,
            WorkerMode::Background => {
                let (tx, rx) = mpsc::channel::<WorkerJob>();
                let worker_service = service.clone();
                let worker_results = results_tx.clone();
                thread::Builder::new()
                    .name("formfill-worker".into())
                    .spawn(move || {
                        while let Ok(job) = rx.recv() {
                            let result = run_worker_job(&worker_service, job);
                            if worker_results.send(result).is_err() {
                                break;
                            }
                        }
                    })?;
                Some(tx)
            }
        };

        Ok(Self {
            mode,
            service,
            jobs,
            results_tx,
            results_rx,
        })
    }

    pub(crate) fn mode(&self) -> WorkerMode {
        self.mode
    }

    pub(crate) fn enqueue(&self, job: WorkerJob) -> Result<(), String> {
        match &self.jobs {
            Some(sender) => sender
                .send(job)
                .map_err(|e| format!("worker_send_failed:{e}")),
            None => {
                let result = run_worker_job(&self.service, job);
                self.results_tx
                    .send(result)
                    .map_err(|e| format!("worker_result_failed:{e}"))
            }
        }
    }

    pub(crate) fn drain(&self) -> Vec<WorkerResult> {
        self.results_rx.try_iter().collect()
    }
}

fn run_worker_job(service: &DocumentService, job: WorkerJob) -> WorkerResult {
    match job {
        WorkerJob::Upload { epoch, source } => {
            let value = service.upload(&source);
            WorkerResult::Upload {
                epoch,
                source,
                value,
            }
        }
        WorkerJob::Submit { epoch, payload } => WorkerResult::Submit {
            epoch,
            value: service.submit(&payload),
        },
    }
}
