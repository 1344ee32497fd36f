//! Backend orchestrator answering config and summarize requests.
//!
//! # Architecture
//!
//! ```text
//! BackendHandle ──mpsc──▶ Backend task ──▶ ConfigProvider / Summarizer
//!        ▲                     │
//!        └──────oneshot────────┘
//! ```
//!
//! The task makes its single config load attempt before serving anything,
//! so requests queued during startup see the outcome of that load.

mod protocol;

pub use protocol::{Request, Response};

use std::sync::Arc;

use tokio::sync::{mpsc, oneshot};
use tracing::{debug, info, warn};

use crate::config::{BundleSource, ConfigProvider};
use crate::domain::SummaryResult;
use crate::summarizer::Summarizer;

pub const CONFIG_NOT_LOADED: &str = "configuration not loaded";
pub const NO_RESPONSE: &str = "no response from summarization backend";

/// Message type for the backend task
#[derive(Debug)]
enum Envelope {
    /// A request with the channel its answer goes to
    Request(Request, oneshot::Sender<Response>),
    /// Shutdown the backend
    Shutdown,
}

/// Handle to send requests to the backend
#[derive(Clone)]
pub struct BackendHandle {
    tx: mpsc::Sender<Envelope>,
}

impl BackendHandle {
    /// Send a request and wait for its answer.
    ///
    /// A backend that is gone answers with an error instead of failing.
    pub async fn request(&self, request: Request) -> Response {
        let (reply_tx, reply_rx) = oneshot::channel();
        if let Err(e) = self.tx.send(Envelope::Request(request, reply_tx)).await {
            warn!("Failed to reach backend: {}", e);
            return Response::Error(NO_RESPONSE.to_string());
        }

        reply_rx
            .await
            .unwrap_or_else(|_| Response::Error(NO_RESPONSE.to_string()))
    }

    /// Shutdown the backend
    pub async fn shutdown(&self) {
        let _ = self.tx.send(Envelope::Shutdown).await;
    }
}

/// Answers requests from the loaded config and a summarizer.
#[derive(Clone)]
pub struct Orchestrator {
    provider: Arc<ConfigProvider>,
    summarizer: Arc<dyn Summarizer>,
}

impl Orchestrator {
    pub fn new(provider: Arc<ConfigProvider>, summarizer: Arc<dyn Summarizer>) -> Self {
        Self {
            provider,
            summarizer,
        }
    }

    pub async fn handle(&self, request: Request) -> Response {
        match request {
            Request::RequestConfig => match self.provider.require() {
                Ok(bundle) => Response::Config(bundle.as_ref().clone()),
                Err(_) => Response::Error(CONFIG_NOT_LOADED.to_string()),
            },
            Request::Summarize { text } => {
                let Ok(bundle) = self.provider.require() else {
                    return Response::Error(CONFIG_NOT_LOADED.to_string());
                };
                let result = self.summarizer.summarize(&text, &bundle).await;
                SummaryResult::from(result).into()
            }
        }
    }
}

/// Backend service that owns the config and serves requests
pub struct Backend {
    orchestrator: Orchestrator,
    source: Arc<dyn BundleSource>,
    rx: mpsc::Receiver<Envelope>,
}

impl Backend {
    /// Create a new backend and return a handle to communicate with it
    pub fn new(
        source: Arc<dyn BundleSource>,
        summarizer: Arc<dyn Summarizer>,
    ) -> (Self, BackendHandle) {
        let (tx, rx) = mpsc::channel(100);
        let handle = BackendHandle { tx };
        let orchestrator = Orchestrator::new(Arc::new(ConfigProvider::new()), summarizer);
        let backend = Self {
            orchestrator,
            source,
            rx,
        };
        (backend, handle)
    }

    /// Run the backend loop
    pub async fn run(mut self) {
        info!("Backend started");

        // Failure is already logged; the provider stays absent
        let _ = self
            .orchestrator
            .provider
            .load(self.source.as_ref())
            .await;

        while let Some(msg) = self.rx.recv().await {
            match msg {
                Envelope::Request(Request::RequestConfig, reply) => {
                    let response = self.orchestrator.handle(Request::RequestConfig).await;
                    let _ = reply.send(response);
                }
                Envelope::Request(request, reply) => {
                    // Summaries run side by side; each owns its reply channel
                    let orchestrator = self.orchestrator.clone();
                    tokio::spawn(async move {
                        let response = orchestrator.handle(request).await;
                        if reply.send(response).is_err() {
                            debug!("Requester went away before the summary arrived");
                        }
                    });
                }
                Envelope::Shutdown => {
                    info!("Backend shutting down");
                    break;
                }
            }
        }
    }
}

/// Spawn the backend as a tokio task
pub fn spawn_backend(
    source: Arc<dyn BundleSource>,
    summarizer: Arc<dyn Summarizer>,
) -> BackendHandle {
    let (backend, handle) = Backend::new(source, summarizer);

    tokio::spawn(async move {
        backend.run().await;
    });

    handle
}
