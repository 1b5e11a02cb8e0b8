//! Background project-data reloads
//!
//! Each reload fetches and resolves on tokio's blocking pool, then hands the
//! finished [`Resolution`] back over a channel. Only the UI thread applies
//! it, so the registry swap happens in one step.

use playground_core::registry::{self, Resolution};
use playground_core::{project, FetchError, Fetcher};
use std::sync::Arc;
use tokio::runtime::Handle;
use tokio::sync::mpsc::{self, UnboundedReceiver, UnboundedSender};
use tracing::{debug, warn};

/// Sends exactly one [`Completed`] per reload, even if the task panics
struct Report {
    tx: Option<UnboundedSender<Completed>>,
    interactive: bool,
}

impl Report {
    fn send(&mut self, resolution: Resolution) {
        if let Some(tx) = self.tx.take() {
            // Receiver only goes away on shutdown
            let _ = tx.send(Completed {
                resolution,
                interactive: self.interactive,
            });
        }
    }
}

impl Drop for Report {
    fn drop(&mut self) {
        if self.tx.is_some() {
            warn!("reload task panicked, falling back");
            self.send(Resolution::fallback(FetchError::Network(
                "reload task panicked".to_string(),
            )));
        }
    }
}

/// A resolved reload waiting to be applied
#[derive(Debug)]
pub struct Completed {
    pub resolution: Resolution,
    /// Started by the `repos` command rather than at startup
    pub interactive: bool,
}

pub struct Reloader {
    runtime: Handle,
    fetcher: Arc<dyn Fetcher>,
    source: String,
    tx: UnboundedSender<Completed>,
    rx: UnboundedReceiver<Completed>,
    in_flight: usize,
}

impl Reloader {
    pub fn new(runtime: Handle, fetcher: Arc<dyn Fetcher>, source: impl Into<String>) -> Self {
        let (tx, rx) = mpsc::unbounded_channel();
        Self {
            runtime,
            fetcher,
            source: source.into(),
            tx,
            rx,
            in_flight: 0,
        }
    }

    /// Reloads started but not yet drained
    pub fn in_flight(&self) -> usize {
        self.in_flight
    }

    /// Start an independent fetch; earlier ones keep running
    pub fn start(&mut self, interactive: bool) {
        let fetcher = Arc::clone(&self.fetcher);
        let source = self.source.clone();
        let tx = self.tx.clone();
        self.in_flight += 1;
        debug!(%source, interactive, "reload started");

        self.runtime.spawn_blocking(move || {
            let mut report = Report {
                tx: Some(tx),
                interactive,
            };
            let resolution = registry::resolve(fetcher.fetch(&source), &project::baseline());
            report.send(resolution);
        });
    }

    /// Collect every reload that has finished since the last call
    pub fn drain(&mut self) -> Vec<Completed> {
        let mut done = Vec::new();
        while let Ok(completed) = self.rx.try_recv() {
            done.push(completed);
        }
        self.in_flight = self.in_flight.saturating_sub(done.len());
        done
    }
}
