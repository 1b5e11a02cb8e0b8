//! The project registry
//!
//! Starts as the local baseline table and is replaced wholesale on every
//! reload, never patched. Any failure while loading remote data collapses
//! to the baseline table with the `local fallback` label.

use serde::Serialize;
use tracing::{info, warn};

use crate::fetch::{FetchError, Fetcher};
use crate::payload::Payload;
use crate::project::{self, ProjectRecord};

/// Label shown whenever the registry holds the baseline table
pub const FALLBACK_LABEL: &str = "local fallback";

/// A complete replacement for the registry contents
#[derive(Debug)]
pub struct Resolution {
    pub records: Vec<ProjectRecord>,
    pub label: String,
    /// Why remote data was rejected; `None` on success
    pub failure: Option<FetchError>,
}

impl Resolution {
    /// The baseline table, labelled as a fallback
    pub fn fallback(reason: FetchError) -> Self {
        Self {
            records: project::baseline(),
            label: FALLBACK_LABEL.to_string(),
            failure: Some(reason),
        }
    }

    pub fn is_fallback(&self) -> bool {
        self.failure.is_some()
    }
}

/// What a reload did, for status reporting
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ReloadOutcome {
    Loaded { count: usize, label: String },
    Fallback { count: usize, reason: String },
}

/// Turn a fetched body (or the fetch error) into registry contents
pub fn resolve(fetched: Result<String, FetchError>, baseline: &[ProjectRecord]) -> Resolution {
    match try_resolve(fetched, baseline) {
        Ok(resolution) => resolution,
        Err(reason) => Resolution::fallback(reason),
    }
}

fn try_resolve(
    fetched: Result<String, FetchError>,
    baseline: &[ProjectRecord],
) -> Result<Resolution, FetchError> {
    let payload = Payload::parse(&fetched?)?;

    let mut records: Vec<ProjectRecord> = Vec::with_capacity(payload.projects.len());
    for raw in &payload.projects {
        let Some(record) = project::normalize(raw, baseline) else {
            continue;
        };
        // Last writer wins, first position is kept
        match records.iter_mut().find(|r| r.key == record.key) {
            Some(existing) => *existing = record,
            None => records.push(record),
        }
    }

    if records.is_empty() {
        return Err(FetchError::NoValidRecords);
    }

    Ok(Resolution {
        records,
        label: payload.label(),
        failure: None,
    })
}

/// In-memory mapping of project key to record, in insertion order
#[derive(Debug, Clone, Serialize)]
pub struct Registry {
    #[serde(rename = "source")]
    label: String,
    #[serde(rename = "projects")]
    records: Vec<ProjectRecord>,
}

impl Default for Registry {
    fn default() -> Self {
        Self::new()
    }
}

impl Registry {
    /// A registry holding a copy of the baseline table
    pub fn new() -> Self {
        Self {
            label: FALLBACK_LABEL.to_string(),
            records: project::baseline(),
        }
    }

    pub fn get(&self, key: &str) -> Option<&ProjectRecord> {
        self.records.iter().find(|p| p.key == key)
    }

    pub fn list(&self) -> &[ProjectRecord] {
        &self.records
    }

    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.records.iter().map(|p| p.key.as_str())
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    pub fn source_label(&self) -> &str {
        &self.label
    }

    /// Replace the contents in one step and report what happened
    pub fn apply(&mut self, resolution: Resolution) -> ReloadOutcome {
        let Resolution {
            records,
            label,
            failure,
        } = resolution;
        let count = records.len();

        self.records = records;
        self.label = label;

        match failure {
            None => {
                info!(count, label = %self.label, "project data loaded");
                ReloadOutcome::Loaded {
                    count,
                    label: self.label.clone(),
                }
            }
            Some(reason) => {
                warn!(%reason, "project data unavailable, using local fallback");
                ReloadOutcome::Fallback {
                    count,
                    reason: reason.to_string(),
                }
            }
        }
    }

    /// Fetch, resolve and apply in one go
    pub fn reload(&mut self, fetcher: &dyn Fetcher, source: &str) -> ReloadOutcome {
        let resolution = resolve(fetcher.fetch(source), &project::baseline());
        self.apply(resolution)
    }
}
