//! Playground Core - project data and command handling for the playground terminal
//!
//! Owns the project registry (local baseline plus an optional remote overlay),
//! the data fetchers, and the command parser. The TUI crate only renders.

pub mod command;
pub mod config;
pub mod fetch;
pub mod format;
pub mod paths;
pub mod payload;
pub mod project;
pub mod registry;

pub use command::Command;
pub use config::Config;
pub use fetch::{FetchError, Fetcher, SourceFetcher};
pub use paths::Paths;
pub use project::ProjectRecord;
pub use registry::{ReloadOutcome, Registry, Resolution};
