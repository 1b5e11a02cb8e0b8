//! Prompt command parsing and the fixed feedback messages

/// A parsed prompt line
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    Help,
    Fun,
    Playground,
    Repos,
    Clear,
    SudoMakeFun,
    /// Key as typed, trimmed; empty means the usage hint
    Open(String),
    /// The trimmed input, original case
    Unknown(String),
}

impl Command {
    /// Parse a raw prompt line. Blank input is `None`.
    ///
    /// Matching is case-insensitive and first-match-wins in table order.
    pub fn parse(raw: &str) -> Option<Self> {
        let input = raw.trim();
        if input.is_empty() {
            return None;
        }

        let lower = input.to_lowercase();
        let command = match lower.as_str() {
            "help" => Self::Help,
            "fun" => Self::Fun,
            "playground" => Self::Playground,
            "repos" => Self::Repos,
            "clear" => Self::Clear,
            "sudo make fun" => Self::SudoMakeFun,
            "open" => Self::Open(String::new()),
            _ if lower.starts_with("open ") => {
                let key = input.get("open ".len()..).unwrap_or_default();
                Self::Open(key.trim().to_string())
            }
            _ => Self::Unknown(input.to_string()),
        };
        Some(command)
    }
}

pub mod messages {
    pub const HELP: &str =
        "Commands: help, fun, playground, open <key>, repos, clear, sudo make fun";
    pub const FUN: &str = "Jumped to Fun Builds.";
    pub const PLAYGROUND: &str = "Moved to top of playground.";
    pub const SUDO: &str = "Permission granted. Injecting 12% more chaos into the build queue.";
    pub const RELOAD_STARTED: &str = "Fetching project data...";

    pub fn usage(example_key: &str) -> String {
        format!("Usage: open <key>  (example: open {})", example_key)
    }

    pub fn not_found(key: &str, example_key: &str) -> String {
        format!("No project found for \"{}\". Try: open {}", key, example_key)
    }

    pub fn opened(key: &str) -> String {
        format!("Opened {} in the detail panel.", key)
    }

    pub fn unknown(input: &str) -> String {
        format!(
            "Unknown command: \"{}\". Try \"help\" for available commands.",
            input
        )
    }

    pub fn reload_loaded(count: usize, label: &str) -> String {
        format!("Loaded {} projects from {}.", count, label)
    }

    pub fn reload_fallback(count: usize) -> String {
        format!(
            "Project data unavailable; using local fallback ({} projects).",
            count
        )
    }
}
