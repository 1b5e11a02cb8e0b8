//! Project records and the local baseline table
//!
//! Every record key is derived by [`normalize_key`]. Field values resolve
//! per field: local baseline first, then the remote value, then a default.

use serde::{Deserialize, Serialize};

pub const DEFAULT_TITLE: &str = "Untitled project";
pub const DEFAULT_STATUS: &str = "Unknown";
pub const DEFAULT_DESCRIPTION: &str = "No description provided.";
pub const DEFAULT_WHY: &str = "No rationale recorded.";
pub const DEFAULT_STACK: &str = "Not specified";
pub const DEFAULT_NOTE: &str = "No notes.";

/// A project as shown on a card and in the detail panel
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProjectRecord {
    pub key: String,
    pub title: String,
    pub status: String,
    pub description: String,
    pub why: String,
    pub stack: String,
    pub github: Option<String>,
    pub demo: Option<String>,
    pub note: String,
}

/// A project-like object as it arrives from the data file
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub struct RawProject {
    #[serde(default)]
    pub key: Option<String>,
    #[serde(default)]
    pub title: Option<String>,
    #[serde(default)]
    pub status: Option<String>,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub why: Option<String>,
    #[serde(default)]
    pub stack: Option<String>,
    #[serde(default)]
    pub github: Option<String>,
    #[serde(default)]
    pub demo: Option<String>,
    #[serde(default)]
    pub note: Option<String>,
}

/// Lowercase and keep only `[a-z0-9]`
pub fn normalize_key(candidate: &str) -> String {
    candidate
        .chars()
        .filter(|c| c.is_ascii_alphanumeric())
        .map(|c| c.to_ascii_lowercase())
        .collect()
}

fn present(value: Option<&str>) -> Option<&str> {
    value.filter(|v| !v.trim().is_empty())
}

fn pick(local: Option<&str>, remote: Option<&str>, default: &str) -> String {
    present(local)
        .or_else(|| present(remote))
        .unwrap_or(default)
        .to_string()
}

fn pick_url(local: Option<&str>, remote: Option<&str>) -> Option<String> {
    present(local).or_else(|| present(remote)).map(str::to_string)
}

/// Normalize one raw object against the baseline table.
///
/// Returns `None` when the key reduces to the empty string.
pub fn normalize(raw: &RawProject, baseline: &[ProjectRecord]) -> Option<ProjectRecord> {
    let key = normalize_key(raw.key.as_deref().unwrap_or_default());
    if key.is_empty() {
        return None;
    }

    let local = baseline.iter().find(|p| p.key == key);

    Some(ProjectRecord {
        title: pick(local.map(|p| p.title.as_str()), raw.title.as_deref(), DEFAULT_TITLE),
        status: pick(local.map(|p| p.status.as_str()), raw.status.as_deref(), DEFAULT_STATUS),
        description: pick(
            local.map(|p| p.description.as_str()),
            raw.description.as_deref(),
            DEFAULT_DESCRIPTION,
        ),
        why: pick(local.map(|p| p.why.as_str()), raw.why.as_deref(), DEFAULT_WHY),
        stack: pick(local.map(|p| p.stack.as_str()), raw.stack.as_deref(), DEFAULT_STACK),
        github: pick_url(
            local.and_then(|p| p.github.as_deref()),
            raw.github.as_deref(),
        ),
        demo: pick_url(local.and_then(|p| p.demo.as_deref()), raw.demo.as_deref()),
        note: pick(local.map(|p| p.note.as_str()), raw.note.as_deref(), DEFAULT_NOTE),
        key,
    })
}

/// The compile-time project table, always valid and always available
pub fn baseline() -> Vec<ProjectRecord> {
    vec![
        ProjectRecord {
            key: "outlookcheck".to_string(),
            title: "Outlook Recipient Check".to_string(),
            status: "Active".to_string(),
            description: "A lightweight Outlook add-in that checks email recipients for potential \
                mistakes. It flags mixed domains and detects similarly named contacts on different \
                domains to avoid misdirected emails."
                .to_string(),
            why: "Email mistakes can be costly. This add-in catches common errors before they \
                happen by analyzing recipient patterns."
                .to_string(),
            stack: "TypeScript, Outlook SDK".to_string(),
            github: Some("https://github.com/Dailypush/OutlookRecipientCheck".to_string()),
            demo: None,
            note: "Recently updated with enhanced recipient validation logic.".to_string(),
        },
        ProjectRecord {
            key: "minecraftinglive".to_string(),
            title: "Minecrafting Live".to_string(),
            status: "Active".to_string(),
            description: "A Docker and Git-based hosting solution for Minecraft-related \
                technologies. Streamlines deployment and management of multiple Minecraft services."
                .to_string(),
            why: "Managing Minecraft infrastructure manually is tedious. This project automates \
                deployment and version control."
                .to_string(),
            stack: "JavaScript, Docker, Git".to_string(),
            github: Some("https://github.com/Dailypush/MinecraftingLive".to_string()),
            demo: None,
            note: "Supports multiple service orchestration and automated backups.".to_string(),
        },
        ProjectRecord {
            key: "gominecraft".to_string(),
            title: "Go Minecraft Stat Stream".to_string(),
            status: "Active".to_string(),
            description: "Combines Minecraft, statistics, and real-time streaming of data. \
                Provides live insights into Minecraft server metrics and player activity."
                .to_string(),
            why: "Understanding server performance in real-time is crucial for managing a healthy \
                Minecraft server."
                .to_string(),
            stack: "Go, WebSocket, Minecraft API".to_string(),
            github: Some("https://github.com/Dailypush/GoMinecraftStatStream".to_string()),
            demo: None,
            note: "Features live monitoring dashboard with configurable metrics.".to_string(),
        },
    ]
}

#[cfg(test)]
mod tests {
    use super::*;

    fn raw(key: &str) -> RawProject {
        RawProject {
            key: Some(key.to_string()),
            ..Default::default()
        }
    }

    #[test]
    fn test_normalize_key() {
        assert_eq!(normalize_key("New-Tool!"), "newtool");
        assert_eq!(normalize_key("  Go Minecraft 2 "), "gominecraft2");
        assert_eq!(normalize_key("ÉclairBot"), "clairbot");
        assert_eq!(normalize_key("!!--"), "");
    }

    #[test]
    fn test_empty_key_is_dropped() {
        assert!(normalize(&raw("***"), &baseline()).is_none());
        assert!(normalize(&RawProject::default(), &baseline()).is_none());
    }

    #[test]
    fn test_unknown_key_uses_remote_then_defaults() {
        let mut r = raw("New-Tool!");
        r.title = Some("New Tool".to_string());
        r.stack = Some("   ".to_string());
        r.demo = Some("https://demo.example".to_string());

        let record = normalize(&r, &baseline()).unwrap();
        assert_eq!(record.key, "newtool");
        assert_eq!(record.title, "New Tool");
        assert_eq!(record.stack, DEFAULT_STACK);
        assert_eq!(record.status, DEFAULT_STATUS);
        assert_eq!(record.note, DEFAULT_NOTE);
        assert_eq!(record.github, None);
        assert_eq!(record.demo.as_deref(), Some("https://demo.example"));
    }

    #[test]
    fn test_local_value_wins_per_field() {
        let mut r = raw("OutlookCheck");
        r.title = Some("Remote title".to_string());
        r.demo = Some("https://remote.demo".to_string());

        let record = normalize(&r, &baseline()).unwrap();
        assert_eq!(record.title, "Outlook Recipient Check");
        assert_eq!(record.stack, "TypeScript, Outlook SDK");
        // Baseline has no demo, so the remote one fills in
        assert_eq!(record.demo.as_deref(), Some("https://remote.demo"));
    }

    #[test]
    fn test_baseline_keys_are_normalized_and_unique() {
        let table = baseline();
        for p in &table {
            assert_eq!(normalize_key(&p.key), p.key);
        }
        let mut keys: Vec<_> = table.iter().map(|p| p.key.as_str()).collect();
        keys.dedup();
        assert_eq!(keys.len(), table.len());
    }
}
