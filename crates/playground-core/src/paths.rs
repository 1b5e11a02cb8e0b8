//! Standard paths used by the playground

use std::path::PathBuf;

/// Standard playground paths
pub struct Paths {
    /// Data directory (~/.local/share/playground)
    pub data: PathBuf,
    /// Config directory (~/.config/playground)
    pub config: PathBuf,
}

impl Default for Paths {
    fn default() -> Self {
        Self::new()
    }
}

impl Paths {
    pub fn new() -> Self {
        let data = dirs::data_dir()
            .unwrap_or_else(|| PathBuf::from("~/.local/share"))
            .join("playground");

        let config = dirs::config_dir()
            .unwrap_or_else(|| PathBuf::from("~/.config"))
            .join("playground");

        Self { data, config }
    }

    /// Path of the JSON config file
    pub fn config_file(&self) -> PathBuf {
        self.config.join("config.json")
    }

    /// Path of the diagnostic log written while the TUI owns the terminal
    pub fn log_file(&self) -> PathBuf {
        self.data.join("playground.log")
    }
}
