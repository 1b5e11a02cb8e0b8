//! Detail panel for one project
//!
//! While open the panel owns keyboard focus: Tab cycles only among its own
//! enabled controls, and closing hands focus back to whoever opened it.

use anyhow::{Context, Result};
use playground_core::ProjectRecord;
use std::process::Command;

use crate::app::Focus;

/// Focusable controls, in tab order
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Control {
    GitHub,
    Demo,
    Close,
}

impl Control {
    const ORDER: [Control; 3] = [Control::GitHub, Control::Demo, Control::Close];

    pub fn label(self) -> &'static str {
        match self {
            Self::GitHub => "GitHub",
            Self::Demo => "Demo",
            Self::Close => "Close",
        }
    }
}

#[derive(Debug, Clone)]
pub struct DetailPanel {
    pub record: ProjectRecord,
    focused: Control,
    return_focus: Focus,
}

impl DetailPanel {
    pub fn open(record: ProjectRecord, return_focus: Focus) -> Self {
        let mut panel = Self {
            record,
            focused: Control::Close,
            return_focus,
        };
        panel.focused = panel.enabled_controls()[0];
        panel
    }

    /// Swap in another record, keeping focus bookkeeping
    pub fn replace(&mut self, record: ProjectRecord) {
        *self = Self::open(record, self.return_focus);
    }

    pub fn url(&self, control: Control) -> Option<&str> {
        match control {
            Control::GitHub => self.record.github.as_deref(),
            Control::Demo => self.record.demo.as_deref(),
            Control::Close => None,
        }
    }

    pub fn is_enabled(&self, control: Control) -> bool {
        control == Control::Close || self.url(control).is_some()
    }

    /// Enabled controls in tab order; never empty since Close is always on
    pub fn enabled_controls(&self) -> Vec<Control> {
        Control::ORDER
            .into_iter()
            .filter(|c| self.is_enabled(*c))
            .collect()
    }

    pub fn focused(&self) -> Control {
        self.focused
    }

    pub fn return_focus(&self) -> Focus {
        self.return_focus
    }

    pub fn focus_next(&mut self) {
        self.step(1);
    }

    pub fn focus_prev(&mut self) {
        self.step(-1);
    }

    fn step(&mut self, delta: isize) {
        let controls = self.enabled_controls();
        let len = controls.len() as isize;
        let pos = controls
            .iter()
            .position(|c| *c == self.focused)
            .unwrap_or(0) as isize;
        self.focused = controls[(pos + delta).rem_euclid(len) as usize];
    }
}

/// Hand a URL to the platform's browser opener
pub fn open_url(url: &str) -> Result<()> {
    let mut command = if cfg!(target_os = "macos") {
        Command::new("open")
    } else if cfg!(target_os = "windows") {
        let mut c = Command::new("cmd");
        c.args(["/C", "start", ""]);
        c
    } else {
        Command::new("xdg-open")
    };

    command
        .arg(url)
        .stdout(std::process::Stdio::null())
        .stderr(std::process::Stdio::null())
        .spawn()
        .with_context(|| format!("Failed to open {}", url))?;
    Ok(())
}
