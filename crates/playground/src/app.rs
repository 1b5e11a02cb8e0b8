//! Application state and logic

use crossterm::event::{KeyCode, KeyEvent, KeyEventKind, KeyModifiers};
use playground_core::command::messages;
use playground_core::project::normalize_key;
use playground_core::{Command, Registry, ReloadOutcome};
use std::time::Instant;
use tracing::debug;

use crate::boot::BootSequence;
use crate::panel::{self, Control, DetailPanel};
use crate::reload::Reloader;
use crate::ui;

/// Which page control has keyboard focus
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Focus {
    #[default]
    Prompt,
    Card(usize),
}

/// Scroll targets on the page
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Section {
    Top,
    FunBuilds,
}

impl Section {
    pub fn line(self) -> usize {
        match self {
            Self::Top => 0,
            Self::FunBuilds => ui::fun_builds_line(),
        }
    }
}

/// Application state
pub struct App {
    pub registry: Registry,
    pub reloader: Reloader,
    pub boot: BootSequence,

    pub input: String,
    pub feedback: String,
    pub focus: Focus,
    pub panel: Option<DetailPanel>,
    /// First visible page line
    pub scroll: usize,
    pub should_quit: bool,
}

impl App {
    pub fn new(reloader: Reloader, boot: BootSequence) -> Self {
        Self {
            registry: Registry::new(),
            reloader,
            boot,
            input: String::new(),
            feedback: String::new(),
            focus: Focus::default(),
            panel: None,
            scroll: 0,
            should_quit: false,
        }
    }

    /// Advance the boot animation and apply finished reloads
    pub fn tick(&mut self, now: Instant) {
        if !self.boot.finished {
            self.boot.advance(now);
        }

        for completed in self.reloader.drain() {
            let outcome = self.registry.apply(completed.resolution);
            if completed.interactive {
                self.feedback = match outcome {
                    ReloadOutcome::Loaded { count, label } => {
                        messages::reload_loaded(count, &label)
                    }
                    ReloadOutcome::Fallback { count, .. } => messages::reload_fallback(count),
                };
            }
            self.focus = self.checked_focus(self.focus);
        }
    }

    /// Cards can disappear when a reload shrinks the registry
    fn checked_focus(&self, focus: Focus) -> Focus {
        match focus {
            Focus::Card(i) if i >= self.registry.len() => Focus::Prompt,
            focus => focus,
        }
    }

    pub fn start_reload(&mut self, interactive: bool) {
        self.reloader.start(interactive);
    }

    /// Run one prompt line
    pub fn execute(&mut self, raw: &str) {
        let Some(command) = Command::parse(raw) else {
            return;
        };
        debug!(?command, "dispatching command");

        match command {
            Command::Help => self.feedback = messages::HELP.to_string(),
            Command::Fun => {
                self.scroll_to(Section::FunBuilds);
                self.feedback = messages::FUN.to_string();
            }
            Command::Playground => {
                self.scroll_to(Section::Top);
                self.feedback = messages::PLAYGROUND.to_string();
            }
            Command::Repos => {
                self.start_reload(true);
                self.feedback = messages::RELOAD_STARTED.to_string();
            }
            Command::Clear => {
                self.scroll_to(Section::Top);
                self.feedback.clear();
                self.input.clear();
            }
            Command::SudoMakeFun => self.feedback = messages::SUDO.to_string(),
            Command::Open(key) if key.is_empty() => {
                self.feedback = messages::usage(&self.example_key());
            }
            Command::Open(key) => self.open_project(&key),
            Command::Unknown(input) => self.feedback = messages::unknown(&input),
        }
    }

    fn example_key(&self) -> String {
        self.registry.keys().next().unwrap_or("outlookcheck").to_string()
    }

    /// Open the detail panel for `key`, or report that it does not exist
    pub fn open_project(&mut self, key: &str) {
        let Some(record) = self.registry.get(&normalize_key(key)).cloned() else {
            self.feedback = messages::not_found(key, &self.example_key());
            return;
        };

        self.feedback = messages::opened(&record.key);
        match &mut self.panel {
            Some(panel) => panel.replace(record),
            None => self.panel = Some(DetailPanel::open(record, self.focus)),
        }
    }

    pub fn close_panel(&mut self) {
        if let Some(panel) = self.panel.take() {
            self.focus = self.checked_focus(panel.return_focus());
        }
    }

    pub fn scroll_to(&mut self, section: Section) {
        self.scroll = section.line();
    }

    pub fn scroll_by(&mut self, delta: isize) {
        let max = ui::page_line_count(self.registry.len()).saturating_sub(1);
        self.scroll = self.scroll.saturating_add_signed(delta).min(max);
    }

    fn focus_step(&mut self, forward: bool) {
        let cards = self.registry.len();
        // Ring: prompt, card 0..n-1
        let ring = cards + 1;
        let pos = match self.focus {
            Focus::Prompt => 0,
            Focus::Card(i) => i + 1,
        };
        let next = if forward {
            (pos + 1) % ring
        } else {
            (pos + ring - 1) % ring
        };
        self.focus = match next {
            0 => Focus::Prompt,
            n => Focus::Card(n - 1),
        };
        if let Focus::Card(i) = self.focus {
            self.scroll = ui::card_line(i);
        }
    }

    pub fn handle_key(&mut self, key: KeyEvent) {
        if key.kind != KeyEventKind::Press {
            return;
        }
        if key.code == KeyCode::Char('c') && key.modifiers.contains(KeyModifiers::CONTROL) {
            self.should_quit = true;
            return;
        }
        if !self.boot.finished {
            self.boot.skip();
            return;
        }
        if self.panel.is_some() {
            self.handle_panel_key(key);
            return;
        }

        match key.code {
            KeyCode::Esc => self.should_quit = true,
            KeyCode::Tab => self.focus_step(true),
            KeyCode::BackTab => self.focus_step(false),
            KeyCode::Enter => match self.focus {
                Focus::Prompt => {
                    let line = self.input.clone();
                    self.execute(&line);
                }
                Focus::Card(i) => {
                    if let Some(key) = self.registry.list().get(i).map(|p| p.key.clone()) {
                        self.open_project(&key);
                    }
                }
            },
            KeyCode::Backspace => {
                if self.focus == Focus::Prompt {
                    self.input.pop();
                }
            }
            KeyCode::PageDown => self.scroll_by(10),
            KeyCode::PageUp => self.scroll_by(-10),
            KeyCode::Down => self.scroll_by(1),
            KeyCode::Up => self.scroll_by(-1),
            KeyCode::Char(c)
                if !key
                    .modifiers
                    .intersects(KeyModifiers::CONTROL | KeyModifiers::ALT) =>
            {
                self.focus = Focus::Prompt;
                self.input.push(c);
            }
            _ => {}
        }
    }

    fn handle_panel_key(&mut self, key: KeyEvent) {
        let Some(panel) = self.panel.as_mut() else {
            return;
        };

        match key.code {
            KeyCode::Esc => self.close_panel(),
            KeyCode::Tab => panel.focus_next(),
            KeyCode::BackTab => panel.focus_prev(),
            KeyCode::Enter => match panel.focused() {
                Control::Close => self.close_panel(),
                control => {
                    if let Some(url) = panel.url(control).map(str::to_string) {
                        self.feedback = match panel::open_url(&url) {
                            Ok(()) => format!("Opening {}", url),
                            Err(e) => format!("{:#}", e),
                        };
                    }
                }
            },
            _ => {}
        }
    }
}
