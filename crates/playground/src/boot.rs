//! Boot animation as an ordered list of (effect, delay) steps
//!
//! The UI loop calls [`BootSequence::advance`] every tick; each step fires
//! once its predecessor's delay has elapsed.

use std::time::{Duration, Instant};

pub const BOOT_LINES: [&str; 6] = [
    "$ ./launch playground",
    "[saw-core] loading runtime...",
    "[modules] resolving fun builds index...",
    "[net] loopback OK, external links deferred",
    "[ui] terminal channel online",
    "[ready] handoff to interactive mode",
];

pub const LOGO: &str = r"
          .-^-.
      _.-' /|\\ '--._
   .-'    /_|_\\     '-.
  /____.-' / \\ '-._____\\
  \\_____.-\_/_-.___ ____/
         SAW.DEV
";

const LINE_DELAY: Duration = Duration::from_millis(280);
const PROGRESS_FILL: Duration = Duration::from_millis(1250);

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BootEffect {
    Line(&'static str),
    ShowProgress,
    FillProgress,
    ShowLogo,
    RevealBlade,
    Finish,
}

#[derive(Debug, Clone, Copy)]
pub struct BootStep {
    pub effect: BootEffect,
    /// Wait after this effect before the next one fires
    pub delay: Duration,
}

fn default_steps() -> Vec<BootStep> {
    let mut steps: Vec<BootStep> = BOOT_LINES
        .iter()
        .map(|line| BootStep {
            effect: BootEffect::Line(line),
            delay: LINE_DELAY,
        })
        .collect();

    steps.extend([
        BootStep {
            effect: BootEffect::ShowProgress,
            delay: Duration::from_millis(120),
        },
        BootStep {
            effect: BootEffect::FillProgress,
            delay: PROGRESS_FILL,
        },
        BootStep {
            effect: BootEffect::ShowLogo,
            delay: Duration::from_millis(650),
        },
        BootStep {
            effect: BootEffect::RevealBlade,
            delay: Duration::from_millis(1180),
        },
        BootStep {
            effect: BootEffect::Finish,
            delay: Duration::ZERO,
        },
    ]);
    steps
}

/// Boot screen state plus the driver over its steps
#[derive(Debug, Clone)]
pub struct BootSequence {
    steps: Vec<BootStep>,
    next: usize,
    next_at: Option<Instant>,
    fill_started: Option<Instant>,

    pub lines: Vec<&'static str>,
    pub progress_visible: bool,
    pub logo_visible: bool,
    pub blade_visible: bool,
    pub finished: bool,
}

impl BootSequence {
    pub fn new() -> Self {
        Self::with_steps(default_steps())
    }

    pub fn with_steps(steps: Vec<BootStep>) -> Self {
        Self {
            steps,
            next: 0,
            next_at: None,
            fill_started: None,
            lines: Vec::new(),
            progress_visible: false,
            logo_visible: false,
            blade_visible: false,
            finished: false,
        }
    }

    /// A sequence that has already handed off to the page
    pub fn finished() -> Self {
        let mut boot = Self::new();
        boot.skip();
        boot
    }

    /// Fire every step that is due at `now`
    pub fn advance(&mut self, now: Instant) {
        let mut at = *self.next_at.get_or_insert(now);
        while self.next < self.steps.len() && now >= at {
            let step = self.steps[self.next];
            self.apply(step.effect, at);
            at += step.delay;
            self.next += 1;
        }
        self.next_at = Some(at);
    }

    /// Jump straight to the end state
    pub fn skip(&mut self) {
        while self.next < self.steps.len() {
            let effect = self.steps[self.next].effect;
            self.apply(effect, Instant::now());
            self.next += 1;
        }
        self.fill_started = None;
    }

    /// Progress bar fill in 0.0..=1.0
    pub fn progress(&self, now: Instant) -> f64 {
        if self.finished {
            return 1.0;
        }
        match self.fill_started {
            Some(start) => {
                let elapsed = now.saturating_duration_since(start).as_secs_f64();
                (elapsed / PROGRESS_FILL.as_secs_f64()).min(1.0)
            }
            None => 0.0,
        }
    }

    fn apply(&mut self, effect: BootEffect, at: Instant) {
        match effect {
            BootEffect::Line(line) => self.lines.push(line),
            BootEffect::ShowProgress => self.progress_visible = true,
            BootEffect::FillProgress => self.fill_started = Some(at),
            BootEffect::ShowLogo => self.logo_visible = true,
            BootEffect::RevealBlade => self.blade_visible = true,
            BootEffect::Finish => self.finished = true,
        }
    }
}

impl Default for BootSequence {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ms(n: u64) -> Duration {
        Duration::from_millis(n)
    }

    #[test]
    fn test_first_line_fires_immediately() {
        let mut boot = BootSequence::new();
        let start = Instant::now();
        boot.advance(start);
        assert_eq!(boot.lines, vec![BOOT_LINES[0]]);
        assert!(!boot.finished);
    }

    #[test]
    fn test_lines_follow_their_delays() {
        let mut boot = BootSequence::new();
        let start = Instant::now();
        boot.advance(start);
        boot.advance(start + ms(279));
        assert_eq!(boot.lines.len(), 1);
        boot.advance(start + ms(280));
        assert_eq!(boot.lines.len(), 2);
        boot.advance(start + ms(280 * 5));
        assert_eq!(boot.lines.len(), 6);
        assert!(!boot.progress_visible);
        boot.advance(start + ms(280 * 6));
        assert!(boot.progress_visible);
    }

    #[test]
    fn test_full_sequence_finishes_on_schedule() {
        let mut boot = BootSequence::new();
        let start = Instant::now();
        boot.advance(start);

        let total = 280 * 6 + 120 + 1250 + 650 + 1180;
        boot.advance(start + ms(total - 1));
        assert!(boot.blade_visible);
        assert!(!boot.finished);

        boot.advance(start + ms(total));
        assert!(boot.finished);
        assert!(boot.logo_visible);
        assert_eq!(boot.lines.len(), BOOT_LINES.len());
    }

    #[test]
    fn test_progress_fills_over_time() {
        let mut boot = BootSequence::new();
        let start = Instant::now();
        boot.advance(start);
        let fill_at = start + ms(280 * 6 + 120);
        boot.advance(fill_at);
        assert_eq!(boot.progress(fill_at), 0.0);
        let half = boot.progress(fill_at + ms(625));
        assert!((half - 0.5).abs() < 1e-6);
        assert_eq!(boot.progress(fill_at + ms(5000)), 1.0);
    }

    #[test]
    fn test_skip_reaches_end_state() {
        let mut boot = BootSequence::new();
        boot.skip();
        assert!(boot.finished && boot.logo_visible && boot.blade_visible);
        assert_eq!(boot.lines.len(), BOOT_LINES.len());
        assert_eq!(boot.progress(Instant::now()), 1.0);
        assert!(BootSequence::finished().finished);
    }

    #[test]
    fn test_custom_steps() {
        let mut boot = BootSequence::with_steps(vec![
            BootStep {
                effect: BootEffect::Line("hi"),
                delay: ms(10),
            },
            BootStep {
                effect: BootEffect::Finish,
                delay: Duration::ZERO,
            },
        ]);
        let start = Instant::now();
        boot.advance(start);
        assert!(!boot.finished);
        boot.advance(start + ms(10));
        assert!(boot.finished);
    }
}
