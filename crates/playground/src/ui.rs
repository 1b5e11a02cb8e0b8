//! UI rendering

use chrono::Local;
use playground_core::format;
use ratatui::{
    layout::{Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style, Stylize},
    text::{Line, Span, Text},
    widgets::{Block, Borders, Clear, Gauge, Paragraph, Wrap},
    Frame,
};
use std::time::Instant;

use crate::app::{App, Focus};
use crate::boot::LOGO;
use crate::panel::{Control, DetailPanel};

const INTRO: [&str; 5] = [
    "~/playground",
    "",
    "Small tools, experiments and fun builds.",
    "Type a command below. Try help, fun, open <key> or repos.",
    "",
];

/// Heading, metadata line, blank
const SECTION_HEADER: usize = 3;
/// Key, title, description, action, blank
const CARD_HEIGHT: usize = 5;

pub fn fun_builds_line() -> usize {
    INTRO.len()
}

/// Card count comes from remote data, so offsets saturate instead of wrapping
pub fn card_line(index: usize) -> usize {
    (fun_builds_line() + SECTION_HEADER).saturating_add(index.saturating_mul(CARD_HEIGHT))
}

pub fn page_line_count(cards: usize) -> usize {
    card_line(cards)
}

/// Paragraph scrolling is limited to `u16` rows
fn scroll_offset(line: usize) -> u16 {
    u16::try_from(line).unwrap_or(u16::MAX)
}

/// Main draw function
pub fn draw(f: &mut Frame, app: &App) {
    if !app.boot.finished {
        draw_boot(f, app);
        return;
    }

    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(3), // Header
            Constraint::Min(0),    // Page
            Constraint::Length(1), // Feedback
            Constraint::Length(3), // Prompt
            Constraint::Length(1), // Footer
        ])
        .split(f.area());

    draw_header(f, chunks[0]);
    draw_page(f, app, chunks[1]);
    draw_feedback(f, app, chunks[2]);
    draw_prompt(f, app, chunks[3]);
    draw_footer(f, app, chunks[4]);

    if let Some(panel) = &app.panel {
        draw_panel(f, panel);
    }
}

fn draw_boot(f: &mut Frame, app: &App) {
    let boot = &app.boot;
    let logo_height = LOGO.lines().count() as u16;

    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(boot.lines.len() as u16 + 2),
            Constraint::Length(if boot.progress_visible { 3 } else { 0 }),
            Constraint::Length(if boot.logo_visible { logo_height } else { 0 }),
            Constraint::Length(if boot.blade_visible { 1 } else { 0 }),
            Constraint::Min(0),
        ])
        .split(f.area());

    let lines: Vec<Line> = boot
        .lines
        .iter()
        .map(|l| Line::from(Span::styled(*l, Style::default().fg(Color::Green))))
        .collect();
    let output = Paragraph::new(lines).block(
        Block::default()
            .borders(Borders::ALL)
            .border_style(Style::default().fg(Color::DarkGray)),
    );
    f.render_widget(output, chunks[0]);

    if boot.progress_visible {
        let gauge = Gauge::default()
            .block(Block::default().borders(Borders::ALL))
            .gauge_style(Style::default().fg(Color::Cyan))
            .ratio(boot.progress(Instant::now()));
        f.render_widget(gauge, chunks[1]);
    }

    if boot.logo_visible {
        let logo = Paragraph::new(Text::raw(LOGO.trim_matches('\n')))
            .style(Style::default().fg(Color::Yellow).bold());
        f.render_widget(logo, chunks[2]);
    }

    if boot.blade_visible {
        let blade = Line::from(Span::styled(
            "  >>>>>>>>>> blade spinning up <<<<<<<<<<",
            Style::default().fg(Color::Red).add_modifier(Modifier::BOLD),
        ));
        f.render_widget(Paragraph::new(blade), chunks[3]);
    }
}

fn draw_header(f: &mut Frame, area: Rect) {
    let header = Paragraph::new(vec![Line::from(vec![
        Span::styled(" SAW.DEV Playground ", Style::default().fg(Color::Cyan).bold()),
        Span::raw(" - "),
        Span::styled(
            Local::now().format("%H:%M:%S").to_string(),
            Style::default().fg(Color::DarkGray),
        ),
    ])])
    .block(
        Block::default()
            .borders(Borders::ALL)
            .border_style(Style::default().fg(Color::Cyan)),
    );

    f.render_widget(header, area);
}

/// Every line of the scrollable page, in order
fn page_lines(app: &App, width: usize) -> Vec<Line<'static>> {
    let mut lines: Vec<Line> = INTRO
        .iter()
        .enumerate()
        .map(|(i, l)| {
            if i == 0 {
                Line::from(Span::styled(*l, Style::default().fg(Color::Green).bold()))
            } else {
                Line::from(*l)
            }
        })
        .collect();

    lines.push(Line::from(Span::styled(
        "== Fun Builds ==",
        Style::default().fg(Color::Magenta).bold(),
    )));
    lines.push(Line::from(vec![
        Span::styled("source: ", Style::default().fg(Color::DarkGray)),
        Span::styled(
            app.registry.source_label().to_string(),
            Style::default().fg(Color::Cyan),
        ),
        Span::styled("  keys: ", Style::default().fg(Color::DarkGray)),
        Span::raw(format::key_list(app.registry.keys())),
    ]));
    lines.push(Line::from(""));

    for (i, p) in app.registry.list().iter().enumerate() {
        let focused = app.focus == Focus::Card(i);
        let action_style = if focused {
            Style::default().fg(Color::Black).bg(Color::Yellow)
        } else {
            Style::default().fg(Color::Yellow)
        };

        lines.push(Line::from(Span::styled(
            format!("[{}]", p.key),
            Style::default().fg(Color::Blue),
        )));
        lines.push(Line::from(Span::styled(p.title.clone(), Style::default().bold())));
        lines.push(Line::from(format::truncate(&p.description, width.max(20))));
        lines.push(Line::from(Span::styled("[ open details ]", action_style)));
        lines.push(Line::from(""));
    }

    lines
}

fn draw_page(f: &mut Frame, app: &App, area: Rect) {
    let width = area.width.saturating_sub(2) as usize;
    let page = Paragraph::new(page_lines(app, width))
        .block(
            Block::default()
                .borders(Borders::LEFT | Borders::RIGHT)
                .border_style(Style::default().fg(Color::DarkGray)),
        )
        .scroll((scroll_offset(app.scroll), 0));
    f.render_widget(page, area);
}

fn draw_feedback(f: &mut Frame, app: &App, area: Rect) {
    let feedback = Paragraph::new(Span::styled(
        format!(" {}", app.feedback),
        Style::default().fg(Color::Yellow),
    ));
    f.render_widget(feedback, area);
}

fn draw_prompt(f: &mut Frame, app: &App, area: Rect) {
    let focused = app.focus == Focus::Prompt && app.panel.is_none();
    let border_color = if focused { Color::Yellow } else { Color::Blue };

    let prompt = Paragraph::new(Line::from(vec![
        Span::styled("$ ", Style::default().fg(Color::Green).bold()),
        Span::raw(app.input.as_str()),
    ]))
    .block(
        Block::default()
            .title(" command ")
            .borders(Borders::ALL)
            .border_style(Style::default().fg(border_color)),
    );
    f.render_widget(prompt, area);

    if focused {
        let x = area.x + 3 + app.input.chars().count() as u16;
        f.set_cursor_position((x.min(area.right().saturating_sub(2)), area.y + 1));
    }
}

fn draw_footer(f: &mut Frame, app: &App, area: Rect) {
    let pending = app.reloader.in_flight();
    let mut spans = vec![
        Span::styled(" Enter", Style::default().fg(Color::Cyan).bold()),
        Span::raw(" run  "),
        Span::styled("Tab", Style::default().fg(Color::Cyan).bold()),
        Span::raw(" focus  "),
        Span::styled("PgUp/PgDn", Style::default().fg(Color::Cyan).bold()),
        Span::raw(" scroll  "),
        Span::styled("Esc", Style::default().fg(Color::Cyan).bold()),
        Span::raw(" close/quit"),
    ];
    if pending > 0 {
        spans.push(Span::styled(
            format!("  [{} reload(s) pending]", pending),
            Style::default().fg(Color::Magenta),
        ));
    }

    let footer = Paragraph::new(Line::from(spans)).style(Style::default().fg(Color::DarkGray));
    f.render_widget(footer, area);
}

fn link_span(panel: &DetailPanel, control: Control) -> Span<'static> {
    let focused = panel.focused() == control;
    let text = match (control, panel.url(control)) {
        (Control::Close, _) => "[ Close ]".to_string(),
        (_, Some(url)) => format!("[ {} ] {}", control.label(), url),
        (_, None) => format!("[ {} ] (unavailable)", control.label()),
    };

    let style = if !panel.is_enabled(control) {
        Style::default().fg(Color::DarkGray).add_modifier(Modifier::CROSSED_OUT)
    } else if focused {
        Style::default().fg(Color::Black).bg(Color::Yellow)
    } else {
        Style::default().fg(Color::Cyan)
    };
    Span::styled(text, style)
}

fn draw_panel(f: &mut Frame, panel: &DetailPanel) {
    let area = f.area();
    let popup_width = area.width.saturating_sub(4).min(72);
    let popup_height = area.height.saturating_sub(2).min(22);
    let x = area.width.saturating_sub(popup_width);
    let y = (area.height.saturating_sub(popup_height)) / 2;
    let popup_area = Rect::new(x, y, popup_width, popup_height);

    f.render_widget(Clear, popup_area);

    let p = &panel.record;
    let label = |s: &'static str| Span::styled(s, Style::default().fg(Color::DarkGray));
    let text = vec![
        Line::from(Span::styled(
            p.status.clone(),
            Style::default().fg(Color::Green).bold(),
        )),
        Line::from(Span::styled(p.title.clone(), Style::default().bold())),
        Line::from(""),
        Line::from(p.description.clone()),
        Line::from(""),
        Line::from(label("Why")),
        Line::from(p.why.clone()),
        Line::from(""),
        Line::from(vec![label("Stack: "), Span::raw(p.stack.clone())]),
        Line::from(""),
        Line::from(link_span(panel, Control::GitHub)),
        Line::from(link_span(panel, Control::Demo)),
        Line::from(""),
        Line::from(vec![label("Note: "), Span::raw(p.note.clone())]),
        Line::from(""),
        Line::from(link_span(panel, Control::Close)),
    ];

    let popup = Paragraph::new(text).wrap(Wrap { trim: true }).block(
        Block::default()
            .title(format!(" {} ", p.key))
            .title_style(Style::default().fg(Color::Yellow).bold())
            .borders(Borders::ALL)
            .border_style(Style::default().fg(Color::Yellow)),
    );

    f.render_widget(popup, popup_area);
}
