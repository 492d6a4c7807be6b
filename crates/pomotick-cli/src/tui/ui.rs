//! Rendering for the terminal UI.
//!
//! ```text
//! +--------------------------------------+
//! |  Study                               |  <- mode (accent while on break)
//! |            ███ ███   ███ ███         |
//! |            big MM:SS countdown       |
//! |  Pomodoros: 3   Study minutes: 75    |
//! +--------------------------------------+
//!  space start/stop  r reset  ...           <- help line, hidden fullscreen
//! ```

use pomotick_core::{StatsStore, View, RESET_STATS_PROMPT};
use ratatui::{
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Clear, Paragraph},
    Frame,
};

use super::app::App;

const DIGIT_ROWS: usize = 5;

/// 3x5 block glyphs for `0-9` and `:`.
fn glyph(c: char) -> [&'static str; DIGIT_ROWS] {
    match c {
        '0' => ["███", "█ █", "█ █", "█ █", "███"],
        '1' => ["  █", "  █", "  █", "  █", "  █"],
        '2' => ["███", "  █", "███", "█  ", "███"],
        '3' => ["███", "  █", "███", "  █", "███"],
        '4' => ["█ █", "█ █", "███", "  █", "  █"],
        '5' => ["███", "█  ", "███", "  █", "███"],
        '6' => ["███", "█  ", "███", "█ █", "███"],
        '7' => ["███", "  █", "  █", "  █", "  █"],
        '8' => ["███", "█ █", "███", "█ █", "███"],
        '9' => ["███", "█ █", "███", "  █", "███"],
        ':' => [" ", "█", " ", "█", " "],
        _ => [" ", " ", " ", " ", " "],
    }
}

/// Render `text` as five rows of block glyphs.
pub fn big_text(text: &str) -> Vec<String> {
    (0..DIGIT_ROWS)
        .map(|row| {
            text.chars()
                .map(|c| glyph(c)[row])
                .collect::<Vec<_>>()
                .join(" ")
        })
        .collect()
}

struct Theme {
    accent: Style,
    dim: Style,
    key: Style,
}

impl Theme {
    fn new(monochrome: bool, on_break: bool) -> Self {
        if monochrome {
            return Self {
                accent: Style::default().add_modifier(Modifier::BOLD),
                dim: Style::default(),
                key: Style::default().add_modifier(Modifier::BOLD),
            };
        }
        let accent = if on_break { Color::Green } else { Color::Red };
        Self {
            accent: Style::default().fg(accent).add_modifier(Modifier::BOLD),
            dim: Style::default().fg(Color::DarkGray),
            key: Style::default().fg(Color::Cyan).add_modifier(Modifier::BOLD),
        }
    }
}

pub fn render<S: StatsStore>(frame: &mut Frame, app: &App<S>) {
    let screen = app.screen();
    let theme = Theme::new(app.monochrome, screen.on_break);

    let (body, footer) = if app.fullscreen {
        (frame.area(), None)
    } else {
        let chunks = Layout::default()
            .direction(Direction::Vertical)
            .constraints([Constraint::Min(9), Constraint::Length(1)])
            .split(frame.area());
        (chunks[0], Some(chunks[1]))
    };

    let mut block = Block::default();
    if !app.fullscreen {
        let title = match screen.view {
            View::Timer => " Pomodoro ",
            View::Clock => " Clock ",
        };
        block = block
            .borders(Borders::ALL)
            .border_style(theme.accent)
            .title(title);
    }

    let lines = match screen.view {
        View::Timer => timer_lines(app, &theme),
        View::Clock => clock_lines(&theme),
    };
    let top_pad = body.height.saturating_sub(lines.len() as u16 + 2) / 2;
    let mut padded = vec![Line::raw(""); top_pad as usize];
    padded.extend(lines);

    frame.render_widget(
        Paragraph::new(padded)
            .alignment(Alignment::Center)
            .block(block),
        body,
    );

    if let Some(area) = footer {
        frame.render_widget(Paragraph::new(help_line(app, &theme)), area);
    }

    if app.confirming {
        render_confirm(frame, &theme);
    }
}

fn timer_lines<S: StatsStore>(app: &App<S>, theme: &Theme) -> Vec<Line<'static>> {
    let screen = app.screen();
    let mut lines = vec![
        Line::from(Span::styled(screen.mode.label(), theme.accent)),
        Line::raw(""),
    ];
    lines.extend(
        big_text(&screen.time)
            .into_iter()
            .map(|row| Line::from(Span::styled(row, theme.accent))),
    );
    lines.push(Line::raw(""));

    if !app.fullscreen {
        lines.push(Line::from(vec![
            Span::styled("Pomodoros: ", theme.dim),
            Span::raw(screen.completed_sessions.to_string()),
            Span::styled("   Study minutes: ", theme.dim),
            Span::raw(screen.whole_minutes.to_string()),
        ]));
    }
    if let Some(status) = &app.status {
        lines.push(Line::from(Span::styled(status.clone(), theme.dim)));
    }
    lines
}

fn clock_lines(theme: &Theme) -> Vec<Line<'static>> {
    let now = chrono::Local::now();
    let mut lines: Vec<Line<'static>> = big_text(&now.format("%H:%M:%S").to_string())
        .into_iter()
        .map(|row| Line::from(Span::styled(row, theme.accent)))
        .collect();
    lines.push(Line::raw(""));
    lines.push(Line::from(Span::styled(
        now.format("%A, %B %-d").to_string(),
        theme.dim,
    )));
    lines
}

fn help_line<S: StatsStore>(app: &App<S>, theme: &Theme) -> Line<'static> {
    let screen = app.screen();
    let mut spans = vec![
        Span::styled(" space", theme.key),
        Span::raw(format!(" {}  ", screen.control_label().to_lowercase())),
        Span::styled("r", theme.key),
        Span::raw(" reset  "),
        Span::styled("R", theme.key),
        Span::raw(" reset stats  "),
    ];
    match screen.view {
        View::Timer => {
            spans.push(Span::styled("c", theme.key));
            spans.push(Span::raw(" clock  "));
        }
        View::Clock => {
            spans.push(Span::styled("b", theme.key));
            spans.push(Span::raw(" back  "));
        }
    }
    spans.extend([
        Span::styled("f", theme.key),
        Span::raw(" fullscreen  "),
        Span::styled("m", theme.key),
        Span::raw(" mono  "),
        Span::styled("q", theme.key),
        Span::raw(" quit"),
    ]);
    Line::from(spans)
}

fn render_confirm(frame: &mut Frame, theme: &Theme) {
    let width = (RESET_STATS_PROMPT.len() as u16 + 6).min(frame.area().width);
    let area = centered(frame.area(), width, 5);
    let text = vec![
        Line::raw(RESET_STATS_PROMPT),
        Line::raw(""),
        Line::from(vec![
            Span::styled("y", theme.key),
            Span::raw(" yes   "),
            Span::styled("n", theme.key),
            Span::raw(" no"),
        ]),
    ];
    frame.render_widget(Clear, area);
    frame.render_widget(
        Paragraph::new(text)
            .alignment(Alignment::Center)
            .block(Block::default().borders(Borders::ALL).border_style(theme.accent)),
        area,
    );
}

fn centered(area: Rect, width: u16, height: u16) -> Rect {
    let width = width.min(area.width);
    let height = height.min(area.height);
    Rect {
        x: area.x + (area.width - width) / 2,
        y: area.y + (area.height - height) / 2,
        width,
        height,
    }
}
