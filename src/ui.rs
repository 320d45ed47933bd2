use itertools::Itertools;
use ratatui::{
    buffer::Buffer,
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span, Text},
    widgets::{Paragraph, Widget},
};
use unicode_width::UnicodeWidthStr;

use crate::viewport::Region;
use crate::App;

/// Rows reserved outside the scrolling page body: nav bar and key hints.
pub const CHROME_ROWS: u16 = 2;

const CARD_GAP: usize = 3;
const MIN_CARD_WIDTH: usize = 30;

impl Widget for &App {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let chunks = Layout::default()
            .direction(Direction::Vertical)
            .constraints([
                Constraint::Length(1),
                Constraint::Min(1),
                Constraint::Length(1),
            ])
            .split(area);

        render_nav(self, chunks[0], buf);
        render_page(self, chunks[1], buf);
        render_hints(chunks[2], buf);
    }
}

fn render_nav(app: &App, area: Rect, buf: &mut Buffer) {
    let bold_style = Style::default().add_modifier(Modifier::BOLD);
    let current = app.current_region();

    let mut spans = vec![Span::styled("folio", bold_style)];
    for region in Region::ALL {
        spans.push(Span::raw("   "));
        let style = if region == current {
            Style::default().patch(bold_style).fg(Color::Green)
        } else {
            Style::default().add_modifier(Modifier::DIM)
        };
        spans.push(Span::styled(format!("/{}", region), style));
    }

    Paragraph::new(Line::from(spans))
        .alignment(Alignment::Center)
        .render(area, buf);
}

fn render_hints(area: Rect, buf: &mut Buffer) {
    let hints = [
        "↑/↓ scroll",
        "1-4 jump",
        "←/→ project",
        "o open",
        "r resume",
        "esc quit",
    ]
    .iter()
    .join("   ");

    Paragraph::new(Span::styled(
        hints,
        Style::default().fg(Color::Gray).add_modifier(Modifier::ITALIC),
    ))
    .alignment(Alignment::Center)
    .render(area, buf);
}

/// Assemble the whole page as lines, then window them by the scroll offset.
fn render_page(app: &App, area: Rect, buf: &mut Buffer) {
    let width = area.width as usize;
    let mut lines: Vec<Line> = Vec::with_capacity(app.layout.total_height);

    for bounds in app.layout.sections() {
        // Sections fade in once their visibility flag is set
        let base = if app.tracker.is_visible(bounds.region) {
            Style::default()
        } else {
            Style::default().add_modifier(Modifier::DIM)
        };

        let mut section = match bounds.region {
            Region::Info => info_lines(app, base, bounds.height),
            Region::Services => services_lines(app, base, width),
            Region::Projects => projects_lines(app, base, width),
            Region::Contact => contact_lines(app, base),
        };
        section.truncate(bounds.height);
        while section.len() < bounds.height {
            section.push(Line::default());
        }
        lines.extend(section);
    }

    let start = app.scroll.min(lines.len());
    let end = (start + area.height as usize).min(lines.len());
    let window = lines[start..end].to_vec();

    Paragraph::new(Text::from(window)).render(area, buf);
}

fn info_lines(app: &App, base: Style, height: usize) -> Vec<Line<'static>> {
    let bold = base.add_modifier(Modifier::BOLD);

    let mut intro = vec![Span::styled(app.typewriter.revealed().to_string(), bold)];
    if app.typewriter.is_active() {
        intro.push(Span::styled("█", base.fg(Color::Green)));
    }

    let mut lines = Vec::new();
    lines.extend((0..height.saturating_sub(3) / 2).map(|_| Line::default()));
    lines.push(Line::from(intro).alignment(Alignment::Center));
    lines.push(Line::default());
    lines.push(
        Line::from(Span::styled("[r] resume", base.fg(Color::Green)))
            .alignment(Alignment::Center),
    );
    lines
}

fn services_lines(app: &App, base: Style, width: usize) -> Vec<Line<'static>> {
    let bold = base.add_modifier(Modifier::BOLD);
    let body_width = width.saturating_sub(8).max(20);

    let mut lines = vec![
        Line::default(),
        Line::from(Span::styled("About Me".to_string(), bold)).alignment(Alignment::Center),
        Line::default(),
    ];
    for card in &app.content.services {
        lines.push(Line::from(Span::styled(card.title.clone(), bold)).alignment(Alignment::Center));
        for row in wrap(&card.description, body_width) {
            lines.push(Line::from(Span::styled(row, base)).alignment(Alignment::Center));
        }
        lines.push(Line::default());
    }
    lines
}

/// Horizontal card gallery. The window of cards slides so the selected one
/// is always on screen.
fn projects_lines(app: &App, base: Style, width: usize) -> Vec<Line<'static>> {
    let projects = &app.content.projects;
    if projects.is_empty() {
        return Vec::new();
    }

    let per_screen = (width / (MIN_CARD_WIDTH + CARD_GAP)).max(1).min(projects.len());
    let first = app
        .selected_project
        .min(projects.len() - 1)
        .saturating_sub(per_screen - 1)
        .min(projects.len() - per_screen);
    let visible = &projects[first..first + per_screen];

    let card_width = width
        .saturating_sub(CARD_GAP * (per_screen - 1))
        .max(per_screen)
        / per_screen;
    let text_width = card_width.saturating_sub(2).max(10);

    let blocks: Vec<Vec<String>> = visible
        .iter()
        .map(|p| {
            let mut block = vec![p.title.clone()];
            block.extend(wrap(&p.description, text_width));
            block.push("view project ↵".to_string());
            block
        })
        .collect();
    let rows = blocks.iter().map(Vec::len).max().unwrap_or(0);

    let mut lines = vec![Line::default(), Line::default()];
    for row in 0..rows {
        let mut spans = Vec::new();
        for (i, block) in blocks.iter().enumerate() {
            if i > 0 {
                spans.push(Span::raw(" ".repeat(CARD_GAP)));
            }
            let selected = first + i == app.selected_project;
            let cell = block.get(row).cloned().unwrap_or_default();
            let style = match (row, selected) {
                (0, true) => base.fg(Color::Green).add_modifier(Modifier::BOLD),
                (0, false) => base.add_modifier(Modifier::BOLD),
                (r, true) if r == block.len() - 1 => base.fg(Color::Green),
                _ => base,
            };
            spans.push(Span::styled(pad_to_width(cell, card_width), style));
        }
        lines.push(Line::from(spans).alignment(Alignment::Center));
    }
    lines
}

fn contact_lines(app: &App, base: Style) -> Vec<Line<'static>> {
    let bold = base.add_modifier(Modifier::BOLD);

    let mut lines = vec![
        Line::default(),
        Line::from(Span::styled("Get in Touch".to_string(), bold)).alignment(Alignment::Center),
        Line::default(),
    ];
    for entry in &app.content.contact_lines {
        lines.push(Line::from(Span::styled(entry.clone(), base)).alignment(Alignment::Center));
    }
    lines
}

/// Greedy word wrap to a maximum display width.
pub fn wrap(text: &str, max_width: usize) -> Vec<String> {
    let max_width = max_width.max(1);
    let mut rows = Vec::new();
    let mut current = String::new();
    for word in text.split_whitespace() {
        if current.is_empty() {
            current = word.to_string();
        } else if current.width() + 1 + word.width() <= max_width {
            current.push(' ');
            current.push_str(word);
        } else {
            rows.push(std::mem::take(&mut current));
            current = word.to_string();
        }
    }
    if !current.is_empty() {
        rows.push(current);
    }
    rows
}

fn pad_to_width(mut s: String, width: usize) -> String {
    let current = s.width();
    if current < width {
        s.push_str(&" ".repeat(width - current));
    }
    s
}
