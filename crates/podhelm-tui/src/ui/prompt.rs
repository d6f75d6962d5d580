//! Centered modal prompts for confirmation and text input.

use ratatui::Frame;
use ratatui::layout::{Constraint, Flex, Layout, Rect};
use ratatui::style::{Color, Style};
use ratatui::text::Line;
use ratatui::widgets::{Block, Clear, Paragraph};

/// Renders a yes/no confirmation prompt with an optional error detail.
pub fn render_confirm(frame: &mut Frame, title: &str, question: &str, detail: Option<&str>) {
    let mut lines = vec![Line::from(question.to_string())];
    if let Some(detail) = detail {
        lines.push(Line::from(format!("Error message: {detail}")).style(Style::new().fg(Color::Red)));
    }
    lines.push(Line::from("y confirm / n cancel"));
    let height = u16::try_from(lines.len()).unwrap_or(u16::MAX).saturating_add(2);

    let area = centered(frame.area(), 60, height);
    frame.render_widget(Clear, area);
    frame.render_widget(
        Paragraph::new(lines).block(Block::bordered().title(title.to_string())),
        area,
    );
}

/// Renders a single-line text input prompt.
pub fn render_input(frame: &mut Frame, title: &str, value: &str) {
    let area = centered(frame.area(), 60, 3);
    frame.render_widget(Clear, area);
    frame.render_widget(
        Paragraph::new(format!("{value}▏")).block(Block::bordered().title(title.to_string())),
        area,
    );
}

fn centered(area: Rect, width: u16, height: u16) -> Rect {
    let [area] = Layout::horizontal([Constraint::Length(width)])
        .flex(Flex::Center)
        .areas(area);
    let [area] = Layout::vertical([Constraint::Length(height)])
        .flex(Flex::Center)
        .areas(area);
    area
}
