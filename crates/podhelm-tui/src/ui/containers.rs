//! The container listing table.

use ratatui::Frame;
use ratatui::layout::{Constraint, Rect};
use ratatui::style::{Color, Modifier, Style};
use ratatui::widgets::{Block, Paragraph, Row, Table, TableState};

use crate::app::App;
use crate::format::{format_cpu_percent, format_memory_and_limit, quote_cmdline};
use podhelm_core::ListingRow;

const COLUMN_TITLES: [&str; 6] = ["Name", "Image", "Command", "CPU", "Memory", "State"];

/// Renders the listing table, or the empty caption when nothing matches.
pub fn render_table(frame: &mut Frame, app: &App, area: Rect) {
    let visible = app.visible_rows();
    let block = Block::bordered().title("Containers");

    if visible.is_empty() {
        let caption = Paragraph::new(app.empty_caption())
            .style(Style::new().fg(Color::DarkGray))
            .block(block);
        frame.render_widget(caption, area);
        return;
    }

    let rows: Vec<Row<'_>> = visible.iter().map(to_row).collect();
    let table = Table::new(
        rows,
        [
            Constraint::Fill(1),
            Constraint::Fill(2),
            Constraint::Fill(2),
            Constraint::Length(8),
            Constraint::Length(22),
            Constraint::Length(10),
        ],
    )
    .header(Row::new(COLUMN_TITLES).style(Style::new().add_modifier(Modifier::BOLD)))
    .row_highlight_style(Style::new().bg(Color::Blue).fg(Color::White))
    .block(block);

    let mut state = TableState::default().with_selected(Some(app.selected_index));
    frame.render_stateful_widget(table, area, &mut state);
}

/// One table row: CPU only for running containers, memory whenever stats
/// exist, blanks otherwise.
fn to_row<'a>(row: &ListingRow<'a>) -> Row<'a> {
    let container = row.container;
    let cpu = match row.stats {
        Some(stats) if container.is_running() => format_cpu_percent(stats.cpu),
        _ => String::new(),
    };
    let memory = row
        .stats
        .map(|stats| format_memory_and_limit(stats.mem_usage, stats.mem_limit))
        .unwrap_or_default();
    Row::new(vec![
        container.names.clone(),
        container.image.clone(),
        quote_cmdline(&container.command),
        cpu,
        memory,
        container.status.clone(),
    ])
}
