//! Rendering of the console: listing table, banner, prompts, footer.

mod containers;
mod prompt;

use ratatui::Frame;
use ratatui::layout::{Constraint, Layout};
use ratatui::style::{Color, Style};
use ratatui::text::Line;
use ratatui::widgets::{Block, Paragraph};

use crate::app::{App, InputMode};
use podhelm_core::DeleteFlowState;

/// Renders one frame of the console.
pub fn render(frame: &mut Frame, app: &App) {
    let banner_height = if app.banner.is_some() { 4 } else { 0 };
    let [banner_area, table_area, footer_area] = Layout::vertical([
        Constraint::Length(banner_height),
        Constraint::Min(3),
        Constraint::Length(1),
    ])
    .areas(frame.area());

    if let Some(banner) = &app.banner {
        let mut lines = vec![Line::from(banner.message.clone())];
        if let Some(detail) = &banner.detail {
            lines.push(Line::from(format!("Error message: {detail}")));
        }
        let alert = Paragraph::new(lines)
            .style(Style::new().fg(Color::Red))
            .block(Block::bordered().title("Action failed (Esc to dismiss)"));
        frame.render_widget(alert, banner_area);
    }

    containers::render_table(frame, app, table_area);
    frame.render_widget(Paragraph::new(footer_line(app)), footer_area);

    match app.delete_flow.state() {
        DeleteFlowState::Idle => {}
        DeleteFlowState::ConfirmNormalDelete { container } => {
            prompt::render_confirm(
                frame,
                "Delete container",
                &format!("Delete container {}?", container.names),
                None,
            );
        }
        DeleteFlowState::ConfirmForceDelete { container, reason } => {
            prompt::render_confirm(
                frame,
                "Force delete container",
                &format!("Container {} must be force-removed.", container.names),
                reason.as_deref(),
            );
        }
    }

    if let InputMode::Commit { image_name } = &app.input_mode {
        prompt::render_input(frame, "Commit to image", image_name);
    }
}

fn footer_line(app: &App) -> Line<'static> {
    let text = match app.input_mode {
        InputMode::Filter => format!("filter: {}▏ (Enter apply, Esc clear)", app.text_filter),
        InputMode::Commit { .. } => "commit: type image name, Enter commit, Esc cancel".to_string(),
        InputMode::Normal => {
            let running_flag = if app.only_show_running { "on" } else { "off" };
            format!(
                " q quit │ / filter │ o running-only: {running_flag} │ s start │ t/T stop │ e/E restart │ d delete │ c commit"
            )
        }
    };
    Line::from(text)
}
