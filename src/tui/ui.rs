//! UI rendering for the TUI.
//!
//! Defines the layout and renders all UI components.

use super::app::{App, StatusKind};
use super::widgets::{header::Header, selector::QuerySelector, table::ResultTable};
use crate::catalog::{Catalog, DatasetKind};
use ratatui::{
    layout::{Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph, Wrap},
    Frame,
};

const OVERVIEW: &str = "This app analyzes the sales data to extract insights like \
top-selling products, regions with high profits, and more. The data is pulled \
from two different databases.";

const KEY_HELP: &str = "Tab switch list | Up/Down select | Enter run | PgUp/PgDn scroll | q quit";

/// Renders the entire UI.
pub fn render(frame: &mut Frame, app: &App) {
    let area = frame.area();

    let main_layout = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(1), // Header
            Constraint::Min(3),    // Selectors + results
            Constraint::Length(1), // Status
        ])
        .split(area);

    let content_layout = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Percentage(35), Constraint::Percentage(65)])
        .split(main_layout[1]);

    render_header(frame, main_layout[0], app);
    render_selectors(frame, content_layout[0], app);
    render_results(frame, content_layout[1], app);
    render_status(frame, main_layout[2], app);
}

/// Renders the header bar.
fn render_header(frame: &mut Frame, area: Rect, app: &App) {
    let widget = Header::new(app.dataset_info.as_deref(), app.is_processing);
    frame.render_widget(widget, area);
}

/// Renders both catalogs stacked vertically.
fn render_selectors(frame: &mut Frame, area: Rect, app: &App) {
    let halves = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Percentage(50), Constraint::Percentage(50)])
        .split(area);

    for (dataset, half) in [DatasetKind::Flat, DatasetKind::Normalized]
        .into_iter()
        .zip(halves.iter())
    {
        let widget = QuerySelector::new(
            Catalog::for_dataset(dataset),
            app.selected_index(dataset),
            app.active == dataset,
        );
        frame.render_widget(widget, *half);
    }
}

/// Renders the current table, or the overview before the first query.
fn render_results(frame: &mut Frame, area: Rect, app: &App) {
    let Some(view) = &app.view else {
        let text = vec![
            Line::from(Span::styled(
                "Retail Orders Analysis",
                Style::default().add_modifier(Modifier::BOLD),
            )),
            Line::from(""),
            Line::from(OVERVIEW),
            Line::from(""),
            Line::from(Span::styled(KEY_HELP, Style::default().fg(Color::DarkGray))),
        ];
        let widget = Paragraph::new(text)
            .block(
                Block::default()
                    .borders(Borders::ALL)
                    .border_style(Style::default().fg(Color::DarkGray))
                    .title(" Overview "),
            )
            .wrap(Wrap { trim: true });
        frame.render_widget(widget, area);
        return;
    };

    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(Style::default().fg(Color::DarkGray))
        .title(format!(" {} ", view.title));
    let inner = block.inner(area);
    frame.render_widget(block, area);
    frame.render_widget(ResultTable::new(view).scroll(app.results_scroll), inner);
}

/// Renders the status line.
fn render_status(frame: &mut Frame, area: Rect, app: &App) {
    let style = match app.status.kind {
        StatusKind::Info => Style::default().fg(Color::Gray),
        StatusKind::Error => Style::default().fg(Color::Red).add_modifier(Modifier::BOLD),
    };
    let widget = Paragraph::new(Line::from(Span::styled(format!(" {}", app.status.text), style)));
    frame.render_widget(widget, area);
}
