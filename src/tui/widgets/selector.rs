//! Query selector pane.
//!
//! Lists one catalog inside a bordered block, highlighting the selected entry.
//! The focused catalog gets a cyan border.

use super::table::ResultTable;
use crate::catalog::Catalog;
use ratatui::{
    buffer::Buffer,
    layout::Rect,
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph, Widget},
};

/// Widget listing the entries of a catalog.
pub struct QuerySelector<'a> {
    catalog: &'a Catalog,
    selected: usize,
    focused: bool,
}

impl<'a> QuerySelector<'a> {
    /// Creates a selector for `catalog` with `selected` highlighted.
    pub fn new(catalog: &'a Catalog, selected: usize, focused: bool) -> Self {
        Self {
            catalog,
            selected,
            focused,
        }
    }

    fn lines(&self, width: usize) -> Vec<Line<'static>> {
        let title_width = width.saturating_sub(2);
        self.catalog
            .entries
            .iter()
            .enumerate()
            .map(|(i, entry)| {
                let marker = if i == self.selected { "> " } else { "  " };
                let style = match (i == self.selected, self.focused) {
                    (true, true) => Style::default()
                        .bg(Color::Blue)
                        .fg(Color::White)
                        .add_modifier(Modifier::BOLD),
                    (true, false) => Style::default().add_modifier(Modifier::BOLD),
                    (false, _) => Style::default(),
                };
                Line::from(vec![
                    Span::styled(marker, style),
                    Span::styled(ResultTable::truncate(entry.title, title_width), style),
                ])
            })
            .collect()
    }
}

impl Widget for QuerySelector<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let border_style = if self.focused {
            Style::default().fg(Color::Cyan)
        } else {
            Style::default().fg(Color::DarkGray)
        };

        let block = Block::default()
            .borders(Borders::ALL)
            .border_style(border_style)
            .title(format!(" {} ", self.catalog.heading));

        // Keep the selection visible when the pane is shorter than the list
        let visible = area.height.saturating_sub(2) as usize;
        let offset = if visible > 0 && self.selected >= visible {
            self.selected + 1 - visible
        } else {
            0
        };

        let inner_width = area.width.saturating_sub(2) as usize;
        Paragraph::new(self.lines(inner_width))
            .block(block)
            .scroll((offset as u16, 0))
            .render(area, buf);
    }
}
