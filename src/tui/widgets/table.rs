//! Result table widget for the TUI.
//!
//! Renders a [`TableView`] with its catalog labels as headers, auto-sized
//! columns, right-aligned numbers and styled NULL values.

use crate::catalog::TableView;
use crate::db::Value;
use ratatui::{
    buffer::Buffer,
    layout::Rect,
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::Widget,
};

/// Maximum width for any column.
const MAX_COLUMN_WIDTH: usize = 40;

/// Minimum width for any column.
const MIN_COLUMN_WIDTH: usize = 4;

/// Widget for rendering a table view.
pub struct ResultTable<'a> {
    view: &'a TableView,
    scroll: usize,
}

impl<'a> ResultTable<'a> {
    /// Creates a new result table widget.
    pub fn new(view: &'a TableView) -> Self {
        Self { view, scroll: 0 }
    }

    /// Skips the first `scroll` data rows.
    pub fn scroll(mut self, scroll: usize) -> Self {
        self.scroll = scroll;
        self
    }

    /// Calculates the width of each column from its label and values.
    fn calculate_column_widths(&self) -> Vec<usize> {
        let mut widths: Vec<usize> = self
            .view
            .columns
            .iter()
            .map(|label| label.chars().count().max(MIN_COLUMN_WIDTH))
            .collect();

        for row in &self.view.rows {
            for (width, value) in widths.iter_mut().zip(row) {
                *width = (*width).max(value.to_display_string().chars().count());
            }
        }

        widths.iter().map(|&w| w.min(MAX_COLUMN_WIDTH)).collect()
    }

    /// Shrinks widths proportionally when the table is wider than `available`.
    fn fit_widths(widths: &[usize], available: usize) -> Vec<usize> {
        // Each column carries two spaces of padding and one border
        let total: usize = widths.iter().sum::<usize>() + widths.len() * 3 + 1;
        if total <= available || available == 0 {
            return widths.to_vec();
        }
        let scale = available as f64 / total as f64;
        widths
            .iter()
            .map(|&w| ((w as f64 * scale) as usize).max(MIN_COLUMN_WIDTH))
            .collect()
    }

    /// Truncates a string to fit within the given width, adding an ellipsis if needed.
    pub(crate) fn truncate(s: &str, max_width: usize) -> String {
        if s.chars().count() <= max_width {
            s.to_string()
        } else if max_width <= 3 {
            s.chars().take(max_width).collect()
        } else {
            let head: String = s.chars().take(max_width - 3).collect();
            format!("{head}...")
        }
    }

    /// Renders the table to lines for embedding in other widgets.
    pub fn render_to_lines(&self, available_width: usize) -> Vec<Line<'static>> {
        let widths = Self::fit_widths(&self.calculate_column_widths(), available_width);
        let mut lines = Vec::with_capacity(self.view.rows.len() + 5);

        lines.push(Self::render_border(&widths, '┌', '┬', '┐'));
        lines.push(self.render_header_row(&widths));
        lines.push(Self::render_border(&widths, '├', '┼', '┤'));

        if self.view.rows.is_empty() {
            lines.push(Line::from(Span::styled(
                "│ (no rows)",
                Style::default().fg(Color::DarkGray),
            )));
        }

        for row in self.view.rows.iter().skip(self.scroll) {
            lines.push(Self::render_data_row(row, &widths));
        }

        lines.push(Self::render_border(&widths, '└', '┴', '┘'));
        lines
    }

    fn render_border(widths: &[usize], left: char, mid: char, right: char) -> Line<'static> {
        let segments: Vec<String> = widths.iter().map(|&w| "─".repeat(w + 2)).collect();
        let border = format!("{left}{}{right}", segments.join(&mid.to_string()));
        Line::from(Span::styled(border, Style::default().fg(Color::DarkGray)))
    }

    fn render_header_row(&self, widths: &[usize]) -> Line<'static> {
        let mut spans = vec![Span::styled("│", Style::default().fg(Color::DarkGray))];

        for (label, &width) in self.view.columns.iter().zip(widths) {
            let name = Self::truncate(label, width);
            spans.push(Span::styled(
                format!(" {name:width$} "),
                Style::default()
                    .fg(Color::Cyan)
                    .add_modifier(Modifier::BOLD),
            ));
            spans.push(Span::styled("│", Style::default().fg(Color::DarkGray)));
        }

        Line::from(spans)
    }

    fn render_data_row(row: &[Value], widths: &[usize]) -> Line<'static> {
        let mut spans = vec![Span::styled("│", Style::default().fg(Color::DarkGray))];

        for (value, &width) in row.iter().zip(widths) {
            let display = Self::truncate(&value.to_display_string(), width);
            let (padded, style) = if value.is_null() {
                (
                    format!(" {display:width$} "),
                    Style::default()
                        .fg(Color::DarkGray)
                        .add_modifier(Modifier::ITALIC),
                )
            } else if value.as_f64().is_some() {
                (format!(" {display:>width$} "), Style::default())
            } else {
                (format!(" {display:width$} "), Style::default())
            };
            spans.push(Span::styled(padded, style));
            spans.push(Span::styled("│", Style::default().fg(Color::DarkGray)));
        }

        Line::from(spans)
    }
}

impl Widget for ResultTable<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let lines = self.render_to_lines(area.width as usize);

        for (i, line) in lines.iter().take(area.height as usize).enumerate() {
            buf.set_line(area.x, area.y + i as u16, line, area.width);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::Catalog;
    use crate::db::QueryResult;

    fn sample_view() -> TableView {
        let entry = Catalog::normalized().get("top_city_discounts").unwrap();
        let result = QueryResult::with_data(
            vec![],
            vec![
                vec![Value::from("Los Angeles"), Value::from("FUR-CH-10000454"), Value::Float(5.0)],
                vec![Value::from("Austin"), Value::Null, Value::Float(4.5)],
            ],
        );
        TableView::from_result(entry, result).unwrap()
    }

    fn line_text(line: &Line) -> String {
        line.spans.iter().map(|s| s.content.as_ref()).collect()
    }

    #[test]
    fn test_calculate_column_widths() {
        let view = sample_view();
        let widths = ResultTable::new(&view).calculate_column_widths();

        // "City" (4) vs "Los Angeles" (11); "Product ID" (10) vs 15; label "Highest Discount Percent" (24)
        assert_eq!(widths, vec![11, 15, 24]);
    }

    #[test]
    fn test_truncate() {
        assert_eq!(ResultTable::truncate("hello", 10), "hello");
        assert_eq!(ResultTable::truncate("hello world", 8), "hello...");
        assert_eq!(ResultTable::truncate("hello", 3), "hel");
    }

    #[test]
    fn test_render_to_lines() {
        let view = sample_view();
        let lines = ResultTable::new(&view).render_to_lines(120);

        // top border, header, separator, 2 rows, bottom border
        assert_eq!(lines.len(), 6);
        assert!(line_text(&lines[1]).contains("Highest Discount Percent"));
        assert!(line_text(&lines[3]).contains("Los Angeles"));
        assert!(line_text(&lines[4]).contains("NULL"));
    }

    #[test]
    fn test_numbers_right_aligned() {
        let view = sample_view();
        let lines = ResultTable::new(&view).render_to_lines(120);
        assert!(line_text(&lines[3]).ends_with("                        5 │"));
    }

    #[test]
    fn test_scroll_skips_rows() {
        let view = sample_view();
        let lines = ResultTable::new(&view).scroll(1).render_to_lines(120);
        assert_eq!(lines.len(), 5);
        assert!(line_text(&lines[3]).contains("Austin"));
    }

    #[test]
    fn test_empty_view() {
        let entry = Catalog::flat().get("category_profit").unwrap();
        let view = TableView::from_result(entry, QueryResult::new()).unwrap();
        let lines = ResultTable::new(&view).render_to_lines(80);

        assert_eq!(lines.len(), 5);
        assert!(line_text(&lines[3]).contains("(no rows)"));
    }
}
