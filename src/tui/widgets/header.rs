//! Header widget for the TUI.
//!
//! Displays the application name, version, and the dataset files in use.

use ratatui::{
    buffer::Buffer,
    layout::Rect,
    style::{Color, Modifier, Style},
    text::Span,
    widgets::Widget,
};

/// Header bar widget.
pub struct Header<'a> {
    dataset_info: Option<&'a str>,
    is_processing: bool,
}

impl<'a> Header<'a> {
    /// Creates a new header widget.
    pub fn new(dataset_info: Option<&'a str>, is_processing: bool) -> Self {
        Self {
            dataset_info,
            is_processing,
        }
    }
}

impl Widget for Header<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let style = Style::default()
            .bg(Color::Blue)
            .fg(Color::White)
            .add_modifier(Modifier::BOLD);

        for x in area.left()..area.right() {
            buf[(x, area.y)].set_style(style);
        }

        let left_text = format!(" Retail Insights v{}", env!("CARGO_PKG_VERSION"));
        let left_width = left_text.chars().count() as u16;
        buf.set_span(area.x, area.y, &Span::styled(left_text, style), area.width);

        if self.is_processing {
            let busy_style = style.fg(Color::Yellow);
            let busy = "[running]";
            let busy_x = area.x + area.width.saturating_sub(busy.len() as u16) / 2;
            if busy_x > area.x + left_width {
                buf.set_string(busy_x, area.y, busy, busy_style);
            }
        }

        if let Some(info) = self.dataset_info {
            let right_text = format!(" [{info}] ");
            let right_width = right_text.chars().count() as u16;
            if right_width + left_width < area.width {
                let right_x = area.right().saturating_sub(right_width);
                buf.set_string(right_x, area.y, &right_text, style);
            }
        }
    }
}
