//! Query input widget.

use crate::model::SearchMode;
use crate::state::QueryInput;
use crate::view::styles::PaneStyles;
use ratatui::{
    buffer::Buffer,
    layout::Rect,
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph, Widget},
};

/// Bordered one-line query field. Shows a block cursor when focused.
pub struct QueryBox<'a> {
    input: &'a QueryInput,
    mode: SearchMode,
    focused: bool,
    styles: &'a PaneStyles,
}

impl<'a> QueryBox<'a> {
    pub fn new(input: &'a QueryInput, mode: SearchMode, focused: bool, styles: &'a PaneStyles) -> Self {
        Self {
            input,
            mode,
            focused,
            styles,
        }
    }

    fn title(&self) -> &'static str {
        match self.mode {
            SearchMode::Public => "Search repositories",
            SearchMode::Owned => "Your repositories (query ignored)",
        }
    }
}

impl Widget for QueryBox<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let text = self.input.text();
        let line = if self.focused {
            let cursor = self.input.cursor();
            let before: String = text.chars().take(cursor).collect();
            let mut rest = text.chars().skip(cursor);
            let under_cursor = rest.next().map(String::from).unwrap_or_else(|| " ".to_string());
            let after: String = rest.collect();
            Line::from(vec![
                Span::raw(before),
                Span::styled(under_cursor, self.styles.cursor),
                Span::raw(after),
            ])
        } else {
            Line::from(text)
        };

        Paragraph::new(line)
            .block(
                Block::default()
                    .borders(Borders::ALL)
                    .title(self.title())
                    .border_style(self.styles.border(self.focused)),
            )
            .render(area, buf);
    }
}
