//! Screen layout rendering.
//!
//! Pure layout logic: query box on top, result list and detail view side by
//! side, status bar at the bottom.

use crate::state::{AppState, FetchStatus, FocusPane};
use crate::view::constants::{
    BORDER_LINES, QUERY_INPUT_HEIGHT, RESULTS_WIDTH_PERCENT, STATUS_BAR_HEIGHT,
};
use crate::view::query_box::QueryBox;
use crate::view::styles::PaneStyles;
use ratatui::{
    layout::{Constraint, Direction, Layout, Rect},
    text::Line,
    widgets::{Block, Borders, List, ListItem, Paragraph, Wrap},
    Frame,
};
use unicode_width::{UnicodeWidthChar, UnicodeWidthStr};

const KEY_HINTS: &str = "Tab: focus | ←/→: page | x: copy URL & exit | m: mode | q: quit";

/// Areas of the four screen regions.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ScreenAreas {
    pub query: Rect,
    pub results: Rect,
    pub detail: Rect,
    pub status: Rect,
}

/// Split the frame into its regions.
pub fn calculate_areas(frame_area: Rect) -> ScreenAreas {
    let vertical = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(QUERY_INPUT_HEIGHT),
            Constraint::Min(0),
            Constraint::Length(STATUS_BAR_HEIGHT),
        ])
        .split(frame_area);

    let horizontal = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([
            Constraint::Percentage(RESULTS_WIDTH_PERCENT),
            Constraint::Percentage(100 - RESULTS_WIDTH_PERCENT),
        ])
        .split(vertical[1]);

    ScreenAreas {
        query: vertical[0],
        results: horizontal[0],
        detail: horizontal[1],
        status: vertical[2],
    }
}

/// Rows of the result list visible at once inside its border.
pub fn results_viewport_rows(frame_area: Rect) -> usize {
    let areas = calculate_areas(frame_area);
    usize::from(areas.results.height.saturating_sub(BORDER_LINES)).max(1)
}

/// Render the whole screen.
pub fn render_layout(frame: &mut Frame, state: &AppState) {
    let styles = PaneStyles::new();
    let areas = calculate_areas(frame.area());

    frame.render_widget(
        QueryBox::new(
            &state.query_input,
            state.controller().mode(),
            state.focus == FocusPane::Query,
            &styles,
        ),
        areas.query,
    );
    render_results(frame, areas.results, state, &styles);
    render_detail(frame, areas.detail, state, &styles);
    render_status_bar(frame, areas.status, state, &styles);
}

fn render_results(frame: &mut Frame, area: Rect, state: &AppState, styles: &PaneStyles) {
    let items: Vec<ListItem> = state
        .controller()
        .buffer()
        .labels()
        .into_iter()
        .map(ListItem::new)
        .collect();

    let list = List::new(items)
        .block(
            Block::default()
                .borders(Borders::ALL)
                .title(state.controller().page_label())
                .border_style(styles.border(state.focus == FocusPane::Results)),
        )
        .highlight_style(styles.highlight);

    // Offset is recomputed each frame so the highlight stays visible.
    let mut list_state = state.results().list_state().clone();
    frame.render_stateful_widget(list, area, &mut list_state);
}

fn render_detail(frame: &mut Frame, area: Rect, state: &AppState, styles: &PaneStyles) {
    let detail = state.detail();
    let lines: Vec<Line> = if detail.repository().is_some() {
        detail.lines().into_iter().map(Line::from).collect()
    } else {
        vec![Line::from("No repository selected")]
    };

    let paragraph = Paragraph::new(lines)
        .block(
            Block::default()
                .borders(Borders::ALL)
                .title("Details")
                .border_style(styles.border(state.focus == FocusPane::Detail)),
        )
        .wrap(Wrap { trim: false })
        .scroll((detail.scroll(), 0));
    frame.render_widget(paragraph, area);
}

fn render_status_bar(frame: &mut Frame, area: Rect, state: &AppState, styles: &PaneStyles) {
    let (message, is_error) = status_message(state);
    let text = format!(
        "[{}] {} | {}",
        state.controller().mode().label(),
        message,
        KEY_HINTS
    );
    let style = if is_error {
        styles.status_error
    } else {
        styles.status
    };
    let paragraph = Paragraph::new(Line::from(truncate_to_width(&text, usize::from(area.width))))
        .style(style);
    frame.render_widget(paragraph, area);
}

/// Status bar message and whether it reports a problem.
///
/// A pending notice (e.g. a failed copy) takes precedence over the fetch status.
pub fn status_message(state: &AppState) -> (String, bool) {
    if let Some(notice) = &state.notice {
        return (notice.clone(), true);
    }
    match state.controller().status() {
        FetchStatus::Idle => ("Type a query and press Enter".to_string(), false),
        FetchStatus::Loaded { page, count } => (
            format!("Page {}: {} repositories", page.display_number(), count),
            false,
        ),
        FetchStatus::EndOfResults => ("No more results".to_string(), false),
        FetchStatus::Failed { reason } => (format!("Fetch failed: {reason}"), true),
    }
}

/// Cut `text` to at most `max_width` terminal columns, marking the cut with `…`.
pub fn truncate_to_width(text: &str, max_width: usize) -> String {
    if text.width() <= max_width {
        return text.to_string();
    }
    if max_width == 0 {
        return String::new();
    }

    let mut out = String::new();
    let mut width = 0;
    for ch in text.chars() {
        let ch_width = ch.width().unwrap_or(0);
        if width + ch_width + 1 > max_width {
            break;
        }
        out.push(ch);
        width += ch_width;
    }
    out.push('…');
    out
}
