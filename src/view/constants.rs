//! Layout dimension constants for TUI rendering.

/// Height of the query input box in lines (border + one line of text).
pub const QUERY_INPUT_HEIGHT: u16 = 3;

/// Height of the status bar in lines.
pub const STATUS_BAR_HEIGHT: u16 = 1;

/// Width percentage of the result list; the detail view takes the rest.
pub const RESULTS_WIDTH_PERCENT: u16 = 50;

/// Lines taken by a bordered block's top and bottom borders.
pub const BORDER_LINES: u16 = 2;
