pub mod markdown;

use ratatui::text::Line;
use unicode_width::{UnicodeWidthChar, UnicodeWidthStr};

/// Cuts `s` to at most `max_width` terminal columns, ending in "..." when
/// anything was dropped.
pub fn truncate_string(s: &str, max_width: usize) -> String {
    if s.width() <= max_width {
        return s.to_string();
    }

    let budget = max_width.saturating_sub(3);
    let mut out = String::new();
    let mut used = 0;
    for ch in s.chars() {
        let w = ch.width().unwrap_or(0);
        if used + w > budget {
            break;
        }
        out.push(ch);
        used += w;
    }
    out.push_str("...");
    out
}

/// Rows a line takes once wrapped at `width` columns. Word wrapping can
/// only add rows, so this is a lower bound used for scroll targets.
pub fn estimate_rows(line: &Line, width: u16) -> u16 {
    let width = usize::from(width.max(1));
    let line_width = line.width();
    let rows = line_width.div_ceil(width).max(1);
    u16::try_from(rows).unwrap_or(u16::MAX)
}

/// Visual row at which `lines[index]` starts.
pub fn row_offset(lines: &[Line], index: usize, width: u16) -> u16 {
    lines
        .iter()
        .take(index)
        .fold(0u16, |acc, line| acc.saturating_add(estimate_rows(line, width)))
}
