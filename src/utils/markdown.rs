use lazy_static::lazy_static;
use ratatui::{
    style::{Color, Modifier, Style},
    text::{Line, Span},
};
use regex::Regex;
use unicode_width::UnicodeWidthStr;

lazy_static! {
    static ref HEADING: Regex = Regex::new(r"^(#{1,3})\s+(.*)$").unwrap();
    static ref BULLET: Regex = Regex::new(r"^[-*]\s+(.*)$").unwrap();
    static ref NUMBERED: Regex = Regex::new(r"^(\d+)\.\s+(.*)$").unwrap();
    static ref INLINE: Regex = Regex::new(r"\*\*(.+?)\*\*|\*(.+?)\*|`([^`]+)`").unwrap();
}

const COLUMN_GAP: &str = "  ";

/// Renders slide markdown into styled lines: `#`-`###` headings, `-`/`*`
/// and numbered lists, `**bold**`, `*italic*`, `` `code` `` and pipe tables
/// laid out in aligned columns.
pub fn render_markdown(content: &str) -> Vec<Line<'static>> {
    let lines: Vec<&str> = content.lines().collect();
    let mut out = Vec::new();
    let mut i = 0;

    while i < lines.len() {
        let line = lines[i];

        if is_table_row(line) && lines.get(i + 1).is_some_and(|next| is_table_separator(next)) {
            let mut rows = vec![parse_table_row(line)];
            i += 2;
            while i < lines.len() && is_table_row(lines[i]) && !is_table_separator(lines[i]) {
                rows.push(parse_table_row(lines[i]));
                i += 1;
            }
            render_table(&rows, &mut out);
            continue;
        }

        out.push(render_line(line.trim()));
        i += 1;
    }

    out
}

fn render_line(trimmed: &str) -> Line<'static> {
    if trimmed.is_empty() {
        return Line::from("");
    }

    if let Some(caps) = HEADING.captures(trimmed) {
        let style = match caps[1].len() {
            1 => Style::default()
                .fg(Color::Yellow)
                .add_modifier(Modifier::BOLD),
            2 => Style::default()
                .fg(Color::Cyan)
                .add_modifier(Modifier::BOLD),
            _ => Style::default().add_modifier(Modifier::BOLD | Modifier::UNDERLINED),
        };
        return Line::from(Span::styled(caps[2].to_string(), style));
    }

    if let Some(caps) = BULLET.captures(trimmed) {
        let mut spans = vec![Span::from("  • ")];
        spans.extend(parse_inline(&caps[1]));
        return Line::from(spans);
    }

    if let Some(caps) = NUMBERED.captures(trimmed) {
        let mut spans = vec![Span::from(format!("  {}. ", &caps[1]))];
        spans.extend(parse_inline(&caps[2]));
        return Line::from(spans);
    }

    Line::from(parse_inline(trimmed))
}

fn parse_inline(text: &str) -> Vec<Span<'static>> {
    let mut spans = Vec::new();
    let mut last = 0;

    for caps in INLINE.captures_iter(text) {
        let Some(whole) = caps.get(0) else {
            continue;
        };
        if whole.start() > last {
            spans.push(Span::from(text[last..whole.start()].to_string()));
        }
        if let Some(bold) = caps.get(1) {
            spans.push(Span::styled(
                bold.as_str().to_string(),
                Style::default().add_modifier(Modifier::BOLD),
            ));
        } else if let Some(italic) = caps.get(2) {
            spans.push(Span::styled(
                italic.as_str().to_string(),
                Style::default().add_modifier(Modifier::ITALIC),
            ));
        } else if let Some(code) = caps.get(3) {
            spans.push(Span::styled(
                code.as_str().to_string(),
                Style::default().fg(Color::Magenta),
            ));
        }
        last = whole.end();
    }

    if last < text.len() || spans.is_empty() {
        spans.push(Span::from(text[last..].to_string()));
    }
    spans
}

fn is_table_row(line: &str) -> bool {
    line.trim().starts_with('|')
}

fn is_table_separator(line: &str) -> bool {
    let trimmed = line.trim();
    trimmed.starts_with('|')
        && trimmed.contains('-')
        && trimmed
            .chars()
            .all(|c| matches!(c, '|' | '-' | ':' | ' '))
}

fn parse_table_row(line: &str) -> Vec<String> {
    line.trim()
        .trim_start_matches('|')
        .trim_end_matches('|')
        .split('|')
        .map(|cell| cell.trim().to_string())
        .collect()
}

fn spans_width(spans: &[Span]) -> usize {
    spans.iter().map(|s| s.content.width()).sum()
}

/// Header row in bold, then every row padded so columns line up on the
/// rendered (markup-free) width of each cell.
fn render_table(rows: &[Vec<String>], out: &mut Vec<Line<'static>>) {
    let cells: Vec<Vec<Vec<Span<'static>>>> = rows
        .iter()
        .map(|row| row.iter().map(|cell| parse_inline(cell)).collect())
        .collect();

    let columns = cells.iter().map(Vec::len).max().unwrap_or(0);
    let mut widths = vec![0; columns];
    for row in &cells {
        for (col, cell) in row.iter().enumerate() {
            widths[col] = widths[col].max(spans_width(cell));
        }
    }

    for (row_idx, row) in cells.into_iter().enumerate() {
        let mut spans = vec![Span::from("  ")];
        let last_col = row.len().saturating_sub(1);
        for (col, cell) in row.into_iter().enumerate() {
            let pad = widths[col] - spans_width(&cell);
            if row_idx == 0 {
                spans.extend(cell.into_iter().map(|s| {
                    let style = s.style.add_modifier(Modifier::BOLD);
                    Span::styled(s.content, style)
                }));
            } else {
                spans.extend(cell);
            }
            if col < last_col {
                spans.push(Span::from(format!("{}{}", " ".repeat(pad), COLUMN_GAP)));
            }
        }
        out.push(Line::from(spans));

        if row_idx == 0 {
            let rule_width = widths.iter().sum::<usize>() + COLUMN_GAP.len() * columns.saturating_sub(1);
            out.push(Line::from(Span::styled(
                format!("  {}", "─".repeat(rule_width)),
                Style::default().fg(Color::DarkGray),
            )));
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn text_of(lines: &[Line]) -> Vec<String> {
        lines.iter().map(|l| l.to_string()).collect()
    }

    #[test]
    fn test_plain_and_empty_lines() {
        let result = render_markdown("Line 1\n\nLine 2");
        assert_eq!(text_of(&result), vec!["Line 1", "", "Line 2"]);
    }

    #[test]
    fn test_heading_levels() {
        let result = render_markdown("# Willkommen!\n## Greetings\n### Small");
        assert_eq!(text_of(&result), vec!["Willkommen!", "Greetings", "Small"]);
        assert_eq!(result[0].spans[0].style.fg, Some(Color::Yellow));
        assert_eq!(result[1].spans[0].style.fg, Some(Color::Cyan));
        assert!(result[2].spans[0]
            .style
            .add_modifier
            .contains(Modifier::UNDERLINED));
    }

    #[test]
    fn test_inline_styles() {
        let result = render_markdown("Ich **bin** *müde* und `ich`");
        let line = &result[0];
        assert_eq!(line.to_string(), "Ich bin müde und ich");
        assert_eq!(line.spans[1].content, "bin");
        assert!(line.spans[1].style.add_modifier.contains(Modifier::BOLD));
        assert!(line.spans[3].style.add_modifier.contains(Modifier::ITALIC));
        assert_eq!(line.spans[5].style.fg, Some(Color::Magenta));
    }

    #[test]
    fn test_lists() {
        let result = render_markdown("- der Vater - father\n* die Mutter\n1. eins\n2. **zwei**");
        assert_eq!(
            text_of(&result),
            vec![
                "  • der Vater - father",
                "  • die Mutter",
                "  1. eins",
                "  2. zwei"
            ]
        );
    }

    #[test]
    fn test_table_columns_align() {
        let input = "| Person | Form |\n|---|---|\n| ich | bin |\n| er / sie / es | **ist** |";
        let result = text_of(&render_markdown(input));
        assert_eq!(result.len(), 4);
        assert_eq!(result[0], "  Person         Form");
        assert!(result[1].trim_start().starts_with('─'));
        assert_eq!(result[2], "  ich            bin");
        assert_eq!(result[3], "  er / sie / es  ist");
    }

    #[test]
    fn test_table_with_umlauts_aligns_on_width() {
        let input = "| a | b |\n|---|---|\n| Brüder | x |\n| Bruder | y |";
        let result = text_of(&render_markdown(input));
        let column = |line: &str, c: char| line.chars().position(|ch| ch == c);
        assert_eq!(column(&result[2], 'x'), column(&result[3], 'y'));
    }

    #[test]
    fn test_table_header_is_bold() {
        let input = "| Wort | English |\n|---|---|\n| Wer? | Who? |";
        let result = render_markdown(input);
        assert!(result[0].spans[1].style.add_modifier.contains(Modifier::BOLD));
        assert!(!result[2].spans[1].style.add_modifier.contains(Modifier::BOLD));
    }

    #[test]
    fn test_table_with_empty_header_cell() {
        let input = "| | mein |\n|---|---|\n| ich | mein |";
        let result = text_of(&render_markdown(input));
        assert_eq!(result[2], "  ich  mein");
    }

    #[test]
    fn test_pipe_in_prose_is_not_a_table() {
        let result = render_markdown("either a | b");
        assert_eq!(text_of(&result), vec!["either a | b"]);
    }
}
