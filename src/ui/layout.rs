use ratatui::layout::{Constraint, Direction, Layout, Rect};

pub struct PresentationLayout {
    pub header_area: Rect,
    pub progress_area: Rect,
    pub body_area: Rect,
    pub hints_area: Option<Rect>, // Right-hand pronunciation panel
    pub footer_area: Rect,
}

pub const HINTS_PANEL_WIDTH: u16 = 32;
const MIN_BODY_WIDTH: u16 = 40;

pub fn calculate_presentation_chunks(area: Rect, show_hints: bool) -> PresentationLayout {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .margin(1)
        .constraints([
            Constraint::Length(3),
            Constraint::Length(1),
            Constraint::Min(5),
            Constraint::Length(4),
        ])
        .split(area);

    let middle = chunks[2];
    let (body_area, hints_area) = if show_hints && middle.width >= MIN_BODY_WIDTH + HINTS_PANEL_WIDTH
    {
        let columns = Layout::default()
            .direction(Direction::Horizontal)
            .constraints([Constraint::Min(MIN_BODY_WIDTH), Constraint::Length(HINTS_PANEL_WIDTH)])
            .split(middle);
        (columns[0], Some(columns[1]))
    } else {
        (middle, None)
    };

    PresentationLayout {
        header_area: chunks[0],
        progress_area: chunks[1],
        body_area,
        hints_area,
        footer_area: chunks[3],
    }
}

/// Centered box of `width` x `height`, clamped to `area`.
pub fn centered_rect(area: Rect, width: u16, height: u16) -> Rect {
    let width = width.min(area.width);
    let height = height.min(area.height);
    Rect::new(
        area.x + (area.width - width) / 2,
        area.y + (area.height - height) / 2,
        width,
        height,
    )
}
