use crate::controller::PresentationController;
use crate::ui::layout::centered_rect;
use crate::utils::truncate_string;
use ratatui::{
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Clear, List, ListItem, ListState},
    Frame,
};

const PICKER_WIDTH: u16 = 48;

/// Slide list popup drawn over the presentation. Slides marked done carry
/// a ✓ and the active slide is shown in cyan.
pub fn draw_slide_picker(f: &mut Frame, controller: &PresentationController) {
    let total = controller.slides().total();
    let height = u16::try_from(total).unwrap_or(u16::MAX).saturating_add(2);
    let area = centered_rect(f.area(), PICKER_WIDTH, height);
    let text_width = usize::from(area.width.saturating_sub(10));

    let items: Vec<ListItem> = (1..=total)
        .map(|number| {
            let title = controller
                .deck()
                .slide(number)
                .map(|slide| slide.title.as_str())
                .unwrap_or("?");
            let style = if controller.is_active(number) {
                Style::default().fg(Color::Cyan)
            } else {
                Style::default()
            };
            let mut spans = vec![Span::styled(
                format!("{:>2}. {}", number, truncate_string(title, text_width)),
                style,
            )];
            if controller.progress().is_marked_done(number) {
                spans.push(Span::styled(" ✓", Style::default().fg(Color::Green)));
            }
            ListItem::new(Line::from(spans))
        })
        .collect();

    let list = List::new(items)
        .block(
            Block::default()
                .borders(Borders::ALL)
                .title("Go to slide")
                .title_bottom(Line::from(" Enter go  Esc close ").centered()),
        )
        .highlight_style(
            Style::default()
                .bg(Color::DarkGray)
                .add_modifier(Modifier::BOLD),
        )
        .highlight_symbol("> ");

    let mut state = ListState::default();
    state.select(Some(controller.picker_cursor()));

    f.render_widget(Clear, area);
    f.render_stateful_widget(list, area, &mut state);
}
