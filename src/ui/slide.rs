use crate::bindings::{Element, ElementId};
use crate::controller::PresentationController;
use crate::feedback::Feedback;
use crate::final_quiz::{QuestionHighlight, ScoreTier};
use crate::models::{ChoiceOption, Exercise, FinalQuiz, QuizQuestion, Slide};
use crate::pronunciation::slide_hints;
use crate::ui::layout::calculate_presentation_chunks;
use crate::utils::markdown::render_markdown;
use crate::utils::{row_offset, truncate_string};
use crate::view_state::{Mark, TextField};
use ratatui::{
    layout::Alignment,
    style::{Color, Modifier, Style},
    text::{Line, Span, Text},
    widgets::{Block, Borders, Gauge, Paragraph, Wrap},
    Frame,
};

const BLANK_MARKER: &str = "___";
const EMPTY_FIELD: &str = "_____";

fn key_style() -> Style {
    Style::default()
        .fg(Color::Cyan)
        .add_modifier(Modifier::BOLD)
}

fn mark_style(mark: Mark) -> Style {
    match mark {
        Mark::Correct => Style::default()
            .fg(Color::Green)
            .add_modifier(Modifier::BOLD),
        Mark::Incorrect => Style::default().fg(Color::Red).add_modifier(Modifier::BOLD),
        Mark::Selected => Style::default().fg(Color::Yellow),
        Mark::None => Style::default(),
    }
}

fn focus_prefix(focused: bool) -> Span<'static> {
    if focused {
        Span::styled("▶ ", Style::default().fg(Color::Yellow))
    } else {
        Span::from("  ")
    }
}

/// Renders the active slide. Takes the controller mutably to settle the
/// scroll offset once the content height is known.
pub fn draw_presentation(f: &mut Frame, controller: &mut PresentationController) {
    let current = controller.slides().current();
    let total = controller.slides().total();

    let hints = controller
        .deck()
        .slide(current)
        .map(|slide| slide_hints(&controller.deck().pronunciations, &slide.vocabulary))
        .unwrap_or_default();
    let show_hints = controller.show_pronunciation() && !hints.is_empty();
    let layout = calculate_presentation_chunks(f.area(), show_hints);

    // Header
    let mut header_spans = vec![Span::from(format!(
        "{} | Slide {} of {}",
        controller.deck().title,
        current,
        total
    ))];
    if controller.progress().is_marked_done(current) {
        header_spans.push(Span::styled(
            "  ✓",
            Style::default()
                .fg(Color::Green)
                .add_modifier(Modifier::BOLD),
        ));
    }
    let header = Paragraph::new(Line::from(header_spans))
        .style(
            Style::default()
                .fg(Color::Cyan)
                .add_modifier(Modifier::BOLD),
        )
        .alignment(Alignment::Center)
        .block(Block::default().borders(Borders::ALL));
    f.render_widget(header, layout.header_area);

    let gauge = Gauge::default()
        .gauge_style(Style::default().fg(Color::Cyan).bg(Color::DarkGray))
        .ratio(controller.slides().completion_ratio().clamp(0.0, 1.0))
        .label(format!("{}/{}", current, total));
    f.render_widget(gauge, layout.progress_area);

    // Body
    let (title, lines, results_line) = match controller.deck().slide(current) {
        Some(slide) => {
            let (lines, results_line) = slide_lines(controller, current, slide);
            (slide.title.clone(), lines, results_line)
        }
        None => (
            String::new(),
            vec![Line::from(Span::styled(
                "This slide is not available.",
                Style::default()
                    .fg(Color::DarkGray)
                    .add_modifier(Modifier::ITALIC),
            ))],
            None,
        ),
    };

    let inner_width = layout.body_area.width.saturating_sub(2);
    let visible_height = layout.body_area.height.saturating_sub(2);
    if controller.take_scroll_to_results()
        && let Some(index) = results_line
    {
        controller.set_scroll(row_offset(&lines, index, inner_width));
    }
    let content_height = row_offset(&lines, lines.len(), inner_width);
    let max_scroll = content_height.saturating_sub(visible_height);
    let scroll = controller.scroll().min(max_scroll);
    controller.set_scroll(scroll);

    let title = truncate_string(&title, usize::from(inner_width));
    let body = Paragraph::new(Text::from(lines))
        .wrap(Wrap { trim: false })
        .scroll((scroll, 0))
        .block(Block::default().borders(Borders::ALL).title(title));
    f.render_widget(body, layout.body_area);

    if let Some(area) = layout.hints_area {
        let hint_lines: Vec<Line> = hints
            .iter()
            .map(|(word, ipa)| {
                Line::from(vec![
                    Span::styled(word.clone(), Style::default().add_modifier(Modifier::BOLD)),
                    Span::from(" "),
                    Span::styled(ipa.clone(), Style::default().fg(Color::Magenta)),
                ])
            })
            .collect();
        let panel = Paragraph::new(hint_lines)
            .wrap(Wrap { trim: true })
            .block(Block::default().borders(Borders::ALL).title("Aussprache"));
        f.render_widget(panel, area);
    }

    draw_footer(f, controller, layout.footer_area);
}

fn draw_footer(f: &mut Frame, controller: &PresentationController, area: ratatui::layout::Rect) {
    let enabled = key_style();
    let disabled = Style::default().fg(Color::DarkGray);
    let slides = controller.slides();

    let status = Line::from(vec![
        Span::styled(
            "◀ Prev",
            if slides.has_previous() { enabled } else { disabled },
        ),
        Span::from("   "),
        Span::from(controller.progress().summary()),
        Span::from("   "),
        Span::styled(
            "Next ▶",
            if slides.has_next() { enabled } else { disabled },
        ),
    ]);

    let help = if controller.text_input_focused() {
        Line::from(vec![
            Span::styled("Tab", key_style()),
            Span::from(" Next field  "),
            Span::styled("Enter", key_style()),
            Span::from(" Confirm  "),
            Span::styled("Esc", key_style()),
            Span::from(" Leave field  "),
            Span::styled("Ctrl+C", key_style()),
            Span::from(" Exit App"),
        ])
    } else {
        Line::from(vec![
            Span::styled("←/→", key_style()),
            Span::from(" Slides  "),
            Span::styled("1-9/g", key_style()),
            Span::from(" Jump  "),
            Span::styled("Tab", key_style()),
            Span::from(" Focus  "),
            Span::styled("Enter", key_style()),
            Span::from(" Select  "),
            Span::styled("h", key_style()),
            Span::from(" Pronunciation  "),
            Span::styled("q", key_style()),
            Span::from(" Quit"),
        ])
    };

    let footer = Paragraph::new(vec![status, help])
        .alignment(Alignment::Center)
        .block(Block::default().borders(Borders::ALL));
    f.render_widget(footer, area);
}

/// Body lines for a slide and the index of the quiz results line, if the
/// quiz has been scored.
fn slide_lines(
    controller: &PresentationController,
    number: usize,
    slide: &Slide,
) -> (Vec<Line<'static>>, Option<usize>) {
    let mut lines = render_markdown(&slide.body);

    for (e, exercise) in slide.exercises.iter().enumerate() {
        lines.push(Line::from(""));
        lines.push(Line::from(Span::styled(
            exercise.prompt().to_string(),
            Style::default()
                .fg(Color::Yellow)
                .add_modifier(Modifier::BOLD),
        )));

        let state = controller.exercise_state(number, e);
        match exercise {
            Exercise::MultipleChoice { options, .. } => {
                for (o, option) in options.iter().enumerate() {
                    let id = ElementId::new(number, Element::Option { exercise: e, option: o });
                    let mark = state.map(|s| s.option_mark(o)).unwrap_or_default();
                    let selected = state.is_some_and(|s| s.selected == Some(o));
                    lines.push(option_line(
                        controller.is_focused(id),
                        o,
                        option,
                        selected,
                        mark,
                    ));
                }
            }
            Exercise::FillBlank { items, .. } => {
                for (i, item) in items.iter().enumerate() {
                    let id = ElementId::new(number, Element::Blank { exercise: e, item: i });
                    lines.push(blank_line(
                        controller.is_focused(id),
                        &item.sentence,
                        state.and_then(|s| s.fields.get(i)),
                        state.map(|s| s.field_mark(i)).unwrap_or_default(),
                    ));
                }
                let check = ElementId::new(number, Element::CheckButton { exercise: e });
                lines.push(button_line(controller.is_focused(check), "[ Check answers ]"));
            }
        }

        if let Some(feedback) = controller.feedback_for(number, e) {
            lines.extend(feedback_lines(feedback));
        }
    }

    let mut results_line = None;
    if let Some(quiz) = &slide.quiz
        && controller.quiz_slide() == Some(number)
    {
        results_line = quiz_lines(controller, number, quiz, &mut lines);
    }

    (lines, results_line)
}

fn option_line(
    focused: bool,
    index: usize,
    option: &ChoiceOption,
    selected: bool,
    mark: Mark,
) -> Line<'static> {
    let letter = char::from(b'a' + (index % 26) as u8);
    let bullet = if selected { "(•)" } else { "( )" };
    let suffix = match mark {
        Mark::Correct => " ✓",
        Mark::Incorrect => " ✗",
        _ => "",
    };
    Line::from(vec![
        focus_prefix(focused),
        Span::styled(
            format!("{} {}) {}{}", bullet, letter, option.text, suffix),
            mark_style(mark),
        ),
    ])
}

/// The field replaces the first `___` in the sentence, or trails it when
/// there is none.
fn blank_line(focused: bool, sentence: &str, field: Option<&TextField>, mark: Mark) -> Line<'static> {
    let mut spans = vec![focus_prefix(focused)];
    let after = match sentence.split_once(BLANK_MARKER) {
        Some((before, after)) => {
            spans.push(Span::from(before.to_string()));
            after
        }
        None => {
            spans.push(Span::from(format!("{} ", sentence)));
            ""
        }
    };
    spans.extend(field_spans(field, focused, mark_style(mark)));
    spans.push(Span::from(after.to_string()));

    let symbol = match mark {
        Mark::Correct => " ✓",
        Mark::Incorrect => " ✗",
        _ => "",
    };
    if !symbol.is_empty() {
        spans.push(Span::styled(symbol, mark_style(mark)));
    }
    Line::from(spans)
}

/// Text field contents; the focused field shows its cursor as a reversed
/// cell.
fn field_spans(field: Option<&TextField>, focused: bool, style: Style) -> Vec<Span<'static>> {
    let value = field.map(TextField::value).unwrap_or("");
    let style = style.add_modifier(Modifier::UNDERLINED);

    if !focused {
        return if value.is_empty() {
            vec![Span::styled(EMPTY_FIELD, Style::default().fg(Color::DarkGray))]
        } else {
            vec![Span::styled(value.to_string(), style)]
        };
    }

    let cursor = field.map(TextField::cursor).unwrap_or(0);
    let before: String = value.chars().take(cursor).collect();
    let at: String = value.chars().nth(cursor).map(String::from).unwrap_or_else(|| " ".to_string());
    let after: String = value.chars().skip(cursor + 1).collect();
    vec![
        Span::styled(before, style),
        Span::styled(at, style.add_modifier(Modifier::REVERSED)),
        Span::styled(after, style),
    ]
}

fn button_line(focused: bool, label: &str) -> Line<'static> {
    let style = if focused {
        key_style().add_modifier(Modifier::REVERSED)
    } else {
        key_style()
    };
    Line::from(vec![focus_prefix(focused), Span::styled(label.to_string(), style)])
}

fn feedback_lines(feedback: &Feedback) -> Vec<Line<'static>> {
    let color = if feedback.is_success() {
        Color::Green
    } else {
        Color::Red
    };
    let mut lines = vec![Line::from(Span::styled(
        format!("  {}", feedback.message),
        Style::default().fg(color).add_modifier(Modifier::BOLD),
    ))];
    if let Some(tip) = &feedback.tip {
        lines.push(Line::from(Span::styled(
            format!("  💡 Tip: {}", tip),
            Style::default()
                .fg(Color::Yellow)
                .add_modifier(Modifier::ITALIC),
        )));
    }
    lines
}

fn tier_color(tier: ScoreTier) -> Color {
    match tier {
        ScoreTier::Top => Color::Green,
        ScoreTier::High => Color::Cyan,
        ScoreTier::Mid => Color::Yellow,
        ScoreTier::Low => Color::Red,
    }
}

fn quiz_lines(
    controller: &PresentationController,
    number: usize,
    quiz: &FinalQuiz,
    lines: &mut Vec<Line<'static>>,
) -> Option<usize> {
    let state = controller.quiz_state()?;

    for (q, question) in quiz.questions.iter().enumerate() {
        lines.push(Line::from(""));
        lines.push(Line::from(Span::styled(
            question.prompt().to_string(),
            Style::default().add_modifier(Modifier::BOLD),
        )));

        let highlight = state.highlight_for(q);
        match question {
            QuizQuestion::MultipleChoice { options, .. } => {
                let selected = state.selected.get(q).copied().flatten();
                for (o, option) in options.iter().enumerate() {
                    let id = ElementId::new(number, Element::QuizOption { question: q, option: o });
                    let mark = match highlight {
                        Some(QuestionHighlight::Options(marks)) => {
                            marks.get(o).copied().unwrap_or_default()
                        }
                        _ if selected == Some(o) => Mark::Selected,
                        _ => Mark::None,
                    };
                    lines.push(option_line(
                        controller.is_focused(id),
                        o,
                        option,
                        selected == Some(o),
                        mark,
                    ));
                }
            }
            QuizQuestion::OpenText { .. } | QuizQuestion::FillBlank { .. } => {
                let id = ElementId::new(number, Element::QuizInput { question: q });
                let mark = match highlight {
                    Some(QuestionHighlight::Input(mark)) => *mark,
                    _ => Mark::None,
                };
                let focused = controller.is_focused(id);
                let mut spans = vec![focus_prefix(focused), Span::from("Answer: ")];
                spans.extend(field_spans(state.fields.get(q), focused, mark_style(mark)));
                lines.push(Line::from(spans));
            }
        }
    }

    lines.push(Line::from(""));
    let score = ElementId::new(number, Element::ScoreButton);
    lines.push(button_line(controller.is_focused(score), "[ Calculate score ]"));

    let result = state.result?;
    lines.push(Line::from(""));
    let index = lines.len();
    lines.push(Line::from(Span::styled(
        format!("Score: {}/{}", result.score, quiz.questions.len()),
        Style::default()
            .fg(tier_color(result.tier))
            .add_modifier(Modifier::BOLD),
    )));
    lines.push(Line::from(Span::styled(
        result.tier.message().to_string(),
        Style::default().fg(tier_color(result.tier)),
    )));
    Some(index)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn text(line: &Line) -> String {
        line.to_string()
    }

    fn typed(value: &str) -> TextField {
        let mut field = TextField::default();
        for c in value.chars() {
            field.insert(c);
        }
        field
    }

    #[test]
    fn test_blank_line_replaces_marker() {
        let field = typed("bin");
        let line = blank_line(false, "Ich ___ müde.", Some(&field), Mark::Correct);
        assert_eq!(text(&line), "  Ich bin müde. ✓");
    }

    #[test]
    fn test_blank_line_without_marker_appends_field() {
        let line = blank_line(false, "Montag, ...", None, Mark::None);
        assert_eq!(text(&line), "  Montag, ... _____");
    }

    #[test]
    fn test_focused_field_shows_cursor_cell() {
        let mut field = typed("sind");
        field.move_left();
        let spans = field_spans(Some(&field), true, Style::default());
        assert_eq!(spans[0].content, "sin");
        assert_eq!(spans[1].content, "d");
        assert!(spans[1].style.add_modifier.contains(Modifier::REVERSED));

        let spans = field_spans(None, true, Style::default());
        assert_eq!(spans[1].content, " ");
    }

    #[test]
    fn test_option_line_marks() {
        let option = ChoiceOption {
            text: "Guten Morgen".to_string(),
            correct: true,
        };
        let line = option_line(true, 1, &option, true, Mark::Correct);
        assert_eq!(text(&line), "▶ (•) b) Guten Morgen ✓");
        assert_eq!(line.spans[1].style.fg, Some(Color::Green));

        let line = option_line(false, 0, &option, false, Mark::None);
        assert_eq!(text(&line), "  ( ) a) Guten Morgen");
    }

    #[test]
    fn test_feedback_lines_with_tip() {
        let feedback = Feedback::error("1/3 correct. Keep trying!").with_tip(Some("Check the verb."));
        let lines = feedback_lines(&feedback);
        assert_eq!(lines.len(), 2);
        assert_eq!(lines[0].spans[0].style.fg, Some(Color::Red));
        assert!(text(&lines[1]).contains("Check the verb."));
    }
}
