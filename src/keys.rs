use crate::controller::{PresentationController, TextEdit};
use crate::models::AppState;
use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};

fn is_ctrl_c(key: &KeyEvent) -> bool {
    key.code == KeyCode::Char('c') && key.modifiers.contains(KeyModifiers::CONTROL)
}

pub fn handle_presentation_input(
    controller: &mut PresentationController,
    key: KeyEvent,
    app_state: &mut AppState,
) {
    if is_ctrl_c(&key) {
        *app_state = AppState::Exit;
        return;
    }

    // Text inputs swallow the navigation shortcuts.
    if controller.text_input_focused() {
        match key.code {
            KeyCode::Esc => controller.clear_focus(),
            KeyCode::Tab | KeyCode::Down => controller.focus_next(),
            KeyCode::BackTab | KeyCode::Up => controller.focus_previous(),
            // Enter submits only when the next stop is a button.
            KeyCode::Enter => {
                controller.focus_next();
                if controller.focused().is_some_and(|id| id.element.is_button()) {
                    controller.activate_focused();
                }
            }
            KeyCode::Left => {
                controller.edit_focused(TextEdit::Left);
            }
            KeyCode::Right => {
                controller.edit_focused(TextEdit::Right);
            }
            KeyCode::Backspace => {
                controller.edit_focused(TextEdit::Backspace);
            }
            KeyCode::Char(c) => {
                controller.edit_focused(TextEdit::Insert(c));
            }
            _ => {}
        }
        return;
    }

    match key.code {
        KeyCode::Right | KeyCode::Char(' ') => {
            controller.next();
        }
        KeyCode::Left => {
            controller.previous();
        }
        KeyCode::Char(c @ '1'..='9') => {
            if let Some(slide) = c.to_digit(10) {
                controller.go_to(slide as usize);
            }
        }
        KeyCode::Char('g') => {
            controller.open_picker();
            *app_state = AppState::SlidePicker;
        }
        KeyCode::Char('h') => controller.toggle_pronunciation(),
        KeyCode::Tab | KeyCode::Down => controller.focus_next(),
        KeyCode::BackTab | KeyCode::Up => controller.focus_previous(),
        KeyCode::Enter => {
            controller.activate_focused();
        }
        KeyCode::PageDown => controller.scroll_down(),
        KeyCode::PageUp => controller.scroll_up(),
        KeyCode::Esc if controller.focused().is_some() => controller.clear_focus(),
        KeyCode::Esc | KeyCode::Char('q') => *app_state = AppState::QuitConfirm,
        _ => {}
    }
}

pub fn handle_picker_input(
    controller: &mut PresentationController,
    key: KeyEvent,
    app_state: &mut AppState,
) {
    if is_ctrl_c(&key) {
        *app_state = AppState::Exit;
        return;
    }

    match key.code {
        KeyCode::Up | KeyCode::Char('k') => controller.picker_move(-1),
        KeyCode::Down | KeyCode::Char('j') => controller.picker_move(1),
        KeyCode::Home => controller.picker_jump(0),
        KeyCode::End => controller.picker_jump(usize::MAX),
        KeyCode::Enter => {
            controller.picker_confirm();
            *app_state = AppState::Presentation;
        }
        KeyCode::Esc | KeyCode::Char('g') => *app_state = AppState::Presentation,
        _ => {}
    }
}

pub fn handle_quit_confirm_input(key: KeyEvent, app_state: &mut AppState) {
    if is_ctrl_c(&key) {
        *app_state = AppState::Exit;
        return;
    }

    match key.code {
        KeyCode::Char('y') | KeyCode::Char('Y') => *app_state = AppState::Exit,
        KeyCode::Char('n') | KeyCode::Char('N') | KeyCode::Esc => {
            *app_state = AppState::Presentation
        }
        _ => {}
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::bindings::{Element, ElementId};
    use crate::config::Config;
    use crate::content::bundled_deck;
    use crate::progress::ProgressTracker;
    use crate::view_state::Mark;

    fn controller() -> PresentationController {
        let deck = bundled_deck().unwrap();
        let progress = ProgressTracker::new(deck.total_slides());
        PresentationController::new(deck, progress, &Config::default())
    }

    fn press(code: KeyCode) -> KeyEvent {
        KeyEvent::new(code, KeyModifiers::empty())
    }

    fn send(c: &mut PresentationController, state: &mut AppState, codes: &[KeyCode]) {
        for code in codes {
            handle_presentation_input(c, press(*code), state);
        }
    }

    #[test]
    fn test_arrow_and_space_navigation() {
        let mut c = controller();
        let mut state = AppState::Presentation;
        send(
            &mut c,
            &mut state,
            &[KeyCode::Right, KeyCode::Char(' '), KeyCode::Left],
        );
        assert_eq!(c.slides().current(), 2);
        send(&mut c, &mut state, &[KeyCode::Left, KeyCode::Left]);
        assert_eq!(c.slides().current(), 1);
        assert_eq!(state, AppState::Presentation);
    }

    #[test]
    fn test_digit_jumps() {
        let mut c = controller();
        let mut state = AppState::Presentation;
        send(&mut c, &mut state, &[KeyCode::Char('7')]);
        assert_eq!(c.slides().current(), 7);
        send(&mut c, &mut state, &[KeyCode::Char('0')]);
        assert_eq!(c.slides().current(), 7);
    }

    #[test]
    fn test_typing_digits_into_blank_does_not_navigate() {
        let mut c = controller();
        let mut state = AppState::Presentation;
        c.go_to(6);
        send(
            &mut c,
            &mut state,
            &[
                KeyCode::Tab,
                KeyCode::Char('3'),
                KeyCode::Char(' '),
                KeyCode::Char('q'),
                KeyCode::Char('g'),
            ],
        );
        assert_eq!(c.slides().current(), 6);
        assert_eq!(state, AppState::Presentation);
        assert_eq!(c.exercise_state(6, 0).unwrap().fields[0].value(), "3 qg");
    }

    #[test]
    fn test_enter_in_last_blank_checks_answers() {
        let mut c = controller();
        let mut state = AppState::Presentation;
        c.go_to(6);
        send(&mut c, &mut state, &[KeyCode::Tab]);
        for word in ["bin", "bist", "sind"] {
            for ch in word.chars() {
                handle_presentation_input(&mut c, press(KeyCode::Char(ch)), &mut state);
            }
            send(&mut c, &mut state, &[KeyCode::Enter]);
        }
        assert_eq!(
            c.focused(),
            Some(ElementId::new(6, Element::CheckButton { exercise: 0 }))
        );
        assert!(c.progress().is_marked_done(6));
        assert_eq!(c.exercise_state(6, 0).unwrap().field_marks, vec![Mark::Correct; 3]);
    }

    #[test]
    fn test_enter_in_quiz_answer_leaves_next_question_unanswered() {
        let mut c = controller();
        let mut state = AppState::Presentation;
        c.go_to(18);

        c.activate(ElementId::new(18, Element::QuizInput { question: 0 }));
        for ch in "Ich heisse Max".chars() {
            handle_presentation_input(&mut c, press(KeyCode::Char(ch)), &mut state);
        }
        send(&mut c, &mut state, &[KeyCode::Enter]);
        assert_eq!(
            c.focused(),
            Some(ElementId::new(18, Element::QuizOption { question: 1, option: 0 }))
        );

        c.activate(ElementId::new(18, Element::QuizInput { question: 2 }));
        for ch in "sind".chars() {
            handle_presentation_input(&mut c, press(KeyCode::Char(ch)), &mut state);
        }
        send(&mut c, &mut state, &[KeyCode::Enter]);

        let quiz = c.quiz_state().unwrap();
        assert_eq!(quiz.selected, vec![None; 5]);
        assert_eq!(quiz.fields[0].value(), "Ich heisse Max");
        assert!(quiz.result.is_none());
    }

    #[test]
    fn test_enter_selects_focused_option() {
        let mut c = controller();
        let mut state = AppState::Presentation;
        c.go_to(3);
        send(&mut c, &mut state, &[KeyCode::Tab, KeyCode::Tab, KeyCode::Enter]);
        assert_eq!(c.exercise_state(3, 0).unwrap().selected, Some(1));
        assert_eq!(c.progress().correct_attempts(), 1);
    }

    #[test]
    fn test_escape_leaves_input_before_quitting() {
        let mut c = controller();
        let mut state = AppState::Presentation;
        c.go_to(6);
        send(&mut c, &mut state, &[KeyCode::Tab, KeyCode::Esc]);
        assert!(c.focused().is_none());
        assert_eq!(state, AppState::Presentation);
        send(&mut c, &mut state, &[KeyCode::Esc]);
        assert_eq!(state, AppState::QuitConfirm);
    }

    #[test]
    fn test_ctrl_c_exits_from_text_input() {
        let mut c = controller();
        let mut state = AppState::Presentation;
        c.go_to(6);
        send(&mut c, &mut state, &[KeyCode::Tab]);
        let ctrl_c = KeyEvent::new(KeyCode::Char('c'), KeyModifiers::CONTROL);
        handle_presentation_input(&mut c, ctrl_c, &mut state);
        assert_eq!(state, AppState::Exit);
        assert_eq!(c.exercise_state(6, 0).unwrap().fields[0].value(), "");
    }

    #[test]
    fn test_picker_flow() {
        let mut c = controller();
        let mut state = AppState::Presentation;
        send(&mut c, &mut state, &[KeyCode::Char('g')]);
        assert_eq!(state, AppState::SlidePicker);

        for code in [KeyCode::Down, KeyCode::Down, KeyCode::Char('j'), KeyCode::Up] {
            handle_picker_input(&mut c, press(code), &mut state);
        }
        handle_picker_input(&mut c, press(KeyCode::End), &mut state);
        handle_picker_input(&mut c, press(KeyCode::Enter), &mut state);
        assert_eq!(state, AppState::Presentation);
        assert_eq!(c.slides().current(), 18);
    }

    #[test]
    fn test_picker_escape_keeps_slide() {
        let mut c = controller();
        let mut state = AppState::SlidePicker;
        c.open_picker();
        handle_picker_input(&mut c, press(KeyCode::Down), &mut state);
        handle_picker_input(&mut c, press(KeyCode::Esc), &mut state);
        assert_eq!(state, AppState::Presentation);
        assert_eq!(c.slides().current(), 1);
    }

    #[test]
    fn test_quit_confirmation() {
        let mut state = AppState::QuitConfirm;
        handle_quit_confirm_input(press(KeyCode::Char('x')), &mut state);
        assert_eq!(state, AppState::QuitConfirm);
        handle_quit_confirm_input(press(KeyCode::Char('n')), &mut state);
        assert_eq!(state, AppState::Presentation);

        let mut state = AppState::QuitConfirm;
        handle_quit_confirm_input(press(KeyCode::Char('y')), &mut state);
        assert_eq!(state, AppState::Exit);
    }
}
