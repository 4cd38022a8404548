//! Drives the presentation: navigation, handler binding for the active
//! slide, and relaying exercise results to the progress tracker.

use crate::bindings::{Element, ElementId, Handler, HandlerRegistry};
use crate::config::Config;
use crate::evaluator::{
    blank_feedback, choice_feedback, evaluate_blanks, evaluate_choice, BlankInput, HintTable,
};
use crate::feedback::{Feedback, FeedbackScheduler, RegionId};
use crate::final_quiz::{FinalQuizScorer, ScoreTier};
use crate::logger;
use crate::models::{AttemptResult, Deck, Exercise, QuizQuestion};
use crate::progress::ProgressTracker;
use crate::slides::SlideModel;
use crate::view_state::{ExerciseState, Mark, QuizResult, QuizState, TextField};
use std::collections::HashMap;
use std::time::Duration;

pub const SCROLL_STEP: u16 = 3;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TextEdit {
    Insert(char),
    Backspace,
    Left,
    Right,
}

#[derive(Debug)]
struct QuizSlot {
    slide: usize,
    state: QuizState,
    scorer: FinalQuizScorer,
}

#[derive(Debug)]
pub struct PresentationController {
    deck: Deck,
    hints: HintTable,
    slides: SlideModel,
    progress: ProgressTracker,
    registry: HandlerRegistry,
    feedback: FeedbackScheduler,
    exercises: HashMap<RegionId, ExerciseState>,
    quiz: Option<QuizSlot>,
    focus: Option<usize>,
    picker_cursor: usize,
    scroll: u16,
    scroll_to_results: bool,
    show_pronunciation: bool,
    choice_feedback: Duration,
    blank_feedback: Duration,
}

impl PresentationController {
    pub fn new(deck: Deck, progress: ProgressTracker, config: &Config) -> Self {
        let mut exercises = HashMap::new();
        let mut quiz = None;
        for (idx, slide) in deck.slides.iter().enumerate() {
            let number = idx + 1;
            for (e, exercise) in slide.exercises.iter().enumerate() {
                exercises.insert((number, e), ExerciseState::for_exercise(exercise));
            }
            if quiz.is_none()
                && let Some(final_quiz) = &slide.quiz
            {
                quiz = Some(QuizSlot {
                    slide: number,
                    state: QuizState::for_quiz(final_quiz),
                    scorer: FinalQuizScorer::for_quiz(final_quiz),
                });
            }
        }

        let mut controller = Self {
            hints: HintTable::new(deck.hints.clone()),
            slides: SlideModel::new(deck.total_slides()),
            deck,
            progress,
            registry: HandlerRegistry::new(),
            feedback: FeedbackScheduler::new(),
            exercises,
            quiz,
            focus: None,
            picker_cursor: 0,
            scroll: 0,
            scroll_to_results: false,
            show_pronunciation: true,
            choice_feedback: config.choice_feedback,
            blank_feedback: config.blank_feedback,
        };
        controller.show_slide();
        controller
    }

    pub fn deck(&self) -> &Deck {
        &self.deck
    }

    pub fn slides(&self) -> &SlideModel {
        &self.slides
    }

    pub fn progress(&self) -> &ProgressTracker {
        &self.progress
    }

    pub fn registry(&self) -> &HandlerRegistry {
        &self.registry
    }

    pub fn is_active(&self, slide: usize) -> bool {
        self.slides.current() == slide
    }

    // Navigation

    pub fn next(&mut self) -> bool {
        let moved = self.slides.next();
        if moved {
            self.show_slide();
        }
        moved
    }

    pub fn previous(&mut self) -> bool {
        let moved = self.slides.previous();
        if moved {
            self.show_slide();
        }
        moved
    }

    pub fn go_to(&mut self, slide: usize) -> bool {
        let moved = self.slides.go_to(slide);
        if moved {
            self.show_slide();
        }
        moved
    }

    fn show_slide(&mut self) {
        let current = self.slides.current();
        logger::log(&format!(
            "Showing slide {}/{}",
            current,
            self.slides.total()
        ));

        self.focus = None;
        self.scroll = 0;
        self.scroll_to_results = false;
        self.picker_cursor = current - 1;
        self.bind_active_slide();
    }

    /// Drops every binding and binds the active slide's elements again.
    fn bind_active_slide(&mut self) {
        self.registry.unbind_all();
        let current = self.slides.current();
        let Some(slide) = self.deck.slide(current) else {
            logger::log(&format!("No content for slide {}, nothing to bind", current));
            return;
        };

        for (e, exercise) in slide.exercises.iter().enumerate() {
            match exercise {
                Exercise::MultipleChoice { options, .. } => {
                    for option in 0..options.len() {
                        self.registry.bind(
                            ElementId::new(current, Element::Option { exercise: e, option }),
                            Handler::EvaluateChoice,
                        );
                    }
                }
                Exercise::FillBlank { items, .. } => {
                    for item in 0..items.len() {
                        self.registry.bind(
                            ElementId::new(current, Element::Blank { exercise: e, item }),
                            Handler::ResetBlankMark,
                        );
                    }
                    self.registry.bind(
                        ElementId::new(current, Element::CheckButton { exercise: e }),
                        Handler::CheckAnswers,
                    );
                }
            }
        }

        if let Some(quiz) = &slide.quiz {
            for (question, q) in quiz.questions.iter().enumerate() {
                match q {
                    QuizQuestion::MultipleChoice { options, .. } => {
                        for option in 0..options.len() {
                            self.registry.bind(
                                ElementId::new(current, Element::QuizOption { question, option }),
                                Handler::SelectQuizOption,
                            );
                        }
                    }
                    QuizQuestion::OpenText { .. } | QuizQuestion::FillBlank { .. } => {
                        self.registry.bind(
                            ElementId::new(current, Element::QuizInput { question }),
                            Handler::EditQuizAnswer,
                        );
                    }
                }
            }
            self.registry
                .bind(ElementId::new(current, Element::ScoreButton), Handler::CalculateScore);
        }
    }

    // Element interaction

    /// A click on `id`. Elements that are not bound (other slides, unknown
    /// ids) do nothing and return `false`.
    pub fn activate(&mut self, id: ElementId) -> bool {
        let Some(handler) = self.registry.handler(&id) else {
            return false;
        };

        match (handler, id.element) {
            (Handler::EvaluateChoice, Element::Option { exercise, option }) => {
                self.choose_option(id.slide, exercise, option)
            }
            (Handler::CheckAnswers, Element::CheckButton { exercise }) => {
                self.check_answers(id.slide, exercise)
            }
            (Handler::SelectQuizOption, Element::QuizOption { question, option }) => {
                self.select_quiz_option(question, option)
            }
            (Handler::CalculateScore, Element::ScoreButton) => self.calculate_score(),
            (Handler::ResetBlankMark, Element::Blank { .. })
            | (Handler::EditQuizAnswer, Element::QuizInput { .. }) => {
                self.focus = self.registry.position(&id);
            }
            _ => return false,
        }
        true
    }

    fn choose_option(&mut self, slide: usize, exercise: usize, option: usize) {
        let Some(Exercise::MultipleChoice { options, .. }) = self
            .deck
            .slide(slide)
            .and_then(|s| s.exercises.get(exercise))
        else {
            return;
        };
        let outcome = evaluate_choice(option, options);

        if let Some(state) = self.exercises.get_mut(&(slide, exercise)) {
            state.selected = Some(option);
            state.option_marks.fill(Mark::None);
            if let Some(mark) = state.option_marks.get_mut(option) {
                *mark = if outcome.is_correct {
                    Mark::Correct
                } else {
                    Mark::Incorrect
                };
            }
            if !outcome.is_correct
                && let Some(mark) = outcome
                    .correct_option
                    .and_then(|c| state.option_marks.get_mut(c))
            {
                *mark = Mark::Correct;
            }
        }

        self.feedback.show(
            (slide, exercise),
            choice_feedback(&outcome),
            self.choice_feedback,
        );
        self.record(AttemptResult {
            slide,
            correct: outcome.is_correct,
        });
    }

    fn check_answers(&mut self, slide: usize, exercise: usize) {
        let Some(Exercise::FillBlank { items, .. }) = self
            .deck
            .slide(slide)
            .and_then(|s| s.exercises.get(exercise))
        else {
            return;
        };
        let Some(state) = self.exercises.get_mut(&(slide, exercise)) else {
            return;
        };

        let outcome = evaluate_blanks(items.iter().enumerate().map(|(i, item)| BlankInput {
            value: state.fields.get(i).map(TextField::value).unwrap_or(""),
            expected: &item.answer,
        }));
        state.field_marks = outcome
            .per_item
            .iter()
            .map(|ok| if *ok { Mark::Correct } else { Mark::Incorrect })
            .collect();

        let tip = self.hints.tip_after(slide, &outcome);
        self.feedback.show(
            (slide, exercise),
            blank_feedback(&outcome, tip),
            self.blank_feedback,
        );

        if outcome.all_correct() && self.progress.mark_completed(slide) {
            logger::log(&format!("Slide {} marked done", slide));
        }
        self.record(AttemptResult {
            slide,
            correct: outcome.all_correct(),
        });
    }

    fn select_quiz_option(&mut self, question: usize, option: usize) {
        if let Some(selected) = self
            .quiz
            .as_mut()
            .and_then(|quiz| quiz.state.selected.get_mut(question))
            && *selected != Some(option)
        {
            *selected = Some(option);
            self.clear_quiz_score();
        }
    }

    /// A changed answer makes the shown score and highlight stale.
    fn clear_quiz_score(&mut self) {
        if let Some(quiz) = self.quiz.as_mut() {
            quiz.state.result = None;
            quiz.state.highlight.clear();
        }
    }

    fn calculate_score(&mut self) {
        let Some(quiz) = self.quiz.as_mut() else {
            return;
        };
        let responses = quiz.state.responses();
        let score = quiz.scorer.score(&responses);
        let tier = ScoreTier::from_score(score);

        quiz.state.result = Some(QuizResult { score, tier });
        quiz.state.highlight = quiz.scorer.highlight(&responses);
        self.scroll_to_results = true;

        logger::log(&format!(
            "Final quiz scored {}/{} ({})",
            score,
            quiz.scorer.keys().len(),
            tier.label()
        ));
    }

    fn record(&mut self, result: AttemptResult) {
        self.progress.record(result);
        logger::log(&self.progress.summary());
    }

    // Focus and text entry

    pub fn focused(&self) -> Option<ElementId> {
        self.focus
            .and_then(|idx| self.registry.elements().get(idx))
            .copied()
    }

    pub fn is_focused(&self, id: ElementId) -> bool {
        self.focused() == Some(id)
    }

    pub fn text_input_focused(&self) -> bool {
        self.focused().is_some_and(|id| id.element.is_text_input())
    }

    pub fn focus_next(&mut self) {
        let len = self.registry.len();
        self.focus = match self.focus {
            _ if len == 0 => None,
            None => Some(0),
            Some(idx) => Some((idx + 1) % len),
        };
    }

    pub fn focus_previous(&mut self) {
        let len = self.registry.len();
        self.focus = match self.focus {
            _ if len == 0 => None,
            None | Some(0) => Some(len - 1),
            Some(idx) => Some(idx - 1),
        };
    }

    pub fn clear_focus(&mut self) {
        self.focus = None;
    }

    pub fn activate_focused(&mut self) -> bool {
        match self.focused() {
            Some(id) => self.activate(id),
            None => false,
        }
    }

    /// Applies an edit to the focused text input. Returns `false` when no
    /// text input has focus.
    pub fn edit_focused(&mut self, edit: TextEdit) -> bool {
        let Some(id) = self.focused() else {
            return false;
        };

        let field = match id.element {
            Element::Blank { exercise, item } => self
                .exercises
                .get_mut(&(id.slide, exercise))
                .and_then(|state| state.fields.get_mut(item)),
            Element::QuizInput { question } => self
                .quiz
                .as_mut()
                .and_then(|quiz| quiz.state.fields.get_mut(question)),
            _ => return false,
        };
        let Some(field) = field else {
            return false;
        };

        let changed = match edit {
            TextEdit::Insert(c) => {
                field.insert(c);
                true
            }
            TextEdit::Backspace => field.backspace(),
            TextEdit::Left => {
                field.move_left();
                false
            }
            TextEdit::Right => {
                field.move_right();
                false
            }
        };

        if changed {
            self.input_changed(id);
        }
        true
    }

    fn input_changed(&mut self, id: ElementId) {
        match (self.registry.handler(&id), id.element) {
            (Some(Handler::ResetBlankMark), Element::Blank { exercise, item }) => {
                if let Some(mark) = self
                    .exercises
                    .get_mut(&(id.slide, exercise))
                    .and_then(|state| state.field_marks.get_mut(item))
                {
                    *mark = Mark::None;
                }
            }
            (Some(Handler::EditQuizAnswer), Element::QuizInput { .. }) => self.clear_quiz_score(),
            _ => {}
        }
    }

    // View state for rendering

    pub fn exercise_state(&self, slide: usize, exercise: usize) -> Option<&ExerciseState> {
        self.exercises.get(&(slide, exercise))
    }

    pub fn feedback_for(&self, slide: usize, exercise: usize) -> Option<&Feedback> {
        self.feedback.get((slide, exercise))
    }

    pub fn quiz_state(&self) -> Option<&QuizState> {
        self.quiz.as_ref().map(|quiz| &quiz.state)
    }

    pub fn quiz_slide(&self) -> Option<usize> {
        self.quiz.as_ref().map(|quiz| quiz.slide)
    }

    /// Hides feedback whose timer fired. Returns whether anything changed.
    pub fn tick(&mut self) -> bool {
        let dismissed = self.feedback.dismiss_expired();
        !dismissed.is_empty()
    }

    // Slide picker

    pub fn picker_cursor(&self) -> usize {
        self.picker_cursor
    }

    pub fn open_picker(&mut self) {
        self.picker_cursor = self.slides.current() - 1;
    }

    pub fn picker_move(&mut self, delta: isize) {
        let last = self.slides.total().saturating_sub(1);
        self.picker_cursor = self.picker_cursor.saturating_add_signed(delta).min(last);
    }

    pub fn picker_jump(&mut self, index: usize) {
        self.picker_cursor = index.min(self.slides.total().saturating_sub(1));
    }

    pub fn picker_confirm(&mut self) -> bool {
        self.go_to(self.picker_cursor + 1)
    }

    // Scrolling and hints

    pub fn scroll(&self) -> u16 {
        self.scroll
    }

    pub fn set_scroll(&mut self, scroll: u16) {
        self.scroll = scroll;
    }

    pub fn scroll_down(&mut self) {
        self.scroll = self.scroll.saturating_add(SCROLL_STEP);
    }

    pub fn scroll_up(&mut self) {
        self.scroll = self.scroll.saturating_sub(SCROLL_STEP);
    }

    /// Set after scoring; the renderer consumes it once it knows where the
    /// results panel is.
    pub fn take_scroll_to_results(&mut self) -> bool {
        std::mem::take(&mut self.scroll_to_results)
    }

    pub fn show_pronunciation(&self) -> bool {
        self.show_pronunciation
    }

    pub fn toggle_pronunciation(&mut self) {
        self.show_pronunciation = !self.show_pronunciation;
    }
}
