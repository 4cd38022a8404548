//! One handler per interactive element of the active slide.
//!
//! Binding an element that already has a handler replaces it, so rebinding a
//! slide never stacks handlers.

use std::collections::HashMap;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Element {
    Option { exercise: usize, option: usize },
    Blank { exercise: usize, item: usize },
    CheckButton { exercise: usize },
    QuizOption { question: usize, option: usize },
    QuizInput { question: usize },
    ScoreButton,
}

impl Element {
    pub fn is_text_input(&self) -> bool {
        matches!(self, Element::Blank { .. } | Element::QuizInput { .. })
    }

    pub fn is_button(&self) -> bool {
        matches!(self, Element::CheckButton { .. } | Element::ScoreButton)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ElementId {
    pub slide: usize,
    pub element: Element,
}

impl ElementId {
    pub fn new(slide: usize, element: Element) -> Self {
        Self { slide, element }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Handler {
    /// Mark the option selected and check it.
    EvaluateChoice,
    /// Editing a blank clears its old verdict.
    ResetBlankMark,
    CheckAnswers,
    /// Quiz options are only selected; scoring happens later.
    SelectQuizOption,
    EditQuizAnswer,
    CalculateScore,
}

#[derive(Debug, Default)]
pub struct HandlerRegistry {
    handlers: HashMap<ElementId, Handler>,
    order: Vec<ElementId>,
}

impl HandlerRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns the handler that was replaced, if any.
    pub fn bind(&mut self, id: ElementId, handler: Handler) -> Option<Handler> {
        let previous = self.handlers.insert(id, handler);
        if previous.is_none() {
            self.order.push(id);
        }
        previous
    }

    pub fn unbind_all(&mut self) {
        self.handlers.clear();
        self.order.clear();
    }

    pub fn handler(&self, id: &ElementId) -> Option<Handler> {
        self.handlers.get(id).copied()
    }

    /// Elements in binding order, which is also focus order.
    pub fn elements(&self) -> &[ElementId] {
        &self.order
    }

    pub fn position(&self, id: &ElementId) -> Option<usize> {
        self.order.iter().position(|bound| bound == id)
    }

    pub fn len(&self) -> usize {
        self.order.len()
    }

    pub fn is_empty(&self) -> bool {
        self.order.is_empty()
    }
}
