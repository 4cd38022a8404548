//! Per-element state the controller mutates and the UI reads.

use crate::final_quiz::{QuestionHighlight, QuizResponse, ScoreTier};
use crate::models::{Exercise, FinalQuiz};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Mark {
    #[default]
    None,
    Selected,
    Correct,
    Incorrect,
}

/// Single-line text input. `cursor` counts chars, not bytes.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TextField {
    value: String,
    cursor: usize,
}

impl TextField {
    pub fn value(&self) -> &str {
        &self.value
    }

    pub fn cursor(&self) -> usize {
        self.cursor
    }

    pub fn insert(&mut self, c: char) {
        let at = self.byte_index(self.cursor);
        self.value.insert(at, c);
        self.cursor += 1;
    }

    pub fn backspace(&mut self) -> bool {
        if self.cursor == 0 {
            return false;
        }
        let at = self.byte_index(self.cursor - 1);
        self.value.remove(at);
        self.cursor -= 1;
        true
    }

    pub fn move_left(&mut self) {
        self.cursor = self.cursor.saturating_sub(1);
    }

    pub fn move_right(&mut self) {
        self.cursor = (self.cursor + 1).min(self.value.chars().count());
    }

    fn byte_index(&self, char_idx: usize) -> usize {
        self.value
            .char_indices()
            .nth(char_idx)
            .map(|(i, _)| i)
            .unwrap_or(self.value.len())
    }
}

/// What the learner has done with one inline exercise.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ExerciseState {
    pub selected: Option<usize>,
    pub option_marks: Vec<Mark>,
    pub fields: Vec<TextField>,
    pub field_marks: Vec<Mark>,
}

impl ExerciseState {
    pub fn for_exercise(exercise: &Exercise) -> Self {
        match exercise {
            Exercise::MultipleChoice { options, .. } => Self {
                option_marks: vec![Mark::None; options.len()],
                ..Self::default()
            },
            Exercise::FillBlank { items, .. } => Self {
                fields: vec![TextField::default(); items.len()],
                field_marks: vec![Mark::None; items.len()],
                ..Self::default()
            },
        }
    }

    pub fn option_mark(&self, option: usize) -> Mark {
        self.option_marks.get(option).copied().unwrap_or_default()
    }

    pub fn field_mark(&self, item: usize) -> Mark {
        self.field_marks.get(item).copied().unwrap_or_default()
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct QuizResult {
    pub score: u8,
    pub tier: ScoreTier,
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct QuizState {
    pub selected: Vec<Option<usize>>,
    pub fields: Vec<TextField>,
    pub highlight: Vec<QuestionHighlight>,
    pub result: Option<QuizResult>,
}

impl QuizState {
    pub fn for_quiz(quiz: &FinalQuiz) -> Self {
        let count = quiz.questions.len();
        Self {
            selected: vec![None; count],
            fields: vec![TextField::default(); count],
            highlight: Vec::new(),
            result: None,
        }
    }

    pub fn responses(&self) -> Vec<QuizResponse> {
        self.selected
            .iter()
            .zip(&self.fields)
            .map(|(selected, field)| QuizResponse {
                selected: *selected,
                text: field.value().to_string(),
            })
            .collect()
    }

    pub fn highlight_for(&self, question: usize) -> Option<&QuestionHighlight> {
        self.highlight.get(question)
    }
}
