//! Answer checking for the inline exercises.
//!
//! Everything here is pure: the controller shows the outcome and records the
//! attempt.

use crate::feedback::Feedback;
use crate::models::ChoiceOption;
use std::collections::BTreeMap;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ChoiceOutcome {
    pub is_correct: bool,
    /// The option carrying the correct flag, so a wrong pick can reveal it.
    pub correct_option: Option<usize>,
}

/// Looks up the correctness flag of the picked option. At most one flagged
/// option per group is assumed; the first one found is reported.
pub fn evaluate_choice(selected: usize, options: &[ChoiceOption]) -> ChoiceOutcome {
    let correct_option = options.iter().position(|opt| opt.correct);
    let is_correct = options.get(selected).is_some_and(|opt| opt.correct);

    ChoiceOutcome {
        is_correct,
        correct_option,
    }
}

pub fn normalize_answer(answer: &str) -> String {
    answer.trim().to_lowercase()
}

/// Case- and surrounding-whitespace-insensitive comparison. An empty
/// expected answer never matches.
pub fn answers_match(value: &str, expected: &str) -> bool {
    let expected = normalize_answer(expected);
    !expected.is_empty() && normalize_answer(value) == expected
}

#[derive(Debug, Clone, Copy)]
pub struct BlankInput<'a> {
    pub value: &'a str,
    pub expected: &'a str,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BlankOutcome {
    pub per_item: Vec<bool>,
    pub correct_count: usize,
    pub total_count: usize,
}

impl BlankOutcome {
    /// A group with no items has nothing to be right about.
    pub fn all_correct(&self) -> bool {
        self.total_count > 0 && self.correct_count == self.total_count
    }
}

pub fn evaluate_blanks<'a, I>(inputs: I) -> BlankOutcome
where
    I: IntoIterator<Item = BlankInput<'a>>,
{
    let per_item: Vec<bool> = inputs
        .into_iter()
        .map(|input| answers_match(input.value, input.expected))
        .collect();
    let correct_count = per_item.iter().filter(|ok| **ok).count();

    BlankOutcome {
        total_count: per_item.len(),
        correct_count,
        per_item,
    }
}

/// Fixed slide -> tip table.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct HintTable {
    hints: BTreeMap<usize, String>,
}

impl HintTable {
    pub fn new(hints: BTreeMap<usize, String>) -> Self {
        Self { hints }
    }

    pub fn tip_for(&self, slide: usize) -> Option<&str> {
        self.hints.get(&slide).map(String::as_str)
    }

    /// Tip only when the group was not fully right.
    pub fn tip_after(&self, slide: usize, outcome: &BlankOutcome) -> Option<&str> {
        if outcome.all_correct() {
            None
        } else {
            self.tip_for(slide)
        }
    }
}

pub fn choice_feedback(outcome: &ChoiceOutcome) -> Feedback {
    if outcome.is_correct {
        Feedback::success("✅ Richtig! Correct!")
    } else {
        Feedback::error("❌ Falsch. The correct answer is highlighted.")
    }
}

pub fn blank_feedback(outcome: &BlankOutcome, tip: Option<&str>) -> Feedback {
    if outcome.all_correct() {
        Feedback::success(format!(
            "🎉 Ausgezeichnet! {}/{} correct!",
            outcome.correct_count, outcome.total_count
        ))
    } else {
        Feedback::error(format!(
            "{}/{} correct. Keep trying!",
            outcome.correct_count, outcome.total_count
        ))
        .with_tip(tip)
    }
}
