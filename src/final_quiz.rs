//! Scoring of the closing five-question test.

use crate::evaluator::answers_match;
use crate::models::{FinalQuiz, QuizQuestion};
use crate::view_state::Mark;

pub const QUIZ_LENGTH: usize = 5;

/// How one question is judged.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AnswerKey {
    /// Any non-blank text.
    Answered,
    /// The selected option must carry the correct flag.
    Choice { flags: Vec<bool> },
    /// Case-insensitive exact text.
    Text(String),
}

impl AnswerKey {
    pub fn from_question(question: &QuizQuestion) -> Self {
        match question {
            QuizQuestion::OpenText { .. } => AnswerKey::Answered,
            QuizQuestion::MultipleChoice { options, .. } => AnswerKey::Choice {
                flags: options.iter().map(|opt| opt.correct).collect(),
            },
            QuizQuestion::FillBlank { answer, .. } => AnswerKey::Text(answer.clone()),
        }
    }

    pub fn accepts(&self, response: &QuizResponse) -> bool {
        match self {
            AnswerKey::Answered => !response.text.trim().is_empty(),
            AnswerKey::Choice { flags } => response
                .selected
                .and_then(|idx| flags.get(idx))
                .copied()
                .unwrap_or(false),
            AnswerKey::Text(expected) => answers_match(&response.text, expected),
        }
    }
}

/// What the learner entered for one question. Choice questions use
/// `selected`, the others `text`.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct QuizResponse {
    pub selected: Option<usize>,
    pub text: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ScoreTier {
    Top,
    High,
    Mid,
    Low,
}

impl ScoreTier {
    pub fn from_score(score: u8) -> Self {
        if score == 5 {
            ScoreTier::Top
        } else if score >= 4 {
            ScoreTier::High
        } else if score >= 3 {
            ScoreTier::Mid
        } else {
            ScoreTier::Low
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            ScoreTier::Top => "top",
            ScoreTier::High => "high",
            ScoreTier::Mid => "mid",
            ScoreTier::Low => "low",
        }
    }

    pub fn message(&self) -> &'static str {
        match self {
            ScoreTier::Top => "🎉 Perfekt! You have mastered German A1 basics!",
            ScoreTier::High => "👏 Sehr gut! Very good! Keep practicing!",
            ScoreTier::Mid => "👍 Gut! Good! Review the topics you missed.",
            ScoreTier::Low => "📚 Keep studying! Review the materials and try again.",
        }
    }
}

/// Correct/incorrect classification of one question after scoring.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum QuestionHighlight {
    Unmarked,
    Options(Vec<Mark>),
    Input(Mark),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FinalQuizScorer {
    keys: Vec<AnswerKey>,
}

impl FinalQuizScorer {
    pub fn new(keys: Vec<AnswerKey>) -> Self {
        Self { keys }
    }

    pub fn for_quiz(quiz: &FinalQuiz) -> Self {
        Self::new(quiz.questions.iter().map(AnswerKey::from_question).collect())
    }

    pub fn keys(&self) -> &[AnswerKey] {
        &self.keys
    }

    /// Missing responses count as blank.
    pub fn score(&self, responses: &[QuizResponse]) -> u8 {
        let blank = QuizResponse::default();
        let correct = self
            .keys
            .iter()
            .enumerate()
            .filter(|(i, key)| key.accepts(responses.get(*i).unwrap_or(&blank)))
            .count();
        correct.min(u8::MAX as usize) as u8
    }

    pub fn tier(&self, responses: &[QuizResponse]) -> ScoreTier {
        ScoreTier::from_score(self.score(responses))
    }

    /// Recomputed from scratch on every call, so applying it twice gives the
    /// same marks.
    pub fn highlight(&self, responses: &[QuizResponse]) -> Vec<QuestionHighlight> {
        let blank = QuizResponse::default();
        self.keys
            .iter()
            .enumerate()
            .map(|(i, key)| {
                let response = responses.get(i).unwrap_or(&blank);
                match key {
                    AnswerKey::Answered => QuestionHighlight::Unmarked,
                    AnswerKey::Choice { flags } => match response.selected {
                        None => QuestionHighlight::Unmarked,
                        Some(selected) => {
                            let mut marks = vec![Mark::None; flags.len()];
                            if flags.get(selected).copied().unwrap_or(false) {
                                marks[selected] = Mark::Correct;
                            } else {
                                if let Some(mark) = marks.get_mut(selected) {
                                    *mark = Mark::Incorrect;
                                }
                                if let Some(correct) = flags.iter().position(|f| *f) {
                                    marks[correct] = Mark::Correct;
                                }
                            }
                            QuestionHighlight::Options(marks)
                        }
                    },
                    AnswerKey::Text(expected) => {
                        if answers_match(&response.text, expected) {
                            QuestionHighlight::Input(Mark::Correct)
                        } else {
                            QuestionHighlight::Input(Mark::Incorrect)
                        }
                    }
                }
            })
            .collect()
    }
}
