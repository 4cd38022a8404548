use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// A whole presentation: slides plus the static lookup tables that go with them.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Deck {
    pub title: String,
    pub slides: Vec<Slide>,
    /// Tip shown when a fill-in exercise on that slide is not fully correct.
    #[serde(default)]
    pub hints: BTreeMap<usize, String>,
    /// German word (without article) to IPA transcription.
    #[serde(default)]
    pub pronunciations: BTreeMap<String, String>,
}

impl Deck {
    pub fn total_slides(&self) -> usize {
        self.slides.len()
    }

    /// Slides are numbered from 1.
    pub fn slide(&self, number: usize) -> Option<&Slide> {
        number.checked_sub(1).and_then(|idx| self.slides.get(idx))
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Slide {
    pub title: String,
    #[serde(default)]
    pub body: String,
    #[serde(default)]
    pub exercises: Vec<Exercise>,
    #[serde(default)]
    pub quiz: Option<FinalQuiz>,
    #[serde(default)]
    pub vocabulary: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Exercise {
    MultipleChoice {
        prompt: String,
        options: Vec<ChoiceOption>,
    },
    FillBlank {
        prompt: String,
        items: Vec<BlankItem>,
    },
}

impl Exercise {
    pub fn prompt(&self) -> &str {
        match self {
            Exercise::MultipleChoice { prompt, .. } | Exercise::FillBlank { prompt, .. } => prompt,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ChoiceOption {
    pub text: String,
    #[serde(default)]
    pub correct: bool,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BlankItem {
    /// Sentence with `___` where the answer goes.
    pub sentence: String,
    pub answer: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FinalQuiz {
    pub questions: Vec<QuizQuestion>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum QuizQuestion {
    /// Any non-empty answer counts.
    OpenText { prompt: String },
    MultipleChoice {
        prompt: String,
        options: Vec<ChoiceOption>,
    },
    FillBlank { prompt: String, answer: String },
}

impl QuizQuestion {
    pub fn prompt(&self) -> &str {
        match self {
            QuizQuestion::OpenText { prompt }
            | QuizQuestion::MultipleChoice { prompt, .. }
            | QuizQuestion::FillBlank { prompt, .. } => prompt,
        }
    }
}

/// Outcome of one evaluation, consumed right away by the progress tracker.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AttemptResult {
    pub slide: usize,
    pub correct: bool,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AppState {
    Presentation,
    SlidePicker,
    QuitConfirm,
    Exit,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_slide_lookup_is_one_based() {
        let deck = Deck {
            title: "T".to_string(),
            slides: vec![
                Slide {
                    title: "One".to_string(),
                    body: String::new(),
                    exercises: vec![],
                    quiz: None,
                    vocabulary: vec![],
                },
                Slide {
                    title: "Two".to_string(),
                    body: String::new(),
                    exercises: vec![],
                    quiz: None,
                    vocabulary: vec![],
                },
            ],
            hints: BTreeMap::new(),
            pronunciations: BTreeMap::new(),
        };

        assert!(deck.slide(0).is_none());
        assert_eq!(deck.slide(1).map(|s| s.title.as_str()), Some("One"));
        assert_eq!(deck.slide(2).map(|s| s.title.as_str()), Some("Two"));
        assert!(deck.slide(3).is_none());
    }

    #[test]
    fn test_exercise_deserializes_tagged_kind() {
        let json = r#"{"kind":"fill_blank","prompt":"Fill in","items":[{"sentence":"Wir ___ hier.","answer":"sind"}]}"#;
        let exercise: Exercise = serde_json::from_str(json).unwrap();
        assert_eq!(exercise.prompt(), "Fill in");
        match exercise {
            Exercise::FillBlank { items, .. } => assert_eq!(items[0].answer, "sind"),
            other => panic!("unexpected exercise {:?}", other),
        }
    }

    #[test]
    fn test_option_correct_flag_defaults_to_false() {
        let option: ChoiceOption = serde_json::from_str(r#"{"text":"Hallo"}"#).unwrap();
        assert!(!option.correct);
    }
}
