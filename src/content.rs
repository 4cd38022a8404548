use crate::final_quiz::QUIZ_LENGTH;
use crate::models::Deck;
use std::fs;
use std::path::{Path, PathBuf};
use thiserror::Error;

const BUNDLED_DECK: &str = include_str!("../content/german_a1.json");

#[derive(Debug, Error)]
#[non_exhaustive]
pub enum ContentError {
    #[error("failed to read deck {path}: {source}")]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("deck is not valid JSON: {0}")]
    Parse(#[from] serde_json::Error),
    #[error("invalid deck: {0}")]
    Invalid(String),
}

/// The German A1 deck compiled into the binary.
pub fn bundled_deck() -> Result<Deck, ContentError> {
    parse_deck(BUNDLED_DECK)
}

pub fn load_deck(path: &Path) -> Result<Deck, ContentError> {
    let content = fs::read_to_string(path).map_err(|source| ContentError::Read {
        path: path.to_path_buf(),
        source,
    })?;
    parse_deck(&content)
}

pub fn parse_deck(json: &str) -> Result<Deck, ContentError> {
    let deck: Deck = serde_json::from_str(json)?;
    validate(&deck)?;
    Ok(deck)
}

fn validate(deck: &Deck) -> Result<(), ContentError> {
    if deck.slides.is_empty() {
        return Err(ContentError::Invalid("deck has no slides".to_string()));
    }

    let total = deck.total_slides();
    if let Some(slide) = deck.hints.keys().find(|s| !(1..=total).contains(*s)) {
        return Err(ContentError::Invalid(format!(
            "hint registered for slide {} but deck has {} slides",
            slide, total
        )));
    }

    let quizzes: Vec<usize> = deck
        .slides
        .iter()
        .enumerate()
        .filter(|(_, slide)| slide.quiz.is_some())
        .map(|(idx, _)| idx + 1)
        .collect();
    if quizzes.len() > 1 {
        return Err(ContentError::Invalid(format!(
            "only one final quiz allowed, found on slides {:?}",
            quizzes
        )));
    }

    for (idx, slide) in deck.slides.iter().enumerate() {
        if let Some(quiz) = &slide.quiz
            && quiz.questions.len() != QUIZ_LENGTH
        {
            return Err(ContentError::Invalid(format!(
                "final quiz on slide {} has {} questions, expected {}",
                idx + 1,
                quiz.questions.len(),
                QUIZ_LENGTH
            )));
        }
    }

    Ok(())
}
