use std::path::PathBuf;
use std::time::Duration;

pub const CONTENT_ENV: &str = "SLIDE_DECK_CONTENT";
pub const LOG_ENV: &str = "SLIDE_DECK_LOG";
pub const CHOICE_FEEDBACK_ENV: &str = "SLIDE_DECK_CHOICE_FEEDBACK_MS";
pub const BLANK_FEEDBACK_ENV: &str = "SLIDE_DECK_BLANK_FEEDBACK_MS";

pub const DEFAULT_LOG_FILE: &str = "slide_deck.log";
pub const DEFAULT_CHOICE_FEEDBACK_MS: u64 = 4000;
pub const DEFAULT_BLANK_FEEDBACK_MS: u64 = 5000;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Config {
    /// Deck to load instead of the bundled one.
    pub content_path: Option<PathBuf>,
    pub log_path: PathBuf,
    pub choice_feedback: Duration,
    pub blank_feedback: Duration,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            content_path: None,
            log_path: PathBuf::from(DEFAULT_LOG_FILE),
            choice_feedback: Duration::from_millis(DEFAULT_CHOICE_FEEDBACK_MS),
            blank_feedback: Duration::from_millis(DEFAULT_BLANK_FEEDBACK_MS),
        }
    }
}

impl Config {
    pub fn from_env() -> Self {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Unset, empty or unparsable values keep their defaults.
    pub fn from_lookup<F>(lookup: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        let defaults = Self::default();
        let non_empty = |key: &str| lookup(key).filter(|v| !v.trim().is_empty());
        let millis = |key: &str, fallback: Duration| {
            non_empty(key)
                .and_then(|v| v.trim().parse::<u64>().ok())
                .map(Duration::from_millis)
                .unwrap_or(fallback)
        };

        Self {
            content_path: non_empty(CONTENT_ENV).map(PathBuf::from),
            log_path: non_empty(LOG_ENV)
                .map(PathBuf::from)
                .unwrap_or(defaults.log_path),
            choice_feedback: millis(CHOICE_FEEDBACK_ENV, defaults.choice_feedback),
            blank_feedback: millis(BLANK_FEEDBACK_ENV, defaults.blank_feedback),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn lookup_from(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |key| map.get(key).cloned()
    }

    #[test]
    fn test_defaults_when_nothing_set() {
        let config = Config::from_lookup(lookup_from(&[]));
        assert_eq!(config, Config::default());
        assert_eq!(config.choice_feedback, Duration::from_secs(4));
        assert_eq!(config.blank_feedback, Duration::from_secs(5));
    }

    #[test]
    fn test_values_from_environment() {
        let config = Config::from_lookup(lookup_from(&[
            (CONTENT_ENV, "decks/spanish.json"),
            (LOG_ENV, "/tmp/deck.log"),
            (CHOICE_FEEDBACK_ENV, "1500"),
            (BLANK_FEEDBACK_ENV, " 2500 "),
        ]));
        assert_eq!(config.content_path, Some(PathBuf::from("decks/spanish.json")));
        assert_eq!(config.log_path, PathBuf::from("/tmp/deck.log"));
        assert_eq!(config.choice_feedback, Duration::from_millis(1500));
        assert_eq!(config.blank_feedback, Duration::from_millis(2500));
    }

    #[test]
    fn test_invalid_numbers_fall_back() {
        let config = Config::from_lookup(lookup_from(&[
            (CHOICE_FEEDBACK_ENV, "soon"),
            (BLANK_FEEDBACK_ENV, "-3"),
            (CONTENT_ENV, "  "),
        ]));
        assert_eq!(config.choice_feedback, Duration::from_millis(DEFAULT_CHOICE_FEEDBACK_MS));
        assert_eq!(config.blank_feedback, Duration::from_millis(DEFAULT_BLANK_FEEDBACK_MS));
        assert!(config.content_path.is_none());
    }
}
