use lazy_static::lazy_static;
use regex::Regex;
use std::collections::BTreeMap;

lazy_static! {
    static ref LEADING_ARTICLE: Regex = Regex::new(r"^(der|die|das)\s+").unwrap();
}

/// "der Vater" -> "Vater". Only lowercase articles are stripped.
pub fn strip_article(word: &str) -> String {
    LEADING_ARTICLE.replace(word.trim(), "").into_owned()
}

pub fn hint_for<'a>(table: &'a BTreeMap<String, String>, word: &str) -> Option<&'a str> {
    table.get(&strip_article(word)).map(String::as_str)
}

/// `(word, ipa)` for every vocabulary entry that has a known pronunciation,
/// in vocabulary order.
pub fn slide_hints(table: &BTreeMap<String, String>, vocabulary: &[String]) -> Vec<(String, String)> {
    vocabulary
        .iter()
        .filter_map(|word| hint_for(table, word).map(|ipa| (word.clone(), ipa.to_string())))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn table() -> BTreeMap<String, String> {
        let mut table = BTreeMap::new();
        table.insert("Vater".to_string(), "[ˈfaːtɐ]".to_string());
        table.insert("ich".to_string(), "[ɪç]".to_string());
        table.insert("Wasser".to_string(), "[ˈvasɐ]".to_string());
        table
    }

    #[test]
    fn test_strip_article() {
        assert_eq!(strip_article("der Vater"), "Vater");
        assert_eq!(strip_article("das  Wasser"), "Wasser");
        assert_eq!(strip_article(" ich "), "ich");
        assert_eq!(strip_article("Der Vater"), "Der Vater");
        assert_eq!(strip_article("dieser"), "dieser");
    }

    #[test]
    fn test_hint_lookup() {
        let table = table();
        assert_eq!(hint_for(&table, "der Vater"), Some("[ˈfaːtɐ]"));
        assert_eq!(hint_for(&table, "ich"), Some("[ɪç]"));
        assert_eq!(hint_for(&table, "die Mutter"), None);
    }

    #[test]
    fn test_slide_hints_skip_unknown_words() {
        let vocabulary = vec![
            "das Wasser".to_string(),
            "das Brot".to_string(),
            "ich".to_string(),
        ];
        let hints = slide_hints(&table(), &vocabulary);
        assert_eq!(
            hints,
            vec![
                ("das Wasser".to_string(), "[ˈvasɐ]".to_string()),
                ("ich".to_string(), "[ɪç]".to_string()),
            ]
        );
    }
}
