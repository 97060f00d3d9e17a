use serde::{Deserialize, Serialize};
use std::collections::{BTreeSet, HashSet};
use crate::utils::{caption_words, distinct_caption_words};

/// One guessing round's content: an image and the caption hidden behind it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RoundItem {
    #[serde(rename = "url")]
    pub image_url: String,
    #[serde(rename = "title")]
    pub full_title: String,
    #[serde(rename = "truncatedTitle", alias = "truncated_title", default)]
    pub display_title: String,
}

impl RoundItem {
    pub fn new<U, T, D>(image_url: U, full_title: T, display_title: D) -> Self
    where
        U: Into<String>,
        T: Into<String>,
        D: Into<String>,
    {
        Self {
            image_url: image_url.into(),
            full_title: full_title.into(),
            display_title: display_title.into(),
        }
    }

    pub fn words(&self) -> Vec<String> {
        caption_words(&self.full_title)
    }

    pub fn distinct_words(&self) -> HashSet<String> {
        distinct_caption_words(&self.full_title)
    }

    pub fn contains_word(&self, normalized: &str) -> bool {
        self.words().iter().any(|word| word == normalized)
    }
}

/// Words already credited in the current round.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct GuessedWords {
    words: BTreeSet<String>,
}

impl GuessedWords {
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns false when the word was already present.
    pub fn insert<S: Into<String>>(&mut self, word: S) -> bool {
        self.words.insert(word.into())
    }

    pub fn contains(&self, word: &str) -> bool {
        self.words.contains(word)
    }

    pub fn len(&self) -> usize {
        self.words.len()
    }

    pub fn is_empty(&self) -> bool {
        self.words.is_empty()
    }

    pub fn clear(&mut self) {
        self.words.clear();
    }

    pub fn iter(&self) -> impl Iterator<Item = &String> {
        self.words.iter()
    }

    pub fn joined(&self, separator: &str) -> String {
        self.words.iter().map(String::as_str).collect::<Vec<_>>().join(separator)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_round_item_wire_names() {
        let json = r#"{"url": "https://img/1", "title": "Red car fast", "truncatedTitle": "Red car..."}"#;
        let item: RoundItem = serde_json::from_str(json).unwrap();

        assert_eq!(item.image_url, "https://img/1");
        assert_eq!(item.full_title, "Red car fast");
        assert_eq!(item.display_title, "Red car...");
    }

    #[test]
    fn test_round_item_snake_case_alias() {
        let json = r#"{"url": "u", "title": "t", "truncated_title": "p"}"#;
        let item: RoundItem = serde_json::from_str(json).unwrap();
        assert_eq!(item.display_title, "p");
    }

    #[test]
    fn test_round_item_words() {
        let item = RoundItem::new("u", "The dog chased the Ball", "");

        assert_eq!(item.words().len(), 5);
        assert_eq!(item.distinct_words().len(), 4);
        assert!(item.contains_word("ball"));
        assert!(!item.contains_word("Ball"));
    }

    #[test]
    fn test_guessed_words_set_semantics() {
        let mut guessed = GuessedWords::new();

        assert!(guessed.insert("red"));
        assert!(!guessed.insert("red"));
        assert!(guessed.insert("car"));
        assert_eq!(guessed.len(), 2);
        assert_eq!(guessed.joined(", "), "car, red");

        guessed.clear();
        assert!(guessed.is_empty());
    }
}
