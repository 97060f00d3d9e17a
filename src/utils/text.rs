use std::collections::HashSet;

/// Lower-cases and trims a raw guess.
pub fn normalize_guess(raw: &str) -> String {
    raw.trim().to_lowercase()
}

/// Splits a caption into lower-cased words on whitespace. Repeated words are kept.
pub fn caption_words(caption: &str) -> Vec<String> {
    caption
        .split_whitespace()
        .map(|word| word.to_lowercase())
        .collect()
}

pub fn distinct_caption_words(caption: &str) -> HashSet<String> {
    caption_words(caption).into_iter().collect()
}

/// Cuts a caption down to `max_chars` characters, appending "..." when anything
/// was removed.
pub fn truncate_title(title: &str, max_chars: usize) -> String {
    if title.chars().count() <= max_chars {
        return title.to_string();
    }

    let mut truncated: String = title.chars().take(max_chars).collect();
    truncated.push_str("...");
    truncated
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_normalize_guess() {
        assert_eq!(normalize_guess("  Red \n"), "red");
        assert_eq!(normalize_guess("CAR"), "car");
        assert_eq!(normalize_guess("   "), "");
    }

    #[test]
    fn test_caption_words_keeps_duplicates() {
        let words = caption_words("The  dog and the\tCat");
        assert_eq!(words, vec!["the", "dog", "and", "the", "cat"]);
    }

    #[test]
    fn test_distinct_caption_words() {
        let words = distinct_caption_words("the dog and the cat");
        assert_eq!(words.len(), 4);
        assert!(words.contains("the"));
    }

    #[test]
    fn test_truncate_title() {
        assert_eq!(truncate_title("short", 10), "short");
        assert_eq!(truncate_title("exactly", 7), "exactly");
        assert_eq!(truncate_title("a longer caption", 8), "a longer...");
    }

    #[test]
    fn test_truncate_title_multibyte() {
        assert_eq!(truncate_title("café au lait", 4), "café...");
    }
}
