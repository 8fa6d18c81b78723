/// テキスト正規化
/// Collapses every whitespace run (spaces, tabs, newlines, any Unicode
/// whitespace) into a single space, trims both ends and lowercases.
///
/// Idempotent: `normalize(&normalize(t)) == normalize(t)`.
///
/// # Examples
/// ```
/// use word_frequency_engine::utils::normalizer::normalize;
/// assert_eq!(normalize("  Hello\t\nWORLD  "), "hello world");
/// ```
pub fn normalize(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    for word in text.split_whitespace() {
        if !out.is_empty() {
            out.push(' ');
        }
        out.push_str(&word.to_lowercase());
    }
    out
}

/// Splits text on whitespace and keeps tokens of at least `min_len` chars.
/// Length is counted in `char`s, not bytes.
pub fn tokenize(text: &str, min_len: usize) -> Vec<String> {
    text.split_whitespace()
        .filter(|token| token.chars().count() >= min_len)
        .map(str::to_owned)
        .collect()
}

/// Whether `word` could have come out of `tokenize(normalize(..), min_len)`:
/// already normalized, a single token, and long enough.
pub fn is_token(word: &str, min_len: usize) -> bool {
    !word.contains(char::is_whitespace)
        && word.chars().count() >= min_len
        && normalize(word) == word
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn normalize_collapses_and_lowercases() {
        assert_eq!(normalize("Python\tIS\n\n  fun "), "python is fun");
        assert_eq!(normalize(""), "");
        assert_eq!(normalize(" \t\r\n "), "");
    }

    #[test]
    fn normalize_applies_final_sigma() {
        assert_eq!(normalize("ΟΔΟΣ"), "οδος");
        assert_eq!(normalize("ΟΔΟΣ ΣΟΦΟΣ"), "οδος σοφος");
    }

    #[test]
    fn is_token_matches_pipeline_output() {
        assert!(is_token("hello", 2));
        assert!(!is_token("Hello", 2));
        assert!(!is_token("hello world", 2));
        assert!(!is_token("x", 2));
        assert!(!is_token("", 1));
    }

    #[test]
    fn tokenize_filters_short_tokens_and_keeps_order() {
        let tokens = tokenize("python is fun to learn python", 3);
        assert_eq!(tokens, vec!["python", "fun", "learn", "python"]);
    }

    #[test]
    fn tokenize_counts_chars_not_bytes() {
        // "é" is two bytes but one char
        assert_eq!(tokenize("é éé", 2), vec!["éé"]);
    }

    proptest! {
        #[test]
        fn normalize_is_idempotent(text in "\\PC*") {
            let once = normalize(&text);
            prop_assert_eq!(normalize(&once), once);
        }

        #[test]
        fn tokens_are_clean(text in "[a-zA-Z \t\n]{0,64}", min_len in 1usize..5) {
            for token in tokenize(&normalize(&text), min_len) {
                prop_assert!(is_token(&token, min_len));
                prop_assert!(token.chars().count() >= min_len);
                prop_assert!(!token.contains(char::is_whitespace));
                prop_assert_eq!(token.to_lowercase(), token.clone());
            }
        }
    }
}
