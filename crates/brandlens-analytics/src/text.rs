//! Text cleaning shared by the sentiment and topic strategies.

use regex::Regex;

/// Strip URLs, @-mentions, and `#` markers (keeping the tag word), then
/// lower-case. This is the preprocessing both topic strategies tokenize from.
pub(crate) fn strip_noise(text: &str) -> String {
    let re = Regex::new(r"http\S+|@\w+|#").expect("valid noise regex");
    re.replace_all(&text.to_lowercase(), "").into_owned()
}

/// Clean text for lexicon scoring: URLs, mentions, and hashtags removed
/// entirely, then digits, punctuation, and non-ASCII dropped.
pub(crate) fn clean_for_lexicon(text: &str) -> String {
    let re = Regex::new(r"http\S+|@\w+|#\w+").expect("valid lexicon-clean regex");
    let stripped = re.replace_all(text, " ");

    let mut out = String::with_capacity(stripped.len());
    for c in stripped.chars() {
        if c.is_ascii_alphabetic() || c == ' ' {
            out.push(c.to_ascii_lowercase());
        } else if c.is_whitespace() {
            out.push(' ');
        }
    }
    out
}

/// Tokenize cleaned text into word tokens (`\w+` runs).
pub(crate) fn word_tokens(cleaned: &str) -> Vec<String> {
    let re = Regex::new(r"\w+").expect("valid token regex");
    re.find_iter(cleaned)
        .map(|m| m.as_str().to_string())
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn strip_noise_removes_urls_and_mentions() {
        let out = strip_noise("Check https://t.co/abc from @netflix #Stranger");
        assert_eq!(out, "check  from  stranger");
    }

    #[test]
    fn strip_noise_keeps_hashtag_word() {
        assert_eq!(strip_noise("#Wednesday vibes"), "wednesday vibes");
    }

    #[test]
    fn clean_for_lexicon_drops_hashtags_digits_punctuation() {
        let out = clean_for_lexicon("Love it!! 100% #hype @fan https://x.co/q ça");
        assert_eq!(out.split_whitespace().collect::<Vec<_>>(), vec!["love", "it", "a"]);
    }

    #[test]
    fn word_tokens_splits_on_non_word() {
        assert_eq!(
            word_tokens("hello, world again"),
            vec!["hello", "world", "again"]
        );
    }
}
