// Snowball stemming tokenizer — the default Tokenizer.
//
// Lowercases the text, splits it on Unicode word boundaries, drops stop words
// for the configured language and reduces every remaining word to its stem.
// Russian is the default because the article corpus this was built for is
// Russian-language news; English is available for mixed or English corpora.

use std::collections::HashSet;
use std::fmt;
use std::str::FromStr;

use rust_stemmers::{Algorithm, Stemmer};
use stop_words::{get, LANGUAGE};
use unicode_segmentation::UnicodeSegmentation;

use super::traits::Tokenizer;

/// Languages the stemming tokenizer has rule sets for.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Language {
    #[default]
    Russian,
    English,
}

impl Language {
    pub fn as_str(&self) -> &'static str {
        match self {
            Language::Russian => "russian",
            Language::English => "english",
        }
    }

    fn algorithm(&self) -> Algorithm {
        match self {
            Language::Russian => Algorithm::Russian,
            Language::English => Algorithm::English,
        }
    }

    fn stop_words(&self) -> Vec<String> {
        match self {
            Language::Russian => get(LANGUAGE::Russian),
            Language::English => get(LANGUAGE::English),
        }
    }
}

impl fmt::Display for Language {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl FromStr for Language {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "russian" | "ru" => Ok(Language::Russian),
            "english" | "en" => Ok(Language::English),
            other => Err(format!(
                "unsupported language '{other}' (expected 'russian' or 'english')"
            )),
        }
    }
}

/// Tokenizer backed by a Snowball stemmer and a stop word list.
pub struct StemmingTokenizer {
    stemmer: Stemmer,
    stop_words: HashSet<String>,
    keep_stop_words: bool,
}

impl StemmingTokenizer {
    pub fn new(language: Language) -> Self {
        Self {
            stemmer: Stemmer::create(language.algorithm()),
            stop_words: language.stop_words().into_iter().collect(),
            keep_stop_words: false,
        }
    }

    /// Keep stop words instead of dropping them before stemming.
    pub fn keep_stop_words(mut self, keep: bool) -> Self {
        self.keep_stop_words = keep;
        self
    }
}

impl Default for StemmingTokenizer {
    fn default() -> Self {
        Self::new(Language::default())
    }
}

impl Tokenizer for StemmingTokenizer {
    fn tokenize(&self, text: &str) -> Vec<String> {
        let lower = text.to_lowercase();
        lower
            .unicode_words()
            .filter(|word| self.keep_stop_words || !self.stop_words.contains(*word))
            .map(|word| self.stemmer.stem(word).into_owned())
            .filter(|stem| !stem.is_empty())
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_input_yields_no_tokens() {
        let tokenizer = StemmingTokenizer::default();
        assert!(tokenizer.tokenize("").is_empty());
        assert!(tokenizer.tokenize("   \n\t ").is_empty());
    }

    #[test]
    fn test_lowercases_and_strips_punctuation() {
        let tokenizer = StemmingTokenizer::new(Language::English).keep_stop_words(true);
        assert_eq!(tokenizer.tokenize("Goal! GOAL? goal."), vec!["goal", "goal", "goal"]);
    }

    #[test]
    fn test_english_variants_share_a_stem() {
        let tokenizer = StemmingTokenizer::new(Language::English).keep_stop_words(true);
        let a = tokenizer.tokenize("connection");
        let b = tokenizer.tokenize("connections");
        assert_eq!(a, b);
    }

    #[test]
    fn test_russian_variants_share_a_stem() {
        let tokenizer = StemmingTokenizer::new(Language::Russian);
        let a = tokenizer.tokenize("футбол");
        let b = tokenizer.tokenize("футбола");
        assert_eq!(a.len(), 1);
        assert_eq!(a, b);
    }

    #[test]
    fn test_stop_words_dropped_unless_kept() {
        let tokenizer = StemmingTokenizer::new(Language::English);
        assert!(tokenizer.tokenize("the").is_empty());

        let keeping = StemmingTokenizer::new(Language::English).keep_stop_words(true);
        assert_eq!(keeping.tokenize("the"), vec!["the"]);
    }

    #[test]
    fn test_is_deterministic() {
        let tokenizer = StemmingTokenizer::default();
        let text = "Сборная забила гол на последней минуте матча";
        assert_eq!(tokenizer.tokenize(text), tokenizer.tokenize(text));
    }

    #[test]
    fn test_invalid_utf8_is_a_tokenization_error() {
        let tokenizer = StemmingTokenizer::default();
        let err = tokenizer.tokenize_bytes(&[0xff, 0xfe, 0x00]).unwrap_err();
        assert!(matches!(err, crate::error::ClassifierError::Tokenization(_)));
    }

    #[test]
    fn test_language_parsing() {
        assert_eq!("ru".parse::<Language>().unwrap(), Language::Russian);
        assert_eq!("English".parse::<Language>().unwrap(), Language::English);
        assert!("klingon".parse::<Language>().is_err());
    }
}
