//! Text cleanup and tokenization

use crate::Token;
use clap::ValueEnum;
use regex::Regex;
use std::sync::OnceLock;

/// Set of characters that are considered to be part of words
#[derive(Clone, Copy, Debug, Default, Eq, Hash, PartialEq, ValueEnum)]
pub enum Charset {
    /// ASCII letters, digits and underscore
    #[default]
    Ascii,

    /// Any Unicode word character, which keeps accented letters
    Unicode,
}
//
impl Charset {
    /// Pattern matching every character that cleanup should remove
    fn unwanted_chars(self) -> &'static Regex {
        static ASCII: OnceLock<Regex> = OnceLock::new();
        static UNICODE: OnceLock<Regex> = OnceLock::new();
        match self {
            Self::Ascii => ASCII.get_or_init(|| {
                Regex::new(r"[^A-Za-z0-9_\s.!?,;:]").expect("static pattern should be valid")
            }),
            Self::Unicode => UNICODE.get_or_init(|| {
                Regex::new(r"[^\w\s.!?,;:]").expect("static pattern should be valid")
            }),
        }
    }
}

/// Pattern matching every character that the fast model cleanup removes
///
/// On top of the usual punctuation, hyphens and double quotes are kept, and
/// word characters are always Unicode ones.
fn fast_unwanted_chars() -> &'static Regex {
    static LAZY: OnceLock<Regex> = OnceLock::new();
    LAZY.get_or_init(|| Regex::new(r#"[^\w\s.!?,;:\-"]"#).expect("static pattern should be valid"))
}

/// Pattern matching runs of newlines
fn newlines() -> &'static Regex {
    static LAZY: OnceLock<Regex> = OnceLock::new();
    LAZY.get_or_init(|| Regex::new(r"\n+").expect("static pattern should be valid"))
}

/// Pattern matching runs of whitespace
fn whitespace() -> &'static Regex {
    static LAZY: OnceLock<Regex> = OnceLock::new();
    LAZY.get_or_init(|| Regex::new(r"\s+").expect("static pattern should be valid"))
}

/// Clean up raw text before tokenization
///
/// Newlines become spaces, characters that are neither word characters,
/// whitespace nor one of `. ! ? , ; :` are removed, everything is lowercased
/// and whitespace is collapsed into single spaces, then trimmed.
///
/// Punctuation from the allow-list is kept, so it will end up attached to
/// the neighboring tokens.
pub fn normalize(text: &str, charset: Charset) -> String {
    cleanup(text, charset.unwanted_chars())
}

/// Clean up raw text for the fast model
///
/// Same as [`normalize`] with the Unicode charset, except that `-` and `"`
/// are also kept. This does not depend on the configured charset.
pub fn normalize_fast(text: &str) -> String {
    cleanup(text, fast_unwanted_chars())
}

fn cleanup(text: &str, unwanted_chars: &Regex) -> String {
    if text.is_empty() {
        return String::new();
    }
    let text = newlines().replace_all(text, " ");
    let text = unwanted_chars.replace_all(&text, "");
    let text = text.to_lowercase();
    let text = whitespace().replace_all(&text, " ").trim().to_owned();
    log::trace!("Normalized text into {} bytes", text.len());
    text
}

/// Split normalized text into tokens
pub fn tokenize(text: &str) -> Vec<Token<'_>> {
    text.split(' ').filter(|token| !token.is_empty()).collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_input() {
        assert_eq!(normalize("", Charset::Ascii), "");
        assert_eq!(normalize("", Charset::Unicode), "");
        assert!(tokenize("").is_empty());
    }

    #[test]
    fn newlines_and_allowed_punctuation() {
        assert_eq!(normalize("A\n\nB!!  c", Charset::Ascii), "a b!! c");
        assert_eq!(normalize("Fim. Sim? Não; oi: ok, vá!", Charset::Unicode), "fim. sim? não; oi: ok, vá!");
    }

    #[test]
    fn disallowed_punctuation_is_dropped() {
        assert_eq!(normalize("a%b", Charset::Ascii), "ab");
        assert_eq!(normalize("\"Oh - dear\" (she said)", Charset::Ascii), "oh dear she said");
    }

    #[test]
    fn whitespace_is_collapsed_and_trimmed() {
        assert_eq!(normalize("  \t one \r\n\n two\t\tthree  ", Charset::Ascii), "one two three");
    }

    #[test]
    fn ascii_charset_drops_accents() {
        assert_eq!(normalize("Chá com o Chapeleiro", Charset::Ascii), "ch com o chapeleiro");
        assert_eq!(normalize("Chá com o Chapeleiro", Charset::Unicode), "chá com o chapeleiro");
    }

    #[test]
    fn fast_cleanup_keeps_accents_hyphens_and_quotes() {
        let text = "Não, disse o \"Bem-Vindo\" (ao coração)\n\nentão";
        assert_eq!(normalize_fast(text), "não, disse o \"bem-vindo\" ao coração então");
        assert_eq!(normalize(text, Charset::Ascii), "no, disse o bemvindo ao corao ento");
        assert_eq!(normalize_fast(""), "");
    }

    #[test]
    fn digits_and_underscore_are_word_characters() {
        assert_eq!(normalize("Cap_1 e 42", Charset::Ascii), "cap_1 e 42");
    }

    #[test]
    fn tokens_keep_attached_punctuation() {
        assert_eq!(tokenize("alice, disse ela."), ["alice,", "disse", "ela."]);
    }

    #[test]
    fn tokenize_skips_empty_tokens() {
        assert_eq!(tokenize("a  b"), ["a", "b"]);
        assert_eq!(tokenize(" a "), ["a"]);
    }
}
