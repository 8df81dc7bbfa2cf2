//! Selection of the seed words that the generator starts from

use crate::{text::Charset, Token};
use indexmap::IndexMap;
use std::cmp::Reverse;

/// Words that are relevant to the Alice books, whether or not the corpus
/// actually uses them
pub const CURATED_WORDS: &[&str] = &[
    "alice", "coelho", "chapeleiro", "gato", "rainha", "rei", "carta", "cartas", "chá", "mesa",
    "jardim", "buraco", "toca", "relógio", "tempo", "mundo", "país", "maravilhas", "espelho",
    "sonho", "dormindo", "acordar", "pequena", "grande", "crescer", "diminuir", "poção", "beber",
    "comer", "porta", "chave", "curiosa", "estranha", "estranho", "medo", "coragem",
];

/// Shorter list of relevant words used by the fast model
pub const FAST_CURATED_WORDS: &[&str] = &[
    "alice", "coelho", "chapeleiro", "gato", "rainha", "rei", "chá", "mesa", "jardim", "espelho",
    "sonho", "tempo", "país", "maravilhas", "pequena", "grande", "porta", "chave", "através",
    "então", "coração", "não", "também", "estava", "havia", "disse", "viu", "pensou",
];

/// Main characters, whose presence among seed words is reported
pub const FEATURED_WORDS: &[&str] = &["alice", "coelho", "chapeleiro", "gato", "rainha"];

/// Main characters as far as the fast model is concerned
pub const FAST_FEATURED_WORDS: &[&str] = &["alice", "coelho", "gato"];

/// Number of occurences of each token, in order of first appearance
#[derive(Clone, Debug, Default, Eq, PartialEq)]
pub struct WordFrequencies<'text>(IndexMap<Token<'text>, usize>);
//
impl<'text> WordFrequencies<'text> {
    /// Count token occurences
    ///
    /// Tokens are compared as-is, so "alice" and "alice." are different words.
    pub fn count(tokens: &[Token<'text>]) -> Self {
        let mut counts = IndexMap::new();
        for &token in tokens {
            *counts.entry(token).or_insert(0) += 1;
        }
        log::debug!("Counted {} distinct words", counts.len());
        Self(counts)
    }

    /// Number of occurences of a word
    pub fn get(&self, word: &str) -> usize {
        self.0.get(word).copied().unwrap_or(0)
    }

    /// Number of distinct words
    pub fn unique_words(&self) -> usize {
        self.0.len()
    }

    /// Words and occurence counts, by decreasing count
    ///
    /// Words with equal counts stay in order of first appearance.
    pub fn by_decreasing_count(&self) -> Vec<(Token<'text>, usize)> {
        let mut words = (self.0.iter())
            .map(|(&word, &count)| (word, count))
            .collect::<Vec<_>>();
        words.sort_by_key(|&(_word, count)| Reverse(count));
        words
    }

    /// Look up a word, getting back a reference with the corpus' lifetime
    fn find(&self, word: &str) -> Option<(Token<'text>, usize)> {
        self.0.get_key_value(word).map(|(&word, &count)| (word, count))
    }
}

/// Kinds of words that qualify as generic popular seed words
#[derive(Clone, Copy, Debug, Eq, Hash, PartialEq)]
pub enum WordShape {
    /// Only lowercase ASCII letters
    AsciiLowercase,

    /// Lowercase ASCII letters and Portuguese accented lowercase letters
    LatinLowercase,
}
//
impl WordShape {
    /// Accented letters that are accepted by [`WordShape::LatinLowercase`]
    const PORTUGUESE_ACCENTS: &'static str = "áàâãéèêíìîóòôõúùûç";

    /// Truth that a word has this shape
    pub fn matches(self, word: &str) -> bool {
        !word.is_empty()
            && word.chars().all(|c| {
                c.is_ascii_lowercase()
                    || (self == Self::LatinLowercase && Self::PORTUGUESE_ACCENTS.contains(c))
            })
    }
}

/// Seed word selection rules
#[derive(Clone, Copy, Debug, Eq, Hash, PartialEq)]
pub struct SeedProfile {
    /// Relevant words that are kept if common enough
    pub curated: &'static [&'static str],

    /// Curated words must occur strictly more often than this
    pub curated_min_exceeded: usize,

    /// Number of most frequent words that are considered as generic seeds
    pub top_window: usize,

    /// Maximal number of generic seeds that are kept from this window
    pub top_kept: usize,

    /// Generic seeds must be strictly longer than this, in characters
    pub min_len_exceeded: usize,

    /// Shape that generic seeds must have
    pub shape: WordShape,
}
//
impl SeedProfile {
    /// Rules used for the main outputs
    pub const STANDARD: Self = Self {
        curated: CURATED_WORDS,
        curated_min_exceeded: 3,
        top_window: 30,
        top_kept: 15,
        min_len_exceeded: 3,
        shape: WordShape::AsciiLowercase,
    };

    /// Rules used for the fast model
    pub const FAST: Self = Self {
        curated: FAST_CURATED_WORDS,
        curated_min_exceeded: 2,
        top_window: 20,
        top_kept: 15,
        min_len_exceeded: 3,
        shape: WordShape::LatinLowercase,
    };

    /// Rules used for the main outputs, adapted to the cleanup charset
    ///
    /// Accented letters only survive cleanup with the unicode charset, and
    /// popular accented words are then accepted as generic seeds.
    pub fn standard(charset: Charset) -> Self {
        let shape = match charset {
            Charset::Ascii => WordShape::AsciiLowercase,
            Charset::Unicode => WordShape::LatinLowercase,
        };
        Self {
            shape,
            ..Self::STANDARD
        }
    }

    /// Pick seed words
    ///
    /// This is the union of curated words that are common enough, and of
    /// the most popular words that look like proper words, sorted in
    /// alphabetical order.
    pub fn select<'text>(&self, frequencies: &WordFrequencies<'text>) -> Vec<Token<'text>> {
        let curated = (self.curated.iter())
            .filter_map(|word| frequencies.find(word))
            .filter(|&(_word, count)| count > self.curated_min_exceeded)
            .map(|(word, _count)| word);
        let popular = (frequencies.by_decreasing_count().into_iter())
            .take(self.top_window)
            .map(|(word, _count)| word)
            .filter(|word| {
                word.chars().count() > self.min_len_exceeded && self.shape.matches(word)
            })
            .take(self.top_kept);

        let mut seeds = curated.chain(popular).collect::<Vec<_>>();
        seeds.sort_unstable();
        seeds.dedup();
        log::debug!("Selected seed words {seeds:?}");
        seeds
    }
}

/// Number of seed words that belong to a featured word list
pub fn count_featured(seeds: &[Token<'_>], featured: &[&str]) -> usize {
    seeds.iter().filter(|seed| featured.contains(seed)).count()
}
