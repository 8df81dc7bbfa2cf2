//! Word n-gram tables
//!
//! An n-gram table maps every context of `n - 1` consecutive tokens to the
//! list of tokens that were seen right after it. Continuations are kept with
//! repetition, so that the length of a list doubles as the weight of the
//! context and picking a uniformly random continuation follows the observed
//! word frequencies.

use crate::{Result, Token};
use indexmap::IndexMap;
use rayon::prelude::*;
use serde::{ser::Serializer, Serialize};
use std::ops::RangeInclusive;

/// Continuations observed after each context, in order of first appearance
/// of the context
pub type Continuations<'text> = IndexMap<Box<str>, Vec<Token<'text>>>;

/// N-gram table of a given order
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct NgramTable<'text> {
    /// Number of tokens in each n-gram, including the continuation
    n: usize,

    /// Continuations of each context of `n - 1` tokens
    contexts: Continuations<'text>,
}
//
impl<'text> NgramTable<'text> {
    /// Tabulate all n-grams of order `n` from a token stream
    ///
    /// # Errors
    ///
    /// Orders below 2 are rejected, since they have no context.
    pub fn build(tokens: &[Token<'text>], n: usize) -> Result<Self> {
        anyhow::ensure!(n >= 2, "n-gram order must be at least 2, got {n}");
        let mut contexts = Continuations::new();
        for window in tokens.windows(n) {
            let (context, next) = window.split_at(n - 1);
            let key = context.join(" ");
            match contexts.get_mut(key.as_str()) {
                Some(continuations) => continuations.push(next[0]),
                None => {
                    contexts.insert(key.into_boxed_str(), vec![next[0]]);
                }
            }
        }
        log::debug!(
            "Tabulated {} {n}-grams into {} contexts",
            tokens.len().saturating_sub(n - 1),
            contexts.len()
        );
        Ok(Self { n, contexts })
    }

    /// Tabulate n-grams of every requested order
    ///
    /// Orders are independent from each other and are thus processed in
    /// parallel, but the output is sorted by increasing order.
    pub fn build_all(
        tokens: &[Token<'text>],
        orders: RangeInclusive<usize>,
        on_table: impl Fn(&NgramTable<'text>) + Sync,
    ) -> Result<Vec<Self>> {
        orders
            .into_par_iter()
            .map(|n| {
                let table = Self::build(tokens, n)?;
                on_table(&table);
                Ok(table)
            })
            .collect()
    }

    /// Number of tokens in each n-gram
    pub fn n(&self) -> usize {
        self.n
    }

    /// Number of distinct contexts
    pub fn len(&self) -> usize {
        self.contexts.len()
    }

    /// Truth that no n-gram was recorded
    pub fn is_empty(&self) -> bool {
        self.contexts.is_empty()
    }

    /// Iterate over contexts and their continuations, in order of first
    /// appearance of the context
    pub fn iter(&self) -> impl Iterator<Item = (&str, &[Token<'text>])> + '_ {
        self.contexts
            .iter()
            .map(|(context, continuations)| (&**context, continuations.as_slice()))
    }

    /// View of the first `limit` contexts of this table
    pub fn head(&self, limit: usize) -> NgramSample<'_, 'text> {
        NgramSample {
            table: self,
            indices: (0..limit.min(self.len())).collect(),
        }
    }

    /// View of the most popular contexts of this table
    ///
    /// Contexts that were seen less than `min_occurences` times are
    /// discarded, then the rest is sorted by decreasing number of
    /// occurences and truncated to `limit` entries. Contexts with the same
    /// number of occurences stay in order of first appearance.
    pub fn most_popular(&self, min_occurences: usize, limit: usize) -> NgramSample<'_, 'text> {
        let mut indices = (self.contexts.values().enumerate())
            .filter(|(_idx, continuations)| continuations.len() >= min_occurences)
            .map(|(idx, _continuations)| idx)
            .collect::<Vec<_>>();
        indices.sort_by_key(|&idx| std::cmp::Reverse(self.contexts[idx].len()));
        indices.truncate(limit);
        NgramSample {
            table: self,
            indices,
        }
    }
}
//
impl Serialize for NgramTable<'_> {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        self.contexts.serialize(serializer)
    }
}

/// Subset of the entries of an [`NgramTable`]
///
/// Serializes as a map, like the table itself.
#[derive(Clone, Debug)]
pub struct NgramSample<'table, 'text> {
    /// Table from which entries are taken
    table: &'table NgramTable<'text>,

    /// Positions of the selected entries in the table, in output order
    indices: Vec<usize>,
}
//
impl NgramSample<'_, '_> {
    /// Number of selected contexts
    pub fn len(&self) -> usize {
        self.indices.len()
    }
}
//
impl Serialize for NgramSample<'_, '_> {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_map(
            (self.indices.iter()).filter_map(|&idx| self.table.contexts.get_index(idx)),
        )
    }
}
