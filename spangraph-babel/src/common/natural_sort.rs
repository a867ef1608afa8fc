//! Natural ("human") ordering of identifiers.
//!
//! Markable identities embed decimal counters, so `markable_2` has to come
//! before `markable_10`. A key alternates text runs and digit runs, starting
//! with a (possibly empty) text run, which keeps the run kinds aligned between
//! any two keys.

use std::cmp::Ordering;

#[derive(Debug, Clone, PartialEq, Eq)]
enum Chunk<'a> {
    Text(&'a str),
    /// Digits with leading zeros removed
    Number(&'a str),
}

impl Ord for Chunk<'_> {
    fn cmp(&self, other: &Self) -> Ordering {
        match (self, other) {
            (Chunk::Text(a), Chunk::Text(b)) => a.cmp(b),
            (Chunk::Number(a), Chunk::Number(b)) => a.len().cmp(&b.len()).then_with(|| a.cmp(b)),
            (Chunk::Text(_), Chunk::Number(_)) => Ordering::Less,
            (Chunk::Number(_), Chunk::Text(_)) => Ordering::Greater,
        }
    }
}

impl PartialOrd for Chunk<'_> {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

/// Sort key comparing digit runs by value and text runs as strings.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord)]
pub struct NaturalKey<'a>(Vec<Chunk<'a>>);

impl<'a> NaturalKey<'a> {
    pub fn new(s: &'a str) -> Self {
        let mut chunks = Vec::new();
        let mut rest = s;
        loop {
            let text_end = rest.find(|c: char| c.is_ascii_digit()).unwrap_or(rest.len());
            chunks.push(Chunk::Text(&rest[..text_end]));
            rest = &rest[text_end..];
            if rest.is_empty() {
                break;
            }
            let digits_end = rest
                .find(|c: char| !c.is_ascii_digit())
                .unwrap_or(rest.len());
            let digits = rest[..digits_end].trim_start_matches('0');
            chunks.push(Chunk::Number(digits));
            rest = &rest[digits_end..];
        }
        NaturalKey(chunks)
    }
}

/// Compares two strings in natural order.
pub fn natural_cmp(a: &str, b: &str) -> Ordering {
    NaturalKey::new(a).cmp(&NaturalKey::new(b))
}

/// Sorts in place in natural order. Stable.
pub fn natural_sort<T: AsRef<str>>(items: &mut [T]) {
    items.sort_by(|a, b| natural_cmp(a.as_ref(), b.as_ref()));
}
