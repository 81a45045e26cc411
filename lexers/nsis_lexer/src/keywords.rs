//! Case-insensitive reserved-word membership.
//!
//! The reserved-word list is host-supplied (loaded and parsed outside
//! this crate); the set only answers membership queries for candidate
//! identifiers that lead a logical line. Words are normalized to ASCII
//! lowercase once at construction so the tokenizer's already-lowered
//! word buffer can be matched without further allocation.

use rustc_hash::FxHashSet;

/// Case-insensitive set of reserved words.
#[derive(Clone, Debug, Default)]
pub struct KeywordSet {
    words: FxHashSet<Box<str>>,
}

impl KeywordSet {
    /// Build a set from the host's word list. Input case is irrelevant.
    pub fn new<I, S>(words: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        Self {
            words: words
                .into_iter()
                .map(|word| word.as_ref().to_ascii_lowercase().into_boxed_str())
                .collect(),
        }
    }

    /// Membership test.
    ///
    /// # Contract
    ///
    /// `word` must already be ASCII lowercase. The tokenizer's bounded
    /// lowercase buffer guarantees this for its own queries.
    #[inline]
    pub fn contains(&self, word: &str) -> bool {
        self.words.contains(word)
    }

    /// Number of distinct words in the set.
    pub fn len(&self) -> usize {
        self.words.len()
    }

    /// Returns `true` if the set holds no words.
    pub fn is_empty(&self) -> bool {
        self.words.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn construction_lowercases() {
        let set = KeywordSet::new(["Section", "SectionEnd", "FUNCTION"]);
        assert!(set.contains("section"));
        assert!(set.contains("sectionend"));
        assert!(set.contains("function"));
        assert!(!set.contains("pageex"));
    }

    #[test]
    fn duplicate_words_collapse() {
        let set = KeywordSet::new(["Var", "var", "VAR"]);
        assert_eq!(set.len(), 1);
    }

    #[test]
    fn empty_set() {
        let set = KeywordSet::new(std::iter::empty::<&str>());
        assert!(set.is_empty());
        assert!(!set.contains("section"));
    }
}
