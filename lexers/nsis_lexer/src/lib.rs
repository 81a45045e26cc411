//! Incremental lexer and structural folder for NSIS installer scripts.
//!
//! Two composable passes over a host-chosen analysis window:
//!
//! 1. [`tokenize`] — the lexical pass. Assigns exactly one [`Style`] to
//!    every byte and persists a per-line [`LineState`] (continuation
//!    flag + logical-line type) through the host's
//!    [`LineStateStore`], which is what makes the pass restartable at
//!    any line boundary.
//! 2. [`fold`] — the structural pass. Re-reads the styled stream plus
//!    the line states and computes a packed [`FoldLevel`] per line,
//!    written through the host's [`FoldLevelStore`] only when changed.
//!
//! The passes share the read-only styled-byte abstraction and nothing
//! else, so a host can re-fold without re-tokenizing when only
//! fold-affecting metadata changed.
//!
//! There is no error surface: malformed input is handled by recovery
//! rules (unterminated strings close at line starts, overlong words
//! truncate), never by failures.
//!
//! # Example
//!
//! ```
//! use nsis_lexer::{fold, tokenize, KeywordSet, MemoryFoldLevels, MemoryLineStates};
//! use nsis_lexer::{SourceWindow, Style};
//!
//! let keywords = KeywordSet::new(["Section", "SectionEnd"]);
//! let window = SourceWindow::whole("Section \"Demo\"\n  File demo.exe\nSectionEnd\n");
//! let mut states = MemoryLineStates::new();
//! let mut levels = MemoryFoldLevels::new();
//!
//! let styles = tokenize(&window, Style::Default, &keywords, &mut states);
//! assert_eq!(styles.len(), window.len() as usize);
//!
//! fold(&window, &styles, Style::Default, &states, &mut levels);
//! ```

mod context;
mod fold;
mod host;
mod keywords;
mod tokenizer;

pub use nsis_lexer_core::{Cursor, FoldLevel, LineState, LineType, SourceWindow, Style, FOLD_BASE};

pub use fold::fold;
pub use host::{FoldLevelStore, LineStateStore, MemoryFoldLevels, MemoryLineStates};
pub use keywords::KeywordSet;
pub use tokenizer::tokenize;

/// Stable language identifier under which the lexer registers.
pub const LANGUAGE: &str = "nsis";

/// Signature of the lexical entry point.
pub type TokenizeFn =
    fn(&SourceWindow, Style, &KeywordSet, &mut dyn LineStateStore) -> Vec<Style>;

/// Signature of the folding entry point.
pub type FoldFn = fn(&SourceWindow, &[Style], Style, &dyn LineStateStore, &mut dyn FoldLevelStore);

/// Registration record for a host lexer registry: the language
/// identifier plus the two entry points. This is the crate's entire
/// public surface from the host's point of view.
#[derive(Clone, Copy, Debug)]
pub struct LexerModule {
    /// Stable language identifier.
    pub language: &'static str,
    /// The lexical pass.
    pub tokenize: TokenizeFn,
    /// The folding pass.
    pub fold: FoldFn,
}

/// The NSIS lexer module.
pub const NSIS: LexerModule = LexerModule {
    language: LANGUAGE,
    tokenize,
    fold,
};

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn module_registers_under_the_language_id() {
        assert_eq!(NSIS.language, "nsis");
    }

    #[test]
    fn module_entry_points_are_callable() {
        let keywords = KeywordSet::new(["Section"]);
        let window = SourceWindow::whole("Section\n");
        let mut states = MemoryLineStates::new();
        let mut levels = MemoryFoldLevels::new();

        let styles = (NSIS.tokenize)(&window, Style::Default, &keywords, &mut states);
        assert_eq!(styles.len(), window.len() as usize);
        (NSIS.fold)(&window, &styles, Style::Default, &states, &mut levels);
    }
}
