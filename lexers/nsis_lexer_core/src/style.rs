//! Syntactic classes assigned to scanned bytes.
//!
//! Every byte of an analyzed range receives exactly one [`Style`].
//! [`Style::Identifier`] is transient: it is the in-flight class of an
//! identifier-shaped run and is always reclassified when the run
//! completes (to `Keyword`, `Label`, `Instruction`, `Preprocessor`, or
//! back to `Default` for a bare non-leading word).

/// Syntactic class of a single scanned byte.
///
/// The discriminants are stable: hosts may persist styled buffers and
/// map classes to screen appearance by value.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
#[repr(u8)]
pub enum Style {
    /// Plain text: whitespace, line ends, and bytes no other class claims.
    #[default]
    Default = 0,
    /// Single punctuation byte from the operator set.
    Operator = 1,
    /// Decimal numeric literal, including a trailing `%`.
    Number = 2,
    /// In-flight identifier run. Never the final class of a completed token.
    Identifier = 3,
    /// Leading identifier found in the reserved-word set.
    Keyword = 4,
    /// Leading identifier followed by a single `:`.
    Label = 5,
    /// Leading identifier that is neither a keyword nor a label.
    Instruction = 6,
    /// `!`-prefixed directive word.
    Preprocessor = 7,
    /// `'`-delimited string.
    StringSingle = 8,
    /// `"`-delimited string.
    StringDouble = 9,
    /// `` ` ``-delimited string.
    StringBacktick = 10,
    /// `$$` self-escape or `$\x` backslash escape inside a string.
    EscapeChar = 11,
    /// `$name` variable reference.
    VariableBare = 12,
    /// `${name}` variable reference.
    VariableBrace = 13,
    /// `$(name)` variable reference.
    VariableParen = 14,
    /// `;` or `#` comment running to end of line.
    CommentLine = 15,
    /// `/* ... */` block comment.
    CommentBlock = 16,
}

impl Style {
    /// Returns `true` for the three string-delimiter classes.
    #[inline]
    pub fn is_string(self) -> bool {
        matches!(
            self,
            Style::StringSingle | Style::StringDouble | Style::StringBacktick
        )
    }

    /// Returns `true` for both comment classes.
    #[inline]
    pub fn is_comment(self) -> bool {
        matches!(self, Style::CommentLine | Style::CommentBlock)
    }

    /// The closing delimiter byte for a string class, `None` otherwise.
    #[inline]
    pub fn string_terminator(self) -> Option<u8> {
        match self {
            Style::StringSingle => Some(b'\''),
            Style::StringDouble => Some(b'"'),
            Style::StringBacktick => Some(b'`'),
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn string_classes_are_strings() {
        assert!(Style::StringSingle.is_string());
        assert!(Style::StringDouble.is_string());
        assert!(Style::StringBacktick.is_string());
        assert!(!Style::EscapeChar.is_string());
        assert!(!Style::Default.is_string());
    }

    #[test]
    fn comment_classes_are_comments() {
        assert!(Style::CommentLine.is_comment());
        assert!(Style::CommentBlock.is_comment());
        assert!(!Style::Keyword.is_comment());
    }

    #[test]
    fn terminators_match_delimiters() {
        assert_eq!(Style::StringSingle.string_terminator(), Some(b'\''));
        assert_eq!(Style::StringDouble.string_terminator(), Some(b'"'));
        assert_eq!(Style::StringBacktick.string_terminator(), Some(b'`'));
        assert_eq!(Style::VariableBrace.string_terminator(), None);
    }

    #[test]
    fn default_is_zero() {
        assert_eq!(Style::default() as u8, 0);
    }
}
