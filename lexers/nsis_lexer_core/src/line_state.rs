//! Persisted per-line state bitmask.
//!
//! The tokenizer stores one [`LineState`] per physical line through the
//! host's line-state store, and reads the previous line's state back when
//! an incremental pass restarts at a line boundary. Two facts survive
//! across re-analysis this way: whether the line ends with a
//! line-continuation marker, and the classification of the logical
//! line's first significant token.
//!
//! # Packing
//!
//! The host store holds a raw integer per line. The line type occupies
//! the low three bits as one-hot values (so the fold pass can mask and
//! compare them directly), and the continuation flag sits at bit 4:
//!
//! ```text
//! bit 4          bits 2..0
//! continuation   line type (0 none, 1 comment, 2 include, 4 define)
//! ```

use bitflags::bitflags;

bitflags! {
    /// Packed per-line state as stored in the host's line-state store.
    #[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
    pub struct LineState: u32 {
        /// Logical line starts with a `;`/`#` comment.
        const COMMENT = 1;
        /// Logical line starts with `!include`.
        const INCLUDE = 1 << 1;
        /// Logical line starts with `!define`.
        const DEFINE = 2 << 1;
        /// Physical line ends with a `\` continuation marker.
        const CONTINUATION = 1 << 4;
    }
}

/// Mask covering the one-hot line-type bits.
const TYPE_MASK: u32 = LineState::COMMENT.bits() | LineState::INCLUDE.bits() | LineState::DEFINE.bits();

/// Classification of a logical line's first significant token.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum LineType {
    /// No distinguished leading token.
    #[default]
    None,
    /// Leading `;`/`#` comment.
    Comment,
    /// Leading `!include` directive.
    Include,
    /// Leading `!define` directive.
    Define,
}

impl LineState {
    /// Build a line state from its two logical components.
    pub fn new(continuation: bool, line_type: LineType) -> Self {
        let mut state = match line_type {
            LineType::None => Self::empty(),
            LineType::Comment => Self::COMMENT,
            LineType::Include => Self::INCLUDE,
            LineType::Define => Self::DEFINE,
        };
        if continuation {
            state |= Self::CONTINUATION;
        }
        state
    }

    /// Reconstruct a line state from the host store's raw integer.
    ///
    /// Bits outside the defined set are dropped; a store that was never
    /// written for a line reads as zero, which decodes to no
    /// continuation and [`LineType::None`].
    #[inline]
    pub fn from_raw(raw: u32) -> Self {
        Self::from_bits_truncate(raw)
    }

    /// The raw integer handed to the host store.
    #[inline]
    pub fn raw(self) -> u32 {
        self.bits()
    }

    /// Whether the line ends with a continuation marker.
    #[inline]
    pub fn continuation(self) -> bool {
        self.contains(Self::CONTINUATION)
    }

    /// The line-type component.
    pub fn line_type(self) -> LineType {
        match self.bits() & TYPE_MASK {
            1 => LineType::Comment,
            2 => LineType::Include,
            4 => LineType::Define,
            _ => LineType::None,
        }
    }
}
