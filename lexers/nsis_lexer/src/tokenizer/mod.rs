//! The primary pass: a per-byte lexical state machine.
//!
//! One call styles one analysis window. The machine is flat — every
//! state transition is handled at the top of the scan loop, and nested
//! constructs (variable interpolation inside a string) return through a
//! single saved outer style rather than recursion, so each step is a
//! plain function of the current byte, the state, and a handful of
//! logical-line counters.
//!
//! Per iteration, in order: the current state's exit/interior handling;
//! the Default-state dispatch (which may run in the same iteration a
//! token just ended, so the terminating byte is classified immediately);
//! the visible-character count; line-end bookkeeping (continuation flag
//! and line-type stored per line); advance. Substate exits that need to
//! re-examine the current byte, or that already advanced past it, skip
//! the rest of their iteration.
//!
//! # Restartability
//!
//! The window must start at a line boundary. The caller passes the
//! style in effect just before the window (`Default` at document
//! start), and the previous line's persisted state is read from the
//! store: a continuation line primes the visible-character count to one
//! and inherits the logical line's type instead of recomputing it.

use nsis_lexer_core::{LineState, LineType, SourceWindow, Style};

use crate::context::StyleContext;
use crate::host::LineStateStore;
use crate::keywords::KeywordSet;

/// Capacity of the lowercased token buffer. Longer identifiers are
/// silently truncated — intentional data loss, not an error.
const MAX_WORD_LEN: usize = 128;

/// Tokenize one window, returning one [`Style`] per window byte and
/// storing a [`LineState`] for every line terminated inside the window.
pub fn tokenize(
    window: &SourceWindow,
    init_style: Style,
    keywords: &KeywordSet,
    line_states: &mut dyn LineStateStore,
) -> Vec<Style> {
    let scan = Scan::new(window, init_style, keywords, line_states);
    scan.run(line_states)
}

/// Transient state of one tokenize call.
struct Scan<'a, 'k> {
    sc: StyleContext<'a>,
    keywords: &'k KeywordSet,
    /// Non-whitespace bytes seen on the logical line so far. Primed to
    /// one when restarting onto a continuation line, so leading-token
    /// classification stays disabled there.
    visible_chars: u32,
    /// The previous physical line ended with a continuation marker.
    line_continuation: bool,
    /// Pending type of the logical line, stored at each line end.
    line_type: LineType,
    /// Style to resume when a variable-interpolation substate ends.
    variable_outer: Style,
    /// A `.` was consumed in the open numeric literal.
    seen_dot: bool,
}

impl<'a, 'k> Scan<'a, 'k> {
    fn new(
        window: &'a SourceWindow,
        init_style: Style,
        keywords: &'k KeywordSet,
        line_states: &dyn LineStateStore,
    ) -> Self {
        let mut scan = Self {
            sc: StyleContext::new(window, init_style),
            keywords,
            visible_chars: 0,
            line_continuation: false,
            line_type: LineType::None,
            variable_outer: Style::Default,
            seen_dot: false,
        };
        if window.first_line() > 0 {
            let prev = LineState::from_raw(line_states.line_state(window.first_line() - 1));
            scan.line_continuation = prev.continuation();
            if scan.line_continuation {
                scan.visible_chars += 1;
                scan.line_type = prev.line_type();
            }
        }
        scan
    }

    fn run(mut self, line_states: &mut dyn LineStateStore) -> Vec<Style> {
        while self.sc.more() {
            if self.transition() {
                // The substate consumed its own bookkeeping: either it
                // already advanced past the bytes it styled, or it wants
                // the current byte reprocessed under the resumed state.
                continue;
            }
            if self.sc.state() == Style::Default {
                self.dispatch();
            }
            if !is_space(self.sc.ch()) {
                self.visible_chars += 1;
            }
            if self.sc.at_line_end() {
                self.finish_line(line_states);
            }
            self.sc.forward();
        }
        self.sc.complete()
    }

    /// Handle the current state's interior/exit rules. Returns `true`
    /// when the rest of the iteration must be skipped.
    fn transition(&mut self) -> bool {
        match self.sc.state() {
            Style::Operator => {
                self.sc.set_state(Style::Default);
                false
            }
            Style::Number => {
                self.number();
                false
            }
            Style::Identifier => {
                self.identifier_exit();
                false
            }
            state if state.is_string() => self.string(state),
            Style::VariableBare => {
                if !is_ident_char(self.sc.ch()) {
                    // The terminating byte is not consumed; reprocess it
                    // under the resumed style.
                    self.sc.set_state(self.variable_outer);
                    return true;
                }
                false
            }
            Style::VariableBrace | Style::VariableParen => {
                let close = if self.sc.state() == Style::VariableBrace {
                    b'}'
                } else {
                    b')'
                };
                if self.sc.ch() == close {
                    self.sc.forward_set_state(self.variable_outer);
                    return true;
                }
                false
            }
            Style::CommentLine => {
                if self.sc.at_line_start() && !self.line_continuation {
                    self.sc.set_state(Style::Default);
                }
                false
            }
            Style::CommentBlock => {
                if self.sc.matches(b'*', b'/') {
                    self.sc.forward();
                    self.sc.forward_set_state(Style::Default);
                }
                false
            }
            _ => false,
        }
    }

    /// Default-state dispatch over the current byte.
    fn dispatch(&mut self) {
        let ch = self.sc.ch();
        if ch == b';' || ch == b'#' {
            self.sc.set_state(Style::CommentLine);
            if self.visible_chars == 0 {
                self.line_type = LineType::Comment;
            }
        } else if self.sc.matches(b'/', b'*') {
            self.sc.set_state(Style::CommentBlock);
            self.sc.forward();
        } else if ch == b'\'' {
            self.sc.set_state(Style::StringSingle);
        } else if ch == b'"' {
            self.sc.set_state(Style::StringDouble);
        } else if ch == b'`' {
            self.sc.set_state(Style::StringBacktick);
        } else if is_number_start(ch, self.sc.ch_next()) {
            self.seen_dot = ch == b'.';
            self.sc.set_state(Style::Number);
        } else if ch == b'$' && is_ident_char(self.sc.ch_next()) {
            self.variable_outer = Style::Default;
            self.sc.set_state(Style::VariableBare);
        } else if ch == b'$' && (self.sc.ch_next() == b'{' || self.sc.ch_next() == b'(') {
            self.variable_outer = Style::Default;
            self.sc.set_state(if self.sc.ch_next() == b'{' {
                Style::VariableBrace
            } else {
                Style::VariableParen
            });
        } else if (self.visible_chars == 0 && ch == b'!') || is_ident_start(ch) {
            self.sc.set_state(Style::Identifier);
        } else if is_operator(ch) {
            self.sc.set_state(Style::Operator);
        }
    }

    /// Interior/exit rule of the Number state.
    fn number(&mut self) {
        let ch = self.sc.ch();
        if ch.is_ascii_digit() {
            return;
        }
        if ch == b'.' && !self.seen_dot {
            self.seen_dot = true;
            return;
        }
        // A terminating percent sign belongs to the literal.
        if ch == b'%' {
            self.sc.forward();
        }
        self.sc.set_state(Style::Default);
    }

    /// Exit rule of the Identifier state: reclassify the completed run.
    fn identifier_exit(&mut self) {
        if is_ident_char(self.sc.ch()) {
            return;
        }
        let mut buf = [0u8; MAX_WORD_LEN];
        let text = self.sc.current_lowered(&mut buf);
        if text.starts_with('!') {
            self.sc.change_state(Style::Preprocessor);
            if text == "!include" {
                self.line_type = LineType::Include;
            } else if text == "!define" {
                self.line_type = LineType::Define;
            }
        } else if self.visible_chars == self.sc.length_current() {
            // The token is the entire visible content of the logical
            // line so far — the position where keywords, labels, and
            // instructions are distinguished.
            if self.keywords.contains(text) {
                self.sc.change_state(Style::Keyword);
            } else if self.sc.ch() == b':' && self.sc.ch_next() != b':' {
                self.sc.change_state(Style::Label);
            } else {
                self.sc.change_state(Style::Instruction);
            }
        } else {
            // A bare identifier past the leading position carries no
            // distinguished style.
            self.sc.change_state(Style::Default);
        }
        self.sc.set_state(Style::Default);
    }

    /// Interior rules shared by the three string flavors. Returns `true`
    /// when the iteration's bookkeeping must be skipped.
    fn string(&mut self, style: Style) -> bool {
        if self.sc.ch() == b'$' {
            let next = self.sc.ch_next();
            if next == b'$' || (next == b'\\' && is_escape_char(self.sc.ch_at(2))) {
                // `$$` spans two bytes, `$\x` three; resume the string
                // style on the byte after the escape.
                self.sc.set_state(Style::EscapeChar);
                self.sc.forward_n(if next == b'\\' { 2 } else { 1 });
                self.sc.forward_set_state(style);
                return true;
            }
            if next == b'{' || next == b'(' {
                self.variable_outer = style;
                self.sc.set_state(if next == b'{' {
                    Style::VariableBrace
                } else {
                    Style::VariableParen
                });
            } else if is_ident_char(next) {
                self.variable_outer = style;
                self.sc.set_state(Style::VariableBare);
            }
        } else if self.sc.at_line_start() {
            // Unterminated-string recovery: a bare line start closes the
            // string unless the previous line continued it.
            if !self.line_continuation {
                self.sc.set_state(Style::Default);
            }
        } else if Some(self.sc.ch()) == style.string_terminator() {
            self.sc.forward_set_state(Style::Default);
        }
        false
    }

    /// Line-end bookkeeping: store the line's state and reset the
    /// logical-line counters unless the line continues.
    fn finish_line(&mut self, line_states: &mut dyn LineStateStore) {
        self.line_continuation = self.sc.line_ends_with(b'\\');
        let state = LineState::new(self.line_continuation, self.line_type);
        line_states.set_line_state(self.sc.line(), state.raw());
        if !self.line_continuation {
            self.visible_chars = 0;
            self.line_type = LineType::None;
        }
    }
}

// ── Byte classification ──────────────────────────────────────────────

/// 256-byte lookup table for identifier constituents: a-z, A-Z, 0-9,
/// underscore. Table lookup replaces the multi-range `matches!` with a
/// single indexed read; the sentinel byte maps to `false`.
#[allow(
    clippy::cast_possible_truncation,
    reason = "loop counter i is 0..=255, always fits in u8"
)]
static IS_IDENT_CHAR_TABLE: [bool; 256] = {
    let mut table = [false; 256];
    let mut i = 0usize;
    while i < 256 {
        table[i] = matches!(i as u8, b'a'..=b'z' | b'A'..=b'Z' | b'0'..=b'9' | b'_');
        i += 1;
    }
    table
};

/// Identifier constituent: ASCII letter, digit, or underscore.
#[inline]
fn is_ident_char(b: u8) -> bool {
    IS_IDENT_CHAR_TABLE[b as usize]
}

/// Identifier start: ASCII letter or underscore.
#[inline]
fn is_ident_start(b: u8) -> bool {
    b.is_ascii_alphabetic() || b == b'_'
}

/// Start of a decimal literal: a digit, or `.`/`-` directly before one.
#[inline]
fn is_number_start(b: u8, next: u8) -> bool {
    b.is_ascii_digit() || ((b == b'.' || b == b'-') && next.is_ascii_digit())
}

/// Letters valid after `$\` inside a string, plus the quote characters.
#[inline]
fn is_escape_char(b: u8) -> bool {
    matches!(b, b'n' | b'r' | b't' | b'\'' | b'"' | b'`')
}

/// Operator punctuation in Default state.
#[inline]
fn is_operator(b: u8) -> bool {
    matches!(
        b,
        b'%' | b'^'
            | b'&'
            | b'*'
            | b'('
            | b')'
            | b'-'
            | b'+'
            | b'='
            | b'|'
            | b'{'
            | b'}'
            | b'['
            | b']'
            | b':'
            | b';'
            | b'<'
            | b'>'
            | b','
            | b'/'
            | b'?'
            | b'!'
            | b'.'
            | b'~'
    )
}

/// Whitespace for the visible-character count: space and the C0 spacing
/// controls (tab through carriage return).
#[inline]
fn is_space(b: u8) -> bool {
    b == b' ' || (0x09..=0x0D).contains(&b)
}
