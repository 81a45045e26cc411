//! Styling driver shared by the tokenizer's state handlers.
//!
//! Wraps a [`Cursor`] and assigns styles as runs: the open run starts
//! where the previous state change happened and is flushed into the
//! output buffer lazily, when the next state change closes it. Lazy
//! flushing is what makes retroactive reclassification possible — an
//! identifier run is styled `Identifier` while open and rewritten to
//! its final class in one step when the token completes.

use nsis_lexer_core::{Cursor, SourceWindow, Style};

/// Run-based style emitter over one analysis window.
pub(crate) struct StyleContext<'a> {
    win: &'a SourceWindow,
    cursor: Cursor<'a>,
    /// Style of the open run.
    state: Style,
    /// Window-relative start of the open run.
    run_start: u32,
    /// Flushed styles; always `run_start` entries long between calls.
    styles: Vec<Style>,
}

impl<'a> StyleContext<'a> {
    pub(crate) fn new(win: &'a SourceWindow, init_style: Style) -> Self {
        Self {
            win,
            cursor: win.cursor(),
            state: init_style,
            run_start: 0,
            styles: Vec::with_capacity(win.len() as usize),
        }
    }

    /// Style of the open run.
    #[inline]
    pub(crate) fn state(&self) -> Style {
        self.state
    }

    /// Close the open run at the current byte and start a new one.
    pub(crate) fn set_state(&mut self, state: Style) {
        self.styles.resize(self.cursor.pos() as usize, self.state);
        self.run_start = self.cursor.pos();
        self.state = state;
    }

    /// Retroactively reclassify the open run without closing it.
    #[inline]
    pub(crate) fn change_state(&mut self, state: Style) {
        self.state = state;
    }

    /// Advance one byte, then close the run — the advanced-over byte
    /// keeps the old style.
    pub(crate) fn forward_set_state(&mut self, state: Style) {
        self.cursor.advance();
        self.set_state(state);
    }

    /// Advance one byte.
    #[inline]
    pub(crate) fn forward(&mut self) {
        self.cursor.advance();
    }

    /// Advance `n` bytes.
    #[inline]
    pub(crate) fn forward_n(&mut self, n: u32) {
        self.cursor.advance_n(n);
    }

    /// Flush the final run and return one style per window byte.
    pub(crate) fn complete(mut self) -> Vec<Style> {
        self.styles.resize(self.win.len() as usize, self.state);
        self.styles
    }

    /// Byte count of the open run.
    #[inline]
    pub(crate) fn length_current(&self) -> u32 {
        self.cursor.pos() - self.run_start
    }

    /// Copy the open run into `out`, lowercased, silently truncating to
    /// the buffer capacity. Returns the copied prefix as `&str`.
    pub(crate) fn current_lowered<'b>(&self, out: &'b mut [u8]) -> &'b str {
        let start = self.run_start as usize;
        let end = self.cursor.pos() as usize;
        let run = &self.win.bytes()[start..end];
        let len = run.len().min(out.len());
        for (dst, src) in out[..len].iter_mut().zip(run) {
            *dst = src.to_ascii_lowercase();
        }
        // Identifier runs only contain ASCII bytes, so this never fails;
        // a sliced multi-byte sequence degrades to an unmatchable word.
        std::str::from_utf8(&out[..len]).unwrap_or("")
    }

    // ── Cursor pass-throughs ─────────────────────────────────────────

    #[inline]
    pub(crate) fn more(&self) -> bool {
        self.cursor.more()
    }

    #[inline]
    pub(crate) fn ch(&self) -> u8 {
        self.cursor.current()
    }

    #[inline]
    pub(crate) fn ch_next(&self) -> u8 {
        self.cursor.peek()
    }

    #[inline]
    pub(crate) fn ch_at(&self, n: u32) -> u8 {
        self.cursor.peek_at(n)
    }

    /// Two-byte match at the current position.
    #[inline]
    pub(crate) fn matches(&self, a: u8, b: u8) -> bool {
        self.cursor.current() == a && self.cursor.peek() == b
    }

    #[inline]
    pub(crate) fn at_line_start(&self) -> bool {
        self.cursor.at_line_start()
    }

    #[inline]
    pub(crate) fn at_line_end(&self) -> bool {
        self.cursor.at_line_end()
    }

    #[inline]
    pub(crate) fn line(&self) -> u32 {
        self.cursor.line()
    }

    #[inline]
    pub(crate) fn line_ends_with(&self, byte: u8) -> bool {
        self.cursor.line_ends_with(byte)
    }
}
