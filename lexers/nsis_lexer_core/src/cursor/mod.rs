//! Line-aware forward cursor over a [`SourceWindow`].
//!
//! The cursor advances byte-by-byte. Lookahead never bounds-checks: the
//! window's sentinel and zero padding guarantee that `peek`, `peek2`,
//! and small relative offsets read `0x00` past the content. The cursor
//! additionally tracks the line structure of the position — whether it
//! sits on the first or final byte of a physical line, the absolute
//! line number, and the continuation-marker test at line ends — which
//! is what the per-line state machines key off.

use crate::SourceWindow;

/// Forward byte scanner with line-position tracking.
///
/// Created via [`SourceWindow::cursor()`]. The cursor is [`Copy`],
/// enabling cheap state snapshots.
#[derive(Clone, Copy, Debug)]
pub struct Cursor<'a> {
    win: &'a SourceWindow,
    /// Sentinel-terminated buffer (window + sentinel + padding).
    buf: &'a [u8],
    /// Current read position (window-relative byte index).
    pos: u32,
    /// Window-relative line index of the current position.
    line_rel: u32,
    /// Window-relative start of the current line.
    line_start: u32,
    /// Window-relative start of the following line (window length on
    /// the last line).
    next_line_start: u32,
}

impl<'a> Cursor<'a> {
    /// Create a cursor at the window's first byte.
    pub(crate) fn new(win: &'a SourceWindow) -> Self {
        Self {
            win,
            buf: win.sentinel_bytes(),
            pos: 0,
            line_rel: 0,
            line_start: 0,
            next_line_start: win.rel_line_start(1),
        }
    }

    /// Returns the byte at the current position, `0x00` at or past the
    /// end of the window.
    #[inline]
    pub fn current(&self) -> u8 {
        self.buf[self.pos as usize]
    }

    /// Returns the byte before the current position, `0x00` at the
    /// window start.
    #[inline]
    pub fn prev(&self) -> u8 {
        if self.pos == 0 {
            0
        } else {
            self.buf[self.pos as usize - 1]
        }
    }

    /// Returns the byte one position ahead.
    #[inline]
    pub fn peek(&self) -> u8 {
        self.buf[self.pos as usize + 1]
    }

    /// Returns the byte two positions ahead.
    #[inline]
    pub fn peek2(&self) -> u8 {
        self.buf[self.pos as usize + 2]
    }

    /// Returns the byte `n` positions ahead. Safe for small `n`: the
    /// window guarantees zero padding past the content.
    #[inline]
    pub fn peek_at(&self, n: u32) -> u8 {
        debug_assert!(n <= 7, "relative lookahead exceeds padding");
        self.buf[(self.pos + n) as usize]
    }

    /// Advance by one byte, updating line tracking.
    #[inline]
    pub fn advance(&mut self) {
        self.pos += 1;
        if self.pos >= self.next_line_start && self.pos < self.win.len() {
            self.line_rel += 1;
            self.line_start = self.next_line_start;
            self.next_line_start = self.win.rel_line_start(self.line_rel + 1);
        }
    }

    /// Advance by `n` bytes.
    pub fn advance_n(&mut self, n: u32) {
        for _ in 0..n {
            self.advance();
        }
    }

    /// Current window-relative byte offset.
    #[inline]
    pub fn pos(&self) -> u32 {
        self.pos
    }

    /// Returns `true` while the cursor is on window content.
    #[inline]
    pub fn more(&self) -> bool {
        self.pos < self.win.len()
    }

    /// Returns `true` once the cursor has consumed the window.
    #[inline]
    pub fn is_eof(&self) -> bool {
        !self.more()
    }

    /// Absolute number of the current line.
    #[inline]
    pub fn line(&self) -> u32 {
        self.win.first_line() + self.line_rel
    }

    /// Returns `true` on the first byte of a physical line.
    #[inline]
    pub fn at_line_start(&self) -> bool {
        self.pos == self.line_start
    }

    /// Returns `true` on the final byte of a physical line: the `\n` of
    /// `\n` or `\r\n`, a lone `\r`, or the window's last byte when the
    /// text ends without a terminator.
    #[inline]
    pub fn at_line_end(&self) -> bool {
        self.pos + 1 == self.next_line_start
    }

    /// Returns `true` if the current line's last byte before its
    /// terminator equals `byte` — the line-continuation test.
    pub fn line_ends_with(&self, byte: u8) -> bool {
        let mut end = self.next_line_start;
        while end > self.line_start && matches!(self.buf[end as usize - 1], b'\n' | b'\r') {
            end -= 1;
        }
        end > self.line_start && self.buf[end as usize - 1] == byte
    }
}
