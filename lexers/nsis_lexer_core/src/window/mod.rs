//! Sentinel-terminated analysis window with a physical-line table.
//!
//! An incremental pass operates on a byte range of the document chosen
//! by the host. The window copies that range into a zero-padded buffer
//! so the cursor can look ahead without bounds checks: the byte at
//! `len()` is always `0x00`, and at least [`LOOKAHEAD_PAD`] zero bytes
//! follow it. The total buffer size is rounded up to the next 64-byte
//! boundary for cache-line alignment.
//!
//! The window also owns the line structure of the range: the absolute
//! number of its first line and the window-relative start offset of
//! every line in it. Line terminators are `\n`, `\r\n`, and lone `\r`.
//!
//! # Contract
//!
//! The range must start at a line boundary (offset 0 or just past a
//! line terminator). This is the restartability precondition of the
//! analysis passes and is `debug_assert!`ed, not checked at runtime.

use crate::Cursor;

/// Cache line size in bytes, used for buffer alignment padding.
const CACHE_LINE: usize = 64;

/// Guaranteed zero bytes after the window content (sentinel included).
/// Sized so relative lookahead by small offsets never reads past the
/// buffer.
const LOOKAHEAD_PAD: usize = 8;

/// Sentinel-terminated copy of one analysis range plus its line table.
#[derive(Clone, Debug)]
pub struct SourceWindow {
    /// Owned buffer: `[window_bytes..., 0x00 sentinel, 0x00 padding...]`.
    buf: Vec<u8>,
    /// Length of the window content (excludes sentinel and padding).
    window_len: u32,
    /// Absolute number of the line containing the window's first byte.
    first_line: u32,
    /// Window-relative start offset of each line; `line_starts[0] == 0`.
    line_starts: Vec<u32>,
}

impl SourceWindow {
    /// Build a window over `doc[range]`.
    ///
    /// # Contract
    ///
    /// `range.start` must sit on a line boundary and `range.end` must
    /// not exceed the document length. Windows larger than `u32::MAX`
    /// bytes saturate; hosts re-analyze edit-sized ranges, not
    /// multi-gigabyte documents.
    pub fn new(doc: &str, range: std::ops::Range<usize>) -> Self {
        let doc_bytes = doc.as_bytes();
        debug_assert!(range.end <= doc_bytes.len(), "window range exceeds document");
        debug_assert!(
            is_line_boundary(doc_bytes, range.start),
            "window must start at a line boundary"
        );

        let first_line = count_line_breaks(&doc_bytes[..range.start]);
        let window_bytes = &doc_bytes[range];
        let window_len = window_bytes.len();

        // Round up to the next 64-byte boundary, keeping at least
        // LOOKAHEAD_PAD zero bytes after the content.
        let padded_len = (window_len + LOOKAHEAD_PAD + CACHE_LINE - 1) & !(CACHE_LINE - 1);
        let mut buf = vec![0u8; padded_len];
        buf[..window_len].copy_from_slice(window_bytes);

        Self {
            buf,
            window_len: u32::try_from(window_len).unwrap_or(u32::MAX),
            first_line,
            line_starts: scan_line_starts(window_bytes),
        }
    }

    /// Window over an entire document.
    pub fn whole(doc: &str) -> Self {
        Self::new(doc, 0..doc.len())
    }

    /// Length of the window content in bytes.
    #[inline]
    pub fn len(&self) -> u32 {
        self.window_len
    }

    /// Returns `true` if the window covers no bytes.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.window_len == 0
    }

    /// The window content (without sentinel or padding).
    pub fn bytes(&self) -> &[u8] {
        &self.buf[..self.window_len as usize]
    }

    /// The full buffer including the sentinel and zero padding.
    #[inline]
    pub(crate) fn sentinel_bytes(&self) -> &[u8] {
        &self.buf
    }

    /// Absolute number of the line containing the window's first byte.
    #[inline]
    pub fn first_line(&self) -> u32 {
        self.first_line
    }

    /// Number of lines the window touches. A trailing terminator opens
    /// one final empty line, matching how editors count lines.
    #[inline]
    pub fn line_count(&self) -> u32 {
        u32::try_from(self.line_starts.len()).unwrap_or(u32::MAX)
    }

    /// Window-relative start offset of an absolute line number.
    ///
    /// Lines past the window's last line report the window length, so
    /// `line_start(line + 1)` is a safe exclusive end for any line.
    pub fn line_start(&self, line: u32) -> u32 {
        debug_assert!(line >= self.first_line, "line precedes the window");
        self.rel_line_start(line.saturating_sub(self.first_line))
    }

    /// Window-relative start offset by window-relative line index.
    #[inline]
    pub(crate) fn rel_line_start(&self, rel: u32) -> u32 {
        self.line_starts
            .get(rel as usize)
            .copied()
            .unwrap_or(self.window_len)
    }

    /// Absolute number of the line containing a window-relative offset.
    pub fn line_of(&self, pos: u32) -> u32 {
        debug_assert!(pos < self.window_len.max(1), "offset outside the window");
        let rel = self.line_starts.partition_point(|&start| start <= pos) - 1;
        self.first_line + u32::try_from(rel).unwrap_or(u32::MAX)
    }

    /// Create a [`Cursor`] positioned at the window's first byte.
    pub fn cursor(&self) -> Cursor<'_> {
        Cursor::new(self)
    }
}

/// Returns `true` if `pos` is a valid line boundary in `doc`: offset
/// zero, or just past a full line terminator.
fn is_line_boundary(doc: &[u8], pos: usize) -> bool {
    if pos == 0 {
        return true;
    }
    match doc[pos - 1] {
        b'\n' => true,
        // A `\r` only terminates a line when no `\n` follows it.
        b'\r' => doc.get(pos) != Some(&b'\n'),
        _ => false,
    }
}

/// Count full line terminators in `text` (`\n`, `\r\n`, lone `\r`).
fn count_line_breaks(text: &[u8]) -> u32 {
    let mut count = 0u32;
    let mut offset = 0usize;
    while let Some(found) = memchr::memchr2(b'\n', b'\r', &text[offset..]) {
        let pos = offset + found;
        let width = terminator_width(text, pos);
        count += 1;
        offset = pos + width;
    }
    count
}

/// Window-relative start offsets of every line in `bytes`.
fn scan_line_starts(bytes: &[u8]) -> Vec<u32> {
    let mut starts = vec![0u32];
    let mut offset = 0usize;
    while let Some(found) = memchr::memchr2(b'\n', b'\r', &bytes[offset..]) {
        let pos = offset + found;
        let next = pos + terminator_width(bytes, pos);
        starts.push(u32::try_from(next).unwrap_or(u32::MAX));
        offset = next;
    }
    starts
}

/// Byte width of the line terminator starting at `pos` (1 or 2).
#[inline]
fn terminator_width(bytes: &[u8], pos: usize) -> usize {
    if bytes[pos] == b'\r' && bytes.get(pos + 1) == Some(&b'\n') {
        2
    } else {
        1
    }
}
