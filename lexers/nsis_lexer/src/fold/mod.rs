//! The secondary pass: per-line fold levels from the styled stream.
//!
//! Folding never re-tokenizes. It walks the styles the tokenizer
//! already assigned (plus the per-line state store) and derives nesting
//! depth from three independent signals:
//!
//! - completed Keyword/Preprocessor words that open or close a block
//!   (`Section`…`SectionEnd`, `!if`…`!endif`, `!macro`…`!macroend`);
//! - block-comment style edges — the whole `/* ... */` is one region;
//! - runs of consecutive same-typed lines (comment blocks, `!include`
//!   batches), detected purely from stored line types.
//!
//! Per line it emits a packed (current, next) level pair with a derived
//! header flag, writing to the host store only when the value actually
//! changed so the host redraws nothing needlessly.

use nsis_lexer_core::{FoldLevel, LineState, LineType, SourceWindow, Style, FOLD_BASE};

use crate::host::{FoldLevelStore, LineStateStore};

/// Capacity of the fold word buffer: `sectiongroupend` exactly fills it.
/// Longer words are silently truncated.
const MAX_FOLD_WORD_LEN: usize = 15;

/// Minimum length for an `end`-suffixed keyword to close a block.
/// Tunable: the shortest reserved word that must decrement is
/// `pageexend` (9 bytes); shorter end-suffixed words (e.g. `append`)
/// must not.
const MIN_BLOCK_END_LEN: usize = 9;

/// Fold one window, given the styles `tokenize` produced for it.
///
/// `init_style` is the style of the byte preceding the window
/// (`Default` at document start); it seeds block-comment edge
/// detection. `styles` must hold one entry per window byte; the probe
/// one past the window reads as `Default`.
pub fn fold(
    window: &SourceWindow,
    styles: &[Style],
    init_style: Style,
    line_states: &dyn LineStateStore,
    fold_levels: &mut dyn FoldLevelStore,
) {
    debug_assert_eq!(
        styles.len(),
        window.len() as usize,
        "styles must cover the window"
    );
    if window.is_empty() {
        return;
    }
    let end = window.len();
    let bytes = window.bytes();

    let mut line = window.first_line();
    let mut level_current = i32::from(FOLD_BASE);
    let mut line_type_prev = LineType::None;
    if line > 0 {
        level_current = i32::from(FoldLevel::unpack(fold_levels.level(line - 1)).next);
        line_type_prev = LineState::from_raw(line_states.line_state(line - 1)).line_type();
    }
    let mut level_next = level_current;
    let mut line_type_current = LineState::from_raw(line_states.line_state(line)).line_type();
    let mut line_end_pos = window.line_start(line + 1).min(end) - 1;

    let mut style = init_style;
    let mut style_next = styles[0];
    let mut word = [0u8; MAX_FOLD_WORD_LEN];
    let mut word_len = 0usize;

    for i in 0..end {
        let style_prev = style;
        style = style_next;
        style_next = styles
            .get(i as usize + 1)
            .copied()
            .unwrap_or(Style::Default);

        match style {
            Style::Keyword | Style::Preprocessor => {
                if word_len < MAX_FOLD_WORD_LEN {
                    word[word_len] = bytes[i as usize].to_ascii_lowercase();
                    word_len += 1;
                }
                if style_next != style {
                    let text = std::str::from_utf8(&word[..word_len]).unwrap_or("");
                    if style == Style::Keyword {
                        if word_len >= MIN_BLOCK_END_LEN && text.ends_with("end") {
                            level_next -= 1;
                        } else if text.starts_with("section") || text == "function" || text == "pageex"
                        {
                            level_next += 1;
                        }
                    } else if text.starts_with("!if") || text == "!macro" {
                        level_next += 1;
                    } else if text.starts_with("!end") || text == "!macroend" {
                        level_next -= 1;
                    }
                    word_len = 0;
                }
            }
            Style::CommentBlock => {
                if style_prev != style {
                    level_next += 1;
                } else if style_next != style {
                    level_next -= 1;
                }
            }
            _ => {}
        }

        if i == line_end_pos {
            let line_type_next = LineState::from_raw(line_states.line_state(line + 1)).line_type();
            if line_type_current != LineType::None {
                // A run of same-typed lines folds as one region: open
                // where the run starts, close where it ends.
                level_next += i32::from(line_type_next == line_type_current)
                    - i32::from(line_type_prev == line_type_current);
            }

            let packed = FoldLevel::new(level_current, level_next).pack();
            if packed != fold_levels.level(line) {
                fold_levels.set_level(line, packed);
            }

            line += 1;
            line_end_pos = window.line_start(line + 1).min(end) - 1;
            level_current = level_next;
            line_type_prev = line_type_current;
            line_type_current = line_type_next;
        }
    }
}

#[cfg(test)]
mod tests;
