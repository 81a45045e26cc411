//! Host-owned per-line stores.
//!
//! Both analysis passes treat persisted line data as simple per-line
//! key-value maps with read-before-write semantics: the tokenizer reads
//! the preceding line's state and writes one state per completed line;
//! the fold engine reads neighbor states and writes packed fold levels.
//! The stores are externally owned — the host serializes access around
//! edits; nothing here locks.
//!
//! Values cross the trait boundary as raw packed integers (decode with
//! [`LineState::from_raw`](nsis_lexer_core::LineState::from_raw) and
//! [`FoldLevel::unpack`](nsis_lexer_core::FoldLevel::unpack)), so a host
//! that already keeps an `int` per line can implement the traits over
//! its existing storage without conversion.

use nsis_lexer_core::FoldLevel;

/// Per-line lexical state store.
///
/// Lines never written must read as `0` (no continuation, no line type).
pub trait LineStateStore {
    /// Packed [`LineState`](nsis_lexer_core::LineState) of `line`.
    fn line_state(&self, line: u32) -> u32;
    /// Store the packed state for `line`, overwriting any prior value.
    fn set_line_state(&mut self, line: u32, state: u32);
}

/// Per-line fold level store.
///
/// Lines never written must read as the packed base level.
pub trait FoldLevelStore {
    /// Packed [`FoldLevel`] of `line`.
    fn level(&self, line: u32) -> u32;
    /// Store the packed level for `line`, overwriting any prior value.
    fn set_level(&mut self, line: u32, level: u32);
}

/// Growable in-memory line-state store for hosts without their own
/// per-line storage.
#[derive(Clone, Debug, Default)]
pub struct MemoryLineStates {
    states: Vec<u32>,
}

impl MemoryLineStates {
    /// Empty store; every line reads as unwritten.
    pub fn new() -> Self {
        Self::default()
    }
}

impl LineStateStore for MemoryLineStates {
    fn line_state(&self, line: u32) -> u32 {
        self.states.get(line as usize).copied().unwrap_or(0)
    }

    fn set_line_state(&mut self, line: u32, state: u32) {
        let index = line as usize;
        if index >= self.states.len() {
            self.states.resize(index + 1, 0);
        }
        self.states[index] = state;
    }
}

/// Growable in-memory fold store.
#[derive(Clone, Debug, Default)]
pub struct MemoryFoldLevels {
    levels: Vec<u32>,
}

impl MemoryFoldLevels {
    /// Empty store; every line reads as the base level.
    pub fn new() -> Self {
        Self::default()
    }
}

impl FoldLevelStore for MemoryFoldLevels {
    fn level(&self, line: u32) -> u32 {
        self.levels
            .get(line as usize)
            .copied()
            .unwrap_or_else(|| FoldLevel::BASE.pack())
    }

    fn set_level(&mut self, line: u32, level: u32) {
        let index = line as usize;
        if index >= self.levels.len() {
            self.levels.resize(index + 1, FoldLevel::BASE.pack());
        }
        self.levels[index] = level;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn unwritten_line_state_reads_zero() {
        let store = MemoryLineStates::new();
        assert_eq!(store.line_state(0), 0);
        assert_eq!(store.line_state(41), 0);
    }

    #[test]
    fn line_state_round_trips() {
        let mut store = MemoryLineStates::new();
        store.set_line_state(3, 0x12);
        assert_eq!(store.line_state(3), 0x12);
        assert_eq!(store.line_state(2), 0);
        assert_eq!(store.line_state(4), 0);
    }

    #[test]
    fn unwritten_fold_level_reads_base() {
        let store = MemoryFoldLevels::new();
        assert_eq!(store.level(7), FoldLevel::BASE.pack());
    }

    #[test]
    fn fold_level_round_trips() {
        let mut store = MemoryFoldLevels::new();
        let packed = FoldLevel::new(0x400, 0x401).pack();
        store.set_level(2, packed);
        assert_eq!(store.level(2), packed);
        assert_eq!(store.level(1), FoldLevel::BASE.pack());
    }
}
