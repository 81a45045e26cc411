use pretty_assertions::assert_eq;

use nsis_lexer_core::{FoldLevel, SourceWindow, Style, FOLD_BASE};

use crate::fold::fold;
use crate::host::{FoldLevelStore, MemoryFoldLevels, MemoryLineStates};
use crate::keywords::KeywordSet;
use crate::tokenizer::tokenize;

const BASE: u16 = FOLD_BASE;

fn keywords() -> KeywordSet {
    KeywordSet::new([
        "Section",
        "SectionEnd",
        "SectionGroup",
        "SectionGroupEnd",
        "Function",
        "FunctionEnd",
        "PageEx",
        "PageExEnd",
        "Append",
        "Name",
    ])
}

fn analyze(source: &str) -> (SourceWindow, Vec<Style>, MemoryLineStates) {
    let window = SourceWindow::whole(source);
    let mut states = MemoryLineStates::new();
    let styles = tokenize(&window, Style::Default, &keywords(), &mut states);
    (window, styles, states)
}

/// Tokenize + fold a whole document, returning one unpacked level per
/// line.
fn levels_of(source: &str) -> Vec<FoldLevel> {
    let (window, styles, states) = analyze(source);
    let mut levels = MemoryFoldLevels::new();
    fold(&window, &styles, Style::Default, &states, &mut levels);
    (0..window.line_count())
        .map(|line| FoldLevel::unpack(levels.level(line)))
        .collect()
}

fn level(current: u16, next: u16) -> FoldLevel {
    FoldLevel { current, next }
}

// === Keyword blocks ===

#[test]
fn section_blocks_nest() {
    let levels = levels_of("Section \"x\"\nDetailPrint \"y\"\nSectionEnd\nName z\n");
    assert_eq!(levels[0], level(BASE, BASE + 1));
    assert!(levels[0].is_header());
    assert_eq!(levels[1], level(BASE + 1, BASE + 1));
    assert_eq!(levels[2], level(BASE + 1, BASE));
    assert_eq!(levels[3], level(BASE, BASE));
}

#[test]
fn function_and_pageex_open_blocks() {
    let levels = levels_of("Function f\nFunctionEnd\nPageEx p\nPageExEnd\n");
    assert_eq!(levels[0], level(BASE, BASE + 1));
    assert_eq!(levels[1], level(BASE + 1, BASE));
    assert_eq!(levels[2], level(BASE, BASE + 1));
    assert_eq!(levels[3], level(BASE + 1, BASE));
}

#[test]
fn section_group_nests_inside_section() {
    let levels = levels_of("SectionGroup g\nSection s\nSectionEnd\nSectionGroupEnd\n");
    assert_eq!(levels[0], level(BASE, BASE + 1));
    assert_eq!(levels[1], level(BASE + 1, BASE + 2));
    assert_eq!(levels[2], level(BASE + 2, BASE + 1));
    assert_eq!(levels[3], level(BASE + 1, BASE));
}

#[test]
fn short_end_suffixed_keywords_do_not_close_blocks() {
    // `append` ends with "end" but sits below the length threshold.
    let levels = levels_of("Append x\nSection s\nSectionEnd\n");
    assert_eq!(levels[0], level(BASE, BASE));
    assert!(!levels[0].is_header());
    assert_eq!(levels[1], level(BASE, BASE + 1));
    assert_eq!(levels[2], level(BASE + 1, BASE));
}

#[test]
fn instructions_do_not_affect_levels() {
    let levels = levels_of("DetailPrint a\nStrCpy $0 b\n");
    assert_eq!(levels[0], level(BASE, BASE));
    assert_eq!(levels[1], level(BASE, BASE));
}

// === Preprocessor blocks ===

#[test]
fn conditional_blocks_nest() {
    let levels = levels_of("!ifdef A\n!include x.nsh\n!endif\n");
    assert_eq!(levels[0], level(BASE, BASE + 1));
    assert!(levels[0].is_header());
    assert_eq!(levels[1], level(BASE + 1, BASE + 1));
    assert_eq!(levels[2], level(BASE + 1, BASE));
}

#[test]
fn macro_blocks_nest() {
    let levels = levels_of("!macro M\nNop\n!macroend\n");
    assert_eq!(levels[0], level(BASE, BASE + 1));
    assert_eq!(levels[1], level(BASE + 1, BASE + 1));
    assert_eq!(levels[2], level(BASE + 1, BASE));
}

#[test]
fn include_directive_is_not_a_conditional() {
    // `!include` shares no prefix with `!if`; a single include line
    // opens nothing.
    let levels = levels_of("!include x.nsh\nName z\n");
    assert_eq!(levels[0], level(BASE, BASE));
    assert_eq!(levels[1], level(BASE, BASE));
}

// === Block comments ===

#[test]
fn block_comment_spanning_three_lines() {
    let levels = levels_of("a\n/*\nx\n*/\nb\n");
    assert_eq!(levels[0], level(BASE, BASE));
    assert_eq!(levels[1], level(BASE, BASE + 1));
    assert!(levels[1].is_header());
    assert_eq!(levels[2], level(BASE + 1, BASE + 1));
    assert_eq!(levels[3], level(BASE + 1, BASE));
    assert_eq!(levels[4], level(BASE, BASE));
}

#[test]
fn one_line_block_comment_folds_nothing() {
    let levels = levels_of("/* note */ x\ny\n");
    assert_eq!(levels[0], level(BASE, BASE));
    assert!(!levels[0].is_header());
}

// === Line-type runs ===

#[test]
fn comment_run_folds_as_one_region() {
    let levels = levels_of("; one\n; two\n; three\n; four\nx\n");
    assert_eq!(levels[0], level(BASE, BASE + 1));
    assert!(levels[0].is_header());
    assert_eq!(levels[1], level(BASE + 1, BASE + 1));
    assert_eq!(levels[2], level(BASE + 1, BASE + 1));
    assert_eq!(levels[3], level(BASE + 1, BASE));
    assert_eq!(levels[4], level(BASE, BASE));
}

#[test]
fn include_run_folds_as_one_region() {
    let levels = levels_of("!include a.nsh\n!include b.nsh\nx\n");
    assert_eq!(levels[0], level(BASE, BASE + 1));
    assert_eq!(levels[1], level(BASE + 1, BASE));
    assert_eq!(levels[2], level(BASE, BASE));
}

#[test]
fn single_typed_line_is_not_a_region() {
    let levels = levels_of("; solo\nx\n");
    assert_eq!(levels[0], level(BASE, BASE));
    assert!(!levels[0].is_header());
}

#[test]
fn adjacent_runs_of_different_types_fold_separately() {
    let levels = levels_of("; c\n!include x.nsh\n!include y.nsh\nz\n");
    assert_eq!(levels[0], level(BASE, BASE));
    assert_eq!(levels[1], level(BASE, BASE + 1));
    assert!(levels[1].is_header());
    assert_eq!(levels[2], level(BASE + 1, BASE));
    assert_eq!(levels[3], level(BASE, BASE));
}

#[test]
fn continuation_extends_a_typed_run() {
    // The continued physical line inherits the Comment type, so the run
    // spans all three lines.
    let levels = levels_of("; one\n; two \\\nstill two\nx\n");
    assert_eq!(levels[0], level(BASE, BASE + 1));
    assert_eq!(levels[1], level(BASE + 1, BASE + 1));
    assert_eq!(levels[2], level(BASE + 1, BASE));
    assert_eq!(levels[3], level(BASE, BASE));
}

// === Store behavior ===

#[derive(Default)]
struct CountingLevels {
    inner: MemoryFoldLevels,
    writes: usize,
}

impl FoldLevelStore for CountingLevels {
    fn level(&self, line: u32) -> u32 {
        self.inner.level(line)
    }

    fn set_level(&mut self, line: u32, level: u32) {
        self.writes += 1;
        self.inner.set_level(line, level);
    }
}

#[test]
fn levels_are_written_only_when_changed() {
    let (window, styles, states) = analyze("Section s\nNop\nSectionEnd\n");
    let mut levels = CountingLevels::default();

    fold(&window, &styles, Style::Default, &states, &mut levels);
    let first_pass = levels.writes;
    assert!(first_pass > 0);

    fold(&window, &styles, Style::Default, &states, &mut levels);
    assert_eq!(levels.writes, first_pass);
}

#[test]
fn refolding_a_suffix_reuses_stored_levels() {
    let doc = "Section \"s\"\nDetailPrint a\nDetailPrint b\nSectionEnd\n";
    let (window, styles, states) = analyze(doc);
    let mut levels = MemoryFoldLevels::new();
    fold(&window, &styles, Style::Default, &states, &mut levels);
    let before: Vec<u32> = (0..window.line_count()).map(|l| levels.level(l)).collect();

    let start = window.line_start(1) as usize;
    let suffix = SourceWindow::new(doc, start..doc.len());
    fold(
        &suffix,
        &styles[start..],
        styles[start - 1],
        &states,
        &mut levels,
    );

    let after: Vec<u32> = (0..window.line_count()).map(|l| levels.level(l)).collect();
    assert_eq!(after, before);
}

#[test]
fn empty_window_folds_nothing() {
    let window = SourceWindow::whole("");
    let states = MemoryLineStates::new();
    let mut levels = CountingLevels::default();
    fold(&window, &[], Style::Default, &states, &mut levels);
    assert_eq!(levels.writes, 0);
}

#[test]
fn stray_block_end_dips_below_base() {
    let levels = levels_of("SectionEnd\nx\n");
    assert_eq!(levels[0], level(BASE, BASE - 1));
    assert_eq!(levels[1], level(BASE - 1, BASE - 1));
}
