//! Scanning substrate for the NSIS lexer.
//!
//! This crate is standalone: it carries the vocabulary shared by the
//! analysis passes (per-byte [`Style`] classes, the persisted per-line
//! [`LineState`] bitmask, packed [`FoldLevel`] pairs) and the scanning
//! machinery they run on (a sentinel-terminated [`SourceWindow`] over the
//! byte range under analysis, and a line-aware forward [`Cursor`]).
//!
//! The language-specific state machines live in `nsis_lexer`; host
//! integrations that only need the vocabulary (style-to-color mapping,
//! fold-level rendering) can depend on this crate alone.

mod cursor;
mod fold_level;
mod line_state;
mod style;
mod window;

pub use cursor::Cursor;
pub use fold_level::{FoldLevel, FOLD_BASE};
pub use line_state::{LineState, LineType};
pub use style::Style;
pub use window::SourceWindow;
