//! TUI pane rendering modules
//!
//! # Pane Modules
//!
//! - [`source`]: Source text coloured by token kind, with diagnostic underlines
//! - [`tokens`]: Token table (position, tag, lexeme, decoded value)
//! - [`trace`]: DFA state walk of the selected token
//! - [`diagnostics`]: Lexical and syntax errors
//! - [`status`]: Status bar with keybindings and the verdict
//!
//! Each pane module exports a `render_*()` function that draws from borrowed
//! analysis data and updates only its own scroll state.

pub mod diagnostics;
pub mod source;
pub mod status;
pub mod tokens;
pub mod trace;

pub use diagnostics::render_diagnostics_pane;
pub use source::{render_source_pane, SourceScrollState};
pub use status::render_status_bar;
pub use tokens::render_tokens_pane;
pub use trace::render_trace_pane;
