//! # Introduction
//!
//! Blueprint is the front end of a small construction-themed, C-like
//! teaching language. It lexes a source file into tokens with a
//! delimiter-validated DFA, then confirms or rejects the token stream with a
//! predictive backtracking parser. Nothing is executed and no tree is built:
//! the output is tokens plus diagnostics.
//!
//! ## Pipeline
//!
//! ```text
//! Source → Lexer → Tokens (+ LexErrors) → Parser → accepted | one SyntaxError
//! ```
//!
//! 1. [`lexer`]: scans the source, records every lexical error and keeps
//!    going. Whitespace and comments are tokens too, so the stream
//!    reconstructs the source exactly.
//! 2. [`parser`]: table-driven recursive descent over the grammar, with
//!    checkpoint/rollback between alternatives. Stops at the first
//!    irrecoverable mismatch.
//! 3. [`analysis`]: runs both, skipping the parser when lexing failed.
//! 4. [`report`]: renders diagnostics with source snippets.
//! 5. [`ui`]: ratatui-based viewer; not part of the stable library API.
//!
//! Lexer limits (identifier length, digit caps) live in [`config`].
//!
//! ## The language in brief
//!
//! Types: `tile` (int), `glass` (float), `brick` (char), `wall` (string),
//! `beam` (bool, `solid`/`fragile`), `field` (void), `house` records.
//! Constants use `cement`. Control flow: `if/else`, `while`, `for`,
//! `do-while`, `room/door/ground` (switch), `crack`, `mend`, `home`.
//! I/O: `view(...)` prints, `write(...)` reads. The entry point is
//! `blueprint()`, and globals are introduced by `roof`.

pub mod analysis;
pub mod config;
pub mod lexer;
pub mod parser;
pub mod report;
pub mod ui;
