//! ENS Core - ENSIP-15 name normalization engine
//!
//! This is the single source of truth for ENS name normalization semantics.
//! The CLI and the C binding delegate to this crate.
//!
//! # Architecture
//!
//! ```text
//! UTF-8 bytes → codepoints → Tokenizer → tokens → Label Splitter
//!                                ↓
//!                         Label Validator → groups + CM/NSM/fenced/confusables
//!                                ↓
//!                         Output Assembler → normalized | beautified UTF-8
//! ```
//!
//! # Guarantees
//!
//! - **Pure**: each call is a function of its input and the immutable rule
//!   tables; no I/O, no shared mutable state
//! - **Deterministic**: same input always produces identical output
//! - **Idempotent**: `normalize(normalize(x)) == normalize(x)`
//! - **Canonical**: two names that normalize to the same bytes are the same
//!   name for any downstream hasher
//!
//! The rule tables are loaded once, validated at initialization, and shared
//! read-only; arbitrarily many calls may proceed in parallel.

pub mod error;
pub mod normalizer;
pub mod tables;
pub mod tokenizer;
pub mod validator;

pub use error::{Error, Result};
pub use normalizer::{beautify, normalize, process, ProcessedName};
pub use tokenizer::{tokenize, Token};
pub use validator::{LabelKind, ValidatedLabel};
