//! Tokenizer — converts a codepoint stream into text and emoji tokens
//!
//! At every cursor position the emoji trie is tried first, greedy and
//! longest-match; on a miss one codepoint is consumed through the
//! ignored/mapped/disallowed tables. Adjacent text contributions coalesce
//! into one `Text` token; emoji always break runs, and so does the label
//! separator `.`, which is emitted as its own single-codepoint text token so
//! the label splitter can partition on whole tokens.
//!
//! Guarantees:
//! - Deterministic: same input always produces the same token stream
//! - First error wins: the leftmost disallowed codepoint is reported

use smallvec::SmallVec;

use crate::tables::{tables, Tables, STOP};
use crate::{Error, Result};

/// Codepoint storage for a text run. Most runs are short.
pub type CpVec = SmallVec<[u32; 8]>;

/// One token of the input stream
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Token {
    /// A run of non-emoji codepoints, already mapped
    Text { cps: CpVec },
    /// A matched emoji sequence with its two output projections
    Emoji {
        /// The codepoints as they appeared in the input
        input: Vec<u32>,
        /// FE0F-stripped form (normalize output)
        canonical: Vec<u32>,
        /// Fully-qualified form (beautify output)
        beautified: Vec<u32>,
    },
}

impl Token {
    /// True for the token the label splitter partitions on.
    pub fn is_separator(&self) -> bool {
        matches!(self, Token::Text { cps } if cps.len() == 1 && cps[0] == STOP)
    }
}

/// Tokenizer over a decoded codepoint buffer
pub struct Tokenizer {
    tables: &'static Tables,
    cps: Vec<u32>,
    position: usize,
    out: Vec<Token>,
    run: CpVec,
}

impl Tokenizer {
    /// Create a tokenizer for the given input text
    pub fn new(text: &str) -> Self {
        Tokenizer {
            tables: tables(),
            cps: text.chars().map(|c| c as u32).collect(),
            position: 0,
            out: Vec::new(),
            run: CpVec::new(),
        }
    }

    /// Tokenize the entire input
    pub fn tokenize(mut self) -> Result<Vec<Token>> {
        while self.position < self.cps.len() {
            if self.try_emoji() {
                continue;
            }
            self.next_text_codepoint()?;
        }
        self.flush_run();
        Ok(self.out)
    }

    // ── Emoji matching ─────────────────────────────────

    /// Greedy longest match against the emoji trie at the cursor.
    fn try_emoji(&mut self) -> bool {
        let rest = &self.cps[self.position..];
        match self.tables.match_emoji(rest) {
            Some((len, record)) => {
                let input = rest[..len].to_vec();
                let canonical = record.canonical.clone();
                let beautified = record.beautified.clone();
                self.flush_run();
                self.out.push(Token::Emoji {
                    input,
                    canonical,
                    beautified,
                });
                self.position += len;
                true
            }
            None => false,
        }
    }

    // ── Text codepoints ────────────────────────────────

    /// Consume one non-emoji codepoint through the codepoint tables.
    fn next_text_codepoint(&mut self) -> Result<()> {
        let cp = self.cps[self.position];
        self.position += 1;

        if self.tables.is_ignored(cp) {
            return Ok(());
        }
        if let Some(replacement) = self.tables.mapping(cp) {
            for &r in replacement {
                self.push_text(r);
            }
            return Ok(());
        }
        if self.tables.is_disallowed(cp) {
            return Err(Error::DisallowedCharacter(cp));
        }
        self.push_text(cp);
        Ok(())
    }

    /// Append to the current run; the separator always stands alone.
    fn push_text(&mut self, cp: u32) {
        if cp == STOP {
            self.flush_run();
            self.out.push(Token::Text {
                cps: CpVec::from_slice(&[STOP]),
            });
        } else {
            self.run.push(cp);
        }
    }

    fn flush_run(&mut self) {
        if !self.run.is_empty() {
            let cps = std::mem::take(&mut self.run);
            self.out.push(Token::Text { cps });
        }
    }
}

/// Tokenize input text against the shared rule tables.
///
/// # Errors
/// Returns `DisallowedCharacter` for the leftmost codepoint that is neither
/// an emoji, ignored, mapped, nor valid.
pub fn tokenize(text: &str) -> Result<Vec<Token>> {
    Tokenizer::new(text).tokenize()
}
