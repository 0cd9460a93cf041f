//! Error types for the normalization engine
//!
//! All fallible operations return `Result<T, Error>`.
//! The first error in input order is the one reported: labels are validated
//! left to right, and within a label the validation stages short-circuit.

/// Validation and pipeline errors
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum Error {
    /// Codepoint present in the input but classed as disallowed
    #[error("disallowed character U+{0:04X}")]
    DisallowedCharacter(u32),

    /// Label of zero tokens (leading/trailing/consecutive separators)
    #[error("empty label")]
    EmptyLabel,

    /// Label begins with a combining mark
    #[error("label starts with a combining mark U+{0:04X}")]
    LeadingCombiningMark(u32),

    /// Combining mark immediately follows an emoji token
    #[error("combining mark U+{0:04X} after emoji")]
    CombiningMarkAfterEmoji(u32),

    /// Combining mark in a label whose group forbids them
    #[error("combining mark U+{cp:04X} not allowed in {group} label")]
    CombiningMarkInDisallowedGroup { cp: u32, group: &'static str },

    /// No script group admits the label's codepoint set
    #[error("character U+{0:04X} not admitted by any script group of the label")]
    DisallowedCharacterInGroup(u32),

    /// More than the permitted number of non-spacing marks in a row
    #[error("too many non-spacing marks (limit {limit})")]
    NsmTooMany { limit: usize },

    /// Non-spacing mark repeated within a contiguous run
    #[error("duplicate non-spacing mark U+{0:04X}")]
    NsmDuplicate(u32),

    /// Fenced character at the start of a label
    #[error("fenced character U+{0:04X} at label start")]
    FencedLeading(u32),

    /// Fenced character at the end of a label
    #[error("fenced character U+{0:04X} at label end")]
    FencedTrailing(u32),

    /// Two adjacent fenced characters
    #[error("adjacent fenced characters U+{0:04X} U+{1:04X}")]
    FencedAdjacent(u32, u32),

    /// Every codepoint of the label is confusable with another script
    #[error("whole-script confusable: {0}")]
    WholeScriptConfusable(&'static str),

    /// ASCII label starts or ends with a hyphen
    #[error("hyphen at label boundary")]
    HyphenPlacement,

    /// ASCII label carries '--' in its third and fourth position
    #[error("invalid label extension")]
    LabelExtension,

    /// Ingress byte sequence is not valid UTF-8
    #[error("invalid UTF-8 input")]
    InvalidUtf8,

    /// Caller-provided output buffer capacity is insufficient
    #[error("output buffer too small ({required} bytes required)")]
    OutputTooSmall { required: usize },
}

/// Result type alias for normalization operations
pub type Result<T> = std::result::Result<T, Error>;
