//! Normalization pipeline — label splitting, output assembly, public API
//!
//! Pipeline: `input text → tokenize → split labels → validate labels →
//! assemble output`. Normalize and beautify share everything up to assembly
//! and differ only in which projection emoji tokens contribute, plus the
//! beautify-only Greek-xi transform.
//!
//! # Guarantees
//!
//! - **Idempotent**: `normalize(normalize(x)) == normalize(x)`
//! - **Deterministic**: same input always produces the same output
//! - **NFC-closed**: normalized output equals its own NFC
//! - **Pure**: no I/O, no mutable shared state; the rule tables are
//!   read-only after the first call

use crate::tables::{tables, STOP};
use crate::tokenizer::{tokenize, Token};
use crate::validator::{validate_label, LabelKind, ValidatedLabel};
use crate::Result;

const XI_LOWER: u32 = 0x03BE;
const XI_UPPER: u32 = 0x039E;

/// Which projection the assembler emits
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum OutputMode {
    Normalize,
    Beautify,
}

/// Both output forms of one name, computed in a single pipeline pass
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProcessedName {
    pub normalized: String,
    pub beautified: String,
}

// ── Public API ────────────────────────────────────────────

/// Normalize a name to its canonical ENSIP-15 form.
///
/// The result is the form suitable for hashing and identity comparison:
/// lowercase mapped codepoints, NFC, emoji with FE0F stripped.
///
/// # Errors
/// Any validation failure from the §7 taxonomy; the leftmost failure in
/// input order is reported.
pub fn normalize(input: &str) -> Result<String> {
    let labels = pipeline(input)?;
    Ok(assemble(&labels, OutputMode::Normalize))
}

/// Beautify a name for display.
///
/// Same pipeline as [`normalize`]; emoji keep their fully-qualified FE0F
/// spelling and Greek labels show U+03BE as uppercase U+039E.
pub fn beautify(input: &str) -> Result<String> {
    let labels = pipeline(input)?;
    Ok(assemble(&labels, OutputMode::Beautify))
}

/// Normalize and beautify in one pass over the pipeline.
pub fn process(input: &str) -> Result<ProcessedName> {
    let labels = pipeline(input)?;
    Ok(ProcessedName {
        normalized: assemble(&labels, OutputMode::Normalize),
        beautified: assemble(&labels, OutputMode::Beautify),
    })
}

// ── Label splitting ───────────────────────────────────────

/// Partition the token stream on separator tokens. The separators are
/// discarded here and reintroduced by the assembler.
///
/// An empty input yields zero labels (and an empty output); an empty label
/// between, before, or after separators is an error.
fn split_labels(tokens: Vec<Token>) -> Result<Vec<Vec<Token>>> {
    if tokens.is_empty() {
        return Ok(Vec::new());
    }
    let mut labels: Vec<Vec<Token>> = vec![Vec::new()];
    for token in tokens {
        if token.is_separator() {
            labels.push(Vec::new());
        } else {
            labels
                .last_mut()
                .expect("labels starts non-empty")
                .push(token);
        }
    }
    if labels.iter().any(|l| l.is_empty()) {
        return Err(crate::Error::EmptyLabel);
    }
    Ok(labels)
}

fn pipeline(input: &str) -> Result<Vec<ValidatedLabel>> {
    let tokens = tokenize(input)?;
    split_labels(tokens)?
        .into_iter()
        .map(validate_label)
        .collect()
}

// ── Output assembly ───────────────────────────────────────

fn assemble(labels: &[ValidatedLabel], mode: OutputMode) -> String {
    let greek = tables().groups().iter().position(|g| g.name == "Greek");

    let mut out = String::new();
    for (i, label) in labels.iter().enumerate() {
        if i > 0 {
            push_cp(&mut out, STOP);
        }
        let beautify_greek = mode == OutputMode::Beautify
            && matches!((label.kind, greek), (LabelKind::Group(g), Some(gi)) if g == gi);
        for token in &label.tokens {
            match token {
                Token::Text { cps } => {
                    for &cp in cps {
                        let cp = if beautify_greek && cp == XI_LOWER {
                            XI_UPPER
                        } else {
                            cp
                        };
                        push_cp(&mut out, cp);
                    }
                }
                Token::Emoji {
                    canonical,
                    beautified,
                    ..
                } => {
                    let cps = match mode {
                        OutputMode::Normalize => canonical,
                        OutputMode::Beautify => beautified,
                    };
                    for &cp in cps {
                        push_cp(&mut out, cp);
                    }
                }
            }
        }
    }
    out
}

fn push_cp(out: &mut String, cp: u32) {
    // Pipeline codepoints are always scalar values; see `nfc_cps`.
    if let Some(c) = char::from_u32(cp) {
        out.push(c);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::Error;

    fn cps(s: &str) -> Vec<u32> {
        s.chars().map(|c| c as u32).collect()
    }

    // ── End-to-end scenarios ───────────────────────────

    #[test]
    fn test_ascii_name() {
        assert_eq!(normalize("Vitalik.eth").unwrap(), "vitalik.eth");
        assert_eq!(beautify("Vitalik.eth").unwrap(), "vitalik.eth");
    }

    #[test]
    fn test_uppercase_name() {
        assert_eq!(normalize("RAFFY.ETH").unwrap(), "raffy.eth");
        assert_eq!(beautify("RAFFY.ETH").unwrap(), "raffy.eth");
    }

    #[test]
    fn test_emoji_fe0f_handling() {
        let input = "\u{1F9D9}\u{200D}\u{2642}\u{FE0F}.eth";
        assert_eq!(
            cps(&normalize(input).unwrap()),
            vec![0x1F9D9, 0x200D, 0x2642, 0x2E, 0x65, 0x74, 0x68]
        );
        assert_eq!(
            cps(&beautify(input).unwrap()),
            vec![0x1F9D9, 0x200D, 0x2642, 0xFE0F, 0x2E, 0x65, 0x74, 0x68]
        );
    }

    #[test]
    fn test_unqualified_emoji_beautifies_to_qualified() {
        let input = "\u{1F9D9}\u{200D}\u{2642}.eth";
        assert_eq!(
            cps(&beautify(input).unwrap()),
            vec![0x1F9D9, 0x200D, 0x2642, 0xFE0F, 0x2E, 0x65, 0x74, 0x68]
        );
    }

    #[test]
    fn test_combining_sequence_composes() {
        assert_eq!(normalize("a\u{0300}.eth").unwrap(), "\u{00E0}.eth");
    }

    #[test]
    fn test_empty_label_fails() {
        assert_eq!(normalize(".eth").unwrap_err(), Error::EmptyLabel);
        assert_eq!(normalize("a..eth").unwrap_err(), Error::EmptyLabel);
        assert_eq!(normalize("eth.").unwrap_err(), Error::EmptyLabel);
    }

    #[test]
    fn test_empty_input_is_empty_output() {
        assert_eq!(normalize("").unwrap(), "");
        assert_eq!(beautify("").unwrap(), "");
    }

    #[test]
    fn test_punycode_shaped_label_passes() {
        assert_eq!(normalize("xn--abc.eth").unwrap(), "xn--abc.eth");
    }

    #[test]
    fn test_mixed_script_label_fails() {
        assert_eq!(
            normalize("a\u{0430}.eth").unwrap_err(),
            Error::DisallowedCharacterInGroup(0x430)
        );
    }

    // ── Greek xi ───────────────────────────────────────

    #[test]
    fn test_greek_xi_beautified_only() {
        let input = "\u{03BE}\u{03B4}.eth";
        assert_eq!(normalize(input).unwrap(), "\u{03BE}\u{03B4}.eth");
        assert_eq!(beautify(input).unwrap(), "\u{039E}\u{03B4}.eth");
    }

    #[test]
    fn test_uppercase_xi_normalizes_down() {
        // Uppercase Ξ maps to ξ; beautify restores it.
        let input = "\u{039E}\u{03B4}.eth";
        assert_eq!(normalize(input).unwrap(), "\u{03BE}\u{03B4}.eth");
        assert_eq!(beautify(input).unwrap(), "\u{039E}\u{03B4}.eth");
    }

    #[test]
    fn test_xi_transform_is_per_label() {
        // The transform is per-label; the ASCII label is unaffected.
        let out = beautify("abc.\u{03BE}").unwrap();
        assert_eq!(out, "abc.\u{039E}");
        let out = beautify("abc.eth").unwrap();
        assert_eq!(out, "abc.eth");
    }

    // ── Properties ─────────────────────────────────────

    const CORPUS: &[&str] = &[
        "Vitalik.eth",
        "RAFFY.ETH",
        "a\u{0300}.eth",
        "\u{1F9D9}\u{200D}\u{2642}\u{FE0F}.eth",
        "\u{03BE}\u{03B4}.eth",
        "xn--abc.eth",
        "1\u{FE0F}\u{20E3}\u{1F680}.eth",
        "\u{0431}\u{0443}\u{043A}\u{0432}\u{0430}.eth",
        "\u{05E9}\u{05DC}\u{05D5}\u{05DD}.eth",
        "\u{3042}\u{308A}\u{304C}\u{3068}\u{3046}.eth",
        "nick.vitalik.eth",
    ];

    #[test]
    fn test_idempotence() {
        for input in CORPUS {
            let once = normalize(input).unwrap();
            let twice = normalize(&once).unwrap();
            assert_eq!(once, twice, "normalize not idempotent for {:?}", input);
        }
    }

    #[test]
    fn test_normalize_absorbs_beautify() {
        for input in CORPUS {
            let direct = normalize(input).unwrap();
            let via_beautify = normalize(&beautify(input).unwrap()).unwrap();
            assert_eq!(
                direct, via_beautify,
                "normalize(beautify(x)) != normalize(x) for {:?}",
                input
            );
        }
    }

    #[test]
    fn test_ignored_characters_collapse() {
        // Inputs differing only by ignored characters normalize identically.
        let plain = normalize("vitalik.eth").unwrap();
        let padded = normalize("vi\u{00AD}talik\u{FE0F}.eth").unwrap();
        assert_eq!(plain, padded);
    }

    #[test]
    fn test_nfc_closure() {
        use unicode_normalization::UnicodeNormalization;
        for input in CORPUS {
            let out = normalize(input).unwrap();
            let renfc: String = out.nfc().collect();
            assert_eq!(out, renfc, "output not NFC-closed for {:?}", input);
        }
    }

    #[test]
    fn test_process_matches_individual_calls() {
        for input in CORPUS {
            let both = process(input).unwrap();
            assert_eq!(both.normalized, normalize(input).unwrap());
            assert_eq!(both.beautified, beautify(input).unwrap());
        }
    }

    #[test]
    fn test_process_propagates_errors() {
        assert_eq!(process(".eth").unwrap_err(), Error::EmptyLabel);
    }

    #[test]
    fn test_determinism_100_iterations() {
        let input = "Vitalik\u{1F9D9}\u{200D}\u{2642}\u{FE0F}.eth";
        let first = process(input).unwrap();
        for i in 0..100 {
            let result = process(input).unwrap();
            assert_eq!(first, result, "Determinism failure at iteration {}", i);
        }
    }
}
