//! Label validator — group resolution, combining-mark, NSM, fenced, and
//! confusable checks
//!
//! Each label is validated independently, left to right. Within a label the
//! stages run in a fixed order and short-circuit on the first violation:
//!
//! 1. NFC (per text token)
//! 2. ASCII fast path
//! 3. Emoji-only label
//! 4. Group resolution (bitmask intersection over the group table)
//! 5. Combining-mark rules
//! 6. NSM rules
//! 7. Fenced-character rules
//! 8. Whole-script confusables
//!
//! A label that passes carries its resolved kind; the assembler needs it for
//! the beautify-only Greek transform.

use unicode_normalization::UnicodeNormalization;

use crate::tables::{tables, Tables, NSM_MAX};
use crate::tokenizer::{CpVec, Token};
use crate::{Error, Result};

// ── Result types ──────────────────────────────────────────

/// Resolved identity of a validated label
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LabelKind {
    /// Pure [a-z0-9-] label
    Ascii,
    /// Label composed entirely of emoji tokens
    Emoji,
    /// Index into the script-group table
    Group(usize),
}

/// A label that passed validation. Text tokens are NFC-normalized.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ValidatedLabel {
    pub tokens: Vec<Token>,
    pub kind: LabelKind,
}

impl ValidatedLabel {
    /// Group name for diagnostics ("ASCII" and "Emoji" are distinguished).
    pub fn group_name(&self) -> &'static str {
        match self.kind {
            LabelKind::Ascii => "ASCII",
            LabelKind::Emoji => "Emoji",
            LabelKind::Group(i) => tables().group(i).name,
        }
    }
}

// ── Public API ────────────────────────────────────────────

/// Validate one label's token run.
///
/// On success the returned label owns the tokens with NFC applied to every
/// text run. Stages short-circuit in the order listed in the module doc;
/// the leftmost violation is the one reported.
pub fn validate_label(tokens: Vec<Token>) -> Result<ValidatedLabel> {
    let t = tables();

    if tokens.is_empty() {
        return Err(Error::EmptyLabel);
    }

    // Stage 1: NFC per text token.
    let tokens = apply_nfc(tokens);

    // Working sequence: all text codepoints, in order.
    let text_cps: Vec<u32> = tokens
        .iter()
        .filter_map(|tok| match tok {
            Token::Text { cps } => Some(cps.iter().copied()),
            Token::Emoji { .. } => None,
        })
        .flatten()
        .collect();
    let has_emoji = tokens.iter().any(|t| matches!(t, Token::Emoji { .. }));

    // Stage 2: ASCII fast path.
    if !has_emoji && text_cps.iter().all(|&cp| cp < 0x80) {
        validate_ascii(t, &text_cps)?;
        return Ok(ValidatedLabel {
            tokens,
            kind: LabelKind::Ascii,
        });
    }

    // Stage 3: emoji-only label.
    if text_cps.is_empty() {
        return Ok(ValidatedLabel {
            tokens,
            kind: LabelKind::Emoji,
        });
    }

    // Stage 4: group resolution.
    let group_index = resolve_group(t, &text_cps)?;
    let group = t.group(group_index);

    // Stage 5: combining-mark rules.
    check_combining_marks(t, &tokens, group_index)?;

    // Stage 6: NSM rules.
    check_nsm(t, &tokens)?;

    // Stage 7: fenced characters.
    check_fenced(t, &tokens)?;

    // Stage 8: whole-script confusables.
    if !group.confusables.is_empty() {
        let non_cm: Vec<u32> = text_cps
            .iter()
            .copied()
            .filter(|&cp| !t.is_combining_mark(cp))
            .collect();
        if !non_cm.is_empty()
            && non_cm.iter().all(|cp| group.confusables.contains(cp))
        {
            return Err(Error::WholeScriptConfusable(group.name));
        }
    }

    Ok(ValidatedLabel {
        tokens,
        kind: LabelKind::Group(group_index),
    })
}

// ── Stage 1: NFC ──────────────────────────────────────────

/// NFC-normalize every text token in place. Emoji tokens never participate.
fn apply_nfc(tokens: Vec<Token>) -> Vec<Token> {
    tokens
        .into_iter()
        .map(|tok| match tok {
            Token::Text { cps } => Token::Text { cps: nfc_cps(&cps) },
            emoji @ Token::Emoji { .. } => emoji,
        })
        .collect()
}

fn nfc_cps(cps: &[u32]) -> CpVec {
    // Every codepoint here came from a &str or a mapping table entry, so the
    // scalar-value invariant holds.
    cps.iter()
        .filter_map(|&cp| char::from_u32(cp))
        .nfc()
        .map(|c| c as u32)
        .collect()
}

// ── Stage 2: ASCII fast path ──────────────────────────────

/// Pure-ASCII labels check against [a-z0-9-] plus the hyphen placement
/// rules, and skip script resolution entirely. Labels beginning `xn--` pass
/// through undecoded: this engine does not interpret Punycode.
fn validate_ascii(t: &Tables, cps: &[u32]) -> Result<()> {
    for &cp in cps {
        if !t.is_ascii_valid(cp) {
            return Err(Error::DisallowedCharacter(cp));
        }
    }
    let first = cps.first().copied();
    let last = cps.last().copied();
    if first == Some(0x2D) || last == Some(0x2D) {
        return Err(Error::HyphenPlacement);
    }
    if cps.len() >= 4
        && cps[2] == 0x2D
        && cps[3] == 0x2D
        && !(cps[0] == 0x78 && cps[1] == 0x6E) // xn--
    {
        return Err(Error::LabelExtension);
    }
    Ok(())
}

// ── Stage 4: group resolution ─────────────────────────────

/// Resolve the label's script group by intersecting per-codepoint membership
/// bitmasks. Combining marks are excluded from the candidate computation.
///
/// Preference order: first group (in table order) whose primary set covers
/// the codepoints; otherwise first group whose primary ∪ secondary covers
/// them. Walking the codepoints in input order makes the first codepoint
/// that empties the candidate set the reported offender.
fn resolve_group(t: &Tables, text_cps: &[u32]) -> Result<usize> {
    let mut any = t.all_groups_mask();
    let mut primary = t.all_groups_mask();

    for &cp in text_cps {
        if t.is_combining_mark(cp) {
            continue;
        }
        let m = t.membership(cp);
        if any & m.any == 0 {
            return Err(Error::DisallowedCharacterInGroup(cp));
        }
        any &= m.any;
        primary &= m.primary;
    }

    let winners = if primary != 0 { primary } else { any };
    Ok(winners.trailing_zeros() as usize)
}

// ── Stage 5: combining marks ──────────────────────────────

fn check_combining_marks(
    t: &Tables,
    tokens: &[Token],
    group_index: usize,
) -> Result<()> {
    // A label may not begin with a combining mark.
    if let Some(Token::Text { cps }) = tokens.first() {
        if let Some(&cp) = cps.first() {
            if t.is_combining_mark(cp) {
                return Err(Error::LeadingCombiningMark(cp));
            }
        }
    }

    // A combining mark may not immediately follow an emoji token.
    for pair in tokens.windows(2) {
        if let [Token::Emoji { .. }, Token::Text { cps }] = pair {
            if let Some(&cp) = cps.first() {
                if t.is_combining_mark(cp) {
                    return Err(Error::CombiningMarkAfterEmoji(cp));
                }
            }
        }
    }

    // Some groups forbid combining marks entirely.
    let group = t.group(group_index);
    if !group.cm_allowed {
        for tok in tokens {
            if let Token::Text { cps } = tok {
                if let Some(&cp) = cps.iter().find(|&&cp| t.is_combining_mark(cp)) {
                    return Err(Error::CombiningMarkInDisallowedGroup {
                        cp,
                        group: group.name,
                    });
                }
            }
        }
    }

    Ok(())
}

// ── Stage 6: non-spacing marks ────────────────────────────

/// NSM runs are bounded and duplicate-free. Runs are scanned per text token:
/// emoji tokens break runs, and adjacent text tokens cannot occur.
fn check_nsm(t: &Tables, tokens: &[Token]) -> Result<()> {
    for tok in tokens {
        let Token::Text { cps } = tok else { continue };
        let mut run: CpVec = CpVec::new();
        for &cp in cps {
            if t.is_nsm(cp) {
                if run.contains(&cp) {
                    return Err(Error::NsmDuplicate(cp));
                }
                run.push(cp);
                if run.len() > NSM_MAX {
                    return Err(Error::NsmTooMany { limit: NSM_MAX });
                }
            } else {
                run.clear();
            }
        }
    }
    Ok(())
}

// ── Stage 7: fenced characters ────────────────────────────

/// Fenced codepoints may not open or close a label and may not be adjacent
/// to each other. Positions interleave text codepoints with emoji tokens;
/// an emoji occupies one (never-fenced) position.
fn check_fenced(t: &Tables, tokens: &[Token]) -> Result<()> {
    // (codepoint, fenced?) per position; emoji collapse to a single slot.
    let mut positions: Vec<(u32, bool)> = Vec::new();
    for tok in tokens {
        match tok {
            Token::Text { cps } => {
                positions.extend(cps.iter().map(|&cp| (cp, t.is_fenced(cp))));
            }
            Token::Emoji { canonical, .. } => {
                let head = canonical.first().copied().unwrap_or(0);
                positions.push((head, false));
            }
        }
    }

    if let Some(&(cp, true)) = positions.first() {
        return Err(Error::FencedLeading(cp));
    }
    if let Some(&(cp, true)) = positions.last() {
        return Err(Error::FencedTrailing(cp));
    }
    for pair in positions.windows(2) {
        if let [(a, true), (b, true)] = *pair {
            return Err(Error::FencedAdjacent(a, b));
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::tokenizer::tokenize;

    fn validate_str(s: &str) -> Result<ValidatedLabel> {
        validate_label(tokenize(s)?)
    }

    fn text_cps(label: &ValidatedLabel) -> Vec<u32> {
        label
            .tokens
            .iter()
            .filter_map(|t| match t {
                Token::Text { cps } => Some(cps.iter().copied()),
                _ => None,
            })
            .flatten()
            .collect()
    }

    // ── ASCII fast path ────────────────────────────────

    #[test]
    fn test_ascii_label() {
        let label = validate_str("vitalik").unwrap();
        assert_eq!(label.kind, LabelKind::Ascii);
        assert_eq!(label.group_name(), "ASCII");
    }

    #[test]
    fn test_ascii_with_digits_and_hyphen() {
        assert_eq!(validate_str("a-b2").unwrap().kind, LabelKind::Ascii);
    }

    #[test]
    fn test_hyphen_at_boundaries() {
        assert_eq!(validate_str("-ab").unwrap_err(), Error::HyphenPlacement);
        assert_eq!(validate_str("ab-").unwrap_err(), Error::HyphenPlacement);
    }

    #[test]
    fn test_label_extension_rejected() {
        assert_eq!(validate_str("ab--cd").unwrap_err(), Error::LabelExtension);
    }

    #[test]
    fn test_xn_label_passes_undecoded() {
        // No Punycode decoding: xn-- labels are plain ASCII here.
        assert_eq!(validate_str("xn--abc").unwrap().kind, LabelKind::Ascii);
    }

    // ── Emoji-only labels ──────────────────────────────

    #[test]
    fn test_emoji_only_label() {
        let label = validate_str("\u{1F680}\u{1F315}").unwrap();
        assert_eq!(label.kind, LabelKind::Emoji);
        assert_eq!(label.group_name(), "Emoji");
    }

    #[test]
    fn test_zwj_emoji_label() {
        let label = validate_str("\u{1F9D9}\u{200D}\u{2642}\u{FE0F}").unwrap();
        assert_eq!(label.kind, LabelKind::Emoji);
    }

    // ── NFC and group resolution ───────────────────────

    #[test]
    fn test_nfc_composes_combining_sequence() {
        // a + combining grave collapses to à and resolves Latin.
        let label = validate_str("a\u{0300}").unwrap();
        assert_eq!(text_cps(&label), vec![0xE0]);
        let latin = tables()
            .groups()
            .iter()
            .position(|g| g.name == "Latin")
            .unwrap();
        assert_eq!(label.kind, LabelKind::Group(latin));
    }

    #[test]
    fn test_greek_label() {
        let label = validate_str("\u{03BE}\u{03B4}").unwrap();
        assert_eq!(label.group_name(), "Greek");
    }

    #[test]
    fn test_primary_preference_over_table_order() {
        // Pure Han resolves to Han (primary) even though Japanese admits the
        // same codepoints as secondary and precedes it in table order.
        let label = validate_str("\u{6F22}\u{5B57}").unwrap();
        assert_eq!(label.group_name(), "Han");
    }

    #[test]
    fn test_japanese_kana_with_han() {
        let label = validate_str("\u{3042}\u{6F22}").unwrap();
        assert_eq!(label.group_name(), "Japanese");
    }

    #[test]
    fn test_mixed_scripts_rejected() {
        // Latin a + Cyrillic а share no group.
        assert_eq!(
            validate_str("a\u{0430}").unwrap_err(),
            Error::DisallowedCharacterInGroup(0x430)
        );
    }

    #[test]
    fn test_unadmitted_codepoint_rejected() {
        assert_eq!(
            validate_str("\u{2200}").unwrap_err(), // ∀
            Error::DisallowedCharacterInGroup(0x2200)
        );
    }

    #[test]
    fn test_digits_are_common() {
        let label = validate_str("\u{0431}123").unwrap();
        assert_eq!(label.group_name(), "Cyrillic");
    }

    // ── Combining-mark rules ───────────────────────────

    #[test]
    fn test_leading_combining_mark() {
        assert_eq!(
            validate_str("\u{0300}a").unwrap_err(),
            Error::LeadingCombiningMark(0x300)
        );
    }

    #[test]
    fn test_combining_mark_after_emoji() {
        assert_eq!(
            validate_str("a\u{1F680}\u{0300}").unwrap_err(),
            Error::CombiningMarkAfterEmoji(0x300)
        );
    }

    #[test]
    fn test_cm_forbidden_group() {
        // Hangul forbids combining marks outright.
        assert_eq!(
            validate_str("\u{D55C}\u{0300}").unwrap_err(),
            Error::CombiningMarkInDisallowedGroup {
                cp: 0x300,
                group: "Hangul"
            }
        );
    }

    // ── NSM rules ──────────────────────────────────────

    #[test]
    fn test_nsm_run_at_limit_passes() {
        // Arabic beh + four distinct marks, in canonical order.
        let label = validate_str("\u{0628}\u{064B}\u{064C}\u{064D}\u{064E}");
        assert!(label.is_ok());
    }

    #[test]
    fn test_nsm_run_over_limit() {
        assert_eq!(
            validate_str("\u{0628}\u{064B}\u{064C}\u{064D}\u{064E}\u{064F}")
                .unwrap_err(),
            Error::NsmTooMany { limit: NSM_MAX }
        );
    }

    #[test]
    fn test_nsm_duplicate() {
        assert_eq!(
            validate_str("\u{0628}\u{064B}\u{064B}").unwrap_err(),
            Error::NsmDuplicate(0x64B)
        );
    }

    // ── Fenced characters ──────────────────────────────

    #[test]
    fn test_fenced_leading() {
        // ' maps to U+2019, which is fenced.
        assert_eq!(
            validate_str("'ab").unwrap_err(),
            Error::FencedLeading(0x2019)
        );
    }

    #[test]
    fn test_fenced_trailing() {
        assert_eq!(
            validate_str("ab'").unwrap_err(),
            Error::FencedTrailing(0x2019)
        );
    }

    #[test]
    fn test_fenced_adjacent() {
        assert_eq!(
            validate_str("a''b").unwrap_err(),
            Error::FencedAdjacent(0x2019, 0x2019)
        );
    }

    #[test]
    fn test_fenced_interior_allowed() {
        assert!(validate_str("a'b").is_ok());
    }

    // ── Whole-script confusables ───────────────────────

    #[test]
    fn test_whole_script_confusable() {
        // Cyrillic о alone is confusable with Latin o.
        assert_eq!(
            validate_str("\u{043E}").unwrap_err(),
            Error::WholeScriptConfusable("Cyrillic")
        );
    }

    #[test]
    fn test_confusable_defused_by_distinct_letter() {
        // Adding a clearly-Cyrillic letter defuses the check.
        assert!(validate_str("\u{043E}\u{0431}").is_ok());
    }

    #[test]
    fn test_latin_does_not_participate() {
        assert!(validate_str("\u{00E0}o").is_ok());
    }

    // ── Empty labels ───────────────────────────────────

    #[test]
    fn test_empty_token_run() {
        assert_eq!(validate_label(Vec::new()).unwrap_err(), Error::EmptyLabel);
    }
}
