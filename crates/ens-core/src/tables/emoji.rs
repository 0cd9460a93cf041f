//! Emoji sequence trie
//!
//! Prefix trie keyed by codepoint. Every sequence from the emoji table is
//! inserted in all of its FE0F-optional spellings, so matching never needs to
//! special-case variation selectors: the tokenizer walks raw codepoints and
//! takes the longest terminal it saw.
//!
//! Each terminal carries two projections of the sequence:
//! - `canonical`: the fully-qualified form with every FE0F removed (normalize)
//! - `beautified`: the fully-qualified form itself (beautify)

use std::collections::HashMap;

const FE0F: u32 = 0xFE0F;
const ZWJ: u32 = 0x200D;
const KEYCAP: u32 = 0x20E3;

/// Output projections of one matched emoji sequence.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EmojiRecord {
    pub canonical: Vec<u32>,
    pub beautified: Vec<u32>,
}

#[derive(Debug, Default)]
struct TrieNode {
    children: HashMap<u32, TrieNode>,
    terminal: Option<EmojiRecord>,
}

/// Compact prefix trie over emoji codepoint sequences.
#[derive(Debug, Default)]
pub struct EmojiTrie {
    root: TrieNode,
}

impl EmojiTrie {
    /// Longest match starting at `cps[0]`. Returns the matched length and the
    /// record of the deepest terminal reached, or None if no prefix of `cps`
    /// is an emoji sequence.
    pub fn longest_match<'a>(&'a self, cps: &[u32]) -> Option<(usize, &'a EmojiRecord)> {
        let mut node = &self.root;
        let mut best: Option<(usize, &EmojiRecord)> = None;
        for (i, cp) in cps.iter().enumerate() {
            match node.children.get(cp) {
                Some(next) => {
                    node = next;
                    if let Some(ref rec) = node.terminal {
                        best = Some((i + 1, rec));
                    }
                }
                None => break,
            }
        }
        best
    }

    /// Insert one spelling of a sequence. The first record wins on conflict,
    /// which keeps the table deterministic regardless of variant order.
    fn insert(&mut self, cps: &[u32], record: EmojiRecord) {
        let mut node = &mut self.root;
        for &cp in cps {
            node = node.children.entry(cp).or_default();
        }
        node.terminal.get_or_insert(record);
    }

    /// Insert a fully-qualified sequence under every FE0F-optional spelling.
    fn insert_qualified(&mut self, fq: &[u32]) {
        let record = EmojiRecord {
            canonical: fq.iter().copied().filter(|&c| c != FE0F).collect(),
            beautified: fq.to_vec(),
        };
        // Also the FE0F-stripped spelling and each partial retention.
        for variant in fe0f_variants(fq) {
            self.insert(&variant, record.clone());
        }
    }
}

/// All spellings of `fq` with each FE0F independently present or absent.
fn fe0f_variants(fq: &[u32]) -> Vec<Vec<u32>> {
    let positions: Vec<usize> = fq
        .iter()
        .enumerate()
        .filter_map(|(i, &c)| (c == FE0F).then_some(i))
        .collect();
    let mut out = Vec::with_capacity(1 << positions.len());
    for mask in 0..(1u32 << positions.len()) {
        let mut v = Vec::with_capacity(fq.len());
        for (i, &c) in fq.iter().enumerate() {
            if c == FE0F {
                let slot = positions.iter().position(|&p| p == i).unwrap();
                if mask & (1 << slot) == 0 {
                    continue; // drop this FE0F
                }
            }
            v.push(c);
        }
        out.push(v);
    }
    out
}

// ── Emoji data ────────────────────────────────────────────

/// Single-codepoint emoji with default emoji presentation. Fully qualified
/// without FE0F; canonical and beautified are both the bare codepoint.
const PRESENTATION_RANGES: &[(u32, u32)] = &[
    (0x231A, 0x231B),
    (0x23E9, 0x23EC),
    (0x23F0, 0x23F0),
    (0x23F3, 0x23F3),
    (0x25FD, 0x25FE),
    (0x2614, 0x2615),
    (0x2648, 0x2653),
    (0x267F, 0x267F),
    (0x2693, 0x2693),
    (0x26A1, 0x26A1),
    (0x26AA, 0x26AB),
    (0x26BD, 0x26BE),
    (0x26C4, 0x26C5),
    (0x26CE, 0x26CE),
    (0x26D4, 0x26D4),
    (0x26EA, 0x26EA),
    (0x26F2, 0x26F3),
    (0x26F5, 0x26F5),
    (0x26FA, 0x26FA),
    (0x26FD, 0x26FD),
    (0x2705, 0x2705),
    (0x270A, 0x270B),
    (0x2728, 0x2728),
    (0x274C, 0x274C),
    (0x274E, 0x274E),
    (0x2753, 0x2755),
    (0x2757, 0x2757),
    (0x2795, 0x2797),
    (0x27B0, 0x27B0),
    (0x27BF, 0x27BF),
    (0x2B1B, 0x2B1C),
    (0x2B50, 0x2B50),
    (0x2B55, 0x2B55),
    (0x1F004, 0x1F004),
    (0x1F0CF, 0x1F0CF),
    (0x1F18E, 0x1F18E),
    (0x1F191, 0x1F19A),
    (0x1F201, 0x1F201),
    (0x1F21A, 0x1F21A),
    (0x1F22F, 0x1F22F),
    (0x1F232, 0x1F236),
    (0x1F238, 0x1F23A),
    (0x1F250, 0x1F251),
    (0x1F300, 0x1F320),
    (0x1F32D, 0x1F335),
    (0x1F337, 0x1F37C),
    (0x1F37E, 0x1F393),
    (0x1F3A0, 0x1F3CA),
    (0x1F3CF, 0x1F3D3),
    (0x1F3E0, 0x1F3F0),
    (0x1F3F4, 0x1F3F4),
    (0x1F3F8, 0x1F43E),
    (0x1F440, 0x1F440),
    (0x1F442, 0x1F4FC),
    (0x1F4FF, 0x1F53D),
    (0x1F54B, 0x1F54E),
    (0x1F550, 0x1F567),
    (0x1F57A, 0x1F57A),
    (0x1F595, 0x1F596),
    (0x1F5A4, 0x1F5A4),
    (0x1F5FB, 0x1F64F),
    (0x1F680, 0x1F6C5),
    (0x1F6CC, 0x1F6CC),
    (0x1F6D0, 0x1F6D2),
    (0x1F6EB, 0x1F6EC),
    (0x1F6F4, 0x1F6FC),
    (0x1F7E0, 0x1F7EB),
    (0x1F90C, 0x1F93A),
    (0x1F93C, 0x1F945),
    (0x1F947, 0x1F978),
    (0x1F97A, 0x1F9CB),
    (0x1F9CD, 0x1F9FF),
    (0x1FA70, 0x1FA74),
    (0x1FA78, 0x1FA7A),
    (0x1FA80, 0x1FA86),
    (0x1FA90, 0x1FAA8),
    (0x1FAB0, 0x1FAB6),
    (0x1FAC0, 0x1FAC2),
    (0x1FAD0, 0x1FAD6),
];

/// Single-codepoint emoji whose default presentation is text. Fully qualified
/// with a trailing FE0F; the bare codepoint is an accepted spelling.
const TEXT_PRESENTATION: &[u32] = &[
    0x2600, 0x2601, 0x2602, 0x2603, 0x260E, 0x2611, 0x2618, 0x261D, 0x2620,
    0x2622, 0x2623, 0x2626, 0x262A, 0x262E, 0x262F, 0x2638, 0x2639, 0x263A,
    0x2640, 0x2642, 0x265F, 0x2660, 0x2663, 0x2665, 0x2666, 0x2668, 0x267B,
    0x267E, 0x2692, 0x2694, 0x2695, 0x2696, 0x2697, 0x2699, 0x269B, 0x269C,
    0x26A0, 0x26A7, 0x26B0, 0x26B1, 0x26C8, 0x26CF, 0x26D1, 0x26D3, 0x26E9,
    0x26F0, 0x26F1, 0x26F4, 0x26F7, 0x26F8, 0x26F9, 0x2702, 0x2708, 0x2709,
    0x270C, 0x270D, 0x270F, 0x2712, 0x2714, 0x2716, 0x271D, 0x2721, 0x2733,
    0x2734, 0x2744, 0x2747, 0x2763, 0x2764, 0x27A1, 0x2934, 0x2935, 0x2B05,
    0x2B06, 0x2B07, 0x3030, 0x303D, 0x3297, 0x3299, 0x1F321, 0x1F336,
    0x1F37D, 0x1F396, 0x1F397, 0x1F39E, 0x1F39F, 0x1F3CB, 0x1F3CC, 0x1F3CD,
    0x1F3CE, 0x1F3D4, 0x1F3D5, 0x1F3D6, 0x1F3D7, 0x1F3D8, 0x1F3D9, 0x1F3DA,
    0x1F3DB, 0x1F3DC, 0x1F3DD, 0x1F3DE, 0x1F3DF, 0x1F3F3, 0x1F3F5, 0x1F3F7,
    0x1F43F, 0x1F441, 0x1F4FD, 0x1F549, 0x1F54A, 0x1F56F, 0x1F570, 0x1F573,
    0x1F574, 0x1F575, 0x1F576, 0x1F577, 0x1F578, 0x1F579, 0x1F587, 0x1F58A,
    0x1F58B, 0x1F58C, 0x1F58D, 0x1F590, 0x1F5A5, 0x1F5A8, 0x1F5B1, 0x1F5B2,
    0x1F5BC, 0x1F5C2, 0x1F5C3, 0x1F5C4, 0x1F5D1, 0x1F5D2, 0x1F5D3, 0x1F5DC,
    0x1F5DD, 0x1F5DE, 0x1F5E1, 0x1F5E3, 0x1F5E8, 0x1F5EF, 0x1F5F3, 0x1F5FA,
    0x1F6CB, 0x1F6CD, 0x1F6CE, 0x1F6CF, 0x1F6E0, 0x1F6E1, 0x1F6E2, 0x1F6E3,
    0x1F6E4, 0x1F6E5, 0x1F6E9, 0x1F6F0, 0x1F6F3,
];

/// RGI ZWJ sequences, fully qualified.
const ZWJ_SEQUENCES: &[&[u32]] = &[
    &[0x1F9D9, ZWJ, 0x2640, FE0F], // mage: woman
    &[0x1F9D9, ZWJ, 0x2642, FE0F], // mage: man
    &[0x1F468, ZWJ, 0x1F469, ZWJ, 0x1F466],
    &[0x1F468, ZWJ, 0x1F469, ZWJ, 0x1F467],
    &[0x1F468, ZWJ, 0x1F469, ZWJ, 0x1F467, ZWJ, 0x1F466],
    &[0x1F468, ZWJ, 0x1F466],
    &[0x1F469, ZWJ, 0x1F466],
    &[0x1F469, ZWJ, 0x1F467],
    &[0x1F468, ZWJ, 0x1F4BB], // man technologist
    &[0x1F469, ZWJ, 0x1F4BB], // woman technologist
    &[0x1F9D1, ZWJ, 0x1F4BB],
    &[0x1F468, ZWJ, 0x1F680], // man astronaut
    &[0x1F469, ZWJ, 0x1F680],
    &[0x1F9D1, ZWJ, 0x1F680],
    &[0x1F468, ZWJ, 0x1F373], // man cook
    &[0x1F469, ZWJ, 0x1F373],
    &[0x1F468, ZWJ, 0x2695, FE0F], // man health worker
    &[0x1F469, ZWJ, 0x2695, FE0F],
    &[0x1F46E, ZWJ, 0x2640, FE0F], // police officer
    &[0x1F46E, ZWJ, 0x2642, FE0F],
    &[0x1F3C3, ZWJ, 0x2640, FE0F], // runner
    &[0x1F3C3, ZWJ, 0x2642, FE0F],
    &[0x1F926, ZWJ, 0x2640, FE0F], // facepalm
    &[0x1F926, ZWJ, 0x2642, FE0F],
    &[0x1F937, ZWJ, 0x2640, FE0F], // shrug
    &[0x1F937, ZWJ, 0x2642, FE0F],
    &[0x2764, FE0F, ZWJ, 0x1F525], // heart on fire
    &[0x2764, FE0F, ZWJ, 0x1FA79], // mending heart
    &[0x1F3F3, FE0F, ZWJ, 0x1F308], // rainbow flag
    &[0x1F3F4, ZWJ, 0x2620, FE0F],  // pirate flag
    &[0x1F441, FE0F, ZWJ, 0x1F5E8, FE0F], // eye in speech bubble
    &[0x1F415, ZWJ, 0x1F9BA], // service dog
    &[0x1F408, ZWJ, 0x2B1B],  // black cat
    &[0x1F43B, ZWJ, 0x2744, FE0F], // polar bear
];

/// Bases that accept a skin-tone modifier (emoji-presentation subset).
const MODIFIER_BASES: &[u32] = &[
    0x1F385, 0x1F3C3, 0x1F442, 0x1F443, 0x1F446, 0x1F447, 0x1F448, 0x1F449,
    0x1F44A, 0x1F44B, 0x1F44C, 0x1F44D, 0x1F44E, 0x1F44F, 0x1F450, 0x1F466,
    0x1F467, 0x1F468, 0x1F469, 0x1F46E, 0x1F470, 0x1F471, 0x1F472, 0x1F473,
    0x1F474, 0x1F475, 0x1F476, 0x1F477, 0x1F478, 0x1F47C, 0x1F481, 0x1F482,
    0x1F483, 0x1F485, 0x1F486, 0x1F487, 0x1F4AA, 0x1F575, 0x1F590, 0x1F595,
    0x1F596, 0x1F645, 0x1F646, 0x1F647, 0x1F64B, 0x1F64C, 0x1F64D, 0x1F64E,
    0x1F64F, 0x1F6A3, 0x1F6B4, 0x1F6B5, 0x1F6B6, 0x1F6C0, 0x1F918, 0x1F919,
    0x1F91A, 0x1F91B, 0x1F91C, 0x1F91E, 0x1F91F, 0x1F926, 0x1F930, 0x1F931,
    0x1F932, 0x1F933, 0x1F934, 0x1F935, 0x1F936, 0x1F937, 0x1F938, 0x1F939,
    0x1F93D, 0x1F93E, 0x1F9D1, 0x1F9D2, 0x1F9D3, 0x1F9D4, 0x1F9D5, 0x1F9D6,
    0x1F9D7, 0x1F9D8, 0x1F9D9, 0x1F9DA, 0x1F9DB, 0x1F9DC, 0x1F9DD, 0x270A,
    0x270B, 0x270C, 0x270D,
];

const SKIN_TONES: std::ops::RangeInclusive<u32> = 0x1F3FB..=0x1F3FF;

const REGIONAL_INDICATORS: std::ops::RangeInclusive<u32> = 0x1F1E6..=0x1F1FF;

/// Keycap bases: # * 0-9.
const KEYCAP_BASES: &[u32] = &[
    0x23, 0x2A, 0x30, 0x31, 0x32, 0x33, 0x34, 0x35, 0x36, 0x37, 0x38, 0x39,
];

/// Build the full trie. Called once by the table loader.
pub fn build_trie() -> EmojiTrie {
    let mut trie = EmojiTrie::default();

    for &(first, last) in PRESENTATION_RANGES {
        for cp in first..=last {
            trie.insert_qualified(&[cp]);
        }
    }

    for &cp in TEXT_PRESENTATION {
        trie.insert_qualified(&[cp, FE0F]);
    }

    for seq in ZWJ_SEQUENCES {
        trie.insert_qualified(seq);
    }

    for &base in MODIFIER_BASES {
        for tone in SKIN_TONES {
            trie.insert_qualified(&[base, tone]);
        }
    }

    // Flags: every regional-indicator pair.
    for a in REGIONAL_INDICATORS {
        for b in REGIONAL_INDICATORS {
            trie.insert_qualified(&[a, b]);
        }
    }

    for &base in KEYCAP_BASES {
        trie.insert_qualified(&[base, FE0F, KEYCAP]);
    }

    trie
}

#[cfg(test)]
mod tests {
    use super::*;

    fn trie() -> EmojiTrie {
        build_trie()
    }

    #[test]
    fn test_fe0f_variants() {
        let variants = fe0f_variants(&[0x1F9D9, ZWJ, 0x2642, FE0F]);
        assert_eq!(variants.len(), 2);
        assert!(variants.contains(&vec![0x1F9D9, ZWJ, 0x2642]));
        assert!(variants.contains(&vec![0x1F9D9, ZWJ, 0x2642, FE0F]));
    }

    #[test]
    fn test_single_emoji_match() {
        let t = trie();
        let (len, rec) = t.longest_match(&[0x1F680, 0x61]).unwrap();
        assert_eq!(len, 1);
        assert_eq!(rec.canonical, vec![0x1F680]);
        assert_eq!(rec.beautified, vec![0x1F680]);
    }

    #[test]
    fn test_text_presentation_projections() {
        let t = trie();
        // Bare male sign matches; beautified restores FE0F.
        let (len, rec) = t.longest_match(&[0x2642]).unwrap();
        assert_eq!(len, 1);
        assert_eq!(rec.canonical, vec![0x2642]);
        assert_eq!(rec.beautified, vec![0x2642, FE0F]);
        // Qualified spelling consumes the FE0F.
        let (len, _) = t.longest_match(&[0x2642, FE0F, 0x61]).unwrap();
        assert_eq!(len, 2);
    }

    #[test]
    fn test_zwj_longest_match_wins() {
        let t = trie();
        // Mage alone is an emoji, but the ZWJ sequence is longer.
        let cps = [0x1F9D9, ZWJ, 0x2642, FE0F, 0x2E];
        let (len, rec) = t.longest_match(&cps).unwrap();
        assert_eq!(len, 4);
        assert_eq!(rec.canonical, vec![0x1F9D9, ZWJ, 0x2642]);
        assert_eq!(rec.beautified, vec![0x1F9D9, ZWJ, 0x2642, FE0F]);
    }

    #[test]
    fn test_zwj_sequence_without_fe0f_matches() {
        let t = trie();
        let cps = [0x1F9D9, ZWJ, 0x2642];
        let (len, rec) = t.longest_match(&cps).unwrap();
        assert_eq!(len, 3);
        assert_eq!(rec.beautified, vec![0x1F9D9, ZWJ, 0x2642, FE0F]);
    }

    #[test]
    fn test_incomplete_sequence_falls_back() {
        let t = trie();
        // Mage + ZWJ + 'a' is not a sequence; fall back to the bare mage.
        let cps = [0x1F9D9, ZWJ, 0x61];
        let (len, rec) = t.longest_match(&cps).unwrap();
        assert_eq!(len, 1);
        assert_eq!(rec.canonical, vec![0x1F9D9]);
    }

    #[test]
    fn test_flag_pair() {
        let t = trie();
        let (len, rec) = t.longest_match(&[0x1F1FA, 0x1F1F8]).unwrap();
        assert_eq!(len, 2);
        assert_eq!(rec.canonical, vec![0x1F1FA, 0x1F1F8]);
    }

    #[test]
    fn test_keycap() {
        let t = trie();
        let (len, rec) = t.longest_match(&[0x31, FE0F, KEYCAP]).unwrap();
        assert_eq!(len, 3);
        assert_eq!(rec.canonical, vec![0x31, KEYCAP]);
        assert_eq!(rec.beautified, vec![0x31, FE0F, KEYCAP]);
        // Unqualified spelling.
        let (len, _) = t.longest_match(&[0x31, KEYCAP]).unwrap();
        assert_eq!(len, 2);
        // Bare digit is not an emoji.
        assert!(t.longest_match(&[0x31, 0x61]).is_none());
    }

    #[test]
    fn test_skin_tone() {
        let t = trie();
        let (len, rec) = t.longest_match(&[0x1F44D, 0x1F3FD]).unwrap();
        assert_eq!(len, 2);
        assert_eq!(rec.canonical, vec![0x1F44D, 0x1F3FD]);
    }

    #[test]
    fn test_non_emoji_no_match() {
        let t = trie();
        assert!(t.longest_match(&[0x61, 0x62]).is_none());
        assert!(t.longest_match(&[ZWJ]).is_none());
        assert!(t.longest_match(&[FE0F]).is_none());
    }
}
