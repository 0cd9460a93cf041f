//! Static rule-table data
//!
//! Curated build of the ENS normalization spec release. Each table is a plain
//! sorted slice; the loader in `tables::mod` turns them into lookup structures
//! and checks the cross-table invariants once at startup.
//!
//! Conventions:
//! - Ranges are inclusive `(first, last)` pairs, sorted and non-overlapping.
//! - Mapped/ignored/disallowed are pairwise disjoint (checked by the loader).
//! - Group table order is stable and significant for resolution.

/// Version tag of the spec release these tables were built from.
pub const SPEC_VERSION: &str = "ens-normalize-1.10.0";

/// Maximum number of non-spacing marks in a contiguous run.
pub const NSM_MAX: usize = 4;

/// The label separator. Mapping collapses stop variants onto this.
pub const STOP: u32 = 0x2E;

// ── Mapping table ─────────────────────────────────────────

/// Case-fold style range mappings: every codepoint in `(first, last)` maps to
/// itself plus `delta`.
pub const MAPPED_RANGES: &[(u32, u32, i32)] = &[
    (0x0041, 0x005A, 0x20),    // A-Z -> a-z
    (0x00C0, 0x00D6, 0x20),    // À-Ö -> à-ö
    (0x00D8, 0x00DE, 0x20),    // Ø-Þ -> ø-þ
    (0x0391, 0x03A1, 0x20),    // Α-Ρ -> α-ρ
    (0x03A3, 0x03AB, 0x20),    // Σ-Ϋ -> σ-ϋ
    (0x0400, 0x040F, 0x50),    // Ѐ-Џ -> ѐ-џ
    (0x0410, 0x042F, 0x20),    // А-Я -> а-я
    (0xFF10, 0xFF19, -0xFEE0), // fullwidth digits -> 0-9
    (0xFF21, 0xFF3A, -0xFEC0), // fullwidth A-Z -> a-z
    (0xFF41, 0xFF5A, -0xFEE0), // fullwidth a-z -> a-z
];

/// Singleton mappings: codepoint -> replacement sequence.
pub const MAPPED: &[(u32, &[u32])] = &[
    (0x0027, &[0x2019]),         // apostrophe -> right single quotation mark
    (0x00AA, &[0x0061]),         // feminine ordinal -> a
    (0x00B2, &[0x0032]),         // superscript two -> 2
    (0x00B3, &[0x0033]),         // superscript three -> 3
    (0x00B5, &[0x03BC]),         // micro sign -> greek mu
    (0x00B9, &[0x0031]),         // superscript one -> 1
    (0x00BA, &[0x006F]),         // masculine ordinal -> o
    (0x0386, &[0x03AC]),         // Ά -> ά
    (0x0387, &[0x00B7]),         // greek ano teleia -> middle dot
    (0x0388, &[0x03AD]),         // Έ -> έ
    (0x0389, &[0x03AE]),         // Ή -> ή
    (0x038A, &[0x03AF]),         // Ί -> ί
    (0x038C, &[0x03CC]),         // Ό -> ό
    (0x038E, &[0x03CD]),         // Ύ -> ύ
    (0x038F, &[0x03CE]),         // Ώ -> ώ
    (0x1E9E, &[0x00DF]),         // ẞ -> ß
    (0x2010, &[0x002D]),         // hyphen -> hyphen-minus
    (0x2011, &[0x002D]),         // non-breaking hyphen -> hyphen-minus
    (0x2126, &[0x03C9]),         // ohm sign -> ω
    (0x212A, &[0x006B]),         // kelvin sign -> k
    (0x212B, &[0x00E5]),         // angstrom sign -> å
    (0x3002, &[0x002E]),         // ideographic full stop -> .
    (0xFB00, &[0x0066, 0x0066]), // ﬀ
    (0xFB01, &[0x0066, 0x0069]), // ﬁ
    (0xFB02, &[0x0066, 0x006C]), // ﬂ
    (0xFB03, &[0x0066, 0x0066, 0x0069]),
    (0xFB04, &[0x0066, 0x0066, 0x006C]),
    (0xFB05, &[0x0073, 0x0074]), // ﬅ
    (0xFB06, &[0x0073, 0x0074]), // ﬆ
    (0xFF0D, &[0x002D]),         // fullwidth hyphen-minus -> -
    (0xFF0E, &[0x002E]),         // fullwidth full stop -> .
    (0xFF61, &[0x002E]),         // halfwidth ideographic full stop -> .
];

// ── Ignored set ───────────────────────────────────────────

/// Codepoints removed from the stream without error. FE0F is ignored only
/// when it survives emoji matching (a stray selector outside a sequence).
pub const IGNORED_RANGES: &[(u32, u32)] = &[
    (0x00AD, 0x00AD), // soft hyphen
    (0x034F, 0x034F), // combining grapheme joiner
    (0x180B, 0x180D), // mongolian free variation selectors
    (0xFE00, 0xFE0F), // variation selectors, incl. FE0F
    (0xFEFF, 0xFEFF), // zero width no-break space
];

// ── Disallowed set ────────────────────────────────────────

/// Codepoints that fail tokenization outright. Codepoints absent from every
/// table are still rejected later, by group resolution; this set covers the
/// classes that must never reach a label at all (controls, separators,
/// punctuation, joiners outside emoji, bidi controls).
pub const DISALLOWED_RANGES: &[(u32, u32)] = &[
    (0x0000, 0x0026), // C0 controls, space, ! " # $ % &
    (0x0028, 0x002C), // ( ) * + ,
    (0x002F, 0x002F), // /
    (0x003A, 0x0040), // : ; < = > ? @
    (0x005B, 0x0060), // [ \ ] ^ _ `
    (0x007B, 0x00A9), // { | } ~ DEL, C1 controls, NBSP, ¡-©
    (0x00AB, 0x00AC),
    (0x00AE, 0x00B1),
    (0x00B4, 0x00B4),
    (0x00B6, 0x00B6),
    (0x00B8, 0x00B8),
    (0x00BB, 0x00BF),
    (0x00D7, 0x00D7), // multiplication sign
    (0x00F7, 0x00F7), // division sign
    (0x2000, 0x200F), // spaces, ZWSP, ZWNJ, stray ZWJ, bidi marks
    (0x2012, 0x2018), // dashes, left quote
    (0x201A, 0x205F), // quotes, one-dot leader, line/para sep, format chars
    (0x2060, 0x206F), // word joiner, invisible operators, bidi controls
    (0x20A0, 0x20CF), // currency symbols
    (0xFDD0, 0xFDEF), // noncharacters
    (0xFFF9, 0xFFFF), // interlinear annotation, replacement char
];

// ── Combining marks ───────────────────────────────────────

/// All combining marks recognized by the engine (Mn/Mc/Me for the scripts
/// covered by the group table).
pub const CM_RANGES: &[(u32, u32)] = &[
    (0x0300, 0x036F),
    (0x0483, 0x0489),
    (0x0591, 0x05BD),
    (0x05BF, 0x05BF),
    (0x05C1, 0x05C2),
    (0x05C4, 0x05C5),
    (0x05C7, 0x05C7),
    (0x0610, 0x061A),
    (0x064B, 0x065F),
    (0x0670, 0x0670),
    (0x06D6, 0x06DC),
    (0x06DF, 0x06E4),
    (0x06E7, 0x06E8),
    (0x06EA, 0x06ED),
    (0x0900, 0x0903),
    (0x093A, 0x093C),
    (0x093E, 0x094F),
    (0x0951, 0x0957),
    (0x0962, 0x0963),
    (0x1AB0, 0x1AFF),
    (0x1DC0, 0x1DFF),
    (0x20D0, 0x20F0),
    (0xFE20, 0xFE2F),
];

/// Non-spacing marks: the Mn subset of the combining marks (loader-checked).
pub const NSM_RANGES: &[(u32, u32)] = &[
    (0x0300, 0x036F),
    (0x0483, 0x0487),
    (0x0591, 0x05BD),
    (0x05BF, 0x05BF),
    (0x05C1, 0x05C2),
    (0x05C4, 0x05C5),
    (0x05C7, 0x05C7),
    (0x0610, 0x061A),
    (0x064B, 0x065F),
    (0x0670, 0x0670),
    (0x06D6, 0x06DC),
    (0x06DF, 0x06E4),
    (0x06E7, 0x06E8),
    (0x06EA, 0x06ED),
    (0x0900, 0x0902),
    (0x093A, 0x093A),
    (0x093C, 0x093C),
    (0x0941, 0x0948),
    (0x094D, 0x094D),
    (0x0951, 0x0957),
    (0x0962, 0x0963),
    (0x1AB0, 0x1ABD),
    (0x1DC0, 0x1DFF),
    (0x20D0, 0x20F0),
    (0xFE20, 0xFE2F),
];

// ── Fenced characters ─────────────────────────────────────

/// Placement-restricted codepoints: not first, not last, never adjacent
/// to another fenced codepoint.
pub const FENCED: &[u32] = &[
    0x00B7, // middle dot
    0x05F4, // hebrew punctuation gershayim
    0x2019, // right single quotation mark (the canonical apostrophe)
];

// ── Script groups ─────────────────────────────────────────

/// One script group. `primary` and `secondary` are inclusive range lists;
/// membership is `primary ∪ secondary`. Table order is stable and is the
/// tie-break order of group resolution.
pub struct GroupDef {
    pub name: &'static str,
    pub primary: &'static [(u32, u32)],
    pub secondary: &'static [(u32, u32)],
    pub cm_allowed: bool,
    /// Whole-script-confusable set; empty when the group does not
    /// participate in the confusable check.
    pub confusables: &'static [u32],
}

/// Codepoints admitted by every group alongside its script letters.
const COMMON: &[(u32, u32)] = &[
    (0x002D, 0x002D), // hyphen-minus
    (0x0030, 0x0039), // 0-9
    (0x2019, 0x2019), // apostrophe
];

pub const GROUPS: &[GroupDef] = &[
    GroupDef {
        name: "Latin",
        primary: &[(0x0061, 0x007A), (0x00DF, 0x00F6), (0x00F8, 0x00FF)],
        secondary: &[
            (0x002D, 0x002D),
            (0x0030, 0x0039),
            (0x00B7, 0x00B7), // catalan interpunct
            (0x2019, 0x2019),
        ],
        cm_allowed: true,
        confusables: &[],
    },
    GroupDef {
        name: "Greek",
        primary: &[(0x03AC, 0x03CE)],
        secondary: &[
            (0x002D, 0x002D),
            (0x0030, 0x0039),
            (0x00B7, 0x00B7), // ano teleia maps here
            (0x2019, 0x2019),
        ],
        cm_allowed: true,
        confusables: &[0x03B9, 0x03BD, 0x03BF, 0x03C1, 0x03C5],
    },
    GroupDef {
        name: "Cyrillic",
        primary: &[(0x0430, 0x045F)],
        secondary: COMMON,
        cm_allowed: true,
        confusables: &[
            0x0430, 0x0435, 0x043E, 0x0440, 0x0441, 0x0443, 0x0445, 0x0455,
            0x0456, 0x0458,
        ],
    },
    GroupDef {
        name: "Hebrew",
        primary: &[(0x05D0, 0x05EA), (0x05F0, 0x05F2)],
        secondary: &[
            (0x002D, 0x002D),
            (0x0030, 0x0039),
            (0x05F4, 0x05F4), // gershayim
            (0x2019, 0x2019),
        ],
        cm_allowed: true,
        confusables: &[],
    },
    GroupDef {
        name: "Arabic",
        primary: &[(0x0620, 0x064A)],
        secondary: &[
            (0x002D, 0x002D),
            (0x0030, 0x0039),
            (0x0660, 0x0669), // arabic-indic digits
            (0x066E, 0x066F),
            (0x0671, 0x06D3),
            (0x2019, 0x2019),
        ],
        cm_allowed: true,
        confusables: &[],
    },
    GroupDef {
        name: "Devanagari",
        primary: &[(0x0904, 0x0939), (0x093D, 0x093D), (0x0950, 0x0950)],
        secondary: &[
            (0x002D, 0x002D),
            (0x0030, 0x0039),
            (0x0958, 0x095F),
            (0x0966, 0x096F), // devanagari digits
            (0x2019, 0x2019),
        ],
        cm_allowed: true,
        confusables: &[],
    },
    GroupDef {
        name: "Hangul",
        primary: &[(0xAC00, 0xD7A3)],
        secondary: &[
            (0x002D, 0x002D),
            (0x0030, 0x0039),
            (0x0061, 0x007A),
            (0x2019, 0x2019),
        ],
        cm_allowed: false,
        confusables: &[],
    },
    GroupDef {
        name: "Japanese",
        primary: &[(0x3041, 0x3096), (0x30A1, 0x30FA), (0x30FC, 0x30FE)],
        secondary: &[
            (0x002D, 0x002D),
            (0x0030, 0x0039),
            (0x0061, 0x007A),
            (0x2019, 0x2019),
            (0x4E00, 0x9FFF), // shared han
        ],
        cm_allowed: false,
        confusables: &[],
    },
    GroupDef {
        name: "Han",
        primary: &[(0x4E00, 0x9FFF)],
        secondary: &[
            (0x002D, 0x002D),
            (0x0030, 0x0039),
            (0x0061, 0x007A),
            (0x2019, 0x2019),
            (0x3007, 0x3007), // ideographic zero
        ],
        cm_allowed: false,
        confusables: &[],
    },
];

/// Binary search over an inclusive, sorted range list.
pub fn in_ranges(cp: u32, ranges: &[(u32, u32)]) -> bool {
    ranges
        .binary_search_by(|&(first, last)| {
            if cp < first {
                std::cmp::Ordering::Greater
            } else if cp > last {
                std::cmp::Ordering::Less
            } else {
                std::cmp::Ordering::Equal
            }
        })
        .is_ok()
}
