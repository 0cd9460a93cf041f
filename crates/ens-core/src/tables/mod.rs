//! Rule tables — the immutable data the whole pipeline runs against
//!
//! The tables are compiled in as static slices (`data`) plus the emoji trie
//! (`emoji`) and assembled once, behind a process-wide `OnceLock`, into the
//! lookup structures the tokenizer and validator use. Loading validates the
//! cross-table invariants; a violation is fatal at initialization and can
//! never surface at call time.
//!
//! Concurrent callers share the loaded tables read-only; no synchronization
//! is needed after the first call.

pub mod data;
pub mod emoji;

use std::collections::HashMap;
use std::sync::OnceLock;

use data::{in_ranges, GroupDef};
use emoji::{EmojiRecord, EmojiTrie};

pub use data::{NSM_MAX, SPEC_VERSION, STOP};

/// Group membership of one codepoint, as bitmasks over the group table.
/// Resolution reduces to bitwise intersection of these.
#[derive(Debug, Clone, Copy, Default)]
pub struct Membership {
    pub any: u32,
    pub primary: u32,
}

/// The loaded rule tables.
pub struct Tables {
    mapped: HashMap<u32, Vec<u32>>,
    trie: EmojiTrie,
    fenced: Vec<u32>,
    all_groups_mask: u32,
}

impl Tables {
    // ── Codepoint classes ──────────────────────────────

    /// Replacement sequence for a mapped codepoint.
    pub fn mapping(&self, cp: u32) -> Option<&[u32]> {
        self.mapped.get(&cp).map(|v| v.as_slice())
    }

    pub fn is_ignored(&self, cp: u32) -> bool {
        in_ranges(cp, data::IGNORED_RANGES)
    }

    pub fn is_disallowed(&self, cp: u32) -> bool {
        in_ranges(cp, data::DISALLOWED_RANGES)
    }

    pub fn is_combining_mark(&self, cp: u32) -> bool {
        in_ranges(cp, data::CM_RANGES)
    }

    pub fn is_nsm(&self, cp: u32) -> bool {
        in_ranges(cp, data::NSM_RANGES)
    }

    pub fn is_fenced(&self, cp: u32) -> bool {
        self.fenced.binary_search(&cp).is_ok()
    }

    /// True for the ASCII label alphabet: [a-z0-9-].
    pub fn is_ascii_valid(&self, cp: u32) -> bool {
        matches!(cp, 0x61..=0x7A | 0x30..=0x39 | 0x2D)
    }

    // ── Emoji ──────────────────────────────────────────

    /// Longest emoji-trie match at the head of `cps`.
    pub fn match_emoji<'a>(&'a self, cps: &[u32]) -> Option<(usize, &'a EmojiRecord)> {
        self.trie.longest_match(cps)
    }

    // ── Groups ─────────────────────────────────────────

    pub fn groups(&self) -> &'static [GroupDef] {
        data::GROUPS
    }

    pub fn group(&self, index: usize) -> &'static GroupDef {
        &data::GROUPS[index]
    }

    /// Mask with one bit set per group in table order.
    pub fn all_groups_mask(&self) -> u32 {
        self.all_groups_mask
    }

    /// Membership masks for one codepoint. Computed by range lookup per
    /// group; the group table is small, so this stays cheap and avoids a
    /// per-codepoint map over the CJK ranges.
    pub fn membership(&self, cp: u32) -> Membership {
        let mut m = Membership::default();
        for (i, g) in data::GROUPS.iter().enumerate() {
            let bit = 1u32 << i;
            if in_ranges(cp, g.primary) {
                m.primary |= bit;
                m.any |= bit;
            } else if in_ranges(cp, g.secondary) {
                m.any |= bit;
            }
        }
        m
    }
}

/// The shared tables, loaded and validated on first use.
pub fn tables() -> &'static Tables {
    static TABLES: OnceLock<Tables> = OnceLock::new();
    TABLES.get_or_init(load)
}

// ── Loader ────────────────────────────────────────────────

fn load() -> Tables {
    let mut mapped: HashMap<u32, Vec<u32>> = HashMap::new();

    for &(first, last, delta) in data::MAPPED_RANGES {
        for cp in first..=last {
            let to = (cp as i64 + delta as i64) as u32;
            mapped.insert(cp, vec![to]);
        }
    }
    for &(cp, seq) in data::MAPPED {
        mapped.insert(cp, seq.to_vec());
    }

    let mut fenced = data::FENCED.to_vec();
    fenced.sort_unstable();

    let tables = Tables {
        mapped,
        trie: emoji::build_trie(),
        fenced,
        all_groups_mask: (1u32 << data::GROUPS.len()) - 1,
    };

    validate(&tables);
    tables
}

/// Startup invariant checks (spec-fatal, never call-time).
fn validate(t: &Tables) {
    assert!(
        data::GROUPS.len() <= 32,
        "group table exceeds the 32-bit membership mask"
    );

    // Mapped, ignored, and disallowed are pairwise disjoint.
    for &cp in t.mapped.keys() {
        assert!(
            !t.is_ignored(cp),
            "codepoint U+{cp:04X} is both mapped and ignored"
        );
        assert!(
            !t.is_disallowed(cp),
            "codepoint U+{cp:04X} is both mapped and disallowed"
        );
    }
    for &(first, last) in data::IGNORED_RANGES {
        for cp in first..=last {
            assert!(
                !t.is_disallowed(cp),
                "codepoint U+{cp:04X} is both ignored and disallowed"
            );
        }
    }

    // NSM is a subset of the combining marks.
    for &(first, last) in data::NSM_RANGES {
        for cp in first..=last {
            assert!(
                t.is_combining_mark(cp),
                "NSM U+{cp:04X} outside the combining-mark set"
            );
        }
    }

    // Group members must be usable: neither disallowed nor ignored.
    for g in data::GROUPS {
        for ranges in [g.primary, g.secondary] {
            for &(first, last) in ranges {
                for cp in first..=last {
                    assert!(
                        !t.is_disallowed(cp) && !t.is_ignored(cp),
                        "group {} admits unusable codepoint U+{cp:04X}",
                        g.name
                    );
                }
            }
        }
        // Confusable sets only describe the group's own members.
        for &cp in g.confusables {
            let bit_ok = in_ranges(cp, g.primary) || in_ranges(cp, g.secondary);
            assert!(
                bit_ok,
                "group {} confusable U+{cp:04X} is not a member",
                g.name
            );
        }
    }

    // Fenced codepoints must be reachable (not disallowed/ignored).
    for &cp in &t.fenced {
        assert!(
            !t.is_disallowed(cp) && !t.is_ignored(cp),
            "fenced codepoint U+{cp:04X} is unreachable"
        );
    }
}
