//! Build-label parsing and version ordering.
//!
//! Directory listings name builds with either a dotted 4-part number
//! (`1.2.3.4567/`) or a hyphenated stem with a trailing revision
//! (`feature-sync.812/`). Neither form is inherently ordered as a string, so
//! labels are parsed into a [`VersionKey`] before comparison.
//!
//! Parsing is total: a label that matches neither scheme, or whose digits
//! overflow, degrades to the all-zero sentinel key instead of erroring —
//! discovery must never abort on one bad listing entry. The sentinel compares
//! equal to itself and below every real key, so unparseable labels can never
//! become a discovery winner on their own.

use std::sync::LazyLock;

use regex::Regex;

static DOTTED: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(\d+)\.(\d+)\.(\d+)\.(\d+)").expect("valid regex"));

static TRAILING_REVISION: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"[-\w]+\.(\d+)").expect("valid regex"));

/// A build label parsed into a lexicographically ordered 4-tuple.
///
/// Revision-scheme labels embed as `(revision, 0, 0, 0)`; unparseable labels
/// become [`VersionKey::SENTINEL`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub struct VersionKey(pub u64, pub u64, pub u64, pub u64);

impl VersionKey {
    /// The smallest key; result of parsing an unparseable label.
    pub const SENTINEL: Self = Self(0, 0, 0, 0);

    /// Parse a label using both schemes: dotted 4-part first, then the
    /// trailing-revision form, then the sentinel.
    #[must_use]
    pub fn parse(label: &str) -> Self {
        let key = Self::parse_dotted(label);
        if !key.is_sentinel() {
            return key;
        }
        parse_revision(label).map_or(Self::SENTINEL, Self::from_revision)
    }

    /// Parse only the dotted 4-part scheme; anything else is the sentinel.
    ///
    /// This is the key the unbounded ("master") selection regime uses, so a
    /// stray revision-style label on a trunk listing cannot outrank a fully
    /// numbered build.
    #[must_use]
    pub fn parse_dotted(label: &str) -> Self {
        let Some(caps) = DOTTED.captures(trim_label(label)) else {
            return Self::SENTINEL;
        };

        let mut parts = [0u64; 4];
        for (slot, group) in parts.iter_mut().zip(1usize..=4) {
            // Overflow degrades to the sentinel rather than propagating.
            match caps[group].parse() {
                Ok(n) => *slot = n,
                Err(_) => return Self::SENTINEL,
            }
        }
        Self(parts[0], parts[1], parts[2], parts[3])
    }

    /// Embed a bounded-scheme revision for cross-scheme comparison.
    #[must_use]
    pub const fn from_revision(revision: u64) -> Self {
        Self(revision, 0, 0, 0)
    }

    /// Whether this is the unparseable-label sentinel.
    #[must_use]
    pub fn is_sentinel(self) -> bool {
        self == Self::SENTINEL
    }
}

/// Extract the trailing revision from a bounded-scheme label.
///
/// Matches a `<stem>.<digits>` suffix where the stem is word characters and
/// hyphens. Returns `None` for labels without such a suffix and for digits
/// that overflow.
#[must_use]
pub fn parse_revision(label: &str) -> Option<u64> {
    let caps = TRAILING_REVISION.captures(trim_label(label))?;
    caps[1].parse().ok()
}

/// Strip the path decorations a listing entry carries (`./` prefixes,
/// trailing slashes) before pattern matching.
fn trim_label(label: &str) -> &str {
    label.trim_matches(['.', '/'])
}
