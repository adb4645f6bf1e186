//! Version string ordering.
//!
//! Total order over pipeline version strings: a dotted numeric release, an
//! optional pre-release segment, and an optional `+local` metadata segment.
//! Release segments compare numerically left to right with missing trailing
//! segments padded as zero, so `0.2 < 0.2.1 < 0.10`. A pre-release sorts
//! strictly before the same release without one; local metadata is a
//! lexicographic final tie-break.
//!
//! Parsing is total: any string yields a [`Version`] and participates in the
//! order. Ties between distinct spellings of the same version (`1.0` vs
//! `1.0.0`) are broken by the store on insertion timestamp, not here.

use std::cmp::Ordering;
use std::fmt;

/// A parsed version string, ordered per the rules above.
#[derive(Debug, Clone)]
pub struct Version {
    raw: String,
    release: Vec<u64>,
    pre: Option<String>,
    local: Option<String>,
}

impl Version {
    /// Parse a version string. Never fails.
    ///
    /// A leading `v`/`V` is ignored (git describe tags commonly carry one).
    /// Segments after the first non-numeric dot-segment form the pre-release;
    /// a mixed segment like `2rc1` contributes its numeric prefix to the
    /// release and the remainder to the pre-release.
    #[must_use]
    pub fn parse(raw: &str) -> Self {
        let trimmed = raw.trim();
        let body = trimmed
            .strip_prefix('v')
            .or_else(|| trimmed.strip_prefix('V'))
            .unwrap_or(trimmed);

        let (body, local) = match body.split_once('+') {
            Some((head, local)) => (head, Some(local.to_string())),
            None => (body, None),
        };

        let mut release = Vec::new();
        let mut pre: Option<String> = None;
        for segment in body.split('.') {
            if let Some(existing) = pre.as_mut() {
                existing.push('.');
                existing.push_str(segment);
            } else if let Ok(n) = segment.parse::<u64>() {
                release.push(n);
            } else {
                let digits: String = segment.chars().take_while(char::is_ascii_digit).collect();
                if digits.is_empty() {
                    pre = Some(segment.to_string());
                } else {
                    release.push(digits.parse().unwrap_or(u64::MAX));
                    pre = Some(segment[digits.len()..].to_string());
                }
            }
        }

        Self {
            raw: raw.to_string(),
            release,
            pre,
            local,
        }
    }

    /// The original string this version was parsed from.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.raw
    }

    /// Whether this version carries a pre-release segment.
    #[must_use]
    pub const fn is_prerelease(&self) -> bool {
        self.pre.is_some()
    }
}

impl fmt::Display for Version {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.raw)
    }
}

impl Ord for Version {
    fn cmp(&self, other: &Self) -> Ordering {
        let segments = self.release.len().max(other.release.len());
        for i in 0..segments {
            let a = self.release.get(i).copied().unwrap_or(0);
            let b = other.release.get(i).copied().unwrap_or(0);
            match a.cmp(&b) {
                Ordering::Equal => {}
                ord => return ord,
            }
        }

        // A pre-release sorts before the same release without one.
        match (&self.pre, &other.pre) {
            (Some(_), None) => return Ordering::Less,
            (None, Some(_)) => return Ordering::Greater,
            (Some(a), Some(b)) => match a.cmp(b) {
                Ordering::Equal => {}
                ord => return ord,
            },
            (None, None) => {}
        }

        // Local metadata: absent sorts below present, else lexicographic.
        match (&self.local, &other.local) {
            (None, None) => Ordering::Equal,
            (None, Some(_)) => Ordering::Less,
            (Some(_), None) => Ordering::Greater,
            (Some(a), Some(b)) => a.cmp(b),
        }
    }
}

impl PartialOrd for Version {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl PartialEq for Version {
    fn eq(&self, other: &Self) -> bool {
        self.cmp(other) == Ordering::Equal
    }
}

impl Eq for Version {}

/// Compare two version strings.
#[must_use]
pub fn compare(a: &str, b: &str) -> Ordering {
    Version::parse(a).cmp(&Version::parse(b))
}

/// Sort version strings in ascending order.
pub fn sort_versions<S: AsRef<str>>(versions: &mut [S]) {
    versions.sort_by(|a, b| compare(a.as_ref(), b.as_ref()));
}
