//! Release version parsing and ordering
//!
//! Bazel tags are not strict SemVer: suffixes are glued straight onto the
//! numbers ("7.0.0rc1") or separated by a dash ("7.1.0-beta.2"), and minor or
//! micro may be missing. This module parses that grammar and defines the total
//! order used to rank releases.
//!
//! Suffixes are compared as plain strings, so "rc10" sorts before "rc2".

use std::cmp::Ordering;
use std::fmt;
use std::str::FromStr;
use std::sync::LazyLock;

use regex::Regex;

use crate::version::error::InvalidVersion;

static VERSION_RE: LazyLock<Regex> = LazyLock::new(|| {
    // A single trailing newline is tolerated and kept out of the suffix
    Regex::new(r"^(\d+)(?:\.(\d+))?(?:\.(\d+))?(.*)\n?$").expect("version regex is valid")
});

static PRERELEASE_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?i)rc|alpha|beta|dev|pre").expect("prerelease regex is valid"));

/// A parsed release version: `major[.minor[.micro]][suffix]`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Version {
    pub major: u64,
    pub minor: u64,
    pub micro: u64,
    /// Everything after the numeric part, verbatim (e.g. "rc1", "-beta.2").
    pub suffix: String,
    /// Whether the suffix carries a prerelease marker (rc, alpha, beta, dev, pre).
    pub is_prerelease: bool,
}

impl Version {
    /// Parse a version string.
    ///
    /// Missing minor and micro components default to zero:
    /// - "7" -> 7.0.0
    /// - "7.1" -> 7.1.0
    /// - "7.1.0rc1" -> 7.1.0 with suffix "rc1"
    ///
    /// Numeric components must fit in a `u64`; larger ones make the string invalid.
    pub fn parse(version: &str) -> Result<Self, InvalidVersion> {
        let invalid = || InvalidVersion(version.to_string());

        let caps = VERSION_RE.captures(version).ok_or_else(invalid)?;
        let number = |idx: usize| -> Result<u64, InvalidVersion> {
            match caps.get(idx) {
                Some(m) => m.as_str().parse().map_err(|_| invalid()),
                None => Ok(0),
            }
        };

        let major = number(1)?;
        let minor = number(2)?;
        let micro = number(3)?;
        let suffix = caps.get(4).map_or("", |m| m.as_str()).to_string();
        let is_prerelease = !suffix.is_empty() && PRERELEASE_RE.is_match(&suffix);

        Ok(Self {
            major,
            minor,
            micro,
            suffix,
            is_prerelease,
        })
    }

    /// Returns true if both versions share the same `major.minor.micro`.
    pub fn same_release(&self, other: &Version) -> bool {
        self.numbers() == other.numbers()
    }

    fn numbers(&self) -> (u64, u64, u64) {
        (self.major, self.minor, self.micro)
    }
}

impl Ord for Version {
    fn cmp(&self, other: &Self) -> Ordering {
        self.numbers()
            .cmp(&other.numbers())
            .then_with(|| match (self.suffix.is_empty(), other.suffix.is_empty()) {
                (true, true) => Ordering::Equal,
                // A final release outranks any suffixed build of the same numbers
                (true, false) => Ordering::Greater,
                (false, true) => Ordering::Less,
                (false, false) => self.suffix.cmp(&other.suffix),
            })
    }
}

impl PartialOrd for Version {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl FromStr for Version {
    type Err = InvalidVersion;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

impl fmt::Display for Version {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{}.{}.{}{}",
            self.major, self.minor, self.micro, self.suffix
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    fn v(s: &str) -> Version {
        Version::parse(s).unwrap()
    }

    #[rstest]
    #[case("1.2.3", 1, 2, 3, "", false)]
    #[case("1.2.3rc1", 1, 2, 3, "rc1", true)]
    #[case("1.2", 1, 2, 0, "", false)]
    #[case("1", 1, 0, 0, "", false)]
    #[case("7.1.0-beta.2", 7, 1, 0, "-beta.2", true)]
    #[case("8.0.0-PRE.20240101.1", 8, 0, 0, "-PRE.20240101.1", true)]
    #[case("6.0.0-hotfix", 6, 0, 0, "-hotfix", false)]
    #[case("5.x", 5, 0, 0, ".x", false)]
    #[case("7.0.0\n", 7, 0, 0, "", false)]
    #[case("7.0.0rc1\n", 7, 0, 0, "rc1", true)]
    fn parse_extracts_components(
        #[case] input: &str,
        #[case] major: u64,
        #[case] minor: u64,
        #[case] micro: u64,
        #[case] suffix: &str,
        #[case] is_prerelease: bool,
    ) {
        assert_eq!(
            Version::parse(input).unwrap(),
            Version {
                major,
                minor,
                micro,
                suffix: suffix.to_string(),
                is_prerelease,
            }
        );
    }

    #[rstest]
    #[case("invalid")]
    #[case("invalid-version")]
    #[case("")]
    #[case("v7.0.0")]
    #[case(".1.2")]
    #[case("99999999999999999999999.0.0")]
    fn parse_rejects_strings_without_leading_number(#[case] input: &str) {
        assert_eq!(
            Version::parse(input),
            Err(InvalidVersion(input.to_string()))
        );
    }

    #[rstest]
    #[case("7.0.0\nrc1")]
    #[case("7.0.0rc1\n\n")]
    fn parse_rejects_newline_inside_version(#[case] input: &str) {
        assert!(Version::parse(input).is_err());
    }

    #[test]
    fn from_str_matches_parse() {
        let parsed: Version = "7.0.0rc2".parse().unwrap();
        assert_eq!(parsed, v("7.0.0rc2"));
    }

    #[rstest]
    #[case("1.0.0", "2.0.0")]
    #[case("1.0.0", "1.1.0")]
    #[case("1.0.0", "1.0.1")]
    #[case("1.1.0", "2.0.0")]
    #[case("1.0.1", "1.1.0")]
    #[case("1.0.0rc1", "1.0.0")]
    #[case("1.0.0rc1", "1.0.0rc2")]
    #[case("9.0.0", "10.0.0")]
    // Suffixes compare lexically, not numerically
    #[case("1.0.0rc10", "1.0.0rc2")]
    fn ordering_ranks_lower_before_higher(#[case] lower: &str, #[case] higher: &str) {
        assert!(v(lower) < v(higher));
        assert!(v(higher) > v(lower));
    }

    #[rstest]
    #[case("rc1")]
    #[case("-beta")]
    #[case("zzz")]
    #[case("-hotfix")]
    fn final_release_outranks_any_suffix(#[case] suffix: &str) {
        let stable = v("3.2.1");
        let suffixed = v(&format!("3.2.1{suffix}"));
        assert!(stable > suffixed);
        assert!(!(stable < suffixed));
    }

    #[test]
    fn equality_requires_all_components() {
        assert_eq!(v("1.0.0"), v("1.0.0"));
        assert_eq!(v("1"), v("1.0.0"));
        assert_ne!(v("1.0.0"), v("2.0.0"));
        assert_ne!(v("1.0.0rc1"), v("1.0.0rc2"));
        assert_eq!(v("1.0").cmp(&v("1.0.0")), Ordering::Equal);
    }

    #[test]
    fn ordering_is_a_total_order() {
        let samples: Vec<Version> = [
            "1", "1.0.0", "1.0.0rc1", "1.0.0rc10", "1.0.0rc2", "1.0.0-beta", "1.0.1", "1.1",
            "2.0.0pre", "2.0.0",
        ]
        .iter()
        .map(|s| v(s))
        .collect();

        for a in &samples {
            assert!(!(a < a));
            for b in &samples {
                assert_eq!(a.cmp(b), b.cmp(a).reverse());
                assert_eq!(a.cmp(b) == Ordering::Equal, a == b);
                for c in &samples {
                    if a < b && b < c {
                        assert!(a < c, "{a} < {b} < {c} but not {a} < {c}");
                    }
                }
            }
        }
    }

    #[rstest]
    #[case("7.0.0rc1", "7.0.0rc1")]
    #[case("7", "7.0.0")]
    #[case("7.1-beta", "7.1.0-beta")]
    fn display_renders_full_version(#[case] input: &str, #[case] expected: &str) {
        assert_eq!(v(input).to_string(), expected);
    }

    #[test]
    fn same_release_ignores_suffix() {
        assert!(v("6.0.0rc1").same_release(&v("6.0.0")));
        assert!(!v("6.0.1").same_release(&v("6.0.0")));
    }
}
