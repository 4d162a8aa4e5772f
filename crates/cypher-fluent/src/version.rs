// Dweve Cypher Fluent - Immutable Cypher query builder
//
// Copyright (c) 2025 Dweve IP B.V. and individual contributors.
//
// SPDX-License-Identifier: Apache-2.0
//
// Licensed under the Apache License, Version 2.0 (the "License");
// you may not use this file except in compliance with the License.
// You may obtain a copy of the License in the LICENSE file at the
// root of this repository or at: http://www.apache.org/licenses/LICENSE-2.0
//
// Unless required by applicable law or agreed to in writing, software
// distributed under the License is distributed on an "AS IS" BASIS,
// WITHOUT WARRANTIES OR CONDITIONS OF ANY KIND, either express or implied.
// See the License for the specific language governing permissions and
// limitations under the License.

//! Server versions and per-clause availability windows.
//!
//! Some clauses only exist on some Neo4j releases. The 1.8 milestones are the
//! awkward part: `RELATE` shipped in the early 1.8 milestones and was renamed
//! to `CREATE UNIQUE` in 1.8.M07. Milestone `1.8.Mnn` is reported as
//! `1.8.0.nn`, so the two gates below are written against four-component
//! versions.
//!
//! | Clause | Unsupported on |
//! |--------|----------------|
//! | `RELATE` | exactly `1.8`, and `>= 1.8.0.7` |
//! | `CREATE UNIQUE` | `< 1.8`, and `1.8.0.1 ..= 1.8.0.6` |

use serde::{Deserialize, Serialize};
use std::fmt;
use std::ops::Bound;
use std::str::FromStr;

use crate::error::{CypherError, Result};

/// A Neo4j server version with two to four components.
///
/// Missing trailing components sort below any present component, so
/// `1.8 < 1.8.0 < 1.8.0.0 < 1.8.0.1`. Equality is structural: `1.8` and
/// `1.8.0` are different versions.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct ServerVersion {
    major: u32,
    minor: u32,
    build: Option<u32>,
    revision: Option<u32>,
}

impl ServerVersion {
    /// A two-component version, e.g. `1.8`.
    pub const fn new(major: u32, minor: u32) -> Self {
        Self {
            major,
            minor,
            build: None,
            revision: None,
        }
    }

    /// A three-component version, e.g. `1.9.0`.
    pub const fn with_build(major: u32, minor: u32, build: u32) -> Self {
        Self {
            major,
            minor,
            build: Some(build),
            revision: None,
        }
    }

    /// A four-component version, e.g. `1.8.0.7`.
    pub const fn with_revision(major: u32, minor: u32, build: u32, revision: u32) -> Self {
        Self {
            major,
            minor,
            build: Some(build),
            revision: Some(revision),
        }
    }

    /// Major component.
    pub fn major(&self) -> u32 {
        self.major
    }

    /// Minor component.
    pub fn minor(&self) -> u32 {
        self.minor
    }

    /// Build component, if reported.
    pub fn build(&self) -> Option<u32> {
        self.build
    }

    /// Revision component, if reported.
    pub fn revision(&self) -> Option<u32> {
        self.revision
    }

    /// Parse a version as reported by the server.
    ///
    /// Accepts dotted numbers (`1.8`, `1.9.0`, `1.8.0.4`) and milestone
    /// releases (`1.8.M07` is `1.8.0.7`). Anything after a `-` is ignored,
    /// so `1.9-SNAPSHOT` is `1.9`.
    ///
    /// ```
    /// # use cypher_fluent::ServerVersion;
    /// assert_eq!(ServerVersion::parse("1.8.M07")?, ServerVersion::with_revision(1, 8, 0, 7));
    /// assert_eq!(ServerVersion::parse("1.9-SNAPSHOT")?, ServerVersion::new(1, 9));
    /// # Ok::<(), cypher_fluent::CypherError>(())
    /// ```
    pub fn parse(input: &str) -> Result<Self> {
        let invalid = || CypherError::InvalidVersion(input.to_string());

        let trimmed = input.trim();
        let core = trimmed.split('-').next().unwrap_or(trimmed);
        let parts: Vec<&str> = core.split('.').collect();

        let number = |s: &str| -> Result<u32> {
            if s.is_empty() || !s.bytes().all(|b| b.is_ascii_digit()) {
                return Err(invalid());
            }
            s.parse::<u32>().map_err(|_| invalid())
        };

        match parts.as_slice() {
            [major, minor] => Ok(Self::new(number(major)?, number(minor)?)),
            [major, minor, third] => match milestone(third) {
                Some(m) => Ok(Self::with_revision(
                    number(major)?,
                    number(minor)?,
                    0,
                    number(m)?,
                )),
                None => Ok(Self::with_build(
                    number(major)?,
                    number(minor)?,
                    number(third)?,
                )),
            },
            [major, minor, build, revision] => Ok(Self::with_revision(
                number(major)?,
                number(minor)?,
                number(build)?,
                number(revision)?,
            )),
            _ => Err(invalid()),
        }
    }
}

/// `M07` / `m07` -> `07`.
fn milestone(part: &str) -> Option<&str> {
    part.strip_prefix('M').or_else(|| part.strip_prefix('m'))
}

impl FromStr for ServerVersion {
    type Err = CypherError;

    fn from_str(s: &str) -> Result<Self> {
        Self::parse(s)
    }
}

impl fmt::Display for ServerVersion {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}.{}", self.major, self.minor)?;
        if let Some(build) = self.build {
            write!(f, ".{}", build)?;
        }
        if let Some(revision) = self.revision {
            write!(f, ".{}", revision)?;
        }
        Ok(())
    }
}

/// A window of server versions with explicit inclusive/exclusive bounds.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct VersionRange {
    start: Bound<ServerVersion>,
    end: Bound<ServerVersion>,
}

impl VersionRange {
    /// A range from explicit bounds.
    pub const fn new(start: Bound<ServerVersion>, end: Bound<ServerVersion>) -> Self {
        Self { start, end }
    }

    /// Exactly one version: `[v, v]`.
    pub const fn exactly(version: ServerVersion) -> Self {
        Self::new(Bound::Included(version), Bound::Included(version))
    }

    /// Every version strictly below `version`.
    pub const fn below(version: ServerVersion) -> Self {
        Self::new(Bound::Unbounded, Bound::Excluded(version))
    }

    /// `version` and everything after it.
    pub const fn at_least(version: ServerVersion) -> Self {
        Self::new(Bound::Included(version), Bound::Unbounded)
    }

    /// `[low, high]`, both ends included.
    pub const fn inclusive(low: ServerVersion, high: ServerVersion) -> Self {
        Self::new(Bound::Included(low), Bound::Included(high))
    }

    /// Check whether `version` falls inside this range.
    pub fn contains(&self, version: &ServerVersion) -> bool {
        let after_start = match &self.start {
            Bound::Included(low) => version >= low,
            Bound::Excluded(low) => version > low,
            Bound::Unbounded => true,
        };
        let before_end = match &self.end {
            Bound::Included(high) => version <= high,
            Bound::Excluded(high) => version < high,
            Bound::Unbounded => true,
        };
        after_start && before_end
    }
}

impl fmt::Display for VersionRange {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match (&self.start, &self.end) {
            (Bound::Included(a), Bound::Included(b)) if a == b => write!(f, "= {}", a),
            (Bound::Unbounded, Bound::Unbounded) => write!(f, "any version"),
            (Bound::Unbounded, Bound::Excluded(b)) => write!(f, "< {}", b),
            (Bound::Unbounded, Bound::Included(b)) => write!(f, "<= {}", b),
            (Bound::Included(a), Bound::Unbounded) => write!(f, ">= {}", a),
            (Bound::Excluded(a), Bound::Unbounded) => write!(f, "> {}", a),
            (start, end) => {
                match start {
                    Bound::Included(a) => write!(f, "[{}", a)?,
                    Bound::Excluded(a) => write!(f, "({}", a)?,
                    Bound::Unbounded => write!(f, "(")?,
                }
                write!(f, ", ")?;
                match end {
                    Bound::Included(b) => write!(f, "{}]", b),
                    Bound::Excluded(b) => write!(f, "{})", b),
                    Bound::Unbounded => write!(f, ")"),
                }
            }
        }
    }
}

/// The versions a clause keyword cannot be used against.
#[derive(Debug, Clone, Copy)]
pub struct ClauseGate {
    keyword: &'static str,
    unsupported: &'static [VersionRange],
    advice: &'static str,
}

const V1_8: ServerVersion = ServerVersion::new(1, 8);
const V1_8_M01: ServerVersion = ServerVersion::with_revision(1, 8, 0, 1);
const V1_8_M06: ServerVersion = ServerVersion::with_revision(1, 8, 0, 6);
const V1_8_M07: ServerVersion = ServerVersion::with_revision(1, 8, 0, 7);

impl ClauseGate {
    /// `RELATE`, renamed to `CREATE UNIQUE` in 1.8.M07.
    pub const RELATE: ClauseGate = ClauseGate {
        keyword: "RELATE",
        unsupported: &[VersionRange::exactly(V1_8), VersionRange::at_least(V1_8_M07)],
        advice: "RELATE was renamed to CREATE UNIQUE in Neo4j 1.8.M07; use create_unique instead",
    };

    /// `CREATE UNIQUE`, introduced in 1.8.M07.
    pub const CREATE_UNIQUE: ClauseGate = ClauseGate {
        keyword: "CREATE UNIQUE",
        unsupported: &[
            VersionRange::below(V1_8),
            VersionRange::inclusive(V1_8_M01, V1_8_M06),
        ],
        advice: "CREATE UNIQUE was introduced in Neo4j 1.8.M07; upgrade the server or use relate instead",
    };

    /// Every gated clause.
    pub fn all() -> [ClauseGate; 2] {
        [Self::RELATE, Self::CREATE_UNIQUE]
    }

    /// The clause keyword this gate guards.
    pub fn keyword(&self) -> &'static str {
        self.keyword
    }

    /// The version windows the keyword is rejected in.
    pub fn unsupported_ranges(&self) -> &'static [VersionRange] {
        self.unsupported
    }

    /// Check whether the keyword can be sent to `version`.
    pub fn is_supported(&self, version: &ServerVersion) -> bool {
        !self.unsupported.iter().any(|range| range.contains(version))
    }

    /// Fail with `UnsupportedOperation` if the keyword is unavailable on `version`.
    pub fn check(&self, version: &ServerVersion) -> Result<()> {
        match self.unsupported.iter().find(|range| range.contains(version)) {
            None => Ok(()),
            Some(range) => Err(CypherError::UnsupportedOperation(format!(
                "{} is not supported by Neo4j {} (unsupported {}): {}",
                self.keyword, version, range, self.advice
            ))),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn v(s: &str) -> ServerVersion {
        ServerVersion::parse(s).unwrap()
    }

    #[test]
    fn test_parse_dotted() {
        assert_eq!(v("1.8"), ServerVersion::new(1, 8));
        assert_eq!(v("1.9.0"), ServerVersion::with_build(1, 9, 0));
        assert_eq!(v(" 1.8.0.4 "), ServerVersion::with_revision(1, 8, 0, 4));
    }

    #[test]
    fn test_parse_milestones_and_suffixes() {
        assert_eq!(v("1.8.M01"), ServerVersion::with_revision(1, 8, 0, 1));
        assert_eq!(v("1.8.m07"), ServerVersion::with_revision(1, 8, 0, 7));
        assert_eq!(v("1.9-SNAPSHOT"), ServerVersion::new(1, 9));
        assert_eq!(v("1.9.M02-SNAPSHOT"), ServerVersion::with_revision(1, 9, 0, 2));
    }

    #[test]
    fn test_parse_rejects_garbage() {
        for bad in ["", "1", "1.", "a.b", "1.8.0.0.1", "1.8.RC1", "1.-8", "1.8.M"] {
            assert!(
                matches!(ServerVersion::parse(bad), Err(CypherError::InvalidVersion(_))),
                "'{}' should not parse",
                bad
            );
        }
    }

    #[test]
    fn test_display_roundtrip() {
        for s in ["1.8", "1.9.0", "1.8.0.7"] {
            assert_eq!(v(s).to_string(), s);
        }
    }

    #[test]
    fn test_missing_components_sort_first() {
        assert!(v("1.8") < v("1.8.0"));
        assert!(v("1.8.0") < v("1.8.0.0"));
        assert!(v("1.8.0.0") < v("1.8.0.1"));
        assert!(v("1.7.9.9") < v("1.8"));
        assert_ne!(v("1.8"), v("1.8.0"));
    }

    #[test]
    fn test_range_contains() {
        let range = VersionRange::inclusive(V1_8_M01, V1_8_M06);
        assert!(!range.contains(&v("1.8.0.0")));
        assert!(range.contains(&v("1.8.0.1")));
        assert!(range.contains(&v("1.8.0.6")));
        assert!(!range.contains(&v("1.8.0.7")));

        assert!(VersionRange::below(V1_8).contains(&v("1.7")));
        assert!(!VersionRange::below(V1_8).contains(&V1_8));
        assert!(VersionRange::at_least(V1_8_M07).contains(&v("2.0")));
    }

    #[test]
    fn test_range_display() {
        assert_eq!(VersionRange::exactly(V1_8).to_string(), "= 1.8");
        assert_eq!(VersionRange::below(V1_8).to_string(), "< 1.8");
        assert_eq!(VersionRange::at_least(V1_8_M07).to_string(), ">= 1.8.0.7");
        assert_eq!(
            VersionRange::inclusive(V1_8_M01, V1_8_M06).to_string(),
            "[1.8.0.1, 1.8.0.6]"
        );
    }

    #[test]
    fn test_relate_gate() {
        let gate = ClauseGate::RELATE;
        assert!(gate.is_supported(&v("1.7")));
        assert!(gate.is_supported(&v("1.8.0.6")));
        assert!(gate.is_supported(&v("1.8.0")));
        assert!(!gate.is_supported(&v("1.8")));
        assert!(!gate.is_supported(&v("1.8.0.7")));
        assert!(!gate.is_supported(&v("1.9.0")));
    }

    #[test]
    fn test_create_unique_gate() {
        let gate = ClauseGate::CREATE_UNIQUE;
        assert!(!gate.is_supported(&v("1.7.2")));
        assert!(gate.is_supported(&v("1.8")));
        assert!(gate.is_supported(&v("1.8.0")));
        assert!(gate.is_supported(&v("1.8.0.0")));
        assert!(!gate.is_supported(&v("1.8.0.1")));
        assert!(!gate.is_supported(&v("1.8.0.6")));
        assert!(gate.is_supported(&v("1.8.0.7")));
        assert!(gate.is_supported(&v("1.9.0")));
    }

    #[test]
    fn test_check_message_names_clause_and_version() {
        let err = ClauseGate::RELATE.check(&v("1.9.0")).unwrap_err();
        let msg = err.to_string();
        assert!(matches!(err, CypherError::UnsupportedOperation(_)));
        assert!(msg.contains("RELATE"));
        assert!(msg.contains("1.9.0"));
        assert!(msg.contains(">= 1.8.0.7"));
    }
}
