//! Outdated-version detection for declared constraints.
//!
//! Comparison uses SemVer 2.0 precedence from the `semver` crate, so
//! `1.0.0-rc.1 < 1.0.0` and build metadata is ignored. Anything that does not parse is never reported.

use std::cmp::Ordering;

use semver::Version;

use crate::models::UNAVAILABLE;

/// Kind of bump between the declared version and the latest one.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UpdateKind {
    Major,
    Minor,
    Patch,
    /// Same `major.minor.patch`, differing only in pre-release.
    Prerelease,
}

/// Drop range operators and other leading non-digits (`^`, `~`, `>=`, `v`).
pub fn strip_constraint(constraint: &str) -> &str {
    constraint.trim_start_matches(|c: char| !c.is_ascii_digit())
}

fn parse_pair(current: &str, latest: &str) -> Option<(Version, Version)> {
    if latest.is_empty() || latest == UNAVAILABLE {
        return None;
    }
    let current = Version::parse(strip_constraint(current)).ok()?;
    let latest = Version::parse(latest).ok()?;
    Some((current, latest))
}

/// True iff the version in `current_constraint` is strictly older than `latest_version`.
pub fn is_outdated(current_constraint: &str, latest_version: &str) -> bool {
    match parse_pair(current_constraint, latest_version) {
        Some((current, latest)) => current.cmp_precedence(&latest) == Ordering::Less,
        None => false,
    }
}

/// Classify an outdated pair. `None` when not outdated or not comparable.
pub fn update_kind(current_constraint: &str, latest_version: &str) -> Option<UpdateKind> {
    let (current, latest) = parse_pair(current_constraint, latest_version)?;
    if current.cmp_precedence(&latest) != Ordering::Less {
        return None;
    }

    Some(if latest.major != current.major {
        UpdateKind::Major
    } else if latest.minor != current.minor {
        UpdateKind::Minor
    } else if latest.patch != current.patch {
        UpdateKind::Patch
    } else {
        UpdateKind::Prerelease
    })
}
