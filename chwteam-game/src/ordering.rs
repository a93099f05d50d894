//! Applicant ordering for pool listings.
use serde::{Deserialize, Serialize};
use std::cmp::{Ordering, Reverse};
use std::fmt;
use std::str::FromStr;

use crate::roster::Character;
use crate::stats::StatKind;

/// Sort key offered when browsing the applicant pool.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ApplicantSort {
    /// Job role label, strongest applicants first within a role.
    #[default]
    Role,
    /// Total stats, highest first.
    Overall,
    /// A single stat, highest first.
    Stat(StatKind),
}

impl ApplicantSort {
    pub const ALL: [Self; 6] = [
        Self::Role,
        Self::Overall,
        Self::Stat(StatKind::Knowledge),
        Self::Stat(StatKind::Communication),
        Self::Stat(StatKind::TechSavvy),
        Self::Stat(StatKind::Resilience),
    ];

    #[must_use]
    pub const fn label(self) -> &'static str {
        match self {
            Self::Role => "Job Role",
            Self::Overall => "Overall Stats",
            Self::Stat(kind) => kind.label(),
        }
    }

    /// Compare two applicants under this key.
    #[must_use]
    pub fn compare(self, a: &Character, b: &Character) -> Ordering {
        match self {
            Self::Role => a
                .role
                .label()
                .cmp(b.role.label())
                .then_with(|| b.total_stats.cmp(&a.total_stats)),
            Self::Overall => b.total_stats.cmp(&a.total_stats),
            Self::Stat(kind) => Reverse(a.stats.get(kind)).cmp(&Reverse(b.stats.get(kind))),
        }
    }
}

impl fmt::Display for ApplicantSort {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

impl FromStr for ApplicantSort {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "role" => Ok(Self::Role),
            "overall" => Ok(Self::Overall),
            "knowledge" => Ok(Self::Stat(StatKind::Knowledge)),
            "communication" => Ok(Self::Stat(StatKind::Communication)),
            "tech_savvy" | "techsavvy" | "tech" => Ok(Self::Stat(StatKind::TechSavvy)),
            "resilience" => Ok(Self::Stat(StatKind::Resilience)),
            other => Err(format!("unknown applicant sort: {other}")),
        }
    }
}

/// Stable in-place sort of `applicants`.
pub fn sort_applicants(applicants: &mut [Character], sort: ApplicantSort) {
    applicants.sort_by(|a, b| sort.compare(a, b));
}
