//! Character stat vectors and partial gadget boosts.
use serde::{Deserialize, Serialize};
use std::fmt;

use crate::constants::STAT_MAX;

/// One of the four tracked attributes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum StatKind {
    Knowledge,
    Communication,
    TechSavvy,
    Resilience,
}

impl StatKind {
    /// All stats in canonical order.
    pub const ALL: [Self; 4] = [
        Self::Knowledge,
        Self::Communication,
        Self::TechSavvy,
        Self::Resilience,
    ];

    #[must_use]
    pub const fn label(self) -> &'static str {
        match self {
            Self::Knowledge => "Knowledge",
            Self::Communication => "Communication",
            Self::TechSavvy => "Tech Savvy",
            Self::Resilience => "Resilience",
        }
    }
}

impl fmt::Display for StatKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Four bounded stats, each in `0..=99`.
///
/// Deserialized values pass through [`Stats::new`] and are clamped.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(from = "StatsRecord")]
pub struct Stats {
    pub knowledge: u8,
    pub communication: u8,
    pub tech_savvy: u8,
    pub resilience: u8,
}

#[derive(Deserialize)]
struct StatsRecord {
    knowledge: u8,
    communication: u8,
    tech_savvy: u8,
    resilience: u8,
}

impl From<StatsRecord> for Stats {
    fn from(record: StatsRecord) -> Self {
        Self::new(
            record.knowledge,
            record.communication,
            record.tech_savvy,
            record.resilience,
        )
    }
}

impl Stats {
    /// Build a stat vector, clamping every value to the stat ceiling.
    #[must_use]
    pub fn new(knowledge: u8, communication: u8, tech_savvy: u8, resilience: u8) -> Self {
        Self {
            knowledge: knowledge.min(STAT_MAX),
            communication: communication.min(STAT_MAX),
            tech_savvy: tech_savvy.min(STAT_MAX),
            resilience: resilience.min(STAT_MAX),
        }
    }

    /// Build a stat vector by evaluating `f` once per stat in canonical order.
    #[must_use]
    pub fn from_fn(mut f: impl FnMut(StatKind) -> u8) -> Self {
        let knowledge = f(StatKind::Knowledge);
        let communication = f(StatKind::Communication);
        let tech_savvy = f(StatKind::TechSavvy);
        let resilience = f(StatKind::Resilience);
        Self::new(knowledge, communication, tech_savvy, resilience)
    }

    /// Same value for every stat.
    #[must_use]
    pub fn uniform(value: u8) -> Self {
        Self::new(value, value, value, value)
    }

    #[must_use]
    pub const fn get(&self, kind: StatKind) -> u8 {
        match kind {
            StatKind::Knowledge => self.knowledge,
            StatKind::Communication => self.communication,
            StatKind::TechSavvy => self.tech_savvy,
            StatKind::Resilience => self.resilience,
        }
    }

    /// Sum of all four stats.
    #[must_use]
    pub fn total(&self) -> u16 {
        StatKind::ALL
            .iter()
            .map(|&kind| u16::from(self.get(kind)))
            .sum()
    }

    /// Iterate `(kind, value)` pairs in canonical order.
    pub fn iter(&self) -> impl Iterator<Item = (StatKind, u8)> + '_ {
        StatKind::ALL.iter().map(move |&kind| (kind, self.get(kind)))
    }
}

/// Partial stat boost granted by a gadget. Missing stats default to zero.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub struct StatBoost {
    #[serde(default)]
    pub knowledge: u8,
    #[serde(default)]
    pub communication: u8,
    #[serde(default)]
    pub tech_savvy: u8,
    #[serde(default)]
    pub resilience: u8,
}

impl StatBoost {
    #[must_use]
    pub const fn get(&self, kind: StatKind) -> u8 {
        match kind {
            StatKind::Knowledge => self.knowledge,
            StatKind::Communication => self.communication,
            StatKind::TechSavvy => self.tech_savvy,
            StatKind::Resilience => self.resilience,
        }
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        StatKind::ALL.iter().all(|&kind| self.get(kind) == 0)
    }
}
