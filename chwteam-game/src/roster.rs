//! Applicant identities, roles and rarity tiers.
use serde::{Deserialize, Serialize};
use std::fmt;

use crate::stats::Stats;

/// Job category of an applicant. Roles bias stat generation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Role {
    Technician,
    TreatmentAi,
    ExamineAi,
    Apprentice,
}

impl Role {
    /// All roles in pool-generation order.
    pub const ALL: [Self; 4] = [
        Self::Technician,
        Self::TreatmentAi,
        Self::ExamineAi,
        Self::Apprentice,
    ];

    #[must_use]
    pub const fn label(self) -> &'static str {
        match self {
            Self::Technician => "Technician",
            Self::TreatmentAi => "AI-CHW (Treatment)",
            Self::ExamineAi => "AI-CHW (Examine)",
            Self::Apprentice => "Apprentice",
        }
    }

    /// Core members are everyone except apprentices.
    #[must_use]
    pub const fn is_core(self) -> bool {
        !matches!(self, Self::Apprentice)
    }
}

impl fmt::Display for Role {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Rarity tier controlling stat range and cost multiplier.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum Rarity {
    #[serde(rename = "n")]
    Normal,
    #[serde(rename = "r")]
    Rare,
    #[serde(rename = "sr")]
    SuperRare,
}

impl Rarity {
    pub const ALL: [Self; 3] = [Self::Normal, Self::Rare, Self::SuperRare];

    #[must_use]
    pub const fn label(self) -> &'static str {
        match self {
            Self::Normal => "Normal",
            Self::Rare => "Rare",
            Self::SuperRare => "Super Rare",
        }
    }

    /// Short badge used in compact listings.
    #[must_use]
    pub const fn code(self) -> &'static str {
        match self {
            Self::Normal => "N",
            Self::Rare => "R",
            Self::SuperRare => "SR",
        }
    }
}

impl fmt::Display for Rarity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Identity of an applicant, unique within a pool.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct CharacterId(pub String);

impl CharacterId {
    #[must_use]
    pub fn new(value: impl Into<String>) -> Self {
        Self(value.into())
    }

    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for CharacterId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for CharacterId {
    fn from(value: &str) -> Self {
        Self::new(value)
    }
}

/// A generated applicant.
///
/// Everything except `is_leader` is fixed at generation time; the leader flag
/// is only ever set on the copies held by a built team. Deserialization
/// recomputes `total_stats` from the stats rather than trusting the input.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "CharacterRecord")]
pub struct Character {
    pub id: CharacterId,
    pub name: String,
    pub role: Role,
    pub rarity: Rarity,
    pub stats: Stats,
    /// Sum of the four stats.
    pub total_stats: u16,
    pub cost: u32,
    /// Years of experience, `1..=3`.
    pub experience: u8,
    #[serde(default)]
    pub is_leader: bool,
}

#[derive(Deserialize)]
struct CharacterRecord {
    id: CharacterId,
    name: String,
    role: Role,
    rarity: Rarity,
    stats: Stats,
    cost: u32,
    experience: u8,
    #[serde(default)]
    is_leader: bool,
}

impl From<CharacterRecord> for Character {
    fn from(record: CharacterRecord) -> Self {
        Self {
            is_leader: record.is_leader,
            ..Self::new(
                record.id,
                record.name,
                record.role,
                record.rarity,
                record.stats,
                record.cost,
                record.experience,
            )
        }
    }
}

impl Character {
    /// Assemble a character, deriving the stat total.
    #[must_use]
    pub fn new(
        id: CharacterId,
        name: impl Into<String>,
        role: Role,
        rarity: Rarity,
        stats: Stats,
        cost: u32,
        experience: u8,
    ) -> Self {
        Self {
            id,
            name: name.into(),
            role,
            rarity,
            total_stats: stats.total(),
            stats,
            cost,
            experience,
            is_leader: false,
        }
    }

    #[must_use]
    pub const fn is_core(&self) -> bool {
        self.role.is_core()
    }
}
