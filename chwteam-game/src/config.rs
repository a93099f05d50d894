//! Tunable tables driving applicant generation.
//!
//! [`GenerationConfig::default`] reproduces the shipped balance. A JSON
//! document may override any subset of fields; everything omitted falls back
//! to the defaults.
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::constants::{
    COST_MAX, COST_MIN, COST_STEP, EXPERIENCE_BONUS_PER_YEAR, EXPERIENCE_MAX_YEARS,
    EXPERIENCE_MIN_YEARS, RARITY_NORMAL_THRESHOLD, RARITY_RARE_THRESHOLD, STAT_MAX,
    TEAM_SIZE, TECH_FLOOR_MAX, TECH_FLOOR_MIN,
};
use crate::roster::{Rarity, Role};
use crate::stats::StatKind;

/// Errors raised when generation configuration invariants are violated.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to parse generation config: {0}")]
    Parse(#[from] serde_json::Error),
    #[error("{field} range invalid (min {min} > max {max})")]
    InvertedRange {
        field: &'static str,
        min: f64,
        max: f64,
    },
    #[error("{field} must be between {min:.2} and {max:.2} (got {value:.2})")]
    RangeViolation {
        field: &'static str,
        min: f64,
        max: f64,
        value: f64,
    },
    #[error("rarity thresholds out of order (normal {normal:.2} > rare {rare:.2})")]
    ThresholdOrder { normal: f64, rare: f64 },
    #[error("applicant pool composition is empty")]
    EmptyPool,
    #[error("applicant pool of {size} cannot fill a team of {required}")]
    PoolTooSmall { size: usize, required: usize },
    #[error("cost step must be non-zero")]
    ZeroCostStep,
}

/// Number of applicants of a given role in each pool.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct RoleQuota {
    pub role: Role,
    pub count: u8,
}

/// Cumulative roll thresholds: `roll < normal` is Normal, `roll < rare` is
/// Rare, anything else is Super Rare.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RarityThresholds {
    pub normal: f64,
    pub rare: f64,
}

impl Default for RarityThresholds {
    fn default() -> Self {
        Self {
            normal: RARITY_NORMAL_THRESHOLD,
            rare: RARITY_RARE_THRESHOLD,
        }
    }
}

/// Base stat range and cost multiplier for a rarity tier.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct RarityTier {
    pub min: u8,
    pub max: u8,
    pub multiplier: f64,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RarityTable {
    pub normal: RarityTier,
    pub rare: RarityTier,
    pub super_rare: RarityTier,
}

impl Default for RarityTable {
    fn default() -> Self {
        Self {
            normal: RarityTier {
                min: 20,
                max: 50,
                multiplier: 1.0,
            },
            rare: RarityTier {
                min: 45,
                max: 75,
                multiplier: 1.5,
            },
            super_rare: RarityTier {
                min: 70,
                max: 99,
                multiplier: 2.5,
            },
        }
    }
}

impl RarityTable {
    #[must_use]
    pub const fn tier(&self, rarity: Rarity) -> &RarityTier {
        match rarity {
            Rarity::Normal => &self.normal,
            Rarity::Rare => &self.rare,
            Rarity::SuperRare => &self.super_rare,
        }
    }
}

/// Per-stat multiplicative bias. Unspecified stats are unbiased.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct StatBias {
    pub knowledge: f64,
    pub communication: f64,
    pub tech_savvy: f64,
    pub resilience: f64,
}

impl Default for StatBias {
    fn default() -> Self {
        Self {
            knowledge: 1.0,
            communication: 1.0,
            tech_savvy: 1.0,
            resilience: 1.0,
        }
    }
}

impl StatBias {
    #[must_use]
    pub const fn get(&self, kind: StatKind) -> f64 {
        match kind {
            StatKind::Knowledge => self.knowledge,
            StatKind::Communication => self.communication,
            StatKind::TechSavvy => self.tech_savvy,
            StatKind::Resilience => self.resilience,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RoleBiasTable {
    pub technician: StatBias,
    pub treatment_ai: StatBias,
    pub examine_ai: StatBias,
    pub apprentice: StatBias,
}

impl Default for RoleBiasTable {
    fn default() -> Self {
        Self {
            technician: StatBias {
                tech_savvy: 1.6,
                resilience: 1.1,
                ..StatBias::default()
            },
            treatment_ai: StatBias {
                knowledge: 1.4,
                resilience: 1.3,
                ..StatBias::default()
            },
            examine_ai: StatBias {
                knowledge: 1.3,
                communication: 1.4,
                ..StatBias::default()
            },
            apprentice: StatBias::default(),
        }
    }
}

impl RoleBiasTable {
    #[must_use]
    pub const fn bias(&self, role: Role) -> &StatBias {
        match role {
            Role::Technician => &self.technician,
            Role::TreatmentAi => &self.treatment_ai,
            Role::ExamineAi => &self.examine_ai,
            Role::Apprentice => &self.apprentice,
        }
    }
}

/// Inclusive stat range used for the technician tech-savvy floor roll.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct StatRange {
    pub min: u8,
    pub max: u8,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ExperienceCfg {
    pub min_years: u8,
    pub max_years: u8,
    /// Flat bonus added to every base stat per year beyond the first.
    pub bonus_per_year: u8,
}

impl Default for ExperienceCfg {
    fn default() -> Self {
        Self {
            min_years: EXPERIENCE_MIN_YEARS,
            max_years: EXPERIENCE_MAX_YEARS,
            bonus_per_year: EXPERIENCE_BONUS_PER_YEAR,
        }
    }
}

/// Output band for applicant cost.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct CostBand {
    pub min: u32,
    pub max: u32,
    pub step: u32,
}

impl Default for CostBand {
    fn default() -> Self {
        Self {
            min: COST_MIN,
            max: COST_MAX,
            step: COST_STEP,
        }
    }
}

/// Complete generation configuration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct GenerationConfig {
    pub composition: Vec<RoleQuota>,
    pub rarity_thresholds: RarityThresholds,
    pub rarity: RarityTable,
    pub role_bias: RoleBiasTable,
    pub tech_floor: StatRange,
    pub experience: ExperienceCfg,
    pub cost: CostBand,
}

impl Default for GenerationConfig {
    fn default() -> Self {
        Self {
            composition: vec![
                RoleQuota {
                    role: Role::Technician,
                    count: 3,
                },
                RoleQuota {
                    role: Role::TreatmentAi,
                    count: 5,
                },
                RoleQuota {
                    role: Role::ExamineAi,
                    count: 5,
                },
                RoleQuota {
                    role: Role::Apprentice,
                    count: 7,
                },
            ],
            rarity_thresholds: RarityThresholds::default(),
            rarity: RarityTable::default(),
            role_bias: RoleBiasTable::default(),
            tech_floor: StatRange {
                min: TECH_FLOOR_MIN,
                max: TECH_FLOOR_MAX,
            },
            experience: ExperienceCfg::default(),
            cost: CostBand::default(),
        }
    }
}

impl GenerationConfig {
    /// Parse and validate a configuration document.
    ///
    /// # Errors
    ///
    /// Returns an error if the JSON is malformed or the tables are inconsistent.
    pub fn from_json(json: &str) -> Result<Self, ConfigError> {
        let config: Self = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    /// Total number of applicants in a generated pool.
    #[must_use]
    pub fn pool_size(&self) -> usize {
        self.composition
            .iter()
            .map(|quota| usize::from(quota.count))
            .sum()
    }

    /// Lowest rarity-weighted stat sum, used as the bottom of the cost map.
    #[must_use]
    pub fn min_cost_score(&self) -> f64 {
        let normal = self.rarity.tier(Rarity::Normal);
        f64::from(normal.min) * 4.0 * normal.multiplier
    }

    /// Highest rarity-weighted stat sum, used as the top of the cost map.
    #[must_use]
    pub fn max_cost_score(&self) -> f64 {
        let super_rare = self.rarity.tier(Rarity::SuperRare);
        f64::from(STAT_MAX) * 4.0 * super_rare.multiplier
    }

    /// Check the configuration invariants.
    ///
    /// # Errors
    ///
    /// Returns the first violated invariant.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.pool_size() == 0 {
            return Err(ConfigError::EmptyPool);
        }
        if self.pool_size() < TEAM_SIZE {
            return Err(ConfigError::PoolTooSmall {
                size: self.pool_size(),
                required: TEAM_SIZE,
            });
        }
        let RarityThresholds { normal, rare } = self.rarity_thresholds;
        for (field, value) in [
            ("rarity_thresholds.normal", normal),
            ("rarity_thresholds.rare", rare),
        ] {
            // Thresholds live in (0, 1].
            if !(value > 0.0 && value <= 1.0) {
                return Err(ConfigError::RangeViolation {
                    field,
                    min: 0.0,
                    max: 1.0,
                    value,
                });
            }
        }
        if normal > rare {
            return Err(ConfigError::ThresholdOrder { normal, rare });
        }
        for (field, tier) in [
            ("rarity.normal", self.rarity.normal),
            ("rarity.rare", self.rarity.rare),
            ("rarity.super_rare", self.rarity.super_rare),
        ] {
            check_stat_range(field, tier.min, tier.max)?;
            check_positive(field, tier.multiplier)?;
        }
        if self.max_cost_score() <= self.min_cost_score() {
            return Err(ConfigError::InvertedRange {
                field: "rarity.multiplier",
                min: self.min_cost_score(),
                max: self.max_cost_score(),
            });
        }
        for role in Role::ALL {
            let bias = self.role_bias.bias(role);
            for kind in StatKind::ALL {
                check_positive("role_bias", bias.get(kind))?;
            }
        }
        check_stat_range("tech_floor", self.tech_floor.min, self.tech_floor.max)?;
        let exp = self.experience;
        if exp.min_years == 0 || exp.min_years > exp.max_years {
            return Err(ConfigError::InvertedRange {
                field: "experience.years",
                min: f64::from(exp.min_years),
                max: f64::from(exp.max_years),
            });
        }
        if self.cost.step == 0 {
            return Err(ConfigError::ZeroCostStep);
        }
        if self.cost.min > self.cost.max {
            return Err(ConfigError::InvertedRange {
                field: "cost",
                min: f64::from(self.cost.min),
                max: f64::from(self.cost.max),
            });
        }
        Ok(())
    }
}

fn check_stat_range(field: &'static str, min: u8, max: u8) -> Result<(), ConfigError> {
    if min > max {
        return Err(ConfigError::InvertedRange {
            field,
            min: f64::from(min),
            max: f64::from(max),
        });
    }
    if max > STAT_MAX {
        return Err(ConfigError::RangeViolation {
            field,
            min: 0.0,
            max: f64::from(STAT_MAX),
            value: f64::from(max),
        });
    }
    Ok(())
}

fn check_positive(field: &'static str, value: f64) -> Result<(), ConfigError> {
    if value.is_finite() && value > 0.0 {
        Ok(())
    } else {
        Err(ConfigError::RangeViolation {
            field,
            min: f64::MIN_POSITIVE,
            max: f64::MAX,
            value,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_config_is_valid_and_sized() {
        let config = GenerationConfig::default();
        config.validate().unwrap();
        assert_eq!(config.pool_size(), 20);
        assert!((config.min_cost_score() - 80.0).abs() < f64::EPSILON);
        assert!((config.max_cost_score() - 990.0).abs() < f64::EPSILON);
    }

    #[test]
    fn empty_document_yields_defaults() {
        let config = GenerationConfig::from_json("{}").unwrap();
        assert_eq!(config, GenerationConfig::default());
    }

    #[test]
    fn partial_overrides_keep_remaining_defaults() {
        let json = r#"{
            "rarity_thresholds": { "normal": 0.5 },
            "role_bias": { "apprentice": { "resilience": 0.9 } }
        }"#;
        let config = GenerationConfig::from_json(json).unwrap();
        assert!((config.rarity_thresholds.normal - 0.5).abs() < f64::EPSILON);
        assert!((config.rarity_thresholds.rare - RARITY_RARE_THRESHOLD).abs() < f64::EPSILON);
        let apprentice = config.role_bias.bias(Role::Apprentice);
        assert!((apprentice.resilience - 0.9).abs() < f64::EPSILON);
        assert!((apprentice.knowledge - 1.0).abs() < f64::EPSILON);
        let technician = config.role_bias.bias(Role::Technician);
        assert!((technician.tech_savvy - 1.6).abs() < f64::EPSILON);
    }

    #[test]
    fn rejects_out_of_order_thresholds() {
        let err = GenerationConfig::from_json(r#"{"rarity_thresholds": {"normal": 0.95, "rare": 0.9}}"#)
            .unwrap_err();
        assert!(matches!(err, ConfigError::ThresholdOrder { .. }));
    }

    #[test]
    fn rejects_inverted_tier_and_overflowing_stats() {
        let mut config = GenerationConfig::default();
        config.rarity.rare = RarityTier {
            min: 80,
            max: 60,
            multiplier: 1.5,
        };
        assert!(matches!(
            config.validate(),
            Err(ConfigError::InvertedRange { field: "rarity.rare", .. })
        ));

        let mut config = GenerationConfig::default();
        config.tech_floor = StatRange { min: 70, max: 120 };
        assert!(matches!(
            config.validate(),
            Err(ConfigError::RangeViolation { field: "tech_floor", .. })
        ));
    }

    #[test]
    fn rejects_empty_pool_and_zero_step() {
        let config = GenerationConfig {
            composition: Vec::new(),
            ..GenerationConfig::default()
        };
        assert!(matches!(config.validate(), Err(ConfigError::EmptyPool)));

        let mut config = GenerationConfig::default();
        config.cost.step = 0;
        assert!(matches!(config.validate(), Err(ConfigError::ZeroCostStep)));
    }

    #[test]
    fn rejects_non_positive_bias() {
        let mut config = GenerationConfig::default();
        config.role_bias.examine_ai.communication = 0.0;
        assert!(matches!(
            config.validate(),
            Err(ConfigError::RangeViolation { field: "role_bias", .. })
        ));
    }

    #[test]
    fn malformed_json_is_a_parse_error() {
        let err = GenerationConfig::from_json("{ not json").unwrap_err();
        assert!(matches!(err, ConfigError::Parse(_)));
        assert!(err.to_string().starts_with("failed to parse generation config"));
    }

    #[test]
    fn rejects_zero_thresholds() {
        let err = GenerationConfig::from_json(r#"{"rarity_thresholds": {"normal": 0.0, "rare": 0.0}}"#)
            .unwrap_err();
        assert!(matches!(
            err,
            ConfigError::RangeViolation {
                field: "rarity_thresholds.normal",
                ..
            }
        ));

        let config = GenerationConfig::from_json(r#"{"rarity_thresholds": {"normal": 1.0, "rare": 1.0}}"#)
            .unwrap();
        assert!((config.rarity_thresholds.rare - 1.0).abs() < f64::EPSILON);
    }

    #[test]
    fn rejects_pool_smaller_than_a_team() {
        let err = GenerationConfig::from_json(r#"{"composition": [{"role": "technician", "count": 3}]}"#)
            .unwrap_err();
        assert!(matches!(
            err,
            ConfigError::PoolTooSmall {
                size: 3,
                required: TEAM_SIZE
            }
        ));

        let config = GenerationConfig::from_json(
            r#"{"composition": [{"role": "technician", "count": 2}, {"role": "apprentice", "count": 3}]}"#,
        )
        .unwrap();
        assert_eq!(config.pool_size(), TEAM_SIZE);
    }
}
