//! Centralized balance and tuning constants for the team builder.
//!
//! Generation tables that can be overridden at runtime live in
//! [`crate::config::GenerationConfig`]; the values here are fixed rules of
//! the scoring model.

// Team shape ---------------------------------------------------------------
pub const TEAM_SIZE: usize = 5;
pub const STAT_MAX: u8 = 99;

// Budget -------------------------------------------------------------------
pub const INITIAL_INVESTMENT: u32 = 50_000;
pub const GADGET_OPERATION_FEE: u32 = 15_000;

// Generation defaults ------------------------------------------------------
pub(crate) const RARITY_NORMAL_THRESHOLD: f64 = 0.6;
pub(crate) const RARITY_RARE_THRESHOLD: f64 = 0.9;
pub(crate) const EXPERIENCE_MIN_YEARS: u8 = 1;
pub(crate) const EXPERIENCE_MAX_YEARS: u8 = 3;
pub(crate) const EXPERIENCE_BONUS_PER_YEAR: u8 = 5;
pub(crate) const TECH_FLOOR_MIN: u8 = 70;
pub(crate) const TECH_FLOOR_MAX: u8 = 99;
pub(crate) const COST_MIN: u32 = 2_500;
pub(crate) const COST_MAX: u32 = 4_000;
pub(crate) const COST_STEP: u32 = 10;

// Scoring weights ----------------------------------------------------------
pub(crate) const WEIGHT_KNOWLEDGE: f64 = 0.35;
pub(crate) const WEIGHT_COMMUNICATION: f64 = 0.25;
pub(crate) const WEIGHT_TECH_SAVVY: f64 = 0.25;
pub(crate) const WEIGHT_RESILIENCE: f64 = 0.15;

// Synergy thresholds -------------------------------------------------------
pub(crate) const STRENGTH_THRESHOLD: f64 = 75.0;
pub(crate) const STRENGTH_EFFECT: i32 = 5;
/// Every boosted average must exceed this for the Synergistic Core bonus.
pub const BALANCE_THRESHOLD: f64 = 60.0;
pub(crate) const BALANCE_EFFECT: i32 = 10;
pub(crate) const WEAKNESS_THRESHOLD: f64 = 40.0;
pub(crate) const WEAKNESS_EFFECT: i32 = -8;
pub(crate) const BURDEN_RESILIENCE_THRESHOLD: f64 = 50.0;
pub(crate) const BURDEN_APPRENTICE_BASELINE: f64 = 50.0;
pub(crate) const BURDEN_SCALE: f64 = 10.0;

// Score bounds -------------------------------------------------------------
pub(crate) const SCORE_MIN: f64 = 0.0;
pub(crate) const SCORE_MAX: f64 = 99.0;
