//! CHW Team Builder Engine
//!
//! Platform-agnostic logic for recruiting a five-person community health
//! worker team: applicant pool generation, team costing, leader selection
//! and efficiency scoring with synergies. No UI or I/O lives here.

pub mod config;
pub mod constants;
pub mod gadgets;
pub mod generation;
pub mod names;
pub mod numbers;
pub mod ordering;
pub mod recruitment;
pub mod roster;
pub mod scoring;
pub mod stats;
pub mod team;

// Re-export commonly used types
pub use config::{ConfigError, GenerationConfig, RarityTable, RarityTier, RoleQuota};
pub use constants::{
    BALANCE_THRESHOLD, GADGET_OPERATION_FEE, INITIAL_INVESTMENT, STAT_MAX, TEAM_SIZE,
};
pub use gadgets::{Gadget, find_gadget, gadget_catalog};
pub use generation::{
    calculate_cost, generate_applicant_pool, generate_character, generate_pool,
    generate_pool_with, roll_rarity, roll_stats,
};
pub use ordering::{ApplicantSort, sort_applicants};
pub use recruitment::{Recruitment, RecruitmentError, SelectionChange};
pub use roster::{Character, CharacterId, Rarity, Role};
pub use scoring::{
    APPRENTICE_BURDEN, AveragedStats, Efficiency, SYNERGISTIC_CORE, Synergy, SynergyList,
    boosted_averages, calculate_efficiency,
};
pub use stats::{StatBoost, StatKind, Stats};
pub use team::{Team, TeamError, build_team, build_team_checked, select_leader};

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;
    use rand::rngs::SmallRng;

    #[test]
    fn pool_to_team_flow() {
        let mut rng = SmallRng::seed_from_u64(2024);
        let pool = generate_pool(&mut rng);
        assert_eq!(pool.len(), GenerationConfig::default().pool_size());

        let gadget = find_gadget("g3").unwrap();
        let team = build_team_checked(&pool[..TEAM_SIZE], gadget).unwrap();
        assert!(team.efficiency_score <= STAT_MAX);
        assert_eq!(
            team.grand_total_cost,
            team.total_personnel_cost + gadget.cost + GADGET_OPERATION_FEE + INITIAL_INVESTMENT
        );
        assert!(team.leader().is_some());
    }
}
