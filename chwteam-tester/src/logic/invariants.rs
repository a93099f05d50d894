//! Property checks applied to every generated pool and analyzed team.
use std::collections::{BTreeMap, HashSet};

use chwteam_game::{
    BALANCE_THRESHOLD, Character, CharacterId, GADGET_OPERATION_FEE, GenerationConfig,
    INITIAL_INVESTMENT, Rarity, Role, STAT_MAX, SYNERGISTIC_CORE, StatKind, Team,
    boosted_averages,
};
use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum Violation {
    #[error("{id} {stat} = {value} exceeds {max}")]
    StatOutOfRange {
        id: CharacterId,
        stat: StatKind,
        value: u8,
        max: u8,
    },
    #[error("{id} total_stats {recorded} differs from stat sum {actual}")]
    TotalMismatch {
        id: CharacterId,
        recorded: u16,
        actual: u16,
    },
    #[error("{id} cost {cost} outside {min}..={max}")]
    CostOutOfBand {
        id: CharacterId,
        cost: u32,
        min: u32,
        max: u32,
    },
    #[error("{id} cost {cost} is not a multiple of {step}")]
    CostNotStepped { id: CharacterId, cost: u32, step: u32 },
    #[error("apprentice {id} rolled {rarity} with {experience} years")]
    ApprenticeProfile {
        id: CharacterId,
        rarity: Rarity,
        experience: u8,
    },
    #[error("pool has {actual} {role} applicants, expected {expected}")]
    Composition {
        role: Role,
        expected: usize,
        actual: usize,
    },
    #[error("duplicate applicant id {0}")]
    DuplicateId(CharacterId),
    #[error("efficiency score {0} exceeds {max}", max = STAT_MAX)]
    ScoreOutOfRange(u8),
    #[error("{field} is {actual}, expected {expected}")]
    CostMismatch {
        field: &'static str,
        expected: u32,
        actual: u32,
    },
    #[error("leader is {actual:?}, expected {expected:?}")]
    Leader {
        expected: Option<CharacterId>,
        actual: Option<CharacterId>,
    },
    #[error("Synergistic Core present={present} but all averages above 60={balanced}")]
    BalanceRule { present: bool, balanced: bool },
    #[error("team without core members scored {score} with {synergies} synergies")]
    EmptyCoreScored { score: u8, synergies: usize },
}

/// Check every applicant and the pool composition against `config`.
#[must_use]
pub fn check_pool(pool: &[Character], config: &GenerationConfig) -> Vec<Violation> {
    let mut violations = Vec::new();
    let band = config.cost;
    let mut seen = HashSet::new();

    for applicant in pool {
        let id = &applicant.id;
        if !seen.insert(id) {
            violations.push(Violation::DuplicateId(id.clone()));
        }
        for (stat, value) in applicant.stats.iter() {
            if value > STAT_MAX {
                violations.push(Violation::StatOutOfRange {
                    id: id.clone(),
                    stat,
                    value,
                    max: STAT_MAX,
                });
            }
        }
        let actual = applicant.stats.total();
        if applicant.total_stats != actual {
            violations.push(Violation::TotalMismatch {
                id: id.clone(),
                recorded: applicant.total_stats,
                actual,
            });
        }
        if !(band.min..=band.max).contains(&applicant.cost) {
            violations.push(Violation::CostOutOfBand {
                id: id.clone(),
                cost: applicant.cost,
                min: band.min,
                max: band.max,
            });
        }
        if band.step > 0 && applicant.cost % band.step != 0 {
            violations.push(Violation::CostNotStepped {
                id: id.clone(),
                cost: applicant.cost,
                step: band.step,
            });
        }
        if applicant.role == Role::Apprentice
            && (applicant.rarity == Rarity::SuperRare
                || applicant.experience != config.experience.min_years)
        {
            violations.push(Violation::ApprenticeProfile {
                id: id.clone(),
                rarity: applicant.rarity,
                experience: applicant.experience,
            });
        }
    }

    let mut expected: BTreeMap<Role, usize> = BTreeMap::new();
    for quota in &config.composition {
        *expected.entry(quota.role).or_default() += usize::from(quota.count);
    }
    for role in Role::ALL {
        let want = expected.get(&role).copied().unwrap_or(0);
        let actual = pool.iter().filter(|c| c.role == role).count();
        if want != actual {
            violations.push(Violation::Composition {
                role,
                expected: want,
                actual,
            });
        }
    }

    violations
}

/// Check cost identities, the score ceiling, leadership and the balance rule.
#[must_use]
pub fn check_team(team: &Team) -> Vec<Violation> {
    let mut violations = Vec::new();

    if team.efficiency_score > STAT_MAX {
        violations.push(Violation::ScoreOutOfRange(team.efficiency_score));
    }

    let personnel = team
        .members
        .iter()
        .map(|m| m.cost)
        .fold(0u32, u32::saturating_add);
    let operating = personnel
        .saturating_add(team.gadget.cost)
        .saturating_add(GADGET_OPERATION_FEE);
    for (field, expected, actual) in [
        ("total_personnel_cost", personnel, team.total_personnel_cost),
        ("total_operating_cost", operating, team.total_operating_cost),
        (
            "grand_total_cost",
            team.total_operating_cost.saturating_add(INITIAL_INVESTMENT),
            team.grand_total_cost,
        ),
    ] {
        if expected != actual {
            violations.push(Violation::CostMismatch {
                field,
                expected,
                actual,
            });
        }
    }

    let top = team.members.iter().map(|m| m.stats.communication).max();
    let expected_leader = team
        .members
        .iter()
        .find(|m| Some(m.stats.communication) == top)
        .map(|m| m.id.clone());
    let leaders: Vec<&Character> = team.members.iter().filter(|m| m.is_leader).collect();
    let actual_leader = leaders.first().map(|m| m.id.clone());
    if leaders.len() > 1 || actual_leader != expected_leader {
        violations.push(Violation::Leader {
            expected: expected_leader,
            actual: actual_leader,
        });
    }

    let core: Vec<&Character> = team.members.iter().filter(|m| m.is_core()).collect();
    if let Some(avg) = boosted_averages(&core, &team.gadget) {
        let balanced = StatKind::ALL
            .iter()
            .all(|&kind| avg.get(kind) > BALANCE_THRESHOLD);
        let present = team.has_synergy(SYNERGISTIC_CORE);
        if balanced != present {
            violations.push(Violation::BalanceRule { present, balanced });
        }
    } else if team.efficiency_score != 0 || !team.synergies.is_empty() {
        violations.push(Violation::EmptyCoreScored {
            score: team.efficiency_score,
            synergies: team.synergies.len(),
        });
    }

    violations
}

#[cfg(test)]
mod tests {
    use super::*;
    use chwteam_game::{Stats, build_team, find_gadget, generate_pool};
    use rand::SeedableRng;
    use rand_chacha::ChaCha20Rng;

    fn pool() -> Vec<Character> {
        generate_pool(&mut ChaCha20Rng::seed_from_u64(1337))
    }

    #[test]
    fn generated_pool_is_clean() {
        assert!(check_pool(&pool(), &GenerationConfig::default()).is_empty());
    }

    #[test]
    fn detects_tampered_applicants() {
        let mut pool = pool();
        pool[0].stats = Stats {
            knowledge: 120,
            ..pool[0].stats
        };
        pool[1].cost = 2_505;
        pool[2] = pool[3].clone();
        let violations = check_pool(&pool, &GenerationConfig::default());
        assert!(violations
            .iter()
            .any(|v| matches!(v, Violation::StatOutOfRange { value: 120, .. })));
        assert!(violations
            .iter()
            .any(|v| matches!(v, Violation::TotalMismatch { .. })));
        assert!(violations
            .iter()
            .any(|v| matches!(v, Violation::CostNotStepped { cost: 2_505, .. })));
        assert!(violations
            .iter()
            .any(|v| matches!(v, Violation::DuplicateId(_))));
    }

    #[test]
    fn detects_wrong_composition() {
        let pool = pool();
        let violations = check_pool(&pool[..19], &GenerationConfig::default());
        assert_eq!(violations.len(), 1);
        assert!(matches!(violations[0], Violation::Composition { .. }));
    }

    #[test]
    fn built_team_is_clean() {
        let team = build_team(&pool()[..5], find_gadget("g2").unwrap());
        assert!(check_team(&team).is_empty());
    }

    #[test]
    fn detects_tampered_team() {
        let mut team = build_team(&pool()[..5], find_gadget("g1").unwrap());
        team.grand_total_cost += 10;
        team.efficiency_score = 120;
        for member in &mut team.members {
            member.is_leader = true;
        }
        let messages: Vec<String> = check_team(&team).iter().map(ToString::to_string).collect();
        assert!(messages.iter().any(|m| m.starts_with("grand_total_cost")));
        assert!(messages.iter().any(|m| m.contains("exceeds 99")));
        assert!(messages.iter().any(|m| m.starts_with("leader")));
    }

    #[test]
    fn oversized_costs_saturate_like_the_builder() {
        let mut members = pool()[..5].to_vec();
        for member in &mut members {
            member.cost = u32::MAX / 2;
        }
        let team = build_team(&members, find_gadget("g3").unwrap());
        assert_eq!(team.grand_total_cost, u32::MAX);
        assert!(check_team(&team).is_empty());
    }

    #[test]
    fn balance_rule_tracks_scorer_threshold() {
        let mut members = pool()[..5].to_vec();
        for member in &mut members {
            member.role = Role::Technician;
            member.stats = Stats::uniform(61);
        }
        let team = build_team(&members, find_gadget("g1").unwrap());
        assert!(team.has_synergy(SYNERGISTIC_CORE));
        assert!(check_team(&team).is_empty());

        let mut team = team;
        team.synergies.retain(|s| s.name != SYNERGISTIC_CORE);
        assert!(
            check_team(&team)
                .iter()
                .any(|v| matches!(v, Violation::BalanceRule { balanced: true, present: false }))
        );
    }
}
