use std::cmp::Reverse;
use std::fmt;
use std::str::FromStr;

use anyhow::bail;
use chwteam_game::{Character, CharacterId, TEAM_SIZE};
use rand::SeedableRng;
use rand::seq::SliceRandom;
use rand_chacha::ChaCha20Rng;
use serde::Serialize;

/// Policy interface for automated drafting.
pub trait DraftPolicy {
    /// Name used for logging/debug output.
    fn name(&self) -> &'static str;

    /// Pick up to five distinct applicants from `pool`, in selection order.
    fn draft(&mut self, pool: &[Character]) -> Vec<CharacterId>;
}

/// Built-in draft strategies for automated sweeps.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum DraftStrategy {
    Greedy,
    Budget,
    Core,
    Communicator,
    Random,
}

impl DraftStrategy {
    pub const ALL: [Self; 5] = [
        Self::Greedy,
        Self::Budget,
        Self::Core,
        Self::Communicator,
        Self::Random,
    ];

    #[must_use]
    pub const fn key(self) -> &'static str {
        match self {
            Self::Greedy => "greedy",
            Self::Budget => "budget",
            Self::Core => "core",
            Self::Communicator => "communicator",
            Self::Random => "random",
        }
    }

    #[must_use]
    pub const fn label(self) -> &'static str {
        match self {
            Self::Greedy => "Greedy",
            Self::Budget => "Budget",
            Self::Core => "Core Only",
            Self::Communicator => "Communicator",
            Self::Random => "Random",
        }
    }

    #[must_use]
    pub const fn description(self) -> &'static str {
        match self {
            Self::Greedy => "Top five applicants by total stats",
            Self::Budget => "Five cheapest applicants",
            Self::Core => "Top five non-apprentices by total stats",
            Self::Communicator => "Top five applicants by communication",
            Self::Random => "Five applicants drawn uniformly (seeded)",
        }
    }

    #[must_use]
    pub fn create_policy(self, seed: u64) -> Box<dyn DraftPolicy> {
        match self {
            Self::Greedy => Box::new(GreedyPolicy),
            Self::Budget => Box::new(BudgetPolicy),
            Self::Core => Box::new(CorePolicy),
            Self::Communicator => Box::new(CommunicatorPolicy),
            Self::Random => Box::new(RandomPolicy::new(seed)),
        }
    }
}

impl fmt::Display for DraftStrategy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

impl FromStr for DraftStrategy {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let key = s.trim().to_ascii_lowercase();
        match Self::ALL.into_iter().find(|strategy| strategy.key() == key) {
            Some(strategy) => Ok(strategy),
            None => bail!("Unknown strategy: {s}"),
        }
    }
}

/// Ids of the first five applicants after a stable sort by `key`.
fn top_by<K: Ord>(pool: &[Character], key: impl Fn(&Character) -> K) -> Vec<CharacterId> {
    let mut ranked: Vec<&Character> = pool.iter().collect();
    ranked.sort_by_key(|c| key(c));
    ranked
        .into_iter()
        .take(TEAM_SIZE)
        .map(|c| c.id.clone())
        .collect()
}

struct GreedyPolicy;
struct BudgetPolicy;
struct CorePolicy;
struct CommunicatorPolicy;

struct RandomPolicy {
    rng: ChaCha20Rng,
}

impl RandomPolicy {
    fn new(seed: u64) -> Self {
        let mut rng = ChaCha20Rng::seed_from_u64(seed);
        // separate stream from the pool generator seeded with the same value
        rng.set_stream(1);
        Self { rng }
    }
}

impl DraftPolicy for GreedyPolicy {
    fn name(&self) -> &'static str {
        "Greedy"
    }

    fn draft(&mut self, pool: &[Character]) -> Vec<CharacterId> {
        top_by(pool, |c| Reverse(c.total_stats))
    }
}

impl DraftPolicy for BudgetPolicy {
    fn name(&self) -> &'static str {
        "Budget"
    }

    fn draft(&mut self, pool: &[Character]) -> Vec<CharacterId> {
        top_by(pool, |c| c.cost)
    }
}

impl DraftPolicy for CorePolicy {
    fn name(&self) -> &'static str {
        "Core Only"
    }

    fn draft(&mut self, pool: &[Character]) -> Vec<CharacterId> {
        // apprentices sort last, so short core pools still fill the roster
        top_by(pool, |c| (!c.is_core(), Reverse(c.total_stats)))
    }
}

impl DraftPolicy for CommunicatorPolicy {
    fn name(&self) -> &'static str {
        "Communicator"
    }

    fn draft(&mut self, pool: &[Character]) -> Vec<CharacterId> {
        top_by(pool, |c| Reverse(c.stats.communication))
    }
}

impl DraftPolicy for RandomPolicy {
    fn name(&self) -> &'static str {
        "Random"
    }

    fn draft(&mut self, pool: &[Character]) -> Vec<CharacterId> {
        pool.choose_multiple(&mut self.rng, TEAM_SIZE)
            .map(|c| c.id.clone())
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chwteam_game::{Rarity, Role, Stats};

    fn applicant(id: &str, role: Role, stats: Stats, cost: u32) -> Character {
        Character::new(CharacterId::new(id), "Kai Chen", role, Rarity::Normal, stats, cost, 1)
    }

    fn pool() -> Vec<Character> {
        vec![
            applicant("a1", Role::Apprentice, Stats::new(90, 90, 90, 90), 2_500),
            applicant("t1", Role::Technician, Stats::new(40, 30, 99, 50), 3_100),
            applicant("e1", Role::ExamineAi, Stats::new(70, 95, 40, 40), 3_400),
            applicant("r1", Role::TreatmentAi, Stats::new(80, 20, 30, 70), 2_900),
            applicant("a2", Role::Apprentice, Stats::new(20, 60, 20, 20), 2_510),
            applicant("e2", Role::ExamineAi, Stats::new(50, 70, 30, 30), 2_700),
            applicant("t2", Role::Technician, Stats::new(30, 40, 99, 40), 3_900),
        ]
    }

    fn ids(picks: &[CharacterId]) -> Vec<&str> {
        picks.iter().map(CharacterId::as_str).collect()
    }

    #[test]
    fn parses_strategy_keys() {
        assert_eq!("Greedy".parse::<DraftStrategy>().unwrap(), DraftStrategy::Greedy);
        assert_eq!(" core ".parse::<DraftStrategy>().unwrap(), DraftStrategy::Core);
        assert!("monte-carlo".parse::<DraftStrategy>().is_err());
        assert_eq!(DraftStrategy::Core.to_string(), "Core Only");
    }

    #[test]
    fn greedy_takes_highest_totals() {
        let picks = DraftStrategy::Greedy.create_policy(0).draft(&pool());
        assert_eq!(ids(&picks), vec!["a1", "e1", "t1", "t2", "r1"]);
    }

    #[test]
    fn budget_takes_cheapest() {
        let picks = DraftStrategy::Budget.create_policy(0).draft(&pool());
        assert_eq!(ids(&picks), vec!["a1", "a2", "e2", "r1", "t1"]);
    }

    #[test]
    fn core_skips_apprentices() {
        let picks = DraftStrategy::Core.create_policy(0).draft(&pool());
        assert_eq!(ids(&picks), vec!["e1", "t1", "t2", "r1", "e2"]);
    }

    #[test]
    fn communicator_ranks_by_communication() {
        let picks = DraftStrategy::Communicator.create_policy(0).draft(&pool());
        assert_eq!(ids(&picks), vec!["e1", "a1", "e2", "a2", "t2"]);
    }

    #[test]
    fn random_is_seeded_and_distinct() {
        let pool = pool();
        let first = DraftStrategy::Random.create_policy(9).draft(&pool);
        let again = DraftStrategy::Random.create_policy(9).draft(&pool);
        assert_eq!(first, again);
        assert_eq!(first.len(), TEAM_SIZE);
        let mut unique = first.clone();
        unique.sort();
        unique.dedup();
        assert_eq!(unique.len(), TEAM_SIZE);
    }
}
